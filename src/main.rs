use {mipview::prelude::*, std::path::PathBuf};

fn main() -> anyhow::Result<()> {
    let scene_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::default().scene_path(scene_path);

    App::new(config).run()
}
