use {
    anyhow::{anyhow, Context, Result},
    derive_more::Debug,
    image::DynamicImage,
    std::path::Path,
    tracing::instrument,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn from_channel_count(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(PixelFormat::Red),
            3 => Some(PixelFormat::Rgb),
            4 => Some(PixelFormat::Rgba),
            _ => None,
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            PixelFormat::Red => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Decoded 8-bit image, rows tightly packed, first row at the bottom when
/// loaded with `flip` set.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    #[debug("{}", data.len())]
    pub data: Vec<u8>,
}

impl TextureData {
    #[instrument(level = "debug")]
    pub fn load(path: &Path, flip: bool) -> Result<Self> {
        let image = image::open(path).with_context(|| format!("Failed to decode {path:?}"))?;
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("texture");

        Self::from_image(name, image, flip)
    }

    pub fn from_image(name: &str, image: DynamicImage, flip: bool) -> Result<Self> {
        let channels = image.color().channel_count();
        let format = PixelFormat::from_channel_count(channels)
            .ok_or_else(|| anyhow!("Unsupported channel count {channels} in texture {name:?}"))?;
        let image = match flip {
            true => image.flipv(),
            false => image,
        };
        let (width, height) = (image.width(), image.height());
        let data = match format {
            PixelFormat::Red => image.into_luma8().into_raw(),
            PixelFormat::Rgb => image.into_rgb8().into_raw(),
            PixelFormat::Rgba => image.into_rgba8().into_raw(),
        };

        log::debug!("Decoded texture {name:?} -> {width}x{height} {format:?}");

        Ok(Self {
            name: name.to_string(),
            width,
            height,
            format,
            data,
        })
    }

    pub fn row_bytes(&self) -> usize { self.width as usize * self.format.channel_count() }
}
