use {
    anyhow::Result,
    derive_more::Debug,
    mipview_gl::Texture,
    mipview_scene::{TextureData, TextureHandle},
    std::{collections::HashMap, path::Path},
};

/// GPU textures keyed by handle. Failed loads hand out the null handle, which
/// never resolves to a texture.
#[derive(Debug, Default)]
pub struct Assets {
    #[debug("{}", textures.len())]
    textures: HashMap<TextureHandle, Texture>,
}

impl Assets {
    pub fn new() -> Self { Self::default() }

    /// Decodes (flipped vertically) and uploads a texture with mipmaps.
    pub fn load_texture_2d(&mut self, gl: &glow::Context, path: impl AsRef<Path>) -> TextureHandle {
        let path = path.as_ref();
        match self.try_load_texture_2d(gl, path) {
            Ok(handle) => handle,
            Err(err) => {
                log::error!("Failed to load texture {path:?}: {err:#}");
                TextureHandle::null()
            }
        }
    }

    fn try_load_texture_2d(&mut self, gl: &glow::Context, path: &Path) -> Result<TextureHandle> {
        let data = TextureData::load(path, true)?;
        self.add_texture(gl, &data)
    }

    pub fn add_texture(&mut self, gl: &glow::Context, data: &TextureData) -> Result<TextureHandle> {
        let texture = Texture::new(gl, data)?;
        let handle = TextureHandle::new();
        self.textures.insert(handle, texture);
        Ok(handle)
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&Texture> {
        match handle.is_null() {
            true => None,
            false => self.textures.get(&handle),
        }
    }

    pub fn len(&self) -> usize { self.textures.len() }

    pub fn is_empty(&self) -> bool { self.textures.is_empty() }

    pub fn destroy(&mut self, gl: &glow::Context) {
        for (_, texture) in self.textures.drain() {
            texture.destroy(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle_never_resolves() {
        let assets = Assets::new();
        assert_eq!(assets.texture(TextureHandle::null()).is_none(), true);
        assert_eq!(assets.texture(TextureHandle::new()).is_none(), true);
        assert_eq!(assets.is_empty(), true);
    }
}
