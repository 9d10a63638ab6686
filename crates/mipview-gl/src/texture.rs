use {
    anyhow::{anyhow, bail, Result},
    derive_more::Debug,
    glow::HasContext,
    mipview_scene::{PixelFormat, TextureData},
    tracing::instrument,
};

/// Minification filters a mipmapped texture can be sampled with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MinFilter {
    /// Base level only.
    Linear,
    #[default]
    LinearMipmapLinear,
    NearestMipmapLinear,
    LinearMipmapNearest,
    NearestMipmapNearest,
}

impl MinFilter {
    pub fn gl_enum(&self) -> u32 {
        match self {
            MinFilter::Linear => glow::LINEAR,
            MinFilter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
            MinFilter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
            MinFilter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
            MinFilter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        }
    }
}

/// GL (internal format, pixel format) pair for a decoded pixel layout.
pub fn gl_format(format: PixelFormat) -> (u32, u32) {
    match format {
        PixelFormat::Red => (glow::R8, glow::RED),
        PixelFormat::Rgb => (glow::RGB8, glow::RGB),
        PixelFormat::Rgba => (glow::RGBA8, glow::RGBA),
    }
}

/// Mipmapped, repeating 2D texture.
#[derive(Debug)]
pub struct Texture {
    name: String,
    handle: glow::Texture,
    #[debug("{}x{}", width, height)]
    width: u32,
    #[debug(skip)]
    height: u32,
    format: PixelFormat,
}

impl Texture {
    #[instrument(level = "debug", skip(gl))]
    pub fn new(gl: &glow::Context, data: &TextureData) -> Result<Self> {
        let expected = data.row_bytes() * data.height as usize;
        if data.data.len() != expected {
            bail!(
                "Texture {:?} has {} bytes, expected {expected}",
                data.name,
                data.data.len()
            );
        }

        let (internal_format, format) = gl_format(data.format);
        let handle = unsafe { gl.create_texture() }.map_err(|err| anyhow!(err))?;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                MinFilter::default().gl_enum() as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            // Rows are tightly packed, e.g. 3-byte RGB rows of odd width.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format as i32,
                data.width as i32,
                data.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(&data.data)),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        let texture = Self {
            name: data.name.clone(),
            handle,
            width: data.width,
            height: data.height,
            format: data.format,
        };
        log::debug!("Created {texture:?}");
        Ok(texture)
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn handle(&self) -> glow::Texture { self.handle }

    pub fn extent(&self) -> (u32, u32) { (self.width, self.height) }

    pub fn format(&self) -> PixelFormat { self.format }

    pub fn bind(&self, gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.handle));
        }
    }

    pub fn unbind(gl: &glow::Context, unit: u32) {
        unsafe {
            gl.active_texture(glow::TEXTURE0 + unit);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
    }

    /// Sampling state setters act on the texture bound to the active unit.
    pub fn set_min_filter(&self, gl: &glow::Context, filter: MinFilter) {
        unsafe {
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                filter.gl_enum() as i32,
            )
        };
    }

    pub fn set_lod_bias(&self, gl: &glow::Context, bias: f32) {
        unsafe { gl.tex_parameter_f32(glow::TEXTURE_2D, glow::TEXTURE_LOD_BIAS, bias) };
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.handle) };
        log::trace!("Destroyed {self:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_filter_enums() {
        let table = [
            (MinFilter::Linear, glow::LINEAR),
            (MinFilter::LinearMipmapLinear, glow::LINEAR_MIPMAP_LINEAR),
            (MinFilter::NearestMipmapLinear, glow::NEAREST_MIPMAP_LINEAR),
            (MinFilter::LinearMipmapNearest, glow::LINEAR_MIPMAP_NEAREST),
            (MinFilter::NearestMipmapNearest, glow::NEAREST_MIPMAP_NEAREST),
        ];
        for (filter, expected) in table {
            assert_eq!(filter.gl_enum(), expected);
        }
        assert_eq!(MinFilter::default(), MinFilter::LinearMipmapLinear);
    }

    #[test]
    fn test_gl_formats() {
        assert_eq!(gl_format(PixelFormat::Red), (glow::R8, glow::RED));
        assert_eq!(gl_format(PixelFormat::Rgb), (glow::RGB8, glow::RGB));
        assert_eq!(gl_format(PixelFormat::Rgba), (glow::RGBA8, glow::RGBA));
    }
}
