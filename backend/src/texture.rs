use super::glutils::*;
use anyhow::{ensure, Result};
use gl::{types::*, *};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }

    fn gl_format(self) -> GLenum {
        match self {
            PixelFormat::Rgb => RGB,
            PixelFormat::Rgba => RGBA,
        }
    }

    fn gl_internal_format(self) -> GLint {
        match self {
            PixelFormat::Rgb => RGB8 as GLint,
            PixelFormat::Rgba => RGBA8 as GLint,
        }
    }
}

/// Fixed-size 2D texture that is refilled from CPU memory.
///
/// Row 0 of uploaded data maps to texture coordinate `t = 0`.
#[derive(Debug)]
pub struct Texture {
    id: u32,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Texture {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Texture> {
        let params = [
            (TEXTURE_2D, TEXTURE_WRAP_S, CLAMP_TO_EDGE),
            (TEXTURE_2D, TEXTURE_WRAP_T, CLAMP_TO_EDGE),
            (TEXTURE_2D, TEXTURE_MIN_FILTER, NEAREST),
            (TEXTURE_2D, TEXTURE_MAG_FILTER, NEAREST),
        ];

        let mut texture = 0;
        unsafe { gl::GenTextures(1, &mut texture) };
        unsafe { gl::BindTexture(TEXTURE_2D, texture) };

        // owned from here on, so an error below still deletes it
        let texture = Texture {
            id: texture,
            width,
            height,
            format,
        };

        for (t, n, p) in &params {
            unsafe { gl::TexParameteri(*t, *n, *p as i32) };
        }

        unsafe {
            gl::TexImage2D(
                TEXTURE_2D,
                0,
                format.gl_internal_format(),
                width as i32,
                height as i32,
                0,
                format.gl_format(),
                UNSIGNED_BYTE,
                std::ptr::null(),
            )
        };
        check_gl_err()?;

        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replaces the whole texture with `data`, tightly packed rows top to bottom.
    pub fn upload(&self, data: &[u8]) -> Result<()> {
        let expected = self.width as usize * self.height as usize * self.format.bytes_per_pixel();
        ensure!(
            data.len() == expected,
            "texture upload of {} bytes, expected {} for {}x{} {:?}",
            data.len(),
            expected,
            self.width,
            self.height,
            self.format
        );

        unsafe {
            gl::BindTexture(TEXTURE_2D, self.id);
            gl::PixelStorei(UNPACK_ALIGNMENT, 1);
            gl::TexSubImage2D(
                TEXTURE_2D,
                0,
                0,
                0,
                self.width as i32,
                self.height as i32,
                self.format.gl_format(),
                UNSIGNED_BYTE,
                data.as_ptr().cast(),
            );
        }
        Ok(())
    }

    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(TEXTURE0 + unit);
            gl::BindTexture(TEXTURE_2D, self.id);
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}
