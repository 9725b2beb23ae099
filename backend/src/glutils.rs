use anyhow::{bail, Result};
use gl::{types::*, *};
use log::{info, warn};
use std::ffi::CStr;

fn gl_err_name(err: GLenum) -> &'static str {
    match err {
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

pub fn check_gl_err() -> Result<()> {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return Ok(());
    }
    bail!("error: {} ({:#x})", gl_err_name(err), err);
}

/// Per-frame GL error check. Logs only when the error code changes.
#[derive(Debug, Default)]
pub struct GlErrorWatch {
    last: GLenum,
}

impl GlErrorWatch {
    pub fn new() -> Self {
        Self { last: NO_ERROR }
    }

    pub fn check(&mut self, what: &str) {
        let err = unsafe { gl::GetError() };
        if self.observe(err) {
            warn!("{what}: error: {} ({:#x})", gl_err_name(err), err);
        }
    }

    /// Records `err`; true if it is an error that differs from the last one seen.
    fn observe(&mut self, err: GLenum) -> bool {
        let changed = err != self.last;
        self.last = err;
        changed && err != NO_ERROR
    }
}

fn gl_string(name: GLenum) -> String {
    let ptr = unsafe { gl::GetString(name) };
    if ptr.is_null() {
        return "<unavailable>".to_string();
    }
    unsafe { CStr::from_ptr(ptr.cast()) }
        .to_string_lossy()
        .into_owned()
}

pub fn print_opengl_info() {
    info!("GL_VENDOR = {}", gl_string(VENDOR));
    info!("GL_RENDERER = {}", gl_string(RENDERER));
    info!("GL_VERSION = {}", gl_string(VERSION));

    let mut mtu: i32 = 0;
    unsafe { gl::GetIntegerv(MAX_TEXTURE_IMAGE_UNITS, &mut mtu) };
    info!("MAX_TEXTURE_IMAGE_UNITS = {}", mtu);

    unsafe { gl::GetIntegerv(MAX_COMBINED_TEXTURE_IMAGE_UNITS, &mut mtu) };
    info!("MAX_COMBINED_TEXTURE_IMAGE_UNITS = {}", mtu);
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_buffer_data_element_stat<T: Sized>(buffer: &[T]) {
    unsafe {
        gl::BufferData(
            ELEMENT_ARRAY_BUFFER,
            std::mem::size_of_val(buffer) as isize,
            buffer.as_ptr().cast(),
            STATIC_DRAW,
        )
    };
}

pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    unsafe {
        gl::VertexAttribPointer(
            index,
            size as i32,
            FLOAT,
            FALSE,
            (stride as usize * std::mem::size_of::<f32>()) as i32,
            (pointer * std::mem::size_of::<f32>()) as *const _,
        )
    };
    unsafe { gl::EnableVertexAttribArray(index) };
}
