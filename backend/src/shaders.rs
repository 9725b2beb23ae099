use super::glutils::*;
use super::math::*;
use anyhow::{anyhow, bail, Result};
use gl::*;
use std::ffi::CString;

/// A linked vertex + fragment program. Deleted on drop, so it must not
/// outlive the GL context it was created in.
#[derive(Debug)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    pub fn from_str(vertex_code: &str, fragment_code: &str) -> Result<Shaders> {
        // create vertex shader
        let vertex_shader = unsafe { gl::CreateShader(VERTEX_SHADER) };
        if vertex_shader == 0 {
            bail!("gl::createShader(VERTEX_SHADER) failed");
        }

        if let Err(e) = Self::compile(vertex_shader, vertex_code) {
            unsafe { gl::DeleteShader(vertex_shader) };
            bail!("vertex shader compilation error: {}", e);
        }

        // create fragment shader
        let fragment_shader = unsafe { gl::CreateShader(FRAGMENT_SHADER) };
        if fragment_shader == 0 {
            unsafe { gl::DeleteShader(vertex_shader) };
            bail!("gl::createShader(FRAGMENT_SHADER) failed");
        }

        if let Err(e) = Self::compile(fragment_shader, fragment_code) {
            unsafe { gl::DeleteShader(vertex_shader) };
            unsafe { gl::DeleteShader(fragment_shader) };
            bail!("fragment shader compilation error: {}", e);
        }

        // create program and link shaders
        let shader_program = unsafe { gl::CreateProgram() };
        unsafe { gl::AttachShader(shader_program, vertex_shader) };
        unsafe { gl::AttachShader(shader_program, fragment_shader) };
        unsafe { gl::LinkProgram(shader_program) };

        // not needed anymore
        unsafe { gl::DeleteShader(vertex_shader) };
        unsafe { gl::DeleteShader(fragment_shader) };

        let mut success = 0;
        unsafe {
            gl::GetProgramiv(shader_program, LINK_STATUS, &mut success);
        }
        if success == 0 {
            let log = Self::info_log(|cap, len, buf| unsafe {
                gl::GetProgramInfoLog(shader_program, cap, len, buf)
            });
            unsafe { gl::DeleteProgram(shader_program) };
            bail!("program link error: {}", log);
        }
        check_gl_err()?;

        Ok(Shaders {
            program_id: shader_program,
        })
    }

    fn compile(shader_id: u32, shader_code: &str) -> Result<(), String> {
        let len: i32 = shader_code
            .len()
            .try_into()
            .map_err(|_| "shader source too long".to_string())?;
        unsafe {
            gl::ShaderSource(
                shader_id,
                1,
                &(shader_code.as_bytes().as_ptr().cast()),
                &len,
            );
        }

        unsafe { gl::CompileShader(shader_id) };

        // check if there are compilation errors
        let mut success = 0;
        unsafe {
            gl::GetShaderiv(shader_id, COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            return Err(Self::info_log(|cap, len, buf| unsafe {
                gl::GetShaderInfoLog(shader_id, cap, len, buf)
            }));
        }
        Ok(())
    }

    fn info_log(read: impl FnOnce(i32, &mut i32, *mut gl::types::GLchar)) -> String {
        let mut v: Vec<u8> = vec![0; 1024];
        let mut log_len = 0_i32;
        read(v.len() as i32, &mut log_len, v.as_mut_ptr().cast());
        v.truncate(log_len.max(0) as usize);
        String::from_utf8_lossy(&v).to_string()
    }

    pub fn get_uniform_location(&self, name: &str) -> Result<i32> {
        let c_name = CString::new(name)
            .map_err(|_| anyhow!("get_uniform_location: CString::new failed for '{}'", name))?;
        let location = unsafe { gl::GetUniformLocation(self.program_id, c_name.as_ptr().cast()) };
        if location == -1 {
            bail!(
                "program({}): location '{}' does not correspond to an active uniform variable in program",
                self.program_id,
                name
            );
        }
        Ok(location)
    }

    pub fn use_program(&self) {
        unsafe { gl::UseProgram(self.program_id) };
    }

    pub fn set_i32(&self, location: i32, value: i32) {
        unsafe { gl::Uniform1i(location, value) };
    }

    pub fn set_vec2(&self, location: i32, v: &Vec2) {
        unsafe { gl::Uniform2f(location, v.x, v.y) };
    }

    pub fn set_vec4(&self, location: i32, v: &Vec4) {
        unsafe { gl::Uniform4fv(location, 1, v.as_array().as_ptr()) };
    }
}

impl Drop for Shaders {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.program_id) };
    }
}
