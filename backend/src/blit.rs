use super::glutils::*;
use super::math::*;
use super::shaders::Shaders;
use super::texture::Texture;
use anyhow::Result;
use gl::*;

const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;

uniform vec2 u_viewport;
uniform vec4 u_dest;

out vec2 v_uv;

void main() {
    vec2 px = u_dest.xy + a_pos * u_dest.zw;
    vec2 ndc = px / u_viewport * 2.0 - 1.0;
    gl_Position = vec4(ndc.x, -ndc.y, 0.0, 1.0);
    v_uv = a_pos;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 v_uv;

uniform sampler2D u_texture;

out vec4 frag_color;

void main() {
    frag_color = texture(u_texture, v_uv);
}
"#;

// unit quad, two triangles via indices
const QUAD_VERTICES: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Draws textures as axis-aligned rectangles in window pixel coordinates,
/// origin at the top-left corner. Alpha blending is enabled so RGBA
/// textures composite over whatever was drawn before them.
#[derive(Debug)]
pub struct Blitter {
    shaders: Shaders,
    vao: u32,
    vbo: u32,
    ebo: u32,
    viewport_loc: i32,
    dest_loc: i32,
    texture_loc: i32,
}

impl Blitter {
    pub fn new() -> Result<Blitter> {
        let shaders = Shaders::from_str(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let viewport_loc = shaders.get_uniform_location("u_viewport")?;
        let dest_loc = shaders.get_uniform_location("u_dest")?;
        let texture_loc = shaders.get_uniform_location("u_texture")?;

        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);
            gl::BindVertexArray(vao);
            gl::BindBuffer(ARRAY_BUFFER, vbo);
        }
        gl_buffer_data_arr_stat(&QUAD_VERTICES);
        unsafe { gl::BindBuffer(ELEMENT_ARRAY_BUFFER, ebo) };
        gl_buffer_data_element_stat(&QUAD_INDICES);
        gl_vertex_attrib_ptr_enab(0, 2, 2, 0);
        unsafe { gl::BindVertexArray(0) };

        let blitter = Blitter {
            shaders,
            vao,
            vbo,
            ebo,
            viewport_loc,
            dest_loc,
            texture_loc,
        };
        check_gl_err()?;

        unsafe {
            gl::Enable(BLEND);
            gl::BlendFunc(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);
        }
        Ok(blitter)
    }

    /// Draws `texture` unscaled with its top-left corner at `(x, y)`.
    pub fn draw(&self, texture: &Texture, x: i32, y: i32, viewport: (u32, u32)) {
        let dest = Vec4::new(
            x as f32,
            y as f32,
            texture.width() as f32,
            texture.height() as f32,
        );

        self.shaders.use_program();
        self.shaders
            .set_vec2(self.viewport_loc, &Vec2::new(viewport.0 as f32, viewport.1 as f32));
        self.shaders.set_vec4(self.dest_loc, &dest);
        self.shaders.set_i32(self.texture_loc, 0);
        texture.bind(0);

        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                TRIANGLES,
                QUAD_INDICES.len() as i32,
                UNSIGNED_INT,
                std::ptr::null(),
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for Blitter {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ebo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
