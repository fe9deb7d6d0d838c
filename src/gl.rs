//! WebGL backend: the one module that touches the GL context.
//!
//! [`GlRenderer`] implements the [`Renderer`] capability over a
//! `WebGlRenderingContext` with a single shader program: positions
//! transformed by a `mat3` uniform, fragments filled with a `vec4` color
//! uniform. Construction is the only fallible step; every fallible browser
//! call propagates through `Result<_, JsValue>`.
//!
//! GL state is ambient (bound program, bound buffer), so the vertex upload
//! rebinds everything the following draw depends on instead of trusting
//! whatever a previous shape left behind.

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use js_sys::Float32Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlRenderingContext, WebGlShader,
    WebGlUniformLocation,
};

use crate::color::Rgba;
use crate::matrix::Mat3;
use crate::render::{Primitive, Renderer};

/// Positions are row vectors: `pos · M` is computed as `M-as-loaded · pos`
/// because the row-major floats are uploaded untransposed.
const VERTEX_SHADER: &str = r"
attribute vec2 a_position;
uniform mat3 u_transform;

void main() {
    vec3 pos = u_transform * vec3(a_position, 1.0);
    gl_Position = vec4(pos.xy, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"
precision mediump float;
uniform vec4 u_color;

void main() {
    gl_FragColor = u_color;
}
";

/// WebGL implementation of the renderer capability.
pub struct GlRenderer {
    gl: WebGlRenderingContext,
    program: WebGlProgram,
    position_buffer: WebGlBuffer,
    position_loc: u32,
    transform_loc: WebGlUniformLocation,
    color_loc: WebGlUniformLocation,
}

impl GlRenderer {
    /// Acquire a WebGL context from `canvas`, compile and link the shader
    /// program, and set up the vertex buffer.
    ///
    /// # Errors
    ///
    /// Fails when the canvas has no WebGL support, a shader does not compile
    /// (the GL info log is carried in the error), the program does not link,
    /// or a location/buffer lookup comes back empty.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let gl = canvas
            .get_context("webgl")?
            .ok_or_else(|| JsValue::from_str("WebGL is not supported on this canvas"))?
            .dyn_into::<WebGlRenderingContext>()?;

        let vertex = compile_shader(&gl, WebGlRenderingContext::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment =
            compile_shader(&gl, WebGlRenderingContext::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let position_loc = gl.get_attrib_location(&program, "a_position");
        if position_loc < 0 {
            return Err(JsValue::from_str("a_position attribute not found"));
        }
        let transform_loc = gl
            .get_uniform_location(&program, "u_transform")
            .ok_or_else(|| JsValue::from_str("u_transform uniform not found"))?;
        let color_loc = gl
            .get_uniform_location(&program, "u_color")
            .ok_or_else(|| JsValue::from_str("u_color uniform not found"))?;
        let position_buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("failed to create vertex buffer"))?;

        Ok(Self {
            gl,
            program,
            position_buffer,
            position_loc: position_loc as u32,
            transform_loc,
            color_loc,
        })
    }
}

impl Renderer for GlRenderer {
    fn set_viewport(&mut self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn clear(&mut self) {
        self.gl.clear_color(0.0, 0.0, 0.0, 0.0);
        self.gl.clear(WebGlRenderingContext::COLOR_BUFFER_BIT);
    }

    fn upload_vertices(&mut self, _primitive: Primitive, coords: &[f64]) {
        self.gl.use_program(Some(&self.program));
        self.gl
            .bind_buffer(WebGlRenderingContext::ARRAY_BUFFER, Some(&self.position_buffer));

        let data: Vec<f32> = coords.iter().map(|&c| c as f32).collect();
        let array = Float32Array::from(data.as_slice());
        self.gl.buffer_data_with_array_buffer_view(
            WebGlRenderingContext::ARRAY_BUFFER,
            &array,
            WebGlRenderingContext::STATIC_DRAW,
        );

        self.gl.enable_vertex_attrib_array(self.position_loc);
        self.gl.vertex_attrib_pointer_with_i32(
            self.position_loc,
            2,
            WebGlRenderingContext::FLOAT,
            false,
            0,
            0,
        );
    }

    fn set_transform(&mut self, transform: &Mat3) {
        let mut data = [0.0f32; 9];
        for (out, value) in data.iter_mut().zip(transform.0) {
            *out = value as f32;
        }
        self.gl
            .uniform_matrix3fv_with_f32_array(Some(&self.transform_loc), false, &data);
    }

    fn set_color(&mut self, color: Rgba) {
        self.gl.uniform4f(
            Some(&self.color_loc),
            color.r as f32,
            color.g as f32,
            color.b as f32,
            color.a as f32,
        );
    }

    fn draw(&mut self, primitive: Primitive, vertex_count: usize) {
        let mode = match primitive {
            Primitive::Lines => WebGlRenderingContext::LINES,
            Primitive::Triangles => WebGlRenderingContext::TRIANGLES,
        };
        self.gl.draw_arrays(mode, 0, vertex_count as i32);
    }
}

fn compile_shader(
    gl: &WebGlRenderingContext,
    kind: u32,
    source: &str,
) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| JsValue::from_str("failed to create shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, WebGlRenderingContext::COMPILE_STATUS)
        .as_bool()
        == Some(true)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile error: {log}")))
    }
}

fn link_program(
    gl: &WebGlRenderingContext,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("failed to create program"))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, WebGlRenderingContext::LINK_STATUS)
        .as_bool()
        == Some(true)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&format!("program link error: {log}")))
    }
}
