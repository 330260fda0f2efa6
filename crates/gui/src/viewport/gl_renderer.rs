use std::collections::BTreeMap;

use glow::HasContext;

use super::camera::TurntableCamera;
use super::mesh::{self, LineMeshData, MeshData};
use crate::state::settings::GridSettings;

// ── Render parameters ────────────────────────────────────────

/// Parameters for rendering the viewport
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Show floor grid
    pub grid_visible: bool,
    /// Background color RGB
    pub bg_color: [u8; 3],
}

// ── GPU buffers ──────────────────────────────────────────────

/// Interleaved float attributes: (shader location, component count)
const MESH_LAYOUT: &[(u32, i32)] = &[(0, 3), (1, 3), (2, 3)];
const LINE_LAYOUT: &[(u32, i32)] = &[(0, 3), (1, 4)];

/// A vertex array with its buffers; `ibo` is set for indexed meshes
struct GpuBuffers {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: Option<glow::Buffer>,
    count: i32,
}

impl GpuBuffers {
    fn release(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            if let Some(ibo) = self.ibo {
                gl.delete_buffer(ibo);
            }
        }
    }

    /// Draw as triangles when indexed, as a line list otherwise
    unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        match self.ibo {
            Some(ibo) => {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
                gl.draw_elements(glow::TRIANGLES, self.count, glow::UNSIGNED_INT, 0);
            }
            None => gl.draw_arrays(glow::LINES, 0, self.count),
        }
        gl.bind_vertex_array(None);
    }
}

/// Grid parameters the current buffer was built with
#[derive(Clone, Copy, PartialEq)]
struct GridKey {
    range: i32,
    size: f32,
    opacity: f32,
    floor_y: f32,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    line_program: glow::Program,
    grid: Option<GpuBuffers>,
    grid_key: Option<GridKey>,
    /// Model parts keyed by node name
    model_meshes: BTreeMap<String, GpuBuffers>,
    /// Viewer revision the uploaded meshes belong to
    uploaded_revision: Option<u64>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        let line_program = compile_program(gl, LINE_VERT, LINE_FRAG)?;

        Ok(Self {
            mesh_program,
            line_program,
            grid: None,
            grid_key: None,
            model_meshes: BTreeMap::new(),
            uploaded_revision: None,
        })
    }

    /// Rebuild the floor grid when settings or the model's floor change
    pub fn update_grid(
        &mut self,
        gl: &glow::Context,
        settings: &GridSettings,
        floor_y: f32,
    ) -> Result<(), String> {
        let key = GridKey {
            range: settings.range,
            size: settings.size,
            opacity: settings.opacity,
            floor_y,
        };
        if self.grid_key == Some(key) {
            return Ok(());
        }

        if let Some(old) = self.grid.take() {
            old.release(gl);
        }

        let grid_data = mesh::floor_grid(settings.range, settings.size, settings.opacity, floor_y);
        self.grid = Some(upload_lines(gl, &grid_data)?);
        self.grid_key = Some(key);
        Ok(())
    }

    /// Replace the uploaded model when the viewer revision changes
    pub fn sync_model(
        &mut self,
        gl: &glow::Context,
        meshes: &BTreeMap<String, MeshData>,
        revision: u64,
    ) -> Result<(), String> {
        if self.uploaded_revision == Some(revision) {
            return Ok(());
        }
        self.uploaded_revision = Some(revision);

        for mesh in std::mem::take(&mut self.model_meshes).into_values() {
            mesh.release(gl);
        }

        for (name, mesh_data) in meshes {
            let gpu_mesh = upload_mesh(gl, mesh_data)?;
            self.model_meshes.insert(name.clone(), gpu_mesh);
        }
        tracing::debug!("Uploaded {} model parts (revision {revision})", meshes.len());
        Ok(())
    }

    /// Render the scene
    pub fn paint(&self, gl: &glow::Context, camera: &TurntableCamera, params: &RenderParams) {
        let aspect = params.viewport[2] / params.viewport[3].max(1.0);
        let vp = camera.view_projection(aspect);
        let [x, y, w, h] = params.viewport.map(|v| v as i32);

        unsafe {
            gl.viewport(x, y, w, h);
            gl.scissor(x, y, w, h);
            gl.enable(glow::SCISSOR_TEST);

            // Clear viewport area with configured background color
            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            if params.grid_visible {
                if let Some(ref grid) = self.grid {
                    gl.use_program(Some(self.line_program));
                    set_uniform_mat4(gl, self.line_program, "u_mvp", &vp);
                    gl.enable(glow::BLEND);
                    gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                    grid.draw(gl);
                    gl.disable(glow::BLEND);
                }
            }

            gl.use_program(Some(self.mesh_program));
            set_uniform_mat4(gl, self.mesh_program, "u_mvp", &vp);

            // Studio key light from the front-left, clear-coat highlight seen from the eye
            let key_dir = glam::Vec3::new(-0.4, 0.8, 0.5).normalize();
            set_uniform_vec3(gl, self.mesh_program, "u_light_dir", &key_dir);
            set_uniform_vec3(gl, self.mesh_program, "u_eye", &camera.eye_position());

            for mesh in self.model_meshes.values() {
                mesh.draw(gl);
            }

            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    /// Release every GL object (called when the window closes)
    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(grid) = self.grid.take() {
            grid.release(gl);
        }
        for mesh in std::mem::take(&mut self.model_meshes).into_values() {
            mesh.release(gl);
        }
        unsafe {
            gl.delete_program(self.mesh_program);
            gl.delete_program(self.line_program);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuBuffers, String> {
    let mut buffers = upload_vertices(gl, &data.vertices, MESH_LAYOUT)?;
    unsafe {
        gl.bind_vertex_array(Some(buffers.vao));
        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            as_bytes(&data.indices),
            glow::STATIC_DRAW,
        );
        gl.bind_vertex_array(None);
        buffers.ibo = Some(ibo);
    }
    buffers.count = data.indices.len() as i32;
    Ok(buffers)
}

fn upload_lines(gl: &glow::Context, data: &LineMeshData) -> Result<GpuBuffers, String> {
    upload_vertices(gl, &data.vertices, LINE_LAYOUT)
}

/// Upload interleaved floats and describe them to the vertex array
fn upload_vertices(
    gl: &glow::Context,
    vertices: &[f32],
    layout: &[(u32, i32)],
) -> Result<GpuBuffers, String> {
    let floats_per_vertex: i32 = layout.iter().map(|(_, n)| n).sum();
    let stride = floats_per_vertex * 4;
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW);

        let mut offset = 0;
        for &(location, components) in layout {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, components, glow::FLOAT, false, stride, offset * 4);
            offset += components;
        }

        gl.bind_vertex_array(None);

        Ok(GpuBuffers {
            vao,
            vbo,
            ibo: None,
            count: vertices.len() as i32 / floats_per_vertex.max(1),
        })
    }
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;
        let vert = compile_shader(gl, glow::VERTEX_SHADER, vert_src)?;
        let frag = compile_shader(gl, glow::FRAGMENT_SHADER, frag_src)?;

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("program link error: {log}"));
        }
        Ok(program)
    }
}

unsafe fn compile_shader(gl: &glow::Context, kind: u32, src: &str) -> Result<glow::Shader, String> {
    let shader = gl.create_shader(kind)?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(format!("shader compile error: {log}"));
    }
    Ok(shader)
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

/// View plain numeric data as bytes for a GL upload
fn as_bytes<T: Copy>(slice: &[T]) -> &[u8] {
    // SAFETY: f32 and u32 have no padding and any byte pattern is valid u8
    unsafe { std::slice::from_raw_parts(slice.as_ptr().cast::<u8>(), std::mem::size_of_val(slice)) }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec3 a_color;

out vec3 v_world;
out vec3 v_normal;
out vec3 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_world = a_position;
    v_normal = a_normal;
    v_color = a_color;
}
"#;

// Lambert key + camera fill, plus a Blinn highlight standing in for clear coat
const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_light_dir;
uniform vec3 u_eye;

in vec3 v_world;
in vec3 v_normal;
in vec3 v_color;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 view = normalize(u_eye - v_world);
    float key = max(dot(n, u_light_dir), 0.0);
    float fill = abs(dot(n, view));
    float spec = pow(max(dot(n, normalize(u_light_dir + view)), 0.0), 48.0);
    vec3 lit = v_color * (0.2 + key * 0.55 + fill * 0.25) + vec3(spec * 0.35);
    frag_color = vec4(lit, 1.0);
}
"#;

const LINE_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec4 a_color;

out vec4 v_color;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_color = a_color;
}
"#;

const LINE_FRAG: &str = r#"#version 330 core
in vec4 v_color;
out vec4 frag_color;

void main() {
    frag_color = v_color;
}
"#;
