use std::collections::BTreeMap;

use glam::Vec3;
use shared::SceneGraph;

use crate::helpers::{for_each_part, normal_matrix};

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, r, g, b]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// 9 floats per vertex: position(3) + normal(3) + color(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 9
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Lines mesh: interleaved [pos.x, pos.y, pos.z, r, g, b, a]
pub struct LineMeshData {
    /// 7 floats per vertex: position(3) + color(4)
    pub vertices: Vec<f32>,
}

/// Flatten a (normalized) scene graph into world-space, per-vertex colored
/// buffers keyed by part (see [`for_each_part`]). Triangles are un-indexed
/// so every triangle carries the color of its own material slot.
pub fn tessellate(scene: &SceneGraph) -> BTreeMap<String, MeshData> {
    let mut out = BTreeMap::new();

    for_each_part(scene, &mut |key, mesh, world| {
        let geometry = &mesh.geometry;
        let normal_mat = normal_matrix(&world);
        let mut data = MeshData {
            vertices: Vec::with_capacity(geometry.indices.len() * 9),
            indices: Vec::with_capacity(geometry.indices.len()),
        };

        for (tri, idx) in geometry.indices.chunks_exact(3).enumerate() {
            let color = mesh
                .materials
                .get(geometry.material_for_triangle(tri))
                .map(|m| m.display_color().to_array())
                .unwrap_or([0.6, 0.6, 0.6]);

            let corners = [idx[0] as usize, idx[1] as usize, idx[2] as usize];
            let Some(p) = corners
                .iter()
                .map(|&i| geometry.positions.get(i).map(|p| world.transform_point3(Vec3::from_array(*p))))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let flat = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();

            for (k, &i) in corners.iter().enumerate() {
                let n = geometry
                    .normals
                    .get(i)
                    .map(|n| (normal_mat * Vec3::from_array(*n)).normalize_or_zero())
                    .filter(|n| *n != Vec3::ZERO)
                    .unwrap_or(flat);
                let base = data.vertex_count() as u32;
                data.vertices.extend_from_slice(&[
                    p[k].x, p[k].y, p[k].z, n.x, n.y, n.z, color[0], color[1], color[2],
                ]);
                data.indices.push(base);
            }
        }

        if !data.indices.is_empty() {
            out.insert(key, data);
        }
    });

    out
}

// ── Grid and axes ────────────────────────────────────────────

pub fn grid(range: i32, cell_size: f32, opacity: f32) -> LineMeshData {
    let mut vertices = Vec::new();
    let grid_color = [0.25_f32, 0.25, 0.25, opacity];
    let origin_color_x = [0.5_f32, 0.2, 0.2, opacity * 0.7];
    let origin_color_z = [0.2_f32, 0.2, 0.5, opacity * 0.7];

    let extent = range as f32 * cell_size;

    for i in -range..=range {
        let f = i as f32 * cell_size;
        let color = if i == 0 { origin_color_z } else { grid_color };
        // Line along Z
        push_line_vert(&mut vertices, f, 0.0, -extent, color);
        push_line_vert(&mut vertices, f, 0.0, extent, color);

        let color = if i == 0 { origin_color_x } else { grid_color };
        // Line along X
        push_line_vert(&mut vertices, -extent, 0.0, f, color);
        push_line_vert(&mut vertices, extent, 0.0, f, color);
    }

    LineMeshData { vertices }
}

/// Floor grid placed just under a normalized model of the given height
pub fn floor_grid(range: i32, cell_size: f32, opacity: f32, floor_y: f32) -> LineMeshData {
    let mut lines = grid(range, cell_size, opacity);
    for v in lines.vertices.chunks_exact_mut(7) {
        v[1] = floor_y;
    }
    lines
}

fn push_line_vert(v: &mut Vec<f32>, px: f32, py: f32, pz: f32, c: [f32; 4]) {
    v.extend_from_slice(&[px, py, pz, c[0], c[1], c[2], c[3]]);
}
