//! Scene graph math helpers shared by the colorizer, tessellation and picking.

use std::collections::HashSet;

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};
use shared::{Mesh, Node, SceneGraph, Transform};

use crate::viewport::picking::Aabb;

/// Local matrix of a node transform (T * R * S, rotation in degrees XYZ)
pub fn transform_matrix(t: &Transform) -> Mat4 {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        (t.rotation[0] as f32).to_radians(),
        (t.rotation[1] as f32).to_radians(),
        (t.rotation[2] as f32).to_radians(),
    );
    Mat4::from_scale_rotation_translation(to_vec3(t.scale), rotation, to_vec3(t.position))
}

pub fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// Matrix for transforming normals (inverse transpose of the upper 3x3)
pub fn normal_matrix(world: &Mat4) -> Mat3 {
    let m = Mat3::from_mat4(*world);
    if m.determinant().abs() < f32::EPSILON {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}

/// Visit every mesh in the subtree with its accumulated world matrix.
pub fn for_each_mesh<'a>(node: &'a Node, parent: Mat4, f: &mut dyn FnMut(&'a Node, &'a Mesh, Mat4)) {
    let world = parent * transform_matrix(&node.transform);
    if let Some(mesh) = &node.mesh {
        f(node, mesh, world);
    }
    for child in &node.children {
        for_each_mesh(child, world, f);
    }
}

/// Like [`for_each_mesh`], plus a key unique within the scene: the node
/// name, then `name#1`, `name#2` for later nodes sharing it.
pub fn for_each_part<'a>(scene: &'a SceneGraph, f: &mut dyn FnMut(String, &'a Mesh, Mat4)) {
    let mut taken: HashSet<String> = HashSet::new();
    for_each_mesh(&scene.root, Mat4::IDENTITY, &mut |node, mesh, world| {
        let mut key = node.name.clone();
        let mut n = 0;
        while taken.contains(&key) {
            n += 1;
            key = format!("{}#{n}", node.name);
        }
        taken.insert(key.clone());
        f(key, mesh, world);
    });
}

/// Node name behind a part key from [`for_each_part`]
pub fn part_name(key: &str) -> &str {
    match key.rsplit_once('#') {
        Some((name, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => key,
    }
}

/// World-space bounds of every vertex in the scene.
/// Returns an empty box for scenes without geometry.
pub fn scene_bounds(scene: &SceneGraph) -> Aabb {
    let mut bounds = Aabb::empty();
    for_each_mesh(&scene.root, Mat4::IDENTITY, &mut |_, mesh, world| {
        for p in &mesh.geometry.positions {
            bounds.extend(world.transform_point3(Vec3::from_array(*p)));
        }
    });
    bounds
}

/// Per-mesh world bounds keyed like [`for_each_part`] (for picking)
pub fn mesh_bounds(scene: &SceneGraph) -> Vec<(String, Aabb)> {
    let mut out = Vec::new();
    for_each_part(scene, &mut |key, mesh, world| {
        let aabb = Aabb::from_points(
            mesh.geometry
                .positions
                .iter()
                .map(|p| world.transform_point3(Vec3::from_array(*p))),
        );
        if !aabb.is_empty() {
            out.push((key, aabb));
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix_identity() {
        let m = transform_matrix(&Transform::new());
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_transform_matrix_translate_scale() {
        let t = Transform {
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [2.0, 2.0, 2.0],
        };
        let p = transform_matrix(&t).transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(p.abs_diff_eq(Vec3::new(3.0, 4.0, 5.0), 1e-6));
    }

    #[test]
    fn test_transform_matrix_rotation_degrees() {
        let t = Transform {
            position: [0.0; 3],
            rotation: [0.0, 90.0, 0.0],
            scale: [1.0; 3],
        };
        let p = transform_matrix(&t).transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }

    #[test]
    fn test_part_name_strips_counter() {
        assert_eq!(part_name("Wheel#3"), "Wheel");
        assert_eq!(part_name("Wheel"), "Wheel");
        assert_eq!(part_name("Badge#A"), "Badge#A");
        assert_eq!(part_name("Trim#"), "Trim#");
    }

    #[test]
    fn test_normal_matrix_degenerate_falls_back() {
        let m = Mat4::from_scale(Vec3::ZERO);
        assert_eq!(normal_matrix(&m), Mat3::IDENTITY);
    }
}
