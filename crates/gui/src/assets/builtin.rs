//! Procedural stand-in vehicles served under `builtin://<category>`.
//!
//! Blocky, but named like real exported assets (body panels, glass, tires,
//! chrome, lights, interior) so the paint rules see realistic input.

use std::sync::Arc;

use glam::Vec3;
use shared::{
    Geometry, Material, Mesh, Node, PbrMaterial, Rgb, SceneGraph, Transform, UnlitMaterial,
    VehicleCategory,
};

pub const SCHEME: &str = "builtin://";

pub fn url_for(category: VehicleCategory) -> String {
    format!("{SCHEME}{}", category.as_str())
}

/// Build the stand-in model for a category
pub fn vehicle(category: VehicleCategory) -> SceneGraph {
    match category {
        VehicleCategory::Sedan => car("sedan", 4.4, 0.6, 0.5),
        VehicleCategory::Suv => car("suv", 4.8, 0.9, 0.7),
        VehicleCategory::Bike => bike(),
    }
}

// ── Vehicles ─────────────────────────────────────────────────

fn car(name: &str, length: f32, body_height: f32, cabin_height: f32) -> SceneGraph {
    let width = 1.8;
    let wheel_r = if name == "suv" { 0.42 } else { 0.34 };
    let body_y = wheel_r + body_height * 0.5;
    let top = wheel_r + body_height;

    let paint = pbr("CarPaint_Base", Rgb::new(0.8, 0.8, 0.82), 0.9, 0.1, 1.0);
    let glass = pbr("Glass_Tinted", Rgb::new(0.1, 0.12, 0.15), 0.0, 0.05, 0.35);
    let rubber = pbr("Rubber", Rgb::new(0.05, 0.05, 0.05), 0.0, 0.9, 1.0);
    let chrome = pbr("Chrome", Rgb::new(0.9, 0.9, 0.9), 1.0, 0.05, 1.0);
    let lamp = unlit("Headlight_Emissive", Rgb::new(1.0, 0.95, 0.8));
    let fabric = pbr("Interior_Fabric", Rgb::new(0.2, 0.18, 0.16), 0.0, 0.8, 1.0);
    let plastic = pbr("Black_Plastic", Rgb::new(0.08, 0.08, 0.08), 0.0, 0.6, 1.0);

    let wheel = Arc::new(cylinder(wheel_r, 0.26, 20));
    let wheel_x = length * 0.32;
    let wheel_z = width * 0.5 - 0.1;

    let mut parts = vec![
        part("Body_Lower", box_geo(length, body_height, width), &paint, [0.0, body_y, 0.0]),
        part(
            "Hood_Panel",
            box_geo(length * 0.26, 0.06, width * 0.94),
            &paint,
            [-length * 0.32, top + 0.03, 0.0],
        ),
        part(
            "Trunk_Lid",
            box_geo(length * 0.2, 0.06, width * 0.94),
            &paint,
            [length * 0.36, top + 0.03, 0.0],
        ),
        part(
            "Roof",
            box_geo(length * 0.42, 0.08, width * 0.86),
            &paint,
            [length * 0.04, top + cabin_height, 0.0],
        ),
        part(
            "Windshield",
            box_geo(0.06, cabin_height, width * 0.84),
            &glass,
            [-length * 0.17, top + cabin_height * 0.5, 0.0],
        ),
        part(
            "Rear_Window",
            box_geo(0.06, cabin_height, width * 0.84),
            &glass,
            [length * 0.25, top + cabin_height * 0.5, 0.0],
        ),
        part(
            "Door_Glass_L",
            box_geo(length * 0.4, cabin_height * 0.9, 0.04),
            &glass,
            [length * 0.04, top + cabin_height * 0.5, width * 0.43],
        ),
        part(
            "Door_Glass_R",
            box_geo(length * 0.4, cabin_height * 0.9, 0.04),
            &glass,
            [length * 0.04, top + cabin_height * 0.5, -width * 0.43],
        ),
        part(
            "Door_Panel_L",
            box_geo(length * 0.4, body_height * 0.9, 0.04),
            &paint,
            [0.0, body_y, width * 0.5 + 0.02],
        ),
        part(
            "Door_Panel_R",
            box_geo(length * 0.4, body_height * 0.9, 0.04),
            &paint,
            [0.0, body_y, -(width * 0.5 + 0.02)],
        ),
        part(
            "Grille",
            box_geo(0.04, body_height * 0.4, width * 0.5),
            &chrome,
            [-length * 0.5 - 0.02, body_y, 0.0],
        ),
        part(
            "Headlight_L",
            box_geo(0.04, 0.12, 0.3),
            &lamp,
            [-length * 0.5 - 0.02, body_y + 0.12, width * 0.35],
        ),
        part(
            "Headlight_R",
            box_geo(0.04, 0.12, 0.3),
            &lamp,
            [-length * 0.5 - 0.02, body_y + 0.12, -width * 0.35],
        ),
        part(
            "Interior_Seats",
            box_geo(length * 0.3, cabin_height * 0.6, width * 0.7),
            &fabric,
            [length * 0.04, top + cabin_height * 0.3, 0.0],
        ),
        part("Antenna", box_geo(0.02, 0.3, 0.02), &plastic, [length * 0.2, top + cabin_height + 0.15, 0.0]),
    ];

    for (suffix, x, z) in [
        ("FL", -wheel_x, wheel_z),
        ("FR", -wheel_x, -wheel_z),
        ("RL", wheel_x, wheel_z),
        ("RR", wheel_x, -wheel_z),
    ] {
        parts.push(shared_part(
            &format!("Tire_{suffix}"),
            wheel.clone(),
            &rubber,
            Transform {
                position: [x as f64, wheel_r as f64, z as f64],
                rotation: [90.0, 0.0, 0.0],
                scale: [1.0, 1.0, 1.0],
            },
        ));
    }

    SceneGraph::new(Node::group(name, parts))
}

fn bike() -> SceneGraph {
    let paint = pbr("Paint_Gloss", Rgb::new(0.7, 0.1, 0.1), 0.8, 0.15, 1.0);
    let rubber = pbr("Tyre_Rubber", Rgb::new(0.05, 0.05, 0.05), 0.0, 0.9, 1.0);
    let chrome = pbr("Chrome_Exhaust", Rgb::new(0.85, 0.85, 0.85), 1.0, 0.1, 1.0);
    let leather = pbr("Seat_Leather", Rgb::new(0.1, 0.08, 0.07), 0.0, 0.7, 1.0);
    let frame = pbr("Frame_Steel", Rgb::new(0.25, 0.25, 0.27), 0.7, 0.4, 1.0);
    let lamp = unlit("Headlamp", Rgb::new(1.0, 1.0, 0.9));

    let wheel = Arc::new(cylinder(0.33, 0.12, 24));
    let wheel_transform = |x: f32| Transform {
        position: [x as f64, 0.33, 0.0],
        rotation: [90.0, 0.0, 0.0],
        scale: [1.0, 1.0, 1.0],
    };

    let parts = vec![
        shared_part("Wheel_Front", wheel.clone(), &rubber, wheel_transform(-0.7)),
        shared_part("Wheel_Rear", wheel, &rubber, wheel_transform(0.7)),
        part("Fuel_Tank", box_geo(0.5, 0.22, 0.3), &paint, [-0.1, 0.85, 0.0]),
        part("Front_Fairing", box_geo(0.25, 0.35, 0.32), &paint, [-0.55, 0.9, 0.0]),
        part("Rear_Fender_Shell", box_geo(0.35, 0.08, 0.2), &paint, [0.6, 0.78, 0.0]),
        part("Seat", box_geo(0.45, 0.08, 0.26), &leather, [0.3, 0.8, 0.0]),
        part("Frame", box_geo(1.0, 0.08, 0.08), &frame, [0.0, 0.55, 0.0]),
        part("Exhaust_Pipe", box_geo(0.6, 0.07, 0.07), &chrome, [0.4, 0.35, 0.15]),
        part("Headlamp", box_geo(0.04, 0.1, 0.12), &lamp, [-0.69, 0.95, 0.0]),
    ];

    SceneGraph::new(Node::group("bike", parts))
}

// ── Parts and materials ──────────────────────────────────────

fn pbr(name: &str, color: Rgb, metalness: f32, roughness: f32, opacity: f32) -> Arc<Material> {
    Arc::new(Material::Pbr(PbrMaterial {
        name: name.to_string(),
        color,
        metalness,
        roughness,
        opacity,
    }))
}

fn unlit(name: &str, color: Rgb) -> Arc<Material> {
    Arc::new(Material::Unlit(UnlitMaterial {
        name: name.to_string(),
        color,
    }))
}

fn part(name: &str, geometry: Geometry, material: &Arc<Material>, position: [f32; 3]) -> Node {
    shared_part(
        name,
        Arc::new(geometry),
        material,
        Transform::from_position([position[0] as f64, position[1] as f64, position[2] as f64]),
    )
}

fn shared_part(name: &str, geometry: Arc<Geometry>, material: &Arc<Material>, transform: Transform) -> Node {
    Node::with_mesh(
        name,
        transform,
        Mesh {
            name: name.to_string(),
            geometry,
            materials: vec![material.clone()],
        },
    )
}

// ── Primitive geometry ───────────────────────────────────────

fn box_geo(w: f32, h: f32, d: f32) -> Geometry {
    let hw = w * 0.5;
    let hh = h * 0.5;
    let hd = d * 0.5;

    let faces: [([Vec3; 4], Vec3); 6] = [
        // Front (+Z)
        ([Vec3::new(-hw, -hh, hd), Vec3::new(hw, -hh, hd), Vec3::new(hw, hh, hd), Vec3::new(-hw, hh, hd)], Vec3::Z),
        // Back (-Z)
        ([Vec3::new(hw, -hh, -hd), Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, hh, -hd), Vec3::new(hw, hh, -hd)], Vec3::NEG_Z),
        // Right (+X)
        ([Vec3::new(hw, -hh, hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, hh, -hd), Vec3::new(hw, hh, hd)], Vec3::X),
        // Left (-X)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(-hw, -hh, hd), Vec3::new(-hw, hh, hd), Vec3::new(-hw, hh, -hd)], Vec3::NEG_X),
        // Top (+Y)
        ([Vec3::new(-hw, hh, hd), Vec3::new(hw, hh, hd), Vec3::new(hw, hh, -hd), Vec3::new(-hw, hh, -hd)], Vec3::Y),
        // Bottom (-Y)
        ([Vec3::new(-hw, -hh, -hd), Vec3::new(hw, -hh, -hd), Vec3::new(hw, -hh, hd), Vec3::new(-hw, -hh, hd)], Vec3::NEG_Y),
    ];

    let mut geo = Geometry::default();
    for (quad, normal) in &faces {
        let base = geo.positions.len() as u32;
        for v in quad {
            geo.positions.push(v.to_array());
            geo.normals.push(normal.to_array());
        }
        geo.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    geo
}

/// Cylinder along Y, centered at the origin
fn cylinder(radius: f32, height: f32, segments: u32) -> Geometry {
    let hh = height * 0.5;
    let mut geo = Geometry::default();

    // Side faces
    for i in 0..segments {
        let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
        let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();

        let base = geo.positions.len() as u32;
        for (x, y, z, n) in [
            (radius * c0, -hh, radius * s0, [c0, 0.0, s0]),
            (radius * c1, -hh, radius * s1, [c1, 0.0, s1]),
            (radius * c1, hh, radius * s1, [c1, 0.0, s1]),
            (radius * c0, hh, radius * s0, [c0, 0.0, s0]),
        ] {
            geo.positions.push([x, y, z]);
            geo.normals.push(n);
        }
        geo.indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
    }

    // Caps
    for (y, normal) in [(hh, [0.0, 1.0, 0.0]), (-hh, [0.0, -1.0, 0.0])] {
        let center = geo.positions.len() as u32;
        geo.positions.push([0.0, y, 0.0]);
        geo.normals.push(normal);
        for i in 0..segments {
            let (s, c) = ((i as f32) * std::f32::consts::TAU / segments as f32).sin_cos();
            geo.positions.push([radius * c, y, radius * s]);
            geo.normals.push(normal);
        }
        for i in 0..segments {
            let next = (i + 1) % segments;
            if y > 0.0 {
                geo.indices.extend_from_slice(&[center, center + 1 + next, center + 1 + i]);
            } else {
                geo.indices.extend_from_slice(&[center, center + 1 + i, center + 1 + next]);
            }
        }
    }

    geo
}
