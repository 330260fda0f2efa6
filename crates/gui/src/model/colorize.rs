//! Clone, normalize and repaint a cached vehicle model.

use std::sync::Arc;

use glam::Vec3;
use shared::{Material, Mesh, Node, PbrMaterial, Rgb, SceneGraph, Transform};

use super::classify::{classify, MaterialClass};
use crate::error::{ModelError, Result};
use crate::helpers::scene_bounds;
use crate::viewport::picking::Aabb;

/// Tunables for [`prepare_model`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorizeOptions {
    /// Largest dimension of the model after normalization
    pub target_size: f32,
    /// Upper bound for metalness on painted materials
    pub metalness_max: f32,
    /// Lower bound for roughness on painted materials
    pub roughness_min: f32,
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            target_size: 4.0,
            metalness_max: 0.6,
            roughness_min: 0.25,
        }
    }
}

/// How many material slots fell into each class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    pub painted: usize,
    pub excluded: usize,
    pub untouched: usize,
    /// Non-PBR materials, never classified
    pub passthrough: usize,
}

/// A per-viewer copy of an asset, centered, scaled and repainted.
#[derive(Debug, Clone)]
pub struct PreparedModel {
    pub scene: SceneGraph,
    pub color: Rgb,
    /// Uniform scale applied by normalization (1.0 for degenerate models)
    pub scale: f32,
    /// Bounds of the source asset before normalization
    pub source_bounds: Aabb,
    pub stats: PaintStats,
}

impl PreparedModel {
    /// Bounds of the normalized model
    pub fn bounds(&self) -> Aabb {
        scene_bounds(&self.scene)
    }
}

/// Uniform scale that maps the largest dimension of `bounds` onto
/// `target_size`. Empty, flat-to-a-point or non-finite bounds yield 1.
pub fn normalization_scale(bounds: &Aabb, target_size: f32) -> f32 {
    if bounds.is_empty() {
        return 1.0;
    }
    let max_dim = bounds.max_dimension();
    if max_dim > 0.0 && max_dim.is_finite() {
        let scale = target_size / max_dim;
        if scale.is_finite() && scale > 0.0 {
            return scale;
        }
    }
    1.0
}

/// Produce a display-ready copy of `source` painted with `color`.
///
/// `source` is only read. All changes happen on a clone; materials chosen
/// for paint are replaced with fresh `Arc`s so the cached asset and other
/// viewers of it keep their own colors. On error nothing is returned, so a
/// half-painted model can never reach the screen.
pub fn prepare_model(source: &SceneGraph, color: &str, options: &ColorizeOptions) -> Result<PreparedModel> {
    let color = Rgb::parse(color)?;
    validate(&source.root)?;

    let mut scene = source.clone();

    let source_bounds = scene_bounds(&scene);
    let scale = normalization_scale(&source_bounds, options.target_size);
    if scale == 1.0 && source_bounds.max_dimension() == 0.0 {
        tracing::warn!("Model has no extent, keeping unit scale");
    }
    let center = if source_bounds.is_empty() {
        Vec3::ZERO
    } else {
        source_bounds.center()
    };

    let offset = -center * scale;
    let inner = std::mem::replace(&mut scene.root, Node::group("normalized", Vec::new()));
    scene.root.transform = Transform {
        position: [offset.x as f64, offset.y as f64, offset.z as f64],
        rotation: [0.0, 0.0, 0.0],
        scale: [scale as f64; 3],
    };
    scene.root.children.push(inner);

    let mut stats = PaintStats::default();
    scene.root.visit_mut(&mut |node| {
        if let Some(mesh) = node.mesh.as_mut() {
            repaint_mesh(mesh, color, options, &mut stats);
        }
    });

    tracing::debug!(
        "Prepared model: scale {scale:.4}, painted {}, excluded {}, untouched {}, passthrough {}",
        stats.painted,
        stats.excluded,
        stats.untouched,
        stats.passthrough
    );

    Ok(PreparedModel {
        scene,
        color,
        scale,
        source_bounds,
        stats,
    })
}

fn repaint_mesh(mesh: &mut Mesh, color: Rgb, options: &ColorizeOptions, stats: &mut PaintStats) {
    for slot in mesh.materials.iter_mut() {
        let Material::Pbr(pbr) = slot.as_ref() else {
            stats.passthrough += 1;
            continue;
        };
        match classify(&mesh.name, &pbr.name) {
            MaterialClass::Paintable => {
                *slot = Arc::new(Material::Pbr(painted(pbr, color, options)));
                stats.painted += 1;
            }
            MaterialClass::Excluded => stats.excluded += 1,
            MaterialClass::Untouched => stats.untouched += 1,
        }
    }
}

fn painted(pbr: &PbrMaterial, color: Rgb, options: &ColorizeOptions) -> PbrMaterial {
    PbrMaterial {
        color,
        metalness: pbr.metalness.min(options.metalness_max),
        roughness: pbr.roughness.max(options.roughness_min),
        ..pbr.clone()
    }
}

/// Reject geometry the renderer cannot draw
fn validate(node: &Node) -> Result<()> {
    if let Some(mesh) = &node.mesh {
        let geometry = &mesh.geometry;
        if geometry
            .positions
            .iter()
            .any(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(ModelError::NonFiniteVertex {
                mesh: mesh.name.clone(),
            });
        }
        let count = geometry.positions.len();
        if let Some(&index) = geometry.indices.iter().find(|&&i| i as usize >= count) {
            return Err(ModelError::IndexOutOfRange {
                mesh: mesh.name.clone(),
                index,
                count,
            });
        }
        let slots = mesh.materials.len();
        let needed = if geometry.groups.is_empty() {
            (!geometry.indices.is_empty()).then_some(0)
        } else {
            geometry.groups.iter().map(|g| g.material_index).max()
        };
        if let Some(slot) = needed.filter(|&s| s >= slots) {
            return Err(ModelError::MissingMaterialSlot {
                mesh: mesh.name.clone(),
                slot,
                count: slots,
            });
        }
    }
    node.children.iter().try_for_each(validate)
}
