// Library crate: the colorizer, asset loading, zone overlay and job timer,
// testable without a window. The eframe shell (app, ui, GL viewport) lives
// in the binary crate.

pub mod assets;
pub mod error;
pub mod helpers;
pub mod model;
pub mod state;
pub mod timer;
pub mod viewer;
pub mod zones;

/// Subset of viewport types needed by the colorizer (MeshData, Aabb, picking).
/// The full viewport (camera, renderer, GL) stays in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
