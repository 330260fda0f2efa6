//! Model preparation: paintability rules and the clone-normalize-repaint pass.

pub mod classify;
pub mod colorize;

pub use classify::{classify, MaterialClass, BODY_KEYWORDS, SKIP_KEYWORDS};
pub use colorize::{normalization_scale, prepare_model, ColorizeOptions, PaintStats, PreparedModel};
