//! Общие типы данных студии детейлинга: граф сцены, цвета, зоны, таймер.

pub mod color;
pub mod scene;
pub mod timer;
pub mod zones;

pub use color::{ColorParseError, Rgb};
pub use scene::{
    Geometry, GeometryGroup, Material, Mesh, Node, PbrMaterial, SceneGraph, Transform,
    UnlitMaterial,
};
pub use timer::{format_hms, TimerState};
pub use zones::{zones_for, VehicleCategory, VehicleZone, ZoneMap};

/// Идентификатор зоны (`VehicleZone::id`)
pub type ZoneId = String;

/// Идентификатор заказа
pub type JobId = String;
