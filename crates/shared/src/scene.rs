//! Граф сцены 3D-модели автомобиля

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Трансформация узла (поворот: углы Эйлера XYZ в градусах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn from_position(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Диапазон индексов, отрисовываемый одним материалом
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryGroup {
    /// Первый индекс в `indices`
    pub start: usize,
    /// Количество индексов
    pub count: usize,
    /// Номер слота материала в `Mesh::materials`
    pub material_index: usize,
}

/// Геометрия меша (общая для всех копий сцены, только чтение)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    #[serde(default)]
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    /// Если пусто, весь меш рисуется материалом 0
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GeometryGroup>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Номер слота материала для треугольника
    pub fn material_for_triangle(&self, triangle: usize) -> usize {
        let first_index = triangle * 3;
        self.groups
            .iter()
            .find(|g| first_index >= g.start && first_index < g.start + g.count)
            .map(|g| g.material_index)
            .unwrap_or(0)
    }
}

/// PBR-материал (metalness/roughness)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PbrMaterial {
    pub name: String,
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

fn default_opacity() -> f32 {
    1.0
}

/// Материал без освещения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlitMaterial {
    pub name: String,
    pub color: Rgb,
}

/// Материал меша
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    Pbr(PbrMaterial),
    Unlit(UnlitMaterial),
    /// Тип, который приложение не понимает; передаётся как есть
    Other { name: String, kind: String },
}

impl Material {
    pub fn name(&self) -> &str {
        match self {
            Material::Pbr(m) => &m.name,
            Material::Unlit(m) => &m.name,
            Material::Other { name, .. } => name,
        }
    }

    /// Базовый цвет для отрисовки (неизвестные типы серые)
    pub fn display_color(&self) -> Rgb {
        match self {
            Material::Pbr(m) => m.color,
            Material::Unlit(m) => m.color,
            Material::Other { .. } => Rgb::new(0.6, 0.6, 0.6),
        }
    }
}

/// Меш: общая геометрия + слоты материалов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub geometry: Arc<Geometry>,
    pub materials: Vec<Arc<Material>>,
}

/// Узел иерархии сцены
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Mesh>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn group(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            mesh: None,
            children,
        }
    }

    pub fn with_mesh(name: impl Into<String>, transform: Transform, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            transform,
            mesh: Some(mesh),
            children: Vec::new(),
        }
    }

    /// Обход в глубину (сначала сам узел)
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Обход в глубину с возможностью изменения
    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}

/// Граф сцены загруженного ассета.
///
/// `clone()` копирует дерево узлов, геометрия и материалы остаются общими
/// через `Arc`. Материалы заменяются целиком, а не изменяются на месте.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub root: Node,
}

impl SceneGraph {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |n| {
            if n.mesh.is_some() {
                count += 1;
            }
        });
        count
    }

    pub fn vertex_count(&self) -> usize {
        let mut count = 0;
        self.root.visit(&mut |n| {
            if let Some(mesh) = &n.mesh {
                count += mesh.geometry.vertex_count();
            }
        });
        count
    }

    /// Найти меш по имени узла или меша
    pub fn find_mesh(&self, name: &str) -> Option<&Mesh> {
        let mut found = None;
        self.root.visit(&mut |n| {
            if found.is_none() {
                if let Some(mesh) = &n.mesh {
                    if n.name == name || mesh.name == name {
                        found = Some(mesh);
                    }
                }
            }
        });
        found
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
