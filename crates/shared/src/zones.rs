//! Зоны автомобиля: статические таблицы для каждой категории

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Категория транспортного средства
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    #[default]
    Sedan,
    Suv,
    Bike,
}

impl VehicleCategory {
    pub fn all() -> &'static [VehicleCategory] {
        &[VehicleCategory::Sedan, VehicleCategory::Suv, VehicleCategory::Bike]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "sedan",
            VehicleCategory::Suv => "suv",
            VehicleCategory::Bike => "bike",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleCategory::Sedan => "Sedan",
            VehicleCategory::Suv => "SUV",
            VehicleCategory::Bike => "Bike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Зона автомобиля. Координаты в процентах от прямоугольника оверлея (0..100),
/// начало координат в левом верхнем углу, вид сбоку, перед машины слева.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleZone {
    pub id: &'static str,
    pub name: &'static str,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl VehicleZone {
    pub const fn new(id: &'static str, name: &'static str, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { id, name, x, y, width, height }
    }

    /// Центр зоны в процентах
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }

    /// Точка маркера в нормализованных координатах модели (-0.5..0.5):
    /// X вдоль кузова, Y вверх
    pub fn marker_anchor(&self) -> [f32; 2] {
        let [cx, cy] = self.center();
        [cx / 100.0 - 0.5, 0.5 - cy / 100.0]
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

// Идентификаторы уникальны в пределах категории; проверяется тестом.

const SEDAN_ZONES: &[VehicleZone] = &[
    VehicleZone::new("front_bumper", "Front bumper", 2.0, 55.0, 10.0, 20.0),
    VehicleZone::new("hood", "Hood", 12.0, 38.0, 20.0, 14.0),
    VehicleZone::new("windshield", "Windshield", 30.0, 22.0, 12.0, 16.0),
    VehicleZone::new("roof", "Roof", 40.0, 14.0, 22.0, 10.0),
    VehicleZone::new("rear_window", "Rear window", 62.0, 22.0, 10.0, 16.0),
    VehicleZone::new("trunk", "Trunk", 70.0, 38.0, 18.0, 14.0),
    VehicleZone::new("rear_bumper", "Rear bumper", 88.0, 55.0, 10.0, 20.0),
    VehicleZone::new("front_fender", "Front fender", 12.0, 52.0, 16.0, 18.0),
    VehicleZone::new("front_door", "Front door", 30.0, 40.0, 18.0, 30.0),
    VehicleZone::new("rear_door", "Rear door", 48.0, 40.0, 18.0, 30.0),
    VehicleZone::new("rear_quarter", "Rear quarter panel", 66.0, 52.0, 20.0, 18.0),
    VehicleZone::new("front_wheel", "Front wheel", 14.0, 70.0, 14.0, 22.0),
    VehicleZone::new("rear_wheel", "Rear wheel", 68.0, 70.0, 14.0, 22.0),
];

const SUV_ZONES: &[VehicleZone] = &[
    VehicleZone::new("front_bumper", "Front bumper", 2.0, 50.0, 10.0, 24.0),
    VehicleZone::new("hood", "Hood", 12.0, 32.0, 20.0, 14.0),
    VehicleZone::new("windshield", "Windshield", 28.0, 14.0, 12.0, 18.0),
    VehicleZone::new("roof", "Roof", 38.0, 6.0, 46.0, 10.0),
    VehicleZone::new("rear_window", "Rear window", 84.0, 14.0, 8.0, 20.0),
    VehicleZone::new("tailgate", "Tailgate", 86.0, 34.0, 10.0, 20.0),
    VehicleZone::new("rear_bumper", "Rear bumper", 88.0, 54.0, 10.0, 20.0),
    VehicleZone::new("front_fender", "Front fender", 12.0, 46.0, 16.0, 20.0),
    VehicleZone::new("front_door", "Front door", 30.0, 34.0, 18.0, 34.0),
    VehicleZone::new("rear_door", "Rear door", 48.0, 34.0, 18.0, 34.0),
    VehicleZone::new("rear_quarter", "Rear quarter panel", 66.0, 34.0, 20.0, 32.0),
    VehicleZone::new("running_board", "Running board", 30.0, 68.0, 36.0, 6.0),
    VehicleZone::new("front_wheel", "Front wheel", 12.0, 66.0, 16.0, 26.0),
    VehicleZone::new("rear_wheel", "Rear wheel", 68.0, 66.0, 16.0, 26.0),
];

const BIKE_ZONES: &[VehicleZone] = &[
    VehicleZone::new("front_wheel", "Front wheel", 4.0, 55.0, 26.0, 40.0),
    VehicleZone::new("front_fork", "Front fork", 20.0, 25.0, 10.0, 32.0),
    VehicleZone::new("handlebars", "Handlebars", 22.0, 10.0, 14.0, 12.0),
    VehicleZone::new("fairing", "Fairing", 28.0, 18.0, 14.0, 24.0),
    VehicleZone::new("fuel_tank", "Fuel tank", 40.0, 22.0, 18.0, 16.0),
    VehicleZone::new("seat", "Seat", 56.0, 26.0, 20.0, 10.0),
    VehicleZone::new("engine", "Engine", 40.0, 42.0, 20.0, 22.0),
    VehicleZone::new("exhaust", "Exhaust", 56.0, 60.0, 28.0, 8.0),
    VehicleZone::new("rear_fender", "Rear fender", 72.0, 30.0, 16.0, 16.0),
    VehicleZone::new("rear_wheel", "Rear wheel", 68.0, 55.0, 26.0, 40.0),
];

/// Упорядоченный список зон категории
pub fn zones_for(category: VehicleCategory) -> &'static [VehicleZone] {
    match category {
        VehicleCategory::Sedan => SEDAN_ZONES,
        VehicleCategory::Suv => SUV_ZONES,
        VehicleCategory::Bike => BIKE_ZONES,
    }
}

/// Индекс зон категории с поиском по id за O(1)
#[derive(Debug, Clone)]
pub struct ZoneMap {
    category: VehicleCategory,
    zones: &'static [VehicleZone],
    by_id: HashMap<&'static str, usize>,
}

impl ZoneMap {
    pub fn for_category(category: VehicleCategory) -> Self {
        let zones = zones_for(category);
        let by_id = zones.iter().enumerate().map(|(i, z)| (z.id, i)).collect();
        Self { category, zones, by_id }
    }

    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    pub fn zones(&self) -> &'static [VehicleZone] {
        self.zones
    }

    pub fn get(&self, id: &str) -> Option<&'static VehicleZone> {
        self.by_id.get(id).map(|&i| &self.zones[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zone_ids_unique_per_category() {
        for &category in VehicleCategory::all() {
            let zones = zones_for(category);
            let ids: HashSet<_> = zones.iter().map(|z| z.id).collect();
            assert_eq!(ids.len(), zones.len(), "duplicate zone id in {:?}", category);
        }
    }

    #[test]
    fn test_zones_inside_overlay() {
        for &category in VehicleCategory::all() {
            for z in zones_for(category) {
                assert!(z.width > 0.0 && z.height > 0.0, "{} has empty extent", z.id);
                assert!(z.x >= 0.0 && z.x + z.width <= 100.0, "{} out of x range", z.id);
                assert!(z.y >= 0.0 && z.y + z.height <= 100.0, "{} out of y range", z.id);
            }
        }
    }

    #[test]
    fn test_zone_map_lookup() {
        let map = ZoneMap::for_category(VehicleCategory::Sedan);
        assert_eq!(map.len(), zones_for(VehicleCategory::Sedan).len());
        assert_eq!(map.get("hood").unwrap().name, "Hood");
        assert!(map.get("fuel_tank").is_none());

        let bike = ZoneMap::for_category(VehicleCategory::Bike);
        assert!(bike.contains("fuel_tank"));
        assert!(!bike.contains("hood"));
    }

    #[test]
    fn test_zone_order_preserved() {
        let map = ZoneMap::for_category(VehicleCategory::Suv);
        assert_eq!(map.zones()[0].id, "front_bumper");
        assert_eq!(map.zones().last().unwrap().id, "rear_wheel");
    }

    #[test]
    fn test_marker_anchor_centered() {
        let zone = VehicleZone::new("mid", "Mid", 40.0, 40.0, 20.0, 20.0);
        assert_eq!(zone.center(), [50.0, 50.0]);
        assert_eq!(zone.marker_anchor(), [0.0, 0.0]);
        assert!(zone.contains(45.0, 59.0));
        assert!(!zone.contains(61.0, 50.0));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(VehicleCategory::parse("SUV"), Some(VehicleCategory::Suv));
        assert_eq!(VehicleCategory::parse(" bike "), Some(VehicleCategory::Bike));
        assert_eq!(VehicleCategory::parse("truck"), None);
    }
}
