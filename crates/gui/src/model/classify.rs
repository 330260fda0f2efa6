//! Body-panel detection by mesh and material names.
//!
//! Assets carry no per-part metadata, so paintability is decided from the
//! names alone. The two keyword tables are the only place that knowledge
//! lives; extend them as new assets arrive.

/// Names containing any of these are never painted.
pub const SKIP_KEYWORDS: &[&str] = &[
    "tire", "tyre", "wheel", "glass", "window", "windshield", "chrome", "light", "lamp",
    "interior", "seat", "rubber", "grille", "exhaust", "plate", "badge", "logo", "brake",
    "caliper", "trim",
];

/// Names containing any of these are painted (unless a skip keyword matched).
pub const BODY_KEYWORDS: &[&str] = &[
    "body", "paint", "panel", "door", "hood", "bonnet", "fender", "bumper", "trunk", "boot",
    "roof", "quarter", "pillar", "shell", "fairing", "tank", "exterior",
];

/// Outcome of classifying one mesh/material pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialClass {
    /// Exterior body panel: receives the paint color
    Paintable,
    /// Glass, trim, tires, lights...: matched the skip list
    Excluded,
    /// Matched neither list
    Untouched,
}

impl MaterialClass {
    pub fn is_paintable(self) -> bool {
        self == MaterialClass::Paintable
    }
}

/// Classify a mesh/material pair. A skip-list match always wins over a
/// body-list match, in either name.
pub fn classify(mesh_name: &str, material_name: &str) -> MaterialClass {
    let mesh = mesh_name.to_lowercase();
    let material = material_name.to_lowercase();
    let matches = |keywords: &[&str]| {
        keywords
            .iter()
            .any(|k| mesh.contains(k) || material.contains(k))
    };

    if matches(SKIP_KEYWORDS) {
        MaterialClass::Excluded
    } else if matches(BODY_KEYWORDS) {
        MaterialClass::Paintable
    } else {
        MaterialClass::Untouched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_tables_disjoint() {
        for k in SKIP_KEYWORDS {
            assert!(!BODY_KEYWORDS.contains(k), "'{k}' is in both tables");
        }
    }

    #[test]
    fn test_body_names_paintable() {
        assert_eq!(classify("Hood", "Material.001"), MaterialClass::Paintable);
        assert_eq!(classify("mesh_12", "CarPaint_Red"), MaterialClass::Paintable);
        assert_eq!(classify("FRONT_BUMPER", ""), MaterialClass::Paintable);
    }

    #[test]
    fn test_skip_names_excluded() {
        assert_eq!(classify("Tire_FL", "Rubber"), MaterialClass::Excluded);
        assert_eq!(classify("Windshield", "Glass"), MaterialClass::Excluded);
        assert_eq!(classify("Headlight_L", "Emissive"), MaterialClass::Excluded);
    }

    #[test]
    fn test_skip_wins_over_body() {
        // "door" + "glass", "body" + "chrome", "panel" + "interior"
        assert_eq!(classify("Door_Glass_L", "Glass"), MaterialClass::Excluded);
        assert_eq!(classify("Body", "Chrome_Trim"), MaterialClass::Excluded);
        assert_eq!(classify("Interior_Panel", "Leather"), MaterialClass::Excluded);
    }

    #[test]
    fn test_unknown_names_untouched() {
        assert_eq!(classify("Mesh_0042", "Material.007"), MaterialClass::Untouched);
        assert!(!classify("", "").is_paintable());
    }
}
