//! Цвета в формате CSS

use serde::{Deserialize, Serialize};

/// Ошибки разбора строки цвета
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParseError {
    /// Пустая строка
    Empty,
    /// Неверная hex-запись (#rgb, #rrggbb, #rrggbbaa)
    InvalidHex(String),
    /// Неверная функциональная запись rgb()/rgba()
    InvalidFunction(String),
    /// Неизвестное имя цвета
    UnknownName(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorParseError::Empty => write!(f, "Empty color value"),
            ColorParseError::InvalidHex(s) => write!(f, "Invalid hex color '{}'", s),
            ColorParseError::InvalidFunction(s) => write!(f, "Invalid color function '{}'", s),
            ColorParseError::UnknownName(s) => write!(f, "Unknown color name '{}'", s),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Линейный цвет RGB, компоненты 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Именованные цвета CSS, которые реально встречаются в карточках заказов
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("navy", [0, 0, 128]),
    ("maroon", [128, 0, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("beige", [245, 245, 220]),
    ("gold", [255, 215, 0]),
    ("teal", [0, 128, 128]),
    ("darkred", [139, 0, 0]),
    ("darkblue", [0, 0, 139]),
    ("darkgreen", [0, 100, 0]),
];

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Hex-запись `#rrggbb`
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Разобрать цвет в любой поддерживаемой CSS-записи
    pub fn parse(input: &str) -> Result<Self, ColorParseError> {
        let s = input.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(input.to_string()));
        }
        if s.starts_with("rgb") {
            return parse_function(&s)
                .ok_or_else(|| ColorParseError::InvalidFunction(input.to_string()));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, [r, g, b])| Rgb::from_rgb8(*r, *g, *b))
            .ok_or_else(|| ColorParseError::UnknownName(input.to_string()))
    }
}

impl std::str::FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse(s)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(Rgb::from_rgb8(out[0], out[1], out[2]))
        }
        // Альфа-канал игнорируется
        6 | 8 => Some(Rgb::from_rgb8(channel(0)?, channel(2)?, channel(4)?)),
        _ => None,
    }
}

fn parse_function(s: &str) -> Option<Rgb> {
    let open = s.find('(')?;
    let name = s[..open].trim();
    let body = s[open + 1..].strip_suffix(')')?;
    let parts: Vec<&str> = body
        .split([',', ' ', '/'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let expected = match name {
        "rgb" => 3..=4,
        "rgba" => 4..=4,
        _ => return None,
    };
    if !expected.contains(&parts.len()) {
        return None;
    }

    let mut rgb = [0.0_f32; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = if let Some(pct) = part.strip_suffix('%') {
            pct.parse::<f32>().ok()? / 100.0
        } else {
            part.parse::<f32>().ok()? / 255.0
        };
        if !slot.is_finite() {
            return None;
        }
        *slot = slot.clamp(0.0, 1.0);
    }
    Some(Rgb::new(rgb[0], rgb[1], rgb[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let c = Rgb::parse("#ff8000").unwrap();
        assert_eq!(c.to_rgb8(), [255, 128, 0]);
    }

    #[test]
    fn test_parse_short_hex() {
        let c = Rgb::parse("#f00").unwrap();
        assert_eq!(c.to_rgb8(), [255, 0, 0]);
    }

    #[test]
    fn test_parse_hex_with_alpha_ignores_alpha() {
        let c = Rgb::parse("#11223380").unwrap();
        assert_eq!(c.to_rgb8(), [0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_parse_rgb_function() {
        let c = Rgb::parse("rgb(10, 20, 30)").unwrap();
        assert_eq!(c.to_rgb8(), [10, 20, 30]);
        let c = Rgb::parse("rgba(255, 255, 255, 0.5)").unwrap();
        assert_eq!(c.to_rgb8(), [255, 255, 255]);
        let c = Rgb::parse("rgb(100% 0% 50%)").unwrap();
        assert_eq!(c.to_rgb8(), [255, 0, 128]);
    }

    #[test]
    fn test_parse_named_case_insensitive() {
        assert_eq!(Rgb::parse("  Silver ").unwrap().to_rgb8(), [192, 192, 192]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Rgb::parse(""), Err(ColorParseError::Empty));
        assert!(matches!(Rgb::parse("#12"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(Rgb::parse("#gggggg"), Err(ColorParseError::InvalidHex(_))));
        assert!(matches!(Rgb::parse("rgb(1,2)"), Err(ColorParseError::InvalidFunction(_))));
        assert!(matches!(Rgb::parse("hsl(0, 0%, 0%)"), Err(ColorParseError::UnknownName(_))));
        assert!(matches!(Rgb::parse("chartreuse-ish"), Err(ColorParseError::UnknownName(_))));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgb::from_rgb8(0, 128, 255).to_hex(), "#0080ff");
    }
}
