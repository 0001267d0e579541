// File: crates/scaling-core/src/style.rs
// Summary: Abstract marker, color, and dash identifiers shared by both renderers.

/// Point marker, parsed from single-character codes (`o`, `D`, `v`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Marker {
    Circle,
    Diamond,
    Square,
    TriangleUp,
    TriangleDown,
    Pentagon,
    Star,
    Plus,
    Cross,
    Hexagon,
}

impl Marker {
    pub const ALL: [Marker; 10] = [
        Marker::Circle,
        Marker::Diamond,
        Marker::Square,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::Pentagon,
        Marker::Star,
        Marker::Plus,
        Marker::Cross,
        Marker::Hexagon,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code.trim())
    }

    pub const fn code(self) -> &'static str {
        match self {
            Marker::Circle => "o",
            Marker::Diamond => "D",
            Marker::Square => "s",
            Marker::TriangleUp => "^",
            Marker::TriangleDown => "v",
            Marker::Pentagon => "p",
            Marker::Star => "*",
            Marker::Plus => "+",
            Marker::Cross => "x",
            Marker::Hexagon => "h",
        }
    }
}

/// Series color: a fixed named palette or an explicit RGB value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Firebrick,
    RoyalBlue,
    MediumSeaGreen,
    DarkOrange,
    Purple,
    Teal,
    Goldenrod,
    SlateGray,
    Black,
    Rgb(u8, u8, u8),
}

impl Color {
    const NAMED: [Color; 9] = [
        Color::Firebrick,
        Color::RoyalBlue,
        Color::MediumSeaGreen,
        Color::DarkOrange,
        Color::Purple,
        Color::Teal,
        Color::Goldenrod,
        Color::SlateGray,
        Color::Black,
    ];

    /// Parse a palette name (case-insensitive) or `#rrggbb`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() { return None; }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Color::Rgb(byte(0)?, byte(2)?, byte(4)?));
        }
        Self::NAMED.into_iter().find(|c| c.name().eq_ignore_ascii_case(s))
    }

    pub fn name(self) -> String {
        match self {
            Color::Firebrick => "firebrick".into(),
            Color::RoyalBlue => "royalblue".into(),
            Color::MediumSeaGreen => "mediumseagreen".into(),
            Color::DarkOrange => "darkorange".into(),
            Color::Purple => "purple".into(),
            Color::Teal => "teal".into(),
            Color::Goldenrod => "goldenrod".into(),
            Color::SlateGray => "slategray".into(),
            Color::Black => "black".into(),
            Color::Rgb(r, g, b) => format!("#{r:02x}{g:02x}{b:02x}"),
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Firebrick => (178, 34, 34),
            Color::RoyalBlue => (65, 105, 225),
            Color::MediumSeaGreen => (60, 179, 113),
            Color::DarkOrange => (255, 140, 0),
            Color::Purple => (128, 0, 128),
            Color::Teal => (0, 128, 128),
            Color::Goldenrod => (218, 165, 32),
            Color::SlateGray => (112, 128, 144),
            Color::Black => (0, 0, 0),
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }
}

/// Stroke pattern of a trend curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DashStyle {
    Solid,
    Dashed,
    DenselyDashed,
    Dotted,
    DenselyDotted,
}

impl DashStyle {
    /// Trend dash style by series color; unlisted colors get `Dotted`.
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::MediumSeaGreen => DashStyle::DenselyDashed,
            Color::RoyalBlue => DashStyle::DenselyDotted,
            _ => DashStyle::Dotted,
        }
    }

    /// On/off intervals in stroke-width units; `None` for a solid stroke.
    pub const fn intervals(self) -> Option<[f32; 2]> {
        match self {
            DashStyle::Solid => None,
            DashStyle::Dashed => Some([6.0, 6.0]),
            DashStyle::DenselyDashed => Some([6.0, 3.0]),
            DashStyle::Dotted => Some([1.5, 4.0]),
            DashStyle::DenselyDotted => Some([1.5, 2.0]),
        }
    }
}
