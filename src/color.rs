use bytemuck::{Pod, Zeroable};
use std::{fmt, str::FromStr};

/// RGB color with 8-bit components
///
/// Layout is `[r, g, b]` so the pixel buffer can be handed to the PNG encoder as is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// Colors which can be referenced by name
const NAMED_COLORS: [(&str, Color); 6] = [
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::GREEN),
    ("blue", Color::BLUE),
    ("yellow", Color::YELLOW),
];

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Convert color to sRGB list
    pub const fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Look up color in the table of named colors
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(color_name, _)| *color_name == name)
            .map(|(_, color)| *color)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}", self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        let Some(hex) = color.strip_prefix('#') else {
            return Color::from_name(color)
                .ok_or_else(|| ColorError::UnknownName(color.to_owned()));
        };
        if hex.len() != 6 {
            return Err(ColorError::HexExpected(color.to_owned()));
        }
        // #RRGGBB
        let digit = |byte| match byte {
            b'A'..=b'F' => Ok(byte - b'A' + 10),
            b'a'..=b'f' => Ok(byte - b'a' + 10),
            b'0'..=b'9' => Ok(byte - b'0'),
            _ => Err(ColorError::HexExpected(color.to_owned())),
        };
        let mut rgb = [0u8; 3];
        for (value, pair) in rgb.iter_mut().zip(hex.as_bytes().chunks(2)) {
            *value = digit(pair[0])? << 4 | digit(pair[1])?;
        }
        let [red, green, blue] = rgb;
        Ok(Color::new(red, green, blue))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = <String as serde::Deserialize>::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Color starts with `#` but is not a valid `#RRGGBB`
    HexExpected(String),
    /// Color name is not in the table of named colors
    UnknownName(String),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected(color) => {
                write!(f, "color `{}` expected to be #RRGGBB in hexadecimal format", color)
            }
            ColorError::UnknownName(color) => write!(f, "unknown color name `{}`", color),
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_hex() -> Result<(), ColorError> {
        assert_eq!(Color::new(170, 187, 204), "#aabbcc".parse::<Color>()?);
        assert_eq!(Color::new(170, 187, 204), "#AABBCC".parse::<Color>()?);
        assert_eq!(Color::new(1, 2, 3), "#010203".parse::<Color>()?);
        assert_eq!(Color::BLACK, "#000000".parse::<Color>()?);
        Ok(())
    }

    #[test]
    fn test_color_parse_name() -> Result<(), ColorError> {
        assert_eq!(Color::RED, "red".parse::<Color>()?);
        assert_eq!(Color::new(255, 255, 0), "yellow".parse::<Color>()?);
        assert_eq!(Color::WHITE, "white".parse::<Color>()?);
        Ok(())
    }

    #[test]
    fn test_color_parse_errors() {
        assert_eq!(
            "purple".parse::<Color>(),
            Err(ColorError::UnknownName("purple".to_owned()))
        );
        assert_eq!(
            "Red".parse::<Color>(),
            Err(ColorError::UnknownName("Red".to_owned()))
        );
        assert!(matches!(
            "#12345".parse::<Color>(),
            Err(ColorError::HexExpected(_))
        ));
        assert!(matches!(
            "#12345g".parse::<Color>(),
            Err(ColorError::HexExpected(_))
        ));
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: Color = "#0a0b0c".parse()?;
        assert_eq!(c.to_string(), "#0a0b0c");
        assert_eq!(Color::YELLOW.to_string(), "#ffff00");
        Ok(())
    }

    #[test]
    fn test_pixel_bytes() {
        let pixels = [Color::new(1, 2, 3), Color::new(4, 5, 6)];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels[..]);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }
}
