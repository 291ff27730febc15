//! Box outline colours.

use std::fmt;
use std::str::FromStr;

use image::Rgb;

use crate::error::YolovizError;

const NAMED_COLORS: [(&str, [u8; 3]); 20] = [
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("lime", [0, 255, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
];

/// An RGB colour given by name (`red`) or hex literal (`#f00`, `#ff0000`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxColor(pub Rgb<u8>);

impl BoxColor {
    pub const RED: BoxColor = BoxColor(Rgb([255, 0, 0]));

    pub fn rgb(&self) -> Rgb<u8> {
        self.0
    }
}

impl Default for BoxColor {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for BoxColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0 .0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for BoxColor {
    type Err = YolovizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || YolovizError::InvalidColor(s.to_string());

        if let Some(hex) = raw.strip_prefix('#') {
            return parse_hex(hex).map(|rgb| BoxColor(Rgb(rgb))).ok_or_else(invalid);
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map(|&(_, rgb)| BoxColor(Rgb(rgb)))
            .ok_or_else(invalid)
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                let value = digit.to_digit(16)? as u8;
                *slot = value * 17;
            }
            Some(rgb)
        }
        6 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(rgb)
        }
        _ => None,
    }
}
