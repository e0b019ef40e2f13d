//! RGBA color used for framebuffer clears and shader constants.

use crate::error::BootstrapError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Linear RGBA color with `f32` components in [0, 1], the layout GL expects
/// for `glClearColor`.
///
/// Serializes as a hex string `"#rrggbbaa"` in config files. The hex form has
/// 8-bit quantization, so values parsed from config may differ from the
/// exact constants below by up to 1/255.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Dark teal the demo clears the framebuffer to.
    pub const CLEAR: Rgba = Rgba::new(0.2, 0.3, 0.3, 1.0);

    /// Opaque orange emitted by the triangle's fragment shader.
    pub const ORANGE: Rgba = Rgba::new(1.0, 0.5, 0.2, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `"#rrggbb"` or `"#rrggbbaa"` (leading `#` optional, case
    /// insensitive). A missing alpha channel means fully opaque.
    pub fn from_hex(hex: &str) -> Result<Rgba, BootstrapError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(BootstrapError::InvalidConfig(format!(
                "expected 6 or 8 hex digits for a color, got {}",
                hex.len()
            )));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BootstrapError::InvalidConfig(format!(
                "color '{hex}' contains non-hex characters"
            )));
        }

        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|e| BootstrapError::InvalidConfig(format!("invalid {name} component: {e}")))
        };

        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            1.0
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats the color as `"#rrggbbaa"`, clamping each channel to [0, 1].
    pub fn to_hex(self) -> String {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            q(self.r),
            q(self.g),
            q(self.b),
            q(self.a)
        )
    }

    /// Returns the components as an array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::CLEAR
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1.0 / 255.0
    }

    #[test]
    fn clear_constant_matches_demo_color() {
        assert_eq!(Rgba::CLEAR.to_array(), [0.2, 0.3, 0.3, 1.0]);
    }

    #[test]
    fn orange_constant_is_opaque() {
        assert_eq!(Rgba::ORANGE.to_array(), [1.0, 0.5, 0.2, 1.0]);
    }

    #[test]
    fn default_is_clear_color() {
        assert_eq!(Rgba::default(), Rgba::CLEAR);
    }

    #[test]
    fn from_hex_parses_rgb_with_hash_as_opaque() {
        let c = Rgba::from_hex("#ff0000").unwrap();
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn from_hex_parses_rgba_without_hash() {
        let c = Rgba::from_hex("00ff0080").unwrap();
        assert!(approx_eq(c.g, 1.0));
        assert!(approx_eq(c.a, 0.5), "alpha was {}", c.a);
    }

    #[test]
    fn from_hex_is_case_insensitive() {
        assert_eq!(
            Rgba::from_hex("#AbCdEf").unwrap(),
            Rgba::from_hex("#abcdef").unwrap()
        );
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Rgba::from_hex("#fff").unwrap_err();
        assert!(format!("{err}").contains("6 or 8"), "got: {err}");
    }

    #[test]
    fn from_hex_rejects_non_hex_digits() {
        assert!(Rgba::from_hex("#gg0000").is_err());
    }

    #[test]
    fn from_hex_rejects_multibyte_input_without_panicking() {
        assert!(Rgba::from_hex("ééé").is_err());
    }

    #[test]
    fn from_hex_rejects_sign_characters() {
        assert!(Rgba::from_hex("#+f+f+f").is_err());
        assert!(Rgba::from_hex("+f+f+f+f").is_err());
        assert!(Rgba::from_hex("#-1ffff").is_err());
    }

    #[test]
    fn to_hex_clear_color() {
        assert_eq!(Rgba::CLEAR.to_hex(), "#334d4dff");
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        assert_eq!(Rgba::new(2.0, -1.0, 0.0, 1.0).to_hex(), "#ff0000ff");
    }

    #[test]
    fn hex_round_trip_is_within_quantization() {
        let parsed = Rgba::from_hex(&Rgba::ORANGE.to_hex()).unwrap();
        for (a, b) in parsed.to_array().iter().zip(Rgba::ORANGE.to_array()) {
            assert!(approx_eq(*a, b), "{a} vs {b}");
        }
    }

    #[test]
    fn serde_uses_hex_string() {
        let json = serde_json::to_string(&Rgba::new(1.0, 1.0, 1.0, 1.0)).unwrap();
        assert_eq!(json, "\"#ffffffff\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn serde_rejects_bad_hex() {
        let err = serde_json::from_str::<Rgba>("\"#zz\"").unwrap_err();
        assert!(err.to_string().contains("hex"), "got: {err}");
    }
}
