//! CSS colors as written into SVG attributes.
//!
//! [`Color`] parses any CSS color string through the `color` crate. SVG
//! output always uses the opaque `#rrggbb` form from [`Color::to_hex`], with
//! transparency in a separate `*-opacity` attribute from [`Color::alpha`].

use std::{fmt, str::FromStr};

use color::{AlphaColor, DynamicColor, Srgb};

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color such as `"#1f78b4"`, `"rgb(255, 0, 0)"` or `"white"`.
    ///
    /// ```
    /// use weekgrid_core::color::Color;
    ///
    /// assert!(Color::new("#a6cee3").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{color_str}`: {err}"))
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(self) -> String {
        let rgba = self.srgb().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }

    /// The hex form with `#` spelled `hex`, usable as an SVG `id`.
    pub fn to_id_safe_string(self) -> String {
        self.to_hex().replace('#', "hex")
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Blends towards `other` in sRGB space, `t` clamped to `[0, 1]`.
    ///
    /// ```
    /// use weekgrid_core::color::Color;
    ///
    /// let black = Color::new("#000000").unwrap();
    /// let white = Color::new("#ffffff").unwrap();
    /// assert_eq!(black.lerp(white, 1.0).to_hex(), "#ffffff");
    /// ```
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let from = self.srgb().components;
        let to = other.srgb().components;
        let mixed = std::array::from_fn(|i| (to[i] - from[i]).mul_add(t, from[i]));

        Self {
            color: DynamicColor::from_alpha_color(AlphaColor::<Srgb>::new(mixed)),
        }
    }

    fn srgb(self) -> AlphaColor<Srgb> {
        self.color.to_alpha_color::<Srgb>()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.to_hex(), "#000000");
        assert_eq!(color.alpha(), 1.0);
    }

    #[test]
    fn test_named_and_hex_colors() {
        assert_eq!(Color::new("white").unwrap().to_hex(), "#ffffff");
        assert_eq!(Color::new("#FFFFD9").unwrap().to_hex(), "#ffffd9");
        assert_eq!(Color::new("red").unwrap(), Color::new("red").unwrap());
    }

    #[test]
    fn test_invalid_color_names_input() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_translucent_color_keeps_opaque_hex() {
        let color = Color::new("rgba(31, 120, 180, 0.5)").unwrap();
        assert_eq!(color.to_hex(), "#1f78b4");
        assert!((color.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_id_safe_string() {
        let id = Color::new("#2c3e50").unwrap().to_id_safe_string();
        assert_eq!(id, "hex2c3e50");
    }

    #[test]
    fn test_lerp_endpoints_and_clamping() {
        let light = Color::new("#a6cee3").unwrap();
        let dark = Color::new("#1f78b4").unwrap();

        assert_eq!(light.lerp(dark, 0.0).to_hex(), "#a6cee3");
        assert_eq!(light.lerp(dark, 1.0).to_hex(), "#1f78b4");
        assert_eq!(light.lerp(dark, -3.0).to_hex(), "#a6cee3");
        assert_eq!(light.lerp(dark, 7.0).to_hex(), "#1f78b4");
    }
}
