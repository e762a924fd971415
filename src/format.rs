//! Canonical textual rendering of colors.
//!
//! Each [`Format`] has one canonical form: `#rrggbb`, `rgb(r g b)` and
//! `hsl(h s% l%)`. The alpha term is appended only when alpha is not
//! exactly 1.0: `#rrggbbaa`, `rgb(r g b / a%)`, `hsl(h s% l% / a%)`.

use std::fmt;

use crate::color::{Color, ColorValue, Component, Format};

impl ColorValue {
    /// Render this value in the canonical form of the given format,
    /// converting to the format's colorspace as needed.
    pub fn to_text(&self, format: Format) -> String {
        match format {
            Format::Hex => {
                let rgb = self.to_rgb();
                if rgb.alpha == 1.0 {
                    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
                } else {
                    let alpha = (rgb.alpha * 255.0).round() as u8;
                    format!(
                        "#{:02x}{:02x}{:02x}{:02x}",
                        rgb.red, rgb.green, rgb.blue, alpha
                    )
                }
            }
            Format::Rgb => {
                let rgb = self.to_rgb();
                if rgb.alpha == 1.0 {
                    format!("rgb({} {} {})", rgb.red, rgb.green, rgb.blue)
                } else {
                    format!(
                        "rgb({} {} {} / {}%)",
                        rgb.red,
                        rgb.green,
                        rgb.blue,
                        fmt_number(rgb.alpha * 100.0)
                    )
                }
            }
            Format::Hsl => {
                let hsl = self.to_hsl();
                let h = fmt_number(hsl.hue);
                let s = fmt_number(hsl.saturation * 100.0);
                let l = fmt_number(hsl.lightness * 100.0);
                if hsl.alpha == 1.0 {
                    format!("hsl({h} {s}% {l}%)")
                } else {
                    format!("hsl({h} {s}% {l}% / {}%)", fmt_number(hsl.alpha * 100.0))
                }
            }
        }
    }
}

impl Color {
    /// Render this color in its preferred format.
    pub fn to_text(&self) -> String {
        self.value().to_text(self.format())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Format a number with up to two decimal places, dropping a fractional
/// part that rounds away.
fn fmt_number(value: Component) -> String {
    if (value - value.round()).abs() < 1.0e-6 {
        format!("{}", value.round() as i64)
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hsl, Rgb};

    #[test]
    fn hex_omits_alpha_when_opaque() {
        let value = ColorValue::Rgb(Rgb::opaque(64, 64, 64));
        assert_eq!(value.to_text(Format::Hex), "#404040");

        let value = ColorValue::Rgb(Rgb::new(64, 64, 64, 0.5));
        assert_eq!(value.to_text(Format::Hex), "#40404080");
    }

    #[test]
    fn rgb_uses_the_space_separated_form() {
        let value = ColorValue::Rgb(Rgb::opaque(210, 105, 30));
        assert_eq!(value.to_text(Format::Rgb), "rgb(210 105 30)");

        let value = ColorValue::Rgb(Rgb::new(210, 105, 30, 0.5));
        assert_eq!(value.to_text(Format::Rgb), "rgb(210 105 30 / 50%)");
    }

    #[test]
    fn hsl_renders_percentages() {
        let value = ColorValue::Hsl(Hsl::new(25.0, 0.75, 0.25, 1.0));
        assert_eq!(value.to_text(Format::Hsl), "hsl(25 75% 25%)");

        let value = ColorValue::Hsl(Hsl::new(25.0, 0.75, 0.25, 0.25));
        assert_eq!(value.to_text(Format::Hsl), "hsl(25 75% 25% / 25%)");
    }

    #[test]
    fn rendering_converts_to_the_formats_space() {
        // A white HSL value rendered as hex goes through the pivot.
        let value = ColorValue::Hsl(Hsl::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(value.to_text(Format::Hex), "#ffffff");
    }

    #[test]
    fn display_uses_the_preferred_format() {
        let color = Color::parse("rgb(64 64 64)").unwrap();
        assert_eq!(color.to_string(), "rgb(64 64 64)");

        let color = Color::parse("#404040").unwrap();
        assert_eq!(color.to_string(), "#404040");
    }

    #[test]
    fn parse_then_format_round_trips() {
        for literal in ["#388f54", "#40404080", "rgb(1 2 3)", "hsl(140 50% 25%)"] {
            let color = Color::parse(literal).unwrap();
            assert_eq!(color.to_string(), literal, "{literal}");
        }
    }
}
