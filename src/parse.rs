//! Parse textual color literals.
//!
//! Accepted grammars: hex (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`),
//! functional `rgb()`/`rgba()` and `hsl()`/`hsla()` notation with comma or
//! space separated arguments and an optional `/`-separated alpha (as a
//! percentage or a 0-1 fraction), and named-color keywords. Malformed text
//! yields a [`FormatError`], never a partial value; out-of-range numbers in
//! well-formed text are clamped, never rejected.

use std::str::FromStr;

use thiserror::Error;

use crate::color::{Color, ColorValue, Component, Format};
use crate::named;
use crate::{Hsl, Rgb};

/// Failure to recognize a textual color literal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The input was empty or only whitespace.
    #[error("empty color string")]
    Empty,
    /// A `#...` literal with a bad length or non-hex digits.
    #[error("invalid hex literal `{0}`")]
    InvalidHex(String),
    /// An `rgb()`/`hsl()` function with a malformed argument list.
    #[error("invalid function syntax `{0}`")]
    InvalidFunction(String),
    /// An argument that did not parse as a number in its expected form.
    #[error("invalid component `{0}`")]
    InvalidComponent(String),
    /// Input that matches no known grammar or color name.
    #[error("unknown color `{0}`")]
    UnknownName(String),
}

impl Color {
    /// Parse a color literal, remembering the syntax it was written in as
    /// the preferred format.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let (value, format) = parse_value(input)?;
        Ok(Color::new(value).with_format(format))
    }
}

impl FromStr for Color {
    type Err = FormatError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Color::parse(input)
    }
}

impl From<&str> for Color {
    /// Parse a color literal, treating invalid input as fatal.
    ///
    /// # Panics
    ///
    /// Panics when the literal matches no known grammar; use
    /// [`Color::parse`] to handle the failure instead.
    fn from(input: &str) -> Self {
        match Color::parse(input) {
            Ok(color) => color,
            Err(err) => panic!("{err}"),
        }
    }
}

pub(crate) fn parse_value(input: &str) -> Result<(ColorValue, Format), FormatError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FormatError::Empty);
    }

    if let Some(hex) = input.strip_prefix('#') {
        return Ok((ColorValue::Rgb(parse_hex(hex)?), Format::Hex));
    }

    let lower = input.to_ascii_lowercase();
    if let Some(args) = function_args(&lower, &["rgba", "rgb"]) {
        return Ok((ColorValue::Rgb(parse_rgb_args(args, input)?), Format::Rgb));
    }
    if let Some(args) = function_args(&lower, &["hsla", "hsl"]) {
        return Ok((ColorValue::Hsl(parse_hsl_args(args, input)?), Format::Hsl));
    }

    if let Some(rgb) = named::lookup(&lower) {
        return Ok((ColorValue::Rgb(rgb), Format::Hex));
    }

    Err(FormatError::UnknownName(input.to_string()))
}

fn nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

fn parse_hex(hex: &str) -> Result<Rgb, FormatError> {
    let invalid = || FormatError::InvalidHex(format!("#{hex}"));
    let bytes = hex.as_bytes();

    let one = |index: usize| -> Result<u8, FormatError> {
        let n = nibble(bytes[index]).ok_or_else(invalid)?;
        Ok(n * 17)
    };
    let two = |index: usize| -> Result<u8, FormatError> {
        let hi = nibble(bytes[index]).ok_or_else(invalid)?;
        let lo = nibble(bytes[index + 1]).ok_or_else(invalid)?;
        Ok(hi << 4 | lo)
    };

    let (r, g, b, a) = match bytes.len() {
        3 => (one(0)?, one(1)?, one(2)?, 255),
        4 => (one(0)?, one(1)?, one(2)?, one(3)?),
        6 => (two(0)?, two(2)?, two(4)?, 255),
        8 => (two(0)?, two(2)?, two(4)?, two(6)?),
        _ => return Err(invalid()),
    };

    Ok(Rgb::new(r, g, b, a as Component / 255.0))
}

/// Strip a `name(...)` wrapper, returning the argument text. Longer names
/// must come first so `rgba` is not consumed as `rgb` with a stray `a`.
fn function_args<'a>(input: &'a str, names: &[&str]) -> Option<&'a str> {
    for name in names {
        if let Some(rest) = input.strip_prefix(name) {
            if let Some(args) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
                return Some(args);
            }
        }
    }
    None
}

/// Split a functional argument list into its components and an optional
/// `/`-separated alpha term. Components may be comma or space separated.
fn split_args(args: &str) -> (Vec<&str>, Option<&str>) {
    let (body, alpha) = match args.split_once('/') {
        Some((body, alpha)) => (body, Some(alpha.trim())),
        None => (args, None),
    };
    let parts = body
        .split(|ch: char| ch == ',' || ch.is_ascii_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    (parts, alpha)
}

fn number(token: &str) -> Result<Component, FormatError> {
    token
        .parse::<Component>()
        .map_err(|_| FormatError::InvalidComponent(token.to_string()))
}

/// An RGB channel: an integer in 0-255 or a percentage. Out-of-range values
/// clamp.
fn channel(token: &str) -> Result<u8, FormatError> {
    let value = match token.strip_suffix('%') {
        Some(percent) => number(percent)? / 100.0 * 255.0,
        None => number(token)?,
    };
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

/// An alpha term: a percentage or a 0-1 fraction. Out-of-range values
/// clamp.
fn alpha_term(token: &str) -> Result<Component, FormatError> {
    let value = match token.strip_suffix('%') {
        Some(percent) => number(percent)? / 100.0,
        None => number(token)?,
    };
    Ok(value.clamp(0.0, 1.0))
}

/// A saturation or lightness term: a percentage or a 0-1 fraction.
fn unit_term(token: &str) -> Result<Component, FormatError> {
    alpha_term(token)
}

fn parse_rgb_args(args: &str, original: &str) -> Result<Rgb, FormatError> {
    let (parts, alpha) = split_args(args);

    let alpha = match (parts.len(), alpha) {
        (3, None) => 1.0,
        (3, Some(token)) => alpha_term(token)?,
        (4, None) => alpha_term(parts[3])?,
        _ => return Err(FormatError::InvalidFunction(original.to_string())),
    };

    Ok(Rgb::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn parse_hsl_args(args: &str, original: &str) -> Result<Hsl, FormatError> {
    let (parts, alpha) = split_args(args);

    let alpha = match (parts.len(), alpha) {
        (3, None) => 1.0,
        (3, Some(token)) => alpha_term(token)?,
        (4, None) => alpha_term(parts[3])?,
        _ => return Err(FormatError::InvalidFunction(original.to_string())),
    };

    let hue = number(parts[0].strip_suffix("deg").unwrap_or(parts[0]))?;
    Ok(Hsl::new(hue, unit_term(parts[1])?, unit_term(parts[2])?, alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Space;

    fn value(input: &str) -> ColorValue {
        Color::parse(input).unwrap().value().clone()
    }

    #[test]
    fn parses_hex_in_every_length() {
        assert_eq!(value("#fff"), ColorValue::Rgb(Rgb::opaque(255, 255, 255)));
        assert_eq!(value("#F0a"), ColorValue::Rgb(Rgb::opaque(255, 0, 170)));
        assert_eq!(
            value("#f0a8"),
            ColorValue::Rgb(Rgb::new(255, 0, 170, 136.0 / 255.0))
        );
        assert_eq!(value("#404040"), ColorValue::Rgb(Rgb::opaque(64, 64, 64)));
        assert_eq!(
            value("#40404080"),
            ColorValue::Rgb(Rgb::new(64, 64, 64, 128.0 / 255.0))
        );
    }

    #[test]
    fn parses_rgb_functions() {
        let expected = ColorValue::Rgb(Rgb::opaque(210, 105, 30));
        assert_eq!(value("rgb(210, 105, 30)"), expected);
        assert_eq!(value("rgb(210 105 30)"), expected);
        assert_eq!(value("RGB(210 105 30)"), expected);

        assert_eq!(
            value("rgba(210, 105, 30, 0.5)"),
            ColorValue::Rgb(Rgb::new(210, 105, 30, 0.5))
        );
        assert_eq!(
            value("rgb(210 105 30 / 50%)"),
            ColorValue::Rgb(Rgb::new(210, 105, 30, 0.5))
        );
        assert_eq!(
            value("rgb(100% 0% 50%)"),
            ColorValue::Rgb(Rgb::opaque(255, 0, 128))
        );
    }

    #[test]
    fn parses_hsl_functions() {
        let expected = ColorValue::Hsl(Hsl::new(25.0, 0.75, 0.47, 1.0));
        assert_eq!(value("hsl(25, 75%, 47%)"), expected);
        assert_eq!(value("hsl(25 75% 47%)"), expected);
        assert_eq!(value("hsl(25deg 75% 47%)"), expected);

        assert_eq!(
            value("hsla(25, 75%, 47%, 0.25)"),
            ColorValue::Hsl(Hsl::new(25.0, 0.75, 0.47, 0.25))
        );
        assert_eq!(
            value("hsl(25 75% 47% / 25%)"),
            ColorValue::Hsl(Hsl::new(25.0, 0.75, 0.47, 0.25))
        );
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(value("rebeccapurple"), ColorValue::Rgb(Rgb::opaque(102, 51, 153)));
        assert_eq!(value("Tomato"), ColorValue::Rgb(Rgb::opaque(255, 99, 71)));
        assert_eq!(value("black"), ColorValue::Rgb(Rgb::BLACK));
    }

    #[test]
    fn remembers_the_parsed_format() {
        assert_eq!(Color::parse("#404040").unwrap().format(), Format::Hex);
        assert_eq!(Color::parse("rgb(1 2 3)").unwrap().format(), Format::Rgb);
        assert_eq!(Color::parse("hsl(1 2% 3%)").unwrap().format(), Format::Hsl);
        assert_eq!(Color::parse("tomato").unwrap().format(), Format::Hex);
    }

    #[test]
    fn out_of_range_components_clamp() {
        assert_eq!(value("rgb(300, -4, 30)"), ColorValue::Rgb(Rgb::opaque(255, 0, 30)));
        assert_eq!(value("rgba(0, 0, 0, 4)").alpha(), 1.0);
        assert_eq!(value("hsl(500 75% 47%)").space(), Space::Hsl);
        assert_eq!(value("hsl(500 75% 47%)").to_hsl().hue, 140.0);
    }

    #[test]
    fn malformed_input_fails() {
        assert_eq!(Color::parse(""), Err(FormatError::Empty));
        assert_eq!(Color::parse("   "), Err(FormatError::Empty));
        assert!(matches!(
            Color::parse("#12345"),
            Err(FormatError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("#zzzzzz"),
            Err(FormatError::InvalidHex(_))
        ));
        assert!(matches!(
            Color::parse("rgb(1, 2)"),
            Err(FormatError::InvalidFunction(_))
        ));
        assert!(matches!(
            Color::parse("rgb(1, 2, x)"),
            Err(FormatError::InvalidComponent(_))
        ));
        assert!(matches!(
            Color::parse("notacolor"),
            Err(FormatError::UnknownName(_))
        ));
    }

    #[test]
    fn from_str_round_trips_through_the_std_trait() {
        let color: Color = "#404040".parse().unwrap();
        assert_eq!(color.value(), &ColorValue::Rgb(Rgb::opaque(64, 64, 64)));
    }

    #[test]
    #[should_panic(expected = "unknown color")]
    fn from_panics_on_invalid_input() {
        let _ = Color::from("notacolor");
    }
}
