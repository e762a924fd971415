//! The core color types: the closed set of colorspace variants behind
//! [`ColorValue`] and the opaque [`Color`] wrapper.

use crate::cmyk::Cmyk;
use crate::hsl::Hsl;
use crate::lab::Lab;
use crate::rgb::Rgb;
use crate::xyz::Xyz;

/// A 64-bit floating point value that all non-integer components are stored
/// as.
pub type Component = f64;

/// The colorspaces a value can be expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    /// The RGB colorspace with 8-bit channels.
    Rgb,
    /// The HSL (hue, saturation, lightness) notation.
    Hsl,
    /// The CIE-LAB colorspace.
    Lab,
    /// The CIE-XYZ colorspace.
    Xyz,
    /// The CMYK colorspace.
    Cmyk,
}

/// A color expressed in one of the five supported colorspaces.
///
/// Every public operation that accepts a `ColorValue` returns its result as
/// a `ColorValue` again; the [`Color`] wrapper mirrors the same operations
/// and rewraps their results. Values are immutable: operations always build
/// a fresh value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColorValue {
    /// A color in the RGB colorspace.
    Rgb(Rgb),
    /// A color with the HSL notation.
    Hsl(Hsl),
    /// A color in the CIE-LAB colorspace.
    Lab(Lab),
    /// A color in the CIE-XYZ colorspace.
    Xyz(Xyz),
    /// A color in the CMYK colorspace.
    Cmyk(Cmyk),
}

impl ColorValue {
    /// The colorspace this value is expressed in.
    pub fn space(&self) -> Space {
        match self {
            ColorValue::Rgb(_) => Space::Rgb,
            ColorValue::Hsl(_) => Space::Hsl,
            ColorValue::Lab(_) => Space::Lab,
            ColorValue::Xyz(_) => Space::Xyz,
            ColorValue::Cmyk(_) => Space::Cmyk,
        }
    }

    /// The alpha component of the color.
    pub fn alpha(&self) -> Component {
        match self {
            ColorValue::Rgb(v) => v.alpha,
            ColorValue::Hsl(v) => v.alpha,
            ColorValue::Lab(v) => v.alpha,
            ColorValue::Xyz(v) => v.alpha,
            ColorValue::Cmyk(v) => v.alpha,
        }
    }

    /// Return a copy of this value with the alpha component replaced. The
    /// new alpha saturates to `0.0..=1.0`.
    pub fn with_alpha(&self, alpha: Component) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        let mut value = *self;
        match &mut value {
            ColorValue::Rgb(v) => v.alpha = alpha,
            ColorValue::Hsl(v) => v.alpha = alpha,
            ColorValue::Lab(v) => v.alpha = alpha,
            ColorValue::Xyz(v) => v.alpha = alpha,
            ColorValue::Cmyk(v) => v.alpha = alpha,
        }
        value
    }
}

impl From<Rgb> for ColorValue {
    fn from(value: Rgb) -> Self {
        ColorValue::Rgb(value)
    }
}

impl From<Hsl> for ColorValue {
    fn from(value: Hsl) -> Self {
        ColorValue::Hsl(value)
    }
}

impl From<Lab> for ColorValue {
    fn from(value: Lab) -> Self {
        ColorValue::Lab(value)
    }
}

impl From<Xyz> for ColorValue {
    fn from(value: Xyz) -> Self {
        ColorValue::Xyz(value)
    }
}

impl From<Cmyk> for ColorValue {
    fn from(value: Cmyk) -> Self {
        ColorValue::Cmyk(value)
    }
}

impl From<(u8, u8, u8)> for ColorValue {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        ColorValue::Rgb(Rgb::opaque(red, green, blue))
    }
}

impl From<(u8, u8, u8, Component)> for ColorValue {
    fn from((red, green, blue, alpha): (u8, u8, u8, Component)) -> Self {
        ColorValue::Rgb(Rgb::new(red, green, blue, alpha))
    }
}

/// Preferred textual rendering of a color, remembered from the syntax it was
/// parsed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Hex notation, `#rrggbb` or `#rrggbbaa`.
    #[default]
    Hex,
    /// Functional RGB notation, `rgb(r g b)` or `rgb(r g b / a%)`.
    Rgb,
    /// Functional HSL notation, `hsl(h s% l%)` or `hsl(h s% l% / a%)`.
    Hsl,
}

/// An opaque color: one colorspace value plus the preferred textual format
/// and an optional background used for alpha flattening.
///
/// Every operation that would return a bare [`ColorValue`] instead returns a
/// new `Color` carrying the same format tag and background forward. The
/// wrapper never mutates in place.
#[derive(Clone, Debug, PartialEq)]
pub struct Color {
    value: ColorValue,
    format: Format,
    background: Option<ColorValue>,
}

impl Color {
    /// Wrap a colorspace value. The preferred format defaults to hex.
    pub fn new(value: impl Into<ColorValue>) -> Self {
        Self {
            value: value.into(),
            format: Format::default(),
            background: None,
        }
    }

    /// Return this color with a different preferred format.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Return this color with a remembered background, used by
    /// [`Color::flatten`].
    pub fn with_background(mut self, background: impl Into<ColorValue>) -> Self {
        self.background = Some(background.into());
        self
    }

    /// The wrapped colorspace value.
    pub fn value(&self) -> &ColorValue {
        &self.value
    }

    /// The preferred textual format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// The remembered background color, if any.
    pub fn background(&self) -> Option<&ColorValue> {
        self.background.as_ref()
    }

    /// The colorspace the wrapped value is expressed in.
    pub fn space(&self) -> Space {
        self.value.space()
    }

    /// The alpha component of the wrapped value.
    pub fn alpha(&self) -> Component {
        self.value.alpha()
    }

    /// Return a copy with the alpha component replaced (saturating).
    pub fn with_alpha(&self, alpha: Component) -> Self {
        self.rewrap(self.value.with_alpha(alpha))
    }

    /// Wrap an operation result, carrying the format tag and background of
    /// this color forward.
    pub(crate) fn rewrap(&self, value: ColorValue) -> Self {
        Self {
            value,
            format: self.format,
            background: self.background,
        }
    }
}

impl From<ColorValue> for Color {
    fn from(value: ColorValue) -> Self {
        let format = match value.space() {
            Space::Rgb => Format::Rgb,
            Space::Hsl => Format::Hsl,
            _ => Format::Hex,
        };
        Color::new(value).with_format(format)
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::from(ColorValue::Rgb(value))
    }
}

impl From<Hsl> for Color {
    fn from(value: Hsl) -> Self {
        Color::from(ColorValue::Hsl(value))
    }
}

impl From<Lab> for Color {
    fn from(value: Lab) -> Self {
        Color::from(ColorValue::Lab(value))
    }
}

impl From<Xyz> for Color {
    fn from(value: Xyz) -> Self {
        Color::from(ColorValue::Xyz(value))
    }
}

impl From<Cmyk> for Color {
    fn from(value: Cmyk) -> Self {
        Color::from(ColorValue::Cmyk(value))
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from(tuple: (u8, u8, u8)) -> Self {
        Color::from(ColorValue::from(tuple))
    }
}

impl From<(u8, u8, u8, Component)> for Color {
    fn from(tuple: (u8, u8, u8, Component)) -> Self {
        Color::from(ColorValue::from(tuple))
    }
}
