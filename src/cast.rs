//! Per-key valid ranges and the clamping rules applied after any mutation.
//!
//! Every attribute key is statically associated with the colorspace that
//! owns it and an inclusive numeric range. Clamping saturates, with the
//! single exception of hue, which wraps modulo 360 degrees.

use crate::color::{Color, ColorValue, Component, Space};
use crate::math;
use crate::{Cmyk, Hsl, Lab, Rgb, Xyz};

/// An attribute key addressing one field of a colorspace, used by the
/// generic accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The red channel of RGB.
    Red,
    /// The green channel of RGB.
    Green,
    /// The blue channel of RGB.
    Blue,
    /// The alpha component, present on every colorspace.
    Alpha,
    /// The hue angle of HSL.
    Hue,
    /// The saturation of HSL.
    Saturation,
    /// The lightness of HSL.
    Lightness,
    /// The lightness of CIE-LAB.
    L,
    /// The green-red axis of CIE-LAB.
    A,
    /// The blue-yellow axis of CIE-LAB.
    B,
    /// The cyan component of CMYK.
    Cyan,
    /// The magenta component of CMYK.
    Magenta,
    /// The yellow component of CMYK.
    Yellow,
    /// The black (key) component of CMYK.
    Black,
    /// The X component of CIE-XYZ.
    X,
    /// The Y component of CIE-XYZ.
    Y,
    /// The Z component of CIE-XYZ.
    Z,
}

impl Key {
    /// The colorspace that owns this key, or `None` for alpha, which lives
    /// on every variant.
    pub fn space(self) -> Option<Space> {
        match self {
            Key::Red | Key::Green | Key::Blue => Some(Space::Rgb),
            Key::Alpha => None,
            Key::Hue | Key::Saturation | Key::Lightness => Some(Space::Hsl),
            Key::L | Key::A | Key::B => Some(Space::Lab),
            Key::Cyan | Key::Magenta | Key::Yellow | Key::Black => Some(Space::Cmyk),
            Key::X | Key::Y | Key::Z => Some(Space::Xyz),
        }
    }

    /// The inclusive (min, max) range of values for this key.
    pub fn range(self) -> (Component, Component) {
        match self {
            Key::Red | Key::Green | Key::Blue => (0.0, 255.0),
            Key::Alpha => (0.0, 1.0),
            Key::Hue => (0.0, 360.0),
            Key::Saturation | Key::Lightness => (0.0, 1.0),
            Key::L => (0.0, 100.0),
            Key::A | Key::B => (-128.0, 128.0),
            Key::Cyan | Key::Magenta | Key::Yellow | Key::Black => (0.0, 1.0),
            Key::X => (0.0, Xyz::X_MAX),
            Key::Y => (0.0, Xyz::Y_MAX),
            Key::Z => (0.0, Xyz::Z_MAX),
        }
    }

    /// Clamp a value into this key's range: saturating for every key except
    /// hue, which wraps modulo 360 (500 becomes 140, -10 becomes 350).
    pub fn clamp(self, value: Component) -> Component {
        if self == Key::Hue {
            return math::wrap_hue(value);
        }

        let (min, max) = self.range();
        value.clamp(min, max)
    }
}

impl ColorValue {
    /// Re-clamp every field of this value. Casting an already valid value
    /// is a no-op, so `cast` is idempotent.
    pub fn cast(&self) -> Self {
        match self {
            ColorValue::Rgb(v) => ColorValue::Rgb(Rgb::new(v.red, v.green, v.blue, v.alpha)),
            ColorValue::Hsl(v) => {
                ColorValue::Hsl(Hsl::new(v.hue, v.saturation, v.lightness, v.alpha))
            }
            ColorValue::Lab(v) => ColorValue::Lab(Lab::new(v.l, v.a, v.b, v.alpha)),
            ColorValue::Xyz(v) => ColorValue::Xyz(Xyz::new(v.x, v.y, v.z, v.alpha)),
            ColorValue::Cmyk(v) => {
                ColorValue::Cmyk(Cmyk::new(v.cyan, v.magenta, v.yellow, v.black, v.alpha))
            }
        }
    }
}

impl Color {
    /// Re-clamp every field of the wrapped value.
    pub fn cast(&self) -> Self {
        self.rewrap(self.value().cast())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_knows_its_owner() {
        assert_eq!(Key::Red.space(), Some(Space::Rgb));
        assert_eq!(Key::Hue.space(), Some(Space::Hsl));
        assert_eq!(Key::L.space(), Some(Space::Lab));
        assert_eq!(Key::Black.space(), Some(Space::Cmyk));
        assert_eq!(Key::Z.space(), Some(Space::Xyz));
        assert_eq!(Key::Alpha.space(), None);
    }

    #[test]
    fn clamp_saturates() {
        assert_eq!(Key::Red.clamp(300.0), 255.0);
        assert_eq!(Key::Red.clamp(-4.0), 0.0);
        assert_eq!(Key::A.clamp(-200.0), -128.0);
        assert_eq!(Key::X.clamp(200.0), Xyz::X_MAX);
        assert_eq!(Key::Alpha.clamp(1.5), 1.0);
    }

    #[test]
    fn hue_wraps_instead_of_saturating() {
        assert_eq!(Key::Hue.clamp(500.0), 140.0);
        assert_eq!(Key::Hue.clamp(-10.0), 350.0);
    }

    #[test]
    fn cast_is_idempotent() {
        let values = [
            ColorValue::Rgb(Rgb::new(1, 2, 3, 0.5)),
            ColorValue::Hsl(Hsl::new(420.0, 2.0, -1.0, 0.5)),
            ColorValue::Lab(Lab::new(50.0, -20.0, 20.0, 1.0)),
            ColorValue::Xyz(Xyz::new(40.0, 50.0, 60.0, 1.0)),
            ColorValue::Cmyk(Cmyk::new(0.1, 0.2, 0.3, 0.4, 1.0)),
        ];
        for value in values {
            assert_eq!(value.cast().cast(), value.cast());
        }
    }
}
