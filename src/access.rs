//! Colorspace-agnostic attribute access.
//!
//! The three accessors are polymorphic over any colorspace value or the
//! [`Color`] wrapper. Each converts to the colorspace that owns the key
//! (a no-op when the value is already there), touches the field, and
//! returns the result expressed in the owning colorspace -- wrapped when
//! the input was wrapped, bare otherwise.

use crate::cast::Key;
use crate::color::{Color, ColorValue, Component};
use crate::{Cmyk, Hsl, Lab, Rgb, Xyz};

impl ColorValue {
    /// Read the field addressed by `key`, converting to its owning
    /// colorspace first.
    pub fn get(&self, key: Key) -> Component {
        match key {
            Key::Red => self.to_rgb().red as Component,
            Key::Green => self.to_rgb().green as Component,
            Key::Blue => self.to_rgb().blue as Component,
            Key::Alpha => self.alpha(),
            Key::Hue => self.to_hsl().hue,
            Key::Saturation => self.to_hsl().saturation,
            Key::Lightness => self.to_hsl().lightness,
            Key::L => self.to_lab().l,
            Key::A => self.to_lab().a,
            Key::B => self.to_lab().b,
            Key::Cyan => self.to_cmyk().cyan,
            Key::Magenta => self.to_cmyk().magenta,
            Key::Yellow => self.to_cmyk().yellow,
            Key::Black => self.to_cmyk().black,
            Key::X => self.to_xyz().x,
            Key::Y => self.to_xyz().y,
            Key::Z => self.to_xyz().z,
        }
    }

    /// Replace the field addressed by `key` with `value` and return the
    /// result in the key's owning colorspace. The replacement is clamped
    /// into the field's range (hue wraps), so reading the key back always
    /// yields an in-range value.
    pub fn put(&self, key: Key, value: Component) -> Self {
        let byte = |v: Component| key.clamp(v).round() as u8;

        match key {
            Key::Alpha => self.with_alpha(value),
            Key::Red => {
                let v = self.to_rgb();
                ColorValue::Rgb(Rgb::new(byte(value), v.green, v.blue, v.alpha))
            }
            Key::Green => {
                let v = self.to_rgb();
                ColorValue::Rgb(Rgb::new(v.red, byte(value), v.blue, v.alpha))
            }
            Key::Blue => {
                let v = self.to_rgb();
                ColorValue::Rgb(Rgb::new(v.red, v.green, byte(value), v.alpha))
            }
            Key::Hue => {
                let v = self.to_hsl();
                ColorValue::Hsl(Hsl::new(value, v.saturation, v.lightness, v.alpha))
            }
            Key::Saturation => {
                let v = self.to_hsl();
                ColorValue::Hsl(Hsl::new(v.hue, value, v.lightness, v.alpha))
            }
            Key::Lightness => {
                let v = self.to_hsl();
                ColorValue::Hsl(Hsl::new(v.hue, v.saturation, value, v.alpha))
            }
            Key::L => {
                let v = self.to_lab();
                ColorValue::Lab(Lab::new(value, v.a, v.b, v.alpha))
            }
            Key::A => {
                let v = self.to_lab();
                ColorValue::Lab(Lab::new(v.l, value, v.b, v.alpha))
            }
            Key::B => {
                let v = self.to_lab();
                ColorValue::Lab(Lab::new(v.l, v.a, value, v.alpha))
            }
            Key::Cyan => {
                let v = self.to_cmyk();
                ColorValue::Cmyk(Cmyk::new(value, v.magenta, v.yellow, v.black, v.alpha))
            }
            Key::Magenta => {
                let v = self.to_cmyk();
                ColorValue::Cmyk(Cmyk::new(v.cyan, value, v.yellow, v.black, v.alpha))
            }
            Key::Yellow => {
                let v = self.to_cmyk();
                ColorValue::Cmyk(Cmyk::new(v.cyan, v.magenta, value, v.black, v.alpha))
            }
            Key::Black => {
                let v = self.to_cmyk();
                ColorValue::Cmyk(Cmyk::new(v.cyan, v.magenta, v.yellow, value, v.alpha))
            }
            Key::X => {
                let v = self.to_xyz();
                ColorValue::Xyz(Xyz::new(value, v.y, v.z, v.alpha))
            }
            Key::Y => {
                let v = self.to_xyz();
                ColorValue::Xyz(Xyz::new(v.x, value, v.z, v.alpha))
            }
            Key::Z => {
                let v = self.to_xyz();
                ColorValue::Xyz(Xyz::new(v.x, v.y, value, v.alpha))
            }
        }
    }

    /// Apply `f` to the field addressed by `key` and store the clamped
    /// result (hue wraps). The returned value is expressed in the key's
    /// owning colorspace.
    pub fn update(&self, key: Key, f: impl FnOnce(Component) -> Component) -> Self {
        self.put(key, f(self.get(key)))
    }

    /// Like [`ColorValue::update`], but also hands `f` the `(min, max)`
    /// range of the key.
    pub fn update_with_range(
        &self,
        key: Key,
        f: impl FnOnce(Component, (Component, Component)) -> Component,
    ) -> Self {
        self.put(key, f(self.get(key), key.range()))
    }
}

impl Color {
    /// Read the field addressed by `key` from the wrapped value.
    pub fn get(&self, key: Key) -> Component {
        self.value().get(key)
    }

    /// Replace the field addressed by `key`; the result stays wrapped and
    /// keeps this color's format tag.
    pub fn put(&self, key: Key, value: Component) -> Self {
        self.rewrap(self.value().put(key, value))
    }

    /// Apply `f` to the field addressed by `key`; the result stays wrapped
    /// and keeps this color's format tag.
    pub fn update(&self, key: Key, f: impl FnOnce(Component) -> Component) -> Self {
        self.rewrap(self.value().update(key, f))
    }

    /// Like [`Color::update`], but also hands `f` the `(min, max)` range of
    /// the key.
    pub fn update_with_range(
        &self,
        key: Key,
        f: impl FnOnce(Component, (Component, Component)) -> Component,
    ) -> Self {
        self.rewrap(self.value().update_with_range(key, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Format, Space};

    fn black() -> ColorValue {
        ColorValue::Rgb(Rgb::BLACK)
    }

    #[test]
    fn get_converts_to_the_owning_space() {
        let red = ColorValue::Rgb(Rgb::opaque(255, 0, 0));
        assert_eq!(red.get(Key::Hue), 0.0);
        assert_eq!(red.get(Key::Saturation), 1.0);
        assert_eq!(red.get(Key::Red), 255.0);
        assert_eq!(red.get(Key::Black), 0.0);
        assert_eq!(red.get(Key::Alpha), 1.0);
    }

    #[test]
    fn put_lightness_turns_black_into_white() {
        let result = black().put(Key::Lightness, 1.0);
        assert_eq!(result.space(), Space::Hsl);
        assert_eq!(result.to_rgb(), Rgb::WHITE);
    }

    #[test]
    fn get_after_put_returns_the_written_value() {
        let value = black().put(Key::Saturation, 0.25);
        assert_eq!(value.get(Key::Saturation), 0.25);

        // Out-of-range writes read back post-clamp.
        let value = black().put(Key::Red, 300.0);
        assert_eq!(value.get(Key::Red), 255.0);

        let value = black().put(Key::L, -10.0);
        assert_eq!(value.get(Key::L), 0.0);
    }

    #[test]
    fn update_wraps_hue() {
        let color = ColorValue::Rgb(Rgb::opaque(255, 0, 0));
        assert_eq!(color.update(Key::Hue, |_| 500.0).get(Key::Hue), 140.0);
        assert_eq!(color.update(Key::Hue, |_| -10.0).get(Key::Hue), 350.0);
    }

    #[test]
    fn update_with_range_hands_over_the_bounds() {
        let value = black().update_with_range(Key::Lightness, |_, (_, max)| max);
        assert_eq!(value.get(Key::Lightness), 1.0);

        let value = black().update_with_range(Key::A, |_, (min, _)| min);
        assert_eq!(value.get(Key::A), -128.0);
    }

    #[test]
    fn alpha_key_needs_no_conversion() {
        let hsl = ColorValue::Hsl(Hsl::new(120.0, 0.5, 0.5, 1.0));
        let updated = hsl.put(Key::Alpha, 0.25);
        assert_eq!(updated.space(), Space::Hsl);
        assert_eq!(updated.alpha(), 0.25);
    }

    #[test]
    fn put_round_trips_through_text() {
        let color = Color::parse("#000000").unwrap().put(Key::Lightness, 1.0);
        assert_eq!(color.to_string(), "#ffffff");
    }

    #[test]
    fn wrapper_results_stay_wrapped() {
        let color = Color::new(Rgb::BLACK).with_format(Format::Rgb);
        let updated = color.put(Key::Lightness, 1.0);
        assert_eq!(updated.format(), Format::Rgb);
        assert_eq!(updated.space(), Space::Hsl);
        assert_eq!(updated.get(Key::Lightness), 1.0);
    }
}
