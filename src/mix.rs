//! Linear color mixing and the blends derived from it.
//!
//! Mixing operates in RGB and returns its result in the colorspace of the
//! first input. The weighted mix compensates for transparency: a mostly
//! transparent color contributes little to the channels even at a high
//! weight, while the output alpha interpolates plainly.

use num_traits::Float;

use crate::color::{Color, ColorValue, Component};
use crate::rgb::Rgb;

fn lerp<T: Float>(a: T, b: T, t: T) -> T {
    a + (b - a) * t
}

impl ColorValue {
    /// Mix this color with `other` in equal parts.
    pub fn mix(&self, other: &Self) -> Self {
        self.mix_weighted(other, 0.5)
    }

    /// Mix this color with `other`, `weight` being the share of this color
    /// (clamped to `0.0..=1.0`). The result is expressed in this value's
    /// colorspace.
    pub fn mix_weighted(&self, other: &Self, weight: Component) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let (a, b) = (self.to_rgb(), other.to_rgb());

        let w = weight * 2.0 - 1.0;
        let d = a.alpha - b.alpha;
        let w1 = if w * d == -1.0 { w } else { (w + d) / (1.0 + w * d) };
        let w1 = (w1 + 1.0) / 2.0;
        let w2 = 1.0 - w1;

        let channel =
            |x: u8, y: u8| (x as Component * w1 + y as Component * w2).round() as u8;

        let mixed = Rgb::new(
            channel(a.red, b.red),
            channel(a.green, b.green),
            channel(a.blue, b.blue),
            lerp(b.alpha, a.alpha, weight),
        );
        ColorValue::Rgb(mixed).to_space(self.space())
    }

    /// Resolve this color against an opaque `background`: each channel is
    /// blended by this color's alpha and the result is fully opaque, in
    /// this value's colorspace.
    pub fn flatten(&self, background: &Self) -> Self {
        let fg = self.to_rgb();
        let bg = background.to_rgb();
        let alpha = fg.alpha;

        let channel =
            |c: u8, b: u8| lerp(b as Component, c as Component, alpha).round() as u8;

        let flat = Rgb::new(
            channel(fg.red, bg.red),
            channel(fg.green, bg.green),
            channel(fg.blue, bg.blue),
            1.0,
        );
        ColorValue::Rgb(flat).to_space(self.space())
    }
}

/// Average a set of colors: root-mean-square per RGB channel, arithmetic
/// mean alpha. The result is expressed in the colorspace of the first
/// element; an empty slice yields `None`.
pub fn average(colors: &[ColorValue]) -> Option<ColorValue> {
    let first = colors.first()?;
    let count = colors.len() as Component;

    let mut squares = [0.0; 3];
    let mut alpha = 0.0;
    for color in colors {
        let rgb = color.to_rgb();
        squares[0] += (rgb.red as Component).powi(2);
        squares[1] += (rgb.green as Component).powi(2);
        squares[2] += (rgb.blue as Component).powi(2);
        alpha += rgb.alpha;
    }

    let channel = |sum: Component| (sum / count).sqrt().round() as u8;
    let averaged = Rgb::new(
        channel(squares[0]),
        channel(squares[1]),
        channel(squares[2]),
        alpha / count,
    );
    Some(ColorValue::Rgb(averaged).to_space(first.space()))
}

impl Color {
    /// Mix this color with `other` in equal parts; the result keeps this
    /// color's wrapper.
    pub fn mix(&self, other: &Self) -> Self {
        self.rewrap(self.value().mix(other.value()))
    }

    /// Mix this color with `other`, `weight` being the share of this color.
    pub fn mix_weighted(&self, other: &Self, weight: Component) -> Self {
        self.rewrap(self.value().mix_weighted(other.value(), weight))
    }

    /// Resolve this color against its remembered background (white when
    /// none was set) into an equivalent fully opaque color.
    pub fn flatten(&self) -> Self {
        let background = self
            .background()
            .copied()
            .unwrap_or(ColorValue::Rgb(Rgb::WHITE));
        self.rewrap(self.value().flatten(&background))
    }

    /// Resolve this color against the given opaque background.
    pub fn flatten_on(&self, background: &Self) -> Self {
        self.rewrap(self.value().flatten(background.value()))
    }

    /// Average a set of wrapped colors; the result carries the first
    /// color's wrapper. An empty slice yields `None`.
    pub fn average(colors: &[Self]) -> Option<Self> {
        let first = colors.first()?;
        let values: Vec<ColorValue> = colors.iter().map(|c| *c.value()).collect();
        average(&values).map(|value| first.rewrap(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Space;
    use crate::Hsl;

    fn rgb(red: u8, green: u8, blue: u8) -> ColorValue {
        ColorValue::Rgb(Rgb::opaque(red, green, blue))
    }

    #[test]
    fn weighted_mix_of_opaque_colors() {
        // 25% magenta into green.
        let mixed = rgb(0xff, 0x00, 0xff).mix_weighted(&rgb(0x00, 0x55, 0x00), 0.25);
        assert_eq!(mixed, rgb(0x40, 0x40, 0x40));
    }

    #[test]
    fn even_mix_is_the_midpoint_for_equal_alphas() {
        let mixed = rgb(0, 0, 0).mix(&rgb(255, 255, 255));
        assert_eq!(mixed, rgb(128, 128, 128));
    }

    #[test]
    fn transparency_shifts_the_channel_weights() {
        let glass = ColorValue::Rgb(Rgb::new(255, 0, 0, 0.0));
        let solid = rgb(0, 0, 255);
        // A fully transparent first color contributes nothing to the
        // channels at an even weight, but the alpha still interpolates.
        let mixed = glass.mix(&solid);
        let out = mixed.to_rgb();
        assert_eq!((out.red, out.green, out.blue), (0, 0, 255));
        assert_eq!(out.alpha, 0.5);
    }

    #[test]
    fn extreme_weights_return_the_endpoints() {
        let (a, b) = (rgb(10, 20, 30), rgb(200, 210, 220));
        assert_eq!(a.mix_weighted(&b, 1.0), a);
        assert_eq!(a.mix_weighted(&b, 0.0), b);
    }

    #[test]
    fn mix_result_takes_the_first_inputs_space() {
        let hsl = ColorValue::Hsl(Hsl::new(0.0, 1.0, 0.5, 1.0));
        let mixed = hsl.mix(&rgb(0, 0, 255));
        assert_eq!(mixed.space(), Space::Hsl);
    }

    #[test]
    fn average_is_root_mean_square_per_channel() {
        let averaged = average(&[rgb(255, 0, 0), rgb(0, 255, 0), rgb(0, 0, 255)]).unwrap();
        assert_eq!(averaged, rgb(147, 147, 147));
        assert_eq!(averaged.alpha(), 1.0);
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn flatten_resolves_against_the_background() {
        let translucent = ColorValue::Rgb(Rgb::new(255, 0, 0, 0.5));
        let flat = translucent.flatten(&rgb(255, 255, 255));
        assert_eq!(flat, rgb(255, 128, 128));
    }

    #[test]
    fn wrapper_flatten_defaults_to_white() {
        let color = Color::new(Rgb::new(0, 0, 255, 0.5));
        let flat = color.flatten();
        assert_eq!(flat.value(), &rgb(128, 128, 255));
        assert_eq!(flat.alpha(), 1.0);
    }

    #[test]
    fn wrapper_flatten_uses_the_remembered_background() {
        let color = Color::new(Rgb::new(0, 0, 255, 0.5)).with_background(Rgb::BLACK);
        let flat = color.flatten();
        assert_eq!(flat.value(), &rgb(0, 0, 128));
    }
}
