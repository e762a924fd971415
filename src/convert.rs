//! Conversions between the five colorspaces.
//!
//! Every colorspace implements a round-trip-safe conversion to and from the
//! 8-bit RGBA pivot, and every cross-colorspace conversion routes through
//! it: HSL to CMYK is HSL -> pivot -> CMYK. LAB composes through XYZ on both
//! sides of the pivot.
//!
//! Conversions are total: no conversion fails for a well-formed value, and
//! the numeric edge cases (CMYK with `k == 1`, a non-finite result in the
//! XYZ gamma step) resolve to fixed fallback values.

use crate::color::{Color, ColorValue, Component, Space};
use crate::math::{self, transform, transform_3x3, Transform};
use crate::{Cmyk, Hsl, Lab, Rgb, Xyz};

impl ColorValue {
    /// Convert this value to the given colorspace. Converting to the
    /// colorspace the value is already in returns it unchanged.
    pub fn to_space(&self, space: Space) -> Self {
        if self.space() == space {
            return *self;
        }

        let pivot = self.to_pivot();
        match space {
            Space::Rgb => ColorValue::Rgb(pivot),
            Space::Hsl => ColorValue::Hsl(Hsl::from_pivot(pivot)),
            Space::Lab => ColorValue::Lab(Lab::from_pivot(pivot)),
            Space::Xyz => ColorValue::Xyz(Xyz::from_pivot(pivot)),
            Space::Cmyk => ColorValue::Cmyk(Cmyk::from_pivot(pivot)),
        }
    }

    /// The canonical pivot form of this value.
    pub fn to_pivot(&self) -> Rgb {
        match self {
            ColorValue::Rgb(rgb) => *rgb,
            ColorValue::Hsl(hsl) => hsl.to_pivot(),
            ColorValue::Lab(lab) => lab.to_pivot(),
            ColorValue::Xyz(xyz) => xyz.to_pivot(),
            ColorValue::Cmyk(cmyk) => cmyk.to_pivot(),
        }
    }

    /// This value in the RGB colorspace.
    pub fn to_rgb(&self) -> Rgb {
        self.to_pivot()
    }

    /// This value in the HSL notation.
    pub fn to_hsl(&self) -> Hsl {
        match self {
            ColorValue::Hsl(hsl) => *hsl,
            _ => Hsl::from_pivot(self.to_pivot()),
        }
    }

    /// This value in the CIE-LAB colorspace.
    pub fn to_lab(&self) -> Lab {
        match self {
            ColorValue::Lab(lab) => *lab,
            _ => Lab::from_pivot(self.to_pivot()),
        }
    }

    /// This value in the CIE-XYZ colorspace.
    pub fn to_xyz(&self) -> Xyz {
        match self {
            ColorValue::Xyz(xyz) => *xyz,
            _ => Xyz::from_pivot(self.to_pivot()),
        }
    }

    /// This value in the CMYK colorspace.
    pub fn to_cmyk(&self) -> Cmyk {
        match self {
            ColorValue::Cmyk(cmyk) => *cmyk,
            _ => Cmyk::from_pivot(self.to_pivot()),
        }
    }
}

impl Color {
    /// Convert the wrapped value to the given colorspace, keeping the
    /// preferred format.
    pub fn to_space(&self, space: Space) -> Self {
        self.rewrap(self.value().to_space(space))
    }
}

impl Hsl {
    /// Convert this color to the pivot.
    pub fn to_pivot(&self) -> Rgb {
        let (r, g, b) = util::hsl_to_rgb(self.hue, self.saturation, self.lightness);
        Rgb::from_unit(r, g, b, self.alpha)
    }

    /// Build this color from the pivot.
    pub fn from_pivot(pivot: Rgb) -> Self {
        let (r, g, b) = pivot.unit_channels();
        let (hue, saturation, lightness) = util::rgb_to_hsl(r, g, b);
        Hsl::new(hue, saturation, lightness, pivot.alpha)
    }
}

impl Cmyk {
    /// Convert this color to the pivot.
    pub fn to_pivot(&self) -> Rgb {
        let k = self.black;
        let channel = |v: Component| (1.0 - v) * (1.0 - k);
        Rgb::from_unit(
            channel(self.cyan),
            channel(self.magenta),
            channel(self.yellow),
            self.alpha,
        )
    }

    /// Build this color from the pivot.
    pub fn from_pivot(pivot: Rgb) -> Self {
        let (r, g, b) = pivot.unit_channels();
        let k = 1.0 - r.max(g).max(b);

        // Pure black would divide by zero below.
        if k == 1.0 {
            return Cmyk::new(0.0, 0.0, 0.0, 1.0, pivot.alpha);
        }

        let channel = |v: Component| (1.0 - v - k) / (1.0 - k);
        Cmyk::new(channel(r), channel(g), channel(b), k, pivot.alpha)
    }
}

/// Linear sRGB -> XYZ, scaled to the crate's 0..~100 XYZ domain by the
/// caller. Rows hold the contributions of r, g and b.
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const RGB_TO_XYZ: Transform = transform_3x3(
    0.4124564, 0.2126729, 0.0193339,
    0.3575761, 0.7151522, 0.1191920,
    0.1804375, 0.0721750, 0.9503041,
);

/// XYZ -> linear sRGB, the inverse of [`RGB_TO_XYZ`].
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_RGB: Transform = transform_3x3(
     3.2404542, -0.9692660,  0.0556434,
    -1.5371385,  1.8760108, -0.2040259,
    -0.4985314,  0.0415560,  1.0572252,
);

impl Xyz {
    /// Convert this color to the pivot: the inverse sRGB matrix followed by
    /// gamma re-encoding. A non-finite result of the gamma power step
    /// resolves to channel 0.
    pub fn to_pivot(&self) -> Rgb {
        let [r, g, b] = transform(&XYZ_TO_RGB, self.x / 100.0, self.y / 100.0, self.z / 100.0);

        let encode = |v: Component| {
            let encoded = gamma_encode(v);
            if encoded.is_finite() {
                encoded.clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        Rgb::from_unit(encode(r), encode(g), encode(b), self.alpha)
    }

    /// Build this color from the pivot: gamma linearization followed by the
    /// sRGB matrix.
    pub fn from_pivot(pivot: Rgb) -> Self {
        let (r, g, b) = pivot.unit_channels();
        let [x, y, z] = transform(&RGB_TO_XYZ, linearize(r), linearize(g), linearize(b));
        Xyz::new(x * 100.0, y * 100.0, z * 100.0, pivot.alpha)
    }
}

/// The reference white LAB conversions scale by.
const LAB_WHITE: (Component, Component, Component) = (95.0489, 100.0, 108.8840);

/// Breakpoint of the piecewise cube-root correction, (6/29)^3.
const LAB_EPSILON: Component = 0.008856;
const LAB_SLOPE: Component = 7.787;
const LAB_OFFSET: Component = 16.0 / 116.0;

impl Lab {
    /// Convert this color to the pivot, through XYZ.
    pub fn to_pivot(&self) -> Rgb {
        self.to_xyz().to_pivot()
    }

    /// Build this color from the pivot, through XYZ.
    pub fn from_pivot(pivot: Rgb) -> Self {
        Lab::from_xyz(Xyz::from_pivot(pivot))
    }

    /// Convert to CIE-XYZ by inverting the piecewise cube-root correction
    /// and re-scaling by the reference white.
    pub fn to_xyz(&self) -> Xyz {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let invert = |f: Component| {
            let cubed = f * f * f;
            if cubed > LAB_EPSILON {
                cubed
            } else {
                (f - LAB_OFFSET) / LAB_SLOPE
            }
        };

        Xyz::new(
            invert(fx) * LAB_WHITE.0,
            invert(fy) * LAB_WHITE.1,
            invert(fz) * LAB_WHITE.2,
            self.alpha,
        )
    }

    /// Build from CIE-XYZ with the piecewise cube-root correction. Each
    /// resulting component is rounded to 4 decimal places.
    pub fn from_xyz(xyz: Xyz) -> Self {
        let correct = |v: Component| {
            if v > LAB_EPSILON {
                math::cbrt(v)
            } else {
                LAB_SLOPE * v + LAB_OFFSET
            }
        };

        let fx = correct(xyz.x / LAB_WHITE.0);
        let fy = correct(xyz.y / LAB_WHITE.1);
        let fz = correct(xyz.z / LAB_WHITE.2);

        Lab::new(
            math::round_4(116.0 * fy - 16.0),
            math::round_4(500.0 * (fx - fy)),
            math::round_4(200.0 * (fy - fz)),
            xyz.alpha,
        )
    }
}

/// sRGB gamma linearization: linear below the 0.04045 threshold, power
/// curve above it.
pub(crate) fn linearize(value: Component) -> Component {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// The inverse of [`linearize`]. May return a non-finite value for inputs
/// outside the linear-light domain; callers decide the fallback.
pub(crate) fn gamma_encode(value: Component) -> Component {
    if value <= 0.0031308 {
        12.92 * value
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

mod util {
    use crate::color::Component;
    use crate::math;

    /// Convert unit RGB channels to the HSL notation. An achromatic color
    /// has hue and saturation 0.
    pub fn rgb_to_hsl(r: Component, g: Component, b: Component) -> (Component, Component, Component) {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let lightness = (max + min) / 2.0;

        if delta == 0.0 {
            return (0.0, 0.0, lightness);
        }

        let saturation = if lightness == 0.0 || lightness == 1.0 {
            0.0
        } else {
            (max - lightness) / lightness.min(1.0 - lightness)
        };

        let hue = 60.0
            * if max == r {
                (g - b) / delta + if g < b { 6.0 } else { 0.0 }
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };

        (math::wrap_hue(hue), saturation, lightness)
    }

    /// Convert the HSL notation to unit RGB channels.
    pub fn hsl_to_rgb(
        hue: Component,
        saturation: Component,
        lightness: Component,
    ) -> (Component, Component, Component) {
        if saturation <= 0.0 {
            return (lightness, lightness, lightness);
        }

        let q = if lightness < 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        let h = math::wrap_hue(hue) / 360.0;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// One channel of the HSL to RGB conversion: the normalized hue is
    /// partitioned into six sextants with breakpoints at 1/6, 1/2 and 2/3.
    fn hue_to_channel(p: Component, q: Component, t: Component) -> Component {
        let t = if t < 0.0 {
            t + 1.0
        } else if t > 1.0 {
            t - 1.0
        } else {
            t
        };

        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }
}
