//! Pigment-style mixing over a fixed reflectance spectral basis.
//!
//! Instead of averaging channel ratios, each RGB color is projected onto a
//! 38-sample reflectance spectrum spanning 380-750nm, built from seven
//! spectral primaries (white, cyan, magenta, yellow, red, green, blue). The
//! two spectra are combined per wavelength in Kubelka-Munk K/S space with
//! concentrations derived from the luminances, and the mixed spectrum is
//! integrated back to XYZ through the color matching functions. This is
//! what makes blue and yellow mix to green rather than gray.
//!
//! The basis is a compiled-in constant; nothing here reads external data or
//! mutates process state.

use crate::color::{Color, ColorValue, Component};
use crate::convert::{gamma_encode, linearize};
use crate::math::{transform, transform_3x3, Transform};
use crate::rgb::Rgb;

/// Number of 10nm bands between 380nm and 750nm.
const BANDS: usize = 38;

/// Floor applied to reflectance values so the K/S term never divides by
/// zero.
const MIN_REFLECTANCE: Component = 1.0e-8;

/// The white primary reflects everything; the other primaries are defined
/// relative to it, each complementary pair summing to white per band.
const SPD_WHITE: [Component; BANDS] = [1.0; BANDS];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_CYAN: [Component; BANDS] = [
    0.96853629, 0.96855103, 0.96859338, 0.96877345, 0.96942204, 0.97143709,
    0.97541862, 0.98074186, 0.98580992, 0.98971194, 0.99238027, 0.99409844,
    0.99517200, 0.99576545, 0.99593552, 0.99564041, 0.99464769, 0.99229579,
    0.98638762, 0.96829712, 0.89228016, 0.53740239, 0.15360445, 0.05705719,
    0.03126539, 0.02205445, 0.01802271, 0.01613460, 0.01520947, 0.01475977,
    0.01454263, 0.01444459, 0.01439897, 0.01437620, 0.01436343, 0.01435687,
    0.01435370, 0.01435408,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_MAGENTA: [Component; BANDS] = [
    0.51567122, 0.54015520, 0.62645502, 0.75595012, 0.92826996, 0.97223624,
    0.98616174, 0.98955255, 0.98676237, 0.97312575, 0.91944277, 0.32564851,
    0.13820628, 0.05015143, 0.02912336, 0.02421691, 0.02660696, 0.03407586,
    0.04835936, 0.00011720, 0.00008554, 0.85267882, 0.93188793, 0.94810268,
    0.94200977, 0.91478045, 0.87065445, 0.78827548, 0.65738359, 0.59909403,
    0.56817268, 0.54031997, 0.52110241, 0.51041094, 0.50526577, 0.50255080,
    0.50126452, 0.50083021,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_YELLOW: [Component; BANDS] = [
    0.02055257, 0.02059936, 0.02062723, 0.02073387, 0.02114202, 0.02233154,
    0.02556857, 0.03330189, 0.05185294, 0.10087639, 0.24000413, 0.53589066,
    0.79874659, 0.91186529, 0.95399623, 0.97137099, 0.97939505, 0.98345207,
    0.98553736, 0.98648905, 0.98674535, 0.98657555, 0.98611877, 0.98559942,
    0.98507063, 0.98460039, 0.98425301, 0.98403909, 0.98388535, 0.98376116,
    0.98368246, 0.98365023, 0.98361309, 0.98357259, 0.98353856, 0.98351247,
    0.98350101, 0.98350852,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_RED: [Component; BANDS] = [
    0.03147571, 0.03146636, 0.03140624, 0.03119611, 0.03053888, 0.02856855,
    0.02459485, 0.01929520, 0.01423112, 0.01033111, 0.00765876, 0.00593693,
    0.00485616, 0.00426186, 0.00409039, 0.00438375, 0.00537525, 0.00772962,
    0.01366120, 0.03181352, 0.10791525, 0.46249516, 0.84604333, 0.94275572,
    0.96860996, 0.97783966, 0.98187757, 0.98377315, 0.98470202, 0.98515481,
    0.98537114, 0.98546685, 0.98550011, 0.98551031, 0.98550741, 0.98551323,
    0.98551563, 0.98551547,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_GREEN: [Component; BANDS] = [
    0.49108579, 0.46944057, 0.40165780, 0.24490420, 0.06826880, 0.02732883,
    0.01360600, 0.01000187, 0.01284127, 0.02636635, 0.07058713, 0.70421692,
    0.85473994, 0.95081565, 0.97170370, 0.97651888, 0.97429245, 0.97012917,
    0.94258630, 0.99989207, 0.99989891, 0.13823139, 0.06968113, 0.05628787,
    0.05033528, 0.04839226, 0.04646084, 0.04040205, 0.03167538, 0.02649421,
    0.02362560, 0.02181543, 0.02070986, 0.02005248, 0.01972009, 0.01955364,
    0.01947462, 0.01944906,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const SPD_BLUE: [Component; BANDS] = [
    0.97901834, 0.97901649, 0.97901118, 0.97892146, 0.97858555, 0.97743705,
    0.97428075, 0.96663223, 0.94822893, 0.89937713, 0.76070164, 0.46420440,
    0.20123039, 0.08808402, 0.04592894, 0.02860373, 0.02060067, 0.01656701,
    0.01451549, 0.01357964, 0.01331243, 0.01347661, 0.01387181, 0.01435472,
    0.01479836, 0.01515250, 0.01540513, 0.01557233, 0.01565710, 0.01571025,
    0.01571916, 0.01572133, 0.01572502, 0.01571717, 0.01571905, 0.01571059,
    0.01569728, 0.01570020,
];

// D65-weighted CIE 1931 color matching functions, normalized so that a
// perfect reflector integrates to the white point.
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const CMF_X: [Component; BANDS] = [
    0.00006469, 0.00021941, 0.00112057, 0.00376661, 0.01188055, 0.02328644,
    0.03455942, 0.03722379, 0.03241838, 0.02123321, 0.01049099, 0.00329584,
    0.00050704, 0.00094867, 0.00627372, 0.01686462, 0.02868965, 0.04267481,
    0.05625475, 0.06947040, 0.08305315, 0.08612610, 0.09046614, 0.08500387,
    0.07090667, 0.05062889, 0.03547396, 0.02146821, 0.01251646, 0.00680458,
    0.00346457, 0.00149761, 0.00076970, 0.00040737, 0.00016901, 0.00009522,
    0.00004903, 0.00002000,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const CMF_Y: [Component; BANDS] = [
    0.00000184, 0.00000621, 0.00003101, 0.00010475, 0.00035364, 0.00095147,
    0.00228226, 0.00420733, 0.00668880, 0.00988840, 0.01524945, 0.02141831,
    0.03342293, 0.05131001, 0.07040208, 0.08783871, 0.09424905, 0.09795667,
    0.09415219, 0.08678102, 0.07885653, 0.06352670, 0.05374142, 0.04264606,
    0.03161735, 0.02088521, 0.01386011, 0.00810264, 0.00463010, 0.00249138,
    0.00125930, 0.00054165, 0.00027795, 0.00014711, 0.00006103, 0.00003439,
    0.00001771, 0.00000722,
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const CMF_Z: [Component; BANDS] = [
    0.00030502, 0.00103681, 0.00531314, 0.01795439, 0.05707758, 0.11365162,
    0.17335873, 0.19620658, 0.18608237, 0.13752397, 0.08283548, 0.04650635,
    0.02271918, 0.00957688, 0.00365538, 0.00137261, 0.00055074, 0.00021785,
    0.00008405, 0.00002556, 0.00000634, 0.00000077, 0.00000000, 0.00000000,
    0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000,
    0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000, 0.00000000,
    0.00000000, 0.00000000,
];

/// XYZ -> linear sRGB for the unit-scaled XYZ the basis integrates to.
#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_RGB: Transform = transform_3x3(
     3.2409699419045226, -0.9692436362808796,  0.05563007969699366,
    -1.5373831775700940,  1.8759675015077202, -0.20397695888897652,
    -0.4986107602930034,  0.04155505740717559,  1.0569715142428786,
);

/// Project a color onto the reflectance basis: decompose the linear-light
/// channels into white/cyan/magenta/yellow/red/green/blue contributions and
/// sum their spectra.
fn reflectance(rgb: Rgb) -> [Component; BANDS] {
    let (r, g, b) = rgb.unit_channels();
    let (r, g, b) = (linearize(r), linearize(g), linearize(b));

    let w = r.min(g).min(b);
    let (r, g, b) = (r - w, g - w, b - w);

    let c = g.min(b);
    let m = r.min(b);
    let y = r.min(g);
    let red = (r - b).max(0.0).min((r - g).max(0.0));
    let green = (g - b).max(0.0).min((g - r).max(0.0));
    let blue = (b - g).max(0.0).min((b - r).max(0.0));

    let mut spectrum = [0.0; BANDS];
    for (i, band) in spectrum.iter_mut().enumerate() {
        *band = (w * SPD_WHITE[i]
            + c * SPD_CYAN[i]
            + m * SPD_MAGENTA[i]
            + y * SPD_YELLOW[i]
            + red * SPD_RED[i]
            + green * SPD_GREEN[i]
            + blue * SPD_BLUE[i])
            .max(MIN_REFLECTANCE);
    }
    spectrum
}

/// Integrate a reflectance spectrum to unit-scaled XYZ.
fn reflectance_to_xyz(spectrum: &[Component; BANDS]) -> (Component, Component, Component) {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut z = 0.0;
    for i in 0..BANDS {
        x += spectrum[i] * CMF_X[i];
        y += spectrum[i] * CMF_Y[i];
        z += spectrum[i] * CMF_Z[i];
    }
    (x, y, z)
}

/// Turn the mixing weight into a Kubelka-Munk concentration of the second
/// color, weighting by the luminances so that a bright pigment does not
/// drown a dark one.
fn concentration(l1: Component, l2: Component, weight: Component) -> Component {
    let t1 = l1 * weight * weight;
    let t2 = l2 * (1.0 - weight) * (1.0 - weight);
    t2 / (t1 + t2)
}

/// K/S absorption-to-scattering ratio of a reflectance value.
fn ks(reflectance: Component) -> Component {
    (1.0 - reflectance) * (1.0 - reflectance) / (2.0 * reflectance)
}

/// Kubelka-Munk reflectance of a K/S ratio, the inverse of [`ks`].
fn km(ks: Component) -> Component {
    1.0 + ks - (ks * ks + 2.0 * ks).sqrt()
}

impl ColorValue {
    /// Spectrally mix this color with `other` in equal parts.
    pub fn mix_spectral(&self, other: &Self) -> Self {
        self.mix_spectral_weighted(other, 0.5)
    }

    /// Spectrally mix this color with `other`, `weight` being the share of
    /// this color (clamped to `0.0..=1.0`). The result is expressed in this
    /// value's colorspace.
    pub fn mix_spectral_weighted(&self, other: &Self, weight: Component) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let (a, b) = (self.to_rgb(), other.to_rgb());

        let r1 = reflectance(a);
        let r2 = reflectance(b);
        let l1 = reflectance_to_xyz(&r1).1;
        let l2 = reflectance_to_xyz(&r2).1;
        let c = concentration(l1, l2, weight);

        let mut mixed = [0.0; BANDS];
        for (i, band) in mixed.iter_mut().enumerate() {
            *band = km((1.0 - c) * ks(r1[i]) + c * ks(r2[i]));
        }

        let (x, y, z) = reflectance_to_xyz(&mixed);
        let [lr, lg, lb] = transform(&XYZ_TO_LINEAR_RGB, x, y, z);

        let encode = |v: Component| {
            let encoded = gamma_encode(v);
            if encoded.is_finite() {
                encoded.clamp(0.0, 1.0)
            } else {
                0.0
            }
        };

        let alpha = a.alpha * weight + b.alpha * (1.0 - weight);
        let mixed = Rgb::from_unit(encode(lr), encode(lg), encode(lb), alpha);
        ColorValue::Rgb(mixed).to_space(self.space())
    }
}

impl Color {
    /// Spectrally mix this color with `other` in equal parts; the result
    /// keeps this color's wrapper.
    pub fn mix_spectral(&self, other: &Self) -> Self {
        self.rewrap(self.value().mix_spectral(other.value()))
    }

    /// Spectrally mix this color with `other`, `weight` being the share of
    /// this color.
    pub fn mix_spectral_weighted(&self, other: &Self, weight: Component) -> Self {
        self.rewrap(self.value().mix_spectral_weighted(other.value(), weight))
    }
}
