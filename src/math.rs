//! Math utility functions.

use euclid::default::{Transform3D, Vector3D};

use crate::color::Component;

/// A 3x3 matrix over [`Component`], stored in a 3D transform.
pub type Transform = Transform3D<Component>;

type Vector = Vector3D<Component>;

/// Build a [`Transform`] from the 9 coefficients of a 3x3 matrix. Arguments
/// are given row by row, where row `n` holds the contributions of input
/// component `n` to each output component.
#[allow(clippy::too_many_arguments)]
pub const fn transform_3x3(
    m11: Component,
    m12: Component,
    m13: Component,
    m21: Component,
    m22: Component,
    m23: Component,
    m31: Component,
    m32: Component,
    m33: Component,
) -> Transform {
    Transform3D::new(
        m11, m12, m13, 0.0, //
        m21, m22, m23, 0.0, //
        m31, m32, m33, 0.0, //
        0.0, 0.0, 0.0, 1.0, //
    )
}

/// Multiply the given matrix in `transform` with the 3 components.
pub fn transform(
    transform: &Transform,
    x: Component,
    y: Component,
    z: Component,
) -> [Component; 3] {
    let Vector { x, y, z, .. } = transform.transform_vector3d(Vector::new(x, y, z));
    [x, y, z]
}

/// Wrap a hue angle into `0.0..360.0` degrees.
pub fn wrap_hue(hue: Component) -> Component {
    hue.rem_euclid(360.0)
}

/// Round to 4 decimal places, the grid LAB components are stored on.
pub fn round_4(value: Component) -> Component {
    (value * 10_000.0).round() / 10_000.0
}

const CBRT_TOLERANCE: Component = 1.0e-12;
const CBRT_MAX_ITERATIONS: usize = 64;

/// Cube root of a non-negative value by Newton's method. The iteration is
/// bounded by both a tolerance and a fixed iteration cap, so it always
/// terminates.
pub fn cbrt(value: Component) -> Component {
    if value == 0.0 {
        return 0.0;
    }

    let mut x = value;
    for _ in 0..CBRT_MAX_ITERATIONS {
        let next = x - (x * x * x - value) / (3.0 * x * x);
        if (next - x).abs() < CBRT_TOLERANCE {
            return next;
        }
        x = next;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_component_eq;

    #[test]
    fn transform_uses_rows_for_input_components() {
        let t = transform_3x3(
            1.0, 0.0, 0.0, //
            0.0, 2.0, 0.0, //
            0.0, 0.0, 3.0, //
        );
        assert_eq!(transform(&t, 1.0, 1.0, 1.0), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn hue_wraps_in_both_directions() {
        assert_eq!(wrap_hue(500.0), 140.0);
        assert_eq!(wrap_hue(-10.0), 350.0);
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(140.0), 140.0);
    }

    #[test]
    fn cbrt_converges() {
        assert_component_eq!(cbrt(27.0), 3.0);
        assert_component_eq!(cbrt(1.0), 1.0);
        assert_component_eq!(cbrt(0.008856), 0.20689613612297443);
        assert_eq!(cbrt(0.0), 0.0);
    }

    #[test]
    fn round_4_snaps_to_grid() {
        assert_eq!(round_4(56.62935001), 56.6294);
        assert_eq!(round_4(100.0), 100.0);
        assert_eq!(round_4(0.00004), 0.0);
    }
}
