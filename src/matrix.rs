//! 2D affine matrices in SVG `matrix(a b c d e f)` order.
//!
//! ```text
//! [a c e]
//! [b d f]
//! [0 0 1]
//! ```
//!
//! All operations return a new matrix. Composition and inversion go through
//! `glam::DAffine2`, whose column layout is exactly `[a, b, c, d, e, f]`.

use std::fmt;
use std::ops::Mul;

use glam::{DAffine2, DVec2, dvec2};

use crate::defaults;
use crate::log::{trace, warn};

/// A 2D affine transform `(x, y) -> (a*x + c*y + e, b*x + d*y + f)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineMatrix {
    pub const IDENTITY: AffineMatrix = AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Pure translation by `(tx, ty)`
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Axis-aligned scale about the origin
    pub const fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation about the origin, angle in degrees (clockwise in SVG's y-down space)
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    pub fn skewing_x(degrees: f64) -> Self {
        Self::new(1.0, 0.0, degrees.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    pub fn skewing_y(degrees: f64) -> Self {
        Self::new(1.0, degrees.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    pub fn to_array(self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn from_array([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }

    /// Compose `self ∘ other`: the result applies `other` first, then `self`.
    pub fn multiply(self, other: AffineMatrix) -> AffineMatrix {
        (DAffine2::from(self) * DAffine2::from(other)).into()
    }

    /// `a*d - b*c`
    pub fn determinant(self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse transform, or the identity when the matrix is (nearly) singular.
    pub fn inverse(self) -> AffineMatrix {
        let det = self.determinant();
        if det.abs() < defaults::SINGULAR_EPSILON {
            warn!(matrix = ?self, det, "inverting near-singular matrix; substituting identity");
            return Self::IDENTITY;
        }
        DAffine2::from(self).inverse().into()
    }

    pub fn translate(self, tx: f64, ty: f64) -> AffineMatrix {
        self.multiply(Self::translation(tx, ty))
    }

    /// Uniform scale
    pub fn scale(self, s: f64) -> AffineMatrix {
        self.multiply(Self::scaling(s, s))
    }

    pub fn scale_non_uniform(self, sx: f64, sy: f64) -> AffineMatrix {
        self.multiply(Self::scaling(sx, sy))
    }

    pub fn rotate(self, degrees: f64) -> AffineMatrix {
        self.multiply(Self::rotation(degrees))
    }

    pub fn skew_x(self, degrees: f64) -> AffineMatrix {
        self.multiply(Self::skewing_x(degrees))
    }

    pub fn skew_y(self, degrees: f64) -> AffineMatrix {
        self.multiply(Self::skewing_y(degrees))
    }

    pub fn flip_x(self) -> AffineMatrix {
        self.multiply(Self::scaling(-1.0, 1.0))
    }

    pub fn flip_y(self) -> AffineMatrix {
        self.multiply(Self::scaling(1.0, -1.0))
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// True when the linear part is the identity (`a=1, b=0, c=0, d=1`)
    pub fn is_translation(self) -> bool {
        self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0
    }

    /// Map a point through the transform
    pub fn transform_point(self, x: f64, y: f64) -> (f64, f64) {
        let p = DAffine2::from(self).transform_point2(dvec2(x, y));
        trace!(x, y, px = p.x, py = p.y, "transform_point");
        (p.x, p.y)
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(self, other: AffineMatrix, eps: f64) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(l, r)| (l - r).abs() <= eps)
    }
}

impl From<AffineMatrix> for DAffine2 {
    fn from(m: AffineMatrix) -> Self {
        DAffine2::from_cols_array(&m.to_array())
    }
}

impl From<DAffine2> for AffineMatrix {
    fn from(m: DAffine2) -> Self {
        AffineMatrix::from_array(m.to_cols_array())
    }
}

impl Mul for AffineMatrix {
    type Output = AffineMatrix;

    fn mul(self, rhs: AffineMatrix) -> AffineMatrix {
        self.multiply(rhs)
    }
}

impl Mul<DVec2> for AffineMatrix {
    type Output = DVec2;

    fn mul(self, p: DVec2) -> DVec2 {
        DAffine2::from(self).transform_point2(p)
    }
}

/// Format a coefficient for attribute output. Trig residue below
/// `1e-12` and `-0` both print as `0`.
pub(crate) fn fmt_num(v: f64) -> f64 {
    if v.abs() < defaults::DISPLAY_EPSILON { 0.0 } else { v }
}

/// Renders the transform-function form written to `transform` attributes
impl fmt::Display for AffineMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_translation() {
            write!(f, "translate({}, {})", fmt_num(self.e), fmt_num(self.f))
        } else {
            write!(
                f,
                "matrix({}, {}, {}, {}, {}, {})",
                fmt_num(self.a),
                fmt_num(self.b),
                fmt_num(self.c),
                fmt_num(self.d),
                fmt_num(self.e),
                fmt_num(self.f)
            )
        }
    }
}

/// Fresh identity matrix, as `SVGSVGElement.createSVGMatrix()` returns
pub fn create_svg_matrix() -> AffineMatrix {
    AffineMatrix::IDENTITY
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn multiply_follows_component_formula() {
        let m1 = AffineMatrix::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m2 = AffineMatrix::new(7.0, 8.0, 9.0, 10.0, 11.0, 12.0);
        let r = m1.multiply(m2);
        assert_eq!(r.a, 1.0 * 7.0 + 3.0 * 8.0);
        assert_eq!(r.b, 2.0 * 7.0 + 4.0 * 8.0);
        assert_eq!(r.c, 1.0 * 9.0 + 3.0 * 10.0);
        assert_eq!(r.d, 2.0 * 9.0 + 4.0 * 10.0);
        assert_eq!(r.e, 1.0 * 11.0 + 3.0 * 12.0 + 5.0);
        assert_eq!(r.f, 2.0 * 11.0 + 4.0 * 12.0 + 6.0);
    }

    #[test]
    fn multiply_applies_right_operand_first() {
        let scale = AffineMatrix::scaling(2.0, 2.0);
        let shift = AffineMatrix::translation(10.0, 0.0);
        // scale ∘ shift: shift then scale
        assert_eq!((scale * shift).transform_point(0.0, 0.0), (20.0, 0.0));
        // shift ∘ scale: scale then shift
        assert_eq!((shift * scale).transform_point(0.0, 0.0), (10.0, 0.0));
    }

    #[test]
    fn inverse_of_uniform_scale() {
        let inv = AffineMatrix::scaling(2.0, 2.0).inverse();
        assert!(inv.approx_eq(AffineMatrix::new(0.5, 0.0, 0.0, 0.5, 0.0, 0.0), EPS));
    }

    #[test]
    fn inverse_undoes_translation_and_rotation() {
        let m = AffineMatrix::translation(3.0, -4.0).rotate(30.0).scale(1.5);
        assert!(m.multiply(m.inverse()).approx_eq(AffineMatrix::IDENTITY, EPS));
    }

    #[test]
    fn singular_inverse_is_identity() {
        let flat = AffineMatrix::new(1.0, 2.0, 2.0, 4.0, 7.0, 8.0);
        assert_eq!(flat.inverse(), AffineMatrix::IDENTITY);
        assert_eq!(AffineMatrix::scaling(0.0, 0.0).inverse(), AffineMatrix::IDENTITY);
    }

    #[test]
    fn near_singular_threshold() {
        // det = 5e-11
        let tiny = AffineMatrix::new(1e-6, 0.0, 0.0, 5e-5, 0.0, 0.0);
        assert_eq!(tiny.inverse(), AffineMatrix::IDENTITY);

        // det = 1e-9, still invertible
        let small = AffineMatrix::new(1e-5, 0.0, 0.0, 1e-4, 3.0, 0.0);
        let inv = small.inverse();
        assert!((inv.a - 1e5).abs() < 1e-6);
        assert!((inv.d - 1e4).abs() < 1e-7);
        assert!((inv.e + 3e5).abs() < 1e-4);
        assert!(small.multiply(inv).approx_eq(AffineMatrix::IDENTITY, EPS));
    }

    #[test]
    fn translate_and_scale_post_multiply() {
        let m = AffineMatrix::IDENTITY.scale(2.0).translate(5.0, 1.0);
        assert_eq!(m, AffineMatrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 2.0));
    }

    #[test]
    fn rotate_quarter_turn_maps_x_axis_to_y_axis() {
        let (x, y) = AffineMatrix::rotation(90.0).transform_point(1.0, 0.0);
        assert!(x.abs() < EPS);
        assert!((y - 1.0).abs() < EPS);
    }

    #[test]
    fn flips_negate_one_axis() {
        assert_eq!(AffineMatrix::IDENTITY.flip_x(), AffineMatrix::scaling(-1.0, 1.0));
        assert_eq!(AffineMatrix::IDENTITY.flip_y(), AffineMatrix::scaling(1.0, -1.0));
    }

    #[test]
    fn skew_x_shears_along_x() {
        let (x, y) = AffineMatrix::skewing_x(45.0).transform_point(0.0, 2.0);
        assert!((x - 2.0).abs() < EPS);
        assert_eq!(y, 2.0);
    }

    #[test]
    fn display_uses_translate_shorthand() {
        assert_eq!(AffineMatrix::translation(5.0, -2.5).to_string(), "translate(5, -2.5)");
        assert_eq!(
            AffineMatrix::new(2.0, 0.0, 0.0, 2.0, 1.0, 0.0).to_string(),
            "matrix(2, 0, 0, 2, 1, 0)"
        );
        assert_eq!(AffineMatrix::translation(-0.0, 0.0).to_string(), "translate(0, 0)");
    }

    #[test]
    fn display_snaps_trig_residue() {
        assert_eq!(AffineMatrix::rotation(90.0).to_string(), "matrix(0, 1, -1, 0, 0, 0)");
        assert_eq!(
            AffineMatrix::new(1.0, 0.0, 0.0, 1.0, 3e-13, 2.5e-12).to_string(),
            "translate(0, 0.0000000000025)"
        );
    }

    #[test]
    fn create_svg_matrix_is_identity() {
        assert!(create_svg_matrix().is_identity());
        assert_eq!(AffineMatrix::default(), AffineMatrix::IDENTITY);
    }
}
