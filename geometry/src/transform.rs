use math::hcm::{Mat4, Point3, Vec3};
use math::Angle;
use std::ops::Mul;

use crate::ray::Ray;

/// An invertible affine transform storing the forward matrix together with its
/// inverse. Inverses are composed constructor-by-constructor, so no general
/// matrix inversion ever runs; feeding in a non-invertible scale is a caller
/// error (the inverse scale divides by zero).
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform {
    forward: Mat4,
    inverse: Mat4,
}

pub trait Transform<T> {
    fn apply(&self, x: T) -> T;
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            forward: Mat4::IDENTITY,
            inverse: Mat4::IDENTITY,
        }
    }
    pub fn translater(t: Vec3) -> Self {
        Self {
            forward: Mat4::translater(t),
            inverse: Mat4::translater(-t),
        }
    }
    pub fn rotater(axis: Vec3, angle: Angle) -> Self {
        let forward = Mat4::rotater(axis, angle);
        Self {
            forward,
            inverse: forward.transpose(),
        }
    }
    pub fn scaler(scale: Vec3) -> Self {
        let Vec3 { x, y, z } = scale;
        let scale_inv = Vec3::new(1.0 / x, 1.0 / y, 1.0 / z);
        Self {
            forward: Mat4::nonuniform_scale(scale),
            inverse: Mat4::nonuniform_scale(scale_inv),
        }
    }
    pub fn inverse(&self) -> Self {
        Self {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    /// Applies Translate(t) onto the transform, and returns Translate(t) * self.
    pub fn translate(self, t: Vec3) -> Self {
        Self::translater(t) * self
    }

    /// Applies rotation onto the transform, and returns Rotate(angle) * self.
    pub fn rotate_x(self, angle: Angle) -> Self {
        Self::rotater(Vec3::X, angle) * self
    }
    pub fn rotate_y(self, angle: Angle) -> Self {
        Self::rotater(Vec3::Y, angle) * self
    }
    pub fn rotate_z(self, angle: Angle) -> Self {
        Self::rotater(Vec3::Z, angle) * self
    }

    /// Applies Scale(s) onto the transform, and returns Scale(s) * self.
    pub fn scale(self, s: Vec3) -> Self {
        Self::scaler(s) * self
    }

    /// Transforms a surface normal out of this transform's local space.
    /// Normals transform by the inverse-transpose rather than the forward
    /// matrix, which matters whenever the transform scales non-uniformly.
    pub fn apply_normal(&self, n: Vec3) -> Vec3 {
        self.inverse.transpose() * n
    }
}

impl Mul for AffineTransform {
    type Output = AffineTransform;
    fn mul(self, rhs: Self) -> Self::Output {
        // self * rhs -> self.forward * rhs.forward, rhs.inverse * self.inverse.
        Self {
            forward: self.forward * rhs.forward,
            inverse: rhs.inverse * self.inverse,
        }
    }
}

impl std::fmt::Display for AffineTransform {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = &self.forward;
        write!(
            f,
            "\n|{:5.2} {:5.2} {:5.2} {:5.2}|\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}|\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}|\
             \n|{:5.2} {:5.2} {:5.2} {:5.2}|\n",
            m.cols[0].x, m.cols[1].x, m.cols[2].x, m.cols[3].x,
            m.cols[0].y, m.cols[1].y, m.cols[2].y, m.cols[3].y,
            m.cols[0].z, m.cols[1].z, m.cols[2].z, m.cols[3].z,
            m.cols[0].w, m.cols[1].w, m.cols[2].w, m.cols[3].w
        )
    }
}

// Transforms on:
// - Vec3 (directions, w = 0)
// - Point3 (positions, w = 1)
// - Ray (origin and direction together; extent and medium flags untouched)
// -------------------------------------------------------------------------------------------------

impl Transform<Vec3> for AffineTransform {
    fn apply(&self, x: Vec3) -> Vec3 {
        self.forward * x
    }
}
impl Transform<Point3> for AffineTransform {
    fn apply(&self, p: Point3) -> Point3 {
        self.forward * p
    }
}
impl Transform<Ray> for AffineTransform {
    fn apply(&self, r: Ray) -> Ray {
        Ray {
            origin: self.apply(r.origin),
            dir: self.apply(r.dir),
            ..r
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use math::hcm::point3;

    fn assert_near(p: Point3, q: Point3) {
        assert!(p.squared_distance_to(q) < 1e-12, "{} vs {}", p, q);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let trans = AffineTransform::rotater(Vec3::new(0.6, 0.8, 0.0), math::new_rad(0.3))
            .translate(Vec3::new(0.3, 0.4, 0.6))
            .scale(Vec3::new(2.0, 1.0, 0.5));

        let p = point3(1.0, -2.0, 3.0);
        assert_near(trans.inverse().apply(trans.apply(p)), p);
        assert_near(trans.apply(trans.inverse().apply(p)), p);
    }

    #[test]
    fn test_normal_rule_under_nonuniform_scale() {
        // Squashing a surface along y steepens its normals; the forward matrix
        // would flatten them instead.
        let squash = AffineTransform::scaler(Vec3::new(2.0, 0.5, 1.0));
        let n = Vec3::new(1.0, 1.0, 0.0).hat();
        let n_out = squash.apply_normal(n).hat();
        let expected = Vec3::new(0.5, 2.0, 0.0).hat();
        assert!((n_out - expected).norm_squared() < 1e-12, "{}", n_out);
    }

    #[test]
    fn test_ray_transform_preserves_extent() {
        let trans = AffineTransform::translater(Vec3::new(5.0, 0.0, 0.0));
        let mut r = Ray::new(point3(0.0, 0.0, 0.0), Vec3::X * 2.0);
        r.min_t = 7.5;
        r.transform(&trans);
        assert_eq!(r.min_t, 7.5);
        assert_near(r.origin, point3(5.0, 0.0, 0.0));
        // The point at t stays the "same" point through the transform.
        assert_near(r.position_at(7.5), point3(20.0, 0.0, 0.0));
    }
}
