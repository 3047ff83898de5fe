use std::fmt::{Display, Formatter, Result};

use math::hcm;

use crate::transform::{AffineTransform, Transform};

/// Represents a ray:
///
///   origin + t * direction
///
/// where t is positive. The direction is not required to be unit-length.
///
/// `min_t` is the smallest accepted hit distance found so far along the ray,
/// initially infinite. A successful `Primitive::intersect` may only lower it:
/// every accepted hit has its parametric distance in (0, `min_t`] at test time.
///
/// `refracted` and `eta` track the medium the ray currently travels in:
/// `refracted` is set while the ray is inside a denser-than-air medium and
/// `eta` holds that medium's refractive index (1 for ambient air).
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: hcm::Point3,
    pub dir: hcm::Vec3,
    pub min_t: f64,
    pub refracted: bool,
    pub eta: f64,
}

impl Ray {
    pub fn new(origin: hcm::Point3, dir: hcm::Vec3) -> Self {
        Ray {
            origin,
            dir,
            min_t: f64::INFINITY,
            refracted: false,
            eta: 1.0,
        }
    }

    /// Builds a ray whose direction length encodes the distance from `origin`
    /// to `target`: the target sits at t = 1, and `min_t` is preset to 1 so
    /// that any accepted hit (t <= 1) lies between the two points. Used for
    /// shadow tests against light samples at a known position.
    pub fn between(origin: hcm::Point3, target: hcm::Point3) -> Self {
        Ray {
            min_t: 1.0,
            ..Ray::new(origin, target - origin)
        }
    }

    /// Returns `None` if the given `t` is outside (0, `min_t`], `Some(t)` otherwise.
    pub fn truncated_t(&self, t: f64) -> Option<f64> {
        if t <= 0.0 || t > self.min_t {
            None
        } else {
            Some(t)
        }
    }

    pub fn position_at(&self, t: f64) -> hcm::Point3 {
        self.origin + self.dir * t
    }

    /// Rewrites the origin and direction in place by applying `m`. Parametric
    /// distances are preserved, so `min_t` and the medium flags carry over.
    pub fn transform(&mut self, m: &AffineTransform) {
        *self = m.apply(*self);
    }
}

impl Display for Ray {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "{:.precision$} + t{:.precision$}",
            self.origin,
            self.dir,
            precision = precision
        )
    }
}

#[cfg(test)]
mod test {
    use super::Ray;
    use math::hcm::{point3, vec3};

    #[test]
    fn between_encodes_distance() {
        let r = Ray::between(point3(0.0, 0.0, 0.0), point3(0.0, 0.0, 4.0));
        assert_eq!(r.min_t, 1.0);
        assert_eq!(r.dir, vec3(0.0, 0.0, 4.0));
        assert_eq!(r.position_at(1.0), point3(0.0, 0.0, 4.0));
    }

    #[test]
    fn truncation_bounds() {
        let mut r = Ray::new(point3(0.0, 0.0, 0.0), vec3(1.0, 0.0, 0.0));
        assert_eq!(r.truncated_t(5.0), Some(5.0));
        assert_eq!(r.truncated_t(0.0), None);
        assert_eq!(r.truncated_t(-1.0), None);
        r.min_t = 2.0;
        assert_eq!(r.truncated_t(5.0), None);
        assert_eq!(r.truncated_t(2.0), Some(2.0));
    }
}
