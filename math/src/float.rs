use std::ops::Mul;

/// An angle, stored in radians. Use `new_deg` / `new_rad` so that call sites
/// never leave the unit ambiguous.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub fn new_rad(radians: f64) -> Self {
        Angle { radians }
    }
    pub fn new_deg(degrees: f64) -> Self {
        Angle {
            radians: degrees.to_radians(),
        }
    }
    pub fn to_rad(self) -> f64 {
        self.radians
    }
    pub fn sin_cos(self) -> (f64, f64) {
        self.radians.sin_cos()
    }
    pub fn tan(self) -> f64 {
        self.radians.tan()
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, s: f64) -> Angle {
        Angle::new_rad(self.radians * s)
    }
}

/// Computes the linear interpolation between `a` and `b`: (0, 1) -> (a, b).
///
/// This function also works if `a` and `b` are not "Scalable" by themselves - as long as `a-b` can
/// be scaled by a `f64`, and the difference can be added to either `a` or `b` to get back `T` then
/// `lerp` can be used. Although `Point3` can't be scaled, the difference type `Vec3` can, and
/// point + vector is a point, so `lerp` works on 2 points.
pub fn lerp<T, U>(a: T, b: T, t: f64) -> T
where
    T: Copy + std::ops::Sub<T, Output = U>,
    U: Copy + std::ops::Mul<f64, Output = U> + std::ops::Add<T, Output = T>,
{
    (b - a) * t + a
}

/// Divides the given `interval` evenly into `count` pieces and returns the midpoint of each piece
/// together with the spacing between adjacent midpoints.
pub fn linspace(interval: (f64, f64), count: u32) -> (Vec<f64>, f64) {
    let (a, b) = interval;
    (
        (0..count)
            .map(|i| (i as f64 + 0.5) / count as f64 * (b - a) + a)
            .collect::<Vec<_>>(),
        (b - a) / count as f64,
    )
}

/// Computes `x / y` if y is nonzero; returns `None` if y is zero.
pub trait Float: Sized {
    fn try_divide(self, divisor: Self) -> Option<Self>;
}

impl Float for f64 {
    /// ```
    /// use math::float::Float;
    /// assert_eq!(1.0f64.try_divide(0.0), None);
    /// assert_eq!(1.0f64.try_divide(2.5), Some(0.4));
    /// assert_eq!(0.0f64.try_divide(2.5), Some(0.0));
    /// ```
    fn try_divide(self, divisor: Self) -> Option<Self> {
        if divisor == 0.0 {
            None
        } else {
            Some(self / divisor)
        }
    }
}

#[macro_export]
macro_rules! assert_le {
    ($left:expr, $right:expr) => {
        if $left > $right {
            panic!(
                "Assertion failed: {} <= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}

#[macro_export]
macro_rules! assert_ge {
    ($left:expr, $right:expr) => {
        if $left < $right {
            panic!(
                "Assertion failed: {} >= {} (values: {} vs. {})",
                stringify!($left),
                stringify!($right),
                $left,
                $right
            )
        }
    };
}
