use std::{
    fmt,
    ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub},
};

pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

pub fn point3(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

pub use glam::DVec4 as Vec4;

/// Represents a 3D vector. Each component is a `f64` number.
/// Components can be accessed using `v.x` `v.y` `v.z`,
/// or indices `v[i]` where i is 0, 1, or 2.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "({:.p$}, {:.p$}, {:.p$})",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}
impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(2);
        write!(
            f,
            "[{:.p$}, {:.p$}, {:.p$}]",
            self.x,
            self.y,
            self.z,
            p = precision
        )
    }
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }
    pub fn as_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 0.0)
    }
    pub const X: Vec3 = Self::new(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Self::new(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Self::new(0.0, 0.0, 1.0);
    pub const ZERO: Vec3 = Self::new(0.0, 0.0, 0.0);

    pub fn dot(self, v: Vec3) -> f64 {
        self.x * v.x + self.y * v.y + self.z * v.z
    }
    pub fn cross(self, v: Vec3) -> Vec3 {
        // x1 y1 z1
        // x2 y2 z2
        // i  j  k
        Vec3::new(
            self.y * v.z - self.z * v.y,
            self.z * v.x - self.x * v.z,
            self.x * v.y - self.y * v.x,
        )
    }

    pub fn norm_squared(self) -> f64 {
        self.dot(self)
    }
    pub fn norm(self) -> f64 {
        f64::sqrt(self.norm_squared())
    }
    pub fn is_zero(self) -> bool {
        self.norm_squared() == 0.0
    }

    /// Returns a normalized (unit-length) `self` vector.
    /// Panics if the vector length is zero, NaN or infinite.
    pub fn hat(self) -> Vec3 {
        let norm2 = self.norm_squared();
        assert!(norm2 != 0.0 && norm2.is_finite());
        let inv_sqrt = 1.0 / self.norm();
        self * inv_sqrt
    }
    pub fn try_hat(self) -> Option<Self> {
        let inv_length = 1.0 / self.norm();
        if inv_length.is_finite() && inv_length != 0.0 {
            Some(inv_length * self)
        } else {
            None
        }
    }

    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}
impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}
impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}
impl Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("invalid index"),
        }
    }
}
impl IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("invalid index"),
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}
impl Mul<Vec3> for f64 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}
impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, s: f64) -> Vec3 {
        Vec3::new(self.x / s, self.y / s, self.z / s)
    }
}

// Implementation of Points
impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Point3 {
        Point3 { x, y, z }
    }
    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);

    pub fn distance_to(self, p: Self) -> f64 {
        (self - p).norm()
    }
    pub fn squared_distance_to(self, p: Self) -> f64 {
        (self - p).norm_squared()
    }
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
    pub fn as_vec4(self) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, 1.0)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;
    fn add(self, v: Vec3) -> Point3 {
        Point3::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}
impl Add<Point3> for Vec3 {
    type Output = Point3;
    fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, from: Point3) -> Vec3 {
        Vec3::new(self.x - from.x, self.y - from.y, self.z - from.z)
    }
}
impl Sub<Vec3> for Point3 {
    type Output = Point3;
    fn sub(self, t: Vec3) -> Point3 {
        Point3::new(self.x - t.x, self.y - t.y, self.z - t.z)
    }
}

// Explicit conversion between Vec3 and Point3.
// -------------------------------------------------------------------------------------------------
impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Point3::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

impl From<Vec4> for Vec3 {
    fn from(v4: Vec4) -> Self {
        Vec3::new(v4.x, v4.y, v4.z)
    }
}

/// Column-major 4x4 matrix over homogeneous coordinates.
/// Multiplies 4-vectors directly; `Vec3`s are treated as directions (w = 0)
/// and `Point3`s as positions (w = 1, divided through if a multiply leaves
/// the homogeneous coordinate off 1).
#[derive(Debug, Clone, Copy)]
pub struct Mat4 {
    pub cols: [Vec4; 4],
}

impl Mat4 {
    pub const ZERO: Mat4 = Mat4 {
        cols: [Vec4::ZERO; 4],
    };
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [Vec4::X, Vec4::Y, Vec4::Z, Vec4::W],
    };
    pub fn translater(t: Vec3) -> Mat4 {
        let mut mat = Self::IDENTITY;
        mat.cols[3] = Vec4::new(t.x, t.y, t.z, 1.0);
        mat
    }
    pub fn nonuniform_scale(s: Vec3) -> Mat4 {
        Mat4 {
            cols: [
                Vec4::new(s.x, 0.0, 0.0, 0.0),
                Vec4::new(0.0, s.y, 0.0, 0.0),
                Vec4::new(0.0, 0.0, s.z, 0.0),
                Vec4::W,
            ],
        }
    }
    pub fn scaler(s: f64) -> Mat4 {
        Self::nonuniform_scale(Vec3::new(s, s, s))
    }
    pub fn rotater(axis: Vec3, angle: crate::Angle) -> Mat4 {
        let mut mat = Self::IDENTITY;
        let (sin_t, cos_t) = angle.sin_cos();
        for i in 0..3 {
            let mut base = Vec3::ZERO;
            base[i] = 1.0;
            let vc = base.dot(axis) * axis / axis.dot(axis);
            let v1 = base - vc;
            let v2 = v1.cross(axis.hat());
            mat.cols[i] = (vc + v1 * cos_t + v2 * sin_t).as_vec4();
        }
        mat
    }
    pub fn transpose(&self) -> Mat4 {
        let [c0, c1, c2, c3] = self.cols;
        Mat4 {
            cols: [
                Vec4::new(c0.x, c1.x, c2.x, c3.x),
                Vec4::new(c0.y, c1.y, c2.y, c3.y),
                Vec4::new(c0.z, c1.z, c2.z, c3.z),
                Vec4::new(c0.w, c1.w, c2.w, c3.w),
            ],
        }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z + self.cols[3] * v.w
    }
}

impl Mul for Mat4 {
    type Output = Mat4;
    fn mul(self, m: Self) -> Mat4 {
        let mut mat = Mat4::ZERO;
        for c in 0..4 {
            mat.cols[c] = self * m.cols[c];
        }
        mat
    }
}

impl Mul<Vec3> for Mat4 {
    type Output = Vec3;
    fn mul(self, v: Vec3) -> Vec3 {
        let v4 = self.cols[0] * v.x + self.cols[1] * v.y + self.cols[2] * v.z;
        Vec3::new(v4.x, v4.y, v4.z)
    }
}

impl Mul<Point3> for Mat4 {
    type Output = Point3;
    fn mul(self, p: Point3) -> Self::Output {
        let v4 = self * p.as_vec4();
        if v4.w == 1.0 {
            Point3::new(v4.x, v4.y, v4.z)
        } else {
            Point3::new(v4.x / v4.w, v4.y / v4.w, v4.z / v4.w)
        }
    }
}

/// Mirrors `wi` about `normal` (which need not be unit-length): the component
/// of `wi` along the normal is kept and the tangential component is flipped.
pub fn reflect(normal: Vec3, wi: Vec3) -> Vec3 {
    let perp = wi.dot(normal) * normal / normal.norm_squared();
    let parallel = wi - perp;
    wi - 2.0 * parallel
}

pub enum Refract {
    Transmit(Vec3),
    TotalInternal,
}

pub use Refract::TotalInternal;
pub use Refract::Transmit;

/// Bends the unit direction `dir` through a medium boundary with unit normal `normal`.
/// - `normal` must face the incoming side (form an obtuse angle with `dir`).
/// - `eta_ratio` is the incident index over the transmitted index.
/// When `eta_ratio > 1` (leaving a dense medium) Snell's law may have no real
/// solution; that case is reported as `TotalInternal`.
pub fn refract(normal: Vec3, dir: Vec3, eta_ratio: f64) -> Refract {
    let cos_i = -dir.dot(normal);
    crate::assert_ge!(cos_i, 0.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    // sin_i * eta_i = sin_t * eta_t  =>  sin_t = sin_i * eta_ratio
    let sin2_t = sin2_i * eta_ratio * eta_ratio;
    if sin2_t >= 1.0 {
        TotalInternal
    } else {
        let cos_t = (1.0 - sin2_t).sqrt();
        Transmit(dir * eta_ratio + normal * (eta_ratio * cos_i - cos_t))
    }
}
