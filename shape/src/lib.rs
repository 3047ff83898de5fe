mod simple;
mod smooth;

use geometry::ray::Ray;
use material::Material;
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;

pub use simple::{Sphere, Triangle};
pub use smooth::SmoothMesh;

/// A surface that rays can hit. See `simple.rs` for the implementations:
/// `Sphere` and `Triangle` (with Phong-smoothed vertex normals, built in
/// batches through `SmoothMesh`).
///
/// Every primitive owns its color, its material, and its model-to-world
/// transform with a cached inverse; queries take and give world-space values.
pub trait Primitive: Send + Sync {
    /// Checks for intersection with the given world-space ray. If a valid hit
    /// exists whose parametric distance lies in (0, `ray.min_t`], lowers
    /// `ray.min_t` to that distance and returns true; otherwise leaves the
    /// ray untouched and returns false. `min_t` never increases.
    fn intersect(&self, ray: &mut Ray) -> bool;

    /// Computes the unit surface normal at a world-space position assumed to
    /// lie on the primitive.
    fn normal_at(&self, position: Point3) -> Vec3;

    fn color(&self) -> Color;
    fn material(&self) -> Material;
    fn summary(&self) -> String;
}
