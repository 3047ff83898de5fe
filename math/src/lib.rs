/// Defines useful functions for common math operations, tools and constants:
/// - `Angle` to represent angles unambiguously,
/// - Simple interpolation and evenly-spaced sample midpoints (`linspace`),
/// - Macros to check if two math quantities are less than / greater than (or equal to) each other.
pub mod float;

/// Homogeneous-coordinate maths module.
/// - Types: 3D points and vectors, 4D vector, 4x4 matrix.
/// - Function `reflect()` to mirror a vector about a surface normal.
/// - Function `refract()` to bend a direction through a medium boundary, reporting
///   total internal reflection when Snell's law has no real solution.
pub mod hcm;

pub use float::Angle;
pub fn new_rad(rad: f64) -> float::Angle {
    float::Angle::new_rad(rad)
}
pub fn new_deg(deg: f64) -> float::Angle {
    float::Angle::new_deg(deg)
}
