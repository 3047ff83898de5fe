pub mod ray;
pub mod transform;

pub use ray::Ray;
pub use transform::{AffineTransform, Transform};
