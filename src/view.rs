use geometry::ray::Ray;
use math::float::lerp;
use math::hcm::{vec3, Point3, Vec3};
use math::Angle;

/// The eye and the image window it looks through. The eye sits at the view-
/// space origin looking down -z; four frustum corner vectors span the window
/// on the near plane. Rays come out in view space, and the render loop moves
/// them into the world with the scene's view-to-world transform.
pub struct View {
    eye: Point3,
    lower_left: Vec3,
    lower_right: Vec3,
    upper_left: Vec3,
    upper_right: Vec3,
    width: u32,
    height: u32,
    samples_per_edge: u32,
}

impl View {
    /// Builds the window from the vertical field of view and the aspect ratio
    /// of the resolution. `samples_per_edge` sub-samples tile each pixel edge,
    /// so every pixel traces its square.
    pub fn new(resolution: (u32, u32), fov_y: Angle, samples_per_edge: u32) -> Self {
        let (width, height) = resolution;
        assert!(width > 0 && height > 0 && samples_per_edge > 0);
        let aspect = width as f64 / height as f64;
        let half_v = (fov_y * 0.5).tan();
        let half_h = half_v * aspect;
        View {
            eye: Point3::ORIGIN,
            lower_left: vec3(-half_h, -half_v, -1.0),
            lower_right: vec3(half_h, -half_v, -1.0),
            upper_left: vec3(-half_h, half_v, -1.0),
            upper_right: vec3(half_h, half_v, -1.0),
            width,
            height,
            samples_per_edge,
        }
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    pub fn rays_per_pixel(&self) -> u32 {
        self.samples_per_edge * self.samples_per_edge
    }

    /// The viewing ray through sub-sample `s` of pixel (x, y). Pixel rows run
    /// top to bottom; sub-samples tile the pixel on a regular grid, bilinear
    /// between the four window corners.
    pub fn viewing_ray(&self, x: u32, y: u32, s: u32) -> Ray {
        assert!(x < self.width && y < self.height && s < self.rays_per_pixel());
        let e = self.samples_per_edge;
        let (sx, sy) = (s % e, s / e);
        let u = (x as f64 + (sx as f64 + 0.5) / e as f64) / self.width as f64;
        let v = 1.0 - (y as f64 + (sy as f64 + 0.5) / e as f64) / self.height as f64;
        let bottom = lerp(self.lower_left, self.lower_right, u);
        let top = lerp(self.upper_left, self.upper_right, u);
        Ray::new(self.eye, lerp(bottom, top, v))
    }
}

#[cfg(test)]
mod test {
    use super::View;

    #[test]
    fn center_ray_looks_down_minus_z() {
        let view = View::new((101, 101), math::new_deg(90.0), 1);
        let ray = view.viewing_ray(50, 50, 0);
        assert!(ray.dir.x.abs() < 1e-9 && ray.dir.y.abs() < 1e-9);
        assert!(ray.dir.z < 0.0);
    }

    #[test]
    fn corner_rays_span_the_frustum() {
        // 90-degree vertical fov on a square image: window corners at 45
        // degrees up/down.
        let view = View::new((100, 100), math::new_deg(90.0), 1);
        let top_left = view.viewing_ray(0, 0, 0);
        assert!(top_left.dir.x < 0.0 && top_left.dir.y > 0.0);
        let bottom_right = view.viewing_ray(99, 99, 0);
        assert!(bottom_right.dir.x > 0.0 && bottom_right.dir.y < 0.0);
        // Half a pixel in from the exact corner.
        assert!((top_left.dir.y - 0.99).abs() < 1e-9, "{}", top_left.dir);
    }

    #[test]
    fn subsamples_stay_inside_their_pixel() {
        let view = View::new((10, 10), math::new_deg(60.0), 3);
        assert_eq!(view.rays_per_pixel(), 9);
        let lo = view.viewing_ray(4, 4, 0);
        let hi = view.viewing_ray(4, 4, 8);
        let next_pixel = view.viewing_ray(5, 4, 0);
        assert!(lo.dir.x < hi.dir.x);
        assert!(hi.dir.x < next_pixel.dir.x);
    }
}
