use geometry::ray::Ray;
use geometry::transform::{AffineTransform, Transform};
use material::Material;
use math::float::Float;
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;

use crate::Primitive;

/// A sphere of the given radius, centered at the origin of its local frame.
/// Position, orientation and any (possibly non-uniform) scaling come from the
/// model-to-world transform.
#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    radius: f64,
    color: Color,
    material: Material,
    object_to_world: AffineTransform,
}

impl Sphere {
    pub fn new(
        radius: f64,
        color: Color,
        material: Material,
        object_to_world: AffineTransform,
    ) -> Self {
        assert!(radius > 0.0 && radius.is_finite());
        Sphere {
            radius,
            color,
            material,
            object_to_world,
        }
    }
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &mut Ray) -> bool {
        // Work on a local-space copy; parametric distances are shared between
        // the two frames because origin and direction transform together.
        let local = self.object_to_world.inverse().apply(*ray);

        // |o + td|^2 = r^2, with o the origin relative to the sphere center:
        // t^2 d.d + 2t o.d + o.o - r^2 = 0
        let o = Vec3::from(local.origin);
        let d2 = local.dir.norm_squared();
        let half_b = o.dot(local.dir);
        let discriminant = half_b * half_b - d2 * (o.norm_squared() - self.radius * self.radius);
        if discriminant < 0.0 {
            return false;
        }
        let sqrt_disc = discriminant.sqrt();
        let t_near = (-half_b - sqrt_disc) / d2;
        let t_far = (-half_b + sqrt_disc) / d2;
        // The nearer root wins unless it is behind the origin (ray starting
        // inside or past the sphere), in which case the exit point counts.
        let t = if t_near > 0.0 { t_near } else { t_far };
        match ray.truncated_t(t) {
            Some(t) => {
                ray.min_t = t;
                true
            }
            None => false,
        }
    }

    fn normal_at(&self, position: Point3) -> Vec3 {
        let local = self.object_to_world.inverse().apply(position);
        let local_normal = Vec3::from(local) / self.radius;
        self.object_to_world.apply_normal(local_normal).hat()
    }

    fn color(&self) -> Color {
        self.color
    }
    fn material(&self) -> Material {
        self.material
    }
    fn summary(&self) -> String {
        format!("Sphere{{radius = {}}}", self.radius)
    }
}

/// A triangle with Phong-smoothed shading normals.
///
/// The three vertices live in the local frame. The face normal and area are
/// derived at construction; the per-vertex normals start out as copies of the
/// face normal and are only ever reshaped by the `SmoothMesh` batch pass,
/// after which the triangle is immutable.
#[derive(Debug, Clone)]
pub struct Triangle {
    verts: [Point3; 3],
    face_normal: Vec3,
    area: f64,
    vertex_normals: [Vec3; 3],
    color: Color,
    material: Material,
    object_to_world: AffineTransform,
}

impl Triangle {
    pub fn new(
        v0: Point3,
        v1: Point3,
        v2: Point3,
        color: Color,
        material: Material,
        object_to_world: AffineTransform,
    ) -> Self {
        let scaled_normal = (v2 - v1).cross(v0 - v1);
        let area = 0.5 * scaled_normal.norm();
        // Zero-area triangles have no face normal; constructing one is a
        // precondition violation (hat() panics).
        let face_normal = scaled_normal.hat();
        Triangle {
            verts: [v0, v1, v2],
            face_normal,
            area,
            vertex_normals: [face_normal; 3],
            color,
            material,
            object_to_world,
        }
    }

    pub fn vertex(&self, i: usize) -> Point3 {
        self.verts[i]
    }
    pub fn face_normal(&self) -> Vec3 {
        self.face_normal
    }
    pub fn area(&self) -> f64 {
        self.area
    }
    pub fn vertex_normal(&self, i: usize) -> Vec3 {
        self.vertex_normals[i]
    }

    pub(crate) fn accumulate_vertex_normal(&mut self, i: usize, n: Vec3) {
        self.vertex_normals[i] += n;
    }
    pub(crate) fn normalize_vertex_normals(&mut self) {
        for n in self.vertex_normals.iter_mut() {
            *n = n.hat();
        }
    }

    /// Solves the plane equation with the face normal, then runs the three
    /// same-side tests: the hit point must lie on the inner side of each
    /// plane spanned by the ray origin and one triangle edge.
    fn local_hit(&self, local: &Ray) -> Option<f64> {
        let [v0, v1, v2] = self.verts;
        let denom = local.dir.dot(self.face_normal);
        // A zero denominator is a ray grazing parallel to the plane: a miss.
        let t = (v1 - local.origin)
            .dot(self.face_normal)
            .try_divide(denom)?;
        let t = local.truncated_t(t)?;

        let p = local.position_at(t);
        let o = local.origin;
        for &(a, b) in &[(v1, v0), (v2, v1), (v0, v2)] {
            let side_normal = (a - o).cross(b - o);
            if (p - o).dot(side_normal) < 0.0 {
                return None;
            }
        }
        Some(t)
    }
}

impl Primitive for Triangle {
    fn intersect(&self, ray: &mut Ray) -> bool {
        let local = self.object_to_world.inverse().apply(*ray);
        match self.local_hit(&local) {
            Some(t) => {
                ray.min_t = t;
                true
            }
            None => false,
        }
    }

    /// The shading normal is not the flat face normal: the smoothed vertex
    /// normals are blended with sub-triangle-area weights (each vertex is
    /// weighted by the area of the sub-triangle opposite to it).
    fn normal_at(&self, position: Point3) -> Vec3 {
        let p = self.object_to_world.inverse().apply(position);
        let [v0, v1, v2] = self.verts;
        let w0 = (p - v1).cross(p - v2).norm() * 0.5 / self.area;
        let w1 = (p - v0).cross(p - v2).norm() * 0.5 / self.area;
        let w2 = (p - v0).cross(p - v1).norm() * 0.5 / self.area;
        let local_normal = (self.vertex_normals[0] * w0
            + self.vertex_normals[1] * w1
            + self.vertex_normals[2] * w2)
            .hat();
        self.object_to_world.apply_normal(local_normal).hat()
    }

    fn color(&self) -> Color {
        self.color
    }
    fn material(&self) -> Material {
        self.material
    }
    fn summary(&self) -> String {
        format!(
            "Triangle{{{:.3}, {:.3}, {:.3}}}",
            self.verts[0], self.verts[1], self.verts[2]
        )
    }
}
