use crate::simple::Triangle;

/// Batches the triangles of one mesh so their shading normals can be smoothed
/// across shared vertices, faking curvature over a flat-faceted surface.
///
/// Every added triangle is compared against all triangles added before it;
/// whenever two triangles share a vertex by exact position equality (no
/// epsilon), each accumulates the other's face normal into that vertex's
/// normal slot. `finish` renormalizes the accumulators and releases the
/// triangles, typically straight into a `World`.
///
/// The pairwise matching is O(n^2) in mesh size and runs once per mesh at
/// scene-build time, never per frame.
pub struct SmoothMesh {
    triangles: Vec<Triangle>,
}

impl SmoothMesh {
    pub fn new() -> Self {
        SmoothMesh { triangles: vec![] }
    }

    pub fn add(&mut self, mut tri: Triangle) {
        for prev in self.triangles.iter_mut() {
            share_face_normals(prev, &mut tri);
        }
        self.triangles.push(tri);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Normalizes every per-vertex normal accumulator and yields the finished
    /// triangles. Call once, after the whole mesh has been added.
    pub fn finish(mut self) -> Vec<Triangle> {
        for tri in self.triangles.iter_mut() {
            tri.normalize_vertex_normals();
        }
        self.triangles
    }
}

impl Default for SmoothMesh {
    fn default() -> Self {
        Self::new()
    }
}

fn share_face_normals(a: &mut Triangle, b: &mut Triangle) {
    for i in 0..3 {
        for j in 0..3 {
            if a.vertex(i) == b.vertex(j) {
                a.accumulate_vertex_normal(i, b.face_normal());
                b.accumulate_vertex_normal(j, a.face_normal());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::SmoothMesh;
    use crate::simple::Triangle;
    use geometry::transform::AffineTransform;
    use material::Material;
    use math::hcm::{point3, Point3, Vec3};
    use radiometry::color::Color;

    fn tri(v0: Point3, v1: Point3, v2: Point3) -> Triangle {
        Triangle::new(
            v0,
            v1,
            v2,
            Color::white(),
            Material::matte(0.0, 1.0),
            AffineTransform::identity(),
        )
    }

    #[test]
    fn shared_vertices_average_face_normals() {
        // Two triangles folded along the edge (0,0,0)-(0,1,0): one in the xy
        // plane facing +z, the other in the yz plane facing +x.
        let a = tri(
            point3(0.0, 0.0, 0.0),
            point3(1.0, 0.0, 0.0),
            point3(0.0, 1.0, 0.0),
        );
        let b = tri(
            point3(0.0, 0.0, 0.0),
            point3(0.0, 0.0, -1.0),
            point3(0.0, 1.0, 0.0),
        );
        let (na, nb) = (a.face_normal(), b.face_normal());

        let mut mesh = SmoothMesh::new();
        mesh.add(a);
        mesh.add(b);
        let smoothed = mesh.finish();

        let expected = (na + nb).hat();
        // Vertices 0 and 2 of the first triangle are shared (by exact
        // position) with vertices 0 and 2 of the second.
        for &(t, v) in &[(0usize, 0usize), (0, 2), (1, 0), (1, 2)] {
            let n = smoothed[t].vertex_normal(v);
            assert!(
                (n - expected).norm_squared() < 1e-12,
                "triangle {} vertex {}: {} vs {}",
                t,
                v,
                n,
                expected
            );
        }
        // Unshared vertices keep their own (normalized) face normal.
        assert!((smoothed[0].vertex_normal(1) - na).norm_squared() < 1e-12);
        assert!((smoothed[1].vertex_normal(1) - nb).norm_squared() < 1e-12);
    }

    #[test]
    fn smoothed_shading_normal_blends_across_the_face() {
        let a = tri(
            point3(0.0, 0.0, 0.0),
            point3(1.0, 0.0, 0.0),
            point3(0.0, 1.0, 0.0),
        );
        let b = tri(
            point3(0.0, 0.0, 0.0),
            point3(0.0, 0.0, -1.0),
            point3(0.0, 1.0, 0.0),
        );
        let mut mesh = SmoothMesh::new();
        mesh.add(a);
        mesh.add(b);
        let smoothed = mesh.finish();

        use crate::Primitive;
        // Near the unshared vertex the normal stays close to the face normal;
        // near the shared edge it leans toward the average.
        let near_lone = smoothed[0].normal_at(point3(0.9, 0.05, 0.0));
        assert!(near_lone.dot(Vec3::Z) > 0.95, "{}", near_lone);
        let near_shared = smoothed[0].normal_at(point3(0.01, 0.5, 0.0));
        assert!(near_shared.x > 0.1, "{}", near_shared);
        assert!(near_shared.z > 0.5, "{}", near_shared);
    }
}
