use geometry::ray::Ray;
use light::LightError;
use math::hcm::{self, Point3, Vec3};
use radiometry::color::Color;
use scene::World;
use shape::Primitive;

/// Offset applied along the normal when spawning shadow, reflection and
/// refraction rays, so a child ray cannot immediately re-hit the surface it
/// starts on.
const SURFACE_BIAS: f64 = 1e-4;

/// The render context for one scene: the world being traced plus the tuning
/// knobs of the recursion. Construct once, then evaluate any number of rays
/// against it; `trace` keeps no other state.
pub struct Tracer<'w> {
    world: &'w World,
    max_depth: u32,
    /// Light sample sums divide by `count^damping` instead of `count`: full
    /// averaging would leave area lights dim next to point lights, while
    /// plain summation would wash them out. 0.9 is an empirical middle
    /// ground.
    damping: f64,
}

impl<'w> Tracer<'w> {
    pub fn new(world: &'w World, max_depth: u32) -> Self {
        Tracer {
            world,
            max_depth,
            damping: 0.9,
        }
    }

    pub fn with_damping(self, damping: f64) -> Self {
        Self { damping, ..self }
    }

    /// Traces one ray backwards into the world and returns the radiance seen
    /// along it: local shading at the nearest hit plus recursive reflection
    /// and refraction contributions. Black on a miss or past the depth bound.
    pub fn trace(&self, mut ray: Ray, depth: u32) -> Result<Color, LightError> {
        if depth > self.max_depth {
            return Ok(Color::black());
        }
        let prim = match self.world.intersect(&mut ray) {
            None => return Ok(Color::black()),
            Some(prim) => prim,
        };
        let mtl = prim.material();
        let albedo = prim.color();
        let pos = ray.position_at(ray.min_t);
        // Inside a medium the outward normal faces away from the ray's side
        // of the surface; flip it so shading and child rays model an exit.
        let normal = if ray.refracted {
            -prim.normal_at(pos)
        } else {
            prim.normal_at(pos)
        };
        let view = ray.dir.hat();

        let mut total = self.shade(prim, pos, normal, view)?;
        if depth == self.max_depth {
            // Children would be cut off immediately; don't spawn them.
            return Ok(total);
        }

        if !ray.refracted && mtl.reflectivity > 0.0 {
            let mut bounce = Ray::new(pos + normal * SURFACE_BIAS, hcm::reflect(normal, -view));
            bounce.eta = ray.eta;
            total += albedo * self.trace(bounce, depth + 1)? * mtl.reflectivity;
        }

        if mtl.transmissivity > 0.0 {
            let (eta_i, eta_t) = if ray.refracted {
                (mtl.refractive_index, 1.0)
            } else {
                (1.0, mtl.refractive_index)
            };
            // At extreme grazing incidence the smoothed normal can tilt past
            // the viewing direction; treat that like total internal
            // reflection and skip the term.
            if (-view).dot(normal) >= 0.0 {
                if let hcm::Transmit(transmitted) = hcm::refract(normal, view, eta_i / eta_t) {
                    let mut inner = Ray::new(pos - normal * SURFACE_BIAS, transmitted);
                    inner.refracted = !ray.refracted;
                    inner.eta = eta_t;
                    total += albedo * self.trace(inner, depth + 1)? * mtl.transmissivity;
                }
            }
        }
        Ok(total)
    }

    /// Local illumination at a hit point: the ambient term plus, for every
    /// unoccluded light sample, a Lambertian term and a Phong highlight.
    /// Per-light sums divide by `sample_count^damping` (see `damping`).
    fn shade(
        &self,
        prim: &dyn Primitive,
        pos: Point3,
        normal: Vec3,
        view: Vec3,
    ) -> Result<Color, LightError> {
        let mtl = prim.material();
        let albedo = prim.color();
        let highlight = mtl.specular_color(albedo);

        let mut total = albedo * self.world.ambient() * mtl.ambient;
        for light in self.world.lights() {
            let batch = light.shadow_rays(pos + normal * SURFACE_BIAS)?;
            let incidences = light.incidence_vectors(pos)?;
            let damp = (batch.rays.len() as f64).powf(self.damping);
            for (mut shadow_ray, incidence) in batch.rays.into_iter().zip(incidences) {
                if self.world.intersect(&mut shadow_ray).is_some() {
                    continue;
                }
                let light_color = light.color_towards(incidence);
                let l = incidence.hat();
                let lambert = normal.dot(l).max(0.0);
                total += albedo * light_color * (mtl.diffuse * lambert / damp);
                let mirrored = hcm::reflect(normal, l);
                let phong = (-mirrored.dot(view)).max(0.0).powf(mtl.shininess);
                total += highlight * light_color * (mtl.specular * phong / damp);
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod test {
    use super::Tracer;
    use geometry::ray::Ray;
    use geometry::transform::AffineTransform;
    use light::Falloff;
    use material::Material;
    use math::hcm::{point3, vec3};
    use radiometry::color::Color;
    use scene::{LightSpec, World};
    use shape::Sphere;

    fn white_sphere(material: Material) -> Box<Sphere> {
        Box::new(Sphere::new(
            1.0,
            Color::white(),
            material,
            AffineTransform::identity(),
        ))
    }

    #[test]
    fn empty_world_traces_black() {
        let world = World::new();
        let tracer = Tracer::new(&world, 4);
        for depth in 0..3 {
            let ray = Ray::new(point3(1.0, 2.0, 3.0), vec3(0.3, -0.2, -1.0));
            assert_eq!(tracer.trace(ray, depth).unwrap(), Color::black());
        }
    }

    #[test]
    fn lambertian_sphere_full_intensity_end_to_end() {
        // A unit sphere with diffuse = 1 and everything else 0, a white point
        // light at z = 5 with falloff 0 / dead distance 1, and a ray along -z
        // hitting the near pole: N.L = 1, no shadowing, no ambient, so the
        // result is exactly the light's full intensity.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::new(
            0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
        )));
        world
            .import_light(LightSpec::Point {
                color: Color::white(),
                falloff: Falloff::new(0.0, 1.0),
                position: point3(0.0, 0.0, 5.0),
            })
            .unwrap();

        let tracer = Tracer::new(&world, 2);
        let ray = Ray::new(point3(0.0, 0.0, 3.0), vec3(0.0, 0.0, -1.0));
        let color = tracer.trace(ray, 0).unwrap();
        assert!(
            (color.r - 1.0).abs() < 1e-9
                && (color.g - 1.0).abs() < 1e-9
                && (color.b - 1.0).abs() < 1e-9,
            "{}",
            color
        );
    }

    #[test]
    fn own_surface_does_not_shadow_itself() {
        // Same scene, but the hit point is off-axis so the shadow ray leaves
        // at a slant across the surface; the bias keeps it unoccluded.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::matte(0.0, 1.0)));
        world
            .import_light(LightSpec::Point {
                color: Color::white(),
                falloff: Falloff::NONE,
                position: point3(0.0, 4.0, 4.0),
            })
            .unwrap();
        let tracer = Tracer::new(&world, 2);
        let ray = Ray::new(point3(0.0, 0.0, 3.0), vec3(0.0, 0.0, -1.0));
        let color = tracer.trace(ray, 0).unwrap();
        assert!(color.r > 0.5, "{}", color);
    }

    #[test]
    fn max_depth_zero_is_pure_local_shading() {
        // A mirror sphere facing another sphere: with max_depth = 0 no child
        // rays are spawned, so the result equals the local shading alone.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::new(
            0.1, 0.5, 0.0, 0.0, 1.0, 0.9, 0.0, 1.0,
        )));
        world.add_primitive(Box::new(Sphere::new(
            1.0,
            Color::new(1.0, 0.0, 0.0),
            Material::matte(0.5, 1.0),
            AffineTransform::translater(vec3(0.0, 0.0, 6.0)),
        )));
        world
            .import_light(LightSpec::Point {
                color: Color::white(),
                falloff: Falloff::NONE,
                position: point3(5.0, 5.0, 5.0),
            })
            .unwrap();
        world.add_ambient(Color::gray(0.3));

        let ray = || Ray::new(point3(0.0, 0.0, 3.0), vec3(0.0, 0.0, -1.0));
        let local_only = Tracer::new(&world, 0).trace(ray(), 0).unwrap();

        // The same tracer without reflectivity in play: strip the weight by
        // comparing against a deep trace; the deep trace picks up extra
        // reflected radiance, the shallow one must not.
        let deep = Tracer::new(&world, 3).trace(ray(), 0).unwrap();
        assert!(deep.r >= local_only.r - 1e-12);
        assert!(
            deep.r > local_only.r + 1e-6 || deep.g > local_only.g + 1e-6,
            "deep {} vs local {}",
            deep,
            local_only
        );

        // Depth past the bound is black outright.
        let beyond = Tracer::new(&world, 0).trace(ray(), 1).unwrap();
        assert_eq!(beyond, Color::black());
    }

    #[test]
    fn refraction_passes_through_glass() {
        // A glass sphere between the eye and a red wall-sphere: radiance
        // seen through the glass carries the wall's red, scaled by the
        // transmissivity on the way in and out.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::new(
            0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.5,
        )));
        world.add_primitive(Box::new(Sphere::new(
            2.0,
            Color::new(1.0, 0.0, 0.0),
            Material::matte(0.0, 1.0),
            AffineTransform::translater(vec3(0.0, 0.0, -8.0)),
        )));
        world
            .import_light(LightSpec::Point {
                color: Color::white(),
                falloff: Falloff::NONE,
                position: point3(0.0, 0.0, -4.0),
            })
            .unwrap();

        let tracer = Tracer::new(&world, 4);
        // Straight through the middle: normal incidence never bends.
        let ray = Ray::new(point3(0.0, 0.0, 3.0), vec3(0.0, 0.0, -1.0));
        let color = tracer.trace(ray, 0).unwrap();
        assert!(color.r > 0.1, "{}", color);
        assert!(color.g.abs() < 1e-9 && color.b.abs() < 1e-9, "{}", color);
    }

    #[test]
    fn total_internal_reflection_zeroes_the_refraction_term() {
        // From inside a dense medium, a grazing exit ray sees TIR: tracing
        // must not panic and the refraction contribution is dropped.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::new(
            0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 4.0,
        )));
        let tracer = Tracer::new(&world, 3);
        // A ray already inside the sphere, hitting the shell well off the
        // radial direction so the exit angle is past critical.
        let mut ray = Ray::new(point3(0.9, 0.0, 0.0), vec3(0.0, 1.0, 0.0));
        ray.refracted = true;
        ray.eta = 4.0;
        let color = tracer.trace(ray, 0).unwrap();
        assert_eq!(color, Color::black());
    }

    #[test]
    fn area_light_damping_normalizes_samples() {
        // One unshadowed surface point lit by an area light directly above:
        // with damping d, 100 samples each contribute ~1/100^d, so the sum
        // stays within a factor ~100^(1-d) of a single-sample point light.
        let mut world = World::new();
        world.add_primitive(white_sphere(Material::matte(0.0, 1.0)));
        world
            .import_light(LightSpec::AreaSquare {
                color: Color::white(),
                falloff: Falloff::NONE,
                position: point3(0.0, 0.0, 6.0),
                side: 0.5,
                seed: 7,
            })
            .unwrap();
        let tracer = Tracer::new(&world, 0);
        let ray = Ray::new(point3(0.0, 0.0, 3.0), vec3(0.0, 0.0, -1.0));
        let soft = tracer.trace(ray, 0).unwrap();

        // 100 samples, damping 0.9: the sum of ~cos=1 contributions is about
        // 100 / 100^0.9 = 100^0.1 ~ 1.58.
        assert!(soft.r > 1.0 && soft.r < 2.0, "{}", soft);
    }
}
