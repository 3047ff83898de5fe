pub mod preset;

use geometry::ray::Ray;
use light::{AreaLightSquare, DirectionalLight, Falloff, Light, LightError, PointLight};
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;
use shape::{Primitive, SmoothMesh};

/// A typed light description as produced by scene construction, before it is
/// resolved into a registered light. Ambient entries fold into the World's
/// ambient accumulator rather than the light list; kinds the renderer does
/// not implement fail the import with a typed error instead of being
/// approximated.
pub enum LightSpec {
    Ambient {
        color: Color,
    },
    Point {
        color: Color,
        falloff: Falloff,
        position: Point3,
    },
    Directional {
        color: Color,
        direction: Vec3,
    },
    AreaSquare {
        color: Color,
        falloff: Falloff,
        position: Point3,
        side: f64,
        seed: u64,
    },
    Spot,
}

/// Owns every primitive and light of a scene, plus the accumulated ambient
/// color. Populated once during scene construction and read-only for the
/// rest of the render.
pub struct World {
    primitives: Vec<Box<dyn Primitive>>,
    lights: Vec<Box<dyn Light>>,
    ambient: Color,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        World {
            primitives: vec![],
            lights: vec![],
            ambient: Color::black(),
        }
    }

    /// Scans every primitive for the globally nearest hit. Each candidate
    /// runs against a scratch copy of the ray so that a losing candidate
    /// cannot disturb `min_t`; winners commit their distance back, which also
    /// tightens the bound for the remaining candidates.
    pub fn intersect(&self, ray: &mut Ray) -> Option<&dyn Primitive> {
        let mut nearest: Option<&dyn Primitive> = None;
        for prim in self.primitives.iter() {
            let mut probe = *ray;
            if prim.intersect(&mut probe) {
                ray.min_t = probe.min_t;
                nearest = Some(prim.as_ref());
            }
        }
        nearest
    }

    pub fn add_primitive(&mut self, p: Box<dyn Primitive>) {
        self.primitives.push(p);
    }

    /// Registers all triangles of a smoothed mesh.
    pub fn add_mesh(&mut self, mesh: SmoothMesh) {
        for tri in mesh.finish() {
            self.add_primitive(Box::new(tri));
        }
    }

    pub fn add_light(&mut self, l: Box<dyn Light>) {
        self.lights.push(l);
    }

    /// Accumulates ambient light; multiple ambient sources sum.
    pub fn add_ambient(&mut self, c: Color) {
        self.ambient += c;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }
    pub fn lights(&self) -> &[Box<dyn Light>] {
        &self.lights
    }
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Resolves a typed light description into the right registration.
    pub fn import_light(&mut self, spec: LightSpec) -> Result<(), LightError> {
        match spec {
            LightSpec::Ambient { color } => self.add_ambient(color),
            LightSpec::Point {
                color,
                falloff,
                position,
            } => self.add_light(Box::new(PointLight::new(color, falloff, position))),
            LightSpec::Directional { color, direction } => {
                self.add_light(Box::new(DirectionalLight::new(color, direction)))
            }
            LightSpec::AreaSquare {
                color,
                falloff,
                position,
                side,
                seed,
            } => self.add_light(Box::new(AreaLightSquare::new(
                color, falloff, position, side, seed,
            ))),
            LightSpec::Spot => return Err(LightError::UnsupportedLightType("spot")),
        }
        Ok(())
    }

    pub fn log_stats(&self) {
        log::info!(
            "World data: {} primitives, {} lights, ambient = {}",
            self.primitives.len(),
            self.lights.len(),
            self.ambient
        );
    }
}
