use geometry::ray::Ray;
use itertools::Itertools;
use math::float::linspace;
use math::hcm::{Point3, Vec3};
use radiometry::color::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors raised by light queries and light import. Both are unrecoverable at
/// the point of occurrence: the render aborts with the diagnostic rather than
/// approximating.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// Direction or shadow queries on an ambient light, which has no sense of
    /// direction or position.
    #[error("ambient lights have no sense of direction or position")]
    InvalidOperationOnAmbientLight,

    /// A light kind the renderer does not implement (e.g. spot lights).
    #[error("unsupported light type: {0}")]
    UnsupportedLightType(&'static str),
}

/// Inverse-power-law distance attenuation: `(1 / (distance + dead_distance)) ^
/// exponent`. The dead distance keeps the scale finite as the distance goes to
/// zero; exponent 0 disables attenuation entirely.
#[derive(Debug, Clone, Copy)]
pub struct Falloff {
    pub exponent: f64,
    pub dead_distance: f64,
}

impl Falloff {
    pub const NONE: Falloff = Falloff {
        exponent: 0.0,
        dead_distance: 1.0,
    };
    pub fn new(exponent: f64, dead_distance: f64) -> Self {
        Falloff {
            exponent,
            dead_distance,
        }
    }
    fn scale(&self, distance: f64) -> f64 {
        (1.0 / (distance + self.dead_distance)).powf(self.exponent)
    }
}

/// One shadow ray per light sample. Rays built towards a located sample encode
/// the sample's distance in their direction length with `min_t` preset to 1,
/// so any accepted hit shadows the point; for those, `use_distance` is true.
/// Directional lights have no source position, their rays are unbounded and
/// `use_distance` is false: any positive hit distance shadows.
pub struct ShadowBatch {
    pub rays: Vec<Ray>,
    pub use_distance: bool,
}

/// A light source. Point and directional lights produce exactly one sample;
/// the square area light produces a jittered grid of them. The incidence and
/// shadow queries of one light describe the same physical sample points in
/// the same order, so shading code may zip them together.
pub trait Light: Send + Sync {
    /// The color arriving along the given incidence vector (as produced by
    /// `incidence_vectors`, unnormalized: its length is the distance to the
    /// sample and drives attenuation where the light has any).
    fn color_towards(&self, incidence: Vec3) -> Color;

    /// Directions from the shading point toward the light, one per sample,
    /// unnormalized. Ambient lights fail with a typed error.
    fn incidence_vectors(&self, position: Point3) -> Result<Vec<Vec3>, LightError>;

    /// Rays from the shading point used to test for shadowing, one per
    /// sample. Ambient lights fail with a typed error.
    fn shadow_rays(&self, position: Point3) -> Result<ShadowBatch, LightError>;
}

/// Ambient light, constant throughout the scene. Scene construction usually
/// folds these into the World's ambient accumulator instead of registering
/// them; the directional queries exist only to fail loudly.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    illumination: Color,
}

impl AmbientLight {
    pub fn new(illumination: Color) -> Self {
        AmbientLight { illumination }
    }
}

impl Light for AmbientLight {
    fn color_towards(&self, _incidence: Vec3) -> Color {
        self.illumination
    }
    fn incidence_vectors(&self, _position: Point3) -> Result<Vec<Vec3>, LightError> {
        Err(LightError::InvalidOperationOnAmbientLight)
    }
    fn shadow_rays(&self, _position: Point3) -> Result<ShadowBatch, LightError> {
        Err(LightError::InvalidOperationOnAmbientLight)
    }
}

/// Point light with a fixed location in the scene.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    illumination: Color,
    falloff: Falloff,
    position: Point3,
}

impl PointLight {
    pub fn new(illumination: Color, falloff: Falloff, position: Point3) -> Self {
        PointLight {
            illumination,
            falloff,
            position,
        }
    }
}

impl Light for PointLight {
    fn color_towards(&self, incidence: Vec3) -> Color {
        self.illumination * self.falloff.scale(incidence.norm())
    }
    fn incidence_vectors(&self, position: Point3) -> Result<Vec<Vec3>, LightError> {
        Ok(vec![self.position - position])
    }
    fn shadow_rays(&self, position: Point3) -> Result<ShadowBatch, LightError> {
        Ok(ShadowBatch {
            rays: vec![Ray::between(position, self.position)],
            use_distance: true,
        })
    }
}

/// Directional light: all rays are parallel, the source is infinitely far.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    illumination: Color,
    /// Unit direction the light travels in (from the light into the scene).
    direction: Vec3,
}

impl DirectionalLight {
    pub fn new(illumination: Color, direction: Vec3) -> Self {
        DirectionalLight {
            illumination,
            direction: direction.hat(),
        }
    }
}

impl Light for DirectionalLight {
    fn color_towards(&self, _incidence: Vec3) -> Color {
        self.illumination
    }
    fn incidence_vectors(&self, _position: Point3) -> Result<Vec<Vec3>, LightError> {
        Ok(vec![-self.direction])
    }
    fn shadow_rays(&self, position: Point3) -> Result<ShadowBatch, LightError> {
        Ok(ShadowBatch {
            rays: vec![Ray::new(position, -self.direction)],
            use_distance: false,
        })
    }
}

/// Square area light parallel to the scene's xy-plane, centered at `position`
/// with the given side length. Soft shadows come from sampling a
/// `samples_per_side`-squared grid over the patch, each sample jittered
/// within a bounded fraction of its grid cell.
///
/// The jitter stream is drawn from a generator seeded with the light's own
/// seed and re-seeded at every query, so the incidence and shadow batches of
/// one evaluation land on identical sample points, and rendering stays
/// reproducible without any process-global random state.
#[derive(Debug, Clone, Copy)]
pub struct AreaLightSquare {
    illumination: Color,
    falloff: Falloff,
    position: Point3,
    side: f64,
    seed: u64,
    samples_per_side: u32,
    /// Maximum jitter per axis, as a fraction of the grid cell size. The
    /// default 0.25 is an empirical anti-banding tuning constant.
    jitter: f64,
}

impl AreaLightSquare {
    pub fn new(illumination: Color, falloff: Falloff, position: Point3, side: f64, seed: u64) -> Self {
        AreaLightSquare {
            illumination,
            falloff,
            position,
            side,
            seed,
            samples_per_side: 10,
            jitter: 0.25,
        }
    }
    pub fn with_grid(self, samples_per_side: u32) -> Self {
        assert!(samples_per_side > 0);
        Self {
            samples_per_side,
            ..self
        }
    }
    pub fn with_jitter(self, jitter: f64) -> Self {
        assert!((0.0..=0.5).contains(&jitter));
        Self { jitter, ..self }
    }
    pub fn sample_count(&self) -> usize {
        (self.samples_per_side * self.samples_per_side) as usize
    }

    /// The jittered sample positions on the patch, cell midpoints first. The
    /// y-major, x-minor order and the per-axis jitter draws are part of the
    /// reproducibility contract between the incidence and shadow queries.
    fn sample_points(&self) -> Vec<Point3> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let half = self.side * 0.5;
        let (xs, cell) = linspace(
            (self.position.x - half, self.position.x + half),
            self.samples_per_side,
        );
        let (ys, _) = linspace(
            (self.position.y - half, self.position.y + half),
            self.samples_per_side,
        );
        ys.iter()
            .cartesian_product(xs.iter())
            .map(|(&y, &x)| {
                let dx = rng.gen_range(-1.0..=1.0) * self.jitter * cell;
                let dy = rng.gen_range(-1.0..=1.0) * self.jitter * cell;
                Point3::new(x + dx, y + dy, self.position.z)
            })
            .collect()
    }
}

impl Light for AreaLightSquare {
    fn color_towards(&self, incidence: Vec3) -> Color {
        self.illumination * self.falloff.scale(incidence.norm())
    }
    fn incidence_vectors(&self, position: Point3) -> Result<Vec<Vec3>, LightError> {
        Ok(self
            .sample_points()
            .into_iter()
            .map(|sample| sample - position)
            .collect())
    }
    fn shadow_rays(&self, position: Point3) -> Result<ShadowBatch, LightError> {
        Ok(ShadowBatch {
            rays: self
                .sample_points()
                .into_iter()
                .map(|sample| Ray::between(position, sample))
                .collect(),
            use_distance: true,
        })
    }
}
