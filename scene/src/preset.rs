use geometry::transform::AffineTransform;
use light::Falloff;
use material::Material;
use math::hcm::{point3, vec3};
use radiometry::color::Color;
use shape::{SmoothMesh, Sphere, Triangle};

use crate::{LightSpec, World};

// Functions that build the demo scenes. Each returns the populated world and
// the view-to-world transform placing the eye.
// ------------------------------------------------------------------------------------------------

/// One matte sphere under a single white point light. The simplest possible
/// sanity scene: pure Lambertian falloff across the sphere, hard shadow only.
pub fn single_sphere() -> (World, AffineTransform) {
    let mut world = World::new();
    world.add_primitive(Box::new(Sphere::new(
        1.0,
        Color::new(0.8, 0.3, 0.3),
        Material::matte(0.2, 0.9),
        AffineTransform::identity(),
    )));
    world
        .import_light(LightSpec::Point {
            color: Color::white(),
            falloff: Falloff::NONE,
            position: point3(3.0, 4.0, 5.0),
        })
        .expect("point lights are supported");
    world
        .import_light(LightSpec::Ambient {
            color: Color::gray(0.15),
        })
        .expect("ambient lights are supported");

    (world, AffineTransform::translater(vec3(0.0, 0.0, 4.0)))
}

/// A mirror sphere, a glass sphere and a matte sphere over a two-triangle
/// floor, lit by a point light and a dim directional fill. Exercises the
/// recursive reflection and refraction paths.
pub fn three_spheres() -> (World, AffineTransform) {
    let mut world = World::new();

    world.add_primitive(Box::new(Sphere::new(
        1.0,
        Color::new(0.9, 0.4, 0.3),
        Material::matte(0.2, 0.9),
        AffineTransform::translater(vec3(-2.2, 0.0, 0.0)),
    )));
    world.add_primitive(Box::new(Sphere::new(
        1.0,
        Color::gray(0.9),
        Material::shiny(0.4, 0.6, 40.0, 0.7),
        AffineTransform::translater(vec3(0.0, 0.0, -1.5)),
    )));
    world.add_primitive(Box::new(Sphere::new(
        1.0,
        Color::new(0.85, 0.9, 1.0),
        Material::glass(0.9, 1.5),
        AffineTransform::translater(vec3(2.2, 0.0, 0.0)),
    )));
    world.add_mesh(floor(-1.0, 12.0, Color::gray(0.7)));

    world
        .import_light(LightSpec::Point {
            color: Color::white(),
            falloff: Falloff::new(1.0, 1.0),
            position: point3(0.0, 6.0, 4.0),
        })
        .expect("point lights are supported");
    world
        .import_light(LightSpec::Directional {
            color: Color::gray(0.25),
            direction: vec3(-1.0, -1.0, -0.5),
        })
        .expect("directional lights are supported");
    world
        .import_light(LightSpec::Ambient {
            color: Color::gray(0.1),
        })
        .expect("ambient lights are supported");

    (world, AffineTransform::translater(vec3(0.0, 1.0, 7.0)))
}

/// A sphere hovering over a floor, lit by a square area light overhead.
/// The jittered grid of shadow samples produces a soft penumbra.
pub fn soft_shadows() -> (World, AffineTransform) {
    let mut world = World::new();

    world.add_primitive(Box::new(Sphere::new(
        1.0,
        Color::new(0.4, 0.5, 0.9),
        Material::matte(0.2, 0.9),
        AffineTransform::translater(vec3(0.0, 0.5, 0.0)),
    )));
    world.add_mesh(floor(-1.0, 16.0, Color::gray(0.8)));

    // The square patch is parallel to the global xy-plane, so it sits high on
    // the +z side and shines down across the sphere.
    world
        .import_light(LightSpec::AreaSquare {
            color: Color::white(),
            falloff: Falloff::new(0.5, 1.0),
            position: point3(0.0, 5.0, 6.0),
            side: 3.0,
            seed: 0x5eed,
        })
        .expect("area lights are supported");
    world
        .import_light(LightSpec::Ambient {
            color: Color::gray(0.08),
        })
        .expect("ambient lights are supported");

    (world, AffineTransform::translater(vec3(0.0, 1.5, 7.0)))
}

/// Looks up a preset scene by its command-line name.
pub fn by_name(name: &str) -> Option<(World, AffineTransform)> {
    match name {
        "single_sphere" => Some(single_sphere()),
        "three_spheres" => Some(three_spheres()),
        "soft_shadows" => Some(soft_shadows()),
        _ => None,
    }
}

pub fn names() -> &'static [&'static str] {
    &["single_sphere", "three_spheres", "soft_shadows"]
}

/// A square floor at height `y` made of two triangles sharing a diagonal.
/// Running them through the smoothing batch keeps their shading normals
/// consistent along the shared edge.
fn floor(y: f64, extent: f64, color: Color) -> SmoothMesh {
    let h = extent * 0.5;
    let mtl = Material::matte(0.25, 0.8);
    let corners = [
        point3(-h, y, -h),
        point3(h, y, -h),
        point3(h, y, h),
        point3(-h, y, h),
    ];
    let mut mesh = SmoothMesh::new();
    // Both triangles wound counter-clockwise seen from above (+y).
    mesh.add(Triangle::new(
        corners[0],
        corners[2],
        corners[1],
        color,
        mtl,
        AffineTransform::identity(),
    ));
    mesh.add(Triangle::new(
        corners[0],
        corners[3],
        corners[2],
        color,
        mtl,
        AffineTransform::identity(),
    ));
    mesh
}

#[cfg(test)]
mod test {
    #[test]
    fn all_presets_build() {
        for name in super::names() {
            let (world, _view) = super::by_name(name).unwrap();
            assert!(world.primitive_count() > 0, "{}", name);
            assert!(world.light_count() > 0, "{}", name);
        }
    }
}
