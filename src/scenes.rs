//! Hard-coded example scenes, each with the camera it was framed for.

use std::f32::consts::PI;

use glam::Vec3A;
use rand::Rng;

use raylight::random;
use raylight::{Camera, Color, HittableList, Material, Sphere};

/// Diffuse sphere resting on a large diffuse ground sphere.
pub fn basic() -> (HittableList, Camera) {
    let mut world = HittableList::new();
    world.add(Sphere::new(
        Vec3A::new(0.0, -100.5, -1.0),
        100.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    ));
    world.add(Sphere::new(
        Vec3A::new(0.0, 0.0, -1.0),
        0.5,
        Material::lambertian(Color::new(0.1, 0.2, 0.5)),
    ));

    let mut camera = Camera::new();
    camera.image_width = 400;
    camera.samples_per_pixel = 100;
    camera.max_depth = 50;
    camera.focus_dist = 1.0;

    (world, camera)
}

/// One sphere of each material, with a hollow glass bubble on the left.
pub fn materials() -> (HittableList, Camera) {
    let material_ground = Material::lambertian(Color::new(0.8, 0.8, 0.0));
    let material_center = Material::lambertian(Color::new(0.1, 0.2, 0.5));
    let material_left = Material::dielectric(1.50);
    let material_bubble = Material::dielectric(1.00 / 1.50);
    let material_right = Material::metal(Color::new(0.8, 0.6, 0.2), 1.0);

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3A::new(0.0, -100.5, -1.0), 100.0, material_ground));
    world.add(Sphere::new(Vec3A::new(0.0, 0.0, -1.2), 0.5, material_center));
    world.add(Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.5, material_left));
    world.add(Sphere::new(Vec3A::new(-1.0, 0.0, -1.0), 0.4, material_bubble));
    world.add(Sphere::new(Vec3A::new(1.0, 0.0, -1.0), 0.5, material_right));

    let mut camera = Camera::new();
    camera.image_width = 800;
    camera.samples_per_pixel = 100;
    camera.max_depth = 50;
    camera.vfov = 90.0;
    camera.lookfrom = Vec3A::new(-2.0, 2.0, 1.0);
    camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
    camera.defocus_angle = 10.0;
    camera.focus_dist = 3.4;

    (world, camera)
}

/// Blue and red spheres just touching at the view axis.
pub fn fov() -> (HittableList, Camera) {
    let r = (PI / 4.0).cos();

    let material_left = Material::lambertian(Color::new(0.0, 0.0, 1.0));
    let material_right = Material::lambertian(Color::new(1.0, 0.0, 0.0));

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3A::new(-r, 0.0, -1.0), r, material_left));
    world.add(Sphere::new(Vec3A::new(r, 0.0, -1.0), r, material_right));

    let mut camera = Camera::new();
    camera.image_width = 800;
    camera.samples_per_pixel = 100;
    camera.max_depth = 50;
    camera.vfov = 90.0;
    camera.focus_dist = 1.0;

    (world, camera)
}

/// Create the book cover scene with random spheres
pub fn final_scene<R: Rng + ?Sized>(rng: &mut R) -> (HittableList, Camera) {
    let mut world = HittableList::new();

    world.add(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    ));

    // Generate 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f32(rng);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_f32(rng),
                0.2,
                b as f32 + 0.9 * random::random_f32(rng),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material = if choose_mat < 0.8 {
                let albedo = random::random_color(rng) * random::random_color(rng);
                Material::lambertian(albedo)
            } else if choose_mat < 0.95 {
                let albedo = random::random_color_range(rng, 0.5, 1.0);
                let fuzz = random::random_f32_range(rng, 0.0, 0.5);
                Material::metal(albedo, fuzz)
            } else {
                Material::dielectric(1.5)
            };

            world.add(Sphere::new(center, 0.2, sphere_material));
        }
    }

    // Three large feature spheres
    world.add(Sphere::new(Vec3A::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5)));
    world.add(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    ));

    let mut camera = Camera::new();
    camera.image_width = 800;
    camera.samples_per_pixel = 10;
    camera.max_depth = 50;
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;

    (world, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_scene_is_reproducible() {
        let (a, _) = final_scene(&mut random::seeded_rng(Some(3)));
        let (b, _) = final_scene(&mut random::seeded_rng(Some(3)));
        assert_eq!(a.len(), b.len());
        // Ground plus three feature spheres always exist
        assert!(a.len() > 4 && a.len() <= 4 + 22 * 22);
    }

    #[test]
    fn test_scene_cameras_initialize() {
        let (_, mut camera) = basic();
        camera.initialize().unwrap();
        assert_eq!(camera.image_height(), 225);

        for (_, mut camera) in [materials(), fov(), final_scene(&mut random::seeded_rng(Some(1)))] {
            camera.initialize().unwrap();
            assert_eq!(camera.image_height(), 450);
        }
    }
}
