//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). Materials are immutable and shared between
//! surfaces through `Arc`.

use std::sync::Arc;

use glam::Vec3A;
use rand::Rng;

use crate::error::Result;
use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// Linear RGB color, stored in the same SIMD vector as points and directions.
pub type Color = Vec3A;

/// Outcome of a ray scattering off a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel factor applied to the light gathered along `scattered`.
    pub attenuation: Color,
    /// Continuation ray leaving the hit point.
    pub scattered: Ray,
}

/// Surface material.
///
/// A closed set of scattering models dispatched by `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness in [0, 1] (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },
}

impl Material {
    /// Shared diffuse material.
    pub fn lambertian(albedo: Color) -> Arc<Self> {
        Arc::new(Material::Lambertian { albedo })
    }

    /// Shared metal material; `fuzz` is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Arc<Self> {
        Arc::new(Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        })
    }

    /// Shared dielectric material.
    pub fn dielectric(refraction_index: f32) -> Arc<Self> {
        Arc::new(Material::Dielectric { refraction_index })
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `Ok(None)` when the ray is absorbed. Errors only come from a
    /// broken random source.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        rng: &mut R,
    ) -> Result<Option<Scatter>> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, rec, rng).map(Some),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                Ok(Some(scatter_dielectric(refraction_index, r_in, rec, rng)))
            }
        }
    }
}

/// Lambertian diffuse scattering: the normal offset by a random unit vector.
fn scatter_lambertian<R: Rng + ?Sized>(
    albedo: Color,
    rec: &HitRecord,
    rng: &mut R,
) -> Result<Scatter> {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng)?;

    // Catch degenerate scatter direction (very close to zero)
    if scatter_direction.length() < 1e-8 {
        scatter_direction = rec.normal;
    }

    Ok(Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    })
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal<R: Rng + ?Sized>(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Result<Option<Scatter>> {
    let reflected = reflect(r_in.direction, rec.normal).normalize()
        + fuzz * random::random_unit_vector(rng)?;

    // Fuzz pushed the ray below the surface
    if reflected.dot(rec.normal) <= 0.0 {
        return Ok(None);
    }

    Ok(Some(Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, reflected),
    }))
}

/// Dielectric scattering, choosing reflection or refraction by Schlick reflectance.
fn scatter_dielectric<R: Rng + ?Sized>(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Scatter {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Scatter {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    }
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through an interface using Snell's law.
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Compute Fresnel reflectance using Schlick's approximation.
pub fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::RngCore;

    fn hit_on<'a>(material: &'a Material, r: &Ray, outward_normal: Vec3A) -> HitRecord<'a> {
        HitRecord::new(r, 1.0, r.at(1.0), outward_normal, material)
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        let rough = Material::Metal { albedo: Color::ONE, fuzz: 1.0 };
        let mirror = Material::Metal { albedo: Color::ONE, fuzz: 0.0 };
        assert_eq!(*Material::metal(Color::ONE, 3.0), rough);
        assert_eq!(*Material::metal(Color::ONE, -1.0), mirror);
    }

    #[test]
    fn test_lambertian_keeps_albedo_and_origin() {
        let albedo = Color::new(0.2, 0.4, 0.8);
        let material = Material::Lambertian { albedo };
        let r = Ray::new(Vec3A::new(0.0, 0.0, 0.0), Vec3A::new(0.0, 0.0, -1.0));
        let rec = hit_on(&material, &r, Vec3A::Z);
        let mut rng = seeded_rng(Some(1));

        for _ in 0..100 {
            let scatter = material.scatter(&r, &rec, &mut rng).unwrap().unwrap();
            assert_eq!(scatter.attenuation, albedo);
            assert_eq!(scatter.scattered.origin, rec.p);
            assert!(scatter.scattered.direction.length() > 0.0);
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Material::Metal { albedo: Color::new(0.8, 0.8, 0.8), fuzz: 0.0 };
        let d = Vec3A::new(1.0, -1.0, 0.0);
        let r = Ray::new(Vec3A::new(-1.0, 1.0, 0.0), d);
        let rec = hit_on(&material, &r, Vec3A::Y);
        let mut rng = seeded_rng(Some(2));

        let scatter = material.scatter(&r, &rec, &mut rng).unwrap().unwrap();
        let expected = (d - 2.0 * d.dot(rec.normal) * rec.normal).normalize();
        assert_abs_diff_eq!(scatter.scattered.direction, expected, epsilon = 1e-6);
        assert_eq!(scatter.attenuation, Color::new(0.8, 0.8, 0.8));
    }

    #[test]
    fn test_metal_grazing_fuzz_can_absorb() {
        // Nearly grazing reflection with maximal fuzz must dip below the surface sometimes
        let material = Material::Metal { albedo: Color::ONE, fuzz: 1.0 };
        let r = Ray::new(Vec3A::new(-1.0, 0.001, 0.0), Vec3A::new(1.0, -0.001, 0.0));
        let rec = hit_on(&material, &r, Vec3A::Y);
        let mut rng = seeded_rng(Some(9));

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&r, &rec, &mut rng).unwrap() {
                Some(scatter) => assert!(scatter.scattered.direction.dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_normal_incidence_refracts() {
        let r = Ray::new(Vec3A::new(0.0, 0.0, 1.0), Vec3A::new(0.0, 0.0, -1.0));
        let unit_direction = r.direction.normalize();
        let cos_theta = (-unit_direction).dot(Vec3A::Z).min(1.0);
        assert_eq!(cos_theta, 1.0);

        let ri = 1.0 / 1.5;
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        assert!(ri * sin_theta <= 1.0);

        let r0 = ((1.0 - ri) / (1.0 + ri)).powi(2);
        assert_relative_eq!(reflectance(cos_theta, ri), r0);

        // Straight through, no bending
        assert_abs_diff_eq!(refract(unit_direction, Vec3A::Z, ri), unit_direction, epsilon = 1e-6);
    }

    #[test]
    fn test_dielectric_always_scatters_without_absorption() {
        let material = Material::Dielectric { refraction_index: 1.5 };
        let r = Ray::new(Vec3A::new(0.0, 1.0, 1.0), Vec3A::new(0.0, -1.0, -1.0));
        let rec = hit_on(&material, &r, Vec3A::Z);
        let mut rng = seeded_rng(Some(4));

        for _ in 0..100 {
            let scatter = material.scatter(&r, &rec, &mut rng).unwrap().unwrap();
            assert_eq!(scatter.attenuation, Color::ONE);
            assert_eq!(scatter.scattered.origin, rec.p);
        }
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving glass at 60 degrees: 1.5 * sin(60) > 1, so every sample reflects
        let material = Material::Dielectric { refraction_index: 1.5 };
        let d = Vec3A::new(60f32.to_radians().sin(), 60f32.to_radians().cos(), 0.0);
        let r = Ray::new(-d, d);
        // Outward normal along +Y makes this a back-face hit
        let rec = hit_on(&material, &r, Vec3A::Y);
        assert!(!rec.front_face);
        let mut rng = seeded_rng(Some(6));

        let expected = reflect(d, rec.normal);
        for _ in 0..50 {
            let scatter = material.scatter(&r, &rec, &mut rng).unwrap().unwrap();
            assert_abs_diff_eq!(scatter.scattered.direction, expected, epsilon = 1e-6);
        }
    }

    /// Replays a fixed list of `next_u32` draws, then repeats the last one.
    struct ScriptedRng {
        draws: Vec<u32>,
        next: usize,
    }

    impl ScriptedRng {
        fn new(draws: &[u32]) -> Self {
            Self { draws: draws.to_vec(), next: 0 }
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            let draw = self.draws[self.next.min(self.draws.len() - 1)];
            self.next += 1;
            draw
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_lambertian_degenerate_direction_falls_back_to_normal() {
        // Cube draws map to (0, 0, -1), a unit vector exactly opposite the normal
        const DRAWS: [u32; 3] = [0x8000_0000, 0x8000_0000, 0];
        let unit = crate::random::random_unit_vector(&mut ScriptedRng::new(&DRAWS)).unwrap();
        assert_eq!(unit, Vec3A::NEG_Z);

        let material = Material::Lambertian { albedo: Color::splat(0.5) };
        let r = Ray::new(Vec3A::new(0.0, 0.0, 1.0), Vec3A::NEG_Z);
        let rec = hit_on(&material, &r, Vec3A::Z);
        assert_eq!(rec.normal, Vec3A::Z);

        let mut rng = ScriptedRng::new(&DRAWS);
        let scatter = material.scatter(&r, &rec, &mut rng).unwrap().unwrap();
        assert_eq!(scatter.scattered.direction, rec.normal);
        assert_eq!(scatter.scattered.origin, rec.p);
    }

    #[test]
    fn test_scatter_propagates_sampling_failure() {
        let material = Material::Lambertian { albedo: Color::ONE };
        let r = Ray::new(Vec3A::ZERO, Vec3A::NEG_Z);
        let rec = hit_on(&material, &r, Vec3A::Z);
        assert!(material.scatter(&r, &rec, &mut crate::random::tests::StuckRng).is_err());
    }
}
