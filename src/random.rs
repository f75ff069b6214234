//! Random sampling for ray tracing.
//!
//! Every function draws from a caller-owned generator, so a render is
//! reproducible from its seed. Rejection samplers are bounded and report
//! [`RenderError::SamplingExhausted`] instead of spinning forever.

use glam::Vec3A;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::error::{RenderError, Result};

/// Maximum number of candidates a rejection sampler draws before giving up.
pub const MAX_REJECTION_ATTEMPTS: usize = 1000;

/// Build the ChaCha20 generator used by the render loop.
///
/// A fixed seed gives byte-identical renders; `None` seeds from the thread RNG.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_rng(&mut rand::rng()),
    }
}

/// Generate a random f32 in [0.0, 1.0)
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random()
}

/// Generate a random f32 in [min, max)
pub fn random_f32_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Generate a random Vec3A with components in [0.0, 1.0)
pub fn random_vec3a<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    let x = random_f32(rng);
    let y = random_f32(rng);
    let z = random_f32(rng);
    Vec3A::new(x, y, z)
}

/// Generate random Vec3A with components in [min, max).
pub fn random_vec3a_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3A {
    Vec3A::splat(min) + Vec3A::splat(max - min) * random_vec3a(rng)
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    random_vec3a(rng)
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3A {
    random_vec3a_range(rng, min, max)
}

/// Generate random unit vector uniformly distributed on the unit sphere.
///
/// Candidates are drawn from the [-1, 1) cube and kept only when they fall
/// inside the unit ball, away from the origin, then normalized.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec3A> {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = random_vec3a_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        if 1e-8 < len_sq && len_sq <= 1.0 {
            return Ok(p / len_sq.sqrt());
        }
    }
    Err(RenderError::SamplingExhausted {
        sampler: "random_unit_vector",
        attempts: MAX_REJECTION_ATTEMPTS,
    })
}

/// Generate random vector on hemisphere oriented by the given normal.
pub fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3A) -> Result<Vec3A> {
    let on_unit_sphere = random_unit_vector(rng)?;
    if on_unit_sphere.dot(normal) > 0.0 {
        Ok(on_unit_sphere)
    } else {
        Ok(-on_unit_sphere)
    }
}

/// Generate random point inside the unit disk (z = 0) using rejection sampling.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec3A> {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let x = random_f32_range(rng, -1.0, 1.0);
        let y = random_f32_range(rng, -1.0, 1.0);
        let p = Vec3A::new(x, y, 0.0);
        if p.length_squared() < 1.0 {
            return Ok(p);
        }
    }
    Err(RenderError::SamplingExhausted {
        sampler: "random_in_unit_disk",
        attempts: MAX_REJECTION_ATTEMPTS,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::RngCore;

    /// Generator stuck at zero: every f32 draw is 0.0, so every cube sample
    /// lands on the (-1, -1, -1) corner and is rejected.
    pub(crate) struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn test_ranges() {
        let mut rng = seeded_rng(Some(7));
        for _ in 0..1000 {
            let x = random_f32(&mut rng);
            assert!((0.0..1.0).contains(&x));

            let y = random_f32_range(&mut rng, -3.0, 2.0);
            assert!((-3.0..2.0).contains(&y));

            let c = random_color_range(&mut rng, 0.5, 1.0);
            assert!(c.min_element() >= 0.5 && c.max_element() < 1.0);
        }
    }

    #[test]
    fn test_unit_vector_has_unit_length() {
        let mut rng = seeded_rng(Some(11));
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng).unwrap();
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_hemisphere_follows_normal() {
        let mut rng = seeded_rng(Some(3));
        let normal = Vec3A::new(0.0, 0.0, 1.0);
        for _ in 0..1000 {
            let v = random_on_hemisphere(&mut rng, normal).unwrap();
            assert!(v.dot(normal) >= 0.0);
        }
    }

    #[test]
    fn test_unit_disk_stays_in_plane() {
        let mut rng = seeded_rng(Some(5));
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng).unwrap();
            assert_eq!(p.z, 0.0);
            assert!(p.length_squared() < 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        for _ in 0..16 {
            assert_eq!(random_f32(&mut a), random_f32(&mut b));
        }
    }

    #[test]
    fn test_stuck_generator_is_fatal() {
        let err = random_unit_vector(&mut StuckRng).unwrap_err();
        assert!(matches!(
            err,
            RenderError::SamplingExhausted {
                sampler: "random_unit_vector",
                attempts: MAX_REJECTION_ATTEMPTS
            }
        ));

        // (-1, -1, 0) is outside the disk as well
        assert!(random_in_unit_disk(&mut StuckRng).is_err());
    }
}
