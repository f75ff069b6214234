//! raylight path tracer
//!
//! Monte Carlo ray tracing of sphere scenes: a thin-lens camera samples rays
//! per pixel, bounces them off Lambertian, metal and dielectric surfaces, and
//! streams the gamma-corrected result as a plain-text PPM image.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod sphere;

pub use camera::Camera;
pub use error::{RenderError, Result};
pub use hittable::{HitRecord, Hittable, HittableList, Surface};
pub use interval::Interval;
pub use material::{Color, Material, Scatter};
pub use ray::{Point3, Ray};
pub use sphere::Sphere;
