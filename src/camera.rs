//! Camera for ray generation and scene rendering

use std::io::Write;
use std::time::Instant;

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::Rng;

use crate::error::{RenderError, Result};
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::material::Color;
use crate::output;
use crate::random;
use crate::ray::{Point3, Ray};

/// Minimum hit distance for scattered rays; keeps them off their own surface.
pub const SHADOW_ACNE_EPSILON: f32 = 1e-3;

/// Camera for ray generation and scene rendering.
///
/// Thin-lens camera with box-filtered anti-aliasing. The public fields are the
/// configuration; everything else is derived by [`Camera::initialize`], which
/// every render entry point runs first.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Point3,
    /// Point camera is looking at (look target)
    pub lookat: Point3,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel (defocus blur control)
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
    /// Seed for the render's random generator; `None` picks a fresh one
    pub seed: Option<u64>,

    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Color scale factor for a sum of pixel samples (1.0 / samples_per_pixel)
    pixel_samples_scale: f32,
    /// Camera position in world space (same as lookfrom)
    center: Point3,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Point3,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
    /// Flag to track whether camera parameters have been calculated
    initialized: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 16:9, 100 pixels wide, 10 samples per pixel, 10 bounces,
    /// 90° FOV looking down -Z from the origin, no defocus blur.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: None,
            image_height: 1,
            pixel_samples_scale: 1.0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Image height in pixels. Only meaningful after [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Whether derived parameters are up to date with a completed initialize.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Renders the scene as a plain-text PPM image written to `out`.
    ///
    /// Scanlines go top to bottom, pixels left to right.
    pub fn render<W: Write + ?Sized>(&mut self, world: &dyn Hittable, out: &mut W) -> Result<()> {
        self.initialize()?;
        output::write_ppm_header(out, self.image_width, self.image_height)?;
        self.trace_pixels(world, |_, _, pixel_color| output::write_color(&mut *out, pixel_color))?;
        out.flush()?;
        Ok(())
    }

    /// Renders the scene into an HDR image buffer with linear f32 RGB values.
    pub fn render_image(
        &mut self,
        world: &dyn Hittable,
    ) -> Result<ImageBuffer<Rgb<f32>, Vec<f32>>> {
        self.initialize()?;
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);
        self.trace_pixels(world, |i, j, pixel_color| {
            image.put_pixel(i, j, Rgb([pixel_color.x, pixel_color.y, pixel_color.z]));
            Ok(())
        })?;
        Ok(image)
    }

    /// Sample every pixel in stream order and hand the averaged color to `emit`.
    fn trace_pixels<F>(&self, world: &dyn Hittable, mut emit: F) -> Result<()>
    where
        F: FnMut(u32, u32, Color) -> Result<()>,
    {
        let mut rng = random::seeded_rng(self.seed);

        info!(
            "Rendering {}x{} with {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let render_start = Instant::now();
        let pb = ProgressBar::new(u64::from(self.image_height));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg} {bar:40} {pos}/{len} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        for j in 0..self.image_height {
            pb.set_message(format!("Scanlines remaining: {}", self.image_height - j));
            let scanline_start = Instant::now();

            for i in 0..self.image_width {
                let mut pixel_color = Color::ZERO;
                for _sample in 0..self.samples_per_pixel {
                    let r = self.get_ray(i, j, &mut rng)?;
                    pixel_color += self.ray_color(&r, self.max_depth, world, &mut rng)?;
                }
                emit(i, j, self.pixel_samples_scale * pixel_color)?;
            }

            pb.inc(1);
            debug!("Scanline {} took {:.2?}", j, scanline_start.elapsed());
        }

        pb.finish_and_clear();
        info!("Image rendered in {:.2?}", render_start.elapsed());
        Ok(())
    }

    /// Derive image height, camera frame, viewport and defocus disk from the
    /// configuration fields.
    ///
    /// Recomputes everything on every call. Rejects configurations that
    /// cannot produce an image.
    pub fn initialize(&mut self) -> Result<()> {
        self.initialized = false;

        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image width must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig("samples per pixel must be at least 1".into()));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::InvalidConfig(format!(
                "aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }

        self.image_height = ((self.image_width as f32 / self.aspect_ratio) as u32).max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
        Ok(())
    }

    /// Generate a ray through pixel (i, j) with random sampling.
    ///
    /// The target is jittered within the pixel for anti-aliasing; the origin
    /// is sampled from the defocus disk when the defocus angle is positive.
    pub fn get_ray<R: Rng + ?Sized>(&self, i: u32, j: u32, rng: &mut R) -> Result<Ray> {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)?
        };
        let ray_direction = pixel_sample - ray_origin;

        Ok(Ray::new(ray_origin, ray_direction))
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point3> {
        let p = random::random_in_unit_disk(rng)?;
        Ok(self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v))
    }

    /// Trace a ray and compute its color contribution.
    ///
    /// Recursively follows ray bounces through the scene, sampling materials
    /// to determine color and next ray direction. Returns sky color if no hit
    /// and black once `depth` bounces are used up.
    pub fn ray_color<R: Rng + ?Sized>(
        &self,
        r: &Ray,
        depth: u32,
        world: &dyn Hittable,
        rng: &mut R,
    ) -> Result<Color> {
        if depth == 0 {
            return Ok(Color::ZERO);
        }

        if let Some(rec) = world.hit(r, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) {
            return match rec.material.scatter(r, &rec, rng)? {
                Some(scatter) => {
                    let incoming = self.ray_color(&scatter.scattered, depth - 1, world, rng)?;
                    Ok(scatter.attenuation * incoming)
                }
                None => Ok(Color::ZERO),
            };
        }

        Ok(sky_color(r))
    }
}

/// Generate random offset within the [-0.5, 0.5) square for pixel sampling.
fn sample_square<R: Rng + ?Sized>(rng: &mut R) -> Vec3A {
    let x = random::random_f32(rng) - 0.5;
    let y = random::random_f32(rng) - 0.5;
    Vec3A::new(x, y, 0.0)
}

/// Vertical white to light-blue gradient seen by rays that escape the scene.
pub fn sky_color(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}
