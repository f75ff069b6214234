//! Ray-object intersection system.
//!
//! Defines the Hittable trait, the closed [`Surface`] set it is implemented
//! over, and HitRecord for storing intersection data.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::{Point3, Ray};
use crate::sphere::Sphere;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, and material data
/// needed for shading calculations.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: Point3,
    /// Unit surface normal, always facing against the incident ray
    pub normal: Vec3A,
    /// Ray parameter of the intersection point
    pub t: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t`, orienting the normal against `r`.
    ///
    /// `outward_normal` must be unit length and point out of the surface.
    pub fn new(r: &Ray, t: f32, p: Point3, outward_normal: Vec3A, material: &'a Material) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// Ensures normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
pub trait Hittable: Sync + Send {
    /// Find the nearest intersection whose parameter lies strictly inside `ray_t`.
    fn hit<'a>(&'a self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// Every kind of surface a scene can contain.
#[derive(Debug, Clone)]
pub enum Surface {
    /// A single analytic sphere.
    Sphere(Sphere),
    /// A nested aggregate of surfaces.
    List(HittableList),
}

impl From<Sphere> for Surface {
    fn from(sphere: Sphere) -> Self {
        Surface::Sphere(sphere)
    }
}

impl From<HittableList> for Surface {
    fn from(list: HittableList) -> Self {
        Surface::List(list)
    }
}

impl Hittable for Surface {
    fn hit<'a>(&'a self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Surface::Sphere(sphere) => sphere.hit(r, ray_t),
            Surface::List(list) => list.hit(r, ray_t),
        }
    }
}

/// Collection of objects forming a scene.
///
/// Uses a single linear pass for intersection testing.
#[derive(Debug, Clone, Default)]
pub struct HittableList {
    /// Member surfaces in insertion order
    pub objects: Vec<Surface>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: impl Into<Surface>) {
        self.objects.push(object.into());
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the list has no members.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
