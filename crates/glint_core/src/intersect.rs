//! Closed-form ray/primitive intersection.
//!
//! Both routines share one contract: `t` holds the nearest distance found so
//! far, and a test only succeeds (overwriting `t`) when it finds a hit in
//! front of the ray that is no farther than `t`. A scene can therefore run
//! every primitive against a single accumulator.

use glint_math::{Ray, Vec3};

use crate::primitive::{plane_normal, Axis};

/// Intersect a ray with a sphere.
///
/// Distances are in units of the ray direction, so they are Euclidean for a
/// unit direction. Roots behind the origin are discarded; when the origin is
/// inside the sphere the far root is the hit.
pub fn intersect_sphere(t: &mut f32, ray: &Ray, center: Vec3, radius: f32) -> bool {
    // Standard quadratic with a unit direction: d^2 + 2bd + c = 0
    let oc = ray.origin - center;
    let b = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return false;
    }

    let sqrtd = discriminant.sqrt();
    let behind = |d: f32| if d < 0.0 { f32::INFINITY } else { d };
    let d = behind(-b - sqrtd).min(behind(-b + sqrtd));

    // Both roots behind the origin
    if d == f32::INFINITY {
        return false;
    }

    if d < 0.0 || d > *t {
        return false;
    }

    *t = d;
    true
}

/// Intersect a ray with the axis-aligned plane `axis = offset`.
///
/// A ray exactly parallel to the plane never hits it. The comparison is exact.
pub fn intersect_plane(t: &mut f32, ray: &Ray, axis: Axis, offset: f32) -> bool {
    let point = axis.unit() * offset;
    let normal = plane_normal(axis, offset);

    let denom = ray.direction.dot(normal);
    if denom == 0.0 {
        return false;
    }

    let d = (point - ray.origin).dot(normal) / denom;

    // Behind the ray, or something closer already hit
    if d < 0.0 || d > *t {
        return false;
    }

    *t = d;
    true
}
