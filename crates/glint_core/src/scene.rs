//! The scene: primitives, camera, light and the shading model.
//!
//! The scene is the single mutable aggregate. Editors change its public
//! fields between renders; queries borrow it immutably and never hold on to
//! anything inside it.

use glint_math::{reflect, Color, Ray, Vec3};

use crate::error::{SceneError, SceneResult};
use crate::primitive::{Axis, Primitive};
use crate::shading::{bounce_blend, surface_shade, ShadingModel, SHADOW_EPSILON};

/// Which primitive list a [`PrimitiveRef`] points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Plane,
    Sphere,
}

/// Index of a primitive inside a scene.
///
/// Only meaningful for the scene and the edit state that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveRef {
    pub kind: PrimitiveKind,
    pub index: usize,
}

impl PrimitiveRef {
    pub fn plane(index: usize) -> Self {
        Self {
            kind: PrimitiveKind::Plane,
            index,
        }
    }

    pub fn sphere(index: usize) -> Self {
        Self {
            kind: PrimitiveKind::Sphere,
            index,
        }
    }
}

/// Result of a nearest-hit query.
///
/// `position` and `normal` are only meaningful when `primitive` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub primitive: Option<PrimitiveRef>,
    pub distance: f32,
    pub position: Vec3,
    pub normal: Vec3,
}

impl Hit {
    fn miss(distance: f32) -> Self {
        Self {
            primitive: None,
            distance,
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.primitive.is_some()
    }
}

/// A complete scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Camera position; the camera always looks down +Z
    pub camera: Vec3,

    /// Point light position
    pub light: Vec3,

    /// Planes, tested before spheres
    pub planes: Vec<Primitive>,

    pub spheres: Vec<Primitive>,

    pub shading_model: ShadingModel,

    /// Bounce hits at or beyond this distance contribute nothing
    pub gi_max_distance: f32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub const DEFAULT_CAMERA: Vec3 = Vec3::new(0.0, 0.0, -6.0);
    pub const DEFAULT_LIGHT: Vec3 = Vec3::new(2.0, 2.0, 0.0);
    pub const DEFAULT_GI_MAX_DISTANCE: f32 = 4.0;

    /// Create an empty scene with the default camera and light.
    pub fn new() -> Self {
        Self {
            camera: Self::DEFAULT_CAMERA,
            light: Self::DEFAULT_LIGHT,
            planes: Vec::new(),
            spheres: Vec::new(),
            shading_model: ShadingModel::default(),
            gi_max_distance: Self::DEFAULT_GI_MAX_DISTANCE,
        }
    }

    /// The demo box: five walls, two spheres.
    pub fn default_scene() -> Self {
        let mut scene = Self::new();
        scene.add_plane(Axis::Y, -2.0, Color::WHITE);
        scene.add_plane(Axis::Y, 2.0, Color::WHITE);
        scene.add_plane(Axis::Z, 2.0, Color::WHITE);
        scene.add_plane(Axis::X, -2.0, Color::RED);
        scene.add_plane(Axis::X, 2.0, Color::GREEN);

        scene.add_sphere(Vec3::new(-1.0, -1.0, -0.5), 1.0, Color::CYAN);
        scene.add_sphere(Vec3::new(1.0, -1.0, 0.5), 1.0, Color::YELLOW);
        scene
    }

    /// Replace everything with the demo box.
    pub fn reset_to_default(&mut self) {
        *self = Self::default_scene();
        log::info!("Scene reset to default ({} primitives)", self.primitive_count());
    }

    /// Remove all primitives, keeping camera, light and shading settings.
    pub fn clear(&mut self) {
        self.planes.clear();
        self.spheres.clear();
    }

    /// Add a sphere named after its position in the list.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, color: Color) -> PrimitiveRef {
        let index = self.spheres.len();
        self.spheres
            .push(Primitive::sphere(format!("Sphere {index}"), center, radius, color));
        PrimitiveRef::sphere(index)
    }

    /// Add a plane named after its position in the list.
    pub fn add_plane(&mut self, axis: Axis, offset: f32, color: Color) -> PrimitiveRef {
        let index = self.planes.len();
        self.planes
            .push(Primitive::plane(format!("Plane {index}"), axis, offset, color));
        PrimitiveRef::plane(index)
    }

    pub fn primitive_count(&self) -> usize {
        self.planes.len() + self.spheres.len()
    }

    /// All primitives in test order: planes, then spheres.
    pub fn primitives(&self) -> impl Iterator<Item = (PrimitiveRef, &Primitive)> {
        let planes = self
            .planes
            .iter()
            .enumerate()
            .map(|(i, p)| (PrimitiveRef::plane(i), p));
        let spheres = self
            .spheres
            .iter()
            .enumerate()
            .map(|(i, p)| (PrimitiveRef::sphere(i), p));
        planes.chain(spheres)
    }

    pub fn primitive(&self, r: PrimitiveRef) -> Option<&Primitive> {
        match r.kind {
            PrimitiveKind::Plane => self.planes.get(r.index),
            PrimitiveKind::Sphere => self.spheres.get(r.index),
        }
    }

    pub fn primitive_mut(&mut self, r: PrimitiveRef) -> Option<&mut Primitive> {
        match r.kind {
            PrimitiveKind::Plane => self.planes.get_mut(r.index),
            PrimitiveKind::Sphere => self.spheres.get_mut(r.index),
        }
    }

    /// Find the first primitive with the given name.
    pub fn find(&self, name: &str) -> Option<PrimitiveRef> {
        self.primitives()
            .find(|(_, p)| p.name == name)
            .map(|(r, _)| r)
    }

    /// Check every primitive and the scene parameters for values that would
    /// poison shading with NaNs.
    pub fn validate(&self) -> SceneResult<()> {
        if !self.camera.is_finite() {
            return Err(SceneError::invalid_geometry("camera", "position is not finite"));
        }
        if !self.light.is_finite() {
            return Err(SceneError::invalid_geometry("light", "position is not finite"));
        }
        if !self.gi_max_distance.is_finite() || self.gi_max_distance <= 0.0 {
            return Err(SceneError::invalid_geometry(
                "scene",
                format!("gi_max_distance must be positive, got {}", self.gi_max_distance),
            ));
        }

        for (_, primitive) in self.primitives() {
            primitive.validate()?;
        }
        Ok(())
    }

    /// Nearest hit along the ray no farther than `max_distance`.
    ///
    /// Planes are tested before spheres and a later primitive wins an exact
    /// tie, so a sphere touching a plane at the same distance takes the hit.
    pub fn intersect(&self, ray: &Ray, max_distance: f32) -> Hit {
        let mut distance = max_distance;
        let mut nearest = None;

        for (r, primitive) in self.primitives() {
            if primitive.intersect(ray, &mut distance) {
                nearest = Some((r, primitive));
            }
        }

        match nearest {
            Some((r, primitive)) => {
                let position = ray.at(distance);
                Hit {
                    primitive: Some(r),
                    distance,
                    position,
                    normal: primitive.normal_at(position),
                }
            }
            None => Hit::miss(max_distance),
        }
    }

    /// [`Scene::intersect`] bounded only by the largest finite float.
    pub fn intersect_nearest(&self, ray: &Ray) -> Hit {
        self.intersect(ray, f32::MAX)
    }

    /// Color seen along a camera ray under the current shading model.
    ///
    /// Misses are fully transparent. An unknown model shades magenta.
    /// Under [`ShadingModel::LambertShadow`], flat primitives are never
    /// shadowed: they keep their raw color even when an occluder blocks the light.
    pub fn shade(&self, ray: &Ray) -> Color {
        let hit = self.intersect(ray, f32::INFINITY);
        let Some(primitive) = hit.primitive.and_then(|r| self.primitive(r)) else {
            return Color::TRANSPARENT;
        };

        match self.shading_model {
            ShadingModel::Lambert => self.surface_shade(primitive, &hit),
            ShadingModel::LambertShadow => {
                if !primitive.flat && self.occluded(hit.position) {
                    Color::BLACK
                } else {
                    self.surface_shade(primitive, &hit)
                }
            }
            ShadingModel::GiNormal => self.shade_bounce(primitive, &hit, hit.normal),
            ShadingModel::GiReflect => {
                let direction = reflect(ray.direction, hit.normal);
                self.shade_bounce(primitive, &hit, direction)
            }
            ShadingModel::Unknown(_) => Color::MAGENTA,
        }
    }

    /// Lambert shade of a hit against this scene's light.
    pub fn surface_shade(&self, primitive: &Primitive, hit: &Hit) -> Color {
        surface_shade(primitive, self.light, hit.position, hit.normal)
    }

    /// Whether anything sits between the point and the light.
    pub fn occluded(&self, position: Vec3) -> bool {
        let to_light = self.light - position;
        let light_distance = to_light.length();
        let shadow_ray = Ray::new(position, to_light.normalize_or_zero()).nudged(SHADOW_EPSILON);

        self.intersect(&shadow_ray, light_distance - 2.0 * SHADOW_EPSILON)
            .is_hit()
    }

    /// Lambert shade plus one bounce, blended by how close the bounce hit is.
    fn shade_bounce(&self, primitive: &Primitive, hit: &Hit, direction: Vec3) -> Color {
        let base = self.surface_shade(primitive, hit);

        let bounce_ray = Ray::new(hit.position, direction).nudged(SHADOW_EPSILON);
        let bounce = self.intersect(&bounce_ray, self.gi_max_distance);

        match bounce.primitive.and_then(|r| self.primitive(r)) {
            Some(bounced) => bounce_blend(base, bounced.color, bounce.distance, self.gi_max_distance),
            None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_color_near(a: Color, b: Color) {
        let diff = (a - b).to_array();
        assert!(diff.iter().all(|d| d.abs() < 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_scene_layout() {
        let scene = Scene::default_scene();
        assert_eq!(scene.planes.len(), 5);
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.camera, Vec3::new(0.0, 0.0, -6.0));
        assert_eq!(scene.light, Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(scene.find("Plane 3"), Some(PrimitiveRef::plane(3)));
        assert_eq!(scene.find("Sphere 1"), Some(PrimitiveRef::sphere(1)));
        assert_eq!(scene.find("Cube 0"), None);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_nearest_of_overlapping_spheres() {
        let mut scene = Scene::new();
        let far = scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.5, Color::RED);
        let near = scene.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.5, Color::BLUE);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.intersect_nearest(&ray);

        assert_eq!(hit.primitive, Some(near));
        assert_ne!(hit.primitive, Some(far));
        assert!((hit.distance - 1.5).abs() < EPS);
        assert!((hit.position - Vec3::new(0.0, 0.0, 1.5)).length() < EPS);
        assert!((hit.normal + Vec3::Z).length() < EPS);
    }

    #[test]
    fn test_nothing_in_front_is_a_miss() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0, Color::RED);
        scene.add_plane(Axis::Z, -3.0, Color::WHITE);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!scene.intersect_nearest(&ray).is_hit());
        assert!(!scene.intersect(&ray, f32::INFINITY).is_hit());
    }

    #[test]
    fn test_max_distance_bounds_query() {
        let mut scene = Scene::new();
        scene.add_plane(Axis::Z, 4.0, Color::WHITE);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!scene.intersect(&ray, 3.0).is_hit());
        assert!(scene.intersect(&ray, 5.0).is_hit());
    }

    #[test]
    fn test_sphere_wins_exact_tie_with_plane() {
        let mut scene = Scene::new();
        let plane = scene.add_plane(Axis::Z, 2.0, Color::WHITE);
        // Sphere surface touches the plane where the ray hits it
        let sphere = scene.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, Color::RED);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let hit = scene.intersect_nearest(&ray);
        assert_eq!(hit.primitive, Some(sphere));
        assert_ne!(hit.primitive, Some(plane));
        assert_eq!(hit.distance, 2.0);
    }

    #[test]
    fn test_empty_scene_shades_transparent() {
        let scene = Scene::new();
        for model in ShadingModel::ALL {
            let mut scene = scene.clone();
            scene.shading_model = model;
            assert_eq!(scene.shade(&Ray::new(Vec3::ZERO, Vec3::Z)), Color::TRANSPARENT);
        }
    }

    #[test]
    fn test_shade_is_idempotent() {
        let mut scene = Scene::default_scene();
        let ray = Ray::towards(scene.camera, Vec3::new(0.3, -0.8, 0.0));

        for model in ShadingModel::ALL {
            scene.shading_model = model;
            assert_eq!(scene.shade(&ray), scene.shade(&ray));
        }
    }

    #[test]
    fn test_unknown_model_is_magenta() {
        let mut scene = Scene::default_scene();
        scene.shading_model = ShadingModel::from(42);
        let ray = Ray::new(scene.camera, Vec3::Z);
        assert_eq!(scene.shade(&ray), Color::MAGENTA);
    }

    #[test]
    fn test_flat_ignores_light_position() {
        let mut scene = Scene::new();
        let r = scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, Color::new(0.3, 0.5, 0.7, 0.9));
        scene.add_sphere(Vec3::new(0.0, 3.0, 5.0), 1.0, Color::WHITE);
        if let Some(sphere) = scene.primitive_mut(r) {
            sphere.flat = true;
        }

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        for model in [ShadingModel::Lambert, ShadingModel::LambertShadow] {
            scene.shading_model = model;
            for light in [Vec3::new(0.0, 10.0, 5.0), Vec3::new(0.0, 0.0, -10.0), Vec3::new(9.0, -9.0, 20.0)] {
                scene.light = light;
                assert_eq!(scene.shade(&ray), Color::new(0.3, 0.5, 0.7, 0.9));
            }
        }
    }

    #[test]
    fn test_shadow_blocks_light() {
        let mut scene = Scene::new();
        scene.add_plane(Axis::Y, -2.0, Color::WHITE);
        // Blocker directly between the floor hit point and the light
        scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.5, Color::RED);
        scene.light = Vec3::new(0.0, 4.0, 0.0);
        scene.camera = Vec3::new(0.0, 0.0, -6.0);

        let ray = Ray::towards(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, -2.0, 0.0));

        scene.shading_model = ShadingModel::Lambert;
        let lit = scene.shade(&ray);
        assert!(lit.r > 0.9);

        scene.shading_model = ShadingModel::LambertShadow;
        assert_eq!(scene.shade(&ray), Color::BLACK);

        // Move the blocker aside
        scene.spheres[0].shape = crate::Shape::Sphere {
            center: Vec3::new(5.0, 1.0, 0.0),
            radius: 0.5,
        };
        assert_color_near(scene.shade(&ray), lit);
    }

    #[test]
    fn test_flat_primitive_is_never_shadowed() {
        let mut scene = Scene::new();
        let floor = scene.add_plane(Axis::Y, -2.0, Color::new(0.2, 0.4, 0.6, 1.0));
        scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.5, Color::RED);
        scene.light = Vec3::new(0.0, 4.0, 0.0);
        scene.shading_model = ShadingModel::LambertShadow;

        let ray = Ray::towards(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, -2.0, 0.0));
        assert!(scene.occluded(scene.intersect_nearest(&ray).position));
        assert_eq!(scene.shade(&ray), Color::BLACK);

        if let Some(plane) = scene.primitive_mut(floor) {
            plane.flat = true;
        }
        assert_eq!(scene.shade(&ray), Color::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn test_shadow_ignores_objects_behind_light() {
        let mut scene = Scene::new();
        scene.add_plane(Axis::Y, -2.0, Color::WHITE);
        scene.add_plane(Axis::Y, 2.0, Color::WHITE);
        scene.light = Vec3::new(0.0, 1.0, 0.0);
        scene.shading_model = ShadingModel::LambertShadow;

        let ray = Ray::towards(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, -2.0, 0.0));
        assert_ne!(scene.shade(&ray), Color::BLACK);
    }

    #[test]
    fn test_gi_normal_bounce_blends_toward_neighbor() {
        let mut scene = Scene::new();
        scene.add_plane(Axis::Y, -2.0, Color::WHITE);
        scene.light = Vec3::new(0.0, 10.0, 0.0);
        scene.gi_max_distance = 4.0;

        let ray = Ray::towards(Vec3::new(0.0, 0.0, -6.0), Vec3::new(0.0, -2.0, 0.0));
        scene.shading_model = ShadingModel::Lambert;
        let base = scene.shade(&ray);

        // Nothing above the floor to bounce into
        scene.shading_model = ShadingModel::GiNormal;
        assert_color_near(scene.shade(&ray), base);

        // A red ball hanging above the hit point bleeds into the floor.
        // Its bottom is 1.25 above the floor and off the camera ray.
        scene.add_sphere(Vec3::new(0.0, -0.5, 0.0), 0.25, Color::RED);
        let bled = scene.shade(&ray);
        assert!(bled.g < base.g);
        assert!(bled.r > bled.g);
        assert_eq!(bled.a, base.a);

        let expected = bounce_blend(base, Color::RED, 1.25 - SHADOW_EPSILON, 4.0);
        assert_color_near(bled, expected);
    }

    #[test]
    fn test_gi_reflect_uses_mirror_direction() {
        let mut scene = Scene::new();
        scene.add_plane(Axis::Y, -2.0, Color::WHITE);
        scene.light = Vec3::new(0.0, 10.0, 0.0);
        // Blocks the mirror direction but not the normal direction
        scene.add_sphere(Vec3::new(0.0, -1.0, 1.0), 0.5, Color::BLUE);

        let target = Vec3::new(0.0, -2.0, 0.0);
        let ray = Ray::towards(Vec3::new(0.0, 0.0, -2.0), target);

        scene.shading_model = ShadingModel::GiNormal;
        let normal_bounce = scene.shade(&ray);
        scene.shading_model = ShadingModel::GiReflect;
        let reflect_bounce = scene.shade(&ray);

        assert!(reflect_bounce.b > reflect_bounce.r);
        assert!(normal_bounce.r > reflect_bounce.r);
    }

    #[test]
    fn test_validate_rejects_bad_scene() {
        let mut scene = Scene::default_scene();
        scene.gi_max_distance = 0.0;
        assert!(scene.validate().is_err());

        let mut scene = Scene::default_scene();
        scene.add_sphere(Vec3::ZERO, -1.0, Color::WHITE);
        assert!(matches!(scene.validate(), Err(SceneError::InvalidGeometry { .. })));

        let mut scene = Scene::default_scene();
        scene.light = Vec3::splat(f32::NAN);
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_clear_and_reset() {
        let mut scene = Scene::default_scene();
        scene.shading_model = ShadingModel::Lambert;
        scene.clear();
        assert_eq!(scene.primitive_count(), 0);
        assert_eq!(scene.shading_model, ShadingModel::Lambert);

        scene.reset_to_default();
        assert_eq!(scene, Scene::default_scene());
    }
}
