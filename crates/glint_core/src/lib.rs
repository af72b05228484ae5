//! glint core - scene model, intersection and shading.
//!
//! This crate provides:
//!
//! - **Primitives**: spheres and axis-aligned planes as plain data
//! - **Intersection**: closed-form ray/sphere and ray/plane tests
//! - **Scene**: nearest-hit queries and the four shading models
//! - **Descriptions**: JSON scene files loaded through serde
//!
//! # Example
//!
//! ```
//! use glint_core::{Scene, ShadingModel};
//! use glint_math::{Ray, Vec3};
//!
//! let mut scene = Scene::default_scene();
//! scene.shading_model = ShadingModel::LambertShadow;
//!
//! let ray = Ray::towards(scene.camera, Vec3::ZERO);
//! let color = scene.shade(&ray);
//! assert!(color.a > 0.0);
//! ```

pub mod description;
pub mod error;
pub mod intersect;
pub mod primitive;
pub mod scene;
pub mod shading;

// Re-export commonly used types
pub use description::{load_scene, save_scene, PlaneDescription, SceneDescription, SphereDescription};
pub use error::{SceneError, SceneResult};
pub use primitive::{plane_normal, Axis, Primitive, Shape};
pub use scene::{Hit, PrimitiveKind, PrimitiveRef, Scene};
pub use shading::{ShadingModel, SHADOW_EPSILON};
