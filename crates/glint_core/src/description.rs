//! JSON scene descriptions.
//!
//! A description is the on-disk form of a [`Scene`]. Vectors are stored as
//! `[x, y, z]` arrays and colors as `[r, g, b, a]`. Every field is optional
//! and falls back to the empty default scene.
//!
//! ```json
//! {
//!   "camera": [0.0, 0.0, -6.0],
//!   "light": [2.0, 2.0, 0.0],
//!   "shading_model": "gi-reflect",
//!   "gi_max_distance": 4.0,
//!   "planes": [{ "axis": "y", "offset": -2.0, "color": [1, 1, 1, 1] }],
//!   "spheres": [{ "center": [0, 0, 0], "radius": 1.0, "color": [0, 1, 1, 1] }]
//! }
//! ```

use std::fs;
use std::path::Path;

use glint_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::primitive::{Axis, Primitive, Shape};
use crate::scene::Scene;
use crate::shading::ShadingModel;

fn default_color() -> Color {
    Color::WHITE
}

/// An axis-aligned plane entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub axis: Axis,
    pub offset: f32,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub flat: bool,
}

/// A sphere entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub center: [f32; 3],
    pub radius: f32,
    #[serde(default = "default_color")]
    pub color: Color,
    #[serde(default)]
    pub flat: bool,
}

/// Serializable form of a [`Scene`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub camera: [f32; 3],
    pub light: [f32; 3],
    pub shading_model: ShadingModel,
    pub gi_max_distance: f32,
    pub planes: Vec<PlaneDescription>,
    pub spheres: Vec<SphereDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Scene::new().to_description()
    }
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Scene {
    /// Build and validate a scene from its description.
    ///
    /// Unnamed primitives are named after their list position.
    pub fn from_description(description: &SceneDescription) -> SceneResult<Self> {
        let planes = description
            .planes
            .iter()
            .enumerate()
            .map(|(i, plane)| {
                let name = plane.name.clone().unwrap_or_else(|| format!("Plane {i}"));
                Primitive::plane(name, plane.axis, plane.offset, plane.color).with_flat(plane.flat)
            })
            .collect();

        let spheres = description
            .spheres
            .iter()
            .enumerate()
            .map(|(i, sphere)| {
                let name = sphere.name.clone().unwrap_or_else(|| format!("Sphere {i}"));
                let center = Vec3::from_array(sphere.center);
                Primitive::sphere(name, center, sphere.radius, sphere.color).with_flat(sphere.flat)
            })
            .collect();

        let scene = Scene {
            camera: Vec3::from_array(description.camera),
            light: Vec3::from_array(description.light),
            planes,
            spheres,
            shading_model: description.shading_model,
            gi_max_distance: description.gi_max_distance,
        };

        scene.validate()?;
        Ok(scene)
    }

    /// Capture the scene as a description.
    ///
    /// Primitives are filed by shape, so a sphere stored in the plane list
    /// comes back in the sphere list.
    pub fn to_description(&self) -> SceneDescription {
        let mut planes = Vec::new();
        let mut spheres = Vec::new();

        for (_, primitive) in self.primitives() {
            let name = Some(primitive.name.clone());
            match primitive.shape {
                Shape::Plane { axis, offset } => planes.push(PlaneDescription {
                    name,
                    axis,
                    offset,
                    color: primitive.color,
                    flat: primitive.flat,
                }),
                Shape::Sphere { center, radius } => spheres.push(SphereDescription {
                    name,
                    center: center.to_array(),
                    radius,
                    color: primitive.color,
                    flat: primitive.flat,
                }),
            }
        }

        SceneDescription {
            camera: self.camera.to_array(),
            light: self.light.to_array(),
            shading_model: self.shading_model,
            gi_max_distance: self.gi_max_distance,
            planes,
            spheres,
        }
    }

    /// Parse and validate a scene from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Self::from_description(&SceneDescription::from_json_str(json)?)
    }
}

/// Load a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let scene = Scene::from_json_str(&text)?;

    log::info!(
        "Loaded scene {:?}: {} planes, {} spheres, shading {}",
        path,
        scene.planes.len(),
        scene.spheres.len(),
        scene.shading_model
    );
    Ok(scene)
}

/// Write a scene to a JSON file.
pub fn save_scene<P: AsRef<Path>>(path: P, scene: &Scene) -> SceneResult<()> {
    let path = path.as_ref();
    fs::write(path, scene.to_description().to_json_string()?)?;
    log::debug!("Saved scene to {:?}", path);
    Ok(())
}
