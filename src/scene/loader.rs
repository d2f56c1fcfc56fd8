//! Scene intake from the asset-loader collaborator
//!
//! Mesh and texture decoding happen elsewhere; what arrives here is a
//! descriptor naming the decoded parts. Building a [`ViewerScene`] from it
//! is the whole contract: "receive a list of target handles once loading
//! completes".

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::scene::types::{CameraState, MaterialState, StageState, TextureState};
use crate::scene::ViewerScene;

/// Errors produced while validating a scene descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The descriptor JSON could not be parsed
    Parse(String),
    /// The descriptor parsed but names nothing usable
    InvalidDescriptor(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Parse(msg) => write!(f, "scene descriptor parse error: {}", msg),
            SceneError::InvalidDescriptor(msg) => write!(f, "invalid scene descriptor: {}", msg),
        }
    }
}

/// Loader output describing one decoded product model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescriptor {
    pub name: String,
    /// One entry per mesh material of the model
    pub materials: Vec<String>,
    /// Ids of the textures that shipped with the model
    pub textures: Vec<String>,
    /// Texture initially bound to every material map slot
    pub default_texture: Option<String>,
}

impl SceneDescriptor {
    /// Parse a descriptor from loader-produced JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::Parse(e.to_string()))
    }
}

/// Build the scene targets for a validated descriptor.
pub fn build_scene(descriptor: &SceneDescriptor) -> Result<ViewerScene, SceneError> {
    if descriptor.materials.is_empty() {
        return Err(SceneError::InvalidDescriptor(
            "model has no materials".to_string(),
        ));
    }
    if let Some(default) = &descriptor.default_texture {
        if !descriptor.textures.contains(default) {
            return Err(SceneError::InvalidDescriptor(format!(
                "default texture '{}' is not in the texture list",
                default
            )));
        }
    }

    let mut seen = HashSet::new();
    for id in descriptor.materials.iter().chain(descriptor.textures.iter()) {
        if !seen.insert(id.clone()) {
            return Err(SceneError::InvalidDescriptor(format!(
                "duplicate target id '{}'",
                id
            )));
        }
    }

    let materials = descriptor
        .materials
        .iter()
        .map(|id| {
            let mut material = MaterialState::new(id.clone());
            material.map = descriptor.default_texture.clone();
            Rc::new(RefCell::new(material))
        })
        .collect();

    let textures = descriptor
        .textures
        .iter()
        .map(|id| (id.clone(), Rc::new(RefCell::new(TextureState::new(id.clone())))))
        .collect();

    let camera = Rc::new(RefCell::new(CameraState::new("camera", glam::Vec3::ZERO)));
    let stage = Rc::new(RefCell::new(StageState::new("stage")));

    info!(
        "loaded scene '{}': {} material(s), {} texture(s)",
        descriptor.name,
        descriptor.materials.len(),
        descriptor.textures.len()
    );

    Ok(ViewerScene::new(
        descriptor.name.clone(),
        materials,
        camera,
        stage,
        textures,
    ))
}

/// Descriptor for the built-in demo product (a t-shirt with two shipped
/// textures), used by the demo application and tests.
pub fn demo_descriptor() -> SceneDescriptor {
    SceneDescriptor {
        name: "tshirt".to_string(),
        materials: vec![
            "torso".to_string(),
            "sleeves".to_string(),
            "collar".to_string(),
        ],
        textures: vec!["fabric".to_string(), "print".to_string()],
        default_texture: Some("fabric".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_demo_scene() {
        let scene = build_scene(&demo_descriptor()).unwrap();
        assert_eq!(scene.name(), "tshirt");
        assert_eq!(scene.materials().len(), 3);
        assert!(scene.texture("fabric").is_some());
        assert!(scene.texture("print").is_some());
        assert!(scene.texture("missing").is_none());

        // Every material starts bound to the default texture
        for material in scene.materials() {
            assert_eq!(material.borrow().map.as_deref(), Some("fabric"));
        }
    }

    #[test]
    fn test_descriptor_json_intake() {
        let json = r#"{
            "name": "can",
            "materials": ["body", "lid"],
            "textures": ["label"],
            "default_texture": "label"
        }"#;
        let descriptor = SceneDescriptor::from_json(json).unwrap();
        assert_eq!(descriptor.materials.len(), 2);
        let scene = build_scene(&descriptor).unwrap();
        assert_eq!(scene.name(), "can");
    }

    #[test]
    fn test_rejects_empty_material_list() {
        let descriptor = SceneDescriptor {
            name: "empty".to_string(),
            materials: vec![],
            textures: vec![],
            default_texture: None,
        };
        assert!(matches!(
            build_scene(&descriptor),
            Err(SceneError::InvalidDescriptor(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_default_texture() {
        let mut descriptor = demo_descriptor();
        descriptor.default_texture = Some("missing".to_string());
        assert!(build_scene(&descriptor).is_err());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut descriptor = demo_descriptor();
        descriptor.materials.push("torso".to_string());
        assert!(build_scene(&descriptor).is_err());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            SceneDescriptor::from_json("{nope"),
            Err(SceneError::Parse(_))
        ));
    }
}
