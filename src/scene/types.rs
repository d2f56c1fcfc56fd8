//! Scene target types
//!
//! Plain-data stand-ins for the rendering collaborator's material, camera,
//! and texture objects. Each implements [`PropertyTarget`] so the transition
//! engine and the view state controller can write to them by name; the
//! `needs_update` dirty flags mirror what a GPU-backed collaborator would
//! need after a rebind.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::scene::target::{PropertyTarget, TargetError};
use crate::transition::PropertyValue;

/// Physically-based material parameters for one mesh of the product model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialState {
    pub id: String,
    pub base_color: Vec3,
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub reflectivity: f32,
    pub env_intensity: f32,
    /// Id of the bound diffuse texture, if any
    pub map: Option<String>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    /// Set after a map rebind; cleared by the rendering collaborator
    pub needs_update: bool,
}

impl MaterialState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_color: Vec3::from(constants::material::BASE_COLOR),
            roughness: constants::material::ROUGHNESS,
            metalness: constants::material::METALNESS,
            clearcoat: 0.0,
            reflectivity: 0.0,
            env_intensity: 1.0,
            map: None,
            cast_shadow: true,
            receive_shadow: true,
            needs_update: false,
        }
    }
}

impl PropertyTarget for MaterialState {
    fn target_id(&self) -> &str {
        &self.id
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "roughness" => Some(PropertyValue::Scalar(self.roughness)),
            "metalness" => Some(PropertyValue::Scalar(self.metalness)),
            "clearcoat" => Some(PropertyValue::Scalar(self.clearcoat)),
            "reflectivity" => Some(PropertyValue::Scalar(self.reflectivity)),
            "env_intensity" => Some(PropertyValue::Scalar(self.env_intensity)),
            "color" => Some(PropertyValue::Vec3(self.base_color)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), TargetError> {
        match (name, value) {
            ("roughness", PropertyValue::Scalar(v)) => self.roughness = v,
            ("metalness", PropertyValue::Scalar(v)) => self.metalness = v,
            ("clearcoat", PropertyValue::Scalar(v)) => self.clearcoat = v,
            ("reflectivity", PropertyValue::Scalar(v)) => self.reflectivity = v,
            ("env_intensity", PropertyValue::Scalar(v)) => self.env_intensity = v,
            ("color", PropertyValue::Vec3(v)) => self.base_color = v,
            ("roughness" | "metalness" | "clearcoat" | "reflectivity" | "env_intensity" | "color", _) => {
                return Err(TargetError::KindMismatch(name.to_string()))
            }
            _ => return Err(TargetError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }

    fn set_flag(&mut self, name: &str, value: bool) -> Result<(), TargetError> {
        match name {
            "cast_shadow" => self.cast_shadow = value,
            "receive_shadow" => self.receive_shadow = value,
            _ => return Err(TargetError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }

    fn binding(&self, name: &str) -> Option<String> {
        (name == "map").then(|| self.map.clone()).flatten()
    }

    fn set_binding(&mut self, name: &str, id: &str) -> Result<(), TargetError> {
        if name != "map" {
            return Err(TargetError::UnknownProperty(name.to_string()));
        }
        self.map = Some(id.to_string());
        self.needs_update = true;
        Ok(())
    }
}

/// Viewer camera pose. Projection parameters stay with the rendering
/// collaborator; the controller only animates position and look target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraState {
    pub id: String,
    pub position: Vec3,
    pub look_target: Vec3,
}

impl CameraState {
    pub fn new(id: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            position,
            look_target: Vec3::ZERO,
        }
    }
}

impl PropertyTarget for CameraState {
    fn target_id(&self) -> &str {
        &self.id
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "position" => Some(PropertyValue::Vec3(self.position)),
            "look_target" => Some(PropertyValue::Vec3(self.look_target)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), TargetError> {
        match (name, value) {
            ("position", PropertyValue::Vec3(v)) => self.position = v,
            ("look_target", PropertyValue::Vec3(v)) => self.look_target = v,
            ("position" | "look_target", _) => {
                return Err(TargetError::KindMismatch(name.to_string()))
            }
            _ => return Err(TargetError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }
}

/// Tiling and orientation of one registered texture. The rotation pivot is
/// fixed at the texture center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextureState {
    pub id: String,
    pub repeat_x: f32,
    pub repeat_y: f32,
    /// Rotation around the center pivot, radians in [0, 2π)
    pub rotation: f32,
    pub needs_update: bool,
}

impl TextureState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            repeat_x: 1.0,
            repeat_y: 1.0,
            rotation: 0.0,
            needs_update: false,
        }
    }
}

impl PropertyTarget for TextureState {
    fn target_id(&self) -> &str {
        &self.id
    }

    fn property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "repeat_x" => Some(PropertyValue::Scalar(self.repeat_x)),
            "repeat_y" => Some(PropertyValue::Scalar(self.repeat_y)),
            "rotation" => Some(PropertyValue::Scalar(self.rotation)),
            _ => None,
        }
    }

    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), TargetError> {
        let scalar = value
            .as_scalar()
            .ok_or_else(|| TargetError::KindMismatch(name.to_string()))?;
        match name {
            "repeat_x" => self.repeat_x = scalar,
            "repeat_y" => self.repeat_y = scalar,
            "rotation" => self.rotation = scalar,
            _ => return Err(TargetError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }
}

/// Stage-level shadow switches: the renderer's shadow map, the key light,
/// and the ground plane. Mirrors the flags the original viewers flip
/// together with each mesh's cast/receive pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageState {
    pub id: String,
    pub shadow_map_enabled: bool,
    pub light_cast_shadow: bool,
    pub ground_receive_shadow: bool,
}

impl StageState {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shadow_map_enabled: true,
            light_cast_shadow: true,
            ground_receive_shadow: true,
        }
    }
}

impl PropertyTarget for StageState {
    fn target_id(&self) -> &str {
        &self.id
    }

    fn property(&self, _name: &str) -> Option<PropertyValue> {
        None
    }

    fn set_property(&mut self, name: &str, _value: PropertyValue) -> Result<(), TargetError> {
        Err(TargetError::UnknownProperty(name.to_string()))
    }

    fn set_flag(&mut self, name: &str, value: bool) -> Result<(), TargetError> {
        match name {
            "shadow_map_enabled" => self.shadow_map_enabled = value,
            "light_cast_shadow" => self.light_cast_shadow = value,
            "ground_receive_shadow" => self.ground_receive_shadow = value,
            _ => return Err(TargetError::UnknownProperty(name.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_property_roundtrip() {
        let mut material = MaterialState::new("shirt");
        material
            .set_property("roughness", PropertyValue::Scalar(0.3))
            .unwrap();
        assert_eq!(material.property("roughness"), Some(PropertyValue::Scalar(0.3)));

        material
            .set_property("color", PropertyValue::Vec3(Vec3::new(1.0, 0.0, 0.0)))
            .unwrap();
        assert_eq!(material.base_color, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_material_rejects_kind_mismatch() {
        let mut material = MaterialState::new("shirt");
        let result = material.set_property("roughness", PropertyValue::Vec3(Vec3::ONE));
        assert_eq!(result, Err(TargetError::KindMismatch("roughness".to_string())));
    }

    #[test]
    fn test_map_rebind_sets_dirty_flag() {
        let mut material = MaterialState::new("shirt");
        assert!(!material.needs_update);
        material.set_binding("map", "texture2").unwrap();
        assert_eq!(material.map.as_deref(), Some("texture2"));
        assert!(material.needs_update);
    }

    #[test]
    fn test_stage_exposes_only_flags() {
        let mut stage = StageState::new("stage");
        assert!(stage.property("shadow_map_enabled").is_none());
        stage.set_flag("shadow_map_enabled", false).unwrap();
        assert!(!stage.shadow_map_enabled);
        assert!(stage.set_flag("fog", true).is_err());
    }
}
