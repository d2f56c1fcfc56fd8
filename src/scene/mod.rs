//! Scene target ownership and intake
//!
//! A [`ViewerScene`] is the strong owner of every target the controller and
//! engine can touch. Both of those only ever hold weak [`TargetHandle`]s, so
//! dropping the scene implicitly cancels whatever was animating on it.

pub mod loader;
pub mod target;
pub mod types;

use std::collections::HashMap;

// Re-export commonly used types
pub use loader::{SceneDescriptor, SceneError};
pub use target::{PropertyTarget, TargetError, TargetHandle, TargetRef};
pub use types::{CameraState, MaterialState, StageState, TextureState};

/// Weak handles to every controllable target of a loaded scene. This is
/// what the asset-loader collaborator hands over once loading completes.
#[derive(Clone)]
pub struct SceneHandles {
    pub materials: Vec<TargetHandle>,
    pub camera: TargetHandle,
    pub stage: TargetHandle,
    pub textures: HashMap<String, TargetHandle>,
}

/// Strong owner of the scene targets for one viewer session.
pub struct ViewerScene {
    name: String,
    materials: Vec<TargetRef<MaterialState>>,
    camera: TargetRef<CameraState>,
    stage: TargetRef<StageState>,
    textures: HashMap<String, TargetRef<TextureState>>,
}

impl ViewerScene {
    pub(crate) fn new(
        name: String,
        materials: Vec<TargetRef<MaterialState>>,
        camera: TargetRef<CameraState>,
        stage: TargetRef<StageState>,
        textures: HashMap<String, TargetRef<TextureState>>,
    ) -> Self {
        Self {
            name,
            materials,
            camera,
            stage,
            textures,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weak handles for controller and engine registration.
    pub fn handles(&self) -> SceneHandles {
        SceneHandles {
            materials: self.materials.iter().map(TargetHandle::new).collect(),
            camera: TargetHandle::new(&self.camera),
            stage: TargetHandle::new(&self.stage),
            textures: self
                .textures
                .iter()
                .map(|(id, texture)| (id.clone(), TargetHandle::new(texture)))
                .collect(),
        }
    }

    /// Register a texture produced at runtime (e.g. a user upload). Returns
    /// a handle for the controller's registry; the scene keeps ownership.
    pub fn add_texture(&mut self, texture: TextureState) -> TargetHandle {
        let id = texture.id.clone();
        let shared: TargetRef<TextureState> = std::rc::Rc::new(std::cell::RefCell::new(texture));
        let handle = TargetHandle::new(&shared);
        self.textures.insert(id, shared);
        handle
    }

    pub fn materials(&self) -> &[TargetRef<MaterialState>] {
        &self.materials
    }

    pub fn camera(&self) -> &TargetRef<CameraState> {
        &self.camera
    }

    pub fn stage(&self) -> &TargetRef<StageState> {
        &self.stage
    }

    pub fn texture(&self, id: &str) -> Option<&TargetRef<TextureState>> {
        self.textures.get(id)
    }
}
