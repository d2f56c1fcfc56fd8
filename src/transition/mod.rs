//! Property transition system
//!
//! Drives time-based interpolation of named properties on scene targets
//! (materials, camera, textures) without owning them. The host render loop
//! calls [`PropertyTransitionEngine::advance`] once per frame; UI-triggered
//! requests enter through [`PropertyTransitionEngine::submit`].

pub mod easing;
pub mod engine;
pub mod value;

// Re-export commonly used types
pub use easing::Easing;
pub use engine::{
    PropertyTransitionEngine, TransitionCallbacks, TransitionError, TransitionHandle,
};
pub use value::PropertyValue;
