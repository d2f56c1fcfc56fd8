//! Vitrine core library
//!
//! Interactive 3D product viewer core: a property transition engine and a
//! view state controller, wired together by a per-session context. The
//! rendering pipeline, asset decoding, and window management stay with
//! external collaborators; this crate owns preset state and smooth,
//! interruption-safe transitions toward it.

// Public modules
pub mod config;
pub mod constants;
pub mod controller;
pub mod scene;
pub mod session;
pub mod transition;
pub mod ui;

// Re-export commonly used types
pub use config::{ViewerConfig, WidthClass};
pub use controller::{CameraView, ControllerError, Finish, ViewState, ViewStateController};
pub use scene::{SceneDescriptor, SceneHandles, ViewerScene};
pub use session::ViewerSession;
pub use transition::{Easing, PropertyTransitionEngine, PropertyValue, TransitionHandle};
