//! Demo UI glue
//!
//! Thin egui wiring between widgets and the session's controller
//! operations. Raw widget values (hex strings, slider floats) are handed to
//! the controller unparsed; rejection leaves the viewer in its last valid
//! state.

pub mod controls;

pub use controls::ControlsPanel;
