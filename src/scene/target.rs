//! Adapter contract between the transition engine and scene collaborators
//!
//! The engine never owns materials, cameras, or textures. It holds weak
//! handles and writes through the [`PropertyTarget`] trait; whatever dirty
//! flag the rendering collaborator requires is the adapter's responsibility
//! to set after each write.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::transition::PropertyValue;

/// Shared ownership of a scene target.
pub type TargetRef<T> = Rc<RefCell<T>>;

/// Errors reported by target adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetError {
    /// The target does not expose a property with this name
    UnknownProperty(String),
    /// The property exists but takes a different value kind
    KindMismatch(String),
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::UnknownProperty(name) => write!(f, "unknown property '{}'", name),
            TargetError::KindMismatch(name) => write!(f, "wrong value kind for property '{}'", name),
        }
    }
}

/// An external object whose named properties can be read and written.
///
/// Continuous properties go through `property`/`set_property` and are what
/// the transition engine interpolates. Boolean flags (shadow casting) and
/// string bindings (texture maps) are immediate writes used by the view
/// state controller; targets that do not carry them keep the default
/// rejecting implementations.
pub trait PropertyTarget {
    /// Stable identifier for this target within its session.
    fn target_id(&self) -> &str;

    /// Read the current value of a named property.
    fn property(&self, name: &str) -> Option<PropertyValue>;

    /// Write a named property.
    fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), TargetError>;

    /// Flip a named boolean flag.
    fn set_flag(&mut self, name: &str, _value: bool) -> Result<(), TargetError> {
        Err(TargetError::UnknownProperty(name.to_string()))
    }

    /// Read a named resource binding (e.g. the bound texture map id).
    fn binding(&self, _name: &str) -> Option<String> {
        None
    }

    /// Rebind a named resource slot (e.g. a texture map) to another id.
    fn set_binding(&mut self, name: &str, _id: &str) -> Result<(), TargetError> {
        Err(TargetError::UnknownProperty(name.to_string()))
    }
}

/// Weak handle to a registered scene target.
///
/// Handles are what callers pass to the engine and controller; the scene
/// keeps the strong reference. A disposed scene leaves handles dangling,
/// which the engine treats as an implicit cancellation.
#[derive(Clone)]
pub struct TargetHandle {
    id: String,
    target: Weak<RefCell<dyn PropertyTarget>>,
}

impl TargetHandle {
    /// Create a handle from a strongly held target.
    pub fn new<T: PropertyTarget + 'static>(target: &TargetRef<T>) -> Self {
        let id = target.borrow().target_id().to_string();
        let erased: Rc<RefCell<dyn PropertyTarget>> = target.clone();
        Self {
            id,
            target: Rc::downgrade(&erased),
        }
    }

    /// Identifier of the underlying target.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Borrowable access to the target, if it is still alive.
    pub fn upgrade(&self) -> Option<Rc<RefCell<dyn PropertyTarget>>> {
        self.target.upgrade()
    }

    /// Whether the underlying target has been disposed.
    pub fn is_stale(&self) -> bool {
        self.target.strong_count() == 0
    }
}

impl fmt::Debug for TargetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetHandle")
            .field("id", &self.id)
            .field("stale", &self.is_stale())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Knob {
        value: f32,
    }

    impl PropertyTarget for Knob {
        fn target_id(&self) -> &str {
            "knob"
        }

        fn property(&self, name: &str) -> Option<PropertyValue> {
            (name == "value").then_some(PropertyValue::Scalar(self.value))
        }

        fn set_property(&mut self, name: &str, value: PropertyValue) -> Result<(), TargetError> {
            if name != "value" {
                return Err(TargetError::UnknownProperty(name.to_string()));
            }
            match value {
                PropertyValue::Scalar(v) => {
                    self.value = v;
                    Ok(())
                }
                PropertyValue::Vec3(_) => Err(TargetError::KindMismatch(name.to_string())),
            }
        }
    }

    #[test]
    fn test_handle_reads_and_writes_through_adapter() {
        let knob = Rc::new(RefCell::new(Knob { value: 0.5 }));
        let handle = TargetHandle::new(&knob);
        assert_eq!(handle.id(), "knob");

        let target = handle.upgrade().unwrap();
        assert_eq!(
            target.borrow().property("value"),
            Some(PropertyValue::Scalar(0.5))
        );
        target
            .borrow_mut()
            .set_property("value", PropertyValue::Scalar(0.9))
            .unwrap();
        assert_eq!(knob.borrow().value, 0.9);
    }

    #[test]
    fn test_handle_goes_stale_when_target_dropped() {
        let knob = Rc::new(RefCell::new(Knob { value: 0.0 }));
        let handle = TargetHandle::new(&knob);
        assert!(!handle.is_stale());
        drop(knob);
        assert!(handle.is_stale());
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn test_default_flag_and_binding_writes_are_rejected() {
        let knob = Rc::new(RefCell::new(Knob { value: 0.0 }));
        let mut target = knob.borrow_mut();
        assert!(target.set_flag("cast_shadow", true).is_err());
        assert!(target.set_binding("map", "texture").is_err());
    }
}
