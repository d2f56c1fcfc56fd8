//! Property transition engine
//!
//! Central bookkeeping for every in-flight animated property change. All
//! continuous changes funnel through [`PropertyTransitionEngine::submit`] so
//! two UI events can never race competing tweens on the same property: a new
//! submission replaces the old tracks for the pairs it covers, starting from
//! the value currently written on the target.

use std::fmt;

use log::{debug, warn};

use crate::scene::target::TargetHandle;
use crate::transition::easing::Easing;
use crate::transition::value::PropertyValue;

/// Identifies a submitted transition for cancellation and status polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(u64);

/// Errors reported at submit time. Nothing is mutated when these occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// Duration was zero or negative
    InvalidDuration,
    /// No usable properties were supplied
    EmptyProperties,
    /// The target was disposed before the transition could be registered
    StaleTarget,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::InvalidDuration => write!(f, "transition duration must be positive"),
            TransitionError::EmptyProperties => write!(f, "transition has no usable properties"),
            TransitionError::StaleTarget => write!(f, "transition target has been disposed"),
        }
    }
}

/// Per-frame progress callback (receives the eased fraction) and one-shot
/// completion callback. Completion never fires for cancelled or
/// stale-dropped transitions.
#[derive(Default)]
pub struct TransitionCallbacks {
    pub on_step: Option<Box<dyn FnMut(f32)>>,
    pub on_complete: Option<Box<dyn FnOnce()>>,
}

impl TransitionCallbacks {
    /// Callbacks that only report completion.
    pub fn on_complete(callback: impl FnOnce() + 'static) -> Self {
        Self {
            on_step: None,
            on_complete: Some(Box::new(callback)),
        }
    }
}

/// One animated property on one target.
struct PropertyTrack {
    name: String,
    start: PropertyValue,
    end: PropertyValue,
}

/// A submitted transition: one target, one clock, one or more tracks.
struct Transition {
    handle: TransitionHandle,
    target: TargetHandle,
    tracks: Vec<PropertyTrack>,
    duration: f32,
    elapsed: f32,
    easing: Easing,
    callbacks: TransitionCallbacks,
}

/// Drives time-based interpolation of named properties on scene targets.
///
/// `submit`, `cancel`, and `advance` are synchronous, never block, and are
/// expected on the single frame-owning thread; a multi-threaded host must
/// serialize these three entry points itself.
#[derive(Default)]
pub struct PropertyTransitionEngine {
    active: Vec<Transition>,
    next_handle: u64,
}

impl PropertyTransitionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit a transition toward `properties` end values over `duration`
    /// seconds.
    ///
    /// Start values are read from the target now, so resubmitting a pair
    /// that is already animating continues from its current interpolated
    /// value rather than jumping. Properties the target does not expose (or
    /// exposes with a different value kind) are skipped with a warning. No
    /// property is written until the next [`advance`](Self::advance) call.
    pub fn submit(
        &mut self,
        target: &TargetHandle,
        properties: &[(&str, PropertyValue)],
        duration: f32,
        easing: Easing,
    ) -> Result<TransitionHandle, TransitionError> {
        self.submit_with_callbacks(
            target,
            properties,
            duration,
            easing,
            TransitionCallbacks::default(),
        )
    }

    /// Like [`submit`](Self::submit), with step/completion callbacks.
    /// Callbacks run inside `advance` on the frame-owning thread.
    pub fn submit_with_callbacks(
        &mut self,
        target: &TargetHandle,
        properties: &[(&str, PropertyValue)],
        duration: f32,
        easing: Easing,
        callbacks: TransitionCallbacks,
    ) -> Result<TransitionHandle, TransitionError> {
        if !(duration > 0.0) {
            return Err(TransitionError::InvalidDuration);
        }
        if properties.is_empty() {
            return Err(TransitionError::EmptyProperties);
        }
        let strong = target.upgrade().ok_or(TransitionError::StaleTarget)?;

        let mut tracks = Vec::with_capacity(properties.len());
        {
            let current = strong.borrow();
            for (name, end) in properties {
                match current.property(name) {
                    Some(start) if start.same_kind(*end) => {
                        tracks.push(PropertyTrack {
                            name: (*name).to_string(),
                            start,
                            end: *end,
                        });
                    }
                    Some(_) => {
                        warn!(
                            "skipping property '{}' on '{}': value kind mismatch",
                            name,
                            target.id()
                        );
                    }
                    None => {
                        warn!(
                            "skipping unknown property '{}' on '{}'",
                            name,
                            target.id()
                        );
                    }
                }
            }
        }
        if tracks.is_empty() {
            return Err(TransitionError::EmptyProperties);
        }

        self.replace_tracks(target.id(), &tracks);

        let handle = TransitionHandle(self.next_handle);
        self.next_handle += 1;
        self.active.push(Transition {
            handle,
            target: target.clone(),
            tracks,
            duration,
            elapsed: 0.0,
            easing,
            callbacks,
        });
        Ok(handle)
    }

    /// Remove tracks of older transitions that the new submission covers.
    /// A transition that loses every track is dropped without completing.
    fn replace_tracks(&mut self, target_id: &str, incoming: &[PropertyTrack]) {
        for transition in &mut self.active {
            if transition.target.id() != target_id {
                continue;
            }
            let before = transition.tracks.len();
            transition
                .tracks
                .retain(|track| !incoming.iter().any(|new| new.name == track.name));
            if transition.tracks.len() != before {
                debug!(
                    "replaced {} track(s) of transition {:?} on '{}'",
                    before - transition.tracks.len(),
                    transition.handle,
                    target_id
                );
            }
        }
        self.active.retain(|t| !t.tracks.is_empty());
    }

    /// Cancel a transition without firing its completion callback.
    ///
    /// Properties stay at their last written values. Cancelling an unknown
    /// or already finished handle is a no-op.
    pub fn cancel(&mut self, handle: TransitionHandle) {
        let before = self.active.len();
        self.active.retain(|t| t.handle != handle);
        if self.active.len() == before {
            debug!("cancel on unknown or finished transition {:?}", handle);
        }
    }

    /// Advance every active transition by `delta_seconds` and write the
    /// interpolated values through the target adapters.
    ///
    /// Called once per frame by the host loop. A transition whose target has
    /// been disposed mid-flight is dropped silently without touching the
    /// others; a finished transition fires its completion callback exactly
    /// once and is removed within this same call. Non-positive deltas are
    /// ignored (a stalled host clock pauses animation).
    pub fn advance(&mut self, delta_seconds: f32) {
        if !(delta_seconds > 0.0) {
            return;
        }
        self.active.retain_mut(|transition| {
            let Some(strong) = transition.target.upgrade() else {
                debug!(
                    "dropping transition {:?}: target '{}' disposed",
                    transition.handle,
                    transition.target.id()
                );
                return false;
            };

            transition.elapsed = (transition.elapsed + delta_seconds).min(transition.duration);
            let fraction = transition.easing.apply(transition.elapsed / transition.duration);

            {
                let mut target = strong.borrow_mut();
                for track in &transition.tracks {
                    let value = track.start.lerp(track.end, fraction);
                    if let Err(err) = target.set_property(&track.name, value) {
                        warn!(
                            "dropping transition {:?}: write to '{}' failed: {}",
                            transition.handle,
                            transition.target.id(),
                            err
                        );
                        return false;
                    }
                }
            }

            if let Some(on_step) = transition.callbacks.on_step.as_mut() {
                on_step(fraction);
            }

            if transition.elapsed >= transition.duration {
                if let Some(on_complete) = transition.callbacks.on_complete.take() {
                    on_complete();
                }
                return false;
            }
            true
        });
    }

    /// Whether the handle still refers to an in-flight transition.
    pub fn is_active(&self, handle: TransitionHandle) -> bool {
        self.active.iter().any(|t| t.handle == handle)
    }

    /// Number of in-flight transitions.
    pub fn active_transitions(&self) -> usize {
        self.active.len()
    }

    /// Number of in-flight transitions touching the given target.
    pub fn active_transitions_for(&self, target_id: &str) -> usize {
        self.active
            .iter()
            .filter(|t| t.target.id() == target_id)
            .count()
    }

    /// True when nothing is animating.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}
