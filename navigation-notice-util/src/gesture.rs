//! Drag handling for a shown notice.
//!
//! The host reports a drag stream relative to the overlay surface. While the
//! drag is active the notice follows the finger; on release the controller
//! decides whether the notice settles back, re-shows, or goes away.

use crate::{Position, PresentationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One sample of the drag stream, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    pub location_y: f64,
    pub velocity_y: f64,
}

impl DragEvent {
    pub const fn new(phase: DragPhase, location_y: f64, velocity_y: f64) -> Self {
        Self {
            phase,
            location_y,
            velocity_y,
        }
    }

    pub const fn began(location_y: f64) -> Self {
        Self::new(DragPhase::Began, location_y, 0.0)
    }

    pub const fn moved(location_y: f64) -> Self {
        Self::new(DragPhase::Changed, location_y, 0.0)
    }

    pub const fn ended(location_y: f64, velocity_y: f64) -> Self {
        Self::new(DragPhase::Ended, location_y, velocity_y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    /// Released toward the revealed position; the show animation is running.
    Settling,
}

/// What the owner of the notice has to do after a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Dragged past the reveal threshold: the offset was snapped back to rest
    /// and the notice hides only if it is eligible to auto-hide.
    SnapToRest,
    /// Flung toward the revealed position: animate back to rest.
    Show,
    /// Anything else: hide unconditionally.
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Ignored,
    Began,
    Moved,
    /// The notice reached its hidden offset outside of the drag, typically
    /// because the content scrolled itself away. Hide without animation.
    ForceHide,
    Released(Release),
}

#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == GestureState::Dragging
    }

    /// The show animation started by [`Release::Show`] completed.
    pub fn finish_settling(&mut self) {
        if self.state == GestureState::Settling {
            self.state = GestureState::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }

    /// Apply one drag sample to `presentation`.
    ///
    /// `host_height` is the height of the overlay surface the locations are
    /// relative to.
    pub fn handle(
        &mut self,
        event: &DragEvent,
        presentation: &mut PresentationState,
        host_height: f64,
    ) -> GestureOutcome {
        if event.phase == DragPhase::Began {
            self.state = GestureState::Dragging;
            return GestureOutcome::Began;
        }

        if self.state != GestureState::Dragging {
            tracing::trace!(phase = ?event.phase, state = ?self.state, "drag sample outside of a drag");
            return GestureOutcome::Ignored;
        }

        if presentation.is_past_hidden_threshold() {
            self.state = GestureState::Idle;
            return GestureOutcome::ForceHide;
        }

        let content_height = presentation.content_height();
        let location_y = event.location_y;

        match event.phase {
            DragPhase::Began | DragPhase::Changed => {
                let offset = match presentation.position() {
                    Position::Top => {
                        if content_height > location_y {
                            -location_y
                        } else {
                            -content_height
                        }
                    }
                    Position::Bottom => {
                        if host_height - content_height < location_y {
                            host_height - location_y
                        } else {
                            content_height
                        }
                    }
                };
                presentation.drag_to(offset);
                GestureOutcome::Moved
            }
            DragPhase::Ended | DragPhase::Cancelled => {
                let (hide_if_needed, should_show) = match presentation.position() {
                    Position::Top => (content_height < location_y, event.velocity_y > 0.0),
                    Position::Bottom => (
                        host_height - content_height > location_y,
                        event.velocity_y < 0.0,
                    ),
                };

                let release = if hide_if_needed {
                    presentation.reveal();
                    self.state = GestureState::Idle;
                    Release::SnapToRest
                } else if should_show {
                    self.state = GestureState::Settling;
                    Release::Show
                } else {
                    self.state = GestureState::Idle;
                    Release::Hide
                };
                GestureOutcome::Released(release)
            }
        }
    }
}

/// Identifies a gesture recognizer taking part in simultaneous recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    /// The drag installed on the host by the notice.
    NoticeDrag,
    /// The content's own scroll gesture.
    ContentScroll,
    /// Any other recognizer on the host.
    Other(u64),
}

/// Simultaneous recognition policy consulted by the drag input source.
///
/// The notice drag never blocks, and is never blocked by, another gesture.
pub fn allow_simultaneous(a: GestureKind, b: GestureKind) -> bool {
    a == GestureKind::NoticeDrag || b == GestureKind::NoticeDrag
}
