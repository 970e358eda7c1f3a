//! Capabilities the notice core needs from its host environment.
//!
//! Nothing here renders anything. The host wires these traits to its window
//! system, animation engine and gesture recognizers, and reports asynchronous
//! results back as [`Event`]s.

use crate::handlers::events::Event;
use crate::request::NoticeId;
use navigation_notice_util::{AnimationPhase, AnimationSpec, EdgeInsets, GestureKind, Layout, Size};
use tokio::sync::mpsc::UnboundedSender;

/// Opaque handle to a piece of notice content owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub u64);

/// Opaque handle to the host view a notice is shown on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostId(pub u64);

/// Opaque handle to a top-level surface (window or layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Stacking of the overlay surface relative to the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceLevel {
    AboveStatusBar,
    BelowStatusBar,
}

impl SurfaceLevel {
    pub fn for_status_bar(on_status_bar: bool) -> Self {
        if on_status_bar {
            Self::AboveStatusBar
        } else {
            Self::BelowStatusBar
        }
    }
}

/// Overlay surface creation errors
#[derive(Debug, Clone)]
pub enum SurfaceError {
    /// No display to place the surface on
    NoDisplay,
    /// The window system refused the surface
    Rejected(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::NoDisplay => write!(f, "No display available for the overlay surface"),
            SurfaceError::Rejected(e) => write!(f, "Overlay surface rejected: {}", e),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Creates and destroys the always-on-top overlay surface.
pub trait SurfaceFactory {
    fn create_surface(&mut self) -> Result<SurfaceId, SurfaceError>;

    fn destroy_surface(&mut self, surface: SurfaceId);

    fn set_level(&mut self, surface: SurfaceId, level: SurfaceLevel);

    /// Make `surface` the key (focused) surface.
    fn make_key(&mut self, surface: SurfaceId);

    /// Surface currently displaying `host`, if any. Only used to restore focus.
    fn surface_of(&self, host: HostId) -> Option<SurfaceId>;

    fn surface_size(&self, surface: SurfaceId) -> Size;

    /// Ask the status bar to re-read its appearance from `surface`.
    fn refresh_status_bar(&mut self, _surface: SurfaceId) {}
}

/// Scrollable container hosting the notice content.
///
/// The host reports the container's own scroll activity through the
/// `Content*` variants of [`Event`].
pub trait ContentHost {
    fn content_height(&self, content: ContentId) -> f64;

    fn attach(&mut self, content: ContentId, surface: SurfaceId);

    fn detach(&mut self, content: ContentId);

    fn apply_layout(&mut self, content: ContentId, layout: &Layout);

    /// Move the scroll offset without animation.
    fn set_offset(&mut self, content: ContentId, offset: f64);
}

/// Reports edge insets. Changes are delivered as [`Event::SafeAreaChanged`].
pub trait SafeAreaProvider {
    fn insets(&self, surface: SurfaceId) -> EdgeInsets;
}

/// Signature of the simultaneous recognition policy handed to the input source.
pub type SimultaneousPolicy = fn(GestureKind, GestureKind) -> bool;

/// Installs the notice drag recognizer on a host view.
///
/// Samples are delivered as [`Event::Drag`].
pub trait DragInputSource {
    fn attach(&mut self, host: HostId, policy: SimultaneousPolicy);

    fn detach(&mut self, host: HostId);
}

/// Renders an offset transition and reports when it is done.
pub trait AnimationRunner {
    fn animate(&self, content: ContentId, spec: AnimationSpec, completion: AnimationCompletion);
}

/// Completion token handed to an [`AnimationRunner`].
///
/// Completing posts an [`Event::AnimationFinished`] back to the queue; it is
/// never applied re-entrantly.
#[derive(Debug)]
pub struct AnimationCompletion {
    tx: UnboundedSender<Event>,
    notice: NoticeId,
    generation: u64,
    phase: AnimationPhase,
}

impl AnimationCompletion {
    pub(crate) fn new(
        tx: UnboundedSender<Event>,
        notice: NoticeId,
        generation: u64,
        phase: AnimationPhase,
    ) -> Self {
        Self {
            tx,
            notice,
            generation,
            phase,
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn complete(self, finished: bool) {
        let event = Event::AnimationFinished {
            notice: self.notice,
            generation: self.generation,
            phase: self.phase,
            finished,
        };
        if self.tx.send(event).is_err() {
            tracing::warn!(notice = ?self.notice, "animation finished after the queue was dropped");
        }
    }
}

/// The full set of host capabilities.
pub struct Platform {
    pub surfaces: Box<dyn SurfaceFactory>,
    pub content: Box<dyn ContentHost>,
    pub safe_area: Box<dyn SafeAreaProvider>,
    pub drag: Box<dyn DragInputSource>,
    /// Runner used when neither the request nor the queue overrides an animation.
    pub animator: std::rc::Rc<dyn AnimationRunner>,
}
