//! Serial overlay notices anchored to the top or bottom edge of a host view.
//!
//! [`NoticeQueue`] shows one [`NoticeRequest`] at a time. Each notice is
//! revealed by an animation, can be dragged to peek, dismiss or re-show it,
//! and optionally hides itself after an interval. Rendering, animation,
//! gestures and windowing are supplied by the host through [`platform`].

pub mod app;
pub(crate) mod constants;
pub mod handlers;
pub mod platform;
pub mod request;
pub mod state;

pub use handlers::events::Event;
pub use navigation_notice_config::{AnimationCurve, NoticeConfig, Position};
pub use navigation_notice_util as util;
pub use platform::{
    AnimationCompletion, AnimationRunner, ContentHost, ContentId, DragInputSource, HostId,
    Platform, SafeAreaProvider, SurfaceError, SurfaceFactory, SurfaceId, SurfaceLevel,
};
pub use request::{AutoHide, Completion, NoticeId, NoticeRequest};
pub use state::queue::NoticeQueue;
pub use state::session::{NoticeSession, SessionState};
