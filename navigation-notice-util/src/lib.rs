pub mod animation;
pub mod geometry;
pub mod gesture;
pub mod layout;
pub mod presentation;

pub use animation::{AnimationPhase, AnimationSpec};
pub use geometry::{EdgeInsets, Point, Size};
pub use gesture::{
    DragEvent, DragPhase, GestureController, GestureKind, GestureOutcome, GestureState, Release,
    allow_simultaneous,
};
pub use layout::{Layout, compute_layout};
pub use navigation_notice_config::{AnimationCurve, Position};
pub use presentation::PresentationState;
