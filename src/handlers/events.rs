use crate::request::NoticeId;
use navigation_notice_util::{AnimationPhase, DragEvent, EdgeInsets};

/// Asynchronous inputs applied by [`crate::NoticeQueue::update`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// An animation runner finished a transition
    AnimationFinished {
        notice: NoticeId,
        generation: u64,
        phase: AnimationPhase,
        finished: bool,
    },
    /// Auto-hide countdown expired
    TimerFired { notice: NoticeId, generation: u64 },
    /// Sample from the notice drag recognizer
    Drag(DragEvent),
    /// Host safe-area insets changed
    SafeAreaChanged(EdgeInsets),
    /// Content height changed
    ContentResized,
    /// The content's own scroll gesture started
    ContentDragBegan,
    /// The content scrolled itself to a new offset
    ContentScrolled { offset: f64 },
    /// The content's own scroll gesture ended
    ContentDidEndDragging { will_decelerate: bool },
    /// The content came to rest after a fling
    ContentDidEndDecelerating,
}
