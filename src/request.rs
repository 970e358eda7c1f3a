use crate::NoticeQueue;
use crate::platform::{AnimationRunner, ContentId, HostId};
use navigation_notice_util::Position;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle returned by [`NoticeQueue::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

/// Called once, after the notice content has been detached.
///
/// Receives the queue so it can submit follow-up notices.
pub type Completion = Box<dyn FnOnce(&mut NoticeQueue)>;

/// Automatic dismissal policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AutoHide {
    /// Manual dismissal only
    #[default]
    Never,
    /// Hide this long after the notice became interactive. Zero hides immediately.
    After(Duration),
}

impl AutoHide {
    /// Interval in seconds; negative (or not finite) disables auto-hide.
    /// Intervals too large for a `Duration` saturate to `Duration::MAX`.
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs >= 0.0 {
            Self::After(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
        } else {
            Self::Never
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self, Self::After(_))
    }
}

/// Description of one notice, built fluently and handed to [`NoticeQueue::submit`].
///
/// Options left unset fall back to the queue's configuration when the notice
/// is activated.
#[derive(Default)]
pub struct NoticeRequest {
    pub(crate) content: Option<ContentId>,
    pub(crate) target: Option<HostId>,
    pub(crate) position: Option<Position>,
    pub(crate) show_safe_area: Option<bool>,
    pub(crate) on_status_bar: Option<bool>,
    pub(crate) auto_hide: AutoHide,
    pub(crate) show_animation: Option<Rc<dyn AnimationRunner>>,
    pub(crate) hide_animation: Option<Rc<dyn AnimationRunner>>,
    pub(crate) completion: Option<Completion>,
}

impl NoticeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: ContentId) -> Self {
        self.content = Some(content);
        self
    }

    pub fn show_on(mut self, target: HostId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn show_safe_area(mut self, show: bool) -> Self {
        self.show_safe_area = Some(show);
        self
    }

    pub fn on_status_bar(mut self, on: bool) -> Self {
        self.on_status_bar = Some(on);
        self
    }

    pub fn auto_hide(mut self, auto_hide: AutoHide) -> Self {
        self.auto_hide = auto_hide;
        self
    }

    pub fn show_animation(mut self, runner: Rc<dyn AnimationRunner>) -> Self {
        self.show_animation = Some(runner);
        self
    }

    pub fn hide_animation(mut self, runner: Rc<dyn AnimationRunner>) -> Self {
        self.hide_animation = Some(runner);
        self
    }

    pub fn completion(mut self, completion: impl FnOnce(&mut NoticeQueue) + 'static) -> Self {
        self.completion = Some(Box::new(completion));
        self
    }

    pub fn has_completion(&self) -> bool {
        self.completion.is_some()
    }

    /// A request without content or target host is never shown.
    pub fn is_inert(&self) -> bool {
        self.content.is_none() || self.target.is_none()
    }
}

impl fmt::Debug for NoticeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeRequest")
            .field("content", &self.content)
            .field("target", &self.target)
            .field("position", &self.position)
            .field("show_safe_area", &self.show_safe_area)
            .field("on_status_bar", &self.on_status_bar)
            .field("auto_hide", &self.auto_hide)
            .field("show_animation", &self.show_animation.is_some())
            .field("hide_animation", &self.hide_animation.is_some())
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_hide_from_seconds() {
        assert_eq!(
            AutoHide::from_secs_f64(2.0),
            AutoHide::After(Duration::from_secs(2))
        );
        assert_eq!(AutoHide::from_secs_f64(0.0), AutoHide::After(Duration::ZERO));
        assert_eq!(AutoHide::from_secs_f64(-1.0), AutoHide::Never);
        assert_eq!(AutoHide::from_secs_f64(f64::NAN), AutoHide::Never);
        assert_eq!(AutoHide::from_secs_f64(1e30), AutoHide::After(Duration::MAX));
        assert!(!AutoHide::default().is_armed());
    }

    #[test]
    fn test_request_needs_content_and_target() {
        assert!(NoticeRequest::new().is_inert());
        assert!(NoticeRequest::new().content(ContentId(1)).is_inert());
        assert!(NoticeRequest::new().show_on(HostId(1)).is_inert());
        assert!(
            !NoticeRequest::new()
                .content(ContentId(1))
                .show_on(HostId(1))
                .is_inert()
        );
    }

    #[test]
    fn test_builder_records_options() {
        let request = NoticeRequest::new()
            .content(ContentId(3))
            .show_on(HostId(9))
            .position(Position::Bottom)
            .show_safe_area(false)
            .on_status_bar(false)
            .auto_hide(AutoHide::from_secs_f64(1.5))
            .completion(|_| {});

        assert_eq!(request.content, Some(ContentId(3)));
        assert_eq!(request.target, Some(HostId(9)));
        assert_eq!(request.position, Some(Position::Bottom));
        assert_eq!(request.show_safe_area, Some(false));
        assert_eq!(request.on_status_bar, Some(false));
        assert_eq!(request.auto_hide, AutoHide::After(Duration::from_millis(1500)));
        assert!(request.has_completion());
    }
}
