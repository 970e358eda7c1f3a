use crate::handlers::events::Event;
use crate::platform::{AnimationRunner, Platform, SurfaceId};
use crate::request::{AutoHide, NoticeId, NoticeRequest};
use crate::state::session::{NoticeSession, SessionDefaults, SessionState, Step};
use navigation_notice_config::NoticeConfig;
use navigation_notice_util::PresentationState;
use std::collections::VecDeque;
use std::rc::Rc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, trace};

/// Serializes notices so that exactly one is presented at a time.
///
/// The queue owns the overlay surface: it is created when the first notice
/// arrives on an idle queue and destroyed once the last one is gone.
pub struct NoticeQueue {
    platform: Platform,
    config: NoticeConfig,
    pending: VecDeque<(NoticeId, NoticeRequest)>,
    active: Option<NoticeSession>,
    surface: Option<SurfaceId>,
    restore_surface: Option<SurfaceId>,
    default_show_animation: Option<Rc<dyn AnimationRunner>>,
    default_hide_animation: Option<Rc<dyn AnimationRunner>>,
    next_id: u64,
    tx: UnboundedSender<Event>,
}

impl NoticeQueue {
    /// Create an idle queue. Feed every event from the returned receiver to
    /// [`NoticeQueue::update`].
    pub fn new(platform: Platform, config: NoticeConfig) -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = unbounded_channel();
        let queue = Self {
            platform,
            config,
            pending: VecDeque::new(),
            active: None,
            surface: None,
            restore_surface: None,
            default_show_animation: None,
            default_hide_animation: None,
            next_id: 1,
            tx,
        };
        (queue, rx)
    }

    /// Sender for host inputs (drag samples, safe-area and content notifications).
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    pub fn config(&self) -> &NoticeConfig {
        &self.config
    }

    /// Replace the configuration. Applies to notices activated afterwards.
    pub fn set_config(&mut self, config: NoticeConfig) {
        self.config = config;
    }

    pub fn set_default_show_animation(&mut self, runner: Option<Rc<dyn AnimationRunner>>) {
        self.default_show_animation = runner;
    }

    pub fn set_default_hide_animation(&mut self, runner: Option<Rc<dyn AnimationRunner>>) {
        self.default_hide_animation = runner;
    }

    /// Queue a notice. Inert requests (no content or no target) are accepted
    /// but never shown.
    pub fn submit(&mut self, request: NoticeRequest) -> NoticeId {
        let id = NoticeId(self.next_id);
        self.next_id += 1;

        if request.is_inert() {
            debug!(?id, ?request, "ignoring notice without content or target");
            return id;
        }

        trace!(?id, pending = self.pending.len(), "notice queued");
        self.pending.push_back((id, request));

        if self.active.is_none() {
            self.open_surface();
        }
        id
    }

    /// Notice currently owning the overlay surface.
    pub fn current_notice(&self) -> Option<NoticeId> {
        self.active.as_ref().map(NoticeSession::id)
    }

    pub fn session_state(&self) -> Option<SessionState> {
        self.active.as_ref().map(NoticeSession::state)
    }

    pub fn presentation(&self) -> Option<&PresentationState> {
        self.active.as_ref().map(NoticeSession::presentation)
    }

    pub fn active_session(&self) -> Option<&NoticeSession> {
        self.active.as_ref()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_surface_alive(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.pending.is_empty()
    }

    /// Drop every queued notice. With `hide_active`, the active notice starts
    /// hiding as well; otherwise it runs to completion.
    pub fn remove_all(&mut self, hide_active: bool) {
        debug!(dropped = self.pending.len(), hide_active, "removing queued notices");
        self.pending.clear();

        if hide_active {
            self.with_active(|session, platform| session.hide(platform, true));
        }
    }

    /// Dismiss the active notice.
    pub fn dismiss(&mut self, animated: bool) {
        self.with_active(|session, platform| session.hide(platform, animated));
    }

    /// Change the auto-hide policy of a queued or active notice.
    pub fn set_auto_hide(&mut self, id: NoticeId, auto_hide: AutoHide) {
        if self.current_notice() == Some(id) {
            self.with_active(|session, platform| session.set_auto_hide(platform, auto_hide));
        } else if let Some((_, request)) = self.pending.iter_mut().find(|(n, _)| *n == id) {
            request.auto_hide = auto_hide;
        } else {
            trace!(?id, "auto-hide change for unknown notice");
        }
    }

    /// Apply one asynchronous input to the active notice.
    pub fn update(&mut self, event: Event) {
        let Some(session) = self.active.as_mut() else {
            trace!(?event, "no active notice");
            return;
        };
        let platform = &mut self.platform;

        let step = match event {
            Event::AnimationFinished {
                notice,
                generation,
                phase,
                finished,
            } => {
                if notice != session.id() {
                    trace!(?notice, "animation of a finished notice");
                    return;
                }
                session.on_animation_finished(platform, generation, phase, finished)
            }
            Event::TimerFired { notice, generation } => {
                if notice != session.id() {
                    trace!(?notice, "countdown of a finished notice");
                    return;
                }
                session.on_timer_fired(platform, generation)
            }
            Event::Drag(drag) => session.on_drag(platform, drag),
            Event::SafeAreaChanged(insets) => session.on_safe_area_changed(platform, insets),
            Event::ContentResized => session.on_content_resized(platform),
            Event::ContentDragBegan => session.on_content_drag_began(),
            Event::ContentScrolled { offset } => session.on_content_scrolled(offset),
            Event::ContentDidEndDragging { will_decelerate } => {
                session.on_content_end_dragging(platform, will_decelerate)
            }
            Event::ContentDidEndDecelerating => session.on_content_end_decelerating(platform),
        };

        if step == Step::Disposed {
            self.finish_session();
        }
    }

    /// Drain `events` until the queue has nothing left to show.
    ///
    /// Also returns when the overlay surface could not be created: the
    /// remaining requests stay queued until the next [`NoticeQueue::submit`].
    pub async fn run_until_idle(&mut self, events: &mut UnboundedReceiver<Event>) {
        while !self.is_idle() {
            if self.active.is_none() && !self.is_surface_alive() {
                debug!(pending = self.pending.len(), "no overlay surface, waiting for the next submit");
                break;
            }
            let Some(event) = events.recv().await else {
                break;
            };
            self.update(event);
        }
    }

    fn with_active(&mut self, f: impl FnOnce(&mut NoticeSession, &mut Platform) -> Step) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        if f(session, &mut self.platform) == Step::Disposed {
            self.finish_session();
        }
    }

    fn open_surface(&mut self) {
        if self.surface.is_none() {
            match self.platform.surfaces.create_surface() {
                Ok(surface) => {
                    debug!(?surface, "overlay surface created");
                    self.platform.surfaces.make_key(surface);
                    self.surface = Some(surface);
                }
                Err(err) => {
                    error!("Failed to create overlay surface: {}", err);
                    return;
                }
            }
        }
        self.advance();
    }

    /// Completion first, then the next notice, so a completion that submits
    /// sees its notice queued behind the ones already waiting.
    fn finish_session(&mut self) {
        let completion = self
            .active
            .as_mut()
            .and_then(NoticeSession::take_completion);
        if let Some(completion) = completion {
            completion(self);
        }
        self.advance();
    }

    fn advance(&mut self) {
        match self.pending.pop_front() {
            Some((id, request)) => self.start(id, request),
            None => self.close_surface(),
        }
    }

    fn start(&mut self, id: NoticeId, request: NoticeRequest) {
        let Some(surface) = self.surface else {
            error!(?id, "no overlay surface to show the notice on");
            self.pending.push_front((id, request));
            return;
        };

        let defaults = SessionDefaults {
            config: &self.config,
            show_animation: self
                .default_show_animation
                .clone()
                .unwrap_or_else(|| self.platform.animator.clone()),
            hide_animation: self
                .default_hide_animation
                .clone()
                .unwrap_or_else(|| self.platform.animator.clone()),
        };
        let Some(session) = NoticeSession::new(id, request, defaults, self.tx.clone()) else {
            self.advance();
            return;
        };

        self.platform
            .surfaces
            .set_level(surface, session.surface_level());
        if let Some(host_surface) = self.platform.surfaces.surface_of(session.target()) {
            self.restore_surface = Some(host_surface);
        }

        let session = self.active.insert(session);
        session.activate(&mut self.platform, surface);
    }

    fn close_surface(&mut self) {
        if let Some(session) = self.active.take() {
            session.refresh_status_bar(&mut self.platform);
        }
        if let Some(host_surface) = self.restore_surface.take() {
            self.platform.surfaces.make_key(host_surface);
        }
        if let Some(surface) = self.surface.take() {
            debug!(?surface, "overlay surface destroyed");
            self.platform.surfaces.destroy_surface(surface);
        }
    }
}

impl std::fmt::Debug for NoticeQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeQueue")
            .field("pending", &self.pending)
            .field("active", &self.active)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}
