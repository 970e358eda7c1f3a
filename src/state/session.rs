use crate::handlers::events::Event;
use crate::platform::{
    AnimationCompletion, AnimationRunner, ContentId, HostId, Platform, SurfaceId, SurfaceLevel,
};
use crate::request::{AutoHide, Completion, NoticeId, NoticeRequest};
use crate::state::timer::{AutoHideTimer, TimerStart};
use navigation_notice_config::NoticeConfig;
use navigation_notice_util::{
    AnimationCurve, AnimationPhase, AnimationSpec, DragEvent, EdgeInsets, GestureController,
    GestureOutcome, GestureState, Position, PresentationState, Release, allow_simultaneous,
    compute_layout,
};
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, trace};

/// Lifecycle of a single notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    /// Content attached, show animation running
    Attaching,
    /// Fully shown and interactive
    Shown,
    /// Hide animation running
    Dismissing,
    /// Content detached; the queue may advance
    Disposed,
}

/// What the queue has to do after feeding an input to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Step {
    Continue,
    /// The session just reached [`SessionState::Disposed`]
    Disposed,
}

/// Fallbacks applied to options a request leaves unset.
pub(crate) struct SessionDefaults<'a> {
    pub config: &'a NoticeConfig,
    pub show_animation: Rc<dyn AnimationRunner>,
    pub hide_animation: Rc<dyn AnimationRunner>,
}

/// One notice from activation to disposal.
pub struct NoticeSession {
    id: NoticeId,
    content: ContentId,
    target: HostId,
    surface: Option<SurfaceId>,
    position: Position,
    show_safe_area: bool,
    on_status_bar: bool,
    show_animation: Rc<dyn AnimationRunner>,
    hide_animation: Rc<dyn AnimationRunner>,
    show_curve: AnimationCurve,
    hide_curve: AnimationCurve,
    completion: Option<Completion>,
    state: SessionState,
    presentation: PresentationState,
    gesture: GestureController,
    drag_attached: bool,
    content_dragging: bool,
    timer: AutoHideTimer,
    insets: EdgeInsets,
    host_height: f64,
    animation_generation: u64,
    tx: UnboundedSender<Event>,
}

impl NoticeSession {
    /// Resolve `request` against `defaults`. Returns `None` for inert requests.
    pub(crate) fn new(
        id: NoticeId,
        request: NoticeRequest,
        defaults: SessionDefaults<'_>,
        tx: UnboundedSender<Event>,
    ) -> Option<Self> {
        let (Some(content), Some(target)) = (request.content, request.target) else {
            return None;
        };
        let config = defaults.config;
        let position = request.position.unwrap_or(config.default_position);

        Some(Self {
            id,
            content,
            target,
            surface: None,
            position,
            show_safe_area: request
                .show_safe_area
                .unwrap_or(config.default_show_safe_area),
            on_status_bar: request.on_status_bar.unwrap_or(config.default_on_status_bar),
            show_animation: request.show_animation.unwrap_or(defaults.show_animation),
            hide_animation: request.hide_animation.unwrap_or(defaults.hide_animation),
            show_curve: config.show_animation,
            hide_curve: config.hide_animation,
            completion: request.completion,
            state: SessionState::Created,
            presentation: PresentationState::new(position, 0.0),
            gesture: GestureController::new(),
            drag_attached: false,
            content_dragging: false,
            timer: AutoHideTimer::new(request.auto_hide),
            insets: EdgeInsets::ZERO,
            host_height: 0.0,
            animation_generation: 0,
            tx,
        })
    }

    pub fn id(&self) -> NoticeId {
        self.id
    }

    pub fn target(&self) -> HostId {
        self.target
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    pub fn drag_active(&self) -> bool {
        self.gesture.is_dragging()
    }

    pub fn on_status_bar(&self) -> bool {
        self.on_status_bar
    }

    pub fn surface_level(&self) -> SurfaceLevel {
        SurfaceLevel::for_status_bar(self.on_status_bar)
    }

    pub fn is_timer_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub(crate) fn take_completion(&mut self) -> Option<Completion> {
        self.completion.take()
    }

    /// Attach the content to `surface` and start revealing it.
    pub(crate) fn activate(&mut self, platform: &mut Platform, surface: SurfaceId) {
        if self.state != SessionState::Created {
            return;
        }
        debug!(notice = ?self.id, ?surface, position = ?self.position, "attaching notice");

        self.surface = Some(surface);
        self.state = SessionState::Attaching;
        self.insets = platform.safe_area.insets(surface);
        platform.content.attach(self.content, surface);
        self.relayout(platform, false);
        self.play_show();
        self.refresh_status_bar(platform);
    }

    pub(crate) fn on_animation_finished(
        &mut self,
        platform: &mut Platform,
        generation: u64,
        phase: AnimationPhase,
        finished: bool,
    ) -> Step {
        if generation != self.animation_generation {
            trace!(notice = ?self.id, generation, "stale animation completion");
            return Step::Continue;
        }
        if !finished {
            debug!(notice = ?self.id, ?phase, "animation interrupted");
        }

        match (phase, self.state) {
            (AnimationPhase::Show, SessionState::Attaching) => {
                self.state = SessionState::Shown;
                platform.drag.attach(self.target, allow_simultaneous);
                self.drag_attached = true;
                debug!(notice = ?self.id, "notice shown");
                self.start_timer(platform)
            }
            (AnimationPhase::Show, SessionState::Shown) => {
                self.gesture.finish_settling();
                if !self.drag_active() && !self.timer.is_pending() {
                    self.start_timer(platform)
                } else {
                    Step::Continue
                }
            }
            (AnimationPhase::Hide, SessionState::Dismissing) => self.dispose(platform),
            _ => Step::Continue,
        }
    }

    pub(crate) fn on_timer_fired(&mut self, platform: &mut Platform, generation: u64) -> Step {
        if !self.timer.take_fired(generation) {
            trace!(notice = ?self.id, generation, "stale auto-hide countdown");
            return Step::Continue;
        }
        self.auto_hide_elapsed(platform)
    }

    pub(crate) fn on_drag(&mut self, platform: &mut Platform, event: DragEvent) -> Step {
        if self.state != SessionState::Shown {
            trace!(notice = ?self.id, state = ?self.state, "drag ignored");
            return Step::Continue;
        }

        match self
            .gesture
            .handle(&event, &mut self.presentation, self.host_height)
        {
            GestureOutcome::Ignored => Step::Continue,
            GestureOutcome::Began => {
                self.timer.invalidate();
                Step::Continue
            }
            GestureOutcome::Moved => {
                platform
                    .content
                    .set_offset(self.content, self.presentation.offset());
                Step::Continue
            }
            GestureOutcome::ForceHide => self.hide(platform, false),
            GestureOutcome::Released(Release::SnapToRest) => {
                platform
                    .content
                    .set_offset(self.content, self.presentation.offset());
                // The countdown was cancelled when the drag began
                if self.timer.is_armed() && self.start_timer(platform) == Step::Disposed {
                    return Step::Disposed;
                }
                self.hide_if_needed(platform)
            }
            GestureOutcome::Released(Release::Show) => {
                self.play_show();
                self.refresh_status_bar(platform);
                Step::Continue
            }
            GestureOutcome::Released(Release::Hide) => self.hide(platform, true),
        }
    }

    pub(crate) fn on_safe_area_changed(
        &mut self,
        platform: &mut Platform,
        insets: EdgeInsets,
    ) -> Step {
        if !self.is_attached() {
            return Step::Continue;
        }
        self.insets = insets;
        let reapply_rest = self.show_safe_area && self.is_settled();
        self.relayout(platform, reapply_rest);
        Step::Continue
    }

    pub(crate) fn on_content_resized(&mut self, platform: &mut Platform) -> Step {
        if !self.is_attached() {
            return Step::Continue;
        }
        let reapply_rest = self.is_settled();
        self.relayout(platform, reapply_rest);
        Step::Continue
    }

    pub(crate) fn on_content_drag_began(&mut self) -> Step {
        self.content_dragging = true;
        Step::Continue
    }

    pub(crate) fn on_content_scrolled(&mut self, offset: f64) -> Step {
        if self.state == SessionState::Shown && !self.drag_active() {
            self.presentation.set_offset(offset);
        }
        Step::Continue
    }

    pub(crate) fn on_content_end_dragging(
        &mut self,
        platform: &mut Platform,
        will_decelerate: bool,
    ) -> Step {
        self.content_dragging = false;
        if self.state == SessionState::Shown && !will_decelerate && !self.timer.is_pending() {
            return self.start_timer(platform);
        }
        Step::Continue
    }

    pub(crate) fn on_content_end_decelerating(&mut self, platform: &mut Platform) -> Step {
        if self.state != SessionState::Shown {
            return Step::Continue;
        }
        if self.presentation.is_visible() {
            self.start_timer(platform)
        } else {
            self.hide(platform, false)
        }
    }

    /// Change the auto-hide policy. An interactive notice re-arms right away.
    pub(crate) fn set_auto_hide(&mut self, platform: &mut Platform, auto_hide: AutoHide) -> Step {
        self.timer.set_mode(auto_hide);
        if self.state == SessionState::Shown && auto_hide.is_armed() {
            self.start_timer(platform)
        } else {
            Step::Continue
        }
    }

    /// Dismiss the notice. Ignored once dismissal has started.
    pub(crate) fn hide(&mut self, platform: &mut Platform, animated: bool) -> Step {
        match self.state {
            SessionState::Dismissing | SessionState::Disposed => {
                trace!(notice = ?self.id, "already dismissing");
                return Step::Continue;
            }
            SessionState::Created | SessionState::Attaching | SessionState::Shown => {}
        }
        debug!(notice = ?self.id, animated, "dismissing notice");

        if self.drag_attached {
            platform.drag.detach(self.target);
            self.drag_attached = false;
        }
        self.timer.disarm();
        self.gesture.reset();
        self.state = SessionState::Dismissing;

        if animated {
            let from = self.presentation.offset();
            self.presentation.conceal();
            self.animate(AnimationPhase::Hide, from);
            self.refresh_status_bar(platform);
            Step::Continue
        } else {
            self.refresh_status_bar(platform);
            self.dispose(platform)
        }
    }

    pub(crate) fn refresh_status_bar(&self, platform: &mut Platform) {
        if let (true, Some(surface)) = (self.on_status_bar, self.surface) {
            platform.surfaces.refresh_status_bar(surface);
        }
    }

    /// Hide only when auto-hide is armed and no countdown is pending.
    fn hide_if_needed(&mut self, platform: &mut Platform) -> Step {
        if self.timer.is_armed() && !self.timer.is_pending() {
            self.hide(platform, true)
        } else {
            Step::Continue
        }
    }

    fn auto_hide_elapsed(&mut self, platform: &mut Platform) -> Step {
        if self.state != SessionState::Shown || !self.timer.is_armed() {
            return Step::Continue;
        }
        if self.drag_active() || self.content_dragging {
            trace!(notice = ?self.id, "auto-hide deferred by an active drag");
            return Step::Continue;
        }
        self.hide(platform, true)
    }

    fn start_timer(&mut self, platform: &mut Platform) -> Step {
        match self.timer.start(self.id, &self.tx) {
            TimerStart::Immediate => self.auto_hide_elapsed(platform),
            TimerStart::Scheduled(_) | TimerStart::Disarmed => Step::Continue,
        }
    }

    fn play_show(&mut self) {
        let from = self.presentation.offset();
        self.presentation.reveal();
        self.animate(AnimationPhase::Show, from);
    }

    fn animate(&mut self, phase: AnimationPhase, from: f64) {
        self.animation_generation += 1;
        let (runner, curve) = match phase {
            AnimationPhase::Show => (self.show_animation.clone(), self.show_curve),
            AnimationPhase::Hide => (self.hide_animation.clone(), self.hide_curve),
        };
        let spec = AnimationSpec {
            phase,
            from,
            to: self.presentation.offset(),
            curve,
        };
        let completion =
            AnimationCompletion::new(self.tx.clone(), self.id, self.animation_generation, phase);
        runner.animate(self.content, spec, completion);
    }

    fn dispose(&mut self, platform: &mut Platform) -> Step {
        platform.content.detach(self.content);
        self.timer.invalidate();
        self.state = SessionState::Disposed;
        debug!(notice = ?self.id, "notice disposed");
        Step::Disposed
    }

    fn relayout(&mut self, platform: &mut Platform, reapply_rest: bool) {
        let Some(surface) = self.surface else {
            return;
        };
        let size = platform.surfaces.surface_size(surface);
        let content_height = platform.content.content_height(self.content);
        let insets = if self.show_safe_area {
            self.insets
        } else {
            EdgeInsets::ZERO
        };

        let layout = compute_layout(self.position, content_height, insets, size);
        self.host_height = size.height;
        self.presentation.set_content_height(content_height);
        platform.content.apply_layout(self.content, &layout);
        trace!(notice = ?self.id, ?layout, "notice laid out");

        if reapply_rest {
            self.presentation.reveal();
            platform
                .content
                .set_offset(self.content, self.presentation.offset());
        }
    }

    fn is_attached(&self) -> bool {
        matches!(self.state, SessionState::Attaching | SessionState::Shown)
    }

    /// Shown and not moved by a gesture or a settling animation.
    fn is_settled(&self) -> bool {
        self.state == SessionState::Shown && self.gesture.state() == GestureState::Idle
    }
}

impl std::fmt::Debug for NoticeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoticeSession")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("target", &self.target)
            .field("state", &self.state)
            .field("presentation", &self.presentation)
            .field("gesture", &self.gesture.state())
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
