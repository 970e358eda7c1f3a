//! Recording fakes for the host capabilities.

#![allow(dead_code)]

use navigation_notice::util::{AnimationPhase, AnimationSpec, DragEvent, EdgeInsets, Layout, Size};
use navigation_notice::{
    AnimationCompletion, AnimationRunner, ContentHost, ContentId, DragInputSource, Event, HostId,
    NoticeConfig, NoticeQueue, NoticeRequest, Platform, SafeAreaProvider, SurfaceError,
    SurfaceFactory, SurfaceId, SurfaceLevel,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedReceiver;

pub const HOST: HostId = HostId(7);
pub const HOST_SURFACE: SurfaceId = SurfaceId(1);
pub const SURFACE_SIZE: Size = Size::new(400.0, 800.0);
pub const CONTENT_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateSurface(SurfaceId),
    DestroySurface(SurfaceId),
    SetLevel(SurfaceId, SurfaceLevel),
    MakeKey(SurfaceId),
    RefreshStatusBar(SurfaceId),
    Attach(ContentId),
    Detach(ContentId),
    Layout(ContentId, Layout),
    SetOffset(ContentId, f64),
    DragAttach(HostId),
    DragDetach(HostId),
    Animate(&'static str, ContentId, AnimationPhase),
    Completed(u64),
}

pub struct PendingAnimation {
    pub content: ContentId,
    pub spec: AnimationSpec,
    pub completion: AnimationCompletion,
}

#[derive(Default)]
pub struct Recorder {
    calls: RefCell<Vec<Call>>,
    animations: RefCell<VecDeque<PendingAnimation>>,
    heights: RefCell<HashMap<ContentId, f64>>,
    insets: Cell<EdgeInsets>,
    fail_surfaces: Cell<bool>,
    next_surface: Cell<u64>,
}

impl Recorder {
    pub fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| matches(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn set_height(&self, content: ContentId, height: f64) {
        self.heights.borrow_mut().insert(content, height);
    }

    pub fn set_insets(&self, insets: EdgeInsets) {
        self.insets.set(insets);
    }

    pub fn fail_surfaces(&self, fail: bool) {
        self.fail_surfaces.set(fail);
    }

    pub fn pending_animations(&self) -> usize {
        self.animations.borrow().len()
    }
}

/// Completion that records `Call::Completed(n)` when it runs.
pub fn completion_marker(rec: &Rc<Recorder>, n: u64) -> impl FnOnce(&mut NoticeQueue) + 'static {
    let rec = Rc::clone(rec);
    move |_| rec.record(Call::Completed(n))
}

struct FakeSurfaces(Rc<Recorder>);

impl SurfaceFactory for FakeSurfaces {
    fn create_surface(&mut self) -> Result<SurfaceId, SurfaceError> {
        if self.0.fail_surfaces.get() {
            return Err(SurfaceError::NoDisplay);
        }
        let id = SurfaceId(100 + self.0.next_surface.get());
        self.0.next_surface.set(self.0.next_surface.get() + 1);
        self.0.record(Call::CreateSurface(id));
        Ok(id)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        self.0.record(Call::DestroySurface(surface));
    }

    fn set_level(&mut self, surface: SurfaceId, level: SurfaceLevel) {
        self.0.record(Call::SetLevel(surface, level));
    }

    fn make_key(&mut self, surface: SurfaceId) {
        self.0.record(Call::MakeKey(surface));
    }

    fn surface_of(&self, host: HostId) -> Option<SurfaceId> {
        (host == HOST).then_some(HOST_SURFACE)
    }

    fn surface_size(&self, _surface: SurfaceId) -> Size {
        SURFACE_SIZE
    }

    fn refresh_status_bar(&mut self, surface: SurfaceId) {
        self.0.record(Call::RefreshStatusBar(surface));
    }
}

struct FakeContent(Rc<Recorder>);

impl ContentHost for FakeContent {
    fn content_height(&self, content: ContentId) -> f64 {
        self.0
            .heights
            .borrow()
            .get(&content)
            .copied()
            .unwrap_or(CONTENT_HEIGHT)
    }

    fn attach(&mut self, content: ContentId, _surface: SurfaceId) {
        self.0.record(Call::Attach(content));
    }

    fn detach(&mut self, content: ContentId) {
        self.0.record(Call::Detach(content));
    }

    fn apply_layout(&mut self, content: ContentId, layout: &Layout) {
        self.0.record(Call::Layout(content, *layout));
    }

    fn set_offset(&mut self, content: ContentId, offset: f64) {
        self.0.record(Call::SetOffset(content, offset));
    }
}

struct FakeSafeArea(Rc<Recorder>);

impl SafeAreaProvider for FakeSafeArea {
    fn insets(&self, _surface: SurfaceId) -> EdgeInsets {
        self.0.insets.get()
    }
}

struct FakeDrag(Rc<Recorder>);

impl DragInputSource for FakeDrag {
    fn attach(&mut self, host: HostId, _policy: navigation_notice::platform::SimultaneousPolicy) {
        self.0.record(Call::DragAttach(host));
    }

    fn detach(&mut self, host: HostId) {
        self.0.record(Call::DragDetach(host));
    }
}

/// Holds animations until the test completes them.
pub struct FakeAnimator {
    pub name: &'static str,
    rec: Rc<Recorder>,
}

impl FakeAnimator {
    pub fn new(name: &'static str, rec: &Rc<Recorder>) -> Rc<Self> {
        Rc::new(Self {
            name,
            rec: Rc::clone(rec),
        })
    }
}

impl AnimationRunner for FakeAnimator {
    fn animate(&self, content: ContentId, spec: AnimationSpec, completion: AnimationCompletion) {
        self.rec.record(Call::Animate(self.name, content, spec.phase));
        self.rec.animations.borrow_mut().push_back(PendingAnimation {
            content,
            spec,
            completion,
        });
    }
}

pub struct Harness {
    pub queue: NoticeQueue,
    pub events: UnboundedReceiver<Event>,
    pub rec: Rc<Recorder>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(NoticeConfig::default())
    }

    pub fn with_config(config: NoticeConfig) -> Self {
        let rec = Rc::new(Recorder::default());
        let platform = Platform {
            surfaces: Box::new(FakeSurfaces(Rc::clone(&rec))),
            content: Box::new(FakeContent(Rc::clone(&rec))),
            safe_area: Box::new(FakeSafeArea(Rc::clone(&rec))),
            drag: Box::new(FakeDrag(Rc::clone(&rec))),
            animator: FakeAnimator::new("default", &rec),
        };
        let (queue, events) = NoticeQueue::new(platform, config);
        Self { queue, events, rec }
    }

    pub fn request(content: u64) -> NoticeRequest {
        NoticeRequest::new().content(ContentId(content)).show_on(HOST)
    }

    /// Apply every event posted so far.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.queue.update(event);
        }
    }

    /// Complete the oldest running animation and apply the result.
    pub fn finish_animation(&mut self) -> AnimationSpec {
        let next = self.rec.animations.borrow_mut().pop_front();
        let animation = next.expect("no running animation");
        let spec = animation.spec;
        animation.completion.complete(true);
        self.pump();
        spec
    }

    /// Submit a notice and run its show animation to the end.
    pub fn show(&mut self, request: NoticeRequest) -> navigation_notice::NoticeId {
        let id = self.queue.submit(request);
        self.finish_animation();
        id
    }

    /// Wait for the next posted event and apply it.
    pub async fn next_event(&mut self) -> Event {
        let event = self.events.recv().await.expect("event channel closed");
        self.queue.update(event.clone());
        event
    }

    pub fn drag(&mut self, event: DragEvent) {
        self.queue.update(Event::Drag(event));
    }

    pub fn offset(&self) -> f64 {
        self.queue
            .presentation()
            .map(|p| p.offset())
            .expect("no active notice")
    }
}
