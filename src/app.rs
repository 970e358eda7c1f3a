// Headless demo host
// ==================
//
// Drives a `NoticeQueue` without a window system. Every capability logs what
// a real host would do, and animations complete after their configured
// duration on the tokio clock. Useful to watch the queue sequencing with
// `RUST_LOG=navigation_notice=debug`.

use crate::constants::*;
use crate::platform::{
    AnimationCompletion, AnimationRunner, ContentHost, ContentId, DragInputSource, HostId,
    Platform, SafeAreaProvider, SimultaneousPolicy, SurfaceError, SurfaceFactory, SurfaceId,
    SurfaceLevel,
};
use crate::request::{AutoHide, NoticeRequest};
use crate::state::queue::NoticeQueue;
use navigation_notice_config::{NoticeConfig, Position};
use navigation_notice_util::{AnimationSpec, EdgeInsets, Layout, Size};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::info;

pub fn run(config: NoticeConfig) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async move {
        let (mut queue, mut events) = NoticeQueue::new(demo_platform(), config);

        queue.submit(
            NoticeRequest::new()
                .content(ContentId(1))
                .show_on(DEMO_HOST)
                .auto_hide(AutoHide::After(DEMO_AUTO_HIDE))
                .completion(|queue| {
                    info!("first notice dismissed, queueing a follow-up");
                    queue.submit(
                        NoticeRequest::new()
                            .content(ContentId(3))
                            .show_on(DEMO_HOST)
                            .position(Position::Bottom)
                            .auto_hide(AutoHide::After(DEMO_AUTO_HIDE)),
                    );
                }),
        );
        queue.submit(
            NoticeRequest::new()
                .content(ContentId(2))
                .show_on(DEMO_HOST)
                .on_status_bar(false)
                .auto_hide(AutoHide::After(DEMO_AUTO_HIDE)),
        );

        queue.run_until_idle(&mut events).await;
        info!("all notices dismissed");
    });

    Ok(())
}

fn demo_platform() -> Platform {
    Platform {
        surfaces: Box::new(DemoSurfaces { next_id: 100 }),
        content: Box::new(DemoContent {
            heights: DEMO_CONTENT.iter().copied().collect(),
        }),
        safe_area: Box::new(DemoSafeArea),
        drag: Box::new(DemoDrag),
        animator: Rc::new(TimedAnimator),
    }
}

struct DemoSurfaces {
    next_id: u64,
}

impl SurfaceFactory for DemoSurfaces {
    fn create_surface(&mut self) -> Result<SurfaceId, SurfaceError> {
        let surface = SurfaceId(self.next_id);
        self.next_id += 1;
        info!(?surface, "create overlay surface");
        Ok(surface)
    }

    fn destroy_surface(&mut self, surface: SurfaceId) {
        info!(?surface, "destroy overlay surface");
    }

    fn set_level(&mut self, surface: SurfaceId, level: SurfaceLevel) {
        info!(?surface, ?level, "set surface level");
    }

    fn make_key(&mut self, surface: SurfaceId) {
        info!(?surface, "make key surface");
    }

    fn surface_of(&self, _host: HostId) -> Option<SurfaceId> {
        Some(DEMO_MAIN_SURFACE)
    }

    fn surface_size(&self, _surface: SurfaceId) -> Size {
        DEMO_SURFACE_SIZE
    }

    fn refresh_status_bar(&mut self, surface: SurfaceId) {
        tracing::debug!(?surface, "refresh status bar appearance");
    }
}

struct DemoContent {
    heights: HashMap<ContentId, f64>,
}

impl ContentHost for DemoContent {
    fn content_height(&self, content: ContentId) -> f64 {
        self.heights
            .get(&content)
            .copied()
            .unwrap_or(DEMO_CONTENT_HEIGHT)
    }

    fn attach(&mut self, content: ContentId, surface: SurfaceId) {
        info!(?content, ?surface, "attach content");
    }

    fn detach(&mut self, content: ContentId) {
        info!(?content, "detach content");
    }

    fn apply_layout(&mut self, content: ContentId, layout: &Layout) {
        tracing::debug!(?content, ?layout, "apply layout");
    }

    fn set_offset(&mut self, content: ContentId, offset: f64) {
        tracing::debug!(?content, offset, "set offset");
    }
}

struct DemoSafeArea;

impl SafeAreaProvider for DemoSafeArea {
    fn insets(&self, _surface: SurfaceId) -> EdgeInsets {
        DEMO_SAFE_AREA
    }
}

struct DemoDrag;

impl DragInputSource for DemoDrag {
    fn attach(&mut self, host: HostId, _policy: SimultaneousPolicy) {
        tracing::debug!(?host, "attach drag recognizer");
    }

    fn detach(&mut self, host: HostId) {
        tracing::debug!(?host, "detach drag recognizer");
    }
}

/// Completes every animation once its duration elapsed.
struct TimedAnimator;

impl AnimationRunner for TimedAnimator {
    fn animate(&self, content: ContentId, spec: AnimationSpec, completion: AnimationCompletion) {
        info!(?content, phase = ?spec.phase, from = spec.from, to = spec.to, "animate");
        tokio::spawn(async move {
            tokio::time::sleep(spec.duration()).await;
            completion.complete(true);
        });
    }
}
