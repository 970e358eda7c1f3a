use crate::handlers::events::Event;
use crate::request::{AutoHide, NoticeId};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Result of [`AutoHideTimer::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStart {
    /// Auto-hide is off, nothing was scheduled
    Disarmed,
    /// A countdown is running; its fire event carries this generation
    Scheduled(u64),
    /// Zero interval: the caller must run the fire handler now
    Immediate,
}

#[derive(Debug)]
struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Single-slot auto-hide countdown.
///
/// Starting a countdown replaces the previous one. A countdown posts
/// [`Event::TimerFired`] when it expires; a fire event whose generation does
/// not match the pending slot is stale and must be ignored.
#[derive(Debug, Default)]
pub struct AutoHideTimer {
    mode: AutoHide,
    pending: Option<PendingTimer>,
    generation: u64,
}

impl AutoHideTimer {
    pub fn new(mode: AutoHide) -> Self {
        Self {
            mode,
            pending: None,
            generation: 0,
        }
    }

    pub fn mode(&self) -> AutoHide {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AutoHide) {
        self.mode = mode;
        if !mode.is_armed() {
            self.invalidate();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.mode.is_armed()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn disarm(&mut self) {
        self.set_mode(AutoHide::Never);
    }

    /// Start a fresh countdown for `notice`, replacing any pending one.
    pub fn start(&mut self, notice: NoticeId, tx: &UnboundedSender<Event>) -> TimerStart {
        self.invalidate();

        let interval = match self.mode {
            AutoHide::Never => return TimerStart::Disarmed,
            AutoHide::After(interval) if interval.is_zero() => return TimerStart::Immediate,
            AutoHide::After(interval) => interval,
        };

        let Ok(runtime) = Handle::try_current() else {
            tracing::error!(?notice, "no async runtime, auto-hide countdown not started");
            return TimerStart::Disarmed;
        };

        self.generation += 1;
        let generation = self.generation;
        let tx = tx.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(interval).await;
            _ = tx.send(Event::TimerFired { notice, generation });
        });
        self.pending = Some(PendingTimer { generation, handle });
        tracing::trace!(?notice, generation, ?interval, "auto-hide countdown started");

        TimerStart::Scheduled(generation)
    }

    pub fn invalidate(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    /// Consume the pending slot if `generation` is the countdown that fired.
    pub fn take_fired(&mut self, generation: u64) -> bool {
        match &self.pending {
            Some(pending) if pending.generation == generation => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for AutoHideTimer {
    fn drop(&mut self) {
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_never_is_disarmed() {
        let (tx, _rx) = unbounded_channel();
        let mut timer = AutoHideTimer::new(AutoHide::Never);
        assert_eq!(timer.start(NoticeId(1), &tx), TimerStart::Disarmed);
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_zero_interval_fires_immediately() {
        let (tx, _rx) = unbounded_channel();
        let mut timer = AutoHideTimer::new(AutoHide::After(Duration::ZERO));
        assert_eq!(timer.start(NoticeId(1), &tx), TimerStart::Immediate);
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_posts_fire_event() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = AutoHideTimer::new(AutoHide::After(Duration::from_secs(2)));

        let TimerStart::Scheduled(generation) = timer.start(NoticeId(4), &tx) else {
            panic!("countdown not scheduled");
        };
        assert!(timer.is_pending());

        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            Event::TimerFired {
                notice: NoticeId(4),
                generation
            }
        );
        assert!(timer.take_fired(generation));
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_pending_countdown() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = AutoHideTimer::new(AutoHide::After(Duration::from_secs(1)));

        let first = timer.start(NoticeId(1), &tx);
        let second = timer.start(NoticeId(1), &tx);
        assert_ne!(first, second);

        let TimerStart::Scheduled(generation) = second else {
            panic!("countdown not scheduled");
        };
        let event = rx.recv().await.unwrap();
        assert_eq!(
            event,
            Event::TimerFired {
                notice: NoticeId(1),
                generation
            }
        );

        let TimerStart::Scheduled(stale) = first else {
            panic!("countdown not scheduled");
        };
        assert!(!timer.take_fired(stale));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarm_cancels_countdown() {
        let (tx, mut rx) = unbounded_channel();
        let mut timer = AutoHideTimer::new(AutoHide::After(Duration::from_secs(1)));
        timer.start(NoticeId(1), &tx);
        timer.disarm();

        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
        assert!(!timer.is_armed());
    }
}
