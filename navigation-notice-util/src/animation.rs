use crate::AnimationCurve;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    Show,
    Hide,
}

/// A scroll offset transition to be rendered by an animation runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub phase: AnimationPhase,
    pub from: f64,
    pub to: f64,
    pub curve: AnimationCurve,
}

impl AnimationSpec {
    pub fn duration(&self) -> Duration {
        self.curve.duration()
    }

    /// Offset at `progress` (0.0 to 1.0) for runners that interpolate linearly.
    pub fn offset_at(&self, progress: f64) -> f64 {
        let progress = progress.clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}
