use cosmic_config::{CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry};
use std::time::Duration;

pub const ID: &str = "io.github.NavigationNotice";

/// Edge of the host view a notice is anchored to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

/// Timing parameters handed to an animation runner.
///
/// The runner decides how to interpret them; the defaults describe a damped
/// spring like the one used by most mobile toolkits.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationCurve {
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// Spring damping ratio, 1.0 means no oscillation.
    pub damping: f32,
    /// Initial spring velocity, relative to the total distance travelled.
    pub initial_velocity: f32,
}

impl AnimationCurve {
    pub const fn new(duration_ms: u64, damping: f32, initial_velocity: f32) -> Self {
        Self {
            duration_ms,
            damping,
            initial_velocity,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, CosmicConfigEntry)]
#[version = 1]
pub struct NoticeConfig {
    /// Whether notices are layered above the status bar unless a request says otherwise.
    #[serde(default = "default_true")]
    pub default_on_status_bar: bool,
    /// Whether notices respect the host's safe-area insets unless a request says otherwise.
    #[serde(default = "default_true")]
    pub default_show_safe_area: bool,
    /// Edge used for requests that do not pick one.
    #[serde(default)]
    pub default_position: Position,
    /// Curve used when revealing a notice (default: 500ms, damping 0.7, velocity 0).
    #[serde(default = "default_show_animation")]
    pub show_animation: AnimationCurve,
    /// Curve used when hiding a notice (default: 250ms, damping 1.0, velocity 1).
    #[serde(default = "default_hide_animation")]
    pub hide_animation: AnimationCurve,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            default_on_status_bar: default_true(),
            default_show_safe_area: default_true(),
            default_position: Position::default(),
            show_animation: default_show_animation(),
            hide_animation: default_hide_animation(),
        }
    }
}

// Default value helpers for serde
const fn default_true() -> bool {
    true
}

const fn default_show_animation() -> AnimationCurve {
    AnimationCurve::new(500, 0.7, 0.0)
}

const fn default_hide_animation() -> AnimationCurve {
    AnimationCurve::new(250, 1.0, 1.0)
}
