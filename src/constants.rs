// Constants module for the headless demo
// Centralizes the fake host geometry used by `app::run`

use crate::platform::{ContentId, HostId, SurfaceId};
use navigation_notice_util::{EdgeInsets, Size};
use std::time::Duration;

// ============================================================================
// Demo Host Constants
// ============================================================================

/// Size of the demo overlay surface in points (a typical phone in portrait)
pub(crate) const DEMO_SURFACE_SIZE: Size = Size::new(390.0, 844.0);

/// Safe-area insets reported by the demo host (notch and home indicator)
pub(crate) const DEMO_SAFE_AREA: EdgeInsets = EdgeInsets::new(47.0, 0.0, 34.0, 0.0);

/// Host view the demo notices are shown on
pub(crate) const DEMO_HOST: HostId = HostId(1);

/// Main application surface, restored as key once the overlay goes away
pub(crate) const DEMO_MAIN_SURFACE: SurfaceId = SurfaceId(1);

// ============================================================================
// Demo Content Constants
// ============================================================================

/// Height of content without an explicit height
pub(crate) const DEMO_CONTENT_HEIGHT: f64 = 64.0;

/// Content heights keyed by content id
pub(crate) const DEMO_CONTENT: &[(ContentId, f64)] = &[
    (ContentId(1), 64.0),
    (ContentId(2), 88.0),
    (ContentId(3), 120.0),
];

/// Auto-hide interval of the demo notices
pub(crate) const DEMO_AUTO_HIDE: Duration = Duration::from_millis(1500);
