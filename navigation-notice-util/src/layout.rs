//! Geometry of a notice inside the overlay surface.
//!
//! The notice is a scrollable strip pinned to one edge. Its content sits
//! outside the visible scroll range and is revealed by moving the scroll
//! offset to `±content_height`; the insets computed here make that offset
//! reachable.

use crate::{EdgeInsets, Point, Position, Size};

/// Frames and scroll insets for the notice strip and its content.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Layout {
    /// Height of the scrollable strip, including the reserved safe-area band.
    pub surface_height: f64,
    /// Origin of the strip relative to the overlay surface.
    pub surface_origin: Point,
    /// Origin of the content relative to the strip.
    pub content_origin: Point,
    /// Width of the content, shrunk by the horizontal insets.
    pub content_width: f64,
    /// Scrollable size of the strip.
    pub content_size: Size,
    /// Scroll inset on the leading (top) edge.
    pub scroll_inset_leading: f64,
    /// Scroll inset on the trailing (bottom) edge.
    pub scroll_inset_trailing: f64,
}

/// Compute the notice geometry for a content of `content_height` shown on a
/// surface of size `surface`.
pub fn compute_layout(
    position: Position,
    content_height: f64,
    insets: EdgeInsets,
    surface: Size,
) -> Layout {
    let content_height = content_height.max(0.0);
    let content_x = insets.horizontal() / 2.0;
    let content_width = (surface.width - insets.horizontal()).max(0.0);
    let content_size = Size::new(surface.width, content_height);

    match position {
        Position::Top => Layout {
            surface_height: content_height + insets.top,
            surface_origin: Point::new(0.0, 0.0),
            content_origin: Point::new(content_x, -content_height + insets.top),
            content_width,
            content_size,
            scroll_inset_leading: content_height,
            scroll_inset_trailing: insets.top,
        },
        Position::Bottom => Layout {
            surface_height: content_height + insets.bottom,
            surface_origin: Point::new(0.0, surface.height - content_height),
            content_origin: Point::new(content_x, content_height),
            content_width,
            content_size,
            scroll_inset_leading: 0.0,
            scroll_inset_trailing: content_height + insets.bottom,
        },
    }
}
