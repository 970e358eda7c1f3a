use crate::Position;

/// Scroll position of a single notice.
///
/// An offset of `0` means fully hidden. The fully shown (rest) offset is
/// `-content_height` for a top notice and `+content_height` for a bottom one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationState {
    position: Position,
    offset: f64,
    content_height: f64,
}

impl PresentationState {
    pub fn new(position: Position, content_height: f64) -> Self {
        Self {
            position,
            offset: 0.0,
            content_height: content_height.max(0.0),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    pub fn set_content_height(&mut self, content_height: f64) {
        self.content_height = content_height.max(0.0);
        self.offset = self.clamp_settled(self.offset);
    }

    /// Offset at which the notice is fully revealed.
    pub fn rest_offset(&self) -> f64 {
        match self.position {
            Position::Top => -self.content_height,
            Position::Bottom => self.content_height,
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.offset == self.rest_offset()
    }

    /// Whether the notice has been pushed to (or beyond) its hidden offset.
    pub fn is_past_hidden_threshold(&self) -> bool {
        match self.position {
            Position::Top => self.offset >= 0.0,
            Position::Bottom => self.offset < 0.0,
        }
    }

    /// Whether any part of the content is still on screen once scrolling settled.
    pub fn is_visible(&self) -> bool {
        match self.position {
            Position::Top => self.offset < 0.0,
            Position::Bottom => self.offset >= self.content_height,
        }
    }

    /// Set a settled offset, kept between hidden and fully revealed.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = self.clamp_settled(offset);
    }

    /// Set an offset while a drag is in progress.
    ///
    /// The drag may overshoot past the hidden offset but never beyond the
    /// fully revealed one.
    pub fn drag_to(&mut self, offset: f64) {
        self.offset = match self.position {
            Position::Top => offset.max(-self.content_height),
            Position::Bottom => offset.min(self.content_height),
        };
    }

    pub fn reveal(&mut self) {
        self.offset = self.rest_offset();
    }

    pub fn conceal(&mut self) {
        self.offset = 0.0;
    }

    fn clamp_settled(&self, offset: f64) -> f64 {
        let rest = self.rest_offset();
        offset.clamp(rest.min(0.0), rest.max(0.0))
    }
}
