use mkml_core::Rect;
use mkml_style::diagnostics_enabled;

use crate::context::ScrollSettings;

const MIN_THUMB_HEIGHT: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollState {
    Idle,
    /// Scrollbar thumb grabbed; snapshot of where the drag started.
    Dragging { start_y: f32, start_offset: f32 },
}

/// Vertical scroll offset of a container with elastic clamping.
///
/// After every mutation `0 <= offset <= max_offset` and
/// `max_offset == max(0, total - visible)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollController {
    offset: f32,
    max_offset: f32,
    total: f32,
    visible: f32,
    state: ScrollState,
    settings: ScrollSettings,
}

impl ScrollController {
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            offset: 0.0,
            max_offset: 0.0,
            total: 0.0,
            visible: 0.0,
            state: ScrollState::Idle,
            settings,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ScrollState::Dragging { .. })
    }

    pub fn settings(&self) -> ScrollSettings {
        self.settings
    }

    /// Whether content overflows and a scrollbar is shown.
    pub fn is_scrollable(&self) -> bool {
        self.total > self.visible
    }

    /// Record content and viewport heights from the latest layout pass. The
    /// offset is hard-clamped only, so repeated layouts do not creep it
    /// towards a boundary.
    pub fn set_extent(&mut self, total: f32, visible: f32) {
        self.total = total.max(0.0);
        self.visible = visible.max(0.0);
        self.max_offset = (self.total - self.visible).max(0.0);
        if !self.is_scrollable() {
            self.offset = 0.0;
        } else {
            self.offset = self.offset.clamp(0.0, self.max_offset);
        }
    }

    /// Apply a wheel delta: `offset -= delta × speed`, then clamp.
    pub fn wheel(&mut self, delta: f32) {
        self.offset -= delta * self.settings.speed;
        self.clamp();
        if diagnostics_enabled("input") {
            tracing::debug!(delta, offset = self.offset, "wheel scroll");
        }
    }

    pub fn begin_drag(&mut self, y: f32) {
        self.state = ScrollState::Dragging { start_y: y, start_offset: self.offset };
    }

    /// Follow the pointer while dragging; the thumb moves one visible height
    /// per `total` of content.
    pub fn drag_to(&mut self, y: f32) {
        let ScrollState::Dragging { start_y, start_offset } = self.state else {
            return;
        };
        if self.visible <= 0.0 {
            return;
        }
        self.offset = start_offset + (y - start_y) / self.visible * self.total;
        self.clamp();
    }

    pub fn end_drag(&mut self) {
        self.state = ScrollState::Idle;
    }

    /// Hard clamp to `[0, max_offset]`, then, within one `speed` of a
    /// boundary, pull towards it by `damping`.
    fn clamp(&mut self) {
        if !self.is_scrollable() || !self.offset.is_finite() {
            self.offset = 0.0;
            return;
        }
        let max = self.max_offset;
        let mut offset = self.offset.clamp(0.0, max);
        let speed = self.settings.speed;
        let damping = self.settings.damping.clamp(0.0, 1.0);
        let to_top = offset;
        let to_bottom = max - offset;
        if to_top < speed && to_top <= to_bottom {
            offset -= to_top * damping;
        } else if to_bottom < speed {
            offset += to_bottom * damping;
        }
        self.offset = offset.clamp(0.0, max);
    }

    /// Scrollbar track along the right edge of `area`, or `None` when the
    /// content fits.
    pub fn track_rect(&self, area: Rect) -> Option<Rect> {
        if !self.is_scrollable() {
            return None;
        }
        let w = self.settings.scrollbar_width;
        Some(Rect::new(area.right() - w, area.y, w, area.h))
    }

    pub fn thumb_rect(&self, area: Rect) -> Option<Rect> {
        let track = self.track_rect(area)?;
        let h = (track.h * self.visible / self.total).clamp(MIN_THUMB_HEIGHT.min(track.h), track.h);
        let travel = track.h - h;
        let y = if self.max_offset > 0.0 {
            track.y + travel * (self.offset / self.max_offset)
        } else {
            track.y
        };
        Some(Rect::new(track.x, y, track.w, h))
    }
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new(ScrollSettings::default())
    }
}
