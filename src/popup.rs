// src/popup.rs
use crate::glossary_data::{LessonContext, TermEntry};

/// Gap between the popup and the selection, and between the popup and the
/// viewport edges.
pub const POPUP_PADDING: f64 = 10.0;

/// A rectangle in viewport coordinates, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Scroll offsets and visible size of the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

/// Text shown in the popup's three regions. The default is the hidden state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PopupContent {
    pub term: String,
    pub meta: String,
    pub body: String,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Collapsed selections report a zero-sized rectangle.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

impl PopupContent {
    pub fn render(entry: &TermEntry, context: &LessonContext) -> Self {
        Self {
            term: entry.display_term.clone(),
            meta: context.meta_line(),
            body: entry.meaning.clone(),
        }
    }
}

/// First-pass location: just below the selection, left-aligned with it.
pub fn default_origin(anchor: &Rect, viewport: &Viewport) -> Point {
    Point {
        left: anchor.left + viewport.scroll_x,
        top: anchor.bottom() + viewport.scroll_y + POPUP_PADDING,
    }
}

/// Final location once the popup's rendered size is known.
///
/// Shifts left to avoid overflowing the right edge, flips above the
/// selection to avoid overflowing the bottom edge, then clamps to the padded
/// top-left corner of the visible area.
pub fn position(anchor: &Rect, popup: Size, viewport: &Viewport) -> Point {
    let Point { mut left, mut top } = default_origin(anchor, viewport);

    let right_limit = viewport.scroll_x + viewport.width - POPUP_PADDING;
    if left + popup.width > right_limit {
        left = right_limit - popup.width;
    }

    let bottom_limit = viewport.scroll_y + viewport.height - POPUP_PADDING;
    if top + popup.height > bottom_limit {
        top = anchor.top + viewport.scroll_y - popup.height - POPUP_PADDING;
    }

    Point {
        left: left.max(viewport.scroll_x + POPUP_PADDING),
        top: top.max(viewport.scroll_y + POPUP_PADDING),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 1000.0,
            height: 800.0,
        }
    }

    const POPUP: Size = Size {
        width: 300.0,
        height: 150.0,
    };

    #[test]
    fn test_default_below_selection() {
        let anchor = Rect::new(100.0, 200.0, 80.0, 20.0);
        let point = position(&anchor, POPUP, &viewport());
        assert_eq!(point, Point { left: 100.0, top: 230.0 });
        assert_eq!(point, default_origin(&anchor, &viewport()));
    }

    #[test]
    fn test_scroll_offsets_move_into_document_space() {
        let anchor = Rect::new(100.0, 200.0, 80.0, 20.0);
        let vp = Viewport {
            scroll_x: 50.0,
            scroll_y: 1200.0,
            ..viewport()
        };
        let point = position(&anchor, POPUP, &vp);
        assert_eq!(point, Point { left: 150.0, top: 1430.0 });
    }

    #[test]
    fn test_shifts_left_at_right_edge() {
        let anchor = Rect::new(900.0, 200.0, 60.0, 20.0);
        let point = position(&anchor, POPUP, &viewport());
        assert_eq!(point.left, 1000.0 - 300.0 - 10.0);
        assert_eq!(point.top, 230.0);
    }

    #[test]
    fn test_flips_above_at_bottom_edge() {
        let anchor = Rect::new(100.0, 700.0, 80.0, 20.0);
        let point = position(&anchor, POPUP, &viewport());
        assert_eq!(point.top, 700.0 - 150.0 - 10.0);
        assert!(point.top + POPUP.height < anchor.top);
        assert_eq!(point.left, 100.0);
    }

    #[test]
    fn test_clamps_to_padded_origin() {
        // Too tall to fit either way; flipping goes above the page top.
        let anchor = Rect::new(2.0, 50.0, 10.0, 20.0);
        let tall = Size {
            width: 1200.0,
            height: 900.0,
        };
        let vp = Viewport {
            scroll_y: 40.0,
            ..viewport()
        };
        let point = position(&anchor, tall, &vp);
        assert_eq!(point, Point { left: 10.0, top: 50.0 });
    }

    #[test]
    fn test_degenerate_rect() {
        assert!(Rect::new(10.0, 10.0, 0.0, 0.0).is_degenerate());
        assert!(!Rect::new(10.0, 10.0, 0.0, 18.0).is_degenerate());
    }

    #[test]
    fn test_render_content() {
        let ctx = LessonContext::from_parts(Some("Biology"), Some("Plants"), Some("L1")).unwrap();
        let entry = TermEntry::new("Photosynthesis", "Light into sugar".to_string());
        let content = PopupContent::render(&entry, &ctx);
        assert_eq!(content.term, "Photosynthesis");
        assert_eq!(content.meta, "Biology • Plants • L1");
        assert_eq!(content.body, "Light into sugar");
        assert_eq!(PopupContent::default().term, "");
    }
}
