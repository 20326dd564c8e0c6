// src/utils.rs
use crate::controller::SelectionSnapshot;
use crate::popup::{Rect, Size, Viewport};
use gloo_utils::{document, window};
use web_sys::{DomRect, Element};

impl From<DomRect> for Rect {
    fn from(rect: DomRect) -> Self {
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }
}

/// Scroll offsets and client size of the document, falling back to the
/// root element when the window does not report scroll positions.
pub fn current_viewport() -> Viewport {
    let window = window();
    let root = document().document_element();

    let root_metric = |f: fn(&Element) -> i32| root.as_ref().map(f).unwrap_or(0) as f64;
    let scroll_x = window
        .scroll_x()
        .ok()
        .filter(|x| *x != 0.0)
        .unwrap_or_else(|| root_metric(Element::scroll_left));
    let scroll_y = window
        .scroll_y()
        .ok()
        .filter(|y| *y != 0.0)
        .unwrap_or_else(|| root_metric(Element::scroll_top));

    Viewport {
        scroll_x,
        scroll_y,
        width: root_metric(Element::client_width),
        height: root_metric(Element::client_height),
    }
}

/// Current selection text and the bounding rectangle of its first range.
pub fn read_selection() -> SelectionSnapshot {
    let selection = window().get_selection().ok().flatten();

    let text = selection
        .as_ref()
        .map(|s| String::from(s.to_string()))
        .unwrap_or_default();
    let rect = selection
        .filter(|s| s.range_count() > 0)
        .and_then(|s| s.get_range_at(0).ok())
        .map(|range| Rect::from(range.get_bounding_client_rect()));

    SelectionSnapshot {
        text,
        rect,
        viewport: current_viewport(),
    }
}

pub fn measure(element: &Element) -> Size {
    let rect = element.get_bounding_client_rect();
    Size {
        width: rect.width(),
        height: rect.height(),
    }
}
