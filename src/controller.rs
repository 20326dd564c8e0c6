// src/controller.rs
//
// Idle/Shown state machine for the popup. Knows nothing about DOM events;
// the component translates events into these calls.

use crate::glossary_data::{LessonContext, TermEntry};
use crate::popup::{self, Point, PopupContent, Rect, Size, Viewport};
use crate::selection;
use crate::term_store::TermStore;

/// Delay before reading the selection, so the browser can settle the range.
pub const SETTLE_DELAY_MS: u32 = 10;

/// What the page reported after a pointer or key release.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot {
    pub text: String,
    pub rect: Option<Rect>,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShownPopup {
    pub entry: TermEntry,
    pub content: PopupContent,
    pub anchor: Rect,
    pub origin: Point,
    /// False until the rendered popup has been measured and placed.
    pub measured: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupState {
    #[default]
    Idle,
    Shown(ShownPopup),
}

#[derive(Debug, Default)]
pub struct Controller {
    context: Option<LessonContext>,
    store: TermStore,
    state: PopupState,
}

/// Shift and arrow releases end keyboard-driven selections.
pub fn is_selection_key(key: &str) -> bool {
    key == "Shift" || key.starts_with("Arrow")
}

impl Controller {
    pub fn new(context: Option<LessonContext>) -> Self {
        Self {
            context,
            store: TermStore::default(),
            state: PopupState::Idle,
        }
    }

    pub fn install_store(&mut self, store: TermStore) {
        self.store = store;
    }

    pub fn state(&self) -> &PopupState {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, PopupState::Shown(_))
    }

    /// Content of the three text regions; empty while idle.
    pub fn content(&self) -> PopupContent {
        match &self.state {
            PopupState::Shown(shown) => shown.content.clone(),
            PopupState::Idle => PopupContent::default(),
        }
    }

    /// Returns true when the popup changed. Failed guards leave the current
    /// state untouched.
    pub fn evaluate_selection(&mut self, snapshot: &SelectionSnapshot) -> bool {
        let Some(context) = self.context.as_ref() else {
            return false;
        };
        if !self.store.is_ready() {
            return false;
        }

        let text = selection::trim(&snapshot.text);
        if !selection::is_eligible(text) {
            log::debug!("Selection not eligible: {:?}", text);
            return false;
        }
        let Some(entry) = self.store.lookup(text) else {
            log::debug!("No glossary entry for {:?}", text);
            return false;
        };
        let Some(anchor) = snapshot.rect.filter(|r| !r.is_degenerate()) else {
            return false;
        };

        log::debug!("Popup shown for {:?}", entry.display_term);
        self.state = PopupState::Shown(ShownPopup {
            content: PopupContent::render(entry, context),
            entry: entry.clone(),
            anchor,
            origin: popup::default_origin(&anchor, &snapshot.viewport),
            measured: false,
        });
        true
    }

    /// Second placement pass, run once the popup is visible and measurable.
    pub fn commit_placement(&mut self, size: Size, viewport: &Viewport) -> Option<Point> {
        let PopupState::Shown(shown) = &mut self.state else {
            return None;
        };
        shown.origin = popup::position(&shown.anchor, size, viewport);
        shown.measured = true;
        Some(shown.origin)
    }

    pub fn close(&mut self) -> bool {
        self.hide()
    }

    pub fn pointer_pressed(&mut self, inside_popup: bool) -> bool {
        if inside_popup {
            return false;
        }
        self.hide()
    }

    pub fn key_pressed(&mut self, key: &str) -> bool {
        if key == "Escape" {
            return self.hide();
        }
        false
    }

    fn hide(&mut self) -> bool {
        if !self.is_shown() {
            return false;
        }
        log::debug!("Popup hidden");
        self.state = PopupState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary_parser::parse_lesson_terms;

    const DOC: &str = r#"{"courses":{"Biology":{"modules":{"Plants":{"lessons":{"L1":{"terms":{
        "Photosynthesis": "Conversion of light into chemical energy"
    }}}}}}}}"#;

    fn context() -> LessonContext {
        LessonContext::from_parts(Some("Biology"), Some("Plants"), Some("L1")).unwrap()
    }

    fn ready_controller() -> Controller {
        let ctx = context();
        let mut controller = Controller::new(Some(ctx.clone()));
        controller.install_store(TermStore::from_entries(
            parse_lesson_terms(DOC, &ctx).unwrap(),
        ));
        controller
    }

    fn snapshot(text: &str) -> SelectionSnapshot {
        SelectionSnapshot {
            text: text.to_string(),
            rect: Some(Rect::new(100.0, 200.0, 90.0, 18.0)),
            viewport: Viewport {
                scroll_x: 0.0,
                scroll_y: 0.0,
                width: 1000.0,
                height: 800.0,
            },
        }
    }

    #[test]
    fn test_matching_selection_shows_popup() {
        let mut controller = ready_controller();
        assert!(controller.evaluate_selection(&snapshot("  photosynthesis ")));

        let PopupState::Shown(shown) = controller.state() else {
            panic!("expected popup to be shown");
        };
        assert_eq!(shown.entry.display_term, "Photosynthesis");
        assert_eq!(shown.content.meta, "Biology • Plants • L1");
        assert_eq!(shown.origin, Point { left: 100.0, top: 228.0 });
        assert!(!shown.measured);
    }

    #[test]
    fn test_failed_guards_keep_idle() {
        let mut controller = ready_controller();
        assert!(!controller.evaluate_selection(&snapshot("chlorophyll")));
        assert!(!controller.evaluate_selection(&snapshot("photosynthesis 2")));

        let mut collapsed = snapshot("Photosynthesis");
        collapsed.rect = Some(Rect::new(100.0, 200.0, 0.0, 0.0));
        assert!(!controller.evaluate_selection(&collapsed));
        collapsed.rect = None;
        assert!(!controller.evaluate_selection(&collapsed));

        assert_eq!(controller.state(), &PopupState::Idle);
    }

    #[test]
    fn test_failed_guard_leaves_shown_popup() {
        let mut controller = ready_controller();
        controller.evaluate_selection(&snapshot("Photosynthesis"));
        assert!(!controller.evaluate_selection(&snapshot("unknown")));
        assert!(controller.is_shown());
    }

    #[test]
    fn test_unready_store_never_shows() {
        let mut controller = Controller::new(Some(context()));
        assert!(!controller.evaluate_selection(&snapshot("Photosynthesis")));

        // Incomplete context: same outcome even with entries available.
        let mut controller = Controller::new(LessonContext::from_parts(
            Some("Biology"),
            Some("Plants"),
            None,
        ));
        controller.install_store(TermStore::from_entries(vec![TermEntry::new(
            "Photosynthesis",
            String::new(),
        )]));
        assert!(!controller.evaluate_selection(&snapshot("Photosynthesis")));
        assert!(!controller.is_shown());
    }

    #[test]
    fn test_not_found_glossary_never_shows() {
        let ctx = context();
        let mut controller = Controller::new(Some(ctx.clone()));
        controller.install_store(TermStore::from_response(404, false, "", Some(&ctx)));
        assert!(!controller.evaluate_selection(&snapshot("Photosynthesis")));
        assert!(!controller.evaluate_selection(&snapshot("photosynthesis")));
        assert_eq!(controller.state(), &PopupState::Idle);
    }

    #[test]
    fn test_escape_hides_and_clears_content() {
        let mut controller = ready_controller();
        controller.evaluate_selection(&snapshot("Photosynthesis"));
        assert_eq!(controller.content().term, "Photosynthesis");

        assert!(!controller.key_pressed("Enter"));
        assert!(controller.key_pressed("Escape"));
        assert_eq!(controller.state(), &PopupState::Idle);
        assert_eq!(controller.content(), PopupContent::default());

        // Already idle: nothing to do.
        assert!(!controller.key_pressed("Escape"));
    }

    #[test]
    fn test_pointer_press_outside_dismisses() {
        let mut controller = ready_controller();
        controller.evaluate_selection(&snapshot("Photosynthesis"));
        assert!(!controller.pointer_pressed(true));
        assert!(controller.is_shown());
        assert!(controller.pointer_pressed(false));
        assert!(!controller.is_shown());
    }

    #[test]
    fn test_close_control() {
        let mut controller = ready_controller();
        controller.evaluate_selection(&snapshot("Photosynthesis"));
        assert!(controller.close());
        assert!(!controller.close());
    }

    #[test]
    fn test_commit_placement_flips_near_bottom() {
        let mut controller = ready_controller();
        let mut low = snapshot("Photosynthesis");
        low.rect = Some(Rect::new(100.0, 760.0, 90.0, 18.0));
        controller.evaluate_selection(&low);

        let size = Size {
            width: 320.0,
            height: 140.0,
        };
        let point = controller.commit_placement(size, &low.viewport).unwrap();
        assert_eq!(point, Point { left: 100.0, top: 610.0 });

        let PopupState::Shown(shown) = controller.state() else {
            panic!("expected popup to be shown");
        };
        assert!(shown.measured);
    }

    #[test]
    fn test_commit_placement_when_idle() {
        let mut controller = ready_controller();
        let size = Size {
            width: 1.0,
            height: 1.0,
        };
        assert!(controller.commit_placement(size, &Viewport::default()).is_none());
    }

    #[test]
    fn test_selection_keys() {
        assert!(is_selection_key("Shift"));
        assert!(is_selection_key("ArrowLeft"));
        assert!(is_selection_key("ArrowDown"));
        assert!(!is_selection_key("a"));
        assert!(!is_selection_key("Escape"));
    }
}
