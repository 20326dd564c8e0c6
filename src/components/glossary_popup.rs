// src/components/glossary_popup.rs
use crate::controller::{is_selection_key, Controller, PopupState, SETTLE_DELAY_MS};
use crate::glossary_config::GlossaryConfig;
use crate::term_store::TermStore;
use crate::utils::{current_viewport, measure, read_selection};
use gloo::timers::callback::Timeout;
use gloo_events::EventListener;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, KeyboardEvent, Node};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct GlossaryPopupProps {
    pub config: GlossaryConfig,
    /// Only selections made inside this element are looked up.
    pub reading_region: Element,
}

pub enum GlossaryPopupMsg {
    StoreLoaded(TermStore),
    SelectionReleased,
    SelectionSettled,
    PointerDown { inside_popup: bool },
    KeyDown(String),
    Close,
    Placed,
}

pub struct GlossaryPopup {
    controller: Controller,
    popup_ref: NodeRef,
    pending: Option<Timeout>,
    // Dropping a listener unsubscribes it.
    _listeners: Vec<EventListener>,
}

impl Component for GlossaryPopup {
    type Message = GlossaryPopupMsg;
    type Properties = GlossaryPopupProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = &ctx.props().config;
        let context = config.lesson_context();

        // Kick off the one glossary load
        let link = ctx.link().clone();
        let url = config.glossary_url.clone();
        let load_context = context.clone();
        spawn_local(async move {
            let store = TermStore::load(load_context.as_ref(), &url).await;
            link.send_message(GlossaryPopupMsg::StoreLoaded(store));
        });

        let popup_ref = NodeRef::default();
        let listeners = attach_listeners(ctx, &popup_ref);

        Self {
            controller: Controller::new(context),
            popup_ref,
            pending: None,
            _listeners: listeners,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            GlossaryPopupMsg::StoreLoaded(store) => {
                self.controller.install_store(store);
                false
            }
            GlossaryPopupMsg::SelectionReleased => {
                // Replacing the timeout cancels the previous one.
                let link = ctx.link().clone();
                self.pending = Some(Timeout::new(SETTLE_DELAY_MS, move || {
                    link.send_message(GlossaryPopupMsg::SelectionSettled);
                }));
                false
            }
            GlossaryPopupMsg::SelectionSettled => {
                self.pending = None;
                self.controller.evaluate_selection(&read_selection())
            }
            GlossaryPopupMsg::PointerDown { inside_popup } => {
                self.controller.pointer_pressed(inside_popup)
            }
            GlossaryPopupMsg::KeyDown(key) => self.controller.key_pressed(&key),
            GlossaryPopupMsg::Close => self.controller.close(),
            GlossaryPopupMsg::Placed => true,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let needs_placement =
            matches!(self.controller.state(), PopupState::Shown(shown) if !shown.measured);
        if !needs_placement {
            return;
        }
        // The popup is now displayed at its first-pass origin, so its real
        // size can be read.
        if let Some(popup) = self.popup_ref.cast::<Element>() {
            let size = measure(&popup);
            if self
                .controller
                .commit_placement(size, &current_viewport())
                .is_some()
            {
                ctx.link().send_message(GlossaryPopupMsg::Placed);
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let style = match self.controller.state() {
            PopupState::Shown(shown) => format!(
                "display:block; position:absolute; left:{}px; top:{}px;",
                shown.origin.left, shown.origin.top
            ),
            PopupState::Idle => "display:none;".to_string(),
        };
        let content = self.controller.content();

        html! {
            <div ref={self.popup_ref.clone()} class="dict-popup" {style}>
                <div class="dict-popup-header">
                    <strong class="popup-word">{ content.term }</strong>
                    { self.render_close_button(ctx) }
                </div>
                <div class="popup-meta">{ content.meta }</div>
                <div class="popup-body">{ content.body }</div>
            </div>
        }
    }
}

impl GlossaryPopup {
    fn render_close_button(&self, ctx: &Context<Self>) -> Html {
        if !ctx.props().config.show_close_button {
            return html! {};
        }
        let on_close = ctx.link().callback(|_: MouseEvent| GlossaryPopupMsg::Close);
        html! {
            <button class="close-btn" title="Close" onclick={on_close}>{"×"}</button>
        }
    }
}

fn attach_listeners(ctx: &Context<GlossaryPopup>, popup_ref: &NodeRef) -> Vec<EventListener> {
    let region = &ctx.props().reading_region;
    let document = document();

    let on_mouseup = {
        let link = ctx.link().clone();
        EventListener::new(region, "mouseup", move |_| {
            link.send_message(GlossaryPopupMsg::SelectionReleased);
        })
    };

    let on_keyup = {
        let link = ctx.link().clone();
        EventListener::new(region, "keyup", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                if is_selection_key(&event.key()) {
                    link.send_message(GlossaryPopupMsg::SelectionReleased);
                }
            }
        })
    };

    let on_mousedown = {
        let link = ctx.link().clone();
        let popup_ref = popup_ref.clone();
        EventListener::new(&document, "mousedown", move |event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside_popup = popup_ref
                .get()
                .map(|popup| popup.contains(target.as_ref()))
                .unwrap_or(false);
            link.send_message(GlossaryPopupMsg::PointerDown { inside_popup });
        })
    };

    let on_keydown = {
        let link = ctx.link().clone();
        EventListener::new(&document, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                link.send_message(GlossaryPopupMsg::KeyDown(event.key()));
            }
        })
    };

    vec![on_mouseup, on_keyup, on_mousedown, on_keydown]
}
