// src/main.rs
mod components;
mod controller;
mod error;
mod glossary_config;
mod glossary_data;
mod glossary_parser;
mod popup;
mod selection;
mod term_store;
mod utils;

use components::glossary_popup::{GlossaryPopup, GlossaryPopupProps};
use glossary_config::GlossaryConfig;
use gloo_utils::{body, document};

fn mount() -> Result<(), String> {
    let config = GlossaryConfig::from_page();

    // Pages without a reading region get no glossary at all.
    let reading_region = document()
        .get_element_by_id(&config.reading_area_id)
        .ok_or_else(|| format!("No element with id {:?}", config.reading_area_id))?;

    let host = document()
        .create_element("div")
        .map_err(|e| format!("Failed to create popup host: {:?}", e))?;
    host.set_class_name("glossary-popup-host");
    body()
        .append_child(&host)
        .map_err(|e| format!("Failed to attach popup host: {:?}", e))?;

    if config.lesson_context().is_none() {
        log::info!("Glossary context incomplete; popups disabled");
    }

    let props = GlossaryPopupProps {
        config,
        reading_region,
    };
    yew::Renderer::<GlossaryPopup>::with_root_and_props(host, props).render();
    Ok(())
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    if let Err(e) = mount() {
        log::warn!("Glossary not mounted: {}", e);
    }
}
