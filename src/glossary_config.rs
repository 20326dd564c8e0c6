// src/glossary_config.rs
use crate::glossary_data::LessonContext;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use wasm_bindgen::JsValue;

/// Name of the page global that carries the configuration object.
pub const CONFIG_GLOBAL: &str = "GLOSSARY_CONTEXT";

const DEFAULT_GLOSSARY_URL: &str = "./glossary.json";
const DEFAULT_READING_AREA_ID: &str = "readingArea";

/// Page-supplied settings, e.g.
/// `window.GLOSSARY_CONTEXT = { courseName, moduleName, lessonId, glossaryUrl }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryConfig {
    #[serde(default, deserialize_with = "lenient_string")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub module_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lesson_id: Option<String>,
    #[serde(default = "default_glossary_url")]
    pub glossary_url: String,
    #[serde(default = "default_reading_area_id")]
    pub reading_area_id: String,
    #[serde(default = "default_true")]
    pub show_close_button: bool,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            course_name: None,
            module_name: None,
            lesson_id: None,
            glossary_url: default_glossary_url(),
            reading_area_id: default_reading_area_id(),
            show_close_button: true,
        }
    }
}

impl GlossaryConfig {
    /// The lesson context, or `None` when any part is missing.
    pub fn lesson_context(&self) -> Option<LessonContext> {
        LessonContext::from_parts(
            self.course_name.as_deref(),
            self.module_name.as_deref(),
            self.lesson_id.as_deref(),
        )
    }

    /// Parse a configuration object. Anything other than a JSON object is
    /// rejected, even though every field has a default.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| format!("Invalid glossary config: {}", e))?;
        if !value.is_object() {
            return Err("Invalid glossary config: expected an object".to_string());
        }
        serde_json::from_value(value).map_err(|e| format!("Invalid glossary config: {}", e))
    }

    /// Read the configuration from `window.GLOSSARY_CONTEXT`. A missing
    /// global gives the defaults; so does a malformed one, with a warning.
    pub fn from_page() -> Self {
        let window = gloo_utils::window();
        let value = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => {
                log::warn!("window.{} not set; glossary disabled", CONFIG_GLOBAL);
                return Self::default();
            }
        };

        let json = match js_sys::JSON::stringify(&value) {
            Ok(json) => String::from(json),
            Err(e) => {
                log::warn!("Failed to serialize window.{}: {:?}", CONFIG_GLOBAL, e);
                return Self::default();
            }
        };

        Self::from_json(&json).unwrap_or_else(|e| {
            log::warn!("{}; using defaults", e);
            Self::default()
        })
    }
}

fn default_glossary_url() -> String {
    DEFAULT_GLOSSARY_URL.to_string()
}

fn default_reading_area_id() -> String {
    DEFAULT_READING_AREA_ID.to_string()
}

fn default_true() -> bool {
    true
}

// Context keys are usually strings, but numeric lesson ids are common enough
// to accept. Anything else counts as missing.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
