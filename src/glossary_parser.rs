// src/glossary_parser.rs
//
// Navigates a glossary document down to the terms of a single lesson. Nothing
// outside that lesson survives past this module.

use crate::error::{GlossaryResult, Unavailable};
use crate::glossary_data::{LessonContext, TermEntry};
use serde_json::Value;

/// Parse a glossary document and return the entries for `context`, in
/// document order.
///
/// Expected shape:
/// `{ courses: { <course>: { modules: { <module>: { lessons: { <lesson>: { terms: { <term>: <meaning> } } } } } } } }`
pub fn parse_lesson_terms(json: &str, context: &LessonContext) -> GlossaryResult<Vec<TermEntry>> {
    let document: Value =
        serde_json::from_str(json).map_err(|e| Unavailable::Parse(e.to_string()))?;

    let course = child(&document, "courses", &context.course_name)
        .ok_or_else(|| Unavailable::MissingCourse(context.course_name.clone()))?;
    let module = child(course, "modules", &context.module_name)
        .ok_or_else(|| Unavailable::MissingModule(context.module_name.clone()))?;
    let lesson = child(module, "lessons", &context.lesson_id)
        .ok_or_else(|| Unavailable::MissingLesson(context.lesson_id.clone()))?;

    let terms = lesson
        .get("terms")
        .and_then(Value::as_object)
        .filter(|terms| !terms.is_empty())
        .ok_or(Unavailable::NoTerms)?;

    Ok(terms
        .iter()
        .map(|(term, meaning)| TermEntry::new(term, meaning_text(meaning)))
        .collect())
}

// `node.<branch>.<key>`, absent when either level is missing or null.
fn child<'a>(node: &'a Value, branch: &str, key: &str) -> Option<&'a Value> {
    node.get(branch)
        .and_then(|b| b.get(key))
        .filter(|v| !v.is_null())
}

// Falsy meanings (null, false, 0, "") read as no text.
fn meaning_text(meaning: &Value) -> String {
    match meaning {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
