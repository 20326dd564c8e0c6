// src/glossary_data.rs

/// The (course, module, lesson) triple a page is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonContext {
    pub course_name: String,
    pub module_name: String,
    pub lesson_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermEntry {
    pub normalized_key: String,
    pub display_term: String,
    pub meaning: String,
}

impl LessonContext {
    /// Builds a context only when every part is present and non-empty.
    pub fn from_parts(
        course_name: Option<&str>,
        module_name: Option<&str>,
        lesson_id: Option<&str>,
    ) -> Option<Self> {
        let present = |part: Option<&str>| part.filter(|p| !p.is_empty()).map(str::to_string);
        Some(Self {
            course_name: present(course_name)?,
            module_name: present(module_name)?,
            lesson_id: present(lesson_id)?,
        })
    }

    pub fn meta_line(&self) -> String {
        format!(
            "{} • {} • {}",
            self.course_name, self.module_name, self.lesson_id
        )
    }
}

impl TermEntry {
    pub fn new(display_term: &str, meaning: String) -> Self {
        Self {
            normalized_key: crate::term_store::normalize(display_term),
            display_term: display_term.to_string(),
            meaning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_requires_every_part() {
        assert!(LessonContext::from_parts(Some("Biology"), Some("Plants"), None).is_none());
        assert!(LessonContext::from_parts(Some(""), Some("Plants"), Some("L1")).is_none());

        let ctx = LessonContext::from_parts(Some("Biology"), Some("Plants"), Some("L1")).unwrap();
        assert_eq!(ctx.lesson_id, "L1");
    }

    #[test]
    fn test_meta_line() {
        let ctx = LessonContext::from_parts(Some("Biology"), Some("Plants"), Some("L1")).unwrap();
        assert_eq!(ctx.meta_line(), "Biology • Plants • L1");
    }

    #[test]
    fn test_entry_key_is_normalized() {
        let entry = TermEntry::new("  Cell   Wall ", "Rigid layer".to_string());
        assert_eq!(entry.normalized_key, "cell wall");
        assert_eq!(entry.display_term, "  Cell   Wall ");
    }
}
