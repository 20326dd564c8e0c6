pub mod glossary_popup;
