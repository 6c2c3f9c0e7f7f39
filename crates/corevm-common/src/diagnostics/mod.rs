//! Diagnostics — the output of the checking pipeline's error taxonomy.
//!
//! Every checking failure is recorded here rather than raised as a Rust
//! error; checking always continues afterwards with `Type::Error` /
//! `Unknown` standing in for the failed expression (§7 propagation policy).

pub mod data;

use crate::span::Span;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_messages {
    pub use super::data::diagnostic_messages::*;
}

pub mod diagnostic_codes {
    pub use super::data::diagnostic_codes::*;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub span: Span,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Path of the module the diagnostic was raised in.
    pub module: String,
    pub span: Span,
    pub message_text: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(module: impl Into<String>, span: Span, message: impl Into<String>, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            module: module.into(),
            span,
            message_text: message.into(),
            related_information: Vec::new(),
        }
    }

    pub fn with_related(mut self, span: Span, message: impl Into<String>) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            span,
            message_text: message.into(),
        });
        self
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    use self::data::DIAGNOSTIC_MESSAGES;
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code).map(|m| m.message)
}

/// Substitute `{0}`, `{1}`, ... placeholders in a message template.
pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A collection of diagnostics raised during checking.
///
/// Deduplicates by `(span.start, code)` — a single malformed expression can
/// otherwise be visited from more than one path (e.g. once while inferring
/// a generic call's argument types, once
/// while re-checking after substitution) and would otherwise double-report.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    seen: rustc_hash::FxHashSet<(u32, u32)>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        let key = (diagnostic.span.start, diagnostic.code);
        if self.seen.insert(key) {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_span_and_code_is_deduped() {
        let mut bag = DiagnosticBag::new();
        bag.push(Diagnostic::error("m", Span::new(0, 1), "a", 1));
        bag.push(Diagnostic::error("m", Span::new(0, 1), "a again", 1));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn same_span_different_code_is_kept() {
        let mut bag = DiagnosticBag::new();
        bag.push(Diagnostic::error("m", Span::new(0, 1), "a", 1));
        bag.push(Diagnostic::error("m", Span::new(0, 1), "b", 2));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn format_message_substitutes_positional_args() {
        let out = format_message("Cannot find name '{0}'.", &["foo"]);
        assert_eq!(out, "Cannot find name 'foo'.");
    }
}
