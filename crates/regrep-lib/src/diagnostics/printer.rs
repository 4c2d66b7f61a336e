//! Builder-pattern printer for rendering parse errors.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::parser::ParseError;

/// Builder for rendering one [`ParseError`] against its pattern.
pub struct DiagnosticsPrinter<'e, 's> {
    error: &'e ParseError,
    source: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> DiagnosticsPrinter<'e, 's> {
    pub fn new(error: &'e ParseError) -> Self {
        Self {
            error,
            source: None,
            colored: false,
        }
    }

    /// The pattern text the error's position refers to.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return write!(w, "{}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let title = self.error.kind.to_string();
        let snippet = Snippet::source(source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(char_span(source, self.error.position))
                .label(self.error.kind.label()),
        );
        let report = [Level::ERROR.primary_title(&title).element(snippet)];

        write!(w, "{}", renderer.render(&report))
    }
}

/// Byte range of the character at char offset `position`.
///
/// Offsets at or past the end collapse to an empty range at the end.
fn char_span(source: &str, position: usize) -> Range<usize> {
    match source.char_indices().nth(position) {
        Some((start, c)) => start..start + c.len_utf8(),
        None => source.len()..source.len(),
    }
}

impl ParseError {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
