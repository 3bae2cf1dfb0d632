//! Source format detection.
//!
//! The rewrite stages splice synthesized text (the runner import, stub
//! callbacks) into otherwise untouched source, so that text has to follow the
//! file's own conventions. Two are detected up front from the original input:
//! the dominant string-quote character and the line terminator. Both are
//! computed once per file and applied to everything the tool emits.

use crate::walk::{self, Visitor};
use oxc_ast::ast::{Program, StringLiteral};

/// String quoting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    /// The quote character itself.
    pub fn char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// Line terminator convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    Lf,
    Crlf,
}

impl LineTerminator {
    pub fn as_str(self) -> &'static str {
        match self {
            LineTerminator::Lf => "\n",
            LineTerminator::Crlf => "\r\n",
        }
    }
}

/// The formatting conventions detected for one file.
#[derive(Debug, Clone, Copy)]
pub struct FormatProfile {
    pub quote: QuoteStyle,
    pub newline: LineTerminator,
}

impl FormatProfile {
    /// Detects both conventions from the original tree and text.
    pub fn detect(program: &Program<'_>, source: &str) -> Self {
        FormatProfile {
            quote: detect_quote_style(program, source).unwrap_or(QuoteStyle::Single),
            newline: detect_line_terminator(source),
        }
    }
}

struct QuoteCounter<'s> {
    source: &'s str,
    single: usize,
    double: usize,
}

impl Visitor for QuoteCounter<'_> {
    fn visit_string_literal(&mut self, literal: &StringLiteral<'_>) {
        match self.source.as_bytes().get(literal.span.start as usize) {
            Some(b'\'') => self.single += 1,
            Some(b'"') => self.double += 1,
            _ => {}
        }
    }
}

/// Majority quote style over the file's string literals, or `None` when the
/// file contains no string literals at all.
pub fn detect_quote_style(program: &Program<'_>, source: &str) -> Option<QuoteStyle> {
    let mut counter = QuoteCounter {
        source,
        single: 0,
        double: 0,
    };
    walk::walk_program(program, &mut counter);

    if counter.single == 0 && counter.double == 0 {
        None
    } else if counter.double > counter.single {
        Some(QuoteStyle::Double)
    } else {
        Some(QuoteStyle::Single)
    }
}

/// The line terminator of the first line break in the raw text, defaulting
/// to LF when the text is a single line.
pub fn detect_line_terminator(source: &str) -> LineTerminator {
    match source.find('\n') {
        Some(index) if index > 0 && source.as_bytes()[index - 1] == b'\r' => LineTerminator::Crlf,
        _ => LineTerminator::Lf,
    }
}
