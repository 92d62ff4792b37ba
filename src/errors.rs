//! Error types with rich diagnostics using miette
//!
//! Geometry never fails; only building a host tree from markup can.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Markup handed to [`Document::parse_named`](crate::dom::Document::parse_named),
/// kept so a failure can point back into it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// File name, or `<markup>` for inline strings
    pub name: String,
    pub source: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Snippet source for miette's report renderer
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }

    /// Byte offset of a 1-based `row`/`col` position (columns count chars)
    pub fn offset_of(&self, row: u32, col: u32) -> usize {
        let line_start: usize = self
            .source
            .split_inclusive('\n')
            .take(row.saturating_sub(1) as usize)
            .map(str::len)
            .sum();
        let line_start = line_start.min(self.source.len());
        let col_bytes: usize = self.source[line_start..]
            .chars()
            .take(col.saturating_sub(1) as usize)
            .map(char::len_utf8)
            .sum();
        line_start + col_bytes
    }

    /// One-character span at `offset`, empty at end of input
    pub fn span_at(&self, offset: usize) -> SourceSpan {
        let len = self.source[offset..].chars().next().map_or(0, char::len_utf8);
        (offset, len).into()
    }
}

/// Errors raised while turning SVG markup into an element tree
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("malformed markup: {message}")]
    #[diagnostic(code(svgshim::parse::malformed_markup))]
    MalformedMarkup {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl ParseError {
    pub(crate) fn from_xml(ctx: &SourceContext, err: &roxmltree::Error) -> Self {
        let pos = err.pos();
        let offset = ctx.offset_of(pos.row, pos.col);
        ParseError::MalformedMarkup {
            message: err.to_string(),
            src: ctx.named_source(),
            span: ctx.span_at(offset),
        }
    }
}

pub type Result<T, E = ParseError> = std::result::Result<T, E>;
