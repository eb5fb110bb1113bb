use dcf_common::Span;

/// Token classification.
///
/// `not in` is scanned as a single `Relation` token, so patchers that need
/// to locate the relational keyword(s) only have to look for one token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceType {
    Identifier,
    /// `this` or `@`
    This,
    Number,
    String,
    Bool,
    Null,
    /// `in`, `not in`, `instanceof`
    Relation,
    /// Arithmetic, equality and logical binary operators.
    Operator,
    /// `not` or `!`
    Not,
    /// `=`
    Assign,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Newline,
    Semicolon,
}

/// A classified token with its byte span in the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceToken {
    pub kind: SourceType,
    pub span: Span,
}

impl SourceToken {
    pub const fn new(kind: SourceType, start: u32, end: u32) -> Self {
        SourceToken {
            kind,
            span: Span::new(start, end),
        }
    }

    #[inline]
    pub const fn start(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub const fn end(&self) -> u32 {
        self.span.end
    }

    /// Source text of this token.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Whether this token separates two statements.
    pub const fn is_statement_separator(&self) -> bool {
        matches!(self.kind, SourceType::Newline | SourceType::Semicolon)
    }
}
