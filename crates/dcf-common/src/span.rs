//! Byte-offset spans and the node range model.
//!
//! Every syntax node carries two ranges into the original source:
//! - the *content* range covers the node's own text
//! - the *outer* range additionally covers any parentheses wrapped around it
//!
//! ```text
//! x in ((a or b))
//!      ^^^^^^^^^^  outer
//!        ^^^^^^    content
//! ```

/// A half-open byte range `[start, end)` into the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// A zero-width span at `pos`.
    #[inline]
    pub const fn at(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `pos` lies inside the half-open range.
    #[inline]
    pub const fn contains(&self, pos: u32) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub fn cover(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Text of this span, or `""` when it does not fit `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

/// Outer and content ranges of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeRange {
    /// Node text plus surrounding delimiters (parentheses).
    pub outer: Span,
    /// The node's own text.
    pub content: Span,
}

impl NodeRange {
    /// A range whose outer and content spans coincide.
    pub const fn new(content: Span) -> Self {
        NodeRange {
            outer: content,
            content,
        }
    }

    #[inline]
    pub const fn outer_start(&self) -> u32 {
        self.outer.start
    }

    #[inline]
    pub const fn outer_end(&self) -> u32 {
        self.outer.end
    }

    #[inline]
    pub const fn content_start(&self) -> u32 {
        self.content.start
    }

    #[inline]
    pub const fn content_end(&self) -> u32 {
        self.content.end
    }

    /// Extend the outer range to include a pair of delimiters at `open..close`.
    #[must_use]
    pub fn wrapped(self, open: u32, close: u32) -> Self {
        NodeRange {
            outer: Span::new(open.min(self.outer.start), close.max(self.outer.end)),
            content: self.content,
        }
    }
}

#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod tests;
