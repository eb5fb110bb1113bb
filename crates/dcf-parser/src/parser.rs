//! Recursive-descent expression parser.
//!
//! Binary operators are parsed by precedence climbing. Binding powers, from
//! loosest to tightest: `=` (right associative), `or`, `and`, comparisons,
//! relations (`in`, `not in`, `instanceof`), additive, multiplicative, unary
//! `not`, then postfix call/member access.

use crate::node::{BinaryOperator, NodeArena, NodeIndex, NodeKind};
use dcf_common::Span;
use dcf_common::limits::MAX_AST_DEPTH;
use dcf_scanner::{ScanError, SourceToken, SourceType, tokenize};
use tracing::trace;

/// Binding power of relational operators.
const RELATION_PRECEDENCE: u8 = 4;

/// Error produced for malformed input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ScanError> for ParseError {
    fn from(err: ScanError) -> Self {
        ParseError::new(err.message, Span::at(err.pos))
    }
}

/// Output of a successful parse.
#[derive(Clone, Debug)]
pub struct ParsedSource {
    pub source: String,
    pub tokens: Vec<SourceToken>,
    pub arena: NodeArena,
    pub root: NodeIndex,
}

impl ParsedSource {
    /// Top-level statements of the program.
    pub fn statements(&self) -> &[NodeIndex] {
        match &self.arena[self.root].kind {
            NodeKind::Program { statements } => statements,
            _ => &[],
        }
    }
}

/// Parse a whole program.
pub fn parse_program(source: &str) -> Result<ParsedSource, ParseError> {
    Parser::new(source)?.parse_program()
}

pub struct Parser<'a> {
    source: &'a str,
    tokens: Vec<SourceToken>,
    pos: usize,
    arena: NodeArena,
    /// Open parentheses/brackets; newlines are insignificant inside them.
    nesting: u32,
    depth: u32,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Result<Self, ParseError> {
        let tokens = tokenize(source)?;
        Ok(Parser {
            source,
            tokens,
            pos: 0,
            arena: NodeArena::new(),
            nesting: 0,
            depth: 0,
        })
    }

    fn eof_span(&self) -> Span {
        Span::at(self.source.len() as u32)
    }

    fn peek(&mut self) -> Option<SourceToken> {
        if self.nesting > 0 {
            while self
                .tokens
                .get(self.pos)
                .is_some_and(|token| token.kind == SourceType::Newline)
            {
                self.pos += 1;
            }
        }
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<SourceToken> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, kind: SourceType, what: &str) -> Result<SourceToken, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError::new(
                format!("expected {what}, found '{}'", token.text(self.source)),
                token.span,
            )),
            None => Err(ParseError::new(
                format!("expected {what}, found end of input"),
                self.eof_span(),
            )),
        }
    }

    /// Run `f` one level deeper, failing past `MAX_AST_DEPTH`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_AST_DEPTH {
            let span = self.peek().map_or_else(|| self.eof_span(), |token| token.span);
            return Err(ParseError::new("expression nested too deeply", span));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn outer(&self, index: NodeIndex) -> Span {
        self.arena[index].range.outer
    }

    pub fn parse_program(mut self) -> Result<ParsedSource, ParseError> {
        let mut statements = Vec::new();
        loop {
            while self.peek().is_some_and(|token| token.is_statement_separator()) {
                self.pos += 1;
            }
            if self.peek().is_none() {
                break;
            }
            statements.push(self.parse_assignment()?);
            if let Some(token) = self.peek()
                && !token.is_statement_separator()
            {
                return Err(ParseError::new(
                    format!("unexpected '{}'", token.text(self.source)),
                    token.span,
                ));
            }
        }

        let root = self.arena.add(
            NodeKind::Program { statements },
            Span::new(0, self.source.len() as u32),
        );
        trace!(nodes = self.arena.len(), "parsed program");
        Ok(ParsedSource {
            source: self.source.to_string(),
            tokens: self.tokens,
            arena: self.arena,
            root,
        })
    }

    fn parse_assignment(&mut self) -> Result<NodeIndex, ParseError> {
        self.nested(|p| {
            let target = p.parse_binary(0)?;
            if !p.peek().is_some_and(|token| token.kind == SourceType::Assign) {
                return Ok(target);
            }
            let assign = p.bump().map_or_else(|| p.eof_span(), |token| token.span);
            if !matches!(
                p.arena[target].kind,
                NodeKind::Identifier
                    | NodeKind::MemberAccess { .. }
                    | NodeKind::DynamicMemberAccess { .. }
            ) {
                return Err(ParseError::new("invalid assignment target", assign));
            }
            let value = p.parse_assignment()?;
            let span = p.outer(target).cover(p.outer(value));
            Ok(p.arena.add(NodeKind::Assign { target, value }, span))
        })
    }

    /// Binary operator at the cursor with its binding power.
    fn peek_binary(&mut self) -> Option<(SourceToken, u8)> {
        let token = self.peek()?;
        let precedence = match token.kind {
            SourceType::Relation => RELATION_PRECEDENCE,
            SourceType::Operator => BinaryOperator::from_text(token.text(self.source))?.precedence(),
            _ => return None,
        };
        Some((token, precedence))
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<NodeIndex, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some((token, precedence)) = self.peek_binary() {
            if precedence <= min_precedence {
                break;
            }
            self.pos += 1;
            let right = self.nested(|p| p.parse_binary(precedence))?;
            let span = self.outer(left).cover(self.outer(right));
            let text = token.text(self.source);
            let kind = if token.kind == SourceType::Relation && text != "instanceof" {
                NodeKind::InOp {
                    left,
                    right,
                    is_not: text.starts_with("not"),
                }
            } else {
                let operator = BinaryOperator::from_text(text).ok_or_else(|| {
                    ParseError::new(format!("unknown operator '{text}'"), token.span)
                })?;
                NodeKind::Binary {
                    left,
                    operator,
                    right,
                }
            };
            left = self.arena.add(kind, span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<NodeIndex, ParseError> {
        match self.peek() {
            Some(token) if token.kind == SourceType::Not => {
                self.pos += 1;
                let operand = self.nested(|p| p.parse_unary())?;
                let span = token.span.cover(self.outer(operand));
                Ok(self.arena.add(
                    NodeKind::LogicalNot {
                        operand,
                        operator: token.span,
                    },
                    span,
                ))
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<NodeIndex, ParseError> {
        let mut expr = self.parse_primary()?;
        while let Some(token) = self.peek() {
            let start = self.outer(expr).start;
            expr = match token.kind {
                SourceType::Dot => {
                    self.pos += 1;
                    let member = self.expect(SourceType::Identifier, "property name")?;
                    self.arena.add(
                        NodeKind::MemberAccess {
                            object: expr,
                            member: member.span,
                        },
                        Span::new(start, member.end()),
                    )
                }
                SourceType::LBracket => {
                    self.pos += 1;
                    let (index, close) = self.enclosed(|p| {
                        let index = p.parse_assignment()?;
                        Ok((index, p.expect(SourceType::RBracket, "']'")?))
                    })?;
                    self.arena.add(
                        NodeKind::DynamicMemberAccess {
                            object: expr,
                            index,
                        },
                        Span::new(start, close.end()),
                    )
                }
                // Only `f(x)` is a call; `f (x)` is not parsed as one.
                SourceType::LParen if token.start() == self.outer(expr).end => {
                    self.pos += 1;
                    let (arguments, close) = self.parse_list(SourceType::RParen, "')'")?;
                    self.arena.add(
                        NodeKind::Call {
                            callee: expr,
                            arguments,
                        },
                        Span::new(start, close.end()),
                    )
                }
                _ => break,
            };
        }
        Ok(expr)
    }

    /// Comma-separated expressions up to `close`; the opening token is
    /// already consumed. Trailing commas are allowed.
    fn parse_list(
        &mut self,
        close: SourceType,
        what: &str,
    ) -> Result<(Vec<NodeIndex>, SourceToken), ParseError> {
        self.enclosed(|p| {
            let mut items = Vec::new();
            loop {
                if let Some(token) = p.peek()
                    && token.kind == close
                {
                    p.pos += 1;
                    return Ok((items, token));
                }
                items.push(p.parse_assignment()?);
                match p.peek() {
                    Some(token) if token.kind == SourceType::Comma => p.pos += 1,
                    _ => return Ok((items, p.expect(close, what)?)),
                }
            }
        })
    }

    /// Run `f` inside a bracket pair, where newlines are insignificant.
    fn enclosed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.nesting += 1;
        let result = f(self);
        self.nesting -= 1;
        result
    }

    fn parse_primary(&mut self) -> Result<NodeIndex, ParseError> {
        let Some(token) = self.bump() else {
            return Err(ParseError::new(
                "expected expression, found end of input",
                self.eof_span(),
            ));
        };
        let kind = match token.kind {
            SourceType::Identifier => Some(NodeKind::Identifier),
            SourceType::Number => Some(NodeKind::Number),
            SourceType::String => Some(NodeKind::String),
            SourceType::Bool => Some(NodeKind::Bool),
            SourceType::Null => Some(NodeKind::Null),
            SourceType::This => Some(NodeKind::This),
            _ => None,
        };
        if let Some(kind) = kind {
            let node = self.arena.add(kind, token.span);
            return Ok(self.parse_shorthand_this(token, node));
        }

        match token.kind {
            SourceType::LBracket => {
                let (elements, close) = self.parse_list(SourceType::RBracket, "']'")?;
                Ok(self.arena.add(
                    NodeKind::ArrayLiteral { elements },
                    Span::new(token.start(), close.end()),
                ))
            }
            SourceType::LParen => {
                let (inner, close) = self.enclosed(|p| {
                    let inner = p.parse_assignment()?;
                    Ok((inner, p.expect(SourceType::RParen, "')'")?))
                })?;
                self.arena.wrap_in_parens(inner, token.start(), close.end());
                Ok(inner)
            }
            _ => Err(ParseError::new(
                format!("expected expression, found '{}'", token.text(self.source)),
                token.span,
            )),
        }
    }

    /// `@name` is shorthand for `this.name`.
    fn parse_shorthand_this(&mut self, token: SourceToken, node: NodeIndex) -> NodeIndex {
        if token.text(self.source) != "@" {
            return node;
        }
        match self.tokens.get(self.pos) {
            Some(next) if next.kind == SourceType::Identifier && next.start() == token.end() => {
                let member = *next;
                self.pos += 1;
                self.arena.add(
                    NodeKind::MemberAccess {
                        object: node,
                        member: member.span,
                    },
                    Span::new(token.start(), member.end()),
                )
            }
            _ => node,
        }
    }
}

#[cfg(test)]
#[path = "../tests/parser_tests.rs"]
mod tests;
