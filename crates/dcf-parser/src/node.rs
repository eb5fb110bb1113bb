//! Arena-allocated syntax nodes.

use dcf_common::{NodeRange, Span};
use dcf_scanner::{SourceToken, SourceType};
use smallvec::SmallVec;

/// Index of a node inside its `NodeArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Binary operators other than the membership test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    /// `is` or `==`
    Equal,
    /// `isnt` or `!=`
    NotEqual,
    /// `and` or `&&`
    And,
    /// `or` or `||`
    Or,
    InstanceOf,
}

impl BinaryOperator {
    /// Map operator token text to an operator.
    pub fn from_text(text: &str) -> Option<Self> {
        Some(match text {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Subtract,
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "%" => BinaryOperator::Modulo,
            "<" => BinaryOperator::LessThan,
            "<=" => BinaryOperator::LessThanOrEqual,
            ">" => BinaryOperator::GreaterThan,
            ">=" => BinaryOperator::GreaterThanOrEqual,
            "is" | "==" => BinaryOperator::Equal,
            "isnt" | "!=" => BinaryOperator::NotEqual,
            "and" | "&&" => BinaryOperator::And,
            "or" | "||" => BinaryOperator::Or,
            "instanceof" => BinaryOperator::InstanceOf,
            _ => return None,
        })
    }

    /// The operator's spelling in the target dialect.
    pub const fn js_text(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Equal => "===",
            BinaryOperator::NotEqual => "!==",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::InstanceOf => "instanceof",
        }
    }

    /// Selects this operator's token among the tokens between its operands.
    pub fn token_predicate(self) -> fn(&SourceToken) -> bool {
        match self {
            BinaryOperator::InstanceOf => |token: &SourceToken| token.kind == SourceType::Relation,
            _ => |token: &SourceToken| token.kind == SourceType::Operator,
        }
    }

    /// Binding power; higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => 3,
            BinaryOperator::InstanceOf => 4,
            BinaryOperator::Add | BinaryOperator::Subtract => 5,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 6,
        }
    }
}

/// Node payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Program {
        statements: Vec<NodeIndex>,
    },
    Identifier,
    /// `this` or `@`
    This,
    Number,
    String,
    Bool,
    Null,
    ArrayLiteral {
        elements: Vec<NodeIndex>,
    },
    /// `callee(arguments...)`
    Call {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `object.member`
    MemberAccess {
        object: NodeIndex,
        member: Span,
    },
    /// `object[index]`
    DynamicMemberAccess {
        object: NodeIndex,
        index: NodeIndex,
    },
    /// `not operand` or `!operand`
    LogicalNot {
        operand: NodeIndex,
        operator: Span,
    },
    Binary {
        left: NodeIndex,
        operator: BinaryOperator,
        right: NodeIndex,
    },
    /// `left in right` / `left not in right`
    InOp {
        left: NodeIndex,
        right: NodeIndex,
        is_not: bool,
    },
    /// `target = value`
    Assign {
        target: NodeIndex,
        value: NodeIndex,
    },
}

/// A syntax node: payload plus its outer/content ranges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: NodeRange,
}

impl Node {
    /// Child nodes in source order.
    pub fn children(&self) -> SmallVec<[NodeIndex; 4]> {
        let mut out = SmallVec::new();
        match &self.kind {
            NodeKind::Program { statements } => out.extend(statements.iter().copied()),
            NodeKind::ArrayLiteral { elements } => out.extend(elements.iter().copied()),
            NodeKind::Call { callee, arguments } => {
                out.push(*callee);
                out.extend(arguments.iter().copied());
            }
            NodeKind::MemberAccess { object, .. } => out.push(*object),
            NodeKind::DynamicMemberAccess { object, index } => {
                out.push(*object);
                out.push(*index);
            }
            NodeKind::LogicalNot { operand, .. } => out.push(*operand),
            NodeKind::Binary { left, right, .. } | NodeKind::InOp { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            NodeKind::Assign { target, value } => {
                out.push(*target);
                out.push(*value);
            }
            NodeKind::Identifier
            | NodeKind::This
            | NodeKind::Number
            | NodeKind::String
            | NodeKind::Bool
            | NodeKind::Null => {}
        }
        out
    }
}

/// Flat storage for all nodes of one source file.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn add(&mut self, kind: NodeKind, content: Span) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            range: NodeRange::new(content),
        });
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0 as usize)
    }

    /// Widen a node's outer range to include a pair of parentheses.
    pub fn wrap_in_parens(&mut self, index: NodeIndex, open: u32, close: u32) {
        if let Some(node) = self.nodes.get_mut(index.0 as usize) {
            node.range = node.range.wrapped(open, close);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their indices, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i as u32), node))
    }
}

/// Panics when `index` was not allocated by this arena.
impl std::ops::Index<NodeIndex> for NodeArena {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0 as usize]
    }
}
