//! VHDL expression tree
//!
//! A parsed expression is a tree of [`Expression`] nodes. Each node owns
//! its operands; the one exception is an attribute query, which borrows
//! the name it is applied to. Trees are never modified after they are
//! built.
//!
//! The operations on a tree live in their own modules:
//! - [`emit`](crate::emit): Verilog text
//! - [`eval`](crate::eval): constant folding
//! - [`elaborate`](crate::elaborate): assignment target checks
//! - [`dump`](crate::dump): debug trace

pub mod operand;

pub use operand::{Binary, Unary};

use crate::attribute::AttributeKind;
use crate::ident::Ident;
use crate::span::LineInfo;

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    Rem,
    Pow,
}

impl ArithOp {
    /// VHDL spelling of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Plus => "+",
            ArithOp::Minus => "-",
            ArithOp::Mult => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "mod",
            ArithOp::Rem => "rem",
            ArithOp::Pow => "**",
        }
    }
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl LogicOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicOp::And => "and",
            LogicOp::Or => "or",
            LogicOp::Nand => "nand",
            LogicOp::Nor => "nor",
            LogicOp::Xor => "xor",
            LogicOp::Xnor => "xnor",
        }
    }
}

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Lt,
    Gt,
    Neq,
    Le,
    Ge,
}

impl RelOp {
    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Eq => "=",
            RelOp::Lt => "<",
            RelOp::Gt => ">",
            RelOp::Neq => "/=",
            RelOp::Le => "<=",
            RelOp::Ge => ">=",
        }
    }
}

/// Signal transition selected in a sensitivity list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    Negedge,
    Anyedge,
    Posedge,
}

impl EdgeKind {
    pub fn symbol(self) -> &'static str {
        match self {
            EdgeKind::Negedge => "negedge",
            EdgeKind::Anyedge => "anyedge",
            EdgeKind::Posedge => "posedge",
        }
    }
}

/// A name, optionally indexed (`data(3)`)
///
/// The empty name stands for the `all` / `others` keyword.
#[derive(Debug)]
pub struct NameRef<'a> {
    name: Ident,
    index: Option<Box<Expression<'a>>>,
}

impl<'a> NameRef<'a> {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed(name: impl Into<Ident>, index: Expression<'a>) -> Self {
        Self {
            name: name.into(),
            index: Some(Box::new(index)),
        }
    }

    /// The `all` keyword
    pub fn all() -> Self {
        Self::new(Ident::empty())
    }

    pub fn is_all(&self) -> bool {
        self.name.is_empty()
    }

    pub fn name(&self) -> Ident {
        self.name
    }

    pub fn peek_index(&self) -> Option<&Expression<'a>> {
        self.index.as_deref()
    }

    /// Same name and structurally equal (or both absent) indices
    pub fn symbolic_compare(&self, other: &NameRef<'_>) -> bool {
        if self.name != other.name {
            return false;
        }
        match (self.peek_index(), other.peek_index()) {
            (None, None) => true,
            (Some(a), Some(b)) => a.symbolic_compare(b),
            _ => false,
        }
    }
}

/// Attribute query on a name (`data'length`)
#[derive(Debug)]
pub struct Attribute<'a> {
    base: &'a NameRef<'a>,
    name: Ident,
}

impl<'a> Attribute<'a> {
    pub fn new(base: &'a NameRef<'a>, name: impl Into<Ident>) -> Self {
        Self {
            base,
            name: name.into(),
        }
    }

    pub fn peek_base(&self) -> &'a NameRef<'a> {
        self.base
    }

    pub fn peek_attribute(&self) -> Ident {
        self.name
    }

    /// Position in the supported vocabulary, if the attribute is in it
    pub fn kind(&self) -> Option<AttributeKind> {
        AttributeKind::lookup(self.name)
    }
}

/// Node kinds
#[derive(Debug)]
pub enum ExprKind<'a> {
    Integer(i64),
    Character(char),
    Name(NameRef<'a>),
    Arithmetic(ArithOp, Binary<'a>),
    Logical(LogicOp, Binary<'a>),
    Relation(RelOp, Binary<'a>),
    Edge(EdgeKind, Unary<'a>),
    Attribute(Attribute<'a>),
    /// `abs x`
    Abs(Unary<'a>),
    /// `not x`
    Not(Unary<'a>),
}

/// An expression node with its source location
#[derive(Debug)]
pub struct Expression<'a> {
    kind: ExprKind<'a>,
    span: LineInfo,
}

impl<'a> Expression<'a> {
    pub fn new(kind: ExprKind<'a>) -> Self {
        Self {
            kind,
            span: LineInfo::default(),
        }
    }

    /// Attach a source location
    pub fn with_span(mut self, span: LineInfo) -> Self {
        self.span = span;
        self
    }

    pub fn integer(value: i64) -> Self {
        Self::new(ExprKind::Integer(value))
    }

    pub fn character(value: char) -> Self {
        Self::new(ExprKind::Character(value))
    }

    pub fn name(name: impl Into<Ident>) -> Self {
        Self::new(ExprKind::Name(NameRef::new(name)))
    }

    pub fn indexed(name: impl Into<Ident>, index: Expression<'a>) -> Self {
        Self::new(ExprKind::Name(NameRef::indexed(name, index)))
    }

    /// The `all` / `others` keyword
    pub fn all() -> Self {
        Self::new(ExprKind::Name(NameRef::all()))
    }

    pub fn arithmetic(op: ArithOp, left: Expression<'a>, right: Expression<'a>) -> Self {
        Self::new(ExprKind::Arithmetic(op, Binary::new(left, right)))
    }

    pub fn logical(op: LogicOp, left: Expression<'a>, right: Expression<'a>) -> Self {
        Self::new(ExprKind::Logical(op, Binary::new(left, right)))
    }

    pub fn relation(op: RelOp, left: Expression<'a>, right: Expression<'a>) -> Self {
        Self::new(ExprKind::Relation(op, Binary::new(left, right)))
    }

    pub fn edge(kind: EdgeKind, operand: Expression<'a>) -> Self {
        Self::new(ExprKind::Edge(kind, Unary::new(operand)))
    }

    pub fn attribute(base: &'a NameRef<'a>, name: impl Into<Ident>) -> Self {
        Self::new(ExprKind::Attribute(Attribute::new(base, name)))
    }

    pub fn abs(operand: Expression<'a>) -> Self {
        Self::new(ExprKind::Abs(Unary::new(operand)))
    }

    pub fn not(operand: Expression<'a>) -> Self {
        Self::new(ExprKind::Not(Unary::new(operand)))
    }

    pub fn kind(&self) -> &ExprKind<'a> {
        &self.kind
    }

    pub fn span(&self) -> LineInfo {
        self.span
    }

    /// The name this node refers to, if it is a name (or `all`)
    pub fn as_name(&self) -> Option<&NameRef<'a>> {
        match &self.kind {
            ExprKind::Name(name) => Some(name),
            _ => None,
        }
    }

    /// Whether the emitted Verilog for this node can be embedded in a
    /// larger expression without parentheses
    pub fn is_primary(&self) -> bool {
        match &self.kind {
            ExprKind::Integer(_) | ExprKind::Character(_) | ExprKind::Name(_) => true,
            ExprKind::Arithmetic(..)
            | ExprKind::Logical(..)
            | ExprKind::Relation(..)
            | ExprKind::Edge(..)
            | ExprKind::Attribute(_)
            | ExprKind::Abs(_)
            | ExprKind::Not(_) => false,
        }
    }

    /// Structural equality of two trees, without evaluating them
    ///
    /// Nodes of different kinds are never equal. Locations are ignored.
    pub fn symbolic_compare(&self, other: &Expression<'_>) -> bool {
        match &self.kind {
            ExprKind::Integer(a) => matches!(other.kind, ExprKind::Integer(b) if *a == b),
            ExprKind::Character(a) => matches!(other.kind, ExprKind::Character(b) if *a == b),
            ExprKind::Name(a) => match &other.kind {
                ExprKind::Name(b) => a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Arithmetic(op, a) => match &other.kind {
                ExprKind::Arithmetic(other_op, b) => op == other_op && a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Logical(op, a) => match &other.kind {
                ExprKind::Logical(other_op, b) => op == other_op && a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Relation(op, a) => match &other.kind {
                ExprKind::Relation(other_op, b) => op == other_op && a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Edge(kind, a) => match &other.kind {
                ExprKind::Edge(other_kind, b) => kind == other_kind && a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Attribute(a) => match &other.kind {
                ExprKind::Attribute(b) => {
                    a.name == b.name && a.base.symbolic_compare(b.base)
                }
                _ => false,
            },
            ExprKind::Abs(a) => match &other.kind {
                ExprKind::Abs(b) => a.symbolic_compare(b),
                _ => false,
            },
            ExprKind::Not(a) => match &other.kind {
                ExprKind::Not(b) => a.symbolic_compare(b),
                _ => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(a: &str, b: &str) -> Expression<'static> {
        Expression::arithmetic(ArithOp::Plus, Expression::name(a), Expression::name(b))
    }

    #[test]
    fn test_primary_kinds() {
        assert!(Expression::integer(1).is_primary());
        assert!(Expression::character('1').is_primary());
        assert!(Expression::name("a").is_primary());
        assert!(Expression::indexed("a", Expression::integer(0)).is_primary());
        assert!(Expression::all().is_primary());

        assert!(!sum("a", "b").is_primary());
        assert!(!Expression::not(Expression::name("a")).is_primary());
        assert!(!Expression::abs(Expression::name("a")).is_primary());
    }

    #[test]
    fn test_compare_ignores_span() {
        let a = Expression::name("x").with_span(LineInfo::new("a.vhd", 1));
        let b = Expression::name("x").with_span(LineInfo::new("b.vhd", 9));
        assert!(a.symbolic_compare(&b));
    }

    #[test]
    fn test_compare_operator_tags() {
        let plus = sum("a", "b");
        let minus =
            Expression::arithmetic(ArithOp::Minus, Expression::name("a"), Expression::name("b"));
        assert!(plus.symbolic_compare(&sum("a", "b")));
        assert!(!plus.symbolic_compare(&minus));
        // Operand order matters; no commutativity is assumed.
        assert!(!plus.symbolic_compare(&sum("b", "a")));
    }

    #[test]
    fn test_compare_across_families() {
        let and = Expression::logical(LogicOp::And, Expression::name("a"), Expression::name("b"));
        let eq = Expression::relation(RelOp::Eq, Expression::name("a"), Expression::name("b"));
        assert!(!and.symbolic_compare(&eq));
        assert!(!eq.symbolic_compare(&and));
    }

    #[test]
    fn test_wildcard_name() {
        let all = Expression::all();
        let name = all.as_name().unwrap();
        assert!(name.is_all());
        assert!(all.symbolic_compare(&Expression::all()));
        assert!(!all.symbolic_compare(&Expression::name("all")));
    }

    #[test]
    fn test_peek_accessors() {
        let expr = Expression::indexed("mem", sum("base", "offset"));
        let name = expr.as_name().unwrap();
        assert_eq!(name.name(), Ident::new("mem"));
        let index = name.peek_index().unwrap();
        match index.kind() {
            ExprKind::Arithmetic(ArithOp::Plus, operands) => {
                assert!(operands
                    .peek_operand1()
                    .symbolic_compare(&Expression::name("base")));
                assert!(operands
                    .peek_operand2()
                    .symbolic_compare(&Expression::name("offset")));
            }
            other => panic!("unexpected index kind: {:?}", other),
        }
    }
}
