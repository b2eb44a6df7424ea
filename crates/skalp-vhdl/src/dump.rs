//! Indented debug trace of an expression tree
//!
//! For developer tooling only. The format is not stable and nothing
//! should depend on it.

use crate::expr::operand::DUMP_STEP;
use crate::expr::{ExprKind, Expression, NameRef};
use std::fmt;

impl<'a> Expression<'a> {
    /// Write this node and its operands, one node per line
    pub fn dump(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let pad = "";
        match self.kind() {
            ExprKind::Integer(value) => {
                writeln!(out, "{pad:indent$}Integer {} at {}", value, self.span())
            }
            ExprKind::Character(value) => {
                writeln!(out, "{pad:indent$}Character '{}' at {}", value, self.span())
            }
            ExprKind::Name(name) => {
                name.dump_head(out, indent)?;
                writeln!(out, " at {}", self.span())?;
                name.dump_index(out, indent)
            }
            ExprKind::Arithmetic(op, operands) => {
                writeln!(out, "{pad:indent$}Arithmetic {} at {}", op.symbol(), self.span())?;
                operands.dump_operands(out, indent)
            }
            ExprKind::Logical(op, operands) => {
                writeln!(out, "{pad:indent$}Logical {} at {}", op.symbol(), self.span())?;
                operands.dump_operands(out, indent)
            }
            ExprKind::Relation(op, operands) => {
                writeln!(out, "{pad:indent$}Relation {} at {}", op.symbol(), self.span())?;
                operands.dump_operands(out, indent)
            }
            ExprKind::Edge(kind, operand) => {
                writeln!(out, "{pad:indent$}Edge {} at {}", kind.symbol(), self.span())?;
                operand.dump_operand(out, indent)
            }
            ExprKind::Attribute(attr) => {
                writeln!(
                    out,
                    "{pad:indent$}Attribute '{} at {}",
                    attr.peek_attribute(),
                    self.span()
                )?;
                let base = attr.peek_base();
                base.dump_head(out, indent + DUMP_STEP)?;
                writeln!(out)?;
                base.dump_index(out, indent + DUMP_STEP)
            }
            ExprKind::Abs(operand) => {
                writeln!(out, "{pad:indent$}Abs at {}", self.span())?;
                operand.dump_operand(out, indent)
            }
            ExprKind::Not(operand) => {
                writeln!(out, "{pad:indent$}Not at {}", self.span())?;
                operand.dump_operand(out, indent)
            }
        }
    }

    /// Dump into a fresh string
    pub fn dump_to_string(&self) -> String {
        let mut text = String::new();
        // Writing to a String cannot fail.
        let _ = self.dump(&mut text, 0);
        text
    }
}

impl NameRef<'_> {
    /// `all` is printed as itself; it is never looked up.
    fn dump_head(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        let pad = "";
        if self.is_all() {
            write!(out, "{pad:indent$}NameAll")
        } else {
            write!(out, "{pad:indent$}Name(\"{}\")", self.name())
        }
    }

    fn dump_index(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        match self.peek_index() {
            Some(index) => index.dump(out, indent + DUMP_STEP),
            None => Ok(()),
        }
    }
}
