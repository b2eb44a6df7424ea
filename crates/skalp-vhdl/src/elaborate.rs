//! Assignment target checks
//!
//! Only names can be assigned. A name is a legal target when it resolves
//! to a signal, a variable, or a port that is not of mode `in`.

use crate::error::ElabError;
use crate::expr::{ExprKind, Expression, NameRef};
use crate::scope::{ElabContext, Scope};
use crate::span::LineInfo;

impl<'a> Expression<'a> {
    /// Elaborate this expression as the target of a sequential assignment
    ///
    /// Returns the number of errors found.
    pub fn elaborate_lval(&self, cx: &mut ElabContext<'_>) -> usize {
        match self.kind() {
            ExprKind::Name(name) => name.elaborate_lval(self.span(), cx),
            ExprKind::Integer(_)
            | ExprKind::Character(_)
            | ExprKind::Arithmetic(..)
            | ExprKind::Logical(..)
            | ExprKind::Relation(..)
            | ExprKind::Edge(..)
            | ExprKind::Attribute(_)
            | ExprKind::Abs(_)
            | ExprKind::Not(_) => {
                cx.report(self.span(), ElabError::NotAnLvalue);
                1
            }
        }
    }
}

impl NameRef<'_> {
    fn elaborate_lval(&self, span: LineInfo, cx: &mut ElabContext<'_>) -> usize {
        if self.is_all() {
            cx.report(span, ElabError::InvalidAll);
            return 1;
        }

        let kind = cx.lookup(self.name()).map(|decl| decl.kind);
        match kind {
            None => {
                cx.report(span, ElabError::UnresolvedName(self.name()));
                1
            }
            Some(kind) if !kind.is_writable() => {
                cx.report(
                    span,
                    ElabError::NotWritable {
                        name: self.name(),
                        what: kind.describe(),
                    },
                );
                1
            }
            Some(_) => 0,
        }
    }
}
