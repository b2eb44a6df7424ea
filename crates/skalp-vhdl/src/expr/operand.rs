//! Operand holders shared by the operator node kinds
//!
//! Every unary operator embeds a [`Unary`] and every binary operator a
//! [`Binary`], so operand handling (parenthesization, error counting,
//! folding, dump indentation) is written once.

use super::Expression;
use crate::emit::Sink;
use crate::eval::Folder;
use crate::scope::ElabContext;
use std::fmt;

/// Indentation added for each level of operands in a dump
pub(crate) const DUMP_STEP: usize = 4;

/// Emit `operand`, wrapped in parentheses unless it is a primary
fn emit_wrapped(operand: &Expression<'_>, out: &mut Sink<'_>, cx: &mut ElabContext<'_>) -> usize {
    let primary = operand.is_primary();
    if !primary {
        out.put("(");
    }
    let errors = operand.emit_into(out, cx);
    if !primary {
        out.put(")");
    }
    errors
}

/// One owned operand
#[derive(Debug)]
pub struct Unary<'a> {
    operand: Box<Expression<'a>>,
}

impl<'a> Unary<'a> {
    pub fn new(operand: Expression<'a>) -> Self {
        Self {
            operand: Box::new(operand),
        }
    }

    pub fn peek_operand(&self) -> &Expression<'a> {
        &self.operand
    }

    pub(crate) fn emit_operand(&self, out: &mut Sink<'_>, cx: &mut ElabContext<'_>) -> usize {
        emit_wrapped(&self.operand, out, cx)
    }

    pub(crate) fn dump_operand(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        self.operand.dump(out, indent + DUMP_STEP)
    }

    pub fn symbolic_compare(&self, other: &Unary<'_>) -> bool {
        self.operand.symbolic_compare(&other.operand)
    }
}

/// Two owned operands, in source order
#[derive(Debug)]
pub struct Binary<'a> {
    left: Box<Expression<'a>>,
    right: Box<Expression<'a>>,
}

impl<'a> Binary<'a> {
    pub fn new(left: Expression<'a>, right: Expression<'a>) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn peek_operand1(&self) -> &Expression<'a> {
        &self.left
    }

    pub fn peek_operand2(&self) -> &Expression<'a> {
        &self.right
    }

    pub(crate) fn emit_operand1(&self, out: &mut Sink<'_>, cx: &mut ElabContext<'_>) -> usize {
        emit_wrapped(&self.left, out, cx)
    }

    pub(crate) fn emit_operand2(&self, out: &mut Sink<'_>, cx: &mut ElabContext<'_>) -> usize {
        emit_wrapped(&self.right, out, cx)
    }

    pub(crate) fn eval_operand1(&self, folder: &mut Folder<'_>) -> Option<i64> {
        self.left.evaluate_with(folder)
    }

    pub(crate) fn eval_operand2(&self, folder: &mut Folder<'_>) -> Option<i64> {
        self.right.evaluate_with(folder)
    }

    pub(crate) fn dump_operands(&self, out: &mut dyn fmt::Write, indent: usize) -> fmt::Result {
        self.left.dump(out, indent + DUMP_STEP)?;
        self.right.dump(out, indent + DUMP_STEP)
    }

    pub fn symbolic_compare(&self, other: &Binary<'_>) -> bool {
        self.left.symbolic_compare(&other.left) && self.right.symbolic_compare(&other.right)
    }
}
