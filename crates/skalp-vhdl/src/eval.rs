//! Constant folding
//!
//! `evaluate` returns `None` for anything that is not a compile-time
//! integer. That is the normal outcome for most expressions, so it is
//! never reported as an error. Numeric corner cases (division by zero,
//! overflow, a negative exponent) also just fail the fold.
//!
//! Overflow policy: checked. Any operation whose exact result does not
//! fit in an `i64` fails the fold instead of wrapping or saturating.
//!
//! Character literals, relations and logical operators do not fold.

use crate::expr::{ArithOp, ExprKind, Expression, NameRef};
use crate::ident::Ident;
use crate::scope::Scope;
use indexmap::IndexMap;

/// How many constants may refer to other constants before folding gives up
pub const MAX_CONSTANT_DEPTH: usize = 64;

/// State of one `evaluate` call
///
/// Each constant is folded at most once per call. A constant whose fold
/// was cut short by the depth limit is not remembered, since a shallower
/// reference to it may still fold.
pub(crate) struct Folder<'s> {
    scope: &'s dyn Scope,
    depth: usize,
    folded: IndexMap<Ident, Option<i64>>,
    truncated: bool,
}

impl<'s> Folder<'s> {
    fn new(scope: &'s dyn Scope) -> Self {
        Self {
            scope,
            depth: 0,
            folded: IndexMap::new(),
            truncated: false,
        }
    }
}

impl<'a> Expression<'a> {
    /// Try to reduce this expression to an integer constant
    pub fn evaluate(&self, scope: &dyn Scope) -> Option<i64> {
        self.evaluate_with(&mut Folder::new(scope))
    }

    pub(crate) fn evaluate_with(&self, folder: &mut Folder<'_>) -> Option<i64> {
        match self.kind() {
            ExprKind::Integer(value) => Some(*value),
            ExprKind::Name(name) => name.evaluate_with(folder),
            ExprKind::Arithmetic(op, operands) => {
                let lhs = operands.eval_operand1(folder)?;
                let rhs = operands.eval_operand2(folder)?;
                fold_arithmetic(*op, lhs, rhs)
            }
            ExprKind::Character(_)
            | ExprKind::Logical(..)
            | ExprKind::Relation(..)
            | ExprKind::Edge(..)
            | ExprKind::Attribute(_)
            | ExprKind::Abs(_)
            | ExprKind::Not(_) => None,
        }
    }
}

impl NameRef<'_> {
    fn evaluate_with(&self, folder: &mut Folder<'_>) -> Option<i64> {
        // `all` never names a declaration and an element of a constant
        // array is not an integer constant.
        if self.is_all() || self.peek_index().is_some() {
            return None;
        }
        let name = self.name();
        if let Some(value) = folder.folded.get(&name) {
            return *value;
        }
        if folder.depth >= MAX_CONSTANT_DEPTH {
            log::debug!(
                "Constant {} nests more than {} levels, not folding",
                name,
                MAX_CONSTANT_DEPTH
            );
            folder.truncated = true;
            return None;
        }

        log::trace!("Folding name {}", name);
        let scope = folder.scope;
        let Some(value) = scope.find_constant(name) else {
            folder.folded.insert(name, None);
            return None;
        };

        let outer_truncated = std::mem::replace(&mut folder.truncated, false);
        folder.depth += 1;
        let result = value.evaluate_with(folder);
        folder.depth -= 1;
        if result.is_some() || !folder.truncated {
            folder.folded.insert(name, result);
        }
        folder.truncated |= outer_truncated;
        result
    }
}

/// Apply an arithmetic operator to two folded operands
pub fn fold_arithmetic(op: ArithOp, lhs: i64, rhs: i64) -> Option<i64> {
    let result = match op {
        ArithOp::Plus => lhs.checked_add(rhs),
        ArithOp::Minus => lhs.checked_sub(rhs),
        ArithOp::Mult => lhs.checked_mul(rhs),
        ArithOp::Div | ArithOp::Mod | ArithOp::Rem if rhs == 0 => {
            log::debug!("Not folding {} {} 0: division by zero", lhs, op.symbol());
            return None;
        }
        ArithOp::Div => lhs.checked_div(rhs),
        // Sign of the dividend. `i64::MIN rem -1` is 0, not an overflow.
        ArithOp::Rem => Some(lhs.wrapping_rem(rhs)),
        // Sign of the divisor.
        ArithOp::Mod => {
            let rem = lhs.wrapping_rem(rhs);
            if rem != 0 && (rem < 0) != (rhs < 0) {
                Some(rem + rhs)
            } else {
                Some(rem)
            }
        }
        ArithOp::Pow => return fold_pow(lhs, rhs),
    };

    if result.is_none() {
        log::debug!("Not folding {} {} {}: overflow", lhs, op.symbol(), rhs);
    }
    result
}

fn fold_pow(base: i64, exponent: i64) -> Option<i64> {
    if exponent < 0 {
        log::debug!("Not folding {} ** {}: negative exponent", base, exponent);
        return None;
    }
    let result = match base {
        0 => Some(if exponent == 0 { 1 } else { 0 }),
        1 => Some(1),
        -1 => Some(if exponent % 2 == 0 { 1 } else { -1 }),
        _ => u32::try_from(exponent)
            .ok()
            .and_then(|exp| base.checked_pow(exp)),
    };
    if result.is_none() {
        log::debug!("Not folding {} ** {}: overflow", base, exponent);
    }
    result
}
