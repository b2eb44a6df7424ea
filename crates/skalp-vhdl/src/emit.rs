//! Verilog emission
//!
//! Operands are written left to right in source order. A child is
//! wrapped in parentheses exactly when it is not a primary, so the output
//! never depends on Verilog precedence to keep the VHDL meaning.

use crate::config::EscapeMode;
use crate::error::ElabError;
use crate::expr::{ArithOp, Attribute, EdgeKind, ExprKind, Expression, LogicOp, NameRef, RelOp};
use crate::scope::ElabContext;
use crate::span::LineInfo;
use std::fmt;

/// Verilog-2005 reserved words; VHDL names that collide get escaped
const VERILOG_KEYWORDS: &[&str] = &[
    "always", "and", "assign", "automatic", "begin", "buf", "bufif0", "bufif1", "case", "casex",
    "casez", "cell", "cmos", "config", "deassign", "default", "defparam", "design", "disable",
    "edge", "else", "end", "endcase", "endconfig", "endfunction", "endgenerate", "endmodule",
    "endprimitive", "endspecify", "endtable", "endtask", "event", "for", "force", "forever",
    "fork", "function", "generate", "genvar", "highz0", "highz1", "if", "ifnone", "incdir",
    "include", "initial", "inout", "input", "instance", "integer", "join", "large", "liblist",
    "library", "localparam", "macromodule", "medium", "module", "nand", "negedge", "nmos", "nor",
    "noshowcancelled", "not", "notif0", "notif1", "or", "output", "parameter", "pmos", "posedge",
    "primitive", "pull0", "pull1", "pulldown", "pullup", "pulsestyle_ondetect",
    "pulsestyle_onevent", "rcmos", "real", "realtime", "reg", "release", "repeat", "rnmos",
    "rpmos", "rtran", "rtranif0", "rtranif1", "scalared", "showcancelled", "signed", "small",
    "specify", "specparam", "strong0", "strong1", "supply0", "supply1", "table", "task", "time",
    "tran", "tranif0", "tranif1", "tri", "tri0", "tri1", "triand", "trior", "trireg", "unsigned",
    "use", "uwire", "vectored", "wait", "wand", "weak0", "weak1", "while", "wire", "wor", "xnor",
    "xor",
];

/// Write side of an emission, remembering whether the sink ever failed
pub(crate) struct Sink<'o> {
    out: &'o mut dyn fmt::Write,
    failed: bool,
}

impl<'o> Sink<'o> {
    pub(crate) fn new(out: &'o mut dyn fmt::Write) -> Self {
        Self { out, failed: false }
    }

    pub(crate) fn put(&mut self, text: &str) {
        if self.out.write_str(text).is_err() {
            self.failed = true;
        }
    }

    pub(crate) fn put_fmt(&mut self, args: fmt::Arguments<'_>) {
        if self.out.write_fmt(args).is_err() {
            self.failed = true;
        }
    }
}

/// Whether `name` can be written as a Verilog simple identifier
pub fn is_simple_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !VERILOG_KEYWORDS.contains(&name)
}

/// Whether `name` fits in a Verilog escaped identifier
///
/// An escaped identifier runs up to the first white space, so only
/// printable ASCII can appear in it.
pub fn is_escapable_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_graphic())
}

impl<'a> Expression<'a> {
    /// Translate this expression to Verilog, writing it to `out`
    ///
    /// Returns the number of errors found. Some text is always written,
    /// even when errors are reported.
    pub fn emit(&self, out: &mut dyn fmt::Write, cx: &mut ElabContext<'_>) -> usize {
        let mut sink = Sink::new(out);
        let mut errors = self.emit_into(&mut sink, cx);
        if sink.failed {
            cx.report(self.span(), ElabError::Output);
            errors += 1;
        }
        errors
    }

    /// Translate this expression into a fresh string
    pub fn emit_to_string(&self, cx: &mut ElabContext<'_>) -> (String, usize) {
        let mut text = String::new();
        let errors = self.emit(&mut text, cx);
        (text, errors)
    }

    pub(crate) fn emit_into(&self, out: &mut Sink<'_>, cx: &mut ElabContext<'_>) -> usize {
        match self.kind() {
            ExprKind::Integer(value) => {
                out.put_fmt(format_args!("{}", value));
                0
            }
            ExprKind::Character(value) => emit_character(out, *value, self.span(), cx),
            ExprKind::Name(name) => name.emit_into(out, self.span(), cx),
            ExprKind::Arithmetic(op, operands) => {
                let mut errors = operands.emit_operand1(out, cx);
                out.put(arith_operator(*op));
                errors += operands.emit_operand2(out, cx);
                errors
            }
            ExprKind::Logical(op, operands) => {
                // Verilog has no binary nand/nor, so invert the and/or.
                let inverted = matches!(op, LogicOp::Nand | LogicOp::Nor);
                if inverted {
                    out.put("~(");
                }
                let mut errors = operands.emit_operand1(out, cx);
                out.put(logic_operator(*op));
                errors += operands.emit_operand2(out, cx);
                if inverted {
                    out.put(")");
                }
                errors
            }
            ExprKind::Relation(op, operands) => {
                let mut errors = operands.emit_operand1(out, cx);
                out.put(relation_operator(*op));
                errors += operands.emit_operand2(out, cx);
                errors
            }
            ExprKind::Edge(kind, operand) => {
                match kind {
                    EdgeKind::Negedge => out.put("negedge "),
                    EdgeKind::Posedge => out.put("posedge "),
                    EdgeKind::Anyedge => {}
                }
                operand.emit_operand(out, cx)
            }
            ExprKind::Attribute(attr) => attr.emit_into(out, self.span(), cx),
            ExprKind::Abs(operand) => {
                out.put("abs(");
                let errors = operand.peek_operand().emit_into(out, cx);
                out.put(")");
                errors
            }
            ExprKind::Not(operand) => {
                out.put("~");
                operand.emit_operand(out, cx)
            }
        }
    }
}

impl NameRef<'_> {
    pub(crate) fn emit_into(
        &self,
        out: &mut Sink<'_>,
        span: LineInfo,
        cx: &mut ElabContext<'_>,
    ) -> usize {
        if self.is_all() {
            out.put("*");
            return 0;
        }

        let mut errors = 0;
        let escape = cx.config().escape;
        let representable = self.name().with_str(|name| {
            if !is_escapable_identifier(name) {
                // Best effort: keep it one token so the rest still lines up.
                let placeholder: String = name
                    .chars()
                    .map(|c| if c.is_ascii_graphic() { c } else { '_' })
                    .collect();
                out.put_fmt(format_args!("\\{} ", placeholder));
                false
            } else if escape == EscapeMode::Always || !is_simple_identifier(name) {
                out.put_fmt(format_args!("\\{} ", name));
                true
            } else {
                out.put(name);
                true
            }
        });
        if !representable {
            cx.report(span, ElabError::UnrepresentableName(self.name()));
            errors += 1;
        }

        if let Some(index) = self.peek_index() {
            out.put("[");
            errors += index.emit_into(out, cx);
            out.put("]");
        }
        errors
    }
}

impl Attribute<'_> {
    fn emit_into(&self, out: &mut Sink<'_>, span: LineInfo, cx: &mut ElabContext<'_>) -> usize {
        // The base may appear more than once, so render it a single time.
        let mut base = String::new();
        let mut errors = {
            let mut base_sink = Sink::new(&mut base);
            self.peek_base().emit_into(&mut base_sink, span, cx)
        };

        match self.kind() {
            Some(kind) => {
                for (i, call) in kind.verilog_calls().iter().enumerate() {
                    if i > 0 {
                        out.put(":");
                    }
                    out.put_fmt(format_args!("{}({})", call, base));
                }
            }
            None => {
                cx.report(
                    span,
                    ElabError::UnsupportedAttribute {
                        base: self.peek_base().name(),
                        attribute: self.peek_attribute(),
                    },
                );
                errors += 1;
                out.put_fmt(format_args!(
                    "$ivl_attribute({}, \"{}\")",
                    base,
                    self.peek_attribute()
                ));
            }
        }
        errors
    }
}

fn arith_operator(op: ArithOp) -> &'static str {
    match op {
        ArithOp::Plus => " + ",
        ArithOp::Minus => " - ",
        ArithOp::Mult => " * ",
        ArithOp::Div => " / ",
        // Verilog `%` truncates; it agrees with VHDL `mod` for non-negative operands.
        ArithOp::Mod | ArithOp::Rem => " % ",
        ArithOp::Pow => " ** ",
    }
}

fn logic_operator(op: LogicOp) -> &'static str {
    match op {
        LogicOp::And | LogicOp::Nand => " & ",
        LogicOp::Or | LogicOp::Nor => " | ",
        LogicOp::Xor => " ^ ",
        LogicOp::Xnor => " ~^ ",
    }
}

fn relation_operator(op: RelOp) -> &'static str {
    match op {
        RelOp::Eq => " == ",
        RelOp::Lt => " < ",
        RelOp::Gt => " > ",
        RelOp::Neq => " != ",
        RelOp::Le => " <= ",
        RelOp::Ge => " >= ",
    }
}

fn emit_character(
    out: &mut Sink<'_>,
    value: char,
    span: LineInfo,
    cx: &mut ElabContext<'_>,
) -> usize {
    match value {
        '0' | '1' => out.put_fmt(format_args!("1'b{}", value)),
        'Z' | 'z' => out.put("1'bz"),
        'X' | 'x' => out.put("1'bx"),
        '"' => out.put("\"\\\"\""),
        '\\' => out.put("\"\\\\\""),
        '\n' => out.put("\"\\n\""),
        '\t' => out.put("\"\\t\""),
        ' '..='~' => out.put_fmt(format_args!("\"{}\"", value)),
        // Verilog strings hold 8-bit characters; the rest go out as octal.
        '\0'..='\u{ff}' => out.put_fmt(format_args!("\"\\{:03o}\"", u32::from(value))),
        _ => {
            cx.report(span, ElabError::UnrepresentableCharacter(value));
            out.put("\"?\"");
            return 1;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_identifiers() {
        assert!(is_simple_identifier("data_in"));
        assert!(is_simple_identifier("_tmp"));
        assert!(is_simple_identifier("bus$1"));
        assert!(!is_simple_identifier(""));
        assert!(!is_simple_identifier("1abc"));
        assert!(!is_simple_identifier("has space"));
        assert!(is_escapable_identifier("1abc"));
        assert!(is_escapable_identifier("a+b"));
        assert!(!is_escapable_identifier("has space"));
        assert!(!is_escapable_identifier("tab\tsep"));
        assert!(!is_escapable_identifier("caf\u{e9}"));
        assert!(!is_simple_identifier("$bits"));
    }

    #[test]
    fn test_keywords_need_escaping() {
        assert!(!is_simple_identifier("reg"));
        assert!(!is_simple_identifier("input"));
        assert!(!is_simple_identifier("posedge"));
        assert!(is_simple_identifier("regs"));
    }

    struct FailingSink;

    impl fmt::Write for FailingSink {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_sink_failure_is_counted_once() {
        let ent = crate::scope::DeclTable::new();
        let arch = crate::scope::DeclTable::new();
        let mut cx = ElabContext::new(&ent, &arch);
        let expr = Expression::arithmetic(
            ArithOp::Plus,
            Expression::name("a"),
            Expression::name("b"),
        );

        let errors = expr.emit(&mut FailingSink, &mut cx);
        assert_eq!(errors, 1);
        assert_eq!(
            cx.diagnostics().kinds(),
            vec![crate::error::ErrorKind::Output]
        );
    }
}
