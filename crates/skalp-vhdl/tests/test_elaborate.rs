//! Tests for assignment target elaboration

use skalp_vhdl::{
    ArithOp, Architecture, Declaration, ElabContext, Entity, ErrorKind, Expression, Ident,
    NameRef, PortMode, Scope,
};
use std::cell::Cell;

fn design() -> (Entity<'static>, Architecture<'static>) {
    let mut ent = Entity::new("counter");
    ent.add_generic("WIDTH", "natural", Some(Expression::integer(8)))
        .unwrap();
    ent.add_port("clk", PortMode::In, "std_logic").unwrap();
    ent.add_port("q", PortMode::Out, "unsigned").unwrap();
    ent.add_port("bus", PortMode::InOut, "std_logic_vector").unwrap();
    ent.add_port("level", PortMode::Buffer, "std_logic").unwrap();

    let mut arch = Architecture::new("rtl");
    arch.add_signal("count", "unsigned").unwrap();
    arch.add_variable("tmp", "integer").unwrap();
    arch.add_constant("MAX", "integer", Expression::integer(255))
        .unwrap();
    (ent, arch)
}

#[test]
fn test_writable_targets() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);

    for target in ["q", "bus", "level", "count", "tmp"] {
        assert_eq!(Expression::name(target).elaborate_lval(&mut cx), 0, "{}", target);
    }
    assert!(cx.diagnostics().is_empty());
}

#[test]
fn test_indexed_target() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);
    let target = Expression::indexed("count", Expression::integer(3));
    assert_eq!(target.elaborate_lval(&mut cx), 0);
}

#[test]
fn test_input_port_is_not_writable() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);

    assert_eq!(Expression::name("clk").elaborate_lval(&mut cx), 1);
    let diags = cx.take_diagnostics();
    assert_eq!(diags.kinds(), vec![ErrorKind::NotWritable]);
    let message = diags.iter().next().unwrap().to_string();
    assert!(message.contains("input port clk"), "{}", message);
}

#[test]
fn test_constants_are_not_writable() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);

    assert_eq!(Expression::name("MAX").elaborate_lval(&mut cx), 1);
    assert_eq!(Expression::name("WIDTH").elaborate_lval(&mut cx), 1);
    assert_eq!(
        cx.diagnostics().kinds(),
        vec![ErrorKind::NotWritable, ErrorKind::NotWritable]
    );
}

#[test]
fn test_unresolved_target() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);

    assert_eq!(Expression::name("nope").elaborate_lval(&mut cx), 1);
    assert_eq!(cx.diagnostics().kinds(), vec![ErrorKind::UnresolvedName]);
}

#[test]
fn test_non_names_are_not_lvalues() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);
    let base = NameRef::new("count");

    let targets = [
        Expression::integer(3),
        Expression::character('1'),
        Expression::arithmetic(ArithOp::Plus, Expression::name("q"), Expression::integer(1)),
        Expression::not(Expression::name("q")),
        Expression::abs(Expression::name("tmp")),
        Expression::attribute(&base, "length"),
    ];
    for target in &targets {
        assert!(target.elaborate_lval(&mut cx) > 0);
    }
    assert_eq!(cx.diagnostics().len(), targets.len());
    assert!(cx
        .diagnostics()
        .iter()
        .all(|d| d.kind() == ErrorKind::NotAnLvalue));
}

#[test]
fn test_errors_accumulate_across_targets() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);

    let targets = [
        Expression::name("clk"),
        Expression::name("count"),
        Expression::name("ghost"),
        Expression::integer(0),
    ];
    let total: usize = targets.iter().map(|t| t.elaborate_lval(&mut cx)).sum();
    assert_eq!(total, 3);
    assert_eq!(
        cx.diagnostics().kinds(),
        vec![
            ErrorKind::NotWritable,
            ErrorKind::UnresolvedName,
            ErrorKind::NotAnLvalue
        ]
    );
}

#[test]
fn test_diagnostic_carries_location() {
    let (ent, arch) = design();
    let mut cx = ElabContext::new(&ent, &arch);
    let target = Expression::name("ghost").with_span(skalp_vhdl::LineInfo::new("counter.vhd", 41));

    target.elaborate_lval(&mut cx);
    let diag = cx.diagnostics().iter().next().unwrap();
    assert_eq!(
        diag.to_string(),
        "counter.vhd:41: error: Signal/variable ghost not found in this context"
    );
}

/// Scope that records every lookup and fails all of them
struct TrapScope {
    calls: Cell<usize>,
}

impl TrapScope {
    fn new() -> Self {
        Self {
            calls: Cell::new(0),
        }
    }
}

impl Scope for TrapScope {
    fn lookup(&self, _name: Ident) -> Option<Declaration<'_>> {
        self.calls.set(self.calls.get() + 1);
        None
    }
}

#[test]
fn test_wildcard_never_looks_up() {
    let ent = TrapScope::new();
    let arch = TrapScope::new();
    let mut cx = ElabContext::new(&ent, &arch);
    let all = Expression::all();

    assert_eq!(all.elaborate_lval(&mut cx), 1);
    assert_eq!(cx.diagnostics().kinds(), vec![ErrorKind::InvalidAll]);

    let dumped = all.dump_to_string();
    assert!(!dumped.is_empty());

    assert_eq!(ent.calls.get(), 0);
    assert_eq!(arch.calls.get(), 0);
}

#[test]
fn test_trap_scope_sees_ordinary_names() {
    let ent = TrapScope::new();
    let arch = TrapScope::new();
    let mut cx = ElabContext::new(&ent, &arch);

    assert_eq!(Expression::name("x").elaborate_lval(&mut cx), 1);
    assert_eq!(arch.calls.get(), 1);
    assert_eq!(ent.calls.get(), 1);
}
