//! End-to-end checks of assignments against a populated symbol table

use assign_checker::{
    Accepted, Expr, Literal, Rejection, Session, SymbolTable, Type, TypeChecker,
    is_implicitly_convertible,
};
use assign_checker::driver::OutcomeKind;
use assign_checker::frontend::parse_script;
use pretty_assertions::assert_eq;

fn populated() -> SymbolTable {
    let mut table = SymbolTable::new();
    assert!(table.declare("x", Type::Int));
    assert!(table.declare("y", Type::Float));
    assert!(table.declare("c", Type::Char));
    assert!(table.declare("msg", Type::String));
    table
}

#[test]
fn int_literal_into_int() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("x", &Expr::literal(Literal::Int(42))),
        Ok(Accepted { declared: Type::Int, resolved: Type::Int })
    );
}

#[test]
fn int_literal_widens_into_float() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("y", &Expr::literal(Literal::Int(5))),
        Ok(Accepted { declared: Type::Float, resolved: Type::Int })
    );
}

#[test]
fn int_literal_does_not_narrow_into_char() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("c", &Expr::literal(Literal::Int(65))),
        Err(Rejection::TypeMismatch { from: Type::Int, to: Type::Char })
    );
}

#[test]
fn string_literal_into_int() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("x", &Expr::literal(Literal::Str("hello".into()))),
        Err(Rejection::TypeMismatch { from: Type::String, to: Type::Int })
    );
}

#[test]
fn int_variable_widens_into_float() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("y", &Expr::variable("x")),
        Ok(Accepted { declared: Type::Float, resolved: Type::Int })
    );
}

#[test]
fn undeclared_target() {
    let table = populated();
    let checker = TypeChecker::new(&table);
    assert_eq!(
        checker.check_assignment("undefined", &Expr::literal(Literal::Int(10))),
        Err(Rejection::UndeclaredTarget { name: "undefined".into() })
    );
}

#[test]
fn convertibility_matches_checker() {
    let mut table = SymbolTable::new();
    for ty in Type::ALL {
        table.declare(ty.keyword().to_uppercase(), ty);
    }
    let checker = TypeChecker::new(&table);

    for from in Type::ALL {
        for to in Type::ALL {
            let source = Expr::variable(from.keyword().to_uppercase());
            let result = checker.check_assignment(&to.keyword().to_uppercase(), &source);
            assert_eq!(result.is_ok(), is_implicitly_convertible(from, to), "{from} -> {to}");
        }
    }
}

#[test]
fn script_session_matches_direct_checks() {
    let source = include_str!("../demos/session.tc");
    let script = parse_script(source).unwrap();
    let report = Session::new().run_script(&script, source);

    let verdicts: Vec<_> = report
        .outcomes()
        .iter()
        .map(|o| match &o.kind {
            OutcomeKind::Checked { target, result } => (target.as_str(), result.clone()),
            other => panic!("unexpected outcome {:?}", other),
        })
        .collect();

    assert_eq!(
        verdicts,
        vec![
            ("x", Ok(Accepted { declared: Type::Int, resolved: Type::Int })),
            ("y", Ok(Accepted { declared: Type::Float, resolved: Type::Int })),
            ("c", Err(Rejection::TypeMismatch { from: Type::Int, to: Type::Char })),
            ("x", Err(Rejection::TypeMismatch { from: Type::String, to: Type::Int })),
            ("y", Ok(Accepted { declared: Type::Float, resolved: Type::Int })),
            ("undefined", Err(Rejection::UndeclaredTarget { name: "undefined".into() })),
            ("msg", Ok(Accepted { declared: Type::String, resolved: Type::String })),
            ("x", Err(Rejection::UndeclaredSource { name: "ghost".into() })),
        ]
    );
    assert_eq!(report.accepted_count(), 4);
    assert_eq!(report.error_count(), 4);
}

#[test]
fn rerunning_a_script_is_deterministic() {
    let source = include_str!("../demos/session.tc");
    let script = parse_script(source).unwrap();
    let first = Session::new().run_script(&script, source);
    let second = Session::new().run_script(&script, source);
    assert_eq!(first, second);
}

#[test]
fn accepted_lines_render() {
    let source = include_str!("../demos/session.tc");
    let script = parse_script(source).unwrap();
    let report = Session::new().run_script(&script, source);

    let lines: Vec<String> = report.accepted().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "line 8: assignment OK: x: int <- int",
            "line 9: assignment OK: y: float <- int (widening)",
            "line 12: assignment OK: y: float <- int (widening)",
            "line 14: assignment OK: msg: string <- string",
        ]
    );
}
