/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

//! Crate unit tests.

use super::*;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

const NO_CALLABLES: [&str; 0] = [];

fn first_caret_column(pointer: &str) -> Option<usize> {
    pointer.chars().position(|ch| ch == '^').map(|idx| idx + 1)
}

fn assert_parse_error_case(case_name: &str, source: &str, expected_line: usize) {
    let err = parse_formula(source).expect_err("parse should fail");
    assert_eq!(
        err.line, expected_line,
        "{case_name}: unexpected error line"
    );
    assert!(err.column > 0, "{case_name}: expected non-zero column");
    assert_eq!(
        err.kind,
        DiagnosticKind::Syntax,
        "{case_name}: unexpected kind for '{}'",
        err.message
    );

    let expected_snippet = source
        .lines()
        .nth(err.line.saturating_sub(1))
        .unwrap_or_default();
    assert_eq!(
        err.snippet, expected_snippet,
        "{case_name}: snippet should match source line"
    );
    assert!(
        err.pointer.contains('^'),
        "{case_name}: missing caret pointer"
    );
    assert_eq!(
        first_caret_column(&err.pointer),
        Some(err.column),
        "{case_name}: caret column mismatch"
    );
}

fn params(source: &str) -> Vec<String> {
    resolve(source, &NO_CALLABLES)
        .expect("resolve should succeed")
        .parameters()
        .to_vec()
}

fn eval_std(source: &str) -> Result<f64, FormulaError> {
    evaluate(source, &FunctionTable::standard())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn resolves_free_variables_in_first_read_order() {
    assert_eq!(params("x*y"), vec!["x", "y"]);
    assert_eq!(params("b + a * b - c"), vec!["b", "a", "c"]);
    assert_eq!(params("1 + 2"), Vec::<String>::new());
}

#[test]
fn compound_assignment_target_is_not_a_parameter() {
    assert_eq!(params("y+=x"), vec!["x"]);
    let resolution = resolve("y+=x", &NO_CALLABLES).expect("resolve should succeed");
    assert_eq!(resolution.locals(), ["y"]);
}

#[test]
fn known_callables_are_not_parameters() {
    let resolution = resolve("y+=cos(x)", &["cos"]).expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["x"]);

    let set: HashSet<String> = ["cos".to_string()].into_iter().collect();
    let resolution = resolve("cos(x) * z", &set).expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["x", "z"]);

    let tree: BTreeSet<String> = ["cos".to_string()].into_iter().collect();
    let resolution = resolve("cos(x) * z", &tree).expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["x", "z"]);
}

#[test]
fn bare_known_callable_is_a_zero_argument_call() {
    let resolution = resolve("now + x", &["now"]).expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["x"]);

    let resolution = resolve("now + x", &NO_CALLABLES).expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["now", "x"]);
}

#[test]
fn names_read_before_their_first_assignment_are_parameters() {
    let resolution = resolve("a = b + c; c = 2; a", &NO_CALLABLES).expect("resolve");
    assert_eq!(resolution.parameters(), ["b", "c"]);
    assert_eq!(resolution.locals(), ["a"]);

    let formula = Formula::compile("a = b + c; c = 2; a + c", &FunctionTable::standard())
        .expect("block");
    assert_close(formula.call(&[1.0, 5.0]).expect("call"), 8.0);
}

#[test]
fn assignment_target_is_local_in_its_own_right_hand_side() {
    let resolution = resolve("y = y * 2", &NO_CALLABLES).expect("resolve");
    assert!(resolution.parameters().is_empty());
    assert_eq!(resolution.locals(), ["y"]);
}

#[test]
fn uppercase_identifier_is_invalid_parameter_name() {
    let err = resolve("x + Y", &NO_CALLABLES).expect_err("resolve should fail");
    assert!(matches!(
        &err,
        ResolveError::InvalidParameterName { name, .. } if name == "Y"
    ));
    assert_eq!(err.name(), Some("Y"));
    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.line, 1);
    assert_eq!(diagnostic.column, 5);
    assert_eq!(first_caret_column(&diagnostic.pointer), Some(5));
    assert!(
        diagnostic
            .message
            .contains("should not start with an uppercase")
    );
    assert!(diagnostic.message.contains("misspelled a constant"));
}

#[test]
fn known_constants_are_neither_parameters_nor_errors() {
    assert_eq!(params("2 * PI * r + E"), vec!["r"]);

    let options = ResolveOptions::default().with_constant("G", 6.674e-11);
    let resolution = resolve_with("G * m1 * m2 / r ** 2", &NO_CALLABLES, &options)
        .expect("resolve should succeed");
    assert_eq!(resolution.parameters(), ["m1", "m2", "r"]);
}

#[test]
fn unknown_function_is_reported_at_call_site() {
    let err = resolve("foo(x)", &NO_CALLABLES).expect_err("resolve should fail");
    assert!(matches!(
        &err,
        ResolveError::UnknownFunction { name, .. } if name == "foo"
    ));
    assert_eq!(err.diagnostic().column, 1);
    assert!(err.to_string().contains("Unknown function 'foo'"));
}

#[test]
fn call_arguments_are_checked_before_the_callee() {
    let err = resolve("foo(Bar)", &NO_CALLABLES).expect_err("resolve should fail");
    assert!(matches!(err, ResolveError::InvalidParameterName { .. }));
}

#[test]
fn first_offending_node_determines_the_error() {
    let err = resolve("foo(x) + Y", &NO_CALLABLES).expect_err("resolve should fail");
    assert_eq!(err.name(), Some("foo"));

    let err = resolve("Y + foo(x)", &NO_CALLABLES).expect_err("resolve should fail");
    assert_eq!(err.name(), Some("Y"));
}

#[test]
fn malformed_formula_is_syntax_error() {
    let err = resolve("x +* y", &NO_CALLABLES).expect_err("resolve should fail");
    let ResolveError::Syntax(diagnostic) = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(diagnostic.line, 1);
    assert_eq!(diagnostic.column, 4);
    assert_eq!(diagnostic.snippet, "x +* y");
    assert_eq!(first_caret_column(&diagnostic.pointer), Some(4));
    assert_eq!(err.name(), None);
}

#[test]
fn assignment_to_constant_is_syntax_error() {
    let err = resolve("x = 1\nY = x", &NO_CALLABLES).expect_err("resolve should fail");
    let ResolveError::Syntax(diagnostic) = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert!(diagnostic.message.contains("dynamic constant assignment"));
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert_eq!(diagnostic.line, 2);
    assert_eq!(diagnostic.column, 1);
}

#[test]
fn boolean_keywords_are_not_names() {
    let err = parse_formula("true = 1; 2").expect_err("keyword target");
    assert_eq!(err.kind, DiagnosticKind::Syntax);
    assert_eq!(err.line, 1);

    let err = make_block(&["true"], "1", &FunctionTable::standard()).expect_err("keyword name");
    assert!(matches!(err, FormulaError::Resolve(ResolveError::Syntax(_))));
    assert!(params("truex + false").contains(&"truex".to_string()));
}

#[test]
fn resolution_is_idempotent() {
    let source = "a = x * y; b = a + z ** 2; b > w ? b : sqrt(w)";
    let first = resolve(source, &["sqrt"]).expect("resolve should succeed");
    let second = resolve(source, &["sqrt"]).expect("resolve should succeed");
    assert_eq!(first, second);
    assert_eq!(first.parameters(), ["x", "y", "z", "w"]);
}

#[test]
fn reports_parse_errors_for_invalid_forms() {
    let cases = vec![
        ("dangling operator", "x +* y", 1usize),
        ("unclosed call", "sin(x", 1),
        ("unclosed parenthesis", "y = (1 + 2", 1),
        ("missing ternary branch", "a ? b", 1),
        ("trailing comma in call", "f(1,)", 1),
        ("juxtaposed operands", "1 2", 1),
        ("error on second line", "x = 1\ny = (2 +", 2),
        ("bad assignment value", "x = 1\ny = * 2", 2),
    ];

    for (case_name, source, expected_line) in cases {
        assert_parse_error_case(case_name, source, expected_line);
    }
}

#[test]
fn parses_statements_separators_and_comments() {
    let program = parse_formula("# header\nx = 1; y = 2 # trailing\n\n;x + y\n").expect("parse");
    assert_eq!(program.statements.len(), 3);
    assert_eq!(program.assigned_names(), vec!["x", "y"]);

    let program = parse_formula("").expect("empty formula parses");
    assert!(program.statements.is_empty());
}

#[test]
fn newline_after_operator_continues_expression() {
    assert_close(eval_std("y = 1 +\n  2\ny").expect("evaluate"), 3.0);
    assert_close(eval_std("hypot(\n3,\n4\n)").expect("evaluate"), 5.0);
}

#[test]
fn parses_compound_assignment_operators() {
    let program = parse_formula("y **= 2").expect("parse");
    let StmtKind::Assign(assign) = &program.statements[0].kind else {
        panic!("expected assignment");
    };
    assert_eq!(assign.target, "y");
    assert_eq!(assign.op, Some(BinOp::Pow));

    let program = parse_formula("y == 2").expect("parse");
    assert!(matches!(
        &program.statements[0].kind,
        StmtKind::Expr(Expr {
            kind: ExprKind::Binary { op: BinOp::Eq, .. },
            ..
        })
    ));
}

#[test]
fn make_block_puts_leading_names_first() {
    let table = FunctionTable::standard();
    let formula = make_block(&["t", "x"], "x * y + sin(t)", &table).expect("block");
    assert_eq!(formula.parameters(), ["t", "x", "y"]);
    assert_close(formula.call(&[0.0, 2.0, 3.0]).expect("call"), 6.0);
}

#[test]
fn make_block_keeps_leading_names_that_the_formula_assigns() {
    let table = FunctionTable::standard();
    let formula = make_block(&["x", "y"], "y = y * 2", &table).expect("block");
    assert_eq!(formula.parameters(), ["x", "y"]);
    assert!(formula.locals().is_empty());
    assert_close(formula.call(&[1.0, 3.0]).expect("call"), 6.0);

    let formula = make_block(&["y", "x"], "y = 2 * x", &table).expect("block");
    assert_eq!(formula.parameters(), ["y", "x"]);
    assert_close(formula.call(&[0.0, 4.0]).expect("call"), 8.0);
    assert!(formula.to_c().locals.is_empty());
}

#[test]
fn make_block_rejects_bad_leading_names() {
    let table = FunctionTable::standard();
    let err = make_block(&["T"], "x", &table).expect_err("block should fail");
    assert!(matches!(
        err,
        FormulaError::Resolve(ResolveError::InvalidParameterName { .. })
    ));

    let err = make_block(&["two words"], "x", &table).expect_err("block should fail");
    assert!(matches!(err, FormulaError::Resolve(ResolveError::Syntax(_))));
}

#[test]
fn block_construction_checks_call_arity() {
    let table = FunctionTable::standard();
    let err = Formula::compile("sin(x, y)", &table).expect_err("build should fail");
    let FormulaError::Arity {
        name,
        expected,
        found,
        diagnostic,
    } = &err
    else {
        panic!("expected arity error, got {err:?}");
    };
    assert_eq!(name, "sin");
    assert_eq!(*expected, Arity::exactly(1));
    assert_eq!(*found, 2);
    assert!(diagnostic.message.contains("sin expects 1 argument(s), found 2"));
    assert_eq!(diagnostic.kind, DiagnosticKind::Arity);
    assert!(err.to_string().starts_with("error[arity]: "));

    let err = Formula::compile("x + sin", &table).expect_err("bare call needs arity 0");
    assert!(matches!(err, FormulaError::Arity { found: 0, .. }));

    assert!(Formula::compile("log(x) + log(x, 10)", &table).is_ok());
    let err = Formula::compile("log(x, 10, 2)", &table).expect_err("too many arguments");
    assert!(err.to_string().contains("1 to 2"));
}

#[test]
fn block_construction_links_against_the_table() {
    let resolution = resolve("foo(x)", &["foo"]).expect("resolve should succeed");
    let err = Formula::from_resolution(
        resolution,
        &FunctionTable::standard(),
        &ResolveOptions::default(),
    )
    .expect_err("foo is not in the table");
    assert!(matches!(
        err,
        FormulaError::Resolve(ResolveError::UnknownFunction { .. })
    ));
}

#[test]
fn registered_host_functions_are_callable() {
    let mut table = FunctionTable::empty();
    table
        .register("double", Arity::exactly(1), |a: &[f64]| a[0] * 2.0)
        .register("seven", Arity::exactly(0), |_: &[f64]| 7.0);
    assert!(table.contains("double"));
    assert_eq!(table.names().collect::<Vec<_>>(), vec!["double", "seven"]);

    let formula = Formula::compile("double(x) + seven", &table).expect("block");
    assert_eq!(formula.parameters(), ["x"]);
    assert_close(formula.call(&[1.5]).expect("call"), 10.0);
}

#[test]
fn evaluates_arithmetic_with_expected_precedence() {
    assert_close(eval_std("1 + 2 * 3").expect("evaluate"), 7.0);
    assert_close(eval_std("-2**2").expect("evaluate"), -4.0);
    assert_close(eval_std("2 ** 3 ** 2").expect("evaluate"), 512.0);
    assert_close(eval_std("2 ** -1").expect("evaluate"), 0.5);
    assert_close(eval_std("10 - 4 - 3").expect("evaluate"), 3.0);
    assert_close(eval_std("(1 + 2) * 3").expect("evaluate"), 9.0);
    assert_close(eval_std("log(8, 2)").expect("evaluate"), 3.0);
    assert_close(eval_std("2 * PI").expect("evaluate"), std::f64::consts::TAU);
}

#[test]
fn modulo_is_floored() {
    assert_close(eval_std("-7 % 3").expect("evaluate"), 2.0);
    assert_close(eval_std("7 % -3").expect("evaluate"), -2.0);
    assert_close(eval_std("7 % 3").expect("evaluate"), 1.0);
}

#[test]
fn only_false_is_falsy() {
    assert_close(eval_std("0 ? 1 : 2").expect("evaluate"), 1.0);
    assert_close(eval_std("false ? 1 : 2").expect("evaluate"), 2.0);
    assert_close(eval_std("1 > 2 ? 1 : 2").expect("evaluate"), 2.0);
    assert_close(eval_std("false || 3").expect("evaluate"), 3.0);
    assert_close(eval_std("0 && 4").expect("evaluate"), 4.0);
}

#[test]
fn logical_operators_short_circuit() {
    // `w` is a local, so reading it before `w = ...` runs would fail.
    assert_close(eval_std("false && w; w = 1").expect("w is never read"), 1.0);
    assert_close(eval_std("true || w; w = 2").expect("w is never read"), 2.0);
    let err = eval_std("true && w; w = 3").expect_err("w is read");
    assert!(matches!(
        err,
        FormulaError::Eval(EvalError::UninitializedVariable(ref name)) if name == "w"
    ));
}

#[test]
fn boolean_results_and_type_errors() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("x < 2", &table).expect("block");
    assert_eq!(formula.call_value(&[1.0]), Ok(Value::Bool(true)));
    assert_eq!(
        formula.call(&[1.0]),
        Err(EvalError::NotANumber(Value::Bool(true)))
    );

    let err = eval_std("true + 1").expect_err("type mismatch");
    assert!(matches!(
        err,
        FormulaError::Eval(EvalError::TypeMismatch { .. })
    ));
    let err = eval_std("sqrt(1 < 2)").expect_err("type mismatch");
    assert!(matches!(
        err,
        FormulaError::Eval(EvalError::TypeMismatch { ref op, .. }) if op == "sqrt"
    ));
}

#[test]
fn assignments_and_compound_updates_evaluate_in_order() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("y = x; y *= 2; y += 1; y %= 4", &table).expect("block");
    assert_eq!(formula.parameters(), ["x"]);
    assert_close(formula.call(&[3.0]).expect("call"), 3.0);
}

#[test]
fn reading_unassigned_local_fails_until_sandbox_binds_it() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("y = y + 1", &table).expect("block");
    assert!(formula.parameters().is_empty());
    assert_eq!(
        formula.call(&[]),
        Err(EvalError::UninitializedVariable("y".to_string()))
    );
    assert_eq!(formula.probe(), Ok(Value::Number(2.0)));
}

#[test]
fn sandbox_run_uses_configured_value() {
    let table = FunctionTable::standard();
    let options = ResolveOptions {
        probe_value: 3.0,
        ..ResolveOptions::default()
    };
    let formula = Formula::build(&[], "x * y", &table, &options).expect("block");
    assert_eq!(formula.probe(), Ok(Value::Number(9.0)));
}

#[test]
fn call_checks_argument_count() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("x * y", &table).expect("block");
    assert_eq!(
        formula.call(&[1.0]),
        Err(EvalError::ArityMismatch {
            expected: 2,
            found: 1
        })
    );

    let err = eval_std("x + 1").expect_err("free variable");
    assert!(matches!(
        err,
        FormulaError::Eval(EvalError::ArityMismatch { expected: 1, found: 0 })
    ));
}

#[test]
fn empty_formula_has_no_value() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("  # nothing\n", &table).expect("block");
    assert!(formula.parameters().is_empty());
    assert_eq!(formula.call(&[]), Err(EvalError::EmptyFormula));
}

#[test]
fn formula_is_reusable_and_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Formula>();
    assert_send_sync::<FunctionTable>();

    let formula = Formula::compile("a = x * 2; a", &FunctionTable::standard()).expect("block");
    assert_close(formula.call(&[1.0]).expect("call"), 2.0);
    assert_close(formula.call(&[5.0]).expect("call"), 10.0);
    let copy = formula.clone();
    assert_eq!(copy.source(), "a = x * 2; a");
    assert_eq!(copy.program(), formula.program());
}

#[test]
fn custom_constants_flow_into_evaluation() {
    let table = FunctionTable::standard();
    let options = ResolveOptions::default().with_constant("F", 2.0);
    assert_eq!(options.constant("F"), Some(2.0));
    let formula = Formula::build(&[], "F * n", &table, &options).expect("block");
    assert_close(formula.call(&[3.0]).expect("call"), 6.0);
}

#[test]
fn loads_options_from_toml() {
    let options = ResolveOptions::from_toml_str("probe_value = 2.5\n\n[constants]\nF = 96485.0\n")
        .expect("options");
    assert_eq!(options.probe_value, 2.5);
    assert_eq!(options.constant("F"), Some(96485.0));
    assert_eq!(options.constant("PI"), Some(std::f64::consts::PI));

    let options = ResolveOptions::from_toml_str("").expect("empty file");
    assert_eq!(options, ResolveOptions::default());
    assert_eq!(options.probe_value, DEFAULT_PROBE_VALUE);
}

#[test]
fn rejects_invalid_options() {
    let err = ResolveOptions::from_toml_str("[constants]\nf = 1.0\n").expect_err("lowercase");
    assert!(matches!(err, ConfigError::InvalidConstantName(ref name) if name == "f"));

    let err = ResolveOptions::from_toml_str("probe_value = nan\n").expect_err("nan");
    assert!(matches!(err, ConfigError::InvalidProbeValue(_)));

    let err = ResolveOptions::from_toml_str("probe = 1.0\n").expect_err("unknown key");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn emits_c_statements() {
    let program = parse_formula("y = x ** 2; y %= 3").expect("parse");
    let c = emit_c(&program);
    assert_eq!(c.code, "y = pow(x, 2.0);\ny = fmod(y, 3.0);\nreturn y;\n");
    assert_eq!(c.locals, vec!["y"]);

    let program = parse_formula("x > 1 && true ? -x : sqrt(x)").expect("parse");
    assert_eq!(
        emit_c(&program).code,
        "return (((x > 1.0) && 1) ? (-x) : sqrt(x));\n"
    );

    let formula = Formula::compile("a = x; a += 1", &FunctionTable::standard()).expect("block");
    assert_eq!(formula.to_c().code, "a = x;\na += 1.0;\nreturn a;\n");
    assert!(emit_c(&Program::default()).code.is_empty());
}

fn c_code(source: &str) -> String {
    emit_c(&parse_formula(source).expect("parse")).code
}

#[test]
fn emits_c_library_calls() {
    assert_eq!(c_code("log(8, 2)"), "return (log(8.0) / log(2.0));\n");
    assert_eq!(c_code("log(x)"), "return log(x);\n");
    assert_eq!(c_code("abs(x - 3)"), "return fabs((x - 3.0));\n");
}

#[test]
fn emitted_c_keeps_number_truthiness() {
    let table = FunctionTable::standard();
    let formula = Formula::compile("x = 0; x ? 1 : 2", &table).expect("block");
    assert_eq!(formula.call(&[]), Ok(1.0));
    assert_eq!(formula.to_c().code, "x = 0.0;\nreturn 1.0;\n");

    assert_eq!(c_code("x || 2"), "return x;\n");
    assert_eq!(c_code("x && 2"), "return 2.0;\n");
    assert_eq!(c_code("!x"), "return 0;\n");
    assert_eq!(
        c_code("x > 1 && 5"),
        "return ((x > 1.0) ? 5.0 : (x > 1.0));\n"
    );
    assert_eq!(c_code("b = x > 1; b ? 1 : 2"), "b = (x > 1.0);\nreturn (b ? 1.0 : 2.0);\n");
    assert_eq!(c_code("(x < 1) == 1"), "return 0;\n");
}

#[test]
fn emits_infinite_literals_as_huge_val() {
    assert_eq!(c_code("x = 1e400"), "x = HUGE_VAL;\nreturn x;\n");
    assert_eq!(c_code("-1e400"), "return (-HUGE_VAL);\n");
}

#[test]
fn renders_diagnostics_with_location() {
    let err = resolve("x +\n  Foo", &NO_CALLABLES).expect_err("resolve should fail");
    let rendered = err.to_string();
    assert!(rendered.contains("<formula>:2:3"));
    assert!(rendered.contains("  Foo"));

    assert!(rendered.starts_with("error[invalid-name]: "));
    assert_eq!(err.diagnostic().kind, DiagnosticKind::InvalidName);

    let err = resolve("foo(1)", &NO_CALLABLES).expect_err("resolve should fail");
    assert_eq!(err.diagnostic().kind, DiagnosticKind::UnknownFunction);

    let err = make_block(&["a b"], "1", &FunctionTable::standard()).expect_err("bad name");
    let diagnostic = match &err {
        FormulaError::Resolve(err) => err.diagnostic(),
        other => panic!("expected resolve error, got {other:?}"),
    };
    assert!(!diagnostic.is_placed());
    assert_eq!(
        err.to_string(),
        "error[syntax]: 'a b' is not a valid parameter name (<formula>)"
    );
}

#[test]
fn caret_follows_tab_indentation() {
    let err = parse_formula("\tx +* y").expect_err("parse should fail");
    assert_eq!(err.column, 5);
    assert_eq!(err.pointer, "\t   ^");
    assert_eq!(first_caret_column(&err.pointer), Some(5));
}

fn arb_formula() -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    (1usize..8).prop_flat_map(|len| {
        (
            prop::collection::vec(prop::sample::select(vec!["a", "b", "t", "x", "y1"]), len),
            prop::collection::vec(
                prop::sample::select(vec!["+", "-", "*", "/", "%", "**", "&&", "||"]),
                len - 1,
            ),
        )
    })
}

proptest! {
    /// Parameters are the distinct names in textual order; `t` is a local
    /// only when it is assigned before the expression reads it.
    #[test]
    fn parameters_are_distinct_in_first_read_order(
        (names, ops) in arb_formula(),
        declare_first in any::<bool>(),
    ) {
        let mut expr = names[0].to_string();
        for (op, name) in ops.iter().zip(names.iter().skip(1)) {
            expr.push_str(&format!(" {op} {name}"));
        }
        let source = if declare_first {
            format!("t = 1; {expr}")
        } else {
            format!("{expr}; t = 1")
        };

        let mut expected: Vec<String> = Vec::new();
        for name in &names {
            let local = declare_first && *name == "t";
            if !local && !expected.iter().any(|seen| seen == name) {
                expected.push(name.to_string());
            }
        }
        let expected_locals: Vec<String> = if expected.iter().any(|name| name == "t") {
            Vec::new()
        } else {
            vec!["t".to_string()]
        };

        let first = resolve(&source, &NO_CALLABLES).expect("generated formula resolves");
        prop_assert_eq!(first.parameters(), expected.as_slice());
        prop_assert_eq!(first.locals(), expected_locals.as_slice());

        let second = resolve(&source, &NO_CALLABLES).expect("generated formula resolves");
        prop_assert_eq!(first, second);
    }
}
