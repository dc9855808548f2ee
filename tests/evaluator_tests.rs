use pretty_assertions::assert_eq;

use rudis::console::BufferConsole;
use rudis::error::{ErrorKind, RudisError};
use rudis::evaluator::Evaluator;
use rudis::lang::Language;
use rudis::runner::{self, Options};
use rudis::value::Value;

fn session() -> Evaluator<BufferConsole> {
    let mut evaluator = Evaluator::with_console(BufferConsole::default());
    evaluator.set_language(Language::En);
    evaluator
}

fn eval(evaluator: &mut Evaluator<BufferConsole>, source: &str) -> Value {
    match evaluator.run(source) {
        Ok(evaluation) => evaluation.value,
        Err(err) => panic!("`{}` failed: {}", source, err),
    }
}

fn eval_fresh(source: &str) -> Value {
    eval(&mut session(), source)
}

fn fail(source: &str) -> RudisError {
    match session().run(source) {
        Ok(evaluation) => panic!("`{}` should fail, got {:?}", source, evaluation.value),
        Err(err) => err,
    }
}

fn number(source: &str) -> f64 {
    match eval_fresh(source) {
        Value::Number(n) => n,
        other => panic!("`{}` gave {:?}, expected a number", source, other),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn precedence_and_grouping() {
    assert_eq!(number("2 + 3 * 4"), 14.0);
    assert_eq!(number("2 * 3 + 4"), 10.0);
    assert_eq!(number("(2 + 3) * 4"), 20.0);
    assert_eq!(number("10 - 4 - 3"), 3.0);
    assert_eq!(number("2 * 3 % 4"), 2.0);
    assert_eq!(number("1 -- 2"), 3.0);
}

#[test]
fn power_is_right_associative() {
    assert_eq!(number("3^2^2"), 81.0);
    assert_eq!(number("(2^3)^2"), 64.0);
    assert_eq!(number("2^-1"), 0.5);
}

#[test]
fn factorial() {
    assert_eq!(number("5!"), 120.0);
    assert_eq!(number("0!"), 1.0);
    assert_eq!(number("2^3!"), 40320.0);
    assert_eq!(number("171!"), f64::INFINITY);

    let err = fail("(-1)!");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "Factorial requires a non-negative integer");
    assert_eq!(fail("2.5!").kind, ErrorKind::DomainError);
}

#[test]
fn modulo_truncates_operands() {
    assert_eq!(number("10 % 3"), 1.0);
    assert_eq!(number("7.9 % 3.2"), 1.0);
    assert_eq!(number("-7 % 3"), -1.0);
}

#[test]
fn division_and_modulo_by_zero() {
    let err = fail("5 / 0");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "Division by zero");

    let err = fail("10 % 0");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "Modulo by zero");

    // 0.5 truncates to 0.
    assert_eq!(fail("10 % 0.5").message, "Modulo by zero");
}

#[test]
fn number_literals() {
    assert_eq!(number("0xFF"), 255.0);
    assert_eq!(number("0b1101"), 13.0);
    assert_eq!(number("0.1 + 0.2"), 0.1 + 0.2);
    assert_eq!(number("3.25"), 3.25);
}

#[test]
fn very_long_fractions_stay_finite() {
    let mut evaluator = session();
    let source = format!("x = 0.{}; x", "1".repeat(320));
    match eval(&mut evaluator, &source) {
        Value::Number(n) => assert!((n - 1.0 / 9.0).abs() < 1e-15, "{}", n),
        other => panic!("expected a number, got {:?}", other),
    }

    let tiny = format!("0.{}1", "0".repeat(400));
    assert_eq!(number(&tiny), 0.0);
    assert_eq!(number("2.50000000000000000000000000000001"), 2.5);
}

#[test]
fn malformed_literals_are_lex_errors() {
    for source in ["0xG", "0b2", "42.", "2 @ 2", "\"open"] {
        assert_eq!(fail(source).kind, ErrorKind::LexError, "{}", source);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Variables and sequences
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn chained_assignment() {
    let mut evaluator = session();
    let evaluation = evaluator.run("a = b = c = 10").expect("assignment");
    assert!(evaluation.is_assignment);
    assert_eq!(evaluation.displayable(), None);
    assert_eq!(eval(&mut evaluator, "a + b + c"), Value::Number(30.0));
}

#[test]
fn sequence_yields_last_value() {
    assert_eq!(eval_fresh("x = 5; x + 1"), Value::Number(6.0));
    assert_eq!(eval_fresh("x = 5\ny = x * 2\ny - 1"), Value::Number(9.0));
    assert_eq!(eval_fresh("1; 2; x = 3"), Value::Number(2.0));
    assert_eq!(eval_fresh("x = 1; y = 2; x + y"), Value::Number(3.0));

    let evaluation = session().run("x = 1; y = 2").expect("assignments");
    assert_eq!(evaluation.displayable(), None);
}

#[test]
fn variables_persist_and_overwrite() {
    let mut evaluator = session();
    eval(&mut evaluator, "x = 1");
    eval(&mut evaluator, "x = x + 41");
    assert_eq!(eval(&mut evaluator, "x"), Value::Number(42.0));
    assert_eq!(evaluator.environment().len(), 1);
}

#[test]
fn undefined_variable() {
    let err = fail("y + 1");
    assert_eq!(err.kind, ErrorKind::NameError);
    assert_eq!(err.message, "Variable not defined: y");
}

#[test]
fn failed_statement_keeps_earlier_effects() {
    let mut evaluator = session();
    assert!(evaluator.run("x = 4; 1 / 0").is_err());
    assert_eq!(eval(&mut evaluator, "x"), Value::Number(4.0));
}

// ═══════════════════════════════════════════════════════════════════════════
// Strings
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn concatenation_uses_session_precision() {
    let mut evaluator = session();
    assert_eq!(evaluator.run("setdec(2)").expect("setdec").displayable(), None);
    assert_eq!(evaluator.decimal_places(), 2);
    assert_eq!(eval(&mut evaluator, "1 + \"x\""), Value::string("1.00x"));
    assert_eq!(eval(&mut evaluator, "\"a\" + \"b\""), Value::string("ab"));
}

#[test]
fn strings_reject_other_arithmetic() {
    let err = fail("\"a\" * 2");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "Arithmetic operations require numbers");
    assert_eq!(fail("-\"a\"").kind, ErrorKind::DomainError);
}

#[test]
fn escapes() {
    assert_eq!(eval_fresh(r#""a\tb\n""#), Value::string("a\tb\n"));
    assert_eq!(eval_fresh(r#""\q""#), Value::string("\\q"));
}

// ═══════════════════════════════════════════════════════════════════════════
// Builtins
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn math_and_statistics() {
    assert_eq!(number("sqrt(16)"), 4.0);
    assert_eq!(number("abs(-3)"), 3.0);
    assert_eq!(number("mean(1, 2, 3, 4)"), 2.5);
    assert_eq!(number("median(5, 1, 3)"), 3.0);
    assert_eq!(number("sum(1, 2, 3)"), 6.0);
    assert_eq!(number("max(sqrt(16), abs(-5))"), 5.0);
    assert!((number("log(1000)") - 3.0).abs() < 1e-12);
}

#[test]
fn finance() {
    assert_eq!(number("si(1000, 0.1, 2)"), 200.0);
    assert!((number("fv_ci(1000, 0.1, 2)") - 1210.0).abs() < 1e-9);
    assert_eq!(number("rate(10, -100, 1000, 0)"), 0.05);
}

#[test]
fn aliases_match_their_targets() {
    assert_eq!(number("raiz(16)"), number("sqrt(16)"));
    assert_eq!(number("media(2, 4)"), 3.0);
    assert_eq!(number("js(1000, 0.1, 2)"), number("si(1000, 0.1, 2)"));
}

#[test]
fn math_errors_in_functions() {
    let err = fail("sqrt(-1)");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "Math error in function sqrt");
    assert_eq!(fail("ln(0)").message, "Math error in function ln");
    assert_eq!(fail("mean(\"a\")").kind, ErrorKind::DomainError);
}

#[test]
fn arity_errors_are_syntax_errors() {
    let err = fail("sqrt(1, 2)");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Function sqrt requires exactly 1 argument");

    let err = fail("pv(0.05, 10)");
    assert_eq!(err.kind, ErrorKind::SyntaxError);
    assert_eq!(err.message, "Function pv requires exactly 3 arguments");
}

#[test]
fn unknown_function() {
    let err = fail("foo(1)");
    assert_eq!(err.kind, ErrorKind::NameError);
    assert_eq!(err.message, "Unknown function: foo");
}

#[test]
fn setdec_range() {
    let err = fail("setdec(16)");
    assert_eq!(err.kind, ErrorKind::DomainError);
    assert_eq!(err.message, "setdec: number of places must be between 0 and 15");
    assert_eq!(fail("setdec(-1)").kind, ErrorKind::DomainError);

    let mut evaluator = session();
    eval(&mut evaluator, "setdec(3.9)");
    assert_eq!(evaluator.decimal_places(), 3);
    assert_eq!(evaluator.render(&Value::Number(2.0 / 3.0)), "0.667");
}

#[test]
fn print_and_clear_use_the_console() {
    let mut evaluator = session();
    eval(&mut evaluator, "setdec(2)");
    let evaluation = evaluator.run("print(\"total:\", 5)").expect("print");
    assert_eq!(evaluation.displayable(), None);
    eval(&mut evaluator, "print()");
    eval(&mut evaluator, "clear()");

    let console = evaluator.console();
    assert_eq!(console.lines, vec!["total: 5.00".to_string(), String::new()]);
    assert_eq!(console.clears, 1);
}

#[test]
fn styles_and_layout() {
    assert_eq!(eval_fresh("red(\"hi\")"), Value::string("\x1b[31mhi\x1b[0m"));
    assert_eq!(eval_fresh("bold(5)"), Value::string("\x1b[1m5\x1b[0m"));
    assert_eq!(eval_fresh("center(6, \"ab\")"), Value::string("  ab  "));
    assert_eq!(eval_fresh("right(4, 7)"), Value::string("   7"));
    assert_eq!(eval_fresh("repeat(\"-=\", 3)"), Value::string("---"));
    assert_eq!(fail("repeat(5, 3)").kind, ErrorKind::DomainError);
}

// ═══════════════════════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn messages_follow_session_language() {
    let mut evaluator = Evaluator::with_console(BufferConsole::default());
    assert_eq!(evaluator.language(), Language::Pt);
    let err = evaluator.run("5 / 0").expect_err("division by zero");
    assert_eq!(err.message, "Divisão por zero");
    assert_eq!(err.line(Language::Pt), "Erro: Divisão por zero");
}

#[test]
fn reset_forgets_everything() {
    let mut evaluator = session();
    eval(&mut evaluator, "x = 1; setdec(2)");
    evaluator.reset();
    assert!(evaluator.environment().is_empty());
    assert_eq!(evaluator.decimal_places(), 6);
    assert_eq!(evaluator.run("x").expect_err("x is gone").kind, ErrorKind::NameError);
}

#[test]
fn deepest_accepted_trees_evaluate() {
    let parens = "(".repeat(62) + "1" + &")".repeat(62);
    assert_eq!(number(&parens), 1.0);

    let sum = "1".to_string() + &"+1".repeat(62);
    assert_eq!(number(&sum), 63.0);

    let negations = "-".repeat(62) + "1";
    assert_eq!(number(&negations), 1.0);

    let powers = "1".to_string() + &"^1".repeat(62);
    assert_eq!(number(&powers), 1.0);
}

#[test]
fn deep_nesting_is_a_resource_error() {
    for source in [
        "(".repeat(300) + "1" + &")".repeat(300),
        "1".to_string() + &"+1".repeat(4096),
        "1".to_string() + &"*1".repeat(4095) + &"+1".repeat(4095),
        "(".repeat(6) + "1" + &"+1".repeat(4096) + &")".repeat(6),
        "-".repeat(1000) + "1",
        "1".to_string() + &"^1".repeat(1000),
    ] {
        let err = fail(&source);
        assert_eq!(err.kind, ErrorKind::ResourceError);
        assert_eq!(err.message, "Expression nested too deeply (limit is 64 levels)");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scripts
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scripts_run_line_by_line() {
    let script = "x = 2\n# a comment\n\nx * 3\nbad +\nprint(x)\n// done\n";
    let mut evaluator = session();
    let run = runner::run_script(&mut evaluator, script, Options::default());

    assert!(!run.exited);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].line, 5);
    assert_eq!(run.failures[0].source, "bad +");
    assert_eq!(run.failures[0].error.kind, ErrorKind::SyntaxError);
    assert_eq!(
        evaluator.console().lines,
        vec!["6.000000".to_string(), "2.000000".to_string()]
    );
}

#[test]
fn scripts_accept_repl_commands() {
    let script = "x = 2\nset lang en\nvars\nreset\nx\nquit\n1 + 1\n";
    let mut evaluator = Evaluator::with_console(BufferConsole::default());
    let run = runner::run_script(&mut evaluator, script, Options::default());

    assert!(run.exited);
    assert_eq!(evaluator.language(), Language::En);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].line, 5);
    assert_eq!(run.failures[0].error.message, "Variable not defined: x");
    assert_eq!(
        evaluator.console().lines,
        vec![
            "Language changed to English".to_string(),
            "=== DEFINED VARIABLES ===\n  x = 2.000000\nTotal: 1 variable".to_string(),
            "State reset. All variables removed.".to_string(),
            "Goodbye. Thank you for using Rudis. :)".to_string(),
        ]
    );
}

#[test]
fn inline_code_is_one_program() {
    let plain = Options {
        plain_errors: true,
        ..Options::default()
    };

    let mut evaluator = session();
    let outcome = runner::run_inline(&mut evaluator, "x = 5; print(x^2)", plain);
    assert_eq!(
        outcome,
        runner::Outcome {
            succeeded: true,
            exited: false
        }
    );
    assert_eq!(evaluator.console().lines, vec!["25.000000".to_string()]);

    let outcome = runner::run_inline(&mut evaluator, "vars", plain);
    assert!(outcome.succeeded);
    assert_eq!(
        evaluator.console().lines.last().map(String::as_str),
        Some("=== DEFINED VARIABLES ===\n  x = 5.000000\nTotal: 1 variable")
    );

    assert!(runner::run_inline(&mut evaluator, "exit", plain).exited);
    assert!(!runner::run_inline(&mut evaluator, "1 / 0", plain).succeeded);
}
