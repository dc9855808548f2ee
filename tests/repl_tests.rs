use pretty_assertions::assert_eq;

use rudis::console::BufferConsole;
use rudis::error::ErrorKind;
use rudis::evaluator::Evaluator;
use rudis::lang::Language;
use rudis::repl::{process_line, Reply};
use rudis::runner::Options;

fn session() -> Evaluator<BufferConsole> {
    let mut evaluator = Evaluator::with_console(BufferConsole::default());
    evaluator.set_language(Language::En);
    evaluator
}

fn send(evaluator: &mut Evaluator<BufferConsole>, line: &str) -> Reply {
    process_line(evaluator, line, Options::default())
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        other => panic!("expected text, got {:?}", other),
    }
}

#[test]
fn echoes_values_but_not_assignments() {
    let mut evaluator = session();
    assert_eq!(send(&mut evaluator, "x = 5"), Reply::Nothing);
    assert_eq!(send(&mut evaluator, "x + 1"), Reply::Text("6.000000".to_string()));
    assert_eq!(send(&mut evaluator, "   "), Reply::Nothing);
    assert_eq!(send(&mut evaluator, "\"hi\""), Reply::Text("hi".to_string()));
}

#[test]
fn errors_come_back_as_failures() {
    let mut evaluator = session();
    match send(&mut evaluator, "1 / 0") {
        Reply::Failure(err) => assert_eq!(err.kind, ErrorKind::DomainError),
        other => panic!("expected a failure, got {:?}", other),
    }
    // The session survives.
    assert_eq!(send(&mut evaluator, "2"), Reply::Text("2.000000".to_string()));
}

#[test]
fn exit_and_quit() {
    let mut evaluator = session();
    let goodbye = "Goodbye. Thank you for using Rudis. :)".to_string();
    assert_eq!(send(&mut evaluator, "exit"), Reply::Exit(goodbye.clone()));
    assert_eq!(send(&mut evaluator, "  quit  "), Reply::Exit(goodbye));
}

#[test]
fn vars_lists_newest_first() {
    let mut evaluator = session();
    assert_eq!(text(send(&mut evaluator, "vars")), "No variables defined.");

    send(&mut evaluator, "x = 1");
    send(&mut evaluator, "y = \"two\"");
    assert_eq!(
        text(send(&mut evaluator, "vars")),
        "=== DEFINED VARIABLES ===\n  y = two\n  x = 1.000000\nTotal: 2 variables"
    );
}

#[test]
fn reset_clears_the_session() {
    let mut evaluator = session();
    send(&mut evaluator, "x = 1");
    assert_eq!(
        text(send(&mut evaluator, "reset")),
        "State reset. All variables removed."
    );
    assert!(matches!(send(&mut evaluator, "x"), Reply::Failure(_)));
}

#[test]
fn clear_command_clears_the_console() {
    let mut evaluator = session();
    assert_eq!(send(&mut evaluator, "clear"), Reply::Nothing);
    assert_eq!(evaluator.console().clears, 1);
}

#[test]
fn switching_language() {
    let mut evaluator = session();
    assert_eq!(
        text(send(&mut evaluator, "set lang pt")),
        "Idioma alterado para Português"
    );
    assert_eq!(evaluator.language(), Language::Pt);
    match send(&mut evaluator, "5 / 0") {
        Reply::Failure(err) => assert_eq!(err.message, "Divisão por zero"),
        other => panic!("expected a failure, got {:?}", other),
    }

    let reply = text(send(&mut evaluator, "set lang fr"));
    assert!(reply.contains("fr"), "{}", reply);
    assert_eq!(evaluator.language(), Language::Pt);
}

#[test]
fn help_topics() {
    let mut evaluator = session();
    assert!(text(send(&mut evaluator, "help")).contains("Statistics"));
    assert!(text(send(&mut evaluator, "help sqrt")).starts_with("sqrt: square root"));
    assert_eq!(
        text(send(&mut evaluator, "help nope")),
        "No help available for 'nope'"
    );
}

#[test]
fn numbered_help_pages() {
    let mut evaluator = session();
    let first = text(send(&mut evaluator, "help 1"));
    assert!(first.starts_with("Page 1 of 5"), "{}", first);
    assert!(first.contains("=== OPERATORS ==="));

    let second = text(send(&mut evaluator, "help 2"));
    assert!(second.contains("=== STATISTICS ==="), "{}", second);
    assert!(!second.contains("No help available"));

    assert_eq!(
        text(send(&mut evaluator, "help 99")),
        "Page 99 does not exist. Available pages: 1 to 5"
    );
}
