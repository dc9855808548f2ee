use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::config::Config;
use crate::console::Console;
use crate::error::RudisError;
use crate::evaluator::{Evaluation, Evaluator};
use crate::lang::{Language, Message};
use crate::lexer;
use crate::parser;
use crate::repl::{self, Reply};

/// How programs are run and how failures are shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub plain_errors: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

impl From<&Config> for Options {
    fn from(config: &Config) -> Self {
        Self {
            plain_errors: config.plain_errors,
            dump_tokens: config.dump_tokens,
            dump_ast: config.dump_ast,
        }
    }
}

/// A script line that failed.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    /// 1-based.
    pub line: usize,
    pub source: String,
    pub error: RudisError,
}

/// Lexes, parses and evaluates one program, printing the token stream
/// and tree first when asked to.
pub fn execute<C: Console>(
    evaluator: &mut Evaluator<C>,
    source: &str,
    options: Options,
) -> Result<Evaluation, RudisError> {
    let language = evaluator.language();

    if options.dump_tokens {
        for token in lexer::tokenize(source, language) {
            println!("{}", token);
        }
    }

    let program = parser::parse(source, language)?;
    if options.dump_ast {
        print!("{}", program.dump());
    }

    evaluator.evaluate(&program)
}

pub fn report(
    error: &RudisError,
    source: &str,
    filename: Option<&str>,
    language: Language,
    options: Options,
) {
    if options.plain_errors {
        eprintln!("{}", error.line(language));
    } else {
        error.report(source, filename, language);
    }
}

/// Shows what a processed line produced on the session console.
///
/// Returns whether the line asked to exit, or the error of a failed line.
fn deliver<C: Console>(evaluator: &mut Evaluator<C>, reply: Reply) -> Result<bool, RudisError> {
    match reply {
        Reply::Nothing => Ok(false),
        Reply::Text(text) => {
            evaluator.console_mut().write_line(&text);
            Ok(false)
        }
        Reply::Exit(goodbye) => {
            evaluator.console_mut().write_line(&goodbye);
            Ok(true)
        }
        Reply::Failure(error) => Err(error),
    }
}

/// Result of running a whole script.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptRun {
    pub failures: Vec<LineFailure>,
    /// An `exit` or `quit` line stopped the script.
    pub exited: bool,
}

/// How a file or inline run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub succeeded: bool,
    pub exited: bool,
}

/// Runs each line of `source` as REPL input in one session, so commands
/// such as `vars` or `set lang en` work in scripts too.
///
/// Blank lines and lines that are only a comment are skipped. A failing
/// line does not stop the script; every failure is returned.
pub fn run_script<C: Console>(
    evaluator: &mut Evaluator<C>,
    source: &str,
    options: Options,
) -> ScriptRun {
    let mut run = ScriptRun {
        failures: Vec::new(),
        exited: false,
    };

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let reply = repl::process_line(evaluator, trimmed, options);
        match deliver(evaluator, reply) {
            Ok(false) => {}
            Ok(true) => {
                debug!("exit at line {}", index + 1);
                run.exited = true;
                break;
            }
            Err(error) => {
                debug!("line {} failed: {}", index + 1, error);
                run.failures.push(LineFailure {
                    line: index + 1,
                    source: trimmed.to_string(),
                    error,
                });
            }
        }
    }

    run
}

/// Runs a script file, reporting each failing line.
pub fn run_file<C: Console>(evaluator: &mut Evaluator<C>, path: &Path, options: Options) -> Outcome {
    let display = path.display().to_string();
    let failed = Outcome {
        succeeded: false,
        exited: false,
    };

    if !path.exists() {
        let language = evaluator.language();
        eprintln!(
            "{}: {}",
            Message::ErrorPrefix.text(language),
            Message::FileNotFound(display).text(language)
        );
        return failed;
    }

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            let language = evaluator.language();
            eprintln!(
                "{}: {}",
                Message::ErrorPrefix.text(language),
                Message::FileReadError {
                    path: display,
                    reason: err.to_string(),
                }
                .text(language)
            );
            return failed;
        }
    };

    info!("running {}", display);
    let run = run_script(evaluator, &source, options);
    // The script may have switched language.
    let language = evaluator.language();
    for failure in &run.failures {
        if options.plain_errors {
            eprintln!(
                "{}",
                Message::LineError {
                    line: failure.line,
                    message: failure.error.line(language),
                }
                .text(language)
            );
        } else {
            let label = format!("{}:{}", display, failure.line);
            failure
                .error
                .report(&failure.source, Some(&label), language);
        }
    }

    Outcome {
        succeeded: run.failures.is_empty(),
        exited: run.exited,
    }
}

/// Runs `source` as a single line of REPL input and prints its result.
pub fn run_inline<C: Console>(
    evaluator: &mut Evaluator<C>,
    source: &str,
    options: Options,
) -> Outcome {
    let reply = repl::process_line(evaluator, source, options);
    match deliver(evaluator, reply) {
        Ok(exited) => Outcome {
            succeeded: true,
            exited,
        },
        Err(error) => {
            report(
                &error,
                source.trim(),
                Some("<eval>"),
                evaluator.language(),
                options,
            );
            Outcome {
                succeeded: false,
                exited: false,
            }
        }
    }
}
