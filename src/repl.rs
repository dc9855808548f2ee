use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::console::Console;
use crate::error::RudisError;
use crate::evaluator::Evaluator;
use crate::help;
use crate::lang::{Language, Message};
use crate::runner::{self, Options};

const PROMPT: &str = "rudis> ";

/// What the REPL should do after a line.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Nothing,
    Text(String),
    Failure(RudisError),
    Exit(String),
}

/// Handles one line of input: a REPL command or a program.
///
/// Output goes into the returned [`Reply`] rather than straight to the
/// terminal, so the loop stays a thin shell around this function.
pub fn process_line<C: Console>(
    evaluator: &mut Evaluator<C>,
    line: &str,
    options: Options,
) -> Reply {
    let input = line.trim();
    let language = evaluator.language();
    let words: Vec<&str> = input.split_whitespace().collect();

    match words.as_slice() {
        [] => Reply::Nothing,
        ["exit"] | ["quit"] => Reply::Exit(Message::Goodbye.text(language)),
        ["help"] => Reply::Text(help::general(language)),
        ["help", topic] => match topic.parse::<usize>() {
            Ok(number) => Reply::Text(
                help::page(number, language).unwrap_or_else(|message| message.text(language)),
            ),
            Err(_) => Reply::Text(
                help::function(topic, language)
                    .unwrap_or_else(|| Message::NoSuchHelpTopic(topic.to_string()).text(language)),
            ),
        },
        ["vars"] => Reply::Text(list_variables(evaluator)),
        ["reset"] => {
            evaluator.reset();
            Reply::Text(Message::StateReset.text(language))
        }
        ["clear"] => {
            evaluator.console_mut().clear_screen();
            Reply::Nothing
        }
        ["set", "lang", code] => match code.parse::<Language>() {
            Ok(language) => {
                evaluator.set_language(language);
                Reply::Text(Message::LanguageChanged(language).text(language))
            }
            Err(message) => Reply::Text(message.text(language)),
        },
        _ => match runner::execute(evaluator, input, options) {
            Ok(evaluation) => match evaluation.displayable() {
                Some(value) => Reply::Text(evaluator.render(value)),
                None => Reply::Nothing,
            },
            Err(error) => Reply::Failure(error),
        },
    }
}

fn list_variables<C: Console>(evaluator: &Evaluator<C>) -> String {
    let language = evaluator.language();
    let environment = evaluator.environment();
    if environment.is_empty() {
        return Message::NoVariables.text(language);
    }

    let mut lines = vec![Message::VariablesHeader.text(language)];
    for variable in environment.iter() {
        lines.push(format!(
            "  {} = {}",
            variable.name,
            evaluator.render(&variable.value)
        ));
    }
    lines.push(Message::VariablesTotal(environment.len()).text(language));
    lines.join("\n")
}

pub fn start<C: Console>(mut evaluator: Evaluator<C>, options: Options) {
    let language = evaluator.language();
    println!(
        "{}",
        Message::Banner {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
        }
        .text(language)
    );
    println!("{}", Message::Instructions.text(language));
    println!();

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("{}", Message::EditorUnavailable(err.to_string()).text(language));
            return;
        }
    };

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = editor.add_history_entry(line.as_str()) {
                        debug!("could not add history entry: {}", err);
                    }
                }
                match process_line(&mut evaluator, &line, options) {
                    Reply::Nothing => {}
                    Reply::Text(text) => println!("{}", text),
                    Reply::Failure(error) => runner::report(
                        &error,
                        line.trim(),
                        None,
                        evaluator.language(),
                        options,
                    ),
                    Reply::Exit(goodbye) => {
                        println!("{}", goodbye);
                        break;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("{}", Message::Goodbye.text(evaluator.language()));
                break;
            }
            Err(err) => {
                eprintln!(
                    "{}",
                    Message::InputError(err.to_string()).text(evaluator.language())
                );
                break;
            }
        }
    }
}
