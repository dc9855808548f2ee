use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use crate::builtins::MAX_DECIMAL_PLACES;
use crate::evaluator::DEFAULT_DECIMAL_PLACES;
use crate::lang::Language;

/// What the binary should do with its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Repl,
    File(PathBuf),
    Eval(String),
}

/// Command-line settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub eval: Option<String>,
    /// Stay in the REPL after running a file or `-e` program.
    pub interactive: bool,
    pub language: Language,
    pub decimal_places: usize,
    /// One line per error instead of an annotated source excerpt.
    pub plain_errors: bool,
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            eval: None,
            interactive: false,
            language: Language::default(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            plain_errors: false,
            dump_tokens: false,
            dump_ast: false,
            verbosity: 0,
        }
    }
}

impl Config {
    pub fn command() -> Command {
        Command::new("rudis")
            .version(env!("CARGO_PKG_VERSION"))
            .about("A calculator language with math, statistics and finance functions")
            .arg(
                Arg::new("file")
                    .help("Script to run, one program per line")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .index(1),
            )
            .arg(
                Arg::new("eval")
                    .short('e')
                    .long("eval")
                    .help("Evaluate CODE and print its result")
                    .value_name("CODE")
                    .conflicts_with("file"),
            )
            .arg(
                Arg::new("interactive")
                    .short('i')
                    .long("interactive")
                    .help("Start the REPL, after FILE or CODE if given")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("lang")
                    .short('l')
                    .long("lang")
                    .help("Message language")
                    .value_name("LANG")
                    .value_parser(["pt", "en"])
                    .default_value("pt"),
            )
            .arg(
                Arg::new("decimals")
                    .short('d')
                    .long("decimals")
                    .help("Decimal places shown for numbers")
                    .value_name("N")
                    .value_parser(value_parser!(u8).range(0..=MAX_DECIMAL_PLACES as i64)),
            )
            .arg(
                Arg::new("plain-errors")
                    .long("plain-errors")
                    .help("Report errors as a single line")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("dump-tokens")
                    .long("dump-tokens")
                    .help("Print the token stream before evaluating")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("dump-ast")
                    .long("dump-ast")
                    .help("Print the syntax tree before evaluating")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Log more (-v info, -vv debug, -vvv trace)")
                    .action(ArgAction::Count),
            )
    }

    pub fn from_args<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }

    pub fn from_matches(matches: &ArgMatches) -> Config {
        let language = matches
            .get_one::<String>("lang")
            .and_then(|code| code.parse().ok())
            .unwrap_or_default();

        Config {
            file: matches.get_one::<PathBuf>("file").cloned(),
            eval: matches.get_one::<String>("eval").cloned(),
            interactive: matches.get_flag("interactive"),
            language,
            decimal_places: matches
                .get_one::<u8>("decimals")
                .map(|n| usize::from(*n))
                .unwrap_or(DEFAULT_DECIMAL_PLACES),
            plain_errors: matches.get_flag("plain-errors"),
            dump_tokens: matches.get_flag("dump-tokens"),
            dump_ast: matches.get_flag("dump-ast"),
            verbosity: matches.get_count("verbose"),
        }
    }

    pub fn mode(&self) -> Mode {
        match (&self.eval, &self.file) {
            (Some(code), _) => Mode::Eval(code.clone()),
            (None, Some(path)) => Mode::File(path.clone()),
            (None, None) => Mode::Repl,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_portuguese_repl() {
        let config = Config::from_args(["rudis"]).expect("no arguments is valid");
        assert_eq!(config, Config::default());
        assert_eq!(config.mode(), Mode::Repl);
        assert_eq!(config.log_level(), LevelFilter::Warn);
    }

    #[test]
    fn reads_every_option() {
        let config = Config::from_args([
            "rudis", "-e", "1+1", "--lang", "en", "-d", "2", "--plain-errors", "--dump-ast", "-vv",
        ])
        .expect("valid arguments");
        assert_eq!(config.mode(), Mode::Eval("1+1".to_string()));
        assert_eq!(config.language, Language::En);
        assert_eq!(config.decimal_places, 2);
        assert!(config.plain_errors);
        assert!(config.dump_ast);
        assert!(!config.dump_tokens);
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn file_mode() {
        let config = Config::from_args(["rudis", "calc.rd", "-i"]).expect("valid arguments");
        assert_eq!(config.mode(), Mode::File(PathBuf::from("calc.rd")));
        assert!(config.interactive);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_args(["rudis", "--lang", "fr"]).is_err());
        assert!(Config::from_args(["rudis", "-d", "16"]).is_err());
    }
}
