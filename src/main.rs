use std::process::ExitCode;

use rudis::config::{Config, Mode};
use rudis::evaluator::Evaluator;
use rudis::repl;
use rudis::runner::{self, Options};

fn main() -> ExitCode {
    let config = Config::from_matches(&Config::command().get_matches());

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let mut evaluator = Evaluator::new();
    evaluator.set_language(config.language);
    evaluator.set_decimal_places(config.decimal_places);
    let options = Options::from(&config);

    let outcome = match config.mode() {
        Mode::Repl => {
            repl::start(evaluator, options);
            return ExitCode::SUCCESS;
        }
        Mode::Eval(code) => runner::run_inline(&mut evaluator, &code, options),
        Mode::File(path) => runner::run_file(&mut evaluator, &path, options),
    };

    if config.interactive && !outcome.exited {
        repl::start(evaluator, options);
    }

    if outcome.succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
