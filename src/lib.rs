// Rudis: a small calculator language with math, statistics and finance
// builtins, a line-oriented script runner and an interactive REPL.

pub mod ast;
pub mod builtins;
pub mod config;
pub mod console;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod help;
pub mod lang;
pub mod lexer;
pub mod math;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod style;
pub mod value;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr, UnaryOp};
pub use console::{BufferConsole, Console, StdConsole};
pub use environment::Environment;
pub use error::{ErrorKind, RudisError, Span};
pub use evaluator::{Evaluation, Evaluator};
pub use lang::{Language, Message};
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse, Parser};
pub use value::Value;

pub use repl::start as start_repl;
