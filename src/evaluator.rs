use log::debug;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::builtins::{self, CallContext, Returned, MAX_DECIMAL_PLACES};
use crate::console::{Console, StdConsole};
use crate::environment::Environment;
use crate::error::{ErrorKind, RudisError, Span};
use crate::lang::{Language, Message};
use crate::math;
use crate::parser;
use crate::value::Value;

pub const DEFAULT_DECIMAL_PLACES: usize = 6;

/// Result of evaluating a program or statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    /// Set for assignments and for builtins run only for their effect.
    /// Such results are not echoed.
    pub is_assignment: bool,
}

impl Evaluation {
    fn value(value: Value) -> Self {
        Self {
            value,
            is_assignment: false,
        }
    }

    fn assignment(value: Value) -> Self {
        Self {
            value,
            is_assignment: true,
        }
    }

    fn silent() -> Self {
        Self::assignment(Value::Null)
    }

    /// The value to show the user, if any.
    pub fn displayable(&self) -> Option<&Value> {
        if self.is_assignment || self.value.is_null() {
            None
        } else {
            Some(&self.value)
        }
    }
}

/// One interpreter session: variables, display precision, language and
/// the console builtins write to.
pub struct Evaluator<C: Console = StdConsole> {
    environment: Environment,
    decimal_places: usize,
    language: Language,
    console: C,
}

impl Evaluator<StdConsole> {
    pub fn new() -> Self {
        Self::with_console(StdConsole)
    }
}

impl Default for Evaluator<StdConsole> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Console> Evaluator<C> {
    pub fn with_console(console: C) -> Self {
        Self {
            environment: Environment::new(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            language: Language::default(),
            console,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn decimal_places(&self) -> usize {
        self.decimal_places
    }

    pub fn set_decimal_places(&mut self, places: usize) {
        self.decimal_places = places.min(MAX_DECIMAL_PLACES);
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Forgets every variable and restores the default precision.
    pub fn reset(&mut self) {
        self.environment.clear();
        self.decimal_places = DEFAULT_DECIMAL_PLACES;
    }

    /// Formats a result the way the REPL prints it.
    pub fn render(&self, value: &Value) -> String {
        value.render(self.decimal_places)
    }

    /// Parses and evaluates `source` in this session.
    pub fn run(&mut self, source: &str) -> Result<Evaluation, RudisError> {
        let program = parser::parse(source, self.language)?;
        self.evaluate(&program)
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Evaluation, RudisError> {
        match expr {
            Expr::Number { value, .. } => Ok(Evaluation::value(Value::Number(*value))),
            Expr::String { value, .. } => Ok(Evaluation::value(Value::string(value.clone()))),
            Expr::Variable { name, span } => match self.environment.lookup(name) {
                Some(value) => Ok(Evaluation::value(value.clone())),
                None => Err(RudisError::name_error(
                    *span,
                    self.text(Message::UndefinedVariable(name.clone())),
                )),
            },
            Expr::Assign { name, value, .. } => {
                let value = self.evaluate(value)?.value;
                debug!("{} = {:?}", name, value);
                self.environment.set(name, value.clone());
                Ok(Evaluation::assignment(value))
            }
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate(left)?.value;
                let right_val = self.evaluate(right)?.value;
                self.evaluate_binary_op(*operator, left_val, right_val, *span)
                    .map(Evaluation::value)
            }
            Expr::Unary {
                operator,
                operand,
                span,
            } => {
                let operand_val = self.evaluate(operand)?.value;
                self.evaluate_unary_op(*operator, operand_val, *span)
                    .map(Evaluation::value)
            }
            Expr::Call { name, args, span } => self.call_function(name, args, *span),
            Expr::Sequence { statements, .. } => {
                let mut result = Evaluation::silent();
                for statement in statements {
                    let evaluation = self.evaluate(statement)?;
                    if !evaluation.is_assignment {
                        result = evaluation;
                    }
                }
                Ok(result)
            }
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: BinaryOp,
        left: Value,
        right: Value,
        span: Span,
    ) -> Result<Value, RudisError> {
        match (&left, &right) {
            (Value::Number(l), Value::Number(r)) => self.arithmetic(operator, *l, *r, span),
            _ if operator == BinaryOp::Add => Ok(left.concat(&right, self.decimal_places)),
            _ => Err(RudisError::domain_error(
                span,
                self.text(Message::ArithmeticRequiresNumbers),
            )),
        }
    }

    fn arithmetic(
        &self,
        operator: BinaryOp,
        left: f64,
        right: f64,
        span: Span,
    ) -> Result<Value, RudisError> {
        let result = match operator {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => {
                if right == 0.0 {
                    return Err(RudisError::domain_error(
                        span,
                        self.text(Message::DivisionByZero),
                    ));
                }
                left / right
            }
            BinaryOp::Modulo => {
                // Both sides are truncated to integers first.
                let divisor = right.trunc() as i64;
                if divisor == 0 {
                    return Err(RudisError::domain_error(
                        span,
                        self.text(Message::ModuloByZero),
                    ));
                }
                (left.trunc() as i64).wrapping_rem(divisor) as f64
            }
            BinaryOp::Power => left.powf(right),
        };

        if result.is_nan() {
            return Err(RudisError::domain_error(
                span,
                self.text(Message::MathErrorInOperator(operator.symbol())),
            ));
        }
        Ok(Value::Number(result))
    }

    fn evaluate_unary_op(
        &self,
        operator: UnaryOp,
        operand: Value,
        span: Span,
    ) -> Result<Value, RudisError> {
        let n = operand.as_number().ok_or_else(|| {
            RudisError::domain_error(span, self.text(Message::UnaryRequiresNumbers))
        })?;

        match operator {
            UnaryOp::Negate => Ok(Value::Number(-n)),
            UnaryOp::Factorial => {
                let result = math::factorial(n);
                if result.is_nan() {
                    return Err(RudisError::domain_error(
                        span,
                        self.text(Message::FactorialDomain),
                    ));
                }
                Ok(Value::Number(result))
            }
        }
    }

    fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        span: Span,
    ) -> Result<Evaluation, RudisError> {
        let builtin = builtins::lookup(name).ok_or_else(|| {
            RudisError::name_error(span, self.text(Message::UnknownFunction(name.to_string())))
        })?;

        if args.is_empty() && !matches!(builtin.canonical(), "print" | "clear") {
            return Err(RudisError::syntax_error(
                span,
                self.text(Message::FunctionWithoutArguments(name.to_string())),
            ));
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg)?.value);
        }

        let mut ctx = CallContext {
            decimal_places: &mut self.decimal_places,
            console: &mut self.console,
        };
        match builtins::call(name, &values, &mut ctx) {
            Ok(Returned::Silent) => Ok(Evaluation::silent()),
            Ok(Returned::Value(Value::Number(n))) if n.is_nan() => Err(RudisError::domain_error(
                span,
                self.text(Message::MathErrorInFunction(name.to_string())),
            )),
            Ok(Returned::Value(value)) => Ok(Evaluation::value(value)),
            Err(message) => Err(RudisError::new(
                error_kind(&message),
                span,
                self.text(message),
            )),
        }
    }

    fn text(&self, message: Message) -> String {
        message.text(self.language)
    }
}

fn error_kind(message: &Message) -> ErrorKind {
    match message {
        Message::UnknownFunction(_) => ErrorKind::NameError,
        Message::RequiresExactly { .. } | Message::RequiresAtLeast { .. } => {
            ErrorKind::SyntaxError
        }
        _ => ErrorKind::DomainError,
    }
}
