use log::debug;

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::builtins;
use crate::error::{RudisError, Span};
use crate::lang::{Language, Message};
use crate::lexer::{Cursor, Lexer, Token, TokenType};

/// Deepest syntax tree accepted. Parentheses, negations, powers and
/// every operator in a `+ -` or `* / %` chain each count one level.
///
/// Parsing, evaluating and dropping a tree all recurse once per level, so
/// this keeps the worst case well inside a 2 MiB thread stack.
pub const MAX_NESTING: usize = 64;

/// Parser state to return to when a guess does not pan out.
#[derive(Debug, Clone, Copy)]
struct Checkpoint {
    cursor: Cursor,
    previous_end: usize,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Lexer position just before `current` was scanned.
    current_start: Cursor,
    previous_end: usize,
    depth: usize,
}

/// Lexes and parses `source` in one go.
pub fn parse(source: &str, language: Language) -> Result<Expr, RudisError> {
    Parser::new(Lexer::new(source, language)).parse()
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current_start = lexer.cursor();
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            current_start,
            previous_end: 0,
            depth: 0,
        }
    }

    /// Parses a whole program.
    ///
    /// An empty program yields an empty `Sequence`; a single statement is
    /// returned as is.
    pub fn parse(&mut self) -> Result<Expr, RudisError> {
        let mut statements = Vec::new();

        loop {
            while self.match_separator() {}
            if self.check(&TokenType::Eof) {
                break;
            }
            statements.push(self.expression()?);
            if !self.match_separator() {
                break;
            }
        }

        self.expect_end()?;

        if statements.len() == 1 {
            return Ok(statements.swap_remove(0));
        }
        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().to(last.span()),
            _ => Span::default(),
        };
        Ok(Expr::Sequence { statements, span })
    }

    fn language(&self) -> Language {
        self.lexer.language()
    }

    fn expect_end(&self) -> Result<(), RudisError> {
        match &self.current.token_type {
            TokenType::Eof => Ok(()),
            TokenType::Error(message) => {
                Err(RudisError::lex_error(self.current.span, message.clone()))
            }
            TokenType::Equal => Err(self
                .syntax_error(self.current.span, Message::IncompleteExpression)
                .with_help(Message::AssignmentHelp.text(self.language()))),
            TokenType::RightParen => Err(self
                .syntax_error(self.current.span, Message::IncompleteExpression)
                .with_help(Message::ParenthesesHelp.text(self.language()))),
            _ => Err(self.syntax_error(self.current.span, Message::IncompleteExpression)),
        }
    }

    fn expression(&mut self) -> Result<Expr, RudisError> {
        self.nested(|parser| parser.assignment())
    }

    /// `IDENTIFIER '=' expression`, or else arithmetic.
    ///
    /// Seeing an identifier is not enough to decide: the token after it
    /// settles the question, so the parser checkpoints, looks, and rewinds
    /// when there is no `=`.
    fn assignment(&mut self) -> Result<Expr, RudisError> {
        if let TokenType::Identifier(name) = &self.current.token_type {
            let name = name.clone();
            let checkpoint = self.checkpoint();
            let target = self.advance();

            if self.check(&TokenType::Equal) {
                self.advance();
                let value = self.expression()?;
                let span = target.span.to(value.span());
                return Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                    span,
                });
            }

            debug!("'{}' is not an assignment target, rewinding", name);
            self.restore(checkpoint);
        }

        self.arithmetic()
    }

    fn arithmetic(&mut self) -> Result<Expr, RudisError> {
        self.binary_chain(&[BinaryOp::Add, BinaryOp::Subtract], Self::term)
    }

    fn term(&mut self) -> Result<Expr, RudisError> {
        self.binary_chain(
            &[BinaryOp::Multiply, BinaryOp::Divide, BinaryOp::Modulo],
            Self::factor,
        )
    }

    /// `operand (op operand)*`, folded to the left.
    ///
    /// Every operator makes the tree one level deeper, so each one is
    /// charged against the same nesting budget as parentheses.
    fn binary_chain(
        &mut self,
        allowed: &[BinaryOp],
        operand: fn(&mut Self) -> Result<Expr, RudisError>,
    ) -> Result<Expr, RudisError> {
        let depth = self.depth;
        let result = self.fold_chain(allowed, operand);
        self.depth = depth;
        result
    }

    fn fold_chain(
        &mut self,
        allowed: &[BinaryOp],
        operand: fn(&mut Self) -> Result<Expr, RudisError>,
    ) -> Result<Expr, RudisError> {
        let mut expr = operand(self)?;

        while let Some(operator) = self.binary_operator(allowed) {
            let operator_token = self.advance();
            self.deepen(operator_token.span)?;
            let right = operand(self)?;
            let span = expr.span().to(right.span());
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
                span,
            };
        }

        Ok(expr)
    }

    /// `power '!'?`
    fn factor(&mut self) -> Result<Expr, RudisError> {
        let expr = self.power()?;

        if self.check(&TokenType::Bang) {
            let bang = self.advance();
            let span = expr.span().to(bang.span);
            return Ok(Expr::Unary {
                operator: UnaryOp::Factorial,
                operand: Box::new(expr),
                span,
            });
        }

        Ok(expr)
    }

    /// `atom ('^' power)?`, so `^` groups to the right.
    fn power(&mut self) -> Result<Expr, RudisError> {
        let base = self.atom()?;

        if self.check(&TokenType::Caret) {
            self.advance();
            let exponent = self.nested(|parser| parser.power())?;
            let span = base.span().to(exponent.span());
            return Ok(Expr::Binary {
                left: Box::new(base),
                operator: BinaryOp::Power,
                right: Box::new(exponent),
                span,
            });
        }

        Ok(base)
    }

    fn atom(&mut self) -> Result<Expr, RudisError> {
        let token = self.current.clone();

        match token.token_type {
            TokenType::Number(value) => {
                self.advance();
                Ok(Expr::Number {
                    value,
                    span: token.span,
                })
            }
            TokenType::String(value) => {
                self.advance();
                Ok(Expr::String {
                    value,
                    span: token.span,
                })
            }
            TokenType::Identifier(name) => {
                self.advance();
                if self.check(&TokenType::LeftParen) {
                    return Err(RudisError::name_error(
                        token.span,
                        Message::UnknownFunction(name).text(self.language()),
                    ));
                }
                Ok(Expr::Variable {
                    name,
                    span: token.span,
                })
            }
            TokenType::Function(name) => self.function_call(name, token.span),
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(&TokenType::RightParen, Message::ExpectedRightParen)
                    .map_err(|err| {
                        err.with_help(Message::ParenthesesHelp.text(self.language()))
                    })?;
                Ok(expr)
            }
            TokenType::Minus => {
                self.advance();
                let operand = self.nested(|parser| parser.atom())?;
                let span = token.span.to(operand.span());
                Ok(Expr::Unary {
                    operator: UnaryOp::Negate,
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenType::Error(message) => Err(RudisError::lex_error(token.span, message)),
            TokenType::Eof => Err(self.syntax_error(self.end_span(), Message::UnexpectedEnd)),
            TokenType::Newline | TokenType::Semicolon => {
                Err(self.syntax_error(token.span, Message::InvalidExpression))
            }
            _ => Err(self.syntax_error(token.span, Message::UnexpectedToken(token.lexeme))),
        }
    }

    /// `FUNCTION '(' arguments? ')'`, with the argument count checked
    /// against the registry.
    fn function_call(&mut self, name: String, name_span: Span) -> Result<Expr, RudisError> {
        self.advance();
        self.consume(
            &TokenType::LeftParen,
            Message::ExpectedLeftParenAfterFunction(name.clone()),
        )?;

        let mut args = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                args.push(self.expression()?);
                if !self.check(&TokenType::Comma) {
                    break;
                }
                self.advance();
            }
        }

        let close = self.consume(
            &TokenType::RightParen,
            Message::ExpectedRightParenAfterArguments(name.clone()),
        )?;
        let span = name_span.to(close.span);

        if let Some(builtin) = builtins::lookup(&name) {
            builtin
                .arity
                .check(&name, args.len())
                .map_err(|message| self.syntax_error(span, message))?;
        }

        Ok(Expr::Call { name, args, span })
    }

    // Helpers

    fn binary_operator(&self, allowed: &[BinaryOp]) -> Option<BinaryOp> {
        let operator = match self.current.token_type {
            TokenType::Plus => BinaryOp::Add,
            TokenType::Minus => BinaryOp::Subtract,
            TokenType::Star => BinaryOp::Multiply,
            TokenType::Slash => BinaryOp::Divide,
            TokenType::Percent => BinaryOp::Modulo,
            TokenType::Caret => BinaryOp::Power,
            _ => return None,
        };
        allowed.contains(&operator).then_some(operator)
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, RudisError>,
    ) -> Result<T, RudisError> {
        let depth = self.depth;
        self.deepen(self.current.span)?;
        let result = parse(self);
        self.depth = depth;
        result
    }

    fn deepen(&mut self, span: Span) -> Result<(), RudisError> {
        if self.depth >= MAX_NESTING {
            return Err(RudisError::resource_error(
                span,
                Message::NestingTooDeep(MAX_NESTING).text(self.language()),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.current_start,
            previous_end: self.previous_end,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.seek(checkpoint.cursor);
        self.current_start = checkpoint.cursor;
        self.current = self.lexer.next_token();
        self.previous_end = checkpoint.previous_end;
    }

    fn match_separator(&mut self) -> bool {
        if matches!(
            self.current.token_type,
            TokenType::Semicolon | TokenType::Newline
        ) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token_type: &TokenType) -> bool {
        &self.current.token_type == token_type
    }

    /// Moves past the current token and returns it. Never reads beyond
    /// the end of input or an error token.
    fn advance(&mut self) -> Token {
        if matches!(
            self.current.token_type,
            TokenType::Eof | TokenType::Error(_)
        ) {
            return self.current.clone();
        }
        self.current_start = self.lexer.cursor();
        let next = self.lexer.next_token();
        let previous = std::mem::replace(&mut self.current, next);
        self.previous_end = previous.span.end;
        previous
    }

    fn consume(&mut self, token_type: &TokenType, message: Message) -> Result<Token, RudisError> {
        if self.check(token_type) {
            return Ok(self.advance());
        }
        match &self.current.token_type {
            TokenType::Error(lex_message) => {
                Err(RudisError::lex_error(self.current.span, lex_message.clone()))
            }
            TokenType::Eof => Err(self.syntax_error(self.end_span(), message)),
            _ => Err(self.syntax_error(self.current.span, message)),
        }
    }

    /// Points just past the last consumed token.
    fn end_span(&self) -> Span {
        Span::single(self.previous_end)
    }

    fn syntax_error(&self, span: Span, message: Message) -> RudisError {
        RudisError::syntax_error(span, message.text(self.language()))
    }
}
