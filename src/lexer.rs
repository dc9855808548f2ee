use std::fmt;

use log::trace;

use crate::builtins;
use crate::error::Span;
use crate::lang::{Language, Message};
use crate::value::MAX_STRING_LEN;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    // Literals
    Number(f64),
    String(String),
    Identifier(String),
    /// A name registered as a builtin, aliases included.
    Function(String),

    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Caret,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Equal,
    Newline,

    // Special
    /// Lexing failed; carries the localized message.
    Error(String),
    Eof,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Number(_) => "NUMBER",
            TokenType::String(_) => "STRING",
            TokenType::Identifier(_) => "IDENTIFIER",
            TokenType::Function(_) => "FUNCTION",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MULTIPLY",
            TokenType::Slash => "DIVIDE",
            TokenType::Percent => "MODULO",
            TokenType::Bang => "FACTORIAL",
            TokenType::Caret => "POWER",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::Comma => "COMMA",
            TokenType::Semicolon => "SEMICOLON",
            TokenType::Equal => "ASSIGN",
            TokenType::Newline => "NEWLINE",
            TokenType::Error(_) => "ERROR",
            TokenType::Eof => "EOF",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<11} {:<16} {}..{}",
            self.token_type.name(),
            format!("{:?}", self.lexeme),
            self.span.start,
            self.span.end
        )?;
        if let TokenType::Error(message) = &self.token_type {
            write!(f, "  {}", message)?;
        }
        Ok(())
    }
}

/// Significant fractional digits kept when reading a decimal literal.
const MAX_FRACTION_DIGITS: usize = 17;

/// A saved lexer position. Restoring it replays the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor(usize);

/// Pull tokenizer over a borrowed source string.
pub struct Lexer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    language: Language,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, language: Language) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            language,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn cursor(&self) -> Cursor {
        Cursor(self.current)
    }

    pub fn seek(&mut self, cursor: Cursor) {
        self.current = cursor.0.min(self.source.len());
        self.start = self.current;
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.current;

        let token_type = match self.advance() {
            None => TokenType::Eof,
            Some(c) => match c {
                '\n' => TokenType::Newline,
                '+' => TokenType::Plus,
                '-' => TokenType::Minus,
                '*' => TokenType::Star,
                '/' => TokenType::Slash,
                '%' => TokenType::Percent,
                '!' => TokenType::Bang,
                '^' => TokenType::Caret,
                '(' => TokenType::LeftParen,
                ')' => TokenType::RightParen,
                ',' => TokenType::Comma,
                ';' => TokenType::Semicolon,
                '=' => TokenType::Equal,
                '"' => self.string(),
                c if c.is_ascii_digit() => self.number(c),
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),
                other => self.error(Message::UnknownCharacter(other)),
            },
        };

        let token = Token::new(
            token_type,
            self.source[self.start..self.current].to_string(),
            self.span(),
        );
        trace!("token {}", token);
        token
    }

    fn span(&self) -> Span {
        if self.start == self.current {
            Span::single(self.start)
        } else {
            Span::new(self.start, self.current)
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.current..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn error(&self, message: Message) -> TokenType {
        TokenType::Error(message.text(self.language))
    }

    /// Whitespace other than newlines, and comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(' ' | '\t' | '\r'), _) => {
                    self.advance();
                }
                (Some('#'), _) | (Some('/'), Some('/')) => {
                    // The newline stays: it separates statements.
                    self.advance_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.advance() {
                        if c == '*' && self.peek() == Some('/') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    fn number(&mut self, first: char) -> TokenType {
        if first == '0' {
            match self.peek() {
                Some('x' | 'X') => {
                    self.advance();
                    return self.radix_number(16);
                }
                Some('b' | 'B') => {
                    self.advance();
                    return self.radix_number(2);
                }
                _ => {}
            }
        }

        let mut value = f64::from(first.to_digit(10).unwrap_or(0));
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            self.advance();
            value = value * 10.0 + f64::from(digit);
        }

        if self.peek() == Some('.') {
            self.advance();
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.error(Message::InvalidNumber);
            }
            let mut fraction = 0.0;
            let mut scale = 1.0;
            let mut significant = 0;
            while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
                self.advance();
                // Digits past what an f64 can hold are read but ignored, so
                // `fraction` stays finite even when `scale` does not.
                if significant == MAX_FRACTION_DIGITS {
                    continue;
                }
                fraction = fraction * 10.0 + f64::from(digit);
                scale *= 10.0;
                if fraction > 0.0 {
                    significant += 1;
                }
            }
            value += fraction / scale;
        }

        TokenType::Number(value)
    }

    /// Digits after a `0x` or `0b` prefix.
    fn radix_number(&mut self, radix: u32) -> TokenType {
        let digits_start = self.current;
        let mut value = 0.0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(radix)) {
            self.advance();
            value = value * f64::from(radix) + f64::from(digit);
        }
        let digits_end = self.current;

        // Anything identifier-like glued to the literal belongs to it.
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = self.source[digits_start..self.current].to_string();

        let message = match (radix, digits_end == digits_start, digits_end == self.current) {
            (_, false, true) => return TokenType::Number(value),
            (16, true, _) => Message::HexNoDigits(text),
            (16, false, false) => Message::HexInvalidChars(text),
            (_, true, _) => Message::BinaryNoDigits(text),
            (_, false, false) => Message::BinaryInvalidChars(text),
        };
        self.error(message)
    }

    fn identifier(&mut self) -> TokenType {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = &self.source[self.start..self.current];

        if builtins::is_function(text) {
            TokenType::Function(text.to_string())
        } else {
            TokenType::Identifier(text.to_string())
        }
    }

    fn string(&mut self) -> TokenType {
        let mut content = String::new();
        let mut length = 0;

        loop {
            let c = match self.advance() {
                None => return self.error(Message::UnfinishedString(content)),
                Some('"') => break,
                Some(c) => c,
            };

            if c == '\\' {
                match self.advance() {
                    None => return self.error(Message::UnfinishedString(content)),
                    Some('n') => content.push('\n'),
                    Some('t') => content.push('\t'),
                    Some('r') => content.push('\r'),
                    Some('"') => content.push('"'),
                    Some('\\') => content.push('\\'),
                    Some(other) => {
                        content.push('\\');
                        content.push(other);
                        length += 1;
                    }
                }
            } else {
                content.push(c);
            }

            length += 1;
            if length > MAX_STRING_LEN {
                return self.error(Message::StringTooLong(MAX_STRING_LEN));
            }
        }

        TokenType::String(content)
    }
}

/// Lexes the whole input, stopping after the first error.
pub fn tokenize(source: &str, language: Language) -> Vec<Token> {
    let mut lexer = Lexer::new(source, language);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = matches!(token.token_type, TokenType::Eof | TokenType::Error(_));
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}
