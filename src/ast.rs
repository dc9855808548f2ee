use std::fmt::{self, Write};

use crate::error::Span;

/// Syntax tree for one program.
///
/// Every node owns its children outright; there is no sharing and no
/// parent pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: f64,
        span: Span,
    },
    String {
        value: String,
        span: Span,
    },
    Variable {
        name: String,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Call {
        name: String,
        args: Vec<Expr>,
        span: Span,
    },
    Assign {
        name: String,
        value: Box<Expr>,
        span: Span,
    },
    /// Statements separated by `;` or newlines.
    Sequence {
        statements: Vec<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Number { span, .. } => *span,
            Expr::String { span, .. } => *span,
            Expr::Variable { span, .. } => *span,
            Expr::Binary { span, .. } => *span,
            Expr::Unary { span, .. } => *span,
            Expr::Call { span, .. } => *span,
            Expr::Assign { span, .. } => *span,
            Expr::Sequence { span, .. } => *span,
        }
    }

    /// Indented tree dump, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            Expr::Number { value, .. } => writeln!(out, "{}Number {}", indent, value),
            Expr::String { value, .. } => writeln!(out, "{}String {:?}", indent, value),
            Expr::Variable { name, .. } => writeln!(out, "{}Variable {}", indent, name),
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => {
                writeln!(out, "{}Binary {}", indent, operator)?;
                left.dump_into(out, depth + 1)?;
                right.dump_into(out, depth + 1)
            }
            Expr::Unary {
                operator, operand, ..
            } => {
                writeln!(out, "{}Unary {}", indent, operator)?;
                operand.dump_into(out, depth + 1)
            }
            Expr::Call { name, args, .. } => {
                writeln!(out, "{}Call {} ({} args)", indent, name, args.len())?;
                args.iter().try_for_each(|arg| arg.dump_into(out, depth + 1))
            }
            Expr::Assign { name, value, .. } => {
                writeln!(out, "{}Assign {}", indent, name)?;
                value.dump_into(out, depth + 1)
            }
            Expr::Sequence { statements, .. } => {
                writeln!(out, "{}Sequence ({} statements)", indent, statements.len())?;
                statements
                    .iter()
                    .try_for_each(|stmt| stmt.dump_into(out, depth + 1))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
            BinaryOp::Modulo => '%',
            BinaryOp::Power => '^',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    /// Postfix `!`.
    Factorial,
}

impl UnaryOp {
    pub fn symbol(self) -> char {
        match self {
            UnaryOp::Negate => '-',
            UnaryOp::Factorial => '!',
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
