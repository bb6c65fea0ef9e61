//! Renderings for tokens, syntax trees and runtime values.
//!
//! Syntax trees render back to source text that parses to the same tree.
//! Prefix and infix expressions are fully parenthesized, which is what makes
//! precedence visible in the output.
use std::fmt;
use std::result;

use super::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use super::{Function, Object, ObjectType, Token, TokenKind};

/// Writes `items` separated by `separator`.
fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }

    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write_joined(f, &self.statements, " ")
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::Var(s) => write!(f, "var {} = {};", s.name, s.value),
            Self::Return(s) => match &s.value {
                Some(value) => write!(f, "return {};", value),
                None => write!(f, "return;"),
            },
            Self::Expression(s) => write!(f, "{};", s.expression),
            Self::Block(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        write_joined(f, &self.statements, " ")?;
        write!(f, " }}")
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::Identifier(e) => write!(f, "{}", e),
            Self::Integer(e) => write!(f, "{}", e.value),
            Self::String(e) => write!(f, "\"{}\"", e.value),
            Self::Boolean(e) => write!(f, "{}", e.value),
            Self::Prefix(e) => write!(f, "({}{})", e.operator, e.right),
            Self::Infix(e) => write!(f, "({} {} {})", e.left, e.operator, e.right),
            Self::If(e) => {
                write!(f, "if ({}) {}", e.condition, e.consequence)?;
                if let Some(alternative) = &e.alternative {
                    write!(f, " else {}", alternative)?;
                }

                Ok(())
            }
            Self::Function(e) => {
                write!(f, "fn(")?;
                write_joined(f, &e.parameters, ", ")?;
                write!(f, ") {}", e.body)
            }
            Self::Call(e) => {
                write!(f, "{}(", e.function)?;
                write_joined(f, &e.arguments, ", ")?;
                write!(f, ")")
            }
            Self::Array(e) => {
                write!(f, "[")?;
                write_joined(f, &e.elements, ", ")?;
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "fn(")?;
        write_joined(f, &self.parameters, ", ")?;
        write!(f, ") {{\n")?;
        write_joined(f, &self.body.statements, " ")?;
        write!(f, "\n}}")
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Null => write!(f, "null"),
            Self::String(s) => write!(f, "{}", s),
            Self::Array(elements) => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            Self::Function(function) => write!(f, "{}", function),
            Self::ReturnValue(value) => write!(f, "{}", value),
            Self::Error(message) => write!(f, "error: {}", message),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let tag = match self {
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Null => "NULL",
            Self::String => "STRING",
            Self::Array => "ARRAY",
            Self::Function => "FUNCTION",
            Self::ReturnValue => "RETURN_VALUE",
            Self::Error => "ERROR",
        };

        write!(f, "{}", tag)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        match self.kind {
            TokenKind::Ident | TokenKind::Int | TokenKind::String | TokenKind::Illegal => {
                write!(f, "{}({:?})", self.kind, self.literal)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let token = match self {
            Self::Illegal => "ILLEGAL",
            Self::Eof => "EOF",
            Self::Ident => "IDENT",
            Self::Int => "INT",
            Self::String => "STRING",
            Self::Assign => "=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Bang => "!",
            Self::Asterisk => "*",
            Self::Slash => "/",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Function => "FUNCTION",
            Self::Var => "VAR",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Return => "RETURN",
        };

        write!(f, "{}", token)
    }
}
