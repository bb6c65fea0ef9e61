use std::rc::Rc;
use std::result;

use thiserror::Error;
use tracing::debug;

pub mod ast;
mod display;
mod environment;
mod evaluator;
mod lexer;
mod object;
mod parser;

pub type Environment = environment::Environment;
pub type Evaluator<'env> = evaluator::Evaluator<'env>;
pub type Lexer = lexer::Lexer;
pub type Parser = parser::Parser;
pub type Result<T> = result::Result<T, ParseError>;

pub use environment::ScopeId;
pub use object::{Function, Object, ObjectType, FALSE, NULL, TRUE};

/// Errors reported while turning tokens into a `Program`.
///
/// The parser never stops at the first one of these. Each is recorded and
/// the parser skips ahead to the next statement, so a single pass can report
/// several independent mistakes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A specific token was required after the current one.
    #[error("expected next token to be {expected}, got {actual} instead")]
    UnexpectedToken {
        expected: TokenKind,
        actual: TokenKind,
    },
    /// The current token cannot start an expression.
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),
    /// The lexer did not recognize this text.
    #[error("illegal token {0:?}")]
    IllegalToken(String),
    /// An integer literal that does not fit in an `i64`.
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}

/// Errors raised while evaluating a `Program`.
///
/// These never escape the evaluator as a `Result`. They are converted into
/// `Object::Error` and travel through the same channel as ordinary values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    /// Operands of an infix expression have different types. The tuple
    /// elements are in source order i.e. left, operator, right.
    #[error("type mismatch: {0} {1} {2}")]
    TypeMismatch(ObjectType, String, ObjectType),
    #[error("unknown operator: {0}{1}")]
    UnknownPrefixOperator(String, ObjectType),
    #[error("unknown operator: {0} {1} {2}")]
    UnknownInfixOperator(ObjectType, String, ObjectType),
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("wrong number of arguments: want={expected}, got={actual}")]
    ArgumentMismatch { expected: usize, actual: usize },
    #[error("division by zero: {0} / 0")]
    DivisionByZero(i64),
    #[error("integer overflow: {0}")]
    IntegerOverflow(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Identifiers and literals
    Ident,
    Int,
    String,

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,

    // Delimiters
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Keywords
    Function,
    Var,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Classifies a run of letters as either a keyword or an identifier.
    #[must_use]
    pub fn lookup_ident(ident: &str) -> TokenKind {
        match ident {
            "fn" => TokenKind::Function,
            "var" => TokenKind::Var,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            _ => TokenKind::Ident,
        }
    }
}

#[derive(Eq, Hash, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: Rc<str>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, literal: &str) -> Self {
        Token {
            kind,
            literal: Rc::from(literal),
        }
    }
}

/// Scans all of `source`, returning every token including the final `Eof`.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source.to_owned());
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}

/// Parses and evaluates `source` against the global scope of `env`.
///
/// If parsing produced any errors, evaluation is skipped and the rendered
/// messages are returned alongside `NULL`. Otherwise the value of the program
/// is returned with an empty error list. Runtime errors come back as an
/// `Object::Error` value, not as parse errors.
pub fn run(source: &str, env: &mut Environment) -> (Object, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source.to_owned()));
    let program = parser.parse_program();

    debug!(
        statements = program.statements.len(),
        errors = parser.errors().len(),
        "parsed program"
    );

    if !parser.errors().is_empty() {
        let errors = parser.errors().iter().map(ToString::to_string).collect();
        return (NULL, errors);
    }

    let global = env.global();
    let value = Evaluator::new(env).eval_program(&program, global);
    (value, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_classifies_keywords_and_identifiers() {
        assert_eq!(TokenKind::Function, TokenKind::lookup_ident("fn"));
        assert_eq!(TokenKind::Var, TokenKind::lookup_ident("var"));
        assert_eq!(TokenKind::Return, TokenKind::lookup_ident("return"));
        assert_eq!(TokenKind::Ident, TokenKind::lookup_ident("fun"));
        assert_eq!(TokenKind::Ident, TokenKind::lookup_ident("returns"));
    }

    #[test]
    fn it_tokenizes_a_var_statement() {
        let expected = vec![
            Token::new(TokenKind::Var, "var"),
            Token::new(TokenKind::Ident, "five"),
            Token::new(TokenKind::Assign, "="),
            Token::new(TokenKind::Int, "5"),
            Token::new(TokenKind::Semicolon, ";"),
            Token::new(TokenKind::Eof, ""),
        ];

        assert_eq!(expected, tokenize("var five = 5;"));
    }

    #[test]
    fn it_tokenizes_empty_input_as_eof() {
        assert_eq!(vec![Token::new(TokenKind::Eof, "")], tokenize(""));
    }

    #[test]
    fn it_skips_evaluation_when_parsing_fails() {
        let mut env = Environment::new();
        let (value, errors) = run("var x 5; var = 10;", &mut env);

        assert_eq!(NULL, value);
        assert_eq!(
            vec![
                "expected next token to be =, got INT instead".to_owned(),
                "expected next token to be IDENT, got = instead".to_owned(),
            ],
            errors
        );
        assert_eq!(None, env.get(env.global(), "x"));
    }

    #[test]
    fn it_keeps_bindings_across_runs() {
        let mut env = Environment::new();

        let (_, errors) = run("var a = 40;", &mut env);
        assert!(errors.is_empty());

        let (value, errors) = run("a + 2", &mut env);
        assert!(errors.is_empty());
        assert_eq!(Object::Integer(42), value);
    }

    #[test]
    fn it_renders_runtime_errors() {
        assert_eq!(
            "type mismatch: INTEGER + BOOLEAN",
            RuntimeError::TypeMismatch(ObjectType::Integer, "+".to_owned(), ObjectType::Boolean)
                .to_string()
        );
        assert_eq!(
            "unknown operator: -BOOLEAN",
            RuntimeError::UnknownPrefixOperator("-".to_owned(), ObjectType::Boolean).to_string()
        );
        assert_eq!(
            "wrong number of arguments: want=2, got=1",
            RuntimeError::ArgumentMismatch {
                expected: 2,
                actual: 1
            }
            .to_string()
        );
    }
}
