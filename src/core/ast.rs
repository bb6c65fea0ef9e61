//! The abstract syntax tree produced by `Parser`.
//!
//! Every node keeps the token it was parsed from. The evaluator never looks at
//! these tokens; they exist for diagnostics and for `token_literal`. Source
//! renderings of each node live in `display.rs`.
use std::rc::Rc;

use super::Token;

/// The root of every tree the parser produces.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    #[must_use]
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map_or("", Statement::token_literal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Var(VarStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    #[must_use]
    pub fn token_literal(&self) -> &str {
        match self {
            Self::Var(s) => &s.token.literal,
            Self::Return(s) => &s.token.literal,
            Self::Expression(s) => &s.token.literal,
            Self::Block(s) => &s.token.literal,
        }
    }
}

/// `var <name> = <value>;`
#[derive(Debug, Clone, PartialEq)]
pub struct VarStatement {
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

/// `return <value>;` where the value may be omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub token: Token,
    pub value: Option<Expression>,
}

/// A lone expression used as a statement. The token is the first token of
/// the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub token: Token,
    pub expression: Expression,
}

/// `{ ... }`. The token is the opening brace.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
    Array(ArrayLiteral),
}

impl Expression {
    #[must_use]
    pub fn token_literal(&self) -> &str {
        let token = match self {
            Self::Identifier(e) => &e.token,
            Self::Integer(e) => &e.token,
            Self::String(e) => &e.token,
            Self::Boolean(e) => &e.token,
            Self::Prefix(e) => &e.token,
            Self::Infix(e) => &e.token,
            Self::If(e) => &e.token,
            Self::Function(e) => &e.token,
            Self::Call(e) => &e.token,
            Self::Array(e) => &e.token,
        };

        &token.literal
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// `<operator><right>`, e.g. `!ok` or `-x`. The token is the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

/// `<left> <operator> <right>`. The token is the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// `fn(<parameters>) <body>`
///
/// Parameters and body are shared rather than owned. A function value created
/// from this literal holds on to them after the `Program` is dropped, which is
/// what lets a closure defined on one line of a session be called on the next.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
}

/// `<function>(<arguments>)`. The token is the opening parenthesis.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// `[<elements>]`. The token is the opening bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

/// A borrowed view of any node the evaluator can be pointed at.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Block(&'a BlockStatement),
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(block: &'a BlockStatement) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}
