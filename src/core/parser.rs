use std::mem;
use std::rc::Rc;

use tracing::trace;

use super::ast::{
    ArrayLiteral, BlockStatement, BooleanLiteral, CallExpression, Expression,
    ExpressionStatement, FunctionLiteral, Identifier, IfExpression, InfixExpression,
    IntegerLiteral, PrefixExpression, Program, ReturnStatement, Statement, StringLiteral,
    VarStatement,
};
use super::{Lexer, ParseError, Result, Token, TokenKind};

/// Binding power of an operator, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// unary `-` `!`
    Prefix,
    /// `f(...)`
    Call,
}

type PrefixParseFn = fn(&mut Parser) -> Result<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Result<Expression>;

/// The prefix table: which handler parses an expression starting with `kind`.
fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn> {
    let f: PrefixParseFn = match kind {
        TokenKind::Ident => Parser::parse_identifier,
        TokenKind::Int => Parser::parse_integer_literal,
        TokenKind::String => Parser::parse_string_literal,
        TokenKind::True | TokenKind::False => Parser::parse_boolean,
        TokenKind::Bang | TokenKind::Minus => Parser::parse_prefix_expression,
        TokenKind::LeftParen => Parser::parse_grouped_expression,
        TokenKind::If => Parser::parse_if_expression,
        TokenKind::Function => Parser::parse_function_literal,
        TokenKind::LeftBracket => Parser::parse_array_literal,
        _ => return None,
    };

    Some(f)
}

/// The infix table: which handler continues an expression when `kind`
/// follows it, and how tightly `kind` binds.
fn infix_parse_fn(kind: TokenKind) -> Option<(InfixParseFn, Precedence)> {
    let entry: (InfixParseFn, Precedence) = match kind {
        TokenKind::Eq | TokenKind::NotEq => (Parser::parse_infix_expression, Precedence::Equals),
        TokenKind::Lt | TokenKind::Gt => (Parser::parse_infix_expression, Precedence::LessGreater),
        TokenKind::Plus | TokenKind::Minus => (Parser::parse_infix_expression, Precedence::Sum),
        TokenKind::Asterisk | TokenKind::Slash => {
            (Parser::parse_infix_expression, Precedence::Product)
        }
        TokenKind::LeftParen => (Parser::parse_call_expression, Precedence::Call),
        _ => return None,
    };

    Some(entry)
}

fn precedence(kind: TokenKind) -> Precedence {
    infix_parse_fn(kind).map_or(Precedence::Lowest, |(_, p)| p)
}

/// Parses a stream of tokens into a `Program`.
///
/// Statements are parsed by recursive descent. Expressions are parsed by
/// precedence climbing (a Pratt parser): every token kind that can start an
/// expression has an entry in the prefix table, every token kind that can
/// continue one has an entry in the infix table along with its precedence.
///
/// ## Grammar
/// ```notrust
/// program        → statement* EOF ;
/// statement      → varStmt | returnStmt | block | exprStmt ;
/// varStmt        → "var" IDENTIFIER "=" expression ";"? ;
/// returnStmt     → "return" expression? ";"? ;
/// block          → "{" statement* "}" ;
/// exprStmt       → expression ";"? ;
///
/// prefix         → IDENTIFIER | INT | STRING | "true" | "false"
///                | ( "!" | "-" ) expression
///                | "(" expression ")"
///                | "if" "(" expression ")" block ( "else" block )?
///                | "fn" "(" parameters? ")" block
///                | "[" arguments? "]" ;
/// infix          → expression ( "==" | "!=" | "<" | ">" | "+" | "-" | "*" | "/" ) expression
///                | expression "(" arguments? ")" ;
/// parameters     → IDENTIFIER ( "," IDENTIFIER )* ;
/// arguments      → expression ( "," expression )* ;
/// ```
///
/// The parser pulls tokens from its `Lexer` one at a time and looks at most
/// one token ahead.
pub struct Parser {
    lexer: Lexer,
    cur_token: Token,
    peek_token: Token,
    errors: Vec<ParseError>,
    // Braces opened and not yet closed, up to and including `cur_token`
    depth: usize,
}

impl Parser {
    #[must_use]
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Parser {
            lexer,
            cur_token,
            peek_token,
            errors: Vec::new(),
            depth: 0,
        };

        parser.track_depth();
        parser
    }

    /// Parses statements until the end of input.
    ///
    /// A statement that fails to parse is left out of the returned `Program`.
    /// Its error is recorded (see `errors`) and parsing resumes at the next
    /// statement.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.cur_token_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => program.statements.push(statement),
                Err(e) => {
                    trace!(error = %e, "recorded parse error");
                    self.errors.push(e);
                    self.synchronize();
                }
            }

            self.next_token();
        }

        program
    }

    /// Errors recorded by `parse_program`, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    fn next_token(&mut self) {
        self.cur_token = mem::replace(&mut self.peek_token, self.lexer.next_token());
        self.track_depth();
    }

    fn track_depth(&mut self) {
        match self.cur_token.kind {
            TokenKind::LeftBrace => self.depth += 1,
            TokenKind::RightBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token.kind {
            TokenKind::Var => self.parse_var_statement().map(Statement::Var),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            TokenKind::LeftBrace => {
                let block = self.parse_block_statement()?;
                self.skip_semicolon();
                Ok(Statement::Block(block))
            }
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    fn parse_var_statement(&mut self) -> Result<VarStatement> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = self.identifier();

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(VarStatement { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStatement> {
        let token = self.cur_token.clone();

        let value = match self.peek_token.kind {
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof => None,
            _ => {
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };

        self.skip_semicolon();
        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement> {
        let token = self.cur_token.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ExpressionStatement { token, expression })
    }

    /// Parses `{ ... }` with the current token on the opening brace. Leaves
    /// the current token on the closing brace.
    fn parse_block_statement(&mut self) -> Result<BlockStatement> {
        let token = self.cur_token.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_token_is(TokenKind::RightBrace) {
            if self.cur_token_is(TokenKind::Eof) {
                return Err(ParseError::UnexpectedToken {
                    expected: TokenKind::RightBrace,
                    actual: TokenKind::Eof,
                });
            }

            statements.push(self.parse_statement()?);
            self.next_token();
        }

        Ok(BlockStatement { token, statements })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let prefix =
            prefix_parse_fn(self.cur_token.kind).ok_or_else(|| self.no_prefix_parse_fn_error())?;
        let mut left = prefix(self)?;

        while !self.peek_token_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match infix_parse_fn(self.peek_token.kind) {
                Some((infix, _)) => infix,
                None => return Ok(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn no_prefix_parse_fn_error(&self) -> ParseError {
        match self.cur_token.kind {
            TokenKind::Illegal => ParseError::IllegalToken(self.cur_token.literal.to_string()),
            kind => ParseError::NoPrefixParseFn(kind),
        }
    }

    fn parse_identifier(&mut self) -> Result<Expression> {
        Ok(Expression::Identifier(self.identifier()))
    }

    fn parse_integer_literal(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();
        let value = token
            .literal
            .parse::<i64>()
            .map_err(|_| ParseError::InvalidInteger(token.literal.to_string()))?;

        Ok(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_string_literal(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();
        let value = token.literal.to_string();

        Ok(Expression::String(StringLiteral { token, value }))
    }

    fn parse_boolean(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();
        let value = token.kind == TokenKind::True;

        Ok(Expression::Boolean(BooleanLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.to_string();

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let token = self.cur_token.clone();
        let operator = token.literal.to_string();
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        Ok(expression)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LeftParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RightParen)?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LeftBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();

        self.expect_peek(TokenKind::LeftParen)?;
        let parameters = self.parse_function_parameters()?;

        self.expect_peek(TokenKind::LeftBrace)?;
        let body = self.parse_block_statement()?;

        Ok(Expression::Function(FunctionLiteral {
            token,
            parameters: Rc::from(parameters),
            body: Rc::new(body),
        }))
    }

    fn parse_function_parameters(&mut self) -> Result<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenKind::RightParen) {
            self.next_token();
            return Ok(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.identifier());

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.identifier());
        }

        self.expect_peek(TokenKind::RightParen)?;
        Ok(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let token = self.cur_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RightParen)?;

        Ok(Expression::Call(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let token = self.cur_token.clone();
        let elements = self.parse_expression_list(TokenKind::RightBracket)?;

        Ok(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// Parses comma separated expressions up to and including `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Result<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Ok(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(list)
    }

    fn identifier(&self) -> Identifier {
        Identifier {
            token: self.cur_token.clone(),
            value: self.cur_token.literal.to_string(),
        }
    }

    /// Skips tokens up to the end of the top-level statement that failed to
    /// parse.
    ///
    /// An error inside a block first skips to the brace that closes it. Then
    /// stops with the current token on a `;`, or just before a token that
    /// starts a new statement, or just before the end of input.
    fn synchronize(&mut self) {
        loop {
            if self.depth == 0 && self.cur_token_is(TokenKind::Semicolon) {
                return;
            }

            match self.peek_token.kind {
                TokenKind::Eof => return,
                TokenKind::Var | TokenKind::Return if self.depth == 0 => return,
                _ => self.next_token(),
            }
        }
    }

    fn skip_semicolon(&mut self) {
        if self.peek_token_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    /// Advances only if the next token is `expected`.
    fn expect_peek(&mut self, expected: TokenKind) -> Result<()> {
        if !self.peek_token_is(expected) {
            return Err(ParseError::UnexpectedToken {
                expected,
                actual: self.peek_token.kind,
            });
        }

        self.next_token();
        Ok(())
    }

    fn cur_token_is(&self, kind: TokenKind) -> bool {
        self.cur_token.kind == kind
    }

    fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    fn cur_precedence(&self) -> Precedence {
        precedence(self.cur_token.kind)
    }

    fn peek_precedence(&self) -> Precedence {
        precedence(self.peek_token.kind)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str) -> Program {
        let mut parser = Parser::new(Lexer::new(source.to_owned()));
        let program = parser.parse_program();
        assert!(
            parser.errors().is_empty(),
            "unexpected parse errors: {:?}",
            parser.errors()
        );

        program
    }

    fn parse_errors(source: &str) -> Vec<String> {
        let mut parser = Parser::new(Lexer::new(source.to_owned()));
        parser.parse_program();
        parser.errors().iter().map(ToString::to_string).collect()
    }

    /// Parses a single expression statement and returns its expression.
    fn parse_expression(source: &str) -> Expression {
        let mut program = parse(source);
        assert_eq!(1, program.statements.len());

        match program.statements.remove(0) {
            Statement::Expression(s) => s.expression,
            other => panic!("expected an expression statement, got {:?}", other),
        }
    }

    #[test]
    fn it_can_parse_var_statements() {
        let program = parse("var x = 5; var y = true; var foobar = y;");
        let expected = [("x", "5"), ("y", "true"), ("foobar", "y")];

        assert_eq!(3, program.statements.len());
        for (statement, (name, value)) in program.statements.iter().zip(expected.iter()) {
            match statement {
                Statement::Var(s) => {
                    assert_eq!("var", &*s.token.literal);
                    assert_eq!(*name, s.name.value);
                    assert_eq!(*value, s.value.to_string());
                }
                other => panic!("expected a var statement, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_can_parse_return_statements() {
        let program = parse("return 5; return x + y; return;");

        let values: Vec<Option<String>> = program
            .statements
            .iter()
            .map(|s| match s {
                Statement::Return(r) => r.value.as_ref().map(ToString::to_string),
                other => panic!("expected a return statement, got {:?}", other),
            })
            .collect();

        assert_eq!(
            vec![Some("5".to_owned()), Some("(x + y)".to_owned()), None],
            values
        );
    }

    #[test]
    fn it_can_parse_an_identifier() {
        match parse_expression("foobar;") {
            Expression::Identifier(i) => {
                assert_eq!("foobar", i.value);
                assert_eq!("foobar", &*i.token.literal);
            }
            other => panic!("expected an identifier, got {:?}", other),
        }
    }

    #[test]
    fn it_can_parse_literals() {
        assert_eq!(
            Expression::Integer(IntegerLiteral {
                token: Token::new(TokenKind::Int, "5"),
                value: 5,
            }),
            parse_expression("5;")
        );
        assert_eq!(
            Expression::String(StringLiteral {
                token: Token::new(TokenKind::String, "hello world"),
                value: "hello world".to_owned(),
            }),
            parse_expression("\"hello world\"")
        );
        assert_eq!(
            Expression::Boolean(BooleanLiteral {
                token: Token::new(TokenKind::False, "false"),
                value: false,
            }),
            parse_expression("false")
        );
    }

    #[test]
    fn it_can_parse_a_prefix_expression() {
        assert_eq!(
            Expression::Prefix(PrefixExpression {
                token: Token::new(TokenKind::Minus, "-"),
                operator: "-".to_owned(),
                right: Box::new(Expression::Integer(IntegerLiteral {
                    token: Token::new(TokenKind::Int, "15"),
                    value: 15,
                })),
            }),
            parse_expression("-15")
        );
    }

    #[test]
    fn it_can_parse_infix_expressions() {
        let cases = [
            ("5 + 5;", "+"),
            ("5 - 5;", "-"),
            ("5 * 5;", "*"),
            ("5 / 5;", "/"),
            ("5 > 5;", ">"),
            ("5 < 5;", "<"),
            ("5 == 5;", "=="),
            ("5 != 5;", "!="),
        ];

        for (source, operator) in cases.iter() {
            match parse_expression(source) {
                Expression::Infix(e) => {
                    assert_eq!(*operator, e.operator);
                    assert_eq!("5", e.left.to_string());
                    assert_eq!("5", e.right.to_string());
                }
                other => panic!("expected an infix expression, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_respects_operator_precedence() {
        let cases = [
            ("1 + 2 * 3", "(1 + (2 * 3))"),
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
        ];

        for (source, expected) in cases.iter() {
            assert_eq!(*expected, parse_expression(source).to_string());
        }
    }

    #[test]
    fn it_renders_whole_programs() {
        assert_eq!(
            "(3 + 4); ((-5) * 5);",
            parse("3 + 4; -5 * 5").to_string()
        );
        assert_eq!(
            "var f = fn(x, y) { return (x * y); }; f(1, [2, \"three\"]);",
            parse("var f = fn(x, y) { return x * y }\nf(1, [2, \"three\"])").to_string()
        );
    }

    #[test]
    fn it_can_parse_an_if_expression() {
        match parse_expression("if (x < y) { x }") {
            Expression::If(e) => {
                assert_eq!("(x < y)", e.condition.to_string());
                assert_eq!(1, e.consequence.statements.len());
                assert_eq!("x;", e.consequence.statements[0].to_string());
                assert!(e.alternative.is_none());
            }
            other => panic!("expected an if expression, got {:?}", other),
        }
    }

    #[test]
    fn it_can_parse_an_if_else_expression() {
        match parse_expression("if (x < y) { x } else { y; z }") {
            Expression::If(e) => {
                let alternative = e.alternative.expect("an else block");
                assert_eq!("{ y; z; }", alternative.to_string());
            }
            other => panic!("expected an if expression, got {:?}", other),
        }
    }

    #[test]
    fn it_can_parse_a_function_literal() {
        match parse_expression("fn(x, y) { x + y; }") {
            Expression::Function(f) => {
                let names: Vec<&str> = f.parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(vec!["x", "y"], names);
                assert_eq!("{ (x + y); }", f.body.to_string());
            }
            other => panic!("expected a function literal, got {:?}", other),
        }
    }

    #[test]
    fn it_can_parse_function_parameters() {
        let cases: [(&str, &[&str]); 3] = [
            ("fn() {};", &[]),
            ("fn(x) {};", &["x"]),
            ("fn(x, y, z) {};", &["x", "y", "z"]),
        ];

        for (source, expected) in cases.iter() {
            match parse_expression(source) {
                Expression::Function(f) => {
                    let names: Vec<&str> =
                        f.parameters.iter().map(|p| p.value.as_str()).collect();
                    assert_eq!(expected.to_vec(), names);
                }
                other => panic!("expected a function literal, got {:?}", other),
            }
        }
    }

    #[test]
    fn it_can_parse_a_call_expression() {
        match parse_expression("add(1, 2 * 3, 4 + 5);") {
            Expression::Call(c) => {
                assert_eq!("add", c.function.to_string());
                let arguments: Vec<String> = c.arguments.iter().map(ToString::to_string).collect();
                assert_eq!(vec!["1", "(2 * 3)", "(4 + 5)"], arguments);
            }
            other => panic!("expected a call expression, got {:?}", other),
        }
    }

    #[test]
    fn it_can_call_a_function_literal_directly() {
        assert_eq!(
            "fn(x) { x; }(5)",
            parse_expression("fn(x) { x }(5)").to_string()
        );
    }

    #[test]
    fn it_can_parse_an_array_literal() {
        assert_eq!("[1, (2 * 2), (3 + 3)]", parse_expression("[1, 2 * 2, 3 + 3]").to_string());
        assert_eq!("[]", parse_expression("[]").to_string());
    }

    #[test]
    fn it_can_parse_a_block_statement() {
        let program = parse("{ var a = 1; a };");
        assert_eq!(1, program.statements.len());
        assert_eq!("{ var a = 1; a; }", program.to_string());
    }

    #[test]
    fn it_keeps_origin_tokens() {
        let program = parse("var x = 1; return x; if (x) { x }");

        assert_eq!("var", program.token_literal());
        let literals: Vec<&str> = program.statements.iter().map(|s| s.token_literal()).collect();
        assert_eq!(vec!["var", "return", "if"], literals);
    }

    #[test]
    fn it_reports_missing_tokens() {
        assert_eq!(
            vec!["expected next token to be ), got EOF instead".to_owned()],
            parse_errors("(1 + 2")
        );
        assert_eq!(
            vec!["expected next token to be {, got IDENT instead".to_owned()],
            parse_errors("if (x) y")
        );
    }

    #[test]
    fn it_reports_tokens_without_a_prefix_parse_function() {
        assert_eq!(
            vec!["no prefix parse function for ) found".to_owned()],
            parse_errors(")")
        );
    }

    #[test]
    fn it_reports_illegal_tokens_in_context() {
        assert_eq!(vec!["illegal token \"@\"".to_owned()], parse_errors("1 + @;"));
    }

    #[test]
    fn it_reports_integers_that_overflow() {
        assert_eq!(
            vec!["could not parse \"9223372036854775808\" as integer".to_owned()],
            parse_errors("9223372036854775808")
        );
    }

    #[test]
    fn it_reports_an_unterminated_block() {
        assert_eq!(
            vec!["expected next token to be }, got EOF instead".to_owned()],
            parse_errors("fn(x) { x")
        );
    }

    #[test]
    fn it_recovers_and_reports_multiple_errors() {
        assert_eq!(
            vec![
                "expected next token to be =, got INT instead".to_owned(),
                "expected next token to be IDENT, got = instead".to_owned(),
                "expected next token to be IDENT, got INT instead".to_owned(),
            ],
            parse_errors("var x 5;\nvar = 10;\nvar 838383;")
        );
    }

    #[test]
    fn it_recovers_from_errors_inside_blocks() {
        assert_eq!(
            vec!["expected next token to be =, got INT instead".to_owned()],
            parse_errors("fn() { var x 5; y }")
        );
        assert_eq!(
            vec!["expected next token to be =, got INT instead".to_owned()],
            parse_errors("if (a) { if (b) { var x 5; return 1; } y; }")
        );
        assert_eq!(
            vec!["no prefix parse function for } found".to_owned()],
            parse_errors("fn() { 1 + }")
        );
    }

    #[test]
    fn it_resumes_after_the_block_that_failed() {
        let mut parser = Parser::new(Lexer::new(
            "var f = fn() { var x 5; x }; var y = 2; { 1 + }; y".to_owned(),
        ));
        let program = parser.parse_program();

        assert_eq!(2, parser.errors().len());
        assert_eq!("var y = 2; y;", program.to_string());
    }

    #[test]
    fn it_keeps_parsing_after_an_error() {
        let mut parser = Parser::new(Lexer::new("var x 5; var y = 2; y".to_owned()));
        let program = parser.parse_program();

        assert_eq!(1, parser.errors().len());
        assert_eq!("var y = 2; y;", program.to_string());
    }
}
