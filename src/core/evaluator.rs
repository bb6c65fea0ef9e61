use std::rc::Rc;

use tracing::trace;

use super::ast::{BlockStatement, Expression, Identifier, IfExpression, Node, Program, Statement};
use super::environment::ScopeId;
use super::{Environment, Function, Object, RuntimeError, NULL};

/// Returns early from the enclosing function if `$obj` is an `Object::Error`
/// or an `Object::ReturnValue`. Neither may be used as an operand.
macro_rules! propagate {
    ($obj:expr) => {{
        let obj = $obj;
        if is_unwinding(&obj) {
            return obj;
        }
        obj
    }};
}

/// An error or a `return` on its way out to the nearest call site.
fn is_unwinding(obj: &Object) -> bool {
    matches!(obj, Object::ReturnValue(_) | Object::Error(_))
}

/// Walks a syntax tree and computes its value.
///
/// There is no unwinding here. A `return` produces an `Object::ReturnValue`
/// and a runtime error produces an `Object::Error`; every statement sequence
/// stops as soon as it sees either one and hands it to its caller unchanged.
/// Call sites unwrap a `ReturnValue` but let an `Error` through, so an error
/// travels all the way out of the program.
///
/// Recursion in the evaluated program is recursion here, so a program that
/// recurses deeply enough will exhaust the host stack.
pub struct Evaluator<'env> {
    environment: &'env mut Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(environment: &'env mut Environment) -> Self {
        Evaluator { environment }
    }

    /// Evaluates any node in `scope`.
    pub fn eval<'a, N: Into<Node<'a>>>(&mut self, node: N, scope: ScopeId) -> Object {
        match node.into() {
            Node::Program(program) => self.eval_program(program, scope),
            Node::Statement(statement) => self.eval_statement(statement, scope),
            Node::Block(block) => self.eval_block_statement(block, scope),
            Node::Expression(expression) => self.eval_expression(expression, scope),
        }
    }

    /// Evaluates every statement in order and returns the value of the last
    /// one. A `return` or an error stops evaluation early; the returned value
    /// is unwrapped, the error is returned as is.
    pub fn eval_program(&mut self, program: &Program, scope: ScopeId) -> Object {
        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement, scope);

            match result {
                Object::ReturnValue(value) => return *value,
                Object::Error(_) => return result,
                _ => {}
            }
        }

        result
    }

    // Unlike `eval_program`, a `ReturnValue` stays wrapped so that it keeps
    // unwinding through nested blocks until it reaches the call site.
    fn eval_block_statement(&mut self, block: &BlockStatement, scope: ScopeId) -> Object {
        let mut result = NULL;

        for statement in &block.statements {
            result = self.eval_statement(statement, scope);

            if is_unwinding(&result) {
                return result;
            }
        }

        result
    }

    fn eval_statement(&mut self, statement: &Statement, scope: ScopeId) -> Object {
        match statement {
            Statement::Expression(s) => self.eval_expression(&s.expression, scope),
            Statement::Var(s) => {
                let value = propagate!(self.eval_expression(&s.value, scope));
                self.environment.set(scope, s.name.value.clone(), value);
                NULL
            }
            Statement::Return(s) => {
                let value = match &s.value {
                    Some(expression) => propagate!(self.eval_expression(expression, scope)),
                    None => NULL,
                };

                Object::ReturnValue(Box::new(value))
            }
            Statement::Block(block) => self.eval_block_statement(block, scope),
        }
    }

    fn eval_expression(&mut self, expression: &Expression, scope: ScopeId) -> Object {
        match expression {
            Expression::Integer(e) => Object::Integer(e.value),
            Expression::String(e) => Object::String(Rc::from(e.value.as_str())),
            Expression::Boolean(e) => Object::from_native_bool(e.value),
            Expression::Identifier(e) => self.eval_identifier(e, scope),
            Expression::Prefix(e) => {
                let right = propagate!(self.eval_expression(&e.right, scope));
                eval_prefix_expression(&e.operator, right)
            }
            Expression::Infix(e) => {
                let left = propagate!(self.eval_expression(&e.left, scope));
                let right = propagate!(self.eval_expression(&e.right, scope));
                eval_infix_expression(&e.operator, left, right)
            }
            Expression::If(e) => self.eval_if_expression(e, scope),
            Expression::Function(e) => Object::Function(Rc::new(Function {
                parameters: Rc::clone(&e.parameters),
                body: Rc::clone(&e.body),
                scope: self.environment.capture(scope),
            })),
            Expression::Call(e) => {
                let function = match propagate!(self.eval_expression(&e.function, scope)) {
                    Object::Function(function) => function,
                    other => return RuntimeError::NotAFunction(other.object_type()).into(),
                };

                match self.eval_expressions(&e.arguments, scope) {
                    Ok(arguments) => self.apply_function(&function, arguments),
                    Err(error) => error,
                }
            }
            Expression::Array(e) => match self.eval_expressions(&e.elements, scope) {
                Ok(elements) => Object::Array(Rc::from(elements)),
                Err(error) => error,
            },
        }
    }

    /// Evaluates `expressions` left to right, stopping at the first error or
    /// `return`.
    fn eval_expressions(
        &mut self,
        expressions: &[Expression],
        scope: ScopeId,
    ) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(expressions.len());

        for expression in expressions {
            let value = self.eval_expression(expression, scope);
            if is_unwinding(&value) {
                return Err(value);
            }

            values.push(value);
        }

        Ok(values)
    }

    fn eval_identifier(&self, identifier: &Identifier, scope: ScopeId) -> Object {
        self.environment
            .get(scope, &identifier.value)
            .unwrap_or_else(|| RuntimeError::IdentifierNotFound(identifier.value.clone()).into())
    }

    fn eval_if_expression(&mut self, e: &IfExpression, scope: ScopeId) -> Object {
        let condition = propagate!(self.eval_expression(&e.condition, scope));

        if condition.is_truthy() {
            self.eval_block_statement(&e.consequence, scope)
        } else if let Some(alternative) = &e.alternative {
            self.eval_block_statement(alternative, scope)
        } else {
            NULL
        }
    }

    /// Calls `function` with already evaluated `arguments`.
    ///
    /// The body runs in a fresh scope enclosed by the scope the function was
    /// defined in, with each parameter bound to its argument. That scope is
    /// released when the body finishes.
    fn apply_function(&mut self, function: &Function, arguments: Vec<Object>) -> Object {
        if function.parameters.len() != arguments.len() {
            return RuntimeError::ArgumentMismatch {
                expected: function.parameters.len(),
                actual: arguments.len(),
            }
            .into();
        }

        trace!(arity = arguments.len(), "applying function");

        let scope = self.environment.new_enclosed(function.scope);
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            self.environment
                .set(scope, parameter.value.clone(), argument);
        }

        let result = self.eval_block_statement(&function.body, scope);
        self.environment.release(scope);

        match result {
            Object::ReturnValue(value) => *value,
            other => other,
        }
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match (operator, right) {
        ("!", right) => Object::from_native_bool(!right.is_truthy()),
        ("-", Object::Integer(n)) => n.checked_neg().map_or_else(
            || RuntimeError::IntegerOverflow(format!("-({})", n)).into(),
            Object::Integer,
        ),
        (operator, right) => {
            RuntimeError::UnknownPrefixOperator(operator.to_owned(), right.object_type()).into()
        }
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::String(l), Object::String(r)) => eval_string_infix_expression(operator, l, r),
        _ if left.object_type() != right.object_type() => RuntimeError::TypeMismatch(
            left.object_type(),
            operator.to_owned(),
            right.object_type(),
        )
        .into(),
        // booleans and null are only ever the canonical instances
        (Object::Boolean(_), Object::Boolean(_)) | (Object::Null, Object::Null)
            if operator == "==" =>
        {
            Object::from_native_bool(left == right)
        }
        (Object::Boolean(_), Object::Boolean(_)) | (Object::Null, Object::Null)
            if operator == "!=" =>
        {
            Object::from_native_bool(left != right)
        }
        _ => RuntimeError::UnknownInfixOperator(
            left.object_type(),
            operator.to_owned(),
            right.object_type(),
        )
        .into(),
    }
}

fn eval_integer_infix_expression(operator: &str, l: i64, r: i64) -> Object {
    let value = match operator {
        "+" => l.checked_add(r),
        "-" => l.checked_sub(r),
        "*" => l.checked_mul(r),
        "/" if r == 0 => return RuntimeError::DivisionByZero(l).into(),
        "/" => l.checked_div(r),
        "<" => return Object::from_native_bool(l < r),
        ">" => return Object::from_native_bool(l > r),
        "==" => return Object::from_native_bool(l == r),
        "!=" => return Object::from_native_bool(l != r),
        _ => {
            return RuntimeError::UnknownInfixOperator(
                Object::Integer(l).object_type(),
                operator.to_owned(),
                Object::Integer(r).object_type(),
            )
            .into()
        }
    };

    value.map_or_else(
        || RuntimeError::IntegerOverflow(format!("{} {} {}", l, operator, r)).into(),
        Object::Integer,
    )
}

fn eval_string_infix_expression(operator: &str, l: &str, r: &str) -> Object {
    match operator {
        "+" => {
            let mut buffer = String::with_capacity(l.len() + r.len());
            buffer.push_str(l);
            buffer.push_str(r);
            Object::String(Rc::from(buffer))
        }
        "==" => Object::from_native_bool(l == r),
        "!=" => Object::from_native_bool(l != r),
        _ => RuntimeError::UnknownInfixOperator(
            Object::from(l).object_type(),
            operator.to_owned(),
            Object::from(r).object_type(),
        )
        .into(),
    }
}
