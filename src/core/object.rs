use std::rc::Rc;

use super::ast::{BlockStatement, Identifier};
use super::environment::ScopeId;
use super::RuntimeError;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Every value a program can produce.
///
/// `Boolean` and `Null` carry no identity of their own. The evaluator only
/// ever produces them through `TRUE`, `FALSE` and `NULL`, so comparing two of
/// them is the same as comparing the canonical instances.
///
/// `ReturnValue` and `Error` are control flow. A `ReturnValue` is unwrapped at
/// the nearest call site (or at the top of the program) and is never handed to
/// a caller of the evaluator. An `Error` flows all the way out and is shown to
/// the user like any other value.
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(Rc<str>),
    Array(Rc<[Object]>),
    Function(Rc<Function>),
    ReturnValue(Box<Object>),
    Error(String),
}

/// A closure: a function literal paired with the scope it was evaluated in.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub parameters: Rc<[Identifier]>,
    pub body: Rc<BlockStatement>,
    pub scope: ScopeId,
}

/// The type tag used in runtime error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Function,
    ReturnValue,
    Error,
}

impl Object {
    #[must_use]
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Integer(_) => ObjectType::Integer,
            Self::Boolean(_) => ObjectType::Boolean,
            Self::Null => ObjectType::Null,
            Self::String(_) => ObjectType::String,
            Self::Array(_) => ObjectType::Array,
            Self::Function(_) => ObjectType::Function,
            Self::ReturnValue(_) => ObjectType::ReturnValue,
            Self::Error(_) => ObjectType::Error,
        }
    }

    /// Returns the canonical boolean for `b`.
    #[must_use]
    pub fn from_native_bool(b: bool) -> Object {
        if b {
            TRUE
        } else {
            FALSE
        }
    }

    /// Only `false` and `null` are falsy. Every other value, `0` included, is
    /// truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Boolean(false))
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<RuntimeError> for Object {
    fn from(e: RuntimeError) -> Self {
        Object::Error(e.to_string())
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Integer(n)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::String(Rc::from(s))
    }
}
