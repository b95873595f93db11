use std::fmt::{Display, Formatter};
use std::sync::Arc;
use lazy_static::lazy_static;
use strum::IntoStaticStr;
use crate::interpreter::error::RuntimeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    ReturnValue,
    Error,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// Runtime value. Objects are always handled through an `Arc`; booleans and null only ever
/// exist as the [`struct@TRUE`], [`struct@FALSE`] and [`struct@NULL`] singletons, so two
/// non-integer operands can be compared by pointer identity.
///
/// The derived `PartialEq` compares by value and is not what `==` in the language uses.
#[derive(Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    ReturnValue(Arc<Object>),
    Error(RuntimeError),
}

lazy_static! {
    pub static ref TRUE: Arc<Object> = Arc::new(Object::Boolean(true));
    pub static ref FALSE: Arc<Object> = Arc::new(Object::Boolean(false));
    pub static ref NULL: Arc<Object> = Arc::new(Object::Null);
}

impl Object {
    pub fn integer(value: i64) -> Arc<Object> {
        Arc::new(Object::Integer(value))
    }

    pub fn boolean(value: bool) -> Arc<Object> {
        if value {
            Arc::clone(&*TRUE)
        } else {
            Arc::clone(&*FALSE)
        }
    }

    pub fn null() -> Arc<Object> {
        Arc::clone(&*NULL)
    }

    pub fn error(error: RuntimeError) -> Arc<Object> {
        Arc::new(Object::Error(error))
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// `null` and `false` are falsy, everything else (including `0`) is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    /// Identity comparison used by `==` and `!=` on non-integer operands.
    pub fn is_same(left: &Arc<Object>, right: &Arc<Object>) -> bool {
        Arc::ptr_eq(left, right)
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(error) => write!(f, "ERROR: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_shared() {
        assert!(Object::is_same(&Object::boolean(true), &TRUE));
        assert!(Object::is_same(&Object::boolean(false), &FALSE));
        assert!(Object::is_same(&Object::null(), &NULL));
        assert!(!Object::is_same(&Object::boolean(true), &Object::boolean(false)));
    }

    #[test]
    fn integers_are_never_identical() {
        assert!(!Object::is_same(&Object::integer(5), &Object::integer(5)));
        assert_eq!(*Object::integer(5), *Object::integer(5));
    }

    #[test]
    fn truthiness() {
        assert!(!Object::null().is_truthy());
        assert!(!Object::boolean(false).is_truthy());
        assert!(Object::boolean(true).is_truthy());
        assert!(Object::integer(0).is_truthy());
        assert!(Object::integer(-1).is_truthy());
    }

    #[test]
    fn type_names() {
        assert_eq!("INTEGER", Object::integer(1).object_type().to_string());
        assert_eq!("BOOLEAN", Object::boolean(true).object_type().to_string());
        assert_eq!("NULL", Object::null().object_type().to_string());
        assert_eq!("RETURN_VALUE", Object::ReturnValue(Object::null()).object_type().to_string());
        assert_eq!("ERROR", Object::error(RuntimeError::DivisionByZero).object_type().to_string());
    }

    #[test]
    fn inspect() {
        assert_eq!("-42", Object::integer(-42).inspect());
        assert_eq!("true", Object::boolean(true).inspect());
        assert_eq!("false", Object::boolean(false).inspect());
        assert_eq!("null", Object::null().inspect());
        assert_eq!("7", Object::ReturnValue(Object::integer(7)).inspect());
        assert_eq!("ERROR: identifier not found: x",
                   Object::error(RuntimeError::IdentifierNotFound(String::from("x"))).inspect());
    }
}
