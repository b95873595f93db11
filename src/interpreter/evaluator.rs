use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use log::{debug, trace};
use crate::interpreter::ast::{Block, Expr, InfixOperator, PrefixOperator, Program, Stmt};
use crate::interpreter::environment::Environment;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::object::Object;


/// Tree-walking evaluator.
///
/// Errors are ordinary [`Object::Error`] values: whichever construct first sees one stops
/// evaluating and hands it upwards unchanged. Blocks run in the environment of the construct
/// that contains them.
pub struct Evaluator {
    environment: Rc<RefCell<Environment>>,
}

impl Evaluator {
    pub fn new(environment: Rc<RefCell<Environment>>) -> Evaluator {
        Evaluator { environment }
    }

    pub fn evaluate_program(&self, program: &Program) -> Arc<Object> {
        let mut result = Object::null();

        for stmt in &program.statements {
            result = self.evaluate_stmt(stmt);

            match &*result {
                Object::ReturnValue(value) => return Arc::clone(value),
                Object::Error(error) => {
                    debug!("Evaluation stopped: {}", error);
                    return result;
                },
                _ => {},
            }
        }

        result
    }

    fn evaluate_block(&self, block: &Block) -> Arc<Object> {
        let mut result = Object::null();

        for stmt in &block.statements {
            result = self.evaluate_stmt(stmt);

            if matches!(*result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }

        result
    }

    fn evaluate_stmt(&self, stmt: &Stmt) -> Arc<Object> {
        match stmt {
            Stmt::Let { name, value } => {
                let value = self.evaluate_expr(value);

                if value.is_error() {
                    return value;
                }

                trace!("Binding {} = {}", name, value);
                self.environment.borrow_mut().put_variable(name, value);
                Object::null()
            },
            Stmt::Return { value } => {
                let value = match value {
                    Some(value) => self.evaluate_expr(value),
                    None => Object::null(),
                };

                if value.is_error() {
                    return value;
                }

                Arc::new(Object::ReturnValue(value))
            },
            Stmt::If { condition, consequence, alternative } => {
                let condition = self.evaluate_expr(condition);

                if condition.is_error() {
                    return condition;
                }

                if condition.is_truthy() {
                    self.evaluate_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.evaluate_block(alternative)
                } else {
                    Object::null()
                }
            },
            Stmt::Expression(expr) => self.evaluate_expr(expr),
        }
    }

    fn evaluate_expr(&self, expr: &Expr) -> Arc<Object> {
        match expr {
            Expr::Identifier(name) => self.environment.borrow().get(name)
                .unwrap_or_else(|| Object::error(RuntimeError::IdentifierNotFound(name.clone()))),
            Expr::Integer(value) => Object::integer(*value),
            Expr::Boolean(value) => Object::boolean(*value),
            Expr::Prefix { operator, right } => {
                let right = self.evaluate_expr(right);

                if right.is_error() {
                    return right;
                }

                Self::evaluate_prefix(*operator, right)
            },
            Expr::Infix { left, operator, right } => {
                // Right-hand side first
                let right = self.evaluate_expr(right);
                let left = self.evaluate_expr(left);

                if right.is_error() {
                    return right;
                } else if left.is_error() {
                    return left;
                }

                Self::evaluate_infix(*operator, left, right)
            },
        }
    }

    fn evaluate_prefix(operator: PrefixOperator, right: Arc<Object>) -> Arc<Object> {
        match operator {
            PrefixOperator::Not => Object::boolean(!right.is_truthy()),
            PrefixOperator::Negate => match *right {
                Object::Integer(value) => Object::integer(value.wrapping_neg()),
                _ => Object::error(RuntimeError::UnknownPrefixOperator { operator, right: right.object_type() }),
            },
        }
    }

    fn evaluate_infix(operator: InfixOperator, left: Arc<Object>, right: Arc<Object>) -> Arc<Object> {
        if let (Object::Integer(left), Object::Integer(right)) = (&*left, &*right) {
            return Self::evaluate_integer_infix(operator, *left, *right);
        }

        match operator {
            // Only booleans and null reach this point, and those are singletons
            InfixOperator::Equal => Object::boolean(Object::is_same(&left, &right)),
            InfixOperator::NotEqual => Object::boolean(!Object::is_same(&left, &right)),
            _ if left.object_type() != right.object_type() => Object::error(RuntimeError::TypeMismatch {
                left: left.object_type(), operator, right: right.object_type(),
            }),
            _ => Object::error(RuntimeError::UnknownInfixOperator {
                left: left.object_type(), operator, right: right.object_type(),
            }),
        }
    }

    fn evaluate_integer_infix(operator: InfixOperator, left: i64, right: i64) -> Arc<Object> {
        match operator {
            InfixOperator::Plus => Object::integer(left.wrapping_add(right)),
            InfixOperator::Minus => Object::integer(left.wrapping_sub(right)),
            InfixOperator::Multiply => Object::integer(left.wrapping_mul(right)),
            InfixOperator::Divide => {
                if right == 0 {
                    Object::error(RuntimeError::DivisionByZero)
                } else {
                    Object::integer(left.wrapping_div(right))
                }
            },
            InfixOperator::Less => Object::boolean(left < right),
            InfixOperator::Greater => Object::boolean(left > right),
            InfixOperator::Equal => Object::boolean(left == right),
            InfixOperator::NotEqual => Object::boolean(left != right),
        }
    }
}
