use std::fmt::{Display, Formatter};
use strum::IntoStaticStr;
use crate::interpreter::lexer::TokenType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum PrefixOperator {
    #[strum(serialize = "!")] Not,
    #[strum(serialize = "-")] Negate,
}

impl PrefixOperator {
    pub fn from_token_type(token_type: TokenType) -> Option<PrefixOperator> {
        match token_type {
            TokenType::Not => Some(PrefixOperator::Not),
            TokenType::Minus => Some(PrefixOperator::Negate),
            _ => None,
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol: &'static str = self.into();
        f.write_str(symbol)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum InfixOperator {
    #[strum(serialize = "+")] Plus,
    #[strum(serialize = "-")] Minus,
    #[strum(serialize = "*")] Multiply,
    #[strum(serialize = "/")] Divide,
    #[strum(serialize = "<")] Less,
    #[strum(serialize = ">")] Greater,
    #[strum(serialize = "==")] Equal,
    #[strum(serialize = "!=")] NotEqual,
}

impl InfixOperator {
    pub fn from_token_type(token_type: TokenType) -> Option<InfixOperator> {
        match token_type {
            TokenType::Plus => Some(InfixOperator::Plus),
            TokenType::Minus => Some(InfixOperator::Minus),
            TokenType::Multiply => Some(InfixOperator::Multiply),
            TokenType::Divide => Some(InfixOperator::Divide),
            TokenType::Less => Some(InfixOperator::Less),
            TokenType::Greater => Some(InfixOperator::Greater),
            TokenType::Equal => Some(InfixOperator::Equal),
            TokenType::NotEqual => Some(InfixOperator::NotEqual),
            _ => None,
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let symbol: &'static str = self.into();
        f.write_str(symbol)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.statements.iter()
            .map(|stmt| stmt.to_string())
            .collect::<Vec<String>>().join(" "))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ {} }}", self.statements.iter()
            .map(|stmt| stmt.to_string())
            .collect::<Vec<String>>().join(" "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Let {
        name: String,
        value: Expr,
    },
    Return {
        value: Option<Expr>,
    },
    If {
        condition: Expr,
        consequence: Block,
        alternative: Option<Block>,
    },
    Expression(Expr),
}

fn keyword(token_type: TokenType) -> &'static str {
    token_type.keyword().unwrap_or_default()
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "{} {} = {};", keyword(TokenType::Let), name, value),
            Stmt::Return { value: Some(value) } => write!(f, "{} {};", keyword(TokenType::Return), value),
            Stmt::Return { value: None } => write!(f, "{};", keyword(TokenType::Return)),
            Stmt::If { condition, consequence, alternative } => {
                write!(f, "{} ({}) {}", keyword(TokenType::If), condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, " {} {}", keyword(TokenType::Else), alternative)?;
                }

                Ok(())
            },
            Stmt::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Identifier(String),
    Integer(i64),
    Boolean(bool),

    Prefix {
        operator: PrefixOperator,
        right: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        operator: InfixOperator,
        right: Box<Expr>,
    },
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{}", name),
            Expr::Integer(value) => write!(f, "{}", value),
            Expr::Boolean(true) => write!(f, "{}", keyword(TokenType::True)),
            Expr::Boolean(false) => write!(f, "{}", keyword(TokenType::False)),
            Expr::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expr::Infix { left, operator, right } => write!(f, "({} {} {})", left, operator, right),
        }
    }
}
