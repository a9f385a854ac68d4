//! Expression AST nodes
//!
//! An `Expression` is a tree structure representing code like `x + 1 * f(2)`
//! as nested nodes. Every node carries a [`NodeId`] the analyzer uses to
//! record what it learns about the node.

use std::fmt::Display;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

/// Identity of an annotatable AST node, unique within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Expression AST node
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
	pub id:     NodeId,
	/// Byte offset of the first token of the expression.
	pub offset: usize,
	pub kind:   ExpressionKind,
}

impl Expression {
	pub fn new(id: NodeId, offset: usize, kind: ExpressionKind) -> Self { Self { id, offset, kind } }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
	Literal(Literal),
	/// Parenthesized expression. Only a binary expression may be grouped,
	/// which the analyzer enforces.
	Group(Box<Expression>),
	Binary { operator: BinaryOperator, left: Box<Expression>, right: Box<Expression> },
	/// A variable, optionally indexed when it holds a list.
	Access { name: String, offset: Option<Box<Expression>> },
	Call { name: String, arguments: Vec<Expression> },
	/// Only legal as the value of a `LIST` global.
	List(Vec<Expression>),
}

/// Literal values in the AST
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	Nil,
	Boolean(bool),
	Integer(BigInt),
	Decimal(BigDecimal),
	Character(char),
	String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
	And,
	Or,
	Less,
	Greater,
	Equal,
	NotEqual,
	Add,
	Subtract,
	Multiply,
	Divide,
	Power,
}

impl BinaryOperator {
	pub fn from_symbol(symbol: &str) -> Option<Self> {
		use BinaryOperator::*;
		Some(match symbol {
			"&&" => And,
			"||" => Or,
			"<" => Less,
			">" => Greater,
			"==" => Equal,
			"!=" => NotEqual,
			"+" => Add,
			"-" => Subtract,
			"*" => Multiply,
			"/" => Divide,
			"^" => Power,
			_ => return None,
		})
	}

	pub fn symbol(&self) -> &'static str {
		use BinaryOperator::*;
		match self {
			And => "&&",
			Or => "||",
			Less => "<",
			Greater => ">",
			Equal => "==",
			NotEqual => "!=",
			Add => "+",
			Subtract => "-",
			Multiply => "*",
			Divide => "/",
			Power => "^",
		}
	}
}

impl Display for BinaryOperator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.symbol()) }
}

fn join(expressions: &[Expression]) -> String {
	expressions.iter().map(|expression| format!(" {expression}")).collect()
}

impl Display for Expression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ExpressionKind::*;
		match &self.kind {
			Literal(literal) => write!(f, "{literal}"),
			Group(expression) => write!(f, "(group {expression})"),
			Binary { operator, left, right } => write!(f, "({operator} {left} {right})"),
			Access { name, offset: None } => write!(f, "{name}"),
			Access { name, offset: Some(offset) } => write!(f, "(index {name} {offset})"),
			Call { name, arguments } => write!(f, "(call {name}{})", join(arguments)),
			List(elements) => write!(f, "(list{})", join(elements)),
		}
	}
}

impl Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal::Nil => write!(f, "NIL"),
			Literal::Boolean(true) => write!(f, "TRUE"),
			Literal::Boolean(false) => write!(f, "FALSE"),
			Literal::Integer(n) => write!(f, "{n}"),
			Literal::Decimal(n) => write!(f, "{n}"),
			Literal::Character(c) => write!(f, "'{}'", c.escape_debug()),
			Literal::String(s) => write!(f, "\"{}\"", s.escape_debug()),
		}
	}
}
