//! There is no place in the grammar where both an expression and a statement
//! are allowed. The operands of, say, `+` are always expressions, never
//! statements. The body of a `WHILE` loop is always a list of statements.

use std::rc::Rc;

use crate::parser::expression::{Expression, NodeId};

/// A whole program: globals first, then functions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Source {
	pub globals:   Vec<Global>,
	pub functions: Vec<Function>,
}

/// A `LIST`, `VAR` or `VAL` declaration at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
	pub id:        NodeId,
	pub name:      String,
	/// For a `LIST` this names the element type.
	pub type_name: Option<String>,
	pub mutable:   bool,
	pub value:     Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
	pub id:                   NodeId,
	pub name:                 String,
	pub parameters:           Rc<Vec<String>>,
	/// Parallel to `parameters`.
	pub parameter_type_names: Vec<Option<String>>,
	pub return_type_name:     Option<String>,
	pub statements:           Rc<Vec<Statement>>,
}

/// A statement in the programming language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
	/// An expression used as a statement, must be a call.
	Expression(Expression),
	/// `LET name [: Type] [= value];`
	Declaration {
		id:        NodeId,
		name:      String,
		type_name: Option<String>,
		value:     Option<Expression>,
	},
	Assignment {
		receiver: Expression,
		value:    Expression,
	},
	If {
		condition:       Expression,
		then_statements: Vec<Statement>,
		else_statements: Vec<Statement>,
	},
	/// The last case is the `DEFAULT` one and has no value.
	Switch {
		condition: Expression,
		cases:     Vec<Case>,
	},
	While {
		condition:  Expression,
		statements: Vec<Statement>,
	},
	Return(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
	pub value:      Option<Expression>,
	pub statements: Vec<Statement>,
}
