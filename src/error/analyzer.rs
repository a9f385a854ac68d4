use crate::{environment::Type, parser::expression::NodeId};

/// Errors raised by static analysis. The first one aborts the pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
	#[error("Unknown type '{0}'")]
	UnknownType(String),
	#[error("Undefined variable '{0}'")]
	UndefinedVariable(String),
	#[error("Undefined function '{name}' taking {arity} argument(s)")]
	UndefinedFunction { name: String, arity: usize },
	#[error("'{0}' is already defined in this scope")]
	Redefinition(String),
	#[error("Type {actual} is not assignable to {target}")]
	NotAssignable { target: Type, actual: Type },
	#[error("Operands of '{operator}' must have the same type, found {left} and {right}")]
	OperandMismatch { operator: &'static str, left: Type, right: Type },
	#[error("Invalid operand types for '{operator}': {left} and {right}")]
	InvalidOperands { operator: &'static str, left: Type, right: Type },
	#[error("Missing a zero-argument 'main' function")]
	MissingMain,
	#[error("'main' must return Integer, found {0}")]
	MainReturnType(Type),
	#[error("Integer out of Range: {0}")]
	IntegerOutOfRange(String),
	#[error("Decimal out of Range: {0}")]
	DecimalOutOfRange(String),
	#[error("Only binary expressions may be grouped")]
	GroupNotBinary,
	#[error("Only function calls may be used as statements")]
	ExpressionStatementNotCall,
	#[error("Only variables and list elements may be assigned to")]
	ReceiverNotAccess,
	#[error("An IF statement needs at least one statement in its DO block")]
	EmptyThen,
	#[error("Only the last case of a SWITCH may be the DEFAULT")]
	MisplacedDefault,
	#[error("'{0}' needs either a type or an initial value")]
	MissingDeclarationType(String),
	#[error("List literals are only allowed in LIST declarations")]
	UnexpectedList,
	/// Internal error, should never happen
	#[error("Node {0:?} was typed twice")]
	DuplicateType(NodeId),
}
