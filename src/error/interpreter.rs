use num_bigint::BigInt;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur during interpretation
pub enum InterpreterError {
	/// A value had a different runtime representation than required
	#[error("Expected {expected}, received {found}")]
	TypeMismatch { expected: &'static str, found: &'static str },
	/// An operator applied to values it doesn't support
	#[error("Invalid binary operation: {left} {operator} {right}")]
	BinaryOperationError { operator: &'static str, left: &'static str, right: &'static str },
	#[error("Divide by Zero")]
	DivideByZero,
	#[error("Offset out of range: {offset} for a list of length {length}")]
	OffsetOutOfRange { offset: BigInt, length: usize },
	#[error("Cannot assign to immutable '{0}'")]
	ImmutableAssignment(String),
	#[error("Undefined variable '{0}'")]
	UndefinedVariable(String),
	#[error("Undefined function '{name}' taking {arity} argument(s)")]
	UndefinedFunction { name: String, arity: usize },
	#[error("'{0}' is already defined in this scope")]
	Redefinition(String),
	#[error("Negative exponent {0} is not supported")]
	NegativeExponent(BigInt),
	#[error("Exponent {0} is too large")]
	ExponentTooLarge(BigInt),
	#[error("Decimal scale {0} is out of range")]
	ScaleOutOfRange(i64),
	/// Only variables and list elements may be assigned to
	#[error("Invalid assignment receiver")]
	InvalidReceiver,
	/// A declared function outlived the scope it was defined in
	#[error("Function '{0}' outlived its defining scope")]
	DetachedClosure(String),
	/// A function known only by its signature was invoked
	#[error("Function '{0}' has no implementation")]
	NotInvocable(String),
	#[error("Failed writing output: {0}")]
	Output(#[from] std::io::Error),
}

/// The name the rest of the crate uses for evaluation failures.
pub type RuntimeError = InterpreterError;
