//! Tree-walking interpreter.
//!
//! The interpreter walks a [`Source`] that has already passed analysis,
//! evaluating global initializers, binding every function, and then invoking
//! `main`. It trusts the analyzer for names and types and only checks the
//! runtime representation of values where an operator has to dispatch on it.
//!
//! # Scopes
//!
//! Every block (an `IF` branch, a `SWITCH` case, one `WHILE` iteration) and
//! every function invocation runs in a fresh child scope. The interpreter
//! swaps the child in as its current scope and restores the previous one when
//! the block finishes, whether it completed, returned or failed.

mod callable;
mod value;

use std::{io::Write, mem};

pub use callable::{Callable, NativeFunction};
use num_bigint::BigInt;
use tracing::{debug, trace, warn};
pub use value::Value;

use crate::{InterpreterError, RuntimeError, environment::{Environment, Function, Type, Variable}, parser::expression::{Expression, ExpressionKind}, statement::{Source, Statement}, utils::RcCell};

/// Where `print` writes to.
pub type Output = RcCell<Box<dyn Write>>;

/// How a statement finished.
#[derive(Debug)]
pub(crate) enum Flow {
	Normal,
	/// A `RETURN` is unwinding to the enclosing invocation.
	Return(Value),
}

/// Interpreter that evaluates plc programs.
pub struct Interpreter {
	/// The outermost scope, holding natives, globals and functions.
	globals:     RcCell<Environment>,
	/// The innermost scope of whatever is executing.
	environment: RcCell<Environment>,
}

impl Default for Interpreter {
	fn default() -> Self { Self::new() }
}

impl Interpreter {
	/// An interpreter whose `print` writes to stdout.
	pub fn new() -> Self { Self::with_output(RcCell::new(Box::new(std::io::stdout()))) }

	/// An interpreter whose `print` writes to `output`.
	pub fn with_output(output: Output) -> Self {
		let globals = RcCell::new(Environment::new());
		let mut interpreter = Self { globals: globals.clone(), environment: globals };
		interpreter.define_native("print", 1, move |arguments| {
			writeln!(output.borrow_mut(), "{}", arguments[0])?;
			Ok(Value::Nil)
		});
		interpreter
	}

	/// Register a host function in the outermost scope. Must happen before
	/// [`Interpreter::run`].
	pub fn define_native(
		&mut self,
		name: &str,
		arity: usize,
		behavior: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
	) {
		let function = Function {
			name:            name.to_string(),
			external_name:   name.to_string(),
			parameter_types: vec![Type::Any; arity],
			return_type:     Type::Any,
			callable:        Callable::native(behavior),
		};
		if !self.globals.borrow_mut().define_function(function) {
			warn!(name, arity, "native function already defined, keeping the first");
		}
	}

	/// Evaluate the globals, bind the functions, and return the value of
	/// `main()`.
	#[tracing::instrument(skip_all)]
	pub fn run(&mut self, source: &Source) -> Result<Value, RuntimeError> {
		for global in &source.globals {
			let value = match &global.value {
				Some(value) => self.evaluate(value)?,
				None => Value::Nil,
			};
			define(&self.globals, Variable::new(&global.name, Type::Any, global.mutable, value))?;
		}

		for function in &source.functions {
			let binding = Function {
				name:            function.name.clone(),
				external_name:   function.name.clone(),
				parameter_types: vec![Type::Any; function.parameters.len()],
				return_type:     Type::Any,
				callable:        Callable::Declared {
					parameters: function.parameters.clone(),
					statements: function.statements.clone(),
					closure:    self.globals.downgrade(),
				},
			};
			if !self.globals.borrow_mut().define_function(binding) {
				return Err(InterpreterError::Redefinition(function.name.clone()));
			}
		}

		debug!(globals = source.globals.len(), functions = source.functions.len(), "invoking main");
		self.call_function("main", Vec::new())
	}

	/// Invoke a function visible from the outermost scope.
	pub fn call_function(&mut self, name: &str, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		let function = self.globals.borrow().lookup_function(name, arguments.len());
		let function = function
			.ok_or_else(|| InterpreterError::UndefinedFunction { name: name.to_string(), arity: arguments.len() })?;
		self.call(&function, arguments)
	}

	fn call(&mut self, function: &Function, arguments: Vec<Value>) -> Result<Value, RuntimeError> {
		trace!(name = %function.name, arity = arguments.len(), "call");
		match &function.callable {
			Callable::Native(behavior) => behavior(&arguments),
			Callable::Declared { parameters, statements, closure } => {
				let closure = closure.upgrade().ok_or_else(|| InterpreterError::DetachedClosure(function.name.clone()))?;
				let scope = RcCell::new(Environment::with_parent(closure));
				for (name, value) in parameters.iter().zip(arguments) {
					define(&scope, Variable::new(name, Type::Any, true, value))?;
				}
				match self.execute_in(scope, statements)? {
					Flow::Return(value) => Ok(value),
					Flow::Normal => Ok(Value::Nil),
				}
			}
			Callable::Signature => Err(InterpreterError::NotInvocable(function.name.clone())),
		}
	}

	/// Run `statements` with `scope` as the current scope, restoring the
	/// previous one afterwards.
	fn execute_in(&mut self, scope: RcCell<Environment>, statements: &[Statement]) -> Result<Flow, RuntimeError> {
		let previous = mem::replace(&mut self.environment, scope);
		let result = self.execute_block(statements);
		self.environment = previous;
		result
	}

	fn execute_block(&mut self, statements: &[Statement]) -> Result<Flow, RuntimeError> {
		for statement in statements {
			if let Flow::Return(value) = self.execute(statement)? {
				return Ok(Flow::Return(value));
			}
		}
		Ok(Flow::Normal)
	}

	/// A new scope nested in the current one.
	fn child_scope(&self) -> RcCell<Environment> { RcCell::new(Environment::with_parent(self.environment.clone())) }

	fn execute(&mut self, statement: &Statement) -> Result<Flow, RuntimeError> {
		match statement {
			Statement::Expression(expression) => {
				self.evaluate(expression)?;
			}
			Statement::Declaration { name, value, .. } => {
				let value = match value {
					Some(value) => self.evaluate(value)?,
					None => Value::Nil,
				};
				define(&self.environment, Variable::new(name, Type::Any, true, value))?;
			}
			Statement::Assignment { receiver, value } => self.assign(receiver, value)?,
			Statement::If { condition, then_statements, else_statements } => {
				let branch = if self.evaluate(condition)?.as_boolean()? { then_statements } else { else_statements };
				return self.execute_in(self.child_scope(), branch);
			}
			Statement::Switch { condition, cases } => {
				let condition = self.evaluate(condition)?;
				for case in cases {
					let matched = match &case.value {
						Some(value) => self.evaluate(value)? == condition,
						None => true,
					};
					if matched {
						return self.execute_in(self.child_scope(), &case.statements);
					}
				}
			}
			Statement::While { condition, statements } => {
				while self.evaluate(condition)?.as_boolean()? {
					if let Flow::Return(value) = self.execute_in(self.child_scope(), statements)? {
						return Ok(Flow::Return(value));
					}
				}
			}
			Statement::Return(value) => return Ok(Flow::Return(self.evaluate(value)?)),
		}
		Ok(Flow::Normal)
	}

	fn assign(&mut self, receiver: &Expression, value: &Expression) -> Result<(), RuntimeError> {
		let ExpressionKind::Access { name, offset } = &receiver.kind else {
			return Err(InterpreterError::InvalidReceiver);
		};
		let variable = self.lookup_variable(name)?;
		if !variable.mutable {
			return Err(InterpreterError::ImmutableAssignment(name.clone()));
		}
		match offset {
			None => {
				let value = self.evaluate(value)?;
				*variable.value.borrow_mut() = value;
			}
			Some(offset) => {
				let offset = self.evaluate(offset)?;
				let value = self.evaluate(value)?;
				let list = variable.value.borrow().clone();
				let elements = list.as_list()?;
				let index = checked_index(offset.as_integer()?, elements.borrow().len())?;
				elements.borrow_mut()[index] = value;
			}
		}
		Ok(())
	}

	/// Evaluate the given expression and return its value.
	fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
		Ok(match &expression.kind {
			ExpressionKind::Literal(literal) => Value::from(literal),
			ExpressionKind::Group(inner) => self.evaluate(inner)?,
			ExpressionKind::Binary { operator, left, right } => {
				// Both sides are always evaluated, `&&` and `||` included.
				let left = self.evaluate(left)?;
				let right = self.evaluate(right)?;
				left.binary_op(*operator, &right)?
			}
			ExpressionKind::Access { name, offset } => {
				let offset = offset.as_deref().map(|offset| self.evaluate(offset)).transpose()?;
				let value = self.lookup_variable(name)?.value.borrow().clone();
				match offset {
					None => value,
					Some(offset) => {
						let elements = value.as_list()?.borrow();
						let index = checked_index(offset.as_integer()?, elements.len())?;
						elements[index].clone()
					}
				}
			}
			ExpressionKind::Call { name, arguments } => {
				let arguments = arguments.iter().map(|argument| self.evaluate(argument)).collect::<Result<Vec<_>, _>>()?;
				let function = self.environment.borrow().lookup_function(name, arguments.len());
				let function = function
					.ok_or_else(|| InterpreterError::UndefinedFunction { name: name.clone(), arity: arguments.len() })?;
				self.call(&function, arguments)?
			}
			ExpressionKind::List(elements) => {
				let elements = elements.iter().map(|element| self.evaluate(element)).collect::<Result<Vec<_>, _>>()?;
				Value::list(elements)
			}
		})
	}

	fn lookup_variable(&self, name: &str) -> Result<Variable, RuntimeError> {
		self.environment.borrow().lookup_variable(name).ok_or_else(|| InterpreterError::UndefinedVariable(name.to_string()))
	}
}

fn define(scope: &RcCell<Environment>, variable: Variable) -> Result<(), RuntimeError> {
	let name = variable.name.clone();
	if scope.borrow_mut().define_variable(variable) { Ok(()) } else { Err(InterpreterError::Redefinition(name)) }
}

/// Convert a list offset into an index, if it is in range.
fn checked_index(offset: &BigInt, length: usize) -> Result<usize, RuntimeError> {
	usize::try_from(offset)
		.ok()
		.filter(|&index| index < length)
		.ok_or_else(|| InterpreterError::OffsetOutOfRange { offset: offset.clone(), length })
}
