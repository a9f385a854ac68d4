//! Static analysis.
//!
//! One pass over the tree that resolves every name to a binding and gives
//! every expression a static type. Nothing in the tree is mutated; what the
//! analyzer learns is recorded in an [`Analysis`] keyed by [`NodeId`], which
//! is what an emitter (or anything else downstream) reads.
//!
//! Globals are analyzed first, in order, then functions, in order. A function
//! is bound before its body is analyzed so it can call itself, but functions
//! declared after it are not yet visible.

use std::{collections::HashMap, mem};

use num_traits::ToPrimitive;
use tracing::{debug, trace};

use crate::{TypeError, environment::{Environment, Function, Type, Variable}, interpreter::{Callable, Value}, parser::expression::{BinaryOperator, Expression, ExpressionKind, Literal, NodeId}, statement::{self, Global, Source, Statement}, utils::RcCell};

/// What analysis learned about a program, keyed by node.
#[derive(Debug, Default)]
pub struct Analysis {
	/// The static type of every expression.
	pub types:     HashMap<NodeId, Type>,
	/// The binding of every `Access` expression, global and `LET`.
	pub variables: HashMap<NodeId, Variable>,
	/// The binding of every `Call` expression and function declaration.
	pub functions: HashMap<NodeId, Function>,
}

impl Analysis {
	pub fn type_of(&self, id: NodeId) -> Option<Type> { self.types.get(&id).copied() }

	pub fn variable(&self, id: NodeId) -> Option<&Variable> { self.variables.get(&id) }

	pub fn function(&self, id: NodeId) -> Option<&Function> { self.functions.get(&id) }
}

/// Fails unless a value of type `actual` may be stored where `target` is
/// expected.
pub fn require_assignable(target: Type, actual: Type) -> Result<(), TypeError> {
	if target.is_assignable_from(actual) { Ok(()) } else { Err(TypeError::NotAssignable { target, actual }) }
}

pub struct Analyzer {
	/// The innermost scope of whatever is being analyzed.
	scope:    RcCell<Environment>,
	analysis: Analysis,
}

impl Default for Analyzer {
	fn default() -> Self { Self::new() }
}

impl Analyzer {
	/// An analyzer that knows the built-in `print(Any): Nil`.
	pub fn new() -> Self {
		let mut analyzer = Self { scope: RcCell::new(Environment::new()), analysis: Analysis::default() };
		analyzer.define_function("print", "System.out.println", vec![Type::Any], Type::Nil);
		analyzer
	}

	/// Declare the signature of a host function. Returns `false` if one with
	/// the same name and arity is already declared.
	pub fn define_function(
		&mut self,
		name: &str,
		external_name: &str,
		parameter_types: Vec<Type>,
		return_type: Type,
	) -> bool {
		self.scope.borrow_mut().define_function(Function {
			name: name.to_string(),
			external_name: external_name.to_string(),
			parameter_types,
			return_type,
			callable: Callable::Signature,
		})
	}

	/// Analyze a whole program, stopping at the first error.
	#[tracing::instrument(skip_all)]
	pub fn analyze(mut self, source: &Source) -> Result<Analysis, TypeError> {
		for global in &source.globals {
			self.global(global)?;
		}
		for function in &source.functions {
			self.function(function)?;
		}

		let main = self.scope.borrow().lookup_function("main", 0).ok_or(TypeError::MissingMain)?;
		if main.return_type != Type::Integer {
			return Err(TypeError::MainReturnType(main.return_type));
		}

		debug!(types = self.analysis.types.len(), "analysis complete");
		Ok(self.analysis)
	}

	fn global(&mut self, global: &Global) -> Result<(), TypeError> {
		let declared = resolve(global.type_name.as_deref())?;
		let ty = match &global.value {
			Some(Expression { id, kind: ExpressionKind::List(elements), .. }) => self.list(*id, elements, declared)?,
			value => self.initializer(&global.name, declared, value.as_ref())?,
		};
		self.define_variable(global.id, Variable::new(&global.name, ty, global.mutable, Value::Nil))
	}

	/// The type of a declaration: the declared one, which the initializer
	/// must fit, or else the initializer's.
	fn initializer(&mut self, name: &str, declared: Option<Type>, value: Option<&Expression>) -> Result<Type, TypeError> {
		match (declared, value) {
			(Some(declared), Some(value)) => {
				require_assignable(declared, self.expression(value)?)?;
				Ok(declared)
			}
			(None, Some(value)) => self.expression(value),
			(Some(declared), None) => Ok(declared),
			(None, None) => Err(TypeError::MissingDeclarationType(name.to_string())),
		}
	}

	/// A list literal has the type of its elements: the declared one, else the
	/// first element's, else `Any`.
	fn list(&mut self, id: NodeId, elements: &[Expression], declared: Option<Type>) -> Result<Type, TypeError> {
		let mut element_type = declared;
		for element in elements {
			let actual = self.expression(element)?;
			match element_type {
				Some(expected) => require_assignable(expected, actual)?,
				None => element_type = Some(actual),
			}
		}
		let ty = element_type.unwrap_or(Type::Any);
		self.record_type(id, ty)?;
		Ok(ty)
	}

	fn function(&mut self, function: &statement::Function) -> Result<(), TypeError> {
		let parameter_types = function
			.parameter_type_names
			.iter()
			.map(|name| Ok(resolve(name.as_deref())?.unwrap_or(Type::Any)))
			.collect::<Result<Vec<_>, TypeError>>()?;
		let return_type = resolve(function.return_type_name.as_deref())?.unwrap_or(Type::Nil);
		trace!(name = %function.name, ?parameter_types, %return_type, "function");

		let binding = Function {
			name: function.name.clone(),
			external_name: function.name.clone(),
			parameter_types: parameter_types.clone(),
			return_type,
			callable: Callable::Signature,
		};
		if !self.scope.borrow_mut().define_function(binding.clone()) {
			return Err(TypeError::Redefinition(function.name.clone()));
		}
		self.analysis.functions.insert(function.id, binding);

		let mut scope = Environment::with_parent(self.scope.clone());
		scope.define_variable(Variable::new("RETURN", return_type, false, Value::Nil));
		for (name, ty) in function.parameters.iter().zip(parameter_types) {
			if !scope.define_variable(Variable::new(name, ty, true, Value::Nil)) {
				return Err(TypeError::Redefinition(name.clone()));
			}
		}
		self.in_scope(scope, &function.statements)
	}

	/// Analyze `statements` in `scope`, restoring the current scope afterwards.
	fn in_scope(&mut self, scope: Environment, statements: &[Statement]) -> Result<(), TypeError> {
		let previous = mem::replace(&mut self.scope, RcCell::new(scope));
		let result = statements.iter().try_for_each(|statement| self.statement(statement));
		self.scope = previous;
		result
	}

	fn child_scope(&self) -> Environment { Environment::with_parent(self.scope.clone()) }

	fn statement(&mut self, statement: &Statement) -> Result<(), TypeError> {
		match statement {
			Statement::Expression(expression) => {
				if !matches!(expression.kind, ExpressionKind::Call { .. }) {
					return Err(TypeError::ExpressionStatementNotCall);
				}
				self.expression(expression)?;
			}
			Statement::Declaration { id, name, type_name, value } => {
				let declared = resolve(type_name.as_deref())?;
				let ty = self.initializer(name, declared, value.as_ref())?;
				self.define_variable(*id, Variable::new(name, ty, true, Value::Nil))?;
			}
			Statement::Assignment { receiver, value } => {
				if !matches!(receiver.kind, ExpressionKind::Access { .. }) {
					return Err(TypeError::ReceiverNotAccess);
				}
				let target = self.expression(receiver)?;
				require_assignable(target, self.expression(value)?)?;
			}
			Statement::If { condition, then_statements, else_statements } => {
				require_assignable(Type::Boolean, self.expression(condition)?)?;
				if then_statements.is_empty() {
					return Err(TypeError::EmptyThen);
				}
				self.in_scope(self.child_scope(), then_statements)?;
				self.in_scope(self.child_scope(), else_statements)?;
			}
			Statement::Switch { condition, cases } => {
				let condition = self.expression(condition)?;
				for (index, case) in cases.iter().enumerate() {
					let last = index + 1 == cases.len();
					match &case.value {
						Some(_) if last => return Err(TypeError::MisplacedDefault),
						None if !last => return Err(TypeError::MisplacedDefault),
						Some(value) => require_assignable(condition, self.expression(value)?)?,
						None => {}
					}
					self.in_scope(self.child_scope(), &case.statements)?;
				}
			}
			Statement::While { condition, statements } => {
				require_assignable(Type::Boolean, self.expression(condition)?)?;
				self.in_scope(self.child_scope(), statements)?;
			}
			Statement::Return(value) => {
				let expected = self.lookup_variable("RETURN")?;
				require_assignable(expected.ty, self.expression(value)?)?;
			}
		}
		Ok(())
	}

	/// Resolve and record the type of an expression.
	fn expression(&mut self, expression: &Expression) -> Result<Type, TypeError> {
		let ty = match &expression.kind {
			ExpressionKind::Literal(literal) => literal_type(literal)?,
			ExpressionKind::Group(inner) => {
				if !matches!(inner.kind, ExpressionKind::Binary { .. }) {
					return Err(TypeError::GroupNotBinary);
				}
				self.expression(inner)?
			}
			ExpressionKind::Binary { operator, left, right } => {
				let left = self.expression(left)?;
				let right = self.expression(right)?;
				binary_type(*operator, left, right)?
			}
			ExpressionKind::Access { name, offset } => {
				if let Some(offset) = offset {
					require_assignable(Type::Integer, self.expression(offset)?)?;
				}
				let variable = self.lookup_variable(name)?;
				let ty = variable.ty;
				self.analysis.variables.insert(expression.id, variable);
				ty
			}
			ExpressionKind::Call { name, arguments } => {
				let argument_types =
					arguments.iter().map(|argument| self.expression(argument)).collect::<Result<Vec<_>, _>>()?;
				let function = self.scope.borrow().lookup_function(name, arguments.len());
				let function = function
					.ok_or_else(|| TypeError::UndefinedFunction { name: name.clone(), arity: arguments.len() })?;
				for (&parameter, argument) in function.parameter_types.iter().zip(argument_types) {
					require_assignable(parameter, argument)?;
				}
				let ty = function.return_type;
				self.analysis.functions.insert(expression.id, function);
				ty
			}
			ExpressionKind::List(_) => return Err(TypeError::UnexpectedList),
		};
		self.record_type(expression.id, ty)?;
		Ok(ty)
	}

	fn record_type(&mut self, id: NodeId, ty: Type) -> Result<(), TypeError> {
		match self.analysis.types.insert(id, ty) {
			Some(_) => Err(TypeError::DuplicateType(id)),
			None => Ok(()),
		}
	}

	fn define_variable(&mut self, id: NodeId, variable: Variable) -> Result<(), TypeError> {
		if !self.scope.borrow_mut().define_variable(variable.clone()) {
			return Err(TypeError::Redefinition(variable.name));
		}
		self.analysis.variables.insert(id, variable);
		Ok(())
	}

	fn lookup_variable(&self, name: &str) -> Result<Variable, TypeError> {
		self.scope.borrow().lookup_variable(name).ok_or_else(|| TypeError::UndefinedVariable(name.to_string()))
	}
}

/// Resolve an optional type name.
fn resolve(name: Option<&str>) -> Result<Option<Type>, TypeError> { name.map(Type::from_name).transpose() }

fn literal_type(literal: &Literal) -> Result<Type, TypeError> {
	Ok(match literal {
		Literal::Nil => Type::Nil,
		Literal::Boolean(_) => Type::Boolean,
		Literal::Integer(n) => {
			if i32::try_from(n).is_err() {
				return Err(TypeError::IntegerOutOfRange(n.to_string()));
			}
			Type::Integer
		}
		Literal::Decimal(n) => {
			if !n.to_f64().is_some_and(f64::is_finite) {
				return Err(TypeError::DecimalOutOfRange(n.to_string()));
			}
			Type::Decimal
		}
		Literal::Character(_) => Type::Character,
		Literal::String(_) => Type::String,
	})
}

fn binary_type(operator: BinaryOperator, left: Type, right: Type) -> Result<Type, TypeError> {
	use BinaryOperator::*;

	let invalid = || TypeError::InvalidOperands { operator: operator.symbol(), left, right };
	match operator {
		And | Or => {
			require_assignable(Type::Boolean, left)?;
			require_assignable(Type::Boolean, right)?;
			Ok(Type::Boolean)
		}
		Less | Greater | Equal | NotEqual => {
			require_assignable(Type::Comparable, left)?;
			require_assignable(Type::Comparable, right)?;
			if left != right {
				return Err(TypeError::OperandMismatch { operator: operator.symbol(), left, right });
			}
			Ok(Type::Boolean)
		}
		Add if left == Type::String || right == Type::String => Ok(Type::String),
		Add | Subtract | Multiply | Divide => match (left, right) {
			(Type::Integer, Type::Integer) => Ok(Type::Integer),
			(Type::Decimal, Type::Decimal) => Ok(Type::Decimal),
			_ => Err(invalid()),
		},
		Power => match (left, right) {
			(Type::Integer, Type::Integer) => Ok(Type::Integer),
			(Type::Decimal, Type::Integer) => Ok(Type::Decimal),
			_ => Err(invalid()),
		},
	}
}
