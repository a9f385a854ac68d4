//! Lexical scopes. Each scope links to its parent and never the other way
//! around, so a scope lives exactly as long as the block (or function
//! invocation) that opened it and whatever closures still hold it.
//!
//! The analyzer and the interpreter each build their own chain: the analyzer
//! cares about `ty` and `external_name`, the interpreter about `value` and
//! `callable`.

mod types;

use std::collections::HashMap;

pub use types::Type;

use crate::{interpreter::{Callable, Value}, utils::RcCell};

/// A variable binding. Clone it, the value is shared.
#[derive(Debug, Clone)]
pub struct Variable {
	pub name:          String,
	pub external_name: String,
	pub ty:            Type,
	pub mutable:       bool,
	pub value:         RcCell<Value>,
}

impl Variable {
	pub fn new(name: &str, ty: Type, mutable: bool, value: Value) -> Self {
		Self { name: name.to_string(), external_name: name.to_string(), ty, mutable, value: RcCell::new(value) }
	}
}

/// A function binding, keyed by name and arity.
#[derive(Debug, Clone)]
pub struct Function {
	pub name:            String,
	pub external_name:   String,
	pub parameter_types: Vec<Type>,
	pub return_type:     Type,
	pub callable:        Callable,
}

impl Function {
	pub fn arity(&self) -> usize { self.parameter_types.len() }
}

#[derive(Default, Debug)]
pub struct Environment {
	variables: HashMap<String, Variable>,
	functions: HashMap<(String, usize), Function>,
	parent:    Option<RcCell<Environment>>,
}

impl Environment {
	pub fn new() -> Self { Self::default() }

	/// A fresh scope nested inside `parent`.
	pub fn with_parent(parent: RcCell<Environment>) -> Self { Self { parent: Some(parent), ..Self::default() } }

	pub fn parent(&self) -> Option<&RcCell<Environment>> { self.parent.as_ref() }

	/// Define a variable in this scope. Returns `false`, leaving the scope
	/// untouched, if the name is already defined here.
	pub fn define_variable(&mut self, variable: Variable) -> bool {
		if self.variables.contains_key(&variable.name) {
			return false;
		}
		self.variables.insert(variable.name.clone(), variable);
		true
	}

	/// Define a function in this scope. Returns `false` if one with the same
	/// name and arity is already defined here.
	pub fn define_function(&mut self, function: Function) -> bool {
		let key = (function.name.clone(), function.arity());
		if self.functions.contains_key(&key) {
			return false;
		}
		self.functions.insert(key, function);
		true
	}

	/// Resolve a variable, walking outward through the parents.
	pub fn lookup_variable(&self, name: &str) -> Option<Variable> {
		if let Some(variable) = self.variables.get(name) {
			return Some(variable.clone());
		}
		self.parent.as_ref().and_then(|parent| parent.borrow().lookup_variable(name))
	}

	/// Resolve a function by name and arity, walking outward through the parents.
	pub fn lookup_function(&self, name: &str, arity: usize) -> Option<Function> {
		if let Some(function) = self.functions.get(&(name.to_string(), arity)) {
			return Some(function.clone());
		}
		self.parent.as_ref().and_then(|parent| parent.borrow().lookup_function(name, arity))
	}
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;

	use super::*;

	fn integer(value: i32) -> Value { Value::Integer(BigInt::from(value)) }

	#[test]
	fn lookup_walks_outward() {
		let globals = RcCell::new(Environment::new());
		globals.borrow_mut().define_variable(Variable::new("x", Type::Integer, false, integer(1)));
		let inner = Environment::with_parent(globals.clone());

		let x = inner.lookup_variable("x").unwrap();
		assert_eq!(x.ty, Type::Integer);
		assert!(!x.mutable);
		assert!(inner.lookup_variable("y").is_none());
	}

	#[test]
	fn inner_scope_shadows() {
		let globals = RcCell::new(Environment::new());
		globals.borrow_mut().define_variable(Variable::new("x", Type::Integer, false, integer(1)));
		let mut inner = Environment::with_parent(globals.clone());
		assert!(inner.define_variable(Variable::new("x", Type::String, true, Value::String("s".into()))));

		assert_eq!(inner.lookup_variable("x").unwrap().ty, Type::String);
		assert_eq!(globals.borrow().lookup_variable("x").unwrap().ty, Type::Integer);
	}

	#[test]
	fn redefinition_in_same_scope_is_rejected() {
		let mut scope = Environment::new();
		assert!(scope.define_variable(Variable::new("x", Type::Integer, true, integer(1))));
		assert!(!scope.define_variable(Variable::new("x", Type::Integer, true, integer(2))));
		assert_eq!(*scope.lookup_variable("x").unwrap().value.borrow(), integer(1));
	}

	#[test]
	fn variable_values_are_shared() {
		let mut scope = Environment::new();
		scope.define_variable(Variable::new("x", Type::Integer, true, integer(1)));
		let x = scope.lookup_variable("x").unwrap();
		*x.value.borrow_mut() = integer(2);
		assert_eq!(*scope.lookup_variable("x").unwrap().value.borrow(), integer(2));
	}

	#[test]
	fn functions_are_keyed_by_arity() {
		let print = |arity: usize| Function {
			name:            "print".to_string(),
			external_name:   "System.out.println".to_string(),
			parameter_types: vec![Type::Any; arity],
			return_type:     Type::Nil,
			callable:        Callable::Signature,
		};
		let globals = RcCell::new(Environment::new());
		assert!(globals.borrow_mut().define_function(print(1)));
		assert!(globals.borrow_mut().define_function(print(2)));
		assert!(!globals.borrow_mut().define_function(print(1)));

		let inner = Environment::with_parent(globals);
		assert_eq!(inner.lookup_function("print", 2).unwrap().arity(), 2);
		assert_eq!(inner.lookup_function("print", 1).unwrap().external_name, "System.out.println");
		assert!(inner.lookup_function("print", 0).is_none());
	}
}
