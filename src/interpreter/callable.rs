use std::{fmt::Debug, rc::Rc};

use crate::{RuntimeError, environment::Environment, interpreter::value::Value, statement::Statement, utils::WeakCell};

/// Host-supplied behavior of a native function.
pub type NativeFunction = Rc<dyn Fn(&[Value]) -> Result<Value, RuntimeError>>;

/// What happens when a function binding is invoked.
#[derive(Clone)]
pub enum Callable {
	Native(NativeFunction),
	Declared {
		parameters: Rc<Vec<String>>,
		statements: Rc<Vec<Statement>>,
		/// The scope the function was declared in. Weak, since that scope
		/// also holds the function.
		closure:    WeakCell<Environment>,
	},
	/// Known by type only, as the analyzer binds functions.
	Signature,
}

impl Debug for Callable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Native(_) => f.debug_tuple("Native").field(&"Function Pointer").finish(),
			Self::Declared { parameters, statements, .. } => {
				f.debug_struct("Declared").field("parameters", parameters).field("statements", &statements.len()).finish()
			}
			Self::Signature => f.write_str("Signature"),
		}
	}
}

impl Callable {
	pub fn native(behavior: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static) -> Self {
		Self::Native(Rc::new(behavior))
	}
}
