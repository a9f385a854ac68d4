use std::fmt::Display;

use crate::TypeError;

/// Static types known to the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
	Any,
	Nil,
	Comparable,
	Boolean,
	Integer,
	Decimal,
	Character,
	String,
}

impl Type {
	/// Look a type up by its source-level name.
	pub fn from_name(name: &str) -> Result<Self, TypeError> {
		use Type::*;
		Ok(match name {
			"Any" => Any,
			"Nil" => Nil,
			"Comparable" => Comparable,
			"Boolean" => Boolean,
			"Integer" => Integer,
			"Decimal" => Decimal,
			"Character" => Character,
			"String" => String,
			_ => return Err(TypeError::UnknownType(name.to_string())),
		})
	}

	pub fn name(&self) -> &'static str {
		use Type::*;
		match self {
			Any => "Any",
			Nil => "Nil",
			Comparable => "Comparable",
			Boolean => "Boolean",
			Integer => "Integer",
			Decimal => "Decimal",
			Character => "Character",
			String => "String",
		}
	}

	/// The name an emitter prints for this type.
	pub fn external_name(&self) -> &'static str {
		use Type::*;
		match self {
			Any => "Object",
			Nil => "Void",
			Comparable => "Comparable",
			Boolean => "boolean",
			Integer => "int",
			Decimal => "double",
			Character => "char",
			String => "String",
		}
	}

	/// Whether a value of type `actual` may be stored where `self` is expected.
	pub fn is_assignable_from(self, actual: Type) -> bool {
		match self {
			Type::Any => true,
			Type::Comparable => {
				matches!(actual, Type::Comparable | Type::Integer | Type::Decimal | Type::Character | Type::String)
			}
			target => target == actual,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}
