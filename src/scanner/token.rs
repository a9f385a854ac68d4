use std::fmt::Display;

/// A token produced by the scanner. The copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
	pub kind:    TokenKind,
	/// The raw slice of source this token was scanned from, escapes included.
	pub literal: &'a str,
	/// Byte offset of the first character.
	pub offset:  usize,
}

impl<'a> Token<'a> {
	pub fn new(kind: TokenKind, literal: &'a str, offset: usize) -> Self { Self { kind, literal, offset } }

	/// Whether this token is exactly the given identifier, e.g. a keyword.
	pub fn is_identifier(&self, literal: &str) -> bool { self.kind == TokenKind::Identifier && self.literal == literal }

	/// Whether this token is exactly the given operator.
	pub fn is_operator(&self, literal: &str) -> bool { self.kind == TokenKind::Operator && self.literal == literal }

	/// Offset one past the last byte of this token.
	pub fn end(&self) -> usize { self.offset + self.literal.len() }
}

impl Display for Token<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {} @{}", self.kind, self.literal, self.offset)
	}
}

/// Token categories. Keywords are plain identifiers; the parser recognizes
/// them by comparing the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// `@`-prefixed or plain name, e.g. `x`, `@print`, `LET`.
	Identifier,
	/// `0`, `42`, `-7`.
	Integer,
	/// `1.5`, `0.25`, `-3.0`.
	Decimal,
	/// `'c'` or `'\n'`.
	Character,
	/// `"text"`.
	String,
	/// Any other single character, or one of `&& || == != <= >=`.
	Operator,
}

impl Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			TokenKind::Identifier => "Identifier",
			TokenKind::Integer => "Integer",
			TokenKind::Decimal => "Decimal",
			TokenKind::Character => "Character",
			TokenKind::String => "String",
			TokenKind::Operator => "Operator",
		};
		f.write_str(name)
	}
}
