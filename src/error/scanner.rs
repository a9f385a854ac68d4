/// A scanning error, reported at the offset of the first offending character.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("offset {offset}: {type}")]
pub struct LexError {
	/// Byte offset into the source.
	offset: usize,
	/// The type of scanning error.
	r#type: LexErrorType,
}

impl LexError {
	pub fn new(offset: usize, r#type: LexErrorType) -> Self { Self { offset, r#type } }

	pub fn offset(&self) -> usize { self.offset }

	pub fn r#type(&self) -> &LexErrorType { &self.r#type }
}

/// Types of scanning errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorType {
	/// A digit directly after a leading `0`.
	LeadingZero,
	/// A `.` in a number literal not followed by a digit.
	MissingFraction,
	/// `''`
	EmptyCharacter,
	/// A character literal holding more than one character or missing its
	/// closing quote.
	UnterminatedCharacter,
	/// A string literal missing its closing quote.
	UnterminatedString,
	/// A backslash followed by something other than `b n r t ' " \`.
	InvalidEscape(char),
	/// A raw newline, carriage return or tab where it isn't allowed.
	RawControl(char),
}

impl std::fmt::Display for LexErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use LexErrorType::*;
		match self {
			LeadingZero => write!(f, "Leading zeros are not allowed"),
			MissingFraction => write!(f, "Expected a digit after the decimal point"),
			EmptyCharacter => write!(f, "Empty character literal"),
			UnterminatedCharacter => write!(f, "Unterminated character literal"),
			UnterminatedString => write!(f, "Unterminated string"),
			InvalidEscape(c) => write!(f, "Invalid escape sequence '\\{}'", c.escape_default()),
			RawControl(c) => write!(f, "Unexpected raw control character '{}'", c.escape_default()),
		}
	}
}
