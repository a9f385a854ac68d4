/// A parsing error, reported at the offset of the unexpected token (or just
/// past the last token when the input ran out).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("offset {offset}: {type}")]
pub struct ParseError {
	offset: usize,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(offset: usize, r#type: ParseErrorType) -> Self { Self { offset, r#type } }

	pub fn offset(&self) -> usize { self.offset }

	pub fn r#type(&self) -> &ParseErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorType {
	/// Something specific was required; `found` is `None` at end of input.
	Expected { expected: &'static str, found: Option<String> },
	/// Tokens left over after the last function.
	TrailingToken(String),
	/// A literal token whose text could not be turned into a value.
	InvalidLiteral(String),
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			Expected { expected, found: Some(found) } => {
				write!(f, "Expected {expected}, found '{found}'")
			}
			Expected { expected, found: None } => {
				write!(f, "Expected {expected}, found end of input")
			}
			TrailingToken(token) => {
				write!(f, "Unexpected '{token}' after the last function")
			}
			InvalidLiteral(literal) => {
				write!(f, "Invalid literal '{literal}'")
			}
		}
	}
}
