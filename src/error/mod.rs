pub mod analyzer;
pub mod interpreter;
pub mod parser;
pub mod scanner;

/// PlcError is the top-level error type, one variant per stage.
#[derive(thiserror::Error, Debug)]
pub enum PlcError {
	/// Failures outside the language itself, such as reading a source file
	#[error("InternalError: {0:#}")]
	InternalError(#[from] anyhow::Error),
	#[error("Lex error at {0}")]
	Lex(#[from] scanner::LexError),
	#[error("Parse error at {0}")]
	Parse(#[from] parser::ParseError),
	#[error("Type error: {0}")]
	Type(#[from] analyzer::TypeError),
	#[error("Runtime error: {0}")]
	Runtime(#[from] interpreter::RuntimeError),
}

impl PlcError {
	/// Byte offset into the source, for the errors that carry one.
	pub fn offset(&self) -> Option<usize> {
		match self {
			Self::Lex(e) => Some(e.offset()),
			Self::Parse(e) => Some(e.offset()),
			_ => None,
		}
	}

	/// Render the error for humans. Offset-carrying errors get the line and
	/// column they point at, followed by that line and a caret:
	///
	/// ```text
	/// 2:9: expected ;, found END
	///     LET x = 1 END
	///               ^
	/// ```
	pub fn render(&self, source: &str) -> String {
		let Some(offset) = self.offset() else { return self.to_string() };
		let offset = offset.min(source.len());
		let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
		let line_end = source[offset..].find('\n').map_or(source.len(), |i| offset + i);
		let line = source[..line_start].matches('\n').count() + 1;
		let column = source[line_start..offset].chars().count() + 1;
		let message = match self {
			Self::Lex(e) => e.r#type().to_string(),
			Self::Parse(e) => e.r#type().to_string(),
			_ => self.to_string(),
		};
		format!(
			"{line}:{column}: {message}\n    {}\n    {}^",
			&source[line_start..line_end],
			" ".repeat(column - 1)
		)
	}
}
