//! Turns source text into a flat sequence of [`Token`]s.
//!
//! The lexical grammar is small: identifiers (keywords included), integer and
//! decimal numbers, character and string literals, and operators. Anything
//! that isn't one of the first five is an operator, so the scanner never has
//! an "unexpected character" case; it only fails inside malformed literals.
//!
//! Tokens borrow their literal from the source, escapes and quotes included.
//! Turning a literal into a value is left to the parser.
mod token;

use std::{iter::Peekable, str::CharIndices};

pub use token::*;
use tracing::debug;

use crate::{LexError, LexErrorType};

/// A scanner for plc source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points just past the character most recently consumed
	cursor:      usize,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();

		Self { source, source_iter, start: 0, cursor: 0 }
	}

	/// Scan all tokens from the source code, stopping at the first error.
	pub fn scan_tokens(&mut self) -> Result<Vec<Token<'a>>, LexError> {
		let mut tokens = Vec::new();
		while let Some(&(index, next_char)) = self.source_iter.peek() {
			self.advance();
			if is_whitespace(next_char) {
				continue;
			}
			// We are at the beginning of the next lexeme.
			self.start = index;
			tokens.push(self.scan_token(next_char)?);
		}
		debug!(count = tokens.len(), "scanned tokens");
		Ok(tokens)
	}

	/// Scan a single token whose first character has already been consumed
	fn scan_token(&mut self, first: char) -> Result<Token<'a>, LexError> {
		#[rustfmt::skip]
		let kind = match first {
			'@' if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) => self.identifier(),
			c if c.is_ascii_alphabetic() => self.identifier(),
			'-' if self.peek().is_some_and(|c| matches!(c, '1'..='9')) => self.number(first)?,
			c if c.is_ascii_digit() => self.number(first)?,
			'\'' => self.character()?,
			'"' => self.string()?,
			_ => self.operator(first),
		};

		let literal = &self.source[self.start..self.cursor];
		Ok(Token::new(kind, literal, self.start))
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	/// Advance while the current character satisfies `predicate`
	fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
		while self.peek().is_some_and(&predicate) {
			self.advance();
		}
	}

	/// Scan the rest of an identifier or keyword
	fn identifier(&mut self) -> TokenKind {
		self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
		TokenKind::Identifier
	}

	/// Scan the rest of an integer or decimal literal
	fn number(&mut self, first: char) -> Result<TokenKind, LexError> {
		if first == '0' {
			if self.peek().is_some_and(|c| c.is_ascii_digit()) {
				return Err(LexError::new(self.cursor, LexErrorType::LeadingZero));
			}
		} else {
			self.advance_while(|c| c.is_ascii_digit());
		}

		// Look for a fractional part.
		if self.peek() != Some('.') {
			return Ok(TokenKind::Integer);
		}
		self.advance(); // consume '.'
		if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
			return Err(LexError::new(self.cursor, LexErrorType::MissingFraction));
		}
		self.advance_while(|c| c.is_ascii_digit());
		Ok(TokenKind::Decimal)
	}

	/// Scan the rest of a character literal
	fn character(&mut self) -> Result<TokenKind, LexError> {
		match self.peek() {
			None => return Err(LexError::new(self.cursor, LexErrorType::UnterminatedCharacter)),
			Some('\'') => return Err(LexError::new(self.cursor, LexErrorType::EmptyCharacter)),
			Some(c @ ('\n' | '\r' | '\t')) => return Err(LexError::new(self.cursor, LexErrorType::RawControl(c))),
			Some('\\') => {
				self.advance();
				self.escape(LexErrorType::UnterminatedCharacter)?;
			}
			Some(_) => {
				self.advance();
			}
		}

		if self.peek() != Some('\'') {
			return Err(LexError::new(self.cursor, LexErrorType::UnterminatedCharacter));
		}
		self.advance(); // The closing '
		Ok(TokenKind::Character)
	}

	/// Scan the rest of a string literal
	fn string(&mut self) -> Result<TokenKind, LexError> {
		loop {
			match self.peek() {
				None => return Err(LexError::new(self.source.len(), LexErrorType::UnterminatedString)),
				Some('"') => break,
				Some(c @ ('\n' | '\r')) => return Err(LexError::new(self.cursor, LexErrorType::RawControl(c))),
				Some('\\') => {
					self.advance();
					self.escape(LexErrorType::UnterminatedString)?;
				}
				Some(_) => {
					self.advance();
				}
			}
		}
		self.advance(); // The closing "
		Ok(TokenKind::String)
	}

	/// Validate the character after a backslash, which has been consumed
	fn escape(&mut self, at_end: LexErrorType) -> Result<(), LexError> {
		match self.peek() {
			Some('b' | 'n' | 'r' | 't' | '\'' | '"' | '\\') => {
				self.advance();
				Ok(())
			}
			Some(c) => Err(LexError::new(self.cursor, LexErrorType::InvalidEscape(c))),
			None => Err(LexError::new(self.cursor, at_end)),
		}
	}

	/// Scan an operator, greedily taking the two-character ones
	fn operator(&mut self, first: char) -> TokenKind {
		let double = matches!(
			(first, self.peek()),
			('&', Some('&')) | ('|', Some('|')) | ('=' | '!' | '<' | '>', Some('='))
		);
		if double {
			self.advance();
		}
		TokenKind::Operator
	}
}

fn is_whitespace(c: char) -> bool { matches!(c, ' ' | '\u{8}' | '\n' | '\r' | '\t') }

#[cfg(test)]
mod tests {
	use super::*;

	fn scan(input: &str, ok: bool) {
		let mut scanner = Scanner::new(input);
		let result = scanner.scan_tokens();
		assert!(result.is_ok() == ok, "{input:?} => {result:?}");
	}

	fn tokens(input: &str) -> Vec<(TokenKind, &str)> {
		let mut scanner = Scanner::new(input);
		scanner.scan_tokens().unwrap().into_iter().map(|token| (token.kind, token.literal)).collect()
	}

	fn error_at(input: &str) -> (usize, LexErrorType) {
		let error = Scanner::new(input).scan_tokens().unwrap_err();
		(error.offset(), error.r#type().clone())
	}

	#[test]
	fn scan_tokens() {
		scan("", true);
		scan("(", true);
		scan("()[]", true);
		scan(" ( ) ", true);
		scan("@", true);
		scan("你好", true);
		scan(r#""世界""#, true);
		scan("12345", true);
		scan("LET", true);
		scan("RETURN", true);
	}

	#[test]
	fn scan_declaration() {
		use TokenKind::*;
		assert_eq!(tokens("LET x = 1;"), vec![
			(Identifier, "LET"),
			(Identifier, "x"),
			(Operator, "="),
			(Integer, "1"),
			(Operator, ";"),
		]);
	}

	#[test]
	fn scan_offsets() {
		let mut scanner = Scanner::new("VAL  pi =\n3.14;");
		let offsets: Vec<usize> = scanner.scan_tokens().unwrap().iter().map(|token| token.offset).collect();
		assert_eq!(offsets, vec![0, 5, 8, 10, 14]);
	}

	#[test]
	fn scan_identifiers() {
		use TokenKind::*;
		scan("x", true);
		scan("myVariable123", true);
		scan("snake_case", true);
		assert_eq!(tokens("@print"), vec![(Identifier, "@print")]);
		assert_eq!(tokens("kebab-case"), vec![(Identifier, "kebab-case")]);
		assert_eq!(tokens("_name"), vec![(Operator, "_"), (Identifier, "name")]);
		assert_eq!(tokens("@1"), vec![(Operator, "@"), (Integer, "1")]);
	}

	#[test]
	fn scan_numbers() {
		use TokenKind::*;
		assert_eq!(tokens("0"), vec![(Integer, "0")]);
		assert_eq!(tokens("42"), vec![(Integer, "42")]);
		assert_eq!(tokens("-7"), vec![(Integer, "-7")]);
		assert_eq!(tokens("3.14"), vec![(Decimal, "3.14")]);
		assert_eq!(tokens("0.5"), vec![(Decimal, "0.5")]);
		assert_eq!(tokens("-10.01"), vec![(Decimal, "-10.01")]);
		assert_eq!(tokens("-0"), vec![(Operator, "-"), (Integer, "0")]);
		assert_eq!(tokens("1-2"), vec![(Integer, "1"), (Integer, "-2")]);
		assert_eq!(tokens(".5"), vec![(Operator, "."), (Integer, "5")]);
	}

	#[test]
	fn scan_number_errors() {
		assert_eq!(error_at("007"), (1, LexErrorType::LeadingZero));
		assert_eq!(error_at("x = 01;"), (5, LexErrorType::LeadingZero));
		assert_eq!(error_at("1."), (2, LexErrorType::MissingFraction));
		assert_eq!(error_at("1.x"), (2, LexErrorType::MissingFraction));
	}

	#[test]
	fn scan_characters() {
		use TokenKind::*;
		assert_eq!(tokens("'c'"), vec![(Character, "'c'")]);
		assert_eq!(tokens(r"'\n'"), vec![(Character, r"'\n'")]);
		assert_eq!(tokens(r"'\''"), vec![(Character, r"'\''")]);
		assert_eq!(error_at("''"), (1, LexErrorType::EmptyCharacter));
		assert_eq!(error_at("'ab'"), (2, LexErrorType::UnterminatedCharacter));
		assert_eq!(error_at("'a"), (2, LexErrorType::UnterminatedCharacter));
		assert_eq!(error_at("'"), (1, LexErrorType::UnterminatedCharacter));
		assert_eq!(error_at("'\n'"), (1, LexErrorType::RawControl('\n')));
		assert_eq!(error_at("'\t'"), (1, LexErrorType::RawControl('\t')));
		assert_eq!(error_at(r"'\q'"), (2, LexErrorType::InvalidEscape('q')));
	}

	#[test]
	fn scan_strings() {
		use TokenKind::*;
		assert_eq!(tokens(r#""""#), vec![(String, r#""""#)]);
		assert_eq!(tokens(r#""hello world""#), vec![(String, r#""hello world""#)]);
		assert_eq!(tokens(r#""escaped\n\"quote\"""#), vec![(String, r#""escaped\n\"quote\"""#)]);
		assert_eq!(tokens("\"tab\tinside\""), vec![(String, "\"tab\tinside\"")]);
		assert_eq!(error_at(r#""abc"#), (4, LexErrorType::UnterminatedString));
		assert_eq!(error_at("\"a\nb\""), (2, LexErrorType::RawControl('\n')));
		assert_eq!(error_at(r#""a\qb""#), (3, LexErrorType::InvalidEscape('q')));
		assert_eq!(error_at(r#""a\"#), (3, LexErrorType::UnterminatedString));
	}

	#[test]
	fn scan_operators() {
		use TokenKind::*;
		for operator in ["&&", "||", "==", "!=", "<=", ">="] {
			assert_eq!(tokens(operator), vec![(Operator, operator)]);
		}
		for operator in ["!", "=", "<", ">", "+", "-", "*", "/", "^", ";", ",", ":", "(", ")", "[", "]", "&", "|"] {
			assert_eq!(tokens(operator), vec![(Operator, operator)]);
		}
		assert_eq!(tokens("==="), vec![(Operator, "=="), (Operator, "=")]);
		assert_eq!(tokens("< ="), vec![(Operator, "<"), (Operator, "=")]);
	}

	#[test]
	fn scan_whitespace() {
		scan(" ", true);
		scan("\t", true);
		scan("\r", true);
		scan("\n", true);
		scan("\u{8}", true);
		scan("  \t\r\n  ", true);
		assert!(tokens(" \u{8}\t\r\n ").is_empty());
	}

	#[test]
	fn scan_combined() {
		scan("1 + 2 * 3", true);
		scan("VAR x: Integer = 42;", true);
		scan(r#"print("hello");"#, true);
		scan("IF x < 10 DO x = x + 1; END", true);
		assert_eq!(tokens("FUN main(): Integer DO RETURN 0; END").len(), 11);
	}
}
