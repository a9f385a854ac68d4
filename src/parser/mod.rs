//! The `Scanner` uses a lexical grammar whose alphabet is characters; the
//! `Parser` uses a syntactic grammar whose alphabet is tokens.
//!
//! |Name|Operators|Associates
//! --|--|--
//! Logical|&& \|\||Left
//! Comparison|< > == !=|Left
//! Term|+ -|Left
//! Factor|* / ^|Left
//!
//! Grammar:
//!
//! ``` BNF
//! source         → global* function* ;
//! global         → list | mutable | immutable ;
//! list           → "LIST" IDENTIFIER ( ":" IDENTIFIER )? "=" "[" ( expression ( "," expression )* )? "]" ";" ;
//! mutable        → "VAR" IDENTIFIER ( ":" IDENTIFIER )? ( "=" expression )? ";" ;
//! immutable      → "VAL" IDENTIFIER ( ":" IDENTIFIER )? "=" expression ";" ;
//! function       → "FUN" IDENTIFIER "(" parameters? ")" ( ":" IDENTIFIER )? "DO" block "END" ;
//! parameters     → IDENTIFIER ( ":" IDENTIFIER )? ( "," IDENTIFIER ( ":" IDENTIFIER )? )* ;
//! block          → statement* ;
//! statement      → "LET" IDENTIFIER ( ":" IDENTIFIER )? ( "=" expression )? ";"
//!                | "IF" expression "DO" block ( "ELSE" block )? "END"
//!                | "SWITCH" expression ( "CASE" expression ":" block )* "DEFAULT" ":"? block "END"
//!                | "WHILE" expression "DO" block "END"
//!                | "RETURN" expression ";"
//!                | expression ( "=" expression )? ";" ;
//! expression     → logical ;
//! logical        → comparison ( ( "&&" | "||" ) comparison )* ;
//! comparison     → term ( ( "<" | ">" | "==" | "!=" ) term )* ;
//! term           → factor ( ( "+" | "-" ) factor )* ;
//! factor         → primary ( ( "*" | "/" | "^" ) primary )* ;
//! primary        → "NIL" | "TRUE" | "FALSE" | INTEGER | DECIMAL | CHARACTER | STRING
//!                | "(" expression ")"
//!                | IDENTIFIER ( "(" arguments? ")" | "[" expression? "]" )? ;
//! ```

pub mod expression;

use std::{iter::Peekable, str::FromStr, vec::IntoIter};

use BinaryOperator::*;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use tracing::debug;

use crate::{ParseError, ParseErrorType, parser::expression::{BinaryOperator, Expression, ExpressionKind, Literal, NodeId}, scanner::{Token, TokenKind}, statement::{Case, Function, Global, Source, Statement}};

/// A single-shot recursive descent parser. The first mismatch aborts.
pub struct Parser<'a> {
	/// The tokens to parse.
	tokens:   Peekable<IntoIter<Token<'a>>>,
	/// Offset just past the most recently consumed token.
	last_end: usize,
	next_id:  usize,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>) -> Self { Self { tokens: tokens.into_iter().peekable(), last_end: 0, next_id: 0 } }

	/// Parse a whole program. Every token must be consumed.
	pub fn parse_source(&mut self) -> Result<Source, ParseError> {
		let mut source = Source::default();
		while self.check_identifier("LIST") || self.check_identifier("VAR") || self.check_identifier("VAL") {
			source.globals.push(self.global()?);
		}
		while self.check_identifier("FUN") {
			source.functions.push(self.function()?);
		}
		if let Some(token) = self.peek() {
			return Err(ParseError::new(token.offset, ParseErrorType::TrailingToken(token.literal.to_string())));
		}
		debug!(globals = source.globals.len(), functions = source.functions.len(), "parsed source");
		Ok(source)
	}

	/// Parse a global declaration.
	fn global(&mut self) -> Result<Global, ParseError> {
		let keyword = self.advance("a global declaration")?;
		let id = self.node_id();
		let name = self.name()?;
		let type_name = self.type_annotation()?;
		let global = match keyword.literal {
			"LIST" => {
				self.expect_operator("=")?;
				let value = self.list()?;
				Global { id, name, type_name, mutable: true, value: Some(value) }
			}
			"VAR" => {
				let value = if self.match_operator("=") { Some(self.expression()?) } else { None };
				Global { id, name, type_name, mutable: true, value }
			}
			_ => {
				self.expect_operator("=")?;
				let value = self.expression()?;
				Global { id, name, type_name, mutable: false, value: Some(value) }
			}
		};
		self.expect_operator(";")?;
		Ok(global)
	}

	/// Parse the bracketed initializer of a `LIST` global.
	fn list(&mut self) -> Result<Expression, ParseError> {
		let open = self.expect_operator("[")?;
		let mut elements = Vec::new();
		if !self.check_operator("]") {
			elements.push(self.expression()?);
			while self.match_operator(",") {
				elements.push(self.expression()?);
			}
		}
		self.expect_operator("]")?;
		Ok(self.node(open.offset, ExpressionKind::List(elements)))
	}

	/// Parse a function declaration.
	fn function(&mut self) -> Result<Function, ParseError> {
		self.expect_identifier("FUN")?;
		let id = self.node_id();
		let name = self.name()?;
		self.expect_operator("(")?;
		let mut parameters = Vec::new();
		let mut parameter_type_names = Vec::new();
		if !self.check_operator(")") {
			loop {
				parameters.push(self.name()?);
				parameter_type_names.push(self.type_annotation()?);
				if !self.match_operator(",") {
					break;
				}
			}
		}
		self.expect_operator(")")?;
		let return_type_name = self.type_annotation()?;
		self.expect_identifier("DO")?;
		let statements = self.block()?;
		self.expect_identifier("END")?;
		Ok(Function {
			id,
			name,
			parameters: parameters.into(),
			parameter_type_names,
			return_type_name,
			statements: statements.into(),
		})
	}

	/// Parse statements up to, but not including, a block terminator.
	fn block(&mut self) -> Result<Vec<Statement>, ParseError> {
		let mut statements = Vec::new();
		while let Some(token) = self.peek() {
			if ["END", "ELSE", "CASE", "DEFAULT"].iter().any(|keyword| token.is_identifier(keyword)) {
				break;
			}
			statements.push(self.statement()?);
		}
		Ok(statements)
	}

	fn statement(&mut self) -> Result<Statement, ParseError> {
		if self.match_identifier("LET") {
			return self.declaration();
		}
		if self.match_identifier("IF") {
			return self.if_statement();
		}
		if self.match_identifier("SWITCH") {
			return self.switch_statement();
		}
		if self.match_identifier("WHILE") {
			let condition = self.expression()?;
			self.expect_identifier("DO")?;
			let statements = self.block()?;
			self.expect_identifier("END")?;
			return Ok(Statement::While { condition, statements });
		}
		if self.match_identifier("RETURN") {
			let value = self.expression()?;
			self.expect_operator(";")?;
			return Ok(Statement::Return(value));
		}

		let receiver = self.expression()?;
		let statement = if self.match_operator("=") {
			Statement::Assignment { receiver, value: self.expression()? }
		} else {
			Statement::Expression(receiver)
		};
		self.expect_operator(";")?;
		Ok(statement)
	}

	fn declaration(&mut self) -> Result<Statement, ParseError> {
		let id = self.node_id();
		let name = self.name()?;
		let type_name = self.type_annotation()?;
		let value = if self.match_operator("=") { Some(self.expression()?) } else { None };
		self.expect_operator(";")?;
		Ok(Statement::Declaration { id, name, type_name, value })
	}

	fn if_statement(&mut self) -> Result<Statement, ParseError> {
		let condition = self.expression()?;
		self.expect_identifier("DO")?;
		let then_statements = self.block()?;
		let else_statements = if self.match_identifier("ELSE") { self.block()? } else { Vec::new() };
		self.expect_identifier("END")?;
		Ok(Statement::If { condition, then_statements, else_statements })
	}

	fn switch_statement(&mut self) -> Result<Statement, ParseError> {
		let condition = self.expression()?;
		let mut cases = Vec::new();
		while self.match_identifier("CASE") {
			let value = self.expression()?;
			self.expect_operator(":")?;
			cases.push(Case { value: Some(value), statements: self.block()? });
		}
		self.expect_identifier("DEFAULT")?;
		self.match_operator(":");
		cases.push(Case { value: None, statements: self.block()? });
		self.expect_identifier("END")?;
		Ok(Statement::Switch { condition, cases })
	}

	/// Parse an expression.
	fn expression(&mut self) -> Result<Expression, ParseError> { self.logical() }

	/// Parse logical expressions.
	fn logical(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.comparison()?;
		while let Some(operator) = self.match_binary(&[And, Or]) {
			let right = self.comparison()?;
			expression = self.binary(operator, expression, right);
		}
		Ok(expression)
	}

	/// Parse comparison and equality expressions.
	fn comparison(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.term()?;
		while let Some(operator) = self.match_binary(&[Less, Greater, Equal, NotEqual]) {
			let right = self.term()?;
			expression = self.binary(operator, expression, right);
		}
		Ok(expression)
	}

	/// Parse additive expressions.
	fn term(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.factor()?;
		while let Some(operator) = self.match_binary(&[Add, Subtract]) {
			let right = self.factor()?;
			expression = self.binary(operator, expression, right);
		}
		Ok(expression)
	}

	/// Parse multiplicative expressions.
	fn factor(&mut self) -> Result<Expression, ParseError> {
		let mut expression = self.primary()?;
		while let Some(operator) = self.match_binary(&[Multiply, Divide, Power]) {
			let right = self.primary()?;
			expression = self.binary(operator, expression, right);
		}
		Ok(expression)
	}

	/// Parse primary expressions.
	fn primary(&mut self) -> Result<Expression, ParseError> {
		let Some(&token) = self.peek() else {
			return Err(self.error("an expression"));
		};
		let kind = match token.kind {
			TokenKind::Identifier => {
				self.advance("an expression")?;
				match token.literal {
					"NIL" => ExpressionKind::Literal(Literal::Nil),
					"TRUE" => ExpressionKind::Literal(Literal::Boolean(true)),
					"FALSE" => ExpressionKind::Literal(Literal::Boolean(false)),
					name => self.access_or_call(name)?,
				}
			}
			TokenKind::Integer => {
				self.advance("an expression")?;
				ExpressionKind::Literal(Literal::Integer(parse_number::<BigInt>(&token)?))
			}
			TokenKind::Decimal => {
				self.advance("an expression")?;
				ExpressionKind::Literal(Literal::Decimal(parse_number::<BigDecimal>(&token)?))
			}
			TokenKind::Character => {
				self.advance("an expression")?;
				let text = unescape(unquote(token.literal));
				let mut chars = text.chars();
				match (chars.next(), chars.next()) {
					(Some(c), None) => ExpressionKind::Literal(Literal::Character(c)),
					_ => return Err(invalid_literal(&token)),
				}
			}
			TokenKind::String => {
				self.advance("an expression")?;
				ExpressionKind::Literal(Literal::String(unescape(unquote(token.literal))))
			}
			TokenKind::Operator if token.literal == "(" => {
				self.advance("an expression")?;
				let expression = self.expression()?;
				self.expect_operator(")")?;
				ExpressionKind::Group(Box::new(expression))
			}
			TokenKind::Operator => return Err(self.error("an expression")),
		};
		Ok(self.node(token.offset, kind))
	}

	/// Parse what follows a name: a call, an indexed access, or nothing.
	fn access_or_call(&mut self, name: &str) -> Result<ExpressionKind, ParseError> {
		let name = name.to_string();
		if self.match_operator("(") {
			let mut arguments = Vec::new();
			if !self.check_operator(")") {
				arguments.push(self.expression()?);
				while self.match_operator(",") {
					arguments.push(self.expression()?);
				}
			}
			self.expect_operator(")")?;
			return Ok(ExpressionKind::Call { name, arguments });
		}
		if self.match_operator("[") {
			let offset = if self.check_operator("]") { None } else { Some(Box::new(self.expression()?)) };
			self.expect_operator("]")?;
			return Ok(ExpressionKind::Access { name, offset });
		}
		Ok(ExpressionKind::Access { name, offset: None })
	}

	/// Parse an optional `: Type` annotation.
	fn type_annotation(&mut self) -> Result<Option<String>, ParseError> {
		if self.match_operator(":") { Ok(Some(self.name()?)) } else { Ok(None) }
	}

	/// Parse any identifier and return its text.
	fn name(&mut self) -> Result<String, ParseError> {
		match self.peek() {
			Some(token) if token.kind == TokenKind::Identifier => {
				let token = self.advance("an identifier")?;
				Ok(token.literal.to_string())
			}
			_ => Err(self.error("an identifier")),
		}
	}

	fn binary(&mut self, operator: BinaryOperator, left: Expression, right: Expression) -> Expression {
		let offset = left.offset;
		self.node(offset, ExpressionKind::Binary { operator, left: Box::new(left), right: Box::new(right) })
	}

	fn node(&mut self, offset: usize, kind: ExpressionKind) -> Expression {
		let id = self.node_id();
		Expression::new(id, offset, kind)
	}

	fn node_id(&mut self) -> NodeId {
		self.next_id += 1;
		NodeId(self.next_id)
	}

	/// Consume the current token if it is one of the given binary operators.
	fn match_binary(&mut self, operators: &[BinaryOperator]) -> Option<BinaryOperator> {
		let token = self.peek()?;
		if token.kind != TokenKind::Operator {
			return None;
		}
		let operator = BinaryOperator::from_symbol(token.literal).filter(|operator| operators.contains(operator))?;
		self.consume();
		Some(operator)
	}

	fn check_identifier(&mut self, literal: &str) -> bool { self.peek().is_some_and(|token| token.is_identifier(literal)) }

	fn check_operator(&mut self, literal: &str) -> bool { self.peek().is_some_and(|token| token.is_operator(literal)) }

	fn match_identifier(&mut self, literal: &str) -> bool { self.check_identifier(literal) && self.consume().is_some() }

	fn match_operator(&mut self, literal: &str) -> bool { self.check_operator(literal) && self.consume().is_some() }

	fn expect_identifier(&mut self, literal: &'static str) -> Result<Token<'a>, ParseError> {
		if self.check_identifier(literal) { self.advance(literal) } else { Err(self.error(literal)) }
	}

	fn expect_operator(&mut self, literal: &'static str) -> Result<Token<'a>, ParseError> {
		if self.check_operator(literal) { self.advance(literal) } else { Err(self.error(literal)) }
	}

	/// Advance to the next token, `expected` describes what was wanted if
	/// there is none.
	fn advance(&mut self, expected: &'static str) -> Result<Token<'a>, ParseError> {
		self.consume().ok_or_else(|| self.error(expected))
	}

	/// Take the next token, if any.
	fn consume(&mut self) -> Option<Token<'a>> {
		let token = self.tokens.next()?;
		self.last_end = token.end();
		Some(token)
	}

	/// Peek at the current token.
	fn peek(&mut self) -> Option<&Token<'a>> { self.tokens.peek() }

	/// An error at the current token, or just past the last one at the end.
	fn error(&mut self, expected: &'static str) -> ParseError {
		match self.tokens.peek() {
			Some(token) => {
				ParseError::new(token.offset, ParseErrorType::Expected { expected, found: Some(token.literal.to_string()) })
			}
			None => ParseError::new(self.last_end, ParseErrorType::Expected { expected, found: None }),
		}
	}
}

fn parse_number<T: FromStr>(token: &Token) -> Result<T, ParseError> {
	token.literal.parse().map_err(|_| invalid_literal(token))
}

fn invalid_literal(token: &Token) -> ParseError {
	ParseError::new(token.offset, ParseErrorType::InvalidLiteral(token.literal.to_string()))
}

/// Strip the surrounding quotes of a character or string literal.
fn unquote(literal: &str) -> &str {
	let mut chars = literal.chars();
	chars.next();
	chars.next_back();
	chars.as_str()
}

/// Replace escape sequences with the characters they stand for. The scanner
/// has already rejected unknown escapes.
fn unescape(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut chars = text.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			result.push(c);
			continue;
		}
		match chars.next() {
			Some('b') => result.push('\u{8}'),
			Some('n') => result.push('\n'),
			Some('r') => result.push('\r'),
			Some('t') => result.push('\t'),
			Some(other) => result.push(other),
			None => {}
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scanner::Scanner;

	fn parser(input: &str) -> Parser<'_> {
		let mut scanner = Scanner::new(input);
		let tokens = scanner.scan_tokens().unwrap();
		Parser::new(tokens)
	}

	fn parse(input: &str, equals: &str) {
		let mut parser = parser(input);
		let ast = parser.expression().unwrap();
		assert!(parser.peek().is_none(), "unconsumed tokens in {input:?}");
		assert_eq!(ast.to_string(), equals);
	}

	fn parse_program(input: &str) -> Source { parser(input).parse_source().unwrap() }

	fn source_error(input: &str) -> ParseError { parser(input).parse_source().unwrap_err() }

	fn statements(input: &str) -> Vec<Statement> {
		let source = parse_program(&format!("FUN main() DO {input} END"));
		source.functions[0].statements.as_ref().clone()
	}

	#[test]
	fn parse_expressions() {
		parse("3 + 4 * (2 - 1)", "(+ 3 (* 4 (group (- 2 1))))");
		parse("1 + 2 * 3 / 4 - 5", "(- (+ 1 (/ (* 2 3) 4)) 5)");
		parse("8 + 800.3 * 123 / 65 - (2 + 3)", "(- (+ 8 (/ (* 800.3 123) 65)) (group (+ 2 3)))");
	}

	#[test]
	fn parse_comparison() {
		parse("1 < 2", "(< 1 2)");
		parse("1 > 2", "(> 1 2)");
		parse("1 < 2 < 3", "(< (< 1 2) 3)");
		parse("1 == 2 != 3", "(!= (== 1 2) 3)");
		parse("1 + 2 == 3", "(== (+ 1 2) 3)");
	}

	#[test]
	fn parse_logical() {
		parse("TRUE && FALSE", "(&& TRUE FALSE)");
		parse("a || b && c", "(&& (|| a b) c)");
		parse("x < 1 || y == 2", "(|| (< x 1) (== y 2))");
	}

	#[test]
	fn parse_factor() {
		parse("2 ^ 3 ^ 2", "(^ (^ 2 3) 2)");
		parse("2 * 3 ^ 2", "(^ (* 2 3) 2)");
		parse("1 + 2 ^ 3", "(+ 1 (^ 2 3))");
	}

	#[test]
	fn parse_literals() {
		parse("42", "42");
		parse("-42", "-42");
		parse("3.14", "3.14");
		parse("1.50", "1.50");
		parse("\"hello\"", "\"hello\"");
		parse(r#""a\tb""#, r#""a\tb""#);
		parse("'c'", "'c'");
		parse(r"'\n'", r"'\n'");
		parse("TRUE", "TRUE");
		parse("FALSE", "FALSE");
		parse("NIL", "NIL");
	}

	#[test]
	fn parse_unescaped_literals() {
		let ast = parser(r#""a\"b\\c\bd""#).expression().unwrap();
		assert_eq!(ast.kind, ExpressionKind::Literal(Literal::String("a\"b\\c\u{8}d".to_string())));

		let ast = parser(r"'\''").expression().unwrap();
		assert_eq!(ast.kind, ExpressionKind::Literal(Literal::Character('\'')));
	}

	#[test]
	fn parse_grouping() {
		parse("(1 + 2) * 3", "(* (group (+ 1 2)) 3)");
		parse("1 * (2 + 3)", "(* 1 (group (+ 2 3)))");
		parse("((1))", "(group (group 1))");
	}

	#[test]
	fn parse_access_and_call() {
		parse("x", "x");
		parse("list[]", "list");
		parse("list[i + 1]", "(index list (+ i 1))");
		parse("f()", "(call f)");
		parse("f(1, x, g(2))", "(call f 1 x (call g 2))");
		parse("@print(\"hi\")", "(call @print \"hi\")");
		parse("f(1) + l[0]", "(+ (call f 1) (index l 0))");
	}

	#[test]
	fn parse_expression_offsets() {
		let ast = parser("a +  f(b)").expression().unwrap();
		let ExpressionKind::Binary { left, right, .. } = ast.kind else { panic!("expected binary") };
		assert_eq!(ast.offset, 0);
		assert_eq!(left.offset, 0);
		assert_eq!(right.offset, 5);
	}

	#[test]
	fn parse_globals() {
		let source = parse_program("LIST l: Integer = [1, 2, 3]; VAR x; VAR y: Decimal = 1.0; VAL z = 'c';");
		assert_eq!(source.globals.len(), 4);
		assert!(source.functions.is_empty());

		let list = &source.globals[0];
		assert_eq!(list.name, "l");
		assert_eq!(list.type_name.as_deref(), Some("Integer"));
		assert!(list.mutable);
		assert_eq!(list.value.as_ref().unwrap().to_string(), "(list 1 2 3)");

		let x = &source.globals[1];
		assert!(x.mutable && x.value.is_none() && x.type_name.is_none());

		let y = &source.globals[2];
		assert_eq!(y.type_name.as_deref(), Some("Decimal"));

		let z = &source.globals[3];
		assert!(!z.mutable);
		assert_eq!(z.value.as_ref().unwrap().to_string(), "'c'");

		let source = parse_program("LIST empty = [];");
		assert_eq!(source.globals[0].value.as_ref().unwrap().to_string(), "(list)");
	}

	#[test]
	fn parse_functions() {
		let source = parse_program("FUN main(): Integer DO RETURN 0; END FUN add(a: Integer, b) DO END");
		assert_eq!(source.functions.len(), 2);

		let main = &source.functions[0];
		assert_eq!(main.name, "main");
		assert!(main.parameters.is_empty());
		assert_eq!(main.return_type_name.as_deref(), Some("Integer"));
		assert_eq!(main.statements.len(), 1);

		let add = &source.functions[1];
		assert_eq!(add.parameters.as_ref(), &vec!["a".to_string(), "b".to_string()]);
		assert_eq!(add.parameter_type_names, vec![Some("Integer".to_string()), None]);
		assert_eq!(add.return_type_name, None);
		assert!(add.statements.is_empty());
	}

	#[test]
	fn parse_node_ids_are_unique() {
		let source = parse_program("VAL x = 1 + 2; FUN main() DO LET y = x; END");
		let mut ids = vec![source.globals[0].id, source.functions[0].id];
		let Some(value) = &source.globals[0].value else { panic!("expected value") };
		ids.push(value.id);
		let ExpressionKind::Binary { left, right, .. } = &value.kind else { panic!("expected binary") };
		ids.extend([left.id, right.id]);
		let Statement::Declaration { id, .. } = &source.functions[0].statements[0] else {
			panic!("expected declaration")
		};
		ids.push(*id);
		let count = ids.len();
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), count);
	}

	#[test]
	fn parse_declarations() {
		let parsed = statements("LET x; LET y: Integer = 1; LET z = y;");
		assert_eq!(parsed.len(), 3);
		assert!(matches!(&parsed[0], Statement::Declaration { name, type_name: None, value: None, .. } if name == "x"));
		assert!(matches!(&parsed[1], Statement::Declaration { type_name: Some(t), value: Some(_), .. } if t == "Integer"));
		assert!(matches!(&parsed[2], Statement::Declaration { type_name: None, value: Some(_), .. }));
	}

	#[test]
	fn parse_assignment_and_expression_statements() {
		let parsed = statements("x = 1; l[0] = x; print(x);");
		assert!(matches!(&parsed[0], Statement::Assignment { receiver, .. } if receiver.to_string() == "x"));
		assert!(matches!(&parsed[1], Statement::Assignment { receiver, .. } if receiver.to_string() == "(index l 0)"));
		assert!(matches!(&parsed[2], Statement::Expression(call) if call.to_string() == "(call print x)"));
	}

	#[test]
	fn parse_control_flow() {
		let parsed = statements("IF x DO f(); ELSE g(); h(); END WHILE TRUE DO END RETURN 1;");
		let Statement::If { then_statements, else_statements, .. } = &parsed[0] else { panic!("expected if") };
		assert_eq!((then_statements.len(), else_statements.len()), (1, 2));
		assert!(matches!(&parsed[1], Statement::While { statements, .. } if statements.is_empty()));
		assert!(matches!(&parsed[2], Statement::Return(value) if value.to_string() == "1"));

		let parsed = statements("IF TRUE DO END");
		assert!(matches!(&parsed[0], Statement::If { then_statements, .. } if then_statements.is_empty()));
	}

	#[test]
	fn parse_switch() {
		let parsed = statements("SWITCH x CASE 1: f(); CASE 2: DEFAULT g(); END SWITCH y DEFAULT: END");
		let Statement::Switch { cases, .. } = &parsed[0] else { panic!("expected switch") };
		assert_eq!(cases.len(), 3);
		assert_eq!(cases[0].value.as_ref().map(ToString::to_string).as_deref(), Some("1"));
		assert!(cases[1].statements.is_empty());
		assert!(cases[2].value.is_none());
		assert_eq!(cases[2].statements.len(), 1);
		let Statement::Switch { cases, .. } = &parsed[1] else { panic!("expected switch") };
		assert_eq!(cases.len(), 1);
	}

	#[test]
	fn parse_errors() {
		// A switch needs a default.
		let error = source_error("FUN main() DO SWITCH x CASE 1: END END");
		assert_eq!(error.offset(), 31);
		assert_eq!(error.r#type(), &ParseErrorType::Expected { expected: "DEFAULT", found: Some("END".to_string()) });

		// Missing semicolon at the end of input.
		let error = source_error("VAL x = 1");
		assert_eq!(error.offset(), 9);
		assert_eq!(error.r#type(), &ParseErrorType::Expected { expected: ";", found: None });

		let error = source_error("FUN main() DO RETURN 1; END VAR x;");
		assert_eq!(error.offset(), 28);
		assert_eq!(error.r#type(), &ParseErrorType::TrailingToken("VAR".to_string()));

		let error = source_error("VAL = 1;");
		assert_eq!(error.offset(), 4);

		let error = source_error("FUN f() DO x = ; END");
		assert_eq!(error.offset(), 15);
		assert_eq!(error.r#type(), &ParseErrorType::Expected { expected: "an expression", found: Some(";".to_string()) });

		assert!(parser("(1 + 2").expression().is_err());
		assert!(parser("f(1,)").expression().is_err());
		assert!(parser("1 <= 2;").parse_source().is_err());
	}

	#[test]
	fn parse_empty_source() {
		let source = parse_program("");
		assert!(source.globals.is_empty() && source.functions.is_empty());
		let error = source_error("FUN");
		assert_eq!(error.offset(), 3);
	}
}
