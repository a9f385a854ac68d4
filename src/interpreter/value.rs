use std::{cmp::Ordering, fmt::Display, ops::Mul};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};
use Value::*;

use crate::{InterpreterError, RuntimeError, parser::expression::{BinaryOperator, Literal}, utils::RcCell};

/// Value represents a runtime value in plc.
#[derive(Debug, Clone)]
pub enum Value {
	Nil,
	Boolean(bool),
	Integer(BigInt),
	Decimal(BigDecimal),
	Character(char),
	String(std::string::String),
	/// Shared by every binding holding it; element assignment is visible
	/// through all of them.
	List(RcCell<Vec<Value>>),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Nil => write!(f, "nil"),
			Boolean(b) => write!(f, "{b}"),
			Integer(n) => write!(f, "{n}"),
			Decimal(n) => write!(f, "{n}"),
			Character(c) => write!(f, "{c}"),
			String(s) => write!(f, "{s}"),
			List(elements) => {
				write!(f, "[")?;
				for (index, element) in elements.borrow().iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{element}")?;
				}
				write!(f, "]")
			}
		}
	}
}

/// Structural equality. Decimals compare by numeric value, so `1.0 == 1.00`.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Nil, Nil) => true,
			(Boolean(l), Boolean(r)) => l == r,
			(Integer(l), Integer(r)) => l == r,
			(Decimal(l), Decimal(r)) => l == r,
			(Character(l), Character(r)) => l == r,
			(String(l), String(r)) => l == r,
			(List(l), List(r)) => l.ptr_eq(r) || *l.borrow() == *r.borrow(),
			_ => false,
		}
	}
}

impl From<&Literal> for Value {
	fn from(literal: &Literal) -> Self {
		match literal {
			Literal::Nil => Nil,
			Literal::Boolean(b) => Boolean(*b),
			Literal::Integer(n) => Integer(n.clone()),
			Literal::Decimal(n) => Decimal(n.clone()),
			Literal::Character(c) => Character(*c),
			Literal::String(s) => String(s.clone()),
		}
	}
}

impl Value {
	/// The runtime type name, for error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Nil => "Nil",
			Boolean(_) => "Boolean",
			Integer(_) => "Integer",
			Decimal(_) => "Decimal",
			Character(_) => "Character",
			String(_) => "String",
			List(_) => "List",
		}
	}

	pub fn list(elements: Vec<Value>) -> Self { List(RcCell::new(elements)) }

	pub fn as_boolean(&self) -> Result<bool, RuntimeError> {
		match self {
			Boolean(b) => Ok(*b),
			other => Err(mismatch("Boolean", other)),
		}
	}

	pub fn as_integer(&self) -> Result<&BigInt, RuntimeError> {
		match self {
			Integer(n) => Ok(n),
			other => Err(mismatch("Integer", other)),
		}
	}

	pub fn as_list(&self) -> Result<&RcCell<Vec<Value>>, RuntimeError> {
		match self {
			List(elements) => Ok(elements),
			other => Err(mismatch("List", other)),
		}
	}

	/// Performs a binary operation between two already evaluated values.
	pub fn binary_op(&self, operator: BinaryOperator, right: &Self) -> Result<Value, RuntimeError> {
		use BinaryOperator::*;

		match operator {
			And => Ok(Boolean(self.as_boolean()? && right.as_boolean()?)),
			Or => Ok(Boolean(self.as_boolean()? || right.as_boolean()?)),
			Less => Ok(Boolean(self.compare(operator, right)? == Ordering::Less)),
			Greater => Ok(Boolean(self.compare(operator, right)? == Ordering::Greater)),
			Equal => Ok(Boolean(self == right)),
			NotEqual => Ok(Boolean(self != right)),
			Add => self.add(right),
			Subtract => self.arithmetic(operator, right, |l, r| l - r, |l, r| l - r),
			Multiply => self.arithmetic(operator, right, |l, r| l * r, |l, r| l * r),
			Divide => self.divide(right),
			Power => self.power(right),
		}
	}

	/// Orders two integers or two decimals.
	fn compare(&self, operator: BinaryOperator, right: &Self) -> Result<Ordering, RuntimeError> {
		match (self, right) {
			(Integer(l), Integer(r)) => Ok(l.cmp(r)),
			(Decimal(l), Decimal(r)) => Ok(l.cmp(r)),
			_ => Err(self.invalid(operator, right)),
		}
	}

	/// Concatenates when either side is a string, otherwise adds numbers.
	fn add(&self, right: &Self) -> Result<Value, RuntimeError> {
		if matches!(self, String(_)) || matches!(right, String(_)) {
			return Ok(String(format!("{self}{right}")));
		}
		self.arithmetic(BinaryOperator::Add, right, |l, r| l + r, |l, r| l + r)
	}

	fn arithmetic(
		&self,
		operator: BinaryOperator,
		right: &Self,
		integer: impl Fn(&BigInt, &BigInt) -> BigInt,
		decimal: impl Fn(&BigDecimal, &BigDecimal) -> BigDecimal,
	) -> Result<Value, RuntimeError> {
		match (self, right) {
			(Integer(l), Integer(r)) => Ok(Integer(integer(l, r))),
			(Decimal(l), Decimal(r)) => Ok(Decimal(decimal(l, r))),
			_ => Err(self.invalid(operator, right)),
		}
	}

	/// Integer division truncates; decimal division keeps the dividend's scale
	/// and rounds half to even.
	fn divide(&self, right: &Self) -> Result<Value, RuntimeError> {
		match (self, right) {
			(Integer(_), Integer(r)) if r.is_zero() => Err(InterpreterError::DivideByZero),
			(Decimal(_), Decimal(r)) if r.is_zero() => Err(InterpreterError::DivideByZero),
			(Integer(l), Integer(r)) => Ok(Integer(l / r)),
			(Decimal(l), Decimal(r)) => Ok(Decimal(divide_half_even(l, r)?)),
			_ => Err(self.invalid(BinaryOperator::Divide, right)),
		}
	}

	/// Raises an integer or decimal to a non-negative integer power.
	fn power(&self, right: &Self) -> Result<Value, RuntimeError> {
		let exponent = right.as_integer()?;
		if exponent.is_negative() {
			return Err(InterpreterError::NegativeExponent(exponent.clone()));
		}
		if !matches!(self, Integer(_) | Decimal(_)) {
			return Err(self.invalid(BinaryOperator::Power, right));
		}
		if exponent.is_zero() {
			return Ok(Integer(BigInt::one()));
		}
		let exponent = u64::try_from(exponent).map_err(|_| InterpreterError::ExponentTooLarge(exponent.clone()))?;
		match self {
			Decimal(base) => Ok(Decimal(square_and_multiply(base, exponent))),
			Integer(base) => Ok(Integer(square_and_multiply(base, exponent))),
			_ => Err(self.invalid(BinaryOperator::Power, right)),
		}
	}

	fn invalid(&self, operator: BinaryOperator, right: &Self) -> RuntimeError {
		InterpreterError::BinaryOperationError {
			operator: operator.symbol(),
			left:     self.type_name(),
			right:    right.type_name(),
		}
	}
}

fn mismatch(expected: &'static str, found: &Value) -> RuntimeError {
	InterpreterError::TypeMismatch { expected, found: found.type_name() }
}

/// Exponentiation by squaring, `O(log exponent)` multiplications.
fn square_and_multiply<T>(base: &T, mut exponent: u64) -> T
where
	T: One + Clone,
	for<'a> &'a T: Mul<&'a T, Output = T>,
{
	let mut result = T::one();
	let mut base = base.clone();
	while exponent > 0 {
		if exponent & 1 == 1 {
			result = &result * &base;
		}
		exponent >>= 1;
		if exponent > 0 {
			base = &base * &base;
		}
	}
	result
}

/// `dividend / divisor` at the dividend's scale, rounding half to even.
/// The divisor must not be zero.
fn divide_half_even(dividend: &BigDecimal, divisor: &BigDecimal) -> Result<BigDecimal, RuntimeError> {
	let (dividend_digits, scale) = dividend.as_bigint_and_exponent();
	let (divisor_digits, divisor_scale) = divisor.as_bigint_and_exponent();
	// dividend / divisor = (a / 10^sa) / (b / 10^sb), so the digits at scale sa are a * 10^sb / b.
	let shift = |exponent: i64| -> Result<BigInt, RuntimeError> {
		let exponent = usize::try_from(exponent).map_err(|_| InterpreterError::ScaleOutOfRange(exponent))?;
		Ok(num_traits::pow(BigInt::from(10), exponent))
	};
	let (numerator, denominator) = if divisor_scale >= 0 {
		(dividend_digits * shift(divisor_scale)?, divisor_digits)
	} else {
		(dividend_digits, divisor_digits * shift(-divisor_scale)?)
	};
	Ok(BigDecimal::new(round_half_even(&numerator, &denominator), scale))
}

fn round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
	let (quotient, remainder) = numerator.div_rem(denominator);
	if remainder.is_zero() {
		return quotient;
	}
	let step = if numerator.is_negative() != denominator.is_negative() { -1 } else { 1 };
	let twice_remainder: BigInt = remainder.abs() * 2;
	match twice_remainder.cmp(&denominator.abs()) {
		Ordering::Less => quotient,
		Ordering::Greater => quotient + step,
		Ordering::Equal if quotient.is_even() => quotient,
		Ordering::Equal => quotient + step,
	}
}
