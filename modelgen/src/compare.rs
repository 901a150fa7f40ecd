//! # Compare Module
//!
//! Comparison predicates over dynamically typed template values. A value is first
//! classified into a [`Kind`]; two values are only comparable when their kinds
//! match, and bool/complex values have no ordering.

use std::fmt;

use crate::error::{Error, Result};
use crate::template::Value;

/// Coarse category of a comparable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Complex,
    Int,
    Uint,
    Float,
    String,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Bool => "bool",
            Kind::Complex => "complex",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::String => "string",
        })
    }
}

/// Classifies a value, failing for values that cannot take part in a comparison.
pub fn kind_of(value: &Value<'_>) -> Result<Kind> {
    match value {
        Value::Bool(_) => Ok(Kind::Bool),
        Value::Complex(..) => Ok(Kind::Complex),
        Value::Int(_) => Ok(Kind::Int),
        Value::Uint(_) => Ok(Kind::Uint),
        Value::Float(_) => Ok(Kind::Float),
        Value::Str(_) => Ok(Kind::String),
        other => Err(Error::UnsupportedKind(other.type_name().to_string())),
    }
}

/// Evaluates `a == b || a == c || ...`.
pub fn eq(a: &Value<'_>, candidates: &[Value<'_>]) -> Result<bool> {
    let k1 = kind_of(a)?;
    if candidates.is_empty() {
        return Err(Error::MissingOperand);
    }

    for b in candidates {
        let k2 = kind_of(b)?;
        if k1 != k2 {
            return Err(Error::IncompatibleKinds { left: k1, right: k2 });
        }

        let truth = match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Complex(xr, xi), Value::Complex(yr, yi)) => xr == yr && xi == yi,
            (Value::Float(x), Value::Float(y)) => x == y,
            (Value::Int(x), Value::Int(y)) => x == y,
            (Value::Uint(x), Value::Uint(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => x == y,
            _ => false,
        };

        if truth {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Evaluates `a < b`.
pub fn lt(a: &Value<'_>, b: &Value<'_>) -> Result<bool> {
    let k1 = kind_of(a)?;
    let k2 = kind_of(b)?;
    if k1 != k2 {
        return Err(Error::IncompatibleKinds { left: k1, right: k2 });
    }

    match (a, b) {
        (Value::Float(x), Value::Float(y)) => Ok(x < y),
        (Value::Int(x), Value::Int(y)) => Ok(x < y),
        (Value::Uint(x), Value::Uint(y)) => Ok(x < y),
        (Value::Str(x), Value::Str(y)) => Ok(x < y),
        _ => Err(Error::UnsupportedKind(k1.to_string())),
    }
}

/// Evaluates `a <= b` as `a < b || a == b`.
pub fn le(a: &Value<'_>, b: &Value<'_>) -> Result<bool> {
    if lt(a, b)? {
        return Ok(true);
    }
    eq(a, std::slice::from_ref(b))
}

/// Evaluates `a > b` as the negation of `a <= b`.
pub fn gt(a: &Value<'_>, b: &Value<'_>) -> Result<bool> {
    Ok(!le(a, b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(value: impl Into<Value<'static>>) -> Value<'static> {
        value.into()
    }

    #[test]
    fn classifies_scalars() {
        assert_eq!(kind_of(&v(true)).ok(), Some(Kind::Bool));
        assert_eq!(kind_of(&v(3)).ok(), Some(Kind::Int));
        assert_eq!(kind_of(&v(3u64)).ok(), Some(Kind::Uint));
        assert_eq!(kind_of(&v(1.5)).ok(), Some(Kind::Float));
        assert_eq!(kind_of(&Value::Complex(1.0, 2.0)).ok(), Some(Kind::Complex));
        assert_eq!(kind_of(&v("x")).ok(), Some(Kind::String));
    }

    #[test]
    fn rejects_aggregates_and_null() {
        assert!(matches!(kind_of(&Value::Null), Err(Error::UnsupportedKind(_))));
        assert!(matches!(kind_of(&Value::List(vec![])), Err(Error::UnsupportedKind(_))));
    }

    #[test]
    fn eq_matches_any_candidate() -> Result<()> {
        assert!(eq(&v(5), &[v(5)])?);
        assert!(eq(&v("a"), &[v("b"), v("a")])?);
        assert!(!eq(&v("a"), &[v("b"), v("c")])?);
        assert!(eq(&Value::Complex(1.0, -1.0), &[Value::Complex(1.0, -1.0)])?);
        Ok(())
    }

    #[test]
    fn eq_requires_a_candidate() {
        assert!(matches!(eq(&v(1), &[]), Err(Error::MissingOperand)));
    }

    #[test]
    fn eq_rejects_mixed_kinds() {
        let err = eq(&v(1), &[v(1u64)]);
        assert!(matches!(err, Err(Error::IncompatibleKinds { left: Kind::Int, right: Kind::Uint })));
    }

    #[test]
    fn eq_stops_at_first_match_before_bad_candidate() -> Result<()> {
        assert!(eq(&v(1), &[v(1), v("x")])?);
        Ok(())
    }

    #[test]
    fn lt_orders_numbers_and_strings() -> Result<()> {
        assert!(lt(&v(1), &v(2))?);
        assert!(!lt(&v(2), &v(2))?);
        assert!(lt(&v(1.5), &v(2.5))?);
        assert!(lt(&v("abc"), &v("abd"))?);
        assert!(lt(&v(1u64), &v(9u64))?);
        Ok(())
    }

    #[test]
    fn lt_rejects_mixed_kinds() {
        assert!(matches!(lt(&v(1), &v("x")), Err(Error::IncompatibleKinds { .. })));
    }

    #[test]
    fn lt_rejects_unordered_kinds() {
        assert!(matches!(lt(&v(true), &v(false)), Err(Error::UnsupportedKind(_))));
        assert!(matches!(
            lt(&Value::Complex(0.0, 1.0), &Value::Complex(1.0, 0.0)),
            Err(Error::UnsupportedKind(_))
        ));
    }

    #[test]
    fn le_and_gt() -> Result<()> {
        assert!(le(&v(2), &v(2))?);
        assert!(le(&v(1), &v(2))?);
        assert!(!le(&v(3), &v(2))?);
        assert!(gt(&v(3), &v(0))?);
        assert!(!gt(&v(0), &v(0))?);
        Ok(())
    }

    #[test]
    fn gt_propagates_errors() {
        assert!(matches!(gt(&v(true), &v(true)), Err(Error::UnsupportedKind(_))));
        assert!(matches!(gt(&v(1), &v(1.0)), Err(Error::IncompatibleKinds { .. })));
    }
}
