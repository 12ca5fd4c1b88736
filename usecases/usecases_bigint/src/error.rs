//! BigInt Errors
//!
//! The error taxonomy of the big integer binding and its mapping onto host
//! exceptions.

use entities_bignum::{EngineError, ParseError};
use infrastructure_host_api::{ExceptionKind, HostException};

/// Message of the construction failure raised for unusable constructor input
pub const INVALID_CONSTRUCTOR_INPUT: &str = "invalid type passed to constructor";

/// Errors raised by big integer operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// Receiver or operand of the wrong kind
    Type(String),
    /// Malformed numeric text or base
    Format(ParseError),
    /// Argument outside its accepted range
    Range(String),
    /// Constructor input could not be normalized
    Construction(String),
    /// Operation undefined for its operands
    Arithmetic(EngineError),
}

impl BigIntError {
    /// Host exception kind this error is raised as
    pub fn kind(&self) -> ExceptionKind {
        match self {
            BigIntError::Type(_) => ExceptionKind::TypeError,
            BigIntError::Format(_) => ExceptionKind::FormatError,
            BigIntError::Range(_) => ExceptionKind::RangeError,
            BigIntError::Construction(_) => ExceptionKind::ConstructionError,
            BigIntError::Arithmetic(_) => ExceptionKind::ArithmeticError,
        }
    }

    /// Standard construction failure for unusable constructor input
    pub fn invalid_input() -> Self {
        BigIntError::Construction(INVALID_CONSTRUCTOR_INPUT.to_string())
    }
}

impl std::fmt::Display for BigIntError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BigIntError::Type(msg) => write!(f, "{}", msg),
            BigIntError::Format(err) => write!(f, "{}", err),
            BigIntError::Range(msg) => write!(f, "{}", msg),
            BigIntError::Construction(msg) => write!(f, "{}", msg),
            BigIntError::Arithmetic(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BigIntError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BigIntError::Format(err) => Some(err),
            BigIntError::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for BigIntError {
    fn from(err: ParseError) -> Self {
        BigIntError::Format(err)
    }
}

impl From<EngineError> for BigIntError {
    fn from(err: EngineError) -> Self {
        BigIntError::Arithmetic(err)
    }
}

impl From<BigIntError> for HostException {
    fn from(err: BigIntError) -> Self {
        HostException::new(err.kind(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(BigIntError::Type("x".into()).kind(), ExceptionKind::TypeError);
        assert_eq!(BigIntError::from(ParseError::Empty).kind(), ExceptionKind::FormatError);
        assert_eq!(BigIntError::Range("x".into()).kind(), ExceptionKind::RangeError);
        assert_eq!(BigIntError::invalid_input().kind(), ExceptionKind::ConstructionError);
        assert_eq!(
            BigIntError::from(EngineError::NoInverse).kind(),
            ExceptionKind::ArithmeticError
        );
    }

    #[test]
    fn test_host_exception_conversion() {
        let exception = HostException::from(BigIntError::invalid_input());
        assert_eq!(exception.kind(), ExceptionKind::ConstructionError);
        assert_eq!(exception.message(), "invalid type passed to constructor");

        let exception = HostException::from(BigIntError::from(ParseError::InvalidRadix(70)));
        assert_eq!(exception.kind(), ExceptionKind::FormatError);
        assert_eq!(
            exception.message(),
            "Base should be between 2 and 62, inclusive (got 70)"
        );
    }

    #[test]
    fn test_source() {
        use std::error::Error;
        assert!(BigIntError::from(EngineError::DivisionByZero).source().is_some());
        assert!(BigIntError::Range("x".into()).source().is_none());
    }
}
