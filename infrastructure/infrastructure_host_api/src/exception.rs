//! Host Exceptions
//!
//! Exceptions raised by native code into the host runtime. Every native call
//! returns `Result<HostValue, HostException>`; an `Err` is thrown at the call
//! site and leaves no partial state behind.

/// Kind of a host exception
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Wrong argument or receiver type
    TypeError,
    /// Malformed numeric text or base
    FormatError,
    /// Argument outside its accepted range
    RangeError,
    /// Constructor input could not be turned into a value
    ConstructionError,
    /// Operation undefined for its operands
    ArithmeticError,
    /// Any other failure, including ownership misuse
    Error,
}

impl ExceptionKind {
    /// Name the host reports for this kind
    pub fn name(self) -> &'static str {
        match self {
            ExceptionKind::TypeError => "TypeError",
            ExceptionKind::FormatError => "FormatError",
            ExceptionKind::RangeError => "RangeError",
            ExceptionKind::ConstructionError => "ConstructionError",
            ExceptionKind::ArithmeticError => "ArithmeticError",
            ExceptionKind::Error => "Error",
        }
    }
}

/// Exception thrown into the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostException {
    kind: ExceptionKind,
    message: String,
}

impl HostException {
    /// Create an exception of the given kind
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::TypeError, message)
    }

    pub fn range_error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::RangeError, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Error, message)
    }

    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for HostException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind.name(), self.message)
    }
}

impl std::error::Error for HostException {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_display() {
        let err = HostException::type_error("Argument 0 must be a uint64");
        assert_eq!(err.kind(), ExceptionKind::TypeError);
        assert_eq!(err.to_string(), "TypeError: Argument 0 must be a uint64");
    }

    #[test]
    fn test_exception_kinds() {
        assert_eq!(HostException::range_error("x").kind(), ExceptionKind::RangeError);
        assert_eq!(HostException::error("x").kind(), ExceptionKind::Error);
        assert_eq!(ExceptionKind::ConstructionError.name(), "ConstructionError");
    }
}
