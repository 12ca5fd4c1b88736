//! Host Values
//!
//! Dynamically typed values of the host runtime, callable host functions and
//! the `ToNumber` / `ToString` coercions native code uses to read loosely
//! typed results.

use std::sync::Arc;

use crate::call_context::CallContext;
use crate::class_template::ClassTemplate;
use crate::exception::HostException;
use crate::external::ExternalHandle;
use crate::host_object::HostObject;

/// Body of a native host function
pub type NativeFn = dyn Fn(&CallContext) -> Result<HostValue, HostException> + Send + Sync;

/// A host value
#[derive(Clone, Debug, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Object(HostObject),
    Function(HostFunction),
    External(ExternalHandle),
}

impl HostValue {
    /// Name of the value's type as the host reports it
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Undefined => "undefined",
            HostValue::Null => "null",
            HostValue::Boolean(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::Object(_) => "object",
            HostValue::Function(_) => "function",
            HostValue::External(_) => "external",
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, HostValue::Undefined)
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            HostValue::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&HostFunction> {
        match self {
            HostValue::Function(function) => Some(function),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(text) => Some(text),
            _ => None,
        }
    }

    /// `ToNumber` coercion
    ///
    /// Strings are trimmed; empty text is 0, `0x`/`0o`/`0b` prefixes are read
    /// as unsigned integers and anything unparsable is NaN. Objects, functions
    /// and externals coerce to NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            HostValue::Undefined => f64::NAN,
            HostValue::Null => 0.0,
            HostValue::Boolean(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            HostValue::Number(n) => *n,
            HostValue::String(text) => string_to_number(text),
            HostValue::Object(_) | HostValue::Function(_) | HostValue::External(_) => f64::NAN,
        }
    }

    /// `ToString` coercion
    pub fn to_display_string(&self) -> String {
        match self {
            HostValue::Undefined => "undefined".to_string(),
            HostValue::Null => "null".to_string(),
            HostValue::Boolean(flag) => flag.to_string(),
            HostValue::Number(n) => number_to_string(*n),
            HostValue::String(text) => text.clone(),
            HostValue::Object(_) => "[object Object]".to_string(),
            HostValue::Function(function) => {
                format!("function {}() {{ [native code] }}", function.name())
            }
            HostValue::External(_) => "[object External]".to_string(),
        }
    }
}

impl From<&str> for HostValue {
    fn from(text: &str) -> Self {
        HostValue::String(text.to_string())
    }
}

impl From<String> for HostValue {
    fn from(text: String) -> Self {
        HostValue::String(text)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<bool> for HostValue {
    fn from(flag: bool) -> Self {
        HostValue::Boolean(flag)
    }
}

impl From<HostObject> for HostValue {
    fn from(object: HostObject) -> Self {
        HostValue::Object(object)
    }
}

impl From<HostFunction> for HostValue {
    fn from(function: HostFunction) -> Self {
        HostValue::Function(function)
    }
}

impl From<ExternalHandle> for HostValue {
    fn from(handle: ExternalHandle) -> Self {
        HostValue::External(handle)
    }
}

/// A callable host function
#[derive(Clone)]
pub enum HostFunction {
    /// Plain native function
    Native { name: Arc<str>, body: Arc<NativeFn> },
    /// Constructor of a class
    Class(Arc<ClassTemplate>),
}

impl HostFunction {
    /// Create a plain native function
    pub fn native<F>(name: &str, body: F) -> Self
    where
        F: Fn(&CallContext) -> Result<HostValue, HostException> + Send + Sync + 'static,
    {
        HostFunction::Native {
            name: Arc::from(name),
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            HostFunction::Native { name, .. } => name,
            HostFunction::Class(template) => template.name(),
        }
    }

    /// Call the function with an explicit receiver
    ///
    /// Calling a class constructor this way is a non-construct call.
    pub fn call(&self, this: HostValue, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        match self {
            HostFunction::Native { body, .. } => body(&CallContext::new(this, args, false, None)),
            HostFunction::Class(template) => template.call(this, args),
        }
    }

    /// Invoke the function as a constructor
    ///
    /// # Returns
    ///
    /// * `Ok(HostValue)` - The constructed instance
    /// * `Err(HostException)` - Constructor threw, or the function is not a
    ///   class constructor (`TypeError`)
    pub fn construct(&self, args: Vec<HostValue>) -> Result<HostValue, HostException> {
        match self {
            HostFunction::Native { name, .. } => Err(HostException::type_error(format!(
                "{} is not a constructor",
                name
            ))),
            HostFunction::Class(template) => template.new_instance(args),
        }
    }

    /// Check whether two functions are the same function
    pub fn ptr_eq(&self, other: &HostFunction) -> bool {
        match (self, other) {
            (HostFunction::Native { body: a, .. }, HostFunction::Native { body: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (HostFunction::Class(a), HostFunction::Class(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostFunction::Native { name, .. } => write!(f, "HostFunction::Native({})", name),
            HostFunction::Class(template) => write!(f, "HostFunction::Class({})", template.name()),
        }
    }
}

fn string_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix)
                .map(|n| n as f64)
                .unwrap_or(f64::NAN);
        }
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust accepts spellings like "inf" and "nan" that the host does not
        _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if n.fract() == 0.0 && magnitude < 1e21 {
        return format!("{:.0}", n);
    }
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }
    // Exponent form: 1e21 -> 1e+21, 1.5e-7 -> 1.5e-7
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_display() {
        assert_eq!(HostValue::Number(42.0).to_display_string(), "42");
        assert_eq!(HostValue::Number(-0.0).to_display_string(), "0");
        assert_eq!(HostValue::Number(1.5).to_display_string(), "1.5");
        assert_eq!(HostValue::Number(f64::NAN).to_display_string(), "NaN");
        assert_eq!(HostValue::Number(f64::NEG_INFINITY).to_display_string(), "-Infinity");
        assert_eq!(
            HostValue::Number(9007199254740993.0).to_display_string(),
            "9007199254740992"
        );
        assert_eq!(HostValue::Number(1e21).to_display_string(), "1e+21");
        assert_eq!(HostValue::Number(1.5e-7).to_display_string(), "1.5e-7");
    }

    #[test]
    fn test_other_display() {
        assert_eq!(HostValue::Undefined.to_display_string(), "undefined");
        assert_eq!(HostValue::Null.to_display_string(), "null");
        assert_eq!(HostValue::Boolean(true).to_display_string(), "true");
        assert_eq!(HostValue::from("abc").to_display_string(), "abc");
        assert_eq!(
            HostValue::Object(HostObject::new()).to_display_string(),
            "[object Object]"
        );
    }

    #[test]
    fn test_to_number() {
        assert!(HostValue::Undefined.to_number().is_nan());
        assert_eq!(HostValue::Null.to_number(), 0.0);
        assert_eq!(HostValue::Boolean(true).to_number(), 1.0);
        assert_eq!(HostValue::from(" 16 ").to_number(), 16.0);
        assert_eq!(HostValue::from("").to_number(), 0.0);
        assert_eq!(HostValue::from("0x10").to_number(), 16.0);
        assert_eq!(HostValue::from("1e3").to_number(), 1000.0);
        assert!(HostValue::from("inf").to_number().is_nan());
        assert!(HostValue::from("12px").to_number().is_nan());
        assert!(HostValue::Object(HostObject::new()).to_number().is_nan());
    }

    #[test]
    fn test_native_function_call() {
        let double = HostFunction::native("double", |ctx| {
            Ok(HostValue::Number(ctx.arg(0).to_number() * 2.0))
        });
        let result = double.call(HostValue::Undefined, vec![HostValue::Number(4.0)]);
        assert!(matches!(result, Ok(HostValue::Number(n)) if n == 8.0));
        assert_eq!(double.name(), "double");
        assert!(double.ptr_eq(&double.clone()));
    }

    #[test]
    fn test_native_function_is_not_constructor() {
        let f = HostFunction::native("f", |_| Ok(HostValue::Undefined));
        let err = f.construct(vec![]).unwrap_err();
        assert_eq!(err.message(), "f is not a constructor");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(HostValue::default().type_name(), "undefined");
        assert_eq!(HostValue::from(1.0).type_name(), "number");
        assert_eq!(HostValue::from(ExternalHandle::new(1u8)).type_name(), "external");
    }
}
