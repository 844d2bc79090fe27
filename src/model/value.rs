use std::fmt;

/// A decoded scalar argument, as handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Float32(f32),
    Float64(f64),
    Str(String),
}

impl Value {
    /// Only `Int32` is accepted where a function asks for an integer.
    pub fn as_int32(&self) -> Option<i32> {
        match self {
            Value::Int32(value) => Some(*value),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Byte(_) => "Byte",
            Value::Int16(_) => "Int16",
            Value::UInt16(_) => "UInt16",
            Value::Int32(_) => "Int32",
            Value::UInt32(_) => "UInt32",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Str(_) => "String",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{v}"),
            Value::Int16(v) => write!(f, "{v}"),
            Value::UInt16(v) => write!(f, "{v}"),
            Value::Int32(v) => write!(f, "{v}"),
            Value::UInt32(v) => write!(f, "{v}"),
            Value::Float32(v) => write!(f, "{v}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "\"{v}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_int32_counts_as_integer() {
        assert_eq!(Value::Int32(-7).as_int32(), Some(-7));
        assert_eq!(Value::Int16(7).as_int32(), None);
        assert_eq!(Value::UInt32(7).as_int32(), None);
        assert_eq!(Value::Float64(7.0).as_int32(), None);
        assert_eq!(Value::Str("7".to_string()).as_int32(), None);
    }

    #[test]
    fn display_quotes_strings() {
        assert_eq!(Value::Str("abc".to_string()).to_string(), "\"abc\"");
        assert_eq!(Value::Float64(1.5).to_string(), "1.5");
        assert_eq!(Value::Int32(42).type_name(), "Int32");
    }
}
