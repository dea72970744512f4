//! Polars `AnyValue` conversions for observation fields.

use polars::prelude::*;

use packer_model::format_number;

/// Text of a cell; empty for null, floats without a trailing `.0`.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_number(f64::from(v)),
        AnyValue::Float64(v) => format_number(v),
        other => other.to_string(),
    }
}

/// Cell text, `None` when blank.
pub fn any_to_text(value: AnyValue<'_>) -> Option<String> {
    Some(any_to_string(value)).filter(|text| !text.trim().is_empty())
}

/// Numeric cell value; strings are parsed.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        other => other.extract::<f64>(),
    }
}

/// Trimmed decimal parse; blank and malformed text is `None`.
pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_to_string() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_string(AnyValue::Float64(42.0)), "42");
        assert_eq!(any_to_string(AnyValue::Int32(7)), "7");
        assert_eq!(any_to_string(AnyValue::String("P1")), "P1");
        assert_eq!(any_to_text(AnyValue::String("  ")), None);
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::String(" 2.5 ")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::Int64(3)), Some(3.0));
        assert_eq!(any_to_f64(AnyValue::String("NA")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }
}
