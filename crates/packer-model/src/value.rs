//! Cell values of observation and export tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
///
/// Observations carry either text or a number; cells without an observation
/// are `Missing`. After formatting every cell is `Text`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Missing,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Text cell, or `Missing` for an empty string.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(value)
        }
    }

    /// True for `Missing` and for empty text.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Presentation string: empty for missing, numbers without spurious decimals.
    pub fn render(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => format_number(*value),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

/// Formats a number without a trailing `.0` for integral values.
///
/// # Examples
///
/// ```
/// use packer_model::format_number;
///
/// assert_eq!(format_number(30.0), "30");
/// assert_eq!(format_number(2.00001), "2.00001");
/// assert_eq!(format_number(-7.5), "-7.5");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
