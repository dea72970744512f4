//! Export options.

use chrono::format::{Item, StrftimeItems};

use crate::error::{Result, TransformError};

/// Calendar format used for date columns unless overridden.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Joins distinct values when an ancestor and a descendant disagree.
pub const DEFAULT_MULTI_VALUE_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// strftime-style format for date cells.
    pub date_format: String,
    /// Separator placed between conflicting propagated values.
    pub multi_value_separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            multi_value_separator: DEFAULT_MULTI_VALUE_SEPARATOR.to_string(),
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_multi_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.multi_value_separator = separator.into();
        self
    }

    /// Reject date formats chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        let invalid = self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(TransformError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }
}
