// SPDX-License-Identifier: GPL-3.0-only

//! Input set data model.
//!
//! An [`InputSet`] is the locale-specific character table for one keyboard
//! mode: ordered rows of items, each with neutral, uppercase, and lowercase
//! variants. Sets are immutable once constructed and validated at
//! construction time; a malformed table is a programmer error caught here,
//! not handled at runtime.

use crate::input::case::KeyboardCase;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Error Handling
// ============================================================================

/// Error type for input set construction and loading.
#[derive(Debug)]
pub enum InputSetError {
    /// The set has no rows at all.
    EmptySet,

    /// A row contains no items.
    EmptyRow {
        /// Zero-based index of the offending row
        row_index: usize,
    },

    /// A non-letter item declares differing upper/lower variants.
    MismatchedVariants {
        /// Zero-based row index
        row_index: usize,
        /// Zero-based item index within the row
        item_index: usize,
        /// The item's neutral form, for the error message
        neutral: String,
    },

    /// JSON parsing error while loading a table definition.
    Json {
        /// The underlying JSON parsing error
        source: serde_json::Error,
    },
}

impl fmt::Display for InputSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSetError::EmptySet => write!(f, "input set has no rows"),
            InputSetError::EmptyRow { row_index } => {
                write!(f, "input set row {} is empty", row_index)
            }
            InputSetError::MismatchedVariants {
                row_index,
                item_index,
                neutral,
            } => write!(
                f,
                "non-letter item '{}' at row {}, index {} has differing upper/lower variants",
                neutral, row_index, item_index
            ),
            InputSetError::Json { source } => {
                write!(f, "JSON parsing error in input set definition: {}", source)
            }
        }
    }
}

impl std::error::Error for InputSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputSetError::Json { source } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for InputSetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json { source: err }
    }
}

// ============================================================================
// Data Model
// ============================================================================

/// One key's worth of input characters, in all case variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputItem {
    /// The form shown when no casing applies.
    neutral: String,
    /// The uppercase variant.
    upper: String,
    /// The lowercase variant.
    lower: String,
}

impl InputItem {
    /// Creates an item with explicit variants.
    #[must_use]
    pub fn new(
        neutral: impl Into<String>,
        upper: impl Into<String>,
        lower: impl Into<String>,
    ) -> Self {
        Self {
            neutral: neutral.into(),
            upper: upper.into(),
            lower: lower.into(),
        }
    }

    /// Creates an item from a single character, deriving case variants.
    ///
    /// Letters get their Unicode upper/lower mappings; everything else has
    /// identical variants.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            neutral: c.to_string(),
            upper: c.to_uppercase().to_string(),
            lower: c.to_lowercase().to_string(),
        }
    }

    /// Creates an uncased item where all three variants are the same.
    #[must_use]
    pub fn symbol(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            neutral: text.clone(),
            upper: text.clone(),
            lower: text,
        }
    }

    /// Returns the character for the given keyboard case.
    ///
    /// `Auto` and `Lowercased` select the lower variant; `Uppercased` and
    /// `CapsLocked` select the upper variant. Applying the same case twice
    /// yields the same character.
    #[must_use]
    pub fn character(&self, case: KeyboardCase) -> &str {
        match case {
            KeyboardCase::Auto | KeyboardCase::Lowercased => &self.lower,
            KeyboardCase::Uppercased | KeyboardCase::CapsLocked => &self.upper,
        }
    }

    /// Returns the neutral form.
    #[must_use]
    pub fn neutral(&self) -> &str {
        &self.neutral
    }

    /// Returns `true` if the variants actually differ by case.
    #[must_use]
    pub fn is_cased(&self) -> bool {
        self.upper != self.lower
    }

    /// Returns `true` if the neutral form contains at least one letter.
    fn has_letter(&self) -> bool {
        self.neutral.chars().any(char::is_alphabetic)
    }
}

/// An ordered row of input items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRow {
    items: Vec<InputItem>,
}

impl InputRow {
    /// Creates a row from pre-built items.
    #[must_use]
    pub fn new(items: Vec<InputItem>) -> Self {
        Self { items }
    }

    /// Creates a row from a string of single-character keys.
    ///
    /// Each character becomes one item with derived case variants, so
    /// `InputRow::from_chars("qwertyuiop")` builds a ten-key row.
    #[must_use]
    pub fn from_chars(chars: &str) -> Self {
        Self {
            items: chars.chars().map(InputItem::from_char).collect(),
        }
    }

    /// Returns the items in this row.
    #[must_use]
    pub fn items(&self) -> &[InputItem] {
        &self.items
    }

    /// Returns the number of items in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the row has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A validated, immutable character table for one keyboard mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    rows: Vec<InputRow>,
}

impl InputSet {
    /// Creates a set from rows, validating its invariants.
    ///
    /// Fails if the set or any row is empty, or if a non-letter item has
    /// differing upper/lower variants.
    pub fn new(rows: Vec<InputRow>) -> Result<Self, InputSetError> {
        if rows.is_empty() {
            return Err(InputSetError::EmptySet);
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(InputSetError::EmptyRow { row_index });
            }
            for (item_index, item) in row.items().iter().enumerate() {
                if !item.has_letter() && item.is_cased() {
                    return Err(InputSetError::MismatchedVariants {
                        row_index,
                        item_index,
                        neutral: item.neutral.clone(),
                    });
                }
            }
        }

        Ok(Self { rows })
    }

    /// Creates a set from rows of single-character strings.
    ///
    /// Convenience for the common table shape:
    /// `InputSet::from_rows(&["qwertyuiop", "asdfghjkl", "zxcvbnm"])`.
    pub fn from_rows(rows: &[&str]) -> Result<Self, InputSetError> {
        Self::new(rows.iter().map(|chars| InputRow::from_chars(chars)).collect())
    }

    /// Returns the rows of this set.
    #[must_use]
    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    /// Returns the widest row's item count.
    #[must_use]
    pub fn widest_row_len(&self) -> usize {
        self.rows.iter().map(InputRow::len).max().unwrap_or(0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Items derived from letters carry proper case variants.
    #[test]
    fn test_item_from_char_derives_cases() {
        let item = InputItem::from_char('a');
        assert_eq!(item.character(KeyboardCase::Lowercased), "a");
        assert_eq!(item.character(KeyboardCase::Uppercased), "A");
        assert_eq!(item.character(KeyboardCase::Auto), "a", "auto selects lower");
        assert_eq!(
            item.character(KeyboardCase::CapsLocked),
            "A",
            "caps lock selects upper"
        );
        assert!(item.is_cased());

        // Non-letters have identical variants.
        let digit = InputItem::from_char('7');
        assert_eq!(digit.character(KeyboardCase::Uppercased), "7");
        assert!(!digit.is_cased());
    }

    /// Casing application is idempotent.
    #[test]
    fn test_casing_idempotent() {
        let set = InputSet::from_rows(&["abc"]).expect("valid set");
        for case in [
            KeyboardCase::Auto,
            KeyboardCase::Lowercased,
            KeyboardCase::Uppercased,
            KeyboardCase::CapsLocked,
        ] {
            let first: Vec<&str> = set.rows()[0]
                .items()
                .iter()
                .map(|i| i.character(case))
                .collect();
            let second: Vec<&str> = set.rows()[0]
                .items()
                .iter()
                .map(|i| i.character(case))
                .collect();
            assert_eq!(
                first, second,
                "applying {:?} twice should yield identical characters",
                case
            );
        }
    }

    /// Construction rejects empty sets and empty rows.
    #[test]
    fn test_validation_rejects_empty() {
        let empty_set = InputSet::new(Vec::new());
        assert!(
            matches!(empty_set, Err(InputSetError::EmptySet)),
            "empty set should be rejected"
        );

        let empty_row = InputSet::new(vec![
            InputRow::from_chars("abc"),
            InputRow::new(Vec::new()),
        ]);
        assert!(
            matches!(empty_row, Err(InputSetError::EmptyRow { row_index: 1 })),
            "empty row should be rejected with its index"
        );
    }

    /// Construction rejects non-letter items with differing variants.
    #[test]
    fn test_validation_rejects_mismatched_symbol_variants() {
        let bad = InputSet::new(vec![InputRow::new(vec![InputItem::new("1", "!", "1")])]);
        match bad {
            Err(InputSetError::MismatchedVariants {
                row_index,
                item_index,
                neutral,
            }) => {
                assert_eq!(row_index, 0);
                assert_eq!(item_index, 0);
                assert_eq!(neutral, "1");
            }
            other => panic!("expected MismatchedVariants, got {:?}", other),
        }

        // Letters with differing variants are of course fine.
        let good = InputSet::new(vec![InputRow::new(vec![InputItem::new("a", "A", "a")])]);
        assert!(good.is_ok(), "cased letters should validate");
    }

    /// Error messages carry enough context to locate the problem.
    #[test]
    fn test_error_display() {
        let err = InputSetError::MismatchedVariants {
            row_index: 2,
            item_index: 5,
            neutral: "@".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'@'"), "message should name the item");
        assert!(message.contains("row 2"), "message should name the row");
    }
}
