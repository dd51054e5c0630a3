// SPDX-License-Identifier: GPL-3.0-only

//! Core layout data types.
//!
//! This module defines the action vocabulary and the sized, inset layout
//! items the generator produces. Actions are stateless tagged values,
//! compared structurally and freely reused; layout items pair an action
//! with its computed presentation geometry.

use crate::state::KeyboardMode;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Actions
// ============================================================================

/// An action a key can trigger.
///
/// `None` is the filler/margin action: it occupies grid space but does
/// nothing when touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Insert a character (already cased by layout generation).
    Character(String),
    /// Delete backward from the cursor.
    Backspace,
    /// The shift key.
    Shift,
    /// Switch the keyboard to another mode.
    ModeSwitch(KeyboardMode),
    /// Insert a space.
    Space,
    /// Insert a newline / perform the return action.
    Newline,
    /// Insert an emoji character sequence.
    Emoji(String),
    /// Select an image from a paged catalog.
    Image {
        /// Display name of the image
        name: String,
        /// Host-side identifier used to fetch the asset
        id: String,
    },
    /// Move the text cursor by an offset.
    MoveCursor(i32),
    /// Ask the host to dismiss the keyboard.
    Dismiss,
    /// Filler/margin slot; does nothing.
    #[default]
    None,
}

impl Action {
    /// Returns `true` for the filler/margin action.
    #[must_use]
    pub fn is_filler(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` for character-input actions, which get the uniform
    /// letter-key width.
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self, Self::Character(_))
    }

    /// Returns `true` for actions that fire repeatedly while held
    /// (backspace, cursor movement).
    #[must_use]
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::Backspace | Self::MoveCursor(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Character(c) => write!(f, "'{}'", c),
            Action::Backspace => write!(f, "backspace"),
            Action::Shift => write!(f, "shift"),
            Action::ModeSwitch(mode) => write!(f, "mode-switch({:?})", mode),
            Action::Space => write!(f, "space"),
            Action::Newline => write!(f, "newline"),
            Action::Emoji(e) => write!(f, "emoji({})", e),
            Action::Image { name, .. } => write!(f, "image({})", name),
            Action::MoveCursor(offset) => write!(f, "move-cursor({})", offset),
            Action::Dismiss => write!(f, "dismiss"),
            Action::None => write!(f, "none"),
        }
    }
}

/// A pre-layout row of actions.
pub type ActionRow = Vec<Action>;

/// A pre-layout grid of action rows.
pub type ActionGrid = Vec<ActionRow>;

// ============================================================================
// Layout Items
// ============================================================================

/// Width policy for a layout item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemWidth {
    /// The uniform letter-key width shared by all character keys.
    Input,
    /// Fill a proportional share of the space the input-width keys leave.
    Available,
    /// An explicit width in points.
    Points(f32),
}

/// Edge insets around a layout item, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeInsets {
    /// Inset above the item
    pub top: f32,
    /// Inset at the item's leading edge
    pub leading: f32,
    /// Inset below the item
    pub bottom: f32,
    /// Inset at the item's trailing edge
    pub trailing: f32,
}

impl EdgeInsets {
    /// Zero insets, used for filler and margin items.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// The same inset on all four edges.
    #[must_use]
    pub fn uniform(inset: f32) -> Self {
        Self {
            top: inset,
            leading: inset,
            bottom: inset,
            trailing: inset,
        }
    }

    /// Returns `true` if all edges are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.leading == 0.0 && self.bottom == 0.0 && self.trailing == 0.0
    }
}

/// Horizontal alignment of a key's content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemAlignment {
    /// Content centered in the key
    #[default]
    Center,
    /// Content aligned to the leading edge
    Leading,
    /// Content aligned to the trailing edge
    Trailing,
}

/// The computed size of a layout item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSize {
    /// Width policy
    pub width: ItemWidth,
    /// Row height in points, from the device class
    pub height: f32,
}

/// A sized, inset, positioned representation of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutItem {
    /// The action this key triggers
    pub action: Action,
    /// Computed size
    pub size: ItemSize,
    /// Content alignment
    pub alignment: ItemAlignment,
    /// Edge insets (zero for filler/margin items)
    pub insets: EdgeInsets,
}

/// One laid-out row of items.
pub type LayoutItemRow = Vec<LayoutItem>;

/// A complete keyboard layout: ordered rows of sized items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    /// The laid-out item rows, top to bottom
    pub item_rows: Vec<LayoutItemRow>,
}

impl Layout {
    /// Creates a layout from item rows.
    #[must_use]
    pub fn new(item_rows: Vec<LayoutItemRow>) -> Self {
        Self { item_rows }
    }

    /// Total height of the layout in points, including per-item insets.
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.item_rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|item| item.size.height + item.insets.top + item.insets.bottom)
                    .fold(0.0_f32, f32::max)
            })
            .sum()
    }

    /// The actions of each row, for callers that don't need geometry.
    #[must_use]
    pub fn action_rows(&self) -> ActionGrid {
        self.item_rows
            .iter()
            .map(|row| row.iter().map(|item| item.action.clone()).collect())
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Actions compare structurally.
    #[test]
    fn test_action_structural_equality() {
        assert_eq!(
            Action::Character("a".to_string()),
            Action::Character("a".to_string())
        );
        assert_ne!(
            Action::Character("a".to_string()),
            Action::Character("b".to_string())
        );
        assert_eq!(
            Action::ModeSwitch(KeyboardMode::Numeric),
            Action::ModeSwitch(KeyboardMode::Numeric)
        );
        assert_ne!(
            Action::ModeSwitch(KeyboardMode::Numeric),
            Action::ModeSwitch(KeyboardMode::Symbolic)
        );
    }

    /// Repeat behavior is limited to backspace and cursor movement.
    #[test]
    fn test_repeatable_actions() {
        assert!(Action::Backspace.is_repeatable());
        assert!(Action::MoveCursor(-1).is_repeatable());
        assert!(!Action::Character("a".to_string()).is_repeatable());
        assert!(!Action::Space.is_repeatable());
        assert!(!Action::Shift.is_repeatable());
    }

    /// Edge inset constructors.
    #[test]
    fn test_edge_insets() {
        assert!(EdgeInsets::zero().is_zero());

        let uniform = EdgeInsets::uniform(3.0);
        assert!(!uniform.is_zero());
        assert_eq!(uniform.top, 3.0);
        assert_eq!(uniform.trailing, 3.0);
    }

    /// Layout height sums the tallest item of each row plus its insets.
    #[test]
    fn test_layout_total_height() {
        let item = |height: f32| LayoutItem {
            action: Action::Space,
            size: ItemSize {
                width: ItemWidth::Available,
                height,
            },
            alignment: ItemAlignment::Center,
            insets: EdgeInsets::uniform(3.0),
        };

        let layout = Layout::new(vec![vec![item(54.0)], vec![item(54.0), item(60.0)]]);
        // Row 1: 54 + 6; row 2: tallest is 60 + 6.
        assert_eq!(layout.total_height(), 54.0 + 6.0 + 60.0 + 6.0);
    }

    /// Action serialization round-trips through JSON.
    #[test]
    fn test_action_serde_round_trip() {
        let actions = vec![
            Action::Character("ß".to_string()),
            Action::Backspace,
            Action::ModeSwitch(KeyboardMode::Custom("math".to_string())),
            Action::Image {
                name: "cat".to_string(),
                id: "img-7".to_string(),
            },
            Action::None,
        ];

        let json = serde_json::to_string(&actions).expect("should serialize");
        let parsed: Vec<Action> = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(parsed, actions, "round trip should preserve every variant");
    }
}
