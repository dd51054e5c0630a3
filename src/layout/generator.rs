// SPDX-License-Identifier: GPL-3.0-only

//! Layout generation.
//!
//! Turns a resolved input set plus the session context into the final grid
//! of sized, inset layout items:
//!
//! 1. Map the input set's characters to `Character` actions, preserving row
//!    structure and applying the current case.
//! 2. Augment the rows with mode-dependent side actions (shift or a
//!    symbol/number switch at the last character row's leading edge,
//!    backspace at its trailing edge) and append the bottom control row
//!    (primary mode switch, space, secondary switch, return).
//! 3. Compute each item's geometry: the uniform input width for character
//!    keys, fill-available for everything else, row height from the device
//!    class, and zero insets for filler/margin slots.
//!
//! Rows narrower than the widest character row are padded with `None`
//! filler at their edges rather than stretched, so character keys keep a
//! uniform width across rows.

use crate::input::set::InputSet;
use crate::layout::types::{
    Action, ActionGrid, ActionRow, EdgeInsets, ItemAlignment, ItemSize, ItemWidth, Layout,
    LayoutItem,
};
use crate::settings;
use crate::state::{KeyboardContext, KeyboardMode};

/// Strategy interface for layout generation.
///
/// Injected into the session at construction; the standard implementation
/// below covers the stock system keyboard shape.
pub trait LayoutGenerator {
    /// Produces the layout for the given context and resolved input set.
    fn layout(&self, context: &KeyboardContext, input_set: &InputSet) -> Layout;
}

/// The stock layout strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLayoutGenerator;

impl StandardLayoutGenerator {
    /// Creates the standard generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl LayoutGenerator for StandardLayoutGenerator {
    fn layout(&self, context: &KeyboardContext, input_set: &InputSet) -> Layout {
        let mut rows: ActionGrid = if context.mode.is_paged() {
            // Paged modes present their grid through the paginator; the
            // layout contributes only the bottom control row.
            Vec::new()
        } else {
            character_rows(input_set, context)
        };

        if let Some(last) = rows.last_mut() {
            augment_last_character_row(last, &context.mode);
        }
        pad_character_rows(&mut rows);
        rows.push(bottom_row(&context.mode));

        let layout = Layout::new(
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|action| layout_item(action, context))
                        .collect()
                })
                .collect(),
        );
        tracing::debug!(
            "generated {} layout rows for mode {:?} in {}",
            layout.item_rows.len(),
            context.mode,
            context.locale
        );
        layout
    }
}

/// Maps the input set to `Character` action rows, applying the current case.
fn character_rows(input_set: &InputSet, context: &KeyboardContext) -> ActionGrid {
    let case = context.case.current();
    input_set
        .rows()
        .iter()
        .map(|row| {
            row.items()
                .iter()
                .map(|item| Action::Character(item.character(case).to_string()))
                .collect()
        })
        .collect()
}

/// Inserts the mode-dependent side actions on the last character row.
fn augment_last_character_row(row: &mut ActionRow, mode: &KeyboardMode) {
    let leading = match mode {
        KeyboardMode::Alphabetic => Action::Shift,
        KeyboardMode::Numeric => Action::ModeSwitch(KeyboardMode::Symbolic),
        KeyboardMode::Symbolic => Action::ModeSwitch(KeyboardMode::Numeric),
        KeyboardMode::Custom(_) => Action::Shift,
        // Paged modes have no character rows.
        KeyboardMode::Emoji | KeyboardMode::Images => return,
    };
    row.insert(0, leading);
    row.push(Action::Backspace);
}

/// Pads pure-character rows to the widest character row with edge fillers.
///
/// Rows that already carry side actions balance themselves through their
/// fill-available widths and are left alone.
fn pad_character_rows(rows: &mut ActionGrid) {
    let widest = rows
        .iter()
        .filter(|row| row.iter().all(Action::is_character))
        .map(Vec::len)
        .max()
        .unwrap_or(0);

    for row in rows.iter_mut() {
        if !row.iter().all(Action::is_character) || row.len() >= widest {
            continue;
        }
        let deficit = widest - row.len();
        let leading = deficit / 2;
        for _ in 0..leading {
            row.insert(0, Action::None);
        }
        for _ in 0..(deficit - leading) {
            row.push(Action::None);
        }
    }
}

/// Builds the bottom control row for a mode.
fn bottom_row(mode: &KeyboardMode) -> ActionRow {
    match mode {
        KeyboardMode::Alphabetic | KeyboardMode::Custom(_) => vec![
            Action::ModeSwitch(KeyboardMode::Numeric),
            Action::Space,
            Action::ModeSwitch(KeyboardMode::Emoji),
            Action::Newline,
        ],
        KeyboardMode::Numeric | KeyboardMode::Symbolic => vec![
            Action::ModeSwitch(KeyboardMode::Alphabetic),
            Action::Space,
            Action::ModeSwitch(KeyboardMode::Emoji),
            Action::Newline,
        ],
        // Paged catalogs need a way back and a delete key.
        KeyboardMode::Emoji | KeyboardMode::Images => vec![
            Action::ModeSwitch(KeyboardMode::Alphabetic),
            Action::Space,
            Action::Backspace,
            Action::Newline,
        ],
    }
}

/// Computes the layout item for one action.
fn layout_item(action: Action, context: &KeyboardContext) -> LayoutItem {
    let width = if action.is_character() {
        ItemWidth::Input
    } else {
        ItemWidth::Available
    };
    let insets = if action.is_filler() {
        EdgeInsets::zero()
    } else {
        EdgeInsets::uniform(settings::STANDARD_KEY_INSET)
    };
    LayoutItem {
        action,
        size: ItemSize {
            width,
            height: context.device_class.row_height(),
        },
        alignment: ItemAlignment::Center,
        insets,
    }
}

// ============================================================================
// Tests
// ============================================================================
