// SPDX-License-Identifier: GPL-3.0-only

//! Layout generation and paged grids.
//!
//! This module turns resolved input sets into renderable key grids and
//! arranges flat action catalogs into fixed-size pages.
//!
//! # Features
//!
//! - **Action vocabulary**: the structural [`Action`] values keys trigger
//! - **Layout generation**: input set + context → sized, inset
//!   [`LayoutItem`] rows, with mode-dependent side actions and the bottom
//!   control row
//! - **Paged grids**: evening, chunking, and column-major rearrangement of
//!   emoji/image catalogs, with category page-range bookkeeping
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use glyphboard::layout::{LayoutGenerator, StandardLayoutGenerator, PagedCatalog};
//! use glyphboard::input::InputSetResolver;
//! use glyphboard::state::{KeyboardContext, KeyboardMode};
//!
//! let mut resolver = InputSetResolver::standard();
//! let context = KeyboardContext::default();
//! let set = resolver.input_set(&context.mode, &context.locale);
//! let layout = StandardLayoutGenerator::new().layout(&context, set);
//!
//! let mut catalog = PagedCatalog::new(24, 4);
//! catalog.append_category("smileys", smiley_actions);
//! let pages = catalog.pages();
//! ```

// Sub-modules
pub mod generator;
pub mod paging;
pub mod types;

// Re-export public API
pub use generator::{LayoutGenerator, StandardLayoutGenerator};
pub use paging::{paginate, Page, PagedCatalog};
pub use types::{
    Action, ActionGrid, ActionRow, EdgeInsets, ItemAlignment, ItemSize, ItemWidth, Layout,
    LayoutItem, LayoutItemRow,
};

// ============================================================================
// Module Tests
// ============================================================================
