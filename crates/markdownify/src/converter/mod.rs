//! Tree to Markdown conversion.
//!
//! [`render`] walks a [`Document`](crate::dom::Document) bottom-up and hands
//! each element's rendered children to the converter registered for its tag.

mod block;
mod inline;
mod list;
mod main;
mod registry;
mod table;

pub use block::FENCE;
pub use list::unordered_bullet;
pub use main::{prune_structural_whitespace, render, render_tree};
pub use registry::{Converter, lookup, registered_tags};
pub use table::{RowRole, row_role};
