//! The shared table and the items that lie on it.
//!
//! - `TableItem` / `TableItemKind`: loose card, build or pair
//! - `Table`: id-keyed arena; selection and removal always go through ids

pub mod arena;
pub mod item;

pub use arena::Table;
pub use item::{Build, Members, Pair, TableItem, TableItemKind};
