//! Table item identification.
//!
//! Card values repeat across the table (two sevens, a build of seven and a
//! seven), so selection and removal never compare items by value. Every
//! table item gets an `ItemId` when it lands on the table.
//!
//! ## Allocation
//!
//! Ids are allocated monotonically by the `GameState` that owns the table.
//! An id is never reused within one game, even after its item is captured.
//!
//! ```
//! use omlongo::core::ItemId;
//!
//! let first = ItemId::FIRST;
//! assert_eq!(first.next(), ItemId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an item on the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The first id handed out in a fresh game.
    pub const FIRST: ItemId = ItemId(0);

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}
