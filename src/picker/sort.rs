//! Column sorting for the file panel.
//!
//! Only one column orders the list at a time. Clicking a header toggles that
//! column between descending and ascending and clears whatever column was
//! active before.

use crate::picker::listing::FileEntry;
use std::cmp::Ordering;

/// File panel column that can order the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Size,
    Type,
    Date,
}

impl SortKey {
    /// Header label for the column.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "File",
            SortKey::Size => "Size",
            SortKey::Type => "Type",
            SortKey::Date => "Date",
        }
    }

    /// All columns, in header order.
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Name, SortKey::Size, SortKey::Type, SortKey::Date]
    }

    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Type => a.extension.to_lowercase().cmp(&b.extension.to_lowercase()),
            SortKey::Date => a.modified.cmp(&b.modified),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort, if any.
///
/// Holding a single optional `(key, direction)` pair makes "at most one
/// column is sorted" impossible to violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder(Option<(SortKey, SortDirection)>);

impl SortOrder {
    /// No column active; files keep their enumeration order.
    pub const fn none() -> Self {
        Self(None)
    }

    pub const fn by(key: SortKey, direction: SortDirection) -> Self {
        Self(Some((key, direction)))
    }

    pub fn key(&self) -> Option<SortKey> {
        self.0.map(|(key, _)| key)
    }

    /// Direction of `key`, or `None` when that column is unset.
    pub fn direction_of(&self, key: SortKey) -> Option<SortDirection> {
        match self.0 {
            Some((active, direction)) if active == key => Some(direction),
            _ => None,
        }
    }

    /// Handle a click on the `key` header.
    ///
    /// The clicked column cycles unset -> descending -> ascending ->
    /// descending; every other column becomes unset.
    pub fn toggle(&mut self, key: SortKey) {
        let direction = match self.direction_of(key) {
            Some(SortDirection::Descending) => SortDirection::Ascending,
            _ => SortDirection::Descending,
        };
        self.0 = Some((key, direction));
    }

    /// Order `files` in place.
    ///
    /// Ascending is a stable sort, so ties keep enumeration order.
    /// Descending reverses the ascending result, which keeps the two
    /// directions exact mirrors of each other.
    pub fn sort_files(&self, files: &mut [FileEntry]) {
        let Some((key, direction)) = self.0 else {
            return;
        };
        files.sort_by(|a, b| key.compare(a, b));
        if direction == SortDirection::Descending {
            files.reverse();
        }
    }
}
