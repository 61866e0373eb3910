use crate::domain::entry::EntryId;

/// Identifies entries that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> EntryId;
}

/// Anything carrying a monetary amount that can be totalled.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Entries stamped with a formatted timestamp. `None` when the stored
/// record never had one.
pub trait Dated {
    fn date(&self) -> Option<&str>;
}

/// Case-insensitive free-text matching used by the search view.
pub trait Searchable {
    /// `needle` is expected to be lower-cased already.
    fn matches(&self, needle: &str) -> bool;
}

pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
