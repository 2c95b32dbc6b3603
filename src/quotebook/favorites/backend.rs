use crate::error::Result;

/// Raw persistence for the favorites collection.
///
/// A backend stores one opaque text document (the serialized favorites list)
/// and knows nothing about its shape. [`super::FavoritesStore`] owns parsing,
/// membership rules and change notification.
pub trait FavoritesBackend {
    /// Read the stored document.
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    /// MUST be atomic so readers never observe a partial write.
    fn write(&self, text: &str) -> Result<()>;
}
