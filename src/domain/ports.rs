use crate::utils::error::Result;

/// Backing store for the serialized contact list.
///
/// Every `write` replaces the previous contents in full; there are no
/// partial or incremental writes.
pub trait Storage {
    /// Returns `None` when the backing resource does not exist yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;

    fn write(&self, data: &[u8]) -> Result<()>;

    /// Human-readable location, used in logs and messages.
    fn location(&self) -> String;
}
