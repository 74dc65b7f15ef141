pub mod address_book;
pub mod codec;

pub use crate::domain::model::{Contact, ContactField, SearchField, SortOrder};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
