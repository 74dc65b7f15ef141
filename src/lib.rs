pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::export::{export_delimited, ExportFormat};
pub use adapters::storage::{LocalStorage, MemoryStorage, DEFAULT_CONTACTS_FILE};
pub use core::address_book::{AddressBook, Outcome, Rejection};
pub use domain::model::{Contact, ContactField, SearchField, SortOrder};
pub use domain::ports::Storage;
pub use utils::error::{AddressBookError, Result};
