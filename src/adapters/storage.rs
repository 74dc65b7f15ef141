use crate::domain::ports::Storage;
use crate::utils::error::{AddressBookError, Result};
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONTACTS_FILE: &str = "contacts.json";

/// 本機檔案儲存，每次寫入都直接覆寫整個檔案 (非原子操作)
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, source: std::io::Error) -> AddressBookError {
        AddressBookError::StorageError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACTS_FILE)
    }
}

impl Storage for LocalStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.storage_error(e)),
        }
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
            }
        }

        fs::write(&self.path, data).map_err(|e| self.storage_error(e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// 記憶體內儲存，供嵌入使用及測試
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: RefCell<Option<Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: Vec<u8>) -> Self {
        Self {
            contents: RefCell::new(Some(data)),
        }
    }

    /// 最後一次寫入的內容，從未寫入時為 `None`
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.contents.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        *self.contents.borrow_mut() = Some(data.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
