use std::path::PathBuf;

use thiserror::Error;

use self::{file::FileStorage, memory::MemoryStorage};

pub mod file;
pub mod memory;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Unable to initialize storage: {0}")]
    UnableToInitialize(String),

    #[error("Unable to read storage: {0}")]
    UnableToRead(String),

    #[error("Unable to write storage: {0}")]
    UnableToWrite(String),

    #[error("Storage contents are not a valid key-value object: {0}")]
    Corrupted(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

pub fn io_to_generic_error(e: std::io::Error) -> String {
    format!("{}", e)
}

/// String key-value store holding state that outlives a single view, the equivalent of a
/// browser's local storage
pub trait KeyValueStorage: Send {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: String) -> StorageResult<()>;
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageEngine {
    /// Persists to a JSON file inside the given directory
    File(PathBuf),
    /// Lost when the app exits
    Memory,
}

impl StorageEngine {
    pub fn get_engine(&self) -> StorageResult<Box<dyn KeyValueStorage>> {
        match self {
            StorageEngine::File(path) => Ok(Box::new(FileStorage::new(path.clone())?)),
            StorageEngine::Memory => Ok(Box::new(MemoryStorage::new())),
        }
    }

    pub fn get_engine_info_stats(&self) -> Vec<(String, String)> {
        match self {
            StorageEngine::File(path) => vec![
                ("StorageEngine".to_string(), "File".to_string()),
                ("DataDirectory".to_string(), path.display().to_string()),
            ],
            StorageEngine::Memory => vec![("StorageEngine".to_string(), "Memory".to_string())],
        }
    }
}
