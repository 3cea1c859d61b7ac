use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::consts::consts::LOCAL_STORAGE_FILE;

use super::{io_to_generic_error, KeyValueStorage, StorageError, StorageResult};

/// Keeps every item in memory and rewrites the whole JSON file on each mutation
pub struct FileStorage {
    file_path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&base_path)
            .map_err(|e| StorageError::UnableToInitialize(io_to_generic_error(e)))?;

        let file_path = base_path.join(LOCAL_STORAGE_FILE);

        let items = match fs::read(&file_path) {
            Ok(bytes) => serde_json::from_slice::<BTreeMap<String, String>>(&bytes)
                .map_err(|e| StorageError::Corrupted(format!("{}", e)))?,
            Err(err) => match err.kind() {
                std::io::ErrorKind::NotFound => BTreeMap::new(),
                _ => return Err(StorageError::UnableToRead(io_to_generic_error(err))),
            },
        };

        log::info!(
            "Local storage location: [{}], items: {}",
            file_path.display(),
            items.len()
        );

        Ok(Self { file_path, items })
    }

    fn persist(&self) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.items)
            .map_err(|e| StorageError::UnableToWrite(format!("{}", e)))?;

        fs::write(&self.file_path, bytes)
            .map_err(|e| StorageError::UnableToWrite(io_to_generic_error(e)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.items.insert(key.to_string(), value);
        self.persist()
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        if self.items.remove(key).is_some() {
            return self.persist();
        }

        Ok(())
    }
}
