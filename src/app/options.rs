use std::path::PathBuf;

use uuid::Uuid;

use crate::{i18n::i18n::Language, location::LocationSource, storage::StorageEngine};

#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    pub storage_engine: StorageEngine,
    pub language: Language,
    pub location_source: LocationSource,
    /// Fixes the generated contacts, a new random dataset per mount otherwise
    pub seed: Option<u64>,
}

// Implements: https://rust-unofficial.github.io/patterns/patterns/creational/builder.html
impl AppOptions {
    pub fn set_storage_engine(mut self, storage_engine: StorageEngine) -> Self {
        self.storage_engine = storage_engine;
        self
    }

    pub fn set_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn set_location_source(mut self, location_source: LocationSource) -> Self {
        self.location_source = location_source;
        self
    }

    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        // Defaults to $CWD/data
        Self {
            storage_engine: StorageEngine::File(PathBuf::from("data")),
            language: Language::default(),
            location_source: LocationSource::default(),
            seed: None,
        }
    }
}

impl AppOptions {
    pub fn new_test() -> Self {
        AppOptions::default()
            .set_storage_engine(StorageEngine::Memory)
            .set_seed(Some(7))
    }

    /// File backed, in a fresh directory under /tmp
    pub fn new_test_file() -> Self {
        let data_dir: PathBuf = ["/", "tmp", "contactbook", &Uuid::new_v4().to_string()]
            .iter()
            .collect();

        AppOptions::new_test().set_storage_engine(StorageEngine::File(data_dir))
    }
}
