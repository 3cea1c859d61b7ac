use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u32);

impl ContactId {
    pub fn to_number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one mount of a view. A view that is unmounted and mounted again gets a new id,
/// which lets late async completions tell whether their view still exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountId(pub Uuid);

impl MountId {
    pub fn new() -> MountId {
        MountId(Uuid::new_v4())
    }
}

impl Default for MountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one avatar read, so a completion can be matched to the read the view still tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReadId(pub Uuid);

impl ReadId {
    pub fn new() -> ReadId {
        ReadId(Uuid::new_v4())
    }
}

impl Default for ReadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Contact list
pub const CONTACT_COUNT: u32 = 100;
pub const MIN_CONTACT_AGE: u32 = 18;
pub const MAX_CONTACT_AGE: u32 = 65;
pub const PAGE_SIZE: usize = 20;
pub const MAX_VISIBLE_PAGES: usize = 5;
pub const MIN_SEARCH_LENGTH: usize = 3;

// Contact form
pub const MAX_VALID_AGE: u64 = 150;

// Profile
pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;
pub const AVATAR_STORAGE_KEY: &str = "profileImage";

// Storage
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

// Request manager
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
pub const UPLOAD_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
