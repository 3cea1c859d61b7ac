use serde::{Deserialize, Serialize};

use crate::consts::consts::ContactId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    /// Always `first_name + " " + last_name`
    pub full_name: String,
    pub age: u32,
}

impl Contact {
    pub fn new(
        id: ContactId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
    ) -> Self {
        let first_name = first_name.into();
        let last_name = last_name.into();

        Contact {
            id,
            full_name: format!("{} {}", first_name, last_name),
            first_name,
            last_name,
            age,
        }
    }

    pub fn new_test(id: u32, first_name: &str, last_name: &str) -> Self {
        Contact::new(ContactId(id), first_name, last_name, 30)
    }
}
