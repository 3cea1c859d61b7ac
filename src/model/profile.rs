use serde::{Deserialize, Serialize};

const BUNDLED_PROFILE: &str = include_str!("../../data/profile.json");

/// Static owner profile shown on the home view
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub line: String,
    /// Default avatar, used until an image has been uploaded
    pub image_url: String,
}

impl Profile {
    /// Profile bundled with the binary at compile time
    pub fn bundled() -> Self {
        serde_json::from_str(BUNDLED_PROFILE).expect("bundled profile data should be valid JSON")
    }

    pub fn new_test() -> Self {
        Profile {
            name: "Test Owner".to_string(),
            address: "1 Test Road".to_string(),
            phone_number: "000-000-0000".to_string(),
            email: "owner@example.com".to_string(),
            line: "@owner".to_string(),
            image_url: "https://example.com/avatar.png".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_profile_parses() {
        let profile = Profile::bundled();

        assert!(!profile.name.is_empty());
        assert!(!profile.image_url.is_empty());
    }
}
