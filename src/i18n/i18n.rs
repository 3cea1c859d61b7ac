use std::{collections::HashMap, sync::LazyLock};

use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

static ENGLISH: LazyLock<HashMap<String, String>> =
    LazyLock::new(|| load_table(include_str!("../../data/locales/en.json")));

static THAI: LazyLock<HashMap<String, String>> =
    LazyLock::new(|| load_table(include_str!("../../data/locales/th.json")));

fn load_table(source: &str) -> HashMap<String, String> {
    serde_json::from_str(source).expect("bundled locale table should be valid JSON")
}

#[derive(
    Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Th,
}

impl Language {
    /// Label on the language switch, always in the language itself
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Th => "ไทย",
        }
    }

    fn table(&self) -> &'static HashMap<String, String> {
        match self {
            Language::En => &*ENGLISH,
            Language::Th => &*THAI,
        }
    }
}

/// Looks up display strings. Keys without a translation are shown as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            log::info!("🌐 Language changed: [{} -> {}]", self.language, language);
        }

        self.language = language;
    }

    pub fn t(&self, key: &str) -> String {
        self.language
            .table()
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translates `key` then fills `{{name}}` placeholders from `args`
    pub fn t_with(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter()
            .fold(self.t(key), |text, (name, value)| {
                text.replace(&format!("{{{{{}}}}}", name), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn missing_keys_fall_back_to_the_key() {
        let translator = Translator::new(Language::En);

        assert_eq!(translator.t("Contact List"), "Contact List");
        assert_eq!(translator.t("welcomeMessage"), "Welcome to Contactbook");
    }

    #[test]
    fn thai_table_translates() {
        let translator = Translator::new(Language::Th);

        assert_eq!(translator.t("Delete"), "ลบ");
        assert_eq!(translator.t("This field is required"), "กรุณากรอกข้อมูลในช่องนี้");
    }

    #[test]
    fn placeholders_are_interpolated() {
        let translator = Translator::new(Language::En);

        let text = translator.t_with(
            "Page {{current}} of {{total}} ({{count}} total contacts)",
            &[
                ("current", "2".to_string()),
                ("total", "5".to_string()),
                ("count", "100".to_string()),
            ],
        );

        assert_eq!(text, "Page 2 of 5 (100 total contacts)");
    }

    #[test]
    fn switching_language_changes_output() {
        let mut translator = Translator::default();
        let english = translator.t_with("greeting", &[("name", "Ada".to_string())]);

        translator.set_language(Language::Th);
        let thai = translator.t_with("greeting", &[("name", "Ada".to_string())]);

        assert_eq!(english, "Hello, Ada!");
        assert_eq!(thai, "สวัสดี Ada!");
    }

    #[test]
    fn languages_parse_from_codes() {
        assert_eq!("th".parse::<Language>(), Ok(Language::Th));
        assert_eq!(Language::En.to_string(), "en");
        assert_eq!(Language::iter().count(), 2);
    }
}
