use serde::Serialize;

use crate::{
    consts::consts::ContactId, form::form::FormField, i18n::i18n::Language,
    navigation::route::Route, profile::avatar::FileUpload,
};

/// Everything a user can do to the app
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Navigate(Route),
    ChangeLanguage(Language),

    // Contact list
    Search(String),
    ClearSearch,
    DeleteContact(ContactId),
    GoToPage(usize),
    NextPage,
    PreviousPage,

    // Contact form
    SetField(FormField, String),
    Submit,
    Cancel,
    AcknowledgeNotification,

    // Home
    UploadAvatar(FileUpload),
    OpenLocationPanel,
    Locate,

    DismissAlert,
}

impl Event {
    pub fn log_format(&self) -> String {
        match self {
            Event::Navigate(route) => format!("Navigate [{}]", route),
            Event::ChangeLanguage(language) => format!("ChangeLanguage [{}]", language),
            Event::Search(term) => format!("Search [{}]", term),
            Event::ClearSearch => "ClearSearch".to_string(),
            Event::DeleteContact(id) => format!("DeleteContact [{}]", id),
            Event::GoToPage(page) => format!("GoToPage [{}]", page),
            Event::NextPage => "NextPage".to_string(),
            Event::PreviousPage => "PreviousPage".to_string(),
            Event::SetField(field, value) => format!("SetField [{}={}]", field, value),
            Event::Submit => "Submit".to_string(),
            Event::Cancel => "Cancel".to_string(),
            Event::AcknowledgeNotification => "AcknowledgeNotification".to_string(),
            Event::UploadAvatar(upload) => format!(
                "UploadAvatar [{}, {}, {} bytes]",
                upload.path.display(),
                upload.mime_type,
                upload.size
            ),
            Event::OpenLocationPanel => "OpenLocationPanel".to_string(),
            Event::Locate => "Locate".to_string(),
            Event::DismissAlert => "DismissAlert".to_string(),
        }
    }
}

/// Outcome of a single event. Reasons and alerts are untranslated message keys.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub enum EventResult {
    Applied,
    /// Not applicable to the current state, nothing changed
    Ignored(String),
    /// Refused because an alert is waiting to be dismissed
    Blocked(String),
    /// The event raised a blocking alert
    Alert(String),
}

impl EventResult {
    pub fn ignored(reason: impl Into<String>) -> Self {
        EventResult::Ignored(reason.into())
    }
}
