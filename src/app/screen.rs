use num_format::{Locale, ToFormattedString};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::{
    form::form::{ContactForm, FormField, NotificationKind},
    i18n::i18n::{Language, Translator},
    listing::{
        controller::{ContactListView, SearchStatus},
        pagination::PageMarker,
    },
    navigation::route::Route,
    profile::view::ProfileView,
};

/// Fully translated snapshot of what the user currently sees
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Screen {
    pub route: Route,
    pub path: String,
    pub language: Language,
    pub nav: Vec<NavLink>,
    pub alert: Option<AlertScreen>,
    pub view: ViewScreen,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind")]
pub enum ViewScreen {
    Home(HomeScreen),
    ContactList(ContactListScreen),
    ContactCreate(ContactCreateScreen),
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub path: String,
    pub active: bool,
}

impl NavLink {
    pub fn build_all(current: Route, translator: &Translator) -> Vec<NavLink> {
        [
            (Route::Home, "Home"),
            (Route::ContactList, "Contacts"),
            (Route::ContactCreate, "Create Contact"),
        ]
        .into_iter()
        .map(|(route, label_key)| NavLink {
            label: translator.t(label_key),
            path: route.path().to_string(),
            active: route == current,
        })
        .collect()
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertScreen {
    pub title: String,
    pub message: String,
    pub dismiss_label: String,
}

impl AlertScreen {
    pub fn build(message_key: &str, translator: &Translator) -> Self {
        Self {
            title: translator.t("Alert"),
            message: translator.t(message_key),
            dismiss_label: translator.t("OK"),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HomeScreen {
    pub welcome: String,
    pub greeting: String,
    pub name: String,
    pub details: Vec<LabeledValue>,
    pub profile_image: String,
    pub upload_label: String,
    pub uploading: Option<String>,
    pub location_label: String,
    pub location_panel_open: bool,
    pub locate_label: String,
    pub location: Option<String>,
}

impl HomeScreen {
    pub fn build(view: &ProfileView, translator: &Translator) -> Self {
        let profile = view.profile();

        let details = [
            ("Address", &profile.address),
            ("Phone", &profile.phone_number),
            ("Email", &profile.email),
            ("Line", &profile.line),
        ]
        .into_iter()
        .map(|(label_key, value)| LabeledValue {
            label: translator.t(label_key),
            value: value.clone(),
        })
        .collect();

        let location = view.location().map(|coordinates| {
            translator.t_with(
                "Your location: {{latitude}}, {{longitude}}",
                &[
                    ("latitude", format!("{:.4}", coordinates.latitude)),
                    ("longitude", format!("{:.4}", coordinates.longitude)),
                ],
            )
        });

        Self {
            welcome: translator.t("welcomeMessage"),
            greeting: translator.t_with("greeting", &[("name", profile.name.clone())]),
            name: profile.name.clone(),
            details,
            profile_image: view.profile_image().to_string(),
            upload_label: translator.t("Upload photo"),
            uploading: view
                .is_reading()
                .then(|| translator.t("Uploading photo...")),
            location_label: translator.t("Show my location"),
            location_panel_open: view.location_panel_open(),
            locate_label: translator.t("Use my location"),
            location,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactRow {
    /// Position in the displayed set, starting at 1
    pub number: usize,
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub age: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    /// `None` for an ellipsis
    pub page: Option<usize>,
    pub active: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactListScreen {
    pub title: String,
    pub search_term: String,
    pub search_placeholder: String,
    pub search_status: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<ContactRow>,
    pub empty_message: Option<String>,
    pub pages: Vec<PageLink>,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_summary: Option<String>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl ContactListScreen {
    pub fn build(view: &ContactListView, translator: &Translator) -> Self {
        let start_index = view.start_index();

        let rows = view
            .current_page_contacts()
            .iter()
            .enumerate()
            .map(|(offset, contact)| ContactRow {
                number: start_index + offset + 1,
                id: contact.id.to_number(),
                first_name: contact.first_name.clone(),
                last_name: contact.last_name.clone(),
                full_name: contact.full_name.clone(),
                age: contact.age,
            })
            .collect::<Vec<ContactRow>>();

        let search_status = match view.search_status() {
            SearchStatus::Idle => None,
            SearchStatus::TooShort => Some(translator.t("Type at least 3 characters to search")),
            SearchStatus::Results(count) => Some(translator.t_with(
                "Found {{count}} result(s)",
                &[("count", count.to_formatted_string(&Locale::en))],
            )),
        };

        let pages = view
            .page_window()
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(page) => PageLink {
                    label: page.to_string(),
                    page: Some(page),
                    active: page == view.current_page(),
                },
                PageMarker::Ellipsis => PageLink {
                    label: "...".to_string(),
                    page: None,
                    active: false,
                },
            })
            .collect();

        let total_pages = view.total_pages();

        let page_summary = (total_pages > 0).then(|| {
            translator.t_with(
                "Page {{current}} of {{total}} ({{count}} total contacts)",
                &[
                    ("current", view.current_page().to_string()),
                    ("total", total_pages.to_string()),
                    (
                        "count",
                        view.displayed().len().to_formatted_string(&Locale::en),
                    ),
                ],
            )
        });

        Self {
            title: translator.t("Contact List"),
            search_term: view.search_term().to_string(),
            search_placeholder: translator.t("Search by name or surname (min 3 characters)..."),
            search_status,
            columns: ["#", "First Name", "Last Name", "Age", "Action"]
                .into_iter()
                .map(|key| translator.t(key))
                .collect(),
            empty_message: rows
                .is_empty()
                .then(|| translator.t("No contacts found")),
            rows,
            pages,
            current_page: view.current_page(),
            total_pages,
            page_summary,
            can_go_previous: view.current_page() > 1,
            can_go_next: view.current_page() < total_pages,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldScreen {
    pub field: FormField,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct NotificationScreen {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub dismiss_label: String,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactCreateScreen {
    pub title: String,
    pub fields: Vec<FieldScreen>,
    pub submit_label: String,
    pub cancel_label: String,
    pub notification: Option<NotificationScreen>,
}

impl ContactCreateScreen {
    pub fn build(form: &ContactForm, translator: &Translator) -> Self {
        let fields = FormField::iter()
            .map(|field| FieldScreen {
                field,
                label: translator.t(field.label_key()),
                placeholder: translator.t(field.placeholder_key()),
                value: form.values().get(field).to_string(),
                error: form
                    .errors()
                    .get(field)
                    .map(|error| translator.t(error.message_key())),
            })
            .collect();

        let notification = form.notification().map(|notification| NotificationScreen {
            kind: notification.kind,
            title: translator.t(notification.title_key()),
            message: translator.t(notification.message_key),
            dismiss_label: translator.t("OK"),
        });

        Self {
            title: translator.t("Create Contact"),
            fields,
            submit_label: translator.t("Submit"),
            cancel_label: translator.t("Cancel"),
            notification,
        }
    }
}
