use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    navigation::route::Route,
    validation::{validate_age, validate_name, FieldError},
};

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Age,
}

impl FormField {
    pub fn label_key(&self) -> &'static str {
        match self {
            FormField::FirstName => "First Name",
            FormField::LastName => "Last Name",
            FormField::Age => "Age",
        }
    }

    pub fn placeholder_key(&self) -> &'static str {
        match self {
            FormField::FirstName => "Enter first name",
            FormField::LastName => "Enter last name",
            FormField::Age => "Enter age",
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
}

impl FormValues {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Age => &self.age,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FirstName => &mut self.first_name,
            FormField::LastName => &mut self.last_name,
            FormField::Age => &mut self.age,
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub first_name: Option<FieldError>,
    pub last_name: Option<FieldError>,
    pub age: Option<FieldError>,
}

impl FormErrors {
    /// Runs every validator, so each field's error is recomputed on every submit
    pub fn validate(values: &FormValues) -> Self {
        FormErrors {
            first_name: validate_name(&values.first_name).err(),
            last_name: validate_name(&values.last_name).err(),
            age: validate_age(&values.age).err(),
        }
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::FirstName => self.first_name,
            FormField::LastName => self.last_name,
            FormField::Age => self.age,
        }
    }

    fn clear(&mut self, field: FormField) {
        match field {
            FormField::FirstName => self.first_name = None,
            FormField::LastName => self.last_name = None,
            FormField::Age => self.age = None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some() || self.age.is_some()
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message_key: &'static str,
}

impl Notification {
    pub fn title_key(&self) -> &'static str {
        match self.kind {
            NotificationKind::Success => "Success",
            NotificationKind::Error => "Error",
        }
    }
}

/// A contact that passed validation. It is never stored anywhere.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(FormErrors),
    Valid(ContactDraft),
}

/// Editing -> (submit) -> Invalid | Valid. Both outcomes show a notification; acknowledging an
/// invalid one returns to Editing, acknowledging a valid one leaves for the contact list.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Invalid,
    Valid,
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    values: FormValues,
    errors: FormErrors,
    phase: FormPhase,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            values: FormValues::default(),
            errors: FormErrors::default(),
            phase: FormPhase::Editing,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Changing a value clears that field's error. Refused while a notification is open.
    pub fn input(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.phase != FormPhase::Editing {
            return false;
        }

        *self.values.get_mut(field) = value.into();
        self.errors.clear(field);

        true
    }

    /// `None` while a notification is still open
    pub fn submit(&mut self) -> Option<SubmitOutcome> {
        if self.phase != FormPhase::Editing {
            return None;
        }

        log::debug!("Submitting contact form");

        let errors = FormErrors::validate(&self.values);

        if errors.has_errors() {
            self.errors = errors.clone();
            self.phase = FormPhase::Invalid;

            return Some(SubmitOutcome::Invalid(errors));
        }

        self.errors = FormErrors::default();
        self.phase = FormPhase::Valid;

        let age = self
            .values
            .age
            .parse::<u32>()
            .expect("validated age should fit in a u32");

        Some(SubmitOutcome::Valid(ContactDraft {
            first_name: self.values.first_name.clone(),
            last_name: self.values.last_name.clone(),
            age,
        }))
    }

    pub fn notification(&self) -> Option<Notification> {
        match self.phase {
            FormPhase::Editing => None,
            FormPhase::Invalid => Some(Notification {
                kind: NotificationKind::Error,
                message_key: "Please correct the errors in the form",
            }),
            FormPhase::Valid => Some(Notification {
                kind: NotificationKind::Success,
                message_key: "Contact created successfully!",
            }),
        }
    }

    /// Closes the notification, returns where to navigate next
    pub fn acknowledge(&mut self) -> Option<Route> {
        match self.phase {
            FormPhase::Editing => None,
            FormPhase::Invalid => {
                self.phase = FormPhase::Editing;
                None
            }
            FormPhase::Valid => {
                self.phase = FormPhase::Editing;
                Some(Route::ContactList)
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::ContactList
    }
}
