use contactbook::{
    app::{
        event::{Event, EventResult},
        request_manager::{RequestManager, RequestManagerError},
        screen::{
            AlertScreen, ContactCreateScreen, ContactListScreen, HomeScreen, NavLink, Screen,
            ViewScreen,
        },
    },
    consts::consts::ContactId,
    form::form::{FormField, NotificationKind},
    i18n::i18n::Language,
    navigation::route::Route,
    profile::avatar::FileUpload,
};
use juniper::{
    graphql_value, EmptySubscription, FieldError, FieldResult, GraphQLEnum, GraphQLObject,
    RootNode,
};
use std::sync::Mutex;

pub struct GraphQLContext {
    pub request_manager: Mutex<RequestManager>,
}

// https://graphql-rust.github.io/juniper/master/types/objects/using_contexts.html
impl juniper::Context for GraphQLContext {}

#[derive(GraphQLEnum, Clone, Copy)]
#[graphql(name = "Language")]
enum LanguageCode {
    En,
    Th,
}

impl LanguageCode {
    fn from_language(language: Language) -> Self {
        match language {
            Language::En => LanguageCode::En,
            Language::Th => LanguageCode::Th,
        }
    }

    fn to_language(self) -> Language {
        match self {
            LanguageCode::En => Language::En,
            LanguageCode::Th => Language::Th,
        }
    }
}

#[derive(GraphQLEnum, Clone, Copy)]
#[graphql(name = "FormField")]
enum FormFieldName {
    FirstName,
    LastName,
    Age,
}

impl FormFieldName {
    fn from_field(field: FormField) -> Self {
        match field {
            FormField::FirstName => FormFieldName::FirstName,
            FormField::LastName => FormFieldName::LastName,
            FormField::Age => FormFieldName::Age,
        }
    }

    fn to_field(self) -> FormField {
        match self {
            FormFieldName::FirstName => FormField::FirstName,
            FormFieldName::LastName => FormField::LastName,
            FormFieldName::Age => FormField::Age,
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(name = "NavLink", description = "A link in the navigation bar")]
struct NavLinkObject {
    label: String,
    path: String,
    active: bool,
}

impl NavLinkObject {
    fn from_nav_link(link: NavLink) -> Self {
        NavLinkObject {
            label: link.label,
            path: link.path,
            active: link.active,
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(description = "A blocking alert, every event except dismissAlert is refused while it is shown")]
struct Alert {
    title: String,
    message: String,
    dismiss_label: String,
}

impl Alert {
    fn from_alert(alert: AlertScreen) -> Self {
        Alert {
            title: alert.title,
            message: alert.message,
            dismiss_label: alert.dismiss_label,
        }
    }
}

#[derive(GraphQLObject)]
struct LabeledValue {
    label: String,
    value: String,
}

#[derive(GraphQLObject)]
#[graphql(description = "Owner profile with avatar and location panel")]
struct Home {
    welcome: String,
    greeting: String,
    name: String,
    details: Vec<LabeledValue>,
    profile_image: String,
    upload_label: String,
    uploading: Option<String>,
    location_label: String,
    location_panel_open: bool,
    locate_label: String,
    location: Option<String>,
}

impl Home {
    fn from_home(home: HomeScreen) -> Self {
        Home {
            welcome: home.welcome,
            greeting: home.greeting,
            name: home.name,
            details: home
                .details
                .into_iter()
                .map(|detail| LabeledValue {
                    label: detail.label,
                    value: detail.value,
                })
                .collect(),
            profile_image: home.profile_image,
            upload_label: home.upload_label,
            uploading: home.uploading,
            location_label: home.location_label,
            location_panel_open: home.location_panel_open,
            locate_label: home.locate_label,
            location: home.location,
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(description = "A generated contact")]
struct ContactRow {
    number: i32,
    id: i32,
    first_name: String,
    last_name: String,
    full_name: String,
    age: i32,
}

#[derive(GraphQLObject)]
#[graphql(description = "A pager control, page is null for an ellipsis")]
struct PageLink {
    label: String,
    page: Option<i32>,
    active: bool,
}

#[derive(GraphQLObject)]
struct ContactList {
    title: String,
    search_term: String,
    search_placeholder: String,
    search_status: Option<String>,
    columns: Vec<String>,
    rows: Vec<ContactRow>,
    empty_message: Option<String>,
    pages: Vec<PageLink>,
    current_page: i32,
    total_pages: i32,
    page_summary: Option<String>,
    can_go_previous: bool,
    can_go_next: bool,
}

impl ContactList {
    fn from_contact_list(list: ContactListScreen) -> Self {
        ContactList {
            title: list.title,
            search_term: list.search_term,
            search_placeholder: list.search_placeholder,
            search_status: list.search_status,
            columns: list.columns,
            rows: list
                .rows
                .into_iter()
                .map(|row| ContactRow {
                    number: row.number as i32,
                    id: row.id as i32,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    full_name: row.full_name,
                    age: row.age as i32,
                })
                .collect(),
            empty_message: list.empty_message,
            pages: list
                .pages
                .into_iter()
                .map(|page| PageLink {
                    label: page.label,
                    page: page.page.map(|page| page as i32),
                    active: page.active,
                })
                .collect(),
            current_page: list.current_page as i32,
            total_pages: list.total_pages as i32,
            page_summary: list.page_summary,
            can_go_previous: list.can_go_previous,
            can_go_next: list.can_go_next,
        }
    }
}

#[derive(GraphQLObject)]
struct FormFieldState {
    field: FormFieldName,
    label: String,
    placeholder: String,
    value: String,
    error: Option<String>,
}

#[derive(GraphQLObject)]
struct Notification {
    success: bool,
    title: String,
    message: String,
    dismiss_label: String,
}

#[derive(GraphQLObject)]
struct ContactCreate {
    title: String,
    fields: Vec<FormFieldState>,
    submit_label: String,
    cancel_label: String,
    notification: Option<Notification>,
}

impl ContactCreate {
    fn from_contact_create(form: ContactCreateScreen) -> Self {
        ContactCreate {
            title: form.title,
            fields: form
                .fields
                .into_iter()
                .map(|field| FormFieldState {
                    field: FormFieldName::from_field(field.field),
                    label: field.label,
                    placeholder: field.placeholder,
                    value: field.value,
                    error: field.error,
                })
                .collect(),
            submit_label: form.submit_label,
            cancel_label: form.cancel_label,
            notification: form.notification.map(|notification| Notification {
                success: notification.kind == NotificationKind::Success,
                title: notification.title,
                message: notification.message,
                dismiss_label: notification.dismiss_label,
            }),
        }
    }
}

#[derive(GraphQLObject)]
#[graphql(
    name = "Screen",
    description = "Everything currently shown, exactly one of the views is set"
)]
struct ScreenObject {
    path: String,
    language: LanguageCode,
    nav: Vec<NavLinkObject>,
    alert: Option<Alert>,
    home: Option<Home>,
    contact_list: Option<ContactList>,
    contact_create: Option<ContactCreate>,
}

impl ScreenObject {
    fn from_screen(screen: Screen) -> Self {
        let (home, contact_list, contact_create) = match screen.view {
            ViewScreen::Home(home) => (Some(Home::from_home(home)), None, None),
            ViewScreen::ContactList(list) => {
                (None, Some(ContactList::from_contact_list(list)), None)
            }
            ViewScreen::ContactCreate(form) => {
                (None, None, Some(ContactCreate::from_contact_create(form)))
            }
        };

        ScreenObject {
            path: screen.path,
            language: LanguageCode::from_language(screen.language),
            nav: screen
                .nav
                .into_iter()
                .map(NavLinkObject::from_nav_link)
                .collect(),
            alert: screen.alert.map(Alert::from_alert),
            home,
            contact_list,
            contact_create,
        }
    }
}

#[derive(GraphQLEnum)]
enum OutcomeKind {
    Applied,
    Ignored,
    Blocked,
    Alert,
}

#[derive(GraphQLObject)]
#[graphql(description = "Result of an event and the screen it left behind")]
struct EventOutcome {
    kind: OutcomeKind,
    /// Why the event was ignored or blocked, or the alert it raised
    message: Option<String>,
    screen: ScreenObject,
}

fn request_error(e: RequestManagerError) -> FieldError {
    FieldError::new(
        e.to_string(),
        graphql_value!({ "internal_error": "Contactbook app did not respond" }),
    )
}

fn bad_request(message: String) -> FieldError {
    FieldError::new(message, graphql_value!({ "bad_request": "Invalid argument" }))
}

fn lock_request_manager(
    context: &GraphQLContext,
) -> FieldResult<std::sync::MutexGuard<'_, RequestManager>> {
    context.request_manager.lock().map_err(|_| {
        FieldError::new(
            "Request manager lock poisoned",
            graphql_value!({ "internal_error": "Request manager lock poisoned" }),
        )
    })
}

#[tracing::instrument(skip(context))]
fn send_event(event: Event, context: &GraphQLContext) -> FieldResult<EventOutcome> {
    let request_manager = lock_request_manager(context)?;

    let result = request_manager.send_event(event).map_err(request_error)?;
    let screen = request_manager
        .send_screen_request()
        .map_err(request_error)?;

    let (kind, message) = match result {
        EventResult::Applied => (OutcomeKind::Applied, None),
        EventResult::Ignored(reason) => (OutcomeKind::Ignored, Some(reason)),
        EventResult::Blocked(alert) => (OutcomeKind::Blocked, Some(alert)),
        EventResult::Alert(alert) => (OutcomeKind::Alert, Some(alert)),
    };

    Ok(EventOutcome {
        kind,
        message,
        screen: ScreenObject::from_screen(screen),
    })
}

pub struct QueryRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl QueryRoot {
    fn screen(context: &'db GraphQLContext) -> FieldResult<ScreenObject> {
        let request_manager = lock_request_manager(context)?;

        let screen = request_manager
            .send_screen_request()
            .map_err(request_error)?;

        Ok(ScreenObject::from_screen(screen))
    }
}

pub struct MutationRoot;

#[juniper::graphql_object(context = GraphQLContext)]
impl MutationRoot {
    fn navigate(path: String, context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        let route = path
            .parse::<Route>()
            .map_err(|e| bad_request(e.to_string()))?;

        send_event(Event::Navigate(route), context)
    }

    fn change_language(
        language: LanguageCode,
        context: &'db GraphQLContext,
    ) -> FieldResult<EventOutcome> {
        send_event(Event::ChangeLanguage(language.to_language()), context)
    }

    fn search(term: String, context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::Search(term), context)
    }

    fn clear_search(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::ClearSearch, context)
    }

    fn delete_contact(id: i32, context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        let id = u32::try_from(id)
            .map_err(|_| bad_request(format!("Contact id must not be negative, got {}", id)))?;

        send_event(Event::DeleteContact(ContactId(id)), context)
    }

    fn go_to_page(page: i32, context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        let page = usize::try_from(page)
            .map_err(|_| bad_request(format!("Page must not be negative, got {}", page)))?;

        send_event(Event::GoToPage(page), context)
    }

    fn next_page(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::NextPage, context)
    }

    fn previous_page(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::PreviousPage, context)
    }

    fn set_field(
        field: FormFieldName,
        value: String,
        context: &'db GraphQLContext,
    ) -> FieldResult<EventOutcome> {
        send_event(Event::SetField(field.to_field(), value), context)
    }

    fn submit(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::Submit, context)
    }

    fn cancel(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::Cancel, context)
    }

    fn acknowledge(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::AcknowledgeNotification, context)
    }

    /// Reads a file from the server's filesystem
    fn upload_avatar(
        path: String,
        mime_type: Option<String>,
        context: &'db GraphQLContext,
    ) -> FieldResult<EventOutcome> {
        let upload = FileUpload::from_path(path, mime_type).map_err(|e| bad_request(e.to_string()))?;

        send_event(Event::UploadAvatar(upload), context)
    }

    fn open_location_panel(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::OpenLocationPanel, context)
    }

    fn locate(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::Locate, context)
    }

    fn dismiss_alert(context: &'db GraphQLContext) -> FieldResult<EventOutcome> {
        send_event(Event::DismissAlert, context)
    }
}

pub type Schema = RootNode<'static, QueryRoot, MutationRoot, EmptySubscription<GraphQLContext>>;

pub fn create_schema() -> Schema {
    Schema::new(QueryRoot {}, MutationRoot {}, EmptySubscription::new())
}
