use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Instant,
};

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::{
    consts::consts::{MountId, ReadId},
    form::form::{ContactForm, SubmitOutcome},
    generator::NamePools,
    i18n::i18n::Translator,
    listing::controller::ContactListView,
    location::LocationProvider,
    model::profile::Profile,
    navigation::route::Route,
    profile::{
        avatar::{read_as_data_url, validate_upload, UploadError},
        view::ProfileView,
    },
    storage::{KeyValueStorage, StorageError},
};

use super::{
    event::{Event, EventResult},
    options::AppOptions,
    request_manager::{AppMessage, AppRequest, AppRequestAction, AppResponse, RequestManager},
    screen::{
        AlertScreen, ContactCreateScreen, ContactListScreen, HomeScreen, NavLink, Screen,
        ViewScreen,
    },
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unable to open storage: {0}")]
    Storage(#[from] StorageError),
    #[error("Unable to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("App thread exited during startup")]
    Stopped,
}

/// The mounted view. Replacing it unmounts the previous one.
#[derive(Debug)]
pub enum ActiveView {
    Home(ProfileView),
    ContactList(ContactListView),
    ContactCreate(ContactForm),
}

/// How an event gets its reply
#[derive(Debug, PartialEq, Eq)]
pub enum EventReply {
    Now(EventResult),
    /// Sent once this avatar read completes
    AfterRead(ReadId),
}

#[derive(Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

pub struct App {
    app_receiver: Receiver<AppMessage>,
    /// Handed to background tasks so their completions come back through the loop
    app_sender: Sender<AppMessage>,
    options: AppOptions,
    runtime: Runtime,
    storage: Box<dyn KeyValueStorage>,
    location_provider: Box<dyn LocationProvider>,
    translator: Translator,
    profile: Profile,
    name_pools: NamePools,
    rng: StdRng,
    route: Route,
    view: ActiveView,
    alert: Option<&'static str>,
    pending_upload_reply: Option<(ReadId, oneshot::Sender<AppResponse>)>,
}

impl App {
    pub fn new(
        options: AppOptions,
        app_sender: Sender<AppMessage>,
        app_receiver: Receiver<AppMessage>,
    ) -> Result<Self, AppError> {
        let storage = options.storage_engine.get_engine()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("Avatar Reader")
            .enable_all()
            .build()?;

        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let profile = Profile::bundled();
        let view = ActiveView::Home(ProfileView::mount(profile.clone(), storage.as_ref()));

        Ok(Self {
            app_receiver,
            app_sender,
            translator: Translator::new(options.language),
            location_provider: Box::new(options.location_source),
            options,
            runtime,
            storage,
            profile,
            name_pools: NamePools::bundled(),
            rng,
            route: Route::Home,
            view,
            alert: None,
            pending_upload_reply: None,
        })
    }

    /// Starts the app on its own thread. Returns once the app is ready to take requests.
    pub fn spawn(options: AppOptions) -> Result<RequestManager, AppError> {
        let (app_sender, app_receiver) = mpsc::channel::<AppMessage>();
        let (ready_sender, ready_receiver) = oneshot::channel::<Result<(), AppError>>();

        let thread_sender = app_sender.clone();

        // The runtime is created on the app thread so it is never dropped inside another runtime
        thread::Builder::new()
            .name("App".to_string())
            .spawn(move || match App::new(options, thread_sender, app_receiver) {
                Ok(mut app) => {
                    let _ = ready_sender.send(Ok(()));
                    app.run();
                }
                Err(err) => {
                    let _ = ready_sender.send(Err(err));
                }
            })?;

        ready_receiver.recv().map_err(|_| AppError::Stopped)??;

        Ok(RequestManager::new(app_sender))
    }

    pub fn run(&mut self) {
        let now = Instant::now();

        let engine_stats = self
            .options
            .storage_engine
            .get_engine_info_stats()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<String>>()
            .join(", ");

        log::info!(
            "🚀 App running        [Route: {}, Language: {}, {}, Startup: {}ms]",
            self.route,
            self.translator.language(),
            engine_stats,
            now.elapsed().as_millis()
        );

        // Process incoming messages from the channel
        while let Ok(message) = self.app_receiver.recv() {
            if self.handle_message(message) == LoopControl::Stop {
                log::info!("👋 App stopped");
                return;
            }
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) -> LoopControl {
        match message {
            AppMessage::Request(AppRequest {
                action,
                response_sender,
            }) => {
                log::info!("Received request: {}", action.log_format());

                match action {
                    AppRequestAction::Shutdown => {
                        self.reply_to_pending_upload(EventResult::ignored("App shut down"));

                        let _ = response_sender.send(AppResponse::SuccessStatus(
                            "Successfully shutdown app".to_string(),
                        ));

                        return LoopControl::Stop;
                    }
                    AppRequestAction::Screen => {
                        let _ = response_sender.send(AppResponse::Screen(Box::new(self.screen())));
                    }
                    AppRequestAction::Event(event) => match self.process_event(event) {
                        EventReply::Now(result) => {
                            let _ = response_sender.send(AppResponse::Event(result));
                        }
                        EventReply::AfterRead(read_id) => {
                            self.reply_to_pending_upload(EventResult::ignored(
                                "Superseded by a newer upload",
                            ));
                            self.pending_upload_reply = Some((read_id, response_sender));
                        }
                    },
                }
            }
            AppMessage::AvatarRead {
                mount_id,
                read_id,
                result,
            } => {
                self.complete_avatar_read(mount_id, read_id, result);
            }
        }

        LoopControl::Continue
    }

    pub fn process_event(&mut self, event: Event) -> EventReply {
        if let Some(alert) = self.alert {
            if event == Event::DismissAlert {
                log::info!("Alert dismissed: {}", alert);
                self.alert = None;
                return EventReply::Now(EventResult::Applied);
            }

            return EventReply::Now(EventResult::Blocked(alert.to_string()));
        }

        let result = match event {
            Event::DismissAlert => EventResult::ignored("No alert to dismiss"),
            Event::Navigate(route) => self.navigate(route),
            Event::ChangeLanguage(language) => {
                self.translator.set_language(language);
                EventResult::Applied
            }
            Event::Search(term) => match &mut self.view {
                ActiveView::ContactList(view) => {
                    view.set_search_term(term);
                    EventResult::Applied
                }
                _ => only_on(Route::ContactList),
            },
            Event::ClearSearch => match &mut self.view {
                ActiveView::ContactList(view) => {
                    view.clear_search();
                    EventResult::Applied
                }
                _ => only_on(Route::ContactList),
            },
            Event::DeleteContact(id) => match &mut self.view {
                ActiveView::ContactList(view) => {
                    if view.delete(id) {
                        log::info!("🗑️ Deleted contact [{}]", id);
                        EventResult::Applied
                    } else {
                        EventResult::Ignored(format!("No contact with id {}", id))
                    }
                }
                _ => only_on(Route::ContactList),
            },
            Event::GoToPage(page) => match &mut self.view {
                ActiveView::ContactList(view) => match view.go_to_page(page) {
                    true => EventResult::Applied,
                    false => EventResult::Ignored(format!("Page {} does not exist", page)),
                },
                _ => only_on(Route::ContactList),
            },
            Event::NextPage => match &mut self.view {
                ActiveView::ContactList(view) => match view.next_page() {
                    true => EventResult::Applied,
                    false => EventResult::ignored("Already on the last page"),
                },
                _ => only_on(Route::ContactList),
            },
            Event::PreviousPage => match &mut self.view {
                ActiveView::ContactList(view) => match view.previous_page() {
                    true => EventResult::Applied,
                    false => EventResult::ignored("Already on the first page"),
                },
                _ => only_on(Route::ContactList),
            },
            Event::SetField(field, value) => match &mut self.view {
                ActiveView::ContactCreate(form) => match form.input(field, value) {
                    true => EventResult::Applied,
                    false => EventResult::ignored("Close the notification first"),
                },
                _ => only_on(Route::ContactCreate),
            },
            Event::Submit => match &mut self.view {
                ActiveView::ContactCreate(form) => match form.submit() {
                    Some(SubmitOutcome::Valid(draft)) => {
                        // Drafts are not added anywhere, the list regenerates on mount
                        log::info!(
                            "✅ Contact form valid [{} {}, {}]",
                            draft.first_name,
                            draft.last_name,
                            draft.age
                        );
                        EventResult::Applied
                    }
                    Some(SubmitOutcome::Invalid(_)) => EventResult::Applied,
                    None => EventResult::ignored("Close the notification first"),
                },
                _ => only_on(Route::ContactCreate),
            },
            Event::Cancel => match &self.view {
                ActiveView::ContactCreate(form) => {
                    let route = form.cancel();
                    self.navigate(route)
                }
                _ => only_on(Route::ContactCreate),
            },
            Event::AcknowledgeNotification => {
                let next_route = match &mut self.view {
                    ActiveView::ContactCreate(form) if form.notification().is_some() => {
                        Ok(form.acknowledge())
                    }
                    ActiveView::ContactCreate(_) => {
                        Err(EventResult::ignored("No notification open"))
                    }
                    _ => Err(only_on(Route::ContactCreate)),
                };

                match next_route {
                    Ok(Some(route)) => self.navigate(route),
                    Ok(None) => EventResult::Applied,
                    Err(result) => result,
                }
            }
            Event::UploadAvatar(upload) => {
                let ActiveView::Home(view) = &mut self.view else {
                    return EventReply::Now(only_on(Route::Home));
                };

                if let Err(err) = validate_upload(&upload) {
                    log::warn!("Rejected upload [{}]: {}", upload.path.display(), err);
                    return EventReply::Now(self.raise_alert(err.message_key()));
                }

                let mount_id = view.mount_id();
                let read_id = ReadId::new();
                let app_sender = self.app_sender.clone();

                let handle = self.runtime.spawn(async move {
                    let result = read_as_data_url(upload).await;
                    let _ = app_sender.send(AppMessage::AvatarRead {
                        mount_id,
                        read_id,
                        result,
                    });
                });

                view.track_read(read_id, handle);

                return EventReply::AfterRead(read_id);
            }
            Event::OpenLocationPanel => match &mut self.view {
                ActiveView::Home(view) => {
                    view.open_location_panel();
                    EventResult::Applied
                }
                _ => only_on(Route::Home),
            },
            Event::Locate => {
                let position = match &mut self.view {
                    ActiveView::Home(view) if view.location_panel_open() => {
                        let position = self.location_provider.current_position();
                        view.close_location_panel();

                        if let Ok(coordinates) = position {
                            log::info!("📍 Located [{}]", coordinates);
                            view.set_location(coordinates);
                        }

                        Ok(position)
                    }
                    ActiveView::Home(_) => Err(EventResult::ignored("Location panel is not open")),
                    _ => Err(only_on(Route::Home)),
                };

                match position {
                    Ok(Ok(_)) => EventResult::Applied,
                    Ok(Err(err)) => self.raise_alert(err.message_key()),
                    Err(result) => result,
                }
            }
        };

        EventReply::Now(result)
    }

    /// Mounts a fresh view for `route` and drops the old one
    fn navigate(&mut self, route: Route) -> EventResult {
        if route == self.route {
            return EventResult::Ignored(format!("Already on {}", route));
        }

        if matches!(self.view, ActiveView::Home(_)) {
            self.reply_to_pending_upload(EventResult::ignored("Upload cancelled, view unmounted"));
        }

        self.view = match route {
            Route::Home => {
                ActiveView::Home(ProfileView::mount(self.profile.clone(), self.storage.as_ref()))
            }
            Route::ContactList => {
                ActiveView::ContactList(ContactListView::mount(&mut self.rng, &self.name_pools))
            }
            Route::ContactCreate => ActiveView::ContactCreate(ContactForm::new()),
        };

        log::info!("🧭 Navigated [{} -> {}]", self.route, route);
        self.route = route;

        EventResult::Applied
    }

    fn raise_alert(&mut self, message_key: &'static str) -> EventResult {
        log::warn!("⚠️ Alert raised: {}", message_key);
        self.alert = Some(message_key);

        EventResult::Alert(message_key.to_string())
    }

    fn reply_to_pending_upload(&mut self, result: EventResult) {
        if let Some((_, response_sender)) = self.pending_upload_reply.take() {
            let _ = response_sender.send(AppResponse::Event(result));
        }
    }

    /// Completions for a view that is no longer mounted, or for a read a newer upload replaced,
    /// are dropped without touching storage
    fn complete_avatar_read(
        &mut self,
        mount_id: MountId,
        read_id: ReadId,
        result: Result<String, UploadError>,
    ) {
        let view = match &mut self.view {
            ActiveView::Home(view) if view.mount_id() == mount_id => view,
            _ => {
                log::info!("Discarding avatar read for unmounted view [{}]", mount_id);
                return;
            }
        };

        if !view.finish_read(read_id) {
            log::info!("Discarding superseded avatar read [{}]", read_id);
            return;
        }

        let event_result = match result {
            Ok(data_url) => {
                if let Err(err) = view.apply_image(data_url, self.storage.as_mut()) {
                    log::error!("Unable to persist avatar: {}", err);
                }

                log::info!("🖼️ Avatar updated [{}]", mount_id);
                EventResult::Applied
            }
            Err(err) => {
                log::warn!("Avatar read failed: {}", err);
                self.raise_alert(err.message_key())
            }
        };

        match self.pending_upload_reply.take() {
            Some((pending_read_id, response_sender)) if pending_read_id == read_id => {
                let _ = response_sender.send(AppResponse::Event(event_result));
            }
            pending => self.pending_upload_reply = pending,
        }
    }

    pub fn screen(&self) -> Screen {
        let view = match &self.view {
            ActiveView::Home(view) => ViewScreen::Home(HomeScreen::build(view, &self.translator)),
            ActiveView::ContactList(view) => {
                ViewScreen::ContactList(ContactListScreen::build(view, &self.translator))
            }
            ActiveView::ContactCreate(form) => {
                ViewScreen::ContactCreate(ContactCreateScreen::build(form, &self.translator))
            }
        };

        Screen {
            route: self.route,
            path: self.route.path().to_string(),
            language: self.translator.language(),
            nav: NavLink::build_all(self.route, &self.translator),
            alert: self
                .alert
                .map(|message_key| AlertScreen::build(message_key, &self.translator)),
            view,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn alert(&self) -> Option<&'static str> {
        self.alert
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }
}

fn only_on(route: Route) -> EventResult {
    EventResult::Ignored(format!("Only available on {}", route))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use uuid::Uuid;

    use crate::{
        consts::consts::{ContactId, AVATAR_STORAGE_KEY},
        form::form::{FormField, NotificationKind},
        i18n::i18n::Language,
        location::{Coordinates, LocationSource},
        profile::avatar::FileUpload,
    };

    use super::*;

    fn direct_app(options: AppOptions) -> App {
        let (app_sender, app_receiver) = mpsc::channel::<AppMessage>();
        App::new(options, app_sender, app_receiver).expect("should create app")
    }

    fn temp_image(name: &str, bytes: &[u8]) -> PathBuf {
        let directory: PathBuf = ["/", "tmp", "contactbook", &Uuid::new_v4().to_string()]
            .iter()
            .collect();
        std::fs::create_dir_all(&directory).unwrap();

        let path = directory.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn home(screen: Screen) -> HomeScreen {
        match screen.view {
            ViewScreen::Home(home) => home,
            other => panic!("Expected home view, got {:?}", other),
        }
    }

    fn contact_list(screen: Screen) -> ContactListScreen {
        match screen.view {
            ViewScreen::ContactList(list) => list,
            other => panic!("Expected contact list view, got {:?}", other),
        }
    }

    fn contact_create(screen: Screen) -> ContactCreateScreen {
        match screen.view {
            ViewScreen::ContactCreate(form) => form,
            other => panic!("Expected contact create view, got {:?}", other),
        }
    }

    fn send(request_manager: &RequestManager, event: Event) -> EventResult {
        request_manager.send_event(event).expect("should not timeout")
    }

    fn shutdown(request_manager: RequestManager) {
        let shutdown_response = request_manager
            .send_shutdown_request()
            .expect("should not timeout");

        assert_eq!(shutdown_response, "Successfully shutdown app".to_string());
    }

    #[test]
    fn starts_on_home_with_the_default_image() {
        let request_manager = App::spawn(AppOptions::new_test()).expect("should start");

        let screen = request_manager.send_screen_request().unwrap();

        assert_eq!(screen.route, Route::Home);
        assert_eq!(screen.alert, None);
        assert_eq!(home(screen).profile_image, Profile::bundled().image_url);

        shutdown(request_manager);
    }

    mod navigation {
        use super::*;

        #[test]
        fn entering_the_list_mounts_a_fresh_dataset() {
            let request_manager = App::spawn(AppOptions::new_test()).unwrap();

            // Given the list on page 3
            assert_eq!(
                send(&request_manager, Event::Navigate(Route::ContactList)),
                EventResult::Applied
            );
            send(&request_manager, Event::GoToPage(3));

            // When navigating to the same route
            let same_route = send(&request_manager, Event::Navigate(Route::ContactList));

            // Then nothing is remounted
            assert!(matches!(same_route, EventResult::Ignored(_)));
            let list = contact_list(request_manager.send_screen_request().unwrap());
            assert_eq!(list.current_page, 3);

            // And leaving and coming back starts over
            send(&request_manager, Event::Navigate(Route::Home));
            send(&request_manager, Event::Navigate(Route::ContactList));

            let list = contact_list(request_manager.send_screen_request().unwrap());
            assert_eq!(list.current_page, 1);
            assert_eq!(list.total_pages, 5);
            assert_eq!(list.rows.len(), 20);

            shutdown(request_manager);
        }

        #[test]
        fn view_events_only_apply_to_their_view() {
            let mut app = direct_app(AppOptions::new_test());

            assert!(matches!(
                app.process_event(Event::Search("john".to_string())),
                EventReply::Now(EventResult::Ignored(_))
            ));
            assert!(matches!(
                app.process_event(Event::Submit),
                EventReply::Now(EventResult::Ignored(_))
            ));
            assert!(matches!(
                app.process_event(Event::DismissAlert),
                EventReply::Now(EventResult::Ignored(_))
            ));
        }

        #[test]
        fn language_switch_changes_text_not_contacts() {
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactList));
            let english = contact_list(app.screen());

            app.process_event(Event::ChangeLanguage(Language::Th));
            let screen = app.screen();
            assert_eq!(screen.language, Language::Th);
            let thai = contact_list(screen);

            assert_ne!(english.title, thai.title);
            assert_eq!(english.rows, thai.rows);
        }
    }

    mod contact_list {
        use super::*;

        #[test]
        fn delete_removes_the_row() {
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactList));

            let first_id = contact_list(app.screen()).rows[0].id;

            assert_eq!(
                app.process_event(Event::DeleteContact(ContactId(first_id))),
                EventReply::Now(EventResult::Applied)
            );
            assert!(matches!(
                app.process_event(Event::DeleteContact(ContactId(first_id))),
                EventReply::Now(EventResult::Ignored(_))
            ));

            let list = contact_list(app.screen());
            assert!(list.rows.iter().all(|row| row.id != first_id));
            assert_eq!(
                list.page_summary,
                Some("Page 1 of 5 (99 total contacts)".to_string())
            );
        }

        #[test]
        fn paging_past_the_end_is_ignored() {
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactList));

            assert!(matches!(
                app.process_event(Event::PreviousPage),
                EventReply::Now(EventResult::Ignored(_))
            ));
            assert!(matches!(
                app.process_event(Event::GoToPage(6)),
                EventReply::Now(EventResult::Ignored(_))
            ));
            assert_eq!(
                app.process_event(Event::NextPage),
                EventReply::Now(EventResult::Applied)
            );
            assert_eq!(contact_list(app.screen()).current_page, 2);
        }
    }

    mod contact_create {
        use super::*;

        #[test]
        fn valid_submission_navigates_to_the_list_without_adding() {
            // Given a filled in form
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactCreate));
            app.process_event(Event::SetField(FormField::FirstName, "สมชาย".to_string()));
            app.process_event(Event::SetField(FormField::LastName, "Smith".to_string()));
            app.process_event(Event::SetField(FormField::Age, "42".to_string()));

            // When it is submitted
            assert_eq!(
                app.process_event(Event::Submit),
                EventReply::Now(EventResult::Applied)
            );

            // Then a success notification is shown
            let form = contact_create(app.screen());
            assert_eq!(
                form.notification.map(|n| n.kind),
                Some(NotificationKind::Success)
            );

            // And acknowledging it opens a freshly generated list
            app.process_event(Event::AcknowledgeNotification);
            assert_eq!(app.route(), Route::ContactList);
            let list = contact_list(app.screen());
            assert_eq!(
                list.page_summary,
                Some("Page 1 of 5 (100 total contacts)".to_string())
            );
        }

        #[test]
        fn invalid_submission_stays_on_the_form() {
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactCreate));
            app.process_event(Event::SetField(FormField::Age, "abc".to_string()));

            app.process_event(Event::Submit);
            let form = contact_create(app.screen());

            assert_eq!(
                form.notification.map(|n| n.kind),
                Some(NotificationKind::Error)
            );
            assert_eq!(
                form.fields[2].error,
                Some("Please enter numbers only".to_string())
            );

            app.process_event(Event::AcknowledgeNotification);
            assert_eq!(app.route(), Route::ContactCreate);
            assert_eq!(contact_create(app.screen()).notification, None);
        }

        #[test]
        fn cancel_goes_to_the_list() {
            let mut app = direct_app(AppOptions::new_test());
            app.process_event(Event::Navigate(Route::ContactCreate));
            app.process_event(Event::SetField(FormField::FirstName, "John".to_string()));

            app.process_event(Event::Cancel);

            assert_eq!(app.route(), Route::ContactList);
        }
    }

    mod avatar {
        use std::time::Duration;

        use super::*;

        const STORED_AVATAR: &str = "data:image/png;base64,c3RvcmVk";

        /// Tracks a finished task on the home view, as if an upload had started
        fn track_read(app: &mut App) -> (MountId, ReadId) {
            let read_id = ReadId::new();
            let handle = app.runtime.spawn(async {});

            let ActiveView::Home(view) = &mut app.view else {
                panic!("should be on home");
            };
            view.track_read(read_id, handle);

            (view.mount_id(), read_id)
        }

        fn upload_request(path: PathBuf) -> (AppMessage, oneshot::Receiver<AppResponse>) {
            let (response_sender, response_receiver) = oneshot::channel::<AppResponse>();
            let upload = FileUpload::from_path(path, None).unwrap();

            let message = AppMessage::Request(AppRequest {
                response_sender,
                action: AppRequestAction::Event(Event::UploadAvatar(upload)),
            });

            (message, response_receiver)
        }

        #[test_log::test]
        fn oversized_upload_raises_a_blocking_alert() {
            // Given a persisted avatar and a 6 MiB image
            let options = AppOptions::new_test_file();
            options
                .storage_engine
                .get_engine()
                .unwrap()
                .set_item(AVATAR_STORAGE_KEY, STORED_AVATAR.to_string())
                .unwrap();

            let request_manager = App::spawn(options.clone()).unwrap();
            let upload = FileUpload {
                path: PathBuf::from("/tmp/contactbook/large.png"),
                mime_type: "image/png".to_string(),
                size: 6 * 1024 * 1024,
            };

            // When it is uploaded
            let result = send(&request_manager, Event::UploadAvatar(upload));

            // Then an alert is raised and every other event is blocked until it is dismissed
            assert_eq!(
                result,
                EventResult::Alert("File size must be less than 5MB".to_string())
            );
            assert_eq!(
                send(&request_manager, Event::Navigate(Route::ContactList)),
                EventResult::Blocked("File size must be less than 5MB".to_string())
            );

            let screen = request_manager.send_screen_request().unwrap();
            assert!(screen.alert.is_some());

            assert_eq!(
                send(&request_manager, Event::DismissAlert),
                EventResult::Applied
            );

            // And the displayed and persisted avatar are unchanged
            let screen = request_manager.send_screen_request().unwrap();
            assert_eq!(screen.alert, None);
            assert_eq!(home(screen).profile_image, STORED_AVATAR);
            shutdown(request_manager);

            let app = direct_app(options);
            assert_eq!(
                app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(),
                Some(STORED_AVATAR.to_string())
            );
        }

        #[test]
        fn non_images_are_rejected() {
            let mut app = direct_app(AppOptions::new_test());
            let path = temp_image("notes.txt", b"hello");
            let upload = FileUpload::from_path(path, None).unwrap();

            let reply = app.process_event(Event::UploadAvatar(upload));

            assert_eq!(
                reply,
                EventReply::Now(EventResult::Alert(
                    "Please select an image file".to_string()
                ))
            );
            assert_eq!(app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(), None);
        }

        #[test_log::test]
        fn uploaded_image_is_displayed_and_survives_restart() {
            // Given a file backed app
            let options = AppOptions::new_test_file();
            let request_manager = App::spawn(options.clone()).unwrap();
            let path = temp_image("avatar.png", b"abc");
            let upload = FileUpload::from_path(path, None).unwrap();

            // When an image is uploaded
            assert_eq!(
                send(&request_manager, Event::UploadAvatar(upload)),
                EventResult::Applied
            );

            // Then it is displayed
            let screen = request_manager.send_screen_request().unwrap();
            assert_eq!(home(screen).profile_image, "data:image/png;base64,YWJj");
            shutdown(request_manager);

            // And a new app on the same storage starts with it
            let app = direct_app(options);
            assert_eq!(
                home(app.screen()).profile_image,
                "data:image/png;base64,YWJj"
            );
        }

        #[test]
        fn stale_completion_changes_nothing() {
            // Given a mounted home view
            let mut app = direct_app(AppOptions::new_test());

            // When a read for some other mount completes
            app.handle_message(AppMessage::AvatarRead {
                mount_id: MountId::new(),
                read_id: ReadId::new(),
                result: Ok("data:image/png;base64,YWJj".to_string()),
            });

            // Then neither display nor storage change
            assert_eq!(home(app.screen()).profile_image, Profile::bundled().image_url);
            assert_eq!(app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(), None);
        }

        #[test]
        fn completion_after_remount_is_discarded() {
            let mut app = direct_app(AppOptions::new_test());
            let ActiveView::Home(view) = app.view() else {
                panic!("should start on home");
            };
            let first_mount = view.mount_id();

            app.process_event(Event::Navigate(Route::ContactList));
            app.process_event(Event::Navigate(Route::Home));

            app.handle_message(AppMessage::AvatarRead {
                mount_id: first_mount,
                read_id: ReadId::new(),
                result: Ok("data:image/png;base64,YWJj".to_string()),
            });

            assert_eq!(app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(), None);
        }

        #[test]
        fn failed_read_raises_an_alert() {
            let mut app = direct_app(AppOptions::new_test());
            let (mount_id, read_id) = track_read(&mut app);

            app.handle_message(AppMessage::AvatarRead {
                mount_id,
                read_id,
                result: Err(UploadError::Unreadable("gone".to_string())),
            });

            assert_eq!(app.alert(), Some("Unable to read the selected file"));
            assert_eq!(home(app.screen()).profile_image, Profile::bundled().image_url);
        }

        #[test_log::test]
        fn replaced_upload_cannot_overwrite_the_newer_one() {
            // Given two uploads on the same view, the second replacing the first
            let mut app = direct_app(AppOptions::new_test());
            let (first, first_reply) = upload_request(temp_image("first.png", b"abc"));
            let (second, second_reply) = upload_request(temp_image("second.png", b"xyz"));
            let ActiveView::Home(view) = app.view() else {
                panic!("should start on home");
            };
            let mount_id = view.mount_id();

            app.handle_message(first);
            app.handle_message(second);

            assert_eq!(
                first_reply.try_recv().ok(),
                Some(AppResponse::Event(EventResult::ignored(
                    "Superseded by a newer upload"
                )))
            );

            // When a completion for a read other than the tracked one arrives
            app.handle_message(AppMessage::AvatarRead {
                mount_id,
                read_id: ReadId::new(),
                result: Ok("data:image/png;base64,AAAA".to_string()),
            });

            // Then nothing is displayed or stored, and the second read is still tracked
            assert_eq!(app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(), None);
            assert_eq!(home(app.screen()).profile_image, Profile::bundled().image_url);
            let ActiveView::Home(view) = app.view() else {
                panic!("should still be on home");
            };
            assert!(view.is_reading());
            assert!(second_reply.try_recv().is_err());

            // And the second caller gets the second image once its read completes
            let second_result = loop {
                if let Ok(response) = second_reply.try_recv() {
                    break response;
                }

                let message = app
                    .app_receiver
                    .recv_timeout(Duration::from_secs(5))
                    .expect("read should complete");
                app.handle_message(message);
            };

            assert_eq!(second_result, AppResponse::Event(EventResult::Applied));
            assert_eq!(
                app.storage().get_item(AVATAR_STORAGE_KEY).unwrap(),
                Some("data:image/png;base64,eHl6".to_string())
            );
            assert_eq!(
                home(app.screen()).profile_image,
                "data:image/png;base64,eHl6"
            );
        }
    }

    mod location {
        use super::*;

        #[test]
        fn fixed_source_shows_coordinates() {
            let options = AppOptions::new_test().set_location_source(LocationSource::Fixed(
                Coordinates {
                    latitude: 13.7563,
                    longitude: 100.5018,
                },
            ));
            let mut app = direct_app(options);

            app.process_event(Event::OpenLocationPanel);
            assert!(home(app.screen()).location_panel_open);

            assert_eq!(
                app.process_event(Event::Locate),
                EventReply::Now(EventResult::Applied)
            );

            let screen = home(app.screen());
            assert!(!screen.location_panel_open);
            assert_eq!(
                screen.location,
                Some("Your location: 13.7563, 100.5018".to_string())
            );
        }

        #[test]
        fn denied_permission_alerts_and_closes_the_panel() {
            let options = AppOptions::new_test().set_location_source(LocationSource::Denied);
            let mut app = direct_app(options);

            app.process_event(Event::OpenLocationPanel);
            let reply = app.process_event(Event::Locate);

            assert_eq!(
                reply,
                EventReply::Now(EventResult::Alert("Location permission denied".to_string()))
            );

            let screen = app.screen();
            assert_eq!(
                screen.alert.as_ref().map(|alert| alert.message.as_str()),
                Some("Location permission denied")
            );
            let home = home(screen);
            assert!(!home.location_panel_open);
            assert_eq!(home.location, None);
        }

        #[test]
        fn locate_needs_an_open_panel() {
            let mut app = direct_app(AppOptions::new_test());

            assert!(matches!(
                app.process_event(Event::Locate),
                EventReply::Now(EventResult::Ignored(_))
            ));
        }
    }
}
