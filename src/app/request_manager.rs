use std::{sync::mpsc::Sender, time::Duration};

use thiserror::Error;

use crate::{
    consts::consts::{MountId, ReadId, REQUEST_TIMEOUT, UPLOAD_REQUEST_TIMEOUT},
    profile::avatar::UploadError,
};

use super::{
    event::{Event, EventResult},
    screen::Screen,
};

pub enum AppRequestAction {
    Event(Event),
    Screen,
    Shutdown,
}

impl AppRequestAction {
    pub fn log_format(&self) -> String {
        match self {
            AppRequestAction::Event(event) => event.log_format(),
            AppRequestAction::Screen => "Screen".to_string(),
            AppRequestAction::Shutdown => "Shutdown".to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum AppResponse {
    Event(EventResult),
    Screen(Box<Screen>),
    SuccessStatus(String),
}

pub struct AppRequest {
    pub response_sender: oneshot::Sender<AppResponse>,
    pub action: AppRequestAction,
}

/// Everything the app loop receives: requests from front ends, and completions of its own
/// background work
pub enum AppMessage {
    Request(AppRequest),
    AvatarRead {
        mount_id: MountId,
        read_id: ReadId,
        result: Result<String, UploadError>,
    },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestManagerError {
    #[error("App took too long to respond to request")]
    AppTimeout,
    #[error("App is no longer running")]
    AppStopped,
    #[error("Unexpected response to request: {0}")]
    UnexpectedResponse(String),
}

/// Handle front ends use to talk to a running `App`. Cheap to clone, one per client.
#[derive(Clone)]
pub struct RequestManager {
    app_sender: Sender<AppMessage>,
}

impl RequestManager {
    pub fn new(app_sender: Sender<AppMessage>) -> Self {
        Self { app_sender }
    }

    pub fn send_event(&self, event: Event) -> Result<EventResult, RequestManagerError> {
        // Uploads reply only once the file has been read
        let timeout = match event {
            Event::UploadAvatar(_) => UPLOAD_REQUEST_TIMEOUT,
            _ => REQUEST_TIMEOUT,
        };

        match self.send_app_request(AppRequestAction::Event(event), timeout)? {
            AppResponse::Event(result) => Ok(result),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    pub fn send_screen_request(&self) -> Result<Screen, RequestManagerError> {
        match self.send_app_request(AppRequestAction::Screen, REQUEST_TIMEOUT)? {
            AppResponse::Screen(screen) => Ok(*screen),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    /// Sends a shutdown request to the app and returns the app's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        match self.send_app_request(AppRequestAction::Shutdown, REQUEST_TIMEOUT)? {
            AppResponse::SuccessStatus(status) => Ok(status),
            other => Err(RequestManagerError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    pub fn send_app_request(
        &self,
        action: AppRequestAction,
        timeout: Duration,
    ) -> Result<AppResponse, RequestManagerError> {
        let (response_sender, response_receiver) = oneshot::channel::<AppResponse>();

        let request = AppRequest {
            response_sender,
            action,
        };

        // The app responds on response_receiver once it has processed the request
        self.app_sender
            .send(AppMessage::Request(request))
            .map_err(|_| RequestManagerError::AppStopped)?;

        match response_receiver.recv_timeout(timeout) {
            Ok(response) => Ok(response),
            Err(oneshot::RecvTimeoutError::Timeout) => Err(RequestManagerError::AppTimeout),
            Err(oneshot::RecvTimeoutError::Disconnected) => Err(RequestManagerError::AppStopped),
        }
    }
}
