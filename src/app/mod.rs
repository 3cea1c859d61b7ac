pub mod app;
pub mod event;
pub mod options;
pub mod request_manager;
pub mod screen;
