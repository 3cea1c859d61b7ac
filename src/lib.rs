pub mod app;
pub mod consts;
pub mod form;
pub mod generator;
pub mod i18n;
pub mod listing;
pub mod location;
pub mod model;
pub mod navigation;
pub mod profile;
pub mod shell;
pub mod storage;
pub mod validation;
