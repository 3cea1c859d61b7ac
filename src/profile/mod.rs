pub mod avatar;
pub mod view;
