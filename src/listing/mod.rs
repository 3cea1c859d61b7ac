pub mod controller;
pub mod pagination;
pub mod projection;
