use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Profile page
    Home,
    ContactList,
    ContactCreate,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No route matches path: {0}")]
    NotFound(String),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::ContactList => "/contacts/list",
            Route::ContactCreate => "/contacts/create",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();

        // "/contacts/list/" and "/contacts/list" are the same route
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };

        match normalized {
            "/" => Ok(Route::Home),
            "/contacts" | "/contacts/list" => Ok(Route::ContactList),
            "/contacts/create" => Ok(Route::ContactCreate),
            _ => Err(RouteError::NotFound(trimmed.to_string())),
        }
    }
}
