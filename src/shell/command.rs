use std::{path::PathBuf, str::FromStr};

use thiserror::Error;

use crate::{
    app::event::Event, consts::consts::ContactId, form::form::FormField, i18n::i18n::Language,
    navigation::route::Route,
};

pub const HELP: &str = "\
Navigation:   home | list | create | go <path> | lang <en|th>
Home:         upload <path> [mime] | location | locate
Contact list: search <text> | clear | delete <id> | page <n> | next | prev
Contact form: set <first|last|age> <value> | submit | cancel | ok
Other:        dismiss | show | help | quit";

/// One line typed into the shell
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Event(Event),
    /// Needs the file's metadata before it becomes an event
    Upload {
        path: PathBuf,
        mime_type: Option<String>,
    },
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}, type `help` for a list of commands")]
    Unknown(String),
    #[error("`{command}` expects {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("`{command}` got an invalid value [{value}]: {reason}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        reason: String,
    },
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandParseError> {
    if rest.trim().is_empty() {
        return Err(CommandParseError::MissingArgument { command, argument });
    }

    Ok(rest.trim())
}

fn parse_number<T: FromStr>(
    rest: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<T, CommandParseError>
where
    T::Err: std::fmt::Display,
{
    let value = required(rest, command, argument)?;

    value
        .parse::<T>()
        .map_err(|e| CommandParseError::InvalidArgument {
            command,
            value: value.to_string(),
            reason: format!("{}", e),
        })
}

fn parse_field(value: &str) -> Result<FormField, CommandParseError> {
    match value {
        "first" | "firstName" => Ok(FormField::FirstName),
        "last" | "lastName" => Ok(FormField::LastName),
        "age" => Ok(FormField::Age),
        other => Err(CommandParseError::InvalidArgument {
            command: "set",
            value: other.to_string(),
            reason: "expected first, last or age".to_string(),
        }),
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest),
            None => (line.trim_end(), ""),
        };

        let event = match name {
            "" => return Err(CommandParseError::Empty),
            "show" => return Ok(Command::Show),
            "help" | "?" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),

            "home" => Event::Navigate(Route::Home),
            "list" => Event::Navigate(Route::ContactList),
            "create" => Event::Navigate(Route::ContactCreate),
            "go" => {
                let path = required(rest, "go", "a path")?;
                let route = path
                    .parse::<Route>()
                    .map_err(|e| CommandParseError::InvalidArgument {
                        command: "go",
                        value: path.to_string(),
                        reason: format!("{}", e),
                    })?;

                Event::Navigate(route)
            }
            "lang" => {
                let code = required(rest, "lang", "a language code (en or th)")?;
                let language =
                    code.parse::<Language>()
                        .map_err(|_| CommandParseError::InvalidArgument {
                            command: "lang",
                            value: code.to_string(),
                            reason: "expected en or th".to_string(),
                        })?;

                Event::ChangeLanguage(language)
            }

            "upload" => {
                let arguments = required(rest, "upload", "a file path")?;
                let mut parts = arguments.split_whitespace();

                return Ok(Command::Upload {
                    path: PathBuf::from(parts.next().unwrap_or_default()),
                    mime_type: parts.next().map(|mime_type| mime_type.to_string()),
                });
            }
            "location" => Event::OpenLocationPanel,
            "locate" => Event::Locate,

            // Search keeps the raw text, trimming is part of the search itself
            "search" => Event::Search(rest.to_string()),
            "clear" => Event::ClearSearch,
            "delete" => Event::DeleteContact(ContactId(parse_number(rest, "delete", "an id")?)),
            "page" => Event::GoToPage(parse_number(rest, "page", "a page number")?),
            "next" => Event::NextPage,
            "prev" | "previous" => Event::PreviousPage,

            "set" => {
                let arguments = required(rest, "set", "a field and a value")?;
                let (field, value) = match arguments.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (arguments, ""),
                };

                Event::SetField(parse_field(field)?, value.to_string())
            }
            "submit" => Event::Submit,
            "cancel" => Event::Cancel,
            "ok" => Event::AcknowledgeNotification,

            "dismiss" => Event::DismissAlert,

            other => return Err(CommandParseError::Unknown(other.to_string())),
        };

        Ok(Command::Event(event))
    }
}
