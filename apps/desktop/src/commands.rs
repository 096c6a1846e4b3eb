use std::str::FromStr;

use client_core::{ContactField, StatusFilter};
use shared::domain::{ContactId, ContactStatus};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  go <path>              navigate (/, /contacts, /deals)
  nav                    show navigation and theme
  theme                  toggle dark mode
  list                   show the filtered contact list
  search [term]          set the search term (empty clears)
  filter <status|all>    filter by status
  add                    open the add-contact form
  set <field> <value>    edit a form field
  status <status>        set the draft status
  submit | cancel        submit or leave the form
  show <id> | back       open or close a contact
  delete <id>            delete a contact
  deals                  show the deal pipeline
  json                   print the filtered contacts as JSON
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Nav,
    Theme,
    List,
    Search(String),
    Filter(StatusFilter),
    Add,
    Set(ContactField, String),
    Status(ContactStatus),
    Submit,
    Cancel,
    Show(ContactId),
    Back,
    Delete(ContactId),
    Deals,
    Json,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("{0}")]
    Invalid(String),
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn parsed<T>(raw: &str) -> Result<T, ParseCommandError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|err: T::Err| ParseCommandError::Invalid(format!("'{raw}': {err}")))
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(ParseCommandError::Empty),
            "go" => Command::Go(required(rest, "go", "a path")?.to_string()),
            "nav" => Command::Nav,
            "theme" => Command::Theme,
            "list" | "ls" => Command::List,
            "search" => Command::Search(rest.to_string()),
            "filter" => Command::Filter(parsed(required(rest, "filter", "a status or 'all'")?)?),
            "add" => Command::Add,
            "set" => {
                let rest = required(rest, "set", "a field and a value")?;
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Set(parsed(field)?, value.trim().to_string())
            }
            "status" => Command::Status(parsed(required(rest, "status", "a status")?)?),
            "submit" => Command::Submit,
            "cancel" => Command::Cancel,
            "show" => Command::Show(parsed(required(rest, "show", "a contact id")?)?),
            "back" => Command::Back,
            "delete" | "rm" => Command::Delete(parsed(required(rest, "delete", "a contact id")?)?),
            "deals" => Command::Deals,
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arguments() {
        assert_eq!(
            "set email  ada@example.com ".parse(),
            Ok(Command::Set(ContactField::Email, "ada@example.com".into()))
        );
        assert_eq!(
            "set company Davis & Associates".parse(),
            Ok(Command::Set(ContactField::Company, "Davis & Associates".into()))
        );
        assert_eq!("show 3".parse(), Ok(Command::Show(ContactId(3))));
        assert_eq!(
            "filter customer".parse(),
            Ok(Command::Filter(StatusFilter::Only(ContactStatus::Customer)))
        );
        assert_eq!("FILTER all".parse(), Ok(Command::Filter(StatusFilter::All)));
        assert_eq!("search".parse(), Ok(Command::Search(String::new())));
    }

    #[test]
    fn blank_value_is_allowed_for_set() {
        assert_eq!(
            "set phone".parse(),
            Ok(Command::Set(ContactField::Phone, String::new()))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!("   ".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(ParseCommandError::Unknown("frobnicate".into()))
        );
        assert!(matches!(
            "delete".parse::<Command>(),
            Err(ParseCommandError::MissingArgument { command: "delete", .. })
        ));
        assert!(matches!(
            "show seven".parse::<Command>(),
            Err(ParseCommandError::Invalid(_))
        ));
        assert!(matches!(
            "set nickname Ada".parse::<Command>(),
            Err(ParseCommandError::Invalid(_))
        ));
    }
}
