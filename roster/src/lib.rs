use thiserror::Error;

pub mod entry;
pub mod parse;

pub use entry::{RosterEntry, SpecialEntry};
pub use parse::{parse_roster, parse_roster_entry};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid roster format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
