use std::sync::LazyLock;

use regex::Regex;

use crate::payload::Payload;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("missing field {0}")]
    MissingField(String),
    #[error("invalid email address")]
    InvalidEmail,
    #[error("value must be a positive integer")]
    NotPositive,
}

pub type Result<T> = std::result::Result<T, Error>;

// dot-atom local part, then a domain with at least one dot
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
        r"@",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern compiles")
});

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

pub fn require_fields(data: &Payload, names: &[&str]) -> Result<()> {
    match names.iter().find(|name| data.field(name).is_none()) {
        Some(name) => Err(Error::MissingField((*name).to_owned())),
        None => Ok(()),
    }
}

/// Checks the value as sent; surrounding whitespace makes it invalid.
pub fn validate_email(value: &str) -> Result<()> {
    let Some((local, _)) = value.split_once('@') else {
        return Err(Error::InvalidEmail);
    };

    if value.len() > MAX_EMAIL_LEN || local.len() > MAX_LOCAL_LEN || !EMAIL.is_match(value) {
        return Err(Error::InvalidEmail);
    }
    Ok(())
}

/// Returns the parsed count.
pub fn validate_participants(value: &str) -> Result<i64> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::NotPositive),
    }
}
