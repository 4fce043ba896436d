use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The identity recorded in the ref-log for a ref change.
///
/// Mirrors the author/committer line of a git commit: a display name, an
/// email address and the moment the change was made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonIdent {
    name: String,
    email: String,
    when: DateTime<Utc>,
}

impl PersonIdent {
    /// Create an identity with an explicit timestamp.
    ///
    /// Names and emails must not contain `<`, `>` or newlines, since those
    /// delimit the fields of the ref-log line.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        when: DateTime<Utc>,
    ) -> Result<Self, TypeError> {
        let name = name.into();
        let email = email.into();
        for field in [&name, &email] {
            if field.contains(['<', '>', '\n']) {
                return Err(TypeError::InvalidIdent(field.clone()));
            }
        }
        Ok(Self { name, email, when })
    }

    /// Create an identity stamped with the current wall-clock time.
    pub fn now(name: impl Into<String>, email: impl Into<String>) -> Result<Self, TypeError> {
        Self::new(name, email, Utc::now())
    }

    /// Create an identity from seconds since the UNIX epoch.
    pub fn at_epoch_secs(
        name: impl Into<String>,
        email: impl Into<String>,
        secs: i64,
    ) -> Result<Self, TypeError> {
        let when = Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| TypeError::InvalidIdent(format!("timestamp out of range: {secs}")))?;
        Self::new(name, email, when)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn when(&self) -> DateTime<Utc> {
        self.when
    }
}

/// Formats as `Name <email> <epoch-seconds> +0000`.
impl fmt::Display for PersonIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} <{}> {} +0000",
            self.name,
            self.email,
            self.when.timestamp()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_reflog_layout() {
        let ident = PersonIdent::at_epoch_secs("A U Thor", "author@example.com", 1_250_379_778)
            .unwrap();
        assert_eq!(
            ident.to_string(),
            "A U Thor <author@example.com> 1250379778 +0000"
        );
    }

    #[test]
    fn rejects_delimiters_in_fields() {
        assert!(PersonIdent::now("bad<name", "a@b").is_err());
        assert!(PersonIdent::now("name", "a@b>").is_err());
        assert!(PersonIdent::now("multi\nline", "a@b").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let ident = PersonIdent::at_epoch_secs("x", "x@y", 42).unwrap();
        let json = serde_json::to_string(&ident).unwrap();
        let parsed: PersonIdent = serde_json::from_str(&json).unwrap();
        assert_eq!(ident, parsed);
    }
}
