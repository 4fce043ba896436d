//! Ref name validation following git-style conventions.
//!
//! A valid ref name is either `HEAD` or starts with `refs/` and:
//! - Must not contain whitespace, control characters, `~`, `^`, `:`, `?`,
//!   `*`, `[`, `\`
//! - Must not contain `..` or `@{`
//! - Must not end with `/` or `.`
//! - Must not contain empty components (`//`)
//! - No component may start with `.` or end with `.lock`

use crate::error::{RefError, Result};
use crate::types::{HEAD, R_REFS};

/// Characters that are forbidden anywhere in a ref name.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '~', '^', ':', '?', '*', '[', '\\'];

fn invalid(name: &str, reason: impl Into<String>) -> RefError {
    RefError::InvalidRefName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate a full ref name, returning `Ok(())` if valid.
///
/// # Examples
///
/// ```
/// use reftree_refs::names::validate_ref_name;
///
/// assert!(validate_ref_name("HEAD").is_ok());
/// assert!(validate_ref_name("refs/heads/feature/auth").is_ok());
/// assert!(validate_ref_name("main").is_err());
/// assert!(validate_ref_name("refs/heads/bad..name").is_err());
/// ```
pub fn validate_ref_name(name: &str) -> Result<()> {
    if name == HEAD {
        return Ok(());
    }
    let Some(rest) = name.strip_prefix(R_REFS) else {
        return Err(invalid(name, format!("must be {HEAD} or start with '{R_REFS}'")));
    };
    if rest.is_empty() {
        return Err(invalid(name, "missing name after 'refs/'"));
    }

    if let Some(ch) = name.chars().find(|c| c.is_control() || FORBIDDEN_CHARS.contains(c)) {
        return Err(invalid(name, format!("contains forbidden character: {ch:?}")));
    }
    if name.contains("..") {
        return Err(invalid(name, "must not contain '..'"));
    }
    if name.contains("@{") {
        return Err(invalid(name, "must not contain '@{'"));
    }
    if name.ends_with('/') || name.ends_with('.') {
        return Err(invalid(name, "must not end with '/' or '.'"));
    }

    for component in rest.split('/') {
        if component.is_empty() {
            return Err(invalid(name, "path components must not be empty"));
        }
        if component.starts_with('.') {
            return Err(invalid(
                name,
                format!("component must not start with '.': {component:?}"),
            ));
        }
        if component.ends_with(".lock") {
            return Err(invalid(
                name,
                format!("component must not end with '.lock': {component:?}"),
            ));
        }
    }

    Ok(())
}

/// Validate the target of a symbolic ref. Targets must live under `refs/`.
pub fn validate_link_target(target: &str) -> Result<()> {
    if !target.starts_with(R_REFS) {
        return Err(invalid(target, format!("link target must start with '{R_REFS}'")));
    }
    validate_ref_name(target)
}
