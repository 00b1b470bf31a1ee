//! Field rules shared by construction-time validation and
//! `validate_business_rules`.
//!
//! Both layers call the functions here, so a rule exists in exactly one place.
//! Pure functions only: no I/O, no logging.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::ValidationError;

pub const NAME_MAX_LEN: usize = 100;
pub const HOST_MAX_LEN: usize = 253;
pub const PORT_MIN: i64 = 1;
pub const PORT_MAX: i64 = 65_535;

/// Names that collide with routes or accounts of the hosting platform.
pub const RESERVED_NAMES: &[&str] = &[
    "REDACTED_LDAP_BIND_PASSWORD", "admin", "root", "api", "system", "config", "health",
];

/// Markup and script-injection markers.
pub static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern and cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)[<>]|javascript:|vbscript:|data:text/html|\bon[a-z]+\s*=").expect("valid regex")
});

/// SQL-injection markers.
pub static SQL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(
        r"(?i)--|;|/\*|\*/|'\s*or\s+'|\bor\s+1\s*=\s*1\b|\bunion\s+(all\s+)?select\b|\bdrop\s+(table|database)\b|\bdelete\s+from\b|\binsert\s+into\b|\bxp_cmdshell\b",
    )
    .expect("valid regex")
});

/// Check an application name.
///
/// # Errors
///
/// Returns the first violated rule: empty, too long, reserved (case-insensitive),
/// or containing markup / SQL injection markers.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong {
            len,
            max: NAME_MAX_LEN,
        });
    }
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(trimmed))
    {
        return Err(ValidationError::ReservedName(trimmed.to_string()));
    }
    if MARKUP_RE.is_match(name) {
        return Err(ValidationError::ForbiddenNameContent("markup"));
    }
    if SQL_RE.is_match(name) {
        return Err(ValidationError::ForbiddenNameContent("SQL"));
    }
    Ok(())
}

/// Check a host name or network address.
///
/// # Errors
///
/// Returns an error if the host is blank, contains whitespace, or is longer
/// than a DNS name may be.
pub fn validate_host(host: &str) -> Result<(), ValidationError> {
    if host.trim().is_empty() {
        return Err(ValidationError::EmptyHost);
    }
    if host.chars().any(char::is_whitespace) {
        return Err(ValidationError::HostWhitespace(host.to_string()));
    }
    let len = host.chars().count();
    if len > HOST_MAX_LEN {
        return Err(ValidationError::HostTooLong {
            len,
            max: HOST_MAX_LEN,
        });
    }
    Ok(())
}

/// Check a raw port number and narrow it to `u16`.
///
/// # Errors
///
/// Returns [`ValidationError::PortOutOfRange`] outside `1..=65535`.
pub fn validate_port(port: i64) -> Result<u16, ValidationError> {
    if !(PORT_MIN..=PORT_MAX).contains(&port) {
        return Err(ValidationError::PortOutOfRange(port));
    }
    u16::try_from(port).map_err(|_| ValidationError::PortOutOfRange(port))
}

/// Run all three field rules and report every violation, not just the first.
///
/// # Errors
///
/// Returns a single error, or [`ValidationError::Multiple`] when more than one
/// field is invalid.
pub fn validate_fields(name: &str, host: &str, port: i64) -> Result<u16, ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_name(name) {
        errors.push(e);
    }
    if let Err(e) = validate_host(host) {
        errors.push(e);
    }
    let port = validate_port(port).map_err(|e| errors.push(e)).ok();
    match (ValidationError::collect(errors), port) {
        (None, Some(port)) => Ok(port),
        (Some(err), _) => Err(err),
        (None, None) => Err(ValidationError::PortOutOfRange(0)),
    }
}
