//! Well-known name tables used by redaction and routing.
//!
//! Matching against these tables is exact and case-sensitive.

/// Payload field names whose values are always replaced by [`OBSCURE_VALUE`].
pub const SENSITIVE_FIELDS: &[&str] = &["password", "pwd", "token", "file", "filename"];

/// Fixed placeholder substituted for a redacted value.
pub const OBSCURE_VALUE: &str = "****";

/// String fields longer than this many characters are truncated.
pub const MAX_FIELD_LENGTH: usize = 200;

/// Appended to a truncated field value.
pub const ELLIPSIS: &str = "...";

/// Third-party logger namespaces that are always held at WARNING.
pub const NOISY_PACKAGES: &[&str] = &[
    "werkzeug",
    "plumbum",
    "neo4j",
    "neomodel",
    "httpstream",
    "amqp",
];

/// Namespaces that always follow the application threshold.
pub const CORE_NAMESPACES: &[&str] = &[env!("CARGO_PKG_NAME")];

/// `true` if `name` is `prefix` itself or a dotted descendant of it.
///
/// `app` matches `app` and `app.server` but not `application` or `my.app`.
pub fn in_namespace(name: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match name.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

/// `true` if `name` falls under any of `prefixes`.
pub fn in_any_namespace<'a, I>(name: &str, prefixes: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    prefixes.into_iter().any(|p| in_namespace(name, p))
}
