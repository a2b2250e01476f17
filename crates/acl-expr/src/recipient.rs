//! Recipient values referenced by ACL expressions.
//!
//! A recipient is written either as a self-contained literal (`*` for
//! everyone, `$OWNER` for the item owner) or as a one-letter kind prefix and
//! a value separated by the first colon, such as `U:alice` or
//! `I:10.0.0.0/8`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::errors::{
    LITERAL_MISMATCH, MISSING_VALUE, RecipientError, UNKNOWN_PREFIX, WHITESPACE_IN_VALUE,
};

const EVERYONE_LITERAL: &str = "*";
const OWNER_LITERAL: &str = "$OWNER";

/// Category of subject a [`Recipient`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RecipientKind {
    /// A single user, prefix `U`.
    User,
    /// A group of users, prefix `G`.
    Group,
    /// A role, prefix `R`.
    Role,
    /// Anybody at all, written `*`.
    Everyone,
    /// The owner of the protected item, written `$OWNER`.
    Owner,
    /// Requests arriving from a referring URL, prefix `F`.
    Refer,
    /// Requests from an IP address or range, prefix `I`.
    Ip,
    /// Holders of a single-sign-on token, prefix `T`.
    Sso,
}

impl RecipientKind {
    /// Every recipient kind, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::User,
        Self::Group,
        Self::Role,
        Self::Everyone,
        Self::Owner,
        Self::Refer,
        Self::Ip,
        Self::Sso,
    ];

    /// Return the textual prefix, or `None` for the self-contained kinds.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::RecipientKind;
    ///
    /// assert_eq!(RecipientKind::Refer.prefix(), Some("F"));
    /// assert_eq!(RecipientKind::Owner.prefix(), None);
    /// ```
    #[must_use]
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Self::User => Some("U"),
            Self::Group => Some("G"),
            Self::Role => Some("R"),
            Self::Refer => Some("F"),
            Self::Ip => Some("I"),
            Self::Sso => Some("T"),
            Self::Everyone | Self::Owner => None,
        }
    }

    /// Return the full token of a self-contained kind.
    #[must_use]
    pub const fn literal(self) -> Option<&'static str> {
        match self {
            Self::Everyone => Some(EVERYONE_LITERAL),
            Self::Owner => Some(OWNER_LITERAL),
            _ => None,
        }
    }

    /// Look up a kind by its case-sensitive prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use acl_expr::RecipientKind;
    ///
    /// assert_eq!(RecipientKind::from_prefix("T"), Some(RecipientKind::Sso));
    /// assert_eq!(RecipientKind::from_prefix("u"), None);
    /// ```
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prefix() == Some(prefix))
    }

    fn from_literal(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.literal() == Some(token))
    }
}

/// A single subject referenced by an ACL expression.
///
/// Equality, ordering and hashing consider the kind and raw value only; the
/// display name is presentation data filled in by a
/// [`RecipientResolver`](crate::RecipientResolver).
///
/// # Examples
///
/// ```
/// use acl_expr::{Recipient, RecipientKind};
///
/// let user: Recipient = "U:alice".parse().unwrap();
/// assert_eq!(user.kind(), RecipientKind::User);
/// assert_eq!(user.raw_value(), "alice");
/// assert_eq!(user.to_string(), "U:alice");
/// assert_eq!(Recipient::owner().to_string(), "$OWNER");
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Recipient {
    kind: RecipientKind,
    display_name: String,
    raw_value: String,
}

impl Recipient {
    /// Build a recipient from its kind and raw value.
    ///
    /// For prefixed kinds `raw_value` is the text after the colon; for
    /// [`RecipientKind::Everyone`] and [`RecipientKind::Owner`] it must be the
    /// literal token itself.
    ///
    /// # Errors
    /// Returns [`RecipientError`] when a prefixed value is empty or contains
    /// whitespace, or when a self-contained kind is given any other text than
    /// its literal.
    pub fn new(kind: RecipientKind, raw_value: impl Into<String>) -> Result<Self, RecipientError> {
        let raw_value = raw_value.into();
        let token = render(kind, &raw_value);
        if let Some(literal) = kind.literal() {
            if raw_value != literal {
                return Err(RecipientError::new(LITERAL_MISMATCH, token));
            }
        } else if raw_value.is_empty() {
            return Err(RecipientError::new(MISSING_VALUE, token));
        } else if raw_value.chars().any(char::is_whitespace) {
            return Err(RecipientError::new(WHITESPACE_IN_VALUE, token));
        }
        Ok(Self {
            kind,
            display_name: token,
            raw_value,
        })
    }

    fn self_contained(kind: RecipientKind, literal: &'static str) -> Self {
        Self {
            kind,
            display_name: literal.to_owned(),
            raw_value: literal.to_owned(),
        }
    }

    /// The recipient matching anybody.
    #[must_use]
    pub fn everyone() -> Self {
        Self::self_contained(RecipientKind::Everyone, EVERYONE_LITERAL)
    }

    /// The recipient matching the owner of the protected item.
    #[must_use]
    pub fn owner() -> Self {
        Self::self_contained(RecipientKind::Owner, OWNER_LITERAL)
    }

    /// A user recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn user(id: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::User, id)
    }

    /// A group recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn group(id: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::Group, id)
    }

    /// A role recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn role(id: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::Role, id)
    }

    /// A referring-URL recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn referrer(url: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::Refer, url)
    }

    /// An IP address or range recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn ip(range: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::Ip, range)
    }

    /// A single-sign-on token recipient.
    ///
    /// # Errors
    /// See [`Recipient::new`].
    pub fn sso(token: impl Into<String>) -> Result<Self, RecipientError> {
        Self::new(RecipientKind::Sso, token)
    }

    /// Replace the display name, keeping the identity unchanged.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub(crate) fn set_display_name(&mut self, name: String) {
        self.display_name = name;
    }

    /// The recipient's kind.
    #[must_use]
    pub const fn kind(&self) -> RecipientKind {
        self.kind
    }

    /// The text following the prefix, or the whole literal for `*`/`$OWNER`.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    /// Human-readable name. Until resolved this is the original token.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns `true` once the display name differs from the token.
    #[must_use]
    pub fn has_resolved_name(&self) -> bool {
        self.display_name != render(self.kind, &self.raw_value)
    }
}

/// Classify one whitespace-free token as a recipient.
///
/// The token is split on its first colon and the leading segment matched
/// against the known prefixes; `*` and `$OWNER` stand alone.
pub(crate) fn classify(token: &str) -> Result<Recipient, &'static str> {
    if let Some(kind) = RecipientKind::from_literal(token) {
        return Ok(Recipient {
            kind,
            display_name: token.to_owned(),
            raw_value: token.to_owned(),
        });
    }
    let (prefix, value) = token.split_once(':').ok_or(UNKNOWN_PREFIX)?;
    let kind = RecipientKind::from_prefix(prefix).ok_or(UNKNOWN_PREFIX)?;
    if value.is_empty() {
        return Err(MISSING_VALUE);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(WHITESPACE_IN_VALUE);
    }
    Ok(Recipient {
        kind,
        display_name: token.to_owned(),
        raw_value: value.to_owned(),
    })
}

fn render(kind: RecipientKind, raw_value: &str) -> String {
    kind.prefix()
        .map_or_else(|| raw_value.to_owned(), |prefix| format!("{prefix}:{raw_value}"))
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.prefix() {
            Some(prefix) => write!(f, "{prefix}:{}", self.raw_value),
            None => f.write_str(&self.raw_value),
        }
    }
}

impl FromStr for Recipient {
    type Err = RecipientError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        classify(token).map_err(|reason| RecipientError::new(reason, token))
    }
}

impl PartialEq for Recipient {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw_value == other.raw_value
    }
}

impl Eq for Recipient {}

impl Hash for Recipient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.raw_value.hash(state);
    }
}

impl Ord for Recipient {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.raw_value.cmp(&other.raw_value))
    }
}

impl PartialOrd for Recipient {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise recipient fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("U:alice", RecipientKind::User, "alice")]
    #[case("G:staff", RecipientKind::Group, "staff")]
    #[case("R:ROLE_ADMIN", RecipientKind::Role, "ROLE_ADMIN")]
    #[case("F:https://example.org/*", RecipientKind::Refer, "https://example.org/*")]
    #[case("I:10.0.0.0/8", RecipientKind::Ip, "10.0.0.0/8")]
    #[case("T:portal:token", RecipientKind::Sso, "portal:token")]
    #[case("*", RecipientKind::Everyone, "*")]
    #[case("$OWNER", RecipientKind::Owner, "$OWNER")]
    fn classifies_known_tokens(
        #[case] token: &str,
        #[case] kind: RecipientKind,
        #[case] raw: &str,
    ) {
        let recipient = classify(token).unwrap();
        assert_eq!(recipient.kind(), kind);
        assert_eq!(recipient.raw_value(), raw);
        assert_eq!(recipient.display_name(), token);
        assert_eq!(recipient.to_string(), token);
    }

    #[rstest]
    #[case("XX:b", UNKNOWN_PREFIX)]
    #[case("YY", UNKNOWN_PREFIX)]
    #[case("u:alice", UNKNOWN_PREFIX)]
    #[case("*:alice", UNKNOWN_PREFIX)]
    #[case("$OWNER:x", UNKNOWN_PREFIX)]
    #[case("U:", MISSING_VALUE)]
    #[case(":alice", UNKNOWN_PREFIX)]
    fn rejects_malformed_tokens(#[case] token: &str, #[case] reason: &'static str) {
        assert_eq!(classify(token).unwrap_err(), reason);
    }

    #[test]
    fn from_str_reports_the_offending_token() {
        let err = "Q:bob".parse::<Recipient>().unwrap_err();
        assert_eq!(err.info().token, "Q:bob");
        assert_eq!(err.info().reason, UNKNOWN_PREFIX);
    }

    #[test]
    fn new_validates_values() {
        assert_eq!(
            Recipient::user("").unwrap_err().info().reason,
            MISSING_VALUE
        );
        assert_eq!(
            Recipient::group("two words").unwrap_err().info().reason,
            WHITESPACE_IN_VALUE
        );
        assert_eq!(
            Recipient::new(RecipientKind::Everyone, "all")
                .unwrap_err()
                .info()
                .reason,
            LITERAL_MISMATCH
        );
        assert_eq!(
            Recipient::new(RecipientKind::Owner, "$OWNER").unwrap(),
            Recipient::owner()
        );
    }

    #[test]
    fn constructors_render_canonical_tokens() {
        assert_eq!(Recipient::role("editor").unwrap().to_string(), "R:editor");
        assert_eq!(Recipient::ip("127.0.0.1").unwrap().to_string(), "I:127.0.0.1");
        assert_eq!(Recipient::sso("cas").unwrap().to_string(), "T:cas");
        assert_eq!(
            Recipient::referrer("http://a.b").unwrap().to_string(),
            "F:http://a.b"
        );
        assert_eq!(Recipient::everyone().to_string(), "*");
    }

    #[test]
    fn display_name_does_not_affect_identity() {
        let plain = Recipient::user("alice").unwrap();
        let named = plain.clone().with_display_name("Alice Smith");
        assert_eq!(plain, named);
        assert!(!plain.has_resolved_name());
        assert!(named.has_resolved_name());
        assert_eq!(named.display_name(), "Alice Smith");
        assert_eq!(named.to_string(), "U:alice");
    }

    #[test]
    fn orders_by_kind_then_value() {
        let mut recipients = vec![
            Recipient::group("b").unwrap(),
            Recipient::user("z").unwrap(),
            Recipient::user("a").unwrap(),
        ];
        recipients.sort();
        let rendered: Vec<String> = recipients.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["U:a", "U:z", "G:b"]);
    }
}
