//! Display-name lookup for recipients.

use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::recipient::Recipient;

/// Source of human-readable names for recipients.
///
/// Parsing never calls a resolver; presentation code applies one through
/// [`Expression::resolve_display_names`](crate::Expression::resolve_display_names).
/// Closures and token-keyed maps implement the trait directly.
///
/// # Examples
///
/// ```
/// use acl_expr::{Recipient, RecipientKind, RecipientResolver};
///
/// let lookup = |recipient: &Recipient| {
///     (recipient.kind() == RecipientKind::User).then(|| recipient.raw_value().to_uppercase())
/// };
/// let alice = Recipient::user("alice").unwrap();
/// assert_eq!(lookup.resolve(&alice).as_deref(), Some("ALICE"));
/// assert_eq!(lookup.resolve(&Recipient::everyone()), None);
/// ```
pub trait RecipientResolver {
    /// Return the display name for `recipient`, or `None` when unknown.
    fn resolve(&self, recipient: &Recipient) -> Option<String>;
}

impl<F> RecipientResolver for F
where
    F: Fn(&Recipient) -> Option<String>,
{
    fn resolve(&self, recipient: &Recipient) -> Option<String> {
        self(recipient)
    }
}

/// Names keyed by the rendered token, for example `"U:alice"`.
impl<S: BuildHasher> RecipientResolver for HashMap<String, String, S> {
    fn resolve(&self, recipient: &Recipient) -> Option<String> {
        self.get(&recipient.to_string()).cloned()
    }
}
