//! Navigation guard as an ordered rule table.
//!
//! Rules are checked top to bottom and the first match decides. No rule
//! match means the transition is allowed. The guard holds no state; the
//! caller passes the session status read at navigation time.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use super::{RouteDescriptor, RouteName};

/// Outcome of evaluating one transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(RouteName),
}

struct GuardRule {
    name: &'static str,
    applies: fn(&RouteDescriptor, bool) -> bool,
    decision: GuardDecision,
}

fn needs_login(to: &RouteDescriptor, authenticated: bool) -> bool {
    to.requires_auth && !authenticated
}

fn already_signed_in(to: &RouteDescriptor, authenticated: bool) -> bool {
    authenticated && matches!(to.name, RouteName::Login | RouteName::Register)
}

const RULES: &[GuardRule] = &[
    GuardRule { name: "requires-auth", applies: needs_login, decision: GuardDecision::Redirect(RouteName::Login) },
    GuardRule {
        name: "guest-only",
        applies: already_signed_in,
        decision: GuardDecision::Redirect(RouteName::Library),
    },
];

/// Decide whether a transition to `to` may proceed.
#[must_use]
pub fn evaluate(to: &RouteDescriptor, authenticated: bool) -> GuardDecision {
    RULES
        .iter()
        .find(|rule| (rule.applies)(to, authenticated))
        .map_or(GuardDecision::Allow, |rule| {
            tracing::debug!(rule = rule.name, to = to.path, "guard redirect");
            rule.decision
        })
}
