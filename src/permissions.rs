//! Role and permission checks applied at the service boundary.

use std::fmt;

use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::{CUSTOMER_ROLE, SERVICE_ACCESS_ROLE};

/// Operation an actor wants to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Add,
    Update,
    Delete,
}

/// Kind of record the action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    FareRule,
    CarClass,
    PromoCode,
    Quote,
}

/// Outcome of a permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allow
    }
}

impl Action {
    fn as_str(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl Resource {
    fn as_str(self) -> &'static str {
        match self {
            Resource::FareRule => "fare_rule",
            Resource::CarClass => "carclass",
            Resource::PromoCode => "promo_code",
            Resource::Quote => "quote",
        }
    }
}

/// Permission granted by holding a role named `can_<action>_<resource>`,
/// e.g. `can_update_fare_rule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub action: Action,
    pub resource: Resource,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "can_{}_{}", self.action.as_str(), self.resource.as_str())
    }
}

/// Decide whether `actor` may perform `action` on `resource`.
///
/// Holders of [`SERVICE_ACCESS_ROLE`] may do anything. Other actors need the
/// matching permission role. Customers may request quotes.
pub fn authorize(actor: &AuthenticatedUser, action: Action, resource: Resource) -> Decision {
    if check_role(SERVICE_ACCESS_ROLE, &actor.roles) {
        return Decision::Allow;
    }

    let permission = Permission { action, resource }.to_string();
    if check_role(&permission, &actor.roles) {
        return Decision::Allow;
    }

    if resource == Resource::Quote && action == Action::View && check_role(CUSTOMER_ROLE, &actor.roles)
    {
        return Decision::Allow;
    }

    Decision::Deny
}
