//! Authority checks for screen routes
//!
//! The host authenticates the user; the router only needs to know who the
//! user is and which authorities they hold:
//! - Anonymous visitors
//! - Logged-in users with a list of authorities (`ROLE_USER`, `ROLE_ADMIN`, ...)

/// Authority granted to administrators
pub const ADMIN_AUTHORITY: &str = "ROLE_ADMIN";

/// Who is navigating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Logged-in user
    User {
        login: String,
        authorities: Vec<String>,
    },

    /// No authentication
    Anonymous,
}

impl AuthContext {
    pub fn user(login: impl Into<String>, authorities: &[&str]) -> Self {
        AuthContext::User {
            login: login.into(),
            authorities: authorities.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn login(&self) -> Option<&str> {
        match self {
            AuthContext::User { login, .. } => Some(login),
            AuthContext::Anonymous => None,
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        match self {
            AuthContext::User { authorities, .. } => authorities.iter().any(|a| a == authority),
            AuthContext::Anonymous => false,
        }
    }

    pub fn has_any_authority<S: AsRef<str>>(&self, wanted: &[S]) -> bool {
        wanted.iter().any(|a| self.has_authority(a.as_ref()))
    }

    pub fn is_admin(&self) -> bool {
        self.has_authority(ADMIN_AUTHORITY)
    }
}

/// Access rule of a route
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// No login required
    Public,

    /// Any logged-in user
    Authenticated,

    /// User must hold one of these authorities
    HasAnyAuthority(Vec<String>),

    /// `ROLE_ADMIN` only
    AdminOnly,

    /// All policies must pass
    And(Vec<AuthPolicy>),

    /// At least one policy must pass
    Or(Vec<AuthPolicy>),
}

impl AuthPolicy {
    pub fn authority(authority: impl Into<String>) -> Self {
        AuthPolicy::HasAnyAuthority(vec![authority.into()])
    }

    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AuthPolicy::HasAnyAuthority(authorities) => {
                context.has_any_authority(authorities.as_slice())
            }

            AuthPolicy::AdminOnly => context.is_admin(),

            AuthPolicy::And(policies) => policies.iter().all(|p| p.check(context)),

            AuthPolicy::Or(policies) => policies.iter().any(|p| p.check(context)),
        }
    }
}
