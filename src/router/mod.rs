//! Screen routes per entity
//!
//! Every registered schema gets four routes:
//!
//! | path | screen |
//! |---|---|
//! | `/<entity>` | list |
//! | `/<entity>/new` | create |
//! | `/<entity>/:id/edit` | edit |
//! | `/<entity>/:id/view` | detail |
//!
//! each guarded by the schema's authority.

pub mod auth;

pub use auth::{AuthContext, AuthPolicy};

use crate::core::schema::EntitySchema;
use thiserror::Error;

/// Which screen a route opens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    List,
    Create,
    Edit,
    View,
}

impl RouteKind {
    const ALL: [RouteKind; 4] = [RouteKind::List, RouteKind::Create, RouteKind::Edit, RouteKind::View];

    pub fn needs_id(self) -> bool {
        matches!(self, RouteKind::Edit | RouteKind::View)
    }
}

/// One registered route
#[derive(Debug, Clone)]
pub struct Route {
    /// Schema name of the entity
    pub entity: String,
    /// First path segment
    pub segment: String,
    pub kind: RouteKind,
    pub policy: AuthPolicy,
}

impl Route {
    /// Path pattern, e.g. `/working-unit/:id/edit`
    pub fn pattern(&self) -> String {
        match self.kind {
            RouteKind::List => format!("/{}", self.segment),
            RouteKind::Create => format!("/{}/new", self.segment),
            RouteKind::Edit => format!("/{}/:id/edit", self.segment),
            RouteKind::View => format!("/{}/:id/view", self.segment),
        }
    }
}

/// Result of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub entity: String,
    pub kind: RouteKind,
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("no route for '{path}'")]
    NotFound { path: String },

    #[error("access to '{path}' denied")]
    Forbidden { path: String, entity: String },
}

/// Declarative route table
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the four screens of `schema`, guarded by its authority
    pub fn register(&mut self, schema: &EntitySchema) -> &mut Self {
        let policy = AuthPolicy::authority(schema.authority());
        self.register_with_policy(schema, policy)
    }

    pub fn register_with_policy(&mut self, schema: &EntitySchema, policy: AuthPolicy) -> &mut Self {
        let segment = schema.route_segment();
        self.routes.retain(|r| r.segment != segment);
        for kind in RouteKind::ALL {
            self.routes.push(Route {
                entity: schema.name().to_string(),
                segment: segment.clone(),
                kind,
                policy: policy.clone(),
            });
        }
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Registered entity names, in registration order
    pub fn entity_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for route in &self.routes {
            if !names.contains(&route.entity.as_str()) {
                names.push(&route.entity);
            }
        }
        names
    }

    /// Concrete path of a screen; `None` for unknown entities or a missing id
    pub fn path_for(&self, entity: &str, kind: RouteKind, id: Option<&str>) -> Option<String> {
        let route = self
            .routes
            .iter()
            .find(|r| r.entity == entity && r.kind == kind)?;
        match (kind.needs_id(), id) {
            (true, Some(id)) => Some(route.pattern().replace(":id", id)),
            (true, None) => None,
            (false, _) => Some(route.pattern()),
        }
    }

    /// Match `path` and check access
    pub fn resolve(&self, path: &str, auth: &AuthContext) -> Result<RouteMatch, RouteError> {
        let not_found = || RouteError::NotFound {
            path: path.to_string(),
        };
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_matches('/');
        let segments: Vec<&str> = clean.split('/').filter(|s| !s.is_empty()).collect();

        let (segment, kind, id) = match segments.as_slice() {
            [segment] => (*segment, RouteKind::List, None),
            [segment, "new"] => (*segment, RouteKind::Create, None),
            [segment, id, "edit"] => (*segment, RouteKind::Edit, Some(id.to_string())),
            [segment, id, "view"] => (*segment, RouteKind::View, Some(id.to_string())),
            _ => return Err(not_found()),
        };

        let route = self
            .routes
            .iter()
            .find(|r| r.segment == segment && r.kind == kind)
            .ok_or_else(not_found)?;

        if !route.policy.check(auth) {
            tracing::debug!(path, user = ?auth.login(), "route forbidden");
            return Err(RouteError::Forbidden {
                path: path.to_string(),
                entity: route.entity.clone(),
            });
        }

        Ok(RouteMatch {
            entity: route.entity.clone(),
            kind,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table
            .register(&EntitySchema::builder("working_unit").build())
            .register(&EntitySchema::builder("invoice").authority("ROLE_ACCOUNTING").build());
        table
    }

    #[test]
    fn test_resolve_all_kinds() {
        let table = table();
        let user = AuthContext::user("clerk", &["ROLE_USER"]);

        let m = table.resolve("/working-unit", &user).unwrap();
        assert_eq!((m.entity.as_str(), m.kind, m.id), ("working_unit", RouteKind::List, None));

        let m = table.resolve("/working-unit/new", &user).unwrap();
        assert_eq!(m.kind, RouteKind::Create);

        let m = table.resolve("/working-unit/42/edit", &user).unwrap();
        assert_eq!((m.kind, m.id.as_deref()), (RouteKind::Edit, Some("42")));

        let m = table.resolve("/working-unit/42/view?tab=audit", &user).unwrap();
        assert_eq!((m.kind, m.id.as_deref()), (RouteKind::View, Some("42")));
    }

    #[test]
    fn test_resolve_not_found() {
        let table = table();
        let user = AuthContext::user("clerk", &["ROLE_USER"]);
        for path in ["/", "/pallet", "/working-unit/42", "/working-unit/42/delete"] {
            assert!(matches!(table.resolve(path, &user), Err(RouteError::NotFound { .. })), "{path}");
        }
    }

    #[test]
    fn test_resolve_forbidden() {
        let table = table();
        assert!(matches!(
            table.resolve("/working-unit", &AuthContext::Anonymous),
            Err(RouteError::Forbidden { .. })
        ));
        assert!(matches!(
            table.resolve("/invoice", &AuthContext::user("clerk", &["ROLE_USER"])),
            Err(RouteError::Forbidden { .. })
        ));
        assert!(table
            .resolve("/invoice", &AuthContext::user("acc", &["ROLE_ACCOUNTING"]))
            .is_ok());
    }

    #[test]
    fn test_entity_types_and_paths() {
        let table = table();
        assert_eq!(table.entity_types(), vec!["working_unit", "invoice"]);
        assert_eq!(table.routes().len(), 8);
        assert_eq!(
            table.path_for("working_unit", RouteKind::Edit, Some("7")).as_deref(),
            Some("/working-unit/7/edit")
        );
        assert_eq!(table.path_for("working_unit", RouteKind::View, None), None);
        assert_eq!(table.path_for("invoice", RouteKind::List, None).as_deref(), Some("/invoice"));
    }

    #[test]
    fn test_register_twice_replaces() {
        let mut table = table();
        table.register_with_policy(&EntitySchema::builder("invoice").build(), AuthPolicy::Public);
        assert_eq!(table.routes().len(), 8);
        assert!(table.resolve("/invoice", &AuthContext::Anonymous).is_ok());
    }
}
