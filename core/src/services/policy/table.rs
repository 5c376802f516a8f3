//! Immutable role × path × method decision table

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::Role;

use super::matcher::{MethodMatcher, PathPattern};

/// Policy shipped with the binary, used when no policy file is configured
pub const DEFAULT_POLICY: &str = include_str!("default_policy.csv");

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid policy at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid policy entry: {message}")]
    Invalid { message: String },
}

impl PolicyError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        PolicyError::Invalid {
            message: message.into(),
        }
    }
}

/// One `p` line of the policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    pub role: Role,
    pub path: PathPattern,
    pub method: MethodMatcher,
}

impl PolicyRule {
    fn allows(&self, path: &str, method: &str) -> bool {
        self.path.matches(path) && self.method.matches(method)
    }
}

/// Allow-list of (role, path pattern, method) triples
///
/// Role inheritance from `g` lines is resolved at construction: each role's
/// entry already contains the rules of every role it inherits from. Anything
/// not allowed is denied.
#[derive(Debug, Clone, Default)]
pub struct PolicyTable {
    rules: HashMap<Role, Vec<PolicyRule>>,
}

impl PolicyTable {
    /// Parses casbin-style CSV
    ///
    /// ```text
    /// p, user, /v1/template/:id, GET
    /// g, admin, user
    /// ```
    ///
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_csv(source: &str) -> Result<Self, PolicyError> {
        let mut direct: Vec<PolicyRule> = Vec::new();
        let mut parents: HashMap<Role, Vec<Role>> = HashMap::new();

        for (index, raw_line) in source.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let parse_err = |message: String| PolicyError::Parse {
                line: line_no,
                message,
            };
            let parse_role = |raw: &str| raw.parse::<Role>().map_err(parse_err);

            match fields[..] {
                ["p", role_raw, path_raw, method_raw] => {
                    let rule = PolicyRule {
                        role: parse_role(role_raw)?,
                        path: PathPattern::parse(path_raw).map_err(|e| parse_err(e.to_string()))?,
                        method: MethodMatcher::parse(method_raw)
                            .map_err(|e| parse_err(e.to_string()))?,
                    };
                    direct.push(rule);
                }
                ["g", child_raw, parent_raw] => {
                    let child = parse_role(child_raw)?;
                    let parent = parse_role(parent_raw)?;
                    parents.entry(child).or_default().push(parent);
                }
                _ => {
                    return Err(parse_err(format!("unrecognized entry: {}", line)));
                }
            }
        }

        let mut rules: HashMap<Role, Vec<PolicyRule>> = HashMap::new();
        for role in [Role::Unauthorized, Role::User, Role::Admin] {
            let ancestry = Self::ancestry(role, &parents);
            let granted: Vec<PolicyRule> = direct
                .iter()
                .filter(|rule| ancestry.contains(&rule.role))
                .cloned()
                .collect();
            if !granted.is_empty() {
                rules.insert(role, granted);
            }
        }

        Ok(Self { rules })
    }

    /// Reads and parses a policy file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_csv(&source)
    }

    /// The table compiled into the binary
    pub fn embedded() -> Result<Self, PolicyError> {
        Self::from_csv(DEFAULT_POLICY)
    }

    /// Whether `role` may call `method path`
    pub fn is_allowed(&self, role: Role, path: &str, method: &str) -> bool {
        self.rules
            .get(&role)
            .map(|rules| rules.iter().any(|rule| rule.allows(path, method)))
            .unwrap_or(false)
    }

    /// Number of rules granted to `role`, inherited ones included
    pub fn rule_count(&self, role: Role) -> usize {
        self.rules.get(&role).map(Vec::len).unwrap_or(0)
    }

    // `role` plus every role reachable through `g` edges
    fn ancestry(role: Role, parents: &HashMap<Role, Vec<Role>>) -> HashSet<Role> {
        let mut seen = HashSet::new();
        let mut stack = vec![role];
        while let Some(current) = stack.pop() {
            if seen.insert(current) {
                if let Some(next) = parents.get(&current) {
                    stack.extend(next.iter().copied());
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PolicyTable {
        PolicyTable::embedded().unwrap()
    }

    #[test]
    fn test_public_routes() {
        let table = table();
        assert!(table.is_allowed(Role::Unauthorized, "/health", "GET"));
        assert!(table.is_allowed(Role::Unauthorized, "/v1/user/check/a@example.com", "GET"));
        assert!(table.is_allowed(Role::Unauthorized, "/v1/user", "POST"));
        assert!(table.is_allowed(Role::Unauthorized, "/v1/user/forgot-password/jane", "GET"));
        assert!(table.is_allowed(Role::Unauthorized, "/v1/user/forgot-password/verify", "POST"));
    }

    #[test]
    fn test_anonymous_is_denied_protected_routes() {
        let table = table();
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/user/profile", "GET"));
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/user", "DELETE"));
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/template/1", "GET"));
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/media/upload", "POST"));
    }

    #[test]
    fn test_user_inherits_public_routes() {
        let table = table();
        assert!(table.is_allowed(Role::User, "/v1/user/login", "POST"));
        assert!(table.is_allowed(Role::User, "/v1/user/profile", "GET"));
        assert!(table.is_allowed(Role::User, "/v1/user", "PUT"));
        assert!(table.is_allowed(Role::User, "/v1/template/9", "GET"));
        assert!(!table.is_allowed(Role::User, "/v1/template", "POST"));
        assert!(!table.is_allowed(Role::User, "/v1/template/9", "DELETE"));
        assert!(!table.is_allowed(Role::User, "/v1/users", "GET"));
    }

    #[test]
    fn test_admin_inherits_everything() {
        let table = table();
        assert!(table.is_allowed(Role::Admin, "/health", "GET"));
        assert!(table.is_allowed(Role::Admin, "/v1/template/9", "GET"));
        assert!(table.is_allowed(Role::Admin, "/v1/template/9", "PUT"));
        assert!(table.is_allowed(Role::Admin, "/v1/users", "GET"));
        assert!(table.rule_count(Role::Admin) > table.rule_count(Role::User));
        assert!(table.rule_count(Role::User) > table.rule_count(Role::Unauthorized));
    }

    #[test]
    fn test_method_must_match() {
        let table = table();
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/user/login", "GET"));
        assert!(!table.is_allowed(Role::Admin, "/v1/users", "DELETE"));
    }

    #[test]
    fn test_inheritance_cycle_terminates() {
        let table = PolicyTable::from_csv(
            "g, user, admin\ng, admin, user\np, admin, /v1/users, GET\n",
        )
        .unwrap();
        assert!(table.is_allowed(Role::User, "/v1/users", "GET"));
        assert!(!table.is_allowed(Role::Unauthorized, "/v1/users", "GET"));
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = PolicyTable::from_csv("p, user, /ok, GET\np, wizard, /x, GET\n").unwrap_err();
        assert!(matches!(err, PolicyError::Parse { line: 2, .. }));

        let err = PolicyTable::from_csv("x, user, /x\n").unwrap_err();
        assert!(matches!(err, PolicyError::Parse { line: 1, .. }));

        let err = PolicyTable::from_csv("p, user, no-slash, GET\n").unwrap_err();
        assert!(matches!(err, PolicyError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PolicyTable::load("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
