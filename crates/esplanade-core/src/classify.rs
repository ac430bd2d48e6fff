//! Role classification by entity naming convention
//!
//! Roles are derived purely from case-sensitive substring matches on the
//! entity name, so the rules live in an explicit table that can be tested
//! without loading any assets. Entities matching no rule are static
//! scenery and take no further part in assembly.

use serde::{Deserialize, Serialize};

/// Speed class of a moving prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropClass {
    /// Road traffic (cars, buses)
    Vehicle,
    /// Water traffic (boats)
    Vessel,
}

/// Functional role granted by a classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Valid teleportation destination
    FloorAnchor,
    /// Subject to perpetual bounded oscillation
    MovingProp(PropClass),
}

/// Set of roles one entity carries
///
/// Most entities carry none. A single entity may carry both roles: boats
/// are teleport floors that also move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet {
    /// Entity is a valid teleport destination
    pub floor_anchor: bool,
    /// Entity oscillates, at the speed of this class
    pub moving_prop: Option<PropClass>,
}

impl RoleSet {
    /// Entity matched no rule and is excluded from further processing
    pub fn is_static(&self) -> bool {
        !self.floor_anchor && self.moving_prop.is_none()
    }
}

/// A single classification rule: name patterns mapped to a role
#[derive(Debug, Clone)]
pub struct RoleRule {
    role: Role,
    any_of: Vec<String>,
    none_of: Vec<String>,
}

impl RoleRule {
    /// Grant `role` when the name contains any of `any_of` and none of
    /// `none_of`. The exclusion list is checked regardless of where the
    /// substrings appear in the name.
    pub fn new(role: Role, any_of: &[&str], none_of: &[&str]) -> Self {
        Self {
            role,
            any_of: any_of.iter().map(|s| s.to_string()).collect(),
            none_of: none_of.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.any_of.iter().any(|p| name.contains(p.as_str()))
            && !self.none_of.iter().any(|p| name.contains(p.as_str()))
    }
}

/// The classification rule table
///
/// Rules are evaluated in order; for the moving-prop role the first
/// matching rule decides the prop class.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<RoleRule>,
}

impl Default for RuleTable {
    /// The naming convention of the world asset: platforms and boats are
    /// teleport floors, cars and buses are fast props unless they are
    /// repair-shop scenery, boats are slow props.
    fn default() -> Self {
        Self {
            rules: vec![
                RoleRule::new(Role::FloorAnchor, &["Platform", "Boat"], &[]),
                RoleRule::new(
                    Role::MovingProp(PropClass::Vehicle),
                    &["Car", "car", "Bus"],
                    &["repair"],
                ),
                RoleRule::new(Role::MovingProp(PropClass::Vessel), &["Boat"], &[]),
            ],
        }
    }
}

impl RuleTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule
    pub fn push(&mut self, rule: RoleRule) {
        self.rules.push(rule);
    }

    /// Classify an entity name into its role set
    ///
    /// Pure function of the name; calling it twice always yields the same
    /// result.
    pub fn classify(&self, name: &str) -> RoleSet {
        let mut roles = RoleSet::default();
        for rule in &self.rules {
            if !rule.matches(name) {
                continue;
            }
            match rule.role {
                Role::FloorAnchor => roles.floor_anchor = true,
                Role::MovingProp(class) => {
                    if roles.moving_prop.is_none() {
                        roles.moving_prop = Some(class);
                    }
                }
            }
        }
        roles
    }
}
