use crate::error::{EngineError, EntityKind};
use crate::model::{OrderId, Sequence, StaffId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Cook,
    Server,
    Manager,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Cook => "cook",
            Role::Server => "server",
            Role::Manager => "manager",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub role: Role,
    /// The order a cook is preparing or a server is carrying.
    pub current: Option<OrderId>,
}

/// The restaurant's cooks, servers and managers.
///
/// Lock order: an order's lock may be held while the roster is locked, never the reverse.
pub struct StaffRoster {
    ids: Sequence,
    members: RwLock<BTreeMap<StaffId, StaffMember>>,
}

impl Default for StaffRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl StaffRoster {
    pub fn new() -> Self {
        Self {
            ids: Sequence::starting_at(1),
            members: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn hire(&self, name: impl Into<String>, role: Role) -> StaffId {
        let id: StaffId = self.ids.next();
        self.members.write().insert(
            id,
            StaffMember {
                id,
                name: name.into(),
                role,
                current: None,
            },
        );
        id
    }

    pub fn get(&self, id: StaffId) -> Option<StaffMember> {
        self.members.read().get(&id).cloned()
    }

    pub fn find(&self, name: &str) -> Option<StaffMember> {
        self.members
            .read()
            .values()
            .find(|member| member.name == name)
            .cloned()
    }

    pub fn with_role(&self, role: Role) -> Vec<StaffMember> {
        self.members
            .read()
            .values()
            .filter(|member| member.role == role)
            .cloned()
            .collect()
    }

    /// Fails with `UnknownEntity` unless `id` is a staff member with `role`.
    pub fn require(&self, id: StaffId, role: Role) -> Result<(), EngineError> {
        match self.members.read().get(&id) {
            Some(member) if member.role == role => Ok(()),
            _ => Err(EngineError::unknown(EntityKind::Staff, format!("{role} {id}"))),
        }
    }

    pub fn assign(&self, id: StaffId, order: OrderId) {
        if let Some(member) = self.members.write().get_mut(&id) {
            member.current = Some(order);
        }
    }

    /// Clears `id`'s current order if it is `order`.
    pub fn free(&self, id: StaffId, order: OrderId) {
        if let Some(member) = self.members.write().get_mut(&id) {
            if member.current == Some(order) {
                member.current = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hire_assigns_sequential_ids() {
        let roster = StaffRoster::new();
        let ana = roster.hire("Ana", Role::Cook);
        let ben = roster.hire("Ben", Role::Server);
        assert_eq!(ana, StaffId(1));
        assert_eq!(ben, StaffId(2));
        assert_eq!(roster.find("Ben").map(|m| m.role), Some(Role::Server));
        assert_eq!(roster.with_role(Role::Cook).len(), 1);
    }

    #[test]
    fn test_require_checks_role() {
        let roster = StaffRoster::new();
        let ana = roster.hire("Ana", Role::Cook);
        assert!(roster.require(ana, Role::Cook).is_ok());
        assert!(matches!(
            roster.require(ana, Role::Server),
            Err(EngineError::UnknownEntity {
                kind: EntityKind::Staff,
                ..
            })
        ));
        assert!(roster.require(StaffId(99), Role::Cook).is_err());
    }

    #[test]
    fn test_free_only_clears_matching_order() {
        let roster = StaffRoster::new();
        let ana = roster.hire("Ana", Role::Cook);
        roster.assign(ana, OrderId(10000));
        roster.free(ana, OrderId(10001));
        assert_eq!(roster.get(ana).unwrap().current, Some(OrderId(10000)));
        roster.free(ana, OrderId(10000));
        assert_eq!(roster.get(ana).unwrap().current, None);
    }
}
