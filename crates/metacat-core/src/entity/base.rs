//! Identity and attribution shared by every catalog record.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Identity of a persisted entity, unique within its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields every entity carries in addition to its own.
///
/// Identity and creation attribution are write-once. Modification attribution
/// moves forward on every mutation and never precedes creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBase {
    id: Option<EntityId>,
    created_by: Option<String>,
    created_at: Option<DateTime<Utc>>,
    modified_by: Option<String>,
    modified_at: Option<DateTime<Utc>>,
    /// This entity plus everything the current cascade reaches. Not persisted.
    descendant_count: u64,
}

impl Default for EntityBase {
    fn default() -> Self {
        Self {
            id: None,
            created_by: None,
            created_at: None,
            modified_by: None,
            modified_at: None,
            descendant_count: 1,
        }
    }
}

impl EntityBase {
    /// Create an unsaved base with no identity or attribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity, if assigned.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Assign the identity. Fails if one is already assigned.
    pub fn assign_id(&mut self, id: EntityId) -> Result<()> {
        if let Some(existing) = self.id {
            return Err(Error::internal(format!(
                "entity already has id {}, refusing to reassign {}",
                existing, id
            )));
        }
        self.id = Some(id);
        Ok(())
    }

    /// User who created the entity.
    pub fn created_by(&self) -> Option<&str> {
        self.created_by.as_deref()
    }

    /// Creation time.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// User who last modified the entity.
    pub fn modified_by(&self) -> Option<&str> {
        self.modified_by.as_deref()
    }

    /// Last modification time.
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    /// Record creation. Creation also counts as the first modification.
    ///
    /// Fails if creation was already recorded.
    pub fn stamp_created(&mut self, user: impl Into<String>, at: DateTime<Utc>) -> Result<()> {
        if self.created_at.is_some() || self.created_by.is_some() {
            return Err(Error::internal("creation attribution is already set"));
        }
        let user = user.into();
        self.created_by = Some(user.clone());
        self.created_at = Some(at);
        self.modified_by = Some(user);
        self.modified_at = Some(at);
        Ok(())
    }

    /// Record a successful mutation.
    ///
    /// A timestamp earlier than the creation time is clamped to it.
    pub fn stamp_modified(&mut self, user: impl Into<String>, at: DateTime<Utc>) {
        let at = match self.created_at {
            Some(created) if at < created => created,
            _ => at,
        };
        self.modified_by = Some(user.into());
        self.modified_at = Some(at);
    }

    /// Number of entities counted for the current operation.
    pub fn descendant_count(&self) -> u64 {
        self.descendant_count
    }

    /// Overwrite the descendant count computed by a cascade.
    pub fn set_descendant_count(&mut self, count: u64) {
        self.descendant_count = count;
    }

    /// Add entities reached through a relationship to the count.
    pub fn add_descendants(&mut self, count: u64) {
        self.descendant_count = self.descendant_count.saturating_add(count);
    }

    /// Forget the previous operation's count.
    pub fn reset_descendant_count(&mut self) {
        self.descendant_count = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_base_counts_itself() {
        let base = EntityBase::new();
        assert_eq!(base.descendant_count(), 1);
        assert!(base.id().is_none());
        assert!(base.created_at().is_none());
    }

    #[test]
    fn test_id_assigned_once() {
        let mut base = EntityBase::new();
        base.assign_id(EntityId(42)).unwrap();
        assert_eq!(base.id(), Some(EntityId(42)));

        let err = base.assign_id(EntityId(43)).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(base.id(), Some(EntityId(42)));
    }

    #[test]
    fn test_creation_stamped_once() {
        let now = Utc::now();
        let mut base = EntityBase::new();
        base.stamp_created("alice", now).unwrap();

        assert_eq!(base.created_by(), Some("alice"));
        assert_eq!(base.modified_by(), Some("alice"));
        assert_eq!(base.created_at(), base.modified_at());

        assert!(base.stamp_created("mallory", now).is_err());
        assert_eq!(base.created_by(), Some("alice"));
    }

    #[test]
    fn test_modification_never_precedes_creation() {
        let now = Utc::now();
        let mut base = EntityBase::new();
        base.stamp_created("alice", now).unwrap();

        base.stamp_modified("bob", now - Duration::seconds(30));
        assert_eq!(base.modified_by(), Some("bob"));
        assert_eq!(base.modified_at(), Some(now));

        let later = now + Duration::seconds(5);
        base.stamp_modified("carol", later);
        assert_eq!(base.modified_at(), Some(later));
        assert_eq!(base.created_by(), Some("alice"));
    }

    #[test]
    fn test_descendant_count_accumulates() {
        let mut base = EntityBase::new();
        base.add_descendants(10);
        assert_eq!(base.descendant_count(), 11);

        base.set_descendant_count(3);
        assert_eq!(base.descendant_count(), 3);

        base.reset_descendant_count();
        assert_eq!(base.descendant_count(), 1);
    }
}
