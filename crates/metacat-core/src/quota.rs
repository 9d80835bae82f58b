//! Entity count limits for cascading operations.
//!
//! A cascade (a deep read or a delete that follows relationships) is checked
//! against a caller-supplied ceiling before it executes.

use crate::entity::Entity;
use crate::error::{Error, Result};

/// Default ceiling applied when the caller supplies none.
pub const DEFAULT_MAX_ENTITIES: u64 = 10_000;

/// Compare an entity's descendant count with a ceiling.
///
/// Returns the count when it does not exceed `ceiling`.
pub fn check_descendant_count<E: Entity>(entity: &E, ceiling: u64) -> Result<u64> {
    let count = entity.base().descendant_count();
    if count > ceiling {
        tracing::debug!(
            entity = %entity.describe(),
            count,
            ceiling,
            "descendant count over ceiling"
        );
        return Err(Error::QuotaExceeded { ceiling });
    }
    Ok(count)
}

/// Running entity count for a cascade traversal.
///
/// Starts at one for the root. The collaborator performing the traversal calls
/// [`QuotaGuard::count`] for every related entity it reaches and stops as soon
/// as the guard rejects.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    ceiling: u64,
    counted: u64,
}

impl QuotaGuard {
    /// Create a guard for a traversal rooted at one entity.
    pub fn new(ceiling: u64) -> Self {
        Self { ceiling, counted: 1 }
    }

    /// Create a guard with [`DEFAULT_MAX_ENTITIES`].
    pub fn with_default_ceiling() -> Self {
        Self::new(DEFAULT_MAX_ENTITIES)
    }

    /// Count `n` more entities.
    ///
    /// Fails once the running total exceeds the ceiling. The total keeps the
    /// rejected entities so a later `finish` still reports the overflow.
    pub fn count(&mut self, n: u64) -> Result<()> {
        self.counted = self.counted.saturating_add(n);
        if self.counted > self.ceiling {
            return Err(Error::QuotaExceeded {
                ceiling: self.ceiling,
            });
        }
        Ok(())
    }

    /// Entities counted so far, including the root.
    pub fn counted(&self) -> u64 {
        self.counted
    }

    /// The ceiling for this traversal.
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Entities that may still be counted before the guard rejects.
    pub fn remaining(&self) -> u64 {
        self.ceiling.saturating_sub(self.counted)
    }

    /// Store the total on the root entity and check it one last time.
    pub fn finish<E: Entity>(self, root: &mut E) -> Result<u64> {
        root.base_mut().set_descendant_count(self.counted);
        check_descendant_count(root, self.ceiling)
    }
}

impl Default for QuotaGuard {
    fn default() -> Self {
        Self::with_default_ceiling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntitySchema;
    use crate::entity::EntityBase;

    struct Node {
        base: EntityBase,
    }

    impl Node {
        fn with_count(count: u64) -> Self {
            let mut base = EntityBase::new();
            base.set_descendant_count(count);
            Self { base }
        }
    }

    impl Entity for Node {
        const NAME: &'static str = "Node";

        fn base(&self) -> &EntityBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut EntityBase {
            &mut self.base
        }

        fn schema() -> EntitySchema<Self> {
            EntitySchema::new()
        }
    }

    #[test]
    fn test_count_at_ceiling_passes() {
        let node = Node::with_count(1001);
        assert_eq!(check_descendant_count(&node, 1001).unwrap(), 1001);
        assert_eq!(check_descendant_count(&node, 5000).unwrap(), 1001);
    }

    #[test]
    fn test_count_over_ceiling_fails() {
        let node = Node::with_count(1001);
        match check_descendant_count(&node, 1000) {
            Err(Error::QuotaExceeded { ceiling }) => assert_eq!(ceiling, 1000),
            other => panic!("expected QuotaExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_ceiling_rejects_everything() {
        let node = Node {
            base: EntityBase::new(),
        };
        assert!(check_descendant_count(&node, 0).is_err());
        assert_eq!(check_descendant_count(&node, 1).unwrap(), 1);
    }

    #[test]
    fn test_guard_rejects_once_exceeded() {
        let mut guard = QuotaGuard::new(10);
        guard.count(5).unwrap();
        guard.count(4).unwrap();
        assert_eq!(guard.counted(), 10);
        assert_eq!(guard.remaining(), 0);

        assert!(matches!(
            guard.count(1),
            Err(Error::QuotaExceeded { ceiling: 10 })
        ));
        assert_eq!(guard.counted(), 11);
    }

    #[test]
    fn test_guard_finish_updates_root() {
        let mut root = Node {
            base: EntityBase::new(),
        };
        let mut guard = QuotaGuard::new(100);
        guard.count(41).unwrap();

        assert_eq!(guard.finish(&mut root).unwrap(), 42);
        assert_eq!(root.base.descendant_count(), 42);
    }

    #[test]
    fn test_default_guard() {
        let guard = QuotaGuard::default();
        assert_eq!(guard.ceiling(), DEFAULT_MAX_ENTITIES);
        assert_eq!(guard.counted(), 1);
    }
}
