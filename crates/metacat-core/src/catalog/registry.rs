//! Process-wide cache of per-type constraint sets.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::schema::FieldConstraintSet;
use crate::entity::Entity;
use crate::error::{Error, Result};

struct CachedSet {
    entity: &'static str,
    set: Arc<dyn Any + Send + Sync>,
}

/// Registry of constraint sets, keyed by entity type.
///
/// Each set is built at most once and kept for the life of the registry. A
/// set is inserted fully built under the map's shard lock, so concurrent
/// readers never see one under construction.
#[derive(Default)]
pub struct MetadataRegistry {
    sets: DashMap<TypeId, CachedSet>,
}

impl MetadataRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and cache the constraint set for `E` ahead of first use.
    pub fn register<E: Entity>(&self) -> Result<()> {
        self.constraints_for::<E>().map(|_| ())
    }

    /// Get the constraint set for `E`, building it on first request.
    pub fn constraints_for<E: Entity>(&self) -> Result<Arc<FieldConstraintSet<E>>> {
        let key = TypeId::of::<E>();

        // The read guard must be released before `entry` locks the same shard.
        let cached = self.sets.get(&key).map(|c| Arc::clone(&c.set));
        let set = match cached {
            Some(set) => set,
            None => match self.sets.entry(key) {
                Entry::Occupied(occupied) => Arc::clone(&occupied.get().set),
                Entry::Vacant(vacant) => {
                    let built = E::schema().build()?;
                    tracing::debug!(
                        entity = E::NAME,
                        required = built.required().len(),
                        length_limited = built.string_fields().len(),
                        "built field constraint set"
                    );
                    let set: Arc<dyn Any + Send + Sync> = Arc::new(built);
                    vacant.insert(CachedSet {
                        entity: E::NAME,
                        set: Arc::clone(&set),
                    });
                    set
                }
            },
        };

        set.downcast::<FieldConstraintSet<E>>().map_err(|_| {
            Error::internal(format!(
                "{}: cached constraint set has the wrong type",
                E::NAME
            ))
        })
    }

    /// Check if a constraint set for `E` is cached.
    pub fn is_registered<E: Entity>(&self) -> bool {
        self.sets.contains_key(&TypeId::of::<E>())
    }

    /// Names of the entity types with a cached set, sorted.
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.sets.iter().map(|c| c.entity).collect();
        names.sort_unstable();
        names
    }

    /// Number of cached sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl std::fmt::Debug for MetadataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataRegistry")
            .field("registered", &self.registered())
            .finish()
    }
}
