//! Conflicts between resource mappings that claim the same repository path.
//!
//! A [`PathConflict`] is one edge of a bipartite graph: it records a
//! repository path together with every mapping currently claiming that path.
//! Conflict objects are shared between their member mappings; a cloned
//! `PathConflict` is another handle to the same conflict. Membership is held
//! as weak back-references so that a conflict never keeps an unloaded mapping
//! alive.
//!
//! The symmetric link between a conflict and its mappings is maintained by
//! [`ResourceMapping::add_conflict`] and [`ResourceMapping::remove_conflict`]
//! — those are the only legitimate callers of [`PathConflict::add_mapping`]
//! and [`PathConflict::remove_mapping`].
//!
//! [`ResourceMapping::add_conflict`]: crate::mapping::ResourceMapping::add_conflict
//! [`ResourceMapping::remove_conflict`]: crate::mapping::ResourceMapping::remove_conflict

use crate::mapping::{MappingInner, ResourceMapping};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A conflict over one repository path, shared by the mappings claiming it.
#[derive(Debug, Clone)]
pub struct PathConflict {
    inner: Rc<RefCell<ConflictInner>>,
}

#[derive(Debug)]
struct ConflictInner {
    repository_path: String,
    /// Weak back-references, in insertion order. Identity only: these never
    /// extend the lifetime of a mapping.
    mappings: Vec<Weak<RefCell<MappingInner>>>,
}

impl PathConflict {
    /// Creates a conflict for the given repository path with no members.
    pub fn new(repository_path: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ConflictInner {
                repository_path: repository_path.to_string(),
                mappings: Vec::new(),
            })),
        }
    }

    /// Returns the repository path this conflict is about.
    pub fn repository_path(&self) -> String {
        self.inner.borrow().repository_path.clone()
    }

    /// Registers a mapping as a member of this conflict.
    ///
    /// Idempotent on mapping identity. The mapping's own conflict table is
    /// not updated here; that is the caller's responsibility.
    pub fn add_mapping(&self, mapping: &ResourceMapping) {
        let weak = mapping.downgrade();
        let mut inner = self.inner.borrow_mut();
        if !inner.mappings.iter().any(|member| Weak::ptr_eq(member, &weak)) {
            inner.mappings.push(weak);
        }
    }

    /// Removes a mapping from this conflict.
    ///
    /// Idempotent. Surviving members are left untouched; once fewer than two
    /// members remain the conflict is inert and should be discarded by the
    /// detector tracking it.
    pub fn remove_mapping(&self, mapping: &ResourceMapping) {
        let weak = mapping.downgrade();
        self.inner
            .borrow_mut()
            .mappings
            .retain(|member| !Weak::ptr_eq(member, &weak));
    }

    /// Returns the member mappings in insertion order.
    pub fn mappings(&self) -> Vec<ResourceMapping> {
        self.inner
            .borrow()
            .mappings
            .iter()
            .filter_map(Weak::upgrade)
            .map(ResourceMapping::from_inner)
            .collect()
    }

    /// Returns the number of member mappings.
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .mappings
            .iter()
            .filter(|member| member.strong_count() > 0)
            .count()
    }

    /// Returns `true` if the conflict has no members.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if fewer than two mappings are involved.
    pub fn is_inert(&self) -> bool {
        self.len() < 2
    }
}

/// Conflicts compare by identity: two handles are equal iff they refer to
/// the same shared conflict.
impl PartialEq for PathConflict {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for PathConflict {}
