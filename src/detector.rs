//! # Conflict Detection
//!
//! This module computes the conflicts implied by a set of loaded resource
//! mappings. Two mappings conflict at a repository path when both claim that
//! path; the [`ConflictDetector`] groups mappings by repository path and
//! turns every path claimed more than once into a [`PathConflict`] shared by
//! the claimants.
//!
//! The detector is stateful: across [`refresh`] calls it reuses the conflict
//! object tracked for a path, reconciles its membership to the current
//! claimant set, and retires conflicts whose path is no longer claimed more
//! than once. All membership edits go through the mapping-side
//! `add_conflict`/`remove_conflict` so the bipartite symmetry between
//! mappings and conflicts is never broken.
//!
//! Detection is independent of mapping order: two refreshes over the same
//! snapshot produce conflict sets that are equal by path and membership.
//!
//! [`refresh`]: ConflictDetector::refresh

use crate::conflict::PathConflict;
use crate::error::Result;
use crate::mapping::ResourceMapping;
use log::debug;
use std::collections::{BTreeMap, HashMap};

/// Detects and maintains conflicts over a set of loaded mappings.
#[derive(Debug, Default)]
pub struct ConflictDetector {
    conflicts: HashMap<String, PathConflict>,
}

impl ConflictDetector {
    /// Creates a detector that tracks no conflicts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the conflict set from the given mappings.
    ///
    /// Unloaded mappings are ignored. Duplicate handles to the same mapping
    /// count once.
    pub fn refresh(&mut self, mappings: &[ResourceMapping]) -> Result<()> {
        let mut claims: BTreeMap<String, Vec<ResourceMapping>> = BTreeMap::new();
        for mapping in mappings {
            if !mapping.is_loaded() {
                continue;
            }
            let group = claims.entry(mapping.repository_path()).or_default();
            if !group.contains(mapping) {
                group.push(mapping.clone());
            }
        }
        claims.retain(|_, group| group.len() > 1);

        // Retire conflicts whose path is no longer claimed more than once.
        let stale: Vec<String> = self
            .conflicts
            .keys()
            .filter(|path| !claims.contains_key(*path))
            .cloned()
            .collect();
        for path in stale {
            if let Some(conflict) = self.conflicts.remove(&path) {
                for mapping in conflict.mappings() {
                    mapping.remove_conflict(&conflict)?;
                }
                debug!("conflict at {path} resolved");
            }
        }

        // Create or reconcile a conflict for every contested path.
        for (path, group) in &claims {
            let conflict = self
                .conflicts
                .entry(path.clone())
                .or_insert_with(|| {
                    debug!("new conflict at {path}");
                    PathConflict::new(path)
                })
                .clone();

            for member in conflict.mappings() {
                if !group.contains(&member) {
                    member.remove_conflict(&conflict)?;
                }
            }
            for mapping in group {
                mapping.add_conflict(&conflict)?;
            }
        }

        Ok(())
    }

    /// Returns the tracked conflicts, sorted by repository path.
    pub fn conflicts(&self) -> Vec<PathConflict> {
        let mut paths: Vec<&String> = self.conflicts.keys().collect();
        paths.sort();
        paths
            .into_iter()
            .map(|path| self.conflicts[path].clone())
            .collect()
    }

    /// Returns `true` if no conflicts are tracked.
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}
