//! # Atomic Operations
//!
//! This module implements the command protocol used to mutate the root
//! package file. Every mutation is an [`AtomicOperation`] with two halves:
//! `execute` performs the change and captures whatever state a reversal
//! needs, and `rollback` undoes the change using only that captured state.
//! Rolling back an execute that turned out to be a no-op does nothing.
//!
//! Operations compose into a [`Transaction`]: the operations run in order,
//! and if any `execute` fails, the completed operations are rolled back in
//! reverse so the package file is observably unchanged.

use crate::error::Result;
use crate::mapping::ResourceMapping;
use crate::package_file::RootPackageFile;

/// A reversible mutation of the root package file.
pub trait AtomicOperation {
    /// Performs the mutation, capturing the state rollback needs.
    fn execute(&mut self, file: &mut RootPackageFile) -> Result<()>;

    /// Reverses the effect of `execute`.
    ///
    /// Called at most once, and only after a successful `execute`.
    fn rollback(&mut self, file: &mut RootPackageFile);
}

/// Adds a mapping to the root package file, replacing any mapping at the
/// same repository path.
#[derive(Debug)]
pub struct AddMappingOperation {
    mapping: ResourceMapping,
    replaced: Option<ResourceMapping>,
    added: bool,
}

impl AddMappingOperation {
    /// Creates an operation that will add the given mapping.
    pub fn new(mapping: ResourceMapping) -> Self {
        Self {
            mapping,
            replaced: None,
            added: false,
        }
    }
}

impl AtomicOperation for AddMappingOperation {
    fn execute(&mut self, file: &mut RootPackageFile) -> Result<()> {
        self.replaced = file.add_resource_mapping(self.mapping.clone());
        self.added = true;
        Ok(())
    }

    fn rollback(&mut self, file: &mut RootPackageFile) {
        if !self.added {
            return;
        }
        match self.replaced.take() {
            Some(previous) => {
                file.add_resource_mapping(previous);
            }
            None => {
                file.remove_resource_mapping(&self.mapping.repository_path());
            }
        }
        self.added = false;
    }
}

/// Removes the mapping for a repository path from the root package file.
///
/// Removing a path that has no mapping is a successful no-op, and rolling
/// it back does nothing.
#[derive(Debug)]
pub struct RemoveMappingOperation {
    repository_path: String,
    removed: Option<ResourceMapping>,
}

impl RemoveMappingOperation {
    /// Creates an operation that will remove the mapping at the given path.
    pub fn new(repository_path: &str) -> Self {
        Self {
            repository_path: repository_path.to_string(),
            removed: None,
        }
    }
}

impl AtomicOperation for RemoveMappingOperation {
    fn execute(&mut self, file: &mut RootPackageFile) -> Result<()> {
        self.removed = file.remove_resource_mapping(&self.repository_path);
        Ok(())
    }

    fn rollback(&mut self, file: &mut RootPackageFile) {
        if let Some(mapping) = self.removed.take() {
            file.add_resource_mapping(mapping);
        }
    }
}

/// A sequence of atomic operations applied as a unit.
#[derive(Default)]
pub struct Transaction {
    operations: Vec<Box<dyn AtomicOperation>>,
}

impl Transaction {
    /// Creates an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the transaction.
    pub fn push(&mut self, operation: Box<dyn AtomicOperation>) {
        self.operations.push(operation);
    }

    /// Returns the number of operations in the transaction.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the transaction contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Executes the operations in order.
    ///
    /// If an operation fails, the previously completed operations are rolled
    /// back in reverse order and the error is returned; the package file is
    /// then in its pre-transaction state.
    pub fn execute(mut self, file: &mut RootPackageFile) -> Result<()> {
        for index in 0..self.operations.len() {
            if let Err(error) = self.operations[index].execute(file) {
                for operation in self.operations[..index].iter_mut().rev() {
                    operation.rollback(file);
                }
                return Err(error);
            }
        }
        Ok(())
    }
}
