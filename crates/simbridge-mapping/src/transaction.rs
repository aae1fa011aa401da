// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Staged repository writes.
//!
//! The engine only stages operations; committing them is the repository
//! session's job.

use crate::{ExternalIdentifierMap, IdCorrespondence};

/// One staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedOperation {
    /// Create a correspondence record that has just been given an id.
    CreateCorrespondence(IdCorrespondence),
    /// Update an already persisted correspondence record.
    UpdateCorrespondence(IdCorrespondence),
    /// Create the map, or update it if the repository already has it.
    CreateOrUpdateMap(ExternalIdentifierMap),
}

/// Ordered list of staged writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedTransaction {
    operations: Vec<StagedOperation>,
}

impl StagedTransaction {
    /// Creates an empty transaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation.
    pub fn stage(&mut self, operation: StagedOperation) {
        self.operations.push(operation);
    }

    /// Staged operations in order.
    pub fn operations(&self) -> &[StagedOperation] {
        &self.operations
    }

    /// Returns `true` when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Consumes the transaction, yielding its operations.
    pub fn into_operations(self) -> Vec<StagedOperation> {
        self.operations
    }
}
