//! Scoped compiler-define mutation around one build invocation.
//!
//! The transaction snapshots the target group's current defines, writes back
//! the union with the platform's additions, and restores the snapshot
//! verbatim when it ends. Restoring the snapshot rather than diff-removing
//! the additions correctly handles symbols that were already present before
//! the union.
//!
//! Access to a target group's defines is exclusive and non-reentrant for the
//! duration of a transaction; the orchestrator holds at most one at a time.

use crate::models::TargetGroup;
use anyhow::Result;
use indexmap::IndexSet;

/// External store of compiler defines, keyed by target group.
///
/// Reads are duplicate-tolerant; writes preserve insertion order so the
/// serialized define list stays deterministic.
pub trait DefineStore {
    fn get_defines(&self, group: TargetGroup) -> Result<IndexSet<String>>;
    fn set_defines(&mut self, group: TargetGroup, defines: &IndexSet<String>) -> Result<()>;
}

/// One scoped define mutation. Created by [`begin`](SymbolTransaction::begin),
/// finished by [`end`](SymbolTransaction::end) on every exit path.
#[must_use = "a symbol transaction must be ended to restore the define store"]
pub struct SymbolTransaction {
    group: TargetGroup,
    snapshot: Option<IndexSet<String>>,
}

impl SymbolTransaction {
    /// Apply `additional` defines on top of the group's current set.
    ///
    /// With an empty `additional` set this is a no-op: the store is neither
    /// read nor written, so no spurious write can trigger a recompile, and
    /// [`end`](Self::end) will not touch the store either.
    pub fn begin(
        store: &mut dyn DefineStore,
        group: TargetGroup,
        additional: &IndexSet<String>,
    ) -> Result<Self> {
        if additional.is_empty() {
            return Ok(Self {
                group,
                snapshot: None,
            });
        }

        let current = store.get_defines(group)?;
        let mut merged = current.clone();
        merged.extend(additional.iter().cloned());

        tracing::debug!(
            "Applying {} additional define(s) to {} (had {})",
            additional.len(),
            group,
            current.len()
        );
        store.set_defines(group, &merged)?;

        Ok(Self {
            group,
            snapshot: Some(current),
        })
    }

    /// Whether `begin` actually touched the store.
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Restore the pre-transaction snapshot, if one was taken.
    pub fn end(self, store: &mut dyn DefineStore) -> Result<()> {
        if let Some(snapshot) = self.snapshot {
            tracing::debug!("Restoring {} define(s) for {}", snapshot.len(), self.group);
            store.set_defines(self.group, &snapshot)?;
        }
        Ok(())
    }
}
