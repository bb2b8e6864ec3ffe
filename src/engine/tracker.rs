//! The lifecycle controller and capture hook.

use crate::engine::changeset::Changeset;
use crate::engine::flush::FlushBatch;
use crate::engine::listener::ChangeListener;
use crate::track::{ChangeFrame, ChangeStack, ChangeState, TrackResult};

/// Tracks changes for one logical unit of work across nested transactions.
///
/// State is fully captured by stack depth; there is no separate state
/// enum. The stack always holds a root frame: depth 1 means no transaction
/// is open, depth N means N-1 nested scopes are open. Transaction
/// notifications must arrive synchronously and in program order from a
/// single execution context - a tracker is never shared across contexts.
///
/// Flush notifications register changes into the top frame; committing a
/// scope folds its frame into the parent; committing the outermost scope
/// flattens the root frame into an emitted [`Changeset`]; rolling back
/// discards the top frame wholesale.
#[derive(Debug)]
pub struct ChangeTracker {
    stack: ChangeStack,
}

impl ChangeTracker {
    /// a tracker with an empty root frame and no open transaction
    pub fn new() -> Self {
        Self {
            stack: ChangeStack::with_root(),
        }
    }

    /// stack depth: 1 + the current transaction nesting level
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// whether any transaction scope is open
    pub fn in_transaction(&self) -> bool {
        self.stack.depth() > 1
    }

    /// number of records buffered in the current top frame
    pub fn buffered(&self) -> usize {
        self.stack.peek().map_or(0, ChangeFrame::len)
    }

    /// A transaction scope opened: push a fresh frame for it.
    pub fn on_open(&mut self) {
        self.stack.push(ChangeFrame::new());
        tracing::trace!(depth = self.stack.depth(), "transaction scope opened");
    }

    /// A transaction scope committed.
    ///
    /// The closing scope's frame is folded into its parent. For a nested
    /// commit that is all: changes stay buffered for the still-open outer
    /// scope and `None` is returned. For the outermost commit the root
    /// frame is flattened into a [`Changeset`], cleared in place, and left
    /// on the stack for the next top-level transaction. An empty changeset
    /// is a valid emission - "nothing changed".
    pub fn on_commit(&mut self, nested: bool) -> Option<Changeset> {
        if let Some(source) = self.stack.pop() {
            match self.stack.peek_mut() {
                Some(target) => source.merge_into(target),
                // commit with no matching open: the pop took the root;
                // reinstate it rather than losing the unit's only frame
                None => self.stack.push(source),
            }
        }

        if nested {
            tracing::trace!(depth = self.stack.depth(), "nested commit folded into parent");
            return None;
        }

        let root = self.stack.peek_mut()?;
        let items = root.flatten();
        root.clear();
        tracing::debug!(items = items.len(), "outermost commit emitted changeset");
        Some(Changeset::new(items))
    }

    /// Commit and push an emitted changeset to `listener`.
    ///
    /// Nested commits fold silently, exactly like [`Self::on_commit`]; the
    /// listener only ever sees outermost completions.
    pub fn commit_notifying(
        &mut self,
        nested: bool,
        listener: &mut dyn ChangeListener,
    ) -> Option<Changeset> {
        let changeset = self.on_commit(nested);
        if let Some(changeset) = &changeset {
            listener.on_changes_completed(changeset);
        }
        changeset
    }

    /// A transaction scope rolled back: discard its frame entirely.
    ///
    /// No merge, no emission - changes made inside the failed scope leave
    /// zero trace in the enclosing scope. The root frame is never popped;
    /// a rollback with no open transaction is ignored.
    pub fn on_rollback(&mut self) {
        if self.stack.depth() > 1 {
            if let Some(frame) = self.stack.pop() {
                tracing::debug!(discarded = frame.len(), "rolled back scope discarded");
            }
        } else {
            tracing::warn!("rollback with no open transaction ignored");
        }
    }

    /// A flush happened: capture its buckets into the current top frame.
    ///
    /// Rows in the batch are only borrowed and are cloned before
    /// retention, so the pipeline may reuse its buffers after the call
    /// returns. Empty buckets are no-ops. Errors indicate a bug in the
    /// upstream pipeline and are surfaced immediately, never retried.
    pub fn on_flush(&mut self, batch: &FlushBatch) -> TrackResult<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let Some(frame) = self.stack.peek_mut() else {
            return Ok(());
        };

        for (key, row) in batch.created() {
            frame.register(key.clone(), ChangeState::Created, Some(row.clone()))?;
        }
        for (key, row) in batch.modified() {
            frame.register(key.clone(), ChangeState::Changed, Some(row.clone()))?;
        }
        for key in batch.removed() {
            frame.register(key.clone(), ChangeState::Removed, None)?;
        }

        tracing::trace!(
            created = batch.created().len(),
            modified = batch.modified().len(),
            removed = batch.removed().len(),
            "captured flush batch"
        );
        Ok(())
    }

    /// Tear the unit down to a fresh root, discarding everything buffered.
    pub fn reset(&mut self) {
        self.stack = ChangeStack::with_root();
    }
}

impl Default for ChangeTracker {
    fn default() -> Self {
        Self::new()
    }
}
