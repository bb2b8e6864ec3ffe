//! Push-style outbound notification seam.

use crate::engine::changeset::Changeset;

/// Consumer of completed changesets.
///
/// Implemented by downstream collaborators (synchronization pipelines,
/// audit sinks) that want changesets pushed to them instead of collecting
/// `on_commit` return values. Notified exactly once per outermost commit,
/// never for nested commits or rollbacks.
pub trait ChangeListener {
    /// called with the flattened changeset of an outermost commit
    fn on_changes_completed(&mut self, changeset: &Changeset);
}
