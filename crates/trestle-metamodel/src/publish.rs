//! Publishing enlistment
//!
//! Tracks which domain objects changed within one interaction, keyed by
//! bookmark, for downstream publishing/auditing. The accumulator is
//! request-scoped: one instance per interaction, drained at the
//! transaction boundary, never shared across requests.

use std::collections::BTreeMap;

use trestle_applib::Bookmark;

/// What happened to an enlisted object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// The object was created this interaction.
    Create,
    /// The object was updated.
    Update,
    /// The object was deleted.
    Delete,
}

/// Per-interaction change accumulator.
///
/// The transition table is deliberate and asymmetric; in particular a
/// created-then-deleted object vanishes from the set entirely (it never
/// existed outside this interaction), while an updated-then-deleted
/// object is published as a deletion:
///
/// | existing | incoming | result          |
/// |----------|----------|-----------------|
/// | none     | any      | incoming        |
/// | CREATE   | UPDATE   | CREATE (kept)   |
/// | CREATE   | DELETE   | entry removed   |
/// | UPDATE   | DELETE   | DELETE          |
/// | DELETE   | any      | DELETE (kept)   |
/// | CREATE   | CREATE   | first kept      |
/// | UPDATE   | UPDATE   | first kept      |
/// | UPDATE   | CREATE   | UPDATE (kept)   |
#[derive(Debug, Default)]
pub struct EnlistedChanges {
    entries: BTreeMap<Bookmark, ChangeKind>,
}

impl EnlistedChanges {
    /// Empty accumulator for a fresh interaction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `bookmark` underwent `kind`, applying the transition
    /// table.
    pub fn enlist(&mut self, bookmark: Bookmark, kind: ChangeKind) {
        match (self.entries.get(&bookmark).copied(), kind) {
            (None, _) => {
                self.entries.insert(bookmark, kind);
            }
            (Some(ChangeKind::Create), ChangeKind::Delete) => {
                self.entries.remove(&bookmark);
            }
            (Some(ChangeKind::Update), ChangeKind::Delete) => {
                self.entries.insert(bookmark, ChangeKind::Delete);
            }
            // every other transition keeps the existing entry
            (Some(_), _) => {}
        }
    }

    /// Current change of `bookmark`, if enlisted.
    pub fn change_of(&self, bookmark: &Bookmark) -> Option<ChangeKind> {
        self.entries.get(bookmark).copied()
    }

    /// Number of enlisted objects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is enlisted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empty the accumulator at the transaction boundary, returning the
    /// snapshot in bookmark order.
    pub fn drain(&mut self) -> Vec<(Bookmark, ChangeKind)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}
