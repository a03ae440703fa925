//! Membership reconciliation — the set difference between an existing and a
//! desired id list.
//!
//! Used in both directions: a person's desired household list against their
//! current memberships, and a household's desired member list against its
//! current members. The algorithm is identical with the roles swapped.

use std::collections::HashSet;

use uuid::Uuid;

/// The deltas that transition an existing id set into a desired one.
/// `to_add` and `to_remove` are always disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
  pub to_add:    Vec<Uuid>,
  pub to_remove: Vec<Uuid>,
}

impl Reconciliation {
  pub fn is_empty(&self) -> bool {
    self.to_add.is_empty() && self.to_remove.is_empty()
  }
}

/// Compute `to_add = desired − existing` and `to_remove = existing − desired`.
///
/// Inputs are treated as sets: duplicates are ignored and input order does
/// not affect membership of the outputs. Each output preserves the
/// first-seen order of its source sequence.
pub fn reconcile(existing: &[Uuid], desired: &[Uuid]) -> Reconciliation {
  let existing_set: HashSet<Uuid> = existing.iter().copied().collect();
  let desired_set: HashSet<Uuid> = desired.iter().copied().collect();

  let mut seen = HashSet::new();
  let to_add = desired
    .iter()
    .copied()
    .filter(|id| !existing_set.contains(id) && seen.insert(*id))
    .collect();

  let mut seen = HashSet::new();
  let to_remove = existing
    .iter()
    .copied()
    .filter(|id| !desired_set.contains(id) && seen.insert(*id))
    .collect();

  Reconciliation { to_add, to_remove }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
