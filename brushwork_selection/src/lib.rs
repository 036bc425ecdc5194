// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brushwork Selection: multi-group record selection state.
//!
//! A visualization surface lets the user carve out several concurrent
//! selections (lasso one cluster, hold the multi-select key, lasso another).
//! This crate is the _bookkeeping_ for that: an ordered list of
//! [`SelectionGroup`]s, each an ordered-but-unique set of [`RecordId`]s
//! pointing into an external record table. It knows nothing about geometry
//! or gestures; the interaction layer computes record sets and writes them
//! in here.
//!
//! Three pieces of state matter:
//!
//! - **No selection** is a distinguished state ([`SelectionSet::groups`]
//!   returns `None`), distinct from "one empty group". Clicking empty canvas
//!   produces the former; starting a lasso that catches nothing can leave
//!   the latter.
//! - **Groups** hold unique record ids in first-insertion order. A record
//!   may appear in any number of groups.
//! - A **revision counter** bumps on every mutation, so renderers can poll
//!   "did the selection change?" without diffing contents.
//!
//! ## Persistence encoding
//!
//! Selections embed into session scripts and replay logs as printable text:
//! each group becomes a fixed-width bit vector (one bit per record in the
//! table) encoded as standard base64. The encoding is lossless, and decoding
//! is forgiving: a corrupt string yields an empty group while the remaining
//! groups still decode, so one bad entry cannot poison a replayed session.
//!
//! ## Minimal example
//!
//! ```rust
//! use brushwork_selection::{RecordId, SelectionGroup, SelectionSet};
//!
//! let mut sel = SelectionSet::new();
//! assert!(sel.groups().is_none());
//!
//! // One group holding records 3 and 7 out of a 10-record table.
//! sel.set_groups(Some(vec![SelectionGroup::from_iter([
//!     RecordId::new(3),
//!     RecordId::new(7),
//! ])]));
//!
//! let encoded = sel.as_bitsets(10).unwrap();
//! let mut replay = SelectionSet::new();
//! replay.set_from_bitsets(Some(&encoded), 10);
//! assert_eq!(replay.groups(), sel.groups());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hashbrown::HashSet;

/// Index of a record in the external record table.
///
/// A plain arena index: the record's lifetime belongs to the table, never to
/// the selection or to any marker referencing it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u32);

impl RecordId {
    /// Create a record id from its table index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The table index as a `usize`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One selection: a set of unique record ids in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionGroup {
    members: Vec<RecordId>,
}

impl SelectionGroup {
    /// Create an empty group.
    pub const fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// The member ids in first-insertion order.
    pub fn members(&self) -> &[RecordId] {
        &self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `record` is a member.
    pub fn contains(&self, record: RecordId) -> bool {
        self.members.contains(&record)
    }

    /// Add `record` unless already present. Returns whether it was added.
    pub fn add(&mut self, record: RecordId) -> bool {
        if self.contains(record) {
            return false;
        }
        self.members.push(record);
        true
    }

    /// Replace the members with `records`, dropping duplicates.
    ///
    /// Spatial queries legitimately yield duplicates (several hit points of
    /// one marker, several markers of one record), so this de-duplicates
    /// with a hash set rather than by scanning.
    pub fn replace_with<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        self.members.clear();
        let mut seen: HashSet<RecordId> = HashSet::new();
        for record in records {
            if seen.insert(record) {
                self.members.push(record);
            }
        }
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Iterate over the member ids.
    pub fn iter(&self) -> core::slice::Iter<'_, RecordId> {
        self.members.iter()
    }
}

impl FromIterator<RecordId> for SelectionGroup {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        let mut group = Self::new();
        group.replace_with(iter);
        group
    }
}

impl<'a> IntoIterator for &'a SelectionGroup {
    type Item = &'a RecordId;
    type IntoIter = core::slice::Iter<'a, RecordId>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// The full selection state: zero or more groups, or no selection at all.
///
/// Every mutating method bumps [`SelectionSet::revision`]; external
/// renderers treat a revision change as "redraw the selection highlight".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    groups: Option<Vec<SelectionGroup>>,
    revision: u64,
}

impl SelectionSet {
    /// Create a set in the "no selection" state.
    pub const fn new() -> Self {
        Self {
            groups: None,
            revision: 0,
        }
    }

    /// The groups, or `None` when there is no selection.
    pub fn groups(&self) -> Option<&[SelectionGroup]> {
        self.groups.as_deref()
    }

    /// The group at `index`, if any.
    pub fn group(&self, index: usize) -> Option<&SelectionGroup> {
        self.groups.as_ref()?.get(index)
    }

    /// Number of groups (zero when there is no selection).
    pub fn group_count(&self) -> usize {
        self.groups.as_ref().map_or(0, Vec::len)
    }

    /// Whether a selection exists, even an empty one.
    pub fn has_selection(&self) -> bool {
        self.groups.is_some()
    }

    /// Whether `record` is a member of any group.
    pub fn is_selected(&self, record: RecordId) -> bool {
        self.groups
            .as_ref()
            .is_some_and(|groups| groups.iter().any(|g| g.contains(record)))
    }

    /// The change counter. Bumps on every mutating call.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace all groups. `None` is the distinguished "no selection" state.
    pub fn set_groups(&mut self, groups: Option<Vec<SelectionGroup>>) {
        self.groups = groups;
        self.bump();
    }

    /// Drop the selection entirely (back to "no selection").
    pub fn clear(&mut self) {
        self.set_groups(None);
    }

    /// Append `group`, creating the group list if there was no selection.
    /// Returns the new group's index.
    pub fn add_group(&mut self, group: SelectionGroup) -> usize {
        let groups = self.groups.get_or_insert_with(Vec::new);
        groups.push(group);
        let index = groups.len() - 1;
        self.bump();
        index
    }

    /// Overwrite the members of the group at `index`, de-duplicating.
    /// Returns `false` (without bumping the revision) if no such group
    /// exists.
    pub fn set_group_members<I>(&mut self, index: usize, records: I) -> bool
    where
        I: IntoIterator<Item = RecordId>,
    {
        let Some(group) = self.groups.as_mut().and_then(|g| g.get_mut(index)) else {
            return false;
        };
        group.replace_with(records);
        self.bump();
        true
    }

    /// Encode each group as a base64 bit vector over a `record_count`-record
    /// table, or `None` when there is no selection.
    ///
    /// Bit `i` of the vector is set iff record `i` is a member; bits are
    /// packed least-significant-first into `ceil(record_count / 8)` bytes.
    /// Member ids outside the table are skipped (they cannot round-trip and
    /// indicate a stale selection).
    pub fn as_bitsets(&self, record_count: usize) -> Option<Vec<String>> {
        let groups = self.groups.as_ref()?;
        let mut out = Vec::with_capacity(groups.len());
        for group in groups {
            let mut bytes = alloc::vec![0_u8; record_count.div_ceil(8)];
            for record in group {
                let i = record.index();
                debug_assert!(i < record_count, "selected record {i} outside the table");
                if i < record_count {
                    bytes[i / 8] |= 1 << (i % 8);
                }
            }
            out.push(STANDARD.encode(&bytes));
        }
        Some(out)
    }

    /// Replace the selection by decoding bit vectors produced by
    /// [`SelectionSet::as_bitsets`] against a `record_count`-record table.
    ///
    /// Lossless inverse of the encoding. A string that is not valid base64,
    /// or that decodes to the wrong byte length for `record_count`, becomes
    /// an empty group while the remaining strings still decode.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Record ids are intentionally 32-bit; tables never exceed u32 records."
    )]
    pub fn set_from_bitsets(&mut self, encoded: Option<&[String]>, record_count: usize) {
        let Some(encoded) = encoded else {
            self.set_groups(None);
            return;
        };
        let expected_len = record_count.div_ceil(8);
        let mut groups = Vec::with_capacity(encoded.len());
        for text in encoded {
            let mut group = SelectionGroup::new();
            if let Ok(bytes) = STANDARD.decode(text)
                && bytes.len() == expected_len
            {
                for i in 0..record_count {
                    if bytes[i / 8] & (1_u8 << (i % 8)) != 0 {
                        group.add(RecordId::new(i as u32));
                    }
                }
            }
            groups.push(group);
        }
        self.set_groups(Some(groups));
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
