//! Active layer set diffing

use std::collections::HashSet;

/// Difference between two active layer sequences.
///
/// `to_hide` keeps the previous order; `to_add` and `still_active` keep the
/// next order. Duplicate ids count once, at their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub to_hide: Vec<String>,
    pub to_add: Vec<String>,
    pub still_active: Vec<String>,
}

impl Transition {
    pub fn compute(prev: &[String], next: &[String]) -> Self {
        let prev = dedup_ordered(prev);
        let next = dedup_ordered(next);
        let prev_set: HashSet<&str> = prev.iter().map(String::as_str).collect();
        let next_set: HashSet<&str> = next.iter().map(String::as_str).collect();

        let to_hide = prev
            .iter()
            .filter(|id| !next_set.contains(id.as_str()))
            .cloned()
            .collect();
        let (still_active, to_add) = next
            .iter()
            .cloned()
            .partition(|id| prev_set.contains(id.as_str()));

        Self {
            to_hide,
            to_add,
            still_active,
        }
    }

    /// Whether the active set is unchanged.
    pub fn is_empty(&self) -> bool {
        self.to_hide.is_empty() && self.to_add.is_empty()
    }
}

/// Drop repeated ids, keeping the first occurrence.
pub fn dedup_ordered(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
