//! Column-sort state.
//!
//! [`SortController`] owns an insertion-ordered mapping from column key to
//! [`SortDirection`]. In multi-column mode the insertion order is the sort
//! priority: the first-added key is the primary sort key. Notifications are
//! fine-grained ([`SortEvent::Added`]/[`Updated`]/[`Removed`]) for single
//! entries and coarse ([`SortEvent::Changed`]) for bulk replacement.
//!
//! The header-click cycling policy lives here too (see
//! [`SortController::cycled`]): `none -> ascending -> descending ->
//! ascending -> ...` - a click never cycles back to unsorted; clearing a
//! column requires an explicit [`remove`](SortController::remove).
//!
//! [`Updated`]: SortEvent::Updated
//! [`Removed`]: SortEvent::Removed

use std::rc::Rc;

use quadrille_core::Signal;
use quadrille_core::logging::targets;

use crate::view::link::GridLink;

/// How many columns may participate in sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Sorting disabled; `set` is a contract violation.
    None,
    /// At most one column sorted at a time (default).
    #[default]
    SingleColumn,
    /// Several columns sorted, insertion order as priority.
    MultiColumn,
}

/// Direction of a column sort. Absence of an entry means unsorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Change notification payload for [`SortController::changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortEvent {
    /// A column was sorted for the first time.
    Added {
        key: String,
        direction: SortDirection,
    },
    /// An existing entry changed direction, or was removed via
    /// `set(key, None)` (then `direction` is `None`).
    Updated {
        key: String,
        previous: SortDirection,
        direction: Option<SortDirection>,
    },
    /// An entry was removed via [`SortController::remove`].
    Removed { key: String },
    /// The whole map was replaced; carries the new contents.
    Changed {
        entries: Vec<(String, SortDirection)>,
    },
}

/// Manages which columns are sorted, and in what order.
pub struct SortController {
    mode: SortMode,
    /// Insertion-ordered key -> direction map. Linear scans are fine at
    /// column-count scale.
    entries: Vec<(String, SortDirection)>,
    link: Option<Rc<GridLink>>,

    /// Emitted once per observable change.
    pub changed: Signal<SortEvent>,
}

impl Default for SortController {
    fn default() -> Self {
        Self::new(SortMode::default())
    }
}

impl SortController {
    /// Create a controller with the given mode and no sorted columns.
    pub fn new(mode: SortMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
            link: None,
            changed: Signal::new(),
        }
    }

    /// The current sort mode.
    pub fn mode(&self) -> SortMode {
        self.mode
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The direction the column is sorted in, or `None` if unsorted.
    pub fn get(&self, key: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|&(_, direction)| direction)
    }

    /// The sorted column keys in priority order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    /// The full ordered map.
    pub fn entries(&self) -> &[(String, SortDirection)] {
        &self.entries
    }

    /// Number of sorted columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column is sorted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The direction a header click on `key` should apply.
    ///
    /// Cycling policy: unsorted columns become ascending; ascending becomes
    /// descending; descending becomes ascending again. A click never clears
    /// a column's sort.
    pub fn cycled(&self, key: &str) -> SortDirection {
        match self.get(key) {
            None | Some(SortDirection::Descending) => SortDirection::Ascending,
            Some(SortDirection::Ascending) => SortDirection::Descending,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Set or clear the direction for a column.
    ///
    /// No-op if the column already has the given direction. In
    /// `SingleColumn` mode the entire map is replaced with at most the one
    /// given entry and a single bulk [`SortEvent::Changed`] fires. In
    /// `MultiColumn` mode, `None` removes the key (firing
    /// [`SortEvent::Updated`] with `direction: None`) and `Some` adds or
    /// updates it, preserving insertion order for existing keys.
    ///
    /// # Panics
    ///
    /// Panics if the mode is [`SortMode::None`].
    pub fn set(&mut self, key: &str, direction: Option<SortDirection>) {
        assert_ne!(
            self.mode,
            SortMode::None,
            "SortController::set requires sorting to be enabled"
        );
        if self.get(key) == direction {
            return;
        }

        tracing::debug!(target: targets::SORT, key, ?direction, "sort entry set");
        match self.mode {
            SortMode::None => unreachable!("asserted above"),
            SortMode::SingleColumn => {
                self.entries.clear();
                if let Some(direction) = direction {
                    self.entries.push((key.to_owned(), direction));
                }
                self.changed.emit(SortEvent::Changed {
                    entries: self.entries.clone(),
                });
            }
            SortMode::MultiColumn => match direction {
                None => {
                    let previous = self
                        .get(key)
                        .expect("no-op check guarantees the key exists");
                    self.entries.retain(|(entry_key, _)| entry_key != key);
                    self.changed.emit(SortEvent::Updated {
                        key: key.to_owned(),
                        previous,
                        direction: None,
                    });
                }
                Some(direction) => {
                    if let Some(entry) = self
                        .entries
                        .iter_mut()
                        .find(|(entry_key, _)| entry_key == key)
                    {
                        let previous = entry.1;
                        entry.1 = direction;
                        self.changed.emit(SortEvent::Updated {
                            key: key.to_owned(),
                            previous,
                            direction: Some(direction),
                        });
                    } else {
                        self.entries.push((key.to_owned(), direction));
                        self.changed.emit(SortEvent::Added {
                            key: key.to_owned(),
                            direction,
                        });
                    }
                }
            },
        }
    }

    /// Remove a column's sort entirely.
    ///
    /// Returns `true` if the column was sorted. This is the explicit way to
    /// clear a column; header clicks only cycle between directions.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_key, _)| entry_key != key);
        if self.entries.len() == before {
            return false;
        }
        tracing::debug!(target: targets::SORT, key, "sort entry removed");
        self.changed.emit(SortEvent::Removed {
            key: key.to_owned(),
        });
        true
    }

    /// Clear the map and bulk-install a new ordered map.
    ///
    /// Fires a single [`SortEvent::Changed`] even when nothing differs;
    /// callers use this for replace-semantics regardless of mode.
    pub fn replace_all(&mut self, entries: Vec<(String, SortDirection)>) {
        if self.mode == SortMode::SingleColumn {
            assert!(
                entries.len() <= 1,
                "SortMode::SingleColumn holds at most one entry, got {}",
                entries.len()
            );
        }
        self.entries = entries;
        tracing::debug!(
            target: targets::SORT,
            count = self.entries.len(),
            "sort entries replaced"
        );
        self.changed.emit(SortEvent::Changed {
            entries: self.entries.clone(),
        });
    }

    /// Remove every sort entry.
    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    pub(crate) fn attach(&mut self, link: Rc<GridLink>) {
        assert!(
            self.link.is_none(),
            "SortController is already attached to a grid"
        );
        self.link = Some(link);
    }

    pub(crate) fn detach(&mut self) {
        self.link = None;
    }

    /// Whether the controller is currently attached to a grid.
    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorded(controller: &SortController) -> Rc<RefCell<Vec<SortEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        controller.changed.connect(move |event| {
            events_clone.borrow_mut().push(event.clone());
        });
        events
    }

    #[test]
    fn single_column_mode_replaces_the_map() {
        let mut sort = SortController::new(SortMode::SingleColumn);
        sort.set("a", Some(SortDirection::Ascending));
        sort.set("b", Some(SortDirection::Descending));

        assert_eq!(sort.get("a"), None);
        assert_eq!(sort.get("b"), Some(SortDirection::Descending));
        assert_eq!(sort.len(), 1);
    }

    #[test]
    fn single_column_mode_fires_bulk_changed() {
        let mut sort = SortController::new(SortMode::SingleColumn);
        let events = recorded(&sort);

        sort.set("a", Some(SortDirection::Ascending));
        assert_eq!(
            *events.borrow(),
            vec![SortEvent::Changed {
                entries: vec![("a".to_owned(), SortDirection::Ascending)]
            }]
        );
    }

    #[test]
    fn multi_column_mode_preserves_insertion_order() {
        let mut sort = SortController::new(SortMode::MultiColumn);
        sort.set("a", Some(SortDirection::Ascending));
        sort.set("b", Some(SortDirection::Descending));
        sort.set("a", Some(SortDirection::Descending));

        // Updating "a" does not move it to the end.
        assert_eq!(sort.keys(), vec!["a", "b"]);
    }

    #[test]
    fn multi_column_events_distinguish_add_update_remove() {
        let mut sort = SortController::new(SortMode::MultiColumn);
        let events = recorded(&sort);

        sort.set("a", Some(SortDirection::Ascending));
        sort.set("a", Some(SortDirection::Descending));
        sort.set("a", None);

        assert_eq!(
            *events.borrow(),
            vec![
                SortEvent::Added {
                    key: "a".to_owned(),
                    direction: SortDirection::Ascending
                },
                SortEvent::Updated {
                    key: "a".to_owned(),
                    previous: SortDirection::Ascending,
                    direction: Some(SortDirection::Descending)
                },
                SortEvent::Updated {
                    key: "a".to_owned(),
                    previous: SortDirection::Descending,
                    direction: None
                },
            ]
        );
    }

    #[test]
    fn set_is_noop_when_unchanged() {
        let mut sort = SortController::new(SortMode::MultiColumn);
        sort.set("a", Some(SortDirection::Ascending));

        let events = recorded(&sort);
        sort.set("a", Some(SortDirection::Ascending));
        sort.set("missing", None);
        assert!(events.borrow().is_empty());
    }

    #[test]
    #[should_panic(expected = "requires sorting to be enabled")]
    fn set_asserts_in_none_mode() {
        let mut sort = SortController::new(SortMode::None);
        sort.set("a", Some(SortDirection::Ascending));
    }

    #[test]
    fn remove_fires_removed_and_reports_membership() {
        let mut sort = SortController::new(SortMode::MultiColumn);
        sort.set("a", Some(SortDirection::Ascending));

        let events = recorded(&sort);
        assert!(sort.remove("a"));
        assert!(!sort.remove("a"));
        assert_eq!(
            *events.borrow(),
            vec![SortEvent::Removed {
                key: "a".to_owned()
            }]
        );
    }

    #[test]
    fn replace_all_installs_ordered_map() {
        let mut sort = SortController::new(SortMode::MultiColumn);
        sort.set("old", Some(SortDirection::Ascending));

        sort.replace_all(vec![
            ("x".to_owned(), SortDirection::Descending),
            ("y".to_owned(), SortDirection::Ascending),
        ]);

        assert_eq!(sort.keys(), vec!["x", "y"]);
        assert_eq!(sort.get("old"), None);
    }

    #[test]
    fn cycling_never_returns_to_unsorted() {
        let mut sort = SortController::new(SortMode::MultiColumn);

        assert_eq!(sort.cycled("a"), SortDirection::Ascending);
        sort.set("a", Some(sort.cycled("a")));
        assert_eq!(sort.cycled("a"), SortDirection::Descending);
        sort.set("a", Some(sort.cycled("a")));
        assert_eq!(sort.cycled("a"), SortDirection::Ascending);
    }
}
