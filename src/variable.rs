//! Ordered lists of uniquely-named variables with structural-change events.
//!
//! A [`VariableList`] is the collaborator that drives the truth table: every
//! structural edit (append, remove, move, rename, bulk replace) commits to
//! the list first and is then announced to listeners as a
//! [`VariableListEvent`], so a listener that re-reads the list from inside
//! its callback observes the committed state.
//!
//! For inputs, a variable's position determines its bit significance
//! (position 0 is the most-significant bit of the row index); for outputs,
//! the position is only a display order.

use std::cell::RefCell;
use std::rc::Weak;

use log::debug;

/// A structural edit applied to a [`VariableList`], described after the fact.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum VariableListEvent {
    /// A variable was appended at `index` (always the end of the list).
    Add { name: String, index: usize },
    /// The variable `name` was removed from `index`.
    Remove { name: String, index: usize },
    /// The variable `name` now sits at `index`, after moving by `delta`
    /// positions (positive = toward the end of the list).
    Move {
        name: String,
        index: usize,
        delta: isize,
    },
    /// The variable at `index` was renamed from `old_name` to `new_name`.
    Replace {
        index: usize,
        old_name: String,
        new_name: String,
    },
    /// The whole list was replaced in bulk.
    AllReplaced,
}

/// Receives [`VariableListEvent`]s, synchronously, after each edit commits.
pub trait VariableListListener {
    fn list_changed(&self, event: &VariableListEvent);
}

/// An ordered sequence of uniquely-named variables.
///
/// All state sits behind `RefCell`, so every operation takes `&self`;
/// listeners are held weakly and pruned when events fire.
///
/// # Invariants
///
/// - Names are unique within one list (violations panic).
/// - Events fire only after the edit has committed.
#[derive(Default)]
pub struct VariableList {
    names: RefCell<Vec<String>>,
    listeners: RefCell<Vec<Weak<dyn VariableListListener>>>,
}

impl VariableList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a list from the given names.
    ///
    /// # Panics
    ///
    /// Panics if the names are not pairwise distinct.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = Self::new();
        {
            let mut data = list.names.borrow_mut();
            for name in names {
                let name = name.into();
                assert!(!data.contains(&name), "duplicate variable name: {name}");
                data.push(name);
            }
        }
        list
    }

    /// The number of variables in the list.
    pub fn size(&self) -> usize {
        self.names.borrow().len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.names.borrow().is_empty()
    }

    /// The name at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> String {
        self.names.borrow()[index].clone()
    }

    /// The position of `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.borrow().iter().position(|n| n == name)
    }

    /// Whether `name` is in the list.
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// A snapshot of all names, in order.
    pub fn names(&self) -> Vec<String> {
        self.names.borrow().clone()
    }

    /// Appends a variable at the end of the list.
    ///
    /// # Panics
    ///
    /// Panics if `name` is already in the list.
    pub fn add(&self, name: &str) {
        let index = {
            let mut names = self.names.borrow_mut();
            assert!(
                !names.iter().any(|n| n == name),
                "duplicate variable name: {name}"
            );
            names.push(name.to_owned());
            names.len() - 1
        };
        debug!("Added variable '{}' at index {}", name, index);
        self.fire(&VariableListEvent::Add {
            name: name.to_owned(),
            index,
        });
    }

    /// Removes the variable at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&self, index: usize) {
        let name = {
            let mut names = self.names.borrow_mut();
            let size = names.len();
            assert!(index < size, "index out of range: {index} (size: {size})");
            names.remove(index)
        };
        debug!("Removed variable '{}' from index {}", name, index);
        self.fire(&VariableListEvent::Remove { name, index });
    }

    /// Moves the variable at `index` by `delta` positions.
    ///
    /// A zero `delta` is a no-op and fires no event.
    ///
    /// # Panics
    ///
    /// Panics if `index` or the resulting position is out of range.
    pub fn move_by(&self, index: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        let (name, new_index) = {
            let mut names = self.names.borrow_mut();
            let size = names.len();
            assert!(index < size, "index out of range: {index} (size: {size})");
            let target = index as isize + delta;
            assert!(
                target >= 0 && (target as usize) < size,
                "move target out of range: {target} (size: {size})"
            );
            let new_index = target as usize;
            let name = names.remove(index);
            names.insert(new_index, name.clone());
            (name, new_index)
        };
        debug!(
            "Moved variable '{}' from index {} to {}",
            name, index, new_index
        );
        self.fire(&VariableListEvent::Move {
            name,
            index: new_index,
            delta,
        });
    }

    /// Renames the variable at `index` to `new_name`.
    ///
    /// Renaming a variable to its current name is a no-op and fires no event.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range, or if `new_name` collides with
    /// another variable in the list.
    pub fn replace(&self, index: usize, new_name: &str) {
        let old_name = {
            let mut names = self.names.borrow_mut();
            let size = names.len();
            assert!(index < size, "index out of range: {index} (size: {size})");
            if names[index] == new_name {
                return;
            }
            assert!(
                !names.iter().any(|n| n == new_name),
                "duplicate variable name: {new_name}"
            );
            std::mem::replace(&mut names[index], new_name.to_owned())
        };
        debug!(
            "Renamed variable '{}' at index {} to '{}'",
            old_name, index, new_name
        );
        self.fire(&VariableListEvent::Replace {
            index,
            old_name,
            new_name: new_name.to_owned(),
        });
    }

    /// Replaces the whole list in bulk.
    ///
    /// # Panics
    ///
    /// Panics if the names are not pairwise distinct.
    pub fn set_all<I, S>(&self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        {
            let mut data = self.names.borrow_mut();
            data.clear();
            for name in names {
                let name = name.into();
                assert!(!data.contains(&name), "duplicate variable name: {name}");
                data.push(name);
            }
        }
        debug!("Replaced all variables ({} now)", self.size());
        self.fire(&VariableListEvent::AllReplaced);
    }

    /// Registers a listener. Dead weak handles are pruned at dispatch time.
    pub fn add_listener(&self, listener: Weak<dyn VariableListListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Unregisters a listener, compared by allocation identity.
    pub fn remove_listener(&self, listener: &Weak<dyn VariableListListener>) {
        self.listeners
            .borrow_mut()
            .retain(|l| !Weak::ptr_eq(l, listener));
    }

    fn fire(&self, event: &VariableListEvent) {
        // Snapshot the live listeners so callbacks can re-enter the list.
        let live: Vec<_> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|l| l.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener.list_changed(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    struct Probe {
        events: RefCell<Vec<VariableListEvent>>,
    }

    impl Probe {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                events: RefCell::new(vec![]),
            })
        }
        fn take(&self) -> Vec<VariableListEvent> {
            self.events.borrow_mut().drain(..).collect()
        }
    }

    impl VariableListListener for Probe {
        fn list_changed(&self, event: &VariableListEvent) {
            self.events.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_add_and_lookup() {
        let list = VariableList::new();
        list.add("a");
        list.add("b");
        assert_eq!(list.size(), 2);
        assert_eq!(list.get(0), "a");
        assert_eq!(list.get(1), "b");
        assert_eq!(list.index_of("b"), Some(1));
        assert_eq!(list.index_of("z"), None);
    }

    #[test]
    #[should_panic(expected = "duplicate variable name")]
    fn test_duplicate_name_panics() {
        let list = VariableList::new();
        list.add("a");
        list.add("a");
    }

    #[test]
    fn test_events() {
        let list = VariableList::from_names(["a", "b", "c"]);
        let probe = Probe::new();
        list.add_listener(Rc::<Probe>::downgrade(&probe));

        list.add("d");
        assert_eq!(
            probe.take(),
            vec![VariableListEvent::Add {
                name: "d".into(),
                index: 3
            }]
        );

        list.remove(1);
        assert_eq!(
            probe.take(),
            vec![VariableListEvent::Remove {
                name: "b".into(),
                index: 1
            }]
        );
        assert_eq!(list.names(), ["a", "c", "d"]);

        list.move_by(0, 2);
        assert_eq!(
            probe.take(),
            vec![VariableListEvent::Move {
                name: "a".into(),
                index: 2,
                delta: 2
            }]
        );
        assert_eq!(list.names(), ["c", "d", "a"]);

        list.replace(1, "e");
        assert_eq!(
            probe.take(),
            vec![VariableListEvent::Replace {
                index: 1,
                old_name: "d".into(),
                new_name: "e".into()
            }]
        );

        list.set_all(["x", "y"]);
        assert_eq!(probe.take(), vec![VariableListEvent::AllReplaced]);
        assert_eq!(list.names(), ["x", "y"]);
    }

    #[test]
    fn test_noop_edits_fire_nothing() {
        let list = VariableList::from_names(["a", "b"]);
        let probe = Probe::new();
        list.add_listener(Rc::<Probe>::downgrade(&probe));

        list.move_by(0, 0);
        list.replace(1, "b");
        assert!(probe.take().is_empty());
    }

    #[test]
    fn test_listener_observes_committed_state() {
        struct Check {
            list: Rc<VariableList>,
        }
        impl VariableListListener for Check {
            fn list_changed(&self, event: &VariableListEvent) {
                if let VariableListEvent::Add { name, index } = event {
                    assert_eq!(&self.list.get(*index), name);
                }
            }
        }

        let list = Rc::new(VariableList::new());
        let check = Rc::new(Check {
            list: Rc::clone(&list),
        });
        list.add_listener(Rc::<Check>::downgrade(&check));
        list.add("a");
        list.add("b");
    }

    #[test]
    fn test_dropped_listener_is_pruned() {
        let list = VariableList::new();
        let probe = Probe::new();
        list.add_listener(Rc::<Probe>::downgrade(&probe));
        drop(probe);
        list.add("a"); // must not panic or deliver to a dead listener
        assert_eq!(list.size(), 1);
    }

    #[test]
    fn test_remove_listener() {
        let list = VariableList::new();
        let probe = Probe::new();
        let handle: Weak<dyn VariableListListener> = Rc::<Probe>::downgrade(&probe);
        list.add_listener(handle.clone());
        list.remove_listener(&handle);
        list.add("a");
        assert!(probe.take().is_empty());
    }
}
