//! The truth table engine.
//!
//! A [`TruthTable`] holds, for every named output, one tri-state [`Entry`]
//! per input assignment. The row space is derived from the live input list:
//! with `n` inputs there are exactly `2^n` rows, and the input at position 0
//! is the most-significant bit of the row index. Input values are never
//! stored --- only output columns are, keyed by output name.
//!
//! The table subscribes to both variable lists and keeps every column
//! structurally consistent across edits:
//!
//! - appending an input splits each row `r` into rows `2r` and `2r+1`,
//!   both inheriting the old value (the function did not depend on the new
//!   variable);
//! - removing an input merges each pair of rows differing only in the
//!   removed bit --- equal entries are kept, unequal entries collapse to
//!   `DontCare` (the distinguishing condition no longer exists);
//! - moving an input permutes the row indices through an explicit bijection
//!   on `[0, 2^n)`;
//! - renaming an output rekeys its column, removing an output drops it, and
//!   a bulk replacement of either list resets every column.
//!
//! All transforms commit before any notification fires, so observers that
//! re-read the table from inside a callback observe consistent state.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::debug;

use crate::entry::Entry;
use crate::model::Model;
use crate::variable::{VariableListEvent, VariableListListener};

const DEFAULT_ENTRY: Entry = Entry::DontCare;

/// Receives truth table notifications, synchronously, after each mutation
/// commits.
pub trait TruthTableListener {
    /// The output column at `column` changed contents.
    fn cells_changed(&self, table: &TruthTable, column: usize);
    /// The shape of the table changed; `cause` is the list edit responsible.
    fn structure_changed(&self, table: &TruthTable, cause: &VariableListEvent);
}

#[derive(Debug, Copy, Clone)]
enum Source {
    Inputs,
    Outputs,
}

/// Routes one list's events into the table, tagged with which list it was.
struct ListChannel {
    table: Weak<TruthTable>,
    source: Source,
}

impl VariableListListener for ListChannel {
    fn list_changed(&self, event: &VariableListEvent) {
        if let Some(table) = self.table.upgrade() {
            table.list_changed(self.source, event);
        }
    }
}

/// A tri-state truth table over the input/output lists of a [`Model`].
///
/// All state sits behind `RefCell`, so every operation takes `&self`.
/// Columns are materialized lazily: an output that has never been written
/// reads as all-`DontCare`, and its column is allocated on first write (or
/// on first whole-column read).
pub struct TruthTable {
    model: Rc<Model>,
    columns: RefCell<HashMap<String, Vec<Entry>>>,
    listeners: RefCell<Vec<Weak<dyn TruthTableListener>>>,
    // Own the list subscriptions so they live exactly as long as the table.
    input_channel: Rc<ListChannel>,
    output_channel: Rc<ListChannel>,
}

impl TruthTable {
    /// Creates a table over `model` and subscribes it to both lists.
    pub fn new(model: Rc<Model>) -> Rc<Self> {
        let table = Rc::new_cyclic(|weak: &Weak<TruthTable>| TruthTable {
            model,
            columns: RefCell::new(HashMap::new()),
            listeners: RefCell::new(vec![]),
            input_channel: Rc::new(ListChannel {
                table: weak.clone(),
                source: Source::Inputs,
            }),
            output_channel: Rc::new(ListChannel {
                table: weak.clone(),
                source: Source::Outputs,
            }),
        });
        let input_listener: Rc<dyn VariableListListener> = Rc::clone(&table.input_channel) as _;
        table.model.inputs().add_listener(Rc::downgrade(&input_listener));
        let output_listener: Rc<dyn VariableListListener> = Rc::clone(&table.output_channel) as _;
        table.model.outputs().add_listener(Rc::downgrade(&output_listener));
        table
    }

    /// Whether the input at `column` is set in the given row.
    ///
    /// The input at position 0 is the most-significant bit of the row index.
    pub fn is_input_set(row: usize, column: usize, inputs: usize) -> bool {
        (row >> (inputs - 1 - column)) & 1 == 1
    }

    /// The number of rows: `2^n` for `n` inputs.
    pub fn row_count(&self) -> usize {
        1 << self.model.inputs().size()
    }

    /// The number of input columns.
    pub fn input_column_count(&self) -> usize {
        self.model.inputs().size()
    }

    /// The number of output columns.
    pub fn output_column_count(&self) -> usize {
        self.model.outputs().size()
    }

    /// The derived input value at (`row`, `column`): `One` or `Zero`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn input_entry(&self, row: usize, column: usize) -> Entry {
        let rows = self.row_count();
        let inputs = self.input_column_count();
        assert!(row < rows, "row index out of range: {row} (rows: {rows})");
        assert!(
            column < inputs,
            "column index out of range: {column} (columns: {inputs})"
        );
        Entry::from_bool(Self::is_input_set(row, column, inputs))
    }

    /// The name of the input at `column`.
    pub fn input_header(&self, column: usize) -> String {
        self.model.inputs().get(column)
    }

    /// The position of the named input, if present.
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.model.inputs().index_of(name)
    }

    /// The name of the output at `column`.
    pub fn output_header(&self, column: usize) -> String {
        self.model.outputs().get(column)
    }

    /// The position of the named output, if present.
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.model.outputs().index_of(name)
    }

    /// The entry at (`row`, `column`) of the output columns.
    ///
    /// This read is total: out-of-range coordinates yield `DontCare` rather
    /// than failing, so observers racing a structural edit within one event
    /// dispatch never see a panic.
    pub fn output_entry(&self, row: usize, column: usize) -> Entry {
        if row >= self.row_count() || column >= self.output_column_count() {
            return Entry::DontCare;
        }
        let name = self.model.outputs().get(column);
        match self.columns.borrow().get(&name) {
            Some(data) => data.get(row).copied().unwrap_or(Entry::DontCare),
            None => DEFAULT_ENTRY,
        }
    }

    /// The live column of the output at `column`, materializing it (as
    /// all-`DontCare`) if it has never been written.
    ///
    /// The returned guard borrows the table; release it before mutating.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range.
    pub fn output_column(&self, column: usize) -> Ref<'_, [Entry]> {
        let outputs = self.output_column_count();
        assert!(
            column < outputs,
            "column index out of range: {column} (columns: {outputs})"
        );
        let name = self.model.outputs().get(column);
        let rows = self.row_count();
        self.columns
            .borrow_mut()
            .entry(name.clone())
            .or_insert_with(|| vec![DEFAULT_ENTRY; rows]);
        Ref::map(self.columns.borrow(), |columns| columns[&name].as_slice())
    }

    /// Writes one cell. No-op (and no notification) if the value is already
    /// current; otherwise fires `cells_changed` after the write commits.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn set_output_entry(&self, row: usize, column: usize, value: Entry) {
        let rows = self.row_count();
        assert!(row < rows, "row index out of range: {row} (rows: {rows})");
        let outputs = self.output_column_count();
        assert!(
            column < outputs,
            "column index out of range: {column} (columns: {outputs})"
        );
        let name = self.model.outputs().get(column);
        let changed = {
            let mut columns = self.columns.borrow_mut();
            match columns.get_mut(&name) {
                Some(data) => {
                    if data[row] == value {
                        false
                    } else {
                        data[row] = value;
                        true
                    }
                }
                None => {
                    if value == DEFAULT_ENTRY {
                        false
                    } else {
                        let mut data = vec![DEFAULT_ENTRY; rows];
                        data[row] = value;
                        columns.insert(name, data);
                        true
                    }
                }
            }
        };
        if changed {
            self.fire_cells_changed(column);
        }
    }

    /// Replaces (or, with `None`, clears) the whole column of the output at
    /// `column`. No-op if the contents are already current; otherwise fires
    /// `cells_changed` after the write commits.
    ///
    /// # Panics
    ///
    /// Panics if `column` is out of range, or if `values` is `Some` with a
    /// length other than the current row count.
    pub fn set_output_column(&self, column: usize, values: Option<Vec<Entry>>) {
        let outputs = self.output_column_count();
        assert!(
            column < outputs,
            "column index out of range: {column} (columns: {outputs})"
        );
        if let Some(values) = &values {
            let rows = self.row_count();
            assert!(
                values.len() == rows,
                "column data has length {} (rows: {rows})",
                values.len()
            );
        }
        let name = self.model.outputs().get(column);
        let changed = {
            let mut columns = self.columns.borrow_mut();
            match values {
                None => columns.remove(&name).is_some(),
                Some(values) => {
                    if columns.get(&name) == Some(&values) {
                        false
                    } else {
                        columns.insert(name, values);
                        true
                    }
                }
            }
        };
        if changed {
            self.fire_cells_changed(column);
        }
    }

    /// Registers an observer. Dead weak handles are pruned at dispatch time.
    pub fn add_listener(&self, listener: Weak<dyn TruthTableListener>) {
        self.listeners.borrow_mut().push(listener);
    }

    /// Unregisters an observer, compared by allocation identity.
    pub fn remove_listener(&self, listener: &Weak<dyn TruthTableListener>) {
        self.listeners
            .borrow_mut()
            .retain(|l| !Weak::ptr_eq(l, listener));
    }

    fn fire_cells_changed(&self, column: usize) {
        for listener in self.live_listeners() {
            listener.cells_changed(self, column);
        }
    }

    fn fire_structure_changed(&self, cause: &VariableListEvent) {
        for listener in self.live_listeners() {
            listener.structure_changed(self, cause);
        }
    }

    fn live_listeners(&self) -> Vec<Rc<dyn TruthTableListener>> {
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.strong_count() > 0);
        listeners.iter().filter_map(Weak::upgrade).collect()
    }

    fn list_changed(&self, source: Source, event: &VariableListEvent) {
        match source {
            Source::Inputs => self.inputs_changed(event),
            Source::Outputs => self.outputs_changed(event),
        }
        self.fire_structure_changed(event);
    }

    fn inputs_changed(&self, event: &VariableListEvent) {
        match event {
            VariableListEvent::Add { name, .. } => {
                // The new input is the new least-significant bit.
                debug!("Splitting output columns for new input '{}'", name);
                let mut columns = self.columns.borrow_mut();
                for data in columns.values_mut() {
                    *data = split_column(data);
                }
            }
            VariableListEvent::Remove { name, index } => {
                debug!("Merging output columns for removed input '{}'", name);
                let old_inputs = self.model.inputs().size() + 1;
                let mut columns = self.columns.borrow_mut();
                for data in columns.values_mut() {
                    *data = merge_column(data, *index, old_inputs);
                }
            }
            VariableListEvent::Move { name, index, delta } => {
                debug!("Permuting output columns for moved input '{}'", name);
                let inputs = self.model.inputs().size();
                let old_index = (*index as isize - delta) as usize;
                let perm = move_permutation(inputs, old_index, *index);
                let mut columns = self.columns.borrow_mut();
                for data in columns.values_mut() {
                    *data = permute_rows(data, &perm);
                }
            }
            VariableListEvent::Replace { .. } => {
                // Input names are not stored in columns; nothing to do.
            }
            VariableListEvent::AllReplaced => {
                // The row space was wholesale redefined; stale columns would
                // no longer match the row count.
                debug!("Input list replaced in bulk; dropping all columns");
                self.columns.borrow_mut().clear();
            }
        }
    }

    fn outputs_changed(&self, event: &VariableListEvent) {
        match event {
            VariableListEvent::Remove { name, .. } => {
                self.columns.borrow_mut().remove(name);
            }
            VariableListEvent::Replace {
                old_name, new_name, ..
            } => {
                // Rekey only; contents untouched.
                let mut columns = self.columns.borrow_mut();
                if let Some(data) = columns.remove(old_name) {
                    columns.insert(new_name.clone(), data);
                }
            }
            VariableListEvent::AllReplaced => {
                self.columns.borrow_mut().clear();
            }
            VariableListEvent::Add { .. } | VariableListEvent::Move { .. } => {
                // Columns are keyed by name; adding or reordering outputs
                // does not touch storage.
            }
        }
    }
}

/// Two tables are equal iff they have the same input names in the same
/// order, the same number of outputs, and entry-for-entry equal output
/// columns. `DontCare` compares as an ordinary distinct value.
impl PartialEq for TruthTable {
    fn eq(&self, other: &Self) -> bool {
        let inputs = self.input_column_count();
        let outputs = self.output_column_count();
        if inputs != other.input_column_count() || outputs != other.output_column_count() {
            return false;
        }
        for column in 0..inputs {
            if self.input_header(column) != other.input_header(column) {
                return false;
            }
        }
        let rows = self.row_count();
        for column in 0..outputs {
            for row in 0..rows {
                if self.output_entry(row, column) != other.output_entry(row, column) {
                    return false;
                }
            }
        }
        true
    }
}

/// Duplicates each row `r` into rows `2r` and `2r+1`.
fn split_column(column: &[Entry]) -> Vec<Entry> {
    let mut out = Vec::with_capacity(2 * column.len());
    for &entry in column {
        out.push(entry);
        out.push(entry);
    }
    out
}

/// Merges each pair of rows differing only in the removed input's bit.
/// Equal entries are kept; unequal entries collapse to `DontCare`.
fn merge_column(column: &[Entry], index: usize, old_inputs: usize) -> Vec<Entry> {
    let mask = 1 << (old_inputs - 1 - index);
    let mut out = Vec::with_capacity(column.len() / 2);
    for i in 0..column.len() {
        if i & mask == 0 {
            let e0 = column[i];
            let e1 = column[i | mask];
            out.push(if e0 == e1 { e0 } else { Entry::DontCare });
        }
    }
    out
}

/// The row-index bijection induced by moving the input at `old_index` to
/// `new_index` (positions, not bit numbers), over `inputs` total inputs.
///
/// Row bits split into three disjoint groups: bits outside the affected
/// span are unchanged, the moving input's bit relocates by the full
/// distance, and the bits strictly between the two positions shift by one
/// place to close the vacated gap.
fn move_permutation(inputs: usize, old_index: usize, new_index: usize) -> Vec<usize> {
    let rows = 1 << inputs;
    if old_index == new_index {
        return (0..rows).collect();
    }
    let old_pos = inputs - 1 - old_index;
    let new_pos = inputs - 1 - new_index;
    let lo = old_pos.min(new_pos);
    let hi = old_pos.max(new_pos);
    let same_mask = (rows - 1) ^ ((1 << (hi + 1)) - 1) ^ ((1 << lo) - 1);
    let move_mask = 1 << old_pos;
    let block_mask = (rows - 1) ^ same_mask ^ move_mask;
    let dist = hi - lo;
    let move_up = new_pos > old_pos;
    let mut perm = vec![0; rows];
    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = if move_up {
            (i & same_mask) | ((i & move_mask) << dist) | ((i & block_mask) >> 1)
        } else {
            (i & same_mask) | ((i & move_mask) >> dist) | ((i & block_mask) << 1)
        };
    }
    perm
}

/// Scatters `column[i]` to row `perm[i]`.
fn permute_rows(column: &[Entry], perm: &[usize]) -> Vec<Entry> {
    let mut out = vec![DEFAULT_ENTRY; column.len()];
    for (i, &entry) in column.iter().enumerate() {
        out[perm[i]] = entry;
    }
    out
}
