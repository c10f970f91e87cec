//! # truthtable-rs: tri-state truth tables for digital logic analysis
//!
//! **`truthtable-rs`** is the table-maintenance core of a combinational
//! logic explorer: it holds, for each named output, a full tri-state value
//! per input assignment, and keeps every column structurally consistent as
//! the input and output variable lists are edited.
//!
//! ## Key Features
//!
//! - **Live row space**: with `n` inputs the table always has exactly `2^n`
//!   rows; input values are derived from the row index (input 0 is the
//!   most-significant bit), never stored.
//! - **Lossless-where-possible transforms**: appending an input splits each
//!   row into two inheriting copies; removing an input merges row pairs,
//!   collapsing disagreements to `DontCare`; reordering an input permutes
//!   the rows through an exact bijection.
//! - **Name-keyed columns**: renaming an output rekeys its column without
//!   touching contents; reordering outputs touches nothing.
//! - **Synchronous observers**: every notification fires after the mutation
//!   commits, so callbacks always read consistent state.
//! - **Equality and synthesis**: table comparison for expression
//!   verification, and canonical sum-of-products / product-of-sums
//!   rendering of any output column.
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use truthtable_rs::entry::Entry;
//! use truthtable_rs::expr::ExprForm;
//! use truthtable_rs::model::Model;
//! use truthtable_rs::table::TruthTable;
//!
//! // 1. A model holds the input and output variable lists.
//! let model = Rc::new(Model::with_variables(["a", "b"], ["y"]));
//! let table = TruthTable::new(Rc::clone(&model));
//! assert_eq!(table.row_count(), 4);
//!
//! // 2. Fill in the XOR function (rows are 00, 01, 10, 11).
//! table.set_output_entry(1, 0, Entry::One);
//! table.set_output_entry(2, 0, Entry::One);
//!
//! // 3. Untouched cells read as DontCare and contribute no clause.
//! assert_eq!(
//!     table.to_expression(ExprForm::SumOfProducts, "y"),
//!     "(~a b) + (a ~b)"
//! );
//!
//! // 4. Structural edits reshape every column in place:
//! //    a third input doubles the rows, duplicating each value.
//! model.inputs().add("c");
//! assert_eq!(table.row_count(), 8);
//! assert_eq!(table.output_entry(2, 0), Entry::One); // was row 1
//! assert_eq!(table.output_entry(3, 0), Entry::One);
//! ```
//!
//! ## Core Components
//!
//! - **[`table`]**: the [`TruthTable`][crate::table::TruthTable] engine and
//!   its structural transforms.
//! - **[`variable`]**: ordered, uniquely-named variable lists emitting
//!   structural-change events.
//! - **[`expr`]**: canonical two-level expression synthesis.

pub mod entry;
pub mod expr;
pub mod model;
pub mod table;
pub mod variable;
