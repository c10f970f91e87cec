//! Canonical two-level expression synthesis from a truth table column.

use crate::entry::Entry;
use crate::table::TruthTable;

/// The two-level form to synthesize: one clause per qualifying row.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExprForm {
    /// One product (minterm) per row where the output is `One`, summed.
    SumOfProducts,
    /// One sum (maxterm) per row where the output is `Zero`, multiplied.
    ProductOfSums,
}

impl ExprForm {
    /// The literal value a row must hold to contribute a clause.
    fn desired(self) -> Entry {
        match self {
            ExprForm::SumOfProducts => Entry::One,
            ExprForm::ProductOfSums => Entry::Zero,
        }
    }
}

impl TruthTable {
    /// Renders the named output as a canonical two-level expression.
    ///
    /// Every row whose entry equals the form's desired literal contributes
    /// one parenthesized clause conjoining all input names, each negated
    /// (`~`) when its bit in that row differs from the desired literal.
    /// Rows holding `DontCare` contribute nothing --- they are left
    /// unrepresented, not exploited for minimization. The result is empty
    /// when no row qualifies or the output name is unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::rc::Rc;
    /// use truthtable_rs::entry::Entry;
    /// use truthtable_rs::expr::ExprForm;
    /// use truthtable_rs::model::Model;
    /// use truthtable_rs::table::TruthTable;
    ///
    /// let model = Rc::new(Model::with_variables(["a", "b"], ["y"]));
    /// let table = TruthTable::new(Rc::clone(&model));
    /// table.set_output_entry(1, 0, Entry::One); // row 01
    /// table.set_output_entry(2, 0, Entry::One); // row 10
    ///
    /// let sop = table.to_expression(ExprForm::SumOfProducts, "y");
    /// assert_eq!(sop, "(~a b) + (a ~b)");
    /// ```
    pub fn to_expression(&self, form: ExprForm, output: &str) -> String {
        let Some(column) = self.output_index(output) else {
            return String::new();
        };
        let desired = form.desired();
        let (literal_sep, clause_sep) = match form {
            ExprForm::SumOfProducts => (" ", " + "),
            ExprForm::ProductOfSums => (" + ", " "),
        };
        let inputs = self.input_column_count();
        let mut clauses: Vec<String> = vec![];
        for row in 0..self.row_count() {
            if self.output_entry(row, column) != desired {
                continue;
            }
            let mut clause = String::from("(");
            for col in 0..inputs {
                if col > 0 {
                    clause.push_str(literal_sep);
                }
                if self.input_entry(row, col) != desired {
                    clause.push('~');
                }
                clause.push_str(&self.input_header(col));
            }
            clause.push(')');
            clauses.push(clause);
        }
        clauses.join(clause_sep)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use test_log::test;

    use super::*;
    use crate::entry::Entry::{One, Zero};
    use crate::model::Model;

    fn table(inputs: &[&str], outputs: &[&str]) -> Rc<TruthTable> {
        let model = Rc::new(Model::with_variables(
            inputs.iter().copied(),
            outputs.iter().copied(),
        ));
        TruthTable::new(model)
    }

    #[test]
    fn test_xor_sum_of_products() {
        // Rows 00, 11 stay DONT_CARE and contribute no clause.
        let table = table(&["a", "b"], &["y"]);
        table.set_output_entry(1, 0, One);
        table.set_output_entry(2, 0, One);
        assert_eq!(
            table.to_expression(ExprForm::SumOfProducts, "y"),
            "(~a b) + (a ~b)"
        );
    }

    #[test]
    fn test_dont_care_rows_yield_no_dual_clauses() {
        // Same XOR-ish table: nothing is ZERO, so the POS rendering is empty.
        let table = table(&["a", "b"], &["y"]);
        table.set_output_entry(1, 0, One);
        table.set_output_entry(2, 0, One);
        assert_eq!(table.to_expression(ExprForm::ProductOfSums, "y"), "");
    }

    #[test]
    fn test_xor_product_of_sums() {
        let table = table(&["a", "b"], &["y"]);
        table.set_output_column(0, Some(vec![Zero, One, One, Zero]));
        assert_eq!(
            table.to_expression(ExprForm::ProductOfSums, "y"),
            "(a + b) (~a + ~b)"
        );
    }

    #[test]
    fn test_single_minterm() {
        let table = table(&["a", "b", "c"], &["y"]);
        table.set_output_entry(5, 0, One); // 101
        assert_eq!(
            table.to_expression(ExprForm::SumOfProducts, "y"),
            "(a ~b c)"
        );
    }

    #[test]
    fn test_unknown_output_is_empty() {
        let table = table(&["a"], &["y"]);
        table.set_output_entry(0, 0, One);
        assert_eq!(table.to_expression(ExprForm::SumOfProducts, "q"), "");
    }

    #[test]
    fn test_untouched_output_is_empty() {
        let table = table(&["a", "b"], &["y"]);
        assert_eq!(table.to_expression(ExprForm::SumOfProducts, "y"), "");
        assert_eq!(table.to_expression(ExprForm::ProductOfSums, "y"), "");
    }

    #[test]
    fn test_second_output_uses_its_own_column() {
        let table = table(&["a"], &["y", "z"]);
        table.set_output_entry(0, 0, One);
        table.set_output_entry(1, 1, One);
        assert_eq!(table.to_expression(ExprForm::SumOfProducts, "y"), "(~a)");
        assert_eq!(table.to_expression(ExprForm::SumOfProducts, "z"), "(a)");
    }
}
