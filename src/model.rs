//! The owning model: one input list, one output list.

use std::rc::Rc;

use crate::variable::VariableList;

/// Holds the input and output [`VariableList`]s a [`TruthTable`] is built
/// over.
///
/// The table keeps an `Rc` to the model and derives its row space from the
/// live input list, so edits made here flow into the table through the
/// lists' notifications.
///
/// [`TruthTable`]: crate::table::TruthTable
#[derive(Default)]
pub struct Model {
    inputs: Rc<VariableList>,
    outputs: Rc<VariableList>,
}

impl Model {
    /// Creates a model with empty input and output lists.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a model with the given input and output names.
    pub fn with_variables<I, O, S, T>(inputs: I, outputs: O) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        O: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            inputs: Rc::new(VariableList::from_names(inputs)),
            outputs: Rc::new(VariableList::from_names(outputs)),
        }
    }

    /// The ordered list of input variables.
    pub fn inputs(&self) -> &Rc<VariableList> {
        &self.inputs
    }

    /// The ordered list of output variables.
    pub fn outputs(&self) -> &Rc<VariableList> {
        &self.outputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_variables() {
        let model = Model::with_variables(["a", "b"], ["y"]);
        assert_eq!(model.inputs().names(), ["a", "b"]);
        assert_eq!(model.outputs().names(), ["y"]);
    }

    #[test]
    fn test_lists_are_independent() {
        let model = Model::new();
        model.inputs().add("a");
        model.outputs().add("a"); // same name is fine across lists
        assert_eq!(model.inputs().size(), 1);
        assert_eq!(model.outputs().size(), 1);
    }
}
