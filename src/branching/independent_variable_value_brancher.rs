use super::Brancher;
use super::SelectionContext;
use super::ValueSelector;
use super::VariableSelector;
use crate::engine::variables::Literal;

/// A [`Brancher`] composed of an independent variable selector and value
/// selector.
#[derive(Clone, Debug)]
pub struct IndependentVariableValueBrancher<VarSelector, ValSelector> {
    pub variable_selector: VarSelector,
    pub value_selector: ValSelector,
}

impl<VarSelector, ValSelector> IndependentVariableValueBrancher<VarSelector, ValSelector> {
    pub fn new(
        variable_selector: VarSelector,
        value_selector: ValSelector,
    ) -> IndependentVariableValueBrancher<VarSelector, ValSelector> {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
        }
    }
}

impl<VarSelector, ValSelector> Brancher
    for IndependentVariableValueBrancher<VarSelector, ValSelector>
where
    VarSelector: VariableSelector,
    ValSelector: ValueSelector,
{
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Literal> {
        self.variable_selector
            .select_variable(context)
            .map(|variable| self.value_selector.select_value(context, variable))
    }

    fn on_conflict(&mut self) {
        self.variable_selector.on_conflict()
    }

    fn on_unassign_literal(&mut self, literal: Literal) {
        self.value_selector.on_unassign_literal(literal)
    }

    fn on_appearance_in_conflict_clause(&mut self, literal: Literal) {
        self.variable_selector
            .on_appearance_in_conflict_clause(literal.get_variable())
    }
}
