//! Solver-agnostic description of a linear program.

use std::collections::HashMap;

/// A decision variable: bounds plus its objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct LpVariable {
    /// Coefficient in the minimization objective.
    pub objective: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
}

/// Direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpSense {
    /// Left-hand side must be at least the right-hand side.
    GreaterOrEqual,
    /// Left-hand side must equal the right-hand side.
    Equal,
}

/// A named linear constraint over variable indices.
///
/// Duals are reported back under the constraint's name, so names must be
/// unique within a model.
#[derive(Debug, Clone, PartialEq)]
pub struct LpConstraint {
    /// Unique constraint name, used to key dual values.
    pub name: String,
    /// `(variable index, coefficient)` pairs of the left-hand side.
    pub terms: Vec<(usize, f64)>,
    /// Constraint direction.
    pub sense: LpSense,
    /// Right-hand side.
    pub rhs: f64,
}

/// A minimization LP handed to an [`LpOracle`](super::LpOracle).
///
/// # Examples
///
/// ```
/// use crew_pairing::lp::{LpModel, LpSense};
///
/// let mut model = LpModel::new();
/// let x = model.add_variable(2.0, 0.0, 1.0);
/// model.add_constraint("cover", vec![(x, 1.0)], LpSense::GreaterOrEqual, 1.0);
/// assert_eq!(model.variables().len(), 1);
/// assert_eq!(model.constraints().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LpModel {
    variables: Vec<LpVariable>,
    constraints: Vec<LpConstraint>,
}

impl LpModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bounded variable with the given objective coefficient and
    /// returns its index.
    pub fn add_variable(&mut self, objective: f64, lower: f64, upper: f64) -> usize {
        self.variables.push(LpVariable {
            objective,
            lower,
            upper,
        });
        self.variables.len() - 1
    }

    /// Adds a named constraint.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(usize, f64)>,
        sense: LpSense,
        rhs: f64,
    ) {
        self.constraints.push(LpConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    /// The model's variables, in index order.
    pub fn variables(&self) -> &[LpVariable] {
        &self.variables
    }

    /// The model's constraints, in insertion order.
    pub fn constraints(&self) -> &[LpConstraint] {
        &self.constraints
    }
}

/// Primal and dual values of an optimal solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    /// Optimal objective value.
    pub objective: f64,
    /// Primal value per variable, in index order.
    pub values: Vec<f64>,
    /// Dual (shadow) price per constraint, keyed by constraint name.
    pub duals: HashMap<String, f64>,
}

/// Result of dispatching a model to the LP oracle.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// An optimal solution with primal values and duals.
    Optimal(LpSolution),
    /// No feasible point exists.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// Any other solver failure.
    Error(String),
}

impl LpOutcome {
    /// Returns `true` for [`LpOutcome::Optimal`].
    pub fn is_optimal(&self) -> bool {
        matches!(self, LpOutcome::Optimal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_building() {
        let mut model = LpModel::new();
        let x = model.add_variable(10.0, 0.0, 1.0);
        let y = model.add_variable(15.0, 0.0, 1.0);
        assert_eq!((x, y), (0, 1));

        model.add_constraint("c", vec![(x, 1.0), (y, 1.0)], LpSense::GreaterOrEqual, 1.0);
        let c = &model.constraints()[0];
        assert_eq!(c.name, "c");
        assert_eq!(c.sense, LpSense::GreaterOrEqual);
        assert_eq!(c.rhs, 1.0);
    }

    #[test]
    fn test_outcome_predicates() {
        let solution = LpSolution {
            objective: 0.0,
            values: vec![],
            duals: HashMap::new(),
        };
        assert!(LpOutcome::Optimal(solution).is_optimal());
        assert!(!LpOutcome::Infeasible.is_optimal());
        assert!(!LpOutcome::Unbounded.is_optimal());
    }
}
