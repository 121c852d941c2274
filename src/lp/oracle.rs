//! LP oracle contract and the Clarabel-backed implementation.

use std::collections::HashMap;

use good_lp::constraint::ConstraintReference;
use good_lp::solvers::{DualValues, SolutionWithDual};
use good_lp::{clarabel, constraint, variable, Expression, ProblemVariables, ResolutionError,
    Solution, SolverModel};
use tracing::debug;

use super::{LpModel, LpOutcome, LpSense, LpSolution};

/// A black-box linear-program solver.
///
/// Given a minimization objective over bounded variables and a set of named
/// linear constraints, the oracle reports an optimum (with primal values and
/// per-constraint duals), infeasibility, unboundedness, or an error. The
/// optimization core depends only on this contract; concrete backends are
/// injected by the caller.
pub trait LpOracle {
    /// Solves the model.
    fn solve(&self, model: &LpModel) -> LpOutcome;
}

/// [`LpOracle`] implementation backed by the pure-Rust Clarabel solver.
///
/// # Examples
///
/// ```
/// use crew_pairing::lp::{ClarabelOracle, LpModel, LpOracle, LpSense};
///
/// let mut model = LpModel::new();
/// let x = model.add_variable(1.0, 0.0, 10.0);
/// model.add_constraint("floor", vec![(x, 1.0)], LpSense::GreaterOrEqual, 3.0);
/// assert!(ClarabelOracle.solve(&model).is_optimal());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarabelOracle;

impl LpOracle for ClarabelOracle {
    fn solve(&self, model: &LpModel) -> LpOutcome {
        if model.variables().is_empty() {
            return solve_trivial(model);
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<good_lp::Variable> = model
            .variables()
            .iter()
            .map(|v| vars.add(variable().min(v.lower).max(v.upper)))
            .collect();

        let objective = model
            .variables()
            .iter()
            .zip(&handles)
            .fold(Expression::from(0.0), |acc, (v, &h)| acc + h * v.objective);

        let mut problem = vars.minimise(objective).using(clarabel);
        let mut refs: Vec<ConstraintReference> = Vec::with_capacity(model.constraints().len());
        for c in model.constraints() {
            let lhs = c
                .terms
                .iter()
                .fold(Expression::from(0.0), |acc, &(i, coeff)| {
                    acc + handles[i] * coeff
                });
            let reference = match c.sense {
                LpSense::GreaterOrEqual => problem.add_constraint(constraint!(lhs >= c.rhs)),
                LpSense::Equal => problem.add_constraint(constraint!(lhs == c.rhs)),
            };
            refs.push(reference);
        }

        match problem.solve() {
            Ok(mut solution) => {
                let values: Vec<f64> = handles.iter().map(|&h| solution.value(h)).collect();
                let objective = model
                    .variables()
                    .iter()
                    .zip(&values)
                    .map(|(v, &x)| v.objective * x)
                    .sum();
                let mut duals = HashMap::with_capacity(refs.len());
                {
                    let dual_values = solution.compute_dual();
                    for (c, r) in model.constraints().iter().zip(&refs) {
                        duals.insert(c.name.clone(), dual_values.dual(r.clone()));
                    }
                }
                debug!(objective, "lp solve optimal");
                LpOutcome::Optimal(LpSolution {
                    objective,
                    values,
                    duals,
                })
            }
            Err(ResolutionError::Infeasible) => LpOutcome::Infeasible,
            Err(ResolutionError::Unbounded) => LpOutcome::Unbounded,
            Err(other) => LpOutcome::Error(other.to_string()),
        }
    }
}

/// A model with no variables is feasible iff every constraint holds with an
/// all-zero left-hand side.
fn solve_trivial(model: &LpModel) -> LpOutcome {
    let feasible = model.constraints().iter().all(|c| match c.sense {
        LpSense::GreaterOrEqual => 0.0 >= c.rhs,
        LpSense::Equal => c.rhs == 0.0,
    });
    if feasible {
        LpOutcome::Optimal(LpSolution {
            objective: 0.0,
            values: vec![],
            duals: model
                .constraints()
                .iter()
                .map(|c| (c.name.clone(), 0.0))
                .collect(),
        })
    } else {
        LpOutcome::Infeasible
    }
}
