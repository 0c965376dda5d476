//! clozegen-problems: Built-in problem definitions.
//!
//! Each module declares an input space, a cloze question template and the
//! evaluator that computes the expected answers for one combination.

pub mod children;
pub mod convection;
pub mod wall;

use anyhow::{bail, Result};
use clozegen_core::FnProblem;

/// Identifiers of every built-in problem, in listing order.
pub const PROBLEM_IDS: &[&str] = &[children::ID, wall::ID, convection::ID];

/// Build the problem registered under `id`.
pub fn create_problem(id: &str) -> Result<FnProblem> {
    let problem = match id {
        children::ID => children::problem()?,
        wall::ID => wall::problem()?,
        convection::ID => convection::problem()?,
        other => bail!(
            "unknown problem '{other}' (available: {})",
            PROBLEM_IDS.join(", ")
        ),
    };
    tracing::debug!(problem = id, "problem loaded");
    Ok(problem)
}

/// Build every built-in problem.
pub fn all_problems() -> Result<Vec<FnProblem>> {
    PROBLEM_IDS.iter().map(|id| create_problem(id)).collect()
}
