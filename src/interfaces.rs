//! The output surface of spec.md §6: `prove()`, `transformations()`,
//! `initial_clauses()`, `resolution_steps()`, bundled into a single result
//! so a caller (the CLI, or an embedder) gets the whole trace from one
//! call.

use crate::clause::Clause;
use crate::config::ProverConfig;
use crate::prover::{Outcome, Prover};
use crate::sequent::Sequent;
use crate::trace::{ResolutionStep, TransformationInfo};

/// A complete record of one proof attempt.
pub struct ProveResult {
    pub outcome: Outcome,
    pub transformations: Vec<TransformationInfo>,
    pub initial_clauses: Vec<Clause>,
    pub resolution_steps: Vec<ResolutionStep>,
}

/// Runs the prover over `sequent` under `config`, returning the outcome
/// together with the full normalization and resolution trace.
pub fn prove(sequent: &Sequent, config: ProverConfig) -> ProveResult {
    let mut prover = Prover::new(config);
    let outcome = prover.prove(sequent);
    ProveResult {
        outcome,
        transformations: prover.transformations().to_vec(),
        initial_clauses: prover.initial_clauses().to_vec(),
        resolution_steps: prover.resolution_steps().to_vec(),
    }
}
