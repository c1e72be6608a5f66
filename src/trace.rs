use std::fmt;

use crate::clause::Clause;
use crate::node::Node;
use crate::unify::Substitution;

/// One entry of the normalization trace: the lhs and negated-rhs formulas
/// as they stood after a single named pass. Grounded on spec.md §6's
/// `transformations()` interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationInfo {
    pub label: String,
    pub lhs_snapshot: Node,
    pub neg_rhs_snapshot: Node,
}

impl fmt::Display for TransformationInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-- {} --", self.label)?;
        writeln!(f, "  lhs:     {}", self.lhs_snapshot)?;
        write!(f, "  neg rhs: {}", self.neg_rhs_snapshot)
    }
}

/// The rule that justified a step in the resolution trace. Narrowed from
/// `lacker-acorn::proof_step::Rule`'s nine-variant enum down to the single
/// rule this system's search loop produces (spec.md §9's scoping note: only
/// naive resolution is in scope). Introducing an initial clause is not
/// itself a resolution rule; those are recorded separately via
/// `Prover::initial_clauses`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Resolution,
}

/// One step of the resolution search: the clauses resolved, the unifier
/// that made them complementary, and the resolvent produced. Grounded on
/// `lacker-acorn::proof_step::ProofStep`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionStep {
    pub rule: Rule,
    pub parents: (Clause, Clause),
    pub substitution: Substitution,
    pub resolvent: Clause,
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "resolve ({}) with ({}) => {}",
            self.parents.0, self.parents.1, self.resolvent
        )
    }
}
