use std::fmt;

use crate::node::Node;

/// A disjunction of literals: the unit of the resolution set. Literals are
/// kept sorted and deduplicated, following `lacker-acorn::clause::Clause`'s
/// normal form (though there the ordering key is a term-order comparator;
/// here it is the ASCII debug repr, per spec.md §4.D's Combine step).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<Node>,
}

impl Clause {
    /// Builds a clause from literals, sorting by debug repr and
    /// deduplicating. Does not check for tautology; callers that care use
    /// `is_tautology`.
    pub fn new(mut literals: Vec<Node>) -> Clause {
        literals.sort_by(|a, b| a.debug_repr().cmp(&b.debug_repr()));
        literals.dedup();
        Clause { literals }
    }

    /// The empty clause: the clause with no literals, whose derivation
    /// refutes the input clause set.
    pub fn empty() -> Clause {
        Clause { literals: vec![] }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// A clause is tautological if some literal and its negation both
    /// occur.
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|lit| {
            let negated = Node::Not(Box::new(lit.clone()));
            self.literals.contains(&negated)
        })
    }

    /// A clause is impossible (always false) only when empty; a
    /// single-literal clause can never be structurally impossible without
    /// evaluation, so this mirrors `is_empty` for this system. Mirrors
    /// `lacker-acorn::clause::Clause::is_impossible`; `Prover::prove` checks
    /// this to recognize a refutation.
    pub fn is_impossible(&self) -> bool {
        self.is_empty()
    }

    /// Flattens a formula that is a disjunction (`Or`), a `Not`, or a bare
    /// atomic formula/term into a `Clause`, per spec.md §3's Clause alias.
    pub fn from_node(node: &Node) -> Clause {
        match node {
            Node::Or(ops) => Clause::new(ops.clone()),
            other => Clause::new(vec![other.clone()]),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
