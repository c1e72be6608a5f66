use crate::node::Node;

/// One side of a sequent: a single formula, a list (conjunction on the lhs,
/// disjunction on the rhs), or empty (`TRUE` on the lhs, `FALSE` on the
/// rhs), per spec.md §3's `Sequent` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequentSide {
    Single(Node),
    List(Vec<Node>),
    Empty,
}

/// The top-level obligation `lhs ⇒ rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequent {
    pub lhs: SequentSide,
    pub rhs: SequentSide,
}

impl Sequent {
    pub fn new(lhs: SequentSide, rhs: SequentSide) -> Sequent {
        Sequent { lhs, rhs }
    }

    /// The left-hand side as a single formula: a list becomes its
    /// conjunction, empty becomes `TRUE`.
    pub fn lhs_formula(&self) -> Node {
        match &self.lhs {
            SequentSide::Single(n) => n.clone(),
            SequentSide::List(ns) => conjunction(ns),
            SequentSide::Empty => Node::constant_true(),
        }
    }

    /// The negated right-hand side as a single formula: a list becomes the
    /// negation of its disjunction, empty becomes `¬FALSE`.
    pub fn negated_rhs_formula(&self) -> Node {
        let rhs = match &self.rhs {
            SequentSide::Single(n) => n.clone(),
            SequentSide::List(ns) => disjunction(ns),
            SequentSide::Empty => Node::constant_false(),
        };
        Node::Not(Box::new(rhs))
    }
}

fn conjunction(ns: &[Node]) -> Node {
    match ns.len() {
        0 => Node::constant_true(),
        1 => ns[0].clone(),
        _ => Node::And(ns.to_vec()),
    }
}

fn disjunction(ns: &[Node]) -> Node {
    match ns.len() {
        0 => Node::constant_false(),
        1 => ns[0].clone(),
        _ => Node::Or(ns.to_vec()),
    }
}
