use crate::node::Node;
use crate::substitution::substitute_everywhere;

/// A single replacement: every occurrence of `target` is replaced by
/// `term`. Mirrors `original_source/src/core/resolution_info.py`'s
/// `UnifierInfo(a, b)` pair (there `a` is the replacement, `b` the thing
/// replaced).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub term: Node,
    pub target: Node,
}

/// An ordered list of bindings, applied left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution(pub Vec<Binding>);

impl Substitution {
    pub fn empty() -> Substitution {
        Substitution(vec![])
    }

    fn single(target: Node, term: Node) -> Substitution {
        Substitution(vec![Binding { term, target }])
    }

    fn compose(mut self, other: Substitution) -> Substitution {
        self.0.extend(other.0);
        self
    }

    /// Applies every binding, in order, throughout `node`.
    pub fn apply(&self, node: &Node) -> Node {
        let mut result = node.clone();
        for binding in &self.0 {
            result = substitute_everywhere(&result, &binding.target, &binding.term);
        }
        result
    }
}

/// True if `needle` occurs anywhere within `haystack` (including at the
/// root) — the occurs-check guarding rule 4's Skolem-function binding.
fn occurs(needle: &Node, haystack: &Node) -> bool {
    if needle == haystack {
        return true;
    }
    haystack.children().iter().any(|c| occurs(needle, c))
}

/// True when `a` and `b` share the same outer symbol and arity, so rule 6
/// may recurse into their children pairwise.
fn same_outer_symbol(a: &Node, b: &Node) -> bool {
    match (a, b) {
        (Node::Equals(_, _), Node::Equals(_, _)) => true,
        (Node::SkolemFunction(i, _), Node::SkolemFunction(j, _)) => i == j,
        (Node::Custom(n1, a1), Node::Custom(n2, a2)) => n1 == n2 && a1.len() == a2.len(),
        (Node::And(a1), Node::And(a2)) => a1.len() == a2.len(),
        (Node::Or(a1), Node::Or(a2)) => a1.len() == a2.len(),
        (Node::Not(_), Node::Not(_)) => true,
        (Node::Forall(v1, _), Node::Forall(v2, _)) => v1 == v2,
        (Node::Exists(v1, _), Node::Exists(v2, _)) => v1 == v2,
        (Node::Implication(_, _), Node::Implication(_, _)) => true,
        (Node::Equivalence(_, _), Node::Equivalence(_, _)) => true,
        (Node::Xor(_, _), Node::Xor(_, _)) => true,
        (Node::Nand(a1), Node::Nand(a2)) => a1.len() == a2.len(),
        (Node::Nor(a1), Node::Nor(a2)) => a1.len() == a2.len(),
        _ => false,
    }
}

/// Robinson-style most-general unifier restricted to this system's symbols,
/// applying the seven rules of spec.md §4.E in order. Grounded on
/// `original_source/src/core/unification.py::try_unify_to_same`.
pub fn unify(a: &Node, b: &Node) -> Option<Substitution> {
    // Rule 1
    if a == b {
        return Some(Substitution::empty());
    }
    // Rule 2: Constant a, Variable b
    if matches!(a, Node::Constant(_)) && matches!(b, Node::Variable(_)) {
        return Some(Substitution::single(b.clone(), a.clone()));
    }
    // Rule 3: Constant or Variable a, SkolemConstant b
    if (matches!(a, Node::Constant(_)) || matches!(a, Node::Variable(_)))
        && matches!(b, Node::SkolemConstant(_))
    {
        return Some(Substitution::single(b.clone(), a.clone()));
    }
    // Rule 4: b is a SkolemFunction
    if matches!(b, Node::SkolemFunction(_, _)) {
        if occurs(b, a) {
            return None;
        }
        return Some(Substitution::single(b.clone(), a.clone()));
    }
    // Rule 5: symmetric of 2-4
    if matches!(b, Node::Constant(_)) && matches!(a, Node::Variable(_)) {
        return Some(Substitution::single(a.clone(), b.clone()));
    }
    if (matches!(b, Node::Constant(_)) || matches!(b, Node::Variable(_)))
        && matches!(a, Node::SkolemConstant(_))
    {
        return Some(Substitution::single(a.clone(), b.clone()));
    }
    if matches!(a, Node::SkolemFunction(_, _)) {
        if occurs(a, b) {
            return None;
        }
        return Some(Substitution::single(a.clone(), b.clone()));
    }
    // Two distinct atomic terms never unify beyond rules 2-5 above.
    if a.is_atomic_term() && b.is_atomic_term() {
        return None;
    }
    // Rule 6: same outer symbol, same arity -> unify children pairwise
    if same_outer_symbol(a, b) {
        let a_children = a.children();
        let b_children = b.children();
        if a_children.len() != b_children.len() {
            return None;
        }
        let mut sub = Substitution::empty();
        for (ac, bc) in a_children.iter().zip(b_children.iter()) {
            let ac = sub.apply(ac);
            let bc = sub.apply(bc);
            let step = unify(&ac, &bc)?;
            sub = sub.compose(step);
        }
        return Some(sub);
    }
    // Rule 7
    None
}

/// Strips a single leading `Not`, returning the underlying atom.
pub fn atom_of(literal: &Node) -> &Node {
    match literal {
        Node::Not(inner) => inner,
        other => other,
    }
}

pub fn is_negative(literal: &Node) -> bool {
    matches!(literal, Node::Not(_))
}

/// Detects that `a` and `b` are complementary literals (opposite polarity)
/// whose atoms unify, returning the unifier that makes them syntactically
/// opposite. Grounded on
/// `original_source/src/core/unification.py::are_unified`.
pub fn are_complementary(a: &Node, b: &Node) -> Option<Substitution> {
    if is_negative(a) == is_negative(b) {
        return None;
    }
    unify(atom_of(a), atom_of(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_identical() {
        let sub = unify(&Node::var("x"), &Node::var("x")).unwrap();
        assert!(sub.0.is_empty());
    }

    #[test]
    fn test_unify_constant_with_variable() {
        let c = Node::Constant(crate::node::ConstantValue::Num(1));
        let sub = unify(&c, &Node::var("x")).unwrap();
        assert_eq!(sub.0.len(), 1);
        assert_eq!(sub.apply(&Node::var("x")), c);
    }

    #[test]
    fn test_occurs_check_blocks_skolem_function_binding() {
        let f = Node::SkolemFunction(0, vec![Node::var("x")]);
        assert!(unify(&f.clone(), &f).is_some());
        let wrapped = Node::custom("p", vec![f.clone()]);
        assert!(unify(&wrapped, &f).is_none());
    }

    #[test]
    fn test_unify_same_predicate_recurses() {
        let a = Node::custom("p", vec![Node::var("x")]);
        let b = Node::custom("p", vec![Node::SkolemConstant(0)]);
        let sub = unify(&a, &b).unwrap();
        assert_eq!(sub.apply(&a), b);
    }

    #[test]
    fn test_are_complementary() {
        let p = Node::custom("p", vec![Node::var("x")]);
        let not_p = Node::Not(Box::new(Node::custom("p", vec![Node::SkolemConstant(0)])));
        assert!(are_complementary(&p, &not_p).is_some());
    }

    #[test]
    fn test_same_polarity_not_complementary() {
        let p = Node::custom("p", vec![Node::var("x")]);
        let q = Node::custom("p", vec![Node::SkolemConstant(0)]);
        assert!(are_complementary(&p, &q).is_none());
    }
}
