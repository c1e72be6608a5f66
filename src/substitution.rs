use crate::node::{transform_children, Node};

/// Replaces free occurrences of `var` with `term` in `formula`, stopping at
/// any quantifier that rebinds `var` (its body is left untouched in that
/// subtree). Grounded on
/// `original_source/formula_representation.py::replace_free_variable`.
pub fn substitute_free(formula: &Node, var: &str, term: &Node) -> Node {
    match formula {
        Node::Variable(name) if name == var => term.clone(),
        Node::Forall(bound, _) | Node::Exists(bound, _) if bound == var => formula.clone(),
        other => transform_children(other, |child| substitute_free(child, var, term)),
    }
}

/// Replaces every occurrence of `old` with `new` throughout `formula`,
/// purely structurally with no binding awareness. Grounded on
/// `original_source/util.py`'s `recursively_substitute`; used by the
/// normalization pipeline where `old` is a `Node::Variable` already known to
/// be distinct from any binder in scope (post alpha-conversion).
pub fn substitute_everywhere(formula: &Node, old: &Node, new: &Node) -> Node {
    if formula == old {
        return new.clone();
    }
    transform_children(formula, |child| substitute_everywhere(child, old, new))
}
