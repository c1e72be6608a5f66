use std::collections::HashSet;

use crate::clause::Clause;
use crate::node::{transform_children, Node};
use crate::nursery::SymbolNursery;
use crate::substitution::substitute_free;

/// Step 1: rewrite every connective other than `And`/`Or`/`Not` into those
/// three, recursing into children after each rewrite. Grounded on
/// `original_source/transformations.py::remove_logical_ops`.
pub fn reduce_connectives(formula: &Node) -> Node {
    match formula {
        Node::Implication(a, b) => reduce_connectives(&Node::Or(vec![
            Node::Not(Box::new(a.as_ref().clone())),
            b.as_ref().clone(),
        ])),
        Node::Equivalence(a, b) => reduce_connectives(&Node::And(vec![
            Node::Implication(a.clone(), b.clone()),
            Node::Implication(b.clone(), a.clone()),
        ])),
        Node::Xor(a, b) => reduce_connectives(&Node::Not(Box::new(Node::Equivalence(
            a.clone(),
            b.clone(),
        )))),
        Node::Nor(ops) => reduce_connectives(&Node::Not(Box::new(Node::Or(ops.clone())))),
        Node::Nand(ops) => reduce_connectives(&Node::Not(Box::new(Node::And(ops.clone())))),
        other => transform_children(other, |c| reduce_connectives(c)),
    }
}

/// One step of pushing a `Not` inward; returns the node unchanged if `inner`
/// is already atomic and cannot be narrowed further.
fn narrow_once(inner: &Node) -> Node {
    match inner {
        Node::Forall(v, body) => Node::Exists(v.clone(), Box::new(Node::Not(body.clone()))),
        Node::Exists(v, body) => Node::Forall(v.clone(), Box::new(Node::Not(body.clone()))),
        Node::And(ops) => Node::Or(ops.iter().map(|o| Node::Not(Box::new(o.clone()))).collect()),
        Node::Or(ops) => Node::And(ops.iter().map(|o| Node::Not(Box::new(o.clone()))).collect()),
        Node::Not(a) => a.as_ref().clone(),
        other => Node::Not(Box::new(other.clone())),
    }
}

/// Step 2: negation normal form. Grounded on
/// `original_source/transformations.py::narrow_negation`.
pub fn to_nnf(formula: &Node) -> Node {
    let mut current = formula.clone();
    loop {
        match &current {
            Node::Not(inner) => {
                let next = narrow_once(inner);
                if next == current {
                    break;
                }
                current = next;
            }
            _ => break,
        }
    }
    transform_children(&current, |c| to_nnf(c))
}

/// Step 3: alpha-conversion, renaming re-bound quantifier variables.
/// Grounded on
/// `original_source/transformations.py::standartize_var_names`.
pub fn standardize_variables(
    formula: &Node,
    known: &mut HashSet<String>,
    nursery: &mut SymbolNursery,
) -> Node {
    match formula {
        Node::Forall(var, body) | Node::Exists(var, body) => {
            let is_forall = matches!(formula, Node::Forall(_, _));
            let (final_name, body_after_rename) = if known.contains(var) {
                let mut new_name = nursery.fresh_variable_name();
                while known.contains(&new_name) {
                    new_name = nursery.fresh_variable_name();
                }
                let renamed = substitute_free(body, var, &Node::var(&new_name));
                known.insert(new_name.clone());
                (new_name, renamed)
            } else {
                known.insert(var.clone());
                (var.clone(), body.as_ref().clone())
            };
            let recursed = standardize_variables(&body_after_rename, known, nursery);
            if is_forall {
                Node::Forall(final_name, Box::new(recursed))
            } else {
                Node::Exists(final_name, Box::new(recursed))
            }
        }
        Node::Variable(name) => {
            known.insert(name.clone());
            formula.clone()
        }
        other => transform_children(other, |c| standardize_variables(c, known, nursery)),
    }
}

/// Step 4: eliminates existentials in favor of Skolem constants/functions of
/// the universals currently in scope. Grounded on
/// `original_source/transformations.py::skolemize`.
pub fn skolemize(formula: &Node, universals: &[Node], nursery: &mut SymbolNursery) -> Node {
    match formula {
        Node::Exists(var, body) => {
            let replacement = if universals.is_empty() {
                nursery.fresh_skolem_constant()
            } else {
                nursery.fresh_skolem_function(universals.to_vec())
            };
            let substituted = substitute_free(body, var, &replacement);
            skolemize(&substituted, universals, nursery)
        }
        Node::Forall(var, body) => {
            let mut extended = universals.to_vec();
            extended.push(Node::var(var));
            Node::Forall(var.clone(), Box::new(skolemize(body, &extended, nursery)))
        }
        other => transform_children(other, |c| skolemize(c, universals, nursery)),
    }
}

/// Step 5 & 6 (of spec.md's numbering): drop every `Forall`, promoting its
/// body. Grounded on
/// `original_source/transformations.py::remove_foralls`.
pub fn eliminate_universals(formula: &Node) -> Node {
    match formula {
        Node::Forall(_, body) => eliminate_universals(body),
        other => transform_children(other, |c| eliminate_universals(c)),
    }
}

fn merge_once(formula: &Node) -> Node {
    match formula {
        Node::And(ops) => {
            let mut merged = vec![];
            for op in ops {
                if let Node::And(inner) = op {
                    merged.extend(inner.clone());
                } else {
                    merged.push(op.clone());
                }
            }
            Node::And(merged)
        }
        Node::Or(ops) => {
            let mut merged = vec![];
            for op in ops {
                if let Node::Or(inner) = op {
                    merged.extend(inner.clone());
                } else {
                    merged.push(op.clone());
                }
            }
            Node::Or(merged)
        }
        other => other.clone(),
    }
}

/// Distributes the first `And` operand of an `Or` over the rest:
/// `a ∨ (b ∧ c) ≡ (a ∨ b) ∧ (a ∨ c)`.
fn distribute_once(formula: &Node) -> Option<Node> {
    if let Node::Or(ops) = formula {
        let idx = ops.iter().position(|o| matches!(o, Node::And(_)))?;
        if let Node::And(and_ops) = &ops[idx] {
            let mut rest = ops.clone();
            rest.remove(idx);
            let distributed: Vec<Node> = and_ops
                .iter()
                .map(|a| {
                    let mut new_or = rest.clone();
                    new_or.push(a.clone());
                    Node::Or(new_or)
                })
                .collect();
            return Some(Node::And(distributed));
        }
    }
    None
}

/// Step 6 (of spec.md's numbering; "7. CNF conversion" text): merge and
/// distribute at each node until a pass is a no-op, then recurse into
/// children. Grounded on
/// `original_source/transformations.py::to_cnf`.
pub fn to_cnf(formula: &Node) -> Node {
    let mut current = formula.clone();
    loop {
        let merged = merge_once(&current);
        let next = distribute_once(&merged).unwrap_or(merged);
        if next == current {
            current = next;
            break;
        }
        current = next;
    }
    transform_children(&current, |c| to_cnf(c))
}

fn simplify_local(node: &Node) -> Node {
    match node {
        Node::Equals(a, b) if a == b => Node::constant_true(),
        Node::And(ops) => {
            if ops.iter().any(|o| o.is_constant_false()) {
                return Node::constant_false();
            }
            let mut kept: Vec<Node> = vec![];
            for op in ops {
                if !op.is_constant_true() && !kept.contains(op) {
                    kept.push(op.clone());
                }
            }
            if kept
                .iter()
                .any(|op| kept.contains(&Node::Not(Box::new(op.clone()))))
            {
                return Node::constant_false();
            }
            match kept.len() {
                0 => Node::constant_true(),
                1 => kept.into_iter().next().unwrap(),
                _ => Node::And(kept),
            }
        }
        Node::Or(ops) => {
            if ops.iter().any(|o| o.is_constant_true()) {
                return Node::constant_true();
            }
            let mut kept: Vec<Node> = vec![];
            for op in ops {
                if !op.is_constant_false() && !kept.contains(op) {
                    kept.push(op.clone());
                }
            }
            if kept
                .iter()
                .any(|op| kept.contains(&Node::Not(Box::new(op.clone()))))
            {
                return Node::constant_true();
            }
            match kept.len() {
                0 => Node::constant_false(),
                1 => kept.into_iter().next().unwrap(),
                _ => Node::Or(kept),
            }
        }
        other => other.clone(),
    }
}

fn simplify_bottom_up(node: &Node) -> Node {
    let node = transform_children(node, |c| simplify_bottom_up(c));
    simplify_local(&node)
}

/// Step 7: redundancy removal, iterated bottom-up to a fixpoint.
pub fn remove_redundancy(formula: &Node) -> Node {
    let mut current = formula.clone();
    loop {
        let next = simplify_bottom_up(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Step 8: flattens an outermost conjunction into its list of clauses.
/// Grounded on
/// `original_source/transformations.py::break_to_clauses`.
pub fn extract_clauses(formula: &Node) -> Vec<Node> {
    match formula {
        Node::And(ops) => ops.iter().flat_map(extract_clauses).collect(),
        other => vec![other.clone()],
    }
}

/// Runs the full eight-step pipeline over one side of a sequent.
pub fn normalize_side(formula: &Node, nursery: &mut SymbolNursery) -> Vec<Node> {
    let f = reduce_connectives(formula);
    let f = to_nnf(&f);
    let mut known = HashSet::new();
    let f = standardize_variables(&f, &mut known, nursery);
    let f = skolemize(&f, &[], nursery);
    let f = eliminate_universals(&f);
    let f = to_cnf(&f);
    let f = remove_redundancy(&f);
    extract_clauses(&f)
}

/// Canonicalizes a clause set: drops `TRUE`/tautological clauses,
/// deduplicates by structural equality, and sorts by
/// `(literal_count, debug_repr)` so shorter clauses are selected first (the
/// unit-preference bias). Grounded on spec.md §4.D's Combine step and
/// §4.F's empty-clause-detection paragraph, and on
/// `original_source/src/core/unification.py::short_first`.
pub fn canonicalize_clauses(mut clauses: Vec<Clause>) -> Vec<Clause> {
    clauses.retain(|c| !(c.len() == 1 && c.literals[0].is_constant_true()));
    clauses.retain(|c| !c.is_tautology());

    let mut seen = HashSet::new();
    clauses.retain(|c| seen.insert(c.clone()));

    clauses.sort_by(|a, b| {
        let key_a = (a.len(), format!("{:?}", a.literals));
        let key_b = (b.len(), format!("{:?}", b.literals));
        key_a.cmp(&key_b)
    });
    clauses
}

/// Merges the lhs and negated-rhs clause lists and canonicalizes the
/// result.
pub fn combine(lhs_clauses: Vec<Node>, neg_rhs_clauses: Vec<Node>) -> Vec<Clause> {
    let clauses: Vec<Clause> = lhs_clauses
        .iter()
        .chain(neg_rhs_clauses.iter())
        .map(Clause::from_node)
        .collect();
    canonicalize_clauses(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_connectives_implication() {
        let f = Node::Implication(Box::new(Node::var("p")), Box::new(Node::var("q")));
        let out = reduce_connectives(&f);
        assert_eq!(format!("{}", out), "(¬(p) ∨ q)");
    }

    #[test]
    fn test_to_nnf_pushes_not_through_and() {
        let f = Node::Not(Box::new(Node::And(vec![Node::var("p"), Node::var("q")])));
        let out = to_nnf(&f);
        assert_eq!(format!("{}", out), "(¬(p) ∨ ¬(q))");
    }

    #[test]
    fn test_to_nnf_double_negation() {
        let f = Node::Not(Box::new(Node::Not(Box::new(Node::var("p")))));
        assert_eq!(to_nnf(&f), Node::var("p"));
    }

    #[test]
    fn test_standardize_renames_shadowed_variable() {
        let inner = Node::Forall("x".to_string(), Box::new(Node::custom("p", vec![Node::var("x")])));
        let f = Node::Forall("x".to_string(), Box::new(inner));
        let mut known = HashSet::new();
        let mut nursery = SymbolNursery::new();
        let out = standardize_variables(&f, &mut known, &mut nursery);
        if let Node::Forall(outer_var, body) = &out {
            assert_eq!(outer_var, "x");
            if let Node::Forall(inner_var, _) = body.as_ref() {
                assert_ne!(inner_var, "x");
            } else {
                panic!("expected nested Forall");
            }
        } else {
            panic!("expected Forall");
        }
    }

    #[test]
    fn test_skolemize_constant_without_universal() {
        let f = Node::Exists("y".to_string(), Box::new(Node::custom("p", vec![Node::var("y")])));
        let mut nursery = SymbolNursery::new();
        let out = skolemize(&f, &[], &mut nursery);
        assert_eq!(format!("{}", out), "p(c0)");
    }

    #[test]
    fn test_skolemize_function_under_universal() {
        let body = Node::Exists(
            "y".to_string(),
            Box::new(Node::custom("p", vec![Node::var("x"), Node::var("y")])),
        );
        let f = Node::Forall("x".to_string(), Box::new(body));
        let mut nursery = SymbolNursery::new();
        let out = skolemize(&f, &[], &mut nursery);
        assert_eq!(format!("{}", out), "∀x (p(x, f0(x)))");
    }

    #[test]
    fn test_to_cnf_distributes_or_over_and() {
        let f = Node::Or(vec![
            Node::var("a"),
            Node::And(vec![Node::var("b"), Node::var("c")]),
        ]);
        let out = to_cnf(&f);
        assert_eq!(format!("{}", out), "((a ∨ b) & (a ∨ c))");
    }

    #[test]
    fn test_remove_redundancy_drops_true_and_dedupes() {
        let f = Node::And(vec![Node::var("a"), Node::constant_true(), Node::var("a")]);
        let out = remove_redundancy(&f);
        assert_eq!(out, Node::var("a"));
    }

    #[test]
    fn test_remove_redundancy_detects_contradiction() {
        let f = Node::And(vec![Node::var("a"), Node::Not(Box::new(Node::var("a")))]);
        let out = remove_redundancy(&f);
        assert!(out.is_constant_false());
    }

    #[test]
    fn test_extract_clauses_flattens_and() {
        let f = Node::And(vec![Node::var("a"), Node::Or(vec![Node::var("b"), Node::var("c")])]);
        let clauses = extract_clauses(&f);
        assert_eq!(clauses.len(), 2);
    }

    #[test]
    fn test_combine_sorts_shortest_first() {
        let long = Node::Or(vec![Node::var("a"), Node::var("b")]);
        let short = Node::var("c");
        let clauses = combine(vec![long], vec![short]);
        assert_eq!(clauses[0].len(), 1);
    }
}
