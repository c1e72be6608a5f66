use std::fmt;

/// The value a `Constant` node carries. Kept concrete (rather than a fully
/// opaque payload) so that `Node` can derive structural equality and hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstantValue {
    Bool(bool),
    Str(String),
    Num(i64),
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstantValue::Bool(b) => write!(f, "{}", b),
            ConstantValue::Str(s) => write!(f, "'{}'", s),
            ConstantValue::Num(n) => write!(f, "{}", n),
        }
    }
}

/// A formula/term node. Every node is an immutable value; rewrites build
/// fresh nodes rather than mutating in place (see spec.md §4.A / §9).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Variable(String),
    Constant(ConstantValue),

    /// A constant introduced by Skolemization of a top-level existential.
    /// The id is globally unique within a proof attempt.
    SkolemConstant(u64),

    /// The distinguished `Equals` predicate: simplifies to `TRUE` when its
    /// two arguments are structurally identical.
    Equals(Box<Node>, Box<Node>),

    /// An uninterpreted function/predicate introduced by Skolemization of an
    /// existential under one or more universals. `args` is the list of
    /// universally-quantified variables in whose scope the existential
    /// appeared, as `Node::Variable`s.
    SkolemFunction(u64, Vec<Node>),

    /// A user-introduced predicate or function symbol with no axioms.
    Custom(String, Vec<Node>),

    Forall(String, Box<Node>),
    Exists(String, Box<Node>),

    Not(Box<Node>),
    And(Vec<Node>),
    Or(Vec<Node>),

    Implication(Box<Node>, Box<Node>),
    Equivalence(Box<Node>, Box<Node>),
    Xor(Box<Node>, Box<Node>),
    /// NAND, `a ↑ b ≡ ¬(a ∧ b)`.
    Nand(Vec<Node>),
    /// NOR, `a ↓ b ≡ ¬(a ∨ b)`.
    Nor(Vec<Node>),
}

impl Node {
    pub fn constant_true() -> Node {
        Node::Constant(ConstantValue::Bool(true))
    }

    pub fn constant_false() -> Node {
        Node::Constant(ConstantValue::Bool(false))
    }

    pub fn is_constant_true(&self) -> bool {
        matches!(self, Node::Constant(ConstantValue::Bool(true)))
    }

    pub fn is_constant_false(&self) -> bool {
        matches!(self, Node::Constant(ConstantValue::Bool(false)))
    }

    pub fn var(name: &str) -> Node {
        Node::Variable(name.to_string())
    }

    pub fn custom(name: &str, args: Vec<Node>) -> Node {
        Node::Custom(name.to_string(), args)
    }

    /// The direct children of this node, in document order. Quantifiers
    /// expose only their body; the bound variable name is data, not a child.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Variable(_) | Node::Constant(_) | Node::SkolemConstant(_) => vec![],
            Node::Equals(a, b) => vec![a, b],
            Node::SkolemFunction(_, args) => args.iter().collect(),
            Node::Custom(_, args) => args.iter().collect(),
            Node::Forall(_, body) | Node::Exists(_, body) => vec![body],
            Node::Not(a) => vec![a],
            Node::And(ops) | Node::Or(ops) | Node::Nand(ops) | Node::Nor(ops) => ops.iter().collect(),
            Node::Implication(a, b) | Node::Equivalence(a, b) | Node::Xor(a, b) => vec![a, b],
        }
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Returns a structurally new node of the same variant with the i-th
    /// child replaced. Panics (a programming error per spec.md §4.A) if `i`
    /// is out of range.
    pub fn replace_child(&self, i: usize, new: Node) -> Node {
        match self {
            Node::Variable(_) | Node::Constant(_) | Node::SkolemConstant(_) => {
                panic!("replace_child: {:?} has no children", self)
            }
            Node::Equals(a, b) => {
                let (a, b) = (a.as_ref().clone(), b.as_ref().clone());
                match i {
                    0 => Node::Equals(Box::new(new), Box::new(b)),
                    1 => Node::Equals(Box::new(a), Box::new(new)),
                    _ => panic!("replace_child: index {} out of range for Equals", i),
                }
            }
            Node::SkolemFunction(id, args) => {
                let mut args = args.clone();
                args[i] = new;
                Node::SkolemFunction(*id, args)
            }
            Node::Custom(name, args) => {
                let mut args = args.clone();
                args[i] = new;
                Node::Custom(name.clone(), args)
            }
            Node::Forall(v, _) => {
                assert_eq!(i, 0, "replace_child: Forall has a single child");
                Node::Forall(v.clone(), Box::new(new))
            }
            Node::Exists(v, _) => {
                assert_eq!(i, 0, "replace_child: Exists has a single child");
                Node::Exists(v.clone(), Box::new(new))
            }
            Node::Not(_) => {
                assert_eq!(i, 0, "replace_child: Not has a single child");
                Node::Not(Box::new(new))
            }
            Node::And(ops) => {
                let mut ops = ops.clone();
                ops[i] = new;
                Node::And(ops)
            }
            Node::Or(ops) => {
                let mut ops = ops.clone();
                ops[i] = new;
                Node::Or(ops)
            }
            Node::Nand(ops) => {
                let mut ops = ops.clone();
                ops[i] = new;
                Node::Nand(ops)
            }
            Node::Nor(ops) => {
                let mut ops = ops.clone();
                ops[i] = new;
                Node::Nor(ops)
            }
            Node::Implication(a, b) => {
                let (a, b) = (a.as_ref().clone(), b.as_ref().clone());
                match i {
                    0 => Node::Implication(Box::new(new), Box::new(b)),
                    1 => Node::Implication(Box::new(a), Box::new(new)),
                    _ => panic!("replace_child: index {} out of range for Implication", i),
                }
            }
            Node::Equivalence(a, b) => {
                let (a, b) = (a.as_ref().clone(), b.as_ref().clone());
                match i {
                    0 => Node::Equivalence(Box::new(new), Box::new(b)),
                    1 => Node::Equivalence(Box::new(a), Box::new(new)),
                    _ => panic!("replace_child: index {} out of range for Equivalence", i),
                }
            }
            Node::Xor(a, b) => {
                let (a, b) = (a.as_ref().clone(), b.as_ref().clone());
                match i {
                    0 => Node::Xor(Box::new(new), Box::new(b)),
                    1 => Node::Xor(Box::new(a), Box::new(new)),
                    _ => panic!("replace_child: index {} out of range for Xor", i),
                }
            }
        }
    }

    /// True for nodes with no children: the atomic terms.
    pub fn is_atomic_term(&self) -> bool {
        matches!(
            self,
            Node::Variable(_) | Node::Constant(_) | Node::SkolemConstant(_)
        )
    }

    /// True for an atomic formula or an atomic term: anything that isn't a
    /// quantifier or connective. After normalization, a literal is one of
    /// these, optionally wrapped in a single `Not`.
    pub fn is_atomic_formula(&self) -> bool {
        matches!(
            self,
            Node::Variable(_)
                | Node::Constant(_)
                | Node::SkolemConstant(_)
                | Node::Equals(_, _)
                | Node::SkolemFunction(_, _)
                | Node::Custom(_, _)
        )
    }

    /// A clause-position literal: an atomic formula, or `Not` of one.
    pub fn is_literal(&self) -> bool {
        match self {
            Node::Not(inner) => inner.is_atomic_formula(),
            other => other.is_atomic_formula(),
        }
    }

    /// Debug-print: ASCII, prefix-tagged, used as a deterministic sort key
    /// during canonicalization (spec.md §4.D Combine step).
    pub fn debug_repr(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Variable(name) => write!(f, "{}", name),
            Node::Constant(v) => write!(f, "{}", v),
            Node::SkolemConstant(id) => write!(f, "c{}", id),
            Node::Equals(a, b) => write!(f, "{} = {}", a, b),
            Node::SkolemFunction(id, args) => write_fn(f, &format!("f{}", id), args),
            Node::Custom(name, args) => {
                if args.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write_fn(f, name, args)
                }
            }
            Node::Forall(var, body) => write!(f, "∀{} ({})", var, body),
            Node::Exists(var, body) => write!(f, "∃{} ({})", var, body),
            Node::Not(a) => write!(f, "¬({})", a),
            Node::And(ops) => write_nary(f, "&", ops),
            Node::Or(ops) => write_nary(f, "∨", ops),
            Node::Implication(a, b) => write!(f, "({}) → ({})", a, b),
            Node::Equivalence(a, b) => write!(f, "({}) ↔ ({})", a, b),
            Node::Xor(a, b) => write!(f, "({}) ⊕ ({})", a, b),
            Node::Nand(ops) => write_nary(f, "↑", ops),
            Node::Nor(ops) => write_nary(f, "↓", ops),
        }
    }
}

fn write_fn(f: &mut fmt::Formatter, name: &str, args: &[Node]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", a)?;
    }
    write!(f, ")")
}

fn write_nary(f: &mut fmt::Formatter, op: &str, ops: &[Node]) -> fmt::Result {
    write!(f, "(")?;
    for (i, o) in ops.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", o)?;
    }
    write!(f, ")")
}

/// Applies `f` to each child of `node` and rebuilds a node of the same
/// variant from the results. Grounded on `original_source`'s pattern of
/// `formula.replace_child(i, f(child))` loops.
pub fn transform_children(node: &Node, mut f: impl FnMut(&Node) -> Node) -> Node {
    let n = node.num_children();
    let mut result = node.clone();
    for i in 0..n {
        let child = result.children()[i].clone();
        result = result.replace_child(i, f(&child));
    }
    result
}

/// Applies `f` to `node` itself first, then recurses into the *result's*
/// children. A top-down rewrite, matching
/// `original_source/util.py::recursively_transform_children`.
pub fn recursively_transform_children(node: &Node, f: &mut impl FnMut(&Node) -> Node) -> Node {
    let rewritten = f(node);
    transform_children(&rewritten, |child| recursively_transform_children(child, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_and_replace() {
        let n = Node::custom("p", vec![Node::var("x"), Node::var("y")]);
        assert_eq!(n.children().len(), 2);
        let n2 = n.replace_child(1, Node::var("z"));
        assert_eq!(format!("{}", n2), "p(x, z)");
    }

    #[test]
    fn test_forall_single_child() {
        let n = Node::Forall("x".to_string(), Box::new(Node::var("x")));
        assert_eq!(n.children().len(), 1);
        let n2 = n.replace_child(0, Node::constant_true());
        assert_eq!(format!("{}", n2), "∀x (true)");
    }

    #[test]
    fn test_recursively_transform_children() {
        let n = Node::And(vec![Node::var("x"), Node::Not(Box::new(Node::var("y")))]);
        let out = recursively_transform_children(&n, &mut |node| match node {
            Node::Variable(name) if name == "x" => Node::var("renamed"),
            other => other.clone(),
        });
        assert_eq!(format!("{}", out), "(renamed & ¬(y))");
    }

    #[test]
    fn test_equality_and_hash() {
        use std::collections::HashSet;
        let a = Node::custom("p", vec![Node::var("x")]);
        let b = Node::custom("p", vec![Node::var("x")]);
        assert_eq!(a, b);
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }
}
