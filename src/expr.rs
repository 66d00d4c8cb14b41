//! Hash-consed boolean expressions.
//!
//! Expressions live in an [`ExprArena`] and are referred to by lightweight [`Idx`] handles.
//! The arena is topologically sorted by construction: the children of a node always
//! have smaller indices than the node itself, so a single forward pass evaluates
//! (or translates) every node after its operands.
//!
//! Constructors fold constants and trivial identities (`x & 1 = x`, `x ^ x = 0`, `!!x = x`)
//! and structurally equal nodes are shared.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Idx(usize);

impl Idx {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Expr<T, I = Idx> {
    Const(bool),
    Term(T),
    Not(I),
    And(I, I),
    Or(I, I),
    Xor(I, I),
    Eq(I, I),
}

impl<T, A> Expr<T, A> {
    #[inline(always)]
    pub fn fmap_ref<B, F>(&self, mut f: F) -> Expr<&T, B>
    where
        F: FnMut(&A) -> B,
    {
        match self {
            Expr::Const(b) => Expr::Const(*b),
            Expr::Term(t) => Expr::Term(t),
            Expr::Not(a) => Expr::Not(f(a)),
            Expr::And(a, b) => Expr::And(f(a), f(b)),
            Expr::Or(a, b) => Expr::Or(f(a), f(b)),
            Expr::Xor(a, b) => Expr::Xor(f(a), f(b)),
            Expr::Eq(a, b) => Expr::Eq(f(a), f(b)),
        }
    }
}

#[derive(Debug)]
pub struct ExprArena<T> {
    /// Topology sorted expressions, by construction.
    exprs: Vec<Expr<T>>,
    unique: HashMap<Expr<T>, Idx>,
}

impl<T> ExprArena<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        let mut arena = Self {
            exprs: Vec::new(),
            unique: HashMap::new(),
        };
        let zero = arena.intern(Expr::Const(false));
        let one = arena.intern(Expr::Const(true));
        debug_assert_eq!((zero, one), (arena.zero(), arena.one()));
        arena
    }

    fn intern(&mut self, expr: Expr<T>) -> Idx {
        if let Some(&idx) = self.unique.get(&expr) {
            return idx;
        }
        let idx = Idx(self.exprs.len());
        self.exprs.push(expr.clone());
        self.unique.insert(expr, idx);
        idx
    }

    pub fn zero(&self) -> Idx {
        Idx(0)
    }

    pub fn one(&self) -> Idx {
        Idx(1)
    }

    pub fn constant(&self, value: bool) -> Idx {
        if value {
            self.one()
        } else {
            self.zero()
        }
    }

    pub fn is_const(&self, idx: Idx) -> bool {
        idx == self.zero() || idx == self.one()
    }

    pub fn mk_term(&mut self, term: T) -> Idx {
        self.intern(Expr::Term(term))
    }

    pub fn mk_not(&mut self, a: Idx) -> Idx {
        if a == self.zero() {
            return self.one();
        }
        if a == self.one() {
            return self.zero();
        }
        if let Expr::Not(inner) = self.exprs[a.0] {
            return inner;
        }
        self.intern(Expr::Not(a))
    }

    pub fn mk_and(&mut self, a: Idx, b: Idx) -> Idx {
        if a == self.zero() || b == self.zero() {
            return self.zero();
        }
        if a == self.one() || a == b {
            return b;
        }
        if b == self.one() {
            return a;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Expr::And(a, b))
    }

    pub fn mk_or(&mut self, a: Idx, b: Idx) -> Idx {
        if a == self.one() || b == self.one() {
            return self.one();
        }
        if a == self.zero() || a == b {
            return b;
        }
        if b == self.zero() {
            return a;
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Expr::Or(a, b))
    }

    pub fn mk_xor(&mut self, a: Idx, b: Idx) -> Idx {
        if a == b {
            return self.zero();
        }
        if a == self.zero() {
            return b;
        }
        if b == self.zero() {
            return a;
        }
        if a == self.one() {
            return self.mk_not(b);
        }
        if b == self.one() {
            return self.mk_not(a);
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Expr::Xor(a, b))
    }

    pub fn mk_eq(&mut self, a: Idx, b: Idx) -> Idx {
        if a == b {
            return self.one();
        }
        if a == self.one() {
            return b;
        }
        if b == self.one() {
            return a;
        }
        if a == self.zero() {
            return self.mk_not(b);
        }
        if b == self.zero() {
            return self.mk_not(a);
        }
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        self.intern(Expr::Eq(a, b))
    }

    /// Conjunction of all operands; the empty conjunction is `1`.
    pub fn mk_and_many(&mut self, operands: impl IntoIterator<Item = Idx>) -> Idx {
        let mut res = self.one();
        for x in operands {
            res = self.mk_and(res, x);
        }
        res
    }
}

impl<T> Default for ExprArena<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ExprArena<T> {
    pub fn get(&self, idx: Idx) -> &Expr<T> {
        &self.exprs[idx.0]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Idx, &Expr<T>)> {
        self.exprs.iter().enumerate().map(|(i, e)| (Idx(i), e))
    }

    /// Evaluates every node up to and including `root` under the given term assignment.
    pub fn eval<F>(&self, root: Idx, mut assign: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut values: Vec<bool> = Vec::with_capacity(root.0 + 1);
        for expr in &self.exprs[..=root.0] {
            let value = match expr.fmap_ref(|idx| values[idx.0]) {
                Expr::Const(b) => b,
                Expr::Term(t) => assign(t),
                Expr::Not(a) => !a,
                Expr::And(a, b) => a && b,
                Expr::Or(a, b) => a || b,
                Expr::Xor(a, b) => a ^ b,
                Expr::Eq(a, b) => a == b,
            };
            values.push(value);
        }
        values[root.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_constants() {
        let arena = ExprArena::<u32>::new();
        assert_eq!(arena.len(), 2);
        assert!(arena.is_const(arena.zero()));
        assert!(arena.is_const(arena.one()));
        assert_eq!(arena.constant(true), arena.one());
        assert!(!arena.eval(arena.zero(), |_| unreachable!()));
        assert!(arena.eval(arena.one(), |_| unreachable!()));
    }

    #[test]
    fn test_folding() {
        let mut arena = ExprArena::new();
        let x = arena.mk_term(1);
        let zero = arena.zero();
        let one = arena.one();

        assert_eq!(arena.mk_and(x, one), x);
        assert_eq!(arena.mk_and(zero, x), zero);
        assert_eq!(arena.mk_or(x, zero), x);
        assert_eq!(arena.mk_or(one, x), one);
        assert_eq!(arena.mk_xor(x, x), zero);
        assert_eq!(arena.mk_xor(x, zero), x);
        assert_eq!(arena.mk_eq(x, x), one);
        assert_eq!(arena.mk_eq(x, one), x);

        let not_x = arena.mk_not(x);
        assert_eq!(arena.mk_xor(one, x), not_x);
        assert_eq!(arena.mk_eq(zero, x), not_x);
        assert_eq!(arena.mk_not(not_x), x);
        assert_eq!(arena.mk_and_many([]), one);
    }

    #[test]
    fn test_sharing() {
        let mut arena = ExprArena::new();
        let x = arena.mk_term("x");
        let y = arena.mk_term("y");
        let f = arena.mk_and(x, y);
        let g = arena.mk_and(y, x);
        assert_eq!(f, g);
        assert_eq!(arena.mk_term("x"), x);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn test_topological_order() {
        let mut arena = ExprArena::new();
        let x = arena.mk_term(1);
        let y = arena.mk_term(2);
        let z = arena.mk_term(3);
        let xy = arena.mk_or(x, y);
        let f = arena.mk_xor(xy, z);
        let _ = arena.mk_eq(f, x);
        for (idx, expr) in arena.iter() {
            expr.fmap_ref(|child| assert!(*child < idx));
        }
    }

    #[test]
    fn test_eval() {
        let mut arena = ExprArena::new();
        let x = arena.mk_term(0usize);
        let y = arena.mk_term(1usize);
        let z = arena.mk_term(2usize);
        // f = (x | !y) ^ z == x & y
        let not_y = arena.mk_not(y);
        let lhs = arena.mk_or(x, not_y);
        let lhs = arena.mk_xor(lhs, z);
        let rhs = arena.mk_and(x, y);
        let f = arena.mk_eq(lhs, rhs);

        for bits in 0..8usize {
            let values = [bits & 1 != 0, bits & 2 != 0, bits & 4 != 0];
            let [vx, vy, vz] = values;
            let expected = ((vx || !vy) ^ vz) == (vx && vy);
            assert_eq!(arena.eval(f, |&t| values[t]), expected, "bits = {:03b}", bits);
        }
    }
}
