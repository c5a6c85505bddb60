use crate::math::function::function::Function;

/// outer(inner(x))，定義域沿用 inner。
pub struct Composition<O: Function, I: Function> {
    outer: O,
    inner: I
}

impl<O: Function, I: Function> Composition<O, I> {
    pub fn new(outer: O, inner: I) -> Composition<O, I> {
        Composition { outer, inner }
    }
}

impl<O: Function, I: Function> Function for Composition<O, I> {
    fn left_domain_border(&self) -> f64 {
        self.inner.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.inner.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        self.outer.value(self.inner.value(x))
    }
}
