use crate::math::function::function::Function;

/// lhs(x) · rhs(x)，定義域取兩者交集。
pub struct Product<L: Function, R: Function> {
    lhs: L,
    rhs: R
}

impl<L: Function, R: Function> Product<L, R> {
    pub fn new(lhs: L, rhs: R) -> Product<L, R> {
        Product { lhs, rhs }
    }
}

impl<L: Function, R: Function> Function for Product<L, R> {
    fn left_domain_border(&self) -> f64 {
        self.lhs.left_domain_border().max(self.rhs.left_domain_border())
    }

    fn right_domain_border(&self) -> f64 {
        self.lhs.right_domain_border().min(self.rhs.right_domain_border())
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        self.lhs.value(x) * self.rhs.value(x)
    }
}
