use crate::math::function::function::Function;

/// base(x) 的常數次方。
pub struct Power<F: Function> {
    base: F,
    exponent: f64
}

impl<F: Function> Power<F> {
    pub fn new(base: F, exponent: f64) -> Power<F> {
        Power { base, exponent }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl<F: Function> Function for Power<F> {
    fn left_domain_border(&self) -> f64 {
        self.base.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.base.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        self.base.value(x).powf(self.exponent)
    }
}
