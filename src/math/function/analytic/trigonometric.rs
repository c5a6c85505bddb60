use crate::math::function::function::Function;

#[derive(Clone, Copy, Debug, Default)]
pub struct Sin;

#[derive(Clone, Copy, Debug, Default)]
pub struct Cos;

impl Function for Sin {
    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        x.sin()
    }
}

impl Function for Cos {
    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        x.cos()
    }
}
