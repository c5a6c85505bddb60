use crate::math::function::function::Function;

/// e^x，定義域為整個實數軸。
#[derive(Clone, Copy, Debug, Default)]
pub struct Exp;

impl Exp {
    pub fn new() -> Exp {
        Exp
    }
}

impl Function for Exp {
    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        x.exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exp_values() {
        let exp = Exp::new();
        assert_eq!(exp.value(0.0), 1.0);
        assert!((exp.value(1.0) - std::f64::consts::E).abs() < 1e-15);
        assert!(exp.in_domain(-1e300));
    }
}
