use crate::math::function::function::Function;

/// 以 `base` 為底的對數，定義域 [0, +∞)。
#[derive(Clone, Copy, Debug)]
pub struct Log {
    base: f64,
    ln_base: f64
}

impl Log {
    /// `base` 必須為正且不等於 1。
    pub fn new(base: f64) -> Option<Log> {
        if base > 0.0 && base != 1.0 && base.is_finite() {
            Some(Log { base, ln_base: base.ln() })
        } else {
            None
        }
    }

    pub fn natural() -> Log {
        Log { base: std::f64::consts::E, ln_base: 1.0 }
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Function for Log {
    fn left_domain_border(&self) -> f64 {
        0.0
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NAN;
        }
        x.ln() / self.ln_base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_base() {
        let log2 = Log::new(2.0).unwrap();
        assert!((log2.value(8.0) - 3.0).abs() < 1e-12);
        assert_eq!(Log::natural().value(1.0), 0.0);
    }

    #[test]
    fn test_log_outside_domain() {
        let log = Log::natural();
        assert!(log.value(-1.0).is_nan());
        assert_eq!(log.value(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_invalid_base() {
        assert!(Log::new(1.0).is_none());
        assert!(Log::new(-2.0).is_none());
        assert!(Log::new(0.0).is_none());
    }
}
