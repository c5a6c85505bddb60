/// 定義域為 `[left_domain_border, right_domain_border]` 的實函數。
///
/// 定義域外的 `value` 回傳 NaN。
pub trait Function {
    fn left_domain_border(&self) -> f64;

    fn right_domain_border(&self) -> f64;

    fn value(&self, x: f64) -> f64;

    fn in_domain(&self, x: f64) -> bool {
        x >= self.left_domain_border() && x <= self.right_domain_border()
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}

impl<F: Function + ?Sized> Function for &F {
    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}
