use crate::math::function::function::Function;
use crate::tabulated::point::Point;
use crate::tabulated::pointstore::{
    StorageKind,
    uniform_abscissas
};
use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 在 [left_x, right_x] 上等距取 `points_count` 個點對 `function` 取樣。
///
/// 取樣區間必須落在 `function` 的定義域內。
pub fn tabulate<F: Function + ?Sized>(
    function: &F,
    left_x: f64,
    right_x: f64,
    points_count: usize,
    kind: StorageKind,
) -> Result<TabulatedFunction, TabulatedFunctionError> {
    let abscissas = uniform_abscissas(left_x, right_x, points_count)?;

    let domain_left = function.left_domain_border();
    let domain_right = function.right_domain_border();
    if left_x < domain_left || right_x > domain_right {
        return Err(TabulatedFunctionError::DomainNotCovered {
            left_x,
            right_x,
            domain_left,
            domain_right,
        });
    }

    let points: Vec<Point> = abscissas
        .into_iter()
        .map(|x| Point::new(x, function.value(x)))
        .collect();
    TabulatedFunction::from_points(kind, &points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::analytic::exp::Exp;
    use crate::math::function::analytic::log::Log;
    use crate::math::function::analytic::trigonometric::Sin;
    use crate::math::function::combinator::composition::Composition;

    #[test]
    fn test_tabulate_ln_of_exp() {
        let ln_of_exp = Composition::new(Log::natural(), Exp::new());
        let tabulated = tabulate(&ln_of_exp, 0.0, 10.0, 11, StorageKind::Array).unwrap();
        assert_eq!(tabulated.points_count(), 11);
        for i in 0..11 {
            assert!((tabulated.point_y(i).unwrap() - i as f64).abs() < 1e-12);
        }
        assert!((tabulated.value(5.5) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_tabulate_dyn_function() {
        let sin: Box<dyn Function> = Box::new(Sin);
        let tabulated = tabulate(sin.as_ref(), 0.0, 3.0, 31, StorageKind::LinkedList).unwrap();
        assert_eq!(tabulated.kind(), StorageKind::LinkedList);
        assert!((tabulated.value(1.0) - 1.0_f64.sin()).abs() < 1e-12);
        // 插值誤差
        assert!((tabulated.value(1.05) - 1.05_f64.sin()).abs() < 2e-3);
    }

    #[test]
    fn test_tabulate_outside_domain() {
        assert!(matches!(
            tabulate(&Log::natural(), -1.0, 1.0, 5, StorageKind::Array),
            Err(TabulatedFunctionError::DomainNotCovered { .. })
        ));
        assert!(matches!(
            tabulate(&Exp::new(), 1.0, 0.0, 5, StorageKind::Array),
            Err(TabulatedFunctionError::InvalidDomain { .. })
        ));
        assert!(matches!(
            tabulate(&Exp::new(), 0.0, 1.0, 1, StorageKind::Array),
            Err(TabulatedFunctionError::MinimumSizeViolation { size: 1 })
        ));
    }
}
