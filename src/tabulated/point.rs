use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

/// 兩個橫坐標差距小於此值時視為同一點。
pub const EPSILON: f64 = 1e-10;

/// 表格函數的單一取樣點 (x, y)。
///
/// `Point` 是 `Copy` 的值物件：store 存入與取出時都是複製，
/// 呼叫端永遠拿不到內部儲存的參照。
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x: x, y: y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn with_x(&self, x: f64) -> Point {
        Point::new(x, self.y)
    }

    pub fn with_y(&self, y: f64) -> Point {
        Point::new(self.x, y)
    }

    pub fn slope(lhs_pt: &Point, rhs_pt: &Point) -> f64 {
        (rhs_pt.y - lhs_pt.y) / (rhs_pt.x - lhs_pt.x)
    }

    /// 以 ε 容差比較橫坐標。
    pub fn same_abscissa(&self, other: &Point) -> bool {
        (self.x - other.x).abs() < EPSILON
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Point {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_abscissa_uses_tolerance() {
        let p = Point::new(1.0, 2.0);
        assert!(p.same_abscissa(&Point::new(1.0 + 1e-12, -5.0)));
        assert!(!p.same_abscissa(&Point::new(1.0 + 1e-9, 2.0)));
    }

    #[test]
    fn test_slope() {
        let lhs = Point::new(0.0, 1.0);
        let rhs = Point::new(2.0, 5.0);
        assert_eq!(Point::slope(&lhs, &rhs), 2.0);
    }

    #[test]
    fn test_with_coordinates_copies() {
        let p = Point::new(1.0, 2.0);
        let q = p.with_y(3.0);
        assert_eq!(p.y(), 2.0);
        assert_eq!(q, Point::new(1.0, 3.0));
        assert_eq!(p.with_x(4.0), Point::new(4.0, 2.0));
    }
}
