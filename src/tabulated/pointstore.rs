use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

use crate::tabulated::point::{
    EPSILON,
    Point
};
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

// ─────────────────────────────────────────────
// StorageKind
// ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Array,
    LinkedList,
}

impl StorageKind {
    /// 自描述格式中記錄的型別名稱。
    pub fn type_name(&self) -> &'static str {
        match self {
            StorageKind::Array      => "tabfunc.ArrayTabulatedFunction",
            StorageKind::LinkedList => "tabfunc.LinkedListTabulatedFunction",
        }
    }

    pub fn from_type_name(name: &str) -> Option<StorageKind> {
        [StorageKind::Array, StorageKind::LinkedList]
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }
}

// ─────────────────────────────────────────────
// PointStore
// ─────────────────────────────────────────────

/// 依 x 嚴格遞增排列的點序列。
///
/// 不變量：
///   - 建構後點數永遠 >= 2
///   - 相鄰兩點的 x 差距至少 ε，且 index 順序等於 x 順序
///
/// 所有讀取都回傳複本，寫入也會複製，呼叫端無法持有內部儲存的參照。
/// 實作不做任何同步，跨執行緒共用同一個 store 需由呼叫端自行加鎖。
pub trait PointStore: fmt::Debug {
    fn kind(&self) -> StorageKind;

    fn points_count(&self) -> usize;

    fn point(&self, index: usize) -> Result<Point, TabulatedFunctionError>;

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError>;

    fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.point(index)?.x())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError>;

    fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        Ok(self.point(index)?.y())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError>;

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError>;

    fn add_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError>;

    fn left_domain_border(&self) -> f64;

    fn right_domain_border(&self) -> f64;

    /// 線性插值；定義域外回傳 NaN。
    fn value(&self, x: f64) -> f64;

    fn points(&self) -> Vec<Point>;

    fn clone_box(&self) -> Box<dyn PointStore>;
}

// ─────────────────────────────────────────────
// 共用輔助函數
// ─────────────────────────────────────────────

pub const MIN_POINTS_COUNT: usize = 2;

pub fn check_index(index: usize, size: usize) -> Result<(), TabulatedFunctionError> {
    if index >= size {
        Err(TabulatedFunctionError::IndexOutOfRange { index, size })
    } else {
        Ok(())
    }
}

/// 檢查放在 `index` 的新橫坐標 `x` 與左右鄰點的關係。
///
/// 先檢查嚴格順序（prev.x < x < next.x），違反則為 InvalidOrdering；
/// 順序正確但與鄰點距離小於 ε 則為 DuplicateAbscissa。
pub fn check_abscissa(
    index: usize,
    x: f64,
    prev: Option<Point>,
    next: Option<Point>,
) -> Result<(), TabulatedFunctionError> {
    if !x.is_finite() {
        return Err(TabulatedFunctionError::NonFiniteAbscissa(x));
    }
    let after_prev = prev.map_or(true, |pt| x > pt.x());
    let before_next = next.map_or(true, |pt| x < pt.x());
    if !(after_prev && before_next) {
        return Err(TabulatedFunctionError::InvalidOrdering { index, x });
    }
    check_not_duplicate(x, prev, next)
}

/// 只檢查 ε 距離，插入時位置已由掃描決定，順序必定正確。
pub fn check_not_duplicate(
    x: f64,
    prev: Option<Point>,
    next: Option<Point>,
) -> Result<(), TabulatedFunctionError> {
    let candidate = Point::new(x, 0.0);
    let collides = |pt: Option<Point>| pt.map_or(false, |pt| pt.same_abscissa(&candidate));
    if collides(prev) || collides(next) {
        Err(TabulatedFunctionError::DuplicateAbscissa(x))
    } else {
        Ok(())
    }
}

/// 建構用：點數至少 2，且整列依 x 嚴格遞增。
pub fn validate_points(points: &[Point]) -> Result<(), TabulatedFunctionError> {
    if points.len() < MIN_POINTS_COUNT {
        return Err(TabulatedFunctionError::MinimumSizeViolation { size: points.len() });
    }
    if !points[0].x().is_finite() {
        return Err(TabulatedFunctionError::NonFiniteAbscissa(points[0].x()));
    }
    for i in 1..points.len() {
        check_abscissa(i, points[i].x(), Some(points[i - 1]), None)?;
    }
    Ok(())
}

/// [left_x, right_x] 上 `points_count` 個等距橫坐標。
pub fn uniform_abscissas(
    left_x: f64,
    right_x: f64,
    points_count: usize,
) -> Result<Vec<f64>, TabulatedFunctionError> {
    if !(left_x < right_x) || !left_x.is_finite() || !right_x.is_finite() {
        return Err(TabulatedFunctionError::InvalidDomain { left_x, right_x });
    }
    if points_count < MIN_POINTS_COUNT {
        return Err(TabulatedFunctionError::MinimumSizeViolation { size: points_count });
    }
    let step = (right_x - left_x) / (points_count - 1) as f64;
    Ok((0..points_count)
        .map(|i| left_x + i as f64 * step)
        .collect())
}

pub fn uniform_points(
    left_x: f64,
    right_x: f64,
    values: &[f64],
) -> Result<Vec<Point>, TabulatedFunctionError> {
    let points: Vec<Point> = uniform_abscissas(left_x, right_x, values.len())?
        .into_iter()
        .zip(values.iter())
        .map(|(x, &y)| Point::new(x, y))
        .collect();
    validate_points(&points)?;
    Ok(points)
}

pub fn linear_interpolation(lhs_pt: &Point, rhs_pt: &Point, x: f64) -> f64 {
    lhs_pt.y() + Point::slope(lhs_pt, rhs_pt) * (x - lhs_pt.x())
}

/// 沿著依序排列的點逐段尋找 x 所在區間。
///
/// x 落在端點 ε 內時直接回傳該點的 y，否則取兩端點連線。
/// 呼叫端需先確認 x 在定義域內。
pub fn interpolate_along<I>(mut points: I, x: f64) -> f64
where
    I: Iterator<Item = Point>,
{
    let Some(mut lhs_pt) = points.next() else {
        return f64::NAN;
    };
    for rhs_pt in points {
        if (x - lhs_pt.x()).abs() < EPSILON {
            return lhs_pt.y();
        }
        if (x - rhs_pt.x()).abs() < EPSILON {
            return rhs_pt.y();
        }
        if x > lhs_pt.x() && x < rhs_pt.x() {
            return linear_interpolation(&lhs_pt, &rhs_pt, x);
        }
        lhs_pt = rhs_pt;
    }
    f64::NAN
}

pub fn outside_domain(x: f64, left_x: f64, right_x: f64) -> bool {
    x.is_nan() || x < left_x || x > right_x
}
