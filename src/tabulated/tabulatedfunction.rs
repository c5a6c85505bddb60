use std::fmt;

use crate::math::function::function::Function;
use crate::tabulated::arraypointstore::ArrayPointStore;
use crate::tabulated::linkedpointstore::LinkedPointStore;
use crate::tabulated::point::Point;
use crate::tabulated::pointstore::{
    PointStore,
    StorageKind,
    uniform_points
};
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 以線性插值求值的表格函數。
///
/// 建構後擁有唯一一個 point store，之後不會被替換；
/// 所有操作都直接委派給該 store。
#[derive(Debug)]
pub struct TabulatedFunction {
    store: Box<dyn PointStore>,
}

impl TabulatedFunction {
    /// [left_x, right_x] 上等距的 `points_count` 個點，y 皆為 0。
    pub fn new(
        kind: StorageKind,
        left_x: f64,
        right_x: f64,
        points_count: usize,
    ) -> Result<TabulatedFunction, TabulatedFunctionError> {
        Self::from_values(kind, left_x, right_x, &vec![0.0; points_count])
    }

    pub fn from_values(
        kind: StorageKind,
        left_x: f64,
        right_x: f64,
        values: &[f64],
    ) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let points = uniform_points(left_x, right_x, values)?;
        Self::from_points(kind, &points)
    }

    pub fn from_points(
        kind: StorageKind,
        points: &[Point],
    ) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let store: Box<dyn PointStore> = match kind {
            StorageKind::Array      => Box::new(ArrayPointStore::from_points(points)?),
            StorageKind::LinkedList => Box::new(LinkedPointStore::from_points(points)?),
        };
        Ok(TabulatedFunction { store })
    }

    pub fn kind(&self) -> StorageKind {
        self.store.kind()
    }

    pub fn points_count(&self) -> usize {
        self.store.points_count()
    }

    pub fn point(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        self.store.point(index)
    }

    pub fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        self.store.set_point(index, point)
    }

    pub fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.store.point_x(index)
    }

    pub fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        self.store.set_point_x(index, x)
    }

    pub fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.store.point_y(index)
    }

    pub fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        self.store.set_point_y(index, y)
    }

    pub fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.store.delete_point(index)
    }

    pub fn add_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        self.store.add_point(point)
    }

    pub fn points(&self) -> Vec<Point> {
        self.store.points()
    }

    /// 換一種儲存方式複製一份。
    pub fn to_kind(&self, kind: StorageKind) -> Result<TabulatedFunction, TabulatedFunctionError> {
        Self::from_points(kind, &self.points())
    }
}

impl Function for TabulatedFunction {
    fn left_domain_border(&self) -> f64 {
        self.store.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.store.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        self.store.value(x)
    }
}

impl Clone for TabulatedFunction {
    fn clone(&self) -> TabulatedFunction {
        TabulatedFunction { store: self.store.clone_box() }
    }
}

impl fmt::Display for TabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tabulated function ({:?})", self.kind())?;
        writeln!(f, "-----------------------")?;
        for (i, point) in self.points().iter().enumerate() {
            writeln!(f, "Point {}: {}", i, point)?;
        }
        writeln!(f, "-----------------------")?;
        writeln!(
            f,
            "Domain: [{:.4}, {:.4}]",
            self.left_domain_border(),
            self.right_domain_border()
        )?;
        write!(f, "Points count: {}", self.points_count())
    }
}
