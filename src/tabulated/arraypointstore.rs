use tracing::debug;

use crate::tabulated::point::Point;
use crate::tabulated::pointstore::{
    PointStore,
    StorageKind,
    check_abscissa,
    check_index,
    check_not_duplicate,
    interpolate_along,
    outside_domain,
    uniform_points,
    validate_points,
    MIN_POINTS_COUNT
};
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

// 建構時額外預留的空位
const SPARE_CAPACITY: usize = 2;
const MIN_LOAD_FACTOR: f64 = 0.5;
const MIN_SHRINKABLE_CAPACITY: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// ArrayPointStore
// ─────────────────────────────────────────────────────────────────────────────
//
// 連續緩衝區 + 邏輯長度：
//   buffer.len() 即容量，只有 buffer[..size] 有意義，尾端空位內容不保證。
//
// 容量策略：
//   - 滿了再插入：新容量 = 舊容量 * 3 / 2 + 1
//   - 刪除後負載 size / capacity < 0.5 且容量 > 4：
//       縮成 max(size + 2, capacity / 2)

#[derive(Clone, Debug)]
pub struct ArrayPointStore {
    buffer: Vec<Point>,
    size: usize,
}

impl ArrayPointStore {
    /// [left_x, right_x] 上等距的 `points_count` 個點，y 皆為 0。
    pub fn new(
        left_x: f64,
        right_x: f64,
        points_count: usize,
    ) -> Result<ArrayPointStore, TabulatedFunctionError> {
        Self::from_values(left_x, right_x, &vec![0.0; points_count])
    }

    /// [left_x, right_x] 上等距的點，y 依序取自 `values`。
    pub fn from_values(
        left_x: f64,
        right_x: f64,
        values: &[f64],
    ) -> Result<ArrayPointStore, TabulatedFunctionError> {
        let points = uniform_points(left_x, right_x, values)?;
        Ok(Self::from_validated(points))
    }

    pub fn from_points(points: &[Point]) -> Result<ArrayPointStore, TabulatedFunctionError> {
        validate_points(points)?;
        Ok(Self::from_validated(points.to_vec()))
    }

    fn from_validated(mut points: Vec<Point>) -> ArrayPointStore {
        let size = points.len();
        points.resize(size + SPARE_CAPACITY, Point::default());
        ArrayPointStore { buffer: points, size }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn neighbours(&self, index: usize) -> (Option<Point>, Option<Point>) {
        let prev = index.checked_sub(1).map(|i| self.buffer[i]);
        let next = if index + 1 < self.size {
            Some(self.buffer[index + 1])
        } else {
            None
        };
        (prev, next)
    }

    fn expand(&mut self) {
        let new_capacity = self.capacity() * 3 / 2 + 1;
        debug!(old_capacity = self.capacity(), new_capacity, "expanding point buffer");
        self.buffer.resize(new_capacity, Point::default());
    }

    fn shrink(&mut self) {
        let new_capacity = usize::max(self.size + SPARE_CAPACITY, self.capacity() / 2);
        debug!(old_capacity = self.capacity(), new_capacity, "shrinking point buffer");
        self.buffer.truncate(new_capacity);
        self.buffer.shrink_to_fit();
    }

    fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }
}

impl PointStore for ArrayPointStore {
    fn kind(&self) -> StorageKind {
        StorageKind::Array
    }

    fn points_count(&self) -> usize {
        self.size
    }

    fn point(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        check_index(index, self.size)?;
        Ok(self.buffer[index])
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.size)?;
        let current = self.buffer[index];
        if current.same_abscissa(&point) {
            self.buffer[index] = current.with_y(point.y());
            return Ok(());
        }
        let (prev, next) = self.neighbours(index);
        check_abscissa(index, point.x(), prev, next)?;
        self.buffer[index] = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.size)?;
        let current = self.buffer[index];
        if current.same_abscissa(&current.with_x(x)) {
            return Ok(());
        }
        let (prev, next) = self.neighbours(index);
        check_abscissa(index, x, prev, next)?;
        self.buffer[index] = current.with_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.size)?;
        self.buffer[index] = self.buffer[index].with_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.size)?;
        if self.size <= MIN_POINTS_COUNT {
            return Err(TabulatedFunctionError::MinimumSizeViolation { size: self.size });
        }

        self.buffer.copy_within(index + 1..self.size, index);
        self.size -= 1;

        if self.load_factor() < MIN_LOAD_FACTOR && self.capacity() > MIN_SHRINKABLE_CAPACITY {
            self.shrink();
        }
        Ok(())
    }

    fn add_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        if !point.x().is_finite() {
            return Err(TabulatedFunctionError::NonFiniteAbscissa(point.x()));
        }

        let insert_index = self.buffer[..self.size]
            .iter()
            .position(|pt| pt.x() >= point.x())
            .unwrap_or(self.size);
        let prev = insert_index.checked_sub(1).map(|i| self.buffer[i]);
        let next = if insert_index < self.size {
            Some(self.buffer[insert_index])
        } else {
            None
        };
        check_not_duplicate(point.x(), prev, next)?;

        if self.size >= self.capacity() {
            self.expand();
        }
        self.buffer.copy_within(insert_index..self.size, insert_index + 1);
        self.buffer[insert_index] = point;
        self.size += 1;
        Ok(())
    }

    fn left_domain_border(&self) -> f64 {
        self.buffer[0].x()
    }

    fn right_domain_border(&self) -> f64 {
        self.buffer[self.size - 1].x()
    }

    fn value(&self, x: f64) -> f64 {
        if outside_domain(x, self.left_domain_border(), self.right_domain_border()) {
            return f64::NAN;
        }
        interpolate_along(self.buffer[..self.size].iter().copied(), x)
    }

    fn clone_box(&self) -> Box<dyn PointStore> {
        Box::new(self.clone())
    }

    fn points(&self) -> Vec<Point> {
        self.buffer[..self.size].to_vec()
    }
}
