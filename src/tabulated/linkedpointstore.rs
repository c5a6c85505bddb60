use tracing::trace;

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

// ─────────────────────────────────────────────────────────────────────────────
// LinkedPointStore - 雙向鏈結串列
// ─────────────────────────────────────────────────────────────────────────────
//
// 節點放在 arena（Vec<Node>）裡，prev / next 存的是 arena 中的 slot 編號，
// 沒有指標也沒有所有權循環。刪除後空出的 slot 記在 free_slots，
// 下次插入時優先重用。
//
// 依 index 取節點時從較近的一端出發：
//   index < size / 2 從 head 往後走，否則從 tail 往前走，
// 最壞情況只需走 size / 2 步。

#[derive(Clone, Debug)]
struct Node {
    point: Point,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct LinkedPointStore {
    nodes: Vec<Node>,
    free_slots: Vec<usize>,
    head: usize,
    tail: usize,
    size: usize,
}

impl LinkedPointStore {
    pub fn new(
        left_x: f64,
        right_x: f64,
        points_count: usize,
    ) -> Result<LinkedPointStore, TabulatedFunctionError> {
        Self::from_values(left_x, right_x, &vec![0.0; points_count])
    }

    pub fn from_values(
        left_x: f64,
        right_x: f64,
        values: &[f64],
    ) -> Result<LinkedPointStore, TabulatedFunctionError> {
        let points = uniform_points(left_x, right_x, values)?;
        Ok(Self::from_validated(&points))
    }

    pub fn from_points(points: &[Point]) -> Result<LinkedPointStore, TabulatedFunctionError> {
        validate_points(points)?;
        Ok(Self::from_validated(points))
    }

    fn from_validated(points: &[Point]) -> LinkedPointStore {
        let size = points.len();
        let nodes = points
            .iter()
            .enumerate()
            .map(|(i, &point)| Node {
                point,
                prev: i.checked_sub(1),
                next: if i + 1 < size { Some(i + 1) } else { None },
            })
            .collect();
        LinkedPointStore {
            nodes,
            free_slots: Vec::new(),
            head: 0,
            tail: size - 1,
            size,
        }
    }

    fn forward_slots(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.head), move |&slot| self.nodes[slot].next)
    }

    fn backward_slots(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.tail), move |&slot| self.nodes[slot].prev)
    }

    fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.forward_slots().map(move |slot| self.nodes[slot].point)
    }

    /// 第 `index` 個節點所在的 slot。
    fn node_slot(&self, index: usize) -> Result<usize, TabulatedFunctionError> {
        check_index(index, self.size)?;
        let slot = if index < self.size / 2 {
            self.forward_slots().nth(index)
        } else {
            self.backward_slots().nth(self.size - 1 - index)
        };
        slot.ok_or(TabulatedFunctionError::IndexOutOfRange { index, size: self.size })
    }

    /// 第一個 x >= `x` 的節點位置與 slot；沒有則插在尾端。
    fn find_insert_position(&self, x: f64) -> (usize, Option<usize>) {
        self.forward_slots()
            .enumerate()
            .find(|&(_, slot)| self.nodes[slot].point.x() >= x)
            .map_or((self.size, None), |(index, slot)| (index, Some(slot)))
    }

    fn neighbours(&self, slot: usize) -> (Option<Point>, Option<Point>) {
        let node = &self.nodes[slot];
        (
            node.prev.map(|prev| self.nodes[prev].point),
            node.next.map(|next| self.nodes[next].point),
        )
    }

    fn allocate(&mut self, node: Node) -> usize {
        match self.free_slots.pop() {
            Some(slot) => {
                trace!(slot, "reusing free node slot");
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }
}

impl PointStore for LinkedPointStore {
    fn kind(&self) -> StorageKind {
        StorageKind::LinkedList
    }

    fn points_count(&self) -> usize {
        self.size
    }

    fn point(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        let slot = self.node_slot(index)?;
        Ok(self.nodes[slot].point)
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        let slot = self.node_slot(index)?;
        let current = self.nodes[slot].point;
        if current.same_abscissa(&point) {
            self.nodes[slot].point = current.with_y(point.y());
            return Ok(());
        }
        let (prev, next) = self.neighbours(slot);
        check_abscissa(index, point.x(), prev, next)?;
        self.nodes[slot].point = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        let slot = self.node_slot(index)?;
        let current = self.nodes[slot].point;
        if current.same_abscissa(&current.with_x(x)) {
            return Ok(());
        }
        self.set_point(index, current.with_x(x))
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        let slot = self.node_slot(index)?;
        self.nodes[slot].point = self.nodes[slot].point.with_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        let slot = self.node_slot(index)?;
        if self.size <= MIN_POINTS_COUNT {
            return Err(TabulatedFunctionError::MinimumSizeViolation { size: self.size });
        }

        let Node { prev, next, .. } = self.nodes[slot];
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => {
                if let Some(next) = next {
                    self.head = next;
                }
            }
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => {
                if let Some(prev) = prev {
                    self.tail = prev;
                }
            }
        }

        self.nodes[slot].prev = None;
        self.nodes[slot].next = None;
        self.free_slots.push(slot);
        self.size -= 1;
        Ok(())
    }

    fn add_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        if !point.x().is_finite() {
            return Err(TabulatedFunctionError::NonFiniteAbscissa(point.x()));
        }

        let (_, next_slot) = self.find_insert_position(point.x());
        let prev_slot = match next_slot {
            Some(next) => self.nodes[next].prev,
            None => Some(self.tail),
        };
        check_not_duplicate(
            point.x(),
            prev_slot.map(|prev| self.nodes[prev].point),
            next_slot.map(|next| self.nodes[next].point),
        )?;

        let slot = self.allocate(Node { point, prev: prev_slot, next: next_slot });
        match prev_slot {
            Some(prev) => self.nodes[prev].next = Some(slot),
            None => self.head = slot,
        }
        match next_slot {
            Some(next) => self.nodes[next].prev = Some(slot),
            None => self.tail = slot,
        }
        self.size += 1;
        Ok(())
    }

    fn left_domain_border(&self) -> f64 {
        self.nodes[self.head].point.x()
    }

    fn right_domain_border(&self) -> f64 {
        self.nodes[self.tail].point.x()
    }

    fn value(&self, x: f64) -> f64 {
        if outside_domain(x, self.left_domain_border(), self.right_domain_border()) {
            return f64::NAN;
        }
        interpolate_along(self.iter(), x)
    }

    fn clone_box(&self) -> Box<dyn PointStore> {
        Box::new(self.clone())
    }

    fn points(&self) -> Vec<Point> {
        self.iter().collect()
    }
}
