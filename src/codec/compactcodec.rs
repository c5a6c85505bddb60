use std::io::{
    Read,
    Write
};

use tracing::{
    debug,
    warn
};

use crate::codec::codec::{
    FunctionCodec,
    read_f64_be,
    read_i32_be,
    write_f64_be,
    write_i32_be
};
use crate::tabulated::point::{
    EPSILON,
    Point
};
use crate::tabulated::pointstore::{
    StorageKind,
    MIN_POINTS_COUNT
};
use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

// ─────────────────────────────────────────────────────────────────────────────
// CompactCodec
// ─────────────────────────────────────────────────────────────────────────────
//
// 格式（全部大端序）：
//
// | Offset | Size | Field        | Description                     |
// |--------|------|--------------|---------------------------------|
// | 0      | 4    | points_count | i32，至少為 2                   |
// | 4      | 8    | x[0]         | IEEE-754 double                 |
// | 12     | 8    | y[0]         | IEEE-754 double                 |
// | ...    |      |              | 依 index 順序重複 points_count 次 |
//
// 總長度 = 4 + 16 * points_count。沒有型別資訊也沒有版本號。

pub const COUNT_SIZE: usize = 4;
pub const POINT_SIZE: usize = 16;

// 計數欄位來自不可信的輸入，預先配置的容量要有上限
const MAX_PREALLOCATED_POINTS: usize = 4096;

pub fn encoded_size(points_count: usize) -> usize {
    COUNT_SIZE + POINT_SIZE * points_count
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CompactCodec {
    storage: StorageKind,
}

impl CompactCodec {
    pub fn new() -> CompactCodec {
        CompactCodec::default()
    }

    /// 解碼時改用指定的儲存方式。
    pub fn with_storage(storage: StorageKind) -> CompactCodec {
        CompactCodec { storage }
    }

    pub fn storage(&self) -> StorageKind {
        self.storage
    }
}

impl FunctionCodec for CompactCodec {
    fn write_function(
        &self,
        function: &TabulatedFunction,
        writer: &mut dyn Write,
    ) -> Result<(), TabulatedFunctionError> {
        let points = function.points();
        write_payload(&points, writer)?;
        debug!(points_count = points.len(), bytes = encoded_size(points.len()), "compact encode");
        Ok(())
    }

    fn read_function(&self, reader: &mut dyn Read) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let function = read_payload(reader, self.storage)?;
        debug!(points_count = function.points_count(), "compact decode");
        Ok(function)
    }
}

pub(crate) fn write_payload(points: &[Point], writer: &mut dyn Write) -> Result<(), TabulatedFunctionError> {
    let count = i32::try_from(points.len()).map_err(|_| {
        TabulatedFunctionError::corrupt_stream(format!(
            "{} points do not fit the 32-bit count field",
            points.len()
        ))
    })?;
    write_i32_be(writer, count)?;
    for point in points {
        write_f64_be(writer, point.x())?;
        write_f64_be(writer, point.y())?;
    }
    Ok(())
}

/// 讀取計數與點列，邊讀邊檢查 x 是否嚴格遞增。
pub(crate) fn read_payload(
    reader: &mut dyn Read,
    storage: StorageKind,
) -> Result<TabulatedFunction, TabulatedFunctionError> {
    let count = read_i32_be(reader)?;
    if count < MIN_POINTS_COUNT as i32 {
        warn!(count, "rejecting stream with too few points");
        return Err(TabulatedFunctionError::corrupt_stream(format!(
            "points count must be at least {}, got {}",
            MIN_POINTS_COUNT, count
        )));
    }

    let count = count as usize;
    let mut points = Vec::with_capacity(count.min(MAX_PREALLOCATED_POINTS));
    let mut prev_x = f64::NEG_INFINITY;
    for i in 0..count {
        let x = read_f64_be(reader)?;
        let y = read_f64_be(reader)?;
        if !x.is_finite() || !(x - prev_x >= EPSILON) {
            warn!(index = i, x, prev_x, "rejecting stream with unordered abscissas");
            return Err(TabulatedFunctionError::corrupt_stream(format!(
                "points are not strictly increasing by x at index {}",
                i
            )));
        }
        prev_x = x;
        points.push(Point::new(x, y));
    }

    TabulatedFunction::from_points(storage, &points)
        .map_err(|error| TabulatedFunctionError::corrupt_stream(error.to_string()))
}
