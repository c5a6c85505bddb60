use std::io::{
    BufRead,
    BufReader,
    ErrorKind,
    Read,
    Write
};

use tracing::{
    debug,
    warn
};

use crate::codec::codec::FunctionCodec;
use crate::tabulated::point::Point;
use crate::tabulated::pointstore::StorageKind;
use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

pub const DEFAULT_PRECISION: usize = 10;

/// 每行一點，`x y` 以空白分隔，固定小數位數。
///
/// 沒有點數標頭，讀取時一直讀到串流結尾；空行略過。
/// 輸出會依精度四捨五入，所以這個格式不保證 bit 等同的往返。
#[derive(Clone, Copy, Debug)]
pub struct TextCodec {
    precision: usize,
    storage: StorageKind,
}

impl Default for TextCodec {
    fn default() -> TextCodec {
        TextCodec { precision: DEFAULT_PRECISION, storage: StorageKind::Array }
    }
}

impl TextCodec {
    pub fn new(precision: usize, storage: StorageKind) -> TextCodec {
        TextCodec { precision, storage }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    fn parse_line(line: &str, line_number: usize) -> Result<Point, TabulatedFunctionError> {
        let malformed = || {
            TabulatedFunctionError::corrupt_stream(format!(
                "line {}: expected two finite numbers, got '{}'",
                line_number, line
            ))
        };
        let mut tokens = line.split_whitespace();
        let (Some(x_str), Some(y_str), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(malformed());
        };
        let x: f64 = x_str.parse().map_err(|_| malformed())?;
        let y: f64 = y_str.parse().map_err(|_| malformed())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(malformed());
        }
        Ok(Point::new(x, y))
    }
}

impl FunctionCodec for TextCodec {
    fn write_function(
        &self,
        function: &TabulatedFunction,
        writer: &mut dyn Write,
    ) -> Result<(), TabulatedFunctionError> {
        let precision = self.precision;
        for point in function.points() {
            writeln!(writer, "{:.*} {:.*}", precision, point.x(), precision, point.y())?;
        }
        debug!(points_count = function.points_count(), precision, "text encode");
        Ok(())
    }

    fn read_function(&self, reader: &mut dyn Read) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let mut points = Vec::new();
        for (i, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.map_err(|error| match error.kind() {
                ErrorKind::InvalidData => TabulatedFunctionError::corrupt_stream("text is not valid UTF-8"),
                _ => TabulatedFunctionError::Io(error),
            })?;
            if line.trim().is_empty() {
                continue;
            }
            points.push(Self::parse_line(&line, i + 1)?);
        }

        TabulatedFunction::from_points(self.storage, &points).map_err(|error| {
            warn!(%error, "rejecting text stream");
            TabulatedFunctionError::corrupt_stream(error.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::function::function::Function;

    #[test]
    fn test_text_layout() {
        let function = TabulatedFunction::from_values(StorageKind::Array, 0.0, 1.0, &[1.5, -2.0]).unwrap();
        let bytes = TextCodec::new(4, StorageKind::Array).encode(&function).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "0.0000 1.5000\n1.0000 -2.0000\n");
    }

    #[test]
    fn test_roundtrip_within_precision() {
        let function = TabulatedFunction::from_values(
            StorageKind::LinkedList,
            0.0,
            1.0,
            &[0.1, 1.0 / 3.0, 2.0 / 3.0, 0.9],
        )
        .unwrap();
        let codec = TextCodec::new(10, StorageKind::LinkedList);
        let decoded = codec.decode(&codec.encode(&function).unwrap()).unwrap();
        assert_eq!(decoded.points_count(), 4);
        assert_eq!(decoded.kind(), StorageKind::LinkedList);
        for (a, b) in function.points().iter().zip(decoded.points().iter()) {
            assert!((a.x() - b.x()).abs() < 1e-10);
            assert!((a.y() - b.y()).abs() < 1e-10);
        }
        assert!((decoded.value(0.5) - function.value(0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let text = "\n0 1\n\n  2 3  \n";
        let decoded = TextCodec::default().decode(text.as_bytes()).unwrap();
        assert_eq!(decoded.points(), vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]);
    }

    #[test]
    fn test_rejects_malformed_text() {
        let codec = TextCodec::default();
        for text in ["0 1\n", "0 1\n1\n", "0 1\n1 2 3\n", "0 1\nabc 2\n", "0 1\n1 inf\n", "1 1\n0 2\n", "0 1\n0 2\n"] {
            assert!(
                matches!(codec.decode(text.as_bytes()), Err(TabulatedFunctionError::CorruptStream(_))),
                "accepted {:?}",
                text
            );
        }
    }
}
