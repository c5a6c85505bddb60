use thiserror::Error;

/// 表格函數、point store 與 codec 共用的錯誤型別。
///
/// 所有錯誤都在違反處同步回報，內部不重試。
#[derive(Error, Debug)]
pub enum TabulatedFunctionError {
    #[error("index {index} out of range for {size} points")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("x = {x} at index {index} would violate the ordering of points")]
    InvalidOrdering { index: usize, x: f64 },

    #[error("point with x = {0} already exists")]
    DuplicateAbscissa(f64),

    #[error("function must keep at least 2 points, it has {size}")]
    MinimumSizeViolation { size: usize },

    #[error("left border {left_x} must be less than right border {right_x}")]
    InvalidDomain { left_x: f64, right_x: f64 },

    #[error("abscissa {0} is not a finite number")]
    NonFiniteAbscissa(f64),

    #[error("[{left_x}, {right_x}] is not inside the function domain [{domain_left}, {domain_right}]")]
    DomainNotCovered {
        left_x: f64,
        right_x: f64,
        domain_left: f64,
        domain_right: f64,
    },

    #[error("corrupt stream: {0}")]
    CorruptStream(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TabulatedFunctionError {
    pub fn corrupt_stream(message: impl Into<String>) -> TabulatedFunctionError {
        TabulatedFunctionError::CorruptStream(message.into())
    }

    /// 讀取時遇到 EOF 代表資料被截斷，屬於格式錯誤而非 I/O 錯誤。
    pub fn from_read_error(error: std::io::Error) -> TabulatedFunctionError {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            TabulatedFunctionError::CorruptStream("unexpected end of stream".to_owned())
        } else {
            TabulatedFunctionError::Io(error)
        }
    }
}
