use std::fs::File;
use std::io::{
    BufRead,
    BufReader,
    BufWriter,
    Cursor,
    Read,
    Write
};
use std::path::Path;

use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 表格函數與位元組串流之間的編碼 / 解碼策略。
///
/// 每次呼叫都是獨立的：`write_function` 把函數寫進 sink，
/// `read_function` 從 source 建出新的函數。解碼失敗時不會動到呼叫端既有的任何狀態。
pub trait FunctionCodec {
    fn write_function(
        &self,
        function: &TabulatedFunction,
        writer: &mut dyn Write,
    ) -> Result<(), TabulatedFunctionError>;

    fn read_function(&self, reader: &mut dyn Read) -> Result<TabulatedFunction, TabulatedFunctionError>;

    fn encode(&self, function: &TabulatedFunction) -> Result<Vec<u8>, TabulatedFunctionError> {
        let mut bytes = Vec::new();
        self.write_function(function, &mut bytes)?;
        Ok(bytes)
    }

    /// 解碼整段位元組；資料後面還有多餘位元組也視為損毀。
    fn decode(&self, bytes: &[u8]) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let mut cursor = Cursor::new(bytes);
        let function = self.read_function(&mut cursor)?;
        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(TabulatedFunctionError::corrupt_stream(format!(
                "{} trailing bytes after encoded function",
                bytes.len() - consumed
            )));
        }
        Ok(function)
    }

    /// 檔案在每條離開路徑上都會被 flush 並關閉（drop）。
    fn write_to_file(
        &self,
        function: &TabulatedFunction,
        file_path: &Path,
    ) -> Result<(), TabulatedFunctionError> {
        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write_function(function, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn read_from_file(&self, file_path: &Path) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let file = File::open(file_path)?;
        let mut reader = BufReader::new(file);
        let function = self.read_function(&mut reader)?;
        if !reader.fill_buf()?.is_empty() {
            return Err(TabulatedFunctionError::corrupt_stream(
                "trailing bytes after encoded function",
            ));
        }
        Ok(function)
    }
}

// ─────────────────────────────────────────────
// 大端序讀寫輔助函數
// ─────────────────────────────────────────────

pub(crate) fn write_i32_be(writer: &mut dyn Write, value: i32) -> Result<(), TabulatedFunctionError> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub(crate) fn write_u16_be(writer: &mut dyn Write, value: u16) -> Result<(), TabulatedFunctionError> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub(crate) fn write_f64_be(writer: &mut dyn Write, value: f64) -> Result<(), TabulatedFunctionError> {
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

pub(crate) fn read_array<const N: usize>(reader: &mut dyn Read) -> Result<[u8; N], TabulatedFunctionError> {
    let mut buf = [0u8; N];
    reader
        .read_exact(&mut buf)
        .map_err(TabulatedFunctionError::from_read_error)?;
    Ok(buf)
}

pub(crate) fn read_i32_be(reader: &mut dyn Read) -> Result<i32, TabulatedFunctionError> {
    Ok(i32::from_be_bytes(read_array(reader)?))
}

pub(crate) fn read_u16_be(reader: &mut dyn Read) -> Result<u16, TabulatedFunctionError> {
    Ok(u16::from_be_bytes(read_array(reader)?))
}

pub(crate) fn read_f64_be(reader: &mut dyn Read) -> Result<f64, TabulatedFunctionError> {
    Ok(f64::from_be_bytes(read_array(reader)?))
}
