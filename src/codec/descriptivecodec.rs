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
    read_array,
    read_u16_be,
    write_u16_be
};
use crate::codec::compactcodec::{
    read_payload,
    write_payload
};
use crate::tabulated::pointstore::StorageKind;
use crate::tabulated::tabulatedfunction::TabulatedFunction;
use crate::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

// ─────────────────────────────────────────────────────────────────────────────
// DescriptiveCodec - 自描述的 tagged record
// ─────────────────────────────────────────────────────────────────────────────
//
// 格式（全部大端序）：
//
//   magic          4 bytes   "TFNC"
//   version        u16       目前為 1
//   type_name      u16 長度 + UTF-8，例如 "tabfunc.ArrayTabulatedFunction"
//   field_count    u16
//   field_count 次：
//     field_name   u16 長度 + UTF-8
//     field_type   u8
//   payload        與 CompactCodec 完全相同（points_count + 各點 x, y）
//
// 標頭記錄了儲存方式，解碼時會還原成同一種 store。
// 標頭長度固定大於 0，所以編碼結果永遠比 CompactCodec 長。

pub const MAGIC: [u8; 4] = *b"TFNC";
pub const FORMAT_VERSION: u16 = 1;

const FIELD_TYPE_I32: u8 = b'I';
const FIELD_TYPE_POINT_ARRAY: u8 = b'[';

const FIELDS: [(&str, u8); 2] = [
    ("points_count", FIELD_TYPE_I32),
    ("points", FIELD_TYPE_POINT_ARRAY),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct DescriptiveCodec;

impl DescriptiveCodec {
    pub fn new() -> DescriptiveCodec {
        DescriptiveCodec
    }
}

impl FunctionCodec for DescriptiveCodec {
    fn write_function(
        &self,
        function: &TabulatedFunction,
        writer: &mut dyn Write,
    ) -> Result<(), TabulatedFunctionError> {
        writer.write_all(&MAGIC)?;
        write_u16_be(writer, FORMAT_VERSION)?;
        write_string(writer, function.kind().type_name())?;
        write_u16_be(writer, FIELDS.len() as u16)?;
        for (name, field_type) in FIELDS {
            write_string(writer, name)?;
            writer.write_all(&[field_type])?;
        }
        write_payload(&function.points(), writer)?;
        debug!(
            kind = ?function.kind(),
            points_count = function.points_count(),
            header_bytes = header_size(function.kind()),
            "descriptive encode"
        );
        Ok(())
    }

    fn read_function(&self, reader: &mut dyn Read) -> Result<TabulatedFunction, TabulatedFunctionError> {
        let magic: [u8; 4] = read_array(reader)?;
        if magic != MAGIC {
            warn!(?magic, "rejecting stream with unknown magic");
            return Err(TabulatedFunctionError::corrupt_stream("unknown format marker"));
        }

        let version = read_u16_be(reader)?;
        if version != FORMAT_VERSION {
            warn!(version, "rejecting stream with unsupported version");
            return Err(TabulatedFunctionError::corrupt_stream(format!(
                "unsupported format version {}",
                version
            )));
        }

        let type_name = read_string(reader)?;
        let kind = StorageKind::from_type_name(&type_name).ok_or_else(|| {
            TabulatedFunctionError::corrupt_stream(format!("unknown record type '{}'", type_name))
        })?;

        let field_count = read_u16_be(reader)? as usize;
        if field_count != FIELDS.len() {
            return Err(TabulatedFunctionError::corrupt_stream(format!(
                "expected {} field descriptors, got {}",
                FIELDS.len(),
                field_count
            )));
        }
        for (name, field_type) in FIELDS {
            let read_name = read_string(reader)?;
            let [read_type] = read_array::<1>(reader)?;
            if read_name != name || read_type != field_type {
                return Err(TabulatedFunctionError::corrupt_stream(format!(
                    "unexpected field descriptor '{}'",
                    read_name
                )));
            }
        }

        let function = read_payload(reader, kind)?;
        debug!(?kind, points_count = function.points_count(), "descriptive decode");
        Ok(function)
    }
}

/// 標頭長度（不含 payload）。
pub fn header_size(kind: StorageKind) -> usize {
    let string_size = |s: &str| 2 + s.len();
    MAGIC.len()
        + 2
        + string_size(kind.type_name())
        + 2
        + FIELDS.iter().map(|(name, _)| string_size(name) + 1).sum::<usize>()
}

fn write_string(writer: &mut dyn Write, value: &str) -> Result<(), TabulatedFunctionError> {
    let len = u16::try_from(value.len())
        .map_err(|_| TabulatedFunctionError::corrupt_stream("string too long for descriptor"))?;
    write_u16_be(writer, len)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn read_string(reader: &mut dyn Read) -> Result<String, TabulatedFunctionError> {
    let len = read_u16_be(reader)? as usize;
    let mut buf = vec![0u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(TabulatedFunctionError::from_read_error)?;
    String::from_utf8(buf)
        .map_err(|_| TabulatedFunctionError::corrupt_stream("descriptor is not valid UTF-8"))
}
