//! Binary encoding of compact records
//!
//! All integers are little-endian. Strings are a `u32` byte length followed
//! by UTF-8 bytes.
//!
//! ```text
//! message  := version:u8 record
//! record   := type_name:str count:u32 (name:str value)*
//! value    := shape:u8 payload
//! ```
//!
//! | Shape | Payload |
//! |-------|---------|
//! | 0 value | `kind:u8 scalar` |
//! | 1 nullable | `kind:u8 present:u8 scalar?` |
//! | 2 array | `kind:u8 len:u32 scalar*` |
//! | 3 array of nullable | `kind:u8 len:u32 (present:u8 scalar?)*` |
//! | 4 compact | `record` |
//! | 5 array of compact | `len:u32 record*` |

use crate::error::{CompactError, CompactResult};
use crate::record::CompactRecord;
use crate::value::{FieldValue, Scalar, ScalarKind};
use time::{Date, PrimitiveDateTime, Time, UtcOffset};

const FORMAT_VERSION: u8 = 1;
const MAX_DEPTH: usize = 64;

const SHAPE_VALUE: u8 = 0;
const SHAPE_NULLABLE: u8 = 1;
const SHAPE_ARRAY: u8 = 2;
const SHAPE_ARRAY_OF_NULLABLE: u8 = 3;
const SHAPE_COMPACT: u8 = 4;
const SHAPE_ARRAY_OF_COMPACT: u8 = 5;

/// Encode a record into bytes.
pub fn encode_record(record: &CompactRecord) -> Vec<u8> {
    let mut out = vec![FORMAT_VERSION];
    write_record(&mut out, record);
    out
}

/// Decode bytes produced by [`encode_record`].
pub fn decode_record(bytes: &[u8]) -> CompactResult<CompactRecord> {
    let mut decoder = Decoder { bytes, pos: 0 };
    let version = decoder.u8()?;
    if version != FORMAT_VERSION {
        return Err(CompactError::Decode(format!(
            "unsupported format version {version}"
        )));
    }
    let record = decoder.record(0)?;
    if decoder.pos != bytes.len() {
        return Err(CompactError::Decode(format!(
            "{} trailing bytes",
            bytes.len() - decoder.pos
        )));
    }
    Ok(record)
}

fn write_len(out: &mut Vec<u8>, len: usize) {
    out.extend_from_slice(&(len as u32).to_le_bytes());
}

fn write_str(out: &mut Vec<u8>, text: &str) {
    write_len(out, text.len());
    out.extend_from_slice(text.as_bytes());
}

fn write_record(out: &mut Vec<u8>, record: &CompactRecord) {
    write_str(out, record.type_name());
    write_len(out, record.len());
    for (name, value) in record.fields() {
        write_str(out, name);
        write_value(out, value);
    }
}

fn write_value(out: &mut Vec<u8>, value: &FieldValue) {
    match value {
        FieldValue::Value(scalar) => {
            out.extend_from_slice(&[SHAPE_VALUE, scalar.kind().tag()]);
            write_scalar(out, scalar);
        }
        FieldValue::Nullable(kind, scalar) => {
            out.extend_from_slice(&[SHAPE_NULLABLE, kind.tag()]);
            write_optional(out, scalar.as_ref());
        }
        FieldValue::Array(kind, items) => {
            out.extend_from_slice(&[SHAPE_ARRAY, kind.tag()]);
            write_len(out, items.len());
            for item in items {
                write_scalar(out, item);
            }
        }
        FieldValue::ArrayOfNullable(kind, items) => {
            out.extend_from_slice(&[SHAPE_ARRAY_OF_NULLABLE, kind.tag()]);
            write_len(out, items.len());
            for item in items {
                write_optional(out, item.as_ref());
            }
        }
        FieldValue::Compact(record) => {
            out.push(SHAPE_COMPACT);
            write_record(out, record);
        }
        FieldValue::ArrayOfCompact(records) => {
            out.push(SHAPE_ARRAY_OF_COMPACT);
            write_len(out, records.len());
            for record in records {
                write_record(out, record);
            }
        }
    }
}

fn write_optional(out: &mut Vec<u8>, scalar: Option<&Scalar>) {
    match scalar {
        Some(scalar) => {
            out.push(1);
            write_scalar(out, scalar);
        }
        None => out.push(0),
    }
}

fn write_date(out: &mut Vec<u8>, date: Date) {
    out.extend_from_slice(&date.to_julian_day().to_le_bytes());
}

fn write_time(out: &mut Vec<u8>, time: Time) {
    let (hour, minute, second, nanosecond) = time.as_hms_nano();
    out.extend_from_slice(&[hour, minute, second]);
    out.extend_from_slice(&nanosecond.to_le_bytes());
}

fn write_scalar(out: &mut Vec<u8>, scalar: &Scalar) {
    match scalar {
        Scalar::Boolean(v) => out.push(u8::from(*v)),
        Scalar::Int8(v) => out.extend_from_slice(&v.to_le_bytes()),
        Scalar::Int16(v) => out.extend_from_slice(&v.to_le_bytes()),
        Scalar::Int32(v) => out.extend_from_slice(&v.to_le_bytes()),
        Scalar::Int64(v) => out.extend_from_slice(&v.to_le_bytes()),
        Scalar::Float32(v) => out.extend_from_slice(&v.to_bits().to_le_bytes()),
        Scalar::Float64(v) => out.extend_from_slice(&v.to_bits().to_le_bytes()),
        Scalar::String(v) => write_str(out, v),
        Scalar::Date(v) => write_date(out, *v),
        Scalar::Time(v) => write_time(out, *v),
        Scalar::Timestamp(v) => {
            write_date(out, v.date());
            write_time(out, v.time());
        }
        Scalar::TimestampWithTimezone(v) => {
            write_date(out, v.date());
            write_time(out, v.time());
            out.extend_from_slice(&v.offset().whole_seconds().to_le_bytes());
        }
    }
}

struct Decoder<'a> {
    bytes: &'a [u8],
    pos: usize,
}

fn range_error(err: time::error::ComponentRange) -> CompactError {
    CompactError::Decode(err.to_string())
}

impl Decoder<'_> {
    fn take(&mut self, len: usize) -> CompactResult<&[u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                CompactError::Decode(format!("unexpected end of input at offset {}", self.pos))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> CompactResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> CompactResult<u8> {
        Ok(self.array::<1>()?[0])
    }

    fn len(&mut self) -> CompactResult<usize> {
        Ok(u32::from_le_bytes(self.array()?) as usize)
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn string(&mut self) -> CompactResult<String> {
        let len = self.len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|err| CompactError::Decode(err.to_string()))
    }

    fn kind(&mut self) -> CompactResult<ScalarKind> {
        let tag = self.u8()?;
        ScalarKind::from_tag(tag)
            .ok_or_else(|| CompactError::Decode(format!("unknown kind tag {tag}")))
    }

    fn present(&mut self) -> CompactResult<bool> {
        match self.u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CompactError::Decode(format!("invalid presence flag {other}"))),
        }
    }

    fn record(&mut self, depth: usize) -> CompactResult<CompactRecord> {
        if depth > MAX_DEPTH {
            return Err(CompactError::Decode("records nested too deeply".to_string()));
        }
        let mut record = CompactRecord::new(self.string()?);
        let count = self.len()?;
        for _ in 0..count {
            let name = self.string()?;
            let value = self.value(depth)?;
            if record.insert(name.clone(), value).is_some() {
                return Err(CompactError::Decode(format!("duplicate field {name}")));
            }
        }
        Ok(record)
    }

    fn value(&mut self, depth: usize) -> CompactResult<FieldValue> {
        match self.u8()? {
            SHAPE_VALUE => {
                let kind = self.kind()?;
                Ok(FieldValue::Value(self.scalar(kind)?))
            }
            SHAPE_NULLABLE => {
                let kind = self.kind()?;
                let scalar = self.optional(kind)?;
                Ok(FieldValue::Nullable(kind, scalar))
            }
            SHAPE_ARRAY => {
                let kind = self.kind()?;
                let len = self.len()?;
                let mut items = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    items.push(self.scalar(kind)?);
                }
                Ok(FieldValue::Array(kind, items))
            }
            SHAPE_ARRAY_OF_NULLABLE => {
                let kind = self.kind()?;
                let len = self.len()?;
                let mut items = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    items.push(self.optional(kind)?);
                }
                Ok(FieldValue::ArrayOfNullable(kind, items))
            }
            SHAPE_COMPACT => Ok(FieldValue::Compact(self.record(depth + 1)?)),
            SHAPE_ARRAY_OF_COMPACT => {
                let len = self.len()?;
                let mut records = Vec::with_capacity(len.min(self.remaining()));
                for _ in 0..len {
                    records.push(self.record(depth + 1)?);
                }
                Ok(FieldValue::ArrayOfCompact(records))
            }
            other => Err(CompactError::Decode(format!("unknown value shape {other}"))),
        }
    }

    fn optional(&mut self, kind: ScalarKind) -> CompactResult<Option<Scalar>> {
        if self.present()? {
            Ok(Some(self.scalar(kind)?))
        } else {
            Ok(None)
        }
    }

    fn date(&mut self) -> CompactResult<Date> {
        Date::from_julian_day(i32::from_le_bytes(self.array()?)).map_err(range_error)
    }

    fn time(&mut self) -> CompactResult<Time> {
        let [hour, minute, second] = self.array()?;
        let nanosecond = u32::from_le_bytes(self.array()?);
        Time::from_hms_nano(hour, minute, second, nanosecond).map_err(range_error)
    }

    fn scalar(&mut self, kind: ScalarKind) -> CompactResult<Scalar> {
        Ok(match kind {
            ScalarKind::Boolean => Scalar::Boolean(self.present()?),
            ScalarKind::Int8 => Scalar::Int8(i8::from_le_bytes(self.array()?)),
            ScalarKind::Int16 => Scalar::Int16(i16::from_le_bytes(self.array()?)),
            ScalarKind::Int32 => Scalar::Int32(i32::from_le_bytes(self.array()?)),
            ScalarKind::Int64 => Scalar::Int64(i64::from_le_bytes(self.array()?)),
            ScalarKind::Float32 => Scalar::Float32(f32::from_bits(u32::from_le_bytes(self.array()?))),
            ScalarKind::Float64 => Scalar::Float64(f64::from_bits(u64::from_le_bytes(self.array()?))),
            ScalarKind::String => Scalar::String(self.string()?),
            ScalarKind::Date => Scalar::Date(self.date()?),
            ScalarKind::Time => Scalar::Time(self.time()?),
            ScalarKind::Timestamp => {
                let date = self.date()?;
                Scalar::Timestamp(PrimitiveDateTime::new(date, self.time()?))
            }
            ScalarKind::TimestampWithTimezone => {
                let date = self.date()?;
                let time = self.time()?;
                let offset = UtcOffset::from_whole_seconds(i32::from_le_bytes(self.array()?))
                    .map_err(range_error)?;
                Scalar::TimestampWithTimezone(PrimitiveDateTime::new(date, time).assume_offset(offset))
            }
        })
    }
}
