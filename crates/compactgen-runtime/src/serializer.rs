//! The serializer trait implemented by generated code

use crate::error::CompactResult;
use crate::reader::CompactReader;
use crate::writer::CompactWriter;

/// Reads and writes one value type as a compact record.
///
/// The value type and its serializer are separate types; a serializer is
/// registered explicitly with a [`SerializerRegistry`](crate::SerializerRegistry).
///
/// # Example
///
/// ```
/// use compactgen_runtime::{CompactReader, CompactResult, CompactSerializer, CompactWriter};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// struct PointSerializer;
///
/// impl CompactSerializer for PointSerializer {
///     type Value = Point;
///
///     fn type_name(&self) -> &str {
///         "example.Point"
///     }
///
///     fn write(&self, writer: &mut CompactWriter<'_>, value: &Point) -> CompactResult<()> {
///         writer.write_int32("x", value.x);
///         writer.write_int32("y", value.y);
///         Ok(())
///     }
///
///     fn read(&self, reader: &CompactReader<'_>) -> CompactResult<Point> {
///         Ok(Point {
///             x: reader.read_int32("x")?,
///             y: reader.read_int32("y")?,
///         })
///     }
/// }
/// ```
pub trait CompactSerializer: Send + Sync + 'static {
    type Value: 'static;

    /// Type name written into every record (the type's fingerprint).
    fn type_name(&self) -> &str;

    fn write(&self, writer: &mut CompactWriter<'_>, value: &Self::Value) -> CompactResult<()>;

    fn read(&self, reader: &CompactReader<'_>) -> CompactResult<Self::Value>;
}
