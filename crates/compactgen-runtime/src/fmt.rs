//! `Display` adapters used by generated `Display` impls
//!
//! Absent values print as `null` and sequences as `[a, b]`.

use std::fmt::{self, Display, Formatter};

/// Displays `Some(v)` as `v` and `None` as `null`.
pub struct Nullable<'a, T>(pub &'a Option<T>);

impl<T: Display> Display for Nullable<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

/// Displays a slice as `[a, b, c]`.
pub struct Array<'a, T>(pub &'a [T]);

impl<T: Display> Display for Array<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_list(f, self.0.iter())
    }
}

/// Displays a slice of optional values as `[a, null, c]`.
pub struct ArrayOfNullable<'a, T>(pub &'a [Option<T>]);

impl<T: Display> Display for ArrayOfNullable<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_list(f, self.0.iter().map(Nullable))
    }
}

fn write_list<I>(f: &mut Formatter<'_>, items: I) -> fmt::Result
where
    I: Iterator,
    I::Item: Display,
{
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt(f)?;
    }
    f.write_str("]")
}
