//! Hand-written external type referenced by the schema as `com.example.money.Money`

use compactgen_runtime::{CompactReader, CompactResult, CompactSerializer, CompactWriter};
use std::fmt;

/// Amount in minor units of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    pub currency: String,
    pub cents: i64,
}

impl Money {
    pub fn new(currency: impl Into<String>, cents: i64) -> Self {
        Self {
            currency: currency.into(),
            cents,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} cents", self.currency, self.cents)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoneySerializer;

impl CompactSerializer for MoneySerializer {
    type Value = Money;

    fn type_name(&self) -> &str {
        "com.example.money.Money"
    }

    fn write(&self, writer: &mut CompactWriter<'_>, value: &Money) -> CompactResult<()> {
        writer.write_string("currency", &value.currency);
        writer.write_int64("cents", value.cents);
        Ok(())
    }

    fn read(&self, reader: &CompactReader<'_>) -> CompactResult<Money> {
        Ok(Money {
            currency: reader.read_string("currency")?,
            cents: reader.read_int64("cents")?,
        })
    }
}
