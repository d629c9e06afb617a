//! Product Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

/// Product identifier, as issued by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Wrap a raw catalog id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw catalog id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Product Model
///
/// Only `id` is required from the catalog. `title` also accepts `name`, a
/// missing `price` reads as zero and may be sent as a number or a string.
/// Attributes the cart does not interpret are kept in `attributes` so they
/// survive a round trip through storage untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog id.
    pub id: ProductId,

    /// Display name.
    #[serde(default, alias = "name")]
    pub title: String,

    /// Unit price.
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Decimal,

    /// Image URL.
    #[serde(default)]
    pub image: String,

    /// Everything else the catalog sent.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Stock level for a single product at the time it was fetched.
///
/// `amount` is signed: a catalog reporting negative stock simply has nothing
/// to sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Catalog id.
    pub id: ProductId,

    /// Units available.
    pub amount: i64,
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Decimal::ZERO),
        Value::String(raw) => raw,
        Value::Number(number) => number.to_string(),
        other => return Err(D::Error::custom(format!("invalid price: {other}"))),
    };

    let raw = raw.trim();

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(D::Error::custom)
}
