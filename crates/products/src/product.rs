use serde::{Deserialize, Deserializer, Serialize};

use productd_core::{DomainError, DomainResult, ProductId};

/// Full, replace-on-write record for one product.
///
/// This is both the stored value and the wire shape. Decoding is strict about
/// unrecognized fields and exact-case key names; absent or `null` fields take
/// their zero value and are caught by [`ProductDetails::validate`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductDetails {
    /// Key of the record. Whatever the client sends here is overwritten by the path id.
    #[serde(deserialize_with = "null_as_zero")]
    pub product_id: i32,
    #[serde(deserialize_with = "null_as_zero")]
    pub sku: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub manufacturer: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub category_id: i32,
    #[serde(deserialize_with = "null_as_zero")]
    pub weight: i32,
    /// Opaque secondary reference; not validated.
    #[serde(deserialize_with = "null_as_zero")]
    pub some_other_id: i32,
}

/// `null` leaves a field at its zero value, same as omitting it.
fn null_as_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductDetails {
    /// Decode a request body.
    ///
    /// Fails on malformed JSON, non-object documents, type mismatches, unknown
    /// fields and trailing data. A bare `null` document decodes to the all-zero
    /// record, which then fails validation.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        // serde's derived struct visitor would otherwise accept a JSON array.
        if !value.is_object() {
            return Err(serde::de::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Check the required-field rules.
    ///
    /// `sku` and `manufacturer` must be non-empty; `category_id` and `weight`
    /// must be strictly positive. All violations are reported together.
    pub fn validate(&self) -> DomainResult<()> {
        let mut problems = Vec::new();
        if self.sku.is_empty() {
            problems.push("sku must not be empty");
        }
        if self.manufacturer.is_empty() {
            problems.push("manufacturer must not be empty");
        }
        if self.category_id <= 0 {
            problems.push("category_id must be positive");
        }
        if self.weight <= 0 {
            problems.push("weight must be positive");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(problems.join("; ")))
        }
    }

    /// Bind the record to its key. The path identifier is authoritative.
    pub fn with_product_id(mut self, id: ProductId) -> Self {
        self.product_id = id.get();
        self
    }

    /// The record's key, if it has been bound to a valid one.
    pub fn id(&self) -> Option<ProductId> {
        ProductId::new(self.product_id).ok()
    }
}
