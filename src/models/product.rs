//! Product records and the shapes used to create and edit them.
//!
//! Field names are camelCase on disk so blobs written by earlier app versions keep
//! loading. Price and quantity are read leniently: a number, a numeric string, or
//! anything else (which becomes 0).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::fmt;

/// Unique, immutable product identifier.
///
/// Written as a JSON number. Reads also accept a numeric string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .map(Self)
                .ok_or_else(|| de::Error::custom(format!("product id {n} is not an integer"))),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("product id {s:?} is not numeric"))),
            other => Err(de::Error::custom(format!("invalid product id {other}"))),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product listing as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned at creation, never changes
    pub id: ProductId,
    /// Display name, non-empty for anything created through the front end
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Category label, empty when uncategorized
    #[serde(default)]
    pub category: String,
    /// Unit price, never negative
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    /// Units in stock
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    /// Text as spoken or typed, in the original language
    #[serde(default)]
    pub local_input: String,
    /// English rendering of `local_input`
    #[serde(default)]
    pub translated_input: String,
    /// Created while the device was offline. Set once at creation.
    #[serde(default)]
    pub offline: bool,
    /// Created while the device was online. Set once at creation.
    #[serde(default)]
    pub synced: bool,
    /// Set once by the catalog
    pub created_at: DateTime<Utc>,
    /// Bumped by every update
    pub updated_at: DateTime<Utc>,
}

/// Product fields before an id and timestamps are assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Category label, empty when uncategorized
    pub category: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub quantity: u32,
    /// Text as spoken or typed, in the original language
    pub local_input: String,
    /// English rendering of `local_input`
    pub translated_input: String,
}

impl ProductDraft {
    /// Draft with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a draft from raw form text, coercing price and quantity.
    #[must_use]
    pub fn from_form(form: ProductForm) -> Self {
        Self {
            price: parse_price(&form.price),
            quantity: parse_quantity(&form.quantity),
            name: form.name,
            description: form.description,
            category: form.category,
            local_input: form.local_input,
            translated_input: form.translated_input,
        }
    }
}

/// Raw text as entered in the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Category label, empty when uncategorized
    pub category: String,
    /// Unit price as typed
    pub price: String,
    /// Stock as typed
    pub quantity: String,
    /// Text as spoken or typed, in the original language
    pub local_input: String,
    /// English rendering of `local_input`
    pub translated_input: String,
}

/// Partial update. `None` leaves a field as it is.
///
/// Identity, creation time and the offline/synced flags are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New unit price
    pub price: Option<f64>,
    /// New stock level
    pub quantity: Option<u32>,
    /// New original-language text
    pub local_input: Option<String>,
    /// New English rendering
    pub translated_input: Option<String>,
}

impl ProductPatch {
    /// True when the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.local_input.is_none()
            && self.translated_input.is_none()
    }

    /// Overwrites the fields of `product` that this patch sets.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(local_input) = self.local_input {
            product.local_input = local_input;
        }
        if let Some(translated_input) = self.translated_input {
            product.translated_input = translated_input;
        }
    }
}

/// A full draft as a patch: every editable field is overwritten.
impl From<ProductDraft> for ProductPatch {
    fn from(draft: ProductDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            category: Some(draft.category),
            price: Some(draft.price),
            quantity: Some(draft.quantity),
            local_input: Some(draft.local_input),
            translated_input: Some(draft.translated_input),
        }
    }
}

/// Length of the longest prefix of `s` that looks like a decimal number
/// (sign, digits, fraction, exponent).
fn numeric_prefix_len(s: &str, allow_fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if !allow_fraction {
        return if digits == 0 { 0 } else { end };
    }
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    end
}

/// Parses a price the way a lenient form field would: the leading number of the
/// trimmed text. Unparsable, negative or non-finite input yields 0.
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed, true);
    sanitize_price(trimmed[..len].parse::<f64>().unwrap_or(0.0))
}

/// Parses a quantity from the leading integer of the trimmed text. Unparsable or
/// negative input yields 0; values beyond `u32::MAX` saturate.
#[must_use]
pub fn parse_quantity(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed, false);
    let digits = &trimmed[..len];
    if digits.starts_with('-') {
        return 0;
    }
    let digits = digits.trim_start_matches('+');
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantity_from_f64(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => sanitize_price(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => parse_price(&s),
        _ => 0.0,
    })
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => quantity_from_f64(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => parse_quantity(&s),
        _ => 0,
    })
}
