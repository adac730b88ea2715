//! Inventory assets and the monetary value they carry.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use super::validation::{FieldErrors, MAX_TEXT_LEN};
use super::{AssetId, EmployeeId};

/// Asset value in centavos.
///
/// Values are accepted as decimal text or JSON numbers with at most two
/// fractional digits and must lie within `0..=9_999_999.99`. They serialise
/// as fixed two-decimal strings so no precision is lost in transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, ToSchema)]
#[schema(value_type = String, example = "15250.00")]
pub struct AssetValue(i64);

/// Reasons a submitted value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AssetValueError {
    #[error("value must be a number with at most two decimal places")]
    NotNumeric,
    #[error("value must be between 0 and 9999999.99")]
    OutOfRange,
}

impl AssetValueError {
    /// Stable machine-readable reason.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotNumeric => "not_numeric",
            Self::OutOfRange => "out_of_range",
        }
    }
}

impl AssetValue {
    /// Largest accepted value, in centavos.
    pub const MAX_CENTS: i64 = 999_999_999;

    /// Wrap a stored amount in centavos.
    pub fn from_cents(cents: i64) -> Result<Self, AssetValueError> {
        if (0..=Self::MAX_CENTS).contains(&cents) {
            Ok(Self(cents))
        } else {
            Err(AssetValueError::OutOfRange)
        }
    }

    /// Amount in centavos.
    pub fn cents(self) -> i64 {
        self.0
    }

    /// Parse decimal text such as `1234`, `1234.5`, or `1234.50`.
    ///
    /// # Examples
    /// ```
    /// use office_admin::domain::AssetValue;
    ///
    /// assert_eq!(AssetValue::parse("1234.5").unwrap().cents(), 123_450);
    /// assert!(AssetValue::parse("10000000").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AssetValueError> {
        let trimmed = raw.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || !digits_only(whole)
            || !digits_only(fraction)
            || fraction.len() > 2
        {
            return Err(AssetValueError::NotNumeric);
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > 7 {
            return Err(AssetValueError::OutOfRange);
        }
        let pesos: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| AssetValueError::NotNumeric)?
        };
        let centavos: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| AssetValueError::NotNumeric)? * 10,
            _ => fraction.parse().map_err(|_| AssetValueError::NotNumeric)?,
        };
        let cents = pesos * 100 + centavos;
        if negative && cents > 0 {
            return Err(AssetValueError::OutOfRange);
        }
        Self::from_cents(cents)
    }
}

impl fmt::Display for AssetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for AssetValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decimal input accepted from clients as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DecimalInput {
    Number(serde_json::Number),
    Text(String),
}

impl DecimalInput {
    fn as_text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: AssetId,
    pub asset_tag: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value: AssetValue,
    pub condition: String,
    pub assigned_to: Option<EmployeeId>,
    pub status: String,
    pub property_no: Option<String>,
    pub serial_no: Option<String>,
    pub unit_qty: i32,
}

/// Asset with the display name of the employee holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    #[serde(flatten)]
    pub asset: Asset,
    pub assignee_name: Option<String>,
}

/// Raw asset payload used for both creation and updates.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetForm {
    pub asset_tag: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<String>,
    #[schema(value_type = Option<String>, example = "15250.00")]
    pub value: Option<DecimalInput>,
    pub condition: Option<String>,
    pub assigned_to: Option<i64>,
    pub status: Option<String>,
    pub property_no: Option<String>,
    pub serial_no: Option<String>,
    pub unit_qty: Option<i32>,
}

/// Asset columns after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDraft {
    pub asset_tag: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub purchase_date: NaiveDate,
    pub value: AssetValue,
    pub condition: String,
    pub assigned_to: Option<EmployeeId>,
    pub status: String,
    pub property_no: Option<String>,
    pub serial_no: Option<String>,
    pub unit_qty: i32,
}

impl AssetForm {
    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<AssetDraft, FieldErrors> {
        let mut errors = FieldErrors::new();
        let asset_tag = errors.required("assetTag", self.asset_tag.as_deref(), MAX_TEXT_LEN);
        let name = errors.required("name", self.name.as_deref(), MAX_TEXT_LEN);
        let category = errors.required("category", self.category.as_deref(), MAX_TEXT_LEN);
        let location = errors.required("location", self.location.as_deref(), MAX_TEXT_LEN);
        let purchase_date = errors.required_date("purchaseDate", self.purchase_date.as_deref());
        let value = match &self.value {
            None => {
                errors.push("value", "required", "value is required");
                None
            }
            Some(input) => AssetValue::parse(&input.as_text())
                .map_err(|err| errors.push("value", err.code(), err.to_string()))
                .ok(),
        };
        let condition = errors.required("condition", self.condition.as_deref(), MAX_TEXT_LEN);
        let status = errors.required("status", self.status.as_deref(), MAX_TEXT_LEN);
        let property_no = errors.optional("propertyNo", self.property_no.as_deref(), MAX_TEXT_LEN);
        let serial_no = errors.optional("serialNo", self.serial_no.as_deref(), MAX_TEXT_LEN);
        let unit_qty = self.unit_qty.unwrap_or(1);
        if unit_qty < 0 {
            errors.push("unitQty", "negative", "unitQty must not be negative");
        }

        let (Some(purchase_date), Some(value)) = (purchase_date, value) else {
            return Err(errors);
        };
        errors.finish(AssetDraft {
            asset_tag,
            name,
            category,
            location,
            purchase_date,
            value,
            condition,
            assigned_to: self.assigned_to.map(EmployeeId::new),
            status,
            property_no,
            serial_no,
            unit_qty,
        })
    }
}
