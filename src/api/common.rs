//! Records shared by several resources: money amounts, addresses, and HATEOAS links.

// self
use crate::_prelude::*;

/// Transaction amount in the payments API (`total` in the currency's decimal notation).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
	/// ISO 4217 currency code.
	pub currency: String,
	/// Total amount as a decimal string (e.g. `"7.47"`).
	pub total: String,
}
impl Amount {
	/// Creates an amount.
	pub fn new(currency: impl Into<String>, total: impl Into<String>) -> Self {
		Self { currency: currency.into(), total: total.into() }
	}
}

/// Amount in the payouts and billing APIs (`value` instead of `total`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPayout {
	/// ISO 4217 currency code.
	pub currency: String,
	/// Amount as a decimal string.
	pub value: String,
}
impl AmountPayout {
	/// Creates an amount.
	pub fn new(currency: impl Into<String>, value: impl Into<String>) -> Self {
		Self { currency: currency.into(), value: value.into() }
	}
}

/// Currency value where both parts may be omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
	/// ISO 4217 currency code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<String>,
	/// Amount as a decimal string.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
}

/// Postal address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
	/// First address line.
	pub line1: String,
	/// Second address line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line2: Option<String>,
	/// City name.
	pub city: String,
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
	/// Postal code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<String>,
	/// State or province.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Phone number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}

/// Shipping address with recipient details.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
	/// Name of the recipient.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub recipient_name: Option<String>,
	/// Address kind (e.g. `residential`).
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// First address line.
	pub line1: String,
	/// Second address line.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub line2: Option<String>,
	/// City name.
	pub city: String,
	/// ISO 3166-1 alpha-2 country code.
	pub country_code: String,
	/// Postal code.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<String>,
	/// State or province.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Phone number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}

/// HATEOAS link returned with most resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
	/// Target URL.
	pub href: String,
	/// Relation (e.g. `approval_url`, `self`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub rel: Option<String>,
	/// HTTP method to use with the link.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub method: Option<String>,
	/// Encoding type of the link target.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enctype: Option<String>,
}

/// Finds the first link with relation `rel`.
pub fn find_link<'a>(links: &'a [Link], rel: &str) -> Option<&'a Link> {
	links.iter().find(|link| link.rel.as_deref() == Some(rel))
}
