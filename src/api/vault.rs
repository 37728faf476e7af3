//! Credit card vault.

// self
use crate::{
	_prelude::*,
	api::{Address, Link},
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Card stored in, or submitted to, the vault.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditCard {
	/// Vault identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Payer that owns the card.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer_id: Option<String>,
	/// Card number; masked in responses.
	pub number: String,
	/// Card brand (e.g. `visa`).
	#[serde(rename = "type")]
	pub kind: String,
	/// Expiry month.
	pub expire_month: String,
	/// Expiry year.
	pub expire_year: String,
	/// Card verification value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cvv2: Option<String>,
	/// Card holder first name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Card holder last name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Billing address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub billing_address: Option<Address>,
	/// Vault state (e.g. `ok`, `expired`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Instant until which the vault keeps the card.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub valid_until: Option<String>,
}
impl Debug for CreditCard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let last4 = self.number.get(self.number.len().saturating_sub(4)..).unwrap_or_default();

		f.debug_struct("CreditCard")
			.field("id", &self.id)
			.field("payer_id", &self.payer_id)
			.field("number", &format_args!("****{last4}"))
			.field("kind", &self.kind)
			.field("expire_month", &self.expire_month)
			.field("expire_year", &self.expire_year)
			.field("cvv2", &self.cvv2.as_ref().map(|_| "<redacted>"))
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

/// Page of vaulted cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCards {
	/// Cards on this page.
	#[serde(default)]
	pub items: Vec<CreditCard>,
	/// Paging links.
	#[serde(default)]
	pub links: Vec<Link>,
	/// Total number of cards.
	pub total_items: u32,
	/// Total number of pages.
	pub total_pages: u32,
}

/// Paging filter for [`ApiClient::list_credit_cards`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreditCardsFilter {
	/// Cards per page.
	pub page_size: Option<u32>,
	/// One-based page number.
	pub page: Option<u32>,
}

/// JSON patch operation on a vaulted card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardField {
	/// Operation (e.g. `replace`, `add`, `remove`).
	#[serde(rename = "op")]
	pub operation: String,
	/// JSON pointer to the field (e.g. `/billing_address/line1`).
	pub path: String,
	/// New value.
	pub value: String,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Stores a card in the vault (`POST /v1/vault/credit-cards`).
	pub async fn store_credit_card(&self, card: &CreditCard) -> Result<CreditCard> {
		self.fetch(ApiRequest::post("/v1/vault/credit-cards").json(card)?).await
	}

	/// Looks up a vaulted card (`GET /v1/vault/credit-cards/{id}`).
	pub async fn get_credit_card(&self, card_id: &str) -> Result<CreditCard> {
		self.fetch(ApiRequest::get(format!("/v1/vault/credit-cards/{card_id}"))).await
	}

	/// Lists vaulted cards (`GET /v1/vault/credit-cards`).
	pub async fn list_credit_cards(&self, filter: &CreditCardsFilter) -> Result<CreditCards> {
		let request = ApiRequest::get("/v1/vault/credit-cards")
			.query_opt("page", filter.page.map(|page| page.to_string()))
			.query_opt("page_size", filter.page_size.map(|size| size.to_string()));

		self.fetch(request).await
	}

	/// Applies JSON patch operations to a vaulted card
	/// (`PATCH /v1/vault/credit-cards/{id}`).
	pub async fn patch_credit_card(
		&self,
		card_id: &str,
		fields: &[CreditCardField],
	) -> Result<CreditCard> {
		self.fetch(ApiRequest::patch(format!("/v1/vault/credit-cards/{card_id}")).json(fields)?)
			.await
	}

	/// Deletes a vaulted card (`DELETE /v1/vault/credit-cards/{id}`).
	pub async fn delete_credit_card(&self, card_id: &str) -> Result<()> {
		self.send_discarding(ApiRequest::delete(format!("/v1/vault/credit-cards/{card_id}"))).await
	}
}
