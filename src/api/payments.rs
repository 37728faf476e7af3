//! Payments: create, look up, list, and execute approved payments.

// self
use crate::{
	_prelude::*,
	api::{Amount, CreditCard, Link, Related, ShippingAddress},
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Payment resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
	/// Payment intent: `sale`, `authorize`, or `order`.
	pub intent: String,
	/// Source of the funds.
	pub payer: Payer,
	/// Transactions funded by the payment.
	pub transactions: Vec<Transaction>,
	/// Redirect targets for PayPal wallet payments.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_urls: Option<RedirectUrls>,
	/// Payment identifier assigned by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Payment state (e.g. `created`, `approved`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
	/// Web experience profile applied to the payment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub experience_profile_id: Option<String>,
}

/// Payer of a payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
	/// Payment method: `paypal` or `credit_card`.
	pub payment_method: String,
	/// Cards or card tokens funding the payment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub funding_instruments: Option<Vec<FundingInstrument>>,
	/// Payer details returned after approval.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer_info: Option<PayerInfo>,
	/// Payer status (e.g. `VERIFIED`).
	#[serde(rename = "payer_status", default, skip_serializing_if = "Option::is_none")]
	pub status: Option<String>,
}

/// Details of the payer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerInfo {
	/// Email address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// First name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Last name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// PayPal payer identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer_id: Option<String>,
	/// Phone number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Shipping address on file.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipping_address: Option<ShippingAddress>,
	/// Tax identifier kind.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tax_id_type: Option<String>,
	/// Tax identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tax_id: Option<String>,
}

/// Card or vaulted card funding a payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingInstrument {
	/// Raw card details.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub credit_card: Option<CreditCard>,
	/// Reference to a vaulted card.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub credit_card_token: Option<CreditCardToken>,
}

/// Reference to a card stored in the vault.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardToken {
	/// Vault identifier of the card.
	pub credit_card_id: String,
	/// Payer the card belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer_id: Option<String>,
	/// Last four digits.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last4: Option<String>,
	/// Expiry year.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expire_year: Option<String>,
	/// Expiry month.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expire_month: Option<String>,
}

/// One purchase inside a payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
	/// Amount charged.
	pub amount: Amount,
	/// Description shown to the payer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Purchased items.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub item_list: Option<ItemList>,
	/// Merchant invoice number.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub invoice_number: Option<String>,
	/// Free-form merchant value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom: Option<String>,
	/// Descriptor on the payer's statement.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub soft_descriptor: Option<String>,
	/// Sales, authorizations, orders, captures, and refunds tied to the transaction.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub related_resources: Option<Vec<Related>>,
}

/// Items plus the shipping address of a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
	/// Purchased items.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub items: Option<Vec<Item>>,
	/// Where the items ship.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipping_address: Option<ShippingAddress>,
}

/// Purchased item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
	/// Number of units.
	pub quantity: u32,
	/// Item name.
	pub name: String,
	/// Unit price as a decimal string.
	pub price: String,
	/// ISO 4217 currency code.
	pub currency: String,
	/// Stock keeping unit.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sku: Option<String>,
	/// Item description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Tax per unit.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub tax: Option<String>,
}

/// Redirect targets after approval or cancellation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
	/// Where PayPal sends the payer after approval.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_url: Option<String>,
	/// Where PayPal sends the payer after cancellation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cancel_url: Option<String>,
}

/// Response of payment creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
	/// Payment identifier.
	pub id: String,
	/// Follow-up links, including `approval_url` for wallet payments.
	pub links: Vec<Link>,
}

/// Page of payments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentList {
	/// Payments on this page.
	#[serde(default)]
	pub payments: Vec<Payment>,
	/// Number of payments on this page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<u32>,
	/// Identifier to pass as `start_id` for the next page.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_id: Option<String>,
}

/// Response of payment execution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
	/// Payment identifier.
	pub id: String,
	/// Follow-up links.
	pub links: Vec<Link>,
	/// Payment state after execution.
	pub state: String,
	/// Executed transactions, including the related sale or authorization.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub transactions: Option<Vec<Transaction>>,
}

#[derive(Serialize)]
struct ExecutePayment<'a> {
	payer_id: &'a str,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a payment (`POST /v1/payments/payment`).
	pub async fn create_payment(&self, payment: &Payment) -> Result<PaymentResponse> {
		self.fetch(ApiRequest::post("/v1/payments/payment").json(payment)?).await
	}

	/// Looks up a payment (`GET /v1/payments/payment/{id}`).
	pub async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
		self.fetch(ApiRequest::get(format!("/v1/payments/payment/{payment_id}"))).await
	}

	/// Lists payments, newest first (`GET /v1/payments/payment`).
	pub async fn list_payments(
		&self,
		count: Option<u32>,
		start_id: Option<&str>,
	) -> Result<PaymentList> {
		let request = ApiRequest::get("/v1/payments/payment")
			.query_opt("count", count.map(|count| count.to_string()))
			.query_opt("start_id", start_id);

		self.fetch(request).await
	}

	/// Executes a payment the payer approved
	/// (`POST /v1/payments/payment/{id}/execute`).
	pub async fn execute_approved_payment(
		&self,
		payment_id: &str,
		payer_id: &str,
	) -> Result<ExecuteResponse> {
		let request = ApiRequest::post(format!("/v1/payments/payment/{payment_id}/execute"))
			.json(&ExecutePayment { payer_id })?;

		self.fetch(request).await
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn payment_round_trips_wire_keys_and_timestamps() {
		let body = r#"{
			"id": "PAY-123",
			"intent": "sale",
			"state": "approved",
			"create_time": "2025-03-01T12:00:00Z",
			"payer": { "payment_method": "paypal", "payer_status": "VERIFIED" },
			"transactions": [{ "amount": { "currency": "USD", "total": "7.47" } }]
		}"#;
		let payment: Payment = serde_json::from_str(body).expect("Payment should decode.");

		assert_eq!(payment.id.as_deref(), Some("PAY-123"));
		assert_eq!(payment.create_time, Some(macros::datetime!(2025-03-01 12:00 UTC)));
		assert_eq!(payment.payer.status.as_deref(), Some("VERIFIED"));
		assert_eq!(payment.transactions[0].amount, Amount::new("USD", "7.47"));

		let encoded = serde_json::to_value(&payment).expect("Payment should encode.");

		assert_eq!(encoded["create_time"], "2025-03-01T12:00:00Z");
		assert!(encoded.get("update_time").is_none());
		assert!(encoded.get("redirect_urls").is_none());
	}

	#[test]
	fn payment_without_payer_fails_closed() {
		let err = serde_json::from_str::<Payment>(r#"{"intent":"sale","transactions":[]}"#)
			.expect_err("Missing payer should be rejected.");

		assert!(err.to_string().contains("payer"));
	}
}
