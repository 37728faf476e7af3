//! Sales, authorizations, captures, orders, and refunds created by payments.

// self
use crate::{
	_prelude::*,
	api::{Amount, Link},
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Completed sale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
	/// Sale identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Amount collected.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Sale description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Sale state (e.g. `completed`, `refunded`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Payment the sale belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_payment: Option<String>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
	/// Payment mode (e.g. `INSTANT_TRANSFER`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_mode: Option<String>,
	/// Reason a sale is pending.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pending_reason: Option<String>,
	/// Reason code for reversals and holds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub reason_code: Option<String>,
	/// Expected clearing time for eCheck sales.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub clearing_time: Option<String>,
	/// Seller protection eligibility.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protection_eligibility: Option<String>,
	/// Kind of seller protection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protection_eligibility_type: Option<String>,
	/// Follow-up links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
}

/// Authorization of funds to capture later.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
	/// Authorized amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
	/// Authorization state (e.g. `authorized`, `voided`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Payment the authorization belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_payment: Option<String>,
	/// Authorization identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Instant after which the authorization can no longer be captured.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub valid_until: Option<OffsetDateTime>,
	/// Follow-up links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
	/// Expected clearing time for eCheck payments.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub clearing_time: Option<String>,
	/// Seller protection eligibility.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protection_eligibility: Option<String>,
	/// Kind of seller protection.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protection_eligibility_type: Option<String>,
}

/// Capture of an authorization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
	/// Captured amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Whether this capture releases the rest of the authorization.
	pub is_final_capture: bool,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
	/// Capture state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Payment the capture belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_payment: Option<String>,
	/// Capture identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Follow-up links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
}

/// Order created by an `order` intent payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
	/// Order identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
	/// Order state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Ordered amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Reason the order is pending.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pending_reason: Option<String>,
	/// Payment the order belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_payment: Option<String>,
	/// Follow-up links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
}

/// Refund of a sale or capture.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
	/// Refund identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Refunded amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<Amount>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub create_time: Option<OffsetDateTime>,
	/// Refund state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Capture the refund applies to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub capture_id: Option<String>,
	/// Payment the refund belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent_payment: Option<String>,
	/// Last update time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub update_time: Option<OffsetDateTime>,
}

/// One related resource of a transaction; exactly one field is normally set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Related {
	/// Related sale.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sale: Option<Sale>,
	/// Related authorization.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authorization: Option<Authorization>,
	/// Related order.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub order: Option<Order>,
	/// Related capture.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub capture: Option<Capture>,
	/// Related refund.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refund: Option<Refund>,
}

#[derive(Serialize)]
struct RefundRequest<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	amount: Option<&'a Amount>,
}

#[derive(Serialize)]
struct CaptureRequest<'a> {
	amount: &'a Amount,
	is_final_capture: bool,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Looks up a sale (`GET /v1/payments/sale/{id}`).
	pub async fn get_sale(&self, sale_id: &str) -> Result<Sale> {
		self.fetch(ApiRequest::get(format!("/v1/payments/sale/{sale_id}"))).await
	}

	/// Refunds a sale in full, or partially when `amount` is given
	/// (`POST /v1/payments/sale/{id}/refund`).
	pub async fn refund_sale(&self, sale_id: &str, amount: Option<&Amount>) -> Result<Refund> {
		let request = ApiRequest::post(format!("/v1/payments/sale/{sale_id}/refund"))
			.json(&RefundRequest { amount })?;

		self.fetch(request).await
	}

	/// Looks up an authorization (`GET /v1/payments/authorization/{id}`).
	pub async fn get_authorization(&self, authorization_id: &str) -> Result<Authorization> {
		self.fetch(ApiRequest::get(format!("/v1/payments/authorization/{authorization_id}"))).await
	}

	/// Captures authorized funds (`POST /v1/payments/authorization/{id}/capture`).
	pub async fn capture_authorization(
		&self,
		authorization_id: &str,
		amount: &Amount,
		is_final_capture: bool,
	) -> Result<Capture> {
		let request =
			ApiRequest::post(format!("/v1/payments/authorization/{authorization_id}/capture"))
				.json(&CaptureRequest { amount, is_final_capture })?;

		self.fetch(request).await
	}

	/// Voids an authorization (`POST /v1/payments/authorization/{id}/void`).
	pub async fn void_authorization(&self, authorization_id: &str) -> Result<Authorization> {
		self.fetch(ApiRequest::post(format!("/v1/payments/authorization/{authorization_id}/void")))
			.await
	}

	/// Looks up a refund (`GET /v1/payments/refund/{id}`).
	pub async fn get_refund(&self, refund_id: &str) -> Result<Refund> {
		self.fetch(ApiRequest::get(format!("/v1/payments/refund/{refund_id}"))).await
	}
}
