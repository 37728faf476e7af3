//! Payouts: batch transfers to PayPal accounts.

// self
use crate::{
	_prelude::*,
	api::{AmountPayout, Link},
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Payout batch request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
	/// Batch-level settings.
	pub sender_batch_header: SenderBatchHeader,
	/// Individual transfers.
	pub items: Vec<PayoutItem>,
}

/// Batch-level settings chosen by the sender.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderBatchHeader {
	/// Subject of the notification email sent to recipients.
	pub email_subject: String,
}

/// One transfer in a payout batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutItem {
	/// Receiver kind: `EMAIL`, `PHONE`, or `PAYPAL_ID`.
	pub recipient_type: String,
	/// Receiver address of the given kind.
	pub receiver: String,
	/// Transferred amount.
	pub amount: AmountPayout,
	/// Note shown to the receiver.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
	/// Sender-side identifier of the item.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sender_item_id: Option<String>,
}

/// Batch status returned by PayPal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchHeader {
	/// Total amount of the batch.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<AmountPayout>,
	/// Fees charged for the batch.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fees: Option<AmountPayout>,
	/// Batch identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payout_batch_id: Option<String>,
	/// Batch status (e.g. `PENDING`, `SUCCESS`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub batch_status: Option<String>,
	/// Creation time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub time_created: Option<OffsetDateTime>,
	/// Completion time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub time_completed: Option<OffsetDateTime>,
	/// Settings the batch was created with.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sender_batch_header: Option<SenderBatchHeader>,
}

/// Status of one payout item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutItemResponse {
	/// Item identifier.
	pub payout_item_id: String,
	/// Transaction identifier.
	pub transaction_id: String,
	/// Transaction status (e.g. `SUCCESS`, `UNCLAIMED`).
	pub transaction_status: String,
	/// Batch the item belongs to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payout_batch_id: Option<String>,
	/// Fee charged for the item.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payout_item_fee: Option<AmountPayout>,
	/// Transfer as submitted.
	pub payout_item: PayoutItem,
	/// Processing time.
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "time::serde::rfc3339::option"
	)]
	pub time_processed: Option<OffsetDateTime>,
	/// Follow-up links.
	#[serde(default)]
	pub links: Vec<Link>,
}

/// Batch status plus its items.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutResponse {
	/// Batch status.
	pub batch_header: BatchHeader,
	/// Item statuses; empty for asynchronous batches that are still pending.
	#[serde(default)]
	pub items: Vec<PayoutItemResponse>,
	/// Follow-up links.
	#[serde(default)]
	pub links: Vec<Link>,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Submits a payout batch (`POST /v1/payments/payouts`).
	///
	/// With `sync_mode` the response carries the item results of a single-item batch.
	pub async fn create_payout(&self, payout: &Payout, sync_mode: bool) -> Result<PayoutResponse> {
		let mut request = ApiRequest::post("/v1/payments/payouts").json(payout)?;

		if sync_mode {
			request = request.query("sync_mode", "true");
		}

		self.fetch(request).await
	}

	/// Looks up a payout batch (`GET /v1/payments/payouts/{id}`).
	pub async fn get_payout(&self, payout_batch_id: &str) -> Result<PayoutResponse> {
		self.fetch(ApiRequest::get(format!("/v1/payments/payouts/{payout_batch_id}"))).await
	}

	/// Looks up one payout item (`GET /v1/payments/payouts-item/{id}`).
	pub async fn get_payout_item(&self, payout_item_id: &str) -> Result<PayoutItemResponse> {
		self.fetch(ApiRequest::get(format!("/v1/payments/payouts-item/{payout_item_id}"))).await
	}

	/// Cancels an unclaimed payout item (`POST /v1/payments/payouts-item/{id}/cancel`).
	pub async fn cancel_payout_item(&self, payout_item_id: &str) -> Result<PayoutItemResponse> {
		self.fetch(ApiRequest::post(format!("/v1/payments/payouts-item/{payout_item_id}/cancel")))
			.await
	}
}
