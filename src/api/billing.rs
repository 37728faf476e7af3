//! Billing plans and agreements for recurring payments.

// self
use crate::{
	_prelude::*,
	api::{Address, Amount, AmountPayout, Link, Payer},
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Billing plan template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
	/// Plan identifier. 128 characters max.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Plan name. 128 characters max.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Plan description. 128 characters max.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Plan kind: `FIXED` or `INFINITE`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Plan state: `CREATED`, `ACTIVE`, `INACTIVE`, or `DELETED`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Creation time as sent by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub create_time: Option<String>,
	/// Update time as sent by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub update_time: Option<String>,
	/// Trial and regular payment definitions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payment_definitions: Option<Vec<PaymentDefinition>>,
	/// Terms of the plan.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub terms: Option<Vec<Terms>>,
	/// Setup fee, redirect URLs, and failure handling.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub merchant_preferences: Option<MerchantPreferences>,
	/// Follow-up links.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
}

/// Charging schedule inside a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDefinition {
	/// Definition identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Definition name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Definition kind: `TRIAL` or `REGULAR`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Number of frequency units between charges.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub frequency_interval: Option<String>,
	/// Frequency unit: `DAY`, `WEEK`, `MONTH`, or `YEAR`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub frequency: Option<String>,
	/// Number of cycles.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cycles: Option<String>,
	/// Amount charged each cycle.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<AmountPayout>,
	/// Shipping and tax charges.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub charge_models: Option<Vec<ChargeModels>>,
}

/// Shipping or tax charge attached to a payment definition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeModels {
	/// Charge model identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Charge kind: `SHIPPING` or `TAX`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Charged amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount: Option<AmountPayout>,
}

/// Term of a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terms {
	/// Term identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Term kind: `MONTHLY`, `WEEKLY`, or `YEARLY`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	/// Maximum amount billed in the term.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_billing_amount: Option<Amount>,
	/// How many times money can be pulled during the term.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub occurrences: Option<String>,
	/// Amount range of the term.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub amount_range: Option<AmountPayout>,
	/// Whether the buyer may edit the amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub buyer_editable: Option<String>,
}

/// Merchant preferences of a plan or an agreement override.
///
/// PayPal assigns the identifier and fills defaults, so every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantPreferences {
	/// Preferences identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Setup fee charged when the agreement starts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub setup_fee: Option<AmountPayout>,
	/// Redirect URL on cancellation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cancel_url: Option<String>,
	/// Redirect URL on approval.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub return_url: Option<String>,
	/// Notification URL on agreement creation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub notify_url: Option<String>,
	/// Allowed failed attempts; `0` means unlimited.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_fail_attempts: Option<String>,
	/// Auto-bill the outstanding amount: `YES` or `NO`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub auto_bill_amount: Option<String>,
	/// Action when the initial payment fails: `CONTINUE` or `CANCEL`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub initial_fail_amount_action: Option<String>,
	/// Accepted payment type.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub accepted_payment_type: Option<String>,
	/// Character set.
	#[serde(rename = "charset", default, skip_serializing_if = "Option::is_none")]
	pub char_set: Option<String>,
}

/// Billing agreement between a payer and a plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
	/// Agreement identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Agreement state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// Agreement name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Agreement description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Start date in ISO 8601 (e.g. `2025-03-01T00:00:00Z`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub start_date: Option<String>,
	/// Billing progress.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub agreement_details: Option<AgreementDetails>,
	/// Enrolling payer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer: Option<Payer>,
	/// Shipping address, when it differs from the payer's default.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub shipping_address: Option<Address>,
	/// Preferences overriding the plan's.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub override_merchant_preferences: Option<MerchantPreferences>,
	/// Charge models overriding the plan's.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub override_charge_models: Option<Vec<OverrideChargeModel>>,
	/// Plan the agreement subscribes to; only `id` is needed on creation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub plan: Option<Plan>,
	/// Creation time as sent by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub create_time: Option<String>,
	/// Update time as sent by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub update_time: Option<String>,
	/// Payment token.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
	/// Follow-up links, including `approval_url` after creation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub links: Option<Vec<Link>>,
}

/// Billing progress of an agreement.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementDetails {
	/// Outstanding balance.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub outstanding_balance: Option<AmountPayout>,
	/// Cycles remaining.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cycles_remaining: Option<String>,
	/// Cycles completed.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cycles_completed: Option<String>,
	/// Next billing date.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_billing_date: Option<String>,
	/// Last payment date.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_payment_date: Option<String>,
	/// Last payment amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_payment_amount: Option<String>,
	/// Final payment date.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub final_payment_date: Option<String>,
	/// Failed payment count.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub failed_payment_count: Option<String>,
}

/// Per-agreement replacement of a plan charge model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideChargeModel {
	/// Charge model being overridden.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub charge_id: Option<String>,
	/// Replacement amount.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<AmountPayout>,
}

#[derive(Serialize)]
struct PatchOperation<T> {
	op: &'static str,
	path: &'static str,
	value: T,
}

#[derive(Serialize)]
struct PlanState {
	state: &'static str,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a billing plan in the `CREATED` state (`POST /v1/payments/billing-plans`).
	pub async fn create_billing_plan(&self, plan: &Plan) -> Result<Plan> {
		self.fetch(ApiRequest::post("/v1/payments/billing-plans").json(plan)?).await
	}

	/// Moves a plan to `ACTIVE` so agreements can use it
	/// (`PATCH /v1/payments/billing-plans/{id}`).
	pub async fn activate_billing_plan(&self, plan_id: &str) -> Result<()> {
		let patch =
			[PatchOperation { op: "replace", path: "/", value: PlanState { state: "ACTIVE" } }];
		let request =
			ApiRequest::patch(format!("/v1/payments/billing-plans/{plan_id}")).json(&patch)?;

		self.send_discarding(request).await
	}

	/// Creates an agreement and returns it with its `approval_url`
	/// (`POST /v1/payments/billing-agreements`).
	pub async fn create_billing_agreement(&self, agreement: &Agreement) -> Result<Agreement> {
		self.fetch(ApiRequest::post("/v1/payments/billing-agreements").json(agreement)?).await
	}

	/// Executes an agreement the payer approved
	/// (`POST /v1/payments/billing-agreements/{token}/agreement-execute`).
	pub async fn execute_approved_agreement(&self, token: &str) -> Result<Agreement> {
		self.fetch(ApiRequest::post(format!(
			"/v1/payments/billing-agreements/{token}/agreement-execute"
		)))
		.await
	}
}
