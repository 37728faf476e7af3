//! Payment experience web profiles: branding, input fields, and flow of redirect payments.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	error::ConfigError,
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Web experience profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebProfile {
	/// Profile identifier assigned by PayPal.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Profile name, unique per merchant.
	pub name: String,
	/// Branding shown on the PayPal pages.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub presentation: Option<Presentation>,
	/// Fields shown to the payer.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub input_fields: Option<InputFields>,
	/// Landing page and post-approval behavior.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub flow_config: Option<FlowConfig>,
}

/// Branding and locale.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
	/// Brand name shown instead of the business name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub brand_name: Option<String>,
	/// HTTPS URL of the logo.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logo_image: Option<String>,
	/// Locale of the pages (e.g. `US`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale_code: Option<String>,
}

/// Input fields of the redirect pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFields {
	/// Whether the payer may leave a note.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub allow_note: Option<bool>,
	/// Shipping field mode; see the `NO_SHIPPING_*` constants.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub no_shipping: Option<u32>,
	/// Address source; see the `ADDRESS_OVERRIDE_*` constants.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address_override: Option<u32>,
}
impl InputFields {
	/// Display the shipping address fields.
	pub const NO_SHIPPING_DISPLAY: u32 = 0;
	/// Hide the shipping address fields.
	pub const NO_SHIPPING_HIDE: u32 = 1;
	/// Use the shipping address from the buyer's account.
	pub const NO_SHIPPING_BUYER_ACCOUNT: u32 = 2;
	/// Use the address on file with PayPal.
	pub const ADDRESS_OVERRIDE_FROM_FILE: u32 = 0;
	/// Use the address supplied in the call.
	pub const ADDRESS_OVERRIDE_FROM_CALL: u32 = 1;
}

/// Flow of the redirect pages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
	/// Landing page; see the `LANDING_PAGE_*` constants.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub landing_page_type: Option<String>,
	/// Redirect URL for pending bank transactions.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bank_txn_pending_url: Option<String>,
	/// Button label after approval (e.g. `commit`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_action: Option<String>,
}
impl FlowConfig {
	/// Land on the guest checkout page.
	pub const LANDING_PAGE_BILLING: &'static str = "Billing";
	/// Land on the PayPal login page.
	pub const LANDING_PAGE_LOGIN: &'static str = "Login";
}

#[derive(Deserialize)]
struct CreatedProfile {
	id: String,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a profile and returns it with the assigned identifier
	/// (`POST /v1/payment-experience/web-profiles`).
	pub async fn create_web_profile(&self, profile: &WebProfile) -> Result<WebProfile> {
		let created: CreatedProfile = self
			.fetch(ApiRequest::post("/v1/payment-experience/web-profiles").json(profile)?)
			.await?;

		Ok(WebProfile { id: Some(created.id), ..profile.clone() })
	}

	/// Looks up a profile (`GET /v1/payment-experience/web-profiles/{id}`).
	pub async fn get_web_profile(&self, profile_id: &str) -> Result<WebProfile> {
		self.fetch(ApiRequest::get(format!("/v1/payment-experience/web-profiles/{profile_id}")))
			.await
	}

	/// Lists all profiles of the merchant (`GET /v1/payment-experience/web-profiles`).
	pub async fn list_web_profiles(&self) -> Result<Vec<WebProfile>> {
		self.fetch(ApiRequest::get("/v1/payment-experience/web-profiles")).await
	}

	/// Replaces a profile (`PUT /v1/payment-experience/web-profiles/{id}`).
	///
	/// The profile must carry its identifier.
	pub async fn set_web_profile(&self, profile: &WebProfile) -> Result<()> {
		let id = profile.id.as_deref().ok_or(ConfigError::MissingField { field: "id" })?;
		let request =
			ApiRequest::put(format!("/v1/payment-experience/web-profiles/{id}")).json(profile)?;

		self.send_discarding(request).await
	}

	/// Deletes a profile (`DELETE /v1/payment-experience/web-profiles/{id}`).
	pub async fn delete_web_profile(&self, profile_id: &str) -> Result<()> {
		self.send_discarding(ApiRequest::delete(format!(
			"/v1/payment-experience/web-profiles/{profile_id}"
		)))
		.await
	}
}
