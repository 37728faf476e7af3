//! OpenID Connect user info.

// self
use crate::{
	_prelude::*,
	api::Address,
	client::{ApiClient, ApiRequest},
	http::HttpTransport,
	oauth::TransportErrorMapper,
};

/// Profile of the PayPal user the token was issued for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
	/// Subject identifier.
	#[serde(rename = "user_id")]
	pub id: String,
	/// Full name.
	pub name: String,
	/// Given name.
	pub given_name: String,
	/// Family name.
	pub family_name: String,
	/// Email address.
	pub email: String,
	/// Whether the email is verified.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub verified: Option<bool>,
	/// Gender.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gender: Option<String>,
	/// Birth date.
	#[serde(rename = "birthdate", default, skip_serializing_if = "Option::is_none")]
	pub birth_date: Option<String>,
	/// Time zone.
	#[serde(rename = "zoneinfo", default, skip_serializing_if = "Option::is_none")]
	pub zone_info: Option<String>,
	/// Locale.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<String>,
	/// Phone number.
	#[serde(rename = "phone_number", default, skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Postal address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub address: Option<Address>,
	/// Whether the PayPal account is verified.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub verified_account: Option<bool>,
	/// Account kind (e.g. `PERSONAL`, `BUSINESS`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub account_type: Option<String>,
	/// Age range.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub age_range: Option<String>,
	/// PayPal payer identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payer_id: Option<String>,
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches user info for `schema` (e.g. `openid`)
	/// (`GET /v1/identity/openidconnect/userinfo/`).
	pub async fn get_user_info(&self, schema: &str) -> Result<UserInfo> {
		self.fetch(ApiRequest::get("/v1/identity/openidconnect/userinfo/").query("schema", schema))
			.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn renamed_claims_decode() {
		let info: UserInfo = serde_json::from_str(
			r#"{"user_id":"https://www.paypal.com/webapps/auth/identity/user/abc","name":"Jane Doe","given_name":"Jane","family_name":"Doe","email":"jane@example.com","zoneinfo":"America/Los_Angeles","phone_number":"+1 555","verified_account":true}"#,
		)
		.expect("User info should decode.");

		assert_eq!(info.given_name, "Jane");
		assert_eq!(info.zone_info.as_deref(), Some("America/Los_Angeles"));
		assert_eq!(info.phone.as_deref(), Some("+1 555"));
		assert_eq!(info.verified_account, Some(true));
		assert!(serde_json::from_str::<UserInfo>(r#"{"user_id":"x"}"#).is_err());
	}
}
