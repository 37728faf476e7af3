#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
// self
use paypal_rest::{
	ApiClient, auth::Credentials, client::ReqwestApiClient, endpoint::ApiEndpoint, url::Url,
};

pub const CLIENT_ID: &str = "client";
pub const CLIENT_SECRET: &str = "secret";
pub const BASIC_AUTH: &str = "Basic Y2xpZW50OnNlY3JldA==";
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

pub fn endpoint(server: &MockServer) -> ApiEndpoint {
	let base = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	ApiEndpoint::custom(base).expect("Loopback mock base should be accepted.")
}

pub fn client(server: &MockServer) -> ReqwestApiClient {
	ApiClient::new(Credentials::new(CLIENT_ID, CLIENT_SECRET), endpoint(server))
		.expect("Client should build against the mock server.")
}

pub fn token_body(access_token: &str, expires_in: i64) -> String {
	format!(
		r#"{{"scope":"https://uri.paypal.com/services/payments/payment","access_token":"{access_token}","token_type":"Bearer","app_id":"APP-80W284485P519543T","expires_in":{expires_in}}}"#
	)
}

pub async fn mock_token<'a>(server: &'a MockServer, access_token: &str, expires_in: i64) -> Mock<'a> {
	let body = token_body(access_token, expires_in);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.header("authorization", BASIC_AUTH)
				.body("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}
