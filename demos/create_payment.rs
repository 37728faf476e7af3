//! Demonstrates creating and executing a PayPal wallet payment with the default reqwest
//! transport, against a local mock of the sandbox.

// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
use url::Url;
// self
use paypal_rest::{
	ApiClient,
	api::{Amount, Payer, Payment, RedirectUrls, Transaction, find_link},
	auth::Credentials,
	endpoint::{ApiEndpoint, TOKEN_PATH},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				r#"{"access_token":"demo-access","token_type":"Bearer","app_id":"APP-DEMO","expires_in":32400}"#,
			);
		})
		.await;
	let approval_url = server.url("/checkoutnow?token=EC-DEMO");

	server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments/payment");
			then.status(201).header("content-type", "application/json").body(format!(
				r#"{{"id":"PAY-DEMO","links":[{{"href":"{approval_url}","rel":"approval_url","method":"REDIRECT"}}]}}"#
			));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments/payment/PAY-DEMO/execute");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"id":"PAY-DEMO","state":"approved","links":[]}"#);
		})
		.await;

	let client = ApiClient::new(
		Credentials::new("demo-client", "demo-secret"),
		ApiEndpoint::custom(Url::parse(&server.base_url())?)?,
	)?;
	let payment = Payment {
		intent: "sale".into(),
		payer: Payer { payment_method: "paypal".into(), ..Default::default() },
		transactions: vec![Transaction {
			amount: Amount::new("USD", "7.47"),
			description: Some("Demo order".into()),
			..Default::default()
		}],
		redirect_urls: Some(RedirectUrls {
			return_url: Some("https://shop.example.com/return".into()),
			cancel_url: Some("https://shop.example.com/cancel".into()),
		}),
		..Default::default()
	};
	let created = client.create_payment(&payment).await?;
	let approval = find_link(&created.links, "approval_url")
		.ok_or_else(|| eyre!("payment {} has no approval link", created.id))?;

	println!("Send the payer to {}.", approval.href);

	let executed = client.execute_approved_payment(&created.id, "PAYER-DEMO").await?;

	println!("Payment {} is {}.", executed.id, executed.state);

	token_mock.assert_async().await;

	Ok(())
}
