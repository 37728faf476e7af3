mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use paypal_rest::{
	api::{
		Amount, AmountPayout, CreditCardsFilter, Payer, Payment, Payout, PayoutItem,
		SenderBatchHeader, Transaction, WebProfile, find_link,
	},
	error::{ConfigError, Error},
};

const JSON: &str = "application/json";

#[tokio::test]
async fn payment_lifecycle_hits_the_payment_paths() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments/payment").json_body(json!({
				"intent": "sale",
				"payer": { "payment_method": "paypal" },
				"transactions": [{ "amount": { "currency": "USD", "total": "7.47" } }]
			}));
			then.status(201).header("content-type", JSON).body(
				r#"{"id":"PAY-1","links":[{"href":"https://www.sandbox.paypal.com/cgi-bin/webscr?token=EC-1","rel":"approval_url","method":"REDIRECT"}]}"#,
			);
		})
		.await;
	let execute = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/payments/payment/PAY-1/execute")
				.json_body(json!({ "payer_id": "PAYER-9" }));
			then.status(200)
				.header("content-type", JSON)
				.body(r#"{"id":"PAY-1","state":"approved","links":[]}"#);
		})
		.await;
	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/payments/payment")
				.query_param("count", "10")
				.query_param("start_id", "PAY-0");
			then.status(200)
				.header("content-type", JSON)
				.body(r#"{"payments":[],"count":0}"#);
		})
		.await;
	let client = common::client(&server);
	let payment = Payment {
		intent: "sale".into(),
		payer: Payer { payment_method: "paypal".into(), ..Default::default() },
		transactions: vec![Transaction {
			amount: Amount::new("USD", "7.47"),
			..Default::default()
		}],
		..Default::default()
	};
	let created = client.create_payment(&payment).await.expect("Payment should be created.");
	let approval = find_link(&created.links, "approval_url").expect("Approval link should exist.");

	assert_eq!(created.id, "PAY-1");
	assert!(approval.href.contains("EC-1"));

	let executed = client
		.execute_approved_payment(&created.id, "PAYER-9")
		.await
		.expect("Approved payment should execute.");

	assert_eq!(executed.state, "approved");

	let page =
		client.list_payments(Some(10), Some("PAY-0")).await.expect("Payments should be listed.");

	assert!(page.payments.is_empty());
	assert_eq!(page.count, Some(0));

	create.assert_async().await;
	execute.assert_async().await;
	list.assert_async().await;
}

#[tokio::test]
async fn authorization_capture_sends_the_final_flag() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let capture = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments/authorization/AUTH-1/capture").json_body(json!({
				"amount": { "currency": "USD", "total": "4.54" },
				"is_final_capture": true
			}));
			then.status(201).header("content-type", JSON).body(
				r#"{"id":"CAP-1","state":"completed","parent_payment":"PAY-1","is_final_capture":true}"#,
			);
		})
		.await;
	let result = common::client(&server)
		.capture_authorization("AUTH-1", &Amount::new("USD", "4.54"), true)
		.await
		.expect("Capture should succeed.");

	assert_eq!(result.id.as_deref(), Some("CAP-1"));
	assert_eq!(result.state.as_deref(), Some("completed"));
	assert!(result.is_final_capture);

	capture.assert_async().await;
}

#[tokio::test]
async fn synchronous_payouts_add_the_sync_mode_flag() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let payout = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments/payouts").query_param("sync_mode", "true");
			then.status(201).header("content-type", JSON).body(
				r#"{"batch_header":{"payout_batch_id":"BATCH-1","batch_status":"SUCCESS"},"items":[{"payout_item_id":"ITEM-1","transaction_id":"TX-1","transaction_status":"SUCCESS","payout_item":{"recipient_type":"EMAIL","receiver":"one@example.com","amount":{"currency":"USD","value":"9.87"}}}]}"#,
			);
		})
		.await;
	let request = Payout {
		sender_batch_header: SenderBatchHeader { email_subject: "You have a payout".into() },
		items: vec![PayoutItem {
			recipient_type: "EMAIL".into(),
			receiver: "one@example.com".into(),
			amount: AmountPayout::new("USD", "9.87"),
			..Default::default()
		}],
	};
	let response = common::client(&server)
		.create_payout(&request, true)
		.await
		.expect("Payout should be submitted.");

	assert_eq!(response.batch_header.payout_batch_id.as_deref(), Some("BATCH-1"));
	assert_eq!(response.items.len(), 1);
	assert_eq!(response.items[0].payout_item.receiver, "one@example.com");

	payout.assert_async().await;
}

#[tokio::test]
async fn vault_listing_and_deletion() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let list = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/vault/credit-cards")
				.query_param("page", "2")
				.query_param("page_size", "5");
			then.status(200)
				.header("content-type", JSON)
				.body(r#"{"items":[],"total_items":6,"total_pages":2}"#);
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/v1/vault/credit-cards/CARD-1");
			then.status(204);
		})
		.await;
	let client = common::client(&server);
	let cards = client
		.list_credit_cards(&CreditCardsFilter { page_size: Some(5), page: Some(2) })
		.await
		.expect("Cards should be listed.");

	assert_eq!(cards.total_items, 6);
	assert!(cards.items.is_empty());

	client.delete_credit_card("CARD-1").await.expect("Card should be deleted.");

	list.assert_async().await;
	delete.assert_async().await;
}

#[tokio::test]
async fn billing_plan_activation_sends_a_replace_patch() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/v1/payments/billing-plans/P-1").json_body(json!([
				{ "op": "replace", "path": "/", "value": { "state": "ACTIVE" } }
			]));
			then.status(200);
		})
		.await;

	common::client(&server).activate_billing_plan("P-1").await.expect("Plan should activate.");

	patch.assert_async().await;
}

#[tokio::test]
async fn web_profile_creation_returns_the_assigned_id() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v1/payment-experience/web-profiles")
				.json_body(json!({ "name": "store-checkout" }));
			then.status(201).header("content-type", JSON).body(r#"{"id":"XP-1"}"#);
		})
		.await;
	let client = common::client(&server);
	let profile = WebProfile { name: "store-checkout".into(), ..Default::default() };
	let created = client.create_web_profile(&profile).await.expect("Profile should be created.");

	assert_eq!(created.id.as_deref(), Some("XP-1"));
	assert_eq!(created.name, "store-checkout");

	let err = client
		.set_web_profile(&profile)
		.await
		.expect_err("Updating a profile without an identifier should fail.");

	assert!(matches!(err, Error::Config(ConfigError::MissingField { field: "id" })));

	create.assert_async().await;
}

#[tokio::test]
async fn user_info_is_requested_with_the_schema() {
	let server = MockServer::start_async().await;

	common::mock_token(&server, "A21AAF", 3600).await;

	let info = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v1/identity/openidconnect/userinfo/")
				.query_param("schema", "openid");
			then.status(200).header("content-type", JSON).body(
				r#"{"user_id":"https://www.paypal.com/webapps/auth/identity/user/abc","name":"Jane Doe","given_name":"Jane","family_name":"Doe","email":"jane@example.com"}"#,
			);
		})
		.await;
	let user = common::client(&server)
		.get_user_info("openid")
		.await
		.expect("User info should be returned.");

	assert_eq!(user.email, "jane@example.com");

	info.assert_async().await;
}
