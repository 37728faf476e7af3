// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use time::Duration;
use url::Url;
// self
use paypal_rest::{
	ApiClient, ApiRequest,
	auth::Credentials,
	endpoint::ApiEndpoint,
	error::{AuthenticationError, Error, TransportError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse},
	},
	obs::CallKind,
};

#[derive(Debug)]
enum FakeTransportError {
	Throttled,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Throttled => write!(f, "Transport throttled."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Copy)]
struct FakeHttpClient {
	retry_after: Duration,
}
impl HttpTransport for FakeHttpClient {
	type Handle = FakeHttpHandle;
	type TransportError = FakeTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		FakeHttpHandle { slot, retry_after: self.retry_after }
	}
}

struct FakeHttpHandle {
	slot: ResponseMetadataSlot,
	retry_after: Duration,
}
impl<'a> AsyncHttpClient<'a> for FakeHttpHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, _request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let retry_after = self.retry_after;

		Box::pin(async move {
			assert!(
				slot.take().is_none(),
				"ResponseMetadataSlot must be clear before dispatching a request."
			);
			slot.store(ResponseMetadata { status: Some(429), retry_after: Some(retry_after) });

			Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Throttled)))
		})
	}
}

#[derive(Default)]
struct RecordingTransportErrorMapper {
	observed: Mutex<Vec<(CallKind, Option<ResponseMetadata>)>>,
}
impl RecordingTransportErrorMapper {
	fn observed(&self) -> Vec<(CallKind, Option<ResponseMetadata>)> {
		self.observed.lock().clone()
	}
}
impl TransportErrorMapper<FakeTransportError> for RecordingTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<FakeTransportError>,
	) -> TransportError {
		self.observed.lock().push((call, meta.cloned()));

		match err {
			HttpClientError::Reqwest(inner) => TransportError::network(call, *inner),
			HttpClientError::Other(message) => TransportError::Other { call, message },
			other => TransportError::Other { call, message: format!("{other:?}") },
		}
	}
}

fn build_client(
	retry_after: Duration,
) -> (ApiClient<FakeHttpClient, RecordingTransportErrorMapper>, Arc<RecordingTransportErrorMapper>)
{
	let mapper = Arc::new(RecordingTransportErrorMapper::default());
	let endpoint = ApiEndpoint::custom(
		Url::parse("https://paypal.mock.example").expect("Failed to parse mock base URL."),
	)
	.expect("Failed to accept mock base URL.");
	let client = ApiClient::with_http_client(
		Credentials::new("throttled-client", "throttled-secret"),
		endpoint,
		FakeHttpClient { retry_after },
		Arc::clone(&mapper),
	)
	.expect("Failed to build client over the fake transport.");

	(client, mapper)
}

#[tokio::test]
async fn exchange_failures_reach_the_mapper_with_metadata() {
	let (client, mapper) = build_client(Duration::seconds(30));
	let err = client
		.ensure_valid_token()
		.await
		.expect_err("Exchange should fail over the throttled transport.");

	match err {
		Error::Authentication(AuthenticationError::Transport(transport)) => {
			assert_eq!(transport.call(), CallKind::TokenExchange);
			assert!(matches!(transport, TransportError::Network { .. }));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let observed = mapper.observed();

	assert_eq!(observed.len(), 1, "Mapper must record a single exchange.");

	let (call, meta) = observed[0].clone();
	let meta = meta.expect("Response metadata should be recorded.");

	assert_eq!(call, CallKind::TokenExchange);
	assert_eq!(meta.status, Some(429));
	assert_eq!(meta.retry_after, Some(Duration::seconds(30)));
}

#[tokio::test]
async fn dispatch_failures_are_tagged_as_api_requests() {
	let (client, mapper) = build_client(Duration::seconds(5));
	let err = client
		.send::<serde_json::Value>(ApiRequest::get("/v1/status").without_auth())
		.await
		.expect_err("Request should fail over the throttled transport.");

	match err {
		Error::Transport(transport) => assert_eq!(transport.call(), CallKind::ApiRequest),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	let observed = mapper.observed();

	assert_eq!(observed.len(), 1);
	assert_eq!(observed[0].0, CallKind::ApiRequest);
	assert_eq!(
		observed[0].1.as_ref().and_then(|meta| meta.retry_after),
		Some(Duration::seconds(5))
	);
}
