//! Demonstrates plugging an in-memory transport and mapper into the client.
//!
//! 1. Implement [`HttpTransport`] so every handle records [`ResponseMetadata`] through the
//!    provided [`ResponseMetadataSlot`].
//! 2. Provide a [`TransportErrorMapper`] that turns the transport's own error type into a
//!    [`TransportError`].
//! 3. Pass both to [`ApiClient::with_http_client`] and call the API as usual.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use paypal_rest::{
	ApiClient,
	auth::Credentials,
	endpoint::{ApiEndpoint, TOKEN_PATH},
	error::TransportError,
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	oauth::{
		TransportErrorMapper,
		oauth2::{
			AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
			http::{Response, StatusCode, header::CONTENT_TYPE},
		},
	},
	obs::CallKind,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let endpoint = ApiEndpoint::custom(Url::parse("https://paypal.internal.example")?)?;
	let credentials = Credentials::new("demo-client", "demo-secret");
	let client: ApiClient<MockHttpClient, MockTransportErrorMapper> = ApiClient::with_http_client(
		credentials.clone(),
		endpoint.clone(),
		MockHttpClient { behavior: MockBehavior::Success },
		MockTransportErrorMapper,
	)?;
	let payment = client.get_payment("PAY-DEMO").await?;

	println!(
		"Payment {} fetched through the mock transport is {}.",
		payment.id.as_deref().unwrap_or("<none>"),
		payment.state.as_deref().unwrap_or("<unknown>"),
	);

	let failing: ApiClient<MockHttpClient, MockTransportErrorMapper> =
		ApiClient::with_http_client(
			credentials,
			endpoint,
			MockHttpClient {
				behavior: MockBehavior::Fail(MockTransportError::DnsFailure {
					host: "paypal.internal.example",
				}),
			},
			MockTransportErrorMapper,
		)?;

	match failing.get_payment("PAY-DEMO").await {
		Ok(_) => println!("Mock transport unexpectedly succeeded."),
		Err(e) => println!("Transport error mapped by the client: {e}."),
	}

	Ok(())
}

#[derive(Clone, Debug)]
enum MockTransportError {
	DnsFailure { host: &'static str },
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::DnsFailure { host } => write!(f, "DNS lookup failed for {host}"),
		}
	}
}
impl StdError for MockTransportError {}

#[derive(Clone)]
enum MockBehavior {
	Success,
	Fail(MockTransportError),
}

struct MockHttpClient {
	behavior: MockBehavior,
}
impl HttpTransport for MockHttpClient {
	type Handle = MockHttpHandle;
	type TransportError = MockTransportError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		MockHttpHandle { slot, behavior: self.behavior.clone() }
	}
}

struct MockHttpHandle {
	slot: ResponseMetadataSlot,
	behavior: MockBehavior,
}
impl MockHttpHandle {
	fn answer(request: &HttpRequest) -> Result<HttpResponse, HttpClientError<MockTransportError>> {
		let body: &[u8] = if request.uri().path() == TOKEN_PATH {
			br#"{"access_token":"mock-access","token_type":"Bearer","expires_in":32400}"#
		} else {
			br#"{"id":"PAY-DEMO","intent":"sale","state":"approved","payer":{"payment_method":"paypal"},"transactions":[]}"#
		};

		Ok(Response::builder()
			.status(StatusCode::OK)
			.header(CONTENT_TYPE, "application/json")
			.body(body.to_vec())?)
	}
}
impl<'a> AsyncHttpClient<'a> for MockHttpHandle {
	type Error = HttpClientError<MockTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let slot = self.slot.clone();
		let behavior = self.behavior.clone();

		Box::pin(async move {
			slot.take();

			match behavior {
				MockBehavior::Success => {
					let response = Self::answer(&request)?;

					slot.store(ResponseMetadata::from_response(&response));

					Ok(response)
				},
				// `HttpClientError::Reqwest` boxes any transport error despite its name.
				MockBehavior::Fail(error) => Err(HttpClientError::Reqwest(Box::new(error))),
			}
		})
	}
}

struct MockTransportErrorMapper;
impl TransportErrorMapper<MockTransportError> for MockTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<MockTransportError>,
	) -> TransportError {
		match error {
			HttpClientError::Reqwest(inner) => TransportError::network(call, *inner),
			HttpClientError::Other(message) => TransportError::Other { call, message },
			_ => TransportError::Other {
				call,
				message: format!(
					"mock transport failure after status {:?}",
					metadata.and_then(|meta| meta.status)
				),
			},
		}
	}
}
