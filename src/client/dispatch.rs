//! Request dispatch: token attachment, transport call, and uniform response classification.

// crates.io
use oauth2::{
	AsyncHttpClient, HttpRequest,
	http::{
		HeaderValue, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use serde::de::IgnoredAny;
// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	error::{ApiError, ConfigError, DecodeError},
	http::{self, HttpTransport, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

const JSON: &str = "application/json";

struct SuccessResponse {
	status: StatusCode,
	body: Vec<u8>,
}
impl SuccessResponse {
	fn is_empty(&self) -> bool {
		self.body.iter().all(u8::is_ascii_whitespace)
	}

	fn decode<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| DecodeError::Json { source, status: self.status.as_u16() }.into())
	}

	fn decode_optional<T>(self) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		if self.is_empty() {
			return Ok(None);
		}

		self.decode().map(Some)
	}

	fn decode_required<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		if self.is_empty() {
			return Err(DecodeError::EmptyBody { status: self.status.as_u16() }.into());
		}

		self.decode()
	}
}

impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request` and decodes the JSON response into `T`.
	///
	/// A success status with an empty body yields `Ok(None)`. Non-success statuses become
	/// [`Error::Api`]; a success body that does not match `T` becomes [`Error::Decode`].
	/// Nothing is retried, including `401` responses.
	pub async fn send<T>(&self, request: ApiRequest) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		self.dispatch(request, "send", SuccessResponse::decode_optional).await
	}

	/// Same as [`ApiClient::send`], but always attaches a bearer token.
	pub async fn send_with_auth<T>(&self, request: ApiRequest) -> Result<Option<T>>
	where
		T: DeserializeOwned,
	{
		self.dispatch(request.with_auth(), "send_with_auth", SuccessResponse::decode_optional)
			.await
	}

	/// Sends `request` against an endpoint that always returns a body.
	pub(crate) async fn fetch<T>(&self, request: ApiRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.dispatch(request, "fetch", SuccessResponse::decode_required).await
	}

	/// Sends `request` and discards any response body.
	pub(crate) async fn send_discarding(&self, request: ApiRequest) -> Result<()> {
		self.dispatch(request, "send_discarding", |response| {
			response.decode_optional::<IgnoredAny>().map(|_| ())
		})
		.await
	}

	async fn dispatch<T>(
		&self,
		request: ApiRequest,
		stage: &'static str,
		decode: fn(SuccessResponse) -> Result<T>,
	) -> Result<T> {
		const KIND: CallKind = CallKind::ApiRequest;

		let span = CallSpan::new(KIND, stage);
		let recorder = span.clone();

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move { decode(self.execute(request, &recorder).await?) })
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn execute(&self, request: ApiRequest, span: &CallSpan) -> Result<SuccessResponse> {
		let token = if request.requires_auth() {
			Some(self.tokens.ensure_valid_token().await?)
		} else {
			None
		};
		let url =
			self.endpoint.resolve(request.path(), request.query_pairs()).map_err(ConfigError::from)?;
		let method = request.method().clone();

		span.record_request(method.as_str(), url.path());

		let mut builder =
			Request::builder().method(method.clone()).uri(url.as_str()).header(ACCEPT, JSON);

		if request.body().is_some() {
			builder = builder.header(CONTENT_TYPE, JSON);
		}
		if let Some(token) = &token {
			let mut value = HeaderValue::try_from(token.authorization_header())
				.map_err(|e| ConfigError::HttpRequest(e.into()))?;

			value.set_sensitive(true);

			builder = builder.header(AUTHORIZATION, value);
		}

		let outbound: HttpRequest =
			builder.body(request.into_body().unwrap_or_default()).map_err(ConfigError::from)?;
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let response = handle.call(outbound).await.map_err(|err| {
			self.transport_mapper.map_transport_error(CallKind::ApiRequest, slot.take().as_ref(), err)
		})?;
		let status = response.status();

		span.record_status(status.as_u16());
		obs::response_event(CallKind::ApiRequest, method.as_str(), url.path(), status.as_u16());
		obs::record_api_response(method.as_str(), status.as_u16());

		if status.is_success() {
			return Ok(SuccessResponse { status, body: response.into_body() });
		}

		let retry_after = http::parse_retry_after(response.headers());

		Err(ApiError::from_response(
			method,
			url,
			status,
			response.headers(),
			retry_after,
			response.body(),
		)
		.into())
	}
}
