//! Client-level error types shared by the token manager, the dispatcher, and resource calls.

// crates.io
use oauth2::http::{Method, StatusCode};
// self
use crate::{_prelude::*, auth::TokenBuilderError, endpoint::EndpointError, obs::CallKind};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The client-credentials exchange failed.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// The outbound call failed before a response arrived.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The API answered with a non-success status.
	#[error(transparent)]
	Api(Box<ApiError>),
	/// A success response did not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Returns the API error when the remote side rejected the call.
	pub fn as_api(&self) -> Option<&ApiError> {
		match self {
			Self::Api(err) => Some(err.as_ref()),
			_ => None,
		}
	}
}
impl From<ApiError> for Error {
	fn from(e: ApiError) -> Self {
		Self::Api(Box::new(e))
	}
}

/// Configuration and validation failures raised before any request is sent.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Endpoint configuration is invalid.
	#[error(transparent)]
	Endpoint(#[from] EndpointError),
	/// Token endpoint URL was rejected by the OAuth client.
	#[error("Token endpoint URL is invalid.")]
	InvalidTokenUrl {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// A resource is missing a field the call needs.
	#[error("The {field} field is required for this call.")]
	MissingField {
		/// Name of the missing field.
		field: &'static str,
	},
	/// Request body could not be encoded as JSON.
	#[error("Request body could not be serialized as JSON.")]
	SerializeBody {
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures of the client-credentials exchange against `/v1/oauth2/token`.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// Token endpoint rejected the credentials with an OAuth error body.
	#[error("Token endpoint rejected the client credentials: {error}.")]
	Rejected {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// OAuth `error` code (e.g. `invalid_client`).
		error: String,
		/// OAuth `error_description`, when supplied.
		description: Option<String>,
	},
	/// The exchange request never produced a response.
	#[error("Token exchange failed in transit.")]
	Transport(#[source] TransportError),
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned something that is neither a token nor an OAuth error.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	UnexpectedResponse {
		/// Summary of the response.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token response carried an `expires_in` outside the supported range.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token response carried a zero lifetime.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
	/// Token could not be assembled from the response.
	#[error("Unable to build token.")]
	InvalidToken(#[from] TokenBuilderError),
}
impl AuthenticationError {
	/// HTTP status returned by the token endpoint, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Rejected { status, .. }
			| Self::MalformedResponse { status, .. }
			| Self::UnexpectedResponse { status, .. } => *status,
			_ => None,
		}
	}
}

/// Transport-level failures (network, IO) surfaced before a response was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred during the {call} call.")]
	Network {
		/// Call that failed.
		call: CallKind,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The transport gave up waiting for a response.
	#[error("Request timed out during the {call} call.")]
	Timeout {
		/// Call that failed.
		call: CallKind,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred during the {call} call.")]
	Io {
		/// Call that failed.
		call: CallKind,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// The transport refused the request as malformed.
	#[error("Transport rejected the {call} request.")]
	Http {
		/// Call that failed.
		call: CallKind,
		/// Underlying request error.
		#[source]
		source: oauth2::http::Error,
	},
	/// Transport failure that does not fit the other variants.
	#[error("HTTP client error occurred during the {call} call: {message}.")]
	Other {
		/// Call that failed.
		call: CallKind,
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(call: CallKind, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { call, source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(call: CallKind, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { call, source: Box::new(src) }
	}

	/// Call during which the failure happened.
	pub fn call(&self) -> CallKind {
		match self {
			Self::Network { call, .. }
			| Self::Timeout { call, .. }
			| Self::Io { call, .. }
			| Self::Http { call, .. }
			| Self::Other { call, .. } => *call,
		}
	}
}

/// Failures decoding a success response into the expected type.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body did not match the expected JSON shape.
	#[error("Response body with status {status} does not match the expected shape.")]
	Json {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Endpoint must return a body but the response was empty.
	#[error("Response with status {status} has an empty body.")]
	EmptyBody {
		/// HTTP status code of the response.
		status: u16,
	},
}

/// PayPal error body as documented for every REST endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
	/// Short error name (e.g. `RESOURCE_NOT_FOUND`).
	pub name: String,
	/// PayPal debug identifier.
	#[serde(default)]
	pub debug_id: String,
	/// Human-readable message.
	pub message: String,
	/// Link to the error documentation.
	#[serde(default)]
	pub information_link: String,
	/// Additional details; structured details are kept as JSON text.
	#[serde(default, deserialize_with = "details_as_text")]
	pub details: String,
}

/// Non-success response from the API, decoded or synthesized from the raw response.
#[derive(Clone, Debug, ThisError)]
#[error("{method} {url}: {status} {message}")]
pub struct ApiError {
	/// Request method.
	pub method: Method,
	/// Fully resolved request URL.
	pub url: Url,
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint, when supplied.
	pub retry_after: Option<Duration>,
	/// Short error name.
	pub name: String,
	/// PayPal debug identifier.
	pub debug_id: String,
	/// Human-readable message.
	pub message: String,
	/// Link to the error documentation.
	pub information_link: String,
	/// Additional details.
	pub details: String,
	/// Raw response body as text.
	pub body: String,
	/// `true` when the body was not the error shape and the fields were derived from the
	/// status line and raw body.
	pub synthesized: bool,
}
impl ApiError {
	const DEBUG_ID_HEADER: &'static str = "paypal-debug-id";

	/// Builds the error from a non-success response, never failing.
	pub fn from_response(
		method: Method,
		url: Url,
		status: StatusCode,
		headers: &oauth2::http::HeaderMap,
		retry_after: Option<Duration>,
		body: &[u8],
	) -> Self {
		let text = String::from_utf8_lossy(body).into_owned();
		let parsed = serde_json::from_slice::<ErrorPayload>(body).ok();
		let (payload, synthesized) = match parsed {
			Some(payload) => (payload, false),
			None => (Self::synthesize(status, headers, &text), true),
		};

		Self {
			method,
			url,
			status: status.as_u16(),
			retry_after,
			name: payload.name,
			debug_id: payload.debug_id,
			message: payload.message,
			information_link: payload.information_link,
			details: payload.details,
			body: text,
			synthesized,
		}
	}

	/// Returns `true` for 4xx responses.
	pub fn is_client_error(&self) -> bool {
		(400..500).contains(&self.status)
	}

	/// Returns `true` for 5xx responses.
	pub fn is_server_error(&self) -> bool {
		self.status >= 500
	}

	/// Returns `true` for 401 responses (token rejected remotely).
	pub fn is_unauthorized(&self) -> bool {
		self.status == 401
	}

	/// Returns `true` for 404 responses.
	pub fn is_not_found(&self) -> bool {
		self.status == 404
	}

	fn synthesize(status: StatusCode, headers: &oauth2::http::HeaderMap, text: &str) -> ErrorPayload {
		let reason = status.canonical_reason();
		let name = reason
			.map(|value| value.to_ascii_uppercase().replace([' ', '-'], "_"))
			.unwrap_or_else(|| "HTTP_ERROR".into());
		let trimmed = text.trim();
		let message = if trimmed.is_empty() {
			reason.map(str::to_owned).unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
		} else {
			trimmed.to_owned()
		};
		let debug_id = headers
			.get(Self::DEBUG_ID_HEADER)
			.and_then(|value| value.to_str().ok())
			.unwrap_or_default()
			.to_owned();

		ErrorPayload {
			name,
			debug_id,
			message,
			information_link: String::new(),
			details: String::new(),
		}
	}
}

fn details_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::Null => String::new(),
		serde_json::Value::String(text) => text,
		other => other.to_string(),
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{HeaderMap, HeaderValue};
	// self
	use super::*;

	fn url() -> Url {
		Url::parse("https://api.sandbox.paypal.com/v1/payments/payment/PAY-1")
			.expect("Fixture URL should parse.")
	}

	#[test]
	fn parses_documented_error_shape() {
		let body = br#"{"name":"RESOURCE_NOT_FOUND","debug_id":"abc123","message":"not found","information_link":"https://developer.paypal.com/docs/api/","details":""}"#;
		let err = ApiError::from_response(
			Method::GET,
			url(),
			StatusCode::NOT_FOUND,
			&HeaderMap::new(),
			None,
			body,
		);

		assert!(!err.synthesized);
		assert!(err.is_not_found());
		assert_eq!(err.name, "RESOURCE_NOT_FOUND");
		assert_eq!(err.debug_id, "abc123");
		assert_eq!(err.message, "not found");
		assert_eq!(err.information_link, "https://developer.paypal.com/docs/api/");
		assert_eq!(err.details, "");
		assert_eq!(
			err.to_string(),
			"GET https://api.sandbox.paypal.com/v1/payments/payment/PAY-1: 404 not found"
		);
	}

	#[test]
	fn structured_details_are_kept_as_json_text() {
		let body = br#"{"name":"VALIDATION_ERROR","message":"Invalid request","details":[{"field":"payer.payment_method","issue":"required"}]}"#;
		let err = ApiError::from_response(
			Method::POST,
			url(),
			StatusCode::BAD_REQUEST,
			&HeaderMap::new(),
			None,
			body,
		);

		assert!(!err.synthesized);
		assert!(err.is_client_error());
		assert_eq!(err.debug_id, "");
		assert_eq!(err.details, r#"[{"field":"payer.payment_method","issue":"required"}]"#);
	}

	#[test]
	fn empty_body_is_synthesized_from_status_line() {
		let mut headers = HeaderMap::new();

		headers.insert("paypal-debug-id", HeaderValue::from_static("dbg-77"));

		let err = ApiError::from_response(
			Method::GET,
			url(),
			StatusCode::INTERNAL_SERVER_ERROR,
			&headers,
			None,
			b"",
		);

		assert!(err.synthesized);
		assert!(err.is_server_error());
		assert_eq!(err.name, "INTERNAL_SERVER_ERROR");
		assert_eq!(err.message, "Internal Server Error");
		assert_eq!(err.debug_id, "dbg-77");
		assert_eq!(err.body, "");
	}

	#[test]
	fn non_json_body_becomes_the_message() {
		let err = ApiError::from_response(
			Method::GET,
			url(),
			StatusCode::BAD_GATEWAY,
			&HeaderMap::new(),
			Some(Duration::seconds(3)),
			b"<html>upstream down</html>",
		);

		assert!(err.synthesized);
		assert_eq!(err.name, "BAD_GATEWAY");
		assert_eq!(err.message, "<html>upstream down</html>");
		assert_eq!(err.retry_after, Some(Duration::seconds(3)));
	}

	#[test]
	fn oauth_shaped_body_is_synthesized() {
		let body = br#"{"error":"invalid_token","error_description":"Token signature verification failed"}"#;
		let err = ApiError::from_response(
			Method::GET,
			url(),
			StatusCode::UNAUTHORIZED,
			&HeaderMap::new(),
			None,
			body,
		);

		assert!(err.synthesized);
		assert!(err.is_unauthorized());
		assert_eq!(err.name, "UNAUTHORIZED");
		assert_eq!(err.body, String::from_utf8_lossy(body));
	}
}
