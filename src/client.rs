//! API client: one endpoint, one transport, one token manager, shared by every resource call.

mod dispatch;
mod request;

pub use request::*;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, Token, TokenManager},
	endpoint::ApiEndpoint,
	http::HttpTransport,
	oauth::TransportErrorMapper,
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Typed client for the PayPal REST API.
///
/// The client owns the endpoint target, the HTTP transport, and the [`TokenManager`]
/// holding the bearer token. Clones share the transport and the token cache, so a clone
/// handed to another task never triggers a second exchange for a token that is still fresh.
pub struct ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	endpoint: ApiEndpoint,
	http_client: Arc<C>,
	transport_mapper: Arc<M>,
	tokens: Arc<TokenManager<C, M>>,
}
impl<C, M> ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		credentials: Credentials,
		endpoint: ApiEndpoint,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let http_client = http_client.into();
		let transport_mapper = mapper.into();
		let tokens = TokenManager::new(
			&credentials,
			&endpoint,
			Arc::clone(&http_client),
			Arc::clone(&transport_mapper),
		)?;

		Ok(Self { endpoint, http_client, transport_mapper, tokens: Arc::new(tokens) })
	}

	/// Overrides the token safety margin (defaults to 60 seconds).
	///
	/// The margin lives in the shared token manager, so clones observe the change too.
	pub fn with_safety_margin(self, margin: Duration) -> Self {
		self.tokens.set_safety_margin(margin);

		self
	}

	/// Endpoint every request resolves against.
	pub fn endpoint(&self) -> &ApiEndpoint {
		&self.endpoint
	}

	/// Token manager backing authenticated requests.
	pub fn token_manager(&self) -> &TokenManager<C, M> {
		&self.tokens
	}

	/// Returns a token that is valid for longer than the safety margin.
	pub async fn ensure_valid_token(&self) -> Result<Arc<Token>> {
		self.tokens.ensure_valid_token().await
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(credentials: Credentials, endpoint: ApiEndpoint) -> Result<Self> {
		Self::with_http_client(
			credentials,
			endpoint,
			ReqwestHttpClient::default(),
			ReqwestTransportErrorMapper,
		)
	}
}
impl<C, M> Clone for ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			endpoint: self.endpoint.clone(),
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			tokens: Arc::clone(&self.tokens),
		}
	}
}
impl<C, M> Debug for ApiClient<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("endpoint", &self.endpoint)
			.field("tokens", &self.tokens)
			.finish()
	}
}

#[cfg(test)]
pub(crate) mod tests {
	// self
	use super::*;
	use crate::{
		endpoint::Environment,
		http::scripted::{ScriptedErrorMapper, ScriptedTransport},
	};

	pub(crate) type ScriptedClient = ApiClient<ScriptedTransport, ScriptedErrorMapper>;

	pub(crate) fn scripted_client(transport: &ScriptedTransport) -> ScriptedClient {
		ApiClient::with_http_client(
			Credentials::new("client", "secret"),
			ApiEndpoint::new(Environment::Sandbox),
			transport.clone(),
			ScriptedErrorMapper,
		)
		.expect("Client should configure.")
	}

	#[test]
	fn clones_share_the_token_cache() {
		let transport = ScriptedTransport::default();
		let client = scripted_client(&transport).with_safety_margin(Duration::seconds(5));
		let clone = client.clone();

		assert!(std::ptr::eq(client.token_manager(), clone.token_manager()));
		assert_eq!(clone.token_manager().safety_margin(), Duration::seconds(5));
		assert_eq!(clone.endpoint().environment(), Some(Environment::Sandbox));
	}

	#[test]
	fn debug_never_prints_credentials() {
		let rendered = format!("{:?}", scripted_client(&ScriptedTransport::default()));

		assert!(rendered.contains("ApiClient"));
		assert!(!rendered.contains("secret"));
	}
}
