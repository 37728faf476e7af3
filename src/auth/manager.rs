//! Token manager: caches the bearer token and refreshes it ahead of expiry.
//!
//! The manager keeps one [`Token`] behind `RwLock<Option<Arc<Token>>>`. Cache hits only
//! take the read lock. When the cached token is missing or within the safety margin of
//! expiry, callers queue on a single async mutex so at most one client-credentials
//! exchange is in flight; callers that waited re-check the cache and reuse the token the
//! winner minted instead of stampeding the token endpoint.

mod metrics;

pub use metrics::*;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, Token},
	endpoint::{ApiEndpoint, TOKEN_PATH},
	error::ConfigError,
	http::HttpTransport,
	oauth::{ClientCredentialsExchange, TransportErrorMapper},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Default remaining lifetime under which a cached token is refreshed.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::seconds(60);

/// Owns the bearer token of one client and keeps it fresh.
pub struct TokenManager<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	exchange: ClientCredentialsExchange<C, M>,
	cached: RwLock<Option<Arc<Token>>>,
	exchange_guard: AsyncMutex<()>,
	safety_margin: RwLock<Duration>,
	metrics: Arc<ExchangeMetrics>,
}
impl<C, M> TokenManager<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a manager that exchanges `credentials` at the endpoint's token URL.
	///
	/// The cache starts empty; the first [`TokenManager::ensure_valid_token`] call performs
	/// the exchange.
	pub fn new(
		credentials: &Credentials,
		endpoint: &ApiEndpoint,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let token_url = endpoint.token_url().map_err(ConfigError::from)?;
		let exchange = ClientCredentialsExchange::new(
			credentials,
			&token_url,
			http_client.into(),
			mapper.into(),
		)?;

		Ok(Self {
			exchange,
			cached: RwLock::new(None),
			exchange_guard: AsyncMutex::new(()),
			safety_margin: RwLock::new(DEFAULT_SAFETY_MARGIN),
			metrics: Default::default(),
		})
	}

	/// Overrides the safety margin (defaults to 60 seconds); negative values clamp to zero.
	pub fn with_safety_margin(self, margin: Duration) -> Self {
		self.set_safety_margin(margin);

		self
	}

	/// Replaces the safety margin in place; negative values clamp to zero.
	pub fn set_safety_margin(&self, margin: Duration) {
		*self.safety_margin.write() = if margin.is_negative() { Duration::ZERO } else { margin };
	}

	/// Returns the current safety margin.
	pub fn safety_margin(&self) -> Duration {
		*self.safety_margin.read()
	}

	/// Returns a snapshot of the cached token, if any, without checking its expiry.
	pub fn current_token(&self) -> Option<Arc<Token>> {
		self.cached.read().clone()
	}

	/// Returns the shared exchange counters.
	pub fn metrics(&self) -> Arc<ExchangeMetrics> {
		Arc::clone(&self.metrics)
	}

	/// Returns a token with more than the safety margin left, exchanging credentials when
	/// the cache is empty or the cached token is about to expire.
	///
	/// A token minted by the exchange is returned even when its own lifetime is shorter
	/// than the margin; the next call will exchange again.
	pub async fn ensure_valid_token(&self) -> Result<Arc<Token>> {
		const KIND: CallKind = CallKind::TokenExchange;

		if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
			obs::debug_event(KIND, "cached token reused");

			return Ok(token);
		}

		let span = CallSpan::new(KIND, "ensure_valid_token");

		span.record_request("POST", TOKEN_PATH);
		span.instrument(async move {
			let _singleflight = self.exchange_guard.lock().await;

			if let Some(token) = self.usable_token(OffsetDateTime::now_utc()) {
				obs::debug_event(KIND, "token minted by a concurrent caller reused");

				return Ok(token);
			}

			self.exchange_locked().await
		})
		.await
	}

	// Caller must hold `exchange_guard`.
	async fn exchange_locked(&self) -> Result<Arc<Token>> {
		const KIND: CallKind = CallKind::TokenExchange;

		obs::record_call_outcome(KIND, CallOutcome::Attempt);
		obs::debug_event(KIND, "exchanging client credentials");
		self.metrics.record(CallOutcome::Attempt);

		match self.exchange.exchange().await {
			Ok(token) => {
				let token = Arc::new(token);

				*self.cached.write() = Some(Arc::clone(&token));

				obs::record_call_outcome(KIND, CallOutcome::Success);
				self.metrics.record_minted(&token);

				Ok(token)
			},
			Err(err) => {
				self.discard_expired(OffsetDateTime::now_utc());

				obs::record_call_outcome(KIND, CallOutcome::Failure);
				self.metrics.record(CallOutcome::Failure);

				Err(err.into())
			},
		}
	}

	fn usable_token(&self, now: OffsetDateTime) -> Option<Arc<Token>> {
		let margin = self.safety_margin();

		self.cached.read().as_ref().filter(|token| token.is_usable_at(now, margin)).cloned()
	}

	fn discard_expired(&self, now: OffsetDateTime) {
		let mut cached = self.cached.write();

		if cached.as_ref().is_some_and(|token| token.is_expired_at(now)) {
			*cached = None;
		}
	}

	#[cfg(test)]
	pub(crate) fn seed(&self, token: Token) {
		*self.cached.write() = Some(Arc::new(token));
	}
}
impl<C, M> Debug for TokenManager<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("cached", &self.current_token())
			.field("safety_margin", &self.safety_margin())
			.field("metrics", &self.metrics)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::io;
	// crates.io
	use oauth2::http::{Method, header::AUTHORIZATION};
	// self
	use super::*;
	use crate::{
		error::{AuthenticationError, TransportError},
		http::scripted::{ScriptedErrorMapper, ScriptedTransport},
	};

	type Manager = TokenManager<ScriptedTransport, ScriptedErrorMapper>;

	fn manager(transport: &ScriptedTransport) -> Manager {
		TokenManager::new(
			&Credentials::new("client", "secret"),
			&ApiEndpoint::new(crate::endpoint::Environment::Sandbox),
			transport.clone(),
			ScriptedErrorMapper,
		)
		.expect("Manager should configure.")
	}

	fn token(access: &str, issued_at: OffsetDateTime, ttl: Duration) -> Token {
		Token::builder()
			.access_token(access)
			.issued_at(issued_at)
			.expires_in(ttl)
			.build()
			.expect("Token fixture should build.")
	}

	#[tokio::test]
	async fn first_call_exchanges_and_later_calls_hit_the_cache() {
		let transport = ScriptedTransport::default();

		transport.token("A21AAF", 32400);

		let manager = manager(&transport);

		assert!(manager.current_token().is_none());

		let first = manager.ensure_valid_token().await.expect("Exchange should succeed.");
		let second = manager.ensure_valid_token().await.expect("Cache should be reused.");

		assert!(Arc::ptr_eq(&first, &second));
		assert_eq!(first.access_token.expose(), "A21AAF");
		assert_eq!(first.expires_in, Duration::seconds(32400));
		assert_eq!(transport.calls(), 1);
		assert_eq!(manager.metrics().attempts(), 1);
		assert_eq!(manager.metrics().successes(), 1);
		assert_eq!(manager.metrics().last_minted_at(), Some(first.issued_at));

		let requests = transport.take_requests();
		let request = &requests[0];

		assert_eq!(request.method(), Method::POST);
		assert_eq!(request.uri().to_string(), "https://api.sandbox.paypal.com/v1/oauth2/token");
		assert_eq!(
			request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()),
			Some("Basic Y2xpZW50OnNlY3JldA==")
		);
		assert_eq!(request.body().as_slice(), b"grant_type=client_credentials");
	}

	#[tokio::test]
	async fn token_inside_the_margin_is_refreshed() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		manager.seed(token("stale", OffsetDateTime::now_utc(), Duration::seconds(30)));
		transport.token("fresh", 3600);

		let token = manager.ensure_valid_token().await.expect("Refresh should succeed.");

		assert_eq!(token.access_token.expose(), "fresh");
		assert_eq!(transport.calls(), 1);
	}

	#[tokio::test]
	async fn token_outside_the_margin_is_reused_without_network() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		manager.seed(token("warm", OffsetDateTime::now_utc(), Duration::seconds(120)));

		let token = manager.ensure_valid_token().await.expect("Cached token should be reused.");

		assert_eq!(token.access_token.expose(), "warm");
		assert_eq!(transport.calls(), 0);
	}

	#[tokio::test]
	async fn zero_margin_reuses_short_lived_tokens() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport).with_safety_margin(Duration::seconds(-5));

		assert_eq!(manager.safety_margin(), Duration::ZERO);

		manager.seed(token("short", OffsetDateTime::now_utc(), Duration::seconds(30)));
		manager.ensure_valid_token().await.expect("Cached token should be reused.");

		assert_eq!(transport.calls(), 0);
	}

	#[tokio::test]
	async fn short_lived_minted_token_is_still_returned() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		transport.token("brief", 30).token("next", 3600);

		let first = manager.ensure_valid_token().await.expect("Exchange should succeed.");
		let second = manager.ensure_valid_token().await.expect("Exchange should succeed.");

		assert_eq!(first.access_token.expose(), "brief");
		assert_eq!(second.access_token.expose(), "next");
		assert_eq!(transport.calls(), 2);
	}

	#[tokio::test]
	async fn rejected_credentials_surface_as_authentication_errors() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		transport.respond(
			401,
			r#"{"error":"invalid_client","error_description":"Client Authentication failed"}"#,
		);

		let err = manager.ensure_valid_token().await.expect_err("Exchange should fail.");

		match err {
			Error::Authentication(AuthenticationError::Rejected { status, error, .. }) => {
				assert_eq!(status, Some(401));
				assert_eq!(error, "invalid_client");
			},
			other => panic!("Unexpected error: {other:?}."),
		}

		assert!(manager.current_token().is_none());
		assert_eq!(manager.metrics().failures(), 1);
	}

	#[tokio::test]
	async fn failed_exchange_keeps_unexpired_token_and_drops_expired_one() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);
		let now = OffsetDateTime::now_utc();

		manager.seed(token("closing", now, Duration::seconds(30)));
		transport.fail(io::ErrorKind::ConnectionReset);

		let err = manager.ensure_valid_token().await.expect_err("Exchange should fail.");

		assert!(matches!(
			err,
			Error::Authentication(AuthenticationError::Transport(TransportError::Io {
				call: CallKind::TokenExchange,
				..
			}))
		));
		assert_eq!(
			manager.current_token().map(|token| token.access_token.expose().to_owned()),
			Some("closing".into())
		);

		manager.seed(token("gone", now - Duration::hours(2), Duration::hours(1)));
		transport.fail(io::ErrorKind::TimedOut);

		let err = manager.ensure_valid_token().await.expect_err("Exchange should fail.");

		assert!(matches!(
			err,
			Error::Authentication(AuthenticationError::Transport(TransportError::Timeout { .. }))
		));
		assert!(manager.current_token().is_none());
	}

	#[tokio::test]
	async fn malformed_token_payloads_are_rejected() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		transport
			.respond(200, r#"{"access_token":"A21AAF","token_type":"Bearer"}"#)
			.respond(200, r#"{"access_token":"A21AAF","token_type":"Bearer","expires_in":0}"#)
			.respond(200, "not json");

		assert!(matches!(
			manager.ensure_valid_token().await,
			Err(Error::Authentication(AuthenticationError::MissingExpiresIn))
		));
		assert!(matches!(
			manager.ensure_valid_token().await,
			Err(Error::Authentication(AuthenticationError::NonPositiveExpiresIn))
		));
		assert!(matches!(
			manager.ensure_valid_token().await,
			Err(Error::Authentication(AuthenticationError::MalformedResponse {
				status: Some(200),
				..
			}))
		));
		assert!(manager.current_token().is_none());
		assert_eq!(manager.metrics().failures(), 3);
	}

	#[tokio::test]
	async fn joined_callers_share_one_exchange() {
		let transport = ScriptedTransport::default();
		let manager = manager(&transport);

		transport.token("shared", 3600);

		let (a, b, c) = tokio::join!(
			manager.ensure_valid_token(),
			manager.ensure_valid_token(),
			manager.ensure_valid_token()
		);
		let a = a.expect("First caller should succeed.");

		assert!(Arc::ptr_eq(&a, &b.expect("Second caller should succeed.")));
		assert!(Arc::ptr_eq(&a, &c.expect("Third caller should succeed.")));
		assert_eq!(transport.calls(), 1);
	}
}
