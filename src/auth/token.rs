//! Immutable bearer token, lifecycle helpers, and builder.

// crates.io
use time::PrimitiveDateTime;
// self
use crate::{_prelude::*, auth::Secret};

/// Current lifecycle status for a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Token is not yet valid because the issued-at instant is in the future.
	Pending,
	/// Token is currently valid.
	Active,
	/// Token reached its expiry instant.
	Expired,
}

/// Errors produced by [`TokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when no lifetime was configured.
	#[error("Token lifetime must be supplied via expires_in.")]
	MissingExpiry,
	/// Issued when the lifetime is zero or negative.
	#[error("Token lifetime must be positive.")]
	NonPositiveExpiry,
	/// Issued when the expiry instant falls outside the representable date range.
	#[error("Token lifetime overflows the supported date range.")]
	ExpiryOutOfRange,
}

/// Bearer token minted by the client-credentials exchange.
///
/// The token manager hands tokens out behind [`Arc`] and replaces them wholesale on
/// refresh, so a token observed by a caller never changes underneath it.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
	/// Access token secret; callers must avoid logging it.
	pub access_token: Secret,
	/// Refresh token secret, if the endpoint issued one.
	pub refresh_token: Option<Secret>,
	/// Token kind used as the `Authorization` scheme (e.g. `Bearer`).
	pub token_type: String,
	/// Lifetime granted by the endpoint.
	pub expires_in: Duration,
	/// Instant at which the exchange completed.
	pub issued_at: OffsetDateTime,
}
impl Token {
	/// Returns a builder for constructing tokens.
	pub fn builder() -> TokenBuilder {
		TokenBuilder::default()
	}

	/// Expiry instant derived from `issued_at + expires_in`, saturating at the latest
	/// representable instant.
	pub fn expires_at(&self) -> OffsetDateTime {
		self.issued_at
			.checked_add(self.expires_in)
			.unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc())
	}

	/// Time left before expiry at the provided instant (negative once expired).
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at() - instant
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant < self.issued_at {
			return TokenStatus::Pending;
		}
		if instant >= self.expires_at() {
			return TokenStatus::Expired;
		}

		TokenStatus::Active
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Returns `true` while more than `margin` remains before expiry.
	pub fn is_usable_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		self.remaining_at(instant) > margin
	}

	/// Renders the `Authorization` header value (`<token_type> <access_token>`).
	pub fn authorization_header(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Builder for [`Token`].
#[derive(Clone, Debug, Default)]
pub struct TokenBuilder {
	access_token: Option<Secret>,
	refresh_token: Option<Secret>,
	token_type: Option<String>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl TokenBuilder {
	const DEFAULT_TOKEN_TYPE: &'static str = "Bearer";

	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(Secret::new(token));

		self
	}

	/// Provides the refresh token value.
	pub fn refresh_token(mut self, token: impl Into<String>) -> Self {
		self.refresh_token = Some(Secret::new(token));

		self
	}

	/// Sets the token kind (defaults to `Bearer`).
	pub fn token_type(mut self, kind: impl Into<String>) -> Self {
		self.token_type = Some(kind.into());

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets the lifetime relative to the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`Token`].
	pub fn build(self) -> Result<Token, TokenBuilderError> {
		let access_token = self.access_token.ok_or(TokenBuilderError::MissingAccessToken)?;
		let expires_in = self.expires_in.ok_or(TokenBuilderError::MissingExpiry)?;

		if !expires_in.is_positive() {
			return Err(TokenBuilderError::NonPositiveExpiry);
		}

		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);

		if issued_at.checked_add(expires_in).is_none() {
			return Err(TokenBuilderError::ExpiryOutOfRange);
		}

		Ok(Token {
			access_token,
			refresh_token: self.refresh_token,
			token_type: self.token_type.unwrap_or_else(|| Self::DEFAULT_TOKEN_TYPE.into()),
			expires_in,
			issued_at,
		})
	}
}
