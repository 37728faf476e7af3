//! API endpoint targets: the sandbox and live bases, plus validated custom bases for mocks.
//!
//! A client picks exactly one [`ApiEndpoint`] when it is constructed. Every request path,
//! including the token endpoint, resolves against that single base, so sandbox and live
//! traffic can never mix inside one client.

// std
use std::net::IpAddr;
// self
use crate::_prelude::*;

/// Path of the client-credentials token endpoint, relative to the API base.
pub const TOKEN_PATH: &str = "/v1/oauth2/token";

/// Errors raised while constructing or using an [`ApiEndpoint`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum EndpointError {
	/// Base URL must use HTTPS unless it points at a loopback host.
	#[error("The API base must use HTTPS: {url}.")]
	InsecureBase {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:` or `data:` URLs).
	#[error("The API base cannot be used as a base URL: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL must not carry a query string or fragment.
	#[error("The API base must not carry a query or fragment: {url}.")]
	UnexpectedQuery {
		/// Base URL that failed validation.
		url: String,
	},
}

/// PayPal deployment environment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Sandbox environment for testing.
	#[default]
	Sandbox,
	/// Live environment that moves real money.
	Live,
}
impl Environment {
	/// Base URL of the sandbox API.
	pub const SANDBOX_BASE: &'static str = "https://api.sandbox.paypal.com";
	/// Base URL of the live API.
	pub const LIVE_BASE: &'static str = "https://api.paypal.com";

	/// Returns the fixed base URL for the environment.
	pub const fn base_url(self) -> &'static str {
		match self {
			Environment::Sandbox => Self::SANDBOX_BASE,
			Environment::Live => Self::LIVE_BASE,
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Environment::Sandbox => "sandbox",
			Environment::Live => "live",
		})
	}
}

/// Immutable API base selected once per client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoint {
	base: Url,
	environment: Option<Environment>,
}
impl ApiEndpoint {
	/// Targets one of the two fixed PayPal environments.
	pub fn new(environment: Environment) -> Self {
		let base = Url::parse(environment.base_url())
			.unwrap_or_else(|_| unreachable!("environment base URLs are valid constants"));

		Self { base, environment: Some(environment) }
	}

	/// Targets a custom base, such as a local mock server.
	///
	/// The base must use HTTPS; plain HTTP is only accepted for loopback hosts.
	pub fn custom(base: Url) -> Result<Self, EndpointError> {
		validate_base(&base)?;

		Ok(Self { base, environment: None })
	}

	/// Returns the base URL.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Returns the environment, or `None` for custom bases.
	pub fn environment(&self) -> Option<Environment> {
		self.environment
	}

	/// Returns the token endpoint URL.
	pub fn token_url(&self) -> Result<Url, EndpointError> {
		self.resolve(TOKEN_PATH, &[])
	}

	/// Joins `path` onto the base, percent-encoding each segment, and appends `query`.
	///
	/// A trailing `/` on `path` is preserved.
	pub fn resolve(&self, path: &str, query: &[(String, String)]) -> Result<Url, EndpointError> {
		let mut url = self.base.clone();

		{
			let mut segments = url
				.path_segments_mut()
				.map_err(|_| EndpointError::CannotBeABase { url: self.base.to_string() })?;

			segments.pop_if_empty();

			for segment in path.split('/').filter(|segment| !segment.is_empty()) {
				segments.push(segment);
			}

			if path.ends_with('/') && path.len() > 1 {
				segments.push("");
			}
		}

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		Ok(url)
	}
}
impl From<Environment> for ApiEndpoint {
	fn from(environment: Environment) -> Self {
		Self::new(environment)
	}
}

fn validate_base(url: &Url) -> Result<(), EndpointError> {
	if url.cannot_be_a_base() {
		return Err(EndpointError::CannotBeABase { url: url.to_string() });
	}
	if url.query().is_some() || url.fragment().is_some() {
		return Err(EndpointError::UnexpectedQuery { url: url.to_string() });
	}

	match url.scheme() {
		"https" => Ok(()),
		"http" if is_loopback(url) => Ok(()),
		_ => Err(EndpointError::InsecureBase { url: url.to_string() }),
	}
}

fn is_loopback(url: &Url) -> bool {
	match url.host() {
		Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
		Some(url::Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
		Some(url::Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
		None => false,
	}
}
