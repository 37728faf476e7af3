//! Request descriptor consumed by the dispatcher.

// crates.io
use oauth2::http::Method;
// self
use crate::{_prelude::*, error::ConfigError};

/// One REST call: method, path relative to the API base, optional JSON body, query
/// parameters, and whether a bearer token must be attached.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	method: Method,
	path: String,
	body: Option<Vec<u8>>,
	query: Vec<(String, String)>,
	authenticated: bool,
}
impl ApiRequest {
	/// Creates an authenticated request without a body.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), body: None, query: Vec::new(), authenticated: true }
	}

	/// `GET` request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// `POST` request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// `PUT` request.
	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::PUT, path)
	}

	/// `PATCH` request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::PATCH, path)
	}

	/// `DELETE` request.
	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::DELETE, path)
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let encoded =
			serde_json::to_vec(body).map_err(|source| ConfigError::SerializeBody { source })?;

		self.body = Some(encoded);

		Ok(self)
	}

	/// Appends a query parameter.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));

		self
	}

	/// Appends a query parameter when `value` is present.
	pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
		match value {
			Some(value) => self.query(key, value),
			None => self,
		}
	}

	/// Sends the request without an `Authorization` header.
	pub fn without_auth(mut self) -> Self {
		self.authenticated = false;

		self
	}

	/// Requires a bearer token for the request.
	pub fn with_auth(mut self) -> Self {
		self.authenticated = true;

		self
	}

	/// HTTP method.
	pub fn method(&self) -> &Method {
		&self.method
	}

	/// Path relative to the API base.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Encoded JSON body, if any.
	pub fn body(&self) -> Option<&[u8]> {
		self.body.as_deref()
	}

	/// Query parameters in insertion order.
	pub fn query_pairs(&self) -> &[(String, String)] {
		&self.query
	}

	/// Whether a bearer token is attached.
	pub fn requires_auth(&self) -> bool {
		self.authenticated
	}

	pub(crate) fn into_body(self) -> Option<Vec<u8>> {
		self.body
	}
}
