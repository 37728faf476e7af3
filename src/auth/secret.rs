//! Client secrets and bearer token values.

// self
use crate::_prelude::*;

/// Sensitive string such as the client secret or an access token.
///
/// `Debug` and `Display` print a placeholder; only [`Secret::expose`] yields the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);
impl Secret {
	const PLACEHOLDER: &'static str = "<redacted>";

	/// Wraps `value`.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw value, for building the `Authorization` header or the token request.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl From<String> for Secret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl Debug for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Secret({})", Self::PLACEHOLDER)
	}
}
impl Display for Secret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(Self::PLACEHOLDER)
	}
}
