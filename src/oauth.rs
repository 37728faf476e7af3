//! OAuth client facade for the client-credentials exchange, plus transport error mapping.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, HttpClientError,
	RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError, BasicTokenType},
};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Token},
	error::{AuthenticationError, ConfigError, TransportError},
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	obs::CallKind,
};

type ConfiguredBasicClient =
	BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeTokenResponse = oauth2::basic::BasicTokenResponse;

/// Maps HTTP transport failures into client [`TransportError`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a transport error.
	fn map_transport_error(
		&self,
		call: CallKind,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> TransportError;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> TransportError {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(call, *inner),
			HttpClientError::Http(source) => TransportError::Http { call, source },
			HttpClientError::Io(source) => TransportError::Io { call, source },
			HttpClientError::Other(message) => TransportError::Other { call, message },
			_ => map_unknown_transport_error(call, meta),
		}
	}
}

/// Client-credentials exchange bound to one token endpoint and one credential pair.
pub(crate) struct ClientCredentialsExchange<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> ClientCredentialsExchange<C, M>
where
	C: ?Sized + HttpTransport,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Configures HTTP Basic client authentication against `token_url`.
	pub(crate) fn new(
		credentials: &Credentials,
		token_url: &Url,
		http_client: Arc<C>,
		error_mapper: Arc<M>,
	) -> Result<Self> {
		let token_url = TokenUrl::new(token_url.to_string())
			.map_err(|source| ConfigError::InvalidTokenUrl { source })?;
		let oauth_client = BasicClient::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_auth_type(AuthType::BasicAuth)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, http_client, error_mapper })
	}

	/// Performs `grant_type=client_credentials` and stamps the token at completion.
	pub(crate) async fn exchange(&self) -> Result<Token, AuthenticationError> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err, self.error_mapper.as_ref()))?;

		map_token_response(response, OffsetDateTime::now_utc())
	}

	#[cfg(test)]
	fn token_url(&self) -> &str {
		self.oauth_client.token_uri().as_str()
	}
}

fn map_token_response(
	response: FacadeTokenResponse,
	issued_at: OffsetDateTime,
) -> Result<Token, AuthenticationError> {
	let expires_in = response.expires_in().ok_or(AuthenticationError::MissingExpiresIn)?.as_secs();
	let expires_in =
		i64::try_from(expires_in).map_err(|_| AuthenticationError::ExpiresInOutOfRange)?;

	if expires_in <= 0 {
		return Err(AuthenticationError::NonPositiveExpiresIn);
	}

	let expires_in = Duration::seconds(expires_in);

	if issued_at.checked_add(expires_in).is_none() {
		return Err(AuthenticationError::ExpiresInOutOfRange);
	}

	let mut builder = Token::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(token_type_label(response.token_type()))
		.issued_at(issued_at)
		.expires_in(expires_in);

	if let Some(refresh) = response.refresh_token() {
		builder = builder.refresh_token(refresh.secret().to_owned());
	}

	Ok(builder.build()?)
}

fn token_type_label(kind: &BasicTokenType) -> String {
	match kind {
		BasicTokenType::Bearer => "Bearer".into(),
		BasicTokenType::Mac => "MAC".into(),
		BasicTokenType::Extension(other) => other.clone(),
	}
}

fn map_request_error<E, M>(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> AuthenticationError
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta_ref = meta.as_ref();

	match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response_error(response, meta_status(meta_ref)),
		RequestTokenError::Request(error) => AuthenticationError::Transport(
			mapper.map_transport_error(CallKind::TokenExchange, meta_ref, error),
		),
		RequestTokenError::Parse(source, _body) =>
			AuthenticationError::MalformedResponse { source, status: meta_status(meta_ref) },
		RequestTokenError::Other(message) =>
			AuthenticationError::UnexpectedResponse { message, status: meta_status(meta_ref) },
	}
}

fn map_server_response_error(
	response: BasicErrorResponse,
	status: Option<u16>,
) -> AuthenticationError {
	AuthenticationError::Rejected {
		status,
		error: response.error().as_ref().to_owned(),
		description: response.error_description().cloned(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(call: CallKind, err: ReqwestError) -> TransportError {
	if err.is_timeout() {
		return TransportError::timeout(call, err);
	}

	TransportError::network(call, err)
}

#[cfg(feature = "reqwest")]
fn map_unknown_transport_error(call: CallKind, meta: Option<&ResponseMetadata>) -> TransportError {
	let message = match meta_status(meta) {
		Some(status) => format!("unrecognized transport failure after status {status}"),
		None => "unrecognized transport failure".into(),
	};

	TransportError::Other { call, message }
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}
