//! In-memory transport that replays scripted responses and records every request.

// std
use std::{collections::VecDeque, io};
// crates.io
use oauth2::{
	AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderName, HeaderValue, StatusCode},
};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpTransport, ResponseMetadata, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::CallKind,
};

enum Step {
	Respond { status: u16, headers: Vec<(&'static str, &'static str)>, body: String },
	Fail(io::ErrorKind),
}

#[derive(Default)]
struct Script {
	steps: Mutex<VecDeque<Step>>,
	requests: Mutex<Vec<HttpRequest>>,
}

#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport(Arc<Script>);
impl ScriptedTransport {
	pub(crate) fn respond(&self, status: u16, body: &str) -> &Self {
		self.respond_with_headers(status, &[], body)
	}

	pub(crate) fn respond_with_headers(
		&self,
		status: u16,
		headers: &[(&'static str, &'static str)],
		body: &str,
	) -> &Self {
		let mut all = vec![("content-type", "application/json")];

		all.extend_from_slice(headers);
		self.0.steps.lock().push_back(Step::Respond { status, headers: all, body: body.into() });

		self
	}

	pub(crate) fn fail(&self, kind: io::ErrorKind) -> &Self {
		self.0.steps.lock().push_back(Step::Fail(kind));

		self
	}

	pub(crate) fn token(&self, access_token: &str, expires_in: i64) -> &Self {
		self.respond(
			200,
			&format!(
				r#"{{"access_token":"{access_token}","token_type":"Bearer","expires_in":{expires_in}}}"#
			),
		)
	}

	pub(crate) fn calls(&self) -> usize {
		self.0.requests.lock().len()
	}

	pub(crate) fn take_requests(&self) -> Vec<HttpRequest> {
		std::mem::take(&mut *self.0.requests.lock())
	}
}
impl HttpTransport for ScriptedTransport {
	type Handle = ScriptedHandle;
	type TransportError = io::Error;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		ScriptedHandle { script: Arc::clone(&self.0), slot }
	}
}

pub(crate) struct ScriptedHandle {
	script: Arc<Script>,
	slot: ResponseMetadataSlot,
}
impl<'c> AsyncHttpClient<'c> for ScriptedHandle {
	type Error = HttpClientError<io::Error>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		Box::pin(async move {
			self.slot.take();
			self.script.requests.lock().push(request);

			let step = self.script.steps.lock().pop_front();

			match step {
				Some(Step::Respond { status, headers, body }) => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() =
						StatusCode::from_u16(status).expect("Scripted status should be valid.");

					for (name, value) in headers {
						response
							.headers_mut()
							.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
					}

					self.slot.store(ResponseMetadata::from_response(&response));

					Ok(response)
				},
				Some(Step::Fail(kind)) => Err(HttpClientError::Io(io::Error::new(kind, "scripted"))),
				None => Err(HttpClientError::Other("script exhausted".into())),
			}
		})
	}
}

#[derive(Clone, Debug, Default)]
pub(crate) struct ScriptedErrorMapper;
impl TransportErrorMapper<io::Error> for ScriptedErrorMapper {
	fn map_transport_error(
		&self,
		call: CallKind,
		_: Option<&ResponseMetadata>,
		error: HttpClientError<io::Error>,
	) -> TransportError {
		match error {
			HttpClientError::Io(source) if source.kind() == io::ErrorKind::TimedOut =>
				TransportError::timeout(call, source),
			HttpClientError::Io(source) => TransportError::Io { call, source },
			HttpClientError::Http(source) => TransportError::Http { call, source },
			HttpClientError::Other(message) => TransportError::Other { call, message },
			other => TransportError::Other { call, message: other.to_string() },
		}
	}
}
