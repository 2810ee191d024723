//! Client-level error types shared across requests, refreshes, and stores.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A response body could not be read or decoded.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Server reported a failure with a non-2xx status.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Access token was rejected and the refresh attempt failed; stored tokens were cleared.
	#[error("Session expired. Please log in again.")]
	SessionExpired,
}
impl Error {
	/// HTTP status associated with the failure, if the server produced one.
	pub fn status_code(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			Self::SessionExpired => Some(401),
			Self::Parse(ParseError::ErrorBody { status, .. }) => Some(*status),
			Self::Parse(ParseError::SuccessBody { status, .. }) => Some(*status),
			_ => None,
		}
	}

	/// Structured error body returned by the server, when it was valid JSON.
	pub fn details(&self) -> Option<&Value> {
		match self {
			Self::Api(e) => e.details.as_ref(),
			_ => None,
		}
	}

	/// Returns `true` when the caller must authenticate again.
	pub fn is_session_expired(&self) -> bool {
		matches!(self, Self::SessionExpired)
	}
}

/// Server-reported failure carrying the status and the parsed error body.
#[derive(Clone, Debug, PartialEq, ThisError)]
#[error("{message}")]
pub struct ApiError {
	/// Message extracted from the body, or a generic status message.
	pub message: String,
	/// HTTP status code.
	pub status: u16,
	/// Parsed JSON body, when the error body was JSON.
	pub details: Option<Value>,
}

/// Response bodies that could not be read or decoded.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// A 2xx body did not decode into the requested type.
	#[error("Failed to parse successful API response.")]
	SuccessBody {
		/// HTTP status code of the response.
		status: u16,
		/// Structured decoding failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// A 2xx body could not be read from the transport.
	#[error("Failed to read successful API response body.")]
	SuccessBodyRead {
		/// Underlying read failure.
		#[source]
		source: BoxError,
	},
	/// The refresh endpoint answered 2xx without a token pair.
	#[error("Refresh endpoint returned no token pair.")]
	MissingTokenPair,
	/// A non-2xx body was neither JSON nor readable text.
	#[error("Failed to parse error response body for status {status}.")]
	ErrorBody {
		/// HTTP status code of the response.
		status: u16,
		/// Underlying read or decode failure.
		#[source]
		source: BoxError,
	},
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Endpoint does not form a valid URL when joined with the base URL.
	#[error("Endpoint `{endpoint}` does not form a valid URL.")]
	InvalidEndpoint {
		/// Endpoint path supplied by the caller.
		endpoint: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Header name or value is not valid HTTP.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Header name as supplied.
		name: String,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	RequestBody(#[from] serde_json::Error),
	/// Token store holds no refresh token.
	#[error("Token store is missing a refresh token.")]
	MissingRefreshToken,
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

/// Transport-level failures: the request never produced a response.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while fetching data.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
