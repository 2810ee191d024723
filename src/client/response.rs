//! Response normalization: success bodies, no-content responses, and error bodies.

// self
use crate::{
	_prelude::*,
	error::{ApiError, ParseError},
	http::RawResponse,
	obs,
};

const ERROR_TEXT_LIMIT: usize = 100;

/// Optional fields the gateway uses to describe a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBody {
	/// Value of a string `error` field.
	pub error: Option<String>,
	/// Value of a string `message` field.
	pub message: Option<String>,
}
impl ErrorBody {
	/// Extracts the known fields from an arbitrary JSON body.
	///
	/// Only non-empty strings count as present.
	pub fn from_value(value: &Value) -> Self {
		let field = |name: &str| {
			value.get(name).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_owned)
		};

		Self { error: field("error"), message: field("message") }
	}

	/// Preferred human-readable summary: `error`, then `message`.
	pub fn summary(&self) -> Option<&str> {
		self.error.as_deref().or(self.message.as_deref())
	}
}

/// Decodes a response into `Some(T)`, `None` for no-content, or a typed error.
///
/// Success bodies are never inspected for `error`/`message` fields.
pub fn decode<T>(response: RawResponse) -> Result<Option<T>>
where
	T: DeserializeOwned,
{
	let status = response.status.as_u16();

	if !response.status.is_success() {
		return Err(error_from(response));
	}
	if response.is_no_content() {
		return Ok(None);
	}

	let bytes =
		response.body.map_err(|e| ParseError::SuccessBodyRead { source: Box::new(e) })?;
	let mut de = serde_json::Deserializer::from_slice(&bytes);
	let value = serde_path_to_error::deserialize(&mut de)
		.map_err(|source| ParseError::SuccessBody { status, source })?;

	Ok(Some(value))
}

/// Converts a non-2xx response into an [`Error`].
pub fn error_from(response: RawResponse) -> Error {
	let status = response.status.as_u16();
	let generic = format!("API request failed with status {status}");
	let bytes = match response.body {
		Ok(bytes) => bytes,
		Err(e) => {
			obs::warn_unparsable_error_body(status, &e);

			return ParseError::ErrorBody { status, source: Box::new(e) }.into();
		},
	};

	match serde_json::from_slice::<Value>(&bytes) {
		Ok(details) => {
			let message =
				ErrorBody::from_value(&details).summary().map(str::to_owned).unwrap_or(generic);

			ApiError { message, status, details: Some(details) }.into()
		},
		Err(json_err) => {
			obs::warn_unparsable_error_body(status, &json_err);

			match String::from_utf8(bytes) {
				Ok(text) if text.is_empty() =>
					ApiError { message: generic, status, details: None }.into(),
				Ok(text) => {
					let excerpt = text.chars().take(ERROR_TEXT_LIMIT).collect::<String>();

					ApiError { message: format!("{generic}: {excerpt}"), status, details: None }
						.into()
				},
				Err(e) => ParseError::ErrorBody { status, source: Box::new(e) }.into(),
			}
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::{HeaderMap, StatusCode};
	// self
	use super::*;
	use crate::http::BodyReadError;

	fn response(status: u16, body: &[u8]) -> RawResponse {
		RawResponse::new(
			StatusCode::from_u16(status).expect("Fixture status should be valid."),
			HeaderMap::new(),
			body.to_vec(),
		)
	}

	#[test]
	fn success_bodies_decode_and_skip_error_fields() {
		let value: Option<Value> = decode(response(200, br#"{"error":"bad email"}"#))
			.expect("2xx bodies should decode even when they carry an error field.");

		assert_eq!(value, Some(serde_json::json!({ "error": "bad email" })));
	}

	#[test]
	fn no_content_resolves_to_none() {
		let value: Option<ErrorProbe> =
			decode(response(204, b"")).expect("204 should resolve without a body.");

		assert!(value.is_none());
	}

	#[derive(Debug, Deserialize)]
	struct ErrorProbe {
		#[allow(dead_code)]
		id: u32,
	}

	#[test]
	fn malformed_success_body_is_a_parse_error_with_path() {
		let err = decode::<ErrorProbe>(response(200, br#"{"id":"seven"}"#))
			.expect_err("Type mismatch should fail to decode.");

		match err {
			Error::Parse(ParseError::SuccessBody { status, source }) => {
				assert_eq!(status, 200);
				assert_eq!(source.path().to_string(), "id");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn json_error_body_prefers_error_then_message() {
		let err = error_from(response(400, br#"{"error":"bad email","message":"ignored"}"#));

		assert_eq!(err.to_string(), "bad email");
		assert_eq!(err.status_code(), Some(400));

		let err = error_from(response(409, br#"{"error":"","message":"already exists"}"#));

		assert_eq!(err.to_string(), "already exists");

		let err = error_from(response(422, br#"{"code":7}"#));

		assert_eq!(err.to_string(), "API request failed with status 422");
		assert_eq!(err.details(), Some(&serde_json::json!({ "code": 7 })));
	}

	#[test]
	fn text_error_body_is_appended_and_truncated() {
		let err = error_from(response(500, b"internal failure"));

		assert_eq!(err.to_string(), "API request failed with status 500: internal failure");
		assert_eq!(err.details(), None);

		let long = "x".repeat(150);
		let err = error_from(response(502, long.as_bytes()));

		assert_eq!(
			err.to_string(),
			format!("API request failed with status 502: {}", "x".repeat(100))
		);

		let err = error_from(response(503, b""));

		assert_eq!(err.to_string(), "API request failed with status 503");
	}

	#[test]
	fn unreadable_error_bodies_are_parse_errors() {
		let err = error_from(response(500, &[0xff, 0xfe, 0xfd]));

		assert!(matches!(err, Error::Parse(ParseError::ErrorBody { status: 500, .. })));

		let interrupted = RawResponse {
			status: StatusCode::BAD_GATEWAY,
			headers: HeaderMap::new(),
			body: Err(BodyReadError { message: "connection reset".into() }),
		};
		let err = error_from(interrupted);

		assert!(matches!(err, Error::Parse(ParseError::ErrorBody { status: 502, .. })));
		assert_eq!(err.status_code(), Some(502));
	}
}
