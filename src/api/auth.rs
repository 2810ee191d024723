//! Account lifecycle endpoints under `/auth` plus the authenticated health check.

// self
use crate::{
	_prelude::*,
	api::MessageResponse,
	auth::TokenPair,
	client::ApiClient,
	error::ParseError,
	http::{ApiTransport, RequestOptions},
};

/// Credentials submitted to `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
	/// reCAPTCHA token obtained by the caller.
	#[serde(rename = "recaptchaToken")]
	pub recaptcha_token: String,
}
impl Debug for LoginRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginRequest")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish_non_exhaustive()
	}
}

/// Successful login body: the credentials pair plus optional session metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
	/// Issued credentials.
	#[serde(flatten)]
	pub tokens: TokenPair,
	/// Identifier of the signed-in user.
	#[serde(default)]
	pub user_id: Option<u32>,
	/// Token type reported by the gateway (usually `Bearer`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Access token lifetime in seconds.
	#[serde(default)]
	pub expires_in: Option<i64>,
}

/// New account submitted to `POST /auth/register`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RegisterRequest {
	/// Display name.
	pub name: String,
	/// Unique handle.
	pub username: String,
	/// Account email.
	pub email: String,
	/// Account password.
	pub password: String,
	/// Self-reported gender.
	pub gender: String,
	/// Date of birth, `YYYY-MM-DD`.
	pub date_of_birth: String,
	/// Recovery question.
	pub security_question: String,
	/// Answer to the recovery question.
	pub security_answer: String,
	/// reCAPTCHA token obtained by the caller.
	#[serde(rename = "recaptchaToken")]
	pub recaptcha_token: String,
	/// Newsletter opt-in.
	pub subscribed_to_newsletter: bool,
	/// Avatar URL from a prior media upload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub profile_picture_url: Option<String>,
	/// Banner URL from a prior media upload.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub banner_url: Option<String>,
}

/// Verification code submitted to `POST /auth/verify`.
#[derive(Clone, Debug, Serialize)]
pub struct VerifyEmailRequest {
	/// Account email.
	pub email: String,
	/// Code delivered by email.
	pub code: String,
}

/// Password reset submitted to `POST /auth/forgot-password/reset`.
#[derive(Clone, Debug, Serialize)]
pub struct ResetPasswordRequest {
	/// Account email.
	pub email: String,
	/// Answer to the stored recovery question.
	pub security_answer: String,
	/// Replacement password.
	pub new_password: String,
}

/// Recovery question returned for an email address.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SecurityQuestion {
	/// The question text.
	pub security_question: String,
}

#[derive(Serialize)]
struct EmailBody<'a> {
	email: &'a str,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiTransport,
{
	/// Authenticated liveness check (`GET /users/health`).
	pub async fn health(&self) -> Result<Value> {
		self.fetch_value("/users/health", RequestOptions::get()).await
	}

	/// Signs in and persists the returned credentials pair into the token store.
	pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse> {
		let options = RequestOptions::post().json(credentials)?;
		let response: LoginResponse =
			self.fetch_public("/auth/login", options).await?.ok_or(ParseError::MissingTokenPair)?;

		self.store.save_pair(&response.tokens).await?;

		Ok(response)
	}

	/// Creates an account.
	pub async fn register(&self, account: &RegisterRequest) -> Result<Value> {
		let options = RequestOptions::post().json(account)?;

		Ok(self.fetch_public("/auth/register", options).await?.unwrap_or_default())
	}

	/// Confirms an email address with the delivered code.
	pub async fn verify_email(&self, verification: &VerifyEmailRequest) -> Result<MessageResponse> {
		let options = RequestOptions::post().json(verification)?;

		Ok(self.fetch_public("/auth/verify", options).await?.unwrap_or_default())
	}

	/// Sends a fresh verification code.
	pub async fn resend_verification(&self, email: &str) -> Result<MessageResponse> {
		let options = RequestOptions::post().json(&EmailBody { email })?;

		Ok(self.fetch_public("/auth/verify/resend", options).await?.unwrap_or_default())
	}

	/// Looks up the recovery question for `email`.
	pub async fn security_question(&self, email: &str) -> Result<Option<SecurityQuestion>> {
		let options = RequestOptions::post().json(&EmailBody { email })?;

		self.fetch_public("/auth/forgot-password/question", options).await
	}

	/// Resets the password using the recovery answer.
	pub async fn reset_password(&self, reset: &ResetPasswordRequest) -> Result<MessageResponse> {
		let options = RequestOptions::post().json(reset)?;

		Ok(self.fetch_public("/auth/forgot-password/reset", options).await?.unwrap_or_default())
	}

	/// Signs out locally by removing both stored credentials.
	///
	/// The gateway keeps no server-side session, so no request is issued.
	pub async fn logout(&self) -> Result<()> {
		Ok(self.store.clear_tokens().await?)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn login_request_uses_gateway_field_names() {
		let request = LoginRequest {
			email: "ada@example.com".into(),
			password: "hunter2".into(),
			recaptcha_token: "captcha".into(),
		};
		let json = serde_json::to_value(&request).expect("Login request should serialize.");

		assert_eq!(json["recaptchaToken"], "captcha");
		assert!(!format!("{request:?}").contains("hunter2"));
	}

	#[test]
	fn login_response_tolerates_missing_metadata() {
		let response: LoginResponse =
			serde_json::from_str(r#"{"access_token":"A","refresh_token":"B"}"#)
				.expect("Minimal login body should decode.");

		assert_eq!(response.tokens.access_token.expose(), "A");
		assert_eq!(response.tokens.refresh_token.expose(), "B");
		assert_eq!(response.user_id, None);
	}

	#[test]
	fn register_request_omits_absent_media() {
		let json = serde_json::to_value(RegisterRequest::default())
			.expect("Register request should serialize.");

		assert!(json.get("profile_picture_url").is_none());
		assert!(json.get("banner_url").is_none());
		assert_eq!(json["subscribed_to_newsletter"], false);
	}
}
