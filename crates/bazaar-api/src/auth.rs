//! # Authentication Endpoints
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /auth/login {username, password}                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {token} ──► token_subject(token)                                      │
//! │                 │                                                       │
//! │                 ├── JWT with numeric `sub` ──► that user id             │
//! │                 └── anything else          ──► configured fallback id   │
//! │                                                                         │
//! │  GET /users/{id} ──► UserProfile (fields optional)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The token's signature is never checked here: the client only reads the
//! subject to pick which profile to fetch. The server stays the authority.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::Value;

use bazaar_core::{Credentials, LoginResponse, UserId, UserProfile};

use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};

impl ApiClient {
    /// POST `/auth/login`, returning the session token.
    pub async fn login(&self, credentials: &Credentials) -> ClientResult<String> {
        let response: LoginResponse = self.post_json("/auth/login", credentials).await?;
        if response.token.is_empty() {
            return Err(ClientError::Decode("login response carried an empty token".into()));
        }
        Ok(response.token)
    }

    /// GET `/users/{id}`. `None` when the API has no such user.
    pub async fn get_user(&self, id: UserId) -> ClientResult<Option<UserProfile>> {
        self.get_json(&format!("/users/{}", id)).await
    }
}

#[derive(Debug, Deserialize)]
struct SubjectClaims {
    #[serde(default)]
    sub: Option<Value>,
}

/// Reads the user id from a JWT `sub` claim without verifying the signature.
///
/// Accepts numeric and numeric-string subjects. Returns `None` for opaque
/// tokens, malformed JWTs and non-numeric subjects.
pub fn token_subject(token: &str) -> Option<UserId> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<SubjectClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    let id = match data.claims.sub? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    id.filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn jwt(claims: serde_json::Value) -> String {
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    #[test]
    fn test_token_subject_numeric() {
        let token = jwt(serde_json::json!({ "sub": 2, "user": "mor_2314", "iat": 1700000000 }));
        assert_eq!(token_subject(&token), Some(2));
    }

    #[test]
    fn test_token_subject_string() {
        let token = jwt(serde_json::json!({ "sub": "5" }));
        assert_eq!(token_subject(&token), Some(5));
    }

    #[test]
    fn test_token_subject_ignores_registered_claims() {
        let token = jwt(serde_json::json!({
            "sub": 3,
            "aud": "shop",
            "iss": "fakestore",
            "exp": 1
        }));
        assert_eq!(token_subject(&token), Some(3));
    }

    #[test]
    fn test_token_subject_unusable() {
        assert_eq!(token_subject("T"), None);
        assert_eq!(token_subject(&jwt(serde_json::json!({ "user": "x" }))), None);
        assert_eq!(token_subject(&jwt(serde_json::json!({ "sub": "alice" }))), None);
        assert_eq!(token_subject(&jwt(serde_json::json!({ "sub": 0 }))), None);
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("username or password is incorrect"))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(server.uri()).unwrap();
        let err = client
            .login(&Credentials {
                username: "u".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_get_user() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 1,
                "email": "john@gmail.com",
                "username": "johnd",
                "name": { "firstname": "john", "lastname": "doe" },
                "phone": "1-570-236-7033",
                "address": { "city": "kilcoole" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_base_url(server.uri()).unwrap();
        let profile = client.get_user(1).await.unwrap().unwrap();

        assert_eq!(profile.username.as_deref(), Some("johnd"));
        assert_eq!(profile.email.as_deref(), Some("john@gmail.com"));
    }
}
