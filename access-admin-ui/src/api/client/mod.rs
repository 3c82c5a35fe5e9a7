use crate::api::ApiError;
use crate::config::Config;
use chrono::NaiveDate;
use dioxus::prelude::{info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_http::api::{
    AccessChangeResponse, AllUsersResponse, GrantCreateAccessRequest, LoginRequest, LoginResponse,
    UserRecord, paths,
};

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: Config,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_config(Config::from_env())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.config.url(paths::LOGIN);
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.client.post(&url).json(&payload).send().await?;
        let login: LoginResponse = Self::parse(response).await.inspect_err(|e| {
            warn!("Login failed for user {}: {}", username, e);
        })?;
        Ok(login)
    }

    pub async fn list_users(&self, token: Option<&str>) -> Result<Vec<UserRecord>, ApiError> {
        let url = self.config.url(paths::ALL_USERS);
        info!("Fetching users from {}", url);
        let response = Self::authorized(self.client.get(&url), token)?
            .send()
            .await?;
        let body: AllUsersResponse = Self::parse(response).await?;
        Ok(body.into_users())
    }

    pub async fn grant_create_access(
        &self,
        token: Option<&str>,
        user_id: &str,
        expiry: NaiveDate,
    ) -> Result<AccessChangeResponse, ApiError> {
        let url = self.config.url(&paths::grant_create_access(user_id));
        info!("Granting create access to {} until {}", user_id, expiry);
        let response = Self::authorized(self.client.post(&url), token)?
            .json(&GrantCreateAccessRequest::new(expiry))
            .send()
            .await?;
        Self::parse_change(response).await
    }

    pub async fn revoke_create_access(
        &self,
        token: Option<&str>,
        user_id: &str,
    ) -> Result<AccessChangeResponse, ApiError> {
        let url = self.config.url(&paths::revoke_create_access(user_id));
        info!("Revoking create access from {}", user_id);
        let response = Self::authorized(self.client.post(&url), token)?
            .send()
            .await?;
        Self::parse_change(response).await
    }

    fn authorized(request: RequestBuilder, token: Option<&str>) -> Result<RequestBuilder, ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        warn!("Request to {} failed with {}", url, status);
        Err(ApiError::from_status(status, &body))
    }

    /// Mutations succeed on any 2xx; the body is optional and may not be JSON.
    async fn parse_change(response: Response) -> Result<AccessChangeResponse, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Access change failed with {}: {}", status, body);
            return Err(ApiError::from_status(status, &body));
        }
        Ok(decode_change(&body))
    }
}

/// Reads `message` and `user` independently so a malformed user record does
/// not cost the server's message.
fn decode_change(body: &str) -> AccessChangeResponse {
    if body.trim().is_empty() {
        return AccessChangeResponse::default();
    }
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Access change response is not JSON, ignoring body: {}", e);
            return AccessChangeResponse::default();
        }
    };
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    let user = match value.get("user") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<UserRecord>(raw.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Ignoring malformed user in access change response: {}", e);
                None
            }
        },
    };
    AccessChangeResponse { message, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_change_keeps_message_when_user_is_malformed() {
        let change = decode_change(r#"{"message":"Access granted","user":{"_id":"1"}}"#);
        assert_eq!(change.message.as_deref(), Some("Access granted"));
        assert!(change.user.is_none());
    }

    #[test]
    fn test_decode_change_tolerates_empty_and_plain_bodies() {
        let empty = decode_change("");
        assert!(empty.message.is_none() && empty.user.is_none());

        let plain = decode_change("OK");
        assert!(plain.message.is_none() && plain.user.is_none());

        let null_user = decode_change(&json!({ "message": "done", "user": null }).to_string());
        assert_eq!(null_user.message.as_deref(), Some("done"));
        assert!(null_user.user.is_none());
    }
}
