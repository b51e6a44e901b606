//! Identity service: login, password flows, and the admin user directory.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

use super::client::{message_of, HttpBackend};
use crate::auth::LoginResponse;
use crate::users::{parse_user_list, NewUser, UserEdit, UserRecord};
use crate::{ApiError, IdentityBackend, UserDirectory};

impl HttpBackend {
    async fn identity_post(&self, path: &[&str], body: Value) -> Result<String, ApiError> {
        let url = Self::endpoint(&self.config.identity_url, path)?;
        self.send_for_message(self.request(Method::POST, url).json(&body))
            .await
    }
}

#[async_trait]
impl IdentityBackend for HttpBackend {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = Self::endpoint(&self.config.identity_url, &["api", "login"])?;
        let body = json!({ "UserName": username, "Password": password });
        let response: LoginResponse = self
            .send_json(self.http.post(url).json(&body))
            .await?;
        info!(user = %response.current_user.user_name, "signed in");
        Ok(response)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.identity_post(&["api", "logout"], json!({})).await?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        self.identity_post(&["api", "forgot-password"], json!({ "Email": email }))
            .await
    }

    async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        self.identity_post(
            &["api", "reset-password"],
            json!({ "email": email, "token": token, "newPassword": new_password }),
        )
        .await
    }

    async fn update_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        self.identity_post(
            &["api", "update-password"],
            json!({
                "UserName": username,
                "OldPassword": old_password,
                "NewPassword": new_password,
            }),
        )
        .await
    }
}

#[async_trait]
impl UserDirectory for HttpBackend {
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError> {
        let url = Self::endpoint(&self.config.identity_url, &["api", "users"])?;
        let body: Value = self.send_json(self.request(Method::GET, url)).await?;
        parse_user_list(&body)
    }

    async fn create_user(&self, user: &NewUser) -> Result<String, ApiError> {
        user.validate()?;
        let url = Self::endpoint(&self.config.identity_url, &["send-email"])?;
        let body: Value = self
            .send_json(self.request(Method::POST, url).json(user))
            .await?;

        let message = message_of(&body).unwrap_or_default();
        // A 200 with `success: false` is still a rejection.
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(ApiError::InvalidInput(message));
        }
        Ok(message)
    }

    async fn edit_user(&self, edit: &UserEdit) -> Result<(), ApiError> {
        let url = Self::endpoint(&self.config.identity_url, &["api", "users", &edit.id])?;
        self.send(self.request(Method::PUT, url).json(edit)).await?;
        Ok(())
    }

    async fn set_locked(&self, email: &str, lock: bool) -> Result<(), ApiError> {
        self.identity_post(&["api", "users", "lock"], json!({ "email": email, "lock": lock }))
            .await?;
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let url = Self::endpoint(&self.config.identity_url, &["api", "users", id])?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }
}
