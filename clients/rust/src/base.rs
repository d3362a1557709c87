use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// A session acquired at login. It is handed to the sdk explicitly and is
/// only used while it has not expired.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// Expiry as a timestamp in millis
    pub expires_at: i64,
}

impl Session {
    pub fn new<T: Into<String>>(token: T, expires_at: i64) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        self.token.is_empty() || now >= self.expires_at
    }

    /// Invalidates the session, used on logout
    pub fn clear(&mut self) {
        self.token.clear();
        self.expires_at = 0;
    }
}

pub(crate) struct BaseClient {
    address: String,
    session: RwLock<Option<Session>>,
    api_key: Option<String>,
}

#[derive(Debug)]
pub enum APIError {
    Network,
    MalformedResponse,
    UnexpectedStatusCode(StatusCode),
}
pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            session: RwLock::new(None),
            api_key: None,
        }
    }

    pub fn set_session(&self, session: Option<Session>) {
        if let Ok(mut current) = self.session.write() {
            *current = session;
        }
    }

    pub fn clear_session(&self) {
        if let Ok(mut current) = self.session.write() {
            if let Some(session) = current.as_mut() {
                session.clear();
            }
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    fn bearer_token(&self) -> Option<String> {
        let now = chrono::Utc::now().timestamp_millis();
        let session = self.session.read().ok()?;
        session
            .as_ref()
            .filter(|session| !session.is_expired(now))
            .map(|session| session.token.clone())
    }

    fn get_client(&self, method: Method, path: String) -> RequestBuilder {
        let client = Client::new();
        let url = format!("{}/{}", self.address, path);
        let mut builder = client.request(method, &url);

        if let Some(token) = self.bearer_token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(api_key) = &self.api_key {
            builder = builder.header("x-api-key", api_key.clone());
        }
        builder
    }

    fn check_status_code(res: &Response, expected_status_codes: &[StatusCode]) -> Result<(), APIError> {
        let status = res.status();
        if !expected_status_codes.contains(&status) {
            return Err(APIError::UnexpectedStatusCode(status));
        }
        Ok(())
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<T> {
        Self::check_status_code(&res, expected_status_codes)?;
        res.json::<T>()
            .await
            .map_err(|_| APIError::MalformedResponse)
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        builder: RequestBuilder,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<T> {
        let res = match builder.send().await {
            Ok(res) => res,
            Err(_) => return Err(APIError::Network),
        };
        self.handle_api_response(res, expected_status_codes).await
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::GET, path), &[expected_status_code])
            .await
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(self.get_client(Method::DELETE, path), &[expected_status_code])
            .await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::PUT, path).json(&body),
            &[expected_status_code],
        )
        .await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.post_expecting(body, path, &[expected_status_code])
            .await
    }

    pub async fn post_expecting<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_codes: &[StatusCode],
    ) -> APIResponse<T> {
        self.send(
            self.get_client(Method::POST, path).json(&body),
            expected_status_codes,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_or_cleared_sessions_are_not_used() {
        let base = BaseClient::new("http://localhost".into());
        assert_eq!(base.bearer_token(), None);

        let far_future = chrono::Utc::now().timestamp_millis() + 1000 * 60 * 60;
        base.set_session(Some(Session::new("abc", far_future)));
        assert_eq!(base.bearer_token(), Some("abc".to_string()));

        base.clear_session();
        assert_eq!(base.bearer_token(), None);

        base.set_session(Some(Session::new("abc", 0)));
        assert_eq!(base.bearer_token(), None);
    }

    #[test]
    fn session_expiry() {
        let mut session = Session::new("token", 100);
        assert!(!session.is_expired(99));
        assert!(session.is_expired(100));
        session.clear();
        assert!(session.is_expired(0));
    }
}
