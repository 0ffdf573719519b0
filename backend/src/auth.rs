//! Acting-user extraction.
//!
//! Authentication proper happens in front of this service; it forwards the
//! authenticated username in `X-Kerckhoff-User`. Handlers that record a
//! creator take an `ActingUser` argument and are rejected with 401 when the
//! header is missing or blank.

use crate::error::ApiError;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

pub const USER_HEADER: &str = "X-Kerckhoff-User";

#[derive(Debug, Clone, PartialEq)]
pub struct ActingUser(pub String);

impl ActingUser {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromRequest for ActingUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .headers()
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| ActingUser(name.to_string()))
            .ok_or(ApiError::Unauthorized);
        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn reads_trimmed_header() {
        let req = TestRequest::default()
            .insert_header((USER_HEADER, "  editor "))
            .to_http_request();
        let user = ActingUser::extract(&req).await.unwrap();
        assert_eq!(user.name(), "editor");
    }

    #[actix_web::test]
    async fn missing_or_blank_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        assert!(matches!(ActingUser::extract(&req).await, Err(ApiError::Unauthorized)));

        let req = TestRequest::default()
            .insert_header((USER_HEADER, "   "))
            .to_http_request();
        assert!(matches!(ActingUser::extract(&req).await, Err(ApiError::Unauthorized)));
    }
}
