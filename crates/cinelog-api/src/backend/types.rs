use serde::{Deserialize, Serialize};

/// Payload of a successful login.
#[derive(Debug, Deserialize)]
pub struct AuthTokenData {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_token_data() {
        let json = r#"{"token": "eyJhbGciOi.abc.def"}"#;
        let data: AuthTokenData = serde_json::from_str(json).unwrap();
        assert_eq!(data.token, "eyJhbGciOi.abc.def");
    }

    #[test]
    fn test_login_request_shape() {
        let req = LoginRequest {
            email: "a@b.com",
            password: "secret",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["password"], "secret");
    }
}
