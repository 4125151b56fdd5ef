use serde::Deserialize;

/// Response envelope used by every cinelog backend endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// The user-facing failure text, falling back to a generic message
    /// when the backend sent none.
    pub fn user_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "request failed".to_string())
    }
}
