//! Service-specific error types.

use haru_core::{NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StockError {
    #[error("{0}")]
    Network(NetworkError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid {field} value '{value}'")]
    Format { field: &'static str, value: String },
}

impl From<reqwest::Error> for StockError {
    fn from(e: reqwest::Error) -> Self {
        StockError::Network(e.into_network_error())
    }
}

impl StockError {
    /// Only formatting problems get their own message; everything else reads
    /// as "no price available".
    pub fn user_message(&self) -> String {
        match self {
            Self::Format { .. } => format!("주가 정보 포맷팅 오류: {}", self),
            _ => "주가 정보를 가져올 수 없습니다.".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("{0}")]
    Network(NetworkError),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no choices")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(e: reqwest::Error) -> Self {
        ChatError::Network(e.into_network_error())
    }
}
