use haru_core::{NetworkError, ReqwestErrorExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapsError {
    #[error("{0}")]
    Network(NetworkError),

    #[error("Invalid geocoding response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MapsError {
    fn from(e: reqwest::Error) -> Self {
        MapsError::Network(e.into_network_error())
    }
}
