//! Uniform response envelope
//!
//! Success is `{ "code": 200, ...payload }`, failure is `{ "code": 4xx|5xx, "msg": "..." }`.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::catalog::SearchResultItem;
use crate::error::{Result, ScrapeError};

pub const SUCCESS_CODE: u16 = 200;

/// Response wrapper keyed by a numeric status code
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success {
        code: u16,
        #[serde(flatten)]
        payload: T,
    },
    Failure {
        code: u16,
        msg: String,
    },
}

/// Search payload, `results` is always an array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPayload {
    pub results: Vec<SearchResultItem>,
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Envelope::Success {
            code: SUCCESS_CODE,
            payload,
        }
    }

    /// Failure envelope. Internal causes are logged here and replaced by the
    /// generic message.
    pub fn failure(err: &ScrapeError) -> Self {
        if err.is_internal() {
            error!("Scraping failed: {}", err);
        } else {
            info!("Request rejected: {}", err);
        }

        Envelope::Failure {
            code: err.status_code(),
            msg: err.public_message(),
        }
    }

    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(payload) => Self::success(payload),
            Err(e) => Self::failure(&e),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Envelope::Success { code, .. } | Envelope::Failure { code, .. } => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success { .. })
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Envelope::Success { payload, .. } => Some(payload),
            Envelope::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Success { .. } => None,
            Envelope::Failure { msg, .. } => Some(msg),
        }
    }
}
