/*
 * Responsibility
 * - チェックイン処理のエラー定義
 * - credential / HTTP / サービス側の拒否 / 出力エラーを統一的に扱う
 */
use thiserror::Error;

use crate::services::credentials::CredentialError;

#[derive(Debug, Error)]
pub enum CheckinError {
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{service} rejected the request: {message}")]
    Rejected {
        service: &'static str,
        message: String,
    },
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl CheckinError {
    pub fn rejected(service: &'static str, message: impl Into<String>) -> Self {
        Self::Rejected {
            service,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn credential_errors_display_transparently() {
        let err: CheckinError = CredentialError::Malformed {
            position: 3,
            entry: "bob".into(),
            reason: "user is empty",
        }
        .into();
        assert_eq!(
            err.to_string(),
            "malformed credential entry #3 (3 chars): user is empty"
        );
    }

    #[test]
    fn rejected_names_the_service() {
        let err = CheckinError::rejected("acfun", "wrong password");
        assert_eq!(
            err.to_string(),
            "acfun rejected the request: wrong password"
        );
    }

    #[test]
    fn io_errors_become_output_errors() {
        let err: CheckinError = io::Error::new(io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(err, CheckinError::Output(_)));
        assert_eq!(err.to_string(), "output error: closed");
    }
}
