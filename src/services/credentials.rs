/*
 * Responsibility
 * - `user1:pwd1&user2:pwd2` 形式の文字列をアカウントごとの Credential に分割
 * - 不正なエントリは分割時点でエラーにする (位置を示す, 中身は表示しない)
 */
use thiserror::Error;

const ACCOUNT_SEPARATOR: char = '&';
const FIELD_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub user: String,
    pub pwd: String,
}

impl Credential {
    /// User name safe for console output: at most the first three characters,
    /// always hiding at least the last one, then `***`.
    pub fn masked_user(&self) -> String {
        let shown = self.user.chars().count().saturating_sub(1).min(3);
        let head: String = self.user.chars().take(shown).collect();
        format!("{head}***")
    }
}

/// Malformed credential entry.
///
/// `entry` keeps the raw text, but `Display` only shows its position and length
/// since the entry may contain a password.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error(
        "malformed credential entry #{position} ({} chars): {reason}",
        .entry.chars().count()
    )]
    Malformed {
        position: usize,
        entry: String,
        reason: &'static str,
    },
}

/// Splits a raw credential string into pairs in input order.
///
/// Returns `Ok(None)` for the empty string. Every entry must contain exactly one
/// `:` with a non-empty user and password on either side.
pub fn split_credentials(raw: &str) -> Result<Option<Vec<Credential>>, CredentialError> {
    if raw.is_empty() {
        return Ok(None);
    }

    raw.split(ACCOUNT_SEPARATOR)
        .enumerate()
        .map(|(idx, entry)| parse_entry(idx + 1, entry))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_entry(position: usize, entry: &str) -> Result<Credential, CredentialError> {
    let malformed = |reason| CredentialError::Malformed {
        position,
        entry: entry.to_string(),
        reason,
    };

    let mut fields = entry.split(FIELD_SEPARATOR);
    let (Some(user), Some(pwd), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed("expected exactly one ':' between user and password"));
    };

    if user.is_empty() {
        return Err(malformed("user is empty"));
    }
    if pwd.is_empty() {
        return Err(malformed("password is empty"));
    }

    Ok(Credential {
        user: user.to_string(),
        pwd: pwd.to_string(),
    })
}
