/*
 * Responsibility
 * - 環境変数や .env からの設定読み込み (Qd_Acfun などの認証情報, HTTP タイムアウト)
 * - 既知のサービスキーごとに必ず 1 エントリ (未設定ならデフォルト値)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::time::Duration;

pub const QD_ACFUN: &str = "Qd_Acfun";
pub const QD_BAIDU: &str = "Qd_Baidu";

/// Known service keys with their built-in defaults, in registration order.
const DEFAULTS: [(&str, &str); 2] = [(QD_ACFUN, ""), (QD_BAIDU, "")];

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Raw credential strings keyed by service.
///
/// Every known key is always present. Entries are only replaced while loading;
/// after that the store is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    entries: Vec<(&'static str, String)>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConfigStore {
    pub fn with_defaults() -> Self {
        let entries = DEFAULTS
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        Self { entries }
    }

    /// Overlays values from `lookup` on top of the defaults.
    ///
    /// A key whose lookup is `None` or empty keeps its default.
    pub fn load_from<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut store = Self::with_defaults();
        for (key, value) in store.entries.iter_mut() {
            if let Some(found) = lookup(key).filter(|v| !v.is_empty()) {
                *value = found;
            }
        }
        store
    }

    pub fn from_env() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }
}

pub struct Config {
    pub credentials: ConfigStore,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let credentials = ConfigStore::from_env();
        let http_timeout = parse_timeout(std::env::var("QD_HTTP_TIMEOUT_SECS").ok())?;

        Ok(Self {
            credentials,
            http_timeout,
        })
    }
}

fn parse_timeout(raw: Option<String>) -> Result<Duration, ConfigError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid("QD_HTTP_TIMEOUT_SECS")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_known_key() {
        let store = ConfigStore::with_defaults();
        assert_eq!(store.keys().collect::<Vec<_>>(), vec![QD_ACFUN, QD_BAIDU]);
        assert_eq!(store.get(QD_ACFUN), Some(""));
        assert_eq!(store.get(QD_BAIDU), Some(""));
    }

    #[test]
    fn load_overwrites_only_set_and_non_empty_values() {
        let store = ConfigStore::load_from(|key| match key {
            QD_ACFUN => Some("alice:pw1".to_string()),
            QD_BAIDU => Some(String::new()),
            _ => None,
        });
        assert_eq!(store.get(QD_ACFUN), Some("alice:pw1"));
        assert_eq!(store.get(QD_BAIDU), Some(""));
    }

    #[test]
    fn load_without_environment_keeps_every_key_defined() {
        let store = ConfigStore::load_from(|_| None);
        for key in [QD_ACFUN, QD_BAIDU] {
            assert!(store.get(key).is_some(), "{key} should be defined");
        }
        assert_eq!(store, ConfigStore::default());
    }

    #[test]
    fn unknown_keys_are_not_stored() {
        let store = ConfigStore::load_from(|_| Some("x:y".to_string()));
        assert_eq!(store.get("Qd_Unknown"), None);
        assert_eq!(store.keys().count(), 2);
    }

    #[test]
    fn timeout_defaults_when_unset_or_blank() {
        assert_eq!(parse_timeout(None).unwrap(), Duration::from_secs(10));
        assert_eq!(
            parse_timeout(Some("  ".into())).unwrap(),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn timeout_parses_seconds() {
        assert_eq!(
            parse_timeout(Some("25".into())).unwrap(),
            Duration::from_secs(25)
        );
    }

    #[test]
    fn timeout_rejects_zero_and_garbage() {
        for raw in ["0", "ten", "-3"] {
            let err = parse_timeout(Some(raw.into())).unwrap_err();
            assert_eq!(
                err.to_string(),
                "invalid configuration: QD_HTTP_TIMEOUT_SECS"
            );
        }
    }
}
