/*
 * Responsibility
 * - AcFun のログイン → 日次サインイン
 * - アカウントごとに独立した Client (cookie store) を使う
 * - 1 アカウントの失敗で後続のアカウントを止めない
 */
use reqwest::{Client, header::REFERER};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

use super::CheckinTask;
use crate::error::CheckinError;
use crate::services::console::LineSink;
use crate::services::credentials::{Credential, split_credentials};

const SERVICE: &str = "acfun";
const LOGIN_HOST: &str = "https://id.app.acfun.cn";
const SIGN_IN_HOST: &str = "https://www.acfun.cn";
const LOGIN_PATH: &str = "/rest/web/login/signin";
const SIGN_IN_PATH: &str = "/rest/pc-direct/user/signIn";
const SITE_REFERER: &str = "https://www.acfun.cn/";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Common envelope of AcFun REST responses. `result == 0` means success.
#[derive(Debug, Deserialize)]
struct AcfunResponse {
    result: i64,
    #[serde(default, alias = "errorMsg")]
    error_msg: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl AcfunResponse {
    fn into_result(self) -> Result<String, CheckinError> {
        if self.result == 0 {
            return Ok(self.msg.unwrap_or_else(|| "ok".to_string()));
        }
        let message = self
            .error_msg
            .or(self.msg)
            .unwrap_or_else(|| format!("result code {}", self.result));
        Err(CheckinError::rejected(SERVICE, message))
    }
}

pub struct AcfunTask {
    raw: String,
    timeout: Duration,
    login_url: String,
    sign_in_url: String,
}

impl AcfunTask {
    pub fn new(raw: impl Into<String>, timeout: Duration) -> Self {
        Self {
            raw: raw.into(),
            timeout,
            login_url: format!("{LOGIN_HOST}{LOGIN_PATH}"),
            sign_in_url: format!("{SIGN_IN_HOST}{SIGN_IN_PATH}"),
        }
    }

    /// Sends both requests to `base_url` instead of the AcFun hosts.
    #[cfg(test)]
    pub fn with_base_url(raw: impl Into<String>, timeout: Duration, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        Self {
            login_url: format!("{base_url}{LOGIN_PATH}"),
            sign_in_url: format!("{base_url}{SIGN_IN_PATH}"),
            ..Self::new(raw, timeout)
        }
    }

    fn client(&self) -> Result<Client, CheckinError> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(client)
    }

    async fn check_in(&self, account: &Credential) -> Result<String, CheckinError> {
        let client = self.client()?;

        let login: AcfunResponse = client
            .post(&self.login_url)
            .form(&[
                ("username", account.user.as_str()),
                ("password", account.pwd.as_str()),
                ("key", ""),
                ("captcha", ""),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        login.into_result()?;

        let signed: AcfunResponse = client
            .post(&self.sign_in_url)
            .header(REFERER, SITE_REFERER)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        signed.into_result()
    }
}

impl CheckinTask for AcfunTask {
    fn name(&self) -> &'static str {
        SERVICE
    }

    fn run(&self, sink: &dyn LineSink) -> Result<(), CheckinError> {
        let Some(accounts) = split_credentials(&self.raw)? else {
            sink.write_line(&format!("[{SERVICE}] no accounts configured"))?;
            return Ok(());
        };

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CheckinError::Runtime)?;

        for account in &accounts {
            let user = account.masked_user();
            match rt.block_on(self.check_in(account)) {
                Ok(message) => {
                    info!(service = SERVICE, user = %user, "check-in succeeded");
                    sink.write_line(&format!("[{SERVICE}] {user}: {message}"))?;
                }
                Err(e) => {
                    warn!(service = SERVICE, user = %user, error = %e, "check-in failed");
                    sink.write_line(&format!("[{SERVICE}] {user}: {e}"))?;
                }
            }
        }
        Ok(())
    }
}
