//! GNAME HTTP 请求方法

use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::utils::log_sanitizer::{mask_params, mask_secret};

use super::sign::signing_timestamp;
use super::{GnameEnvelope, GnameProvider, GnameResponse, PROVIDER_NAME, Params, SUCCESS_CODE};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

impl GnameProvider {
    /// 执行 GNAME API 请求（POST 表单，参数随 body 签名）
    ///
    /// `appid` 与 `gntime` 由这里补上，调用方只给业务参数。
    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Params,
    ) -> Result<GnameResponse<T>> {
        self.check_credentials()?;
        params.insert("appid".to_string(), self.app_id.clone());

        // 1. 签名
        let timestamp = signing_timestamp()?;
        let signed = self.sign(endpoint, params, timestamp)?;

        log::debug!(
            "[{PROVIDER_NAME}] {} params: {} gntoken={}",
            signed.endpoint,
            mask_params(&signed.canonical, &["appid"]),
            mask_secret(&signed.token)
        );

        // 2. 发送请求
        let client = self.http_client().await?;
        let url = format!("{}{endpoint}", self.base_url);
        let request = client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(signed.body);

        let (status, response_text) =
            HttpUtils::execute_request(request, PROVIDER_NAME, "POST", endpoint).await?;

        // 3. 非 2xx 直接带原始 body 返回
        if !HttpUtils::is_success(status) {
            log::error!("[{PROVIDER_NAME}] {endpoint} returned HTTP {status}");
            return Err(ProviderError::HttpStatus {
                provider: PROVIDER_NAME.to_string(),
                status,
                body: response_text,
            });
        }

        // 4. 先看信封 code，HTTP 200 也可能是失败
        let envelope: GnameEnvelope = HttpUtils::parse_json(&response_text, PROVIDER_NAME)?;
        if envelope.code != SUCCESS_CODE {
            log::error!(
                "[{PROVIDER_NAME}] API error on {endpoint}: {} - {}",
                envelope.code,
                envelope.msg
            );
            return Err(ProviderError::Api {
                provider: PROVIDER_NAME.to_string(),
                code: envelope.code,
                message: envelope.msg,
            });
        }

        // 5. 同一份 body 解析完整响应
        HttpUtils::parse_json(&response_text, PROVIDER_NAME)
    }

    fn check_credentials(&self) -> Result<()> {
        let missing = if self.app_id.trim().is_empty() {
            Some("app_id")
        } else if self.app_key.trim().is_empty() {
            Some("app_key")
        } else {
            None
        };

        match missing {
            Some(field) => Err(ProviderError::InvalidCredentials {
                provider: PROVIDER_NAME.to_string(),
                detail: format!("{field} must not be empty"),
            }),
            None => Ok(()),
        }
    }
}
