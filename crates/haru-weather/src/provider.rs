use chrono::{NaiveDateTime, Timelike};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::base_time::BaseTime;
use crate::format::format_report;
use crate::grid::{resolve_grid, GridCell};
use crate::types::{group_by_hour, ForecastItem, KmaEnvelope, WeatherError};

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Shown instead of a forecast when no KMA key is configured
pub const MISSING_KEY_MESSAGE: &str = "🌤️ 한국 기상청 날씨 서비스

⚠️ 기상청 API 키가 설정되지 않았습니다.

📝 API 키 발급 방법:
1. https://data.go.kr 접속
2. 회원가입 및 로그인
3. '기상청_단기예보 조회서비스' 검색
4. 활용신청 → API 키 발급
5. .env 파일에 KMA_API_KEY 설정

💡 무료로 하루 1000건까지 사용 가능합니다!";

/// KMA ultra-short-term forecast lookups
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherService {
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forecast report for `location` as of now
    pub async fn report(&self, location: &str) -> String {
        self.report_at(location, haru_core::kst_now()).await
    }

    /// Forecast report for `location` as of `now` (KST)
    pub async fn report_at(&self, location: &str, now: NaiveDateTime) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let cell = resolve_grid(location);
        let base = BaseTime::latest_at(now);

        match self.fetch(api_key, &cell, &base).await {
            Ok(items) if items.is_empty() => {
                format!("📍 {} 날씨 데이터를 찾을 수 없습니다.", cell.display_name)
            }
            Ok(items) => {
                let slots = group_by_hour(items);
                format_report(&cell.display_name, &slots, now.hour(), &base)
            }
            Err(e) => {
                tracing::warn!("Weather lookup for '{}' failed: {}", location, e);
                e.user_message()
            }
        }
    }

    /// Fetch raw forecast items for one grid cell and issue time
    pub async fn fetch(
        &self,
        api_key: &str,
        cell: &GridCell,
        base: &BaseTime,
    ) -> Result<Vec<ForecastItem>, WeatherError> {
        let url = format!("{}/getUltraSrtFcst", self.base_url);
        let nx = cell.nx.to_string();
        let ny = cell.ny.to_string();
        let base_date = base.base_date();
        let base_time = base.base_time();

        tracing::debug!(
            "Requesting forecast nx={} ny={} base={} {}",
            nx,
            ny,
            base_date,
            base_time
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("serviceKey", api_key),
                ("pageNo", "1"),
                ("numOfRows", "60"),
                ("dataType", "JSON"),
                ("base_date", base_date.as_str()),
                ("base_time", base_time.as_str()),
                ("nx", nx.as_str()),
                ("ny", ny.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let envelope: KmaEnvelope = serde_json::from_str(&text)
            .map_err(|e| WeatherError::Parse(format!("unexpected response: {}", e)))?;

        let header = envelope.response.header;
        if header.result_code.as_deref() != Some("00") {
            return Err(WeatherError::Api {
                code: header.result_code.unwrap_or_else(|| "-".to_string()),
                message: header.result_msg.unwrap_or_else(|| "-".to_string()),
            });
        }

        match envelope.response.body {
            Some(body) => body.into_items(),
            None => Ok(Vec::new()),
        }
    }
}
