use haru_core::{NetworkError, ReqwestErrorExt};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Forecast values for one forecast hour, keyed by KMA category code
/// (`T1H`, `SKY`, `PTY`, `REH`, `WSD`, `RN1`, ...).
pub type HourSlot = BTreeMap<String, String>;

/// Forecast hours (`HHMM`) mapped to their values.
pub type HourlySlots = BTreeMap<String, HourSlot>;

/// Weather condition derived from KMA's SKY and PTY codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherCondition {
    Clear,
    MostlyCloudy,
    Overcast,
    #[default]
    Fair,
    Rain,
    RainSnow,
    Snow,
    Shower,
}

impl WeatherCondition {
    /// Map KMA codes to a condition. Precipitation (PTY) wins over sky state.
    /// See the KMA short-term forecast API guide for the code tables.
    pub fn from_codes(sky: &str, pty: &str) -> Self {
        match pty {
            "1" => return Self::Rain,
            "2" => return Self::RainSnow,
            "3" => return Self::Snow,
            "4" => return Self::Shower,
            _ => {}
        }

        match sky {
            "1" => Self::Clear,
            "3" => Self::MostlyCloudy,
            "4" => Self::Overcast,
            _ => Self::Fair,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "맑음",
            Self::MostlyCloudy => "구름많음",
            Self::Overcast => "흐림",
            Self::Fair => "보통",
            Self::Rain => "비",
            Self::RainSnow => "비/눈",
            Self::Snow => "눈",
            Self::Shower => "소나기",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Fair => "🌤️",
            Self::Rain => "🌧️",
            Self::RainSnow => "🌨️",
            Self::Snow => "❄️",
            Self::Shower => "⛈️",
        }
    }
}

/// One `item` of the forecast response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastItem {
    pub category: String,
    pub fcst_time: String,
    pub fcst_value: String,
}

/// Group forecast items by forecast hour
pub fn group_by_hour(items: Vec<ForecastItem>) -> HourlySlots {
    let mut slots = HourlySlots::new();
    for item in items {
        slots
            .entry(item.fcst_time)
            .or_default()
            .insert(item.category, item.fcst_value);
    }
    slots
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KmaEnvelope {
    #[serde(default)]
    pub response: KmaResponse,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KmaResponse {
    #[serde(default)]
    pub header: KmaHeader,
    #[serde(default)]
    pub body: Option<KmaBody>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KmaHeader {
    #[serde(rename = "resultCode")]
    pub result_code: Option<String>,
    #[serde(rename = "resultMsg")]
    pub result_msg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct KmaBody {
    // An empty result comes back as `"items": ""`
    #[serde(default)]
    pub items: serde_json::Value,
}

impl KmaBody {
    pub fn into_items(self) -> Result<Vec<ForecastItem>, WeatherError> {
        match self.items.get("item") {
            Some(list) => serde_json::from_value(list.clone())
                .map_err(|e| WeatherError::Parse(format!("forecast item: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("{0}")]
    Network(NetworkError),
    #[error("KMA API returned {code}: {message}")]
    Api { code: String, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        WeatherError::Network(e.into_network_error())
    }
}

impl WeatherError {
    /// Message shown in place of a forecast
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(e) => format!("🌐 기상청 API 연결 오류: {}", e),
            Self::Api { code, message } => {
                format!("⚠️ 기상청 API 오류\n코드: {}\n메시지: {}", code, message)
            }
            Self::Parse(e) => format!("⚠️ 날씨 서비스 오류: {}", e),
        }
    }
}
