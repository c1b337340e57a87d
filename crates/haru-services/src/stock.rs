//! KRX closing prices from the data.go.kr securities service.
//!
//! The service is asked for JSON, but key and quota errors from the portal
//! gateway come back as XML, so both shapes are handled.

use chrono::NaiveDateTime;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::error::StockError;

const REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_MARKET: &str = "KRX";

pub const MISSING_KEY_MESSAGE: &str = "공공데이터포털 API 키가 설정되지 않았습니다.";
pub const NO_DATA_MESSAGE: &str = "주가 정보를 가져올 수 없습니다.";

const STOCK_CODES: &[(&str, &str)] = &[
    ("삼성전자", "005930"),
    ("SK하이닉스", "000660"),
    ("NAVER", "035420"),
    ("네이버", "035420"),
    ("카카오", "035720"),
    ("LG화학", "051910"),
    ("현대차", "005380"),
    ("현대자동차", "005380"),
    ("POSCO홀딩스", "005490"),
    ("포스코", "005490"),
    ("한국전력", "015760"),
    ("셀트리온", "068270"),
    ("LG전자", "066570"),
    ("기아", "000270"),
    ("삼성바이오로직스", "207940"),
    ("SK이노베이션", "096770"),
    ("현대모비스", "012330"),
    ("삼성SDI", "006400"),
];

/// Short code for a listed company name (exact match)
pub fn stock_code(name: &str) -> Option<&'static str> {
    STOCK_CODES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
}

/// Raw item fields as the portal sends them; numbers may be quoted or not
#[derive(Debug, Default, Deserialize)]
struct RawItem {
    #[serde(rename = "mrktCtg", default, deserialize_with = "text_or_number")]
    market: Option<String>,
    #[serde(rename = "clpr", default, deserialize_with = "text_or_number")]
    close: Option<String>,
    #[serde(rename = "vs", default, deserialize_with = "text_or_number")]
    change: Option<String>,
    #[serde(rename = "fltRt", default, deserialize_with = "text_or_number")]
    rate: Option<String>,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: Option<&str>) -> Result<T, StockError> {
    let value = raw.unwrap_or("0").trim();
    value.parse().map_err(|_| StockError::Format {
        field,
        value: value.to_string(),
    })
}

/// One day's closing price and change
#[derive(Debug, Clone, PartialEq)]
pub struct StockQuote {
    pub market: String,
    pub close: i64,
    pub change: i64,
    pub rate: f64,
}

impl TryFrom<RawItem> for StockQuote {
    type Error = StockError;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        Ok(Self {
            market: raw
                .market
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MARKET.to_string()),
            close: parse_field("clpr", raw.close.as_deref())?,
            change: parse_field("vs", raw.change.as_deref())?,
            rate: parse_field("fltRt", raw.rate.as_deref())?,
        })
    }
}

impl StockQuote {
    pub fn render(&self, name: &str, code: &str, now: NaiveDateTime) -> String {
        let (emoji, sign, color) = if self.rate > 0.0 {
            ("📈", "+", "🔴")
        } else if self.rate < 0.0 {
            ("📉", "", "🔵")
        } else {
            ("📊", "", "⚪")
        };

        format!(
            "{emoji} {name} ({code})\n\n\
             💰 현재가: {}원\n\
             {color} 전일대비: {sign}{}원\n\
             📊 등락률: {sign}{:.2}%\n\
             📅 업데이트: {}\n\
             📈 거래소: {}",
            group_thousands(self.close),
            group_thousands(self.change),
            self.rate,
            now.format("%Y-%m-%d %H:%M"),
            self.market
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// First item of a JSON response, if the result code is `00`.
/// `items.item` is a list for several rows and a bare object for one.
fn first_json_item(text: &str) -> Result<Option<RawItem>, StockError> {
    let data: Value =
        serde_json::from_str(text).map_err(|e| StockError::Parse(e.to_string()))?;

    let Some(response) = data.get("response") else {
        return Ok(None);
    };

    let code = response.pointer("/header/resultCode").and_then(Value::as_str);
    if code != Some("00") {
        tracing::debug!("Stock API returned result code {:?}", code);
        return Ok(None);
    }

    let item = match response.pointer("/body/items/item") {
        Some(Value::Array(list)) => list.first(),
        Some(item) if item.is_object() => Some(item),
        _ => None,
    };

    match item {
        Some(Value::Object(fields)) if !fields.is_empty() => {
            serde_json::from_value(Value::Object(fields.clone()))
                .map(Some)
                .map_err(|e| StockError::Parse(e.to_string()))
        }
        _ => Ok(None),
    }
}

/// First `<item>` of an XML response, if the first `<resultCode>` is `00`
/// (or absent)
fn first_xml_item(text: &str) -> Result<Option<RawItem>, StockError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut current: Option<String> = None;
    let mut seen_code = false;
    let mut in_item = false;
    let mut item: Option<RawItem> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if name == "item" && item.is_none() {
                    in_item = true;
                    item = Some(RawItem::default());
                }
                current = Some(name);
            }
            Ok(Event::Text(t)) => {
                let value = t
                    .unescape()
                    .map_err(|e| StockError::Parse(e.to_string()))?
                    .into_owned();

                match current.as_deref() {
                    Some("resultCode") if !seen_code => {
                        seen_code = true;
                        if value != "00" {
                            tracing::debug!("Stock API returned result code {}", value);
                            return Ok(None);
                        }
                    }
                    Some(tag) if in_item => {
                        if let Some(raw) = item.as_mut() {
                            match tag {
                                "mrktCtg" => raw.market = Some(value),
                                "clpr" => raw.close = Some(value),
                                "vs" => raw.change = Some(value),
                                "fltRt" => raw.rate = Some(value),
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"item" && in_item {
                    in_item = false;
                }
                current = None;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(StockError::Parse(e.to_string())),
        }
    }

    Ok(item)
}

/// Daily stock price lookups by company name
#[derive(Debug, Clone)]
pub struct StockService {
    client: Arc<Client>,
    api_key: Option<String>,
    base_url: String,
}

impl StockService {
    pub fn with_base_url(api_key: Option<String>, base_url: &str) -> Result<Self, StockError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn report(&self, name: &str) -> String {
        self.report_at(name, haru_core::kst_now()).await
    }

    /// Price report for `name`, stamped with `now` (KST)
    pub async fn report_at(&self, name: &str, now: NaiveDateTime) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let Some(code) = stock_code(name) else {
            return format!(
                "'{}' 종목을 찾을 수 없습니다.\n💡 정확한 종목명을 입력해주세요 (예: 삼성전자, SK하이닉스)",
                name
            );
        };

        match self.fetch(api_key, code).await {
            Ok(Some(quote)) => quote.render(name, code, now),
            Ok(None) => NO_DATA_MESSAGE.to_string(),
            Err(e) => {
                tracing::warn!("Stock lookup for {} ({}) failed: {}", name, code, e);
                e.user_message()
            }
        }
    }

    /// Latest quote for a short code; `Ok(None)` when the API has no data
    pub async fn fetch(&self, api_key: &str, code: &str) -> Result<Option<StockQuote>, StockError> {
        let url = format!("{}/getStockPriceInfo", self.base_url);

        tracing::debug!("Requesting stock price for {}", code);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("serviceKey", api_key),
                ("numOfRows", "1"),
                ("pageNo", "1"),
                ("resultType", "json"),
                ("likeSrtnCd", code),
            ])
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        let body = text.trim();

        let raw = if body.starts_with('<') {
            first_xml_item(body)?
        } else {
            first_json_item(body)?
        };

        raw.map(StockQuote::try_from).transpose()
    }
}
