//! Stock lookups against a mock securities API.

use chrono::NaiveDate;
use haru_services::StockService;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(16, 40, 0)
        .unwrap()
}

#[tokio::test]
async fn test_json_quote() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getStockPriceInfo"))
        .and(query_param("serviceKey", "stock-key"))
        .and(query_param("resultType", "json"))
        .and(query_param("numOfRows", "1"))
        .and(query_param("likeSrtnCd", "005930"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": {
                "header": { "resultCode": "00", "resultMsg": "NORMAL SERVICE." },
                "body": {
                    "numOfRows": 1,
                    "pageNo": 1,
                    "totalCount": 250,
                    "items": { "item": [
                        { "basDt": "20240315", "srtnCd": "005930", "itmsNm": "삼성전자",
                          "mrktCtg": "KOSPI", "clpr": "72300", "vs": "-1200", "fltRt": "-1.63" }
                    ] }
                }
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(Some("stock-key".into()), &mock_server.uri()).unwrap();
    let report = service.report_at("삼성전자", at()).await;

    assert_eq!(
        report,
        "📉 삼성전자 (005930)\n\n💰 현재가: 72,300원\n🔵 전일대비: -1,200원\n📊 등락률: -1.63%\n📅 업데이트: 2024-03-15 16:40\n📈 거래소: KOSPI"
    );
}

#[tokio::test]
async fn test_xml_quote() {
    let mock_server = MockServer::start().await;

    let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
        <response><header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>\
        <body><items><item><mrktCtg>KOSPI</mrktCtg><clpr>195000</clpr><vs>3500</vs><fltRt>1.83</fltRt></item></items></body></response>";

    Mock::given(method("GET"))
        .and(path("/getStockPriceInfo"))
        .and(query_param("likeSrtnCd", "000660"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(Some("stock-key".into()), &mock_server.uri()).unwrap();
    let report = service.report_at("SK하이닉스", at()).await;

    assert!(report.starts_with("📈 SK하이닉스 (000660)"), "{}", report);
    assert!(report.contains("🔴 전일대비: +3,500원"));
    assert!(report.contains("📊 등락률: +1.83%"));
}

#[tokio::test]
async fn test_portal_error_is_no_data() {
    let mock_server = MockServer::start().await;

    let body = "<response><header><resultCode>30</resultCode>\
        <resultMsg>SERVICE_KEY_IS_NOT_REGISTERED_ERROR</resultMsg></header></response>";

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(Some("stock-key".into()), &mock_server.uri()).unwrap();
    assert_eq!(service.report("카카오").await, "주가 정보를 가져올 수 없습니다.");
}

#[tokio::test]
async fn test_http_failure_is_no_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(Some("stock-key".into()), &mock_server.uri()).unwrap();
    assert_eq!(service.report("기아").await, "주가 정보를 가져올 수 없습니다.");
}

#[tokio::test]
async fn test_unknown_name_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(Some("stock-key".into()), &mock_server.uri()).unwrap();
    let report = service.report("애플").await;

    assert_eq!(
        report,
        "'애플' 종목을 찾을 수 없습니다.\n💡 정확한 종목명을 입력해주세요 (예: 삼성전자, SK하이닉스)"
    );
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = StockService::with_base_url(None, &mock_server.uri()).unwrap();
    assert_eq!(
        service.report("삼성전자").await,
        "공공데이터포털 API 키가 설정되지 않았습니다."
    );
}
