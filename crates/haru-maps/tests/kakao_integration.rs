//! Integration tests for geocoding and transit estimates against a mock Kakao API.

use haru_maps::{Coordinates, KakaoGeocoder, TransitService};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ADDRESS_PATH: &str = "/v2/local/search/address.json";
const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";

fn documents(points: &[(&str, &str)]) -> serde_json::Value {
    let docs: Vec<serde_json::Value> = points
        .iter()
        .map(|(x, y)| serde_json::json!({ "address_name": "테스트", "x": x, "y": y }))
        .collect();
    serde_json::json!({
        "documents": docs,
        "meta": { "total_count": docs.len(), "is_end": true }
    })
}

async fn mount_search(server: &MockServer, route: &str, query: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("query", query))
        .and(header("Authorization", "KakaoAK kakao-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_address_search_hit() {
    let mock_server = MockServer::start().await;
    mount_search(
        &mock_server,
        ADDRESS_PATH,
        "서울특별시 강남구",
        documents(&[("127.0473", "37.5172"), ("0", "0")]),
    )
    .await;

    let geocoder = KakaoGeocoder::with_base_url("kakao-key".into(), &mock_server.uri()).unwrap();
    let coords = geocoder.coordinates("서울특별시 강남구").await;

    assert_eq!(coords, Some(Coordinates::new(127.0473, 37.5172)));
}

#[tokio::test]
async fn test_keyword_fallback() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, ADDRESS_PATH, "강남역", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "강남역", documents(&[("127.0276", "37.4979")])).await;

    let geocoder = KakaoGeocoder::with_base_url("kakao-key".into(), &mock_server.uri()).unwrap();
    let coords = geocoder.coordinates("강남역").await;

    assert_eq!(coords, Some(Coordinates::new(127.0276, 37.4979)));
}

#[tokio::test]
async fn test_nothing_found() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, ADDRESS_PATH, "zzz", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "zzz", documents(&[])).await;

    let geocoder = KakaoGeocoder::with_base_url("kakao-key".into(), &mock_server.uri()).unwrap();
    assert_eq!(geocoder.coordinates("zzz").await, None);
}

#[tokio::test]
async fn test_server_error_reads_as_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let geocoder = KakaoGeocoder::with_base_url("kakao-key".into(), &mock_server.uri()).unwrap();
    assert_eq!(geocoder.coordinates("강남역").await, None);
}

#[tokio::test]
async fn test_directions_between_two_stations() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, ADDRESS_PATH, "강남역", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "강남역", documents(&[("127.0276", "37.4979")])).await;
    mount_search(&mock_server, ADDRESS_PATH, "서울역", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "서울역", documents(&[("126.9707", "37.5547")])).await;

    let service = TransitService::new(Some("kakao-key".into()), &mock_server.uri()).unwrap();
    let report = service.directions("강남역", "서울역").await;

    assert!(report.starts_with("🚇 강남역 → 서울역\n\n"), "{}", report);
    assert!(report.contains("📍 직선거리: 8.1km"));
    assert!(report.contains("⏱️ 예상 소요시간: 20분"));
    assert!(report.contains("🚌 [버스] 또는 [지하철] 이용"));
}

#[tokio::test]
async fn test_directions_unknown_destination() {
    let mock_server = MockServer::start().await;
    mount_search(&mock_server, ADDRESS_PATH, "강남역", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "강남역", documents(&[("127.0276", "37.4979")])).await;
    mount_search(&mock_server, ADDRESS_PATH, "없는곳", documents(&[])).await;
    mount_search(&mock_server, KEYWORD_PATH, "없는곳", documents(&[])).await;

    let service = TransitService::new(Some("kakao-key".into()), &mock_server.uri()).unwrap();
    let report = service.directions("강남역", "없는곳").await;

    assert!(report.starts_with("❌ 주소를 찾을 수 없습니다."), "{}", report);
    assert!(report.contains("도착지 '없는곳' 좌표: 찾지 못함"));
}

#[tokio::test]
async fn test_rejected_key_reads_as_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ADDRESS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorType": "AccessDeniedError",
            "message": "cannot find appkey"
        })))
        .mount(&mock_server)
        .await;

    let service = TransitService::new(Some("bad-key".into()), &mock_server.uri()).unwrap();
    let report = service.directions("강남역", "서울역").await;

    assert!(report.starts_with("❌ 주소를 찾을 수 없습니다."), "{}", report);
    assert!(report.contains("출발지 '강남역' 좌표: 찾지 못함"));
    assert!(report.contains("도착지 '서울역' 좌표: 찾지 못함"));
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = TransitService::new(None, &mock_server.uri()).unwrap();
    let report = service.directions("강남역", "서울역").await;

    assert!(report.contains("카카오 API 키가 설정되지 않았습니다"));
}
