use std::fmt::Write;

use crate::distance::{haversine_km, Coordinates};
use crate::error::MapsError;
use crate::geocode::KakaoGeocoder;

pub const MISSING_KEY_MESSAGE: &str =
    "⚠️ 카카오 API 키가 설정되지 않았습니다.\n📝 .env 파일에 KAKAO_API_KEY를 설정해주세요!";

/// Minutes per straight-line kilometre, covering waits and detours
const MINUTES_PER_KM: f64 = 2.5;
const MIN_TRIP_MINUTES: u32 = 15;

/// Suggested way to travel a given straight-line distance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walk,
    BusOrSubway,
    SubwayOrBus,
}

impl TravelMode {
    pub fn for_distance(km: f64) -> Self {
        if km < 2.0 {
            Self::Walk
        } else if km < 10.0 {
            Self::BusOrSubway
        } else {
            Self::SubwayOrBus
        }
    }

    fn advice(&self) -> &'static str {
        match self {
            Self::Walk => "🚶‍♂️ 도보 이용 권장 (15-20분)\n",
            Self::BusOrSubway => "🚌 [버스] 또는 [지하철] 이용\n🚇 환승 1회 예상\n",
            Self::SubwayOrBus => "🚇 [지하철] 또는 [버스] 이용 권장\n",
        }
    }
}

/// Rough door-to-door minutes for a straight-line distance
pub fn estimate_minutes(km: f64) -> u32 {
    ((km * MINUTES_PER_KM) as u32).max(MIN_TRIP_MINUTES)
}

/// Straight-line travel estimates between two places
#[derive(Debug, Clone)]
pub struct TransitService {
    geocoder: Option<KakaoGeocoder>,
}

impl TransitService {
    /// `None` (or a blank key) leaves the service unconfigured
    pub fn new(api_key: Option<String>, base_url: &str) -> Result<Self, MapsError> {
        let geocoder = match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Some(KakaoGeocoder::with_base_url(key, base_url)?),
            None => None,
        };
        Ok(Self { geocoder })
    }

    pub async fn directions(&self, departure: &str, destination: &str) -> String {
        let Some(geocoder) = &self.geocoder else {
            return MISSING_KEY_MESSAGE.to_string();
        };

        let from = geocoder.coordinates(departure).await;
        let to = geocoder.coordinates(destination).await;

        match (from, to) {
            (Some(from), Some(to)) => format_route(departure, destination, from, to),
            _ => format_not_found(departure, destination, from, to),
        }
    }
}

pub fn format_route(departure: &str, destination: &str, from: Coordinates, to: Coordinates) -> String {
    let km = haversine_km(from, to);
    let mut out = format!("🚇 {} → {}\n\n", departure, destination);
    let _ = writeln!(out, "📍 직선거리: {:.1}km", km);
    let _ = writeln!(out, "⏱️ 예상 소요시간: {}분\n", estimate_minutes(km));
    out.push_str("🛤️ 추천 교통수단:\n");
    out.push_str(TravelMode::for_distance(km).advice());
    out.push_str("\n📱 실시간 정보는 지하철앱을 확인하세요");
    out
}

fn describe(coords: Option<Coordinates>) -> String {
    coords.map_or_else(|| "찾지 못함".to_string(), |c| c.to_string())
}

pub fn format_not_found(
    departure: &str,
    destination: &str,
    from: Option<Coordinates>,
    to: Option<Coordinates>,
) -> String {
    let mut out = String::from("❌ 주소를 찾을 수 없습니다.\n\n");
    out.push_str("🔍 디버그 정보:\n");
    let _ = writeln!(out, "출발지 '{}' 좌표: {}", departure, describe(from));
    let _ = writeln!(out, "도착지 '{}' 좌표: {}\n", destination, describe(to));
    out.push_str("💡 해결 방법:\n");
    out.push_str("• 정확한 주소를 입력해주세요 (예: 서울특별시 강남구)\n");
    out.push_str("• 지하철역명 + '역'을 붙여주세요 (예: 강남역)\n");
    out.push_str("• 유명한 건물명을 사용해보세요 (예: 롯데타워)");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_has_floor() {
        assert_eq!(estimate_minutes(0.0), 15);
        assert_eq!(estimate_minutes(5.9), 15);
        assert_eq!(estimate_minutes(6.0), 15);
        assert_eq!(estimate_minutes(8.07), 20);
        assert_eq!(estimate_minutes(100.0), 250);
    }

    #[test]
    fn test_travel_mode_thresholds() {
        assert_eq!(TravelMode::for_distance(1.99), TravelMode::Walk);
        assert_eq!(TravelMode::for_distance(2.0), TravelMode::BusOrSubway);
        assert_eq!(TravelMode::for_distance(9.99), TravelMode::BusOrSubway);
        assert_eq!(TravelMode::for_distance(10.0), TravelMode::SubwayOrBus);
    }

    #[test]
    fn test_format_route_short_hop() {
        let here = Coordinates::new(127.0276, 37.4979);
        let report = format_route("강남역", "강남역", here, here);
        assert_eq!(
            report,
            "🚇 강남역 → 강남역\n\n\
             📍 직선거리: 0.0km\n\
             ⏱️ 예상 소요시간: 15분\n\n\
             🛤️ 추천 교통수단:\n\
             🚶‍♂️ 도보 이용 권장 (15-20분)\n\
             \n📱 실시간 정보는 지하철앱을 확인하세요"
        );
    }

    #[test]
    fn test_format_route_mid_distance() {
        let report = format_route(
            "강남역",
            "서울역",
            Coordinates::new(127.0276, 37.4979),
            Coordinates::new(126.9707, 37.5547),
        );
        assert!(report.contains("📍 직선거리: 8.1km"));
        assert!(report.contains("🚇 환승 1회 예상"));
    }

    #[test]
    fn test_format_not_found_lists_both_lookups() {
        let report = format_not_found("강남역", "없는곳", Some(Coordinates::new(127.0, 37.5)), None);
        assert!(report.starts_with("❌ 주소를 찾을 수 없습니다."));
        assert!(report.contains("출발지 '강남역' 좌표: (127, 37.5)"));
        assert!(report.contains("도착지 '없는곳' 좌표: 찾지 못함"));
        assert!(report.ends_with("(예: 롯데타워)"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let service = TransitService::new(None, "http://127.0.0.1:9").unwrap();
        assert_eq!(service.directions("강남역", "서울역").await, MISSING_KEY_MESSAGE);
    }
}
