//! KMA forecast grid cells for the cities we recognise.

/// A 5 km forecast grid cell with the name shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub nx: u16,
    pub ny: u16,
    pub display_name: String,
}

struct CityGrid {
    key: &'static str,
    nx: u16,
    ny: u16,
    name: &'static str,
}

const fn city(key: &'static str, nx: u16, ny: u16, name: &'static str) -> CityGrid {
    CityGrid { key, nx, ny, name }
}

const CITIES: &[CityGrid] = &[
    city("서울", 60, 127, "서울특별시"),
    city("부산", 98, 76, "부산광역시"),
    city("대구", 89, 90, "대구광역시"),
    city("인천", 55, 124, "인천광역시"),
    city("광주", 58, 74, "광주광역시"),
    city("대전", 67, 100, "대전광역시"),
    city("울산", 102, 84, "울산광역시"),
    city("세종", 66, 103, "세종특별자치시"),
    city("수원", 60, 121, "경기도 수원"),
    city("춘천", 73, 134, "강원도 춘천"),
    city("청주", 69, 106, "충청북도 청주"),
    city("전주", 63, 89, "전라북도 전주"),
    city("포항", 102, 94, "경상북도 포항"),
    city("제주", 52, 38, "제주특별자치도"),
];

const FALLBACK_NAME: &str = "서울특별시 (기본값)";

/// Find the grid cell for a free-form place name.
///
/// The first city whose short name appears anywhere in `location` wins, so
/// "서울 강남구" and "부산 해운대" both resolve. Unknown places fall back to Seoul.
pub fn resolve_grid(location: &str) -> GridCell {
    match CITIES.iter().find(|c| location.contains(c.key)) {
        Some(c) => GridCell {
            nx: c.nx,
            ny: c.ny,
            display_name: c.name.to_string(),
        },
        None => {
            tracing::debug!("No grid cell for '{}', defaulting to Seoul", location);
            let seoul = &CITIES[0];
            GridCell {
                nx: seoul.nx,
                ny: seoul.ny,
                display_name: FALLBACK_NAME.to_string(),
            }
        }
    }
}
