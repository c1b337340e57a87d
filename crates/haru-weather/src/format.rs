//! Compact, phone-friendly rendering of a forecast.

use std::fmt::Write;

use crate::base_time::BaseTime;
use crate::types::{HourSlot, HourlySlots, WeatherCondition};

/// Forecast hours highlighted in the report
const DAY_PARTS: [(&str, &str); 3] = [
    ("0900", "🌅 오전"),
    ("1500", "☀️ 오후"),
    ("2100", "🌙 저녁"),
];

fn condition(slot: &HourSlot) -> WeatherCondition {
    let sky = slot.get("SKY").map(String::as_str).unwrap_or("1");
    let pty = slot.get("PTY").map(String::as_str).unwrap_or("0");
    WeatherCondition::from_codes(sky, pty)
}

// RN1 is "강수없음" when dry
fn has_rainfall(value: &str) -> bool {
    !matches!(value, "0" | "강수없음")
}

/// Render the report for `city`. `now_hour` selects the "now" slot.
pub fn format_report(city: &str, slots: &HourlySlots, now_hour: u32, base: &BaseTime) -> String {
    let mut out = format!("📍 {}\n\n", city);
    let current = slots.get(&format!("{:02}00", now_hour));

    if let Some(slot) = current {
        let cond = condition(slot);
        let _ = write!(out, "🕐 지금: {} {}", cond.emoji(), cond.description());
        if let Some(temp) = slot.get("T1H") {
            let _ = write!(out, " {}°C", temp);
        }
        if let Some(humidity) = slot.get("REH") {
            let _ = write!(out, " ({}%)", humidity);
        }
        out.push_str("\n\n");
    }

    let mut header_written = false;
    for (code, label) in DAY_PARTS {
        let Some(slot) = slots.get(code) else {
            continue;
        };
        if !header_written {
            out.push_str("📅 예보\n");
            header_written = true;
        }

        let cond = condition(slot);
        let _ = write!(out, "{}: {} {}", label, cond.emoji(), cond.description());
        if let Some(temp) = slot.get("T1H") {
            let _ = write!(out, " {}°C", temp);
        }
        out.push('\n');
    }

    if let Some(slot) = current {
        let mut extras = Vec::new();
        if let Some(wind) = slot.get("WSD") {
            extras.push(format!("💨 {}m/s", wind));
        }
        if let Some(rain) = slot.get("RN1").filter(|r| has_rainfall(r)) {
            extras.push(format!("🌧️ {}mm", rain));
        }
        if !extras.is_empty() {
            let _ = writeln!(out, "\n{}", extras.join(" | "));
        }
    }

    let _ = write!(out, "\n📊 기상청 ({})", base.label());
    out
}
