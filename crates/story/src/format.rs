//! Presentation helpers for already-decoded stories.
//!
//! Pure functions only; nothing here decodes or validates.

use serde::Serialize;

use crate::model::{TraitKind, TraitScores, HEATMAP_LEN};
use crate::quantized::Quantized;

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn weekday_name(index: usize) -> Option<&'static str> {
    WEEKDAYS.get(index).copied()
}

pub fn month_name(index: usize) -> Option<&'static str> {
    MONTHS.get(index).copied()
}

/// `1234567` → `"1,234,567"`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
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

/// `1500` → `"1.5K"`, `2_000_000` → `"2M"`. Values under 1000 print as is.
pub fn format_compact(n: i64) -> String {
    let abs = n.unsigned_abs();
    if abs < 1_000 {
        return n.to_string();
    }
    let sign = if n < 0 { "-" } else { "" };
    let mut scaled = 0.0;
    let mut suffix = "";
    for (divisor, unit) in [(1e3, "K"), (1e6, "M"), (1e9, "B")] {
        scaled = (abs as f64 / divisor * 10.0).round() / 10.0;
        suffix = unit;
        if scaled < 1_000.0 {
            break;
        }
    }
    if scaled.fract() == 0.0 {
        format!("{sign}{scaled:.0}{suffix}")
    } else {
        format!("{sign}{scaled:.1}{suffix}")
    }
}

/// Hours as `"2h 30m"`, `"45m"` or `"3h"`.
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() || hours <= 0.0 {
        return "0m".to_owned();
    }
    let minutes = (hours * 60.0).round() as i64;
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// 24-hour clock value as `"12 AM"` … `"11 PM"`.
pub fn format_hour(hour: i64) -> String {
    match hour.rem_euclid(24) {
        0 => "12 AM".to_owned(),
        h @ 1..=11 => format!("{h} AM"),
        12 => "12 PM".to_owned(),
        h => format!("{} PM", h - 12),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeakTime {
    pub weekday: usize,
    pub hour: usize,
    pub count: i64,
}

impl PeakTime {
    /// `"Tuesday, 3 PM"`.
    pub fn label(&self) -> String {
        format!(
            "{}, {}",
            WEEKDAYS[self.weekday % WEEKDAYS.len()],
            format_hour(self.hour as i64)
        )
    }
}

/// Busiest heatmap cell. Ties go to the earliest cell; an empty or all-zero
/// heatmap has no peak.
pub fn peak_time(heatmap: &[i64]) -> Option<PeakTime> {
    heatmap
        .iter()
        .take(HEATMAP_LEN)
        .copied()
        .enumerate()
        .filter(|(_, count)| *count > 0)
        .fold(None, |best: Option<(usize, i64)>, (i, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((i, count)),
        })
        .map(|(i, count)| PeakTime {
            weekday: i / 24,
            hour: i % 24,
            count,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YoyChange {
    /// Rounded percentage change; `None` when there is no previous value to
    /// compare against.
    pub percent: Option<i64>,
    pub direction: Trend,
}

impl YoyChange {
    pub fn label(&self) -> String {
        match (self.percent, self.direction) {
            (Some(p), _) => format!("{p:+}%"),
            (None, Trend::Up) => "new".to_owned(),
            (None, _) => "n/a".to_owned(),
        }
    }
}

pub fn yoy_change(current: f64, previous: f64) -> YoyChange {
    let direction = if current > previous {
        Trend::Up
    } else if current < previous {
        Trend::Down
    } else {
        Trend::Flat
    };
    let percent = (previous > 0.0).then(|| ((current - previous) / previous * 100.0).round() as i64);
    YoyChange { percent, direction }
}

/// Label for a trait score: low below 34, high from 67.
pub fn trait_label(kind: TraitKind, score: Quantized) -> &'static str {
    let [low, mid, high] = kind.labels();
    match score.get() {
        0..=33 => low,
        34..=66 => mid,
        _ => high,
    }
}

/// The `n` highest-scoring traits, strongest first. Equal scores keep
/// [`TraitKind::ALL`] order.
pub fn strongest_traits(scores: &TraitScores, n: usize) -> Vec<(TraitKind, Quantized)> {
    let mut ranked: Vec<_> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
        assert_eq!(format_number(-98_765), "-98,765");
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1000), "1K");
        assert_eq!(format_compact(1500), "1.5K");
        assert_eq!(format_compact(12_345), "12.3K");
        assert_eq!(format_compact(999_950), "1M");
        assert_eq!(format_compact(2_000_000), "2M");
        assert_eq!(format_compact(1_250_000), "1.3M");
        assert_eq!(format_compact(2_500_000_000), "2.5B");
        assert_eq!(format_compact(-4_200), "-4.2K");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(0.0), "0m");
        assert_eq!(format_duration(0.75), "45m");
        assert_eq!(format_duration(3.0), "3h");
        assert_eq!(format_duration(2.5), "2h 30m");
        assert_eq!(format_duration(f64::NAN), "0m");
    }

    #[test]
    fn hours() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(9), "9 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(15), "3 PM");
        assert_eq!(format_hour(23), "11 PM");
    }

    #[test]
    fn peak_time_finds_first_maximum() {
        let mut heatmap = vec![0; HEATMAP_LEN];
        heatmap[2 * 24 + 15] = 9;
        heatmap[5 * 24 + 10] = 9;
        heatmap[3] = 4;
        let peak = peak_time(&heatmap).expect("peak");
        assert_eq!(
            peak,
            PeakTime {
                weekday: 2,
                hour: 15,
                count: 9
            }
        );
        assert_eq!(peak.label(), "Tuesday, 3 PM");
    }

    #[test]
    fn no_peak_without_activity() {
        assert_eq!(peak_time(&[]), None);
        assert_eq!(peak_time(&[0; HEATMAP_LEN]), None);
    }

    #[test]
    fn year_over_year() {
        let up = yoy_change(1250.0, 1000.0);
        assert_eq!(up.percent, Some(25));
        assert_eq!(up.direction, Trend::Up);
        assert_eq!(up.label(), "+25%");

        let down = yoy_change(900.0, 1000.0);
        assert_eq!(down.label(), "-10%");
        assert_eq!(down.direction, Trend::Down);

        let fresh = yoy_change(10.0, 0.0);
        assert_eq!(fresh.percent, None);
        assert_eq!(fresh.label(), "new");

        assert_eq!(yoy_change(5.0, 5.0).direction, Trend::Flat);
    }

    #[test]
    fn trait_labels_by_band() {
        assert_eq!(trait_label(TraitKind::NightOwl, Quantized::new(10)), "Early Bird");
        assert_eq!(trait_label(TraitKind::NightOwl, Quantized::new(50)), "Daytime");
        assert_eq!(trait_label(TraitKind::NightOwl, Quantized::new(67)), "Night Owl");
        assert_eq!(trait_label(TraitKind::Delegation, Quantized::new(33)), "Hands-On");
    }

    #[test]
    fn strongest_traits_rank_by_score() {
        let scores = TraitScores {
            breadth: Quantized::new(90),
            planning: Quantized::new(70),
            iteration: Quantized::new(70),
            ..TraitScores::default()
        };
        let top = strongest_traits(&scores, 2);
        assert_eq!(
            top,
            vec![
                (TraitKind::Breadth, Quantized::new(90)),
                (TraitKind::Iteration, Quantized::new(70)),
            ]
        );
    }

    #[test]
    fn names() {
        assert_eq!(weekday_name(0), Some("Sunday"));
        assert_eq!(weekday_name(7), None);
        assert_eq!(month_name(11), Some("December"));
    }
}
