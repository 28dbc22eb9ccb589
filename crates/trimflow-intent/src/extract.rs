// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Location and date/time side extraction.
//!
//! These lookups are orthogonal to the classification cascade: the response
//! formatter consults them after intent resolution to upgrade a generic
//! location or booking reply into a city- or time-qualified one.

use std::sync::LazyLock;

use regex::Regex;

/// Alias spellings for cities users commonly type.
const CITY_ALIASES: &[(&str, &[&str])] = &[
    ("Chennai", &["chennai", "madras"]),
    ("Bangalore", &["bangalore", "bengaluru"]),
    ("Coimbatore", &["coimbatore", "cbe"]),
    ("Madurai", &["madurai"]),
    ("Trichy", &["trichy", "tiruchirappalli"]),
    ("Salem", &["salem"]),
    ("Tirupati", &["tirupati"]),
    ("Surat", &["surat"]),
    ("Ahmedabad", &["ahmedabad"]),
    ("Mumbai", &["mumbai", "bombay"]),
    ("Delhi", &["delhi", "new delhi"]),
    ("Hyderabad", &["hyderabad"]),
    ("Kochi", &["kochi", "cochin"]),
    ("Dubai", &["dubai", "uae"]),
];

/// States recognised for franchise-location purposes, including states the
/// chain has not opened in yet.
const STATES: &[&str] = &[
    "Tamil Nadu",
    "Kerala",
    "Karnataka",
    "Andhra Pradesh",
    "Telangana",
    "Puducherry",
    "Gujarat",
    "Maharashtra",
    "Rajasthan",
    "Delhi",
    "West Bengal",
    "Punjab",
];

static DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(today|tomorrow|tonight|this weekend|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
    )
    .expect("day regex is valid")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?::\d{2})?\s*(?:am|pm)|\d{1,2}\s*o'?clock|morning|afternoon|evening)\b")
        .expect("time regex is valid")
});

/// Scan free text for a city or state mention.
///
/// Outlet cities are checked first, then alias spellings, then states, so a
/// message naming both ("franchise in Chennai, Tamil Nadu") resolves to the
/// more specific city.
pub fn extract_location(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if lower.trim().is_empty() {
        return None;
    }

    for city in trimflow_catalog::all_cities() {
        if lower.contains(&city.to_lowercase()) {
            return Some((*city).to_string());
        }
    }

    for (canonical, aliases) in CITY_ALIASES {
        if aliases.iter().any(|a| lower.contains(a)) {
            return Some((*canonical).to_string());
        }
    }

    for state in STATES {
        if lower.contains(&state.to_lowercase()) {
            return Some((*state).to_string());
        }
    }

    None
}

/// A date/time expression found in free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeMention {
    pub day: Option<String>,
    pub time: Option<String>,
}

impl DateTimeMention {
    /// Render the mention the way it appeared, day before time.
    pub fn display(&self) -> String {
        match (&self.day, &self.time) {
            (Some(d), Some(t)) => format!("{d} {t}"),
            (Some(d), None) => d.clone(),
            (None, Some(t)) => t.clone(),
            (None, None) => String::new(),
        }
    }
}

/// Scan free text for a day and/or clock-time expression.
pub fn extract_datetime(text: &str) -> Option<DateTimeMention> {
    let day = DAY_RE.find(text).map(|m| m.as_str().to_lowercase());
    let time = TIME_RE.find(text).map(|m| m.as_str().to_lowercase());
    if day.is_none() && time.is_none() {
        return None;
    }
    Some(DateTimeMention { day, time })
}
