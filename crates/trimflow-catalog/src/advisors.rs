// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Regional franchise advisor directory.
//!
//! Advisors are configuration, not core entities: read-only from the
//! conversation core's perspective. An advisor only receives leads while
//! `active` is set and a contact handle is configured.

use serde::{Deserialize, Serialize};

/// Marker coverage area for the catch-all advisor.
pub const CATCH_ALL_AREA: &str = "*";

/// A regional franchise advisor and the areas they cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionalAdvisor {
    /// Stable region key, e.g. "south-india".
    pub region: String,
    pub name: String,
    /// WhatsApp handle in international format. `None` means not yet
    /// configured; such advisors never receive leads.
    pub contact: Option<String>,
    /// States and cities this advisor covers. `"*"` marks the catch-all.
    pub coverage_areas: Vec<String>,
    pub active: bool,
}

impl RegionalAdvisor {
    /// Whether this advisor can currently receive forwarded leads.
    pub fn can_receive(&self) -> bool {
        self.active && self.contact.is_some()
    }

    fn covers(&self, location_lower: &str) -> bool {
        self.coverage_areas.iter().any(|area| {
            let area_lower = area.to_lowercase();
            area_lower != CATCH_ALL_AREA
                && (location_lower.contains(&area_lower) || area_lower.contains(location_lower))
        })
    }

    fn is_catch_all(&self) -> bool {
        self.coverage_areas.iter().any(|a| a == CATCH_ALL_AREA)
    }
}

/// Build the default advisor directory.
///
/// Only the South India desk is live today; the remaining regions are
/// pre-declared and activate once a contact handle is configured.
pub fn directory() -> Vec<RegionalAdvisor> {
    fn advisor(
        region: &str,
        name: &str,
        contact: Option<&str>,
        coverage: &[&str],
        active: bool,
    ) -> RegionalAdvisor {
        RegionalAdvisor {
            region: region.to_string(),
            name: name.to_string(),
            contact: contact.map(str::to_string),
            coverage_areas: coverage.iter().map(|s| s.to_string()).collect(),
            active,
        }
    }

    vec![
        advisor(
            "south-india",
            "Regional Franchise Advisor - South India",
            Some("+918600010001"),
            &[
                "Tamil Nadu",
                "Kerala",
                "Karnataka",
                "Andhra Pradesh",
                "Telangana",
                "Puducherry",
                "Chennai",
                "Bangalore",
                "Hyderabad",
                "Coimbatore",
                "Madurai",
                "Kochi",
                "Salem",
                "Trichy",
                "Tirupati",
            ],
            true,
        ),
        advisor(
            "west-india",
            "Regional Franchise Advisor - West India",
            None,
            &[
                "Gujarat", "Maharashtra", "Goa", "Rajasthan", "Mumbai", "Ahmedabad", "Surat",
                "Pune", "Jaipur",
            ],
            false,
        ),
        advisor(
            "north-india",
            "Regional Franchise Advisor - North India",
            None,
            &[
                "Delhi",
                "Haryana",
                "Punjab",
                "Uttar Pradesh",
                "New Delhi",
                "Noida",
                "Gurgaon",
                "Chandigarh",
            ],
            false,
        ),
        advisor(
            "dubai",
            "Franchise Advisor - Dubai",
            None,
            &["Dubai", "UAE", "Middle East"],
            false,
        ),
        advisor(
            "central",
            "Central Franchise Office",
            None,
            &[CATCH_ALL_AREA],
            false,
        ),
    ]
}

/// Find the advisor responsible for `location` within `advisors`.
///
/// Coverage matching is a case-insensitive substring check in either
/// direction ("Chennai" matches "chennai city side", "Tamil Nadu" matches
/// "tamil"). Regional advisors win over the catch-all; the catch-all is
/// used only when no region matches and it can itself receive leads.
pub fn advisor_for_location<'a>(
    advisors: &'a [RegionalAdvisor],
    location: &str,
) -> Option<&'a RegionalAdvisor> {
    let location_lower = location.trim().to_lowercase();
    if location_lower.is_empty() {
        return None;
    }

    if let Some(regional) = advisors
        .iter()
        .filter(|a| a.can_receive())
        .find(|a| a.covers(&location_lower))
    {
        return Some(regional);
    }

    advisors
        .iter()
        .find(|a| a.can_receive() && a.is_catch_all())
}

/// Whether any advisor in the directory can currently receive leads.
pub fn has_active_advisors(advisors: &[RegionalAdvisor]) -> bool {
    advisors.iter().any(RegionalAdvisor::can_receive)
}
