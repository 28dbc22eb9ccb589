// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outlet directory for the salon chain.
//!
//! Static reference data; the conversation core only reads it through the
//! lookup functions below.

use std::sync::LazyLock;

/// A single salon outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outlet {
    pub id: u32,
    pub name: &'static str,
    pub city: &'static str,
    pub state: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
}

/// All outlets, ordered by opening date.
pub const OUTLETS: &[Outlet] = &[
    Outlet { id: 1, name: "ANNA NAGAR", city: "Chennai", state: "Tamil Nadu", address: "Plot 42, 2nd Avenue, Anna Nagar, Chennai 600040", phone: "044-40110011" },
    Outlet { id: 2, name: "TAMBARAM", city: "Chennai", state: "Tamil Nadu", address: "No. 118, Velachery Main Road, East Tambaram, Chennai 600059", phone: "044-40110012" },
    Outlet { id: 3, name: "ADYAR", city: "Chennai", state: "Tamil Nadu", address: "No. 7, First Main Road, Kasturba Nagar, Adyar, Chennai 600020", phone: "044-40110013" },
    Outlet { id: 4, name: "VELACHERY", city: "Chennai", state: "Tamil Nadu", address: "No. 21, Hundred Feet Road, Velachery, Chennai 600042", phone: "044-40110014" },
    Outlet { id: 5, name: "MOGAPPAIR", city: "Chennai", state: "Tamil Nadu", address: "No. 4/12, Pari Salai, Mogappair East, Chennai 600037", phone: "044-40110015" },
    Outlet { id: 6, name: "KILPAUK", city: "Chennai", state: "Tamil Nadu", address: "No. 33, Barnaby Road, Kilpauk, Chennai 600010", phone: "044-40110016" },
    Outlet { id: 7, name: "T NAGAR", city: "Chennai", state: "Tamil Nadu", address: "No. 9, Bazullah Road, T Nagar, Chennai 600017", phone: "044-40110017" },
    Outlet { id: 8, name: "PERAMBUR", city: "Chennai", state: "Tamil Nadu", address: "No. 301, Paper Mills Road, Perambur, Chennai 600011", phone: "044-40110018" },
    Outlet { id: 9, name: "GANAPATHY", city: "Coimbatore", state: "Tamil Nadu", address: "No. 12, Old Sathy Road, Ganapathy, Coimbatore 641006", phone: "0422-4011021" },
    Outlet { id: 10, name: "RS PURAM", city: "Coimbatore", state: "Tamil Nadu", address: "No. 40, Subramaniam Road, R S Puram, Coimbatore 641002", phone: "0422-4011022" },
    Outlet { id: 11, name: "ANNA NAGAR MADURAI", city: "Madurai", state: "Tamil Nadu", address: "No. 96, Sourashtrapuram, Anna Nagar, Madurai 625020", phone: "0452-4011031" },
    Outlet { id: 12, name: "KALAVASAL", city: "Madurai", state: "Tamil Nadu", address: "No. 218, Madurai-Theni Road, Kalavasal, Madurai 625016", phone: "0452-4011032" },
    Outlet { id: 13, name: "PERAMANUR", city: "Salem", state: "Tamil Nadu", address: "No. 48, Rajaji Road, Peramanur, Salem 636007", phone: "0427-4011041" },
    Outlet { id: 14, name: "PUTHUR", city: "Trichy", state: "Tamil Nadu", address: "No. 20, Vayalur Main Road, Puthur, Trichy 620017", phone: "0431-4011051" },
    Outlet { id: 15, name: "VIDYARANYAPURA", city: "Bangalore", state: "Karnataka", address: "No. 465, 12th Main, HMT Layout, Vidyaranyapura, Bangalore 560097", phone: "080-40110061" },
    Outlet { id: 16, name: "RAMAMURTHY NAGAR", city: "Bangalore", state: "Karnataka", address: "No. 32, Kalkere Main Road, Ramamurthy Nagar, Bangalore 560016", phone: "080-40110062" },
    Outlet { id: 17, name: "BHAVANI NAGAR", city: "Tirupati", state: "Andhra Pradesh", address: "18-1-42, Bhavani Nagar, Tirupati 517501", phone: "0877-4011071" },
    Outlet { id: 18, name: "PAL ADAJAN", city: "Surat", state: "Gujarat", address: "Shop 16, The Boulevard, Pal Adajan, Surat 395009", phone: "0261-4011081" },
    Outlet { id: 19, name: "VESU", city: "Surat", state: "Gujarat", address: "GF-12, Aakash Retail, Vesu, Surat 395007", phone: "0261-4011082" },
    Outlet { id: 20, name: "MOTERA", city: "Ahmedabad", state: "Gujarat", address: "Shop 17A, Central Arcade, Motera, Ahmedabad 380005", phone: "079-40110091" },
    Outlet { id: 21, name: "VILLIANUR", city: "Puducherry", state: "Puducherry", address: "No. 350, Villianur Main Road, Nellitope, Puducherry 605005", phone: "0413-4011101" },
    Outlet { id: 22, name: "AL QUSAIS", city: "Dubai", state: "UAE", address: "Shop 4, Damascus Street, Al Qusais Industrial 2, Dubai", phone: "+971-4-4011111" },
];

/// All distinct outlet cities, sorted.
static CITIES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut cities: Vec<&str> = OUTLETS.iter().map(|o| o.city).collect();
    cities.sort_unstable();
    cities.dedup();
    cities
});

/// All distinct outlet states, sorted.
static STATES: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut states: Vec<&str> = OUTLETS.iter().map(|o| o.state).collect();
    states.sort_unstable();
    states.dedup();
    states
});

/// Outlets whose city or outlet name contains `name` (case-insensitive).
pub fn outlets_by_city(name: &str) -> Vec<&'static Outlet> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    OUTLETS
        .iter()
        .filter(|o| {
            o.city.to_lowercase().contains(&needle) || o.name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Outlets whose state contains `name` (case-insensitive).
pub fn outlets_by_state(name: &str) -> Vec<&'static Outlet> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    OUTLETS
        .iter()
        .filter(|o| o.state.to_lowercase().contains(&needle))
        .collect()
}

/// All distinct cities with at least one outlet.
pub fn all_cities() -> &'static [&'static str] {
    &CITIES
}

/// All distinct states with at least one outlet.
pub fn all_states() -> &'static [&'static str] {
    &STATES
}
