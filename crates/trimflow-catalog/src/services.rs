// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service price menu.
//!
//! All prices are in rupees and include taxes.

/// One line item on the service menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceItem {
    pub name: &'static str,
    /// Price in rupees. `None` means outlet-specific pricing.
    pub price: Option<u32>,
    pub note: Option<&'static str>,
}

/// A titled group of service items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSection {
    /// Stable lookup key, matches the pattern matcher's intent names.
    pub key: &'static str,
    pub title: &'static str,
    pub items: &'static [ServiceItem],
}

const fn item(name: &'static str, price: u32) -> ServiceItem {
    ServiceItem {
        name,
        price: Some(price),
        note: None,
    }
}

const fn item_note(name: &'static str, price: u32, note: &'static str) -> ServiceItem {
    ServiceItem {
        name,
        price: Some(price),
        note: Some(note),
    }
}

/// The complete service menu, in display order.
pub const SERVICE_MENU: &[ServiceSection] = &[
    ServiceSection {
        key: "haircut",
        title: "HAIRCUT SERVICES",
        items: &[
            item("Classic Haircut", 125),
            item_note("Taper Haircut", 150, "Casual and professional"),
            item_note("Fade Haircut", 175, "Blends to skin"),
            item_note("Mullet Haircut", 200, "Short front, long back"),
            item_note("Restyle", 200, "Change of style"),
            item_note("Junior Cut", 75, "Boys below 7 years"),
            item("Wash & Style", 100),
        ],
    },
    ServiceSection {
        key: "beard",
        title: "BEARD SERVICES",
        items: &[
            item("Beard Trim", 40),
            item("Zero Trim", 50),
            item("Regular Shave", 75),
            item_note("Beard Design", 400, "French, shaping, stubble"),
        ],
    },
    ServiceSection {
        key: "facial",
        title: "FACIALS",
        items: &[
            item("Gold", 700),
            item("Diamond", 800),
            item("Tan Clear", 1000),
            item("Oxy Radiance", 1200),
            item("Hydra Boost", 1500),
            item("De-Aging", 2000),
        ],
    },
    ServiceSection {
        key: "spa",
        title: "HAIR SPA",
        items: &[
            item("Dry / Repair", 400),
            item("Dandruff / Hairfall", 800),
            item("Nourishing Protein Treatment", 800),
            item_note("Detox", 1000, "With oil shots"),
        ],
    },
    ServiceSection {
        key: "color",
        title: "COLOUR SERVICES",
        items: &[
            item("Moustache", 100),
            item("Beard", 150),
            item("Global Hair", 250),
            item("Per Streak", 200),
            item("Highlights", 300),
            item("Fashion Colour", 700),
        ],
    },
    ServiceSection {
        key: "massage",
        title: "OIL MASSAGE",
        items: &[
            item_note("Head Oil Massage (20 mins)", 200, "Almond / coconut / olive"),
            item_note("Signature Head Oil Massage (20 mins)", 350, "Onion seed / jojoba"),
        ],
    },
    ServiceSection {
        key: "wedding",
        title: "WEDDING DEALS",
        items: &[
            item_note(
                "Wedding Package 1",
                2999,
                "Haircut + shave or beard design + de-tan + hair spa + facial",
            ),
            item_note(
                "Wedding Package 2",
                3999,
                "Haircut + shave or beard design + de-tan + protein treatment + premium facial",
            ),
            item_note(
                "Wedding Package 3",
                4999,
                "Haircut + shave or beard design + de-tan + detox spa + signature facial",
            ),
        ],
    },
];

/// Opening hours, rendered by the response formatter.
pub const OPENING_HOURS: &str = "Monday - Saturday: 9:00 AM - 9:00 PM\nSunday: 10:00 AM - 8:00 PM";

/// Look up a menu section by its stable key.
pub fn section_by_key(key: &str) -> Option<&'static ServiceSection> {
    SERVICE_MENU.iter().find(|s| s.key == key)
}
