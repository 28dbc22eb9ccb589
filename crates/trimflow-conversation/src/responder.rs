// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response formatting.
//!
//! Pure functions from resolved intent + catalog data to user-facing text.
//! No side effects, never panics; missing catalog data renders a generic
//! fallback instead of propagating an error. All copy uses the channel's
//! lightweight markup (`*bold*`).

use trimflow_catalog::{ECONOMICS, Outlet, SERVICE_MENU, section_by_key};
use trimflow_intent::DateTimeMention;

/// Welcome card shown for greetings and fresh conversations.
pub fn welcome(display_name: Option<&str>) -> String {
    let salutation = match display_name {
        Some(name) if !name.trim().is_empty() => format!("Welcome to Crown & Clipper, {name}!"),
        _ => "Welcome to Crown & Clipper Men's Salon!".to_string(),
    };
    format!(
        "{salutation}\n\
         \n\
         *For customers:*\n\
         - Type *haircut* for haircut prices\n\
         - Type *beard* for beard services\n\
         - Type *facial* for facial services\n\
         - Type *menu* for the complete price list\n\
         - Type *book* to book an appointment\n\
         \n\
         *For business partners:*\n\
         - Type *franchise* for the investment opportunity\n\
         \n\
         How can I help you today?"
    )
}

/// Short capability list for the `help` command.
pub fn help() -> String {
    "I can help you with:\n\
     - Service prices (haircut, beard, facial, spa, colour)\n\
     - Booking appointments\n\
     - Finding your nearest outlet\n\
     - Opening hours\n\
     - Franchise opportunities\n\
     \n\
     Just ask naturally, or type *menu* for the full price list."
        .to_string()
}

/// The full price list, every section with prices.
pub fn complete_menu() -> String {
    let mut text = String::from("*Crown & Clipper - Complete Price List*\n");
    for section in SERVICE_MENU {
        text.push_str(&format!("\n*{}*\n", section.title));
        for item in section.items {
            match (item.price, item.note) {
                (Some(price), Some(note)) => {
                    text.push_str(&format!("- {} - Rs {} ({})\n", item.name, price, note));
                }
                (Some(price), None) => {
                    text.push_str(&format!("- {} - Rs {}\n", item.name, price));
                }
                (None, Some(note)) => {
                    text.push_str(&format!("- {} ({})\n", item.name, note));
                }
                (None, None) => {
                    text.push_str(&format!("- {}\n", item.name));
                }
            }
        }
    }
    text.push_str("\nAll prices include taxes. Type *book* to book an appointment.");
    text
}

/// One service category, or the generic fallback when the key is unknown.
pub fn service_section(key: &str) -> String {
    let Some(section) = section_by_key(key) else {
        return default_fallback();
    };
    let mut text = format!("*{}*\n\n", section.title);
    for item in section.items {
        match (item.price, item.note) {
            (Some(price), Some(note)) => {
                text.push_str(&format!("- {} - Rs {} ({})\n", item.name, price, note));
            }
            (Some(price), None) => {
                text.push_str(&format!("- {} - Rs {}\n", item.name, price));
            }
            (None, note) => {
                let note = note.map(|n| format!(" ({n})")).unwrap_or_default();
                text.push_str(&format!("- {}{note}\n", item.name));
            }
        }
    }
    text.push_str("\nType *book* to book an appointment, or *menu* for all services.");
    text
}

/// Starting-price overview for generic price questions.
pub fn price_overview() -> String {
    let mut text = String::from("Our services start from:\n");
    for section in SERVICE_MENU {
        if let Some(min) = section.items.iter().filter_map(|i| i.price).min() {
            text.push_str(&format!("- {} - from Rs {}\n", section.title, min));
        }
    }
    text.push_str("\nType *menu* for the complete price list, or name a service.");
    text
}

fn format_outlet(outlet: &Outlet) -> String {
    format!(
        "*{}*\n{}\nPhone: {}",
        outlet.name, outlet.address, outlet.phone
    )
}

/// Outlets for a detected city or state, or the ask-for-city prompt.
pub fn outlets_for_location(location: &str) -> String {
    let mut outlets = trimflow_catalog::outlets_by_city(location);
    if outlets.is_empty() {
        outlets = trimflow_catalog::outlets_by_state(location);
    }
    if outlets.is_empty() {
        return format!(
            "We don't have an outlet in {location} yet - we're expanding fast!\n\
             \n\
             We're currently in: {}.\n\
             Interested in bringing us there? Type *franchise*.",
            trimflow_catalog::all_cities().join(", ")
        );
    }

    let mut text = format!("*Our outlets in {location}:*\n");
    for outlet in outlets.iter().take(8) {
        text.push_str(&format!("\n{}\n", format_outlet(outlet)));
    }
    if outlets.len() > 8 {
        text.push_str(&format!("\n...and {} more.", outlets.len() - 8));
    }
    text
}

/// Generic location prompt when no city was detected.
pub fn location_prompt() -> String {
    format!(
        "We have outlets across India and Dubai.\n\
         \n\
         Please share your city name and I'll find the closest branch.\n\
         We're present in: {}.",
        trimflow_catalog::all_cities().join(", ")
    )
}

/// Opening-hours card.
pub fn timing_card() -> String {
    format!(
        "*Opening Hours*\n\n{}\n\nWe're open 7 days a week. Walk-ins welcome!",
        trimflow_catalog::services::OPENING_HOURS
    )
}

/// Booking prompt, echoing a requested day/time when one was mentioned.
pub fn booking_prompt(datetime: Option<&DateTimeMention>) -> String {
    let mut text = String::from("*Book Your Appointment*\n\n");
    if let Some(mention) = datetime {
        let when = mention.display();
        if !when.is_empty() {
            text.push_str(&format!("Noted - you're looking at *{when}*.\n\n"));
        }
    }
    text.push_str(
        "Please share:\n\
         1. Your preferred date & time\n\
         2. Your city/location\n\
         \n\
         We'll confirm your slot shortly.",
    );
    text
}

/// Franchise pitch for a bare franchise enquiry.
pub fn franchise_overview() -> String {
    let e = ECONOMICS;
    format!(
        "*Crown & Clipper Franchise Opportunity*\n\
         \n\
         - Total investment: Rs {} lakhs\n\
         - Payback: {}\n\
         - Revenue potential: {}\n\
         - Profit margin: {}\n\
         - Area required: {}\n\
         - Staff required: {}\n\
         \n\
         Ask me about *investment*, *revenue*, or *support* - or say\n\
         *contact* and I'll connect you with a regional advisor.",
        e.total_investment_lakhs, e.roi_months, e.revenue_potential_lakhs, e.profit_margin,
        e.area_sqft, e.staff
    )
}

/// Investment breakup.
pub fn franchise_investment() -> String {
    let e = ECONOMICS;
    format!(
        "*Franchise Investment Breakup*\n\
         \n\
         - Franchise fee: Rs {} lakhs\n\
         - Interior setup: Rs {} lakhs\n\
         - Equipment: Rs {} lakhs\n\
         - Working capital: Rs {} lakhs\n\
         - *Total: Rs {} lakhs*\n\
         \n\
         Say *contact* to speak with a regional advisor.",
        e.franchise_fee_lakhs,
        e.interior_lakhs,
        e.equipment_lakhs,
        e.working_capital_lakhs,
        e.total_investment_lakhs
    )
}

/// Revenue and payback projections.
pub fn franchise_revenue() -> String {
    let e = ECONOMICS;
    format!(
        "*Franchise Revenue Projections*\n\
         \n\
         - Revenue potential: {}\n\
         - Profit margin: {}\n\
         - Payback window: {}\n\
         \n\
         Say *contact* and our regional advisor will walk you through the numbers.",
        e.revenue_potential_lakhs, e.profit_margin, e.roi_months
    )
}

/// Training and operations support summary.
pub fn franchise_support() -> String {
    "*Franchise Support*\n\
     \n\
     Every partner gets:\n\
     - Complete staff training before launch\n\
     - Interior design and setup assistance\n\
     - Marketing support for the opening quarter\n\
     - Central supply of branded products\n\
     - Ongoing operations audits\n\
     \n\
     Say *contact* to discuss with a regional advisor."
        .to_string()
}

/// Ask-for-details prompt used when contact intent is detected.
pub fn franchise_contact_intro() -> String {
    "Great - let me take a few details and connect you with the right\n\
     regional advisor."
        .to_string()
}

// --- Lead collection prompts ---

/// Stage 1 question.
pub fn ask_name() -> String {
    format!(
        "{}\n\nFirst, what's your full name?",
        franchise_contact_intro()
    )
}

/// Stage 2 question.
pub fn ask_location() -> String {
    "Thanks! Which city or state are you looking to open in?".to_string()
}

/// Stage 3 question.
pub fn ask_email() -> String {
    "Got it. What's your email address? (type *skip* if you'd rather not share)".to_string()
}

/// Stage 4 question.
pub fn ask_details() -> String {
    "Almost done. Any specific questions or details for our advisor?\n\
     (type *done* to submit)"
        .to_string()
}

/// Defensive restart message when the draft is corrupt at submission.
pub fn collection_restart() -> String {
    "Sorry, something went wrong with your enquiry details.\n\
     Let's start over - type *franchise* and say *contact* when you're ready."
        .to_string()
}

/// Confirmation when the lead reached a regional advisor.
pub fn lead_confirmation_forwarded(lead_id: &str, advisor_name: &str) -> String {
    format!(
        "*Thank you for your franchise enquiry!*\n\
         \n\
         Your enquiry has been forwarded to {advisor_name}.\n\
         \n\
         - Reference ID: {lead_id}\n\
         - Next step: our advisor will contact you within 24 hours\n\
         \n\
         We look forward to partnering with you!"
    )
}

/// Confirmation when the lead was logged but not forwarded. Deliberately
/// different wording from the forwarded case: it must not overclaim.
pub fn lead_confirmation_logged(lead_id: &str) -> String {
    format!(
        "*Thank you for your franchise enquiry!*\n\
         \n\
         We've recorded your enquiry and our team will review it shortly.\n\
         \n\
         - Reference ID: {lead_id}\n\
         - Next step: our team will contact you within 24-48 hours"
    )
}

/// Thanks acknowledgement.
pub fn thanks() -> String {
    "You're welcome - happy to help!\n\
     Anything else you'd like to know about our services or franchise?"
        .to_string()
}

/// Goodbye sign-off.
pub fn goodbye() -> String {
    "Thank you for choosing Crown & Clipper. Have a great day!\n\
     Reach out anytime for grooming services or appointments."
        .to_string()
}

/// Stage-5 default: the cascade's "nothing matched" reply.
pub fn default_fallback() -> String {
    "I'm here to help with Crown & Clipper Men's Salon.\n\
     \n\
     You can ask things like:\n\
     - \"What's the price for a haircut?\"\n\
     - \"Where's the nearest outlet?\"\n\
     - \"Tell me about franchise opportunities\"\n\
     \n\
     Or type *menu* for the complete service list."
        .to_string()
}

/// Apology for the one loud failure path: the lead store being down.
pub fn storage_failure_apology() -> String {
    "Sorry - we couldn't record your enquiry just now.\n\
     Please try again in a few minutes, or email franchise@crownclipper.in\n\
     and our team will get back to you directly."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_uses_display_name_when_present() {
        assert!(welcome(Some("Asha")).contains("Asha"));
        assert!(welcome(None).contains("Crown & Clipper"));
        assert!(welcome(Some("  ")).contains("Men's Salon"));
    }

    #[test]
    fn complete_menu_lists_every_section() {
        let menu = complete_menu();
        for section in SERVICE_MENU {
            assert!(menu.contains(section.title), "missing {}", section.title);
        }
    }

    #[test]
    fn unknown_service_key_falls_back_without_panicking() {
        let text = service_section("piercing");
        assert_eq!(text, default_fallback());
    }

    #[test]
    fn known_service_section_renders_prices() {
        let text = service_section("beard");
        assert!(text.contains("BEARD SERVICES"));
        assert!(text.contains("Rs 40"));
    }

    #[test]
    fn outlets_render_for_known_city() {
        let text = outlets_for_location("Chennai");
        assert!(text.contains("Chennai"));
        assert!(text.contains("Phone:"));
    }

    #[test]
    fn unknown_city_gets_expansion_pitch() {
        let text = outlets_for_location("Shillong");
        assert!(text.contains("don't have an outlet in Shillong"));
        assert!(text.contains("*franchise*"));
    }

    #[test]
    fn booking_prompt_echoes_datetime() {
        let mention = DateTimeMention {
            day: Some("tomorrow".into()),
            time: Some("5 pm".into()),
        };
        let text = booking_prompt(Some(&mention));
        assert!(text.contains("tomorrow 5 pm"));
        assert!(booking_prompt(None).contains("preferred date & time"));
    }

    #[test]
    fn franchise_investment_shows_breakup() {
        let text = franchise_investment();
        assert!(text.contains("Total: Rs 19 lakhs"));
        assert!(text.contains("Franchise fee"));
    }

    #[test]
    fn confirmations_are_meaningfully_different() {
        let forwarded = lead_confirmation_forwarded("LEAD-1", "South Desk");
        let logged = lead_confirmation_logged("LEAD-1");
        assert!(forwarded.contains("forwarded"));
        assert!(forwarded.contains("South Desk"));
        assert!(!logged.contains("forwarded"));
        assert!(logged.contains("LEAD-1"));
        assert_ne!(forwarded, logged);
    }
}
