// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static reference data for the Trimflow bot.
//!
//! Outlet directory, service price menu, franchise economics, and the
//! regional advisor directory. Pure data plus lookup/filter functions;
//! no I/O and no mutable state.

pub mod advisors;
pub mod franchise;
pub mod outlets;
pub mod services;

pub use advisors::{RegionalAdvisor, advisor_for_location, has_active_advisors};
pub use franchise::ECONOMICS;
pub use outlets::{Outlet, all_cities, all_states, outlets_by_city, outlets_by_state};
pub use services::{SERVICE_MENU, ServiceSection, section_by_key};
