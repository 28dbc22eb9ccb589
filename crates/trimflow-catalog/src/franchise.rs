// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Franchise investment economics.

/// Investment terms for a single franchise outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FranchiseEconomics {
    /// Total investment in lakhs of rupees.
    pub total_investment_lakhs: u32,
    /// One-time franchise fee in lakhs.
    pub franchise_fee_lakhs: u32,
    /// Interior setup budget in lakhs.
    pub interior_lakhs: u32,
    /// Equipment budget in lakhs.
    pub equipment_lakhs: u32,
    /// Working capital reserve in lakhs.
    pub working_capital_lakhs: u32,
    /// Expected payback window.
    pub roi_months: &'static str,
    /// Annual revenue potential in lakhs.
    pub revenue_potential_lakhs: &'static str,
    /// Expected profit margin.
    pub profit_margin: &'static str,
    /// Floor area requirement in square feet.
    pub area_sqft: &'static str,
    /// Staffing requirement.
    pub staff: &'static str,
}

/// Current franchise terms.
pub const ECONOMICS: FranchiseEconomics = FranchiseEconomics {
    total_investment_lakhs: 19,
    franchise_fee_lakhs: 5,
    interior_lakhs: 8,
    equipment_lakhs: 3,
    working_capital_lakhs: 3,
    roi_months: "18-24 months",
    revenue_potential_lakhs: "40-50 lakhs/year",
    profit_margin: "30-35%",
    area_sqft: "400-600 sq ft",
    staff: "3-5 skilled barbers",
};
