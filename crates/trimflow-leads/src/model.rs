// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model for franchise leads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use strum::{Display, EnumString};

/// Lead progression status.
///
/// One-way-advancing in practice but deliberately not enforced: the
/// dashboard may write any value at any time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Forwarded,
    Contacted,
    InDiscussion,
    Converted,
    NotInterested,
}

/// What the enquiry was mainly about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EnquiryType {
    Investment,
    Revenue,
    Support,
    Location,
    General,
}

static INVESTMENT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\b(investment|cost|money|capital|fund|breakup)\b").expect("valid regex")
});
static REVENUE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\b(revenue|profit|roi|return|earn|income)\b").expect("valid regex")
});
static SUPPORT_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\b(support|training|help|assistance)\b").expect("valid regex")
});
static LOCATION_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)\b(location|area|city|state|place)\b").expect("valid regex")
});

impl EnquiryType {
    /// Classify an enquiry message. First matching category wins;
    /// anything else is general.
    pub fn detect(message: &str) -> Self {
        if INVESTMENT_RE.is_match(message) {
            EnquiryType::Investment
        } else if REVENUE_RE.is_match(message) {
            EnquiryType::Revenue
        } else if SUPPORT_RE.is_match(message) {
            EnquiryType::Support
        } else if LOCATION_RE.is_match(message) {
            EnquiryType::Location
        } else {
            EnquiryType::General
        }
    }
}

/// An append-only note on a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadNote {
    pub timestamp: DateTime<Utc>,
    pub text: String,
    /// Note category: "forwarding", "status_update", "error", "general".
    pub kind: String,
}

/// The advisor a lead was forwarded to, copied by value at forwarding
/// time so the recipient stays attributable even if the directory changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorInfo {
    pub name: String,
    pub region: String,
    pub contact: String,
}

/// A persisted franchise enquiry. Never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub customer_phone: String,
    pub customer_name: String,
    /// Email collected by the guided flow; "Not provided" when skipped.
    #[serde(default)]
    pub customer_email: Option<String>,
    pub location: String,
    pub enquiry_type: EnquiryType,
    pub enquiry_message: String,
    pub interested_in: Vec<String>,
    pub status: LeadStatus,
    pub source: String,
    pub assigned_to: Option<String>,
    pub regional_advisor: Option<AdvisorInfo>,
    pub forwarded_at: Option<DateTime<Utc>>,
    pub notes: Vec<LeadNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a lead. Everything else is stamped by
/// the store.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub customer_phone: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub location: String,
    pub enquiry_type: EnquiryType,
    pub enquiry_message: String,
    pub interested_in: Vec<String>,
}

impl NewLead {
    /// Build a lead from a raw enquiry message, detecting the enquiry type
    /// from its wording.
    pub fn from_enquiry(
        customer_phone: impl Into<String>,
        customer_name: impl Into<String>,
        location: impl Into<String>,
        enquiry_message: impl Into<String>,
    ) -> Self {
        let enquiry_message = enquiry_message.into();
        Self {
            customer_phone: customer_phone.into(),
            customer_name: customer_name.into(),
            customer_email: None,
            location: location.into(),
            enquiry_type: EnquiryType::detect(&enquiry_message),
            enquiry_message,
            interested_in: vec!["Franchise Opportunity".to_string()],
        }
    }
}
