// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CSV export of the lead book.

use trimflow_core::TrimflowError;

use crate::model::Lead;

/// Fixed dashboard column order. Changing this breaks downstream
/// spreadsheet imports.
pub const CSV_COLUMNS: &[&str] = &[
    "ID",
    "Phone",
    "Name",
    "Location",
    "Enquiry Type",
    "Status",
    "Regional Advisor",
    "Created At",
    "Forwarded At",
];

/// Render leads as CSV, one row per lead in the given order.
pub fn export_csv(leads: &[Lead]) -> Result<String, TrimflowError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| TrimflowError::Storage {
            source: Box::new(e),
        })?;

    for lead in leads {
        let advisor = lead
            .regional_advisor
            .as_ref()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Not assigned".to_string());
        let forwarded_at = lead
            .forwarded_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "Not forwarded".to_string());
        let enquiry_type = lead.enquiry_type.to_string();
        let status = lead.status.to_string();
        let created_at = lead.created_at.to_rfc3339();

        writer
            .write_record([
                lead.id.as_str(),
                lead.customer_phone.as_str(),
                lead.customer_name.as_str(),
                lead.location.as_str(),
                enquiry_type.as_str(),
                status.as_str(),
                advisor.as_str(),
                created_at.as_str(),
                forwarded_at.as_str(),
            ])
            .map_err(|e| TrimflowError::Storage {
                source: Box::new(e),
            })?;
    }

    let bytes = writer.into_inner().map_err(|e| TrimflowError::Storage {
        source: Box::new(e),
    })?;
    String::from_utf8(bytes).map_err(|e| TrimflowError::Storage {
        source: Box::new(e),
    })
}
