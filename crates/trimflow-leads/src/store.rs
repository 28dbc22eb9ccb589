// SPDX-FileCopyrightText: 2026 Trimflow Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed JSON lead store.
//!
//! The whole document is rewritten atomically (temp file + rename in the
//! same directory) on every mutation, serialized through a single writer
//! lock. Leads are prepended so the newest enquiry is always first.
//!
//! `create_lead` is the one operation in the system allowed to fail loudly:
//! silently losing a customer enquiry is unacceptable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use trimflow_core::TrimflowError;

use crate::model::{AdvisorInfo, Lead, LeadNote, LeadStatus, NewLead};

/// On-disk document layout.
#[derive(Debug, Serialize, Deserialize)]
struct LeadDocument {
    leads: Vec<Lead>,
    metadata: Metadata,
}

#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    total_leads: usize,
    last_updated: chrono::DateTime<Utc>,
    version: String,
}

impl Default for LeadDocument {
    fn default() -> Self {
        Self {
            leads: Vec::new(),
            metadata: Metadata {
                total_leads: 0,
                last_updated: Utc::now(),
                version: "1.0".to_string(),
            },
        }
    }
}

/// Aggregate statistics over the lead book, consumed by the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSummary {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_location: BTreeMap<String, usize>,
    pub by_enquiry_type: BTreeMap<String, usize>,
    pub today_count: usize,
    pub week_count: usize,
    pub month_count: usize,
}

/// The lead store handle. Cheap to share behind an `Arc`.
pub struct LeadStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles; reads go lock-free.
    write_lock: tokio::sync::Mutex<()>,
}

impl LeadStore {
    /// Open (or lazily create) a store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<LeadDocument, TrimflowError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| TrimflowError::Storage {
                source: Box::new(e),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(LeadDocument::default()),
            Err(e) => Err(TrimflowError::Storage {
                source: Box::new(e),
            }),
        }
    }

    async fn write_document(&self, mut doc: LeadDocument) -> Result<(), TrimflowError> {
        doc.metadata.total_leads = doc.leads.len();
        doc.metadata.last_updated = Utc::now();

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| TrimflowError::Storage {
                        source: Box::new(e),
                    })?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&doc).map_err(|e| TrimflowError::Storage {
            source: Box::new(e),
        })?;

        // Atomic rewrite: never leave a half-written lead book behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| TrimflowError::Storage {
                source: Box::new(e),
            })?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| TrimflowError::Storage {
                source: Box::new(e),
            })
    }

    /// Create and persist a new lead. Returns the stored lead with its
    /// generated ID. Errors propagate to the caller.
    pub async fn create_lead(&self, new: NewLead) -> Result<Lead, TrimflowError> {
        let _guard = self.write_lock.lock().await;

        let now = Utc::now();
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let lead = Lead {
            id: format!("LEAD-{}-{}", now.timestamp_millis(), &suffix[..8]),
            customer_phone: new.customer_phone,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            location: new.location,
            enquiry_type: new.enquiry_type,
            enquiry_message: new.enquiry_message,
            interested_in: new.interested_in,
            status: LeadStatus::New,
            source: "whatsapp_bot".to_string(),
            assigned_to: None,
            regional_advisor: None,
            forwarded_at: None,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut doc = self.read_document().await?;
        doc.leads.insert(0, lead.clone());
        self.write_document(doc).await?;

        info!(lead_id = %lead.id, phone = %lead.customer_phone, "lead created");
        Ok(lead)
    }

    /// Fetch a single lead by ID.
    pub async fn get(&self, lead_id: &str) -> Result<Option<Lead>, TrimflowError> {
        let doc = self.read_document().await?;
        Ok(doc.leads.into_iter().find(|l| l.id == lead_id))
    }

    /// All leads, newest first.
    pub async fn all(&self) -> Result<Vec<Lead>, TrimflowError> {
        Ok(self.read_document().await?.leads)
    }

    /// Leads with the given status.
    pub async fn by_status(&self, status: LeadStatus) -> Result<Vec<Lead>, TrimflowError> {
        let doc = self.read_document().await?;
        Ok(doc.leads.into_iter().filter(|l| l.status == status).collect())
    }

    /// Leads whose phone number contains `fragment`.
    pub async fn by_phone(&self, fragment: &str) -> Result<Vec<Lead>, TrimflowError> {
        let doc = self.read_document().await?;
        Ok(doc
            .leads
            .into_iter()
            .filter(|l| l.customer_phone.contains(fragment))
            .collect())
    }

    /// Apply `mutate` to the lead with `lead_id`, persisting the change.
    /// Returns false when the lead does not exist.
    async fn mutate_lead<F>(&self, lead_id: &str, mutate: F) -> Result<bool, TrimflowError>
    where
        F: FnOnce(&mut Lead),
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;
        let Some(lead) = doc.leads.iter_mut().find(|l| l.id == lead_id) else {
            return Ok(false);
        };
        mutate(lead);
        lead.updated_at = Utc::now();
        self.write_document(doc).await?;
        Ok(true)
    }

    /// Set a lead's status, optionally attaching a status-update note.
    pub async fn update_status(
        &self,
        lead_id: &str,
        status: LeadStatus,
        note: Option<&str>,
    ) -> Result<bool, TrimflowError> {
        let updated = self
            .mutate_lead(lead_id, |lead| {
                lead.status = status;
                if let Some(text) = note {
                    lead.notes.push(LeadNote {
                        timestamp: Utc::now(),
                        text: text.to_string(),
                        kind: "status_update".to_string(),
                    });
                }
            })
            .await?;
        if updated {
            info!(lead_id, status = %status, "lead status updated");
        }
        Ok(updated)
    }

    /// Record a successful forward: status, timestamp, advisor copy, and a
    /// forwarding note.
    pub async fn mark_forwarded(
        &self,
        lead_id: &str,
        advisor: AdvisorInfo,
    ) -> Result<bool, TrimflowError> {
        let updated = self
            .mutate_lead(lead_id, |lead| {
                lead.status = LeadStatus::Forwarded;
                lead.forwarded_at = Some(Utc::now());
                lead.assigned_to = Some(advisor.name.clone());
                lead.notes.push(LeadNote {
                    timestamp: Utc::now(),
                    text: format!("Forwarded to {} ({})", advisor.name, advisor.region),
                    kind: "forwarding".to_string(),
                });
                lead.regional_advisor = Some(advisor);
            })
            .await?;
        if updated {
            info!(lead_id, "lead marked forwarded");
        }
        Ok(updated)
    }

    /// Append a note to a lead.
    pub async fn add_note(
        &self,
        lead_id: &str,
        text: &str,
        kind: &str,
    ) -> Result<bool, TrimflowError> {
        self.mutate_lead(lead_id, |lead| {
            lead.notes.push(LeadNote {
                timestamp: Utc::now(),
                text: text.to_string(),
                kind: kind.to_string(),
            });
        })
        .await
    }

    /// Aggregate statistics for the dashboard.
    pub async fn summary(&self) -> Result<LeadSummary, TrimflowError> {
        let doc = self.read_document().await?;
        let now = Utc::now();
        let today = now.date_naive();
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let mut summary = LeadSummary {
            total: doc.leads.len(),
            by_status: BTreeMap::new(),
            by_location: BTreeMap::new(),
            by_enquiry_type: BTreeMap::new(),
            today_count: 0,
            week_count: 0,
            month_count: 0,
        };

        for lead in &doc.leads {
            *summary.by_status.entry(lead.status.to_string()).or_default() += 1;
            *summary
                .by_location
                .entry(lead.location.clone())
                .or_default() += 1;
            *summary
                .by_enquiry_type
                .entry(lead.enquiry_type.to_string())
                .or_default() += 1;
            if lead.created_at.date_naive() == today {
                summary.today_count += 1;
            }
            if lead.created_at >= week_ago {
                summary.week_count += 1;
            }
            if lead.created_at >= month_ago {
                summary.month_count += 1;
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnquiryType;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> LeadStore {
        LeadStore::new(dir.path().join("leads.json"))
    }

    fn make_new_lead(phone: &str) -> NewLead {
        NewLead::from_enquiry(phone, "Test Customer", "Chennai", "franchise details please")
    }

    #[tokio::test]
    async fn create_and_get_lead_roundtrips() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let lead = store.create_lead(make_new_lead("+919876500001")).await.unwrap();
        assert!(lead.id.starts_with("LEAD-"));
        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.source, "whatsapp_bot");

        let fetched = store.get(&lead.id).await.unwrap().unwrap();
        assert_eq!(fetched.customer_phone, "+919876500001");
        assert_eq!(fetched.enquiry_type, EnquiryType::General);
    }

    #[tokio::test]
    async fn leads_are_prepended_newest_first() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        let first = store.create_lead(make_new_lead("+911")).await.unwrap();
        let second = store.create_lead(make_new_lead("+912")).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn lead_ids_are_unique() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let a = store.create_lead(make_new_lead("+911")).await.unwrap();
        let b = store.create_lead(make_new_lead("+911")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_status_attaches_note() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let lead = store.create_lead(make_new_lead("+911")).await.unwrap();

        let updated = store
            .update_status(&lead.id, LeadStatus::Contacted, Some("called back"))
            .await
            .unwrap();
        assert!(updated);

        let fetched = store.get(&lead.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, LeadStatus::Contacted);
        assert_eq!(fetched.notes.len(), 1);
        assert_eq!(fetched.notes[0].kind, "status_update");
        assert!(fetched.updated_at >= fetched.created_at);
    }

    #[tokio::test]
    async fn update_missing_lead_returns_false() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let updated = store
            .update_status("LEAD-nope", LeadStatus::Contacted, None)
            .await
            .unwrap();
        assert!(!updated);
    }

    #[tokio::test]
    async fn mark_forwarded_copies_advisor_by_value() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let lead = store.create_lead(make_new_lead("+911")).await.unwrap();

        let advisor = AdvisorInfo {
            name: "South Desk".into(),
            region: "south-india".into(),
            contact: "+918600010001".into(),
        };
        store.mark_forwarded(&lead.id, advisor.clone()).await.unwrap();

        let fetched = store.get(&lead.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, LeadStatus::Forwarded);
        assert!(fetched.forwarded_at.is_some());
        assert_eq!(fetched.regional_advisor, Some(advisor));
        assert_eq!(fetched.assigned_to.as_deref(), Some("South Desk"));
        assert_eq!(fetched.notes.len(), 1);
        assert_eq!(fetched.notes[0].kind, "forwarding");
    }

    #[tokio::test]
    async fn filters_by_status_and_phone() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let a = store.create_lead(make_new_lead("+919876500001")).await.unwrap();
        let _b = store.create_lead(make_new_lead("+918600000002")).await.unwrap();
        store
            .update_status(&a.id, LeadStatus::Contacted, None)
            .await
            .unwrap();

        let contacted = store.by_status(LeadStatus::Contacted).await.unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0].id, a.id);

        let by_phone = store.by_phone("98765").await.unwrap();
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, a.id);
    }

    #[tokio::test]
    async fn summary_counts_statuses_and_recency() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let a = store.create_lead(make_new_lead("+911")).await.unwrap();
        let _b = store.create_lead(make_new_lead("+912")).await.unwrap();
        store
            .update_status(&a.id, LeadStatus::Converted, None)
            .await
            .unwrap();

        let summary = store.summary().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.by_status.get("new"), Some(&1));
        assert_eq!(summary.by_status.get("converted"), Some(&1));
        assert_eq!(summary.by_location.get("Chennai"), Some(&2));
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.week_count, 2);
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.all().await.unwrap().is_empty());
        assert!(store.get("LEAD-x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_fails_loudly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leads.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();
        let store = LeadStore::new(&path);

        let err = store.create_lead(make_new_lead("+911")).await.unwrap_err();
        assert!(matches!(err, TrimflowError::Storage { .. }));
    }

    #[tokio::test]
    async fn no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.create_lead(make_new_lead("+911")).await.unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["leads.json".to_string()]);
    }
}
