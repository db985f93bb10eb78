//! Complaint service
//!
//! Owns the authoritative in-memory complaint list, hydrated once from
//! storage and written through on every mutation. Views read snapshots or
//! watch the list for changes; a read immediately after a mutation always
//! observes it.

use chrono::{Duration, Utc};
use tokio::sync::watch;

use crate::config::{COMPLAINTS_KEY, COMPLAINT_ID_PREFIX, COMPLAINT_ID_WIDTH};
use crate::error::{AppError, Result};
use crate::models::{Complaint, ComplaintDraft, ComplaintUpdate};
use crate::seed;
use crate::storage::LocalStore;

/// Service managing the complaint list
#[derive(Clone)]
pub struct ComplaintService {
    store: LocalStore,
    complaints: watch::Sender<Vec<Complaint>>,
}

impl ComplaintService {
    pub fn new(store: LocalStore) -> Self {
        let (complaints, _) = watch::channel(Vec::new());
        Self { store, complaints }
    }

    /// One-time hydration from storage. An absent or corrupt list falls
    /// back to the built-in sample dataset without surfacing an error.
    pub async fn initialize(&self) -> Result<()> {
        let list = match self.store.get::<Vec<Complaint>>(COMPLAINTS_KEY).await {
            Ok(Some(list)) => {
                tracing::info!("Loaded {} complaints from storage", list.len());
                list
            }
            Ok(None) => {
                tracing::info!("No stored complaints, seeding sample dataset");
                seed::sample_complaints()
            }
            Err(AppError::Serialization(err)) => {
                tracing::warn!("Discarding corrupt complaint list: {}", err);
                seed::sample_complaints()
            }
            Err(err) => return Err(err),
        };

        self.complaints.send_replace(list);
        Ok(())
    }

    /// File a new complaint and return its id.
    ///
    /// The record is prepended (most-recent-first is the display
    /// convention) and the full list is persisted before returning.
    pub async fn add(&self, draft: ComplaintDraft) -> Result<String> {
        let now = Utc::now();
        let mut id = String::new();

        self.complaints.send_modify(|list| {
            id = next_complaint_id(list);
            list.insert(0, draft.into_complaint(id.clone(), now));
        });

        self.persist().await?;
        tracing::info!("Complaint {} filed", id);

        Ok(id)
    }

    /// Look up a complaint by id, case-insensitively
    pub fn get(&self, id: &str) -> Option<Complaint> {
        self.complaints
            .borrow()
            .iter()
            .find(|complaint| complaint.id.eq_ignore_ascii_case(id))
            .cloned()
    }

    /// Merge a partial update into the matching record and stamp
    /// `updated_at`. An unknown id is a silent no-op: callers may be
    /// racing a list reload, and storage stays untouched.
    pub async fn update(&self, id: &str, update: ComplaintUpdate) -> Result<()> {
        let mut found = false;

        self.complaints.send_modify(|list| {
            if let Some(complaint) = list.iter_mut().find(|complaint| complaint.id == id) {
                let now = Utc::now();
                // updated_at must advance even when the clock has not
                complaint.updated_at = if now > complaint.updated_at {
                    now
                } else {
                    complaint.updated_at + Duration::nanoseconds(1)
                };
                update.apply(complaint);
                found = true;
            }
        });

        if found {
            self.persist().await?;
            tracing::debug!("Complaint {} updated", id);
        } else {
            tracing::debug!("Update for unknown complaint {} ignored", id);
        }

        Ok(())
    }

    /// Snapshot of the current list, most recent first
    pub fn list(&self) -> Vec<Complaint> {
        self.complaints.borrow().clone()
    }

    /// Watch the list for changes. Receivers observe the snapshot produced
    /// by each mutation.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Complaint>> {
        self.complaints.subscribe()
    }

    async fn persist(&self) -> Result<()> {
        let snapshot = self.complaints.borrow().clone();
        self.store.set(COMPLAINTS_KEY, &snapshot).await
    }
}

/// Next id from the highest existing numeric suffix.
///
/// Length-based counters regenerate ids after out-of-band removals;
/// scanning the suffixes cannot. Non-conforming ids are skipped.
fn next_complaint_id(list: &[Complaint]) -> String {
    let highest = list
        .iter()
        .filter_map(|complaint| {
            complaint
                .id
                .strip_prefix(COMPLAINT_ID_PREFIX)
                .and_then(|rest| rest.strip_prefix('-'))
                .and_then(|suffix| suffix.parse::<u32>().ok())
        })
        .max()
        .unwrap_or(0);

    format!(
        "{}-{:0width$}",
        COMPLAINT_ID_PREFIX,
        highest + 1,
        width = COMPLAINT_ID_WIDTH
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignee, ComplaintStatus, Location, Severity};
    use tempfile::TempDir;

    async fn create_test_service() -> (ComplaintService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        store.initialize().await.unwrap();
        (ComplaintService::new(store), temp_dir)
    }

    fn draft(title: &str, severity: Severity) -> ComplaintDraft {
        ComplaintDraft {
            title: title.to_string(),
            description: "Water supply disrupted since morning".to_string(),
            severity,
            status: ComplaintStatus::Open,
            sla_progress: 0,
            sla_remaining: format!("{}h", seed::sla_duration_for(severity)),
            sla_duration: seed::sla_duration_for(severity),
            category: "Utilities".to_string(),
            location: Location {
                lat: 19.076,
                lng: 72.8777,
                address: "Ward 12, Mumbai".to_string(),
                region: "Mumbai".to_string(),
            },
            assignee: Assignee {
                id: "pending".to_string(),
                name: "Pending Assignment".to_string(),
                initials: "PA".to_string(),
                department: "Triage Queue".to_string(),
            },
            attachments: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_zero_padded() {
        let (service, _temp) = create_test_service().await;

        let first = service.add(draft("No water", Severity::High)).await.unwrap();
        let second = service.add(draft("Low pressure", Severity::Low)).await.unwrap();

        assert_eq!(first, "CMP-001");
        assert_eq!(second, "CMP-002");

        // Most recent first
        let list = service.list();
        assert_eq!(list[0].id, "CMP-002");
        assert_eq!(list[1].id, "CMP-001");
    }

    #[tokio::test]
    async fn test_ids_skip_past_the_highest_suffix() {
        let (service, _temp) = create_test_service().await;
        service.initialize().await.unwrap();

        // Sample dataset ends at CMP-006
        let id = service.add(draft("Pothole", Severity::Medium)).await.unwrap();
        assert_eq!(id, "CMP-007");
    }

    #[tokio::test]
    async fn test_get_is_case_insensitive() {
        let (service, _temp) = create_test_service().await;

        let id = service.add(draft("No water", Severity::High)).await.unwrap();

        assert!(service.get("cmp-001").is_some());
        assert!(service.get(&id.to_lowercase()).is_some());
        assert!(service.get("CMP-999").is_none());
    }

    #[tokio::test]
    async fn test_update_preserves_identity_fields() {
        let (service, _temp) = create_test_service().await;

        let id = service.add(draft("No water", Severity::High)).await.unwrap();
        let before = service.get(&id).unwrap();

        service
            .update(
                &id,
                ComplaintUpdate {
                    status: Some(ComplaintStatus::InProgress),
                    ..ComplaintUpdate::default()
                },
            )
            .await
            .unwrap();

        let after = service.get(&id).unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at > before.updated_at);
        assert_eq!(after.status, ComplaintStatus::InProgress);
    }

    #[tokio::test]
    async fn test_rapid_updates_still_advance_updated_at() {
        let (service, _temp) = create_test_service().await;
        let id = service.add(draft("No water", Severity::High)).await.unwrap();

        let mut last = service.get(&id).unwrap().updated_at;
        for progress in [10u8, 20, 30] {
            service
                .update(
                    &id,
                    ComplaintUpdate {
                        sla_progress: Some(progress),
                        ..ComplaintUpdate::default()
                    },
                )
                .await
                .unwrap();

            let stamped = service.get(&id).unwrap().updated_at;
            assert!(stamped > last);
            last = stamped;
        }
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_a_no_op() {
        let (service, _temp) = create_test_service().await;

        service.add(draft("No water", Severity::High)).await.unwrap();
        let before = service.list();

        service
            .update(
                "CMP-999",
                ComplaintUpdate {
                    status: Some(ComplaintStatus::Resolved),
                    ..ComplaintUpdate::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(service.list(), before);
    }

    #[tokio::test]
    async fn test_update_clamps_escalation_and_progress() {
        let (service, _temp) = create_test_service().await;
        let id = service.add(draft("No water", Severity::High)).await.unwrap();

        service
            .update(
                &id,
                ComplaintUpdate {
                    escalation_level: Some(0),
                    sla_progress: Some(130),
                    ..ComplaintUpdate::default()
                },
            )
            .await
            .unwrap();

        let complaint = service.get(&id).unwrap();
        assert_eq!(complaint.escalation_level, 1);
        assert_eq!(complaint.sla_progress, 100);
    }

    #[tokio::test]
    async fn test_initialize_seeds_when_storage_is_empty() {
        let (service, _temp) = create_test_service().await;

        service.initialize().await.unwrap();

        let list = service.list();
        assert_eq!(list.len(), 6);
        assert_eq!(list[0].id, "CMP-001");
    }

    #[tokio::test]
    async fn test_initialize_recovers_from_corrupt_storage() {
        let (service, _temp) = create_test_service().await;

        tokio::fs::write(service.store.root().join("complaints.json"), "[{oops")
            .await
            .unwrap();

        service.initialize().await.unwrap();
        assert_eq!(service.list().len(), 6);
    }

    #[tokio::test]
    async fn test_mutations_are_written_through() {
        let (service, _temp) = create_test_service().await;

        let id = service.add(draft("No water", Severity::High)).await.unwrap();
        service
            .update(
                &id,
                ComplaintUpdate {
                    status: Some(ComplaintStatus::Resolved),
                    ..ComplaintUpdate::default()
                },
            )
            .await
            .unwrap();

        // A fresh service over the same store hydrates the persisted list
        let reloaded = ComplaintService::new(service.store.clone());
        reloaded.initialize().await.unwrap();

        let complaint = reloaded.get(&id).unwrap();
        assert_eq!(complaint.status, ComplaintStatus::Resolved);
        assert_eq!(reloaded.list(), service.list());
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations() {
        let (service, _temp) = create_test_service().await;
        let mut receiver = service.subscribe();

        let id = service.add(draft("No water", Severity::High)).await.unwrap();

        let snapshot = receiver.borrow_and_update().clone();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
    }
}
