//! Domain models
//!
//! Typed records for sessions, accounts, and complaints. All models use
//! serde with camelCase field names so the persisted JSON matches the
//! dashboard's storage layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_ATTACHMENTS, MAX_SLA_PROGRESS, MIN_ESCALATION_LEVEL};

/// Role attached to every account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Citizen,
    Officer,
    Authority,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Citizen => write!(f, "citizen"),
            Self::Officer => write!(f, "officer"),
            Self::Authority => write!(f, "authority"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// The authenticated identity held by the session store.
///
/// This is a projection of an account record: credentials are never part
/// of a `User`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    /// Complaint ids assigned to this user; only meaningful for officers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_complaints: Vec<String>,
}

/// Session record as persisted under the session storage key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub user: User,
    pub token: String,
}

/// One of the fixed demo accounts used to preview each role dashboard.
/// Held in memory only, never persisted.
#[derive(Debug, Clone)]
pub struct DemoAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password_hash: String,
    pub assigned_complaints: Vec<String>,
}

impl DemoAccount {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: None,
            role: self.role,
            assigned_complaints: self.assigned_complaints.clone(),
        }
    }
}

/// A signup-created account as persisted in the registered-user table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
    /// Argon2 PHC string; the plaintext password is never persisted
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            assigned_complaints: Vec::new(),
        }
    }
}

/// Signup request
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub password: String,
}

/// Complaint severity tier, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Complaint lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Open,
    InProgress,
    Escalated,
    Resolved,
    Failed,
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Escalated => write!(f, "escalated"),
            Self::Resolved => write!(f, "resolved"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Where a complaint was filed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub region: String,
}

/// Who a complaint is assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub department: String,
}

/// A complaint record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: ComplaintStatus,
    /// Percentage of the SLA window already consumed, 0-100
    pub sla_progress: u8,
    /// Display string for remaining SLA time (set at creation, not advanced
    /// by a clock in this scope)
    pub sla_remaining: String,
    /// SLA window in hours
    pub sla_duration: u32,
    pub category: String,
    pub location: Location,
    pub assignee: Assignee,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub escalation_level: u32,
    pub retry_count: u32,
    pub attachments: Vec<String>,
    pub notes: Vec<String>,
}

/// A complaint as submitted, before the store assigns identity and
/// lifecycle fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub status: ComplaintStatus,
    pub sla_progress: u8,
    pub sla_remaining: String,
    pub sla_duration: u32,
    pub category: String,
    pub location: Location,
    pub assignee: Assignee,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ComplaintDraft {
    /// Build the stored record. Identity and lifecycle fields come from the
    /// store, everything else from the draft, with field limits applied.
    pub(crate) fn into_complaint(self, id: String, now: DateTime<Utc>) -> Complaint {
        let mut attachments = self.attachments;
        attachments.truncate(MAX_ATTACHMENTS);

        Complaint {
            id,
            title: self.title,
            description: self.description,
            severity: self.severity,
            status: self.status,
            sla_progress: self.sla_progress.min(MAX_SLA_PROGRESS),
            sla_remaining: self.sla_remaining,
            sla_duration: self.sla_duration,
            category: self.category,
            location: self.location,
            assignee: self.assignee,
            created_at: now,
            updated_at: now,
            escalation_level: MIN_ESCALATION_LEVEL,
            retry_count: 0,
            attachments,
            notes: self.notes,
        }
    }
}

/// Partial update for a complaint.
///
/// Identity fields (`id`, `createdAt`) are not representable here, so they
/// cannot change through an update. `updatedAt` is managed by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub status: Option<ComplaintStatus>,
    pub sla_progress: Option<u8>,
    pub sla_remaining: Option<String>,
    pub sla_duration: Option<u32>,
    pub category: Option<String>,
    pub location: Option<Location>,
    pub assignee: Option<Assignee>,
    pub escalation_level: Option<u32>,
    pub retry_count: Option<u32>,
    pub attachments: Option<Vec<String>>,
    pub notes: Option<Vec<String>>,
}

impl ComplaintUpdate {
    /// Shallow-merge present fields into the record, applying field limits
    pub fn apply(self, complaint: &mut Complaint) {
        if let Some(title) = self.title {
            complaint.title = title;
        }
        if let Some(description) = self.description {
            complaint.description = description;
        }
        if let Some(severity) = self.severity {
            complaint.severity = severity;
        }
        if let Some(status) = self.status {
            complaint.status = status;
        }
        if let Some(progress) = self.sla_progress {
            complaint.sla_progress = progress.min(MAX_SLA_PROGRESS);
        }
        if let Some(remaining) = self.sla_remaining {
            complaint.sla_remaining = remaining;
        }
        if let Some(duration) = self.sla_duration {
            complaint.sla_duration = duration;
        }
        if let Some(category) = self.category {
            complaint.category = category;
        }
        if let Some(location) = self.location {
            complaint.location = location;
        }
        if let Some(assignee) = self.assignee {
            complaint.assignee = assignee;
        }
        if let Some(level) = self.escalation_level {
            complaint.escalation_level = level.max(MIN_ESCALATION_LEVEL);
        }
        if let Some(retries) = self.retry_count {
            complaint.retry_count = retries;
        }
        if let Some(attachments) = self.attachments {
            complaint.attachments = attachments;
        }
        if let Some(notes) = self.notes {
            complaint.notes = notes;
        }
    }
}

/// Escalation status in the departmental chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscalationStatus {
    Pending,
    Active,
    Resolved,
    Failed,
}

/// An escalation raised against a complaint. Read-only reference data in
/// this scope; no store mutates escalations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escalation {
    pub id: String,
    pub complaint_id: String,
    pub complaint_title: String,
    pub level: u32,
    pub status: EscalationStatus,
    pub retry_count: u32,
    pub max_retries: u32,
    pub assigned_to: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason: Option<String>,
}

/// One step in an escalation chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationStep {
    pub level: u32,
    pub title: String,
    pub department: String,
    /// Hours into the SLA window at which this level trips
    pub time_threshold: u32,
}

/// SLA policy for one severity tier: the resolution window and the
/// escalation chain walked while a complaint stays unresolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRule {
    pub id: String,
    pub severity: Severity,
    /// Resolution window in hours
    pub sla_duration: u32,
    /// Ordered by ascending level and ascending time threshold
    pub escalation_levels: Vec<EscalationStep>,
}

/// Officer performance rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Average,
    Poor,
}

/// Per-officer performance rollup shown on the authority dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Officer {
    pub id: String,
    pub name: String,
    pub department: String,
    pub resolved_count: u32,
    pub pending_count: u32,
    /// Average hours from filing to resolution
    pub average_resolution_time: f64,
    /// Percentage of complaints resolved inside their SLA window
    pub sla_compliance: u8,
    pub performance: PerformanceRating,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_draft() -> ComplaintDraft {
        ComplaintDraft {
            title: "Streetlight outage".to_string(),
            description: "Streetlight dark for three nights".to_string(),
            severity: Severity::Medium,
            status: ComplaintStatus::Open,
            sla_progress: 0,
            sla_remaining: "24h".to_string(),
            sla_duration: 24,
            category: "Infrastructure".to_string(),
            location: Location {
                lat: 28.6139,
                lng: 77.209,
                address: "Sector 4, Delhi".to_string(),
                region: "Delhi NCR".to_string(),
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

    #[test]
    fn test_draft_sets_lifecycle_defaults() {
        let now = Utc::now();
        let complaint = sample_draft().into_complaint("CMP-001".to_string(), now);

        assert_eq!(complaint.id, "CMP-001");
        assert_eq!(complaint.escalation_level, 1);
        assert_eq!(complaint.retry_count, 0);
        assert_eq!(complaint.created_at, now);
        assert_eq!(complaint.updated_at, now);
    }

    #[test]
    fn test_draft_clamps_sla_progress() {
        let mut draft = sample_draft();
        draft.sla_progress = 250;

        let complaint = draft.into_complaint("CMP-001".to_string(), Utc::now());
        assert_eq!(complaint.sla_progress, 100);
    }

    #[test]
    fn test_draft_truncates_attachments() {
        let mut draft = sample_draft();
        draft.attachments = (0..8).map(|i| format!("photo-{i}.png")).collect();

        let complaint = draft.into_complaint("CMP-001".to_string(), Utc::now());
        assert_eq!(complaint.attachments.len(), MAX_ATTACHMENTS);
    }

    #[test]
    fn test_update_merges_present_fields_only() {
        let mut complaint = sample_draft().into_complaint("CMP-001".to_string(), Utc::now());

        let update = ComplaintUpdate {
            status: Some(ComplaintStatus::InProgress),
            notes: Some(vec!["Crew dispatched".to_string()]),
            ..ComplaintUpdate::default()
        };
        update.apply(&mut complaint);

        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.notes, vec!["Crew dispatched".to_string()]);
        // Untouched fields keep their values
        assert_eq!(complaint.title, "Streetlight outage");
        assert_eq!(complaint.severity, Severity::Medium);
    }

    #[test]
    fn test_update_enforces_escalation_floor() {
        let mut complaint = sample_draft().into_complaint("CMP-001".to_string(), Utc::now());
        complaint.escalation_level = 3;

        let update = ComplaintUpdate {
            escalation_level: Some(0),
            ..ComplaintUpdate::default()
        };
        update.apply(&mut complaint);

        assert_eq!(complaint.escalation_level, 1);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: "demo-officer".to_string(),
            name: "Officer Demo".to_string(),
            email: "officer@deadline.test".to_string(),
            phone: None,
            role: UserRole::Officer,
            assigned_complaints: vec!["CMP-001".to_string()],
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"assignedComplaints\""));
        assert!(json.contains("\"officer\""));
        assert!(!json.contains("phone"));
    }

    #[test]
    fn test_severity_orders_by_urgency() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }
}
