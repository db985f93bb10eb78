//! Built-in datasets
//!
//! The fixed demo accounts, the sample complaint list used when no
//! persisted list exists, and the read-only reference data (escalations,
//! policy rules, officer rollups) consumed by the dashboards.

use chrono::{DateTime, Utc};

use crate::crypto;
use crate::error::Result;
use crate::models::{
    Assignee, Complaint, ComplaintStatus, DemoAccount, Escalation, EscalationStatus,
    EscalationStep, Location, Officer, PerformanceRating, PolicyRule, Severity, UserRole,
};

/// Password shared by all demo accounts
pub const DEMO_PASSWORD: &str = "pass";

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("seed timestamps are valid RFC 3339")
}

/// The four fixed demo accounts, one per role.
///
/// Hashing happens here so the login path verifies demo and registered
/// credentials identically.
pub fn demo_accounts() -> Result<Vec<DemoAccount>> {
    let hash = crypto::hash_password(DEMO_PASSWORD)?;

    Ok(vec![
        DemoAccount {
            id: "demo-admin".to_string(),
            name: "Admin User".to_string(),
            email: "admin@deadline.test".to_string(),
            role: UserRole::Admin,
            password_hash: hash.clone(),
            assigned_complaints: Vec::new(),
        },
        DemoAccount {
            id: "demo-officer".to_string(),
            name: "Officer Demo".to_string(),
            email: "officer@deadline.test".to_string(),
            role: UserRole::Officer,
            password_hash: hash.clone(),
            assigned_complaints: vec![
                "CMP-001".to_string(),
                "CMP-003".to_string(),
                "CMP-005".to_string(),
            ],
        },
        DemoAccount {
            id: "demo-authority".to_string(),
            name: "Authority Demo".to_string(),
            email: "authority@deadline.test".to_string(),
            role: UserRole::Authority,
            password_hash: hash.clone(),
            assigned_complaints: Vec::new(),
        },
        DemoAccount {
            id: "demo-citizen".to_string(),
            name: "Citizen Demo".to_string(),
            email: "citizen@deadline.test".to_string(),
            role: UserRole::Citizen,
            password_hash: hash,
            assigned_complaints: Vec::new(),
        },
    ])
}

/// Sample complaints used when no persisted list exists
pub fn sample_complaints() -> Vec<Complaint> {
    vec![
        Complaint {
            id: "CMP-001".to_string(),
            title: "Payment gateway timeout issues".to_string(),
            description: "Multiple users reporting payment failures during checkout".to_string(),
            severity: Severity::Critical,
            status: ComplaintStatus::Escalated,
            sla_progress: 85,
            sla_remaining: "2h 15m".to_string(),
            sla_duration: 4,
            category: "Technical".to_string(),
            location: Location {
                lat: 40.7128,
                lng: -74.006,
                address: "123 Main St, New York, NY".to_string(),
                region: "Northeast".to_string(),
            },
            assignee: Assignee {
                id: "u1".to_string(),
                name: "Sarah Chen".to_string(),
                initials: "SC".to_string(),
                department: "Technical Support".to_string(),
            },
            created_at: ts("2026-01-05T09:15:00Z"),
            updated_at: ts("2026-01-07T10:30:00Z"),
            escalation_level: 3,
            retry_count: 0,
            attachments: vec!["screenshot1.png".to_string(), "log-file.txt".to_string()],
            notes: vec![
                "Initial triage completed".to_string(),
                "Escalated to L2 after 4 hours".to_string(),
            ],
        },
        Complaint {
            id: "CMP-002".to_string(),
            title: "User authentication failures".to_string(),
            description: "SSO login not working for enterprise customers".to_string(),
            severity: Severity::High,
            status: ComplaintStatus::InProgress,
            sla_progress: 45,
            sla_remaining: "8h 30m".to_string(),
            sla_duration: 12,
            category: "Security".to_string(),
            location: Location {
                lat: 34.0522,
                lng: -118.2437,
                address: "456 Tech Blvd, Los Angeles, CA".to_string(),
                region: "West".to_string(),
            },
            assignee: Assignee {
                id: "u2".to_string(),
                name: "Mike Ross".to_string(),
                initials: "MR".to_string(),
                department: "Security Team".to_string(),
            },
            created_at: ts("2026-01-06T14:20:00Z"),
            updated_at: ts("2026-01-07T08:00:00Z"),
            escalation_level: 2,
            retry_count: 1,
            attachments: vec!["error-logs.zip".to_string()],
            notes: vec!["Investigating OAuth provider".to_string()],
        },
        Complaint {
            id: "CMP-003".to_string(),
            title: "Dashboard loading slowly".to_string(),
            description: "Analytics dashboard takes 30+ seconds to load".to_string(),
            severity: Severity::Medium,
            status: ComplaintStatus::Open,
            sla_progress: 20,
            sla_remaining: "22h 45m".to_string(),
            sla_duration: 24,
            category: "Performance".to_string(),
            location: Location {
                lat: 41.8781,
                lng: -87.6298,
                address: "789 Data Center Rd, Chicago, IL".to_string(),
                region: "Midwest".to_string(),
            },
            assignee: Assignee {
                id: "u3".to_string(),
                name: "Emma Wilson".to_string(),
                initials: "EW".to_string(),
                department: "Engineering".to_string(),
            },
            created_at: ts("2026-01-07T02:30:00Z"),
            updated_at: ts("2026-01-07T02:30:00Z"),
            escalation_level: 1,
            retry_count: 0,
            attachments: Vec::new(),
            notes: Vec::new(),
        },
        Complaint {
            id: "CMP-004".to_string(),
            title: "Email notifications delayed".to_string(),
            description: "Transactional emails arriving 2-3 hours late".to_string(),
            severity: Severity::Low,
            status: ComplaintStatus::InProgress,
            sla_progress: 60,
            sla_remaining: "5h 00m".to_string(),
            sla_duration: 48,
            category: "Communication".to_string(),
            location: Location {
                lat: 29.7604,
                lng: -95.3698,
                address: "321 Houston Center, Houston, TX".to_string(),
                region: "South".to_string(),
            },
            assignee: Assignee {
                id: "u4".to_string(),
                name: "James Lee".to_string(),
                initials: "JL".to_string(),
                department: "DevOps".to_string(),
            },
            created_at: ts("2026-01-05T18:45:00Z"),
            updated_at: ts("2026-01-07T06:15:00Z"),
            escalation_level: 1,
            retry_count: 0,
            attachments: vec!["email-queue-status.png".to_string()],
            notes: vec!["Queue backlog identified".to_string()],
        },
        Complaint {
            id: "CMP-005".to_string(),
            title: "API rate limiting errors".to_string(),
            description: "Enterprise API clients hitting rate limits unexpectedly".to_string(),
            severity: Severity::High,
            status: ComplaintStatus::Escalated,
            sla_progress: 92,
            sla_remaining: "45m".to_string(),
            sla_duration: 8,
            category: "API".to_string(),
            location: Location {
                lat: 47.6062,
                lng: -122.3321,
                address: "555 Cloud Way, Seattle, WA".to_string(),
                region: "West".to_string(),
            },
            assignee: Assignee {
                id: "u1".to_string(),
                name: "Sarah Chen".to_string(),
                initials: "SC".to_string(),
                department: "Technical Support".to_string(),
            },
            created_at: ts("2026-01-06T22:00:00Z"),
            updated_at: ts("2026-01-07T11:15:00Z"),
            escalation_level: 3,
            retry_count: 2,
            attachments: vec!["api-metrics.json".to_string()],
            notes: vec![
                "Rate limit configuration reviewed".to_string(),
                "Temporary increase applied".to_string(),
            ],
        },
        Complaint {
            id: "CMP-006".to_string(),
            title: "Database connection pool exhaustion".to_string(),
            description: "Production database running out of connections during peak hours"
                .to_string(),
            severity: Severity::Critical,
            status: ComplaintStatus::InProgress,
            sla_progress: 70,
            sla_remaining: "1h 12m".to_string(),
            sla_duration: 4,
            category: "Infrastructure".to_string(),
            location: Location {
                lat: 37.7749,
                lng: -122.4194,
                address: "100 DB Lane, San Francisco, CA".to_string(),
                region: "West".to_string(),
            },
            assignee: Assignee {
                id: "u5".to_string(),
                name: "Alex Kumar".to_string(),
                initials: "AK".to_string(),
                department: "DBA Team".to_string(),
            },
            created_at: ts("2026-01-07T08:00:00Z"),
            updated_at: ts("2026-01-07T10:48:00Z"),
            escalation_level: 2,
            retry_count: 0,
            attachments: Vec::new(),
            notes: vec!["Scaling connection pool".to_string()],
        },
    ]
}

/// Escalation records referenced by the escalation-queue dashboard
pub fn reference_escalations() -> Vec<Escalation> {
    vec![
        Escalation {
            id: "ESC-001".to_string(),
            complaint_id: "CMP-001".to_string(),
            complaint_title: "Payment gateway timeout issues".to_string(),
            level: 3,
            status: EscalationStatus::Active,
            retry_count: 0,
            max_retries: 3,
            assigned_to: "Department Head".to_string(),
            department: "Technical Support".to_string(),
            created_at: ts("2026-01-06T10:00:00Z"),
            fail_reason: None,
        },
        Escalation {
            id: "ESC-002".to_string(),
            complaint_id: "CMP-005".to_string(),
            complaint_title: "API rate limiting errors".to_string(),
            level: 3,
            status: EscalationStatus::Active,
            retry_count: 2,
            max_retries: 3,
            assigned_to: "VP Engineering".to_string(),
            department: "Engineering".to_string(),
            created_at: ts("2026-01-07T09:00:00Z"),
            fail_reason: None,
        },
        Escalation {
            id: "ESC-003".to_string(),
            complaint_id: "CMP-002".to_string(),
            complaint_title: "User authentication failures".to_string(),
            level: 2,
            status: EscalationStatus::Pending,
            retry_count: 1,
            max_retries: 3,
            assigned_to: "Security Lead".to_string(),
            department: "Security Team".to_string(),
            created_at: ts("2026-01-07T06:00:00Z"),
            fail_reason: None,
        },
        Escalation {
            id: "ESC-004".to_string(),
            complaint_id: "CMP-007".to_string(),
            complaint_title: "Webhook delivery failures".to_string(),
            level: 2,
            status: EscalationStatus::Failed,
            retry_count: 3,
            max_retries: 3,
            assigned_to: "Integration Team Lead".to_string(),
            department: "Integrations".to_string(),
            created_at: ts("2026-01-05T14:00:00Z"),
            fail_reason: Some("Endpoint unreachable after 3 retry attempts".to_string()),
        },
        Escalation {
            id: "ESC-005".to_string(),
            complaint_id: "CMP-006".to_string(),
            complaint_title: "Database connection pool exhaustion".to_string(),
            level: 2,
            status: EscalationStatus::Active,
            retry_count: 0,
            max_retries: 3,
            assigned_to: "DBA Lead".to_string(),
            department: "DBA Team".to_string(),
            created_at: ts("2026-01-07T09:30:00Z"),
            fail_reason: None,
        },
    ]
}

/// Default SLA policy, one rule per severity tier
pub fn default_policy_rules() -> Vec<PolicyRule> {
    vec![
        PolicyRule {
            id: "policy-critical".to_string(),
            severity: Severity::Critical,
            sla_duration: 4,
            escalation_levels: vec![
                step(1, "Agent Assigned", "L1 Support", 0),
                step(2, "Supervisor Review", "L2 Support", 1),
                step(3, "Department Head", "Management", 2),
                step(4, "Executive Review", "C-Suite", 3),
            ],
        },
        PolicyRule {
            id: "policy-high".to_string(),
            severity: Severity::High,
            sla_duration: 12,
            escalation_levels: vec![
                step(1, "Agent Assigned", "L1 Support", 0),
                step(2, "Supervisor Review", "L2 Support", 4),
                step(3, "Department Head", "Management", 8),
            ],
        },
        PolicyRule {
            id: "policy-medium".to_string(),
            severity: Severity::Medium,
            sla_duration: 24,
            escalation_levels: vec![
                step(1, "Agent Assigned", "L1 Support", 0),
                step(2, "Supervisor Review", "L2 Support", 12),
            ],
        },
        PolicyRule {
            id: "policy-low".to_string(),
            severity: Severity::Low,
            sla_duration: 48,
            escalation_levels: vec![step(1, "Agent Assigned", "L1 Support", 0)],
        },
    ]
}

fn step(level: u32, title: &str, department: &str, time_threshold: u32) -> EscalationStep {
    EscalationStep {
        level,
        title: title.to_string(),
        department: department.to_string(),
        time_threshold,
    }
}

/// SLA window for a severity tier, from the default policy table
pub fn sla_duration_for(severity: Severity) -> u32 {
    default_policy_rules()
        .iter()
        .find(|rule| rule.severity == severity)
        .map(|rule| rule.sla_duration)
        .unwrap_or(48)
}

/// Officer performance rollups shown on the authority dashboard
pub fn officer_directory() -> Vec<Officer> {
    vec![
        officer("u1", "Sarah Chen", "Technical Support", 145, 8, 3.2, 94, PerformanceRating::Excellent),
        officer("u2", "Mike Ross", "Security Team", 98, 12, 5.8, 88, PerformanceRating::Good),
        officer("u3", "Emma Wilson", "Engineering", 76, 5, 4.1, 91, PerformanceRating::Good),
        officer("u4", "James Lee", "DevOps", 112, 3, 2.8, 96, PerformanceRating::Excellent),
        officer("u5", "Alex Kumar", "DBA Team", 67, 15, 6.5, 78, PerformanceRating::Average),
        officer("u6", "Lisa Park", "Customer Success", 203, 22, 4.2, 85, PerformanceRating::Good),
    ]
}

#[allow(clippy::too_many_arguments)]
fn officer(
    id: &str,
    name: &str,
    department: &str,
    resolved_count: u32,
    pending_count: u32,
    average_resolution_time: f64,
    sla_compliance: u8,
    performance: PerformanceRating,
) -> Officer {
    Officer {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        resolved_count,
        pending_count,
        average_resolution_time,
        sla_compliance,
        performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::verify_password;

    #[test]
    fn test_demo_accounts_cover_every_role() {
        let accounts = demo_accounts().unwrap();

        assert_eq!(accounts.len(), 4);
        for role in [
            UserRole::Admin,
            UserRole::Officer,
            UserRole::Authority,
            UserRole::Citizen,
        ] {
            assert!(accounts.iter().any(|a| a.role == role));
        }
    }

    #[test]
    fn test_demo_password_verifies() {
        let accounts = demo_accounts().unwrap();

        assert!(verify_password(DEMO_PASSWORD, &accounts[0].password_hash));
        assert!(!verify_password("wrong", &accounts[0].password_hash));
    }

    #[test]
    fn test_officer_demo_has_assigned_complaints() {
        let accounts = demo_accounts().unwrap();
        let officer = accounts
            .iter()
            .find(|a| a.role == UserRole::Officer)
            .unwrap();

        assert_eq!(
            officer.assigned_complaints,
            vec!["CMP-001", "CMP-003", "CMP-005"]
        );
    }

    #[test]
    fn test_sample_complaints_have_unique_sequential_ids() {
        let complaints = sample_complaints();

        assert_eq!(complaints.len(), 6);
        for (i, complaint) in complaints.iter().enumerate() {
            assert_eq!(complaint.id, format!("CMP-{:03}", i + 1));
            assert!(complaint.updated_at >= complaint.created_at);
            assert!(complaint.escalation_level >= 1);
            assert!(complaint.sla_progress <= 100);
        }
    }

    #[test]
    fn test_policy_levels_are_ordered() {
        for rule in default_policy_rules() {
            let levels: Vec<u32> = rule.escalation_levels.iter().map(|s| s.level).collect();
            let thresholds: Vec<u32> = rule
                .escalation_levels
                .iter()
                .map(|s| s.time_threshold)
                .collect();

            assert!(levels.windows(2).all(|w| w[0] < w[1]));
            assert!(thresholds.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_sla_duration_lookup() {
        assert_eq!(sla_duration_for(Severity::Critical), 4);
        assert_eq!(sla_duration_for(Severity::High), 12);
        assert_eq!(sla_duration_for(Severity::Medium), 24);
        assert_eq!(sla_duration_for(Severity::Low), 48);
    }

    #[test]
    fn test_reference_escalations_point_at_complaints() {
        let escalations = reference_escalations();

        assert_eq!(escalations.len(), 5);
        for escalation in &escalations {
            assert!(escalation.complaint_id.starts_with("CMP-"));
            assert!(escalation.retry_count <= escalation.max_retries);
        }

        let failed = escalations
            .iter()
            .find(|e| e.status == EscalationStatus::Failed)
            .unwrap();
        assert!(failed.fail_reason.is_some());
    }
}
