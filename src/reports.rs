//! Derived views over the complaint list
//!
//! Pure aggregation helpers consumed by the dashboards. Nothing here
//! touches store state; every function works on a snapshot slice.

use std::collections::HashMap;

use crate::models::{Complaint, ComplaintStatus, Severity, User};

/// Complaints per region, with the worst severity seen there. Sorted by
/// descending count for hotspot rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHotspot {
    pub region: String,
    pub complaint_count: usize,
    pub worst_severity: Severity,
    /// Centroid of the complaint coordinates in this region
    pub lat: f64,
    pub lng: f64,
}

/// Open/resolved tallies for one assignee
#[derive(Debug, Clone, PartialEq)]
pub struct AssigneeWorkload {
    pub assignee_id: String,
    pub name: String,
    pub department: String,
    pub active_count: usize,
    pub resolved_count: usize,
}

/// Tally complaints by lifecycle status
pub fn status_counts(complaints: &[Complaint]) -> HashMap<ComplaintStatus, usize> {
    let mut counts = HashMap::new();
    for complaint in complaints {
        *counts.entry(complaint.status).or_insert(0) += 1;
    }
    counts
}

/// Tally complaints by severity tier
pub fn severity_counts(complaints: &[Complaint]) -> HashMap<Severity, usize> {
    let mut counts = HashMap::new();
    for complaint in complaints {
        *counts.entry(complaint.severity).or_insert(0) += 1;
    }
    counts
}

/// Complaints currently sitting in the escalation queue
pub fn escalation_queue(complaints: &[Complaint]) -> Vec<&Complaint> {
    complaints
        .iter()
        .filter(|complaint| complaint.status == ComplaintStatus::Escalated)
        .collect()
}

/// Complaints assigned to `user` (by the officer's assigned-id list)
pub fn assigned_to<'a>(complaints: &'a [Complaint], user: &User) -> Vec<&'a Complaint> {
    complaints
        .iter()
        .filter(|complaint| user.assigned_complaints.iter().any(|id| *id == complaint.id))
        .collect()
}

/// Aggregate complaints into per-region hotspots
pub fn region_hotspots(complaints: &[Complaint]) -> Vec<RegionHotspot> {
    let mut by_region: HashMap<&str, Vec<&Complaint>> = HashMap::new();
    for complaint in complaints {
        by_region
            .entry(complaint.location.region.as_str())
            .or_default()
            .push(complaint);
    }

    let mut hotspots: Vec<RegionHotspot> = by_region
        .into_iter()
        .map(|(region, group)| {
            let count = group.len();
            let worst = group
                .iter()
                .map(|complaint| complaint.severity)
                .max()
                .unwrap_or(Severity::Low);
            let lat = group.iter().map(|c| c.location.lat).sum::<f64>() / count as f64;
            let lng = group.iter().map(|c| c.location.lng).sum::<f64>() / count as f64;

            RegionHotspot {
                region: region.to_string(),
                complaint_count: count,
                worst_severity: worst,
                lat,
                lng,
            }
        })
        .collect();

    hotspots.sort_by(|a, b| {
        b.complaint_count
            .cmp(&a.complaint_count)
            .then_with(|| a.region.cmp(&b.region))
    });
    hotspots
}

/// Roll up active/resolved counts per assignee
pub fn assignee_workloads(complaints: &[Complaint]) -> Vec<AssigneeWorkload> {
    let mut by_assignee: HashMap<&str, AssigneeWorkload> = HashMap::new();

    for complaint in complaints {
        let entry = by_assignee
            .entry(complaint.assignee.id.as_str())
            .or_insert_with(|| AssigneeWorkload {
                assignee_id: complaint.assignee.id.clone(),
                name: complaint.assignee.name.clone(),
                department: complaint.assignee.department.clone(),
                active_count: 0,
                resolved_count: 0,
            });

        if complaint.status == ComplaintStatus::Resolved {
            entry.resolved_count += 1;
        } else {
            entry.active_count += 1;
        }
    }

    let mut workloads: Vec<AssigneeWorkload> = by_assignee.into_values().collect();
    workloads.sort_by(|a, b| {
        b.active_count
            .cmp(&a.active_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    workloads
}
