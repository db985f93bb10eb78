//! Application configuration constants
//!
//! Central location for storage keys, identifier formats, and validation
//! boundaries used throughout the crate.

// ===== Storage Keys =====

/// Storage key holding the current session
pub const SESSION_KEY: &str = "session";
/// Storage key holding the registered-user table
pub const REGISTERED_USERS_KEY: &str = "registered_users";
/// Storage key holding the complaint list
pub const COMPLAINTS_KEY: &str = "complaints";

// ===== Authentication =====

/// Prefix for session tokens. Tokens are display-only strings and carry
/// no cryptographic meaning.
pub const TOKEN_PREFIX: &str = "MOCK_JWT";

/// Artificial latency applied to login and signup, in milliseconds
pub const LOGIN_LATENCY_MS: u64 = 500;

// ===== Complaint Identifiers =====

/// Prefix for complaint ids (e.g., "CMP-001")
pub const COMPLAINT_ID_PREFIX: &str = "CMP";

/// Zero-padding width for complaint id suffixes (CMP-001 through CMP-999;
/// wider ids are produced past 999 rather than wrapping)
pub const COMPLAINT_ID_WIDTH: usize = 3;

// ===== Complaint Field Limits =====

/// Escalation levels never drop below the intake level
pub const MIN_ESCALATION_LEVEL: u32 = 1;

/// SLA progress is a percentage
pub const MAX_SLA_PROGRESS: u8 = 100;

/// Maximum attachments per complaint. Submission forms enforce the same
/// cap client-side.
pub const MAX_ATTACHMENTS: usize = 5;
