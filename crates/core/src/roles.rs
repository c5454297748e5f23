//! Well-known role name constants.
//!
//! These must match the role CHECK constraint in
//! `20260301000001_create_users_table.sql`.
//! Every user holds exactly one role; there is no permission-set model.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PROGRAM_HEAD: &str = "program_head";
pub const ROLE_REGISTRAR: &str = "registrar";
pub const ROLE_CASHIER: &str = "cashier";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_STUDENT: &str = "student";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_PROGRAM_HEAD,
    ROLE_REGISTRAR,
    ROLE_CASHIER,
    ROLE_INSTRUCTOR,
    ROLE_STUDENT,
];

/// Validate that a role string is one of the accepted role names.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
