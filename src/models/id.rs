//! Opaque prefixed identifier generation.
//!
//! Every entity gets a server-generated id of the form `AST-1b9f04e2`:
//! a fixed type prefix plus the first 8 hex chars of a v4 UUID.

use uuid::Uuid;

pub const ASSET_PREFIX: &str = "AST";
pub const EMPLOYEE_PREFIX: &str = "EMP";
pub const ASSIGNMENT_PREFIX: &str = "ASG";
pub const MAINTENANCE_PREFIX: &str = "MNT";
pub const REQUEST_PREFIX: &str = "REQ";
pub const CATEGORY_PREFIX: &str = "CAT";
pub const DOCUMENT_PREFIX: &str = "DOC";

/// Generate a new prefixed identifier
pub fn new_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &uuid[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_format() {
        let id = new_id(ASSET_PREFIX);
        assert!(id.starts_with("AST-"));
        assert_eq!(id.len(), 12);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = new_id(ASSIGNMENT_PREFIX);
        let b = new_id(ASSIGNMENT_PREFIX);
        assert_ne!(a, b);
    }
}
