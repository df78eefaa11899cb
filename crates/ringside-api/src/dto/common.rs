//! Common DTO types

/// Value of the `status` field on every successful response
pub const STATUS_SUCCESS: &str = "success";

pub(crate) fn success() -> String {
    STATUS_SUCCESS.to_string()
}
