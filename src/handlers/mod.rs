//! HTTP request handlers
//!
//! Handlers validate input, construct the domain service for the request,
//! and shape the response envelope. Success payloads echo the domain object
//! under a named key; list payloads carry a pagination block.

pub mod auth;
pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

use serde::Deserialize;

const MAX_PAGE_SIZE: i64 = 100;

/// Offset-based pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

pub(crate) fn default_limit() -> i64 {
    20
}

/// Clamp raw query values to sane bounds before they reach a query.
pub(crate) fn clamp_page(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_PAGE_SIZE), offset.max(0))
}

impl PaginationParams {
    pub fn clamped(&self) -> (i64, i64) {
        clamp_page(self.limit, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.clamped(), (20, 0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = PaginationParams {
            limit: 10_000,
            offset: -5,
        };
        assert_eq!(params.clamped(), (100, 0));

        let params = PaginationParams {
            limit: 0,
            offset: 3,
        };
        assert_eq!(params.clamped(), (1, 3));
    }
}
