//! Database access layer
//!
//! Plain async functions over `&PgPool`, one module per table. Repositories
//! return raw `sqlx` results; business rules and error mapping live in the
//! service layer. All reads go through the `active_*` views so the
//! soft-delete predicate is never repeated ad hoc.

pub mod comment_repo;
pub mod follow_repo;
pub mod like_repo;
pub mod post_repo;
pub mod user_repo;
