//! Business logic layer
//!
//! One service per domain model. Services enforce the invariant checks
//! (existence, uniqueness, ownership predicates, business rules) and map
//! repository results into the application error taxonomy; the HTTP layer
//! above only shapes requests and responses.

pub mod comments;
pub mod follows;
pub mod likes;
pub mod posts;
pub mod users;

pub use comments::CommentService;
pub use follows::FollowService;
pub use likes::LikeService;
pub use posts::PostService;
pub use users::UserService;
