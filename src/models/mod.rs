use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Full user row. Only ever serialized through a public projection; the
/// credential hash never leaves the persistence layer boundary.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a user, returned by identity lookups.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Abbreviated user fields attached to lists (likers, followers, search).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

/// Public projection plus live graph/content counts.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: PublicUser,
    pub follower_count: i64,
    pub following_count: i64,
    pub post_count: i64,
}

/// A user on a follow listing, with the edge timestamp.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FollowedUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub followed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Follow {
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowCounts {
    pub follower_count: i64,
    pub following_count: i64,
}

/// Both directed edges between two users plus their conjunction.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MutualCheck {
    pub user1_follows_user2: bool,
    pub user2_follows_user1: bool,
    pub mutual: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub comments_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post joined with author public fields and live engagement counts.
/// `liked_by_viewer` is computed against the requesting viewer (false for
/// anonymous reads).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub comments_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
}

/// A liked post on a user's like listing, ordered by when it was liked.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LikedPost {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub post: PostDetail,
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A liker on a post's like listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Liker {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub liked_at: DateTime<Utc>,
}

/// A like received on one of a user's posts, with the liker attached.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReceivedLike {
    pub post_id: Uuid,
    pub post_content: String,
    pub liker_id: Uuid,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
    pub liked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with author public fields.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub username: String,
    pub name: String,
    pub profile_picture: Option<String>,
}

/// Offset-based pagination block attached to list responses.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(limit: i64, offset: i64, total_count: i64) -> Self {
        Self {
            limit,
            offset,
            total_count,
            has_next: offset + limit < total_count,
            has_prev: offset > 0,
        }
    }
}

/// Page-addressed pagination block used by the comment listing.
#[derive(Debug, Clone, Serialize)]
pub struct PagePagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_comments: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PagePagination {
    pub fn new(page: i64, limit: i64, total_count: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_count + limit - 1) / limit
        } else {
            0
        };
        Self {
            current_page: page,
            total_pages,
            total_comments: total_count,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Optional-field update for a user profile. Absent fields are kept as-is;
/// an all-absent patch is rejected before any store round trip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.profile_picture.is_none()
    }
}

/// Optional-field update for a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub comments_enabled: Option<bool>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.media_url.is_none() && self.comments_enabled.is_none()
    }
}

/// Time window for the most-liked listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    Week,
    Month,
    All,
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::All
    }
}

impl TimeWindow {
    /// Window length in days; None means unbounded.
    pub fn days(self) -> Option<i64> {
        match self {
            TimeWindow::Day => Some(1),
            TimeWindow::Week => Some(7),
            TimeWindow::Month => Some(30),
            TimeWindow::All => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_next_iff_offset_plus_limit_below_total() {
        let p = Pagination::new(10, 0, 25);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(10, 20, 25);
        assert!(!p.has_next);
        assert!(p.has_prev);

        // Boundary: offset + limit == total_count exhausts the rows.
        let p = Pagination::new(10, 15, 25);
        assert!(!p.has_next);
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let p = Pagination::new(20, 0, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }

    #[test]
    fn page_pagination_rounds_total_pages_up() {
        let p = PagePagination::new(1, 20, 45);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = PagePagination::new(3, 20, 45);
        assert!(!p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn patches_report_emptiness() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch {
            name: Some("Alice".into()),
            ..Default::default()
        }
        .is_empty());

        assert!(PostPatch::default().is_empty());
        assert!(!PostPatch {
            comments_enabled: Some(false),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn time_windows_resolve_to_day_spans() {
        assert_eq!(TimeWindow::Day.days(), Some(1));
        assert_eq!(TimeWindow::Week.days(), Some(7));
        assert_eq!(TimeWindow::Month.days(), Some(30));
        assert_eq!(TimeWindow::All.days(), None);
    }
}
