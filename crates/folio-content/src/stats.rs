//! Dashboard statistics.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Number of messages included in [`ContentStats::recent_messages`].
pub const RECENT_MESSAGES: usize = 3;

/// Aggregate counters shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    pub blog_count: usize,
    pub message_count: usize,
    pub total_blog_views: u64,
    pub total_likes: u64,
    /// Percentage of an expected 100 views per post, capped at 100.
    pub engagement_rate: f64,
    /// Newest messages first.
    pub recent_messages: Vec<Message>,
}

/// Views per post relative to a baseline of 100, as a percentage.
///
/// Capped at 100, rounded to two decimals, and 0 when there are no posts.
pub fn engagement_rate(total_views: u64, blog_count: usize) -> f64 {
    if blog_count == 0 {
        return 0.0;
    }
    let rate = total_views as f64 / (blog_count as f64 * 100.0) * 100.0;
    (rate.min(100.0) * 100.0).round() / 100.0
}
