//! In-memory content store.

use chrono::Utc;
use parking_lot::Mutex;

use crate::{
    audit::{Action, AuditKind, AuditLog},
    error::{ContentError, Result},
    message::{Message, NewMessage},
    post::{NewPost, Post, PostId, PostUpdate},
    stats::{engagement_rate, ContentStats, RECENT_MESSAGES},
};

/// Ordering of a message listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageOrder {
    /// Order of arrival.
    #[default]
    Inserted,
    /// Most recent first.
    NewestFirst,
}

#[derive(Debug, Default)]
struct Collections {
    posts: Vec<Post>,
    messages: Vec<Message>,
    /// Highest post ID ever assigned.
    last_post_id: u64,
    /// Highest message ID ever assigned.
    last_message_id: u64,
}

/// Thread-safe in-memory store for posts and messages.
///
/// Both collections live behind one mutex, so ID assignment, insertion and
/// counter increments are atomic with respect to each other.
#[derive(Debug, Default)]
pub struct ContentStore {
    inner: Mutex<Collections>,
    audit: AuditLog,
}

impl ContentStore {
    /// Create an empty store with the audit log disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with `posts`. New IDs continue after the highest one.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let last_post_id = posts.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            inner: Mutex::new(Collections {
                posts,
                last_post_id,
                ..Default::default()
            }),
            audit: AuditLog::disabled(),
        }
    }

    /// Create a store preloaded with the sample posts.
    pub fn seeded() -> Self {
        Self::with_posts(Post::samples())
    }

    /// Attach an audit log.
    pub fn with_audit_log(mut self, audit: AuditLog) -> Self {
        self.audit = audit;
        self
    }

    /// The audit log, for recording admin activity outside the store.
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    // ==================== Posts ====================

    /// All posts, newest date first. Posts sharing a date keep insertion order.
    pub fn list_posts(&self) -> Vec<Post> {
        let mut posts = self.list_posts_unsorted();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// All posts in insertion order.
    pub fn list_posts_unsorted(&self) -> Vec<Post> {
        self.inner.lock().posts.clone()
    }

    /// Fetch a post and count the read.
    pub fn get_post(&self, id: PostId) -> Result<Post> {
        let mut inner = self.inner.lock();
        let post = find_post(&mut inner.posts, id)?;
        post.views += 1;
        Ok(post.clone())
    }

    /// Validate and insert a new post dated today.
    pub fn create_post(&self, fields: NewPost) -> Result<Post> {
        let post = {
            let mut inner = self.inner.lock();
            let id = inner.last_post_id + 1;
            let post = fields.into_post(id, Utc::now().date_naive())?;
            inner.last_post_id = id;
            inner.posts.push(post.clone());
            post
        };

        self.audit.record(AuditKind::Blog, &post);
        tracing::info!(id = post.id, title = %post.title, "Post created");
        Ok(post)
    }

    /// Overwrite the supplied fields of a post.
    pub fn update_post(&self, id: PostId, update: PostUpdate) -> Result<Post> {
        update.validate()?;
        let fields = update.fields().join(", ");

        let post = {
            let mut inner = self.inner.lock();
            let post = find_post(&mut inner.posts, id)?;
            update.apply(post);
            post.clone()
        };

        self.audit
            .activity(Action::PostUpdated, format!("post {} updated: {}", id, fields));
        tracing::info!(id, fields = %fields, "Post updated");
        Ok(post)
    }

    /// Remove a post. Its ID is never handed out again.
    pub fn delete_post(&self, id: PostId) -> Result<Post> {
        let post = {
            let mut inner = self.inner.lock();
            let index = inner
                .posts
                .iter()
                .position(|p| p.id == id)
                .ok_or(ContentError::NotFound("Blog"))?;
            inner.posts.remove(index)
        };

        self.audit
            .activity(Action::PostDeleted, format!("post {} deleted: {}", id, post.title));
        tracing::info!(id, title = %post.title, "Post deleted");
        Ok(post)
    }

    /// Add a like and return the new count.
    pub fn like_post(&self, id: PostId) -> Result<u64> {
        let mut inner = self.inner.lock();
        let post = find_post(&mut inner.posts, id)?;
        post.likes += 1;
        Ok(post.likes)
    }

    // ==================== Messages ====================

    /// Validate, sanitize and insert a contact message.
    pub fn create_message(&self, fields: NewMessage) -> Result<Message> {
        let message = {
            let mut inner = self.inner.lock();
            let id = inner.last_message_id + 1;
            let message = fields.into_message(id, Utc::now())?;
            inner.last_message_id = id;
            inner.messages.push(message.clone());
            message
        };

        self.audit.record(AuditKind::Contact, &message);
        tracing::info!(id = message.id, email = %message.email, "Message received");
        Ok(message)
    }

    /// List messages, optionally only the `limit` most recent.
    pub fn list_messages(&self, order: MessageOrder, limit: Option<usize>) -> Vec<Message> {
        let inner = self.inner.lock();
        let skip = limit.map_or(0, |n| inner.messages.len().saturating_sub(n));
        let recent = &inner.messages[skip..];

        match order {
            MessageOrder::Inserted => recent.to_vec(),
            MessageOrder::NewestFirst => recent.iter().rev().cloned().collect(),
        }
    }

    /// Number of stored posts.
    pub fn post_count(&self) -> usize {
        self.inner.lock().posts.len()
    }

    /// Number of stored messages.
    pub fn message_count(&self) -> usize {
        self.inner.lock().messages.len()
    }

    // ==================== Stats ====================

    /// Compute dashboard statistics from a single snapshot.
    pub fn stats(&self) -> ContentStats {
        let inner = self.inner.lock();
        let total_blog_views = inner.posts.iter().map(|p| p.views).sum();
        let total_likes = inner.posts.iter().map(|p| p.likes).sum();
        let blog_count = inner.posts.len();

        ContentStats {
            blog_count,
            message_count: inner.messages.len(),
            total_blog_views,
            total_likes,
            engagement_rate: engagement_rate(total_blog_views, blog_count),
            recent_messages: inner
                .messages
                .iter()
                .rev()
                .take(RECENT_MESSAGES)
                .cloned()
                .collect(),
        }
    }
}

fn find_post(posts: &mut [Post], id: PostId) -> Result<&mut Post> {
    posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(ContentError::NotFound("Blog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn new_post(title: &str) -> NewPost {
        NewPost {
            title: Some(title.into()),
            summary: Some("summary".into()),
            content: Some("content".into()),
            category: Some("category".into()),
            image: None,
        }
    }

    fn new_message(name: &str) -> NewMessage {
        NewMessage {
            name: Some(name.into()),
            email: Some("someone@example.com".into()),
            subject: None,
            message: Some("hello".into()),
        }
    }

    fn dated(id: u64, date: NaiveDate) -> Post {
        Post {
            id,
            title: format!("post {}", id),
            summary: "s".into(),
            content: "c".into(),
            category: "k".into(),
            date,
            image: "default.jpg".into(),
            views: 0,
            likes: 0,
        }
    }

    #[test]
    fn test_seeded_ids_continue() {
        let store = ContentStore::seeded();
        assert_eq!(store.post_count(), 2);

        let post = store.create_post(new_post("Third")).unwrap();
        assert_eq!(post.id, 3);
        assert_eq!(post.date, Utc::now().date_naive());
    }

    #[test]
    fn test_list_posts_sorted_by_date() {
        let store = ContentStore::seeded();
        let posts = store.list_posts();
        assert_eq!(posts[0].title, "Getting Started with React");
        assert_eq!(posts[1].title, "Startup Funding Strategies");

        store.create_post(new_post("Today")).unwrap();
        assert_eq!(store.list_posts()[0].title, "Today");
    }

    #[test]
    fn test_get_post_increments_views() {
        let store = ContentStore::seeded();
        assert_eq!(store.get_post(1).unwrap().views, 1251);
        assert_eq!(store.get_post(1).unwrap().views, 1252);
        assert!(matches!(store.get_post(99), Err(ContentError::NotFound(_))));
    }

    #[test]
    fn test_not_found_message() {
        let err = ContentStore::new().get_post(1).unwrap_err();
        assert_eq!(err.to_string(), "Blog not found");
    }

    #[test]
    fn test_failed_create_does_not_consume_id() {
        let store = ContentStore::new();
        assert!(store.create_post(NewPost::default()).is_err());
        assert_eq!(store.post_count(), 0);
        assert_eq!(store.create_post(new_post("First")).unwrap().id, 1);
    }

    #[test]
    fn test_update_post() {
        let store = ContentStore::seeded();
        let update = PostUpdate {
            category: Some("Frontend".into()),
            ..Default::default()
        };

        let post = store.update_post(1, update).unwrap();
        assert_eq!(post.category, "Frontend");
        assert_eq!(post.views, 1250);

        assert!(store.update_post(42, PostUpdate::default()).is_err());
        let blank = PostUpdate {
            title: Some(" ".into()),
            ..Default::default()
        };
        assert!(matches!(store.update_post(1, blank), Err(ContentError::Validation(_))));
    }

    #[test]
    fn test_delete_and_like() {
        let store = ContentStore::seeded();
        assert_eq!(store.like_post(2).unwrap(), 32);

        store.delete_post(2).unwrap();
        assert!(store.like_post(2).is_err());
        assert!(store.delete_post(2).is_err());
        assert_eq!(store.post_count(), 1);
    }

    #[test]
    fn test_list_messages_order_and_limit() {
        let store = ContentStore::new();
        for name in ["a", "b", "c", "d"] {
            store.create_message(new_message(name)).unwrap();
        }

        let names = |msgs: Vec<Message>| msgs.into_iter().map(|m| m.name).collect::<Vec<_>>();

        assert_eq!(names(store.list_messages(MessageOrder::Inserted, None)), ["a", "b", "c", "d"]);
        assert_eq!(names(store.list_messages(MessageOrder::NewestFirst, None)), ["d", "c", "b", "a"]);
        assert_eq!(names(store.list_messages(MessageOrder::NewestFirst, Some(3))), ["d", "c", "b"]);
        assert_eq!(names(store.list_messages(MessageOrder::Inserted, Some(2))), ["c", "d"]);
        assert_eq!(store.list_messages(MessageOrder::Inserted, Some(10)).len(), 4);
    }

    #[test]
    fn test_invalid_message_not_stored() {
        let store = ContentStore::new();
        let mut bad = new_message("x");
        bad.email = Some("nope".into());

        assert!(store.create_message(bad).is_err());
        assert_eq!(store.message_count(), 0);
    }

    #[test]
    fn test_stats() {
        let store = ContentStore::seeded();
        for name in ["a", "b", "c", "d"] {
            store.create_message(new_message(name)).unwrap();
        }

        let stats = store.stats();
        assert_eq!(stats.blog_count, 2);
        assert_eq!(stats.message_count, 4);
        assert_eq!(stats.total_blog_views, 2140);
        assert_eq!(stats.total_likes, 73);
        assert_eq!(stats.engagement_rate, 100.0);
        assert_eq!(stats.recent_messages.len(), 3);
        assert_eq!(stats.recent_messages[0].name, "d");

        let empty = ContentStore::new().stats();
        assert_eq!(empty.engagement_rate, 0.0);
        assert!(empty.recent_messages.is_empty());
    }

    #[test]
    fn test_audit_log_records_creations() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ContentStore::new().with_audit_log(AuditLog::new(tmp.path()));

        store.create_post(new_post("Logged")).unwrap();
        store.create_message(new_message("m")).unwrap();
        store.delete_post(1).unwrap();

        let blog = std::fs::read_to_string(tmp.path().join("blog_log.json")).unwrap();
        assert!(blog.contains("\"title\":\"Logged\""));
        let contact = std::fs::read_to_string(tmp.path().join("contact_log.json")).unwrap();
        assert_eq!(contact.lines().count(), 1);
        let activity = std::fs::read_to_string(tmp.path().join("activity.log")).unwrap();
        assert!(activity.contains("post_deleted"));
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let store = std::sync::Arc::new(ContentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|j| store.create_post(new_post(&format!("{}-{}", i, j))).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert_eq!(ids.last(), Some(&200));
    }

    proptest! {
        #[test]
        fn prop_list_posts_date_desc_stable(days in proptest::collection::vec(0u32..30, 0..20)) {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let posts: Vec<Post> = days
                .iter()
                .enumerate()
                .map(|(i, d)| dated(i as u64 + 1, base + chrono::Days::new(*d as u64)))
                .collect();
            let store = ContentStore::with_posts(posts);

            let listed = store.list_posts();
            prop_assert_eq!(listed.len(), days.len());
            for pair in listed.windows(2) {
                prop_assert!(pair[0].date >= pair[1].date);
                if pair[0].date == pair[1].date {
                    prop_assert!(pair[0].id < pair[1].id);
                }
            }
        }

        #[test]
        fn prop_get_post_counts_every_read(reads in 1usize..50) {
            let store = ContentStore::seeded();
            for _ in 0..reads {
                store.get_post(2).unwrap();
            }
            prop_assert_eq!(store.list_posts_unsorted()[1].views, 890 + reads as u64);
            prop_assert_eq!(store.list_posts_unsorted()[0].views, 1250);
        }

        #[test]
        fn prop_ids_never_reused(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
            let store = ContentStore::new();
            let mut highest = 0;
            for create in ops {
                if create {
                    let id = store.create_post(new_post("p")).unwrap().id;
                    prop_assert_eq!(id, highest + 1);
                    highest = id;
                } else if let Some(last) = store.list_posts_unsorted().last() {
                    store.delete_post(last.id).unwrap();
                }
            }
        }
    }
}
