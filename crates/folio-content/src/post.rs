//! Blog post types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::{require_field, validate_optional_field};
use crate::Result;

/// Unique identifier for a post.
pub type PostId = u64;

/// Image used when a post is created without one.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Sequential post ID, never reused.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// One-line summary shown in listings.
    pub summary: String,
    /// Full post body.
    pub content: String,
    /// Category label.
    pub category: String,
    /// Day the post was created.
    pub date: NaiveDate,
    /// Image path or filename.
    pub image: String,
    /// Number of times the post was read.
    pub views: u64,
    /// Number of likes.
    pub likes: u64,
}

impl Post {
    /// The two sample posts the service ships with.
    pub fn samples() -> Vec<Post> {
        vec![
            Post {
                id: 1,
                title: "Getting Started with React".into(),
                summary: "Learn the fundamentals of React development".into(),
                content: "React is a powerful JavaScript library for building user interfaces. \
                          In this article, we'll cover the basics of React components, state \
                          management, and hooks..."
                    .into(),
                category: "Web Development".into(),
                date: NaiveDate::from_ymd_opt(2023, 7, 15).unwrap_or_default(),
                image: "react.jpg".into(),
                views: 1250,
                likes: 42,
            },
            Post {
                id: 2,
                title: "Startup Funding Strategies".into(),
                summary: "How to secure funding for your tech startup".into(),
                content: "Securing funding is crucial for startup growth. We'll explore \
                          different funding options including bootstrapping, angel investors, \
                          venture capital, and crowdfunding..."
                    .into(),
                category: "Startups".into(),
                date: NaiveDate::from_ymd_opt(2023, 7, 10).unwrap_or_default(),
                image: "funding.jpg".into(),
                views: 890,
                likes: 31,
            },
        ]
    }
}

/// Fields submitted to create a post.
///
/// Every field is optional at the type level so that a missing field is
/// reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl NewPost {
    /// Validate the submission and build the stored post.
    pub fn into_post(self, id: PostId, date: NaiveDate) -> Result<Post> {
        let title = require_field("title", self.title.as_deref())?.to_string();
        let summary = require_field("summary", self.summary.as_deref())?.to_string();
        let content = require_field("content", self.content.as_deref())?.to_string();
        let category = require_field("category", self.category.as_deref())?.to_string();

        Ok(Post {
            id,
            title,
            summary,
            content,
            category,
            date,
            image: self.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            views: 0,
            likes: 0,
        })
    }
}

/// Partial update of a post's editable fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl PostUpdate {
    /// Reject supplied fields that are blank.
    pub fn validate(&self) -> Result<()> {
        validate_optional_field("title", self.title.as_deref())?;
        validate_optional_field("summary", self.summary.as_deref())?;
        validate_optional_field("content", self.content.as_deref())?;
        validate_optional_field("category", self.category.as_deref())?;
        Ok(())
    }

    /// Overwrite the supplied fields. ID, date and counters are untouched.
    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(summary) = self.summary {
            post.summary = summary;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(category) = self.category {
            post.category = category;
        }
        if let Some(image) = self.image {
            post.image = image;
        }
    }

    /// Names of the fields this update touches.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("summary", self.summary.is_some()),
            ("content", self.content.is_some()),
            ("category", self.category.is_some()),
            ("image", self.image.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}
