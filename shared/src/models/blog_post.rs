//! Blog Post Model

use serde::{Deserialize, Serialize};

use crate::resource::{Draft, FormMode, Resource, Searchable};
use crate::types::EntityId;
use crate::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, Validator, Violation};

use super::BadgeTone;
use super::subscription::split_list;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn badge(self) -> BadgeTone {
        match self {
            Self::Draft => BadgeTone::Neutral,
            Self::Published => BadgeTone::Success,
            Self::Archived => BadgeTone::Warning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
            Self::Archived => "Archived",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown post status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub status: PostStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl BlogPost {
    /// Status + timestamp patch applied when publishing
    pub fn published(mut self, at: String) -> Self {
        self.status = PostStatus::Published;
        self.published_at = Some(at);
        self
    }
}

impl Searchable for BlogPost {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(author) = &self.author {
            fields.push(author);
        }
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Resource for BlogPost {
    const PATH: &'static str = "blog";
    const NAME: &'static str = "Blog post";

    type Draft = BlogPostDraft;

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Blog post form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub status: PostStatus,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl BlogPostDraft {
    /// Set tags from the comma-separated form input
    pub fn set_tags_from_input(&mut self, input: &str) {
        self.tags = split_list(input);
    }
}

impl Draft for BlogPostDraft {
    type Entity = BlogPost;

    fn from_entity(post: &BlogPost) -> Self {
        Self {
            id: Some(post.id.clone()),
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            status: post.status,
            tags: post.tags.clone(),
            published_at: post.published_at.clone(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Vec<Violation> {
        Validator::new()
            .required_text("title", &self.title, MAX_NAME_LEN)
            .check(!self.content.trim().is_empty(), "content", "content is required")
            .optional_text("excerpt", self.excerpt.as_deref(), MAX_ADDRESS_LEN)
            .finish()
    }
}
