//! Post publication state.
//!
//! `published_at` is set exactly when `published` is true. Entering the
//! published state forces the post into the month bucket of its publish
//! instant; leaving it clears the instant and keeps the category.

use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{entities::PostRecord, patch::Field};

/// What a requested `published` value does to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishTransition {
    Publish,
    Unpublish,
    Keep,
}

impl PublishTransition {
    pub fn between(currently_published: bool, requested: Option<bool>) -> Self {
        match (currently_published, requested) {
            (false, Some(true)) => PublishTransition::Publish,
            (true, Some(false)) => PublishTransition::Unpublish,
            _ => PublishTransition::Keep,
        }
    }
}

impl PostRecord {
    pub fn publish_state_consistent(&self) -> bool {
        self.published == self.published_at.is_some()
    }

    pub fn mark_published(&mut self, at: OffsetDateTime, bucket: Uuid) {
        self.published = true;
        self.published_at = Some(at);
        self.category_id = Some(bucket);
    }

    pub fn mark_draft(&mut self) {
        self.published = false;
        self.published_at = None;
    }
}

/// Body of a post creation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub published: bool,
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Field<String>,
    pub slug: Field<Option<String>>,
    pub content: Field<Option<String>>,
    pub excerpt: Field<Option<String>>,
    pub featured_image: Field<Option<String>>,
    pub published: Field<bool>,
    pub category_id: Field<Option<String>>,
}

/// A category reference as sent by editors: a blank or `null` id clears the
/// category.
pub fn requested_category(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostRecord {
        let now = OffsetDateTime::now_utc();
        PostRecord {
            id: Uuid::new_v4(),
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: None,
            excerpt: None,
            featured_image: None,
            published: false,
            published_at: None,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn only_a_change_of_state_is_a_transition() {
        assert_eq!(
            PublishTransition::between(false, Some(true)),
            PublishTransition::Publish
        );
        assert_eq!(
            PublishTransition::between(true, Some(false)),
            PublishTransition::Unpublish
        );
        assert_eq!(
            PublishTransition::between(true, Some(true)),
            PublishTransition::Keep
        );
        assert_eq!(
            PublishTransition::between(false, None),
            PublishTransition::Keep
        );
    }

    #[test]
    fn publishing_sets_instant_and_bucket() {
        let mut post = draft();
        let bucket = Uuid::new_v4();
        let at = OffsetDateTime::now_utc();

        post.mark_published(at, bucket);

        assert!(post.publish_state_consistent());
        assert_eq!(post.published_at, Some(at));
        assert_eq!(post.category_id, Some(bucket));
    }

    #[test]
    fn unpublishing_clears_instant_but_keeps_category() {
        let mut post = draft();
        let bucket = Uuid::new_v4();
        post.mark_published(OffsetDateTime::now_utc(), bucket);

        post.mark_draft();

        assert!(post.publish_state_consistent());
        assert_eq!(post.published_at, None);
        assert_eq!(post.category_id, Some(bucket));
    }

    #[test]
    fn blank_category_reference_clears() {
        assert_eq!(requested_category(Some("  ")), None);
        assert_eq!(requested_category(None), None);
        assert_eq!(requested_category(Some(" abc ")), Some("abc"));
    }
}
