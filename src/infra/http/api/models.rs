use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ActiveQuery {
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListQuery {
    pub published: Option<bool>,
    pub category_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// `card` is the position of the service card being edited.
#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    pub card: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PublishRequest {
    #[serde(with = "time::serde::rfc3339::option")]
    pub at: Option<OffsetDateTime>,
}
