//! Year-month bucket categories assigned to posts when they are published.

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

pub const MONTH_KEY_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]");
pub const MONTH_LABEL_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [year]");

/// The category a post published at a given instant belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl MonthBucket {
    /// Buckets by the instant's UTC calendar month.
    pub fn from_instant(instant: OffsetDateTime) -> Result<Self, time::error::Format> {
        let date = instant.to_offset(UtcOffset::UTC).date();
        let name = date.format(MONTH_KEY_FORMAT)?;
        let description = date.format(MONTH_LABEL_FORMAT)?;

        Ok(Self {
            slug: name.to_lowercase(),
            name,
            description,
        })
    }
}
