//! Presence-tracking patch fields.
//!
//! A patch body distinguishes "key omitted" from "key present with a value",
//! including `null`. Merging only ever touches present fields.

use serde::{Deserialize, Deserializer};

use super::sections::{SectionElement, SectionError, encode_section, reconcile};

/// A patch field. Deserialize containers with `#[serde(default)]` so that an
/// omitted key becomes [`Field::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Present(T),
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Field::Present(_))
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }

    pub fn into_present(self) -> Option<T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent => None,
        }
    }

    /// Replaces `current` when the field is present.
    pub fn merge_into(self, current: &mut T) {
        if let Field::Present(value) = self {
            *current = value;
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Field::Present(value)
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Field::Present)
    }
}

/// Writes a present section patch into its stored column. Fixed-slot
/// sections are reconciled to `slots` before encoding; `null` clears the
/// column.
pub fn merge_section<T: SectionElement>(
    patch: Field<Option<Vec<T>>>,
    slots: Option<usize>,
    column: &mut Option<String>,
) -> Result<(), SectionError> {
    let Field::Present(items) = patch else {
        return Ok(());
    };

    let items = match slots {
        Some(slots) => items.map(|items| reconcile(items, slots)),
        None => items,
    };
    *column = encode_section(items.as_deref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sections::Card;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Probe {
        name: Field<Option<String>>,
        cards: Field<Option<Vec<Card>>>,
    }

    #[test]
    fn omitted_null_and_value_are_distinct() {
        let omitted: Probe = serde_json::from_str("{}").expect("parse");
        assert_eq!(omitted.name, Field::Absent);

        let null: Probe = serde_json::from_str(r#"{"name": null}"#).expect("parse");
        assert_eq!(null.name, Field::Present(None));

        let value: Probe = serde_json::from_str(r#"{"name": ""}"#).expect("parse");
        assert_eq!(value.name, Field::Present(Some(String::new())));
    }

    #[test]
    fn empty_list_is_present() {
        let probe: Probe = serde_json::from_str(r#"{"cards": []}"#).expect("parse");
        assert_eq!(probe.cards, Field::Present(Some(Vec::new())));
    }

    #[test]
    fn absent_field_leaves_value_untouched() {
        let mut current = Some("kept".to_string());
        Field::Absent.merge_into(&mut current);
        assert_eq!(current.as_deref(), Some("kept"));

        Field::Present(None).merge_into(&mut current);
        assert_eq!(current, None);
    }

    #[test]
    fn absent_section_keeps_corrupt_text() {
        let mut column = Some("{broken".to_string());
        merge_section::<Card>(Field::Absent, None, &mut column).expect("merge");
        assert_eq!(column.as_deref(), Some("{broken"));
    }

    #[test]
    fn present_section_is_reconciled_before_encoding() {
        let mut column = None;
        let patch = Field::Present(Some(vec![Card {
            title: "only".to_string(),
            ..Card::default()
        }]));
        merge_section(patch, Some(2), &mut column).expect("merge");

        assert_eq!(
            column.as_deref(),
            Some(
                r#"[{"cardIcon":"","cardTitle":"only","cardContent":""},{"cardIcon":"","cardTitle":"","cardContent":""}]"#
            )
        );
    }

    #[test]
    fn null_section_clears_column() {
        let mut column = Some("[]".to_string());
        merge_section::<Card>(Field::Present(None), Some(3), &mut column).expect("merge");
        assert_eq!(column, None);
    }
}
