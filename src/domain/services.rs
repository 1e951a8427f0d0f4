//! Service pages: one document per offered service.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    documents::ContentDocument,
    entities::ServiceRecord,
    error::MergeError,
    patch::{Field, merge_section},
    sections::{
        CardContent, ServiceItem, WhyChoosePoint, decode_or_empty, encode_section,
    },
    types::DocumentKind,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDocument {
    pub id: Uuid,
    pub page_title: String,
    pub page_subtitle: Option<String>,
    pub list_image: Option<String>,
    pub summary: Option<String>,
    pub main_content: String,
    pub background_image: Option<String>,
    pub card_contents: Vec<CardContent>,
    pub services_title: Option<String>,
    pub services_list: Vec<ServiceItem>,
    pub why_choose_title: Option<String>,
    pub why_choose_points: Vec<WhyChoosePoint>,
    pub footer_title: Option<String>,
    pub footer_content: Option<String>,
    pub slug: String,
    pub active: bool,
    pub order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServicePatch {
    pub page_title: Field<String>,
    pub page_subtitle: Field<Option<String>>,
    pub list_image: Field<Option<String>>,
    pub summary: Field<Option<String>>,
    pub main_content: Field<String>,
    pub background_image: Field<Option<String>>,
    pub card_contents: Field<Option<Vec<CardContent>>>,
    pub services_title: Field<Option<String>>,
    pub services_list: Field<Option<Vec<ServiceItem>>>,
    pub why_choose_title: Field<Option<String>>,
    pub why_choose_points: Field<Option<Vec<WhyChoosePoint>>>,
    pub footer_title: Field<Option<String>>,
    pub footer_content: Field<Option<String>>,
    pub slug: Field<String>,
    pub active: Field<bool>,
    pub order: Field<i32>,
}

/// Body of a service creation request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewService {
    pub page_title: String,
    pub page_subtitle: Option<String>,
    pub list_image: Option<String>,
    pub summary: Option<String>,
    pub main_content: String,
    pub background_image: Option<String>,
    pub card_contents: Option<Vec<CardContent>>,
    pub services_title: Option<String>,
    pub services_list: Option<Vec<ServiceItem>>,
    pub why_choose_title: Option<String>,
    pub why_choose_points: Option<Vec<WhyChoosePoint>>,
    pub footer_title: Option<String>,
    pub footer_content: Option<String>,
    pub slug: Option<String>,
    pub active: Option<bool>,
    pub order: Option<i32>,
}

impl NewService {
    /// The caller-supplied slug, if it is not blank.
    pub fn requested_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    pub fn into_record(
        self,
        id: Uuid,
        slug: String,
        now: OffsetDateTime,
    ) -> Result<ServiceRecord, MergeError> {
        require("pageTitle", &self.page_title)?;
        require("mainContent", &self.main_content)?;

        Ok(ServiceRecord {
            id,
            page_title: self.page_title,
            page_subtitle: self.page_subtitle,
            list_image: self.list_image,
            summary: self.summary,
            main_content: self.main_content,
            background_image: self.background_image,
            card_contents: encode_section(self.card_contents.as_deref())?,
            services_title: self.services_title,
            services_list: encode_section(self.services_list.as_deref())?,
            why_choose_title: self.why_choose_title,
            why_choose_points: encode_section(self.why_choose_points.as_deref())?,
            footer_title: self.footer_title,
            footer_content: self.footer_content,
            slug,
            active: self.active.unwrap_or(true),
            sort_order: self.order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        })
    }
}

fn require(field: &'static str, value: &str) -> Result<(), MergeError> {
    if value.trim().is_empty() {
        return Err(MergeError::ConstraintViolation(field));
    }
    Ok(())
}

impl ContentDocument for ServiceRecord {
    type Patch = ServicePatch;
    type View = ServiceDocument;

    const KIND: DocumentKind = DocumentKind::Service;

    fn id(&self) -> Uuid {
        self.id
    }

    fn initial(_id: Uuid, _now: OffsetDateTime) -> Option<Self> {
        None
    }

    fn merge(mut self, patch: ServicePatch) -> Result<Self, MergeError> {
        let ServicePatch {
            page_title,
            page_subtitle,
            list_image,
            summary,
            main_content,
            background_image,
            card_contents,
            services_title,
            services_list,
            why_choose_title,
            why_choose_points,
            footer_title,
            footer_content,
            slug,
            active,
            order,
        } = patch;

        if let Some(title) = page_title.as_present() {
            require("pageTitle", title)?;
        }
        if let Some(content) = main_content.as_present() {
            require("mainContent", content)?;
        }
        if let Some(slug) = slug.as_present() {
            require("slug", slug)?;
        }

        page_title.merge_into(&mut self.page_title);
        page_subtitle.merge_into(&mut self.page_subtitle);
        list_image.merge_into(&mut self.list_image);
        summary.merge_into(&mut self.summary);
        main_content.merge_into(&mut self.main_content);
        background_image.merge_into(&mut self.background_image);
        services_title.merge_into(&mut self.services_title);
        why_choose_title.merge_into(&mut self.why_choose_title);
        footer_title.merge_into(&mut self.footer_title);
        footer_content.merge_into(&mut self.footer_content);
        slug.merge_into(&mut self.slug);
        active.merge_into(&mut self.active);
        order.merge_into(&mut self.sort_order);

        merge_section(card_contents, None, &mut self.card_contents)?;
        merge_section(services_list, None, &mut self.services_list)?;
        merge_section(why_choose_points, None, &mut self.why_choose_points)?;

        Ok(self)
    }

    fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }

    fn view(&self) -> ServiceDocument {
        ServiceDocument {
            id: self.id,
            page_title: self.page_title.clone(),
            page_subtitle: self.page_subtitle.clone(),
            list_image: self.list_image.clone(),
            summary: self.summary.clone(),
            main_content: self.main_content.clone(),
            background_image: self.background_image.clone(),
            card_contents: decode_or_empty("cardContents", self.card_contents.as_deref()),
            services_title: self.services_title.clone(),
            services_list: decode_or_empty("servicesList", self.services_list.as_deref()),
            why_choose_title: self.why_choose_title.clone(),
            why_choose_points: decode_or_empty(
                "whyChoosePoints",
                self.why_choose_points.as_deref(),
            ),
            footer_title: self.footer_title.clone(),
            footer_content: self.footer_content.clone(),
            slug: self.slug.clone(),
            active: self.active,
            order: self.sort_order,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_service(json: &str) -> NewService {
        serde_json::from_str(json).expect("valid body")
    }

    fn record() -> ServiceRecord {
        new_service(
            r#"{"pageTitle": "Market Entry", "mainContent": "We help.", "servicesList": [{"title": "Research", "points": ["a", "b"]}]}"#,
        )
        .into_record(Uuid::new_v4(), "market-entry".to_string(), OffsetDateTime::now_utc())
        .expect("record")
    }

    #[test]
    fn new_service_defaults_to_active_and_first() {
        let record = record();
        assert!(record.active);
        assert_eq!(record.sort_order, 0);
        assert_eq!(record.card_contents, None);
        assert_eq!(record.view().services_list[0].points, vec!["a", "b"]);
    }

    #[test]
    fn new_service_requires_title_and_content() {
        let err = new_service(r#"{"mainContent": "x"}"#)
            .into_record(Uuid::new_v4(), "x".to_string(), OffsetDateTime::now_utc())
            .expect_err("missing title");
        assert!(matches!(err, MergeError::ConstraintViolation("pageTitle")));

        let err = new_service(r#"{"pageTitle": "x", "mainContent": "  "}"#)
            .into_record(Uuid::new_v4(), "x".to_string(), OffsetDateTime::now_utc())
            .expect_err("blank content");
        assert!(matches!(err, MergeError::ConstraintViolation("mainContent")));
    }

    #[test]
    fn blank_requested_slug_is_ignored() {
        assert_eq!(new_service(r#"{"slug": "  "}"#).requested_slug(), None);
        assert_eq!(new_service(r#"{"slug": "tax"}"#).requested_slug(), Some("tax"));
    }

    #[test]
    fn order_and_active_patch_through_their_json_names() {
        let patch: ServicePatch =
            serde_json::from_str(r#"{"order": 4, "active": false}"#).expect("patch");
        let merged = record().merge(patch).expect("merge");

        assert_eq!(merged.sort_order, 4);
        assert!(!merged.active);
        assert_eq!(merged.view().order, 4);
    }

    #[test]
    fn blank_title_patch_is_rejected() {
        let patch: ServicePatch = serde_json::from_str(r#"{"pageTitle": ""}"#).expect("patch");
        let err = record().merge(patch).expect_err("blank title");
        assert!(matches!(err, MergeError::ConstraintViolation("pageTitle")));
    }

    #[test]
    fn empty_patch_is_identity() {
        let current = record();
        assert_eq!(
            current.clone().merge(ServicePatch::default()).expect("merge"),
            current
        );
    }
}
