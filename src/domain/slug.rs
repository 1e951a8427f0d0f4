//! URL slugs for services, posts and categories.
//!
//! `derive_slug` is pure. `unique_slug` walks `base`, `base-2`, `base-3`, …
//! and asks the caller whether each candidate is free, so storage lookups
//! stay outside the domain layer.

use std::future::Future;

use slug::slugify;
use thiserror::Error;

/// Suffixes tried after the bare base slug.
const MAX_SUFFIX: usize = 33;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("`{input}` contains nothing a slug can be built from")]
    Unrepresentable { input: String },
    #[error("no free slug found for `{base}`")]
    Exhausted { base: String },
}

#[derive(Debug, Error)]
pub enum UniqueSlugError<E>
where
    E: std::error::Error + 'static,
{
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error("slug lookup failed: {0}")]
    Lookup(#[source] E),
}

pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    match slugify(input) {
        slug if slug.is_empty() => Err(SlugError::Unrepresentable {
            input: input.to_string(),
        }),
        slug => Ok(slug),
    }
}

fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((2..=MAX_SUFFIX).map(move |suffix| format!("{base}-{suffix}")))
}

/// First candidate derived from `input` for which `is_free` answers `true`.
pub async fn unique_slug<F, Fut, E>(input: &str, mut is_free: F) -> Result<String, UniqueSlugError<E>>
where
    F: FnMut(&str) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: std::error::Error + 'static,
{
    let base = derive_slug(input)?;

    for candidate in candidates(&base) {
        if is_free(&candidate).await.map_err(UniqueSlugError::Lookup)? {
            return Ok(candidate);
        }
    }

    Err(SlugError::Exhausted { base }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn slugs_are_lowercase_and_hyphenated() {
        assert_eq!(
            derive_slug("Market Entry Support").expect("slug"),
            "market-entry-support"
        );
        assert_eq!(derive_slug("  Tax & Accounting ").expect("slug"), "tax-accounting");
    }

    #[test]
    fn blank_and_symbol_only_input_is_rejected() {
        assert_eq!(derive_slug("   "), Err(SlugError::EmptyInput));
        assert!(matches!(
            derive_slug("!!!"),
            Err(SlugError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn candidates_start_with_the_base() {
        let first: Vec<String> = candidates("launch").take(3).collect();
        assert_eq!(first, ["launch", "launch-2", "launch-3"]);
        assert_eq!(candidates("x").count(), MAX_SUFFIX);
    }

    #[tokio::test]
    async fn taken_slugs_get_the_next_suffix() {
        let taken = ["launch", "launch-2"];
        let slug = unique_slug("Launch", |candidate| {
            let free = !taken.iter().any(|slug| *slug == candidate);
            async move { Ok::<_, Infallible>(free) }
        })
        .await
        .expect("slug");

        assert_eq!(slug, "launch-3");
    }

    #[tokio::test]
    async fn search_is_bounded() {
        let result = unique_slug("Busy", |_| async { Ok::<_, Infallible>(false) }).await;

        assert!(matches!(
            result,
            Err(UniqueSlugError::Slug(SlugError::Exhausted { .. }))
        ));
    }
}
