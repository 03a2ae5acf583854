use crate::enums::common::PublicationStatus;
use folio_utils::text::slugify;
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_aux::prelude::*;
use validator::Validate;

/// Page size used when the caller does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound for `pageSize` on every list endpoint.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 1, message = "page must be >= 1"))]
    pub page: Option<u32>,
    #[serde(
        default,
        alias = "limit",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    #[validate(range(min = 1, max = 100, message = "pageSize must be within 1..=100"))]
    pub page_size: Option<u32>,
}

impl PageParams {
    #[inline]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    #[inline]
    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub pages: u32,
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> PageResult<T> {
    pub fn new(records: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        Self {
            pages: total.div_ceil(page_size.max(1) as u64) as u32,
            records,
            total,
            page,
            page_size,
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageResult<U> {
        PageResult {
            pages: self.pages,
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Paginated list plus aggregate counts for the admin list views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWithStats<T, S> {
    #[serde(flatten)]
    pub page: PageResult<T>,
    pub stats: S,
}

/// Counts per [`PublicationStatus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusStats {
    pub total: u64,
    pub draft: u64,
    pub published: u64,
    pub archived: u64,
}

impl StatusStats {
    pub fn record(&mut self, status: PublicationStatus, count: u64) {
        match status {
            PublicationStatus::Draft => self.draft += count,
            PublicationStatus::Published => self.published += count,
            PublicationStatus::Archived => self.archived += count,
        }
        self.total += count;
    }
}

/// Generic payload for the `change-status` endpoint of content modules.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePublicationStatus {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i32,
    pub status: PublicationStatus,
}

/// Normalizes a free-text search term; blank input means "no search".
#[inline]
pub fn search_term(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Uses the explicit slug when given, otherwise derives one from `title`.
pub fn resolve_slug(explicit: Option<&str>, title: &str) -> Result<String, String> {
    let slug = match explicit.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => slugify(s),
        None => slugify(title),
    };
    if slug.is_empty() {
        Err("slug must contain at least one letter or digit".into())
    } else {
        Ok(slug)
    }
}

/// Accepts `true`/`false`, `1`/`0` as JSON booleans, numbers or strings.
///
/// Flattened query structs lose type information, so booleans arrive as strings.
pub fn deserialize_option_bool_from_anything<'de, D>(
    deserializer: D,
) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AnyBool {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Option::<AnyBool>::deserialize(deserializer)? {
        None => Ok(None),
        Some(AnyBool::Bool(b)) => Ok(Some(b)),
        Some(AnyBool::Int(0)) => Ok(Some(false)),
        Some(AnyBool::Int(1)) => Ok(Some(true)),
        Some(AnyBool::Int(other)) => Err(de::Error::custom(format!(
            "invalid boolean value: {other}"
        ))),
        Some(AnyBool::Str(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(de::Error::custom(format!(
                "invalid boolean value: {other}"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "deserialize_option_bool_from_anything")]
        flag: Option<bool>,
    }

    #[test]
    fn page_math_rounds_up() {
        let page = PageResult::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(page.pages, 3);
        let empty = PageResult::<i32>::new(vec![], 0, 1, 10);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn page_params_default_and_clamp() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);

        let params = PageParams {
            page: Some(0),
            page_size: Some(1000),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
        assert!(params.validate().is_err());
    }

    #[test]
    fn bools_from_strings() {
        let parsed: Flags = serde_json::from_str(r#"{"flag":"true"}"#).unwrap();
        assert_eq!(parsed.flag, Some(true));
        let parsed: Flags = serde_json::from_str(r#"{"flag":0}"#).unwrap();
        assert_eq!(parsed.flag, Some(false));
        let parsed: Flags = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(parsed.flag, None);
        assert!(serde_json::from_str::<Flags>(r#"{"flag":"maybe"}"#).is_err());
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(search_term(&Some("   ".into())), None);
        assert_eq!(search_term(&Some(" rust ".into())), Some("rust".into()));
        assert_eq!(search_term(&None), None);
    }

    #[test]
    fn explicit_slug_is_normalized() {
        assert_eq!(resolve_slug(Some("My Slug"), "ignored").unwrap(), "my-slug");
        assert_eq!(resolve_slug(None, "Hello World").unwrap(), "hello-world");
        assert_eq!(resolve_slug(Some("  "), "Title").unwrap(), "title");
        assert!(resolve_slug(None, "!!!").is_err());
    }

    #[test]
    fn stats_accumulate() {
        let mut stats = StatusStats::default();
        stats.record(PublicationStatus::Draft, 2);
        stats.record(PublicationStatus::Published, 3);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.published, 3);
        assert_eq!(stats.archived, 0);
    }
}
