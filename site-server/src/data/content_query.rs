//! GROQ query construction for the content store.
//!
//! Every builder here is pure: it returns a [`GroqQuery`] (query text plus
//! named parameters) and leaves execution to a [`ContentStore`] implementation.
//! User-provided values are always passed as `$params`, never spliced into
//! the query text.
//!
//! [`ContentStore`]: crate::data::content_store::ContentStore

use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::pagination::ALL_CATEGORIES;

const CATEGORY_PROJECTION: &str = r#"{ _id, title, "slug": slug.current, order }"#;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GroqQuery {
    pub(crate) query: String,
    pub(crate) params: BTreeMap<String, Value>,
}

impl GroqQuery {
    fn new(query: String) -> Self {
        Self {
            query,
            params: BTreeMap::new(),
        }
    }

    fn with_param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }
}

/// Document types that support filtered, paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListableKind {
    Post,
    Project,
}

impl ListableKind {
    fn document_type(&self) -> &'static str {
        match self {
            ListableKind::Post => "post",
            ListableKind::Project => "project",
        }
    }

    fn list_projection(&self) -> String {
        match self {
            ListableKind::Post => format!(
                r#"{{ _id, title, "slug": slug.current, description, "mainImage": {{ "assetRef": mainImage.asset._ref, "alt": mainImage.alt }}, "author": author->{{ name }}, "categories": categories[]->{CATEGORY_PROJECTION}, publishedAt }}"#
            ),
            ListableKind::Project => format!(
                r#"{{ _id, name, "slug": slug.current, description, "images": images[]{{ "assetRef": asset._ref, alt }}, "categories": categories[]->{CATEGORY_PROJECTION}, publishedAt, _createdAt, _updatedAt }}"#
            ),
        }
    }

    fn detail_projection(&self) -> String {
        match self {
            ListableKind::Post => format!(
                r#"{{ _id, title, "slug": slug.current, description, body, "mainImage": {{ "assetRef": mainImage.asset._ref, "alt": mainImage.alt }}, "author": author->{{ name, "image": {{ "assetRef": image.asset._ref }} }}, "categories": categories[]->{CATEGORY_PROJECTION}, publishedAt }}"#
            ),
            ListableKind::Project => format!(
                r#"{{ _id, name, "slug": slug.current, description, body, "images": images[]{{ "assetRef": asset._ref, alt }}, "categories": categories[]->{CATEGORY_PROJECTION}, publishedAt, _createdAt, _updatedAt }}"#
            ),
        }
    }

    /// Published documents of this type that carry a slug.
    fn base_predicate(&self) -> String {
        format!(
            r#"_type == "{}" && defined(slug.current) && publishedAt <= now()"#,
            self.document_type()
        )
    }
}

/// Category filter parsed from the raw query value: empty and `"all"` mean
/// "no filter"; anything else is matched exactly and case-sensitively.
pub(crate) fn category_filter(raw: Option<&str>) -> Option<String> {
    raw.filter(|slug| !slug.is_empty() && *slug != ALL_CATEGORIES)
        .map(str::to_string)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slice {
    pub(crate) start: u64,
    pub(crate) end: u64,
}

impl Slice {
    /// Offset `(page-1) * page_size`, clamped to zero for `page <= 0`.
    pub(crate) fn for_page(page: i64, page_size: u32) -> Self {
        let page_index = u64::try_from(page.saturating_sub(1)).unwrap_or(0);
        let start = page_index.saturating_mul(u64::from(page_size));
        Self {
            start,
            end: start.saturating_add(u64::from(page_size)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListQuery {
    kind: ListableKind,
    category: Option<String>,
    slice: Slice,
}

impl ListQuery {
    pub(crate) fn new(
        kind: ListableKind,
        category_slug: Option<&str>,
        page: i64,
        page_size: u32,
    ) -> Self {
        Self {
            kind,
            category: category_filter(category_slug),
            slice: Slice::for_page(page, page_size),
        }
    }

    pub(crate) fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn slice(&self) -> Slice {
        self.slice
    }

    fn predicate(&self) -> String {
        let mut predicate = self.kind.base_predicate();
        if self.category.is_some() {
            predicate.push_str(" && $category in categories[]->slug.current");
        }
        predicate
    }

    fn with_filter_params(&self, query: GroqQuery) -> GroqQuery {
        match &self.category {
            Some(category) => query.with_param("category", category.clone()),
            None => query,
        }
    }

    /// Page of documents ordered newest first, `[start...end)`.
    pub(crate) fn to_groq(&self) -> GroqQuery {
        let query = format!(
            "*[{}] | order(publishedAt desc) [$start...$end] {}",
            self.predicate(),
            self.kind.list_projection()
        );
        self.with_filter_params(GroqQuery::new(query))
            .with_param("start", self.slice.start)
            .with_param("end", self.slice.end)
    }

    /// Same predicate as [`ListQuery::to_groq`], without slicing.
    pub(crate) fn to_count_groq(&self) -> GroqQuery {
        let query = format!("count(*[{}])", self.predicate());
        self.with_filter_params(GroqQuery::new(query))
    }
}

pub(crate) fn by_slug_query(kind: ListableKind, slug: &str) -> GroqQuery {
    let query = format!(
        "*[{} && slug.current == $slug][0] {}",
        kind.base_predicate(),
        kind.detail_projection()
    );
    GroqQuery::new(query).with_param("slug", slug)
}

pub(crate) fn categories_query() -> GroqQuery {
    GroqQuery::new(format!(
        r#"*[_type == "category" && defined(slug.current)] | order(order asc, title asc) {CATEGORY_PROJECTION}"#
    ))
}

/// Singleton lookup; fetches up to two documents so duplicates are visible.
pub(crate) fn workplace_policy_query() -> GroqQuery {
    GroqQuery::new(
        r#"*[_type == "workplacePolicy"] | order(_updatedAt desc) [0...2] { _id, title, "mainImage": { "assetRef": mainImage.asset._ref, "alt": mainImage.alt }, body }"#
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        ListQuery, ListableKind, Slice, by_slug_query, categories_query, category_filter,
        workplace_policy_query,
    };

    #[test]
    fn offset_is_page_minus_one_times_page_size() {
        for page in 1..=20i64 {
            for page_size in 1..=15u32 {
                let slice = Slice::for_page(page, page_size);
                assert_eq!(slice.start, (page as u64 - 1) * page_size as u64);
                assert_eq!(slice.end - slice.start, page_size as u64);
            }
        }
    }

    #[test]
    fn non_positive_page_clamps_offset_to_zero() {
        assert_eq!(Slice::for_page(0, 10), Slice { start: 0, end: 10 });
        assert_eq!(Slice::for_page(-5, 10), Slice { start: 0, end: 10 });
        assert_eq!(Slice::for_page(i64::MIN, 10).start, 0);
    }

    #[test]
    fn category_page_two_scenario() {
        let list = ListQuery::new(ListableKind::Post, Some("ai"), 2, 10);
        assert_eq!(list.slice(), Slice { start: 10, end: 20 });

        let page = list.to_groq();
        assert!(page.query.contains("$category in categories[]->slug.current"));
        assert!(page.query.contains("| order(publishedAt desc) [$start...$end]"));
        assert_eq!(page.params["category"], json!("ai"));
        assert_eq!(page.params["start"], json!(10));
        assert_eq!(page.params["end"], json!(20));

        let count = list.to_count_groq();
        assert!(count.query.starts_with("count(*["));
        assert!(count.query.contains("$category in categories[]->slug.current"));
        assert!(!count.query.contains("$start"));
        assert_eq!(count.params.len(), 1);
        assert_eq!(count.params["category"], json!("ai"));
    }

    #[test]
    fn count_and_page_share_the_same_predicate() {
        let list = ListQuery::new(ListableKind::Project, Some("vision"), 3, 9);
        let page = list.to_groq().query;
        let count = list.to_count_groq().query;

        let predicate = &count["count(*[".len()..count.len() - "])".len()];
        assert!(page.starts_with(&format!("*[{predicate}]")));
        assert!(predicate.contains(r#"_type == "project""#));
    }

    #[test]
    fn empty_and_all_categories_mean_no_filter() {
        assert_eq!(category_filter(None), None);
        assert_eq!(category_filter(Some("")), None);
        assert_eq!(category_filter(Some("all")), None);
        assert_eq!(category_filter(Some("All")).as_deref(), Some("All"));
        assert_eq!(category_filter(Some("AI")).as_deref(), Some("AI"));

        let list = ListQuery::new(ListableKind::Post, Some("all"), 1, 10);
        let page = list.to_groq();
        assert!(!page.query.contains("$category"));
        assert!(!page.params.contains_key("category"));
        assert!(list.to_count_groq().params.is_empty());
    }

    #[test]
    fn posts_only_include_published_documents() {
        let page = ListQuery::new(ListableKind::Post, None, 1, 10).to_groq();
        assert!(page.query.contains(r#"_type == "post""#));
        assert!(page.query.contains("publishedAt <= now()"));
    }

    #[test]
    fn slug_lookup_is_parameterized() {
        let query = by_slug_query(ListableKind::Post, "hello\"] | *[0");
        assert!(query.query.contains("slug.current == $slug][0]"));
        assert!(!query.query.contains("hello"));
        assert_eq!(query.params["slug"], json!("hello\"] | *[0"));
    }

    #[test]
    fn categories_and_policy_queries_take_no_params() {
        let categories = categories_query();
        assert!(categories.query.contains("order(order asc, title asc)"));
        assert!(categories.params.is_empty());

        let policy = workplace_policy_query();
        assert!(policy.query.contains(r#"_type == "workplacePolicy""#));
        assert!(policy.query.contains("[0...2]"));
    }
}
