use serde::Serialize;
use url::form_urlencoded;

pub(crate) const ALL_CATEGORIES: &str = "all";

/// Listing pages that carry `?category=..&page=..` links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PagedResource {
    Blog,
    Projects,
}

impl PagedResource {
    pub(crate) fn path_segment(&self) -> &'static str {
        match self {
            PagedResource::Blog => "blog",
            PagedResource::Projects => "projects",
        }
    }

    /// Canonical listing URL: `/<resource>/?category=<slug|all>&page=<n>`.
    pub(crate) fn link(&self, page: u64, category: Option<&str>) -> String {
        let category = category
            .filter(|slug| !slug.is_empty())
            .unwrap_or(ALL_CATEGORIES);
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("category", category)
            .append_pair("page", &page.to_string())
            .finish();
        format!("/{}/?{query}", self.path_segment())
    }
}

/// `ceil(total_count / page_size)`; zero items means zero pages.
pub(crate) fn total_pages(total_count: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct PaginationState {
    pub(crate) current_page: u64,
    pub(crate) total_pages: u64,
    pub(crate) category: Option<String>,
}

impl PaginationState {
    pub(crate) fn new(
        current_page: u64,
        total_count: u64,
        page_size: u32,
        category: Option<String>,
    ) -> Self {
        Self {
            current_page,
            total_pages: total_pages(total_count, page_size),
            category,
        }
    }

    pub(crate) fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub(crate) fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub(crate) fn previous_link(&self, resource: PagedResource) -> Option<String> {
        self.has_previous()
            .then(|| resource.link(self.current_page - 1, self.category.as_deref()))
    }

    pub(crate) fn next_link(&self, resource: PagedResource) -> Option<String> {
        self.has_next()
            .then(|| resource.link(self.current_page + 1, self.category.as_deref()))
    }
}
