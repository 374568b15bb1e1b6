use std::fmt;

/// A supported vacancy provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    HeadHunter,
    SuperJob,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::HeadHunter => "HeadHunter",
            SourceKind::SuperJob => "SuperJob",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pagination contract for one provider.
///
/// Both providers page the same way (zero-based page index, page-size
/// parameter, hard cap on reachable results); only the names and numbers
/// differ, and those live here instead of in the request code.
#[derive(Debug, Clone, Copy)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub endpoint: &'static str,
    pub page_param: &'static str,
    pub per_page_param: &'static str,
    pub first_page: u64,
    pub max_page_size: u64,
    /// Deepest listing the provider will serve, regardless of how many
    /// matches it reports.
    pub result_cap: u64,
}

impl SourceDescriptor {
    pub fn for_kind(kind: SourceKind) -> Self {
        match kind {
            SourceKind::HeadHunter => Self {
                kind,
                endpoint: "https://api.hh.ru/vacancies",
                page_param: "page",
                per_page_param: "per_page",
                first_page: 0,
                max_page_size: 100,
                result_cap: 2000,
            },
            SourceKind::SuperJob => Self {
                kind,
                endpoint: "https://api.superjob.ru/2.0/vacancies/",
                page_param: "page",
                per_page_param: "count",
                first_page: 0,
                max_page_size: 100,
                result_cap: 500,
            },
        }
    }
}

/// Search parameters for one term against one provider.
///
/// `term` is the label results are reported under; the provider-facing
/// request is whatever `filters` carry. Each aggregation task owns its
/// query outright, so there is no shared state between terms.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub term: String,
    pub filters: Vec<(&'static str, String)>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.filters.push((key, value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_contracts() {
        let hh = SourceDescriptor::for_kind(SourceKind::HeadHunter);
        assert_eq!(hh.endpoint, "https://api.hh.ru/vacancies");
        assert_eq!(hh.page_param, "page");
        assert_eq!(hh.per_page_param, "per_page");
        assert_eq!(hh.first_page, 0);
        assert_eq!(hh.max_page_size, 100);
        assert_eq!(hh.result_cap, 2000);

        let sj = SourceDescriptor::for_kind(SourceKind::SuperJob);
        assert_eq!(sj.endpoint, "https://api.superjob.ru/2.0/vacancies/");
        assert_eq!(sj.page_param, "page");
        assert_eq!(sj.per_page_param, "count");
        assert_eq!(sj.first_page, 0);
        assert_eq!(sj.max_page_size, 100);
        assert_eq!(sj.result_cap, 500);
    }

    #[test]
    fn test_labels() {
        assert_eq!(SourceKind::SuperJob.to_string(), "SuperJob");
        assert_eq!(SourceKind::HeadHunter.to_string(), "HeadHunter");
    }

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new("Rust")
            .with_filter("text", "Программист Rust")
            .with_filter("area", "1");

        assert_eq!(query.term, "Rust");
        assert_eq!(
            query.filters,
            vec![("text", "Программист Rust".to_string()), ("area", "1".to_string())]
        );
    }
}
