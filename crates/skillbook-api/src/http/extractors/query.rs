//! Query parameter extractors for list endpoints.

use serde::Deserialize;

use skillbook_types::config::PaginationConfig;
use skillbook_types::page::PageRequest;

/// Query parameters for the skill list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct SkillListQuery {
    /// Number of skills to skip.
    pub offset: Option<u64>,
    /// Maximum results (clamped to the configured maximum).
    pub limit: Option<u64>,
}

impl SkillListQuery {
    /// Resolve into a concrete window using the configured page sizes.
    pub fn page_request(&self, pagination: &PaginationConfig) -> PageRequest {
        PageRequest::new(
            self.offset.unwrap_or(0),
            pagination.resolve_limit(self.limit),
        )
    }
}
