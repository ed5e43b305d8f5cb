//! Query parameter types shared across handler modules.

use serde::Deserialize;

/// `?limit=&offset=` for paginated listings.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamp to `1..=max`, falling back to `default` when absent.
    pub fn limit_or(&self, default: i64, max: i64) -> i64 {
        self.limit.unwrap_or(default).clamp(1, max)
    }

    /// Negative offsets are treated as zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// `?tab=&search=` for the client list.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListParams {
    pub tab: Option<String>,
    #[serde(default)]
    pub search: String,
}

/// `?role=` for the staff picker.
#[derive(Debug, Deserialize)]
pub struct RoleFilterParams {
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_is_clamped() {
        let params = PaginationParams {
            limit: Some(1000),
            offset: Some(-5),
        };
        assert_eq!(params.limit_or(50, 100), 100);
        assert_eq!(params.offset(), 0);

        let defaults = PaginationParams {
            limit: None,
            offset: None,
        };
        assert_eq!(defaults.limit_or(50, 100), 50);
    }
}
