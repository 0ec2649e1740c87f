use serde::{Deserialize, Serialize};

/// Standard success envelope: `{ data, message, success }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: String::new(),
            success: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 12;

    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            total_pages: Self::pages_for(total, limit),
        }
    }

    /// `ceil(total / limit)`, zero when `limit` is zero.
    pub fn pages_for(total: u64, limit: u32) -> u32 {
        if limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(limit)) as u32
    }

    pub fn has_more_pages(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages.max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
            total: 0,
            total_pages: 0,
        }
    }
}

/// Paginated envelope: `{ data: [...], pagination }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Shape of an error body; only `message` is relied upon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
