//! Search request → backend query DSL.
//!
//! The document shape is fixed: one free-text `must` clause, an optional
//! `timestamp` range filter, pagination and a newest-first sort.

use crate::model::SearchRequest;
use serde::Serialize;

/// Page size used when a request asks for 0 results.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDocument {
    pub query: Query,
    pub size: i64,
    pub from: i64,
    pub sort: [SortClause; 1],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    #[serde(rename = "bool")]
    pub boolean: BoolQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoolQuery {
    pub must: [MustClause; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<[FilterClause; 1]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MustClause {
    pub query_string: QueryString,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryString {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    pub range: TimestampRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimestampRange {
    pub timestamp: Bounds,
}

/// Inclusive bounds, forwarded as the caller wrote them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bounds {
    pub gte: String,
    pub lte: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortClause {
    pub timestamp: SortSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortSpec {
    pub order: SortOrder,
}

/// Results are always newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Desc,
}

impl QueryDocument {
    /// Build the query for `req`. Pure: no clock, no validation.
    pub fn build(req: &SearchRequest) -> Self {
        let filter = if !req.start_time.is_empty() && !req.end_time.is_empty() {
            Some([FilterClause {
                range: TimestampRange {
                    timestamp: Bounds {
                        gte: req.start_time.clone(),
                        lte: req.end_time.clone(),
                    },
                },
            }])
        } else {
            // A lone bound is ignored rather than turned into an open range.
            None
        };

        Self {
            query: Query {
                boolean: BoolQuery {
                    must: [MustClause {
                        query_string: QueryString {
                            query: req.query.clone(),
                        },
                    }],
                    filter,
                },
            },
            size: effective_size(req.size),
            from: req.from,
            sort: [SortClause {
                timestamp: SortSpec {
                    order: SortOrder::Desc,
                },
            }],
        }
    }

    pub fn has_time_filter(&self) -> bool {
        self.query.boolean.filter.is_some()
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// 0 means "not set"; anything else, negative included, is left to the backend.
pub fn effective_size(size: i64) -> i64 {
    if size == 0 { DEFAULT_PAGE_SIZE } else { size }
}
