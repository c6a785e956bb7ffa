//! Search dispatch and pagination
//!
//! A request flows through:
//! - [`Strategy::select`] to pick a ranking strategy from the method token
//! - a [`RankedResultSource`] returning one page of native [`SourceRecord`]s
//! - [`project`] mapping each record onto a [`RankedResult`]
//! - [`paginate`] computing page count and previous/next links
//!
//! [`SearchOrchestrator`] ties the steps together.
//!
//! # Examples
//!
//! ```rust
//! use stackquery_core::search::{paginate, PagingInfo, Strategy};
//!
//! assert_eq!(Strategy::select(Some("\"matchall\"")), Strategy::MatchAll);
//! assert_eq!(Strategy::select(Some("anything")), Strategy::BestMatch);
//!
//! let nav = paginate(PagingInfo::new(5, 10), 25, &|page: u32| format!("?page={}", page));
//! assert_eq!(nav.pages, 3);
//! assert_eq!(nav.prev.as_deref(), Some("?page=4"));
//! assert!(nav.next.is_none());
//! ```

pub mod memory;
pub mod orchestrator;
pub mod pagination;
pub mod postgres;
pub mod projector;
pub mod query;
pub mod record;
pub mod source;
pub mod strategy;

pub use memory::MemorySearchSource;
pub use orchestrator::{SearchOrchestrator, SearchOutcome, DEFAULT_SOURCE_TIMEOUT};
pub use pagination::{paginate, total_pages, PageEnvelope, PageLinkBuilder, PageNavigation};
pub use postgres::PgSearchSource;
pub use projector::{project, project_all};
pub use query::{
    Ordering, PagingInfo, SearchQuery, SortKey, SortOrder, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use record::{RankedResult, SourceRecord};
pub use source::{RankedResultSource, SourcePage, SourceRequest};
pub use strategy::Strategy;
