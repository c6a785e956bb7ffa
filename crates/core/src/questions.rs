//! Paginated question listing
//!
//! Lists question posts in id order using the same navigation envelope as
//! search. An empty listing is a valid page, never an error.

use crate::search::{paginate, PageEnvelope, PageLinkBuilder, PagingInfo};
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use tracing::debug;

/// Post type id of questions in the posts table
pub const QUESTION_POST_TYPE: i32 = 1;

/// Identifier and title of a question post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestionSummary {
    pub id: i64,
    pub title: String,
}

impl QuestionSummary {
    pub fn new<S: Into<String>>(id: i64, title: S) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Backend listing questions page by page
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// One page of questions ordered by ascending id, plus the total count
    async fn list(&self, paging: PagingInfo) -> Result<(Vec<QuestionSummary>, u64)>;

    /// A single question, `None` when no question has this id
    async fn get(&self, id: i64) -> Result<Option<QuestionSummary>>;
}

/// Question source backed by the `posts` table
#[derive(Clone)]
pub struct PgQuestionSource {
    pool: PgPool,
}

impl PgQuestionSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionSource for PgQuestionSource {
    async fn list(&self, paging: PagingInfo) -> Result<(Vec<QuestionSummary>, u64)> {
        let limit = i64::from(paging.page_size);
        let offset = i64::try_from(paging.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT id::int8 AS id, COALESCE(title, '') AS title
            FROM posts
            WHERE posttype = $1
            ORDER BY id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(QUESTION_POST_TYPE)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let title: String = row.try_get("title")?;
            questions.push(QuestionSummary::new(id, title));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE posttype = $1")
            .bind(QUESTION_POST_TYPE)
            .fetch_one(&self.pool)
            .await?;

        Ok((questions, u64::try_from(total).unwrap_or(0)))
    }

    async fn get(&self, id: i64) -> Result<Option<QuestionSummary>> {
        let row = sqlx::query(
            "SELECT id::int8 AS id, COALESCE(title, '') AS title FROM posts WHERE id = $1 AND posttype = $2",
        )
        .bind(id)
        .bind(QUESTION_POST_TYPE)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(QuestionSummary::new(
                row.try_get::<i64, _>("id")?,
                row.try_get::<String, _>("title")?,
            ))),
            None => Ok(None),
        }
    }
}

/// In-memory question source
#[derive(Debug, Clone, Default)]
pub struct MemoryQuestionSource {
    questions: Vec<QuestionSummary>,
}

impl MemoryQuestionSource {
    pub fn new<I>(questions: I) -> Self
    where
        I: IntoIterator<Item = QuestionSummary>,
    {
        let mut questions: Vec<_> = questions.into_iter().collect();
        questions.sort_by_key(|q| q.id);
        Self { questions }
    }
}

#[async_trait]
impl QuestionSource for MemoryQuestionSource {
    async fn list(&self, paging: PagingInfo) -> Result<(Vec<QuestionSummary>, u64)> {
        let offset = usize::try_from(paging.offset()).unwrap_or(usize::MAX);
        let page = self
            .questions
            .iter()
            .skip(offset)
            .take(paging.page_size as usize)
            .cloned()
            .collect();
        Ok((page, self.questions.len() as u64))
    }

    async fn get(&self, id: i64) -> Result<Option<QuestionSummary>> {
        Ok(self.questions.iter().find(|q| q.id == id).cloned())
    }
}

/// List one page of questions with navigation links
pub async fn list_questions<S, L>(
    source: &S,
    paging: PagingInfo,
    links: &L,
) -> Result<PageEnvelope<QuestionSummary>>
where
    S: QuestionSource + ?Sized,
    L: PageLinkBuilder + Sync + ?Sized,
{
    paging.validate()?;

    let (questions, total) = source.list(paging).await?;
    debug!(page = paging.page, total, returned = questions.len(), "Listed questions");

    Ok(PageEnvelope::new(paginate(paging, total, links), questions))
}
