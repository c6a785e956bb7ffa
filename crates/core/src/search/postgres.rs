//! PostgreSQL-backed ranked result source
//!
//! Each [`Strategy`] maps to a set-returning SQL function of the same name
//! (`best_match(text)`, `match_all(text)`, ...) yielding `(id, rank[, body])`
//! rows. Ranking happens inside those functions; this module only orders,
//! slices and counts what they return.

use crate::search::{Ordering, RankedResultSource, SourcePage, SourceRecord, SourceRequest, Strategy};
use crate::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::debug;

/// Ranked result source backed by a PostgreSQL connection pool
///
/// The pool is cloned cheaply and shared by every in-flight request.
#[derive(Clone)]
pub struct PgSearchSource {
    pool: PgPool,
}

impl PgSearchSource {
    /// Create a new source over `pool`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sqlx::PgPool;
    /// use stackquery_core::search::PgSearchSource;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = PgPool::connect("postgresql://localhost/stackoverflow").await?;
    /// let source = PgSearchSource::new(pool);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn page_sql(strategy: Strategy, ordering: &Ordering) -> String {
        let body = if strategy.returns_body() {
            "body::text"
        } else {
            "NULL::text"
        };

        format!(
            r#"
            SELECT id::int8 AS id,
                   rank::float8 AS rank,
                   {body} AS body,
                   COUNT(*) OVER () AS total_count
            FROM {procedure}($1)
            ORDER BY {order}
            LIMIT $2 OFFSET $3
            "#,
            body = body,
            procedure = strategy.procedure(),
            order = ordering.sql(),
        )
    }

    async fn count(&self, strategy: Strategy, query: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}($1)", strategy.procedure());
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(query)
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }
}

#[async_trait]
impl RankedResultSource for PgSearchSource {
    async fn execute(&self, strategy: Strategy, request: SourceRequest<'_>) -> Result<SourcePage> {
        let ordering = Ordering::resolve(request.sort_by, request.order_by)?;
        let sql = Self::page_sql(strategy, &ordering);

        let limit = i64::from(request.paging.page_size);
        let offset = i64::try_from(request.paging.offset()).unwrap_or(i64::MAX);

        debug!(
            strategy = %strategy,
            limit,
            offset,
            order = %ordering.sql(),
            "Querying ranked results"
        );

        let rows = sqlx::query(&sql)
            .bind(request.query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        let mut total: u64 = 0;
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: i64 = row.try_get("id")?;
            let rank: f64 = row.try_get("rank")?;
            let body: Option<String> = row.try_get("body")?;
            let count: i64 = row.try_get("total_count")?;
            total = u64::try_from(count).unwrap_or(0);
            records.push(SourceRecord::from_parts(strategy, id, rank, body));
        }

        // Window counts vanish with the rows; past the last page ask directly.
        if records.is_empty() && offset > 0 {
            total = self.count(strategy, request.query).await?;
        }

        Ok(SourcePage { records, total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sql_for_body_strategy() {
        let sql = PgSearchSource::page_sql(Strategy::MatchAll, &Ordering::default());
        assert!(sql.contains("FROM match_all($1)"));
        assert!(sql.contains("body::text AS body"));
        assert!(sql.contains("ORDER BY rank DESC, id ASC"));
        assert!(sql.contains("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_page_sql_for_bodiless_strategy() {
        let ordering = Ordering::resolve(Some("id"), Some("desc")).unwrap();
        let sql = PgSearchSource::page_sql(Strategy::BestMatchWeighted, &ordering);
        assert!(sql.contains("FROM best_match_weighted($1)"));
        assert!(sql.contains("NULL::text AS body"));
        assert!(sql.contains("ORDER BY id DESC"));
    }
}
