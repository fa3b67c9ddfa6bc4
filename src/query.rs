use neo4rs::{BoltType, Graph, Query, Row, Txn};
use neomap_core::error::NeomapError;
use neomap_core::record::{collect_records, Record};
use neomap_core::traits::FromRecord;
use tracing::{debug, trace};

use crate::stream::NeomapStream;

/// A typed query wrapper around [`neo4rs::Query`].
///
/// Provides a builder-style `.param()` API and typed fetch helpers that
/// map every returned row through [`FromRecord`].
///
/// # Examples
///
/// ```rust,no_run
/// # use neomap::query::NeomapQuery;
/// let query = NeomapQuery::new("MATCH (u:User {name: $name}) RETURN u")
///     .param("name", "Alice");
/// ```
pub struct NeomapQuery {
    text: String,
    inner: Query,
}

/// Map one driver row to `T`.
pub(crate) fn map_row<T: FromRecord>(row: &Row) -> Result<T, NeomapError> {
    let record = Record::from_row(row)?;
    T::from_record(&record, None)
}

impl NeomapQuery {
    /// Create a new query from a Cypher string.
    pub fn new(query: impl Into<String>) -> Self {
        let text: String = query.into();
        let inner = neo4rs::query(&text);
        Self { text, inner }
    }

    /// The Cypher text this query was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bind a named parameter. Accepts any type that converts to `BoltType`.
    ///
    /// ```rust,no_run
    /// # use neomap::query::NeomapQuery;
    /// let q = NeomapQuery::new("MATCH (u:User {age: $age}) RETURN u")
    ///     .param("age", 30_i64);
    /// ```
    pub fn param(mut self, key: impl Into<String>, value: impl Into<BoltType>) -> Self {
        let k: String = key.into();
        self.inner = self.inner.param(&k, value.into());
        self
    }

    /// Execute against a [`Graph`] and return exactly one row, mapped to `T`.
    ///
    /// Returns [`NeomapError::FieldNotFound`] if the result set is empty.
    pub async fn fetch_one<T: FromRecord>(self, graph: &Graph) -> Result<T, NeomapError> {
        debug!(query = %self.text, "fetch_one");
        let mut stream = graph.execute(self.inner).await?;
        let row = stream.next().await?
            .ok_or_else(|| NeomapError::field_not_found("row"))?;
        map_row(&row)
    }

    /// Execute against a [`Graph`] and collect all rows into `Vec<T>`.
    pub async fn fetch_all<T: FromRecord>(self, graph: &Graph) -> Result<Vec<T>, NeomapError> {
        self.fetch_collect::<T, Vec<T>>(graph).await
    }

    /// Execute against a [`Graph`] and gather all rows into any container.
    ///
    /// The first row that fails to map aborts the whole fetch.
    ///
    /// ```rust,no_run
    /// # use std::collections::BTreeSet;
    /// # use neomap::query::NeomapQuery;
    /// # async fn example(graph: &neo4rs::Graph) -> Result<(), neomap::NeomapError> {
    /// let names: BTreeSet<String> = NeomapQuery::new("MATCH (u:User) RETURN u.name AS name")
    ///     .fetch_collect::<String, _>(graph)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_collect<T, C>(self, graph: &Graph) -> Result<C, NeomapError>
    where
        T: FromRecord,
        C: FromIterator<T>,
    {
        debug!(query = %self.text, "fetch_collect");
        let mut stream = graph.execute(self.inner).await?;
        let mut records = Vec::new();
        while let Some(row) = stream.next().await? {
            records.push(Record::from_row(&row)?);
        }
        debug!(rows = records.len(), "fetch_collect finished");
        collect_records::<T, C, _>(&records)
    }

    /// Execute against a [`Graph`] and return zero or one row, mapped to `T`.
    ///
    /// Returns `Ok(None)` if the result set is empty, `Ok(Some(T))` if
    /// a row was found.
    ///
    /// ```rust,no_run
    /// # use neomap::query::NeomapQuery;
    /// # use neomap::NeomapError;
    /// # async fn example(graph: &neo4rs::Graph) -> Result<(), NeomapError> {
    /// let name: Option<String> = NeomapQuery::new("MATCH (u:User {id: $id}) RETURN u.name AS name")
    ///     .param("id", 1_i64)
    ///     .fetch_optional(graph)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_optional<T: FromRecord>(self, graph: &Graph) -> Result<Option<T>, NeomapError> {
        debug!(query = %self.text, "fetch_optional");
        let mut stream = graph.execute(self.inner).await?;
        match stream.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Execute within a [`Txn`] and return zero or one row, mapped to `T`.
    pub async fn fetch_optional_in<T: FromRecord>(self, txn: &mut Txn) -> Result<Option<T>, NeomapError> {
        debug!(query = %self.text, "fetch_optional_in");
        let mut stream = txn.execute(self.inner).await?;
        match stream.next(txn.handle()).await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }

    /// Execute within a [`Txn`] and return exactly one row, mapped to `T`.
    ///
    /// Like [`fetch_one`](Self::fetch_one) but runs inside an existing
    /// transaction. The stream is driven through `txn.handle()`.
    pub async fn fetch_one_in<T: FromRecord>(self, txn: &mut Txn) -> Result<T, NeomapError> {
        debug!(query = %self.text, "fetch_one_in");
        let mut stream = txn.execute(self.inner).await?;
        let row = stream.next(txn.handle()).await?
            .ok_or_else(|| NeomapError::field_not_found("row"))?;
        map_row(&row)
    }

    /// Execute within a [`Txn`] and collect all rows into `Vec<T>`.
    pub async fn fetch_all_in<T: FromRecord>(self, txn: &mut Txn) -> Result<Vec<T>, NeomapError> {
        debug!(query = %self.text, "fetch_all_in");
        let mut stream = txn.execute(self.inner).await?;
        let mut out = Vec::new();
        while let Some(row) = stream.next(txn.handle()).await? {
            trace!(row = out.len(), "mapping row");
            out.push(map_row(&row)?);
        }
        debug!(rows = out.len(), "fetch_all_in finished");
        Ok(out)
    }

    /// Execute against a [`Graph`] and return a streaming iterator of `T`.
    ///
    /// Unlike [`fetch_all`](Self::fetch_all), rows are converted one at a
    /// time as they arrive from the server, keeping memory usage constant.
    ///
    /// ```rust,no_run
    /// # use neomap::query::NeomapQuery;
    /// # use neomap::NeomapError;
    /// # async fn example(graph: &neo4rs::Graph) -> Result<(), NeomapError> {
    /// let mut stream = NeomapQuery::new("MATCH (u:User) RETURN u.name AS name")
    ///     .fetch_stream::<String>(graph)
    ///     .await?;
    ///
    /// while let Some(result) = stream.next().await {
    ///     let name = result?;
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_stream<T: FromRecord>(self, graph: &Graph) -> Result<NeomapStream<T>, NeomapError> {
        use futures::TryStreamExt;
        debug!(query = %self.text, "fetch_stream");
        let detached = graph.execute(self.inner).await?;
        let stream = detached.into_stream().into_stream();
        Ok(NeomapStream::new(Box::pin(stream)))
    }
}

/// Shorthand for [`NeomapQuery::new`].
pub fn query(q: impl Into<String>) -> NeomapQuery {
    NeomapQuery::new(q)
}
