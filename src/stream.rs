//! Streaming query results with automatic type mapping.

use std::marker::PhantomData;
use std::pin::Pin;

use futures::stream::Stream;
use neomap_core::error::NeomapError;
use neomap_core::traits::FromRecord;
use tracing::trace;

use crate::query::map_row;

/// A typed stream of query results mapped via [`FromRecord`].
///
/// Created by [`NeomapQuery::fetch_stream`](crate::query::NeomapQuery::fetch_stream).
/// Each call to [`next()`](Self::next) pulls the next row from the database
/// and maps it to `T`.
pub struct NeomapStream<T> {
    inner: Pin<Box<dyn Stream<Item = Result<neo4rs::Row, neo4rs::Error>> + Send>>,
    pulled: usize,
    _marker: PhantomData<T>,
}

impl<T: FromRecord> NeomapStream<T> {
    pub(crate) fn new(inner: Pin<Box<dyn Stream<Item = Result<neo4rs::Row, neo4rs::Error>> + Send>>) -> Self {
        Self { inner, pulled: 0, _marker: PhantomData }
    }

    /// Pull the next row from the stream and map it to `T`.
    ///
    /// Returns `None` when the stream is exhausted.
    pub async fn next(&mut self) -> Option<Result<T, NeomapError>> {
        use futures::StreamExt;
        match self.inner.next().await {
            None => {
                trace!(rows = self.pulled, "stream exhausted");
                None
            }
            Some(Err(e)) => Some(Err(NeomapError::Neo4j(e))),
            Some(Ok(row)) => {
                self.pulled += 1;
                Some(map_row(&row))
            }
        }
    }
}
