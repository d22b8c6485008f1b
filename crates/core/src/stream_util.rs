//! Primitives for combining asynchronous result sequences.
//!
//! Thin, named forms of the `futures` combinators the composers rely on,
//! so the ordering and termination contracts live in one place.

use std::pin::pin;

use futures::stream::{self, Stream, StreamExt};

/// Flattens a sequence of sequences into one, preserving source order.
///
/// Consumed lazily: the next inner stream is not touched until the
/// previous one is exhausted, and nothing is buffered.
pub fn concat<S>(streams: S) -> impl Stream<Item = <S::Item as Stream>::Item>
where
    S: Stream,
    S::Item: Stream,
{
    streams.flatten()
}

/// Interleaves two independently-progressing sequences by arrival.
///
/// Each value is forwarded as soon as either source produces it; the
/// merged sequence ends only once both sources are exhausted. Ordering
/// across the two sources is by arrival, not by source identity.
pub fn merge<T, A, B>(a: A, b: B) -> impl Stream<Item = T>
where
    A: Stream<Item = T>,
    B: Stream<Item = T>,
{
    stream::select(a, b)
}

/// Drives `batches` until the first non-empty batch and returns it.
///
/// Empty batches are skipped; `None` means the sequence ended without one.
/// The stream is dropped on return, cancelling any still-pending upstream
/// work.
pub async fn first_non_empty<T, S>(batches: S) -> Option<Vec<T>>
where
    S: Stream<Item = Vec<T>>,
{
    let mut batches = pin!(batches);
    while let Some(batch) = batches.next().await {
        if !batch.is_empty() {
            return Some(batch);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_stream::wrappers::ReceiverStream;

    #[tokio::test]
    async fn concat_preserves_source_order() {
        let streams = stream::iter(vec![
            stream::iter(vec![1, 2]),
            stream::iter(vec![]),
            stream::iter(vec![3]),
        ]);
        let flat: Vec<i32> = concat(streams).collect().await;
        assert_eq!(flat, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn merge_forwards_by_arrival_and_ends_when_both_end() {
        let (tx_a, rx_a) = tokio::sync::mpsc::channel(4);
        let (tx_b, rx_b) = tokio::sync::mpsc::channel(4);
        let merged = merge(ReceiverStream::new(rx_a), ReceiverStream::new(rx_b));

        tx_b.send("b1").await.unwrap();
        drop(tx_b);
        tx_a.send("a1").await.unwrap();
        tx_a.send("a2").await.unwrap();
        drop(tx_a);

        let mut values: Vec<&str> = merged.collect().await;
        // One exhausted source must not suppress the other's values.
        values.sort_unstable();
        assert_eq!(values, vec!["a1", "a2", "b1"]);
    }

    #[tokio::test]
    async fn first_non_empty_skips_empty_batches() {
        let batches = stream::iter(vec![vec![], vec![], vec![7, 8]]);
        assert_eq!(first_non_empty(batches).await, Some(vec![7, 8]));
    }

    #[tokio::test]
    async fn first_non_empty_returns_none_on_exhaustion() {
        let batches = stream::iter(vec![Vec::<i32>::new(), vec![]]);
        assert_eq!(first_non_empty(batches).await, None);
    }

    #[tokio::test]
    async fn first_non_empty_stops_pulling_after_a_hit() {
        let pulled = Arc::new(AtomicUsize::new(0));
        let counter = pulled.clone();
        let batches = stream::iter(vec![vec![1], vec![2], vec![3]]).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(first_non_empty(batches).await, Some(vec![1]));
        assert_eq!(pulled.load(Ordering::SeqCst), 1);
    }
}
