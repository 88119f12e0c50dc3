//! Interactive input collection.
//!
//! The collector owns the text source and runs as its own task. Consumers
//! pull lines through an [`InputHandle`]: each call to
//! [`InputHandle::next_line`] files a request and the collector answers the
//! oldest request that is still waiting. A request whose asker has given up
//! (it lost a race against a timer) is never answered with a fresh line; if
//! the collector was already reading for it, that line is dropped. This keeps
//! a late answer from being credited to the question that follows.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

type LineRequest = oneshot::Sender<String>;

/// Background task reading lines from an interactive source.
pub struct InputCollector {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl InputCollector {
    /// Start collecting from `reader` until `cancel` fires or the input ends.
    pub fn spawn<R>(reader: R, cancel: CancellationToken) -> (Self, InputHandle)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (requests_tx, requests_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(collect(reader, requests_rx, cancel.clone()));
        let handle = InputHandle {
            requests: requests_tx,
            closed: false,
        };
        (Self { cancel, task }, handle)
    }

    /// Cancel collection and wait for the task to exit.
    pub async fn stop(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            tracing::warn!("input collector task failed: {e}");
        }
    }
}

/// Consumer side of the collector. Exactly one reader at a time.
#[derive(Debug)]
pub struct InputHandle {
    requests: mpsc::UnboundedSender<LineRequest>,
    closed: bool,
}

impl InputHandle {
    /// Wait for the next line of input.
    ///
    /// Returns `None` once the collector has stopped (end of input, read
    /// error, or cancellation). Dropping the returned future abandons the
    /// request.
    pub async fn next_line(&mut self) -> Option<String> {
        if self.closed {
            return None;
        }
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.requests.send(reply_tx).is_err() {
            self.closed = true;
            return None;
        }
        match reply_rx.await {
            Ok(line) => Some(line),
            Err(_) => {
                self.closed = true;
                None
            }
        }
    }

    /// Whether the collector is known to have stopped.
    pub fn is_closed(&self) -> bool {
        self.closed || self.requests.is_closed()
    }
}

async fn collect<R>(
    reader: R,
    mut requests: mpsc::UnboundedReceiver<LineRequest>,
    cancel: CancellationToken,
) where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();

    loop {
        let reply = tokio::select! {
            () = cancel.cancelled() => break,
            request = requests.recv() => match request {
                Some(reply) if reply.is_closed() => {
                    tracing::trace!("skipping abandoned input request");
                    continue;
                }
                Some(reply) => reply,
                None => break,
            },
        };

        let line = tokio::select! {
            () = cancel.cancelled() => break,
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                if let Err(late) = reply.send(line) {
                    tracing::debug!(
                        input = %late,
                        "discarding answer that arrived after its question closed"
                    );
                }
            }
            Ok(None) => {
                tracing::debug!("input reached end of stream");
                break;
            }
            Err(e) => {
                tracing::warn!("failed to read input: {e}");
                break;
            }
        }
    }

    tracing::debug!("input collector stopped");
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;

    use super::testing::scripted;
    use super::*;

    #[tokio::test]
    async fn forwards_lines_in_order() {
        let (collector, mut input) =
            InputCollector::spawn(&b"4\n seven \n\n"[..], CancellationToken::new());

        assert_eq!(input.next_line().await.as_deref(), Some("4"));
        assert_eq!(input.next_line().await.as_deref(), Some(" seven "));
        assert_eq!(input.next_line().await.as_deref(), Some(""));
        assert_eq!(input.next_line().await, None);
        assert!(input.is_closed());

        collector.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_closes_the_conduit() {
        let cancel = CancellationToken::new();
        let (collector, mut input) = InputCollector::spawn(scripted(&[], false), cancel.clone());

        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            cancel.cancel();
        });

        assert_eq!(input.next_line().await, None);
        assert!(input.is_closed());
        canceller.await.unwrap();
        collector.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_then_read_returns_none() {
        let (collector, mut input) =
            InputCollector::spawn(scripted(&[(10, "4")], false), CancellationToken::new());
        collector.stop().await;
        assert_eq!(input.next_line().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_request_drops_its_line() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let (collector, mut input) = InputCollector::spawn(
            tokio::io::BufReader::new(reader),
            CancellationToken::new(),
        );

        let gave_up = tokio::time::timeout(Duration::from_secs(1), input.next_line()).await;
        assert!(gave_up.is_err());

        writer.write_all(b"late\nfresh\n").await.unwrap();
        assert_eq!(input.next_line().await.as_deref(), Some("fresh"));

        collector.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn requests_abandoned_before_reading_consume_nothing() {
        let (mut writer, reader) = tokio::io::duplex(64);
        let (collector, mut input) = InputCollector::spawn(
            tokio::io::BufReader::new(reader),
            CancellationToken::new(),
        );

        // The first request is picked up and its read is in flight; the next
        // two are abandoned while still queued behind it.
        for _ in 0..3 {
            let gave_up = tokio::time::timeout(Duration::from_secs(1), input.next_line()).await;
            assert!(gave_up.is_err());
        }

        writer.write_all(b"late\n6\n").await.unwrap();
        assert_eq!(input.next_line().await.as_deref(), Some("6"));

        collector.stop().await;
    }
}
