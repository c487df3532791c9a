//! SinkHandle - manages a sink with its queue and worker task

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use contracts::{ClassifiedRecord, ConvertError, RecordSink};

use crate::error::DispatcherError;
use crate::metrics::SinkMetrics;

/// Completion acknowledgment from one sink worker, sent exactly once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    /// Sink name
    pub name: String,
    /// Rows written to the destination
    pub rows_written: u64,
}

/// Handle to a running sink worker
pub struct SinkHandle {
    /// Sink name
    name: String,
    /// Channel to send records to the worker
    tx: mpsc::Sender<ClassifiedRecord>,
    /// Shared metrics
    metrics: Arc<SinkMetrics>,
    /// Worker task handle, resolved by `shutdown`
    worker_handle: JoinHandle<Result<SinkReport, ConvertError>>,
}

impl SinkHandle {
    /// Create a new SinkHandle and spawn the worker task
    pub fn spawn<S: RecordSink + Send + 'static>(sink: S, queue_capacity: usize) -> Self {
        let name = sink.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity);
        let metrics = Arc::new(SinkMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            sink_worker(sink, rx, worker_metrics, worker_name).await
        });

        Self {
            name,
            tx,
            metrics,
            worker_handle,
        }
    }

    /// Get sink name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<SinkMetrics> {
        &self.metrics
    }

    /// Send a record to the sink, waiting while its queue is full
    /// (backpressure).
    ///
    /// # Errors
    /// Returns `SinkClosed` when the worker has already stopped; the real
    /// cause surfaces when the handle is shut down and joined.
    pub async fn send(&self, record: ClassifiedRecord) -> Result<(), DispatcherError> {
        self.tx
            .send(record)
            .await
            .map_err(|_| DispatcherError::sink_closed(&self.name))
    }

    /// Close the inbound channel and wait for the worker's completion
    /// acknowledgment.
    ///
    /// Dropping the sender is the only end-of-input signal a sink receives.
    #[instrument(name = "sink_handle_shutdown", skip(self), fields(sink = %self.name))]
    pub async fn shutdown(self) -> Result<SinkReport, DispatcherError> {
        let name = self.name;
        drop(self.tx);
        match self.worker_handle.await {
            Ok(Ok(report)) => {
                debug!(sink = %name, rows = report.rows_written, "SinkHandle shutdown complete");
                Ok(report)
            }
            Ok(Err(e)) => Err(DispatcherError::Convert(e)),
            Err(_) => Err(DispatcherError::worker_panic(name)),
        }
    }
}

/// Worker task that consumes records and writes to the sink.
///
/// Fails fast: the first write error ends the worker; dropping the sink on
/// the way out closes its destination handle.
#[instrument(
    name = "sink_worker_loop",
    skip(sink, rx, metrics),
    fields(sink = %name)
)]
async fn sink_worker<S: RecordSink>(
    mut sink: S,
    mut rx: mpsc::Receiver<ClassifiedRecord>,
    metrics: Arc<SinkMetrics>,
    name: String,
) -> Result<SinkReport, ConvertError> {
    debug!(sink = %name, "Sink worker started");

    let mut rows_written: u64 = 0;

    while let Some(record) = rx.recv().await {
        metrics.set_queue_len(rx.len());
        sink.write(&record).await?;
        rows_written += 1;
        metrics.inc_write_count();
    }

    sink.flush().await?;
    sink.close().await?;

    debug!(sink = %name, rows = rows_written, "Sink worker stopped");

    Ok(SinkReport { name, rows_written })
}
