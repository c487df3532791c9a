//! Dispatcher - read/classify/route loop over one `.ver` input

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, info, instrument};

use classifier::LineClassifier;
use contracts::{ClassifiedRecord, ConvertError, OutputLayout};

use crate::error::DispatcherError;
use crate::handle::{SinkHandle, SinkReport};
use crate::metrics::MetricsSnapshot;
use crate::sinks::PltSink;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Input `.ver` file
    pub input: PathBuf,
    /// Directory receiving the derived `.plt` files
    pub output_dir: PathBuf,
    /// Base name the destination file names derive from
    pub base_name: String,
    /// Declared output layout
    pub layout: OutputLayout,
    /// Capacity of each sink's inbound queue
    pub queue_capacity: usize,
}

/// Routing table: one handle per output destination plus the layout's
/// header policy.
pub struct Routes {
    /// Receives Coordinate records, and Header records in combined layout
    pub coordinates: SinkHandle,
    /// Receives IndexTriple records
    pub indices: SinkHandle,
    /// Whether Header records are streamed rather than dropped
    pub route_header: bool,
}

/// Builder for creating a Dispatcher over a file input
pub struct DispatcherBuilder {
    config: DispatcherConfig,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: DispatcherConfig) -> Self {
        Self { config }
    }

    /// Open the input, create the destinations, and spawn the sink workers
    #[instrument(name = "dispatcher_builder_build", skip(self), fields(input = %self.config.input.display()))]
    pub async fn build(self) -> Result<Dispatcher<BufReader<File>>, DispatcherError> {
        let input = File::open(&self.config.input).await?;
        let routes = Self::initialize_routes(&self.config)?;
        let classifier = LineClassifier::new(self.config.layout.singleton_anchor());

        Ok(Dispatcher::with_routes(
            BufReader::new(input),
            routes,
            classifier,
        ))
    }

    #[instrument(
        name = "dispatcher_initialize_routes",
        skip(config),
        fields(layout = %config.layout)
    )]
    fn initialize_routes(config: &DispatcherConfig) -> Result<Routes, DispatcherError> {
        let coords_path = config
            .layout
            .coordinates_path(&config.output_dir, &config.base_name);
        let idxs_path = config
            .layout
            .indices_path(&config.output_dir, &config.base_name);

        let coordinates = PltSink::create("coordinates", &coords_path).map_err(|e| {
            DispatcherError::sink_creation(
                "coordinates",
                format!("{}: {e}", coords_path.display()),
            )
        })?;
        let indices = PltSink::create("indices", &idxs_path).map_err(|e| {
            DispatcherError::sink_creation("indices", format!("{}: {e}", idxs_path.display()))
        })?;

        Ok(Routes {
            coordinates: SinkHandle::spawn(coordinates, config.queue_capacity),
            indices: SinkHandle::spawn(indices, config.queue_capacity),
            route_header: config.layout.routes_header(),
        })
    }
}

/// Result of one complete conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Input lines read
    pub lines_read: u64,
    /// Records routed to a sink
    pub records_routed: u64,
    /// Singleton marker lines dropped
    pub singletons_dropped: u64,
    /// Header lines dropped (split layout only)
    pub headers_dropped: u64,
    /// One completion acknowledgment per sink
    pub sinks: Vec<SinkReport>,
}

#[derive(Debug, Default)]
struct ReadStats {
    lines_read: u64,
    records_routed: u64,
    singletons_dropped: u64,
    headers_dropped: u64,
}

/// The main Dispatcher: Reading until input exhaustion, Draining until every
/// sink has acknowledged, then Done.
pub struct Dispatcher<R> {
    lines: Lines<R>,
    routes: Routes,
    classifier: LineClassifier,
    lines_read: Arc<AtomicU64>,
}

impl<R: AsyncBufRead + Unpin> Dispatcher<R> {
    /// Create a dispatcher over any buffered line source (used directly by
    /// tests)
    pub fn with_routes(reader: R, routes: Routes, classifier: LineClassifier) -> Self {
        Self {
            lines: reader.lines(),
            routes,
            classifier,
            lines_read: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Observable count of lines processed so far
    pub fn progress_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.lines_read)
    }

    /// Get metrics for all sinks
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        [&self.routes.coordinates, &self.routes.indices]
            .into_iter()
            .map(|h| (h.name().to_string(), h.metrics().snapshot()))
            .collect()
    }

    /// Run the dispatcher to completion.
    ///
    /// Reads and routes until end of input (or a fatal error), then closes
    /// every sink channel and waits for each worker's acknowledgment. The
    /// drain pass runs even on an aborted read so already-opened
    /// destinations are flushed and closed rather than leaked.
    #[instrument(name = "dispatcher_run", skip(self))]
    pub async fn run(mut self) -> Result<ConversionReport, DispatcherError> {
        info!("Dispatcher started, reading input");

        let read_result = self.read_all().await;

        info!("Dispatcher draining sinks");
        let Routes {
            coordinates,
            indices,
            ..
        } = self.routes;

        let mut reports = Vec::with_capacity(2);
        let mut drain_error = None;
        for result in [coordinates.shutdown().await, indices.shutdown().await] {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => drain_error = drain_error.or(Some(e)),
            }
        }

        let stats = match (read_result, drain_error) {
            // A closed routing target means the worker already failed; its
            // own error is the root cause.
            (Err(DispatcherError::SinkClosed { .. }), Some(e)) => return Err(e),
            (Err(e), _) => return Err(e),
            (Ok(_), Some(e)) => return Err(e),
            (Ok(stats), None) => stats,
        };

        info!(
            lines = stats.lines_read,
            routed = stats.records_routed,
            "Dispatcher done"
        );

        Ok(ConversionReport {
            lines_read: stats.lines_read,
            records_routed: stats.records_routed,
            singletons_dropped: stats.singletons_dropped,
            headers_dropped: stats.headers_dropped,
            sinks: reports,
        })
    }

    async fn read_all(&mut self) -> Result<ReadStats, DispatcherError> {
        let mut stats = ReadStats::default();

        while let Some(line) = self.lines.next_line().await? {
            stats.lines_read += 1;
            self.lines_read.fetch_add(1, Ordering::Relaxed);

            if stats.lines_read % 100 == 0 {
                debug!(lines = stats.lines_read, "Dispatcher progress");
            }

            let trimmed = line.trim_end();
            match self.classifier.classify(trimmed) {
                record @ ClassifiedRecord::Coordinate { .. } => {
                    self.routes.coordinates.send(record).await?;
                    stats.records_routed += 1;
                }
                record @ ClassifiedRecord::Header { .. } => {
                    if self.routes.route_header {
                        self.routes.coordinates.send(record).await?;
                        stats.records_routed += 1;
                    } else {
                        stats.headers_dropped += 1;
                    }
                }
                record @ ClassifiedRecord::IndexTriple { .. } => {
                    self.routes.indices.send(record).await?;
                    stats.records_routed += 1;
                }
                ClassifiedRecord::Singleton => {
                    stats.singletons_dropped += 1;
                }
                ClassifiedRecord::Unrecognized => {
                    return Err(ConvertError::input_shape(stats.lines_read, trimmed).into());
                }
            }
        }

        info!(lines = stats.lines_read, "Found end of input");
        Ok(stats)
    }
}

/// Convenience function to create a dispatcher from a configuration
#[instrument(name = "dispatcher_create", skip(config), fields(input = %config.input.display()))]
pub async fn create_dispatcher(
    config: DispatcherConfig,
) -> Result<Dispatcher<BufReader<File>>, DispatcherError> {
    DispatcherBuilder::new(config).build().await
}
