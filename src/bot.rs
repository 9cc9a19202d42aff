// Light-cycle bot
//
// Host-facing entry point: decodes the serialized position and grid, seeds the
// shuffle, runs the territory search and reports decisions to the caller's sink.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use std::time::Instant;

use crate::config::Config;
use crate::debug_logger::{DebugLogger, PlayLogEntry};
use crate::decision::{DecisionSink, RecordingSink};
use crate::error::PlayError;
use crate::grid::Grid;
use crate::search::{self, SearchSummary};
use crate::types::{GridPayload, PlayRequest, PositionPayload};

/// Outcome of a successful play call
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    /// Seed the shuffle ran with; replaying with it reproduces the decisions
    pub seed: u64,
    pub max_depth: u32,
    pub summary: SearchSummary,
}

/// Light-cycle bot
/// Takes static configuration and an optional debug logger; holds no per-call state
#[derive(Clone)]
pub struct Bot {
    config: Config,
    logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            logger: DebugLogger::disabled(),
        }
    }

    /// Attaches a debug logger that records every completed call
    pub fn with_logger(mut self, logger: DebugLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "apiversion": "1",
            "author": "light-cycle-bot",
            "version": env!("CARGO_PKG_VERSION"),
            "moves": ["FORWARD", "STARBOARD", "LARBOARD"],
        })
    }

    /// Decodes the request payloads
    ///
    /// # Returns
    /// * `Result<(PositionPayload, GridPayload), PlayError>` - both payloads, or the first that failed
    pub fn decode(request: &PlayRequest) -> Result<(PositionPayload, GridPayload), PlayError> {
        let position = request
            .position
            .decode::<PositionPayload>()
            .map_err(PlayError::MalformedPosition)?;
        let grid = request
            .grid
            .decode::<GridPayload>()
            .map_err(PlayError::MalformedGrid)?;
        Ok((position, grid))
    }

    /// Runs one decision call
    /// Corresponds to POST /play endpoint
    ///
    /// Emits one decision per depth from 0 through the request's max depth
    /// (or the configured default) into `sink`. Malformed payloads fail the
    /// call before anything is emitted.
    ///
    /// # Arguments
    /// * `request` - Correlation id, serialized position and grid, optional max depth
    /// * `sink` - Reply channel receiving each decision
    pub fn play(
        &self,
        request: &PlayRequest,
        sink: &mut dyn DecisionSink,
    ) -> Result<PlayOutcome, PlayError> {
        let (position, grid) = Self::decode(request)?;

        let max_depth = request
            .max_depth
            .unwrap_or(self.config.search.default_max_depth);
        let seed = self.config.rng.seed.unwrap_or_else(rand::random);

        let mut recorder = RecordingSink::new(sink);
        let summary = self.play_seeded(
            &request.correlation_id,
            &position,
            &grid,
            max_depth,
            seed,
            &mut recorder,
        );

        if self.logger.is_enabled() {
            self.logger.log_play(PlayLogEntry::new(
                &request.correlation_id,
                seed,
                max_depth,
                position,
                grid,
                recorder.into_recorded(),
            ));
        }

        Ok(PlayOutcome {
            seed,
            max_depth,
            summary,
        })
    }

    /// Runs the search on already-decoded payloads with a fixed seed
    pub fn play_seeded(
        &self,
        correlation_id: &str,
        position: &PositionPayload,
        grid: &GridPayload,
        max_depth: u32,
        seed: u64,
        sink: &mut dyn DecisionSink,
    ) -> SearchSummary {
        let start_time = Instant::now();
        let start = position.to_position();
        let grid = Grid::from_payload(grid);
        let mut rng = StdRng::seed_from_u64(seed);

        info!(
            "[{}] Playing from ({}, {}) heading {:?} on {}x{} grid ({} filled), max depth {}",
            correlation_id,
            start.cell.x,
            start.cell.y,
            start.displacement(),
            grid.size_x,
            grid.size_y,
            grid.filled_count(),
            max_depth
        );

        let summary = search::run_search(correlation_id, start, &grid, max_depth, &mut rng, sink);

        info!(
            "[{}] Chose {} (time: {}ms, seed: {})",
            correlation_id,
            summary.final_move,
            start_time.elapsed().as_millis(),
            seed
        );

        summary
    }
}
