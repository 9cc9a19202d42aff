// Replay module for re-running logged play calls
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Re-run the search on each logged call with its recorded seed
// 3. Compare logged vs replayed decision sequences
// 4. Generate analysis reports

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::PlayLogEntry;
use crate::decision::Decision;
use crate::types::RelativeMove;

/// Result of replaying a single logged call
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub correlation_id: String,
    pub logged_moves: Vec<RelativeMove>,
    pub replayed_moves: Vec<RelativeMove>,
    pub matches: bool,
    /// First depth whose decision differs, if any
    pub first_divergence: Option<u32>,
    pub max_depth: u32,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_calls: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<PlayLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: PlayLogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &PlayLogEntry) -> ReplayResult {
        let start_time = Instant::now();
        let mut replayed: Vec<Decision> = Vec::new();

        self.bot.play_seeded(
            &entry.correlation_id,
            &entry.position,
            &entry.grid,
            entry.max_depth,
            entry.seed,
            &mut replayed,
        );

        let logged_moves: Vec<RelativeMove> = entry.decisions.iter().map(|d| d.chosen_move).collect();
        let replayed_moves: Vec<RelativeMove> = replayed.iter().map(|d| d.chosen_move).collect();
        let first_divergence = Self::first_divergence(&entry.decisions, &replayed);
        let matches = first_divergence.is_none();
        let computation_time = start_time.elapsed().as_millis();

        if self.verbose {
            if matches {
                info!(
                    "{}: MATCH - {} decisions, final {} (time: {}ms)",
                    entry.correlation_id,
                    replayed_moves.len(),
                    replayed_moves.last().map(|m| m.as_str()).unwrap_or("-"),
                    computation_time
                );
            } else {
                warn!(
                    "{}: MISMATCH at depth {:?} - logged {:?}, replayed {:?}",
                    entry.correlation_id, first_divergence, logged_moves, replayed_moves
                );
            }
        }

        ReplayResult {
            correlation_id: entry.correlation_id.clone(),
            logged_moves,
            replayed_moves,
            matches,
            first_divergence,
            max_depth: entry.max_depth,
            computation_time_ms: computation_time,
        }
    }

    /// Depth of the first decision that differs between two sequences.
    /// A missing decision on either side counts as a difference at that depth.
    fn first_divergence(logged: &[Decision], replayed: &[Decision]) -> Option<u32> {
        let longest = logged.len().max(replayed.len());
        (0..longest).find_map(|i| match (logged.get(i), replayed.get(i)) {
            (Some(a), Some(b)) if a.chosen_move == b.chosen_move && a.depth == b.depth => None,
            (Some(a), _) => Some(a.depth),
            (None, Some(b)) => Some(b.depth),
            (None, None) => None,
        })
    }

    /// Replays all entries in parallel; results keep log order
    pub fn replay_all(&self, entries: &[PlayLogEntry]) -> Vec<ReplayResult> {
        entries.par_iter().map(|entry| self.replay_entry(entry)).collect()
    }

    /// Replays the entries with the given correlation ids
    pub fn replay_ids(
        &self,
        entries: &[PlayLogEntry],
        correlation_ids: &[String],
    ) -> Result<Vec<ReplayResult>, String> {
        correlation_ids
            .iter()
            .map(|id| {
                entries
                    .iter()
                    .find(|e| &e.correlation_id == id)
                    .map(|entry| self.replay_entry(entry))
                    .ok_or_else(|| format!("Call {} not found in log file", id))
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_calls = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_calls - matches;
        let match_rate = if total_calls > 0 {
            (matches as f64 / total_calls as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_calls,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Calls:    {}", stats.total_calls);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results.iter().map(|r| r.computation_time_ms as f64).sum::<f64>()
                / results.len() as f64;
            let avg_depth: f64 =
                results.iter().map(|r| r.max_depth as f64).sum::<f64>() / results.len() as f64;

            println!("Average Max Depth:          {:.1}", avg_depth);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "{}: diverges at depth {} ({} → {})",
                    result.correlation_id,
                    result
                        .first_divergence
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    Self::format_moves(&result.logged_moves),
                    Self::format_moves(&result.replayed_moves)
                );
            }
            println!();
        }
    }

    /// Validates that the final logged move of each call is one of the acceptable ones
    pub fn validate_expected_moves(
        &self,
        entries: &[PlayLogEntry],
        expected_moves: &[(String, Vec<RelativeMove>)], // (correlation id, acceptable_moves)
    ) -> Result<(), String> {
        for (id, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| &e.correlation_id == id)
                .ok_or_else(|| format!("Call {} not found in log", id))?;

            let actual_move = entry
                .decisions
                .last()
                .map(|d| d.chosen_move)
                .ok_or_else(|| format!("Call {} has no decisions", id))?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Call {}: Expected one of {:?}, but got {}",
                    id,
                    acceptable.iter().map(|m| m.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }

    fn format_moves(moves: &[RelativeMove]) -> String {
        moves.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(",")
    }
}
