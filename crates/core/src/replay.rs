use log::debug;
use thiserror::Error;

use crate::config::GameConfig;
use crate::error::SessionError;
use crate::game::Game;
use crate::journal::{InputJournal, JOURNAL_FORMAT_VERSION};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("journal format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u16, expected: u16 },
    #[error("input {found} is out of sequence (expected {expected})")]
    OutOfSequence { found: u64, expected: u64 },
    #[error("run setup failed: {0}")]
    Setup(#[source] SessionError),
    #[error("input {seq} failed: {source}")]
    Input { seq: u64, source: SessionError },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_level: u32,
    pub player_level: u32,
    pub snapshot_hash: u64,
    pub transitions_applied: u64,
}

/// Rebuilds the run recorded in `journal` and re-issues every intent in order.
pub fn replay_to_end(
    config: &GameConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    if journal.format_version != JOURNAL_FORMAT_VERSION {
        return Err(ReplayError::UnsupportedVersion {
            found: journal.format_version,
            expected: JOURNAL_FORMAT_VERSION,
        });
    }

    let mut game = Game::new(journal.seed, config.clone()).map_err(ReplayError::Setup)?;
    for (expected, record) in (0_u64..).zip(&journal.inputs) {
        if record.seq != expected {
            return Err(ReplayError::OutOfSequence { found: record.seq, expected });
        }
        game.apply_intent(&record.intent)
            .map_err(|source| ReplayError::Input { seq: record.seq, source })?;
    }
    debug!("replayed {} inputs from seed {}", journal.inputs.len(), journal.seed);

    let state = game.state();
    Ok(ReplayResult {
        final_level: state.level(),
        player_level: state.player_progress().map_or(0, |progress| progress.level),
        snapshot_hash: game.snapshot_hash(),
        transitions_applied: game.transitions_applied(),
    })
}
