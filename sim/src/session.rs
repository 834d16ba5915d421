use std::time::Duration;

use anyhow::{Result, bail};
use stardust_core::*;
use web_time::Instant;

use crate::player::AutoPlayer;
use crate::sinks::Collaborators;

/// Longest nap between polls in realtime mode.
const REALTIME_POLL: Duration = Duration::from_millis(50);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pace {
    /// Jump straight to the next timer.
    Simulated,
    /// Follow the wall clock, the way an interactive adapter would.
    Realtime,
}

/// Composes the engine with its collaborators and plays until enough rounds were recorded.
pub struct Session {
    pub engine: RoundEngine<GameStatistics>,
    pub player: AutoPlayer,
    pub collaborators: Collaborators,
}

impl Session {
    pub fn play(&mut self, rounds: u32, pace: Pace) -> Result<()> {
        let started = Instant::now();

        while self.engine.statistics().total_games() < rounds {
            if pace == Pace::Realtime {
                self.engine.advance_to(started.elapsed());
            }

            let planted = match self.player.choose(&self.engine) {
                Some(target) => self.engine.place_bomb(target).has_update(),
                None => false,
            };
            self.engine.flush_events(&mut self.collaborators);
            if planted {
                continue;
            }

            let Some(deadline) = self.engine.next_deadline() else {
                bail!(
                    "round {} stalled with {} bombs left and nothing scheduled",
                    self.engine.round_id().0,
                    self.engine.bombs_left()
                );
            };

            match pace {
                Pace::Simulated => self.engine.advance_to(deadline),
                Pace::Realtime => {
                    let wait = deadline.saturating_sub(started.elapsed());
                    std::thread::sleep(wait.min(REALTIME_POLL));
                }
            }
            self.engine.flush_events(&mut self.collaborators);
        }

        log::debug!("played {} rounds in {:?} of game time", rounds, self.engine.now());
        Ok(())
    }
}
