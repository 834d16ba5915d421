use std::collections::BTreeMap;

use stardust_core::*;

/// Mirrors engine events into the log.
#[derive(Debug, Default)]
pub struct EventLog;

impl EventSink for EventLog {
    fn handle(&mut self, event: &GameEvent) {
        use GameEvent::*;

        match event {
            RoundStarted {
                round,
                difficulty,
                stars,
                rocks,
            } => log::info!("round {} ({difficulty}): {stars} stars hidden among {rocks} rocks", round.0),
            BombPlanted(position) => log::debug!("bomb planted at {position}"),
            BombDetonated(position) => log::debug!("bomb at {position} went off"),
            CellDestroyed {
                position,
                had_star: true,
                ..
            } => log::info!("star found at {position}"),
            CellDestroyed {
                position,
                had_dust: true,
                ..
            } => log::debug!("star dust at {position}"),
            CellDestroyed { position, .. } => log::trace!("cleared {position}"),
            RoundWon => log::info!("all stars collected"),
            RoundLost {
                stars_remaining,
                hidden_stars,
            } => log::info!("out of bombs, {stars_remaining} stars left at {hidden_stars:?}"),
            RoundRestarting => log::debug!("restarting"),
        }
    }
}

/// Stand-in for audio output: logs which sound would play and counts them.
#[derive(Debug, Default)]
pub struct SoundBoard {
    muted: bool,
    played: BTreeMap<&'static str, u32>,
}

impl SoundBoard {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            played: BTreeMap::new(),
        }
    }

    pub fn played(&self) -> &BTreeMap<&'static str, u32> {
        &self.played
    }
}

impl EventSink for SoundBoard {
    fn handle(&mut self, event: &GameEvent) {
        if self.muted {
            return;
        }
        let Some(cue) = SoundCue::for_event(event) else {
            return;
        };
        log::trace!("playing {}", cue.file_name());
        *self.played.entry(cue.file_name()).or_default() += 1;
    }
}

/// Forwards every event to each collaborator in turn.
#[derive(Debug)]
pub struct Collaborators {
    pub log: EventLog,
    pub sound: SoundBoard,
}

impl EventSink for Collaborators {
    fn handle(&mut self, event: &GameEvent) {
        self.log.handle(event);
        self.sound.handle(event);
    }
}
