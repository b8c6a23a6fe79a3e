use crate::foundation::error::{PitchError, PitchResult};
use crate::timeline::TimeAxis;

/// Tempo in effect from `tick` until the next change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TempoChange {
    /// Tick at which this tempo starts.
    pub tick: f64,
    /// Beats per minute.
    pub bpm: f64,
}

/// Piecewise-constant tempo map with a fixed pulses-per-quarter-note resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct TempoMap {
    tpqn: u32,
    changes: Vec<TempoChange>,
}

impl TempoMap {
    /// Build a validated tempo map.
    ///
    /// The first change must sit at tick 0 and ticks must be strictly increasing.
    pub fn new(tpqn: u32, changes: Vec<TempoChange>) -> PitchResult<Self> {
        if tpqn == 0 {
            return Err(PitchError::validation("tpqn must be > 0"));
        }
        let Some(first) = changes.first() else {
            return Err(PitchError::validation("tempo map must not be empty"));
        };
        if first.tick != 0.0 {
            return Err(PitchError::validation("first tempo change must be at tick 0"));
        }
        for c in &changes {
            if !c.bpm.is_finite() || c.bpm <= 0.0 {
                return Err(PitchError::validation(format!(
                    "tempo at tick {} has invalid bpm {}",
                    c.tick, c.bpm
                )));
            }
        }
        if changes.windows(2).any(|w| w[1].tick <= w[0].tick) {
            return Err(PitchError::validation(
                "tempo change ticks must be strictly increasing",
            ));
        }
        Ok(Self { tpqn, changes })
    }

    /// Single-tempo map.
    pub fn constant(tpqn: u32, bpm: f64) -> PitchResult<Self> {
        Self::new(tpqn, vec![TempoChange { tick: 0.0, bpm }])
    }

    /// Pulses per quarter note.
    pub fn tpqn(&self) -> u32 {
        self.tpqn
    }

    /// Tempo changes in tick order.
    pub fn changes(&self) -> &[TempoChange] {
        &self.changes
    }

    fn secs_per_tick(&self, bpm: f64) -> f64 {
        60.0 / (bpm * f64::from(self.tpqn))
    }
}

impl TimeAxis for TempoMap {
    fn secs_to_tick(&self, secs: f64) -> f64 {
        let mut seg_start_secs = 0.0;
        for (i, c) in self.changes.iter().enumerate() {
            let spt = self.secs_per_tick(c.bpm);
            let Some(next) = self.changes.get(i + 1) else {
                return c.tick + (secs - seg_start_secs) / spt;
            };
            let seg_secs = (next.tick - c.tick) * spt;
            if secs < seg_start_secs + seg_secs {
                return c.tick + (secs - seg_start_secs) / spt;
            }
            seg_start_secs += seg_secs;
        }
        // `new` rejects empty maps.
        0.0
    }

    fn tick_to_secs(&self, tick: f64) -> f64 {
        let mut seg_start_secs = 0.0;
        for (i, c) in self.changes.iter().enumerate() {
            let spt = self.secs_per_tick(c.bpm);
            match self.changes.get(i + 1) {
                Some(next) if tick >= next.tick => {
                    seg_start_secs += (next.tick - c.tick) * spt;
                }
                _ => return seg_start_secs + (tick - c.tick) * spt,
            }
        }
        seg_start_secs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/tempo.rs"]
mod tests;
