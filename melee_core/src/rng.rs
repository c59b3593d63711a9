//! Named, seeded draw streams
//!
//! Every random decision in the resolver pulls from a [`DrawSource`] by
//! stream name. Replaying a resolution with the same root seed reproduces it
//! exactly; nothing in this crate touches an unseeded generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Named random stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamId {
    /// Outcome rolls, hit location, armour gaps
    Combat,
    /// Secondary effects (condition durations and the like)
    Effects,
}

impl StreamId {
    fn salt(&self) -> u64 {
        match self {
            StreamId::Combat => 0x636f_6d62_6174,
            StreamId::Effects => 0x6566_6665_6374,
        }
    }
}

/// Pull-based random source returning a float in `[0, 1)` per draw
pub trait DrawSource {
    fn draw(&mut self, stream: StreamId) -> f64;
}

/// One ChaCha8 generator per stream, all derived from a root seed
#[derive(Debug, Clone)]
pub struct RandomStreams {
    seed: u64,
    streams: HashMap<StreamId, ChaCha8Rng>,
}

impl RandomStreams {
    pub fn new(seed: u64) -> Self {
        RandomStreams {
            seed,
            streams: HashMap::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn stream(&mut self, id: StreamId) -> &mut ChaCha8Rng {
        let seed = self.seed;
        self.streams
            .entry(id)
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(seed ^ id.salt()))
    }
}

impl DrawSource for RandomStreams {
    fn draw(&mut self, stream: StreamId) -> f64 {
        self.stream(stream).gen::<f64>()
    }
}

/// Fixed sequence of draws, for forcing outcomes in tests and replays
///
/// Values are handed out in order regardless of stream. Once exhausted it
/// keeps returning `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        ScriptedDraws {
            values: values.into_iter().collect(),
            fallback: 0.0,
            consumed: 0,
        }
    }

    /// Every draw returns `value`
    pub fn constant(value: f64) -> Self {
        ScriptedDraws {
            values: VecDeque::new(),
            fallback: value,
            consumed: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of draws taken so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl DrawSource for ScriptedDraws {
    fn draw(&mut self, _stream: StreamId) -> f64 {
        self.consumed += 1;
        let value = self.values.pop_front().unwrap_or(self.fallback);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
