use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::Randomizer;
use crate::game::Tetromino;

/// Supplies the sequence of piece kinds.
pub trait PieceSource {
    fn next_kind(&mut self) -> Tetromino;
}

/// Independent uniform draws over the seven kinds.
pub struct UniformSource<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PieceSource for UniformSource<R> {
    fn next_kind(&mut self) -> Tetromino {
        *Tetromino::ALL.choose(&mut self.rng).unwrap_or(&Tetromino::I)
    }
}

/// Deals shuffled bags holding one of each kind.
pub struct BagSource<R: Rng> {
    rng: R,
    bag: Vec<Tetromino>,
}

impl<R: Rng> BagSource<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            bag: Vec::with_capacity(Tetromino::ALL.len()),
        }
    }
}

impl<R: Rng> PieceSource for BagSource<R> {
    fn next_kind(&mut self) -> Tetromino {
        if self.bag.is_empty() {
            self.bag.extend_from_slice(&Tetromino::ALL);
            self.bag.shuffle(&mut self.rng);
        }
        self.bag.pop().unwrap_or(Tetromino::I)
    }
}

/// Replays a fixed list of kinds, cycling when it runs out.
pub struct ScriptedSource {
    script: Vec<Tetromino>,
    queue: VecDeque<Tetromino>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = Tetromino>) -> Self {
        let script: Vec<Tetromino> = script.into_iter().collect();
        let queue = script.iter().copied().collect();
        Self { script, queue }
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> Tetromino {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(Tetromino::I)
    }
}

/// Builds the source selected on the command line. A seed makes the
/// sequence reproducible; without one the generator is seeded from entropy.
pub fn source_for(rule: Randomizer, seed: Option<u64>) -> Box<dyn PieceSource> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match rule {
        Randomizer::Uniform => Box::new(UniformSource::new(rng)),
        Randomizer::Bag => Box::new(BagSource::new(rng)),
    }
}
