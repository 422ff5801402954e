// Copyright (C) 2020-2021 Andy Kurnia. All rights reserved.

use super::alphabet;
use rand::prelude::*;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Bag(pub Vec<char>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles());
        for tile in alphabet.tiles() {
            for _ in 0..tile.freq() {
                bag.push(tile.label());
            }
        }
        Bag(bag)
    }

    pub fn new_shuffled(alphabet: &alphabet::Alphabet, rng: &mut dyn RngCore) -> Bag {
        let mut bag = Self::new(alphabet);
        bag.shuffle(rng);
        bag
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    // draws from the end.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn replenish(&mut self, rack: &mut Vec<char>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.pop() {
                Some(tile) => rack.push(tile),
                None => break,
            }
        }
    }
}
