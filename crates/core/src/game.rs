//! Single-trial state machine.
//!
//! Cards are dealt from the deck into a row of slots. The four slots starting
//! at the play offset form the window; its first and last cards are compared:
//!
//! - same suit: the two middle cards are discarded and the last card slides
//!   left next to the first; the offset steps back by two.
//! - same face: all four cards are discarded; the offset steps back by four.
//! - neither: one more card is dealt after the window and the offset advances.
//!
//! The trial ends once the deck is exhausted. Suit is always tested before face.

use crate::{format_area, Card, Deck, DeckLayout};
use serde::{Deserialize, Serialize};
use tracing::trace;

pub const WINDOW: usize = 4;

/// Cards currently in hand, one slot per possible position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayArea {
    slots: Vec<Option<Card>>,
}

impl PlayArea {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn reset(&mut self) {
        self.slots.fill(None);
    }

    pub fn slots(&self) -> &[Option<Card>] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn in_play(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Step {
    SuitCollapse,
    FaceCollapse,
    Advance,
    Exhausted,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrialOutcome {
    pub discarded: usize,
    pub deck_size: usize,
    pub steps: usize,
}

impl TrialOutcome {
    pub fn is_win(&self) -> bool {
        self.discarded == self.deck_size
    }
}

#[derive(Debug)]
pub struct Game<'a> {
    layout: DeckLayout,
    deck: &'a [Card],
    area: &'a mut PlayArea,
    cursor: usize,
    offset: usize,
    discarded: usize,
    steps: usize,
    finished: bool,
}

impl<'a> Game<'a> {
    /// Starts a trial on `deck`, clearing whatever `area` held before.
    pub fn new(layout: DeckLayout, deck: &'a Deck, area: &'a mut PlayArea) -> Self {
        debug_assert_eq!(deck.len(), layout.deck_size());
        debug_assert_eq!(area.capacity(), deck.len());
        area.reset();
        Self {
            layout,
            deck: deck.cards(),
            area,
            cursor: 0,
            offset: 0,
            discarded: 0,
            steps: 0,
            finished: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn area(&self) -> &PlayArea {
        &*self.area
    }

    pub fn undealt(&self) -> usize {
        self.deck.len() - self.cursor
    }

    /// Every card is either undealt, in play, or discarded.
    pub fn is_conserved(&self) -> bool {
        self.undealt() + self.area.in_play() + self.discarded == self.deck.len()
    }

    pub fn outcome(&self) -> TrialOutcome {
        TrialOutcome {
            discarded: self.discarded,
            deck_size: self.deck.len(),
            steps: self.steps,
        }
    }

    /// Plays to the end and reports the result.
    pub fn run(mut self) -> TrialOutcome {
        while self.step() != Step::Exhausted {}
        self.outcome()
    }

    /// One deal-and-compare round.
    pub fn step(&mut self) -> Step {
        if self.finished {
            return Step::Exhausted;
        }
        self.steps += 1;
        if self.deck_exhausted() {
            return self.finish();
        }

        for i in 0..WINDOW {
            let slot = self.offset + i;
            if self.area.slots[slot].is_none() {
                self.deal(slot);
            }
            if self.deck_exhausted() && i != WINDOW - 1 {
                return self.finish();
            }
        }

        let offset = self.offset;
        let (Some(first), Some(last)) = (self.area.slots[offset], self.area.slots[offset + 3])
        else {
            unreachable!("window at offset {offset} is not fully dealt");
        };
        trace!(
            offset,
            hand = %format_area(&*self.area, &self.layout),
            "comparing window"
        );

        let step = if self.layout.same_suit(first, last) {
            self.area.slots[offset + 1] = Some(last);
            self.area.slots[offset + 2] = None;
            self.area.slots[offset + 3] = None;
            self.discarded += 2;
            self.offset = if offset > 2 { offset - 2 } else { 0 };
            Step::SuitCollapse
        } else if self.layout.same_face(first, last) {
            self.area.slots[offset..offset + WINDOW].fill(None);
            self.discarded += 4;
            self.offset = if offset > 4 { offset - 4 } else { 0 };
            Step::FaceCollapse
        } else {
            if self.deck_exhausted() {
                return self.finish();
            }
            self.deal(offset + WINDOW);
            self.offset += 1;
            Step::Advance
        };
        trace!(?step, discarded = self.discarded, "window resolved");
        step
    }

    fn deck_exhausted(&self) -> bool {
        self.cursor == self.deck.len()
    }

    fn deal(&mut self, slot: usize) {
        self.area.slots[slot] = Some(self.deck[self.cursor]);
        self.cursor += 1;
    }

    fn finish(&mut self) -> Step {
        self.finished = true;
        trace!(discarded = self.discarded, "deck exhausted");
        Step::Exhausted
    }
}

/// Plays one trial on an already shuffled deck.
pub fn play_trial(layout: DeckLayout, deck: &Deck, area: &mut PlayArea) -> TrialOutcome {
    Game::new(layout, deck, area).run()
}
