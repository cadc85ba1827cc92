use serde::{Deserialize, Serialize};

pub const STANDARD_SUITS: u32 = 4;
pub const STANDARD_FACES: u32 = 13;

/// Shape of the deck. Every card code in `0..deck_size()` derives both its
/// suit and its face from the same integer, so two codes may share a suit,
/// a face, both, or neither.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DeckLayout {
    pub suit_count: u32,
    pub face_count: u32,
}

impl DeckLayout {
    pub const fn new(suit_count: u32, face_count: u32) -> Self {
        Self {
            suit_count,
            face_count,
        }
    }

    pub const fn standard52() -> Self {
        Self::new(STANDARD_SUITS, STANDARD_FACES)
    }

    /// Number of cards, `None` when the product does not fit a card code.
    pub fn checked_deck_size(&self) -> Option<u32> {
        self.suit_count.checked_mul(self.face_count)
    }

    pub fn deck_size(&self) -> usize {
        self.suit_count as usize * self.face_count as usize
    }

    pub fn same_suit(&self, a: Card, b: Card) -> bool {
        a.suit(self) == b.suit(self)
    }

    pub fn same_face(&self, a: Card, b: Card) -> bool {
        a.face(self) == b.face(self)
    }
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self::standard52()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(pub u32);

impl Card {
    pub fn code(self) -> u32 {
        self.0
    }

    pub fn suit(self, layout: &DeckLayout) -> u32 {
        self.0 % layout.suit_count
    }

    pub fn face(self, layout: &DeckLayout) -> u32 {
        self.0 % layout.face_count
    }
}
