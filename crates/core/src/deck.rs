use crate::{Card, DeckLayout, EntropyError, EntropySource};

/// The full set of card codes for one layout. Allocated once per runner and
/// only ever permuted in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(layout: &DeckLayout) -> Self {
        let cards = (0..layout.deck_size() as u32).map(Card).collect();
        Self { cards }
    }

    /// A deck dealt in exactly the given order.
    pub fn from_order(order: &[u32]) -> Self {
        Self {
            cards: order.iter().copied().map(Card).collect(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Fisher-Yates shuffle with one bulk entropy draw per call.
///
/// Each raw 32-bit value is reduced with `value % range`. For ranges that
/// are not powers of two this slightly favours low indices; at deck sizes
/// this small the skew is far below the sampling noise, and the reduction
/// is kept so estimates stay comparable across implementations.
#[derive(Debug, Default, Clone)]
pub struct Shuffler {
    buffer: Vec<u32>,
}

impl Shuffler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(deck_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(deck_size),
        }
    }

    pub fn shuffle<T, S>(&mut self, items: &mut [T], source: &mut S) -> Result<(), EntropyError>
    where
        S: EntropySource + ?Sized,
    {
        let len = items.len();
        self.buffer.resize(len, 0);
        source.fill(&mut self.buffer)?;
        for (i, raw) in self.buffer.iter().enumerate() {
            let range = len - i;
            let index = (*raw as usize) % range;
            items.swap(index, range - 1);
        }
        Ok(())
    }

    pub fn shuffle_deck<S>(&mut self, deck: &mut Deck, source: &mut S) -> Result<(), EntropyError>
    where
        S: EntropySource + ?Sized,
    {
        self.shuffle(deck.cards_mut(), source)
    }
}
