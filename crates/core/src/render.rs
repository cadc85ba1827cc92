//! Human-readable card rendering for diagnostics.

use crate::{Card, DeckLayout, PlayArea};

const FACE_SYMBOLS: [&str; 13] = [
    "A", "2", "3", "4", "5", "6", "7", "8", "9", "~", "J", "Q", "K",
];
const SUIT_SYMBOLS: [&str; 4] = ["H", "D", "C", "S"];
const EMPTY_SLOT: &str = "__";
const UNKNOWN: &str = "_";

pub fn format_card(card: Card, layout: &DeckLayout) -> String {
    let face = FACE_SYMBOLS
        .get(card.face(layout) as usize)
        .copied()
        .unwrap_or(UNKNOWN);
    let suit = SUIT_SYMBOLS
        .get(card.suit(layout) as usize)
        .copied()
        .unwrap_or(UNKNOWN);
    format!("{face}{suit}")
}

pub fn format_slot(slot: Option<Card>, layout: &DeckLayout) -> String {
    match slot {
        Some(card) => format_card(card, layout),
        None => EMPTY_SLOT.to_string(),
    }
}

pub fn format_area(area: &PlayArea, layout: &DeckLayout) -> String {
    area.slots()
        .iter()
        .map(|slot| format_slot(*slot, layout))
        .collect::<Vec<_>>()
        .join(" ")
}
