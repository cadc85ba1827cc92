use quartet_core::{
    play_trial, simulate, CancelFlag, Card, Deck, DeckLayout, Game, PlayArea, SimConfig, Step,
};

macro_rules! first_step_case {
    ($name:ident, $suits:expr, $faces:expr, $prefix:expr, $step:expr, $discarded:expr, $offset:expr) => {
        #[test]
        fn $name() {
            let layout = DeckLayout::new($suits, $faces);
            let deck = deck_with_prefix(&layout, &$prefix);
            let mut area = PlayArea::new(layout.deck_size());
            let mut game = Game::new(layout, &deck, &mut area);
            assert_eq!(game.step(), $step);
            assert_eq!(game.discarded(), $discarded);
            assert_eq!(game.offset(), $offset);
            assert!(game.is_conserved());
        }
    };
}

macro_rules! outcome_case {
    ($name:ident, $suits:expr, $faces:expr, $order:expr, $discarded:expr, $win:expr) => {
        #[test]
        fn $name() {
            let layout = DeckLayout::new($suits, $faces);
            let deck = Deck::from_order(&$order);
            let mut area = PlayArea::new(layout.deck_size());
            let outcome = play_trial(layout, &deck, &mut area);
            assert_eq!(outcome.discarded, $discarded);
            assert_eq!(outcome.is_win(), $win);
        }
    };
}

fn deck_with_prefix(layout: &DeckLayout, prefix: &[u32]) -> Deck {
    let mut order = prefix.to_vec();
    order.extend((0..layout.deck_size() as u32).filter(|code| !prefix.contains(code)));
    Deck::from_order(&order)
}

first_step_case!(first_step_suit_2x2, 2, 2, [0, 1, 3, 2], Step::SuitCollapse, 2, 0);
first_step_case!(first_step_face_5x4, 5, 4, [0, 1, 2, 4], Step::FaceCollapse, 4, 0);
first_step_case!(first_step_advance_4x13, 4, 13, [0, 1, 2, 3], Step::Advance, 0, 1);
first_step_case!(first_step_suit_4x13, 4, 13, [0, 1, 2, 4], Step::SuitCollapse, 2, 0);
first_step_case!(first_step_face_4x13, 4, 13, [0, 1, 2, 13], Step::FaceCollapse, 4, 0);
first_step_case!(first_step_both_3x6, 3, 6, [0, 1, 2, 6], Step::SuitCollapse, 2, 0);

outcome_case!(outcome_2x2_suit_then_exhausted, 2, 2, [0, 1, 3, 2], 2, false);
outcome_case!(outcome_2x2_no_match, 2, 2, [0, 1, 2, 3], 0, false);
outcome_case!(outcome_4x1_clears, 4, 1, [3, 1, 0, 2], 4, true);
outcome_case!(outcome_1x2_too_short, 1, 2, [1, 0], 0, false);
// [0,1,2,5] advances, [1,2,5,3] collapses to [0,1,3], [0,1,3,4] collapses to [0,4].
outcome_case!(outcome_2x3_chain, 2, 3, [0, 1, 2, 5, 3, 4], 4, false);
outcome_case!(outcome_2x3_face_then_short, 2, 3, [0, 1, 2, 3, 5, 4], 4, false);

#[test]
fn suit_collapse_moves_the_last_card_left() {
    let layout = DeckLayout::new(2, 2);
    let deck = Deck::from_order(&[0, 1, 3, 2]);
    let mut area = PlayArea::new(4);
    let mut game = Game::new(layout, &deck, &mut area);
    game.step();
    assert_eq!(game.area().slots()[1], Some(Card(2)));
    assert_eq!(game.area().in_play(), 2);
}

#[test]
fn offset_never_steps_below_zero_after_face_collapse() {
    // Two advances put the offset at 2; a face match there must clamp to 0.
    let layout = DeckLayout::standard52();
    let deck = deck_with_prefix(&layout, &[0, 1, 2, 3, 6, 15]);
    let mut area = PlayArea::new(layout.deck_size());
    let mut game = Game::new(layout, &deck, &mut area);
    assert_eq!(game.step(), Step::Advance);
    assert_eq!(game.step(), Step::Advance);
    assert_eq!(game.offset(), 2);
    assert_eq!(game.step(), Step::FaceCollapse);
    assert_eq!(game.offset(), 0);
    assert_eq!(game.discarded(), 4);
    assert!(game.is_conserved());
}

// The reference program clears about 0.53% of standard deals.
const REFERENCE_RATE_BAND: std::ops::Range<f64> = 0.3..0.8;

#[test]
fn seeded_standard_batches_match_the_reference_rate() {
    let rate = |seed: u64| {
        let config = SimConfig {
            trials: 20_000,
            workers: Some(2),
            seed: Some(seed),
            ..SimConfig::default()
        };
        simulate(&config, &CancelFlag::new())
            .expect("simulate")
            .win_rate_percent()
    };
    let first = rate(1);
    let second = rate(2);
    for value in [first, second] {
        assert!(
            REFERENCE_RATE_BAND.contains(&value),
            "win rate {value:.2}% outside {REFERENCE_RATE_BAND:?}"
        );
    }
    assert!(
        (first - second).abs() < 0.3,
        "batches diverged: {first:.2}% vs {second:.2}%"
    );
}
