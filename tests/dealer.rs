use durakrs::{DealError, Dealer, DeckFactory};
use proptest::prelude::*;

fn sorted(mut items: Vec<u32>) -> Vec<u32> {
    items.sort_unstable();
    items
}

#[test]
fn shuffle_requires_at_least_one_pass() {
    let mut dealer = Dealer::new(0);
    assert_eq!(
        dealer.shuffle(vec![1, 2, 3], 0).unwrap_err(),
        DealError::InvalidShuffleTimes
    );
}

#[test]
fn same_seed_shuffles_identically() {
    let deck: Vec<u32> = (0..36).collect();
    let first = Dealer::new(99).shuffle(deck.clone(), 3).unwrap();
    let second = Dealer::new(99).shuffle(deck, 3).unwrap();
    assert_eq!(first, second);
}

#[test]
fn single_card_batches_alternate_hands() {
    let deck: Vec<u32> = (0..10).collect();
    let deal = Dealer::deal_hands(deck, 2, 3).unwrap();
    assert_eq!(deal.stock, [6, 7, 8, 9]);
    assert_eq!(deal.hands, [vec![0, 2, 4], vec![1, 3, 5]]);
}

#[test]
fn batches_arrive_in_reverse_deck_order() {
    let deck: Vec<u32> = (0..8).collect();
    let deal = Dealer::deal(deck, 2, 4, 2, -1).unwrap();
    assert!(deal.stock.is_empty());
    assert_eq!(deal.hands, [vec![1, 0, 5, 4], vec![3, 2, 7, 6]]);
}

#[test]
fn positive_offset_anchors_stock_mid_deck() {
    let deck: Vec<u32> = (0..10).collect();
    let deal = Dealer::deal(deck, 2, 3, 1, 2).unwrap();
    assert_eq!(deal.stock, [2, 3, 4, 5]);
    assert_eq!(deal.hands, [vec![0, 6, 8], vec![1, 7, 9]]);
}

#[test]
fn preferans_deal_withholds_a_two_card_talon() {
    let factory = DeckFactory::new(7, 0).unwrap();
    assert_eq!(factory.card_count(), 32);
    let mut dealer = Dealer::new(5);
    let deck = dealer.shuffle(factory.generate(), 3).unwrap();
    let full: Vec<_> = deck.clone();
    let deal = Dealer::deal(deck, 3, 10, 2, -3).unwrap();
    assert_eq!(deal.stock.len(), 2);
    assert_eq!(deal.stock, full[28..30]);
    assert_eq!(deal.hands.iter().map(Vec::len).collect::<Vec<_>>(), [10, 10, 10]);
    let mut together: Vec<_> = deal.stock;
    for hand in deal.hands {
        together.extend(hand);
    }
    let mut expected = full;
    expected.sort_unstable_by_key(|card| card.code());
    together.sort_unstable_by_key(|card| card.code());
    assert_eq!(together, expected);
}

#[test]
fn deal_validates_its_arguments() {
    let deck: Vec<u32> = (0..10).collect();
    assert_eq!(
        Dealer::deal(deck.clone(), 0, 3, 1, -1).unwrap_err(),
        DealError::InvalidHandCount
    );
    assert_eq!(
        Dealer::deal(deck.clone(), 2, 0, 1, -1).unwrap_err(),
        DealError::InvalidCardsPerHand
    );
    assert_eq!(
        Dealer::deal(deck.clone(), 2, 3, 0, -1).unwrap_err(),
        DealError::InvalidCardsPerBatch
    );
    assert_eq!(
        Dealer::deal(deck.clone(), 2, 3, 4, -1).unwrap_err(),
        DealError::InvalidCardsPerBatch
    );
    assert_eq!(
        Dealer::deal(deck, 3, 4, 1, -1).unwrap_err(),
        DealError::InsufficientCards
    );
}

#[test]
fn oversized_requests_do_not_overflow() {
    let deck: Vec<u32> = (0..10).collect();
    assert_eq!(
        Dealer::deal(deck.clone(), usize::MAX, 2, 1, -1).unwrap_err(),
        DealError::InsufficientCards
    );
    assert_eq!(
        Dealer::deal(deck, 2, usize::MAX, 2, -1).unwrap_err(),
        DealError::InsufficientCards
    );
}

#[test]
fn stock_must_fit_inside_the_deck() {
    let deck: Vec<u32> = (0..10).collect();
    assert_eq!(
        Dealer::deal(deck.clone(), 2, 3, 1, -8).unwrap_err(),
        DealError::InvalidStockOffset
    );
    assert_eq!(
        Dealer::deal(deck, 2, 3, 1, 7).unwrap_err(),
        DealError::InvalidStockOffset
    );
}

proptest! {
    #[test]
    fn shuffle_permutes_the_deck(seed in any::<u64>(), len in 1usize..60, times in 1usize..4) {
        let deck: Vec<u32> = (0..len as u32).collect();
        let shuffled = Dealer::new(seed).shuffle(deck.clone(), times).unwrap();
        prop_assert_eq!(sorted(shuffled), deck);
    }

    #[test]
    fn deal_partitions_the_deck(
        hands in 1usize..5,
        cards_per_hand in 1usize..6,
        stock_len in 0usize..8,
    ) {
        let deck: Vec<u32> = (0..(hands * cards_per_hand + stock_len) as u32).collect();
        let deal = Dealer::deal_hands(deck.clone(), hands, cards_per_hand).unwrap();
        prop_assert_eq!(deal.stock.len(), stock_len);
        let mut together = deal.stock;
        for hand in deal.hands {
            prop_assert_eq!(hand.len(), cards_per_hand);
            together.extend(hand);
        }
        prop_assert_eq!(sorted(together), deck);
    }
}
