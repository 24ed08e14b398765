// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all4
// ...
// Total hands      270725
//
// High Card:       177660
// Pair:            78408
// Two Pair:        6768
// Three of a Kind: 2496
// Straight:        2520
// Flush:           2820
// Full House:      0
// Four of a Kind:  13
// Straight Flush:  40
// Royal Flush:     0
// ```

use std::time::Instant;

use fourflush_eval::{Deck, HandCategory};

fn main() {
    // Evaluate all 4 cards hands.
    let now = Instant::now();
    let mut counts = [0usize; 11];

    Deck::default().for_each_hand(|hand| {
        let category = HandCategory::evaluate(hand);
        counts[category.value() as usize] += 1;
    });

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for category in HandCategory::categories() {
        let label = format!("{}:", category.label());
        println!("{label:<17}{}", counts[category.value() as usize]);
    }
}
