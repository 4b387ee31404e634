//! blackjack-rs: multi-deck casino blackjack engine
//!
//! Goals:
//! - Deterministic rounds when the shoe is seeded or stacked
//! - Integer-cent money; no floating point in payouts
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play one round
//! ```
//! use blackjack_rs::cards::parse_cards;
//! use blackjack_rs::hand::HandStatus;
//! use blackjack_rs::money::Money;
//! use blackjack_rs::player::{Player, PlayerKind, Seat};
//! use blackjack_rs::settings::GameSettings;
//! use blackjack_rs::shoe::Shoe;
//! use blackjack_rs::table::{Phase, Table};
//!
//! // player gets Th 9c, dealer shows 7d with Ks in the hole
//! let shoe = Shoe::stacked(6, &parse_cards("Th 7d 9c Ks")?)?;
//! let mut table = Table::with_shoe(GameSettings::default(), shoe)?;
//! let seat = Seat::new(1)?;
//! table.seat_player(Player::new("You", seat, PlayerKind::Human, Money::from_dollars(100)))?;
//!
//! table.place_bet(seat, Money::from_dollars(10))?;
//! assert_eq!(table.advance_phase()?, Phase::Dealing);
//! assert_eq!(table.advance_phase()?, Phase::PlayerActions);
//! table.stand()?;
//! assert_eq!(table.advance_phase()?, Phase::DealerAction);
//! assert_eq!(table.advance_phase()?, Phase::Settlement);
//!
//! let you = table.player(seat).unwrap();
//! assert_eq!(you.hands()[0].status(), HandStatus::Won);
//! assert_eq!(you.bankroll(), Money::from_dollars(110));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin blackjack-rs
//! ```

pub mod agents;
pub mod cards;
pub mod dealer;
pub mod engine;
pub mod evaluator;
pub mod hand;
pub mod money;
pub mod player;
pub mod rules;
pub mod settings;
pub mod shoe;
pub mod storage;
pub mod strategy;
pub mod table;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
