use blackjack_rs::cards::parse_cards;
use blackjack_rs::money::Money;
use blackjack_rs::player::{Player, PlayerKind, Seat};
use blackjack_rs::settings::GameSettings;
use blackjack_rs::shoe::Shoe;
use blackjack_rs::table::{Phase, Table, TableError};

fn seat(n: u8) -> Seat {
    Seat::new(n).unwrap()
}

#[test]
fn broke_players_sit_out_next_round() {
    // seat 1 Ts 6h (16), seat 2 9s Td (19), dealer 7d Tc
    let shoe = Shoe::stacked(6, &parse_cards("Ts 9s 7d 6h Td Tc").unwrap()).unwrap();
    let mut t = Table::with_shoe(GameSettings::default(), shoe).unwrap();
    t.seat_player(Player::new("Short", seat(1), PlayerKind::Ai, Money::from_dollars(10))).unwrap();
    t.seat_player(Player::new("Deep", seat(2), PlayerKind::Ai, Money::from_dollars(100))).unwrap();
    t.place_bet(seat(1), Money::from_dollars(10)).unwrap();
    t.place_bet(seat(2), Money::from_dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    t.stand().unwrap();
    t.stand().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);

    let short = t.player(seat(1)).unwrap();
    assert_eq!(short.bankroll(), Money::ZERO);
    assert!(!short.is_active());

    assert_eq!(t.advance_phase().unwrap(), Phase::Betting);
    assert!(!t.is_decision_due(seat(1)));
    assert_eq!(t.pending_seats(), vec![seat(2)]);
    assert_eq!(
        t.place_bet(seat(1), Money::from_dollars(5)),
        Err(TableError::PlayerInactive(seat(1)))
    );
    assert!(t.player(seat(2)).unwrap().is_active());
}

#[test]
fn seated_below_minimum_starts_inactive() {
    let mut t = Table::with_seed(GameSettings::default(), 1).unwrap();
    t.seat_player(Player::new("Low", seat(3), PlayerKind::Human, Money::from_dollars(3))).unwrap();
    assert!(!t.player(seat(3)).unwrap().is_active());
    assert!(t.pending_seats().is_empty());
    assert_eq!(t.advance_phase(), Err(TableError::NoBets));
}
