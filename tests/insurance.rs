use blackjack_rs::cards::parse_cards;
use blackjack_rs::hand::HandStatus;
use blackjack_rs::money::Money;
use blackjack_rs::player::{Player, PlayerKind, Seat};
use blackjack_rs::rules::RulesError;
use blackjack_rs::settings::GameSettings;
use blackjack_rs::shoe::Shoe;
use blackjack_rs::table::{Phase, Table, TableError};

fn dollars(d: u64) -> Money {
    Money::from_dollars(d)
}

fn seat(n: u8) -> Seat {
    Seat::new(n).unwrap()
}

/// One $10 bettor with $100, dealt and waiting at the insurance offer.
fn offered(cards: &str) -> Table {
    let shoe = Shoe::stacked(6, &parse_cards(cards).unwrap()).unwrap();
    let mut t = Table::with_shoe(GameSettings::default(), shoe).unwrap();
    t.seat_player(Player::new("P1", seat(1), PlayerKind::Human, dollars(100))).unwrap();
    t.place_bet(seat(1), dollars(10)).unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::InsuranceOffer);
    t
}

#[test]
fn insurance_pays_two_to_one_on_dealer_blackjack() {
    // player 9s 7d, dealer Ah up with Kc in the hole
    let mut t = offered("9s Ah 7d Kc");
    assert!(t.insurance_pending(seat(1)));
    assert_eq!(t.take_insurance(seat(1)).unwrap(), dollars(5));
    assert!(!t.insurance_pending(seat(1)));
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(85));

    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    assert!(t.dealer().hole_revealed());
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Lost);
    assert_eq!(p.bankroll(), dollars(100));
    assert_eq!(t.last_summary().unwrap().net_for(seat(1)), 0);
}

#[test]
fn insurance_is_lost_when_dealer_has_no_blackjack() {
    // dealer Ah 5c; dealer draws Ts then 2c to 18
    let mut t = offered("9s Ah 7d 5c Ts 2c");
    t.take_insurance(seat(1)).unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::PlayerActions);
    assert!(!t.dealer().hole_revealed());
    assert_eq!(t.player(seat(1)).unwrap().insurance(), Some(dollars(5)));
    t.stand().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.dealer().total(), 18);
    t.advance_phase().unwrap();
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(85));
    assert_eq!(t.last_summary().unwrap().net_for(seat(1)), -1500);
}

#[test]
fn declining_moves_on_to_play() {
    let mut t = offered("9s Ah 7d 5c");
    t.decline_insurance(seat(1)).unwrap();
    assert!(t.pending_seats().is_empty());
    assert_eq!(t.decline_insurance(seat(1)), Err(TableError::InsuranceNotOffered(seat(1))));
    assert_eq!(t.take_insurance(seat(1)), Err(TableError::InsuranceNotOffered(seat(1))));
    assert_eq!(t.advance_phase().unwrap(), Phase::PlayerActions);
    assert_eq!(t.player(seat(1)).unwrap().insurance(), None);
}

#[test]
fn insurance_is_bought_once() {
    let mut t = offered("9s Ah 7d 5c");
    t.take_insurance(seat(1)).unwrap();
    assert_eq!(t.take_insurance(seat(1)), Err(TableError::InsuranceNotOffered(seat(1))));
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(85));
}

#[test]
fn even_money_settles_a_natural_immediately() {
    // player As Kd, dealer Ah 5c
    let mut t = offered("As Ah Kd 5c");
    assert!(t.insurance_pending(seat(1)));
    assert_eq!(t.accept_even_money(seat(1)).unwrap(), dollars(20));
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Won);
    assert_eq!(p.bankroll(), dollars(110));

    assert_eq!(t.advance_phase().unwrap(), Phase::PlayerActions);
    assert_eq!(t.current_turn(), None);
    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    assert_eq!(t.dealer().hand().len(), 2);
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(110));
}

#[test]
fn declined_even_money_still_pays_three_to_two() {
    let mut t = offered("As Ah Kd 5c");
    t.decline_insurance(seat(1)).unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(115));
}

#[test]
fn two_naturals_push() {
    let mut t = offered("As Ah Kd Kc");
    t.decline_insurance(seat(1)).unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Push);
    assert_eq!(p.bankroll(), dollars(100));
}

#[test]
fn even_money_needs_a_natural() {
    let mut t = offered("9s Ah 7d 5c");
    assert_eq!(
        t.accept_even_money(seat(1)),
        Err(TableError::Rules(RulesError::CannotTakeEvenMoney))
    );
}

#[test]
fn ten_up_peeks_without_an_offer() {
    // player 9s 7d, dealer Td Ac
    let mut t = offered("9s Td 7d Ac");
    assert!(!t.insurance_pending(seat(1)));
    assert!(t.pending_seats().is_empty());
    assert_eq!(t.take_insurance(seat(1)), Err(TableError::Rules(RulesError::CannotInsure)));
    assert_eq!(t.decline_insurance(seat(1)), Err(TableError::InsuranceNotOffered(seat(1))));

    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    let summary = t.last_summary().unwrap();
    assert!(summary.dealer_blackjack);
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(90));
}

#[test]
fn insurance_only_during_the_offer() {
    let shoe = Shoe::stacked(6, &parse_cards("9s Ah 7d 5c").unwrap()).unwrap();
    let mut t = Table::with_shoe(GameSettings::default(), shoe).unwrap();
    t.seat_player(Player::new("P1", seat(1), PlayerKind::Human, dollars(100))).unwrap();
    assert!(matches!(t.take_insurance(seat(1)), Err(TableError::WrongPhase { .. })));
}

#[test]
fn natural_is_offered_even_money_not_insurance() {
    // player As Kd, dealer Ah 5c
    let mut t = offered("As Ah Kd 5c");
    assert!(t.insurance_pending(seat(1)));
    assert_eq!(t.take_insurance(seat(1)), Err(TableError::Rules(RulesError::CannotInsure)));
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.insurance(), None);
    assert_eq!(p.bankroll(), dollars(90));
    // the offer is still open for even money
    assert!(t.insurance_pending(seat(1)));
    assert_eq!(t.accept_even_money(seat(1)).unwrap(), dollars(20));
}
