use blackjack_rs::cards::parse_cards;
use blackjack_rs::hand::HandStatus;
use blackjack_rs::money::{format_net, Money, PayoutRatio};
use blackjack_rs::player::{Player, PlayerKind, Seat};
use blackjack_rs::rules::{blackjack_payout, even_money_payout, insurance_payout, push_payout, win_payout};
use blackjack_rs::settings::GameSettings;
use blackjack_rs::shoe::Shoe;
use blackjack_rs::table::{Phase, Table};

fn dollars(d: u64) -> Money {
    Money::from_dollars(d)
}

fn seat(n: u8) -> Seat {
    Seat::new(n).unwrap()
}

fn one_seat_table(settings: GameSettings, cards: &str) -> Table {
    let shoe = Shoe::stacked(settings.number_of_decks, &parse_cards(cards).unwrap()).unwrap();
    let mut t = Table::with_shoe(settings, shoe).unwrap();
    t.seat_player(Player::new("P1", seat(1), PlayerKind::Human, dollars(100))).unwrap();
    t
}

#[test]
fn payout_amounts_include_the_stake() {
    assert_eq!(blackjack_payout(dollars(10), PayoutRatio::THREE_TO_TWO), dollars(25));
    assert_eq!(insurance_payout(dollars(5), PayoutRatio::TWO_TO_ONE), dollars(15));
    assert_eq!(push_payout(dollars(25)), dollars(25));
    assert_eq!(win_payout(dollars(10)), dollars(20));
    assert_eq!(even_money_payout(dollars(10)), dollars(20));
}

#[test]
fn fractional_payouts_floor_to_the_cent() {
    assert_eq!(blackjack_payout(dollars(5), PayoutRatio::THREE_TO_TWO), Money::from_cents(1250));
    assert_eq!(blackjack_payout(dollars(10), PayoutRatio::SIX_TO_FIVE), dollars(22));
    assert_eq!(
        blackjack_payout(Money::from_cents(1001), PayoutRatio::THREE_TO_TWO),
        Money::from_cents(1001 + 1501)
    );
}

#[test]
fn natural_is_paid_before_player_actions() {
    // player As Kd, dealer 7c up 9h in the hole
    let mut t = one_seat_table(GameSettings::default(), "As 7c Kd 9h");
    t.place_bet(seat(1), dollars(10)).unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::PlayerActions);
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Blackjack);
    assert_eq!(p.bankroll(), dollars(115));
    assert_eq!(t.current_turn(), None);

    // nothing standing, so the dealer never draws
    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    assert_eq!(t.dealer().hand().len(), 2);
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(115));
    let summary = t.last_summary().unwrap();
    assert_eq!(format_net(summary.net_for(seat(1))), "+$15");
}

#[test]
fn six_to_five_table_pays_less() {
    let mut settings = GameSettings::default();
    settings.blackjack_payout = PayoutRatio::SIX_TO_FIVE;
    let mut t = one_seat_table(settings, "As 7c Kd 9h");
    t.place_bet(seat(1), dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(112));
}

#[test]
fn equal_totals_push() {
    // player Ts 8d, dealer 9c 9h
    let mut t = one_seat_table(GameSettings::default(), "Ts 9c 8d 9h");
    t.place_bet(seat(1), dollars(25)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    t.stand().unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::DealerAction);
    assert_eq!(t.advance_phase().unwrap(), Phase::Settlement);
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Push);
    assert_eq!(p.hands()[0].payout(), Some(dollars(25)));
    assert_eq!(p.bankroll(), dollars(100));
    assert_eq!(t.last_summary().unwrap().net_for(seat(1)), 0);
}

#[test]
fn dealer_bust_pays_standing_hands() {
    // player Ts 2d (12), dealer 6c Th, dealer draws 9s
    let mut t = one_seat_table(GameSettings::default(), "Ts 6c 2d Th 9s");
    t.place_bet(seat(1), dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    t.stand().unwrap();
    t.advance_phase().unwrap();
    assert!(t.dealer().is_busted());
    t.advance_phase().unwrap();
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].status(), HandStatus::Won);
    assert_eq!(p.bankroll(), dollars(110));
}

#[test]
fn doubled_hand_wins_twice_the_bet() {
    // player 6s 5d (11) doubles onto a Ten; dealer 9c 8h
    let mut t = one_seat_table(GameSettings::default(), "6s 9c 5d 8h Td");
    t.place_bet(seat(1), dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    assert!(t.can_double());
    let card = t.double_down().unwrap();
    assert_eq!(card.to_string(), "Td");
    let p = t.player(seat(1)).unwrap();
    assert_eq!(p.hands()[0].bet(), dollars(20));
    assert_eq!(p.hands()[0].status(), HandStatus::Standing);
    assert_eq!(p.bankroll(), dollars(80));
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), dollars(120));
}
