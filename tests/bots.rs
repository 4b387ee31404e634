use blackjack_rs::agents::{decide, strategy_move, Action, AgentTable, BotAgent, BotProfile, HumanAgent, PlayerAgent};
use blackjack_rs::cards::parse_cards;
use blackjack_rs::hand::HandStatus;
use blackjack_rs::money::Money;
use blackjack_rs::player::{Player, PlayerKind, Seat};
use blackjack_rs::settings::GameSettings;
use blackjack_rs::shoe::Shoe;
use blackjack_rs::strategy::Move;
use blackjack_rs::table::{Phase, Table};

fn seat(n: u8) -> Seat {
    Seat::new(n).unwrap()
}

fn mk_table(cards: &str, bankrolls: &[u64]) -> Table {
    let shoe = Shoe::stacked(6, &parse_cards(cards).unwrap()).unwrap();
    let mut t = Table::with_shoe(GameSettings::default(), shoe).unwrap();
    for (i, &b) in bankrolls.iter().enumerate() {
        let s = seat(i as u8 + 1);
        t.seat_player(Player::new(format!("AI {s}"), s, PlayerKind::Ai, Money::from_dollars(b)))
            .unwrap();
    }
    t
}

fn bot() -> BotAgent {
    BotAgent::new(BotProfile::default().with_seed(7))
}

/// Let agents act and advance the table whenever nobody owes a decision.
fn play_round(t: &mut Table, agents: &mut AgentTable) {
    for _ in 0..64 {
        if t.phase() == Phase::Settlement {
            return;
        }
        let acted = agents.on_turn(t).unwrap();
        if !acted && t.pending_seats().is_empty() {
            t.advance_phase().unwrap();
        }
    }
    panic!("round did not settle; stuck in {}", t.phase());
}

#[test]
fn seat_without_a_decision_is_a_noop() {
    let mut t = mk_table("", &[100]);
    t.place_bet(seat(1), Money::from_dollars(20)).unwrap();
    let mut b = bot();
    assert!(!b.on_turn(&mut t, seat(1)).unwrap());
    assert_eq!(t.player(seat(1)).unwrap().total_bet(), Money::from_dollars(20));
}

#[test]
fn bot_bets_the_table_minimum() {
    let mut t = mk_table("", &[100]);
    assert_eq!(decide(&t, seat(1)), Some(Action::Bet(Money::from_dollars(5))));
    let mut b = bot();
    assert!(b.on_turn(&mut t, seat(1)).unwrap());
    assert_eq!(t.player(seat(1)).unwrap().total_bet(), Money::from_dollars(5));
}

#[test]
fn bot_declines_insurance() {
    let mut t = mk_table("9s Ah 7d 5c", &[100]);
    t.place_bet(seat(1), Money::from_dollars(10)).unwrap();
    t.advance_phase().unwrap();
    assert_eq!(t.advance_phase().unwrap(), Phase::InsuranceOffer);
    let mut b = bot();
    assert!(b.on_turn(&mut t, seat(1)).unwrap());
    assert!(t.pending_seats().is_empty());
    assert_eq!(t.player(seat(1)).unwrap().insurance(), None);
}

#[test]
fn split_falls_back_when_unaffordable() {
    // 8s 8h vs 7d; a $10 bankroll cannot cover the split
    let mut t = mk_table("8s 7d 8h Kc", &[10]);
    t.place_bet(seat(1), Money::from_dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(strategy_move(&t), Some(Move::Hit));

    let mut t = mk_table("8s 7d 8h Kc", &[100]);
    t.place_bet(seat(1), Money::from_dollars(10)).unwrap();
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();
    assert_eq!(strategy_move(&t), Some(Move::Split));
}

#[test]
fn bots_play_a_full_round() {
    // seat 1 Ts 6h hits into Qd; seat 2 Tc 9h stands; dealer 7d Ks
    let mut t = mk_table("Ts Tc 7d 6h 9h Ks Qd", &[100, 100]);
    let mut agents = AgentTable::default();
    agents.set_agent(seat(1), Some(Box::new(bot())));
    agents.set_agent(seat(2), Some(Box::new(bot())));
    play_round(&mut t, &mut agents);

    let first = &t.player(seat(1)).unwrap().hands()[0];
    assert_eq!(first.len(), 3);
    assert_eq!(first.status(), HandStatus::Lost);
    let second = &t.player(seat(2)).unwrap().hands()[0];
    assert_eq!(second.status(), HandStatus::Won);
    assert_eq!(t.player(seat(2)).unwrap().bankroll(), Money::from_dollars(105));
}

#[test]
fn human_and_bot_share_a_table() {
    let mut t = mk_table("Ts Tc 7d 9s 9h Ks", &[100, 100]);
    let mut agents = AgentTable::default();
    agents.set_agent(seat(1), Some(Box::new(HumanAgent::new())));
    agents.set_agent(seat(2), Some(Box::new(bot())));

    // the bot bets; the human is still thinking
    assert!(agents.on_turn(&mut t).unwrap());
    assert_eq!(t.pending_seats(), vec![seat(1)]);
    assert!(agents.receive(seat(1), Action::Bet(Money::from_dollars(25))));
    assert!(agents.on_turn(&mut t).unwrap());
    t.advance_phase().unwrap();
    t.advance_phase().unwrap();

    // human's turn first; the bot waits behind it
    assert_eq!(t.current_seat(), Some(seat(1)));
    assert!(!agents.on_turn(&mut t).unwrap());
    agents.receive(seat(1), Action::Stand);
    play_round(&mut t, &mut agents);
    assert_eq!(t.player(seat(1)).unwrap().bankroll(), Money::from_dollars(125));
}
