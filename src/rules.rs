//! Action legality, payouts and settlement.
//!
//! Predicates never mutate. Every mutating operation checks its predicate
//! (and that the shoe can supply the cards it needs) before touching any
//! state, so a rejected action leaves hands, bankroll and shoe unchanged.

use crate::cards::Card;
use crate::dealer::Dealer;
use crate::evaluator::BLACKJACK;
use crate::hand::{Hand, HandStatus};
use crate::money::{Money, PayoutRatio};
use crate::player::Player;
use crate::settings::GameSettings;
use crate::shoe::{Shoe, ShoeError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("hand cannot take another card")]
    CannotHit,
    #[error("hand cannot stand")]
    CannotStand,
    #[error("double down is not allowed on this hand")]
    CannotDouble,
    #[error("hand cannot be split")]
    CannotSplit,
    #[error("insurance is not available")]
    CannotInsure,
    #[error("insurance already taken")]
    AlreadyInsured,
    #[error("even money is not available")]
    CannotTakeEvenMoney,
    #[error("no hand at index {0}")]
    NoSuchHand(usize),
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Money, available: Money },
    #[error(transparent)]
    Shoe(#[from] ShoeError),
}

// ---- predicates ----

/// Active and below 21; a hand at 21 can only stand.
pub fn can_hit(hand: &Hand) -> bool {
    hand.status() == HandStatus::Active && hand.total() < BLACKJACK
}

pub fn can_stand(hand: &Hand) -> bool {
    hand.status() == HandStatus::Active && !hand.is_busted()
}

pub fn can_double_down(hand: &Hand, bankroll: Money, settings: &GameSettings) -> bool {
    double_shape_ok(hand, settings) && bankroll >= hand.bet()
}

fn double_shape_ok(hand: &Hand, settings: &GameSettings) -> bool {
    hand.len() == 2
        && !hand.is_split_aces()
        && hand.status() == HandStatus::Active
        && !hand.is_busted()
        && (!hand.is_from_split() || settings.double_after_split)
}

pub fn can_split(hand: &Hand, player: &Player, settings: &GameSettings) -> bool {
    split_shape_ok(hand, player, settings) && player.bankroll() >= hand.bet()
}

fn split_shape_ok(hand: &Hand, player: &Player, settings: &GameSettings) -> bool {
    hand.is_pair()
        && hand.status() == HandStatus::Active
        && player.split_count() < usize::from(settings.max_splits)
}

/// Dealer shows an Ace, the hand is untouched and the half-bet is
/// affordable. A natural is offered even money instead.
pub fn can_offer_insurance(hand: &Hand, dealer_up: Option<Card>, bankroll: Money) -> bool {
    dealer_up.is_some_and(|c| c.is_ace())
        && hand.len() == 2
        && !hand.is_blackjack()
        && hand.status() == HandStatus::Active
        && bankroll >= hand.bet().half()
}

pub fn can_offer_even_money(hand: &Hand, dealer_up: Option<Card>) -> bool {
    hand.is_blackjack()
        && hand.status() == HandStatus::Active
        && dealer_up.is_some_and(|c| c.is_ace())
}

// ---- payouts (total returned to the player, stake included) ----

/// `bet + bet * ratio`; 3:2 on $10 returns $25.
pub fn blackjack_payout(bet: Money, ratio: PayoutRatio) -> Money {
    bet + bet.scale(ratio)
}

pub fn win_payout(bet: Money) -> Money {
    bet * 2
}

pub fn push_payout(bet: Money) -> Money {
    bet
}

/// `insurance + insurance * ratio`; 2:1 on $5 returns $15.
pub fn insurance_payout(insurance_bet: Money, ratio: PayoutRatio) -> Money {
    insurance_bet + insurance_bet.scale(ratio)
}

pub fn even_money_payout(bet: Money) -> Money {
    bet * 2
}

// ---- mutations ----

fn ensure_cards(shoe: &Shoe, needed: usize) -> Result<(), RulesError> {
    if shoe.cards_remaining() < needed {
        return Err(ShoeError::Exhausted.into());
    }
    Ok(())
}

fn debit(player: &mut Player, amount: Money) -> Result<(), RulesError> {
    let available = player.bankroll;
    player.bankroll = available
        .checked_sub(amount)
        .ok_or(RulesError::InsufficientFunds { needed: amount, available })?;
    Ok(())
}

pub fn hit(hand: &mut Hand, shoe: &mut Shoe) -> Result<Card, RulesError> {
    if !can_hit(hand) {
        return Err(RulesError::CannotHit);
    }
    let card = shoe.draw()?;
    hand.add_card(card);
    Ok(card)
}

pub fn stand(hand: &mut Hand) -> Result<(), RulesError> {
    if !can_stand(hand) {
        return Err(RulesError::CannotStand);
    }
    hand.set_status(HandStatus::Standing);
    Ok(())
}

/// Double the wager, take exactly one card, then stand (unless busted).
pub fn double_down(
    player: &mut Player,
    index: usize,
    shoe: &mut Shoe,
    settings: &GameSettings,
) -> Result<Card, RulesError> {
    let hand = player.hands.get(index).ok_or(RulesError::NoSuchHand(index))?;
    if !double_shape_ok(hand, settings) {
        return Err(RulesError::CannotDouble);
    }
    let bet = hand.bet();
    if player.bankroll < bet {
        return Err(RulesError::InsufficientFunds { needed: bet, available: player.bankroll });
    }
    ensure_cards(shoe, 1)?;

    debit(player, bet)?;
    let card = shoe.draw()?;
    let hand = &mut player.hands[index];
    hand.bet = bet * 2;
    hand.add_card(card);
    if !hand.is_busted() {
        hand.set_status(HandStatus::Standing);
    }
    Ok(card)
}

/// Split a pair into two hands at `index` and `index + 1`.
///
/// Aces each get one card and stand. Otherwise the first hand is dealt its
/// second card now and the second hand waits for its card until play reaches
/// it.
pub fn split(
    player: &mut Player,
    index: usize,
    shoe: &mut Shoe,
    settings: &GameSettings,
) -> Result<(), RulesError> {
    let hand = player.hands.get(index).ok_or(RulesError::NoSuchHand(index))?;
    if !split_shape_ok(hand, player, settings) {
        return Err(RulesError::CannotSplit);
    }
    let bet = hand.bet();
    if player.bankroll < bet {
        return Err(RulesError::InsufficientFunds { needed: bet, available: player.bankroll });
    }
    let (first_card, second_card) = (hand.cards()[0], hand.cards()[1]);
    let aces = first_card.is_ace();
    ensure_cards(shoe, if aces { 2 } else { 1 })?;

    debit(player, bet)?;
    let mut first = Hand::split_child(Some(first_card), bet);
    let mut second = Hand::split_child(Some(second_card), bet);
    first.add_card(shoe.draw()?);
    if aces {
        second.add_card(shoe.draw()?);
        first.set_status(HandStatus::Standing);
        second.set_status(HandStatus::Standing);
    } else {
        second.await_second_card();
    }
    player.hands[index] = first;
    player.hands.insert(index + 1, second);
    Ok(())
}

/// Buy insurance for half the bet on hand `index`. Returns the cost.
pub fn take_insurance(
    player: &mut Player,
    index: usize,
    dealer_up: Option<Card>,
) -> Result<Money, RulesError> {
    if player.insurance.is_some() {
        return Err(RulesError::AlreadyInsured);
    }
    let hand = player.hands.get(index).ok_or(RulesError::NoSuchHand(index))?;
    if !can_offer_insurance(hand, dealer_up, player.bankroll) {
        return Err(RulesError::CannotInsure);
    }
    let cost = hand.bet().half();
    debit(player, cost)?;
    player.insurance = Some(cost);
    Ok(cost)
}

/// Settle a natural at 1:1 before the peek. Returns the amount paid.
pub fn accept_even_money(
    player: &mut Player,
    index: usize,
    dealer_up: Option<Card>,
) -> Result<Money, RulesError> {
    let hand = player.hands.get(index).ok_or(RulesError::NoSuchHand(index))?;
    if player.insurance.is_some() || !can_offer_even_money(hand, dealer_up) {
        return Err(RulesError::CannotTakeEvenMoney);
    }
    let payout = even_money_payout(hand.bet());
    player.bankroll += payout;
    player.hands[index].settle(HandStatus::Won, payout);
    Ok(payout)
}

/// Pay a natural at the blackjack ratio once the dealer is known not to
/// have one. Returns `None` if the hand is not an unsettled natural.
pub(crate) fn pay_natural(player: &mut Player, index: usize, ratio: PayoutRatio) -> Option<Money> {
    let hand = player.hands.get_mut(index)?;
    if !hand.is_blackjack() || hand.status() != HandStatus::Active {
        return None;
    }
    let payout = blackjack_payout(hand.bet(), ratio);
    hand.settle(HandStatus::Blackjack, payout);
    player.bankroll += payout;
    Some(payout)
}

/// Settle one hand against the finished dealer hand and return everything
/// owed to the player for it, insurance included.
///
/// Precedence: insurance is paid first if the dealer has blackjack; a busted
/// player loses; a busted dealer pays every remaining hand; then naturals beat
/// non-naturals; then the higher total wins and equal totals push.
pub fn settle_hand(
    hand: &mut Hand,
    dealer: &Dealer,
    insurance: Option<Money>,
    settings: &GameSettings,
) -> Money {
    let mut payout = Money::ZERO;
    if dealer.has_blackjack() {
        if let Some(ib) = insurance {
            payout += insurance_payout(ib, settings.insurance_payout);
        }
    }
    let bet = hand.bet();
    let (status, won) = if hand.is_busted() {
        (HandStatus::Lost, Money::ZERO)
    } else if dealer.is_busted() {
        if hand.is_blackjack() {
            (HandStatus::Blackjack, blackjack_payout(bet, settings.blackjack_payout))
        } else {
            (HandStatus::Won, win_payout(bet))
        }
    } else {
        let player_bj = hand.is_blackjack();
        let dealer_bj = dealer.has_blackjack();
        if player_bj && !dealer_bj {
            (HandStatus::Blackjack, blackjack_payout(bet, settings.blackjack_payout))
        } else if dealer_bj && !player_bj {
            (HandStatus::Lost, Money::ZERO)
        } else {
            let (mine, theirs) = (hand.total(), dealer.total());
            if mine > theirs {
                (HandStatus::Won, win_payout(bet))
            } else if mine < theirs {
                (HandStatus::Lost, Money::ZERO)
            } else {
                (HandStatus::Push, push_payout(bet))
            }
        }
    };
    payout += won;
    hand.settle(status, payout);
    payout
}

/// Reveal the hole card and draw until the dealer stands or busts. Returns
/// the cards drawn.
pub fn play_dealer(dealer: &mut Dealer, shoe: &mut Shoe) -> Result<Vec<Card>, RulesError> {
    dealer.reveal_hole();
    let mut drawn = Vec::new();
    while dealer.should_hit() {
        let card = shoe.draw()?;
        dealer.take(card);
        drawn.push(card);
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::player::{PlayerKind, Seat};

    fn dollars(d: u64) -> Money {
        Money::from_dollars(d)
    }

    fn player_with(cards: &str, bet: u64, bankroll: u64) -> Player {
        let mut p = Player::new("P1", Seat::new(1).unwrap(), PlayerKind::Human, dollars(bankroll));
        p.hands.push(Hand::from_cards(parse_cards(cards).unwrap(), dollars(bet)));
        p
    }

    fn dealer_with(cards: &str) -> Dealer {
        let mut d = Dealer::new(true);
        for c in parse_cards(cards).unwrap() {
            d.take(c);
        }
        d
    }

    #[test]
    fn rejected_double_changes_nothing() {
        let mut p = player_with("5s 6d", 10, 5);
        let mut shoe = Shoe::new(1).unwrap();
        let err = double_down(&mut p, 0, &mut shoe, &GameSettings::default()).unwrap_err();
        assert!(matches!(err, RulesError::InsufficientFunds { .. }));
        assert_eq!(p.bankroll(), dollars(5));
        assert_eq!(p.hands[0].bet(), dollars(10));
        assert_eq!(shoe.cards_dealt(), 0);
    }

    #[test]
    fn double_stakes_and_stands() {
        let mut p = player_with("5s 6d", 10, 100);
        let mut shoe = Shoe::stacked(1, &parse_cards("9c").unwrap()).unwrap();
        let card = double_down(&mut p, 0, &mut shoe, &GameSettings::default()).unwrap();
        assert_eq!(card.to_string(), "9c");
        assert_eq!(p.bankroll(), dollars(90));
        assert_eq!(p.hands[0].bet(), dollars(20));
        assert_eq!(p.hands[0].status(), HandStatus::Standing);
        assert_eq!(p.hands[0].total(), 20);
    }

    #[test]
    fn insurance_needs_ace_and_half_bet() {
        let hand = Hand::from_cards(parse_cards("Ts 6d").unwrap(), dollars(10));
        let ace = Some("Ah".parse().unwrap());
        let ten = Some("Kh".parse().unwrap());
        assert!(can_offer_insurance(&hand, ace, dollars(5)));
        assert!(!can_offer_insurance(&hand, ace, Money::from_cents(499)));
        assert!(!can_offer_insurance(&hand, ten, dollars(100)));

        let natural = Hand::from_cards(parse_cards("As Kd").unwrap(), dollars(10));
        assert!(!can_offer_insurance(&natural, ace, dollars(100)));
        assert!(can_offer_even_money(&natural, ace));
    }

    #[test]
    fn twenty_one_cannot_hit() {
        let mut hand = Hand::from_cards(parse_cards("7s 4d").unwrap(), dollars(10));
        let mut shoe = Shoe::stacked(1, &parse_cards("Kc 2h").unwrap()).unwrap();
        hit(&mut hand, &mut shoe).unwrap();
        assert_eq!(hand.total(), 21);
        assert_eq!(hand.status(), HandStatus::Active);
        assert!(!can_hit(&hand));
        assert!(can_stand(&hand));
        assert_eq!(hit(&mut hand, &mut shoe), Err(RulesError::CannotHit));
        assert_eq!(hand.len(), 3);
        assert_eq!(shoe.cards_dealt(), 1);
    }

    #[test]
    fn insurance_pays_when_dealer_has_blackjack() {
        let mut p = player_with("Ts 9d", 10, 100);
        let up = Some("Ah".parse().unwrap());
        assert_eq!(take_insurance(&mut p, 0, up).unwrap(), dollars(5));
        assert_eq!(take_insurance(&mut p, 0, up), Err(RulesError::AlreadyInsured));
        let dealer = dealer_with("Ah Kd");
        let insurance = p.insurance();
        let paid = settle_hand(&mut p.hands[0], &dealer, insurance, &GameSettings::default());
        assert_eq!(paid, dollars(15));
        assert_eq!(p.hands[0].status(), HandStatus::Lost);
    }

    #[test]
    fn even_money_settles_immediately() {
        let mut p = player_with("As Kd", 10, 100);
        let paid = accept_even_money(&mut p, 0, Some("Ac".parse().unwrap())).unwrap();
        assert_eq!(paid, dollars(20));
        assert_eq!(p.bankroll(), dollars(120));
        assert_eq!(p.hands[0].status(), HandStatus::Won);
        assert_eq!(
            accept_even_money(&mut p, 0, Some("Ac".parse().unwrap())),
            Err(RulesError::CannotTakeEvenMoney)
        );
    }

    #[test]
    fn both_naturals_push() {
        let mut hand = Hand::from_cards(parse_cards("As Kd").unwrap(), dollars(10));
        let dealer = dealer_with("Ah Qd");
        let paid = settle_hand(&mut hand, &dealer, None, &GameSettings::default());
        assert_eq!(paid, dollars(10));
        assert_eq!(hand.status(), HandStatus::Push);
    }

    #[test]
    fn dealer_draws_to_seventeen() {
        let mut dealer = dealer_with("Ts 6h");
        let mut shoe = Shoe::stacked(1, &parse_cards("Ac 4d").unwrap()).unwrap();
        let drawn = play_dealer(&mut dealer, &mut shoe).unwrap();
        // 16 + A = hard 17, stand even under H17
        assert_eq!(drawn.len(), 1);
        assert_eq!(dealer.total(), 17);
        assert!(dealer.hole_revealed());
    }
}
