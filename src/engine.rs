// Table API boundary. Front ends (the TUI, bots, tests) drive a round through
// this trait instead of reaching into `Table` internals. Implemented for the
// core `Table` type.

use crate::cards::Card;
use crate::hand::Hand;
use crate::money::Money;
use crate::player::{Player, Seat};
use crate::settings::GameSettings;
use crate::table::{Phase, Table, TableError};

pub trait TableEngine {
    // Round lifecycle
    fn advance_phase(&mut self) -> Result<Phase, TableError>;

    // Seat decisions
    fn place_bet(&mut self, seat: Seat, amount: Money) -> Result<(), TableError>;
    fn take_insurance(&mut self, seat: Seat) -> Result<Money, TableError>;
    fn accept_even_money(&mut self, seat: Seat) -> Result<Money, TableError>;
    fn decline_insurance(&mut self, seat: Seat) -> Result<(), TableError>;

    // Actions on the hand holding the turn
    fn hit(&mut self) -> Result<Card, TableError>;
    fn stand(&mut self) -> Result<(), TableError>;
    fn double_down(&mut self) -> Result<Card, TableError>;
    fn split(&mut self) -> Result<(), TableError>;

    // Queries
    fn phase(&self) -> Phase;
    fn settings(&self) -> &GameSettings;
    fn player(&self, seat: Seat) -> Option<&Player>;
    fn current_seat(&self) -> Option<Seat>;
    fn current_hand(&self) -> Option<&Hand>;
    fn dealer_up_card(&self) -> Option<Card>;
    fn is_decision_due(&self, seat: Seat) -> bool;
    fn insurance_pending(&self, seat: Seat) -> bool;
    fn can_double(&self) -> bool;
    fn can_split(&self) -> bool;

    fn bankroll(&self, seat: Seat) -> Option<Money> {
        self.player(seat).map(Player::bankroll)
    }
}

impl TableEngine for Table {
    fn advance_phase(&mut self) -> Result<Phase, TableError> {
        self.advance_phase()
    }

    fn place_bet(&mut self, seat: Seat, amount: Money) -> Result<(), TableError> {
        self.place_bet(seat, amount)
    }
    fn take_insurance(&mut self, seat: Seat) -> Result<Money, TableError> {
        self.take_insurance(seat)
    }
    fn accept_even_money(&mut self, seat: Seat) -> Result<Money, TableError> {
        self.accept_even_money(seat)
    }
    fn decline_insurance(&mut self, seat: Seat) -> Result<(), TableError> {
        self.decline_insurance(seat)
    }

    fn hit(&mut self) -> Result<Card, TableError> {
        self.hit()
    }
    fn stand(&mut self) -> Result<(), TableError> {
        self.stand()
    }
    fn double_down(&mut self) -> Result<Card, TableError> {
        self.double_down()
    }
    fn split(&mut self) -> Result<(), TableError> {
        self.split()
    }

    fn phase(&self) -> Phase {
        self.phase
    }
    fn settings(&self) -> &GameSettings {
        &self.settings
    }
    fn player(&self, seat: Seat) -> Option<&Player> {
        self.player(seat)
    }
    fn current_seat(&self) -> Option<Seat> {
        self.current_seat()
    }
    fn current_hand(&self) -> Option<&Hand> {
        self.current_hand()
    }
    fn dealer_up_card(&self) -> Option<Card> {
        self.dealer.up_card()
    }
    fn is_decision_due(&self, seat: Seat) -> bool {
        self.is_decision_due(seat)
    }
    fn insurance_pending(&self, seat: Seat) -> bool {
        self.insurance_pending(seat)
    }
    fn can_double(&self) -> bool {
        self.can_double()
    }
    fn can_split(&self) -> bool {
        self.can_split()
    }
}
