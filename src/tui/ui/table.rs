use crate::cards::{Card, Rank, Suit};
use crate::hand::{Hand, HandStatus};
use crate::money::format_net;
use crate::player::Player;
use crate::table::{Phase, Table};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(6), // dealer
            Constraint::Min(6),    // seats
            Constraint::Length(6), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], &app.table);
    draw_dealer(f, chunks[1], &app.table);
    draw_seats(f, chunks[2], app);
    draw_status(f, chunks[3], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.bet_entry_active() {
        draw_bet_entry(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, table: &Table) {
    let s = table.settings();
    let shoe = table.shoe();
    let lines = vec![
        Line::from(format!(
            "Round {}   Phase: {}   Limits {} to {}",
            table.round(),
            table.phase(),
            s.table_min,
            s.table_max
        )),
        Line::from(format!(
            "{} decks   {}   Blackjack pays {}   Insurance {}   Shoe: {} left, reshuffle at {} dealt",
            shoe.number_of_decks(),
            if s.dealer_hits_soft_17 { "H17" } else { "S17" },
            s.blackjack_payout,
            s.insurance_payout,
            shoe.cards_remaining(),
            shoe.reshuffle_threshold(),
        )),
    ];
    let header = Paragraph::new(lines)
        .block(Block::default().title("blackjack-rs").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_dealer(f: &mut Frame, area: Rect, table: &Table) {
    let dealer = table.dealer();
    let title = if dealer.hand().is_empty() {
        "Dealer".to_string()
    } else if dealer.hole_revealed() {
        let mut t = format!("Dealer: {}", dealer.hand().value());
        if dealer.has_blackjack() {
            t.push_str(" [Blackjack]");
        } else if dealer.is_busted() {
            t.push_str(" [Bust]");
        }
        t
    } else {
        "Dealer".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let dealer_inner = inner(area);
    f.render_widget(block, area);

    let mut slots: Vec<Option<Card>> = dealer.visible_cards().iter().copied().map(Some).collect();
    if !dealer.hole_revealed() && dealer.hand().len() > 1 {
        slots.push(None);
    }
    if slots.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "Waiting for bets",
            Style::default().add_modifier(Modifier::DIM),
        )));
        f.render_widget(para, dealer_inner);
        return;
    }
    let width = 7u16;
    let constraints: Vec<Constraint> = slots.iter().map(|_| Constraint::Length(width)).collect();
    let card_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(dealer_inner);
    for (slot, rect) in slots.into_iter().zip(card_chunks.iter()) {
        render_card_widget(f, *rect, slot, None);
    }
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let players = app.table.players();
    if players.is_empty() {
        let para = Paragraph::new("No players seated. Press M for the menu.")
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(para, area);
        return;
    }
    let cols = columns(area, players.len());
    for (idx, (p, rect)) in players.iter().zip(cols.iter()).enumerate() {
        render_player(f, *rect, app, idx, p);
    }
}

fn render_player(f: &mut Frame, area: Rect, app: &AppState, idx: usize, p: &Player) {
    let table = &app.table;
    let turn = table.current_turn();
    let acting = turn.is_some_and(|c| c.player == idx)
        || (matches!(table.phase(), Phase::Betting | Phase::InsuranceOffer)
            && table.is_decision_due(p.seat()));
    let mut title = format!("Seat {} {}", p.seat(), p.name());
    if !p.is_human() {
        title.push_str(" [AI]");
    }
    if !p.is_active() {
        title.push_str(" [Out]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if !p.is_active() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if acting && p.is_human() {
        block = block.border_style(Style::default().fg(Color::Magenta));
    } else if acting {
        block = block.border_style(Style::default().fg(Color::Yellow));
    } else if p.is_human() {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(format!("Bankroll: {}", p.bankroll())));
    match p.insurance() {
        Some(ib) => lines.push(Line::from(format!("Insurance: {ib}"))),
        None => lines.push(Line::from(vec![Span::raw("Insurance: "), Span::styled("--", dim)])),
    }
    if p.hands().is_empty() {
        lines.push(Line::from(Span::styled("No bet", dim)));
    }
    for (hi, hand) in p.hands().iter().enumerate() {
        let current = turn.is_some_and(|c| c.player == idx && c.hand == hi);
        let marker = if current { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("H{} {} {}", hi + 1, hand.bet(), hand.status().label()),
                status_style(hand.status()),
            ),
        ]));
        lines.push(hand_line(hand));
    }
    if let Some(summary) = table.last_summary().filter(|_| table.phase() == Phase::Settlement) {
        if summary.outcomes_for(p.seat()).next().is_some() {
            let net = summary.net_for(p.seat());
            let color = match net {
                n if n > 0 => Color::Green,
                n if n < 0 => Color::Red,
                _ => Color::White,
            };
            lines.push(Line::from(Span::styled(
                format!("Net: {}", format_net(net)),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
    }
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(para, area);
}

fn hand_line(hand: &Hand) -> Line<'static> {
    let mut spans = vec![Span::raw("   ")];
    for &c in hand.cards() {
        spans.push(card_span(c));
        spans.push(Span::raw(" "));
    }
    if hand.needs_second_card() {
        spans.push(Span::styled("[..] ", Style::default().add_modifier(Modifier::DIM)));
    }
    if !hand.is_empty() {
        spans.push(Span::raw(format!("({})", hand.value())));
    }
    Line::from(spans)
}

fn status_style(status: HandStatus) -> Style {
    match status {
        HandStatus::Blackjack | HandStatus::Won => Style::default().fg(Color::Green),
        HandStatus::Busted | HandStatus::Lost => Style::default().fg(Color::Red),
        HandStatus::Push => Style::default().fg(Color::Blue),
        _ => Style::default(),
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let status_inner = inner(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(status_inner);

    let table = &app.table;
    let seat = app.human_seat;
    let due = table.is_decision_due(seat);
    let mut left: Vec<Line> = Vec::new();
    let prompt = match table.phase() {
        Phase::Betting if due => "Press B to place a bet, then Space to deal.".to_string(),
        Phase::Betting => "Press Space to deal.".to_string(),
        Phase::InsuranceOffer if due => {
            let natural = table
                .player(seat)
                .and_then(|p| p.hands().first())
                .is_some_and(|h| h.is_blackjack());
            if natural {
                "Dealer shows an Ace. E even money, N no thanks.".to_string()
            } else {
                "Dealer shows an Ace. I insurance, N no thanks.".to_string()
            }
        }
        Phase::PlayerActions if due => "Your turn.".to_string(),
        Phase::Settlement => "Round over. Press Space for the next round.".to_string(),
        Phase::Shuffling => "Shuffling the shoe...".to_string(),
        phase => format!("{phase}..."),
    };
    left.push(Line::from(prompt));

    let action_style = |enabled: bool| {
        if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };
    if table.phase() == Phase::PlayerActions {
        let playing = due;
        left.push(Line::from(vec![
            Span::raw("Actions: "),
            Span::styled("H hit", action_style(playing)),
            Span::raw(" • "),
            Span::styled("S stand", action_style(playing)),
            Span::raw(" • "),
            Span::styled("D double", action_style(playing && table.can_double())),
            Span::raw(" • "),
            Span::styled("P split", action_style(playing && table.can_split())),
            Span::raw(" • "),
            Span::styled("T hint", action_style(playing)),
        ]));
    }
    if let Some(mv) = app.hint() {
        left.push(Line::from(Span::styled(
            format!("Basic strategy says: {mv}"),
            Style::default().fg(Color::Cyan),
        )));
    }
    if let Some(notice) = app.notice() {
        left.push(Line::from(Span::styled(notice.to_string(), Style::default().fg(Color::Yellow))));
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right = vec![
        Line::from(""),
        Line::from("? help • Y history • L log • M menu"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Round History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.table.history_recent_offset(AppState::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("Nothing has happened this round yet."));
    } else {
        for entry in entries {
            let who = entry.seat.map(|s| format!("Seat {s}")).unwrap_or_else(|| "Dealer".into());
            let amount = entry.amount.map(|v| format!(" {v}")).unwrap_or_default();
            let card = entry.card.map(|c| format!(" {c}")).unwrap_or_default();
            lines.push(Line::from(format!(
                "{who} {}{amount}{card} [{}]",
                entry.verb.label(),
                entry.phase
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: Y or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

pub(super) fn draw_log(f: &mut Frame, app: &AppState) {
    let area = centered_rect(80, 80, f.area());
    let block = Block::default().title("Log").borders(Borders::ALL);
    let mut lines: Vec<Line> =
        app.log_lines(AppState::LOG_PAGE_SIZE).into_iter().map(Line::from).collect();
    if lines.is_empty() {
        lines.push(Line::from("No log records."));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Close: L or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- B: enter a bet"),
        Line::from("- Space: deal / next round"),
        Line::from("- H: hit"),
        Line::from("- S: stand"),
        Line::from("- D: double down"),
        Line::from("- P: split"),
        Line::from("- I: insurance"),
        Line::from("- E: even money"),
        Line::from("- N: decline insurance"),
        Line::from("- T: basic strategy hint"),
        Line::from("- Y: round history"),
        Line::from("- L: log"),
        Line::from(""),
        Line::from(Span::styled("Bet Entry:", bold)),
        Line::from("- 0-9 and .: edit amount"),
        Line::from("- Backspace: delete"),
        Line::from("- + / -: adjust by table minimum"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Menu:", bold)),
        Line::from("- M: open / close menu"),
        Line::from("- Up / Down: move selection"),
        Line::from("- Left / Right or + / -: adjust value"),
        Line::from("- Enter: apply (starts a new table)"),
        Line::from("- Esc: back to table"),
        Line::from("- Q: quit (menu)"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_bet_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let s = app.table.settings();
    let current = app.bet_entry_text().unwrap_or("");
    let bankroll = app.human().map(|p| p.bankroll().to_string()).unwrap_or_default();
    let lines = vec![
        Line::from(format!("Bet: ${current}")),
        Line::from(format!("Limits: {} to {}   Bankroll: {bankroll}", s.table_min, s.table_max)),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- by table minimum, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Place Bet").borders(Borders::ALL);
    let inner_area = inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner_area);
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, chunks[0]);
    let error = app.bet_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    match s {
        Suit::Hearts => ('♥', Style::default().fg(Color::Red)),
        Suit::Diamonds => ('♦', Style::default().fg(Color::Red)),
        Suit::Spades => ('♠', Style::default().fg(Color::White)),
        Suit::Clubs => ('♣', Style::default().fg(Color::White)),
    }
}

fn rank_str(r: Rank) -> &'static str {
    match r {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
    }
}

fn card_span(c: Card) -> Span<'static> {
    let (glyph, style) = suit_glyph_and_style(c.suit());
    Span::styled(format!("{}{glyph}", rank_str(c.rank())), style)
}

/// A bordered card; `None` draws the face-down hole card.
fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let card_inner = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(card_span(c)),
        None => Line::from(Span::styled("##", Style::default().fg(Color::Blue))),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), card_inner);
}
