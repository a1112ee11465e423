//! Session table state.
//!
//! A [`Table`] is the single owned state value behind an equity session: six
//! fixed seats, the community board, compute configuration, and the
//! single-flight compute guard. Every mutator is total — bad input is clamped
//! or ignored, never an error — so the surrounding event loop can apply user
//! edits without a failure path.

use crate::cards::Card;
use crate::range::Range;
use crate::service::{EquityRequest, EquityResult, Method, PlayerInput, RangeSpec, SeatEquity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The six fixed seat identities, declared in canonical activation order:
/// shrinking the table drops UTG first, then HJ, and so on — BB, SB and BTN
/// are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "CO")]
    Cutoff,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "UTG")]
    UnderTheGun,
}

impl Seat {
    pub const ALL: [Seat; 6] = [
        Seat::BigBlind,
        Seat::SmallBlind,
        Seat::Button,
        Seat::Cutoff,
        Seat::Hijack,
        Seat::UnderTheGun,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Seat::BigBlind => "BB",
            Seat::SmallBlind => "SB",
            Seat::Button => "BTN",
            Seat::Cutoff => "CO",
            Seat::Hijack => "HJ",
            Seat::UnderTheGun => "UTG",
        }
    }

    /// The active subset for `players` seats: always the first
    /// `players.clamp(2, 6)` entries of [`Seat::ALL`].
    pub fn active(players: usize) -> &'static [Seat] {
        &Seat::ALL[..players.clamp(2, 6)]
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Street implied by the number of board slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

/// Which engine endpoint a compute call must use. Decided by filled-card
/// count alone, never by the street label, so a partially typed flop still
/// routes correctly once three slots hold cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflop,
    Postflop,
}

/// Per-seat state: fold flag, assigned range, and the last compute result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatState {
    pub folded: bool,
    pub range: Range,
    pub equity: Option<SeatEquity>,
}

/// The whole session state. Owned exclusively by the session coordinator;
/// nothing else mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    players: usize,
    seats: [SeatState; 6],
    board: Vec<Option<Card>>,
    method: Method,
    iterations: u32,
    seed: Option<u64>,
    computing: bool,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            players: 6,
            seats: Default::default(),
            board: Vec::new(),
            method: Method::Auto,
            iterations: 20_000,
            seed: Some(1),
            computing: false,
        }
    }
}

impl Table {
    pub const MIN_PLAYERS: usize = 2;
    pub const MAX_PLAYERS: usize = 6;
    pub const MIN_ITERATIONS: u32 = 1_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// A table seeded with the stock demo opening ranges for UTG and BB.
    pub fn preloaded() -> Self {
        let mut table = Self::default();
        table.set_range(
            Seat::UnderTheGun,
            Range::parse("AKs, AKo, QQ-TT, A5s-A2s, KQs-KTs, Q9s+").unwrap_or_default(),
        );
        table.set_range(
            Seat::BigBlind,
            Range::parse("JJ-99, AQs-AJs, KQs, JTo+").unwrap_or_default(),
        );
        table
    }

    // --- seats & config ---

    pub fn players(&self) -> usize {
        self.players
    }

    /// Set the active player count, clamped to [2, 6]. Seats leaving the
    /// active subset have their equity cleared so no result computed under a
    /// different table configuration lingers on screen.
    pub fn set_players(&mut self, n: usize) {
        self.players = n.clamp(Self::MIN_PLAYERS, Self::MAX_PLAYERS);
        for seat in &Seat::ALL[self.players..] {
            self.seats[seat.index()].equity = None;
        }
    }

    /// The active-seat subset in canonical order.
    pub fn active_seats(&self) -> &'static [Seat] {
        Seat::active(self.players)
    }

    pub fn seat(&self, seat: Seat) -> &SeatState {
        &self.seats[seat.index()]
    }

    pub fn set_folded(&mut self, seat: Seat, folded: bool) {
        self.seats[seat.index()].folded = folded;
    }

    /// Replace a seat's range wholesale.
    pub fn set_range(&mut self, seat: Seat, range: Range) {
        self.seats[seat.index()].range = range;
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn set_method(&mut self, method: Method) {
        self.method = method;
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Set the Monte Carlo iteration count, floored at 1000.
    pub fn set_iterations(&mut self, n: u32) {
        self.iterations = n.max(Self::MIN_ITERATIONS);
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    // --- board & streets ---

    /// Board slots: 0, 3, 4 or 5 of them, each possibly awaiting a card.
    pub fn board(&self) -> &[Option<Card>] {
        &self.board
    }

    /// Street implied by the slot count, independent of which slots are filled.
    pub fn street(&self) -> Street {
        match self.board.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// Advance one street, appending empty slots. River has no forward
    /// transition.
    pub fn advance_street(&mut self) {
        match self.board.len() {
            0 => self.board.extend([None, None, None]),
            3 | 4 => self.board.push(None),
            _ => {}
        }
    }

    /// Discard all board content and return to preflop.
    pub fn reset_board(&mut self) {
        self.board.clear();
    }

    /// Fill or clear one board slot. Never changes the street; out-of-range
    /// indices are ignored.
    pub fn set_board_slot(&mut self, idx: usize, card: Option<Card>) {
        if let Some(slot) = self.board.get_mut(idx) {
            *slot = card;
        }
    }

    /// The filled board cards, in slot order.
    pub fn dealt(&self) -> Vec<Card> {
        self.board.iter().flatten().copied().collect()
    }

    /// Endpoint selection: three or more filled cards goes postflop.
    pub fn route(&self) -> Route {
        if self.board.iter().flatten().count() >= 3 {
            Route::Postflop
        } else {
            Route::Preflop
        }
    }

    // --- compute plumbing ---

    /// Build the engine request for the current active subset. Each seat's
    /// range travels as serialized display text (the engine re-parses it);
    /// the board is attached only when routing postflop.
    pub fn equity_request(&self) -> EquityRequest {
        let players = self
            .active_seats()
            .iter()
            .map(|&seat| {
                let state = self.seat(seat);
                PlayerInput {
                    seat,
                    folded: state.folded,
                    range: RangeSpec { text: state.range.to_text() },
                }
            })
            .collect();
        let board = match self.route() {
            Route::Postflop => Some(self.dealt().iter().map(Card::to_string).collect()),
            Route::Preflop => None,
        };
        EquityRequest {
            players,
            board,
            method: self.method,
            iterations: Some(self.iterations),
            seed: self.seed,
        }
    }

    /// True while a remote compute call is outstanding.
    pub fn is_computing(&self) -> bool {
        self.computing
    }

    /// Claim the single-flight guard. Returns false when a call is already
    /// outstanding, in which case the caller must do nothing.
    pub fn try_begin_compute(&mut self) -> bool {
        if self.computing {
            return false;
        }
        self.computing = true;
        true
    }

    /// Release the single-flight guard. Must run on success and failure alike.
    pub fn finish_compute(&mut self) {
        self.computing = false;
    }

    /// Merge a successful result: each returned per-seat entry replaces the
    /// matching seat's equity wholesale. Seats absent from the response are
    /// left untouched.
    pub fn apply_result(&mut self, result: &EquityResult) {
        for per in &result.per_seat {
            self.seats[per.seat.index()].equity = Some(*per);
        }
    }

    /// Whether a conditional compute should fire: at least two active seats
    /// simultaneously unfolded and holding a non-empty range.
    pub fn ready_to_compute(&self) -> bool {
        self.active_seats()
            .iter()
            .filter(|&&seat| {
                let state = self.seat(seat);
                !state.folded && !state.range.is_empty()
            })
            .count()
            >= 2
    }
}
