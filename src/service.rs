//! Wire contract for the remote equity engine.
//!
//! The engine is an external collaborator reached over a request/response
//! boundary; this module pins the JSON field shapes it speaks and exposes it
//! behind the [`EquityService`] trait so sessions can be driven against a
//! real transport or a test double.

use crate::cards::{Card, CardParseError};
use crate::table::Seat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Probability method requested from the engine. `Auto` lets the engine pick
/// between exact enumeration and Monte Carlo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Auto,
    Exact,
    Mc,
}

/// Range shorthand as the engine receives it. The engine re-parses this text
/// itself, so the session ships display text rather than the canonical key
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub seat: Seat,
    pub folded: bool,
    pub range: RangeSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityRequest {
    pub players: Vec<PlayerInput>,
    /// Filled board cards as text, present only on the postflop path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<String>>,
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// One seat's share of a compute result. Attached to the seat wholesale;
/// never field-patched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeatEquity {
    pub seat: Seat,
    pub equity: f64,
    pub tie: f64,
    pub participating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    #[serde(rename = "perSeat")]
    pub per_seat: Vec<SeatEquity>,
    pub method: Method,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandRequest {
    pub range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<String>>,
}

/// A concrete two-card combination surviving blocker removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub c1: String,
    pub c2: String,
}

impl Combo {
    /// The combination as typed cards.
    pub fn cards(&self) -> Result<(Card, Card), CardParseError> {
        Ok((Card::from_str(&self.c1)?, Card::from_str(&self.c2)?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandResponse {
    pub combos: Vec<Combo>,
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("engine rejected request: {0}")]
    Rejected(String),
}

/// Remote equity/expansion engine boundary. Implementations own transport
/// concerns entirely; the session core never looks past this trait.
#[async_trait::async_trait]
pub trait EquityService {
    /// Equity over an empty or partial (< 3 cards) board.
    async fn equity_preflop(&self, request: EquityRequest) -> Result<EquityResult, ServiceError>;

    /// Equity over a board with at least three cards. Callers route here only
    /// when the request carries a board.
    async fn equity_postflop(&self, request: EquityRequest) -> Result<EquityResult, ServiceError>;

    /// Materialize the concrete combos of a range after removing any blocked
    /// by known cards. Independent of the compute flow.
    async fn expand_range(&self, request: ExpandRequest) -> Result<ExpandResponse, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn method_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Method::Auto).unwrap(), "\"auto\"");
        assert_eq!(serde_json::to_string(&Method::Mc).unwrap(), "\"mc\"");
        assert_eq!(serde_json::from_str::<Method>("\"exact\"").unwrap(), Method::Exact);
    }

    #[test]
    fn request_shape_matches_the_engine() {
        let req = EquityRequest {
            players: vec![PlayerInput {
                seat: Seat::BigBlind,
                folded: false,
                range: RangeSpec { text: "AKs, QQ".to_string() },
            }],
            board: None,
            method: Method::Auto,
            iterations: Some(20000),
            seed: Some(1),
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(json["players"][0]["seat"], "BB");
        assert_eq!(json["players"][0]["range"]["text"], "AKs, QQ");
        assert_eq!(json["method"], "auto");
        // preflop requests omit the board entirely
        assert!(json.get("board").is_none());
    }

    #[test]
    fn result_shape_uses_per_seat_camel_case() {
        let raw = r#"{
            "perSeat": [
                {"seat": "BB", "equity": 55.2, "tie": 1.1, "participating": true},
                {"seat": "UTG", "equity": 43.7, "tie": 1.1, "participating": true}
            ],
            "method": "mc",
            "iterations": 20000
        }"#;
        let res: EquityResult = serde_json::from_str(raw).unwrap();
        assert_eq!(res.per_seat.len(), 2);
        assert_eq!(res.per_seat[0].seat, Seat::BigBlind);
        assert_eq!(res.per_seat[1].seat, Seat::UnderTheGun);
        assert_eq!(res.method, Method::Mc);
    }

    #[test]
    fn combo_parses_to_typed_cards() {
        let combo = Combo { c1: "As".to_string(), c2: "Kd".to_string() };
        let (a, b) = combo.cards().unwrap();
        assert_eq!(a, Card::new(Rank::Ace, Suit::Spades));
        assert_eq!(b, Card::new(Rank::King, Suit::Diamonds));
        assert!(Combo { c1: "zz".to_string(), c2: "Kd".to_string() }.cards().is_err());
    }
}
