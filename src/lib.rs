//! range-equity: range-vs-range equity session core
//!
//! Goals:
//! - Exact, de-duplicated expansion of range shorthand into the 169 canonical
//!   starting-hand classes
//! - One coherent session state — seats, board, config, compute guard — with
//!   deterministic request routing and race-free result merging
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! The numerical equity engine itself is an external collaborator behind the
//! [`service::EquityService`] trait; this crate owns everything up to that
//! boundary.
//!
//! ## Quick start: parse a range and build a request
//! ```
//! use range_equity::range::Range;
//! use range_equity::table::{Seat, Table};
//!
//! let range: Range = "AKs, 77-99, Q9s+".parse().unwrap();
//! assert!(range.contains("QTs".parse().unwrap()));
//!
//! let mut table = Table::new();
//! table.set_players(2);
//! table.set_range(Seat::BigBlind, range);
//! let request = table.equity_request();
//! assert_eq!(request.players[0].range.text, "77, 88, 99, AKs, Q9s, QJs, QTs");
//! ```

pub mod cards;
pub mod keys;
pub mod range;
pub mod service;
pub mod session;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
