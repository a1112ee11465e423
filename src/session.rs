//! Session coordination.
//!
//! [`Session`] threads a single [`Table`] state value through discrete
//! events: synchronous mutators apply immediately, while the two compute
//! triggers suspend on the remote engine under the single-flight rule. The
//! model is single-threaded and cooperative — the table lives in a
//! `RefCell` and no borrow is ever held across an await, so a second trigger
//! arriving while one is in flight observes the guard and drops out instead
//! of racing.

use crate::service::{Combo, EquityService, ExpandRequest};
use crate::table::{Route, Seat, Table};
use std::cell::{Ref, RefCell};

/// One user's equity session: owned table state plus the remote engine
/// client it computes against.
#[derive(Debug)]
pub struct Session<C> {
    table: RefCell<Table>,
    client: C,
}

impl<C: EquityService> Session<C> {
    pub fn new(client: C) -> Self {
        Self::with_table(Table::default(), client)
    }

    pub fn with_table(table: Table, client: C) -> Self {
        Self { table: RefCell::new(table), client }
    }

    /// Read access to the table state.
    pub fn table(&self) -> Ref<'_, Table> {
        self.table.borrow()
    }

    /// Apply a synchronous mutation to the table state.
    ///
    /// ```
    /// # use range_equity::session::Session;
    /// # use range_equity::service::*;
    /// # struct Nop;
    /// # #[async_trait::async_trait]
    /// # impl EquityService for Nop {
    /// #     async fn equity_preflop(&self, _: EquityRequest) -> Result<EquityResult, ServiceError> { unimplemented!() }
    /// #     async fn equity_postflop(&self, _: EquityRequest) -> Result<EquityResult, ServiceError> { unimplemented!() }
    /// #     async fn expand_range(&self, _: ExpandRequest) -> Result<ExpandResponse, ServiceError> { unimplemented!() }
    /// # }
    /// let session = Session::new(Nop);
    /// session.update(|table| table.set_players(3));
    /// assert_eq!(session.table().players(), 3);
    /// ```
    pub fn update<R>(&self, f: impl FnOnce(&mut Table) -> R) -> R {
        f(&mut self.table.borrow_mut())
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Request equity for the current table state.
    ///
    /// No-op when a call is already outstanding. Otherwise claims the guard,
    /// issues exactly one remote call — preflop or postflop by filled-card
    /// count — and releases the guard whether or not the call succeeded.
    /// Success merges per-seat results by identity; failure is logged and
    /// swallowed, leaving all seat state as it was.
    pub async fn compute(&self) {
        let (route, request) = {
            let mut table = self.table.borrow_mut();
            if !table.try_begin_compute() {
                log::debug!("compute already in flight, dropping trigger");
                return;
            }
            (table.route(), table.equity_request())
        };
        let outcome = match route {
            Route::Postflop => self.client.equity_postflop(request).await,
            Route::Preflop => self.client.equity_preflop(request).await,
        };
        let mut table = self.table.borrow_mut();
        match outcome {
            Ok(result) => table.apply_result(&result),
            Err(err) => log::warn!("equity request failed: {err}"),
        }
        table.finish_compute();
    }

    /// Run [`Session::compute`] only when at least two active seats are
    /// unfolded with a non-empty range; otherwise do nothing.
    pub async fn compute_if_ready(&self) {
        let ready = self.table.borrow().ready_to_compute();
        if ready {
            self.compute().await;
        }
    }

    /// Materialize a seat's range into concrete combos, with cards already on
    /// the board removed by the engine. Independent of the compute guard;
    /// failure is logged and surfaces as an empty list.
    pub async fn expand(&self, seat: Seat) -> Vec<Combo> {
        let request = {
            let table = self.table.borrow();
            let board = table.dealt();
            ExpandRequest {
                range: table.seat(seat).range.to_text(),
                board: if board.is_empty() {
                    None
                } else {
                    Some(board.iter().map(|c| c.to_string()).collect())
                },
            }
        };
        match self.client.expand_range(request).await {
            Ok(response) => response.combos,
            Err(err) => {
                log::warn!("range expansion failed for {seat}: {err}");
                Vec::new()
            }
        }
    }
}
