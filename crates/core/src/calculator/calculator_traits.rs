use rust_decimal::Decimal;
use std::sync::Arc;

use crate::cap_table::{CapTable, CapTableOptions};
use crate::conversion::{OwnershipOutcome, RoundContext};
use crate::errors::Result;
use crate::instruments::{Instrument, InstrumentKind, InstrumentUpdate, NewInstrument};

/// Operations the surrounding UI drives the calculator through.
pub trait ConversionCalculatorTrait: Send + Sync {
    /// Instruments in insertion order.
    fn instruments(&self) -> &[Instrument];

    /// Immutable handle on the current collection version.
    fn snapshot(&self) -> Arc<Vec<Instrument>>;

    fn get_instrument(&self, id: &str) -> Option<&Instrument>;

    /// Appends an instrument populated with the defaults of `kind`.
    fn add_instrument(&mut self, kind: InstrumentKind) -> Instrument;

    /// Appends an instrument built from `new_instrument`.
    fn insert_instrument(&mut self, new_instrument: NewInstrument) -> Instrument;

    /// Applies a partial update. Unknown ids are ignored.
    fn update_instrument(&mut self, id: &str, update: InstrumentUpdate);

    /// Removes an instrument. Unknown ids are ignored.
    fn remove_instrument(&mut self, id: &str);

    /// Ownership of a single instrument. `Ok(None)` when `id` is unknown.
    fn compute_ownership(&self, id: &str, ctx: &RoundContext)
        -> Result<Option<OwnershipOutcome>>;

    fn build_cap_table(
        &self,
        founders_shares: Decimal,
        employee_shares: Decimal,
        ctx: &RoundContext,
        options: CapTableOptions,
    ) -> CapTable;
}
