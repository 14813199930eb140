use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::ConversionCalculatorTrait;
use crate::cap_table::{build_cap_table_with, CapTable, CapTableOptions};
use crate::conversion::{compute_ownership, OwnershipOutcome, RoundContext};
use crate::errors::Result;
use crate::instruments::{Instrument, InstrumentKind, InstrumentUpdate, NewInstrument};

/// Owns the instrument collection.
///
/// Each edit produces a new collection version; a [`snapshot`] taken before
/// the edit keeps seeing the old one. Round context is never stored here and
/// is passed into every calculation.
///
/// [`snapshot`]: ConversionCalculatorTrait::snapshot
#[derive(Debug, Clone, Default)]
pub struct ConversionCalculator {
    instruments: Arc<Vec<Instrument>>,
}

impl ConversionCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instruments(instruments: Vec<Instrument>) -> Self {
        Self {
            instruments: Arc::new(instruments),
        }
    }

    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.instruments.iter().position(|i| i.id == id)
    }
}

impl ConversionCalculatorTrait for ConversionCalculator {
    fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    fn snapshot(&self) -> Arc<Vec<Instrument>> {
        Arc::clone(&self.instruments)
    }

    fn get_instrument(&self, id: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.id == id)
    }

    fn add_instrument(&mut self, kind: InstrumentKind) -> Instrument {
        self.insert_instrument(NewInstrument::new(kind))
    }

    fn insert_instrument(&mut self, new_instrument: NewInstrument) -> Instrument {
        let instrument = new_instrument.build(self.instruments.len() + 1);
        debug!(
            "Adding {} instrument {} for {}",
            instrument.kind().as_str(),
            instrument.id,
            instrument.investor_name
        );
        Arc::make_mut(&mut self.instruments).push(instrument.clone());
        instrument
    }

    fn update_instrument(&mut self, id: &str, update: InstrumentUpdate) {
        let Some(index) = self.position(id) else {
            debug!("Ignoring update for unknown instrument {}", id);
            return;
        };
        let instruments = Arc::make_mut(&mut self.instruments);
        let updated = update.apply(&instruments[index]);
        instruments[index] = updated;
    }

    fn remove_instrument(&mut self, id: &str) {
        let Some(index) = self.position(id) else {
            debug!("Ignoring removal of unknown instrument {}", id);
            return;
        };
        Arc::make_mut(&mut self.instruments).remove(index);
    }

    fn compute_ownership(
        &self,
        id: &str,
        ctx: &RoundContext,
    ) -> Result<Option<OwnershipOutcome>> {
        self.get_instrument(id)
            .map(|instrument| compute_ownership(instrument, ctx))
            .transpose()
    }

    fn build_cap_table(
        &self,
        founders_shares: Decimal,
        employee_shares: Decimal,
        ctx: &RoundContext,
        options: CapTableOptions,
    ) -> CapTable {
        build_cap_table_with(
            &self.instruments,
            founders_shares,
            employee_shares,
            ctx,
            options,
        )
    }
}
