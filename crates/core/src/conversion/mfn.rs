//! MFN resolution.
//!
//! The face-value rule converts an MFN SAFE at the round's post-money
//! valuation and makes no comparison against other instruments. Real MFN
//! clauses inherit the best terms granted to other investors; that reading
//! is available as [`MfnTreatment::BestTerms`] and must be asked for.

use log::debug;
use rust_decimal::Decimal;

use crate::conversion::{conversion_valuation, MfnTreatment, RoundContext};
use crate::errors::Result;
use crate::instruments::{Instrument, InstrumentKind};

/// Valuation an MFN instrument converts at under `treatment`. Other kinds
/// always get their own conversion valuation.
///
/// With `BestTerms` this is the lowest valid conversion valuation among the
/// non-MFN instruments in `peers` (the instrument itself is skipped by id),
/// capped at the post-money valuation. Peers whose terms are invalid are
/// ignored.
pub fn mfn_conversion_valuation(
    instrument: &Instrument,
    peers: &[Instrument],
    ctx: &RoundContext,
    treatment: MfnTreatment,
) -> Result<Decimal> {
    let face_value = conversion_valuation(instrument, ctx)?;
    if treatment == MfnTreatment::FaceValue || instrument.kind() != InstrumentKind::Mfn {
        return Ok(face_value);
    }

    let best = peers
        .iter()
        .filter(|peer| peer.id != instrument.id && peer.kind() != InstrumentKind::Mfn)
        .filter_map(|peer| conversion_valuation(peer, ctx).ok())
        .min()
        .map_or(face_value, |best| best.min(face_value));

    if best < face_value {
        debug!(
            "MFN instrument {} inherits conversion valuation {} (face value {})",
            instrument.id, best, face_value
        );
    }
    Ok(best)
}
