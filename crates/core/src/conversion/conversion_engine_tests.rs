#[cfg(test)]
mod tests {
    use crate::conversion::{
        compute_ownership, conversion_valuation, mfn_conversion_valuation, new_money_fraction,
        new_money_shares, ownership_fraction, validate_share_ledger, MfnTreatment, RoundContext,
    };
    use crate::errors::{ConversionError, Error};
    use crate::instruments::{Instrument, InstrumentKind, NewInstrument};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn round() -> RoundContext {
        RoundContext::new(dec!(10000000), dec!(3000000))
    }

    fn cap_safe(investment: Decimal, cap: Decimal) -> Instrument {
        NewInstrument::new(InstrumentKind::ValuationCap)
            .id("cap")
            .investment_amount(investment)
            .valuation_cap(cap)
            .build(1)
    }

    fn discount_safe(investment: Decimal, rate: Decimal) -> Instrument {
        NewInstrument::new(InstrumentKind::Discount)
            .id("discount")
            .investment_amount(investment)
            .discount_rate(rate)
            .build(1)
    }

    fn mfn_safe(investment: Decimal) -> Instrument {
        NewInstrument::new(InstrumentKind::Mfn)
            .id("mfn")
            .investment_amount(investment)
            .build(1)
    }

    fn assert_invalid(result: crate::errors::Result<Decimal>) {
        match result {
            Err(err) => assert!(err.is_invalid_terms(), "unexpected error: {err}"),
            Ok(value) => panic!("expected invalid terms, got {value}"),
        }
    }

    // ==================== Valuation Cap ====================

    #[test]
    fn test_valuation_cap_below_post_money() {
        let instrument = cap_safe(dec!(100000), dec!(1000000));
        let outcome = compute_ownership(&instrument, &round()).unwrap();
        assert_eq!(outcome.fraction, dec!(0.10));
        assert_eq!(outcome.percentage, dec!(10));
        assert_eq!(outcome.display_percentage, dec!(10.00));
        assert_eq!(outcome.shares, None);
    }

    #[test]
    fn test_valuation_cap_above_post_money_uses_round_price() {
        let instrument = cap_safe(dec!(100000), dec!(20000000));
        assert_eq!(
            conversion_valuation(&instrument, &round()).unwrap(),
            dec!(10000000)
        );
        assert_eq!(
            ownership_fraction(&instrument, &round()).unwrap(),
            dec!(0.01)
        );
    }

    #[test]
    fn test_valuation_cap_must_be_positive() {
        assert_invalid(ownership_fraction(&cap_safe(dec!(100000), dec!(0)), &round()));
        assert_invalid(ownership_fraction(
            &cap_safe(dec!(100000), dec!(-5)),
            &round(),
        ));
    }

    // ==================== Discount ====================

    #[test]
    fn test_discount_conversion() {
        let instrument = discount_safe(dec!(100000), dec!(0.20));
        assert_eq!(
            conversion_valuation(&instrument, &round()).unwrap(),
            dec!(8000000)
        );
        let outcome = compute_ownership(&instrument, &round()).unwrap();
        assert_eq!(outcome.fraction, dec!(0.0125));
        assert_eq!(outcome.display_percentage, dec!(1.25));
    }

    #[test]
    fn test_discount_rate_domain() {
        assert_invalid(ownership_fraction(
            &discount_safe(dec!(100000), dec!(1)),
            &round(),
        ));
        assert_invalid(ownership_fraction(
            &discount_safe(dec!(100000), dec!(1.5)),
            &round(),
        ));
        assert_invalid(ownership_fraction(
            &discount_safe(dec!(100000), dec!(-0.1)),
            &round(),
        ));
    }

    #[test]
    fn test_zero_discount_matches_face_value() {
        let discount = ownership_fraction(&discount_safe(dec!(100000), dec!(0)), &round()).unwrap();
        let mfn = ownership_fraction(&mfn_safe(dec!(100000)), &round()).unwrap();
        assert_eq!(discount, mfn);
    }

    // ==================== MFN ====================

    #[test]
    fn test_mfn_converts_at_post_money() {
        let outcome = compute_ownership(&mfn_safe(dec!(250000)), &round()).unwrap();
        assert_eq!(outcome.fraction, dec!(0.025));
        assert_eq!(outcome.display_percentage, dec!(2.50));
    }

    #[test]
    fn test_mfn_face_value_ignores_peers() {
        let mfn = mfn_safe(dec!(100000));
        let peers = vec![cap_safe(dec!(100000), dec!(1000000)), mfn.clone()];
        let valuation =
            mfn_conversion_valuation(&mfn, &peers, &round(), MfnTreatment::FaceValue).unwrap();
        assert_eq!(valuation, dec!(10000000));
    }

    #[test]
    fn test_mfn_best_terms_inherits_lowest_peer_valuation() {
        let mfn = mfn_safe(dec!(100000));
        let peers = vec![
            discount_safe(dec!(50000), dec!(0.20)),
            cap_safe(dec!(100000), dec!(1000000)),
            mfn.clone(),
        ];
        let valuation =
            mfn_conversion_valuation(&mfn, &peers, &round(), MfnTreatment::BestTerms).unwrap();
        assert_eq!(valuation, dec!(1000000));
    }

    #[test]
    fn test_mfn_best_terms_skips_invalid_peers() {
        let mfn = mfn_safe(dec!(100000));
        let peers = vec![cap_safe(dec!(100000), dec!(0)), mfn.clone()];
        let valuation =
            mfn_conversion_valuation(&mfn, &peers, &round(), MfnTreatment::BestTerms).unwrap();
        assert_eq!(valuation, dec!(10000000));
    }

    #[test]
    fn test_best_terms_does_not_apply_to_other_kinds() {
        let discount = discount_safe(dec!(100000), dec!(0.10));
        let peers = vec![cap_safe(dec!(100000), dec!(1000000)), discount.clone()];
        let valuation =
            mfn_conversion_valuation(&discount, &peers, &round(), MfnTreatment::BestTerms)
                .unwrap();
        assert_eq!(valuation, dec!(9000000));
    }

    // ==================== Common Guards ====================

    #[test]
    fn test_zero_post_money_is_invalid_for_every_kind() {
        let ctx = RoundContext::new(dec!(0), dec!(3000000));
        assert_invalid(ownership_fraction(&cap_safe(dec!(100000), dec!(1000000)), &ctx));
        assert_invalid(ownership_fraction(&discount_safe(dec!(100000), dec!(0.2)), &ctx));
        assert_invalid(ownership_fraction(&mfn_safe(dec!(100000)), &ctx));
        assert!(matches!(
            new_money_fraction(&ctx),
            Err(Error::Conversion(ConversionError::InvalidRound(_)))
        ));
    }

    #[test]
    fn test_negative_investment_is_invalid() {
        assert_invalid(ownership_fraction(&mfn_safe(dec!(-1)), &round()));
    }

    #[test]
    fn test_zero_investment_converts_to_zero() {
        let outcome = compute_ownership(&mfn_safe(dec!(0)), &round()).unwrap();
        assert_eq!(outcome.fraction, Decimal::ZERO);
        assert_eq!(outcome.display_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_terms_error_names_instrument() {
        let err = ownership_fraction(&cap_safe(dec!(100000), dec!(0)), &round()).unwrap_err();
        match err {
            Error::Conversion(ConversionError::InvalidTerms { instrument, .. }) => {
                assert_eq!(instrument, "cap")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    // ==================== Share-Count Mode ====================

    #[test]
    fn test_shares_against_pre_financing_count() {
        let ctx = round().with_total_shares(dec!(10000000));
        let outcome = compute_ownership(&cap_safe(dec!(100000), dec!(1000000)), &ctx).unwrap();
        assert_eq!(outcome.shares, Some(dec!(1000000)));
    }

    #[test]
    fn test_new_money_row() {
        assert_eq!(new_money_fraction(&round()).unwrap(), dec!(0.3));
        assert_eq!(
            new_money_shares(&round(), dec!(10000000)).unwrap(),
            dec!(3000000)
        );
    }

    #[test]
    fn test_new_money_rejects_negative_share_count() {
        let result = new_money_shares(&round(), dec!(-1000000));
        assert!(matches!(
            result,
            Err(Error::Conversion(ConversionError::InvalidRound(_)))
        ));
    }

    #[test]
    fn test_share_ledger_validation() {
        assert!(validate_share_ledger(dec!(2000000), dec!(1000000), dec!(3000000)).is_ok());
        assert!(validate_share_ledger(dec!(2000000), dec!(1000000), dec!(10000000)).is_ok());

        let over = validate_share_ledger(dec!(2000000), dec!(1000000), dec!(1000000));
        assert!(matches!(
            over,
            Err(Error::Conversion(ConversionError::InvalidRound(_)))
        ));
        assert!(validate_share_ledger(dec!(-1), dec!(1000000), dec!(10000000)).is_err());
        assert!(validate_share_ledger(dec!(2000000), dec!(-1), dec!(10000000)).is_err());
        assert!(validate_share_ledger(Decimal::ZERO, Decimal::ZERO, dec!(-1000000)).is_err());
    }
}
