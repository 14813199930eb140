#[cfg(test)]
mod tests {
    use crate::cap_table::{
        build_cap_table, build_cap_table_with, CapTableOptions, RowCategory,
    };
    use crate::conversion::{MfnTreatment, RoundContext};
    use crate::instruments::{Instrument, InstrumentKind, NewInstrument};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ledger_round() -> RoundContext {
        RoundContext::new(dec!(10000000), dec!(3000000)).with_total_shares(dec!(10000000))
    }

    fn cap_safe(id: &str) -> Instrument {
        NewInstrument::new(InstrumentKind::ValuationCap)
            .id(id)
            .investor_name("Angel")
            .build(1)
    }

    fn discount_safe(id: &str) -> Instrument {
        NewInstrument::new(InstrumentKind::Discount)
            .id(id)
            .investor_name("Seed Fund")
            .build(2)
    }

    fn mfn_safe(id: &str) -> Instrument {
        NewInstrument::new(InstrumentKind::Mfn)
            .id(id)
            .investor_name("Friend")
            .build(3)
    }

    // ==================== Reference Scenario ====================

    #[test]
    fn test_single_valuation_cap_scenario() {
        let table = build_cap_table(
            &[cap_safe("cap-1")],
            dec!(2000000),
            dec!(1000000),
            &ledger_round(),
        );

        assert_eq!(table.pre_financing_shares, dec!(10000000));
        assert_eq!(table.total_shares, dec!(14000000));
        assert_eq!(table.unallocated_shares, dec!(7000000));

        let round_row = &table.rows[2];
        assert_eq!(round_row.category, RowCategory::EquityFinancing);
        assert_eq!(round_row.shares, Some(dec!(3000000)));
        assert_eq!(round_row.investment_amount, Some(dec!(3000000)));

        let safe_row = table.row("cap-1").unwrap();
        assert_eq!(safe_row.shares, Some(dec!(1000000)));
        assert_eq!(safe_row.display_percentage, dec!(7.14));
        assert_eq!(safe_row.investment_amount, Some(dec!(100000)));
        assert_eq!(
            safe_row.category,
            RowCategory::Safe(InstrumentKind::ValuationCap)
        );

        assert_eq!(table.rows[0].display_percentage, dec!(14.29));
        assert_eq!(table.rows[1].display_percentage, dec!(7.14));
        assert_eq!(table.rows[0].investment_amount, None);
    }

    #[test]
    fn test_row_order_is_stable() {
        let instruments = vec![mfn_safe("m"), cap_safe("c"), discount_safe("d")];
        let table = build_cap_table(&instruments, dec!(2000000), dec!(1000000), &ledger_round());

        let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Founders",
                "Employee Pool",
                "Equity Financing",
                "Friend",
                "Angel",
                "Seed Fund"
            ]
        );
        let ids: Vec<&str> = table
            .instrument_rows()
            .filter_map(|r| r.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["m", "c", "d"]);
    }

    #[test]
    fn test_percentages_sum_to_100_when_fully_allocated() {
        let ctx = RoundContext::new(dec!(10000000), dec!(3000000)).with_total_shares(dec!(3000000));
        let instruments = vec![cap_safe("c"), discount_safe("d"), mfn_safe("m")];
        let table = build_cap_table(&instruments, dec!(2000000), dec!(1000000), &ctx);

        assert_eq!(table.unallocated_shares, Decimal::ZERO);
        assert_eq!(table.total_percentage().round_dp(10), dec!(100));
    }

    #[test]
    fn test_pre_financing_falls_back_to_founders_and_pool() {
        let ctx = RoundContext::new(dec!(10000000), dec!(3000000));
        let table = build_cap_table(&[cap_safe("c")], dec!(2000000), dec!(1000000), &ctx);

        assert_eq!(table.pre_financing_shares, dec!(3000000));
        assert_eq!(table.row("c").unwrap().shares, Some(dec!(300000)));
        assert_eq!(table.rows[2].shares, Some(dec!(900000)));
        assert_eq!(table.total_shares, dec!(4200000));
    }

    // ==================== Degraded Rows ====================

    #[test]
    fn test_invalid_instrument_reports_zero_and_is_excluded() {
        let mut broken = cap_safe("broken");
        broken.terms = crate::instruments::InstrumentTerms::ValuationCap {
            valuation_cap: Decimal::ZERO,
        };
        let table = build_cap_table(
            &[cap_safe("ok"), broken],
            dec!(2000000),
            dec!(1000000),
            &ledger_round(),
        );

        let broken_row = table.row("broken").unwrap();
        assert!(!broken_row.is_valid());
        assert_eq!(broken_row.percentage, Decimal::ZERO);
        assert!(broken_row.error.is_some());
        assert_eq!(table.total_shares, dec!(14000000));
    }

    #[test]
    fn test_zero_post_money_degrades_round_and_instruments() {
        let ctx = RoundContext::new(Decimal::ZERO, dec!(3000000)).with_total_shares(dec!(10000000));
        let table = build_cap_table(&[mfn_safe("m")], dec!(2000000), dec!(1000000), &ctx);

        assert_eq!(table.rows[2].shares, None);
        assert_eq!(table.row("m").unwrap().shares, None);
        assert_eq!(table.total_shares, dec!(10000000));
        assert_eq!(table.rows[0].display_percentage, dec!(20));
    }

    #[test]
    fn test_zero_denominator_renders_zero_percent() {
        let ctx = RoundContext::new(dec!(10000000), Decimal::ZERO).with_total_shares(Decimal::ZERO);
        let mut instrument = mfn_safe("m");
        instrument.investment_amount = Decimal::ZERO;
        let table = build_cap_table(&[instrument], Decimal::ZERO, Decimal::ZERO, &ctx);

        assert_eq!(table.total_shares, Decimal::ZERO);
        assert!(table
            .rows
            .iter()
            .all(|row| row.display_percentage == Decimal::ZERO));
    }

    #[test]
    fn test_empty_collection() {
        let table = build_cap_table(&[], dec!(2000000), dec!(1000000), &ledger_round());
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.total_shares, dec!(13000000));
    }

    // ==================== Share Ledger ====================

    #[test]
    fn test_over_allocated_ledger_degrades_every_row() {
        let ctx = RoundContext::new(dec!(10000000), dec!(3000000)).with_total_shares(dec!(1000000));
        let table = build_cap_table(&[cap_safe("c")], dec!(2000000), dec!(1000000), &ctx);

        assert!(!table.is_valid());
        assert!(table.error.as_deref().unwrap().contains("more than"));
        assert!(table.rows.iter().all(|row| !row.is_valid()));
        assert!(table.rows.iter().all(|row| row.error.is_some()));
        assert_eq!(table.total_percentage(), Decimal::ZERO);
        assert_eq!(table.unallocated_shares, Decimal::ZERO);
    }

    #[test]
    fn test_negative_share_count_degrades_round_row() {
        let ctx = RoundContext::new(dec!(10000000), dec!(3000000)).with_total_shares(dec!(-1000000));
        let table = build_cap_table(&[cap_safe("c")], dec!(2000000), dec!(1000000), &ctx);

        assert!(!table.is_valid());
        assert_eq!(table.rows[2].category, RowCategory::EquityFinancing);
        assert_eq!(table.rows[2].shares, None);
        assert_eq!(table.row("c").unwrap().shares, None);
        assert!(table.rows.iter().all(|row| row.percentage == Decimal::ZERO));
    }

    #[test]
    fn test_negative_founders_degrade_table() {
        let ctx = RoundContext::new(dec!(10000000), dec!(3000000));
        let table = build_cap_table(&[cap_safe("c")], dec!(-2000000), dec!(1000000), &ctx);

        assert!(!table.is_valid());
        assert!(table.error.as_deref().unwrap().contains("founders share count"));
        assert_eq!(table.rows[0].shares, None);
    }

    #[test]
    fn test_valid_ledger_has_no_table_error() {
        let table = build_cap_table(&[cap_safe("c")], dec!(2000000), dec!(1000000), &ledger_round());
        assert!(table.is_valid());
        assert_eq!(table.error, None);
    }

    // ==================== Purity & MFN Options ====================

    #[test]
    fn test_build_is_idempotent() {
        let instruments = vec![cap_safe("c"), discount_safe("d"), mfn_safe("m")];
        let first = build_cap_table(&instruments, dec!(2000000), dec!(1000000), &ledger_round());
        let second = build_cap_table(&instruments, dec!(2000000), dec!(1000000), &ledger_round());
        assert_eq!(first, second);
    }

    #[test]
    fn test_mfn_best_terms_option() {
        let instruments = vec![cap_safe("c"), mfn_safe("m")];
        let face = build_cap_table(&instruments, dec!(2000000), dec!(1000000), &ledger_round());
        let best = build_cap_table_with(
            &instruments,
            dec!(2000000),
            dec!(1000000),
            &ledger_round(),
            CapTableOptions {
                mfn_treatment: MfnTreatment::BestTerms,
            },
        );

        assert_eq!(face.row("m").unwrap().shares, Some(dec!(100000)));
        assert_eq!(best.row("m").unwrap().shares, Some(dec!(1000000)));
        assert_eq!(
            face.row("c").unwrap().shares,
            best.row("c").unwrap().shares
        );
    }
}
