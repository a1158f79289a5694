#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use num_bigint::BigUint;
    use recovery_core::{
        reconstruct_robust_source, reconstruct_source, RecoveryResult,
        SearchOptions, SearchState, SelectionStrategy, ShareSet, ShareSource,
    };

    fn fixture(name: &str) -> ShareSet {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name);
        ShareSet::from_path(&path).expect("Fixture should parse")
    }

    #[test]
    fn indexed_document_recovers_secret_on_both_paths() -> RecoveryResult<()> {
        let set = fixture("indexed.json");
        assert_eq!(set.share_count(), 4);

        // every 3-subset of these shares lies on x^2 + 3
        for seed in 0..4 {
            let secret =
                reconstruct_source(&set, &SelectionStrategy::Seeded(seed))?;
            assert_eq!(secret, BigUint::from(3u8));
        }

        let outcome =
            reconstruct_robust_source(&set, SearchOptions::sequential())?;
        let recovered = outcome.found().expect("Clean shares must be accepted");
        assert_eq!(recovered.secret, BigUint::from(3u8));
        assert_eq!(
            recovered.polynomial.coefficients(),
            &[3u8, 0, 1].map(BigUint::from)
        );
        Ok(())
    }

    #[test]
    fn token_document_survives_a_bad_token() -> RecoveryResult<()> {
        let set = fixture("tokens.json");

        let outcome =
            reconstruct_robust_source(&set, SearchOptions::parallel(4))?;
        let recovered = outcome.found().expect("One bad token is tolerated");
        assert_eq!(recovered.secret, BigUint::from(1234u16));
        assert_eq!(recovered.inconsistent_shares(), &[3]);
        assert_eq!(
            recovered.consistent_shares(set.share_count()),
            vec![0, 1, 2, 4, 5]
        );

        // the trusting path is fooled once the bad token is selected
        let fooled = reconstruct_source(
            &set,
            &SelectionStrategy::Indices(vec![0, 1, 3]),
        )?;
        assert_ne!(fooled, BigUint::from(1234u16));
        Ok(())
    }

    #[test]
    fn canonical_document_mixes_encodings() -> RecoveryResult<()> {
        let set = fixture("canonical.json");
        assert_eq!(
            set.shares()[1].y,
            BigUint::from(106u8),
            "hex share must decode"
        );

        let outcome =
            reconstruct_robust_source(&set, SearchOptions::sequential())?;
        assert_eq!(outcome.secret(), Some(&BigUint::from(100u8)));

        let tightened = set.clone().with_max_bad(0);
        let outcome =
            reconstruct_robust_source(&tightened, SearchOptions::sequential())?;
        assert_eq!(outcome.state(), SearchState::Exhausted);
        Ok(())
    }

    #[test]
    fn canonical_output_round_trips_every_layout() {
        for name in ["indexed.json", "tokens.json", "canonical.json"] {
            let set = fixture(name);
            let json = set.to_json().expect("ShareSet should serialize");
            let reparsed =
                ShareSet::parse_document(&json).expect("Canonical form parses");
            assert_eq!(reparsed, set, "{name}");
        }
    }

    #[test]
    fn threshold_override_is_validated() {
        let set = fixture("canonical.json").with_threshold(5);
        let err = reconstruct_source(&set, &SelectionStrategy::First)
            .expect_err("Threshold above share count must fail");
        assert!(err.is_config_error());
    }
}
