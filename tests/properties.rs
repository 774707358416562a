//! Property tests for the quantizer and the hypervector algebra.
//!
//! Run with: `cargo test --test properties`

use hdemg::prelude::*;
use proptest::prelude::*;

// =============================================================================
// AMPLITUDE QUANTIZER
// =============================================================================

mod quantizer {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_level_in_range(amp in -100.0f64..100.0, levels in 1usize..64) {
            let q = AmplitudeQuantizer::new(0.0, 20.0, levels).unwrap();
            prop_assert!(q.quantize(amp) < levels);
        }

        #[test]
        fn prop_monotone(a in -5.0f64..25.0, b in -5.0f64..25.0, levels in 1usize..32) {
            let q = AmplitudeQuantizer::new(0.0, 20.0, levels).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(q.quantize(lo) <= q.quantize(hi));
        }

        #[test]
        fn prop_clamped_above_maximum(excess in 0.0f64..1000.0, levels in 1usize..32) {
            let q = AmplitudeQuantizer::new(0.0, 20.0, levels).unwrap();
            prop_assert_eq!(q.quantize(20.0 + excess), levels - 1);
        }
    }

    #[test]
    fn test_reference_levels() {
        let q = AmplitudeQuantizer::new(0.0, 20.0, 10).unwrap();
        assert_eq!(q.quantize(25.0), q.quantize(20.0));
        assert_eq!(q.quantize(0.0), 0);
        assert_eq!(q.quantize(2.0), 0);
        assert_eq!(q.quantize(2.1), 1);
        assert_eq!(q.quantize(19.9), 9);
    }
}

// =============================================================================
// HYPERVECTOR ALGEBRA
// =============================================================================

mod algebra {
    use super::*;

    fn check_distance_axioms<V: Hypervector>(seed: u64, dim: usize) -> Result<(), TestCaseError> {
        let mut rng = Random::new(seed);
        let a = V::random(dim, &mut rng);
        let b = V::random(dim, &mut rng);

        prop_assert!(a.distance(&a) < 1e-6);
        prop_assert_eq!(a.distance(&b), b.distance(&a));
        let d = a.distance(&b);
        prop_assert!((0.0..=1.0).contains(&d));
        Ok(())
    }

    fn check_permute<V: Hypervector>(seed: u64, dim: usize, shift: usize) -> Result<(), TestCaseError> {
        let mut rng = Random::new(seed);
        let a = V::random(dim, &mut rng);
        let b = V::random(dim, &mut rng);

        prop_assert_eq!(a.permute(dim), a.clone());
        prop_assert_eq!(a.permute(shift).permute(dim - shift % dim), a.clone());
        let before = a.distance(&b);
        let after = a.permute(shift).distance(&b.permute(shift));
        prop_assert!((before - after).abs() < 1e-5);
        Ok(())
    }

    fn check_bundle_similarity<V: Hypervector>(seed: u64) -> Result<(), TestCaseError> {
        let mut rng = Random::new(seed);
        let vectors: Vec<V> = (0..3).map(|_| V::random(2048, &mut rng)).collect();
        let bundled = V::bundle(&vectors);
        for v in &vectors {
            prop_assert!(bundled.distance(v) < 0.4);
        }
        let stranger = V::random(2048, &mut rng);
        prop_assert!(bundled.distance(&stranger) > 0.4);
        Ok(())
    }

    fn check_bind_dissimilar<V: Hypervector>(seed: u64) -> Result<(), TestCaseError> {
        let mut rng = Random::new(seed);
        let a = V::random(2048, &mut rng);
        let b = V::random(2048, &mut rng);
        let bound = a.bind(&b);
        prop_assert!((bound.distance(&a) - 0.5).abs() < 0.1);
        prop_assert!((bound.distance(&b) - 0.5).abs() < 0.1);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_distance_axioms(seed in any::<u64>(), dim in 1usize..600) {
            check_distance_axioms::<BinaryHypervector>(seed, dim)?;
            check_distance_axioms::<IntegerHypervector>(seed, dim)?;
            check_distance_axioms::<FloatHypervector>(seed, dim)?;
        }

        #[test]
        fn prop_permute_is_a_rotation(seed in any::<u64>(), dim in 1usize..600, shift in 0usize..2000) {
            check_permute::<BinaryHypervector>(seed, dim, shift)?;
            check_permute::<IntegerHypervector>(seed, dim, shift)?;
            check_permute::<FloatHypervector>(seed, dim, shift)?;
        }

        #[test]
        fn prop_bundle_resembles_operands(seed in any::<u64>()) {
            check_bundle_similarity::<BinaryHypervector>(seed)?;
            check_bundle_similarity::<IntegerHypervector>(seed)?;
            check_bundle_similarity::<FloatHypervector>(seed)?;
        }

        #[test]
        fn prop_bind_is_dissimilar(seed in any::<u64>()) {
            check_bind_dissimilar::<BinaryHypervector>(seed)?;
            check_bind_dissimilar::<IntegerHypervector>(seed)?;
            check_bind_dissimilar::<FloatHypervector>(seed)?;
        }

        #[test]
        fn prop_binary_bind_self_inverse(seed in any::<u64>(), dim in 1usize..600) {
            let mut rng = Random::new(seed);
            let a = BinaryHypervector::random(dim, &mut rng);
            let b = BinaryHypervector::random(dim, &mut rng);
            prop_assert_eq!(a.bind(&b).bind(&b), a);
        }
    }
}
