#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use circuit_sim::backend::StateVectorBackend;

    #[test]
    fn fifteen_seven_peaks_at_multiples_of_quarter() {
        let pe = build_circuit(15, 7, 8).unwrap();
        let probs = StateVectorBackend::with_seed(0)
            .probabilities(pe.circuit())
            .unwrap();
        assert_eq!(probs.len(), 256);
        for (y, p) in probs.iter().enumerate() {
            let expected = if y % 64 == 0 { 0.25 } else { 0.0 };
            assert!(
                (p - expected).abs() < 1e-9,
                "P({}) = {}, expected {}",
                y,
                p,
                expected
            );
        }
        // 192 / 256 = 3/4
        assert_eq!(estimate_order(192, 8, 15).unwrap(), 4);
    }

    #[test]
    fn data_register_keeps_residues_of_powers() {
        // The inverse QFT acts on ctrl only; data stays on residues 7^k mod 15.
        let pe = build_circuit(15, 7, 4).unwrap();
        let state = StateVectorBackend::with_seed(0)
            .state_vector(pe.circuit())
            .unwrap();
        let m = pe.control_qubits();
        let allowed = [1usize, 7, 4, 13];
        for (i, amp) in state.iter().enumerate() {
            if amp.norm_sqr() > 1e-12 {
                let data = i >> m;
                assert!(allowed.contains(&data), "unexpected data value {}", data);
            }
        }
    }

    #[test]
    fn twenty_one_two_recovers_six() {
        let m = OrderFindingConfig::default().control_qubits(21);
        assert_eq!(m, 10);
        let pe = build_circuit(21, 2, m).unwrap();
        assert_eq!(pe.circuit().num_qubits(), 15);
        let probs = StateVectorBackend::with_seed(0)
            .probabilities(pe.circuit())
            .unwrap();
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);

        let p_six: f64 = probs
            .iter()
            .enumerate()
            .filter(|&(y, _)| estimate_order(y as u64, m, 21).unwrap() == 6)
            .map(|(_, p)| p)
            .sum();
        assert!(p_six > 0.3, "P(r = 6) = {}", p_six);
        // the peak nearest 1/6
        assert!(probs[171] > 0.1);
    }

    #[test]
    fn single_trial_returns_divisor_of_order() {
        let config = OrderFindingConfig::default().with_m(8).with_shots(256).with_seed(11);
        let mut finder = QuantumOrderFinder::new(config);
        let est = finder.find_order_detailed(15, 7).unwrap();
        assert_eq!(est.histogram.total(), 256);
        assert_eq!(est.control_qubits, 8);
        assert_eq!(est.measured % 64, 0);
        assert_eq!(4 % est.order, 0);
        for (bits, _) in est.histogram.iter() {
            let y = u64::from_str_radix(bits, 2).unwrap();
            assert_eq!(y % 64, 0, "outcome {} off the peaks", bits);
        }
    }

    #[test]
    fn repeated_trials_find_true_order() {
        let mut quantum = QuantumOrderFinder::new(OrderFindingConfig::default().with_seed(2024));
        let mut classical = ClassicalOrderFinder;
        for &(n, a) in &[(15u64, 7u64), (15, 2), (21, 2)] {
            let truth = classical.find_order(n, a).unwrap();
            let mut combined = 1;
            let mut found = false;
            for _ in 0..60 {
                match quantum.find_order(n, a) {
                    Ok(r) => {
                        if is_order_candidate(a, r, n) && r == truth {
                            found = true;
                        }
                        if truth % r == 0 {
                            combined = lcm(combined, r);
                        }
                    }
                    Err(OrderFindingError::DegenerateMeasurement { .. }) => {}
                    Err(e) => panic!("trial failed: {}", e),
                }
            }
            assert!(found, "order of {} mod {} never recovered", a, n);
            assert_eq!(combined, truth);
        }
    }

    #[test]
    fn config_m_is_not_pinned_between_moduli() {
        let mut finder = QuantumOrderFinder::new(OrderFindingConfig::default().with_seed(5));
        let a = finder.find_order_detailed(15, 7).unwrap();
        let b = finder.find_order_detailed(21, 2).unwrap();
        assert_eq!(a.control_qubits, 9);
        assert_eq!(b.control_qubits, 10);
        assert_eq!(b.bitstring.len(), 10);
    }

    #[test]
    fn default_config_refuses_moduli_beyond_simulator() {
        let mut finder = QuantumOrderFinder::new(OrderFindingConfig::default().with_seed(1));
        assert!(matches!(
            finder.find_order(4095, 2),
            Err(OrderFindingError::RegisterTooLarge { register: "data", .. })
        ));
        // m = 21 and n = 10 fit separately but not together
        assert!(matches!(
            finder.find_order(1000, 3),
            Err(OrderFindingError::RegisterTooLarge { register: "ctrl+data", qubits: 31, .. })
        ));
    }

    #[test]
    fn invalid_base_reported() {
        let mut finder = QuantumOrderFinder::default();
        let err = finder.find_order(15, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "gcd(3, 15) = 3 > 1: base and modulus must be coprime"
        );
    }
}
