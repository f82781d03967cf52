//! Unit tests for pk-network.

use pk_core::{CompartmentId, PkError, ReactionId};

use crate::{ReactionNetwork, ReactionNetworkBuilder, SystemState};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A → B (rate 1.0), B → C (rate 2.0), C → A (rate 0.0).
fn ring() -> ReactionNetwork {
    let mut b = ReactionNetworkBuilder::new();
    b.add_compartment("A");
    b.add_compartment("B");
    b.add_compartment("C");
    b.add_reaction("A", "B", 1.0);
    b.add_reaction("B", "C", 2.0);
    b.add_reaction("C", "A", 0.0);
    b.build().unwrap()
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn ids_follow_declaration_order() {
        let net = ring();
        assert_eq!(net.compartment_count(), 3);
        assert_eq!(net.reaction_count(), 3);
        assert_eq!(net.compartment_id("A"), Some(CompartmentId(0)));
        assert_eq!(net.compartment_id("C"), Some(CompartmentId(2)));
        assert_eq!(net.compartment_name(CompartmentId(1)), "B");
        let r = net.reaction(ReactionId(1)).unwrap();
        assert_eq!(r.source, CompartmentId(1));
        assert_eq!(r.destination, CompartmentId(2));
        assert_eq!(r.rate, 2.0);
    }

    #[test]
    fn unknown_compartment_rejected() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_reaction("A", "Nowhere", 1.0);
        let err = b.build().unwrap_err();
        assert!(matches!(err, PkError::UnknownCompartment(ref n) if n == "Nowhere"));
        assert!(err.is_config());
    }

    #[test]
    fn negative_rate_rejected() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_compartment("B");
        b.add_reaction("A", "B", -0.1);
        assert!(matches!(b.build(), Err(PkError::InvalidRate { .. })));
    }

    #[test]
    fn non_finite_rate_rejected() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_compartment("B");
        b.add_reaction("A", "B", f64::NAN);
        assert!(matches!(b.build(), Err(PkError::InvalidRate { .. })));
    }

    #[test]
    fn zero_rate_is_allowed() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_compartment("B");
        b.add_reaction("A", "B", 0.0);
        assert!(b.build().is_ok());
    }

    #[test]
    fn duplicate_compartment_rejected() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_compartment("A");
        assert!(matches!(b.build(), Err(PkError::DuplicateCompartment(_))));
    }

    #[test]
    fn self_loop_rejected() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("A");
        b.add_reaction("A", "A", 1.0);
        assert!(matches!(b.build(), Err(PkError::Config(_))));
    }

    #[test]
    fn empty_network_rejected() {
        assert!(ReactionNetworkBuilder::new().build().is_err());
    }

    #[test]
    fn outgoing_groups_by_source() {
        let mut b = ReactionNetworkBuilder::new();
        b.add_compartment("Hub");
        b.add_compartment("X");
        b.add_compartment("Y");
        b.add_reaction("Hub", "X", 1.0); // 0
        b.add_reaction("X", "Hub", 1.0); // 1
        b.add_reaction("Hub", "Y", 1.0); // 2
        let net = b.build().unwrap();

        let hub: Vec<ReactionId> = net.outgoing(CompartmentId(0)).map(|r| r.id).collect();
        assert_eq!(hub, vec![ReactionId(0), ReactionId(2)]);
        assert_eq!(net.outgoing(CompartmentId(2)).count(), 0);
    }

    #[test]
    fn absorbing_compartments() {
        let net = ring();
        assert!(!net.is_absorbing(CompartmentId(0)));
        assert!(net.is_absorbing(CompartmentId(2))); // only a zero-rate exit
    }

    #[test]
    fn require_reports_unknown() {
        let net = ring();
        assert!(net.require("B").is_ok());
        assert!(matches!(net.require("Z"), Err(PkError::UnknownCompartment(_))));
    }
}

// ── SystemState ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod state {
    use super::*;

    #[test]
    fn dose_goes_to_source_only() {
        let net = ring();
        let s = SystemState::with_dose(&net, CompartmentId(1), 50);
        assert_eq!(s.counts(), &[0, 50, 0]);
        assert_eq!(s.total(), 50);
    }

    #[test]
    fn apply_moves_one_molecule() {
        let net = ring();
        let mut s = SystemState::with_dose(&net, CompartmentId(0), 3);
        let r = *net.reaction(ReactionId(0)).unwrap();
        assert!(s.apply(&r));
        assert_eq!(s.counts(), &[2, 1, 0]);
        assert_eq!(s.total(), 3);
    }

    #[test]
    fn apply_on_empty_source_is_clamped() {
        let net = ring();
        let mut s = SystemState::with_dose(&net, CompartmentId(0), 3);
        let r = *net.reaction(ReactionId(1)).unwrap(); // B → C, B is empty
        assert!(!s.apply(&r));
        assert_eq!(s.counts(), &[3, 0, 0]);
    }

    #[test]
    fn named_pairs() {
        let net = ring();
        let s = SystemState::from_counts(vec![1, 2, 3]);
        let pairs: Vec<(&str, u64)> = s.named(&net).collect();
        assert_eq!(pairs, vec![("A", 1), ("B", 2), ("C", 3)]);
    }
}

// ── Propensities ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod propensity {
    use super::*;
    use crate::propensity::{compute, compute_into, Propensities};

    #[test]
    fn rate_times_source_count() {
        let net = ring();
        let s = SystemState::from_counts(vec![4, 5, 6]);
        let p = compute(&net, &s);
        assert_eq!(p.values, vec![4.0, 10.0, 0.0]);
        assert_eq!(p.total, 14.0);
    }

    #[test]
    fn compute_into_reuses_buffer() {
        let net = ring();
        let mut p = Propensities::for_network(&net);
        compute_into(&net, &SystemState::from_counts(vec![1, 0, 0]), &mut p);
        assert_eq!(p.total, 1.0);
        compute_into(&net, &SystemState::from_counts(vec![0, 2, 0]), &mut p);
        assert_eq!(p.values, vec![0.0, 4.0, 0.0]);
        assert_eq!(p.total, 4.0);
    }

    #[test]
    fn all_empty_gives_zero_total() {
        let net = ring();
        let p = compute(&net, &SystemState::empty(&net));
        assert_eq!(p.total, 0.0);
        assert_eq!(p.select(0.5), None);
    }

    #[test]
    fn select_uses_cumulative_scan() {
        // values [1, 3] → total 4; reaction 0 covers [0, 0.25), reaction 1 the rest.
        let p = Propensities { values: vec![1.0, 3.0], total: 4.0 };
        assert_eq!(p.select(0.0), Some(ReactionId(0)));
        assert_eq!(p.select(0.2499), Some(ReactionId(0)));
        assert_eq!(p.select(0.25), Some(ReactionId(1))); // strict: 1.0 > 1.0 is false
        assert_eq!(p.select(0.9999), Some(ReactionId(1)));
    }

    #[test]
    fn select_skips_zero_propensity() {
        let p = Propensities { values: vec![0.0, 2.0, 0.0], total: 2.0 };
        for r2 in [0.0, 0.3, 0.999] {
            assert_eq!(p.select(r2), Some(ReactionId(1)));
        }
    }

    #[test]
    fn select_falls_back_on_rounding() {
        // A total slightly larger than the true sum simulates float drift.
        let p = Propensities { values: vec![1.0, 1.0, 0.0], total: 2.000_000_1 };
        assert_eq!(p.select(0.999_999_99), Some(ReactionId(1)));
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use super::*;
    use crate::{load_network_csv, load_network_reader};

    #[test]
    fn loads_reactions_and_implicit_compartments() {
        let csv = "source,destination,rate\n\
                   Heart,Lung,0.5\n\
                   Lung,Heart,0.25\n";
        let net = load_network_reader(Cursor::new(csv)).unwrap();
        assert_eq!(net.compartment_count(), 2);
        assert_eq!(net.compartment_id("Heart"), Some(CompartmentId(0)));
        assert_eq!(net.reaction(ReactionId(1)).unwrap().rate, 0.25);
    }

    #[test]
    fn isolated_compartment_row() {
        let csv = "source,destination,rate\n\
                   Heart,Lung,0.5\n\
                   Depot,,\n";
        let net = load_network_reader(Cursor::new(csv)).unwrap();
        assert_eq!(net.compartment_count(), 3);
        assert_eq!(net.reaction_count(), 1);
        assert!(net.is_absorbing(net.compartment_id("Depot").unwrap()));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let csv = "source, destination, rate\n Heart , Lung , 1.5 \n";
        let net = load_network_reader(Cursor::new(csv)).unwrap();
        assert_eq!(net.compartment_id("Lung"), Some(CompartmentId(1)));
        assert_eq!(net.reactions()[0].rate, 1.5);
    }

    #[test]
    fn half_empty_row_is_parse_error() {
        let csv = "source,destination,rate\nHeart,Lung,\n";
        assert!(matches!(
            load_network_reader(Cursor::new(csv)),
            Err(PkError::Parse(_))
        ));
    }

    #[test]
    fn bad_rate_is_parse_error() {
        let csv = "source,destination,rate\nHeart,Lung,fast\n";
        assert!(matches!(
            load_network_reader(Cursor::new(csv)),
            Err(PkError::Parse(_))
        ));
    }

    #[test]
    fn negative_rate_is_config_error() {
        let csv = "source,destination,rate\nHeart,Lung,-1\n";
        let err = load_network_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("network.csv");
        std::fs::write(
            &path,
            "source,destination,rate\nHeart,Brain,0.1\nBrain,Heart,0.05\n",
        )
        .unwrap();

        let net = load_network_csv(&path).unwrap();
        assert_eq!(net.compartment_count(), 2);
        assert_eq!(net.reaction_count(), 2);
        assert_eq!(net.compartment_id("Brain"), Some(CompartmentId(1)));
        assert_eq!(net.reactions()[1].rate, 0.05);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let result = load_network_csv(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(PkError::Io(_))));
    }
}

// ── Presets ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod presets {
    use super::*;
    use crate::presets::{self, HEART};

    #[test]
    fn two_compartment_layout() {
        let net = presets::two_compartment(0.5, 0.25).unwrap();
        assert_eq!(net.compartment_count(), 2);
        let r = net.reactions();
        assert_eq!(net.compartment_name(r[0].source), HEART);
        assert_eq!(r[0].rate, 0.5);
        assert_eq!(net.compartment_name(r[1].source), "Lung");
        assert_eq!(r[1].rate, 0.25);
    }

    #[test]
    fn vital_organs_layout() {
        let net = presets::vital_organs().unwrap();
        assert_eq!(net.compartment_count(), 5);
        assert_eq!(net.reaction_count(), 8);
        let heart = net.compartment_id(HEART).unwrap();
        assert_eq!(heart, CompartmentId(0));
        assert_eq!(net.outgoing(heart).count(), 4);
        let total_out: f64 = net.outgoing(heart).map(|r| r.rate).sum();
        assert!((total_out - 0.7).abs() < 1e-12);
        let brain = net.compartment_id("Brain").unwrap();
        assert_eq!(net.outgoing(brain).next().unwrap().rate, 0.05);
    }
}
