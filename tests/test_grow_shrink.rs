#[cfg(test)]
mod test_grow_shrink {
    use beliefnet::bbn::common::interface::NetworkScenario;
    use beliefnet::bbn::common::tabular::{TabularOptions, write_records};
    use beliefnet::bbn::learning::{BlanketReport, GrowShrinkLearner, JointTable, LearnerConfig};
    use beliefnet::bbn::scenarios::five_node::FiveNode;
    use beliefnet::bbn::scenarios::four_parents::FourParents;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::BTreeSet;
    use std::fs::File;
    use std::io::{BufReader, BufWriter};

    fn parents() -> BTreeSet<String> {
        FourParents::PARENTS.iter().map(|p| p.to_string()).collect()
    }

    fn sampled_table(scenario: &dyn NetworkScenario, rows: usize, seed: u64) -> JointTable {
        let network = scenario.build().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let records = network.sample_batch(rows, None, &mut rng).unwrap();
        JointTable::from_records(&records).unwrap()
    }

    #[test]
    fn test_recovers_four_parents() {
        let table = sampled_table(&FourParents { noise: false }, 5000, 17);
        let config = LearnerConfig::default().with_significance(0.05).with_seed(3);
        let mut learner = GrowShrinkLearner::new(table, config);
        assert_eq!(learner.find_markov_blanket("Y").unwrap(), parents());
    }

    #[test]
    fn test_noise_variables_left_out() {
        let table = sampled_table(&FourParents { noise: true }, 5000, 23);
        let config = LearnerConfig::default().with_significance(1e-4).with_seed(3);
        let mut learner = GrowShrinkLearner::new(table, config);
        let blanket = learner.find_markov_blanket("Y").unwrap();
        assert_eq!(blanket, parents());
    }

    #[test]
    fn test_loose_significance_keeps_parents() {
        // The inherited 0.5 cutoff over-includes but never drops a true parent here.
        let table = sampled_table(&FourParents { noise: true }, 5000, 29);
        let mut learner = GrowShrinkLearner::new(table, LearnerConfig::default().with_seed(11));
        let blanket = learner.find_markov_blanket("Y").unwrap();
        assert!(blanket.is_superset(&parents()));
        assert!(blanket.len() <= 6);
        assert!(!blanket.contains("Y"));
    }

    #[test]
    fn test_grow_then_shrink_matches_find() {
        let table = sampled_table(&FourParents { noise: false }, 3000, 5);
        let config = LearnerConfig::default().with_significance(0.01).with_seed(9);
        let mut learner = GrowShrinkLearner::new(table, config);
        let grown = learner.grow("Y").unwrap();
        assert_eq!(grown, vec!["X1", "X2", "X3", "X4"]);
        let shrunk = learner.shrink("Y", &grown).unwrap();
        assert_eq!(shrunk, parents());
    }

    #[test]
    fn test_five_node_child_keeps_its_parent() {
        let table = sampled_table(&FiveNode {}, 20_000, 2016);
        let config = LearnerConfig::default().with_significance(0.05).with_seed(1);
        let mut learner = GrowShrinkLearner::new(table, config);
        let blanket = learner.find_markov_blanket("D").unwrap();
        assert!(blanket.contains("B"), "blanket of D: {:?}", blanket);
    }

    #[test]
    fn test_csv_file_and_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("four_parents.csv");
        let report_path = dir.path().join("report.json");

        let network = FourParents { noise: false }.build().unwrap();
        let mut rng = StdRng::seed_from_u64(31);
        let records = network.sample_batch(4000, None, &mut rng).unwrap();
        let file = File::create(&data_path).unwrap();
        write_records(BufWriter::new(file), &network.ids(), &records, ',').unwrap();

        let file = File::open(&data_path).unwrap();
        let table =
            JointTable::from_reader(BufReader::new(file), &TabularOptions::default()).unwrap();
        assert_eq!(table.total_rows(), 4000);

        let config = LearnerConfig::default().with_significance(0.05).with_seed(2);
        let mut learner = GrowShrinkLearner::new(table, config);
        let blanket = learner.find_markov_blanket("Y").unwrap();

        let report = BlanketReport::new(&learner, "Y", blanket.clone());
        report.save_to_file(&report_path).unwrap();
        let loaded = BlanketReport::load_from_file(&report_path).unwrap();
        assert_eq!(loaded, report);
        assert_eq!(loaded.blanket, parents());
        assert_eq!(loaded.total_rows, 4000);
        assert_eq!(loaded.seed, Some(2));
    }
}
