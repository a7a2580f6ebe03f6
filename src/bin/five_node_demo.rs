use beliefnet::bbn::common::interface::NetworkScenario;
use beliefnet::bbn::common::setup::init_logging;
use beliefnet::bbn::learning::{GrowShrinkLearner, JointTable, LearnerConfig};
use beliefnet::bbn::scenarios::five_node::FiveNode;
use beliefnet::{print_green, print_yellow};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use std::error::Error;

const RECORDS: usize = 20_000;

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    println!("Sampling the five-node reference network");

    let network = FiveNode {}.build()?;
    let mut rng = StdRng::seed_from_u64(2016);

    let records = network.sample_batch(RECORDS, None, &mut rng)?;
    println!("Drew {} records, first: {:?}", records.len(), records[0]);

    let clamps = HashMap::from([("A".to_string(), 0), ("E".to_string(), 0)]);
    let clamped = network.sample(Some(&clamps), &mut rng)?;
    println!("Clamped A=0, E=0: {:?}", clamped);

    let table = JointTable::from_records(&records)?;
    println!(
        "Joint table: {} rows, {} distinct",
        table.total_rows(),
        table.distinct_rows()
    );

    let config = LearnerConfig::default().with_significance(0.05).with_seed(7);
    let mut learner = GrowShrinkLearner::new(table, config);
    for id in network.ids() {
        let blanket = learner.find_markov_blanket(&id)?;
        if blanket.is_empty() {
            print_yellow!("{}: {{}}", id);
        } else {
            print_green!(
                "{}: {{{}}}",
                id,
                blanket.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
    }
    Ok(())
}
