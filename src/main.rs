use anyhow::{Context, Result};
use beliefnet::bbn::common::setup::{
    CommandLineOptions, LearnOptions, SampleOptions, parse_configuration_options,
};
use beliefnet::bbn::common::tabular::write_records;
use beliefnet::bbn::learning::{BlanketReport, GrowShrinkLearner, JointTable};
use beliefnet::bbn::scenarios::factory::ScenarioFactory;
use beliefnet::{print_green, print_yellow};
use log::info;
use rand::{SeedableRng, rngs::StdRng};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

fn run_sample(options: &SampleOptions) -> Result<()> {
    let scenario = ScenarioFactory::new_shared(&options.scenario_name)?;
    let network = scenario.build()?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let clamps = (!options.clamps.is_empty()).then_some(&options.clamps);
    let records = network.sample_batch(options.records, clamps, &mut rng)?;
    let columns = network.ids();

    match &options.output_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating '{}'", path))?;
            write_records(BufWriter::new(file), &columns, &records, options.delimiter)?;
            info!("Wrote {} records of {} to {}", records.len(), scenario.name(), path);
        }
        None => write_records(io::stdout().lock(), &columns, &records, options.delimiter)?,
    }
    Ok(())
}

fn run_learn(options: &LearnOptions) -> Result<()> {
    let file = File::open(&options.input_file)
        .with_context(|| format!("opening '{}'", options.input_file))?;
    let table = JointTable::from_reader(BufReader::new(file), &options.tabular)
        .with_context(|| format!("reading '{}'", options.input_file))?;
    info!(
        "Loaded {} rows ({} distinct) over {} variables",
        table.total_rows(),
        table.distinct_rows(),
        table.columns().len()
    );

    let mut learner = GrowShrinkLearner::new(table, options.learner.clone());
    let blanket = learner.find_markov_blanket(&options.target)?;
    if blanket.is_empty() {
        print_yellow!("Markov blanket of {} is empty", options.target);
    } else {
        print_green!(
            "Markov blanket of {}: {}",
            options.target,
            blanket.iter().cloned().collect::<Vec<_>>().join(", ")
        );
    }

    if let Some(path) = &options.report_file {
        BlanketReport::new(&learner, &options.target, blanket).save_to_file(path)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    match parse_configuration_options()? {
        CommandLineOptions::Sample(options) => run_sample(&options),
        CommandLineOptions::Learn(options) => run_learn(&options),
    }
}
