use anyhow::{Context, Result, anyhow, bail};
use clap::{Arg, ArgMatches, Command, builder::EnumValueParser, value_parser};
use env_logger::{Builder, Env};
use std::collections::HashMap;
use std::io::Write;

use super::tabular::TabularOptions;
use crate::bbn::learning::bindings::BindingMode;
use crate::bbn::learning::config::LearnerConfig;
use crate::bbn::model::node::Value;
use crate::bbn::scenarios::factory::ScenarioFactory;

/// Options for `sample`: draw records from a reference network.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleOptions {
    pub scenario_name: String,
    pub records: usize,
    pub seed: Option<u64>,
    pub clamps: HashMap<String, Value>,
    pub output_file: Option<String>,
    pub delimiter: char,
}

/// Options for `learn`: find the Markov blanket of a column.
#[derive(Clone, Debug, PartialEq)]
pub struct LearnOptions {
    pub input_file: String,
    pub target: String,
    pub learner: LearnerConfig,
    pub tabular: TabularOptions,
    pub report_file: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CommandLineOptions {
    Sample(SampleOptions),
    Learn(LearnOptions),
}

/// Installs the `LEVEL [file:line] message` logger. Safe to call twice.
pub fn init_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let file = record.file().unwrap_or("unknown");
            let line = record.line().unwrap_or(0);
            writeln!(
                buf,
                "{} [{}:{}] {}",
                record.level(),
                file,
                line,
                record.args()
            )
        })
        .try_init();
}

fn delimiter_arg() -> Arg {
    Arg::new("delimiter")
        .long("delimiter")
        .value_name("CHAR")
        .help("Field delimiter")
        .default_value(",")
}

pub fn build_command() -> Command {
    Command::new("BELIEFNET")
        .version("0.1")
        .about("Forward sampling of discrete belief networks and Grow-Shrink Markov blanket learning.")
        .subcommand_required(true)
        .subcommand(
            Command::new("sample")
                .about("Sample records from a reference network")
                .arg(
                    Arg::new("scenario")
                        .long("scenario")
                        .value_name("STRING")
                        .help(format!("Network to sample: {}", ScenarioFactory::names().join(", ")))
                        .required(true),
                )
                .arg(
                    Arg::new("records")
                        .long("records")
                        .value_name("NUMBER")
                        .value_parser(value_parser!(usize))
                        .help("Number of records to draw")
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("NUMBER")
                        .value_parser(value_parser!(u64))
                        .help("Random seed (optional)"),
                )
                .arg(
                    Arg::new("clamp")
                        .long("clamp")
                        .value_name("NODE=VALUE")
                        .help("Fix a node to a value; may be repeated")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .value_name("FILE")
                        .help("Write records here instead of stdout"),
                )
                .arg(delimiter_arg()),
        )
        .subcommand(
            Command::new("learn")
                .about("Find the Markov blanket of a variable in tabular data")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("FILE")
                        .help("Delimited file of 0/1 values")
                        .required(true),
                )
                .arg(
                    Arg::new("target")
                        .long("target")
                        .value_name("STRING")
                        .help("Variable of interest")
                        .required(true),
                )
                .arg(
                    Arg::new("significance")
                        .long("significance")
                        .value_name("P")
                        .value_parser(value_parser!(f64))
                        .help("p-value at or below which variables are dependent (default 0.5)"),
                )
                .arg(
                    Arg::new("binding_mode")
                        .long("binding-mode")
                        .value_parser(EnumValueParser::<BindingMode>::new())
                        .help("How conditioning bindings are generated"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("NUMBER")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for binding sampling (optional)"),
                )
                .arg(
                    Arg::new("columns")
                        .long("columns")
                        .value_name("A,B,...")
                        .help("Column names; the input then has no header row"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .help("JSON learner configuration"),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_name("FILE")
                        .help("Write a JSON report of the result"),
                )
                .arg(delimiter_arg()),
        )
}

fn parse_delimiter(matches: &ArgMatches) -> Result<char> {
    let raw = matches
        .get_one::<String>("delimiter")
        .map(|s| s.as_str())
        .unwrap_or(",");
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("delimiter must be a single character, got '{}'", raw),
    }
}

/// Parses `NODE=VALUE`.
pub fn parse_clamp(raw: &str) -> Result<(String, Value)> {
    let (node, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("clamp '{}' is not of the form NODE=VALUE", raw))?;
    let value: Value = value
        .trim()
        .parse()
        .with_context(|| format!("clamp value in '{}' must be a non-negative integer", raw))?;
    Ok((node.trim().to_string(), value))
}

fn sample_options(matches: &ArgMatches) -> Result<SampleOptions> {
    let scenario_name = matches
        .get_one::<String>("scenario")
        .ok_or_else(|| anyhow!("scenario is required"))?
        .to_string();
    let records = matches.get_one::<usize>("records").copied().unwrap_or(1000);
    let seed = matches.get_one::<u64>("seed").copied();
    let clamps = matches
        .get_many::<String>("clamp")
        .into_iter()
        .flatten()
        .map(|raw| parse_clamp(raw))
        .collect::<Result<HashMap<_, _>>>()?;
    let output_file = matches.get_one::<String>("output").map(|s| s.to_string());

    Ok(SampleOptions {
        scenario_name,
        records,
        seed,
        clamps,
        output_file,
        delimiter: parse_delimiter(matches)?,
    })
}

fn learn_options(matches: &ArgMatches) -> Result<LearnOptions> {
    let input_file = matches
        .get_one::<String>("input")
        .ok_or_else(|| anyhow!("input is required"))?
        .to_string();
    let target = matches
        .get_one::<String>("target")
        .ok_or_else(|| anyhow!("target is required"))?
        .to_string();

    // File configuration first, flags override it.
    let mut learner = match matches.get_one::<String>("config") {
        Some(path) => LearnerConfig::load_from_file(path)
            .with_context(|| format!("reading learner config '{}'", path))?,
        None => LearnerConfig::default(),
    };
    if let Some(significance) = matches.get_one::<f64>("significance") {
        learner.significance = *significance;
    }
    if let Some(mode) = matches.get_one::<BindingMode>("binding_mode") {
        learner.binding_mode = *mode;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        learner.seed = Some(*seed);
    }

    let columns = matches.get_one::<String>("columns").map(|s| {
        s.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    });

    Ok(LearnOptions {
        input_file,
        target,
        learner,
        tabular: TabularOptions {
            delimiter: parse_delimiter(matches)?,
            columns,
        },
        report_file: matches.get_one::<String>("report").map(|s| s.to_string()),
    })
}

pub fn options_from_matches(matches: &ArgMatches) -> Result<CommandLineOptions> {
    match matches.subcommand() {
        Some(("sample", sub)) => Ok(CommandLineOptions::Sample(sample_options(sub)?)),
        Some(("learn", sub)) => Ok(CommandLineOptions::Learn(learn_options(sub)?)),
        _ => bail!("expected a subcommand: sample or learn"),
    }
}

/// Initializes logging and parses the process arguments.
pub fn parse_configuration_options() -> Result<CommandLineOptions> {
    init_logging();
    let matches = build_command().get_matches();
    options_from_matches(&matches)
}
