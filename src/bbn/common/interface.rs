use crate::bbn::error::Result;
use crate::bbn::model::network::BeliefNetwork;

/// A named, programmatically built reference network.
pub trait NetworkScenario {
    fn name(&self) -> &str;

    fn build(&self) -> Result<BeliefNetwork>;
}
