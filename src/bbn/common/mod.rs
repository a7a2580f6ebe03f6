pub mod interface;
#[macro_use]
pub mod logging;
pub mod setup;
pub mod tabular;

pub use interface::NetworkScenario;
pub use tabular::{Table, TabularOptions};
