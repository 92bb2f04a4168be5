pub mod me;
pub mod setup;

pub use me::agency_me;
pub use setup::agency_setup;
