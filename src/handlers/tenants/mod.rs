pub mod me;
pub mod setup;

pub use me::tenant_me;
pub use setup::tenant_setup;
