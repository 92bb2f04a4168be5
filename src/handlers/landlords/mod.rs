pub mod me;
pub mod setup;

pub use me::{landlord_me, landlord_update};
pub use setup::landlord_setup;
