pub mod create;
pub mod list;
pub mod show;

pub use create::property_create;
pub use list::{property_list, property_mine};
pub use show::property_show;
