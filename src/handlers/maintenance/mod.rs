pub mod complete;
pub mod create;
pub mod list;
pub mod show;

pub use complete::maintenance_complete;
pub use create::maintenance_create;
pub use list::{maintenance_by_property, maintenance_list};
pub use show::maintenance_show;
