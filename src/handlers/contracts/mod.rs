pub mod create;
pub mod delete;
pub mod list;
pub mod show;

pub use create::contract_create;
pub use delete::contract_delete;
pub use list::{contract_list, contract_mine};
pub use show::contract_show;
