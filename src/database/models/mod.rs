pub mod account;
pub mod contract;
pub mod maintenance;
pub mod profile;
pub mod property;

pub use account::{Account, AccountStatus, NewAccount, Role};
pub use contract::{Contract, ContractDetails, NewContract};
pub use maintenance::{MaintenanceRequest, NewMaintenanceRequest};
pub use profile::{
    AgencyProfile, LandlordProfile, LandlordUpdate, NewAgencyProfile, NewLandlordProfile,
    NewTenantProfile, Profile, TenantProfile,
};
pub use property::{NewProperty, Property};
