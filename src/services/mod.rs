//! Domain services. Each takes the store handle explicitly and returns
//! [`ApiError`](crate::error::ApiError) for precondition failures.

pub mod access;
pub mod agency_service;
pub mod contract_service;
pub mod landlord_service;
pub mod maintenance_service;
pub mod property_service;
pub mod tenant_service;
pub mod upload;
pub mod user_service;

pub use agency_service::{AgencyService, CreateAgencyRequest};
pub use contract_service::{ContractService, CreateContractRequest, CONTRACT_TERM_DAYS};
pub use landlord_service::{CreateLandlordRequest, LandlordService, UpdateLandlordRequest};
pub use maintenance_service::{
    Attachment, CreateMaintenanceRequest, MaintenanceService, PropertyMaintenanceQuery,
};
pub use property_service::{CreatePropertyRequest, PropertyListing, PropertyService};
pub use tenant_service::{CreateTenantRequest, TenantService};
pub use upload::{UploadError, UploadStore};
pub use user_service::{CredentialsRequest, LoginResponse, MeResponse, UserService};
