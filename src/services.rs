pub mod branch_service;
pub mod hours;
pub mod plan_service;
pub mod profile_service;
pub mod tenant_service;

pub use branch_service::BranchService;
pub use plan_service::PlanService;
pub use profile_service::ProfileService;
pub use tenant_service::TenantService;
