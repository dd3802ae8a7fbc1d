pub mod branches;
pub mod plans;
pub mod profiles;
pub mod tenants;
