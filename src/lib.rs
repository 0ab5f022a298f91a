pub mod api_router;
pub mod companies;
pub mod contacts;
pub mod dashboard;
pub mod erp;
pub mod interactions;
pub mod opportunities;
pub mod shared;
pub mod tasks;
