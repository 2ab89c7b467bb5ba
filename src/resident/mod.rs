//! The registry of residents and their token balances.

mod create_endpoint;
mod db;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use create_endpoint::create_resident_endpoint;
pub use db::{
    NewResident, Resident, ResidentUpdate, create_resident, create_resident_table,
    delete_resident, get_all_residents, get_resident, update_resident,
};
pub use delete_endpoint::delete_resident_endpoint;
pub use edit_endpoint::edit_resident_endpoint;
pub use list_endpoint::{get_resident_endpoint, list_residents_endpoint};
