//! Opportunity (job posting) entities.

pub mod filter;
pub mod model;
pub mod status;

pub use filter::{OpportunityFilter, OpportunitySort};
pub use model::{
    CompletedOpportunity, CreateOpportunity, Opportunity, OpportunityDetail, OpportunityListing,
    UpdateOpportunity,
};
pub use status::OpportunityStatus;
