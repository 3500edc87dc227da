//! Domain model: job offers, their descriptions and applications.

mod application;
mod job_description;
mod job_offer;

pub use application::{Application, ApplicationStatus, UnknownApplicationStatus};
pub use job_description::{EmploymentType, JobDescription, UnknownEmploymentType};
pub use job_offer::{JobOffer, JobOfferChanges, JobOfferId, JobOfferStatus, UnknownJobOfferStatus};
