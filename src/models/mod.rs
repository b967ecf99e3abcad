pub mod application;
pub mod candidate;
pub mod feedback;
pub mod interview;
pub mod job;
pub mod master_data;
pub mod notification;
pub mod requisition;
pub mod user;
