pub mod application_service;
pub mod candidate_service;
pub mod feedback_service;
pub mod file_service;
pub mod interview_service;
pub mod job_service;
pub mod master_data_service;
pub mod notification_service;
pub mod requisition_service;
pub mod user_service;
