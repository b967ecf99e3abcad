pub mod application_dto;
pub mod auth_dto;
pub mod candidate_dto;
pub mod feedback_dto;
pub mod file_dto;
pub mod interview_dto;
pub mod job_dto;
pub mod notification_dto;
pub mod requisition_dto;
