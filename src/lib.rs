pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, candidate_service::CandidateService,
    feedback_service::FeedbackService, file_service::FileService,
    interview_service::InterviewService, job_service::JobService,
    master_data_service::MasterDataService, notification_service::NotificationService,
    requisition_service::RequisitionService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub candidate_service: CandidateService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub interview_service: InterviewService,
    pub notification_service: NotificationService,
    pub requisition_service: RequisitionService,
    pub feedback_service: FeedbackService,
    pub master_data_service: MasterDataService,
    pub file_service: FileService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let user_service = UserService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let interview_service = InterviewService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());
        let requisition_service = RequisitionService::new(pool.clone());
        let feedback_service = FeedbackService::new(pool.clone());
        let master_data_service = MasterDataService::new(pool.clone());
        let file_service = FileService::new(
            pool.clone(),
            config.uploads_dir.clone(),
            config.max_upload_bytes,
        );

        Self {
            pool,
            user_service,
            candidate_service,
            job_service,
            application_service,
            interview_service,
            notification_service,
            requisition_service,
            feedback_service,
            master_data_service,
            file_service,
        }
    }
}
