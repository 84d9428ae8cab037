pub mod auth;
pub mod checklist_service;
pub mod comment_service;
pub mod company_service;
pub mod department_service;
pub mod document_service;
pub mod history_service;
pub mod notification_service;
pub mod process_service;
pub mod questionnaire_service;
pub mod template_service;
pub mod trash_service;
