pub mod checklist_repo;
pub mod comment_repo;
pub mod company_repo;
pub mod department_repo;
pub mod document_repo;
pub mod history_repo;
pub mod notification_repo;
pub mod process_repo;
pub mod questionnaire_repo;
pub mod template_repo;
pub mod trash_repo;
pub mod user_repo;

pub use checklist_repo::ChecklistRepository;
pub use comment_repo::CommentRepository;
pub use company_repo::CompanyRepository;
pub use department_repo::DepartmentRepository;
pub use document_repo::DocumentRepository;
pub use history_repo::HistoryRepository;
pub use notification_repo::NotificationRepository;
pub use process_repo::ProcessRepository;
pub use questionnaire_repo::QuestionnaireRepository;
pub use template_repo::TemplateRepository;
pub use trash_repo::TrashRepository;
pub use user_repo::UserRepository;
