// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        ChecklistRepository, CommentRepository, CompanyRepository, DepartmentRepository,
        DocumentRepository, HistoryRepository, NotificationRepository, ProcessRepository,
        QuestionnaireRepository, TemplateRepository, TrashRepository, UserRepository,
    },
    services::{
        auth::AuthService, checklist_service::ChecklistService, comment_service::CommentService,
        company_service::CompanyService, department_service::DepartmentService,
        document_service::DocumentService, history_service::HistoryService,
        notification_service::NotificationService, process_service::ProcessService,
        questionnaire_service::QuestionnaireService, template_service::TemplateService,
        trash_service::TrashService,
    },
};

const DEFAULT_TRASH_TTL_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub department_service: DepartmentService,
    pub template_service: TemplateService,
    pub process_service: ProcessService,
    pub checklist_service: ChecklistService,
    pub history_service: HistoryService,
    pub comment_service: CommentService,
    pub document_service: DocumentService,
    pub questionnaire_service: QuestionnaireService,
    pub notification_service: NotificationService,
    pub trash_service: TrashService,
    pub user_repo: UserRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let trash_ttl_days = env::var("TRASH_TTL_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TRASH_TTL_DAYS);

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let department_repo = DepartmentRepository::new(db_pool.clone());
        let template_repo = TemplateRepository::new(db_pool.clone());
        let process_repo = ProcessRepository::new(db_pool.clone());
        let checklist_repo = ChecklistRepository::new(db_pool.clone());
        let history_repo = HistoryRepository::new(db_pool.clone());
        let comment_repo = CommentRepository::new(db_pool.clone());
        let document_repo = DocumentRepository::new(db_pool.clone());
        let questionnaire_repo = QuestionnaireRepository::new(db_pool.clone());
        let notification_repo = NotificationRepository::new(db_pool.clone());
        let trash_repo = TrashRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let company_service = CompanyService::new(company_repo.clone(), db_pool.clone());
        let department_service =
            DepartmentService::new(department_repo.clone(), db_pool.clone());
        let template_service = TemplateService::new(
            template_repo.clone(),
            department_repo.clone(),
            db_pool.clone(),
        );
        let process_service = ProcessService::new(
            process_repo.clone(),
            checklist_repo.clone(),
            history_repo.clone(),
            department_repo.clone(),
            template_repo.clone(),
            company_repo.clone(),
            notification_repo.clone(),
            db_pool.clone(),
        );
        let checklist_service = ChecklistService::new(
            checklist_repo.clone(),
            process_repo.clone(),
            history_repo.clone(),
            department_repo.clone(),
            notification_repo.clone(),
            db_pool.clone(),
        );
        let history_service = HistoryService::new(
            history_repo.clone(),
            process_repo.clone(),
            db_pool.clone(),
        );
        let comment_service = CommentService::new(
            comment_repo.clone(),
            process_repo.clone(),
            history_repo.clone(),
            notification_repo.clone(),
            department_repo.clone(),
            db_pool.clone(),
        );
        let document_service = DocumentService::new(
            document_repo.clone(),
            process_repo.clone(),
            history_repo.clone(),
            db_pool.clone(),
        );
        let questionnaire_service = QuestionnaireService::new(
            questionnaire_repo.clone(),
            process_repo.clone(),
            db_pool.clone(),
        );
        let notification_service =
            NotificationService::new(notification_repo.clone(), db_pool.clone());
        let trash_service = TrashService::new(
            trash_repo,
            process_repo,
            checklist_repo,
            history_repo,
            comment_repo,
            document_repo,
            questionnaire_repo,
            company_repo,
            trash_ttl_days,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            auth_service,
            company_service,
            department_service,
            template_service,
            process_service,
            checklist_service,
            history_service,
            comment_service,
            document_service,
            questionnaire_service,
            notification_service,
            trash_service,
            user_repo,
        })
    }
}
