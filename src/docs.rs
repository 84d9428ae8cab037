// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,
        handlers::auth::list_users,
        handlers::auth::update_user_role,

        // --- Companies ---
        handlers::companies::create_company,
        handlers::companies::list_companies,
        handlers::companies::get_company,
        handlers::companies::update_company,
        handlers::companies::delete_company,

        // --- Departments ---
        handlers::departments::create_department,
        handlers::departments::list_departments,
        handlers::departments::get_department,
        handlers::departments::update_department,
        handlers::departments::deactivate_department,
        handlers::departments::reorder_departments,

        // --- Templates ---
        handlers::templates::create_template,
        handlers::templates::list_templates,
        handlers::templates::get_template,
        handlers::templates::delete_template,

        // --- Processes ---
        handlers::processes::create_process,
        handlers::processes::list_processes,
        handlers::processes::get_process,
        handlers::processes::advance_process,
        handlers::processes::revert_process,
        handlers::processes::delete_process,
        handlers::processes::create_continuation,
        handlers::processes::list_continuations,

        // --- Favorites ---
        handlers::processes::add_favorite,
        handlers::processes::remove_favorite,
        handlers::processes::list_favorites,

        // --- Tags ---
        handlers::processes::create_tag,
        handlers::processes::list_tags,
        handlers::processes::delete_tag,
        handlers::processes::attach_tag,
        handlers::processes::detach_tag,
        handlers::processes::list_process_tags,

        // --- Checklist ---
        handlers::checklist::list_checklist,
        handlers::checklist::complete_item,
        handlers::checklist::uncomplete_item,

        // --- History ---
        handlers::history::list_history,
        handlers::history::delete_history_event,

        // --- Comments ---
        handlers::comments::create_comment,
        handlers::comments::list_comments,
        handlers::comments::delete_comment,

        // --- Documents ---
        handlers::documents::register_document,
        handlers::documents::list_documents,
        handlers::documents::delete_document,

        // --- Questionnaires ---
        handlers::questionnaires::submit_questionnaire,
        handlers::questionnaires::list_questionnaire_responses,

        // --- Notifications ---
        handlers::notifications::list_notifications,
        handlers::notifications::mark_notification_read,
        handlers::notifications::mark_all_notifications_read,

        // --- Trash ---
        handlers::trash::list_trash,
        handlers::trash::restore_trash_item,
        handlers::trash::delete_trash_item,
        handlers::trash::cleanup_trash,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UpdateRolePayload,

            // --- Companies ---
            models::company::Company,
            models::company::CreateCompanyPayload,
            models::company::UpdateCompanyPayload,

            // --- Departments ---
            models::department::Department,
            models::department::CreateDepartmentPayload,
            models::department::UpdateDepartmentPayload,
            models::department::ReorderDepartmentsPayload,

            // --- Templates ---
            models::template::Template,
            models::template::CreateTemplatePayload,

            // --- Processes ---
            models::process::ProcessStatus,
            models::process::Process,
            models::process::ProcessWithCompany,
            models::process::CreateProcessPayload,
            models::process::CreateContinuationPayload,
            models::process::Tag,
            models::process::CreateTagPayload,

            // --- Checklist ---
            models::checklist::ChecklistItem,

            // --- History ---
            models::history::HistoryEventType,
            models::history::HistoryEvent,

            // --- Comments ---
            models::comment::Comment,
            models::comment::CreateCommentPayload,

            // --- Documents ---
            models::document::DocumentVisibility,
            models::document::Document,
            models::document::CreateDocumentPayload,

            // --- Questionnaires ---
            models::questionnaire::QuestionnaireResponse,
            models::questionnaire::CreateQuestionnairePayload,

            // --- Notifications ---
            models::notification::Notification,
            handlers::notifications::MarkAllReadResponse,

            // --- Trash ---
            models::trash::TrashEntity,
            models::trash::TrashItem,
            handlers::trash::CleanupResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Papéis"),
        (name = "Companies", description = "Gestão de Empresas"),
        (name = "Departments", description = "Etapas do Fluxo"),
        (name = "Templates", description = "Modelos de Fluxo"),
        (name = "Processes", description = "Processos e Transições de Etapa"),
        (name = "Favorites", description = "Processos Favoritos"),
        (name = "Tags", description = "Tags de Processos"),
        (name = "Checklist", description = "Checklist Sequencial por Etapa"),
        (name = "History", description = "Histórico de Auditoria (append-only)"),
        (name = "Comments", description = "Comentários e Menções"),
        (name = "Documents", description = "Metadados de Documentos"),
        (name = "Questionnaires", description = "Questionários por Etapa"),
        (name = "Notifications", description = "Notificações do Usuário"),
        (name = "Trash", description = "Lixeira com Expiração (TTL)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
