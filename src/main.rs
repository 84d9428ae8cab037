// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Administração de usuários (listar e trocar papel)
    let user_admin_routes = Router::new()
        .route("/", get(handlers::auth::list_users))
        .route("/{id}/role", patch(handlers::auth::update_user_role))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let company_routes = Router::new()
        .route(
            "/",
            post(handlers::companies::create_company).get(handlers::companies::list_companies),
        )
        .route(
            "/{id}",
            get(handlers::companies::get_company)
                .patch(handlers::companies::update_company)
                .delete(handlers::companies::delete_company),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Leitura de departamentos é livre para autenticados
    let department_routes = Router::new()
        .route("/", get(handlers::departments::list_departments))
        .route("/{id}", get(handlers::departments::get_department))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Escrita de departamentos é só para admins
    let department_admin_routes = Router::new()
        .route("/", post(handlers::departments::create_department))
        .route("/reorder", patch(handlers::departments::reorder_departments))
        .route(
            "/{id}",
            patch(handlers::departments::update_department)
                .delete(handlers::departments::deactivate_department),
        )
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let template_routes = Router::new()
        .route(
            "/",
            post(handlers::templates::create_template).get(handlers::templates::list_templates),
        )
        .route(
            "/{id}",
            get(handlers::templates::get_template).delete(handlers::templates::delete_template),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // O coração da aplicação: processos e tudo que gira em torno deles
    let process_routes = Router::new()
        .route(
            "/",
            post(handlers::processes::create_process).get(handlers::processes::list_processes),
        )
        .route("/favorites", get(handlers::processes::list_favorites))
        .route(
            "/{id}",
            get(handlers::processes::get_process).delete(handlers::processes::delete_process),
        )
        .route("/{id}/advance", post(handlers::processes::advance_process))
        .route("/{id}/revert", post(handlers::processes::revert_process))
        .route(
            "/{id}/continuations",
            post(handlers::processes::create_continuation)
                .get(handlers::processes::list_continuations),
        )
        .route(
            "/{id}/favorite",
            put(handlers::processes::add_favorite).delete(handlers::processes::remove_favorite),
        )
        .route("/{id}/tags", get(handlers::processes::list_process_tags))
        .route(
            "/{id}/tags/{tag_id}",
            put(handlers::processes::attach_tag).delete(handlers::processes::detach_tag),
        )
        .route("/{id}/checklist", get(handlers::checklist::list_checklist))
        .route(
            "/{id}/checklist/{department_id}/complete",
            post(handlers::checklist::complete_item),
        )
        .route(
            "/{id}/checklist/{department_id}/uncomplete",
            post(handlers::checklist::uncomplete_item),
        )
        .route("/{id}/history", get(handlers::history::list_history))
        .route(
            "/{id}/comments",
            post(handlers::comments::create_comment).get(handlers::comments::list_comments),
        )
        .route(
            "/{id}/documents",
            post(handlers::documents::register_document).get(handlers::documents::list_documents),
        )
        .route(
            "/{id}/questionnaire",
            post(handlers::questionnaires::submit_questionnaire)
                .get(handlers::questionnaires::list_questionnaire_responses),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let tag_routes = Router::new()
        .route(
            "/",
            post(handlers::processes::create_tag).get(handlers::processes::list_tags),
        )
        .route("/{id}", delete(handlers::processes::delete_tag))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let comment_routes = Router::new()
        .route("/{id}", delete(handlers::comments::delete_comment))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let document_routes = Router::new()
        .route("/{id}", delete(handlers::documents::delete_document))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // DELETE de histórico é só para admins; o serviço revalida.
    let history_routes = Router::new()
        .route("/{id}", delete(handlers::history::delete_history_event))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let notification_routes = Router::new()
        .route("/", get(handlers::notifications::list_notifications))
        .route(
            "/{id}/read",
            patch(handlers::notifications::mark_notification_read),
        )
        .route(
            "/read-all",
            post(handlers::notifications::mark_all_notifications_read),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let trash_routes = Router::new()
        .route("/", get(handlers::trash::list_trash))
        .route("/{id}/restore", post(handlers::trash::restore_trash_item))
        .route("/{id}", delete(handlers::trash::delete_trash_item))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // O passo de limpeza é pensado para um cron com credencial de admin
    let trash_admin_routes = Router::new()
        .route("/cleanup", post(handlers::trash::cleanup_trash))
        .layer(axum_middleware::from_fn(admin_guard))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/users", user_admin_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/departments", department_routes)
        .nest("/api/departments", department_admin_routes)
        .nest("/api/templates", template_routes)
        .nest("/api/processes", process_routes)
        .nest("/api/tags", tag_routes)
        .nest("/api/comments", comment_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/history", history_routes)
        .nest("/api/notifications", notification_routes)
        .nest("/api/trash", trash_routes)
        .nest("/api/trash", trash_admin_routes)
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
