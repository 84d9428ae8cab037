pub mod auth;
pub mod checklist;
pub mod comments;
pub mod companies;
pub mod departments;
pub mod documents;
pub mod history;
pub mod notifications;
pub mod processes;
pub mod questionnaires;
pub mod templates;
pub mod trash;
