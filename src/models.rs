pub mod auth;
pub mod checklist;
pub mod comment;
pub mod company;
pub mod department;
pub mod document;
pub mod history;
pub mod notification;
pub mod process;
pub mod questionnaire;
pub mod template;
pub mod trash;
