//! HTTP inbound adapter exposing REST endpoints.

pub mod acting_user;
pub mod comments;
pub mod error;
pub mod health;
pub mod members;
pub mod projects;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod tryouts;
pub(crate) mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// `list_my_projects` is registered ahead of `get_project` so `/projects/mine`
/// is not read as a project id.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(projects::create_project)
        .service(projects::search_projects)
        .service(projects::list_my_projects)
        .service(projects::get_project)
        .service(projects::update_project)
        .service(projects::delete_project)
        .service(projects::get_completed_project)
        .service(projects::complete_project)
        .service(projects::bookmark_project)
        .service(projects::unbookmark_project)
        .service(tryouts::apply_tryout)
        .service(tryouts::list_tryouts)
        .service(tryouts::list_accepted_tryouts)
        .service(tryouts::accept_tryout)
        .service(tryouts::reject_tryout)
        .service(members::remove_member)
        .service(comments::post_comment)
        .service(comments::list_threaded_comments)
        .service(comments::delete_comment);
}
