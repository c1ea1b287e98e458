//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`]. The acting user is
//! documented as an `X-User-Id` header security scheme because the upstream
//! gateway sets it after authenticating the caller.

use crate::inbound::http::comments::{
    CommentBody, CommentNodeBody, CommentThreadBody, PostCommentBody,
};
use crate::inbound::http::projects::{
    CompleteProjectBody, MemberBriefBody, MyProjectBody, MyProjectSliceBody, OwnerBody,
    ProjectBody, ProjectContentBody, ProjectDetailBody, ProjectSummaryBody,
    ProjectSummarySliceBody, RecruitmentBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TryoutStatusSchema};
use crate::inbound::http::tryouts::{ApplyTryoutBody, TryoutBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Add the acting-user header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ActingUser",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-User-Id",
                "Authenticated user id forwarded by the gateway.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Project hub API",
        description = "Side-project marketplace: projects, tryouts, team members, and comments."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ActingUser" = [])),
    paths(
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::search_projects,
        crate::inbound::http::projects::list_my_projects,
        crate::inbound::http::projects::get_project,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::get_completed_project,
        crate::inbound::http::projects::complete_project,
        crate::inbound::http::projects::bookmark_project,
        crate::inbound::http::projects::unbookmark_project,
        crate::inbound::http::tryouts::apply_tryout,
        crate::inbound::http::tryouts::list_tryouts,
        crate::inbound::http::tryouts::list_accepted_tryouts,
        crate::inbound::http::tryouts::accept_tryout,
        crate::inbound::http::tryouts::reject_tryout,
        crate::inbound::http::members::remove_member,
        crate::inbound::http::comments::post_comment,
        crate::inbound::http::comments::list_threaded_comments,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TryoutStatusSchema,
        RecruitmentBody,
        ProjectContentBody,
        CompleteProjectBody,
        ProjectBody,
        OwnerBody,
        ProjectDetailBody,
        MemberBriefBody,
        ProjectSummaryBody,
        ProjectSummarySliceBody,
        MyProjectBody,
        MyProjectSliceBody,
        ApplyTryoutBody,
        TryoutBody,
        PostCommentBody,
        CommentBody,
        CommentNodeBody,
        CommentThreadBody,
    )),
    tags(
        (name = "projects", description = "Project publishing, search, and completion"),
        (name = "tryouts", description = "Applications to recruited positions"),
        (name = "members", description = "Team roster management"),
        (name = "comments", description = "Threaded project comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(ERROR_SCHEMA_NAME).expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("message"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1/projects")]
    #[case("/api/v1/projects/mine")]
    #[case("/api/v1/projects/{project_id}/tryouts/{tryout_id}/accept")]
    #[case("/api/v1/projects/{project_id}/members/{member_id}")]
    #[case("/api/v1/comments/{comment_id}")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn acting_user_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("ActingUser"));
    }
}
