use crate::api::attendance::PunchRequest;
use crate::model::attendance::{AttendanceRecord, AttendanceStats, AttendanceStatus};
use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Service

Records daily punch-in / punch-out events and derives an attendance status
from the hours worked.

### Rules
- Employee ids look like `ATS0123` (`ATS0` + three digits, `ATS0000` excluded)
- One shift per employee per day
- `>= 8h` is **Present**, `>= 4h` is **Half Day**, anything less is **Absent**

### Admin
- Filter all records by date, employee id substring and status
- Dashboard counts
- Bulk clear (irreversible)

### Response Format
- Success: `{ "message": "..." }` or JSON data
- Failure: `{ "error": "..." }`
"#,
    ),
    paths(
        crate::api::attendance::punch_in,
        crate::api::attendance::punch_out,
        crate::api::attendance::employee_records,

        crate::api::admin::list_records,
        crate::api::admin::stats,
        crate::api::admin::clear_records
    ),
    components(
        schemas(
            PunchRequest,
            AttendanceRecord,
            AttendanceStats,
            AttendanceStatus
        )
    ),
    tags(
        (name = "Attendance", description = "Employee punch-in / punch-out APIs"),
        (name = "Admin", description = "Attendance administration APIs"),
    )
)]
pub struct ApiDoc;

/// Swagger UI plus the raw OpenAPI document. `NormalizePath::trim` turns
/// `/swagger-ui/` into `/swagger-ui`, so the bare path redirects to the page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::redirect("/swagger-ui", "/swagger-ui/index.html"))
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}") // ← wildcard {_:.*} to match JS/CSS files
                .url("/api-doc/openapi.json", ApiDoc::openapi()),
        );
}
