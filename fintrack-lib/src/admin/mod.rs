//! Role-gated user management. Routes built from this module must be
//! wrapped with the admin bearer validator; handlers themselves do not
//! re-check the role.

use actix_web::{web, Scope};

pub mod handlers;

pub fn admin_service() -> Scope {
    web::scope("/admin/users")
        .service(handlers::get_all_users)
        .service(handlers::get_user)
        .service(handlers::update_user)
        .service(handlers::delete_user)
}
