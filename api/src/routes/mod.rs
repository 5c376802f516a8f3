//! Route table
//!
//! Access rules live in the policy table consulted by the authorization gate;
//! this module only maps paths to handlers.

pub mod health;
pub mod media;
pub mod template;
pub mod user;

use actix_web::web;

use crate::state::Backend;

/// Register every `/v1` route for backend `B`
pub fn configure<B: Backend>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(
                web::resource("/user")
                    .route(web::post().to(user::register::<B>))
                    .route(web::put().to(user::update_profile::<B>))
                    .route(web::delete().to(user::delete_account::<B>)),
            )
            .route("/user/check/{email}", web::get().to(user::check::<B>))
            .route("/user/otp", web::get().to(user::check_otp::<B>))
            .route("/user/login", web::post().to(user::login::<B>))
            .route("/user/token/refresh", web::post().to(user::refresh::<B>))
            .route(
                "/user/forgot-password/verify",
                web::post().to(user::reset_password::<B>),
            )
            .route(
                "/user/forgot-password/{user_name_or_email}",
                web::get().to(user::forgot_password::<B>),
            )
            .route("/user/profile", web::get().to(user::profile::<B>))
            .route("/users", web::get().to(user::list_users::<B>))
            .service(
                web::resource("/template")
                    .route(web::post().to(template::create::<B>))
                    .route(web::get().to(template::list::<B>)),
            )
            .service(
                web::resource("/template/{id}")
                    .route(web::get().to(template::get::<B>))
                    .route(web::put().to(template::update::<B>))
                    .route(web::delete().to(template::delete::<B>)),
            )
            .route("/media/upload", web::post().to(media::upload::<B>)),
    );
}
