//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod health;
pub mod parties;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
pub mod transactions;
pub mod users;
pub mod validation;
pub mod wallets;

pub use error::ApiResult;

/// Register the API routes together with the JSON and path extractor
/// configuration that turns malformed input into `invalid_request` errors.
///
/// Callers supply `web::Data<HttpState>`; health probes are mounted
/// separately because they carry their own state.
///
/// # Examples
/// ```no_run
/// use actix_web::{web, App};
/// use expense_backend::inbound::http::{configure, state::HttpState};
///
/// fn app(state: web::Data<HttpState>) -> App<
///     impl actix_web::dev::ServiceFactory<
///         actix_web::dev::ServiceRequest,
///         Config = (),
///         Response = actix_web::dev::ServiceResponse,
///         Error = actix_web::Error,
///         InitError = (),
///     >,
/// > {
///     App::new().app_data(state).configure(configure)
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(
            web::scope("/auth")
                .service(users::sign_up)
                .service(users::login),
        )
        .service(
            web::scope("/wallets")
                .service(wallets::list_wallets)
                .service(wallets::create_wallet)
                .service(wallets::get_wallet)
                .service(wallets::update_wallet)
                .service(wallets::delete_wallet),
        )
        .service(
            web::scope("/parties")
                .service(parties::list_parties)
                .service(parties::create_party)
                .service(parties::get_party)
                .service(parties::update_party)
                .service(parties::delete_party),
        )
        .service(
            web::scope("/transactions")
                .service(transactions::list_transactions)
                .service(transactions::create_transaction)
                .service(transactions::get_transaction)
                .service(transactions::update_transaction)
                .service(transactions::delete_transaction),
        );
}
