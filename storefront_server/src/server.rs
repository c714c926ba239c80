use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::header, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use storefront_engine::{
    AuthApi,
    CatalogApi,
    CatalogManagement,
    CredentialManagement,
    ShoppingApi,
    ShoppingManagement,
    SqliteDatabase,
};

use crate::{
    auth::{TokenIssuer, TokenVerifier},
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        AddCreditCardRoute,
        AddOrderProductRoute,
        AddOrderRoute,
        AddProductRoute,
        AddToCartRoute,
        CreateCartRoute,
        DeleteCreditCardRoute,
        DeleteProductRoute,
        LoginRoute,
        MyCartRoute,
        MyHistoryRoute,
        ProductsRoute,
        RegisterAccountRoute,
        SalesForUserRoute,
        UpdateProductRoute,
        UsersRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, config.max_db_connections)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    } else {
        info!("🗃️ Skipping database migrations");
    }
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let hash_cost = config.password_hash_cost;
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let shopping_api = ShoppingApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone()).with_hash_cost(hash_cost);
        let jwt_signer = TokenIssuer::new(&config.auth);
        let jwt_verifier = TokenVerifier::new(&config.auth);
        App::new()
            .wrap(build_cors(&config.cors_origins))
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %r").log_target("sfs::access_log"))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(shopping_api))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(jwt_signer))
            .app_data(web::Data::new(jwt_verifier))
            .configure(configure_routes::<SqliteDatabase>)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Registers every route. The APIs and the token issuer and verifier are expected to be registered as app data.
pub fn configure_routes<B>(cfg: &mut web::ServiceConfig)
where B: CatalogManagement + CredentialManagement + ShoppingManagement + 'static {
    cfg.service(health)
        .service(ProductsRoute::<B>::new())
        .service(AddProductRoute::<B>::new())
        .service(UpdateProductRoute::<B>::new())
        .service(DeleteProductRoute::<B>::new())
        .service(SalesForUserRoute::<B>::new())
        .service(UsersRoute::<B>::new())
        .service(RegisterAccountRoute::<B>::new())
        .service(LoginRoute::<B>::new())
        .service(CreateCartRoute::<B>::new())
        .service(MyCartRoute::<B>::new())
        .service(AddToCartRoute::<B>::new())
        .service(AddOrderRoute::<B>::new())
        .service(AddOrderProductRoute::<B>::new())
        .service(MyHistoryRoute::<B>::new())
        .service(AddCreditCardRoute::<B>::new())
        .service(DeleteCreditCardRoute::<B>::new());
}

/// Malformed JSON bodies are reported in the same `{"error": ...}` shape as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejected request body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ServerError::InvalidRequestPath(err.to_string()).into())
}

fn build_cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}
