//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Database calls are async, and password hashing is pushed onto the
//! blocking thread pool by the engine, so none of the handlers below block.
//!
//! Routes declared with `where authenticated` sit behind the [`BearerAuth`](crate::middleware::BearerAuth) gate and
//! receive the caller's identity as an [`AuthenticatedUser`].
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use storefront_engine::{
    db_types::{CartProduct, NewAccount, NewCart, NewCreditCard, NewOrder, NewProduct, OrderProduct, ProductUpdate},
    AuthApi,
    CatalogApi,
    CatalogManagement,
    CredentialManagement,
    ShoppingApi,
    ShoppingManagement,
};

use crate::{
    auth::{AuthenticatedUser, TokenIssuer},
    data_objects::{JsonResponse, LoginRequest, RegisterResponse, TokenResponse},
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:path),+ where authenticated) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::BearerAuth);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:path),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Products  ----------------------------------------------------
route!(products => Get "/products" impl CatalogManagement);
pub async fn products<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET products");
    let products = api.products().await?;
    Ok(HttpResponse::Ok().json(products))
}

route!(add_product => Post "/products" impl CatalogManagement);
pub async fn add_product<B: CatalogManagement>(
    body: web::Json<NewProduct>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST product {}", body.product_name);
    let product = api.add_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

route!(update_product => Put "/products/{id}" impl CatalogManagement);
/// Updates the name, description and price of a product. The product id is taken from the path.
pub async fn update_product<B: CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<ProductUpdate>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ PUT product #{product_id}");
    api.update_product(product_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product updated successfully.")))
}

route!(delete_product => Delete "/products/{id}" impl CatalogManagement);
pub async fn delete_product<B: CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let product_id = path.into_inner();
    debug!("💻️ DELETE product #{product_id}");
    api.remove_product(product_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Product deleted successfully.")))
}

route!(sales_for_user => Get "/products/admin/{username}" impl CatalogManagement);
pub async fn sales_for_user<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_name = path.into_inner();
    debug!("💻️ GET sales for {user_name}");
    let sales = api.sales_for_user(&user_name).await?;
    Ok(HttpResponse::Ok().json(sales))
}

//----------------------------------------------   Users  ----------------------------------------------------
route!(users => Get "/users" impl ShoppingManagement);
pub async fn users<B: ShoppingManagement>(api: web::Data<ShoppingApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET users");
    let users = api.users().await?;
    Ok(HttpResponse::Ok().json(users))
}

route!(register_account => Post "/users/register" impl CredentialManagement);
/// Creates a new account. The password is hashed before it is stored and is never echoed back.
pub async fn register_account<B: CredentialManagement>(
    body: web::Json<NewAccount>,
    api: web::Data<AuthApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST register for {}", body.user_name);
    let account = api.register(body.into_inner()).await?;
    let response =
        RegisterResponse { message: "User registered successfully".to_string(), username: account.user_name };
    Ok(HttpResponse::Created().json(response))
}

route!(login => Post "/users/login" impl CredentialManagement);
/// Route handler for the login endpoint
///
/// Checks the email and password and, if they match a registered account, issues an access token. The token must be
/// sent in the `Authorization: Bearer <token>` header on every request to a protected route.
/// An unknown email and a wrong password get the same 401 response.
pub async fn login<B: CredentialManagement>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<B>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received login request");
    let LoginRequest { email, password } = body.into_inner();
    let account = api.verify_credentials(&email, &password).await?;
    let token = signer.issue_token(&account)?;
    debug!("💻️ Issued access token for user #{}", account.user_id);
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

//----------------------------------------------   Carts  ----------------------------------------------------
route!(create_cart => Post "/users/cart" impl ShoppingManagement where authenticated);
pub async fn create_cart<B: ShoppingManagement>(
    user: AuthenticatedUser,
    body: web::Json<NewCart>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST cart for user #{}", user.user_id);
    let cart = api.create_cart(user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(cart))
}

route!(my_cart => Get "/users/cart" impl ShoppingManagement where authenticated);
pub async fn my_cart<B: ShoppingManagement>(
    user: AuthenticatedUser,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET cart for user #{}", user.user_id);
    let items = api.cart_for_user(user.user_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

route!(add_to_cart => Post "/addProduct-cart" impl ShoppingManagement);
pub async fn add_to_cart<B: ShoppingManagement>(
    body: web::Json<CartProduct>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST product #{} to cart #{}", body.product_id, body.cart_id);
    let item = api.add_to_cart(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(add_order => Post "/users/addOrder" impl ShoppingManagement);
pub async fn add_order<B: ShoppingManagement>(
    body: web::Json<NewOrder>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST order #{}", body.order_id);
    let order = api.add_order(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(add_order_product => Post "/users/addOrder-product" impl ShoppingManagement);
pub async fn add_order_product<B: ShoppingManagement>(
    body: web::Json<OrderProduct>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST line #{} for order #{}", body.op_id, body.order_id);
    let item = api.add_order_product(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(item))
}

route!(my_history => Get "/history" impl ShoppingManagement where authenticated);
pub async fn my_history<B: ShoppingManagement>(
    user: AuthenticatedUser,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ GET history for user #{}", user.user_id);
    let history = api.history_for_user(user.user_id).await?;
    Ok(HttpResponse::Ok().json(history))
}

//----------------------------------------------   Credit cards  ----------------------------------------------------
route!(add_credit_card => Post "/add-credit" impl ShoppingManagement where authenticated);
/// Adds a card for the caller. The owner is always the authenticated user; the body only carries the card details.
pub async fn add_credit_card<B: ShoppingManagement>(
    user: AuthenticatedUser,
    body: web::Json<NewCreditCard>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    debug!("💻️ POST credit card #{} for user #{}", body.card_id, user.user_id);
    let card = api.add_credit_card(user.user_id, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(card))
}

route!(delete_credit_card => Delete "/credit/{card_id}" impl ShoppingManagement);
pub async fn delete_credit_card<B: ShoppingManagement>(
    path: web::Path<i64>,
    api: web::Data<ShoppingApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let card_id = path.into_inner();
    debug!("💻️ DELETE credit card #{card_id}");
    api.remove_credit_card(card_id).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Credit card deleted successfully.")))
}
