use mockall::mock;
use storefront_engine::{
    db_types::{
        Account,
        AccountCredentials,
        Cart,
        CartProduct,
        CreditCard,
        NewAccountRecord,
        NewCreditCard,
        NewOrder,
        NewProduct,
        Order,
        OrderHistoryItem,
        OrderProduct,
        Product,
        ProductSale,
        ProductUpdate,
        UserSummary,
    },
    AuthApiError,
    CatalogApiError,
    CatalogManagement,
    CredentialManagement,
    ShoppingApiError,
    ShoppingManagement,
};

mock! {
    pub Store {}
    impl CredentialManagement for Store {
        async fn insert_account(&self, account: NewAccountRecord) -> Result<Account, AuthApiError>;
        async fn fetch_credentials_for_email(&self, email: &str) -> Result<Option<AccountCredentials>, AuthApiError>;
    }
    impl CatalogManagement for Store {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogApiError>;
        async fn insert_product(&self, product: NewProduct) -> Result<Product, CatalogApiError>;
        async fn update_product(&self, product_id: i64, update: ProductUpdate) -> Result<(), CatalogApiError>;
        async fn delete_product(&self, product_id: i64) -> Result<(), CatalogApiError>;
        async fn fetch_sales_for_user(&self, user_name: &str) -> Result<Vec<ProductSale>, CatalogApiError>;
    }
    impl ShoppingManagement for Store {
        async fn fetch_users(&self) -> Result<Vec<UserSummary>, ShoppingApiError>;
        async fn insert_cart(&self, user_id: i64, cart_id: i64) -> Result<Cart, ShoppingApiError>;
        async fn insert_cart_product(&self, item: CartProduct) -> Result<CartProduct, ShoppingApiError>;
        async fn fetch_cart_products_for_user(&self, user_id: i64) -> Result<Vec<CartProduct>, ShoppingApiError>;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, ShoppingApiError>;
        async fn insert_order_product(&self, item: OrderProduct) -> Result<OrderProduct, ShoppingApiError>;
        async fn fetch_order_history(&self, user_id: i64) -> Result<Vec<OrderHistoryItem>, ShoppingApiError>;
        async fn insert_credit_card(&self, user_id: i64, card: NewCreditCard) -> Result<CreditCard, ShoppingApiError>;
        async fn delete_credit_card(&self, card_id: i64) -> Result<(), ShoppingApiError>;
    }
}
