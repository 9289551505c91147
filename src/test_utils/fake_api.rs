//! An in-memory stand-in for the finance REST API.
//!
//! It is a real HTTP server on a local port so the [crate::ApiClient] and the
//! resource clients are tested over the network.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Date, OffsetDateTime};

use crate::{
    ApiClient,
    api::date_format,
    category::Category,
    transaction::{Transaction, TransactionType},
    user::User,
};

use super::serve_router;

/// The data held by the fake API, plus switches for simulating failures.
#[derive(Debug, Default)]
pub(crate) struct FakeDb {
    /// Users with their passwords.
    pub users: Vec<(User, String)>,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    /// Every request received, as "METHOD /path".
    pub requests: Vec<String>,
    /// Send payloads as `{"data": ...}` instead of bare.
    pub wrap_in_data: bool,
    pub fail_list_categories: bool,
    pub fail_list_transactions: bool,
    pub fail_summary: bool,
    /// Category names that are rejected with a 500.
    pub fail_category_names: Vec<String>,
    last_id: i64,
}

impl FakeDb {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn respond<T: Serialize>(&self, status: StatusCode, payload: T) -> Response {
        let payload = serde_json::to_value(payload).expect("could not serialize fake payload");
        let body = if self.wrap_in_data {
            json!({ "data": payload, "message": "ok" })
        } else {
            payload
        };

        (status, Json(body)).into_response()
    }
}

type Db = Arc<Mutex<FakeDb>>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "statusCode": status.as_u16(), "message": message }))).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "Not found")
}

/// A running fake API and a client connected to it.
pub(crate) struct FakeApi {
    pub db: Db,
    pub client: ApiClient,
}

impl FakeApi {
    pub(crate) async fn spawn() -> Self {
        let db = Db::default();
        let base_url = serve_router(router(db.clone())).await;
        let client = ApiClient::new(&base_url).expect("could not create client for fake API");

        Self { db, client }
    }

    pub(crate) fn with_db<R>(&self, change: impl FnOnce(&mut FakeDb) -> R) -> R {
        change(&mut self.db.lock().expect("fake API lock poisoned"))
    }

    pub(crate) fn add_user(&self, email: &str, password: &str) -> User {
        self.with_db(|db| {
            let user = User {
                id: db.next_id(),
                email: email.to_owned(),
                document: "123.456.789-00".to_owned(),
                fullname: None,
                birthdate: None,
            };
            db.users.push((user.clone(), password.to_owned()));
            user
        })
    }

    pub(crate) fn add_category(&self, name: &str) -> Category {
        self.with_db(|db| {
            let category = Category {
                id: db.next_id(),
                name: name.to_owned(),
            };
            db.categories.push(category.clone());
            category
        })
    }

    pub(crate) fn add_transaction(
        &self,
        user_id: i64,
        category_id: i64,
        amount_in_cents: u64,
        type_: TransactionType,
        date: Date,
    ) -> Transaction {
        self.with_db(|db| {
            let transaction = Transaction {
                id: db.next_id(),
                title: format!("{type_} {amount_in_cents}"),
                category_id,
                description: None,
                amount_in_cents,
                user_id,
                date,
                created_at: None,
                updated_at: None,
                type_,
            };
            db.transactions.push(transaction.clone());
            transaction
        })
    }

    /// The number of requests the fake API has received.
    pub(crate) fn request_count(&self) -> usize {
        self.with_db(|db| db.requests.len())
    }
}

fn router(db: Db) -> Router {
    Router::new()
        .route("/users", post(create_user).get(list_users))
        .route("/users/login", post(log_in))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/categories", post(create_category).get(list_categories))
        .route(
            "/categories/{id}",
            get(get_category)
                .patch(update_category)
                .delete(delete_category),
        )
        .route(
            "/transactions",
            post(create_transaction).get(list_transactions),
        )
        .route("/transactions/summary/{user_id}", get(get_summary))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
        .layer(middleware::from_fn_with_state(db.clone(), record_request))
        .with_state(db)
}

async fn record_request(State(db): State<Db>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    db.lock().expect("fake API lock poisoned").requests.push(line);

    next.run(request).await
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserBody {
    email: Option<String>,
    password: Option<String>,
    document: Option<String>,
    fullname: Option<String>,
    #[serde(default, with = "date_format::option")]
    birthdate: Option<Date>,
}

async fn create_user(State(db): State<Db>, Json(body): Json<UserBody>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let (Some(email), Some(password), Some(document)) = (body.email, body.password, body.document)
    else {
        return error(StatusCode::BAD_REQUEST, "email, password and document are required");
    };

    if db.users.iter().any(|(user, _)| user.email == email) {
        return error(StatusCode::CONFLICT, "Email already registered");
    }

    let user = User {
        id: db.next_id(),
        email,
        document,
        fullname: body.fullname,
        birthdate: body.birthdate,
    };
    db.users.push((user.clone(), password));

    db.respond(StatusCode::CREATED, user)
}

async fn list_users(State(db): State<Db>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");
    let users: Vec<_> = db.users.iter().map(|(user, _)| user.clone()).collect();

    db.respond(StatusCode::OK, users)
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    match db.users.iter().find(|(user, _)| user.id == id) {
        Some((user, _)) => db.respond(StatusCode::OK, user),
        None => not_found(),
    }
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<UserBody>,
) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let Some((user, password)) = db.users.iter_mut().find(|(user, _)| user.id == id) else {
        return not_found();
    };

    if let Some(email) = body.email {
        user.email = email;
    }
    if let Some(new_password) = body.password {
        *password = new_password;
    }
    if let Some(document) = body.document {
        user.document = document;
    }
    if body.fullname.is_some() {
        user.fullname = body.fullname;
    }
    if body.birthdate.is_some() {
        user.birthdate = body.birthdate;
    }
    let user = user.clone();

    db.respond(StatusCode::OK, user)
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let count = db.users.len();
    db.users.retain(|(user, _)| user.id != id);

    if db.users.len() == count {
        not_found()
    } else {
        db.respond(StatusCode::OK, json!({ "deleted": true }))
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn log_in(State(db): State<Db>, Json(body): Json<LoginBody>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");
    let Some((user, password)) = db.users.iter().find(|(user, _)| user.email == body.email)
    else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };

    if *password == body.password {
        db.respond(StatusCode::OK, user.clone())
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid credentials")
    }
}

#[derive(Deserialize)]
struct CategoryBody {
    name: Option<String>,
}

async fn create_category(State(db): State<Db>, Json(body): Json<CategoryBody>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let Some(name) = body.name else {
        return error(StatusCode::BAD_REQUEST, "name is required");
    };

    if db.fail_category_names.contains(&name) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Could not save category");
    }

    let category = Category {
        id: db.next_id(),
        name,
    };
    db.categories.push(category.clone());

    db.respond(StatusCode::CREATED, category)
}

async fn list_categories(State(db): State<Db>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    if db.fail_list_categories {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }

    db.respond(StatusCode::OK, &db.categories)
}

async fn get_category(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    match db.categories.iter().find(|category| category.id == id) {
        Some(category) => db.respond(StatusCode::OK, category),
        None => not_found(),
    }
}

async fn update_category(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<CategoryBody>,
) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let Some(category) = db.categories.iter_mut().find(|category| category.id == id) else {
        return not_found();
    };

    if let Some(name) = body.name {
        category.name = name;
    }
    let category = category.clone();

    db.respond(StatusCode::OK, category)
}

async fn delete_category(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let count = db.categories.len();
    db.categories.retain(|category| category.id != id);

    if db.categories.len() == count {
        not_found()
    } else {
        db.respond(StatusCode::OK, json!({ "deleted": true }))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionBody {
    title: Option<String>,
    category_id: Option<i64>,
    description: Option<String>,
    amount_in_cents: Option<u64>,
    user_id: Option<i64>,
    #[serde(default, with = "date_format::option")]
    date: Option<Date>,
    #[serde(rename = "type")]
    type_: Option<TransactionType>,
}

async fn create_transaction(State(db): State<Db>, Json(body): Json<TransactionBody>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let (Some(title), Some(category_id), Some(amount_in_cents), Some(user_id), Some(date), Some(type_)) = (
        body.title,
        body.category_id,
        body.amount_in_cents,
        body.user_id,
        body.date,
        body.type_,
    ) else {
        return error(StatusCode::BAD_REQUEST, "missing required fields");
    };

    if !db.categories.iter().any(|category| category.id == category_id) {
        return error(StatusCode::BAD_REQUEST, "Category not found");
    }

    let now = OffsetDateTime::now_utc();
    let transaction = Transaction {
        id: db.next_id(),
        title,
        category_id,
        description: body.description,
        amount_in_cents,
        user_id,
        date,
        created_at: Some(now),
        updated_at: Some(now),
        type_,
    };
    db.transactions.push(transaction.clone());

    db.respond(StatusCode::CREATED, transaction)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTransactionsQuery {
    user_id: Option<i64>,
}

async fn list_transactions(
    State(db): State<Db>,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    if db.fail_list_transactions {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }

    let transactions: Vec<_> = db
        .transactions
        .iter()
        .filter(|transaction| query.user_id.is_none_or(|id| transaction.user_id == id))
        .cloned()
        .collect();

    db.respond(StatusCode::OK, transactions)
}

async fn get_transaction(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    match db.transactions.iter().find(|transaction| transaction.id == id) {
        Some(transaction) => db.respond(StatusCode::OK, transaction),
        None => not_found(),
    }
}

async fn update_transaction(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<TransactionBody>,
) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");

    if let Some(category_id) = body.category_id
        && !db.categories.iter().any(|category| category.id == category_id)
    {
        return error(StatusCode::BAD_REQUEST, "Category not found");
    }

    let Some(transaction) = db
        .transactions
        .iter_mut()
        .find(|transaction| transaction.id == id)
    else {
        return not_found();
    };

    if let Some(title) = body.title {
        transaction.title = title;
    }
    if let Some(category_id) = body.category_id {
        transaction.category_id = category_id;
    }
    if body.description.is_some() {
        transaction.description = body.description;
    }
    if let Some(amount_in_cents) = body.amount_in_cents {
        transaction.amount_in_cents = amount_in_cents;
    }
    if let Some(date) = body.date {
        transaction.date = date;
    }
    if let Some(type_) = body.type_ {
        transaction.type_ = type_;
    }
    transaction.updated_at = Some(OffsetDateTime::now_utc());
    let transaction = transaction.clone();

    db.respond(StatusCode::OK, transaction)
}

async fn delete_transaction(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut db = db.lock().expect("fake API lock poisoned");
    let count = db.transactions.len();
    db.transactions.retain(|transaction| transaction.id != id);

    if db.transactions.len() == count {
        not_found()
    } else {
        db.respond(StatusCode::OK, json!({ "deleted": true }))
    }
}

async fn get_summary(State(db): State<Db>, Path(user_id): Path<i64>) -> Response {
    let db = db.lock().expect("fake API lock poisoned");

    if db.fail_summary {
        return error(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable");
    }

    let mut total_income = 0;
    let mut total_expense = 0;
    let mut transaction_count = 0;

    for transaction in db.transactions.iter().filter(|t| t.user_id == user_id) {
        transaction_count += 1;
        match transaction.type_ {
            TransactionType::Income => total_income += transaction.amount_in_cents,
            TransactionType::Expense => total_expense += transaction.amount_in_cents,
        }
    }

    db.respond(
        StatusCode::OK,
        json!({
            "totalIncome": total_income,
            "totalExpense": total_expense,
            "balance": total_income as i64 - total_expense as i64,
            "transactionCount": transaction_count,
        }),
    )
}
