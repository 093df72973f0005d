//! Group and expense routes.
//!
//! Dynamic payloads are re-validated into typed request structs here;
//! the core engine assumes well-typed input and performs only domain
//! validation. Engine validation failures map to 400 with the error's
//! code, unknown groups to 404, and anything unexpected to 500 with a
//! generic body.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};

use crate::AppState;
use fairshare_core::group::{Expense, Group, NewExpense, compute_balances};
use fairshare_core::split::{SplitInput, SplitMode};
use fairshare_shared::types::{Currency, GroupId};
use fairshare_store::StoreError;

/// Creates the group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route(
            "/groups/{group_id}/members",
            post(add_members).delete(remove_members),
        )
        .route("/groups/{group_id}/expenses", post(add_expense))
        .route("/groups/{group_id}/balance", get(get_balance))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a group.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    /// Group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Email of the creating member; becomes admin and first member.
    pub admin_email: String,
    /// Additional member emails.
    #[serde(default)]
    pub members: Vec<String>,
    /// Ledger currency code; defaults to the configured currency.
    pub currency: Option<String>,
}

/// Request body for adding or removing members.
#[derive(Debug, Deserialize)]
pub struct MembersRequest {
    /// Member emails.
    pub emails: Vec<String>,
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Expense title.
    pub title: String,
    /// Total amount as a decimal string.
    pub amount: String,
    /// The member who paid.
    pub paid_by: String,
    /// Split type: "equal" or "custom".
    pub split_type: String,
    /// Custom split entries; required for custom splits.
    pub splits: Option<Vec<SplitEntryRequest>>,
    /// Email of the member recording the expense.
    pub created_by: String,
}

/// Request body for a single custom split entry.
#[derive(Debug, Deserialize)]
pub struct SplitEntryRequest {
    /// Member email.
    pub member: String,
    /// Share amount as a decimal string.
    pub amount: String,
}

/// Response for a group.
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    /// Group ID.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Admin email.
    pub admin: String,
    /// Ordered member list.
    pub members: Vec<String>,
    /// Ledger currency.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            name: group.name.clone(),
            description: group.description.clone(),
            admin: group.admin.clone(),
            members: group.members.clone(),
            currency: group.currency.to_string(),
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

/// Response for an expense record.
#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    /// Expense ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Total amount.
    pub amount: String,
    /// The member who paid.
    pub paid_by: String,
    /// Split type.
    pub split_type: String,
    /// Per-member shares, ordered.
    pub shares: Vec<ShareResponse>,
    /// Creator email.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Response for a single share.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Member email.
    pub member: String,
    /// Share amount.
    pub amount: String,
}

impl From<&Expense> for ExpenseResponse {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            title: expense.title.clone(),
            amount: expense.amount.to_string(),
            paid_by: expense.paid_by.clone(),
            split_type: expense.split_mode.to_string(),
            shares: expense
                .shares
                .iter()
                .map(|share| ShareResponse {
                    member: share.member.clone(),
                    amount: share.amount.to_string(),
                })
                .collect(),
            created_by: expense.created_by.clone(),
            created_at: expense.created_at.to_rfc3339(),
        }
    }
}

/// Response for group details with its transaction history.
#[derive(Debug, Serialize)]
pub struct GroupDetailResponse {
    /// The group.
    pub group: GroupResponse,
    /// Expenses, newest first.
    pub transactions: Vec<ExpenseResponse>,
}

/// Response for a member's net balance.
#[derive(Debug, Serialize)]
pub struct MemberBalanceResponse {
    /// Member email.
    pub member: String,
    /// Net amount; positive means the group owes this member.
    pub amount: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/groups` - Create a new group.
async fn create_group(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroupRequest>,
) -> impl IntoResponse {
    let name = payload.name.trim();
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "NAME_REQUIRED",
                "message": "Group name is required"
            })),
        )
            .into_response();
    }

    let admin = payload.admin_email.trim();
    if admin.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "ADMIN_REQUIRED",
                "message": "Admin email is required"
            })),
        )
            .into_response();
    }

    let currency = match payload.currency.as_deref() {
        None => state.default_currency,
        Some(code) => match Currency::from_str(code) {
            Ok(currency) => currency,
            Err(message) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "INVALID_CURRENCY",
                        "message": message
                    })),
                )
                    .into_response();
            }
        },
    };

    let group = state.store.create_group(
        name.to_string(),
        payload.description,
        admin.to_string(),
        payload.members,
        currency,
        chrono::Utc::now(),
    );

    info!(group_id = %group.id, members = group.members.len(), "Group created");

    (StatusCode::CREATED, Json(GroupResponse::from(&group))).into_response()
}

/// GET `/groups/{group_id}` - Group details plus transactions, newest first.
async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
) -> impl IntoResponse {
    match state.store.group(group_id) {
        Ok(group) => Json(group_detail(&group)).into_response(),
        Err(err) => store_error_response(&err),
    }
}

/// POST `/groups/{group_id}/members` - Add members.
async fn add_members(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
    Json(payload): Json<MembersRequest>,
) -> impl IntoResponse {
    match state.store.add_members(group_id, payload.emails) {
        Ok(group) => {
            info!(group_id = %group_id, members = group.members.len(), "Members added");
            Json(GroupResponse::from(&group)).into_response()
        }
        Err(err) => store_error_response(&err),
    }
}

/// DELETE `/groups/{group_id}/members` - Remove members.
async fn remove_members(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
    Json(payload): Json<MembersRequest>,
) -> impl IntoResponse {
    match state.store.remove_members(group_id, &payload.emails) {
        Ok(group) => {
            info!(group_id = %group_id, members = group.members.len(), "Members removed");
            Json(GroupResponse::from(&group)).into_response()
        }
        Err(err) => store_error_response(&err),
    }
}

/// POST `/groups/{group_id}/expenses` - Record an expense.
async fn add_expense(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
    Json(payload): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    // Re-validate the loosely-typed payload before it reaches the engine.
    let amount = match parse_amount(&payload.amount) {
        Ok(amount) => amount,
        Err(response) => return response,
    };

    let Ok(split_mode) = SplitMode::from_str(&payload.split_type) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "INVALID_SPLIT_TYPE",
                "message": "Split type must be equal or custom"
            })),
        )
            .into_response();
    };

    let splits = match payload.splits {
        None => None,
        Some(entries) => {
            let mut parsed = Vec::with_capacity(entries.len());
            for entry in entries {
                match parse_amount(&entry.amount) {
                    Ok(amount) => parsed.push(SplitInput {
                        member: entry.member.trim().to_string(),
                        amount,
                    }),
                    Err(response) => return response,
                }
            }
            Some(parsed)
        }
    };

    // Recorder membership is enforced by the store under the group's
    // lock, together with the split validation and the append.
    let input = NewExpense {
        title: payload.title,
        amount,
        paid_by: payload.paid_by,
        split_mode,
        splits,
    };

    match state
        .store
        .add_expense(group_id, &input, &payload.created_by, chrono::Utc::now())
    {
        Ok((expense, group)) => {
            info!(
                group_id = %group_id,
                expense_id = %expense.id,
                split_type = %expense.split_mode,
                "Expense added"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "expense": ExpenseResponse::from(&expense),
                    "transactions": group_detail(&group).transactions
                })),
            )
                .into_response()
        }
        Err(err) => store_error_response(&err),
    }
}

/// GET `/groups/{group_id}/balance` - Per-member net positions.
async fn get_balance(
    State(state): State<AppState>,
    Path(group_id): Path<GroupId>,
) -> impl IntoResponse {
    let group = match state.store.group(group_id) {
        Ok(group) => group,
        Err(err) => return store_error_response(&err),
    };

    match compute_balances(&group) {
        Ok(balances) => {
            let balances: Vec<MemberBalanceResponse> = balances
                .into_iter()
                .map(|balance| MemberBalanceResponse {
                    member: balance.member,
                    amount: balance.amount.to_string(),
                })
                .collect();
            Json(json!({ "balances": balances })).into_response()
        }
        Err(err) => {
            error!(group_id = %group_id, error = %err, "Failed to compute balances");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "INTERNAL_ERROR",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_amount(raw: &str) -> Result<Decimal, Response> {
    match Decimal::from_str(raw.trim()) {
        Ok(amount) => Ok(amount),
        Err(_) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "INVALID_AMOUNT",
                "message": "Invalid amount format"
            })),
        )
            .into_response()),
    }
}

fn group_detail(group: &Group) -> GroupDetailResponse {
    // Reversed before the stable sort so same-timestamp expenses keep
    // newest-first order.
    let mut transactions: Vec<&Expense> = group.expenses.iter().rev().collect();
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    GroupDetailResponse {
        group: GroupResponse::from(group),
        transactions: transactions.into_iter().map(ExpenseResponse::from).collect(),
    }
}

fn store_error_response(err: &StoreError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "Store operation failed");
    }
    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}
