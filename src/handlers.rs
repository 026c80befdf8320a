use crate::errors::{AppError, INVALID_AMOUNT, INVALID_GOAL};
use crate::messages::{intake_message, summary, GOAL_SAVED, INTAKE_SAVED};
use crate::models::{
    AmountInput, AppData, GoalForm, GoalRequest, GoalResponse, HistoryResponse, IndexQuery,
    IntakeForm, IntakeRequest, TipResponse, TodayResponse,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::tips::random_tip;
use crate::ui::{render_index, IndexView};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::{info, warn};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> Result<Html<String>, AppError> {
    let mut data = state.data.lock().await;
    prune_and_flush(&state, &mut data).await?;

    let notice = match query.notice.as_deref() {
        Some("intake") => Some(INTAKE_SAVED),
        Some("goal") => Some(GOAL_SAVED),
        Some("invalid-intake") => Some(INVALID_AMOUNT),
        Some("invalid-goal") => Some(INVALID_GOAL),
        _ => None,
    };

    let view = IndexView {
        today: today_response(&state, &data),
        history: state.ledger.window_last_7_days(&*data),
        tip: random_tip(&mut rand::thread_rng()),
        notice,
    };
    Ok(Html(render_index(&view)))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let mut data = state.data.lock().await;
    prune_and_flush(&state, &mut data).await?;
    Ok(Json(today_response(&state, &data)))
}

pub async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, AppError> {
    let mut data = state.data.lock().await;
    prune_and_flush(&state, &mut data).await?;
    Ok(Json(HistoryResponse {
        days: state.ledger.window_last_7_days(&*data),
    }))
}

pub async fn get_goal(State(state): State<AppState>) -> Result<Json<GoalResponse>, AppError> {
    let mut data = state.data.lock().await;
    prune_and_flush(&state, &mut data).await?;
    Ok(Json(GoalResponse {
        goal: state.goals.get_goal(&*data),
    }))
}

pub async fn get_tip() -> Json<TipResponse> {
    Json(TipResponse {
        tip: random_tip(&mut rand::thread_rng()).to_string(),
    })
}

pub async fn post_intake(
    State(state): State<AppState>,
    Json(payload): Json<IntakeRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let response = apply_intake(&state, &payload.liters).await?;
    Ok(Json(response))
}

pub async fn submit_intake(
    State(state): State<AppState>,
    Form(form): Form<IntakeForm>,
) -> Result<Redirect, AppError> {
    match apply_intake(&state, &AmountInput::Text(form.liters)).await {
        Ok(_) => Ok(Redirect::to("/?notice=intake")),
        Err(err) if err.status == StatusCode::BAD_REQUEST => {
            Ok(Redirect::to("/?notice=invalid-intake"))
        }
        Err(err) => Err(err),
    }
}

pub async fn post_goal(
    State(state): State<AppState>,
    Json(payload): Json<GoalRequest>,
) -> Result<Json<GoalResponse>, AppError> {
    let goal = apply_goal(&state, &payload.goal).await?;
    Ok(Json(GoalResponse { goal }))
}

pub async fn submit_goal(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Redirect, AppError> {
    match apply_goal(&state, &AmountInput::Text(form.goal)).await {
        Ok(_) => Ok(Redirect::to("/?notice=goal")),
        Err(err) if err.status == StatusCode::BAD_REQUEST => {
            Ok(Redirect::to("/?notice=invalid-goal"))
        }
        Err(err) => Err(err),
    }
}

async fn apply_intake(state: &AppState, input: &AmountInput) -> Result<TodayResponse, AppError> {
    let Some(liters) = input.positive() else {
        warn!("rejected intake {input:?}");
        return Err(AppError::bad_request(INVALID_AMOUNT));
    };

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    state.ledger.set_today(&mut next, liters);
    state.ledger.prune(&mut next);
    commit(state, &mut data, next).await?;
    info!("intake for {} set to {liters} L", state.ledger.key_for(0));

    Ok(today_response(state, &data))
}

async fn apply_goal(state: &AppState, input: &AmountInput) -> Result<f64, AppError> {
    let Some(requested) = input.positive() else {
        warn!("rejected goal {input:?}");
        return Err(AppError::bad_request(INVALID_GOAL));
    };

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let goal = state.goals.set_goal(&mut next, requested);
    commit(state, &mut data, next).await?;
    info!("daily goal set to {goal} L (requested {requested})");

    Ok(goal)
}

async fn prune_and_flush(state: &AppState, data: &mut AppData) -> Result<(), AppError> {
    let mut next = data.clone();
    let removed = state.ledger.prune(&mut next);
    if removed > 0 {
        commit(state, data, next).await?;
        info!("pruned {removed} stale intake records");
    }
    Ok(())
}

/// Flushes `next` and only then makes it the live store; a failed write
/// leaves `data` as it was.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Result<(), AppError> {
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(())
}

fn today_response(state: &AppState, data: &AppData) -> TodayResponse {
    let liters = state.ledger.today(data);
    let goal = state.goals.get_goal(data);
    let progress = state.goals.progress(data, liters);

    TodayResponse {
        date: state.ledger.key_for(0).to_string(),
        liters,
        goal,
        percent: progress.percent,
        achieved: progress.achieved,
        intake_message: intake_message(liters),
        summary: summary(liters, goal, progress.percent),
    }
}
