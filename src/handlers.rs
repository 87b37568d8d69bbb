use crate::errors::AppError;
use crate::games::get_games_data;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ScoresQuery {
    pub format: Option<String>,
    pub date: Option<String>,
}

impl ScoresQuery {
    pub fn wants_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
    }
}

/// `GET /` renders the dashboard; `GET /?format=json` returns the same
/// envelope as JSON, always with 200 so the envelope carries the outcome.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ScoresQuery>,
) -> Result<Response, AppError> {
    let date = resolve_date(query.date.as_deref(), Local::now().date_naive())?;
    let envelope = get_games_data(state.api.as_ref(), &state.settings, date).await;

    if query.wants_json() {
        Ok(Json(envelope).into_response())
    } else {
        Ok(Html(render_index(&envelope, &state.settings)).into_response())
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, AppError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    match raw.to_ascii_lowercase().as_str() {
        "" | "today" | "t" => Ok(today),
        "yesterday" | "y" => Ok(today - Duration::days(1)),
        "tomorrow" => Ok(today + Duration::days(1)),
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::bad_request(format!("date must be YYYY-MM-DD, got {raw:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn keywords_resolve_relative_to_today() {
        assert_eq!(resolve_date(None, today()).unwrap(), today());
        assert_eq!(resolve_date(Some("Today"), today()).unwrap(), today());
        assert_eq!(
            resolve_date(Some("y"), today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert_eq!(
            resolve_date(Some("tomorrow"), today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 2).unwrap()
        );
    }

    #[test]
    fn explicit_dates_are_parsed() {
        assert_eq!(
            resolve_date(Some(" 2025-01-15 "), today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn garbage_dates_are_bad_requests() {
        let err = resolve_date(Some("2025-13-40"), today()).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(resolve_date(Some("next week"), today()).is_err());
    }

    #[test]
    fn only_format_json_selects_json() {
        let query = |format: Option<&str>| ScoresQuery {
            format: format.map(str::to_owned),
            date: None,
        };
        assert!(query(Some("json")).wants_json());
        assert!(query(Some("JSON")).wants_json());
        assert!(!query(Some("html")).wants_json());
        assert!(!query(None).wants_json());
    }
}
