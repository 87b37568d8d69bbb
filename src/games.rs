use crate::config::Settings;
use crate::models::{
    Envelope, FailureReason, Game, GameProgress, LeaderFlags, LeaderLine, Leaders, Participant,
    PeriodSummary, ScoringEvent, TeamSummary,
};
use crate::upstream::NhlApi;
use crate::wire::{
    Assist, GameDetail, Goal, LeaderEntry, PeriodDescriptor, ScheduleGame, ScheduleTeam,
    SkaterLeadersResponse, StandingEntry, TvBroadcast,
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use futures::future::join_all;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;
use tracing::{info, warn};

/// Team leaders are picked from this many league leaders per category.
const LEADERS_FETCH_LIMIT: usize = 100;
const SHOOTOUT_ORDINAL: u32 = 100;

/// Builds the envelope for `date`. Never fails: upstream problems end up in
/// the envelope as `success = false` or as missing optional values.
pub async fn get_games_data(api: &dyn NhlApi, settings: &Settings, date: NaiveDate) -> Envelope {
    let started = Instant::now();

    let schedule = match api.schedule(date).await {
        Ok(games) => games,
        Err(err) => {
            warn!(%date, error = %err, "schedule fetch failed");
            let reason = if err.is_malformed() {
                FailureReason::UpstreamMalformed
            } else {
                FailureReason::UpstreamUnreachable
            };
            return Envelope::failure(date, reason, format!("Could not load NHL games for {date}: {err}"));
        }
    };

    if schedule.is_empty() {
        info!(%date, "no games scheduled");
        return Envelope::failure(date, FailureReason::NoGames, format!("No NHL games found for {date}"));
    }

    let (details, standings, leaders) = tokio::join!(
        fetch_details(api, &schedule),
        api.standings(),
        api.skater_leaders(LEADERS_FETCH_LIMIT.max(settings.leaders_limit)),
    );

    let records = match standings {
        Ok(rows) => records_by_team(&rows),
        Err(err) => {
            warn!(error = %err, "standings unavailable, records left blank");
            HashMap::new()
        }
    };
    let leaders = leaders.unwrap_or_else(|err| {
        warn!(error = %err, "skater leaders unavailable");
        SkaterLeadersResponse::default()
    });
    let team_leaders = TeamLeaders::from_response(&leaders);

    let mut games: Vec<Game> = schedule
        .iter()
        .map(|game| shape_game(game, details.get(&game.id), &records, &team_leaders, settings))
        .collect();
    games.sort_by_key(|game| game.progress.sort_rank());

    let envelope = Envelope::ok(date, games, leaders_for_display(&leaders, settings.leaders_limit));
    info!(
        %date,
        count = envelope.count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "games shaped"
    );
    envelope
}

async fn fetch_details(api: &dyn NhlApi, schedule: &[ScheduleGame]) -> HashMap<i64, GameDetail> {
    let requests = schedule
        .iter()
        .filter(|game| game.id != 0 && has_started(&game.game_state))
        .map(|game| async move { (game.id, api.game_detail(game.id).await) });

    let mut details = HashMap::new();
    for (game_id, result) in join_all(requests).await {
        match result {
            Ok(detail) => {
                details.insert(game_id, detail);
            }
            Err(err) => warn!(game_id, error = %err, "game detail unavailable"),
        }
    }
    details
}

fn has_started(game_state: &str) -> bool {
    matches!(game_state, "LIVE" | "CRIT" | "FINAL" | "OFF")
}

fn shape_game(
    game: &ScheduleGame,
    detail: Option<&GameDetail>,
    records: &HashMap<String, String>,
    leaders: &TeamLeaders,
    settings: &Settings,
) -> Game {
    let progress = match game.game_state.as_str() {
        "LIVE" | "CRIT" => GameProgress::Live {
            period_info: detail.map(period_info).unwrap_or_default(),
        },
        "FINAL" | "OFF" => GameProgress::Final,
        _ => {
            let start_time_utc = game.start_time_utc.clone().unwrap_or_default();
            GameProgress::Scheduled {
                start_time: format_start_time(&start_time_utc, settings.display_offset()),
                start_time_utc,
            }
        }
    };

    let detail = detail.filter(|_| !matches!(progress, GameProgress::Scheduled { .. }));
    let (away_shots, home_shots) = match detail {
        Some(d) => (d.away_team.sog, d.home_team.sog),
        None => (None, None),
    };

    Game {
        id: game.id,
        away_team: team_summary(&game.away_team, records, away_shots, settings),
        home_team: team_summary(&game.home_team, records, home_shots, settings),
        scoring_summary: detail.map(|detail| scoring_summary(detail, leaders)),
        where_to_watch: where_to_watch(&game.tv_broadcasts),
        progress,
    }
}

fn team_summary(
    team: &ScheduleTeam,
    records: &HashMap<String, String>,
    shots: Option<u32>,
    settings: &Settings,
) -> TeamSummary {
    TeamSummary {
        abbrev: team.abbrev.clone(),
        name: team.display_name(),
        logo: logo_url(&settings.logo_base_url, &team.abbrev),
        score: team.score.unwrap_or(0),
        record: records.get(&team.abbrev).cloned().unwrap_or_default(),
        shots,
    }
}

pub fn logo_url(base: &str, abbrev: &str) -> String {
    if abbrev.is_empty() {
        return String::new();
    }
    format!("{}/{abbrev}_light.svg", base.trim_end_matches('/'))
}

fn records_by_team(rows: &[StandingEntry]) -> HashMap<String, String> {
    rows.iter()
        .filter(|row| !row.team_abbrev.as_str().is_empty())
        .map(|row| (row.team_abbrev.as_str().to_owned(), row.record()))
        .collect()
}

/// "Period 2", "OT", "OT2", "SO".
pub fn period_label(period_type: &str, number: u32) -> String {
    match period_type.to_ascii_uppercase().as_str() {
        "SO" => "SO".to_owned(),
        "OT" => overtime_label(number),
        _ if number > 3 => overtime_label(number),
        _ => format!("Period {number}"),
    }
}

fn overtime_label(number: u32) -> String {
    if number <= 4 {
        "OT".to_owned()
    } else {
        format!("OT{}", number - 3)
    }
}

fn period_ordinal(descriptor: &PeriodDescriptor) -> u32 {
    if descriptor.period_type.eq_ignore_ascii_case("SO") {
        SHOOTOUT_ORDINAL
    } else {
        descriptor.number
    }
}

fn period_info(detail: &GameDetail) -> String {
    let Some(descriptor) = detail.period_descriptor.as_ref().filter(|d| d.number > 0) else {
        return String::new();
    };
    let label = period_label(&descriptor.period_type, descriptor.number);
    match &detail.clock {
        Some(clock) if clock.in_intermission => format!("{label} - Intermission"),
        Some(clock) if !clock.time_remaining.is_empty() => {
            format!("{label} - {}", clock.time_remaining)
        }
        _ => label,
    }
}

/// Goals grouped by period, with every regulation period present and
/// overtime periods present up to the one the game reached.
fn scoring_summary(detail: &GameDetail, leaders: &TeamLeaders) -> Vec<PeriodSummary> {
    let mut periods: BTreeMap<u32, PeriodSummary> = BTreeMap::new();

    for scoring in detail.summary.iter().flat_map(|summary| &summary.scoring) {
        let descriptor = &scoring.period_descriptor;
        let label = period_label(&descriptor.period_type, descriptor.number);
        let entry = periods
            .entry(period_ordinal(descriptor))
            .or_insert_with(|| PeriodSummary {
                period: label.clone(),
                goals: Vec::new(),
            });
        entry
            .goals
            .extend(scoring.goals.iter().map(|goal| scoring_event(goal, &label, leaders)));
    }

    let reached = match &detail.period_descriptor {
        Some(d) if d.period_type.eq_ignore_ascii_case("SO") => d.number.saturating_sub(1),
        Some(d) => d.number,
        None => 0,
    };
    for number in 1..=reached.max(3) {
        periods.entry(number).or_insert_with(|| PeriodSummary {
            period: period_label("REG", number),
            goals: Vec::new(),
        });
    }

    periods.into_values().collect()
}

fn scoring_event(goal: &Goal, period: &str, leaders: &TeamLeaders) -> ScoringEvent {
    let team = goal.team().to_owned();
    let name = goal.scorer_name();
    let scorer = Participant {
        id: goal.player_id,
        display: with_total(&name, goal.goals_to_date),
        season_total: goal.goals_to_date,
        leader: leaders.flags(&team, goal.player_id),
        name,
    };
    let assists = goal
        .assists
        .iter()
        .map(|assist| assist_participant(assist, &team, leaders))
        .collect();

    ScoringEvent {
        period: period.to_owned(),
        time: goal.time_in_period.clone(),
        team,
        scorer,
        assists,
    }
}

fn assist_participant(assist: &Assist, team: &str, leaders: &TeamLeaders) -> Participant {
    let name = assist.player_name();
    Participant {
        id: assist.player_id,
        display: with_total(&name, assist.assists_to_date),
        season_total: assist.assists_to_date,
        leader: leaders.flags(team, assist.player_id),
        name,
    }
}

fn with_total(name: &str, total: Option<u32>) -> String {
    match total {
        Some(total) => format!("{name} ({total})"),
        None => name.to_owned(),
    }
}

/// "7:00 PM" style time in the display offset; the raw value when it doesn't parse.
pub fn format_start_time(start_time_utc: &str, offset: FixedOffset) -> String {
    if start_time_utc.is_empty() {
        return String::new();
    }
    match DateTime::parse_from_rfc3339(start_time_utc) {
        Ok(at) => at.with_timezone(&offset).format("%I:%M %p").to_string(),
        Err(_) => start_time_utc.to_owned(),
    }
}

/// Broadcast lines, Canadian first, then US, then everything else.
fn where_to_watch(broadcasts: &[TvBroadcast]) -> Vec<String> {
    let mut lines: Vec<(u8, String)> = broadcasts
        .iter()
        .filter(|b| !b.network.is_empty())
        .map(|b| {
            let rank = match b.country_code.as_str() {
                "CA" => 0,
                "US" => 1,
                _ => 2,
            };
            let line = match (b.country_code.is_empty(), b.market.is_empty()) {
                (false, false) => format!("{} ({}): {}", b.country_code, b.market, b.network),
                (false, true) => format!("{}: {}", b.country_code, b.network),
                (true, false) => format!("{}: {}", b.market, b.network),
                (true, true) => b.network.clone(),
            };
            (rank, line)
        })
        .collect();
    lines.sort_by_key(|(rank, _)| *rank);
    lines.into_iter().map(|(_, line)| line).collect()
}

fn leaders_for_display(raw: &SkaterLeadersResponse, limit: usize) -> Leaders {
    Leaders {
        goals: leader_lines(&raw.goals, limit),
        assists: leader_lines(&raw.assists, limit),
        points: leader_lines(&raw.points, limit),
    }
}

fn leader_lines(entries: &[LeaderEntry], limit: usize) -> Vec<LeaderLine> {
    entries
        .iter()
        .take(limit)
        .map(|entry| LeaderLine {
            id: entry.id,
            name: entry.name(),
            team: entry.team_abbrev.as_str().to_owned(),
            value: entry.value,
        })
        .collect()
}

/// Per team, the player ids with the best value in each category.
#[derive(Debug, Default)]
struct TeamLeaders {
    goals: HashMap<String, Vec<i64>>,
    assists: HashMap<String, Vec<i64>>,
    points: HashMap<String, Vec<i64>>,
}

impl TeamLeaders {
    fn from_response(raw: &SkaterLeadersResponse) -> Self {
        Self {
            goals: best_per_team(&raw.goals),
            assists: best_per_team(&raw.assists),
            points: best_per_team(&raw.points),
        }
    }

    fn flags(&self, team: &str, player_id: Option<i64>) -> LeaderFlags {
        let Some(id) = player_id else {
            return LeaderFlags::default();
        };
        let holds = |map: &HashMap<String, Vec<i64>>| {
            map.get(team).is_some_and(|ids| ids.contains(&id))
        };
        LeaderFlags {
            is_goals_leader: holds(&self.goals),
            is_assists_leader: holds(&self.assists),
            is_points_leader: holds(&self.points),
        }
    }
}

fn best_per_team(entries: &[LeaderEntry]) -> HashMap<String, Vec<i64>> {
    let mut best: HashMap<String, (u32, Vec<i64>)> = HashMap::new();
    for entry in entries {
        let team = entry.team_abbrev.as_str();
        if team.is_empty() || entry.id == 0 {
            continue;
        }
        let slot = best.entry(team.to_owned()).or_insert((entry.value, Vec::new()));
        if entry.value > slot.0 {
            *slot = (entry.value, vec![entry.id]);
        } else if entry.value == slot.0 {
            slot.1.push(entry.id);
        }
    }
    best.into_iter().map(|(team, (_, ids))| (team, ids)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::UpstreamError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// In-memory upstream. `None` for the schedule means "unreachable".
    #[derive(Default)]
    struct FakeApi {
        schedule: Option<Value>,
        malformed_schedule: bool,
        details: HashMap<i64, Value>,
        standings: Option<Value>,
        leaders: Option<Value>,
        detail_calls: Mutex<Vec<i64>>,
    }

    fn unreachable(url: &str) -> UpstreamError {
        UpstreamError::Status {
            url: url.to_owned(),
            status: 503,
        }
    }

    #[async_trait]
    impl NhlApi for FakeApi {
        async fn schedule(&self, _date: NaiveDate) -> Result<Vec<ScheduleGame>, UpstreamError> {
            if self.malformed_schedule {
                let source = serde_json::from_str::<Value>("{").unwrap_err();
                return Err(UpstreamError::Malformed {
                    url: "fake/schedule".into(),
                    source,
                });
            }
            let value = self.schedule.clone().ok_or_else(|| unreachable("fake/schedule"))?;
            Ok(serde_json::from_value(value).unwrap())
        }

        async fn game_detail(&self, game_id: i64) -> Result<GameDetail, UpstreamError> {
            self.detail_calls.lock().unwrap().push(game_id);
            let value = self
                .details
                .get(&game_id)
                .cloned()
                .ok_or_else(|| unreachable("fake/detail"))?;
            Ok(serde_json::from_value(value).unwrap())
        }

        async fn standings(&self) -> Result<Vec<StandingEntry>, UpstreamError> {
            let value = self.standings.clone().ok_or_else(|| unreachable("fake/standings"))?;
            Ok(serde_json::from_value(value).unwrap())
        }

        async fn skater_leaders(&self, _limit: usize) -> Result<SkaterLeadersResponse, UpstreamError> {
            let value = self.leaders.clone().ok_or_else(|| unreachable("fake/leaders"))?;
            Ok(serde_json::from_value(value).unwrap())
        }
    }

    fn jan_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn schedule_game(id: i64, state: &str, away: &str, home: &str) -> Value {
        json!({
            "id": id,
            "gameState": state,
            "startTimeUTC": "2025-01-16T00:00:00Z",
            "awayTeam": { "abbrev": away, "score": 2, "commonName": { "default": away } },
            "homeTeam": { "abbrev": home, "score": 4, "commonName": { "default": home } }
        })
    }

    async fn shape(api: &FakeApi) -> Envelope {
        get_games_data(api, &Settings::default(), jan_15()).await
    }

    fn assert_consistent(envelope: &Envelope) {
        assert_eq!(envelope.count, envelope.games.len());
        for game in &envelope.games {
            assert!(["Live", "Final", "Scheduled"].contains(&game.progress.label()));
        }
    }

    #[tokio::test]
    async fn two_finished_games() {
        let api = FakeApi {
            schedule: Some(json!([
                schedule_game(1, "OFF", "BOS", "MTL"),
                schedule_game(2, "FINAL", "NYR", "NJD")
            ])),
            ..FakeApi::default()
        };

        let envelope = shape(&api).await;

        assert!(envelope.success);
        assert_eq!(envelope.count, 2);
        assert_consistent(&envelope);
        let value = serde_json::to_value(&envelope).unwrap();
        for game in value["games"].as_array().unwrap() {
            assert_eq!(game["status"], "Final");
            assert!(game.get("period_info").is_none());
        }
    }

    #[tokio::test]
    async fn empty_schedule_is_a_no_games_failure() {
        let api = FakeApi {
            schedule: Some(json!([])),
            ..FakeApi::default()
        };

        let envelope = shape(&api).await;

        assert!(!envelope.success);
        assert!(envelope.games.is_empty());
        assert_eq!(envelope.count, 0);
        assert_eq!(envelope.reason, Some(FailureReason::NoGames));
        assert_eq!(envelope.message.as_deref(), Some("No NHL games found for 2025-01-15"));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_reported_not_raised() {
        let envelope = shape(&FakeApi::default()).await;

        assert!(!envelope.success);
        assert!(envelope.games.is_empty());
        assert_eq!(envelope.count, 0);
        assert_eq!(envelope.reason, Some(FailureReason::UpstreamUnreachable));
        assert!(envelope.message.is_some());
    }

    #[tokio::test]
    async fn malformed_schedule_has_its_own_reason() {
        let api = FakeApi {
            malformed_schedule: true,
            ..FakeApi::default()
        };
        let envelope = shape(&api).await;
        assert_eq!(envelope.reason, Some(FailureReason::UpstreamMalformed));
        assert_consistent(&envelope);
    }

    #[tokio::test]
    async fn games_are_ordered_live_scheduled_final() {
        let api = FakeApi {
            schedule: Some(json!([
                schedule_game(1, "OFF", "BOS", "MTL"),
                schedule_game(2, "FUT", "TOR", "OTT"),
                schedule_game(3, "LIVE", "EDM", "CGY"),
                schedule_game(4, "PRE", "VAN", "SEA")
            ])),
            ..FakeApi::default()
        };

        let envelope = shape(&api).await;

        let ids: Vec<i64> = envelope.games.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
        assert_consistent(&envelope);
    }

    #[tokio::test]
    async fn only_started_games_fetch_detail() {
        let api = FakeApi {
            schedule: Some(json!([
                schedule_game(1, "OFF", "BOS", "MTL"),
                schedule_game(2, "FUT", "TOR", "OTT"),
                schedule_game(3, "CRIT", "EDM", "CGY")
            ])),
            ..FakeApi::default()
        };

        shape(&api).await;

        let mut calls = api.detail_calls.lock().unwrap().clone();
        calls.sort();
        assert_eq!(calls, vec![1, 3]);
    }

    #[tokio::test]
    async fn live_game_uses_detail_for_period_shots_and_scoring() {
        let mut details = HashMap::new();
        details.insert(
            3,
            json!({
                "periodDescriptor": { "number": 2, "periodType": "REG" },
                "clock": { "timeRemaining": "12:34", "inIntermission": false },
                "awayTeam": { "sog": 18 },
                "homeTeam": { "sog": 22 },
                "summary": { "scoring": [
                    { "periodDescriptor": { "number": 1, "periodType": "REG" }, "goals": [
                        {
                            "playerId": 8478402,
                            "firstName": { "default": "Connor" },
                            "lastName": { "default": "McDavid" },
                            "teamAbbrev": { "default": "EDM" },
                            "goalsToDate": 20,
                            "timeInPeriod": "05:12",
                            "assists": [
                                { "playerId": 8477934, "firstName": { "default": "Leon" }, "lastName": { "default": "Draisaitl" }, "assistsToDate": 31 }
                            ]
                        }
                    ] }
                ] }
            }),
        );
        let api = FakeApi {
            schedule: Some(json!([schedule_game(3, "LIVE", "EDM", "CGY")])),
            details,
            standings: Some(json!([
                { "teamAbbrev": { "default": "EDM" }, "wins": 28, "losses": 14, "otLosses": 3 }
            ])),
            leaders: Some(json!({
                "goals": [
                    { "id": 8478402, "teamAbbrev": "EDM", "value": 20 },
                    { "id": 8477934, "teamAbbrev": "EDM", "value": 30 }
                ],
                "assists": [ { "id": 8477934, "teamAbbrev": "EDM", "value": 31 } ],
                "points": []
            })),
            ..FakeApi::default()
        };

        let envelope = shape(&api).await;
        let game = &envelope.games[0];

        assert_eq!(
            game.progress,
            GameProgress::Live {
                period_info: "Period 2 - 12:34".into()
            }
        );
        assert_eq!(game.away_team.shots, Some(18));
        assert_eq!(game.home_team.shots, Some(22));
        assert_eq!(game.away_team.record, "28-14-3");
        assert_eq!(game.home_team.record, "");

        let summary = game.scoring_summary.as_ref().unwrap();
        let labels: Vec<&str> = summary.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(labels, vec!["Period 1", "Period 2", "Period 3"]);

        let goal = &summary[0].goals[0];
        assert_eq!(goal.time, "05:12");
        assert_eq!(goal.team, "EDM");
        assert_eq!(goal.scorer.display, "Connor McDavid (20)");
        assert!(!goal.scorer.leader.is_goals_leader);
        assert_eq!(goal.assists[0].display, "Leon Draisaitl (31)");
        assert!(goal.assists[0].leader.is_goals_leader);
        assert!(goal.assists[0].leader.is_assists_leader);

        assert_eq!(envelope.leaders.goals.len(), 2);
    }

    #[tokio::test]
    async fn scheduled_game_has_start_time_and_no_details() {
        let api = FakeApi {
            schedule: Some(json!([schedule_game(2, "FUT", "TOR", "OTT")])),
            ..FakeApi::default()
        };

        let envelope = shape(&api).await;
        let game = &envelope.games[0];

        assert_eq!(
            game.progress,
            GameProgress::Scheduled {
                start_time: "07:00 PM".into(),
                start_time_utc: "2025-01-16T00:00:00Z".into()
            }
        );
        assert_eq!(game.away_team.shots, None);
        assert!(game.scoring_summary.is_none());
        assert_eq!(game.away_team.logo, "https://assets.nhle.com/logos/nhl/svg/TOR_light.svg");
    }

    #[test]
    fn period_labels() {
        assert_eq!(period_label("REG", 1), "Period 1");
        assert_eq!(period_label("OT", 4), "OT");
        assert_eq!(period_label("OT", 6), "OT3");
        assert_eq!(period_label("REG", 5), "OT2");
        assert_eq!(period_label("SO", 5), "SO");
    }

    #[test]
    fn overtime_and_shootout_periods_are_ordered() {
        let detail: GameDetail = serde_json::from_value(json!({
            "periodDescriptor": { "number": 5, "periodType": "SO" },
            "summary": { "scoring": [
                { "periodDescriptor": { "number": 5, "periodType": "SO" }, "goals": [ { "timeInPeriod": "00:00" } ] },
                { "periodDescriptor": { "number": 2, "periodType": "REG" }, "goals": [] },
                { "periodDescriptor": { "number": 4, "periodType": "OT" }, "goals": [] }
            ] }
        }))
        .unwrap();

        let summary = scoring_summary(&detail, &TeamLeaders::default());

        let labels: Vec<&str> = summary.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(labels, vec!["Period 1", "Period 2", "Period 3", "OT", "SO"]);
        assert_eq!(summary[4].goals.len(), 1);
    }

    #[test]
    fn intermission_is_shown_instead_of_the_clock() {
        let detail: GameDetail = serde_json::from_value(json!({
            "periodDescriptor": { "number": 1, "periodType": "REG" },
            "clock": { "timeRemaining": "00:00", "inIntermission": true }
        }))
        .unwrap();
        assert_eq!(period_info(&detail), "Period 1 - Intermission");
    }

    #[test]
    fn broadcasts_list_canada_then_us_then_others() {
        let broadcasts: Vec<TvBroadcast> = serde_json::from_value(json!([
            { "network": "ESPN+", "market": "N", "countryCode": "US" },
            { "network": "TVAS", "market": "", "countryCode": "" },
            { "network": "SN", "market": "H", "countryCode": "CA" },
            { "network": "", "market": "A", "countryCode": "CA" },
            { "network": "Viaplay", "market": "", "countryCode": "SE" }
        ]))
        .unwrap();

        assert_eq!(
            where_to_watch(&broadcasts),
            vec!["CA (H): SN", "US (N): ESPN+", "TVAS", "SE: Viaplay"]
        );
    }

    #[test]
    fn start_time_falls_back_to_raw_value() {
        let offset = Settings::default().display_offset();
        assert_eq!(format_start_time("2025-01-16T00:30:00Z", offset), "07:30 PM");
        assert_eq!(format_start_time("tonight", offset), "tonight");
        assert_eq!(format_start_time("", offset), "");
    }

    #[test]
    fn team_leaders_keep_ties() {
        let raw: SkaterLeadersResponse = serde_json::from_value(json!({
            "points": [
                { "id": 1, "teamAbbrev": "TOR", "value": 50 },
                { "id": 2, "teamAbbrev": "TOR", "value": 50 },
                { "id": 3, "teamAbbrev": "TOR", "value": 40 }
            ]
        }))
        .unwrap();
        let leaders = TeamLeaders::from_response(&raw);

        assert!(leaders.flags("TOR", Some(1)).is_points_leader);
        assert!(leaders.flags("TOR", Some(2)).is_points_leader);
        assert!(!leaders.flags("TOR", Some(3)).any());
        assert!(!leaders.flags("MTL", Some(1)).any());
        assert!(!leaders.flags("TOR", None).any());
    }

    #[test]
    fn logo_is_empty_without_abbreviation() {
        assert_eq!(logo_url("https://cdn/", "BOS"), "https://cdn/BOS_light.svg");
        assert_eq!(logo_url("https://cdn", ""), "");
    }
}
