//! Serde shapes for the NHL web API (`api-web.nhle.com/v1`).
//!
//! Every field is optional or defaulted: the upstream adds and drops fields
//! without notice, and a missing field should degrade one value on a card,
//! not the whole page. The shaper turns these into the types in `models`.
use serde::{Deserialize, Deserializer};

/// A text field that arrives either as `"TOR"` or as `{"default": "TOR", "fr": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedString {
    pub default: String,
}

impl LocalizedString {
    pub fn as_str(&self) -> &str {
        &self.default
    }
}

impl<'de> Deserialize<'de> for LocalizedString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Localized {
                #[serde(default)]
                default: String,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Plain(default) | Repr::Localized { default } => LocalizedString { default },
        })
    }
}

fn text(field: &Option<LocalizedString>) -> &str {
    field.as_ref().map(LocalizedString::as_str).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Schedule  (GET /schedule/{date})
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub game_week: Vec<GameDay>,
}

impl ScheduleResponse {
    /// Games listed under `date` (`YYYY-MM-DD`). The endpoint returns the
    /// whole week starting at that date.
    pub fn games_on(self, date: &str) -> Vec<ScheduleGame> {
        self.game_week
            .into_iter()
            .filter(|day| day.date == date)
            .flat_map(|day| day.games)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameDay {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub games: Vec<ScheduleGame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGame {
    #[serde(default)]
    pub id: i64,
    /// "FUT", "PRE", "LIVE", "CRIT", "FINAL", "OFF"
    #[serde(default)]
    pub game_state: String,
    #[serde(rename = "startTimeUTC", default)]
    pub start_time_utc: Option<String>,
    #[serde(default)]
    pub away_team: ScheduleTeam,
    #[serde(default)]
    pub home_team: ScheduleTeam,
    #[serde(default)]
    pub tv_broadcasts: Vec<TvBroadcast>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeam {
    #[serde(default)]
    pub abbrev: String,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub name: Option<LocalizedString>,
    #[serde(default)]
    pub place_name: Option<LocalizedString>,
    #[serde(default)]
    pub common_name: Option<LocalizedString>,
}

impl ScheduleTeam {
    /// "Toronto Maple Leafs", falling back to the abbreviation.
    pub fn display_name(&self) -> String {
        let name = text(&self.name);
        if !name.is_empty() {
            return name.to_owned();
        }
        let joined = format!("{} {}", text(&self.place_name), text(&self.common_name));
        let joined = joined.trim();
        if joined.is_empty() {
            self.abbrev.clone()
        } else {
            joined.to_owned()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvBroadcast {
    #[serde(default)]
    pub network: String,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub country_code: String,
}

// ---------------------------------------------------------------------------
// Game detail  (GET /gamecenter/{id}/landing, /gamecenter/{id}/boxscore)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    #[serde(default)]
    pub period_descriptor: Option<PeriodDescriptor>,
    #[serde(default)]
    pub clock: Option<GameClock>,
    #[serde(default)]
    pub away_team: DetailTeam,
    #[serde(default)]
    pub home_team: DetailTeam,
    #[serde(default)]
    pub summary: Option<GameSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDescriptor {
    #[serde(default)]
    pub number: u32,
    /// "REG", "OT" or "SO"
    #[serde(default)]
    pub period_type: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameClock {
    #[serde(default)]
    pub time_remaining: String,
    #[serde(default)]
    pub in_intermission: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailTeam {
    #[serde(default)]
    pub sog: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameSummary {
    #[serde(default)]
    pub scoring: Vec<PeriodScoring>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodScoring {
    #[serde(default)]
    pub period_descriptor: PeriodDescriptor,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<LocalizedString>,
    #[serde(default)]
    pub last_name: Option<LocalizedString>,
    /// Short form, e.g. "A. Matthews".
    #[serde(default)]
    pub name: Option<LocalizedString>,
    #[serde(default)]
    pub team_abbrev: Option<LocalizedString>,
    #[serde(default)]
    pub goals_to_date: Option<u32>,
    #[serde(default)]
    pub time_in_period: String,
    #[serde(default)]
    pub assists: Vec<Assist>,
}

impl Goal {
    pub fn scorer_name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.name)
    }

    pub fn team(&self) -> &str {
        text(&self.team_abbrev)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assist {
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub first_name: Option<LocalizedString>,
    #[serde(default)]
    pub last_name: Option<LocalizedString>,
    #[serde(default)]
    pub name: Option<LocalizedString>,
    #[serde(default)]
    pub assists_to_date: Option<u32>,
}

impl Assist {
    pub fn player_name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.name)
    }
}

fn full_name(
    first: &Option<LocalizedString>,
    last: &Option<LocalizedString>,
    short: &Option<LocalizedString>,
) -> String {
    let joined = format!("{} {}", text(first), text(last));
    let joined = joined.trim();
    if joined.is_empty() {
        text(short).to_owned()
    } else {
        joined.to_owned()
    }
}

// ---------------------------------------------------------------------------
// Standings  (GET /standings/now)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    #[serde(default)]
    pub team_abbrev: LocalizedString,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default)]
    pub ot_losses: u32,
}

impl StandingEntry {
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ot_losses)
    }
}

// ---------------------------------------------------------------------------
// Skater leaders  (GET /skater-stats-leaders/current)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkaterLeadersResponse {
    #[serde(default)]
    pub goals: Vec<LeaderEntry>,
    #[serde(default)]
    pub assists: Vec<LeaderEntry>,
    #[serde(default)]
    pub points: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderEntry {
    #[serde(default, alias = "playerId")]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<LocalizedString>,
    #[serde(default)]
    pub last_name: Option<LocalizedString>,
    #[serde(default)]
    pub player_name: Option<LocalizedString>,
    #[serde(default)]
    pub team_abbrev: LocalizedString,
    #[serde(default)]
    pub value: u32,
}

impl LeaderEntry {
    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name, &self.player_name)
    }
}
