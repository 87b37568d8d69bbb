use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level response for one date, shared by the HTML and JSON views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub games: Vec<Game>,
    pub date: String,
    pub display_date: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    #[serde(default)]
    pub leaders: Leaders,
}

impl Envelope {
    pub fn ok(date: NaiveDate, games: Vec<Game>, leaders: Leaders) -> Self {
        Self {
            success: true,
            count: games.len(),
            games,
            date: date_key(date),
            display_date: display_date(date),
            message: None,
            reason: None,
            leaders,
        }
    }

    pub fn failure(date: NaiveDate, reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            success: false,
            games: Vec::new(),
            date: date_key(date),
            display_date: display_date(date),
            count: 0,
            message: Some(message.into()),
            reason: Some(reason),
            leaders: Leaders::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NoGames,
    UpstreamUnreachable,
    UpstreamMalformed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    #[serde(flatten)]
    pub progress: GameProgress,
    pub away_team: TeamSummary,
    pub home_team: TeamSummary,
    /// Goals grouped by period. Only for started games whose detail loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_summary: Option<Vec<PeriodSummary>>,
    #[serde(default)]
    pub where_to_watch: Vec<String>,
}

/// Status plus the fields that only make sense for that status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum GameProgress {
    Live {
        period_info: String,
    },
    Final,
    Scheduled {
        start_time: String,
        start_time_utc: String,
    },
}

impl GameProgress {
    pub fn label(&self) -> &'static str {
        match self {
            GameProgress::Live { .. } => "Live",
            GameProgress::Final => "Final",
            GameProgress::Scheduled { .. } => "Scheduled",
        }
    }

    /// Live games first, finished games last.
    pub fn sort_rank(&self) -> u8 {
        match self {
            GameProgress::Live { .. } => 0,
            GameProgress::Scheduled { .. } => 1,
            GameProgress::Final => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub abbrev: String,
    pub name: String,
    pub logo: String,
    pub score: u32,
    /// "W-L-OTL", empty when standings are unavailable.
    pub record: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: String,
    pub goals: Vec<ScoringEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    pub period: String,
    pub time: String,
    pub team: String,
    pub scorer: Participant,
    pub assists: Vec<Participant>,
}

/// A scorer or an assisting player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Option<i64>,
    pub name: String,
    /// Season goals for a scorer, season assists for an assist.
    pub season_total: Option<u32>,
    pub display: String,
    #[serde(flatten)]
    pub leader: LeaderFlags,
}

/// Whether a player leads their team in a category among the league leaders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderFlags {
    #[serde(default)]
    pub is_goals_leader: bool,
    #[serde(default)]
    pub is_assists_leader: bool,
    #[serde(default)]
    pub is_points_leader: bool,
}

impl LeaderFlags {
    pub fn any(&self) -> bool {
        self.is_goals_leader || self.is_assists_leader || self.is_points_leader
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaders {
    pub goals: Vec<LeaderLine>,
    pub assists: Vec<LeaderLine>,
    pub points: Vec<LeaderLine>,
}

impl Leaders {
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty() && self.assists.is_empty() && self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderLine {
    pub id: i64,
    pub name: String,
    pub team: String,
    pub value: u32,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%A, %B %d, %Y").to_string()
}
