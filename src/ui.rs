use crate::config::Settings;
use crate::models::{Envelope, Game, GameProgress, LeaderLine, Leaders, Participant, ScoringEvent, TeamSummary};

pub fn render_index(envelope: &Envelope, settings: &Settings) -> String {
    let count = envelope.count.to_string();
    let auto_refresh_secs = settings.auto_refresh_secs.to_string();
    let leaders = render_leaders(&envelope.leaders);
    let games = render_games(envelope);

    fill(INDEX_HTML, |key| match key {
        "DISPLAY_DATE" => Some(escape(&envelope.display_date)),
        "DATE" => Some(escape(&envelope.date)),
        "COUNT" => Some(count.clone()),
        "AUTO_REFRESH_SECS" => Some(auto_refresh_secs.clone()),
        "AUTO_REFRESH_ON_LOAD" => Some(settings.auto_refresh_on_load.to_string()),
        "LEADERS" => Some(leaders.clone()),
        "GAMES" => Some(games.clone()),
        _ => None,
    })
}

/// Substitutes `{{KEY}}` placeholders in one pass; substituted text is never rescanned.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}").and_then(|end| lookup(&after[..end]).map(|value| (end, value))) {
            Some((end, value)) => {
                out.push_str(&value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn render_games(envelope: &Envelope) -> String {
    if !envelope.success || envelope.games.is_empty() {
        let message = envelope.message.as_deref().unwrap_or("No games.");
        return format!(r#"<p class="empty">{}</p>"#, escape(message));
    }
    envelope.games.iter().map(render_card).collect::<Vec<_>>().join("\n")
}

fn render_card(game: &Game) -> String {
    let status = game.progress.label();
    let (when, show_score) = match &game.progress {
        GameProgress::Live { period_info } => (period_info.as_str(), true),
        GameProgress::Final => ("Final", true),
        GameProgress::Scheduled { start_time, .. } => (start_time.as_str(), false),
    };
    let away_ahead = show_score && game.away_team.score > game.home_team.score;
    let home_ahead = show_score && game.home_team.score > game.away_team.score;

    let shots = match (game.away_team.shots, game.home_team.shots) {
        (Some(away), Some(home)) => format!(r#"<div class="shots">SOG {away} - {home}</div>"#),
        _ => String::new(),
    };
    let watch = if game.where_to_watch.is_empty() {
        String::new()
    } else {
        let lines: Vec<String> = game.where_to_watch.iter().map(|line| escape(line)).collect();
        format!(r#"<div class="watch">{}</div>"#, lines.join(" &middot; "))
    };

    format!(
        r#"<article class="card status-{lower}" data-game-id="{id}">
  <div class="card-head"><span class="badge">{status}</span><span class="when">{when}</span></div>
  {away}
  {home}
  {shots}{watch}{details}
</article>"#,
        lower = status.to_ascii_lowercase(),
        id = game.id,
        when = escape(when),
        away = render_team(&game.away_team, show_score, away_ahead),
        home = render_team(&game.home_team, show_score, home_ahead),
        details = render_details(game),
    )
}

fn render_team(team: &TeamSummary, show_score: bool, ahead: bool) -> String {
    let score = if show_score { team.score.to_string() } else { String::new() };
    format!(
        r#"<div class="team{ahead}"><img class="logo" src="{logo}" alt="{abbrev}" loading="lazy" /><div class="team-meta"><span class="team-name">{name}</span><span class="record">{record}</span></div><span class="score">{score}</span></div>"#,
        ahead = if ahead { " ahead" } else { "" },
        logo = escape(&team.logo),
        abbrev = escape(&team.abbrev),
        name = escape(&team.name),
        record = escape(&team.record),
    )
}

fn render_details(game: &Game) -> String {
    let Some(periods) = &game.scoring_summary else {
        return String::new();
    };
    let sections: String = periods
        .iter()
        .map(|period| {
            let body = if period.goals.is_empty() {
                r#"<p class="quiet">No goals</p>"#.to_owned()
            } else {
                let goals: String = period.goals.iter().map(render_goal).collect();
                format!("<ul>{goals}</ul>")
            };
            format!(
                r#"<section class="period"><h4>{}</h4>{body}</section>"#,
                escape(&period.period)
            )
        })
        .collect();
    format!(r#"<div class="details">{sections}</div>"#)
}

fn render_goal(goal: &ScoringEvent) -> String {
    let assists = if goal.assists.is_empty() {
        "Unassisted".to_owned()
    } else {
        let names: Vec<String> = goal.assists.iter().map(participant).collect();
        format!("Assists: {}", names.join(", "))
    };
    format!(
        r#"<li><span class="time">{time}</span> <span class="goal-team">{team}</span> <span class="scorer">{scorer}</span> <span class="assists">{assists}</span></li>"#,
        time = escape(&goal.time),
        team = escape(&goal.team),
        scorer = participant(&goal.scorer),
    )
}

fn participant(player: &Participant) -> String {
    let mark = if player.leader.any() {
        r#" <span class="leader" title="Team leader">&#9733;</span>"#
    } else {
        ""
    };
    format!("{}{mark}", escape(&player.display))
}

fn render_leaders(leaders: &Leaders) -> String {
    if leaders.is_empty() {
        return String::new();
    }
    [
        ("Goals", &leaders.goals),
        ("Assists", &leaders.assists),
        ("Points", &leaders.points),
    ]
    .iter()
    .map(|(title, lines)| {
        let rows: String = lines.iter().map(render_leader_line).collect();
        format!(r#"<div class="leader-col"><h3>{title}</h3><ol>{rows}</ol></div>"#)
    })
    .collect()
}

fn render_leader_line(line: &LeaderLine) -> String {
    format!(
        r#"<li><span class="leader-name">{}</span> <span class="leader-team">{}</span> <span class="leader-value">{}</span></li>"#,
        escape(&line.name),
        escape(&line.team),
        line.value
    )
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>NHL Scores</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f8;
      --bg-2: #c9dbea;
      --ink: #1d2733;
      --muted: #667585;
      --accent: #c8102e;
      --accent-2: #14304d;
      --live: #0a8f5a;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 18px 48px rgba(20, 48, 77, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(160deg, var(--bg-1), #f7fafc 70%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1120px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: white;
      color: var(--accent-2);
      box-shadow: 0 6px 16px rgba(20, 48, 77, 0.12);
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    button.primary {
      background: var(--accent);
      color: white;
    }

    button[aria-pressed="true"] {
      background: var(--accent-2);
      color: white;
    }

    .games {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(300px, 1fr));
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      padding: 18px;
      box-shadow: var(--shadow);
      display: grid;
      gap: 10px;
      border-top: 4px solid var(--accent-2);
    }

    .card.status-live {
      border-top-color: var(--live);
    }

    .card.status-final {
      border-top-color: #9aa7b4;
    }

    .card-head {
      display: flex;
      justify-content: space-between;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .badge {
      text-transform: uppercase;
      letter-spacing: 0.1em;
      font-weight: 600;
    }

    .status-live .badge {
      color: var(--live);
    }

    .team {
      display: grid;
      grid-template-columns: 40px 1fr auto;
      align-items: center;
      gap: 10px;
    }

    .team.ahead .score,
    .team.ahead .team-name {
      font-weight: 600;
      color: var(--ink);
    }

    .logo {
      width: 40px;
      height: 40px;
    }

    .team-meta {
      display: grid;
    }

    .team-name {
      color: #3b4856;
    }

    .record {
      font-size: 0.8rem;
      color: var(--muted);
    }

    .score {
      font-size: 1.6rem;
      color: #52606d;
    }

    .shots,
    .watch {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .details {
      display: none;
      gap: 8px;
      border-top: 1px solid rgba(20, 48, 77, 0.1);
      padding-top: 10px;
    }

    body.show-details .details {
      display: grid;
    }

    .period h4 {
      margin: 0 0 4px;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.08em;
      color: var(--accent-2);
    }

    .period ul {
      margin: 0;
      padding-left: 18px;
      font-size: 0.9rem;
    }

    .time,
    .goal-team {
      color: var(--muted);
    }

    .assists {
      display: block;
      font-size: 0.8rem;
      color: var(--muted);
    }

    .leader {
      color: #d4a017;
    }

    .quiet {
      margin: 0;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .empty {
      grid-column: 1 / -1;
      text-align: center;
      padding: 48px 16px;
      background: var(--card);
      border-radius: 20px;
      color: var(--muted);
    }

    .leaders {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .leaders:empty {
      display: none;
    }

    .leader-col {
      background: var(--card);
      border-radius: 20px;
      padding: 16px 18px;
      box-shadow: var(--shadow);
    }

    .leader-col h3 {
      margin: 0 0 8px;
    }

    .leader-col ol {
      margin: 0;
      padding-left: 20px;
      max-height: 320px;
      overflow-y: auto;
      font-size: 0.9rem;
    }

    .leader-team {
      color: var(--muted);
    }

    .leader-value {
      float: right;
      font-weight: 600;
    }

    .status {
      font-size: 0.95rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    @media (max-width: 600px) {
      .toolbar button {
        flex: 1 1 45%;
      }
    }
  </style>
</head>
<body data-date="{{DATE}}">
  <main class="app">
    <header>
      <div>
        <h1>NHL Scores</h1>
        <p class="subtitle"><span id="display-date">{{DISPLAY_DATE}}</span> &middot; <span id="count">{{COUNT}}</span> games &middot; updated <span id="updated">now</span></p>
      </div>
      <div class="toolbar">
        <button type="button" id="prev-btn">&lsaquo; Prev</button>
        <button type="button" id="next-btn">Next &rsaquo;</button>
        <button type="button" id="details-btn" aria-pressed="false">Show Details</button>
        <button type="button" id="auto-btn" aria-pressed="false">Auto-refresh: off</button>
        <button type="button" id="refresh-btn" class="primary">Refresh</button>
      </div>
    </header>

    <div class="status" id="status"></div>

    <section class="games" id="games">
{{GAMES}}
    </section>

    <section class="leaders" id="leaders">{{LEADERS}}</section>
  </main>

  <script>
    const AUTO_REFRESH_SECS = {{AUTO_REFRESH_SECS}};
    const AUTO_REFRESH_ON_LOAD = {{AUTO_REFRESH_ON_LOAD}};

    const gamesEl = document.getElementById('games');
    const leadersEl = document.getElementById('leaders');
    const displayDateEl = document.getElementById('display-date');
    const countEl = document.getElementById('count');
    const updatedEl = document.getElementById('updated');
    const statusEl = document.getElementById('status');
    const detailsBtn = document.getElementById('details-btn');
    const autoBtn = document.getElementById('auto-btn');

    let currentDate = document.body.dataset.date;
    let autoTimer = null;
    let requestSeq = 0;

    const escapeHtml = (value) =>
      String(value ?? '').replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      }[ch]));

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const participant = (player) => {
      const lead = player.is_goals_leader || player.is_assists_leader || player.is_points_leader;
      const mark = lead ? ' <span class="leader" title="Team leader">&#9733;</span>' : '';
      return `${escapeHtml(player.display)}${mark}`;
    };

    const renderGoal = (goal) => {
      const assists = goal.assists.length
        ? `Assists: ${goal.assists.map(participant).join(', ')}`
        : 'Unassisted';
      return `<li><span class="time">${escapeHtml(goal.time)}</span> <span class="goal-team">${escapeHtml(goal.team)}</span> <span class="scorer">${participant(goal.scorer)}</span> <span class="assists">${assists}</span></li>`;
    };

    const renderDetails = (game) => {
      if (!game.scoring_summary) {
        return '';
      }
      const sections = game.scoring_summary
        .map((period) => {
          const body = period.goals.length
            ? `<ul>${period.goals.map(renderGoal).join('')}</ul>`
            : '<p class="quiet">No goals</p>';
          return `<section class="period"><h4>${escapeHtml(period.period)}</h4>${body}</section>`;
        })
        .join('');
      return `<div class="details">${sections}</div>`;
    };

    const renderTeam = (team, showScore, ahead) =>
      `<div class="team${ahead ? ' ahead' : ''}"><img class="logo" src="${escapeHtml(team.logo)}" alt="${escapeHtml(team.abbrev)}" loading="lazy" /><div class="team-meta"><span class="team-name">${escapeHtml(team.name)}</span><span class="record">${escapeHtml(team.record)}</span></div><span class="score">${showScore ? team.score : ''}</span></div>`;

    const renderCard = (game) => {
      const showScore = game.status !== 'Scheduled';
      const when = game.status === 'Live' ? game.period_info : game.status === 'Final' ? 'Final' : game.start_time;
      const away = game.away_team;
      const home = game.home_team;
      const shots = away.shots != null && home.shots != null
        ? `<div class="shots">SOG ${away.shots} - ${home.shots}</div>`
        : '';
      const watch = game.where_to_watch && game.where_to_watch.length
        ? `<div class="watch">${game.where_to_watch.map(escapeHtml).join(' &middot; ')}</div>`
        : '';
      return `<article class="card status-${game.status.toLowerCase()}" data-game-id="${game.id}">
  <div class="card-head"><span class="badge">${game.status}</span><span class="when">${escapeHtml(when)}</span></div>
  ${renderTeam(away, showScore, showScore && away.score > home.score)}
  ${renderTeam(home, showScore, showScore && home.score > away.score)}
  ${shots}${watch}${renderDetails(game)}
</article>`;
    };

    const renderLeaders = (leaders) => {
      if (!leaders) {
        return '';
      }
      const columns = [['Goals', leaders.goals], ['Assists', leaders.assists], ['Points', leaders.points]];
      if (columns.every(([, lines]) => !lines || !lines.length)) {
        return '';
      }
      return columns
        .map(([title, lines]) => {
          const rows = (lines || [])
            .map((line) => `<li><span class="leader-name">${escapeHtml(line.name)}</span> <span class="leader-team">${escapeHtml(line.team)}</span> <span class="leader-value">${line.value}</span></li>`)
            .join('');
          return `<div class="leader-col"><h3>${title}</h3><ol>${rows}</ol></div>`;
        })
        .join('');
    };

    const render = (data) => {
      currentDate = data.date;
      document.body.dataset.date = data.date;
      displayDateEl.textContent = data.display_date;
      countEl.textContent = data.count;
      gamesEl.innerHTML = data.success && data.games.length
        ? data.games.map(renderCard).join('\n')
        : `<p class="empty">${escapeHtml(data.message || 'No games.')}</p>`;
      leadersEl.innerHTML = renderLeaders(data.leaders);
    };

    const refresh = async (date) => {
      const seq = ++requestSeq;
      setStatus('Loading...', 'info');
      try {
        const res = await fetch(`/?format=json&date=${encodeURIComponent(date)}`);
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Unable to load games');
        }
        const data = await res.json();
        if (seq !== requestSeq) {
          return;
        }
        render(data);
        history.replaceState(null, '', `/?date=${encodeURIComponent(data.date)}`);
        updatedEl.textContent = new Date().toLocaleTimeString();
        setStatus('', '');
      } catch (err) {
        if (seq === requestSeq) {
          setStatus(err.message, 'error');
        }
      }
    };

    const reload = () => refresh(currentDate);

    const shiftDate = (days) => {
      const date = new Date(`${currentDate}T12:00:00`);
      date.setDate(date.getDate() + days);
      const pad = (n) => String(n).padStart(2, '0');
      refresh(`${date.getFullYear()}-${pad(date.getMonth() + 1)}-${pad(date.getDate())}`);
    };

    const setAutoRefresh = (on) => {
      if (autoTimer) {
        clearInterval(autoTimer);
        autoTimer = null;
      }
      if (on) {
        autoTimer = setInterval(reload, AUTO_REFRESH_SECS * 1000);
      }
      autoBtn.textContent = on ? `Auto-refresh: every ${AUTO_REFRESH_SECS}s` : 'Auto-refresh: off';
      autoBtn.setAttribute('aria-pressed', String(on));
    };

    document.getElementById('refresh-btn').addEventListener('click', reload);
    document.getElementById('prev-btn').addEventListener('click', () => shiftDate(-1));
    document.getElementById('next-btn').addEventListener('click', () => shiftDate(1));
    autoBtn.addEventListener('click', () => setAutoRefresh(!autoTimer));
    detailsBtn.addEventListener('click', () => {
      const shown = document.body.classList.toggle('show-details');
      detailsBtn.textContent = shown ? 'Hide Details' : 'Show Details';
      detailsBtn.setAttribute('aria-pressed', String(shown));
    });

    updatedEl.textContent = new Date().toLocaleTimeString();
    setAutoRefresh(AUTO_REFRESH_ON_LOAD);
  </script>
</body>
</html>
"#;
