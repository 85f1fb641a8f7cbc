//! Display-ready views derived from a single match record.
//!
//! Everything here is a pure function of the stored document. The batting
//! side decides every live view: team1 bats when `battingTeam == 1`, team2
//! otherwise, and the other team is in the field.

use crate::models::cricket::{
    overs_value, BattingSide, Match, MatchStatus, Player, PlayerStatus, Team,
};

pub const DID_NOT_BAT: &str = "DNB";
pub const DUCK: &str = "0(0)";
/// How many yet-to-bat players the live view lists.
pub const YET_TO_BAT_SHOWN: usize = 5;

/// A player paired with one of their formatted stat strings.
#[derive(Debug, Clone, PartialEq)]
pub struct StatLine<'a> {
    pub player: &'a Player,
    pub stats: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveView<'a> {
    pub batting_team: &'a Team,
    pub bowling_team: &'a Team,
    pub current_batsmen: Vec<StatLine<'a>>,
    pub out: Vec<StatLine<'a>>,
    pub yet_to_bat: Vec<&'a Player>,
    pub current_bowler: Option<StatLine<'a>>,
}

/// One team's innings on a completed scorecard. Bowling figures come from
/// the opposing team's players.
#[derive(Debug, Clone, PartialEq)]
pub struct Innings<'a> {
    pub team: &'a Team,
    pub score: u32,
    pub wickets: u32,
    pub overs: &'a str,
    pub batting: Vec<StatLine<'a>>,
    pub bowling: Vec<StatLine<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchView<'a> {
    Live(LiveView<'a>),
    Completed([Innings<'a>; 2]),
    Upcoming([&'a Team; 2]),
}

pub fn live_batting_team(m: &Match) -> &Team {
    match m.batting_side() {
        BattingSide::Team1 => &m.team1,
        BattingSide::Team2 => &m.team2,
    }
}

pub fn live_bowling_team(m: &Match) -> &Team {
    match m.batting_side() {
        BattingSide::Team1 => &m.team2,
        BattingSide::Team2 => &m.team1,
    }
}

fn with_status(team: &Team, status: PlayerStatus) -> Vec<&Player> {
    team.players.iter().filter(|p| p.status == status).collect()
}

pub fn current_batsmen(m: &Match) -> Vec<&Player> {
    with_status(live_batting_team(m), PlayerStatus::Batting)
}

pub fn out_players(m: &Match) -> Vec<&Player> {
    with_status(live_batting_team(m), PlayerStatus::Out)
}

pub fn yet_to_bat(m: &Match) -> Vec<&Player> {
    with_status(live_batting_team(m), PlayerStatus::YetToBat)
}

/// First bowling-team player marked as bowling. `None` before anyone has
/// been given the ball.
pub fn current_bowler(m: &Match) -> Option<&Player> {
    live_bowling_team(m)
        .players
        .iter()
        .find(|p| p.status == PlayerStatus::Bowling)
}

/// `runs(balls)` once a player has faced or scored, `0(0)` for a duck,
/// `DNB` otherwise.
pub fn format_batting_stats(player: &Player) -> String {
    if player.runs > 0 || player.balls > 0 {
        format!("{}({})", player.runs, player.balls)
    } else if player.status == PlayerStatus::Out {
        DUCK.to_string()
    } else {
        DID_NOT_BAT.to_string()
    }
}

/// `wickets/runs (overs)`, or empty while the overs count is still zero.
/// Wickets or runs recorded before the first completed ball of an over stay
/// hidden until the overs figure moves.
pub fn format_bowling_stats(player: &Player) -> String {
    if overs_value(&player.overs_bowled) > 0.0 {
        format!(
            "{}/{} ({})",
            player.wickets, player.runs, player.overs_bowled
        )
    } else {
        String::new()
    }
}

fn batting_line(player: &Player) -> StatLine<'_> {
    StatLine {
        player,
        stats: format_batting_stats(player),
    }
}

fn bowling_line(player: &Player) -> StatLine<'_> {
    StatLine {
        player,
        stats: format_bowling_stats(player),
    }
}

/// Players who batted, in batting order.
pub fn batting_card(team: &Team) -> Vec<StatLine<'_>> {
    team.players
        .iter()
        .map(batting_line)
        .filter(|line| line.stats != DID_NOT_BAT)
        .collect()
}

/// Players who bowled, in squad order.
pub fn bowling_card(team: &Team) -> Vec<StatLine<'_>> {
    team.players
        .iter()
        .map(bowling_line)
        .filter(|line| !line.stats.is_empty())
        .collect()
}

/// Compact `name runs(balls), ...` line for the batsmen at the crease.
pub fn live_batting_summary(m: &Match) -> String {
    current_batsmen(m)
        .iter()
        .map(|p| format!("{} {}({})", p.name, p.runs, p.balls))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn live_bowling_summary(m: &Match) -> Option<String> {
    current_bowler(m).map(|bowler| {
        format!("{} {}", bowler.name, format_bowling_stats(bowler))
            .trim_end()
            .to_string()
    })
}

pub fn live_view(m: &Match) -> LiveView<'_> {
    LiveView {
        batting_team: live_batting_team(m),
        bowling_team: live_bowling_team(m),
        current_batsmen: current_batsmen(m).into_iter().map(batting_line).collect(),
        out: out_players(m).into_iter().map(batting_line).collect(),
        yet_to_bat: yet_to_bat(m).into_iter().take(YET_TO_BAT_SHOWN).collect(),
        current_bowler: current_bowler(m).map(bowling_line),
    }
}

pub fn scorecard(m: &Match) -> [Innings<'_>; 2] {
    [
        Innings {
            team: &m.team1,
            score: m.score1,
            wickets: m.wickets1,
            overs: &m.overs1,
            batting: batting_card(&m.team1),
            bowling: bowling_card(&m.team2),
        },
        Innings {
            team: &m.team2,
            score: m.score2,
            wickets: m.wickets2,
            overs: &m.overs2,
            batting: batting_card(&m.team2),
            bowling: bowling_card(&m.team1),
        },
    ]
}

pub fn match_view(m: &Match) -> MatchView<'_> {
    match m.status {
        MatchStatus::Live => MatchView::Live(live_view(m)),
        MatchStatus::Completed => MatchView::Completed(scorecard(m)),
        MatchStatus::Upcoming => MatchView::Upcoming([&m.team1, &m.team2]),
    }
}
