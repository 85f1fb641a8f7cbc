//! Plain-text match cards for the terminal dashboard.

use std::fmt;

use crate::models::cricket::{Match, Team};
use crate::services::match_filter::{filter_matches, MatchFilter};
use crate::services::scorecard::{
    live_batting_summary, live_bowling_summary, match_view, Innings, LiveView, MatchView, StatLine,
};

pub const DASHBOARD_TITLE: &str = "Match Updates";
pub const NO_MATCHES_MESSAGE: &str = "No matches found for the selected filter.";
pub const FETCH_ERROR_MESSAGE: &str =
    "Failed to fetch matches. Make sure the backend server is running.";

const SEPARATOR: &str = "----------------------------------------";

/// Title, then one card per match the filter keeps.
pub struct Dashboard<'a> {
    pub matches: &'a [Match],
    pub filter: MatchFilter,
    pub show_details: bool,
}

pub struct MatchCard<'a> {
    pub m: &'a Match,
    pub show_details: bool,
}

pub fn render_dashboard(matches: &[Match], filter: MatchFilter, show_details: bool) -> String {
    Dashboard {
        matches,
        filter,
        show_details,
    }
    .to_string()
}

pub fn render_card(m: &Match, show_details: bool) -> String {
    MatchCard { m, show_details }.to_string()
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", DASHBOARD_TITLE, self.filter)?;
        writeln!(f, "{}", SEPARATOR)?;

        let shown = filter_matches(self.matches, self.filter);
        if shown.is_empty() {
            return writeln!(f, "{}", NO_MATCHES_MESSAGE);
        }

        for m in shown {
            write!(
                f,
                "{}",
                MatchCard {
                    m,
                    show_details: self.show_details
                }
            )?;
            writeln!(f, "{}", SEPARATOR)?;
        }
        Ok(())
    }
}

impl fmt::Display for MatchCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.m;
        writeln!(f, "{}", m.status.to_string().to_uppercase())?;
        writeln!(
            f,
            "{}  VS  {}",
            team_score(&m.team1, m.score1, m.wickets1, &m.overs1),
            team_score(&m.team2, m.score2, m.wickets2, &m.overs2)
        )?;

        let view = match_view(m);
        if let MatchView::Live(_) = view {
            writeln!(f, "Batting: {}", live_batting_summary(m))?;
            if let Some(bowling) = live_bowling_summary(m) {
                writeln!(f, "Bowling: {}", bowling)?;
            }
        }

        writeln!(f, "Venue: {}", m.venue)?;

        if !self.show_details {
            return Ok(());
        }
        match &view {
            MatchView::Live(live) => write_live_details(f, live),
            MatchView::Completed(innings) => {
                for card in innings {
                    write_innings(f, card)?;
                }
                Ok(())
            }
            MatchView::Upcoming(teams) => {
                for team in teams {
                    write_squad(f, team)?;
                }
                Ok(())
            }
        }
    }
}

fn team_score(team: &Team, score: u32, wickets: u32, overs: &str) -> String {
    format!("{} {}/{} ({} overs)", team.short_name, score, wickets, overs)
}

fn write_stat_lines(f: &mut fmt::Formatter<'_>, lines: &[StatLine<'_>]) -> fmt::Result {
    for line in lines {
        writeln!(f, "      {:<24} {}", line.player.name, line.stats)?;
    }
    Ok(())
}

fn write_live_details(f: &mut fmt::Formatter<'_>, live: &LiveView<'_>) -> fmt::Result {
    writeln!(f, "  {} - Batting", live.batting_team.name)?;
    writeln!(f, "    Current Batsmen")?;
    write_stat_lines(f, &live.current_batsmen)?;
    writeln!(f, "    Out")?;
    write_stat_lines(f, &live.out)?;
    writeln!(f, "    Yet to Bat")?;
    for player in &live.yet_to_bat {
        writeln!(f, "      {}", player.name)?;
    }

    writeln!(f, "  {} - Bowling", live.bowling_team.name)?;
    writeln!(f, "    Current Bowler")?;
    match &live.current_bowler {
        Some(bowler) => write_stat_lines(f, std::slice::from_ref(bowler)),
        None => Ok(()),
    }
}

fn write_innings(f: &mut fmt::Formatter<'_>, innings: &Innings<'_>) -> fmt::Result {
    writeln!(
        f,
        "  {} Innings {}/{} ({} overs)",
        innings.team.name, innings.score, innings.wickets, innings.overs
    )?;
    writeln!(f, "    Batting")?;
    write_stat_lines(f, &innings.batting)?;
    writeln!(f, "    Bowling")?;
    write_stat_lines(f, &innings.bowling)
}

fn write_squad(f: &mut fmt::Formatter<'_>, team: &Team) -> fmt::Result {
    writeln!(f, "  {}", team.name)?;
    for player in &team.players {
        writeln!(f, "      {:<24} {}", player.name, player.role)?;
    }
    Ok(())
}
