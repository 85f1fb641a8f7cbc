use strum::{Display, EnumString};

use crate::models::cricket::{Match, MatchStatus};

/// Dashboard filter tag, accepted in any letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MatchFilter {
    #[default]
    All,
    Live,
    Completed,
    Upcoming,
}

impl MatchFilter {
    pub fn accepts(self, status: MatchStatus) -> bool {
        match self {
            MatchFilter::All => true,
            MatchFilter::Live => status == MatchStatus::Live,
            MatchFilter::Completed => status == MatchStatus::Completed,
            MatchFilter::Upcoming => status == MatchStatus::Upcoming,
        }
    }
}

pub fn filter_matches(matches: &[Match], filter: MatchFilter) -> Vec<&Match> {
    matches.iter().filter(|m| filter.accepts(m.status)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(status: MatchStatus, venue: &str) -> Match {
        let mut m: Match = serde_json::from_value(serde_json::json!({})).unwrap();
        m.status = status;
        m.venue = venue.to_string();
        m
    }

    fn sample() -> Vec<Match> {
        vec![
            with_status(MatchStatus::Live, "Wankhede"),
            with_status(MatchStatus::Completed, "Chepauk"),
            with_status(MatchStatus::Live, "Eden Gardens"),
            with_status(MatchStatus::Upcoming, "Chinnaswamy"),
        ]
    }

    fn venues(matches: &[&Match]) -> Vec<String> {
        matches.iter().map(|m| m.venue.clone()).collect()
    }

    #[test]
    fn test_parse_tags_case_insensitively() {
        assert_eq!("all".parse::<MatchFilter>().unwrap(), MatchFilter::All);
        assert_eq!("LIVE".parse::<MatchFilter>().unwrap(), MatchFilter::Live);
        assert_eq!("Completed".parse::<MatchFilter>().unwrap(), MatchFilter::Completed);
        assert!("finished".parse::<MatchFilter>().is_err());
        assert_eq!(MatchFilter::Completed.to_string(), "completed");
    }

    #[test]
    fn test_all_keeps_everything_in_order() {
        let matches = sample();
        let all = filter_matches(&matches, MatchFilter::All);

        assert_eq!(
            venues(&all),
            vec!["Wankhede", "Chepauk", "Eden Gardens", "Chinnaswamy"]
        );
    }

    #[test]
    fn test_live_is_subset_of_all() {
        let matches = sample();
        let all = filter_matches(&matches, MatchFilter::All);
        let live = filter_matches(&matches, MatchFilter::Live);

        assert_eq!(venues(&live), vec!["Wankhede", "Eden Gardens"]);
        for m in &live {
            assert!(all.iter().any(|a| std::ptr::eq(*a, *m)));
        }
    }

    #[test]
    fn test_no_match_yields_empty() {
        let matches = vec![with_status(MatchStatus::Live, "Wankhede")];
        assert!(filter_matches(&matches, MatchFilter::Completed).is_empty());
        assert!(filter_matches(&[], MatchFilter::Completed).is_empty());
    }
}
