//! Admin dashboard state: the dual-fetch snapshot and the profile filter.

use crate::models::{AdminSnapshot, LogEntry};

/// Client-side projection over the recent-recommendations list.
///
/// Pure and non-mutating; changing the filter never refetches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileFilter {
    #[default]
    All,
    Profile(String),
}

impl ProfileFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        match self {
            Self::All => true,
            Self::Profile(profile) => entry.profile_type.as_deref() == Some(profile.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Profile(profile) => profile,
        }
    }
}

/// State of the operator analytics view.
///
/// Both aggregates are fetched as one unit of work; `snapshot` is only ever
/// replaced wholesale, so the table and the overview cards can never mix
/// fresh and stale data. Every fetch carries a sequence number and only the
/// most recently issued one may land: a refresh overlapping a mode-switch
/// fetch cannot clobber fresher data with a slower, older response.
#[derive(Debug, Default)]
pub struct AdminState {
    pub loading: bool,
    pub error: Option<&'static str>,
    pub snapshot: Option<AdminSnapshot>,
    pub filter: ProfileFilter,
    pub status: Option<String>,
    pub exporting: bool,
    latest_seq: u64,
}

impl AdminState {
    /// Issue a new fetch ticket, invalidating all in-flight ones.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_seq += 1;
        self.loading = true;
        self.error = None;
        self.latest_seq
    }

    /// Whether a completion with this ticket is still the current one.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest_seq
    }

    pub fn finish_fetch(&mut self, snapshot: AdminSnapshot) {
        self.loading = false;
        self.error = None;
        self.snapshot = Some(snapshot);
    }

    /// Joint failure: neither partial result is surfaced and any previous
    /// snapshot is left in place.
    pub fn fail_fetch(&mut self, message: &'static str) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Rows of the recent table under the active filter.
    pub fn filtered_recent(&self) -> Vec<&LogEntry> {
        self.snapshot
            .as_ref()
            .map(|snapshot| {
                snapshot
                    .recent
                    .iter()
                    .filter(|entry| self.filter.matches(entry))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Advance the filter: all -> each profile type present in the summary,
    /// in order, then back to all.
    pub fn cycle_filter(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            return;
        };
        let profiles: Vec<&String> = snapshot.segments.by_profile_type.keys().collect();
        if profiles.is_empty() {
            return;
        }

        self.filter = match &self.filter {
            ProfileFilter::All => ProfileFilter::Profile(profiles[0].clone()),
            ProfileFilter::Profile(current) => {
                match profiles.iter().position(|p| *p == current) {
                    Some(pos) if pos + 1 < profiles.len() => {
                        ProfileFilter::Profile(profiles[pos + 1].clone())
                    }
                    _ => ProfileFilter::All,
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SegmentsSummary;

    fn entry(profile: Option<&str>) -> LogEntry {
        serde_json::from_value(serde_json::json!({
            "timestamp": "2025-11-02T10:15:00",
            "profile_type": profile,
        }))
        .unwrap()
    }

    fn snapshot(profiles: &[Option<&str>]) -> AdminSnapshot {
        let segments: SegmentsSummary = serde_json::from_value(serde_json::json!({
            "total_recommendations": profiles.len(),
            "by_profile_type": {"child": 1, "parent": 1},
        }))
        .unwrap();
        AdminSnapshot {
            recent: profiles.iter().map(|p| entry(*p)).collect(),
            segments,
        }
    }

    #[test]
    fn filter_is_a_pure_projection() {
        let mut admin = AdminState::default();
        admin.finish_fetch(snapshot(&[
            Some("parent"),
            Some("child"),
            Some("parent"),
            None,
            Some("parent"),
        ]));

        admin.filter = ProfileFilter::Profile("parent".into());
        assert_eq!(admin.filtered_recent().len(), 3);
        // Underlying list is untouched.
        assert_eq!(admin.snapshot.as_ref().unwrap().recent.len(), 5);

        admin.filter = ProfileFilter::All;
        assert_eq!(admin.filtered_recent().len(), 5);
    }

    #[test]
    fn stale_sequence_numbers_are_not_current() {
        let mut admin = AdminState::default();
        let first = admin.begin_fetch();
        let second = admin.begin_fetch();

        assert!(!admin.is_current(first));
        assert!(admin.is_current(second));
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let mut admin = AdminState::default();
        admin.finish_fetch(snapshot(&[Some("child")]));
        admin.begin_fetch();
        admin.fail_fetch("Failed to load admin analytics.");

        assert!(!admin.loading);
        assert!(admin.error.is_some());
        assert_eq!(admin.snapshot.as_ref().unwrap().recent.len(), 1);
    }

    #[test]
    fn cycle_filter_walks_profiles_and_wraps() {
        let mut admin = AdminState::default();
        admin.finish_fetch(snapshot(&[Some("child"), Some("parent")]));

        admin.cycle_filter();
        assert_eq!(admin.filter, ProfileFilter::Profile("child".into()));
        admin.cycle_filter();
        assert_eq!(admin.filter, ProfileFilter::Profile("parent".into()));
        admin.cycle_filter();
        assert_eq!(admin.filter, ProfileFilter::All);
    }
}
