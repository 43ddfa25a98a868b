use crate::meeting::MeetingPattern;
use crate::preference::PreferenceWindow;

/// Running set of accepted meetings for one candidate schedule.
///
/// A meeting is admitted only if it lies inside the window and does not
/// overlap, on a shared weekday, any meeting accepted before it.
#[derive(Debug, Clone)]
pub struct ConflictChecker {
    window: PreferenceWindow,
    accepted: Vec<MeetingPattern>,
}

impl ConflictChecker {
    pub fn new(window: PreferenceWindow) -> ConflictChecker {
        ConflictChecker {
            window,
            accepted: Vec::new(),
        }
    }

    /// Inside the window and clear of every accepted meeting.
    pub fn admits(&self, meeting: &MeetingPattern) -> bool {
        self.window.contains(meeting) && !self.accepted.iter().any(|prev| prev.overlaps(meeting))
    }

    /// Accepts the meeting if it is admitted. Returns false on conflict,
    /// leaving the accepted set unchanged.
    pub fn try_accept(&mut self, meeting: &MeetingPattern) -> bool {
        if !self.admits(meeting) {
            return false;
        }
        self.accepted.push(*meeting);
        true
    }

    /// Drops the most recently accepted meeting.
    pub fn pop(&mut self) -> Option<MeetingPattern> {
        self.accepted.pop()
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// True as soon as any meeting falls outside `window` or overlaps an
/// earlier meeting on a shared weekday.
pub fn has_conflict<'a, I>(meetings: I, window: &PreferenceWindow) -> bool
where
    I: IntoIterator<Item = &'a MeetingPattern>,
{
    let mut checker = ConflictChecker::new(*window);
    meetings.into_iter().any(|m| !checker.try_accept(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary;
    use crate::meeting::DAY_LETTERS;
    use crate::time::MINUTES_PER_DAY;
    use proptest::prelude::*;

    fn meeting(token: &str) -> MeetingPattern {
        MeetingPattern::parse(token).unwrap()
    }

    #[test]
    fn test_disjoint_days_never_conflict() {
        let a = meeting("MWF 10:00am-10:50am");
        let b = meeting("TR 10:00am-11:15am");
        assert!(!has_conflict([&a, &b], &PreferenceWindow::FULL_DAY));
    }

    #[test]
    fn test_shared_day_overlap_conflicts() {
        let a = meeting("MW 10:00am-11:00am");
        let b = meeting("M 10:30am-11:30am");
        assert!(has_conflict([&a, &b], &PreferenceWindow::FULL_DAY));
        assert!(has_conflict([&b, &a], &PreferenceWindow::FULL_DAY));
    }

    #[test]
    fn test_window_violation_conflicts_even_alone() {
        let w = PreferenceWindow::new(540, 1020).unwrap();
        let early = meeting("F 8:00am-9:00am");
        assert!(has_conflict([&early], &w));
        assert!(!has_conflict([&meeting("F 9:00am-10:00am")], &w));
    }

    #[test]
    fn test_empty_schedule_has_no_conflict() {
        let none: [&MeetingPattern; 0] = [];
        assert!(!has_conflict(none, &PreferenceWindow::FULL_DAY));
    }

    #[test]
    fn test_try_accept_and_pop() {
        let mut checker = ConflictChecker::new(PreferenceWindow::FULL_DAY);
        assert!(checker.try_accept(&meeting("MW 10:00am-11:00am")));
        assert!(!checker.try_accept(&meeting("M 10:30am-11:30am")));
        assert_eq!(checker.len(), 1);

        checker.pop();
        assert!(checker.is_empty());
        assert!(checker.try_accept(&meeting("M 10:30am-11:30am")));
    }

    proptest! {
        #[test]
        fn prop_overlap_iff_some_shared_minute(a in arbitrary::meeting(), b in arbitrary::meeting()) {
            let shared_day = DAY_LETTERS.iter().any(|&d| a.meets_on(d) && b.meets_on(d));
            let shared_minute = (0..MINUTES_PER_DAY)
                .any(|t| (a.start()..a.end()).contains(&t) && (b.start()..b.end()).contains(&t));
            let expected = shared_day && shared_minute;

            prop_assert_eq!(a.overlaps(&b), expected);
            prop_assert_eq!(b.overlaps(&a), expected);
            prop_assert_eq!(has_conflict([&a, &b], &PreferenceWindow::FULL_DAY), expected);
        }

        #[test]
        fn prop_disjoint_days_never_conflict((a, b) in arbitrary::disjoint_meetings()) {
            prop_assert!(!a.overlaps(&b));
            prop_assert!(!has_conflict([&a, &b], &PreferenceWindow::FULL_DAY));
        }

        #[test]
        fn prop_lone_meeting_conflicts_only_outside_window(
            m in arbitrary::meeting(),
            w in arbitrary::window(),
        ) {
            let inside = m.start() >= w.start() && m.end() <= w.end();
            prop_assert_eq!(has_conflict([&m], &w), !inside);
        }
    }
}
