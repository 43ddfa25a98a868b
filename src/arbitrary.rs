//! proptest strategies shared by the unit tests.

use proptest::prelude::*;

use crate::meeting::{MeetingPattern, Weekdays, DAY_LETTERS};
use crate::preference::PreferenceWindow;
use crate::time::MINUTES_PER_DAY;

fn from_bits(bits: u8) -> Option<Weekdays> {
    let letters: String = DAY_LETTERS
        .iter()
        .enumerate()
        .filter(|&(i, _)| bits & (1u8 << i) != 0)
        .map(|(_, &d)| d)
        .collect();
    Weekdays::from_letters(&letters).ok()
}

/// Any non-empty set of weekdays.
pub fn weekdays() -> impl Strategy<Value = Weekdays> {
    (1u8..=0b111_1111).prop_filter_map("empty day set", from_bits)
}

/// A meeting of up to three hours that starts and ends on the same day,
/// before midnight so it survives a render and re-parse.
pub fn meeting() -> impl Strategy<Value = MeetingPattern> {
    (weekdays(), 0u16..MINUTES_PER_DAY - 1, 1u16..=180).prop_map(|(days, start, len)| {
        let end = (start + len).min(MINUTES_PER_DAY - 1);
        MeetingPattern::new(days, start, end).unwrap()
    })
}

/// Two meetings with no weekday in common.
pub fn disjoint_meetings() -> impl Strategy<Value = (MeetingPattern, MeetingPattern)> {
    (meeting(), meeting(), 1u8..=0b111_1111).prop_filter_map("no day left", |(a, b, mask)| {
        let taken: u8 = DAY_LETTERS
            .iter()
            .enumerate()
            .filter(|&(_, &d)| a.meets_on(d))
            .map(|(i, _)| 1u8 << i)
            .sum();
        let days = from_bits(!taken & mask & 0b111_1111)?;
        Some((a, MeetingPattern::new(days, b.start(), b.end()).unwrap()))
    })
}

pub fn window() -> impl Strategy<Value = PreferenceWindow> {
    (0u16..MINUTES_PER_DAY)
        .prop_flat_map(|start| (Just(start), start + 1..=MINUTES_PER_DAY))
        .prop_map(|(start, end)| PreferenceWindow::new(start, end).unwrap())
}
