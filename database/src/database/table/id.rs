use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::consts::consts::PersonId;

/// Picks an id for a new person.
///
/// When every (non-blank) existing id is a base-10 integer the sequence continues from the
/// largest one. Otherwise the id is the timestamp in milliseconds, bumped until it no
/// longer clashes with an existing id.
pub fn next_id<'a>(ids: impl IntoIterator<Item = &'a PersonId>, now: DateTime<Utc>) -> PersonId {
    let ids: Vec<&PersonId> = ids.into_iter().filter(|id| !id.is_blank()).collect();

    let numeric: Vec<i64> = ids.iter().filter_map(|id| id.as_number()).collect();

    if !numeric.is_empty() && numeric.len() == ids.len() {
        if let Some(max) = numeric.iter().max() {
            if let Some(next) = max.checked_add(1) {
                return PersonId(next.to_string());
            }
        }
    }

    let taken: HashSet<&str> = ids.iter().map(|id| id.as_str()).collect();

    let mut candidate = now.timestamp_millis();

    while taken.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }

    PersonId(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn at_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn ids(values: &[&str]) -> Vec<PersonId> {
        values.iter().map(|v| PersonId::from(*v)).collect()
    }

    #[rstest]
    #[case(&["1", "2", "3"], "4")]
    #[case(&["3", "1", "2"], "4")]
    #[case(&["10", "9"], "11")]
    #[case(&["-5", "-2"], "-1")]
    #[case(&["7", ""], "8")]
    fn numeric_ids_continue_the_sequence(#[case] existing: &[&str], #[case] expected: &str) {
        let existing = ids(existing);

        assert_eq!(next_id(&existing, at_millis(1_000)), PersonId::from(expected));
    }

    #[rstest]
    #[case(&["1", "abc"])]
    #[case(&["AJ-1001"])]
    #[case(&[])]
    fn otherwise_uses_the_timestamp(#[case] existing: &[&str]) {
        let existing = ids(existing);

        assert_eq!(
            next_id(&existing, at_millis(1_700_000_000_000)),
            PersonId::from("1700000000000")
        );
    }

    #[test]
    fn timestamp_skips_taken_ids() {
        // Given ids that already hold the current and next timestamp
        let existing = ids(&["x", "1700000000000", "1700000000001"]);

        // When a new id is generated at that instant
        let id = next_id(&existing, at_millis(1_700_000_000_000));

        // Then it moves past both
        assert_eq!(id, PersonId::from("1700000000002"));
    }
}
