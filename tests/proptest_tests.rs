//! Property-based tests for round-trips and the payload partition.

mod common;

use std::io::Cursor;

use proptest::prelude::*;
use zipseal::Archive;

proptest! {
    /// Any plain archive reads back with the same names and bytes, with
    /// no payload resolution getting in the way.
    #[test]
    fn plain_archives_round_trip(
        entries in proptest::collection::hash_map(
            "[a-z]{1,8}\\.txt",
            proptest::collection::vec(any::<u8>(), 0..256),
            1..6,
        )
    ) {
        let entries: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .collect();
        let bytes = common::plain_zip(&entries);

        let mut archive = Archive::open(Cursor::new(bytes)).unwrap();
        prop_assert!(!archive.has_payload());

        let mut names = archive.names().unwrap();
        names.sort();
        let mut expected: Vec<String> = entries.iter().map(|(name, _)| name.to_string()).collect();
        expected.sort();
        prop_assert_eq!(names, expected);

        for &(name, data) in &entries {
            prop_assert_eq!(archive.read_to_vec(name).unwrap(), data);
        }
    }

    /// A payload exists iff exactly one encrypted `.zip` candidate does,
    /// and the side names plus the payload name always partition the
    /// outer name list.
    #[test]
    fn payload_iff_unique_candidate(
        candidate_count in 0usize..3,
        sides in proptest::collection::hash_map(
            "[a-z]{1,8}\\.jpg",
            proptest::collection::vec(any::<u8>(), 1..64),
            0..3,
        )
    ) {
        let inner = common::plain_zip(&[("x.txt", b"x")]);
        let candidate_names: Vec<String> =
            (0..candidate_count).map(|i| format!("payload{i}.zip")).collect();

        let mut encrypted: Vec<(&str, &[u8])> = candidate_names
            .iter()
            .map(|name| (name.as_str(), inner.as_slice()))
            .collect();
        for (name, data) in &sides {
            encrypted.push((name.as_str(), data.as_slice()));
        }
        let outer_names: Vec<String> =
            encrypted.iter().map(|(name, _)| name.to_string()).collect();
        let bytes = common::outer_zip("P", &encrypted, &[]);

        let archive = Archive::open_with_password(Cursor::new(bytes), "P").unwrap();
        prop_assert_eq!(archive.has_payload(), candidate_count == 1);

        let mut union: Vec<String> = archive.side_names();
        if let Some(payload_name) = archive.payload_name() {
            prop_assert!(!union.contains(&payload_name.to_string()));
            union.push(payload_name.to_string());
        }
        union.sort();
        let mut expected = outer_names;
        expected.sort();
        prop_assert_eq!(union, expected);
    }
}
