//! Tests for the strongly-typed identifiers
//!
//! Covers creation, parsing, conversion and display formatting.

use core_kernel::{CarId, ClaimId, OwnerId, PolicyId};
use std::collections::HashSet;
use uuid::Uuid;

mod car_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = CarId::new();
        let id2 = CarId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = CarId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_prefix() {
        assert_eq!(CarId::prefix(), "CAR");
        assert_eq!(OwnerId::prefix(), "OWN");
    }

    #[test]
    fn test_from_str_rejects_wrong_prefix() {
        let policy = PolicyId::new();
        assert!(policy.to_string().parse::<CarId>().is_err());
    }
}

mod policy_id_tests {
    use super::*;

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = PolicyId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = PolicyId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_display_format() {
        let id = PolicyId::new();
        assert!(id.to_string().starts_with("POL-"));
    }

    #[test]
    fn test_usable_as_set_key() {
        let id = PolicyId::new();
        let mut set = HashSet::new();
        assert!(set.insert(id));
        assert!(!set.insert(id));
    }
}

mod claim_id_tests {
    use super::*;

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = ClaimId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_deserialize_from_bare_uuid() {
        let uuid = Uuid::new_v4();
        let json = format!("\"{}\"", uuid);
        let id: ClaimId = serde_json::from_str(&json).unwrap();
        assert_eq!(*id.as_uuid(), uuid);
    }
}
