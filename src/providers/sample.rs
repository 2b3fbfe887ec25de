//! Synthetic upstream feed.
//!
//! Stands in for the real Transport NSW data API: every invocation fabricates
//! a fresh batch of records from a fixed route table. Record ids restart at
//! 001 each batch, so they are only unique within a single invocation;
//! consumers rely on the timestamp recency window, not on id uniqueness.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::TransportRecord;

/// Number of records fabricated per batch.
pub const BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, Copy)]
struct RouteDef {
    transport_type: &'static str,
    route: &'static str,
    destination: &'static str,
}

const ROUTES: [RouteDef; 6] = [
    RouteDef {
        transport_type: "bus",
        route: "380",
        destination: "Circular Quay",
    },
    RouteDef {
        transport_type: "bus",
        route: "391",
        destination: "Coogee Beach",
    },
    RouteDef {
        transport_type: "bus",
        route: "400",
        destination: "Bondi Junction",
    },
    RouteDef {
        transport_type: "train",
        route: "T4 Eastern Suburbs",
        destination: "Central",
    },
    RouteDef {
        transport_type: "train",
        route: "T2 Inner West",
        destination: "Parramatta",
    },
    RouteDef {
        transport_type: "light-rail",
        route: "L1 Dulwich Hill",
        destination: "Central",
    },
];

const LOCATIONS: [&str; 8] = [
    "Bondi Junction",
    "Randwick",
    "Central Station",
    "Town Hall",
    "Circular Quay",
    "Wynyard",
    "Martin Place",
    "Kings Cross",
];

/// Fabricate a batch of [`BATCH_SIZE`] records stamped with `now`.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<TransportRecord> {
    (0..BATCH_SIZE)
        .map(|slot| {
            let def = ROUTES.choose(rng).unwrap_or(&ROUTES[0]);
            let location = LOCATIONS.choose(rng).unwrap_or(&LOCATIONS[0]);
            let initial = def
                .transport_type
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or('X');

            TransportRecord {
                id: format!("{}{:03}", initial, slot + 1),
                transport_type: def.transport_type.to_string(),
                route: def.route.to_string(),
                destination: def.destination.to_string(),
                current_location: location.to_string(),
                scheduled_arrival_mins: rng.gen_range(1..=15),
                timestamp: now.timestamp(),
                last_updated: now.to_rfc3339(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn batch_has_exactly_twenty_records() {
        let mut rng = StdRng::seed_from_u64(1);
        let batch = generate_batch(&mut rng, Utc::now());
        assert_eq!(batch.len(), BATCH_SIZE);
        assert_eq!(batch.len(), 20);
    }

    #[test]
    fn ids_are_type_initial_plus_sequence() {
        let mut rng = StdRng::seed_from_u64(2);
        let batch = generate_batch(&mut rng, Utc::now());

        for (slot, record) in batch.iter().enumerate() {
            let expected_initial = record
                .transport_type
                .chars()
                .next()
                .unwrap()
                .to_ascii_uppercase();
            assert_eq!(record.id, format!("{}{:03}", expected_initial, slot + 1));
        }
        assert!(batch[0].id.ends_with("001"));
        assert!(batch[19].id.ends_with("020"));
    }

    #[test]
    fn records_draw_from_fixed_tables() {
        let mut rng = StdRng::seed_from_u64(3);
        let batch = generate_batch(&mut rng, Utc::now());

        for record in &batch {
            assert!(ROUTES.iter().any(|def| {
                def.transport_type == record.transport_type
                    && def.route == record.route
                    && def.destination == record.destination
            }));
            assert!(LOCATIONS.contains(&record.current_location.as_str()));
            assert!((1..=15).contains(&record.scheduled_arrival_mins));
        }
    }

    #[test]
    fn records_are_stamped_with_ingestion_time() {
        let mut rng = StdRng::seed_from_u64(4);
        let now = Utc::now();
        let batch = generate_batch(&mut rng, now);

        for record in &batch {
            assert_eq!(record.timestamp, now.timestamp());
            assert_eq!(record.last_updated, now.to_rfc3339());
        }
    }

    #[test]
    fn seeded_rng_makes_generation_deterministic() {
        let now = Utc::now();
        let a = generate_batch(&mut StdRng::seed_from_u64(42), now);
        let b = generate_batch(&mut StdRng::seed_from_u64(42), now);
        assert_eq!(a, b);
    }
}
