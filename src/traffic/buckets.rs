//! Per-minute trip buckets built once from the trip batch.
//!
//! Trips live in a single arena; each of the two bucket arrays holds arena
//! indices, so a trip is stored once but reachable from both its departure
//! minute and its arrival minute.

use tracing::debug;

use crate::traffic::clock::{MINUTES_PER_DAY, minutes_since_midnight};
use crate::traffic::types::Trip;

pub struct BucketStore {
    trips: Vec<Trip>,
    departures_by_minute: Vec<Vec<usize>>,
    arrivals_by_minute: Vec<Vec<usize>>,
}

/// Read-only view of one of the two bucket arrays.
#[derive(Clone, Copy)]
pub struct MinuteBuckets<'a> {
    trips: &'a [Trip],
    slots: &'a [Vec<usize>],
}

impl BucketStore {
    /// Buckets every trip by departure minute and by arrival minute.
    pub fn build(trips: Vec<Trip>) -> Self {
        let slots = MINUTES_PER_DAY as usize;
        let mut departures_by_minute = vec![Vec::new(); slots];
        let mut arrivals_by_minute = vec![Vec::new(); slots];

        for (idx, trip) in trips.iter().enumerate() {
            departures_by_minute[minutes_since_midnight(&trip.started_at) as usize].push(idx);
            arrivals_by_minute[minutes_since_midnight(&trip.ended_at) as usize].push(idx);
        }

        debug!(trips = trips.len(), "Bucket store built");

        BucketStore {
            trips,
            departures_by_minute,
            arrivals_by_minute,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn departures(&self) -> MinuteBuckets<'_> {
        MinuteBuckets {
            trips: &self.trips,
            slots: &self.departures_by_minute,
        }
    }

    pub fn arrivals(&self) -> MinuteBuckets<'_> {
        MinuteBuckets {
            trips: &self.trips,
            slots: &self.arrivals_by_minute,
        }
    }
}

impl<'a> MinuteBuckets<'a> {
    /// Trips bucketed at `minute`.
    pub fn slot(self, minute: usize) -> impl Iterator<Item = &'a Trip> {
        let trips = self.trips;
        self.slots[minute].iter().map(move |&idx| &trips[idx])
    }

    pub fn slot_len(&self, minute: usize) -> usize {
        self.slots[minute].len()
    }
}
