// ============================================================================
// encinfo-core/src/ordering.rs
// ============================================================================
//
// SEQUENCE ORDERING: Canonical Test-Sequence Lists and Record Ordering
//
// Common test conditions (CTC) fix the set of reference sequences and the
// order in which they are reported. This module holds the two canonical
// lists as immutable data and arranges parsed records against them.
//
// KEY COMPONENTS:
// - Standard: test-condition standard selector (HEVC, VVC)
// - filter_named: drops records without a sequence name
// - order_records: dispatches to the strategy owned by each standard
//
// A canonical name matches a record when the record's sequence name starts
// with it (case-sensitive). Near-duplicate prefixes such as
// "BasketballDrill" / "BasketballDrillText" therefore both match the
// longer name; list order decides which slot sees it first.

// ---- Standard library imports ----
use std::fmt;
use std::str::FromStr;

// ---- Internal crate imports ----
use crate::error::CoreError;
use crate::metrics::MetricsRecord;

use log::{debug, warn};

/// VVC SDR common test condition sequences, in report order.
pub const VVC_SEQUENCES: &[&str] = &[
    "Tango2",
    "FoodMarket4",
    "Campfire",
    "CatRobot",
    "DaylightRoad2",
    "ParkRunning3",
    "MarketPlace",
    "RitualDance",
    "Cactus",
    "BasketballDrive",
    "BQTerrace",
    "RaceHorseC",
    "BQMall",
    "PartyScene",
    "BasketballDrill",
    "RaceHorses",
    "BQSquare",
    "BlowingBubbles",
    "BasketballPass",
    "FourPeople",
    "Johnny",
    "KristenAndSara",
    "ArenaOfValor",
    "BasketballDrillText",
    "SlideEditing",
    "SlideShow",
];

/// HEVC SDR common test condition sequences.
pub const HEVC_SEQUENCES: &[&str] = &[
    "Traffic",
    "PeopleOnStreet",
    "Kimono",
    "ParkScene",
    "Cactus",
    "BasketballDrive",
    "BQTerrace",
    "BasketballDrill",
    "BQMall",
    "PartyScene",
    "RaceHorseC",
    "BasketballPass",
    "BQSquare",
    "BlowingBubbles",
    "RaceHorses",
    "FourPeople",
    "Johnny",
    "KristenAndSara",
    "BasketballDrillText",
    "ChinaSpeed",
    "SlideEditing",
    "SlideShow",
];

/// Test-condition standard whose canonical sequence list drives ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standard {
    /// Keeps only records matching a canonical name, in input order.
    Hevc,
    /// One entry per canonical name, in canonical order, with "not coded"
    /// placeholders for sequences without a log.
    Vvc,
}

impl Standard {
    pub const ALL: [Standard; 2] = [Standard::Hevc, Standard::Vvc];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Standard::Hevc => "HEVC",
            Standard::Vvc => "VVC",
        }
    }

    /// Canonical sequence names of this standard, in report order.
    #[must_use]
    pub fn sequences(self) -> &'static [&'static str] {
        match self {
            Standard::Hevc => HEVC_SEQUENCES,
            Standard::Vvc => VVC_SEQUENCES,
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Standard {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Standard::ALL
            .into_iter()
            .find(|standard| standard.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownStandard(s.to_string()))
    }
}

/// Whether `canonical` names the sequence of `record`.
#[must_use]
pub fn matches_canonical(record: &MetricsRecord, canonical: &str) -> bool {
    record.sequence_name.starts_with(canonical)
}

/// Keeps only records with a sequence name, preserving order.
#[must_use]
pub fn filter_named(records: Vec<MetricsRecord>) -> Vec<MetricsRecord> {
    let before = records.len();
    let named: Vec<MetricsRecord> = records
        .into_iter()
        .filter(|record| !record.sequence_name.is_empty())
        .collect();
    if named.len() < before {
        warn!("Skipped {} record(s) without a sequence name", before - named.len());
    }
    named
}

/// Arranges records for reporting according to `standard`.
#[must_use]
pub fn order_records(records: &[MetricsRecord], standard: Standard) -> Vec<MetricsRecord> {
    match standard {
        Standard::Hevc => filter_and_order(records, standard.sequences()),
        Standard::Vvc => canonical_superset(records, standard.sequences()),
    }
}

/// One entry per canonical name in canonical order: the first matching
/// record, or a placeholder carrying only the canonical name.
#[must_use]
pub fn canonical_superset(records: &[MetricsRecord], canonical: &[&str]) -> Vec<MetricsRecord> {
    canonical
        .iter()
        .map(|name| {
            records
                .iter()
                .find(|record| matches_canonical(record, name))
                .cloned()
                .unwrap_or_else(|| {
                    debug!("Sequence {name} not coded");
                    MetricsRecord::placeholder(name)
                })
        })
        .collect()
}

/// Records in input order, each emitted once per canonical name it matches.
///
/// A record whose name matches several canonical names (a shared prefix)
/// appears once for each of them; records matching none are dropped.
#[must_use]
pub fn filter_and_order(records: &[MetricsRecord], canonical: &[&str]) -> Vec<MetricsRecord> {
    records
        .iter()
        .flat_map(|record| {
            canonical
                .iter()
                .filter(move |name| matches_canonical(record, name))
                .map(move |_| record.clone())
        })
        .collect()
}
