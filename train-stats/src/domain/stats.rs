//! Yearly statistics and the comparators the stats tables sort by.
//!
//! Every comparator orders ascending. Absent values sort before present
//! ones; tables flip direction as needed.

use std::cmp::Ordering;

use super::{Crs, Delay, LegDuration, OperatorKey, Timestamp};

/// One leg as summarized in the yearly statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LegStat {
    pub id: i64,
    pub board_time: Timestamp,
    pub board_crs: Crs,
    pub board_name: String,
    pub alight_time: Timestamp,
    pub alight_crs: Crs,
    pub alight_name: String,
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
    pub delay: Option<Delay>,
    pub operator_id: i64,
    pub operator_code: Option<String>,
    pub operator_name: String,
    pub is_brand: bool,
}

impl LegStat {
    pub fn by_id(a: &Self, b: &Self) -> Ordering {
        a.id.cmp(&b.id)
    }

    pub fn by_date(a: &Self, b: &Self) -> Ordering {
        a.board_time.cmp(&b.board_time)
    }

    pub fn by_distance(a: &Self, b: &Self) -> Ordering {
        by_miles(a.distance, b.distance)
    }

    pub fn by_duration(a: &Self, b: &Self) -> Ordering {
        a.duration.cmp(&b.duration)
    }

    pub fn by_delay(a: &Self, b: &Self) -> Ordering {
        a.delay.cmp(&b.delay)
    }
}

/// Boardings, alightings and calls at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStat {
    pub crs: Crs,
    pub name: String,
    pub operator_name: String,
    pub operator_id: i64,
    pub is_brand: bool,
    pub boards: u32,
    pub alights: u32,
    /// Calls passed through without boarding or alighting.
    pub intermediates: u32,
}

impl StationStat {
    pub fn boards_plus_alights(&self) -> u32 {
        self.boards.saturating_add(self.alights)
    }

    /// Every visit, including calls passed through.
    pub fn total(&self) -> u32 {
        self.boards_plus_alights().saturating_add(self.intermediates)
    }

    pub fn by_crs(a: &Self, b: &Self) -> Ordering {
        a.crs.cmp(&b.crs)
    }

    pub fn by_name(a: &Self, b: &Self) -> Ordering {
        by_text(&a.name, &b.name)
    }

    pub fn by_operator(a: &Self, b: &Self) -> Ordering {
        by_text(&a.operator_name, &b.operator_name)
    }

    pub fn by_boards(a: &Self, b: &Self) -> Ordering {
        a.boards.cmp(&b.boards)
    }

    pub fn by_alights(a: &Self, b: &Self) -> Ordering {
        a.alights.cmp(&b.alights)
    }

    pub fn by_boards_plus_alights(a: &Self, b: &Self) -> Ordering {
        a.boards_plus_alights().cmp(&b.boards_plus_alights())
    }

    pub fn by_calls(a: &Self, b: &Self) -> Ordering {
        a.intermediates.cmp(&b.intermediates)
    }

    pub fn by_total(a: &Self, b: &Self) -> Ordering {
        a.total().cmp(&b.total())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperatorStat {
    pub id: i64,
    pub name: String,
    pub is_brand: bool,
    pub count: u32,
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
    pub delay: Option<Delay>,
}

impl OperatorStat {
    pub fn key(&self) -> OperatorKey {
        OperatorKey::new(self.id, self.is_brand)
    }

    pub fn by_key(a: &Self, b: &Self) -> Ordering {
        a.key().cmp(&b.key())
    }

    pub fn by_name(a: &Self, b: &Self) -> Ordering {
        by_text(&a.name, &b.name)
    }

    pub fn by_count(a: &Self, b: &Self) -> Ordering {
        a.count.cmp(&b.count)
    }

    pub fn by_distance(a: &Self, b: &Self) -> Ordering {
        by_miles(a.distance, b.distance)
    }

    pub fn by_duration(a: &Self, b: &Self) -> Ordering {
        a.duration.cmp(&b.duration)
    }

    pub fn by_delay(a: &Self, b: &Self) -> Ordering {
        a.delay.cmp(&b.delay)
    }
}

/// Legs travelled behind one class of rolling stock.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStat {
    pub stock_class: u32,
    pub count: u32,
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
}

impl ClassStat {
    pub fn by_class_number(a: &Self, b: &Self) -> Ordering {
        a.stock_class.cmp(&b.stock_class)
    }

    pub fn by_count(a: &Self, b: &Self) -> Ordering {
        a.count.cmp(&b.count)
    }

    pub fn by_distance(a: &Self, b: &Self) -> Ordering {
        by_miles(a.distance, b.distance)
    }

    pub fn by_duration(a: &Self, b: &Self) -> Ordering {
        a.duration.cmp(&b.duration)
    }
}

/// Legs travelled behind one numbered unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitStat {
    pub stock_number: u32,
    pub count: u32,
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
}

impl UnitStat {
    pub fn by_unit_number(a: &Self, b: &Self) -> Ordering {
        a.stock_number.cmp(&b.stock_number)
    }

    pub fn by_count(a: &Self, b: &Self) -> Ordering {
        a.count.cmp(&b.count)
    }

    pub fn by_distance(a: &Self, b: &Self) -> Ordering {
        by_miles(a.distance, b.distance)
    }

    pub fn by_duration(a: &Self, b: &Self) -> Ordering {
        a.duration.cmp(&b.duration)
    }
}

/// Statistics for one year of travel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub journeys: u32,
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
    pub delay: Option<Delay>,
    pub leg_stats: Vec<LegStat>,
    pub station_stats: Vec<StationStat>,
    pub operator_stats: Vec<OperatorStat>,
    pub class_stats: Vec<ClassStat>,
    pub unit_stats: Vec<UnitStat>,
}

/// Case-insensitive, falling back to exact comparison so distinct names
/// never compare equal.
fn by_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

fn by_miles(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}
