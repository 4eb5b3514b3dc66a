//! Recorded journeys and the services and calls they are made of.
//!
//! These are the normalized forms of the API's leg, service and station
//! records. Anything the API may omit is an `Option`; a zero distance or
//! count is a real value, not an absent one.

use std::fmt;

use super::{Crs, Delay, LegDuration, Mileage, Operator, Timestamp, operator::branded};

/// A station as it appears inside another record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSummary {
    pub crs: Crs,
    pub name: String,
}

impl StationSummary {
    pub fn new(crs: Crs, name: impl Into<String>) -> Self {
        Self {
            crs,
            name: name.into(),
        }
    }
}

/// How one service relates to another at a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationType {
    DividesTo,
    DividesFrom,
    JoinsWith,
    JoinsTo,
}

impl AssociationType {
    /// Parse the API's upper snake case name. Unknown names give `None`.
    pub fn from_api(s: &str) -> Option<Self> {
        match s {
            "DIVIDES_TO" => Some(Self::DividesTo),
            "DIVIDES_FROM" => Some(Self::DividesFrom),
            "JOINS_WITH" => Some(Self::JoinsWith),
            "JOINS_TO" => Some(Self::JoinsTo),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::DividesTo => "Divides to form",
            Self::DividesFrom => "Divided from",
            Self::JoinsWith => "Joins with",
            Self::JoinsTo => "Joins to",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociatedService {
    pub id: String,
    pub run_date: Option<Timestamp>,
    pub association: Option<AssociationType>,
}

/// What was seen about a train's formation at a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StockReport {
    pub class_no: Option<u32>,
    pub subclass_no: Option<u32>,
    pub stock_no: Option<u32>,
    pub cars: Option<u32>,
}

impl fmt::Display for StockReport {
    /// e.g. "Class 387", "387/1 387123 (4 cars)".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = Vec::new();
        match (self.class_no, self.subclass_no) {
            (Some(class), Some(subclass)) => pieces.push(format!("{}/{}", class, subclass)),
            (Some(class), None) => pieces.push(format!("Class {}", class)),
            _ => {}
        }
        if let Some(stock) = self.stock_no {
            pieces.push(stock.to_string());
        }
        if let Some(cars) = self.cars {
            pieces.push(format!("({} cars)", cars));
        }
        f.write_str(&pieces.join(" "))
    }
}

/// A call made by a service, whether or not it was part of the leg.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCall {
    pub station: StationSummary,
    pub platform: Option<String>,
    pub plan_arr: Option<Timestamp>,
    pub plan_dep: Option<Timestamp>,
    pub act_arr: Option<Timestamp>,
    pub act_dep: Option<Timestamp>,
    pub assocs: Vec<AssociatedService>,
    pub mileage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub id: String,
    pub headcode: String,
    pub run_date: Timestamp,
    pub service_start: Timestamp,
    pub origins: Vec<StationSummary>,
    pub destinations: Vec<StationSummary>,
    pub operator: Operator,
    pub brand: Option<Operator>,
    pub power: Option<String>,
    pub calls: Vec<ServiceCall>,
    pub assocs: Vec<AssociatedService>,
}

impl Service {
    /// The brand if the service runs under one, else the operator.
    pub fn presented_by(&self) -> &Operator {
        branded(&self.operator, self.brand.as_ref())
    }

    /// e.g. "1S25 10:00 London Kings Cross to Edinburgh & Aberdeen".
    pub fn summary(&self) -> String {
        format!(
            "{} {} {} to {}",
            self.headcode,
            self.service_start.time_string(),
            endpoint_names(&self.origins),
            endpoint_names(&self.destinations)
        )
    }
}

/// Join station names as "A", "A & B", "A, B & C".
pub fn endpoint_names(stations: &[StationSummary]) -> String {
    match stations {
        [] => String::new(),
        [only] => only.name.clone(),
        [init @ .., last] => {
            let names: Vec<&str> = init.iter().map(|s| s.name.as_str()).collect();
            format!("{} & {}", names.join(", "), last.name)
        }
    }
}

/// A call made during a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegCall {
    pub station: StationSummary,
    pub platform: Option<String>,
    pub plan_arr: Option<Timestamp>,
    pub plan_dep: Option<Timestamp>,
    pub act_arr: Option<Timestamp>,
    pub act_dep: Option<Timestamp>,
    pub associated_service: Option<AssociatedService>,
    /// Formation changes seen at this call.
    pub new_stock: Option<Vec<StockReport>>,
    /// Miles from the start of the leg.
    pub mileage: Option<f64>,
    /// Position in source order, longitude first.
    pub point: Option<(f64, f64)>,
}

impl LegCall {
    pub fn arrival_delay(&self) -> Option<Delay> {
        Delay::between_optional(self.plan_arr, self.act_arr)
    }

    pub fn departure_delay(&self) -> Option<Delay> {
        Delay::between_optional(self.plan_dep, self.act_dep)
    }

    pub fn mileage(&self) -> Option<Mileage> {
        self.mileage.and_then(|m| Mileage::from_miles(m).ok())
    }
}

/// A stretch of a leg worked by one formation.
#[derive(Debug, Clone, PartialEq)]
pub struct LegSegment {
    pub start: StationSummary,
    pub end: StationSummary,
    pub mileage: Option<f64>,
    pub stocks: Vec<StockReport>,
}

/// One recorded journey from boarding to alighting.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub id: i64,
    pub start: Timestamp,
    pub services: Vec<Service>,
    pub calls: Vec<LegCall>,
    pub stock: Vec<LegSegment>,
    /// Miles travelled.
    pub distance: Option<f64>,
    pub duration: Option<LegDuration>,
    /// Route as (longitude, latitude) pairs in source order.
    pub geometry: Option<Vec<(f64, f64)>>,
}

impl Leg {
    /// Boarding call.
    pub fn origin(&self) -> Option<&LegCall> {
        self.calls.first()
    }

    /// Alighting call.
    pub fn destination(&self) -> Option<&LegCall> {
        self.calls.last()
    }

    /// Background colour of the first service's brand or operator.
    pub fn colour(&self) -> Option<&str> {
        self.services
            .first()
            .and_then(|service| service.presented_by().bg.as_deref())
    }

    /// Name of the first service's brand or operator.
    pub fn operator_name(&self) -> Option<&str> {
        self.services
            .first()
            .map(|service| service.presented_by().name.as_str())
    }

    pub fn mileage(&self) -> Option<Mileage> {
        self.distance.and_then(|d| Mileage::from_miles(d).ok())
    }
}

/// A leg that stopped at or passed a given station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLeg {
    pub id: i64,
    pub platform: Option<String>,
    pub origin: StationSummary,
    pub destination: StationSummary,
    pub stop_time: Option<Timestamp>,
    pub plan_arr: Option<Timestamp>,
    pub act_arr: Option<Timestamp>,
    pub plan_dep: Option<Timestamp>,
    pub act_dep: Option<Timestamp>,
    /// Calls made on this leg before reaching the station.
    pub calls_before: Option<u32>,
    pub calls_after: Option<u32>,
    pub operator: Operator,
    pub brand: Option<Operator>,
}

impl StationLeg {
    pub fn arrival_delay(&self) -> Option<Delay> {
        Delay::between_optional(self.plan_arr, self.act_arr)
    }

    pub fn departure_delay(&self) -> Option<Delay> {
        Delay::between_optional(self.plan_dep, self.act_dep)
    }

    pub fn presented_by(&self) -> &Operator {
        branded(&self.operator, self.brand.as_ref())
    }

    /// Boarded here: no calls before the station.
    pub fn starts_here(&self) -> bool {
        self.calls_before == Some(0)
    }

    pub fn finishes_here(&self) -> bool {
        self.calls_after == Some(0)
    }
}

/// Everything recorded about one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationData {
    pub crs: Crs,
    pub name: String,
    pub operator: Operator,
    pub brand: Option<Operator>,
    pub legs: Vec<StationLeg>,
    pub starts: Option<u32>,
    pub finishes: Option<u32>,
    pub passes: Option<u32>,
    pub img: Option<String>,
}

impl StationData {
    pub fn presented_by(&self) -> &Operator {
        branded(&self.operator, self.brand.as_ref())
    }
}
