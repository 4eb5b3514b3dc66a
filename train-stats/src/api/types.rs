//! Train API response DTOs.
//!
//! These mirror the JSON the API sends. Nearly every field is an `Option`
//! because the API sends `null` or leaves fields out. Numbers that the API
//! sometimes quotes are read as [`LooseNumber`]. Deciding which fields are
//! required happens during conversion, not here.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A number that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// The numeric value, if there is a finite one.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for LooseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LooseNumber::Number(n) => write!(f, "{}", n),
            LooseNumber::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStation {
    pub crs: Option<String>,
    pub name: Option<String>,
}

/// An operator or a brand.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOperator {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub fg: Option<String>,
    pub bg: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAssociatedService {
    pub service_id: Option<String>,
    pub service_run_date: Option<String>,
    pub association: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawServiceCall {
    pub station: Option<RawStation>,
    pub platform: Option<String>,
    pub plan_arr: Option<String>,
    pub plan_dep: Option<String>,
    pub act_arr: Option<String>,
    pub act_dep: Option<String>,
    pub assocs: Option<Vec<RawAssociatedService>>,
    pub mileage: Option<LooseNumber>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawService {
    pub service_id: Option<String>,
    pub headcode: Option<String>,
    pub run_date: Option<String>,
    pub service_start: Option<String>,
    pub origins: Option<Vec<RawStation>>,
    pub destinations: Option<Vec<RawStation>>,
    pub operator: Option<RawOperator>,
    pub brand: Option<RawOperator>,
    pub power: Option<String>,
    pub calls: Option<Vec<RawServiceCall>>,
    pub assocs: Option<Vec<RawAssociatedService>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCars {
    pub cars: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStockReport {
    pub class_no: Option<u32>,
    pub subclass_no: Option<u32>,
    pub stock_no: Option<u32>,
    pub cars: Option<RawCars>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLegCall {
    pub station: Option<RawStation>,
    pub platform: Option<String>,
    pub plan_arr: Option<String>,
    pub plan_dep: Option<String>,
    pub act_arr: Option<String>,
    pub act_dep: Option<String>,
    pub associated_service: Option<RawAssociatedService>,
    pub leg_stock: Option<Vec<RawStockReport>>,
    pub mileage: Option<LooseNumber>,
    /// `[longitude, latitude]`, usually as strings.
    pub point: Option<Vec<LooseNumber>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLegSegment {
    pub start: Option<RawStation>,
    pub end: Option<RawStation>,
    pub mileage: Option<LooseNumber>,
    pub stocks: Option<Vec<RawStockReport>>,
}

/// Response body of `GET /api/train/legs/{id}`, and the element type of the
/// leg list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLeg {
    pub id: Option<i64>,
    pub leg_start: Option<String>,
    /// Sent as an object keyed by service id; read in document order.
    #[serde(default, deserialize_with = "services_in_order")]
    pub services: Vec<RawService>,
    pub calls: Option<Vec<RawLegCall>>,
    pub stocks: Option<Vec<RawLegSegment>>,
    pub distance: Option<LooseNumber>,
    /// ISO 8601 duration, e.g. "PT2H5M".
    pub duration: Option<String>,
    pub geometry: Option<Vec<Vec<LooseNumber>>>,
}

/// Read a keyed object of services as a list, keeping document order.
fn services_in_order<'de, D>(deserializer: D) -> Result<Vec<RawService>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ServicesVisitor;

    impl<'de> Visitor<'de> for ServicesVisitor {
        type Value = Vec<RawService>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of services keyed by id, or null")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut services = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_id, service)) = map.next_entry::<String, RawService>()? {
                services.push(service);
            }
            Ok(services)
        }
    }

    deserializer.deserialize_option(ServicesVisitor)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLegStat {
    pub leg_id: Option<i64>,
    pub board_time: Option<String>,
    pub board_crs: Option<String>,
    pub board_name: Option<String>,
    pub alight_time: Option<String>,
    pub alight_crs: Option<String>,
    pub alight_name: Option<String>,
    pub distance: Option<LooseNumber>,
    pub duration: Option<String>,
    pub delay: Option<LooseNumber>,
    pub operator_id: Option<i64>,
    pub operator_code: Option<String>,
    pub operator_name: Option<String>,
    pub is_brand: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStationStat {
    pub station_crs: Option<String>,
    pub station_name: Option<String>,
    pub operator_name: Option<String>,
    pub operator_id: Option<i64>,
    pub is_brand: Option<bool>,
    pub boards: Option<u32>,
    pub alights: Option<u32>,
    pub intermediates: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawOperatorStat {
    pub operator_id: Option<i64>,
    pub operator_name: Option<String>,
    pub is_brand: Option<bool>,
    pub count: Option<u32>,
    pub distance: Option<LooseNumber>,
    pub duration: Option<String>,
    pub delay: Option<LooseNumber>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawClassStat {
    pub stock_class: Option<u32>,
    pub count: Option<u32>,
    pub distance: Option<LooseNumber>,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUnitStat {
    pub stock_number: Option<u32>,
    pub count: Option<u32>,
    pub distance: Option<LooseNumber>,
    pub duration: Option<String>,
}

/// Response body of `GET /api/train/stats/years/{year}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStats {
    pub journeys: Option<u32>,
    pub distance: Option<LooseNumber>,
    pub duration: Option<String>,
    pub delay: Option<LooseNumber>,
    pub leg_stats: Option<Vec<RawLegStat>>,
    pub station_stats: Option<Vec<RawStationStat>>,
    pub operator_stats: Option<Vec<RawOperatorStat>>,
    pub class_stats: Option<Vec<RawClassStat>>,
    pub unit_stats: Option<Vec<RawUnitStat>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawStationLeg {
    pub id: Option<i64>,
    pub platform: Option<String>,
    pub origin: Option<RawStation>,
    pub destination: Option<RawStation>,
    pub stop_time: Option<String>,
    pub plan_arr: Option<String>,
    pub act_arr: Option<String>,
    pub plan_dep: Option<String>,
    pub act_dep: Option<String>,
    pub calls_before: Option<u32>,
    pub calls_after: Option<u32>,
    pub operator: Option<RawOperator>,
    pub brand: Option<RawOperator>,
}

/// Response body of `GET /api/train/stations/{crs}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStationData {
    pub crs: Option<String>,
    pub name: Option<String>,
    pub operator: Option<RawOperator>,
    pub brand: Option<RawOperator>,
    pub legs: Option<Vec<RawStationLeg>>,
    pub starts: Option<u32>,
    pub finishes: Option<u32>,
    pub passes: Option<u32>,
    pub img: Option<String>,
}
