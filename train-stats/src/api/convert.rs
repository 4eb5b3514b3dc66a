//! Conversion from train API DTOs to domain types.
//!
//! Required fields (ids, station identity, a leg's call list) fail the
//! entity they belong to. Everything else that is missing or unparsable
//! becomes `None`. Invalid items inside a list are skipped with a warning
//! rather than failing the whole response.

use tracing::{debug, warn};

use crate::domain::{
    AssociatedService, AssociationType, ClassStat, Crs, Delay, Leg, LegCall, LegDuration,
    LegSegment, LegStat, Operator, OperatorStat, Service, ServiceCall, StationData, StationLeg,
    StationStat, StationSummary, Stats, StockReport, Timestamp, UnitStat,
};

use super::types::{
    LooseNumber, RawAssociatedService, RawClassStat, RawLeg, RawLegCall, RawLegSegment,
    RawLegStat, RawOperator, RawOperatorStat, RawService, RawServiceCall, RawStation,
    RawStationData, RawStationLeg, RawStationStat, RawStats, RawStockReport, RawUnitStat,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required instant could not be read
    #[error("unparsable time in {field}: {value:?}")]
    UnparsableTime { field: &'static str, value: String },

    /// Failed to parse a CRS code
    #[error("invalid CRS code: {0}")]
    InvalidCrs(String),
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConversionError> {
    value.ok_or(ConversionError::MissingField(field))
}

fn required_time(value: Option<&str>, field: &'static str) -> Result<Timestamp, ConversionError> {
    let value = required(value, field)?;
    Timestamp::parse(value).map_err(|_| ConversionError::UnparsableTime {
        field,
        value: value.to_string(),
    })
}

fn optional_time(value: Option<&str>, field: &'static str) -> Option<Timestamp> {
    let value = value?;
    match Timestamp::parse(value) {
        Ok(t) => Some(t),
        Err(e) => {
            debug!(field, value, error = %e, "dropping unparsable time");
            None
        }
    }
}

fn optional_number(value: Option<&LooseNumber>, field: &'static str) -> Option<f64> {
    let value = value?;
    let number = value.as_f64();
    if number.is_none() {
        debug!(field, %value, "dropping unparsable number");
    }
    number
}

fn optional_duration(value: Option<&str>, field: &'static str) -> Option<LegDuration> {
    let value = value?;
    match LegDuration::parse_iso8601(value) {
        Ok(d) => Some(d),
        Err(e) => {
            debug!(field, value, error = %e, "dropping unparsable duration");
            None
        }
    }
}

fn optional_delay(value: Option<&LooseNumber>, field: &'static str) -> Option<Delay> {
    optional_number(value, field).map(|minutes| Delay::from_minutes(minutes.trunc() as i64))
}

fn parse_crs(value: Option<&str>, field: &'static str) -> Result<Crs, ConversionError> {
    let value = required(value, field)?;
    Crs::parse_normalized(value).map_err(|_| ConversionError::InvalidCrs(value.to_string()))
}

/// Convert a list, skipping and logging items that fail.
fn convert_all<R, T>(
    items: Option<Vec<R>>,
    what: &'static str,
    convert: impl Fn(R) -> Result<T, ConversionError>,
) -> Vec<T> {
    let items = items.unwrap_or_default();
    let mut results = Vec::with_capacity(items.len());
    for item in items {
        match convert(item) {
            Ok(converted) => results.push(converted),
            Err(e) => warn!(what, error = %e, "skipping invalid item"),
        }
    }
    results
}

fn convert_station(raw: RawStation) -> Result<StationSummary, ConversionError> {
    let crs = parse_crs(raw.crs.as_deref(), "station.crs")?;
    let name = required(raw.name, "station.name")?;
    Ok(StationSummary::new(crs, name))
}

fn convert_operator(raw: RawOperator) -> Result<Operator, ConversionError> {
    let id = required(raw.id, "operator.id")?;
    let name = required(raw.name, "operator.name")?;
    Ok(Operator {
        id,
        name,
        code: raw.code,
        fg: raw.fg,
        bg: raw.bg,
    })
}

/// A brand is absent when null or when it carries no id.
fn convert_brand(raw: Option<RawOperator>) -> Option<Operator> {
    let raw = raw?;
    if raw.id.is_none() {
        return None;
    }
    match convert_operator(raw) {
        Ok(brand) => Some(brand),
        Err(e) => {
            debug!(error = %e, "dropping incomplete brand");
            None
        }
    }
}

fn convert_associated_service(
    raw: RawAssociatedService,
) -> Result<AssociatedService, ConversionError> {
    let id = required(raw.service_id, "assoc.service_id")?;
    let association = raw.association.as_deref().and_then(|a| {
        let parsed = AssociationType::from_api(a);
        if parsed.is_none() {
            debug!(association = a, "unknown association type");
        }
        parsed
    });
    Ok(AssociatedService {
        id,
        run_date: optional_time(raw.service_run_date.as_deref(), "assoc.service_run_date"),
        association,
    })
}

fn convert_stock_report(raw: RawStockReport) -> StockReport {
    StockReport {
        class_no: raw.class_no,
        subclass_no: raw.subclass_no,
        stock_no: raw.stock_no,
        cars: raw.cars.and_then(|c| c.cars),
    }
}

fn convert_point(raw: Option<Vec<LooseNumber>>) -> Option<(f64, f64)> {
    let raw = raw?;
    match raw.as_slice() {
        [x, y] => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => {
                debug!(?raw, "dropping unparsable point");
                None
            }
        },
        _ => {
            debug!(len = raw.len(), "dropping point without two coordinates");
            None
        }
    }
}

/// Parse a line geometry. One bad coordinate pair drops the whole line.
fn convert_geometry(raw: Option<Vec<Vec<LooseNumber>>>) -> Option<Vec<(f64, f64)>> {
    let raw = raw?;
    let mut line = Vec::with_capacity(raw.len());
    for pair in raw {
        line.push(convert_point(Some(pair))?);
    }
    Some(line)
}

fn convert_service_call(raw: RawServiceCall) -> Result<ServiceCall, ConversionError> {
    let station = convert_station(required(raw.station, "call.station")?)?;
    Ok(ServiceCall {
        station,
        platform: raw.platform,
        plan_arr: optional_time(raw.plan_arr.as_deref(), "call.plan_arr"),
        plan_dep: optional_time(raw.plan_dep.as_deref(), "call.plan_dep"),
        act_arr: optional_time(raw.act_arr.as_deref(), "call.act_arr"),
        act_dep: optional_time(raw.act_dep.as_deref(), "call.act_dep"),
        assocs: convert_all(raw.assocs, "association", convert_associated_service),
        mileage: optional_number(raw.mileage.as_ref(), "call.mileage"),
    })
}

fn convert_service(raw: RawService) -> Result<Service, ConversionError> {
    Ok(Service {
        id: required(raw.service_id, "service.service_id")?,
        headcode: required(raw.headcode, "service.headcode")?,
        run_date: required_time(raw.run_date.as_deref(), "service.run_date")?,
        service_start: required_time(raw.service_start.as_deref(), "service.service_start")?,
        origins: convert_all(raw.origins, "origin", convert_station),
        destinations: convert_all(raw.destinations, "destination", convert_station),
        operator: convert_operator(required(raw.operator, "service.operator")?)?,
        brand: convert_brand(raw.brand),
        power: raw.power,
        calls: convert_all(raw.calls, "service call", convert_service_call),
        assocs: convert_all(raw.assocs, "association", convert_associated_service),
    })
}

fn convert_leg_call(raw: RawLegCall) -> Result<LegCall, ConversionError> {
    let station = convert_station(required(raw.station, "leg call.station")?)?;
    let associated_service = match raw.associated_service {
        Some(assoc) => Some(convert_associated_service(assoc)?),
        None => None,
    };
    Ok(LegCall {
        station,
        platform: raw.platform,
        plan_arr: optional_time(raw.plan_arr.as_deref(), "leg call.plan_arr"),
        plan_dep: optional_time(raw.plan_dep.as_deref(), "leg call.plan_dep"),
        act_arr: optional_time(raw.act_arr.as_deref(), "leg call.act_arr"),
        act_dep: optional_time(raw.act_dep.as_deref(), "leg call.act_dep"),
        associated_service,
        new_stock: raw
            .leg_stock
            .map(|stock| stock.into_iter().map(convert_stock_report).collect()),
        mileage: optional_number(raw.mileage.as_ref(), "leg call.mileage"),
        point: convert_point(raw.point),
    })
}

fn convert_leg_segment(raw: RawLegSegment) -> Result<LegSegment, ConversionError> {
    Ok(LegSegment {
        start: convert_station(required(raw.start, "segment.start")?)?,
        end: convert_station(required(raw.end, "segment.end")?)?,
        mileage: optional_number(raw.mileage.as_ref(), "segment.mileage"),
        stocks: raw
            .stocks
            .unwrap_or_default()
            .into_iter()
            .map(convert_stock_report)
            .collect(),
    })
}

/// Convert a single leg.
///
/// The call list is required. Individual calls must all convert, since
/// a leg's origin and destination are its first and last calls.
pub fn convert_leg(raw: RawLeg) -> Result<Leg, ConversionError> {
    let id = required(raw.id, "leg.id")?;
    let start = required_time(raw.leg_start.as_deref(), "leg.leg_start")?;
    let calls = required(raw.calls, "leg.calls")?
        .into_iter()
        .map(convert_leg_call)
        .collect::<Result<Vec<_>, _>>()?;
    let services = raw
        .services
        .into_iter()
        .map(convert_service)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Leg {
        id,
        start,
        services,
        calls,
        stock: convert_all(raw.stocks, "stock segment", convert_leg_segment),
        distance: optional_number(raw.distance.as_ref(), "leg.distance"),
        duration: optional_duration(raw.duration.as_deref(), "leg.duration"),
        geometry: convert_geometry(raw.geometry),
    })
}

/// Convert a list of legs, skipping any that fail.
pub fn convert_legs(raw: Vec<RawLeg>) -> Vec<Leg> {
    convert_all(Some(raw), "leg", convert_leg)
}

fn convert_leg_stat(raw: RawLegStat) -> Result<LegStat, ConversionError> {
    Ok(LegStat {
        id: required(raw.leg_id, "leg_stat.leg_id")?,
        board_time: required_time(raw.board_time.as_deref(), "leg_stat.board_time")?,
        board_crs: parse_crs(raw.board_crs.as_deref(), "leg_stat.board_crs")?,
        board_name: required(raw.board_name, "leg_stat.board_name")?,
        alight_time: required_time(raw.alight_time.as_deref(), "leg_stat.alight_time")?,
        alight_crs: parse_crs(raw.alight_crs.as_deref(), "leg_stat.alight_crs")?,
        alight_name: required(raw.alight_name, "leg_stat.alight_name")?,
        distance: optional_number(raw.distance.as_ref(), "leg_stat.distance"),
        duration: optional_duration(raw.duration.as_deref(), "leg_stat.duration"),
        delay: optional_delay(raw.delay.as_ref(), "leg_stat.delay"),
        operator_id: required(raw.operator_id, "leg_stat.operator_id")?,
        operator_code: raw.operator_code,
        operator_name: required(raw.operator_name, "leg_stat.operator_name")?,
        is_brand: raw.is_brand.unwrap_or(false),
    })
}

fn convert_station_stat(raw: RawStationStat) -> Result<StationStat, ConversionError> {
    Ok(StationStat {
        crs: parse_crs(raw.station_crs.as_deref(), "station_stat.station_crs")?,
        name: required(raw.station_name, "station_stat.station_name")?,
        operator_name: required(raw.operator_name, "station_stat.operator_name")?,
        operator_id: required(raw.operator_id, "station_stat.operator_id")?,
        is_brand: raw.is_brand.unwrap_or(false),
        boards: required(raw.boards, "station_stat.boards")?,
        alights: required(raw.alights, "station_stat.alights")?,
        intermediates: required(raw.intermediates, "station_stat.intermediates")?,
    })
}

fn convert_operator_stat(raw: RawOperatorStat) -> Result<OperatorStat, ConversionError> {
    Ok(OperatorStat {
        id: required(raw.operator_id, "operator_stat.operator_id")?,
        name: required(raw.operator_name, "operator_stat.operator_name")?,
        is_brand: raw.is_brand.unwrap_or(false),
        count: required(raw.count, "operator_stat.count")?,
        distance: optional_number(raw.distance.as_ref(), "operator_stat.distance"),
        duration: optional_duration(raw.duration.as_deref(), "operator_stat.duration"),
        delay: optional_delay(raw.delay.as_ref(), "operator_stat.delay"),
    })
}

fn convert_class_stat(raw: RawClassStat) -> Result<ClassStat, ConversionError> {
    Ok(ClassStat {
        stock_class: required(raw.stock_class, "class_stat.stock_class")?,
        count: required(raw.count, "class_stat.count")?,
        distance: optional_number(raw.distance.as_ref(), "class_stat.distance"),
        duration: optional_duration(raw.duration.as_deref(), "class_stat.duration"),
    })
}

fn convert_unit_stat(raw: RawUnitStat) -> Result<UnitStat, ConversionError> {
    Ok(UnitStat {
        stock_number: required(raw.stock_number, "unit_stat.stock_number")?,
        count: required(raw.count, "unit_stat.count")?,
        distance: optional_number(raw.distance.as_ref(), "unit_stat.distance"),
        duration: optional_duration(raw.duration.as_deref(), "unit_stat.duration"),
    })
}

/// Convert a year's statistics.
///
/// `leg_stats` and `station_stats` must be present; the operator, class and
/// unit breakdowns default to empty.
pub fn convert_stats(raw: RawStats) -> Result<Stats, ConversionError> {
    let leg_stats = required(raw.leg_stats, "stats.leg_stats")?;
    let station_stats = required(raw.station_stats, "stats.station_stats")?;

    Ok(Stats {
        journeys: required(raw.journeys, "stats.journeys")?,
        distance: optional_number(raw.distance.as_ref(), "stats.distance"),
        duration: optional_duration(raw.duration.as_deref(), "stats.duration"),
        delay: optional_delay(raw.delay.as_ref(), "stats.delay"),
        leg_stats: convert_all(Some(leg_stats), "leg stat", convert_leg_stat),
        station_stats: convert_all(Some(station_stats), "station stat", convert_station_stat),
        operator_stats: convert_all(raw.operator_stats, "operator stat", convert_operator_stat),
        class_stats: convert_all(raw.class_stats, "class stat", convert_class_stat),
        unit_stats: convert_all(raw.unit_stats, "unit stat", convert_unit_stat),
    })
}

fn convert_station_leg(raw: RawStationLeg) -> Result<StationLeg, ConversionError> {
    Ok(StationLeg {
        id: required(raw.id, "station_leg.id")?,
        platform: raw.platform,
        origin: convert_station(required(raw.origin, "station_leg.origin")?)?,
        destination: convert_station(required(raw.destination, "station_leg.destination")?)?,
        stop_time: optional_time(raw.stop_time.as_deref(), "station_leg.stop_time"),
        plan_arr: optional_time(raw.plan_arr.as_deref(), "station_leg.plan_arr"),
        act_arr: optional_time(raw.act_arr.as_deref(), "station_leg.act_arr"),
        plan_dep: optional_time(raw.plan_dep.as_deref(), "station_leg.plan_dep"),
        act_dep: optional_time(raw.act_dep.as_deref(), "station_leg.act_dep"),
        calls_before: raw.calls_before,
        calls_after: raw.calls_after,
        operator: convert_operator(required(raw.operator, "station_leg.operator")?)?,
        brand: convert_brand(raw.brand),
    })
}

/// Convert a station's details and the legs that called there.
pub fn convert_station_data(raw: RawStationData) -> Result<StationData, ConversionError> {
    Ok(StationData {
        crs: parse_crs(raw.crs.as_deref(), "station.crs")?,
        name: required(raw.name, "station.name")?,
        operator: convert_operator(required(raw.operator, "station.operator")?)?,
        brand: convert_brand(raw.brand),
        legs: convert_all(raw.legs, "station leg", convert_station_leg),
        starts: raw.starts,
        finishes: raw.finishes,
        passes: raw.passes,
        img: raw.img,
    })
}

/// Convert the station list, skipping any that fail.
pub fn convert_stations(raw: Vec<RawStationData>) -> Vec<StationData> {
    convert_all(Some(raw), "station", convert_station_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssociationType, Delay, DelayBand};

    fn leg_json() -> &'static str {
        r##"{
            "id": 42,
            "leg_start": "2024-03-01T09:58:00+00:00",
            "services": {
                "G1": {
                    "service_id": "G1",
                    "headcode": "1S25",
                    "run_date": "2024-03-01T00:00:00+00:00",
                    "service_start": "2024-03-01T10:00:00+00:00",
                    "origins": [{"crs": "kgx", "name": "London Kings Cross"}],
                    "destinations": [{"crs": "EDB", "name": "Edinburgh"}],
                    "operator": {"id": 10, "name": "London North Eastern Railway", "code": "GR", "fg": "#fff", "bg": "#c00"},
                    "brand": {"id": null, "name": null},
                    "power": "EMU",
                    "calls": [],
                    "assocs": [
                        {"service_id": "G2", "service_run_date": "2024-03-01T00:00:00+00:00", "association": "JOINS_WITH"},
                        {"service_id": "G3", "association": "SPLITS_SIDEWAYS"}
                    ]
                }
            },
            "calls": [
                {
                    "station": {"crs": "KGX", "name": "London Kings Cross"},
                    "platform": "0",
                    "plan_dep": "2024-03-01T10:00:00+00:00",
                    "act_dep": "2024-03-01T10:03:00+00:00",
                    "leg_stock": [{"class_no": 801, "cars": {"cars": 9}}],
                    "mileage": "0",
                    "point": ["-0.1234", "51.53"]
                },
                {
                    "station": {"crs": "EDB", "name": "Edinburgh"},
                    "plan_arr": "2024-03-01T14:20:00+00:00",
                    "act_arr": "2024-03-01T14:19:00+00:00",
                    "mileage": 393.1,
                    "point": ["not", "numbers"]
                }
            ],
            "stocks": [
                {"start": {"crs": "KGX", "name": "London Kings Cross"},
                 "end": {"crs": "EDB", "name": "Edinburgh"},
                 "mileage": "393.1",
                 "stocks": [{"class_no": 801, "subclass_no": 2, "stock_no": 801213}]}
            ],
            "distance": "393.1",
            "duration": "PT4H20M",
            "geometry": [["-0.1234", "51.53"], ["-3.19", "55.95"]]
        }"##
    }

    fn raw_leg() -> RawLeg {
        serde_json::from_str(leg_json()).unwrap()
    }

    #[test]
    fn converts_full_leg() {
        let leg = convert_leg(raw_leg()).unwrap();
        assert_eq!(leg.id, 42);
        assert_eq!(leg.calls.len(), 2);
        assert_eq!(leg.origin().unwrap().station.crs.as_str(), "KGX");
        assert_eq!(leg.destination().unwrap().station.name, "Edinburgh");
        assert_eq!(leg.distance, Some(393.1));
        assert_eq!(leg.duration, Some(LegDuration::from_minutes(260)));
        assert_eq!(leg.geometry, Some(vec![(-0.1234, 51.53), (-3.19, 55.95)]));
        assert_eq!(leg.stock.len(), 1);
        assert_eq!(leg.stock[0].stocks[0].stock_no, Some(801213));
    }

    #[test]
    fn zero_mileage_is_present() {
        let leg = convert_leg(raw_leg()).unwrap();
        assert_eq!(leg.calls[0].mileage, Some(0.0));
    }

    #[test]
    fn points_keep_source_order() {
        let leg = convert_leg(raw_leg()).unwrap();
        assert_eq!(leg.calls[0].point, Some((-0.1234, 51.53)));
        assert_eq!(leg.calls[1].point, None);
    }

    #[test]
    fn brand_without_id_is_absent() {
        let leg = convert_leg(raw_leg()).unwrap();
        let service = &leg.services[0];
        assert!(service.brand.is_none());
        assert_eq!(service.presented_by().name, "London North Eastern Railway");
        assert_eq!(service.origins[0].crs.as_str(), "KGX");
    }

    #[test]
    fn unknown_association_is_absent() {
        let leg = convert_leg(raw_leg()).unwrap();
        let assocs = &leg.services[0].assocs;
        assert_eq!(assocs[0].association, Some(AssociationType::JoinsWith));
        assert!(assocs[0].run_date.is_some());
        assert_eq!(assocs[1].association, None);
        assert_eq!(assocs[1].id, "G3");
    }

    #[test]
    fn stock_report_cars_unwrapped() {
        let leg = convert_leg(raw_leg()).unwrap();
        let stock = leg.calls[0].new_stock.as_ref().unwrap();
        assert_eq!(stock[0].class_no, Some(801));
        assert_eq!(stock[0].cars, Some(9));
        assert!(leg.calls[1].new_stock.is_none());
    }

    #[test]
    fn bad_duration_is_absent_not_fatal() {
        let mut raw = raw_leg();
        raw.duration = Some("four hours".into());
        raw.distance = Some(LooseNumber::Text("far".into()));
        let leg = convert_leg(raw).unwrap();
        assert_eq!(leg.duration, None);
        assert_eq!(leg.distance, None);
    }

    #[test]
    fn one_bad_coordinate_drops_geometry() {
        let mut raw = raw_leg();
        raw.geometry = Some(vec![
            vec![LooseNumber::Text("1".into()), LooseNumber::Text("2".into())],
            vec![LooseNumber::Text("x".into()), LooseNumber::Text("2".into())],
        ]);
        assert_eq!(convert_leg(raw).unwrap().geometry, None);
    }

    #[test]
    fn missing_required_fields_fail_leg() {
        let mut raw = raw_leg();
        raw.id = None;
        assert_eq!(
            convert_leg(raw).unwrap_err(),
            ConversionError::MissingField("leg.id")
        );

        let mut raw = raw_leg();
        raw.calls = None;
        assert_eq!(
            convert_leg(raw).unwrap_err(),
            ConversionError::MissingField("leg.calls")
        );

        let mut raw = raw_leg();
        if let Some(calls) = raw.calls.as_mut() {
            calls[0].station = Some(RawStation {
                crs: Some("K1X".into()),
                name: Some("Nowhere".into()),
            });
        }
        assert_eq!(
            convert_leg(raw).unwrap_err(),
            ConversionError::InvalidCrs("K1X".into())
        );
    }

    #[test]
    fn convert_legs_skips_invalid() {
        let mut broken = raw_leg();
        broken.leg_start = Some("yesterday".into());
        let legs = convert_legs(vec![raw_leg(), broken]);
        assert_eq!(legs.len(), 1);
    }

    fn stats_json() -> &'static str {
        r#"{
            "journeys": 3,
            "distance": "512.5",
            "duration": "PT9H",
            "delay": 0,
            "leg_stats": [
                {"leg_id": 1, "board_time": "2024-01-02T08:00:00Z", "board_crs": "GLC", "board_name": "Glasgow Central",
                 "alight_time": "2024-01-02T13:00:00Z", "alight_crs": "EUS", "alight_name": "London Euston",
                 "distance": "401.0", "duration": "PT5H", "delay": 0,
                 "operator_id": 5, "operator_code": "VT", "operator_name": "Avanti West Coast", "is_brand": false},
                {"leg_id": 2, "board_time": "2024-01-03T08:00:00Z", "board_crs": "EUS", "board_name": "London Euston",
                 "alight_crs": "BHM", "alight_name": "Birmingham New Street",
                 "operator_id": 5, "operator_name": "Avanti West Coast"}
            ],
            "station_stats": [
                {"station_crs": "EUS", "station_name": "London Euston", "operator_name": "Network Rail",
                 "operator_id": 1, "is_brand": false, "boards": 1, "alights": 1, "intermediates": 0}
            ],
            "operator_stats": [
                {"operator_id": 5, "operator_name": "Avanti West Coast", "is_brand": false, "count": 2,
                 "distance": 512.5, "duration": "PT9H", "delay": "-1"}
            ]
        }"#
    }

    #[test]
    fn converts_stats() {
        let raw: RawStats = serde_json::from_str(stats_json()).unwrap();
        let stats = convert_stats(raw).unwrap();
        assert_eq!(stats.journeys, 3);
        assert_eq!(stats.distance, Some(512.5));
        assert_eq!(stats.delay, Some(Delay::ON_TIME));
        // second leg stat lacks alight_time
        assert_eq!(stats.leg_stats.len(), 1);
        assert_eq!(stats.leg_stats[0].delay, Some(Delay::ON_TIME));
        assert_eq!(stats.station_stats[0].intermediates, 0);
        assert_eq!(stats.operator_stats[0].delay, Some(Delay::from_minutes(-1)));
        assert!(stats.class_stats.is_empty());
        assert!(stats.unit_stats.is_empty());
    }

    #[test]
    fn stats_without_leg_stats_fail() {
        let raw: RawStats = serde_json::from_str(r#"{"journeys": 0, "station_stats": []}"#).unwrap();
        assert_eq!(
            convert_stats(raw).unwrap_err(),
            ConversionError::MissingField("stats.leg_stats")
        );
    }

    #[test]
    fn fractional_delays_truncate_toward_zero() {
        let raw: RawStats = serde_json::from_str(
            r#"{"journeys": 1, "delay": 4.6, "leg_stats": [], "station_stats": [],
                "operator_stats": [{"operator_id": 5, "operator_name": "Avanti West Coast",
                                    "count": 1, "delay": "-4.6"}]}"#,
        )
        .unwrap();
        let stats = convert_stats(raw).unwrap();

        let late = stats.delay.unwrap();
        assert_eq!(late, Delay::from_minutes(4));
        assert_eq!(late.band(), DelayBand::Late);

        let early = stats.operator_stats[0].delay.unwrap();
        assert_eq!(early, Delay::from_minutes(-4));
        assert_eq!(early.band(), DelayBand::Early);
    }

    #[test]
    fn converts_station_data() {
        let json = r#"{
            "crs": "edb",
            "name": "Edinburgh",
            "operator": {"id": 1, "name": "Network Rail"},
            "brand": null,
            "legs": [
                {"id": 9, "platform": "2",
                 "origin": {"crs": "KGX", "name": "London Kings Cross"},
                 "destination": {"crs": "EDB", "name": "Edinburgh"},
                 "stop_time": "2024-03-01T14:20:00+00:00",
                 "plan_arr": "2024-03-01T14:20:00+00:00",
                 "act_arr": "2024-03-01T14:25:00+00:00",
                 "calls_before": 4, "calls_after": 0,
                 "operator": {"id": 10, "name": "LNER"},
                 "brand": {"id": 11, "name": "Azuma"}},
                {"id": 10}
            ],
            "starts": 2, "finishes": 3, "passes": 0,
            "img": "https://example.org/edb.jpg"
        }"#;
        let raw: RawStationData = serde_json::from_str(json).unwrap();
        let station = convert_station_data(raw).unwrap();
        assert_eq!(station.crs.as_str(), "EDB");
        assert!(station.brand.is_none());
        assert_eq!(station.legs.len(), 1);
        let leg = &station.legs[0];
        assert_eq!(leg.arrival_delay(), Some(Delay::from_minutes(5)));
        assert_eq!(leg.calls_after, Some(0));
        assert_eq!(leg.presented_by().name, "Azuma");
        assert_eq!(station.passes, Some(0));
    }

    #[test]
    fn unreported_station_counts_stay_absent() {
        let raw: RawStationData = serde_json::from_str(
            r#"{"crs": "YRK", "name": "York", "operator": {"id": 1, "name": "Network Rail"},
                "finishes": 0}"#,
        )
        .unwrap();
        let station = convert_station_data(raw).unwrap();
        assert_eq!(station.starts, None);
        assert_eq!(station.finishes, Some(0));
        assert_eq!(station.passes, None);
        assert!(station.legs.is_empty());
    }
}
