//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{
    Leg, LegCall, StationData, StationLeg, Stats, delay_class, delay_text, format_duration,
    format_long_date, format_mileage, format_short_date, format_time,
};
use crate::ranking::{Cell, TableState};
use crate::tables::StatsTable;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with a link per year.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub years: Vec<i32>,
}

/// One year's statistics and tables.
#[derive(Template)]
#[template(path = "year.html")]
pub struct YearTemplate {
    pub year: i32,
    /// `None` when the statistics could not be fetched.
    pub summary: Option<SummaryView>,
    pub tables: Vec<TableView>,
    /// Legs with a route to draw; `None` when the legs could not be fetched.
    pub mapped_legs: Option<usize>,
}

/// A list of legs: one year's, or every leg when `year` is `None`.
#[derive(Template)]
#[template(path = "legs.html")]
pub struct LegListTemplate {
    pub year: Option<i32>,
    /// `None` when the legs could not be fetched.
    pub legs: Option<Vec<LegRowView>>,
}

/// Every station with recorded calls.
#[derive(Template)]
#[template(path = "stations.html")]
pub struct StationListTemplate {
    /// `None` when the stations could not be fetched.
    pub stations: Option<Vec<StationRowView>>,
}

/// A single leg.
#[derive(Template)]
#[template(path = "leg.html")]
pub struct LegTemplate {
    pub leg: LegView,
}

/// A single station.
#[derive(Template)]
#[template(path = "station.html")]
pub struct StationTemplate {
    pub station: StationView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Totals shown above a year's tables.
#[derive(Debug, Clone)]
pub struct SummaryView {
    pub journeys: u32,
    pub legs: usize,
    pub distance: String,
    pub duration: String,
    pub delay: String,
    pub delay_class: &'static str,
}

impl SummaryView {
    pub fn from_stats(stats: &Stats) -> Self {
        Self {
            journeys: stats.journeys,
            legs: stats.leg_stats.len(),
            distance: format_mileage(stats.distance),
            duration: format_duration(stats.duration),
            delay: delay_text(stats.delay),
            delay_class: delay_class(stats.delay),
        }
    }
}

/// A table header. `href` is absent for headers that do not sort.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub label: &'static str,
    pub style: &'static str,
    pub href: Option<String>,
    pub arrow: &'static str,
}

#[derive(Debug, Clone)]
pub struct CellView {
    pub text: String,
    pub class: &'static str,
    pub href: Option<String>,
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        Self {
            text: cell.text,
            class: cell.class.unwrap_or(""),
            href: cell.href,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub rank: usize,
    pub cells: Vec<CellView>,
}

/// A "Show more…" or "Show fewer…" link.
#[derive(Debug, Clone)]
pub struct LinkView {
    pub href: String,
    pub label: &'static str,
}

/// A sortable table ready to draw.
#[derive(Debug, Clone)]
pub struct TableView {
    pub title: &'static str,
    pub colour: &'static str,
    pub param: &'static str,
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub toggle: Option<LinkView>,
}

/// Link to `base` carrying every table's state, with `param`'s state
/// replaced by `target`. Tables in their initial state are left out.
pub fn state_href(
    base: &str,
    states: &[(&'static str, TableState)],
    param: &str,
    target: TableState,
) -> String {
    let query: Vec<String> = states
        .iter()
        .map(|&(p, state)| (p, if p == param { target } else { state }))
        .filter(|(_, state)| *state != TableState::default())
        .map(|(p, state)| format!("{}={}", p, state))
        .collect();

    if query.is_empty() {
        format!("{}#{}", base, param)
    } else {
        format!("{}?{}#{}", base, query.join("&"), param)
    }
}

impl TableView {
    /// Build the view of `table`. `states` holds the current state of every
    /// table on the page so links keep the others as they are.
    pub fn build<T>(
        table: &StatsTable<T>,
        base: &str,
        states: &[(&'static str, TableState)],
    ) -> Self {
        let sortable = &table.table;
        let href = |target: TableState| state_href(base, states, table.param, target);
        let arrow = |column: Option<usize>| sortable.arrow(column).map_or("", |a| a.glyph());

        let mut headers = vec![HeaderView {
            label: "#",
            style: "col-rank",
            href: sortable.header_target(None).map(&href),
            arrow: arrow(None),
        }];
        headers.extend(sortable.columns().iter().enumerate().map(|(i, column)| {
            HeaderView {
                label: column.label,
                style: column.style,
                href: sortable.header_target(Some(i)).map(&href),
                arrow: arrow(Some(i)),
            }
        }));

        let rows = sortable
            .rows()
            .into_iter()
            .map(|row| RowView {
                rank: row.rank,
                cells: row.cells.into_iter().map(CellView::from).collect(),
            })
            .collect();

        let toggle = sortable.has_more().then(|| {
            let state = sortable.state();
            LinkView {
                href: href(state.toggled_extended()),
                label: if state.extended {
                    "Show fewer\u{2026}"
                } else {
                    "Show more\u{2026}"
                },
            }
        });

        Self {
            title: table.title,
            colour: table.colour,
            param: table.param,
            headers,
            rows,
            toggle,
        }
    }
}

/// A row in a year's leg list.
#[derive(Debug, Clone)]
pub struct LegRowView {
    pub href: String,
    pub date: String,
    pub operator: String,
    pub colour: String,
    pub origin: StopView,
    pub destination: StopView,
    pub duration: String,
    pub mileage: String,
}

/// A station name with its time and delay on one side of a leg.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    pub href: String,
    pub time: String,
    pub delay: String,
    pub delay_class: &'static str,
}

impl StopView {
    fn departing(call: &LegCall) -> Self {
        let delay = call.departure_delay();
        Self {
            name: call.station.name.clone(),
            href: format!("/stations/{}", call.station.crs),
            time: format_time(call.act_dep.or(call.plan_dep)),
            delay: delay_text(delay),
            delay_class: delay_class(delay),
        }
    }

    fn arriving(call: &LegCall) -> Self {
        let delay = call.arrival_delay();
        Self {
            name: call.station.name.clone(),
            href: format!("/stations/{}", call.station.crs),
            time: format_time(call.act_arr.or(call.plan_arr)),
            delay: delay_text(delay),
            delay_class: delay_class(delay),
        }
    }

    fn unknown() -> Self {
        Self {
            name: String::new(),
            href: String::new(),
            time: String::new(),
            delay: String::new(),
            delay_class: "",
        }
    }
}

impl LegRowView {
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            href: format!("/legs/{}", leg.id),
            date: format_short_date(Some(leg.start)),
            operator: leg.operator_name().unwrap_or_default().to_string(),
            colour: leg.colour().unwrap_or_default().to_string(),
            origin: leg.origin().map_or_else(StopView::unknown, StopView::departing),
            destination: leg
                .destination()
                .map_or_else(StopView::unknown, StopView::arriving),
            duration: format_duration(leg.duration),
            mileage: format_mileage(leg.distance),
        }
    }
}

/// Build a leg list in date order.
pub fn leg_rows(legs: &[Leg]) -> Vec<LegRowView> {
    let mut sorted: Vec<&Leg> = legs.iter().collect();
    sorted.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
    sorted.into_iter().map(LegRowView::from_leg).collect()
}

#[derive(Debug, Clone)]
pub struct ServiceView {
    pub summary: String,
    pub operator: String,
    pub colour: String,
    pub power: String,
}

#[derive(Debug, Clone)]
pub struct CallView {
    pub station: String,
    pub href: String,
    pub platform: String,
    pub plan_arr: String,
    pub act_arr: String,
    pub arr_delay: String,
    pub arr_class: &'static str,
    pub plan_dep: String,
    pub act_dep: String,
    pub dep_delay: String,
    pub dep_class: &'static str,
    pub mileage: String,
    /// Association or formation change noted at this call.
    pub note: String,
}

impl CallView {
    fn from_call(call: &LegCall) -> Self {
        let arr = call.arrival_delay();
        let dep = call.departure_delay();

        let mut notes = Vec::new();
        if let Some(assoc) = &call.associated_service {
            match assoc.association {
                Some(kind) => notes.push(format!("{} {}", kind.describe(), assoc.id)),
                None => notes.push(format!("Associated with {}", assoc.id)),
            }
        }
        if let Some(stock) = &call.new_stock {
            let reports: Vec<String> = stock.iter().map(ToString::to_string).collect();
            if !reports.is_empty() {
                notes.push(format!("Now {}", reports.join(", ")));
            }
        }

        Self {
            station: call.station.name.clone(),
            href: format!("/stations/{}", call.station.crs),
            platform: call.platform.clone().unwrap_or_default(),
            plan_arr: format_time(call.plan_arr),
            act_arr: format_time(call.act_arr),
            arr_delay: delay_text(arr),
            arr_class: delay_class(arr),
            plan_dep: format_time(call.plan_dep),
            act_dep: format_time(call.act_dep),
            dep_delay: delay_text(dep),
            dep_class: delay_class(dep),
            mileage: call.mileage().map(|m| m.to_string()).unwrap_or_default(),
            note: notes.join("; "),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentView {
    pub start: String,
    pub end: String,
    pub mileage: String,
    pub stock: String,
}

/// Everything shown about one leg.
#[derive(Debug, Clone)]
pub struct LegView {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub year: i32,
    pub distance: String,
    pub duration: String,
    pub services: Vec<ServiceView>,
    pub calls: Vec<CallView>,
    pub segments: Vec<SegmentView>,
}

impl LegView {
    pub fn from_leg(leg: &Leg) -> Self {
        let title = match (leg.origin(), leg.destination()) {
            (Some(from), Some(to)) => format!("{} to {}", from.station.name, to.station.name),
            _ => format!("Leg {}", leg.id),
        };

        let services = leg
            .services
            .iter()
            .map(|service| {
                let presented = service.presented_by();
                ServiceView {
                    summary: service.summary(),
                    operator: presented.name.clone(),
                    colour: presented.bg.clone().unwrap_or_default(),
                    power: service.power.clone().unwrap_or_default(),
                }
            })
            .collect();

        let segments = leg
            .stock
            .iter()
            .map(|segment| SegmentView {
                start: segment.start.name.clone(),
                end: segment.end.name.clone(),
                mileage: format_mileage(segment.mileage),
                stock: segment
                    .stocks
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" + "),
            })
            .collect();

        Self {
            id: leg.id,
            title,
            date: format_long_date(Some(leg.start)),
            year: leg.start.year(),
            distance: leg.mileage().map(|m| m.to_string()).unwrap_or_default(),
            duration: format_duration(leg.duration),
            services,
            calls: leg.calls.iter().map(CallView::from_call).collect(),
            segments,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StationLegView {
    pub href: String,
    pub date: String,
    pub route: String,
    pub operator: String,
    pub platform: String,
    pub arr: String,
    pub arr_delay: String,
    pub arr_class: &'static str,
    pub dep: String,
    pub dep_delay: String,
    pub dep_class: &'static str,
    pub note: &'static str,
}

impl StationLegView {
    fn from_leg(leg: &StationLeg) -> Self {
        let arr = leg.arrival_delay();
        let dep = leg.departure_delay();
        let note = match (leg.starts_here(), leg.finishes_here()) {
            (true, _) => "Boarded",
            (_, true) => "Alighted",
            _ => "",
        };
        Self {
            href: format!("/legs/{}", leg.id),
            date: format_short_date(leg.stop_time.or(leg.plan_arr).or(leg.plan_dep)),
            route: format!("{} to {}", leg.origin.name, leg.destination.name),
            operator: leg.presented_by().name.clone(),
            platform: leg.platform.clone().unwrap_or_default(),
            arr: format_time(leg.act_arr.or(leg.plan_arr)),
            arr_delay: delay_text(arr),
            arr_class: delay_class(arr),
            dep: format_time(leg.act_dep.or(leg.plan_dep)),
            dep_delay: delay_text(dep),
            dep_class: delay_class(dep),
            note,
        }
    }
}

/// Empty when the count was never reported; zero is shown.
fn count_text(count: Option<u32>) -> String {
    count.map(|n| n.to_string()).unwrap_or_default()
}

fn is_web_url(url: &str) -> bool {
    let scheme = url.trim_start().split_once(':').map(|(scheme, _)| scheme);
    matches!(scheme, Some(s) if s.eq_ignore_ascii_case("http") || s.eq_ignore_ascii_case("https"))
}

/// Everything shown about one station.
#[derive(Debug, Clone)]
pub struct StationView {
    pub crs: String,
    pub name: String,
    pub operator: String,
    /// Photo URL, kept only for http(s)
    pub img: Option<String>,
    pub starts: String,
    pub finishes: String,
    pub passes: String,
    pub legs: Vec<StationLegView>,
}

impl StationView {
    pub fn from_station(station: &StationData) -> Self {
        let mut legs: Vec<&StationLeg> = station.legs.iter().collect();
        legs.sort_by(|a, b| a.stop_time.cmp(&b.stop_time).then(a.id.cmp(&b.id)));

        Self {
            crs: station.crs.to_string(),
            name: station.name.clone(),
            operator: station.presented_by().name.clone(),
            img: station.img.as_deref().filter(|url| is_web_url(url)).map(str::to_string),
            starts: count_text(station.starts),
            finishes: count_text(station.finishes),
            passes: count_text(station.passes),
            legs: legs.into_iter().map(StationLegView::from_leg).collect(),
        }
    }
}

/// One line of the station list.
#[derive(Debug, Clone)]
pub struct StationRowView {
    pub crs: String,
    pub name: String,
    pub href: String,
    pub operator: String,
    pub legs: usize,
    pub starts: String,
    pub finishes: String,
    pub passes: String,
}

/// Build the station list, alphabetical by name.
pub fn station_rows(stations: &[StationData]) -> Vec<StationRowView> {
    let mut sorted: Vec<&StationData> = stations.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then(a.crs.cmp(&b.crs)));
    sorted
        .into_iter()
        .map(|station| StationRowView {
            crs: station.crs.to_string(),
            name: station.name.clone(),
            href: format!("/stations/{}", station.crs),
            operator: station.presented_by().name.clone(),
            legs: station.legs.len(),
            starts: count_text(station.starts),
            finishes: count_text(station.finishes),
            passes: count_text(station.passes),
        })
        .collect()
}
