//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Leg;

/// Table states carried in a year page's query string, one per table.
///
/// Values use the `TableState` encoding, e.g. `?stations=4:reverse:all`.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub legs: Option<String>,
    pub stations: Option<String>,
    pub operators: Option<String>,
    pub classes: Option<String>,
    pub units: Option<String>,
}

/// GeoJSON feature collection of leg routes.
#[derive(Debug, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub geometry: LineString,
    pub properties: FeatureProperties,
}

#[derive(Debug, Serialize)]
pub struct LineString {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize)]
pub struct FeatureProperties {
    pub id: i64,
    pub colour: Option<String>,
}

impl FeatureCollection {
    /// Routes of the legs that have a geometry, in the order given.
    pub fn from_legs<'a>(legs: impl IntoIterator<Item = &'a Leg>) -> Self {
        let features = legs
            .into_iter()
            .filter_map(|leg| {
                let line = leg.geometry.as_ref()?;
                Some(Feature {
                    kind: "Feature",
                    geometry: LineString {
                        kind: "LineString",
                        coordinates: line.iter().map(|&(x, y)| [x, y]).collect(),
                    },
                    properties: FeatureProperties {
                        id: leg.id,
                        colour: leg.colour().map(str::to_string),
                    },
                })
            })
            .collect();

        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
