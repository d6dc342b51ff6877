//! Query-string parameters and per-endpoint query parsing.
//!
//! Mandatory parameters are checked here, before any data-source access, so
//! a missing or malformed value short-circuits the request with a client
//! error. Optional filter parameters are delegated to
//! [`RecordFilter::from_params`] and fail open.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::filter::{RecordFilter, TimeRange};
use crate::model::Timestamp;

pub const PARAM_START_TIME: &str = "start_time";
pub const PARAM_END_TIME: &str = "end_time";
pub const PARAM_START_DATE: &str = "start_date";
pub const PARAM_BBOX: &str = "bbox";
pub const PARAM_DEVICE_ID: &str = "device_id";
pub const PARAM_LAST_UPDATED: &str = "last_updated";

/// Query-string parameters of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Look up a parameter. Empty values count as absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Look up a mandatory parameter.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::missing_parameter(name))
    }

    /// Parameter names, for logging without values.
    pub fn names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn parse_timestamp(name: &str, value: &str) -> Result<Timestamp> {
    value
        .trim()
        .parse::<Timestamp>()
        .map_err(|_| Error::MalformedTimestamp {
            name: name.to_string(),
            value: value.to_string(),
        })
}

impl TimeRange {
    /// Parse the mandatory `start_time` and optional `end_time` parameters.
    ///
    /// `end_time` defaults to `now_ms` when absent.
    pub fn from_params(params: &QueryParams, now_ms: Timestamp) -> Result<Self> {
        let start = parse_timestamp(PARAM_START_TIME, params.require(PARAM_START_TIME)?)?;
        let end = match params.get(PARAM_END_TIME) {
            Some(raw) => parse_timestamp(PARAM_END_TIME, raw)?,
            None => now_ms,
        };
        Ok(Self::new(start, end))
    }
}

/// Parsed `/vehicles` query: optional filters only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclesQuery {
    pub filter: RecordFilter,
}

impl VehiclesQuery {
    pub fn parse(params: &QueryParams) -> Self {
        // Skipped filters are already logged by the parser.
        let (filter, _skipped) = RecordFilter::from_params(params);
        Self { filter }
    }
}

/// Parsed `/trips` or `/events` query: a mandatory time window plus optional filters.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedQuery {
    pub window: TimeRange,
    pub filter: RecordFilter,
}

impl WindowedQuery {
    pub fn parse(params: &QueryParams, now_ms: Timestamp) -> Result<Self> {
        let window = TimeRange::from_params(params, now_ms)?;
        let (filter, _skipped) = RecordFilter::from_params(params);
        Ok(Self {
            window,
            filter: filter.with_time_range(window),
        })
    }
}

/// Parsed `/reports` query.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportsQuery {
    /// Reporting month as supplied by the caller (`YYYY-MM`).
    pub start_date: String,
    pub filter: RecordFilter,
}

impl ReportsQuery {
    pub fn parse(params: &QueryParams) -> Result<Self> {
        let start_date = params.require(PARAM_START_DATE)?.to_string();
        let (filter, _skipped) = RecordFilter::from_params(params);
        Ok(Self { start_date, filter })
    }
}
