//! Per-resource fetch-and-filter operations.
//!
//! Each function validates mandatory parameters first, then reads the
//! source, then applies the filter engine. A client error therefore never
//! touches the data source.

use tracing::debug;

use crate::error::Result;
use crate::filter::filter;
use crate::model::{Event, Report, Timestamp, Trip, Vehicle};
use crate::query::{QueryParams, ReportsQuery, VehiclesQuery, WindowedQuery};
use crate::source::{EventSource, ReportSource, TripSource, VehicleSource};

pub fn list_vehicles<S>(source: &S, params: &QueryParams, now_ms: Timestamp) -> Result<Vec<Vehicle>>
where
    S: VehicleSource + ?Sized,
{
    let query = VehiclesQuery::parse(params);
    let vehicles = source.vehicles(now_ms)?;
    debug!(fetched = vehicles.len(), "filtering vehicles");
    Ok(filter(&vehicles, &query.filter))
}

pub fn list_trips<S>(source: &S, params: &QueryParams, now_ms: Timestamp) -> Result<Vec<Trip>>
where
    S: TripSource + ?Sized,
{
    let query = WindowedQuery::parse(params, now_ms)?;
    let trips = source.trips(&query.window)?;
    debug!(fetched = trips.len(), "filtering trips");
    Ok(filter(&trips, &query.filter))
}

pub fn list_events<S>(source: &S, params: &QueryParams, now_ms: Timestamp) -> Result<Vec<Event>>
where
    S: EventSource + ?Sized,
{
    let query = WindowedQuery::parse(params, now_ms)?;
    let events = source.events(&query.window)?;
    Ok(filter(&events, &query.filter))
}

pub fn list_reports<S>(source: &S, params: &QueryParams) -> Result<Vec<Report>>
where
    S: ReportSource + ?Sized,
{
    let query = ReportsQuery::parse(params)?;
    let reports = source.reports(&query.start_date)?;
    Ok(filter(&reports, &query.filter))
}
