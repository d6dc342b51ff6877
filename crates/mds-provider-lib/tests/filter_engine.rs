use mds_provider_lib::{
    filter, BoundingBox, Geometry, Record, RecordFilter, SampleDataSource, TimeRange, Trip,
    TripSource, Vehicle, VehicleSource,
};

const NOW: i64 = 1_700_000_000_000;

fn fleet() -> Vec<Vehicle> {
    SampleDataSource::new("provider")
        .vehicles(NOW)
        .expect("sample vehicles")
}

fn vehicle_at(device_id: &str, lon: f64, lat: f64) -> Vehicle {
    let mut vehicle = fleet().remove(0);
    vehicle.device_id = device_id.to_string();
    vehicle.current_location = Geometry::point(lon, lat);
    vehicle
}

fn trips_from(start: i64) -> Vec<Trip> {
    SampleDataSource::new("provider")
        .trips(&TimeRange::new(start, i64::MAX))
        .expect("sample trips")
}

#[test]
fn empty_filter_is_identity() {
    let vehicles = fleet();
    let filtered = filter(&vehicles, &RecordFilter::default());
    assert_eq!(filtered, vehicles);
}

#[test]
fn filtering_preserves_order_and_input() {
    let vehicles = fleet();
    let snapshot = vehicles.clone();
    let criteria = RecordFilter::default().with_updated_since(NOW - 20 * 60_000);

    let filtered = filter(&vehicles, &criteria);

    assert_eq!(vehicles, snapshot);
    let ids: Vec<&str> = filtered.iter().map(|v| v.device_id.as_str()).collect();
    assert_eq!(ids, vec!["vehicle_002", "vehicle_003"]);
}

#[test]
fn composed_filters_commute() {
    let vehicles = fleet();
    let bbox: BoundingBox = "-122.43,37.76,-122.40,37.79".parse().unwrap();
    let by_box = RecordFilter::default().with_bbox(bbox);
    let by_watermark = RecordFilter::default().with_updated_since(NOW - 30 * 60_000);
    let both = RecordFilter::default()
        .with_bbox(bbox)
        .with_updated_since(NOW - 30 * 60_000);

    let box_then_watermark = filter(&filter(&vehicles, &by_box), &by_watermark);
    let watermark_then_box = filter(&filter(&vehicles, &by_watermark), &by_box);
    let combined = filter(&vehicles, &both);

    assert_eq!(box_then_watermark, combined);
    assert_eq!(watermark_then_box, combined);
    assert!(!combined.is_empty());
}

#[test]
fn bbox_includes_inside_and_excludes_outside() {
    let vehicles = vec![
        vehicle_at("inside", -122.415, 37.775),
        vehicle_at("outside", -122.43, 37.77),
    ];
    let bbox: BoundingBox = "-122.42,37.77,-122.41,37.78".parse().unwrap();

    let filtered = filter(&vehicles, &RecordFilter::default().with_bbox(bbox));

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].device_id, "inside");
}

#[test]
fn trip_matches_bbox_on_either_endpoint() {
    let trips = trips_from(0);
    // Contains only the end point of the first trip.
    let bbox: BoundingBox = "-122.4165,37.7778,-122.4163,37.7780".parse().unwrap();

    let filtered = filter(&trips, &RecordFilter::default().with_bbox(bbox));

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].device_id, "vehicle_001");
}

#[test]
fn time_range_lower_bound_is_inclusive() {
    let trips = trips_from(0);
    let first_start = trips[0].start_time().unwrap();

    let inclusive = RecordFilter::default().with_time_range(TimeRange::new(first_start, i64::MAX));
    assert_eq!(filter(&trips, &inclusive).len(), 2);

    let above = RecordFilter::default().with_time_range(TimeRange::new(first_start + 1, i64::MAX));
    let kept = filter(&trips, &above);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].device_id, "vehicle_002");
}

#[test]
fn one_millisecond_below_start_is_excluded() {
    let mut trips = trips_from(0);
    let boundary = 10_000;
    trips[0].start_time = boundary - 1;
    trips[1].start_time = boundary;

    let criteria = RecordFilter::default().with_time_range(TimeRange::new(boundary, i64::MAX));
    let kept = filter(&trips, &criteria);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].start_time, boundary);
}

#[test]
fn device_filter_is_exact_match() {
    let trips = trips_from(0);

    let exact = filter(&trips, &RecordFilter::default().with_device_id("vehicle_002"));
    assert_eq!(exact.len(), 1);

    let prefix = filter(&trips, &RecordFilter::default().with_device_id("vehicle_00"));
    assert!(prefix.is_empty());
}

#[test]
fn criteria_skip_records_without_the_attribute() {
    // Vehicles have no start time, so a time range never excludes them.
    let vehicles = fleet();
    let criteria = RecordFilter::default().with_time_range(TimeRange::new(0, 1));
    assert_eq!(filter(&vehicles, &criteria).len(), vehicles.len());
}
