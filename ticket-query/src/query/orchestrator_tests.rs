//! Unit and end-to-end tests for the ticket query orchestrator.

use super::*;
use crate::domain::{RawRecordBuilder, Route, SeatClass, StationCode, TravelDate};
use crate::stations::{StationClient, StationClientConfig, StationDirectory, StationError};
use crate::testing::{MockUpstream, ProbeReply};
use crate::upstream::{
    DEFAULT_QUERY_PATH, LeftTicketClient, LeftTicketConfig, LeftTicketData, LeftTicketResponse,
    QueryError, TrainSource,
};
use std::sync::{Arc, Mutex};

fn date() -> TravelDate {
    "2019-01-09".parse().unwrap()
}

fn directory() -> Arc<StationDirectory> {
    Arc::new(StationDirectory::from_entries([
        ("广州", StationCode::parse("GZQ").unwrap()),
        ("茂名", StationCode::parse("MHQ").unwrap()),
    ]))
}

fn k123() -> String {
    RawRecordBuilder::new("K123")
        .seat(SeatClass::HardSeat, "50")
        .depart("20190109", "10:00")
        .build()
}

/// In-memory source for testing.
struct MockSource {
    endpoint: Result<String, u16>,
    results: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockSource {
    fn new(results: Vec<String>) -> Self {
        Self {
            endpoint: Ok(DEFAULT_QUERY_PATH.to_string()),
            results,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn failing_probe(status: u16) -> Self {
        Self {
            endpoint: Err(status),
            ..Self::new(Vec::new())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrainSource for &MockSource {
    async fn resolve_endpoint(
        &self,
        route: &Route,
        _date: TravelDate,
    ) -> Result<String, QueryError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("probe {}-{}", route.from.code, route.to.code));
        self.endpoint
            .clone()
            .map_err(|status| QueryError::EndpointResolution { status })
    }

    async fn fetch_trips(
        &self,
        endpoint: &str,
        _route: &Route,
        _date: TravelDate,
    ) -> Result<LeftTicketResponse, QueryError> {
        self.calls.lock().unwrap().push(format!("fetch {endpoint}"));
        Ok(LeftTicketResponse {
            data: LeftTicketData {
                result: self.results.clone(),
            },
        })
    }
}

#[tokio::test]
async fn single_on_sale_train_is_returned() {
    let source = MockSource::new(vec![k123()]);
    let query = TicketQuery::new(directory(), &source);

    let trains = query.filtered_trains(date(), "广州", "茂名").await.unwrap();
    assert_eq!(trains, vec!["K123"]);
    assert_eq!(
        source.calls(),
        vec!["probe GZQ-MHQ", "fetch leftTicket/queryA"]
    );
}

#[tokio::test]
async fn unknown_station_fails_before_any_request() {
    let source = MockSource::new(vec![k123()]);
    let query = TicketQuery::new(directory(), &source);

    let err = query
        .filtered_trains(date(), "广州", "火星")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TicketError::Station(StationError::UnknownStation { ref name }) if name == "火星"
    ));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn failed_probe_stops_the_query() {
    let source = MockSource::failing_probe(500);
    let query = TicketQuery::new(directory(), &source);

    let err = query
        .filtered_trains(date(), "广州", "茂名")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TicketError::Query(QueryError::EndpointResolution { status: 500 })
    ));
    assert_eq!(source.calls(), vec!["probe GZQ-MHQ"]);
}

#[tokio::test]
async fn filters_and_keeps_listing_order() {
    let source = MockSource::new(vec![
        RawRecordBuilder::new("G9")
            .seat(SeatClass::SecondClass, "有")
            .depart("20190109", "17:30")
            .build(),
        RawRecordBuilder::new("K1")
            .seat(SeatClass::HardSeat, "无")
            .seat(SeatClass::SecondClass, "")
            .build(),
        RawRecordBuilder::new("T2")
            .seat(SeatClass::HardSeat, "3")
            .depart("20190109", "06:15")
            .build(),
        RawRecordBuilder::new("Z5").can_buy("N").build(),
        RawRecordBuilder::new("K7")
            .seat(SeatClass::HardSeat, "12")
            .depart("20190109", "08:00")
            .build(),
    ]);
    let query = TicketQuery::new(directory(), &source);

    let trains = query.filtered_trains(date(), "广州", "茂名").await.unwrap();
    assert_eq!(trains, vec!["G9", "K7"]);

    let report = query.trips(date(), "广州", "茂名").await.unwrap();
    assert_eq!(report.trips.len(), 4);
    assert_eq!(report.skipped_not_on_sale, 1);
}

#[tokio::test]
async fn custom_filter_is_applied() {
    let source = MockSource::new(vec![
        RawRecordBuilder::new("Z1")
            .seat(SeatClass::HardSleeper, "8")
            .depart("20190109", "21:00")
            .build(),
    ]);
    let filter = FilterConfig::new(
        vec![SeatClass::HardSleeper],
        chrono::NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        chrono::NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
    );
    let query = TicketQuery::new(directory(), &source).with_filter(filter);

    let trains = query.filtered_trains(date(), "广州", "茂名").await.unwrap();
    assert_eq!(trains, vec!["Z1"]);
}

async fn live_query(upstream: &MockUpstream) -> TicketQuery<LeftTicketClient> {
    let station_client =
        StationClient::new(StationClientConfig::new().with_url(upstream.station_url())).unwrap();
    let stations = StationDirectory::load(&station_client).await.unwrap();
    let client =
        LeftTicketClient::new(LeftTicketConfig::new().with_base_url(upstream.base_url())).unwrap();
    TicketQuery::new(Arc::new(stations), client)
}

#[tokio::test]
async fn end_to_end_probe_ok_uses_default_endpoint() {
    let upstream = MockUpstream::builder()
        .probe(ProbeReply::Ok)
        .results(vec![k123()])
        .start()
        .await;
    let query = live_query(&upstream).await;

    let trains = query.filtered_trains(date(), "广州", "茂名").await.unwrap();
    assert_eq!(trains, vec!["K123"]);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.starts_with("/otn/leftTicket/queryA?")));
}

#[tokio::test]
async fn end_to_end_redirect_targets_c_url() {
    let upstream = MockUpstream::builder()
        .probe(ProbeReply::Redirect("leftTicket/queryB".into()))
        .results(vec![k123()])
        .start()
        .await;
    let query = live_query(&upstream).await;

    let trains = query.filtered_trains(date(), "广州", "茂名").await.unwrap();
    assert_eq!(trains, vec!["K123"]);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("/otn/leftTicket/queryA?"));
    assert_eq!(
        requests[1],
        "/otn/leftTicket/queryB?leftTicketDTO.train_date=2019-01-09\
         &leftTicketDTO.from_station=GZQ&leftTicketDTO.to_station=MHQ&purpose_codes=ADULT"
    );
}

#[tokio::test]
async fn end_to_end_unrecognised_probe_status_is_fatal() {
    let upstream = MockUpstream::builder()
        .probe(ProbeReply::Status(403))
        .results(vec![k123()])
        .start()
        .await;
    let query = live_query(&upstream).await;

    let err = query
        .filtered_trains(date(), "广州", "茂名")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TicketError::Query(QueryError::EndpointResolution { status: 403 })
    ));
    assert_eq!(upstream.requests().len(), 1);
}

#[tokio::test]
async fn directory_load_fails_on_error_status() {
    let upstream = MockUpstream::builder()
        .station_status(503)
        .station_table("Service Unavailable")
        .start()
        .await;
    let station_client =
        StationClient::new(StationClientConfig::new().with_url(upstream.station_url())).unwrap();

    let err = StationDirectory::load(&station_client).await.unwrap_err();
    assert!(matches!(
        err,
        StationError::Api { status: 503, ref message } if message == "Service Unavailable"
    ));
    assert!(err.is_load_failure());
}

#[tokio::test]
async fn directory_load_fails_on_bad_table() {
    let upstream = MockUpstream::builder()
        .station_table("<html>maintenance</html>")
        .start()
        .await;
    let station_client =
        StationClient::new(StationClientConfig::new().with_url(upstream.station_url())).unwrap();

    let err = StationDirectory::load(&station_client).await.unwrap_err();
    assert!(err.is_load_failure());
}
