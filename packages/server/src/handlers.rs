//! HTTP handler functions for the arrests dashboard API.

use actix_web::{HttpResponse, web};
use la_arrests_analytics::dashboard::compute_dashboard;
use la_arrests_analytics::selection::{
    SelectionError, apply_event, parse_crime_groups, parse_metric, resolve_precinct,
};
use la_arrests_analytics_models::{Selection, YearRange};
use la_arrests_crime_models::CrimeGroup;
use la_arrests_dataset::Datasets;
use la_arrests_dataset_models::Metric;
use la_arrests_geography_models::{DEFAULT_PRECINCT, MapView};
use la_arrests_server_models::{
    ApiError, ApiHealth, ApiOptions, DashboardEventRequest, DashboardEventResponse,
    DashboardQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the values for every dashboard control.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    let datasets = &state.datasets;
    HttpResponse::Ok().json(ApiOptions {
        metrics: Metric::all().to_vec(),
        crime_groups: CrimeGroup::all().to_vec(),
        present_crime_groups: datasets.crime_groups(),
        year_bounds: datasets.year_bounds(),
        default_precinct: DEFAULT_PRECINCT.to_string(),
        precincts: datasets.precincts().to_vec(),
        map_view: MapView::LOS_ANGELES,
    })
}

/// `GET /api/boundaries`
///
/// Returns the precinct polygons with each feature's `id` set to its
/// precinct id.
pub async fn boundaries(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.datasets.boundaries().feature_collection())
}

/// `GET /api/dashboard`
///
/// Computes every chart for the selection described by the query string.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<DashboardQueryParams>,
) -> HttpResponse {
    let datasets = state.datasets.as_ref();
    let result = selection_from_params(&params, datasets)
        .map_err(Into::into)
        .and_then(|selection| compute_dashboard(datasets, &selection));

    match result {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(e) => bad_request(&e),
    }
}

/// `POST /api/dashboard/events`
///
/// Applies one input event to the client's selection and returns the new
/// selection together with its charts.
pub async fn dashboard_event(
    state: web::Data<AppState>,
    body: web::Json<DashboardEventRequest>,
) -> HttpResponse {
    let datasets = state.datasets.as_ref();
    let DashboardEventRequest { selection, event } = body.into_inner();

    let result = apply_event(&selection, event, datasets)
        .map_err(Into::into)
        .and_then(|selection| {
            compute_dashboard(datasets, &selection)
                .map(|dashboard| DashboardEventResponse {
                    selection,
                    dashboard,
                })
        });

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => bad_request(&e),
    }
}

/// Builds a selection from query parameters, starting from the initial
/// selection for anything omitted.
fn selection_from_params(
    params: &DashboardQueryParams,
    datasets: &Datasets,
) -> Result<Selection, SelectionError> {
    let bounds = datasets.year_bounds();
    let mut selection = Selection::initial(bounds);

    if let Some(metric) = &params.metric {
        selection.metric = parse_metric(metric)?;
    }
    if let Some(groups) = &params.groups {
        selection.crime_groups = parse_crime_groups(groups)?;
    }
    selection.years = YearRange {
        start: params.from.unwrap_or(bounds.min),
        end: params.to.unwrap_or(bounds.max),
    };
    if let Some(precinct) = &params.precinct {
        selection.clicked_precinct = Some(resolve_precinct(precinct, datasets)?);
    }

    Ok(selection)
}

fn bad_request(e: &impl std::fmt::Display) -> HttpResponse {
    log::warn!("Rejected dashboard request: {e}");
    HttpResponse::BadRequest().json(ApiError {
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, test};
    use chrono::{Datelike as _, NaiveDate};
    use la_arrests_crime_models::{DayNight, Sex, Weekday};
    use la_arrests_dataset::records::SummaryRow;
    use la_arrests_dataset_models::{IncidentRecord, MetricTotals};
    use la_arrests_geography::boundaries::PrecinctBoundaries;
    use la_arrests_geography::names::NameNormalizer;
    use la_arrests_geography_models::BoundaryFields;
    use serde_json::{Value, json};

    use super::*;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "APREC": "CENTRAL", "PREC": 1 }, "geometry": null },
            { "type": "Feature", "properties": { "APREC": "TOPANGA", "PREC": 21 }, "geometry": null }
        ]
    }"#;

    fn summary_row(precinct: &str, year: i32, arrests: f64) -> SummaryRow {
        SummaryRow {
            precinct: precinct.to_string(),
            crime_group: CrimeGroup::Robbery,
            year,
            metrics: MetricTotals {
                arrests,
                ..MetricTotals::default()
            },
            sq_mile: 10.0,
            population: 100_000.0,
        }
    }

    fn arrest(id: usize, day: u32) -> IncidentRecord {
        let date = NaiveDate::from_ymd_opt(2020, 3, day).unwrap();
        IncidentRecord {
            id: id.to_string(),
            precinct: "TOPANGA".to_string(),
            crime_group: CrimeGroup::Robbery,
            year: 2020,
            date,
            time: None,
            weekday: Weekday::from_number(
                u8::try_from(date.weekday().number_from_monday()).unwrap(),
            )
            .unwrap(),
            age: Some(25),
            age_group: "25-34".to_string(),
            sex: Sex::Female,
            day_night: DayNight::Night,
            charge_description: "ROBBERY".to_string(),
        }
    }

    fn state() -> web::Data<AppState> {
        let boundaries = PrecinctBoundaries::from_geojson_str(
            BOUNDARIES,
            &BoundaryFields::default(),
            &NameNormalizer::default(),
        )
        .unwrap();
        let summary = vec![
            summary_row("CENTRAL", 2019, 10.0),
            summary_row("CENTRAL", 2020, 15.0),
            summary_row("TOPANGA", 2019, 4.0),
            summary_row("TOPANGA", 2020, 2.0),
        ];
        let incidents = vec![arrest(1, 2), arrest(2, 3), arrest(3, 3)];
        let datasets = Datasets::new(incidents, summary, boundaries).unwrap();
        web::Data::new(AppState {
            datasets: Arc::new(datasets),
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = test::init_service(App::new().configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], json!(true));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
    }

    #[actix_web::test]
    async fn options_describe_controls() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/api/options").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(
            body["metrics"],
            json!(["Arrests", "Arrests_Per_10k_Pop", "Arrests_Per_SqMile"])
        );
        assert_eq!(body["crimeGroups"].as_array().unwrap().len(), 28);
        assert_eq!(body["presentCrimeGroups"], json!(["Robbery"]));
        assert_eq!(body["yearBounds"], json!({ "min": 2019, "max": 2020 }));
        assert_eq!(body["defaultPrecinct"], json!("TOPANGA"));
        assert_eq!(body["precincts"][1]["id"], json!("21"));
        assert_eq!(body["mapView"]["zoom"], json!(8.3));
    }

    #[actix_web::test]
    async fn boundaries_carry_feature_ids() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/api/boundaries").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], json!("FeatureCollection"));
        assert_eq!(body["features"][0]["id"], json!("1"));
    }

    #[actix_web::test]
    async fn dashboard_uses_initial_selection_by_default() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["selection"]["selectedPrecinct"], json!("TOPANGA"));
        assert_eq!(
            body["titles"]["overview"],
            json!("Data: Arrests in LA from 2019 to 2020")
        );
        assert_eq!(body["regional"].as_array().unwrap().len(), 2);
        assert_eq!(body["weekdays"]["bars"].as_array().unwrap().len(), 7);
        assert_eq!(body["categories"][0]["percentage"], json!(100.0));
        // TOPANGA 4 -> 2, CENTRAL 10 -> 15
        assert_eq!(body["percentChange"][0]["precinct"], json!("TOPANGA"));
        assert_eq!(body["percentChange"][0]["percentChange"], json!(-50.0));
        assert_eq!(body["percentChange"][1]["color"], json!("Red"));
    }

    #[actix_web::test]
    async fn dashboard_accepts_filters() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::get()
            .uri("/api/dashboard?metric=Arrests&groups=Burglary&from=2020&to=2020&precinct=central")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["selection"]["selectedPrecinct"], json!("CENTRAL"));
        assert_eq!(body["selection"]["crimeGroups"], json!(["Burglary"]));
        assert_eq!(body["regional"][0]["value"], json!(0.0));
        assert_eq!(body["percentChange"][0]["direction"], json!("undefined"));
        assert_eq!(body["categories"], json!([]));
    }

    #[actix_web::test]
    async fn dashboard_rejects_bad_input() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;

        for uri in [
            "/api/dashboard?from=2020&to=2019",
            "/api/dashboard?from=2010",
            "/api/dashboard?groups=Jaywalking",
            "/api/dashboard?metric=Reports",
            "/api/dashboard?precinct=ATLANTIS",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), 400, "{uri}");
            let body: ApiError = test::read_body_json(resp).await;
            assert!(!body.error.is_empty());
        }
    }

    #[actix_web::test]
    async fn events_return_next_selection() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/dashboard/events")
            .set_json(json!({
                "selection": {
                    "metric": "Arrests",
                    "crimeGroups": ["Robbery"],
                    "years": { "start": 2019, "end": 2020 }
                },
                "event": { "type": "mapClick", "precinct": "21" }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["selection"]["clickedPrecinct"], json!("TOPANGA"));
        assert_eq!(
            body["dashboard"]["titles"]["detail"],
            json!("Data: Arrests in TOPANGA from 2019 to 2020")
        );
        assert_eq!(body["dashboard"]["descriptions"], json!({}));
    }

    #[actix_web::test]
    async fn events_reject_unknown_precinct() {
        let app =
            test::init_service(App::new().app_data(state()).configure(crate::configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/dashboard/events")
            .set_json(json!({
                "selection": {
                    "metric": "Arrests",
                    "crimeGroups": [],
                    "years": { "start": 2019, "end": 2020 }
                },
                "event": { "type": "mapClick", "precinct": "NOWHERE" }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
