//! Shipping diagnostics endpoint.
//!
//! - `GET /api/shipping?items=N` quotes one item count
//! - `GET /api/shipping` runs the reference quotes
//! - `GET /api/shipping/schedule` describes the active schedule

use std::time::Instant;

use http::{Response, StatusCode};
use serde::Serialize;
use wholesale_commerce::shipping::{
    run_reference_fixtures, BoundaryCheck, FixtureResult, ShippingSchedule,
};
use wholesale_core::{Method, RequestContext};
use wholesale_observability::StructuredLogger;

use crate::error::ApiError;
use crate::response::{error_response, json_response};

pub const SHIPPING_PATH: &str = "/api/shipping";
pub const SCHEDULE_PATH: &str = "/api/shipping/schedule";

/// Query parameters accepted for the item count, in lookup order.
const ITEM_PARAMS: [&str; 2] = ["items", "totalItems"];

/// Quote for a single item count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub total_items: i64,
    pub shipping_cost: i64,
    pub explanation: String,
    pub formatted_cost: String,
}

/// Reference quotes evaluated against the active schedule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureBattery {
    pub examples: Vec<FixtureResult>,
    pub all_passed: bool,
}

/// Active schedule and how its tiers meet.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDescription<'a> {
    pub schedule: &'a ShippingSchedule,
    pub boundaries: Vec<BoundaryCheck>,
}

/// Handles the shipping diagnostics routes against one schedule.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticsService {
    schedule: ShippingSchedule,
}

impl DiagnosticsService {
    pub fn new(schedule: ShippingSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &ShippingSchedule {
        &self.schedule
    }

    /// Route a request and build its response. Never fails: errors become
    /// 4xx/5xx JSON bodies.
    pub fn handle(&self, ctx: &RequestContext, logger: &StructuredLogger) -> Response<String> {
        let started = Instant::now();
        logger
            .info_builder("Diagnostics request started")
            .field("method", ctx.method.as_str())
            .field("path", ctx.path.as_str())
            .emit();

        let mut response = match self.route(ctx) {
            Ok(response) => response,
            Err(error) => {
                let builder = if error.status().is_server_error() {
                    logger.error_builder("Diagnostics request failed")
                } else {
                    logger.warn_builder("Diagnostics request rejected")
                };
                builder
                    .field("error", error.to_string())
                    .field_i64("status", i64::from(error.status().as_u16()))
                    .emit();
                error_response(&error, &ctx.request_id)
            }
        };

        if ctx.method == Method::Head {
            response.body_mut().clear();
        }

        logger
            .info_builder("Diagnostics request complete")
            .field_i64("status", i64::from(response.status().as_u16()))
            .duration_ms("duration_ms", started.elapsed())
            .emit();

        response
    }

    fn route(&self, ctx: &RequestContext) -> Result<Response<String>, ApiError> {
        let known = ctx.path == SHIPPING_PATH || ctx.path == SCHEDULE_PATH;
        if !known {
            return Err(ApiError::NotFound(ctx.path.clone()));
        }
        if !matches!(ctx.method, Method::Get | Method::Head) {
            return Err(ApiError::MethodNotAllowed(ctx.method.to_string()));
        }

        if ctx.path == SCHEDULE_PATH {
            return Ok(json_response(
                StatusCode::OK,
                &ctx.request_id,
                &self.describe_schedule(),
            ));
        }

        match item_param(ctx) {
            Some(raw) => {
                let total_items = parse_item_count(raw)?;
                Ok(json_response(
                    StatusCode::OK,
                    &ctx.request_id,
                    &self.quote(total_items),
                ))
            }
            None => Ok(json_response(
                StatusCode::OK,
                &ctx.request_id,
                &self.fixture_battery(),
            )),
        }
    }

    /// Quote one item count.
    pub fn quote(&self, total_items: i64) -> ShippingQuote {
        let details = self.schedule.details(total_items);
        ShippingQuote {
            total_items,
            shipping_cost: self.schedule.cost_for(total_items),
            formatted_cost: details.formatted_cost(),
            explanation: details.explanation,
        }
    }

    /// Run the reference quotes.
    pub fn fixture_battery(&self) -> FixtureBattery {
        let report = run_reference_fixtures(&self.schedule);
        FixtureBattery {
            all_passed: report.all_passed(),
            examples: report.results,
        }
    }

    pub fn describe_schedule(&self) -> ScheduleDescription<'_> {
        ScheduleDescription {
            schedule: &self.schedule,
            boundaries: self.schedule.boundary_checks(),
        }
    }
}

fn item_param(ctx: &RequestContext) -> Option<&str> {
    ITEM_PARAMS.iter().find_map(|name| ctx.query_param(name))
}

/// Parse an item count from a query value. Only integers are accepted;
/// negative values are valid and quote as zero.
pub fn parse_item_count(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidItemCount {
            value: raw.to_string(),
        })
}
