//! Monthly route cost projection.
//!
//! Resolves the primary commute and any additional trips from the base
//! address, then projects monthly distance, fuel and cost.
//!
//! The primary route is mandatory: if it cannot be resolved the whole
//! estimate fails, naming the endpoint at fault. Additional trips are
//! best-effort: a trip that cannot be resolved is recorded as skipped and
//! contributes nothing to the totals.
//!
//! Lookups run one after another, never concurrently, so network-bound
//! geocodes respect the service's one-request-per-second policy.

use tracing::{debug, info, warn};

use crate::domain::{Coordinates, round_to};
use crate::geocode::AddressResolver;
use crate::routing::{RouteSummary, RoutingService};

use super::config::EstimatorConfig;
use super::error::{Endpoint, EstimateError};
use super::model::{
    AdditionalTrip, CostEstimate, EstimateRequest, LegOutcome, LimitComparison, RouteLeg,
    SkippedTrip,
};

/// Validated numeric inputs.
#[derive(Debug, Clone, Copy)]
struct Pricing {
    consumption_km_per_liter: f64,
    fuel_price_per_liter: f64,
}

impl Pricing {
    /// Fuel cost of driving `distance_km` once.
    fn trip_cost(&self, distance_km: f64) -> f64 {
        distance_km / self.consumption_km_per_liter * self.fuel_price_per_liter
    }

    /// Unrounded leg for a route driven `trips` times a month.
    fn leg(&self, route: RouteSummary, trips: f64, origin: &str, destination: &str) -> RouteLeg {
        let cost_per_trip = self.trip_cost(route.distance_km);
        RouteLeg {
            origin_label: origin.to_string(),
            destination_label: destination.to_string(),
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            trips_per_month: trips,
            monthly_distance_km: route.distance_km * trips,
            cost_per_trip,
            monthly_cost: cost_per_trip * trips,
        }
    }
}

/// Estimates monthly route costs.
pub struct CostEstimator<A, R> {
    resolver: A,
    router: R,
    config: EstimatorConfig,
}

impl<A: AddressResolver, R: RoutingService> CostEstimator<A, R> {
    /// Create an estimator.
    pub fn new(resolver: A, router: R, config: EstimatorConfig) -> Self {
        Self {
            resolver,
            router,
            config,
        }
    }

    /// Access the address resolver.
    pub fn resolver(&self) -> &A {
        &self.resolver
    }

    /// Produce a monthly cost estimate.
    ///
    /// All inputs are validated before any lookup. Figures are computed at
    /// full precision and rounded once at the end.
    pub async fn estimate(&self, req: &EstimateRequest) -> Result<CostEstimate, EstimateError> {
        let consumption = req.vehicle.consumption_rate()?;
        let (working_days, daily_frequency) = self.validate(req)?;
        let pricing = Pricing {
            consumption_km_per_liter: consumption,
            fuel_price_per_liter: req.fuel_price_per_liter,
        };

        let swept = self.resolver.sweep_stale();
        if swept > 0 {
            debug!(swept, "removed stale geocode entries before estimate");
        }

        // Primary route: any failure aborts
        let base = self
            .resolver
            .resolve(&req.base_address)
            .await
            .map_err(|e| EstimateError::from_geocode(Endpoint::Base, &req.base_address, e))?;
        let destination = self
            .resolver
            .resolve(&req.primary_destination)
            .await
            .map_err(|e| {
                EstimateError::from_geocode(Endpoint::Destination, &req.primary_destination, e)
            })?;
        let route = self.router.route(base, destination).await?;

        // Inbound and outbound each run daily_frequency times a working day
        let primary_trips = f64::from(working_days) * daily_frequency * 2.0;
        let primary = pricing.leg(
            route,
            primary_trips,
            &req.base_address,
            &req.primary_destination,
        );

        // Additional trips: failures are skipped
        let mut additional = Vec::new();
        let mut skipped = Vec::new();
        for trip in &req.additional_trips {
            match self.additional_leg(base, trip, &req.base_address, pricing).await {
                LegOutcome::Included(leg) => additional.push(leg),
                LegOutcome::Skipped(skip) => {
                    warn!(
                        destination = %skip.destination,
                        reason = %skip.reason,
                        "skipping additional trip"
                    );
                    skipped.push(skip);
                }
            }
        }

        let total_distance: f64 = primary.monthly_distance_km
            + additional.iter().map(|l| l.monthly_distance_km).sum::<f64>();
        let base_cost: f64 =
            primary.monthly_cost + additional.iter().map(|l| l.monthly_cost).sum::<f64>();
        let fuel_liters = total_distance / consumption;
        let margin_amount = base_cost * req.safety_margin_percent / 100.0;
        let cost_with_margin = base_cost + margin_amount;

        // A zero limit means no limit was set
        let limit = req.spending_limit.filter(|&l| l > 0.0).map(|limit| {
            let difference = limit - cost_with_margin;
            LimitComparison {
                limit: round_to(limit, 2),
                difference: round_to(difference, 2),
                percentage: round_to(difference / limit * 100.0, 2),
            }
        });

        let estimate = CostEstimate {
            cost_center: req.cost_center.clone(),
            vehicle: req.vehicle.description.clone(),
            consumption_km_per_liter: consumption,
            fuel_price_per_liter: req.fuel_price_per_liter,
            safety_margin_percent: req.safety_margin_percent,
            primary: primary.rounded(),
            additional_trips: additional.iter().map(RouteLeg::rounded).collect(),
            skipped_trips: skipped,
            total_monthly_distance_km: round_to(total_distance, 1),
            fuel_liters: round_to(fuel_liters, 1),
            base_cost: round_to(base_cost, 2),
            margin_amount: round_to(margin_amount, 2),
            cost_with_margin: round_to(cost_with_margin, 2),
            limit,
        };

        info!(
            cost_center = estimate.cost_center.as_deref().unwrap_or("-"),
            distance_km = estimate.total_monthly_distance_km,
            cost = estimate.cost_with_margin,
            skipped = estimate.skipped_trips.len(),
            "estimate complete"
        );

        Ok(estimate)
    }

    /// Resolve and cost one additional trip from the already-resolved base.
    async fn additional_leg(
        &self,
        base: Coordinates,
        trip: &AdditionalTrip,
        base_label: &str,
        pricing: Pricing,
    ) -> LegOutcome {
        let skip = |reason: String| {
            LegOutcome::Skipped(SkippedTrip {
                destination_label: trip.display_label().to_string(),
                destination: trip.destination.clone(),
                reason,
            })
        };

        let destination = match self.resolver.resolve(&trip.destination).await {
            Ok(coords) => coords,
            Err(e) => return skip(e.to_string()),
        };

        let route = match self.router.route(base, destination).await {
            Ok(route) => route,
            Err(e) => return skip(e.to_string()),
        };

        // Round trips each week, both directions
        let trips = trip.weekly_frequency * self.config.weeks_per_month * 2.0;
        LegOutcome::Included(pricing.leg(route, trips, base_label, trip.display_label()))
    }

    /// Check numeric inputs and fill schedule defaults.
    fn validate(&self, req: &EstimateRequest) -> Result<(u32, f64), EstimateError> {
        non_negative("fuel price per liter", req.fuel_price_per_liter)?;
        non_negative("safety margin percent", req.safety_margin_percent)?;

        let working_days = req
            .working_days_per_month
            .unwrap_or(self.config.working_days_per_month);
        let daily_frequency = req.daily_frequency.unwrap_or(self.config.daily_frequency);
        non_negative("daily frequency", daily_frequency)?;

        for trip in &req.additional_trips {
            non_negative("weekly frequency", trip.weekly_frequency)?;
        }

        if let Some(limit) = req.spending_limit
            && (!limit.is_finite() || limit < 0.0)
        {
            return Err(EstimateError::InvalidInput(format!(
                "spending limit must not be negative, got {limit}"
            )));
        }

        Ok((working_days, daily_frequency))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), EstimateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EstimateError::InvalidInput(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}
