//! Estimate inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::domain::round_to;

use super::error::EstimateError;

/// The vehicle being costed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleConfig {
    /// Free-text identification (plate, model)
    #[serde(default)]
    pub description: String,

    /// Fuel consumption in kilometers per liter
    pub consumption_km_per_liter: Option<f64>,
}

impl VehicleConfig {
    /// Create a vehicle with a known consumption rate.
    pub fn new(description: impl Into<String>, consumption_km_per_liter: f64) -> Self {
        Self {
            description: description.into(),
            consumption_km_per_liter: Some(consumption_km_per_liter),
        }
    }

    /// The consumption rate, if present, finite and positive.
    pub fn consumption_rate(&self) -> Result<f64, EstimateError> {
        match self.consumption_km_per_liter {
            None => Err(EstimateError::InvalidVehicleConfig(
                "fuel consumption rate is missing".to_string(),
            )),
            Some(rate) if !rate.is_finite() || rate <= 0.0 => {
                Err(EstimateError::InvalidVehicleConfig(format!(
                    "fuel consumption rate must be positive, got {rate}"
                )))
            }
            Some(rate) => Ok(rate),
        }
    }
}

/// An optional trip from the base, repeated a number of times per week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalTrip {
    /// Display label; the destination address is used when absent
    #[serde(default)]
    pub label: Option<String>,

    /// Destination address or literal `"lat,lng"`
    pub destination: String,

    /// Round trips per week
    pub weekly_frequency: f64,
}

impl AdditionalTrip {
    /// Create a trip to `destination` made `weekly_frequency` times a week.
    pub fn new(destination: impl Into<String>, weekly_frequency: f64) -> Self {
        Self {
            label: None,
            destination: destination.into(),
            weekly_frequency,
        }
    }

    /// Set a display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label shown on the resulting leg.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.destination)
    }
}

/// A request for a monthly route cost projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Cost-center / project code the estimate is filed under
    #[serde(default)]
    pub cost_center: Option<String>,

    pub vehicle: VehicleConfig,

    /// Where every trip starts
    pub base_address: String,

    /// The mandatory daily commute destination
    pub primary_destination: String,

    #[serde(default)]
    pub additional_trips: Vec<AdditionalTrip>,

    pub fuel_price_per_liter: f64,

    #[serde(default)]
    pub safety_margin_percent: f64,

    /// Defaults to the estimator's configured working days (22)
    #[serde(default)]
    pub working_days_per_month: Option<u32>,

    /// Round trips per working day; defaults to the configured value (2)
    #[serde(default)]
    pub daily_frequency: Option<f64>,

    /// Current monthly spending limit to compare against
    #[serde(default)]
    pub spending_limit: Option<f64>,
}

impl EstimateRequest {
    /// Create a request with no additional trips, no margin and no limit.
    pub fn new(
        vehicle: VehicleConfig,
        base_address: impl Into<String>,
        primary_destination: impl Into<String>,
        fuel_price_per_liter: f64,
    ) -> Self {
        Self {
            cost_center: None,
            vehicle,
            base_address: base_address.into(),
            primary_destination: primary_destination.into(),
            additional_trips: Vec::new(),
            fuel_price_per_liter,
            safety_margin_percent: 0.0,
            working_days_per_month: None,
            daily_frequency: None,
            spending_limit: None,
        }
    }

    /// Add an optional trip.
    pub fn with_trip(mut self, trip: AdditionalTrip) -> Self {
        self.additional_trips.push(trip);
        self
    }

    /// Set the safety margin percentage.
    pub fn with_margin(mut self, percent: f64) -> Self {
        self.safety_margin_percent = percent;
        self
    }

    /// Set the commute schedule.
    pub fn with_schedule(mut self, working_days: u32, daily_frequency: f64) -> Self {
        self.working_days_per_month = Some(working_days);
        self.daily_frequency = Some(daily_frequency);
        self
    }

    /// Set the spending limit to compare against.
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.spending_limit = Some(limit);
        self
    }

    /// Set the cost-center code.
    pub fn with_cost_center(mut self, code: impl Into<String>) -> Self {
        self.cost_center = Some(code.into());
        self
    }
}

/// One costed route from the base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteLeg {
    pub origin_label: String,
    pub destination_label: String,
    pub distance_km: f64,
    pub duration_min: u32,
    /// Single-leg trips per month, inbound and outbound combined
    pub trips_per_month: f64,
    pub monthly_distance_km: f64,
    pub cost_per_trip: f64,
    pub monthly_cost: f64,
}

impl RouteLeg {
    /// Copy with reported precision: distances to one decimal, currency
    /// and trip counts to two.
    pub fn rounded(&self) -> Self {
        Self {
            origin_label: self.origin_label.clone(),
            destination_label: self.destination_label.clone(),
            distance_km: round_to(self.distance_km, 1),
            duration_min: self.duration_min,
            trips_per_month: round_to(self.trips_per_month, 2),
            monthly_distance_km: round_to(self.monthly_distance_km, 1),
            cost_per_trip: round_to(self.cost_per_trip, 2),
            monthly_cost: round_to(self.monthly_cost, 2),
        }
    }
}

/// An additional trip left out of the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTrip {
    pub destination_label: String,
    pub destination: String,
    pub reason: String,
}

/// How one additional trip fared.
#[derive(Debug, Clone, PartialEq)]
pub enum LegOutcome {
    Included(RouteLeg),
    Skipped(SkippedTrip),
}

/// Cost compared to an existing monthly limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitComparison {
    pub limit: f64,
    /// `limit - cost_with_margin`; negative means over budget
    pub difference: f64,
    /// `difference / limit * 100`
    pub percentage: f64,
}

/// A monthly route cost projection.
///
/// Built once per request and never modified; recalculating produces a new
/// estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub cost_center: Option<String>,
    pub vehicle: String,
    pub consumption_km_per_liter: f64,
    pub fuel_price_per_liter: f64,
    pub safety_margin_percent: f64,
    pub primary: RouteLeg,
    pub additional_trips: Vec<RouteLeg>,
    pub skipped_trips: Vec<SkippedTrip>,
    pub total_monthly_distance_km: f64,
    pub fuel_liters: f64,
    pub base_cost: f64,
    pub margin_amount: f64,
    pub cost_with_margin: f64,
    pub limit: Option<LimitComparison>,
}

impl CostEstimate {
    /// Every leg, primary first.
    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> {
        std::iter::once(&self.primary).chain(self.additional_trips.iter())
    }

    /// Whether any additional trip was dropped.
    pub fn has_skipped_trips(&self) -> bool {
        !self.skipped_trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumption_rate_validation() {
        assert_eq!(VehicleConfig::new("van", 9.5).consumption_rate().unwrap(), 9.5);

        let missing = VehicleConfig::default();
        assert!(matches!(
            missing.consumption_rate(),
            Err(EstimateError::InvalidVehicleConfig(_))
        ));

        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert!(
                VehicleConfig::new("van", bad).consumption_rate().is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn trip_label_falls_back_to_destination() {
        let trip = AdditionalTrip::new("Rua do Depósito, 5", 2.0);
        assert_eq!(trip.display_label(), "Rua do Depósito, 5");

        let trip = trip.with_label("Depósito");
        assert_eq!(trip.display_label(), "Depósito");

        let blank = AdditionalTrip::new("Rua B", 1.0).with_label("  ");
        assert_eq!(blank.display_label(), "Rua B");
    }

    #[test]
    fn request_deserializes_with_defaults() {
        let json = r#"{
            "vehicle": {"consumption_km_per_liter": 10},
            "base_address": "Rua Base, 1",
            "primary_destination": "Obra Central",
            "fuel_price_per_liter": 5.89
        }"#;
        let req: EstimateRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.vehicle.consumption_km_per_liter, Some(10.0));
        assert!(req.additional_trips.is_empty());
        assert_eq!(req.safety_margin_percent, 0.0);
        assert!(req.working_days_per_month.is_none());
        assert!(req.spending_limit.is_none());
    }

    #[test]
    fn rounded_leg_keeps_labels() {
        let leg = RouteLeg {
            origin_label: "Base".into(),
            destination_label: "Obra".into(),
            distance_km: 7.3,
            duration_min: 12,
            trips_per_month: 88.0,
            monthly_distance_km: 642.4000000001,
            cost_per_trip: 4.357_731_958,
            monthly_cost: 383.480_412_37,
        };

        let rounded = leg.rounded();
        assert_eq!(rounded.origin_label, "Base");
        assert_eq!(rounded.monthly_distance_km, 642.4);
        assert_eq!(rounded.cost_per_trip, 4.36);
        assert_eq!(rounded.monthly_cost, 383.48);
    }

    #[test]
    fn builder_sets_fields() {
        let req = EstimateRequest::new(VehicleConfig::new("car", 12.0), "A", "B", 6.0)
            .with_trip(AdditionalTrip::new("C", 1.0))
            .with_margin(10.0)
            .with_schedule(20, 1.0)
            .with_limit(1500.0)
            .with_cost_center("CCA-042");

        assert_eq!(req.additional_trips.len(), 1);
        assert_eq!(req.safety_margin_percent, 10.0);
        assert_eq!(req.working_days_per_month, Some(20));
        assert_eq!(req.daily_frequency, Some(1.0));
        assert_eq!(req.spending_limit, Some(1500.0));
        assert_eq!(req.cost_center.as_deref(), Some("CCA-042"));
    }
}
