//! Arrival prediction from heuristic delay factors.
//!
//! The production model randomizes every factor as a stand-in for real
//! traffic/weather/historical lookups, so two predictions on the same record
//! differ. That is intentional; swapping in a real model means implementing
//! [`DelayModel`] against live signals.

use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{arrival_text, PredictedRecord, TransportRecord};

const TIME_OF_DAY_WEIGHT: f64 = 0.3;
const TRAFFIC_WEIGHT: f64 = 0.4;
const WEATHER_WEIGHT: f64 = 0.1;
const HISTORICAL_WEIGHT: f64 = 0.2;

const BASE_CONFIDENCE: f64 = 90.0;
const MIN_CONFIDENCE: i64 = 70;
const MAX_CONFIDENCE: i64 = 98;

/// Delay impact in minutes per weather condition.
const WEATHER_IMPACT: [(&str, f64); 4] =
    [("clear", 0.0), ("rain", 1.5), ("storm", 3.0), ("fog", 2.0)];

/// Source of the per-prediction delay factors, each a contribution in
/// minutes. Implementations may be randomized (production) or fixed (tests).
pub trait DelayModel: Send + Sync {
    /// Delay contribution for the given local hour of day.
    fn time_of_day_factor(&self, hour: u32) -> f64;
    fn traffic_factor(&self) -> f64;
    fn weather_factor(&self) -> f64;
    fn historical_delay_factor(&self, record: &TransportRecord) -> f64;
    /// Random variation applied to the confidence score.
    fn confidence_noise(&self) -> f64;
}

/// Randomized heuristic model simulating traffic, weather and historical
/// delay lookups.
pub struct HeuristicModel;

impl DelayModel for HeuristicModel {
    fn time_of_day_factor(&self, hour: u32) -> f64 {
        let mut rng = rand::thread_rng();
        if (7..=9).contains(&hour) || (17..=19).contains(&hour) {
            // Peak hour delays
            rng.gen_range(2.0..=5.0)
        } else if (6..=22).contains(&hour) {
            rng.gen_range(0.0..=2.0)
        } else {
            // Off-peak, early arrivals possible
            rng.gen_range(-1.0..=1.0)
        }
    }

    fn traffic_factor(&self) -> f64 {
        rand::thread_rng().gen_range(-1.0..=3.0)
    }

    fn weather_factor(&self) -> f64 {
        let mut rng = rand::thread_rng();
        WEATHER_IMPACT
            .choose(&mut rng)
            .map(|(_, impact)| *impact)
            .unwrap_or(0.0)
    }

    fn historical_delay_factor(&self, record: &TransportRecord) -> f64 {
        let mut rng = rand::thread_rng();
        if record.transport_type.contains("train") {
            // Trains run closer to timetable
            rng.gen_range(-0.5..=1.5)
        } else {
            rng.gen_range(0.0..=2.5)
        }
    }

    fn confidence_noise(&self) -> f64 {
        rand::thread_rng().gen_range(-5.0..=5.0)
    }
}

/// Combines [`DelayModel`] factors into a [`PredictedRecord`].
#[derive(Clone)]
pub struct Predictor {
    model: Arc<dyn DelayModel>,
    timezone: Tz,
}

impl Predictor {
    pub fn new(model: Arc<dyn DelayModel>, timezone: Tz) -> Self {
        Self { model, timezone }
    }

    /// Production predictor backed by the randomized heuristic model.
    pub fn heuristic(timezone: Tz) -> Self {
        Self::new(Arc::new(HeuristicModel), timezone)
    }

    pub fn predict(&self, record: &TransportRecord, now: DateTime<Utc>) -> PredictedRecord {
        let hour = now.with_timezone(&self.timezone).hour();

        let predicted_delay = TIME_OF_DAY_WEIGHT * self.model.time_of_day_factor(hour)
            + TRAFFIC_WEIGHT * self.model.traffic_factor()
            + WEATHER_WEIGHT * self.model.weather_factor()
            + HISTORICAL_WEIGHT * self.model.historical_delay_factor(record);

        // Never predict below one minute, however negative the delay.
        let predicted_arrival_mins =
            ((record.scheduled_arrival_mins as f64 + predicted_delay).floor() as i64).max(1);

        let confidence_score = self.confidence_score(record, predicted_delay);

        PredictedRecord {
            id: record.id.clone(),
            transport_type: record.transport_type.clone(),
            route: record.route.clone(),
            destination: record.destination.clone(),
            current_location: record.current_location.clone(),
            predicted_arrival_mins,
            predicted_arrival_text: arrival_text(predicted_arrival_mins),
            confidence_score,
            confidence_text: format!("{}%", confidence_score),
            delay_mins: predicted_arrival_mins - record.scheduled_arrival_mins,
            timestamp: now.to_rfc3339(),
        }
    }

    fn confidence_score(&self, record: &TransportRecord, predicted_delay: f64) -> i64 {
        let mut confidence = BASE_CONFIDENCE;

        // Larger predicted delays mean less reliable predictions.
        if predicted_delay.abs() > 5.0 {
            confidence -= 15.0;
        } else if predicted_delay.abs() > 2.0 {
            confidence -= 8.0;
        }

        if record.transport_type == "train" {
            confidence += 5.0;
        }

        confidence += self.model.confidence_noise();

        (confidence.trunc() as i64).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
    }
}
