//! Live-data simulation for the VayuWatch tree.
//!
//! Each tick rebuilds the entire tree from the baseline registry: city and
//! ward AQI get a bounded uniform offset, pollutants get multiplicative
//! jitter, categories are re-derived, and state AQI is recomputed as the
//! rounded mean of its cities. Perturbation is always applied to the static
//! baseline, never to the previous tick, so values cannot drift over time.
//!
//! The RNG is owned by the [`Simulator`] and can be seeded from
//! configuration, which makes whole runs reproducible in tests.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;

use crate::config::Config;
use crate::models::{AqiCategory, CityStatus, PollutantReading, Snapshot, StateStatus, WardStatus};
use crate::registry;

// ---

/// Produces simulated snapshots from the baseline registry.
pub struct Simulator {
    rng: StdRng,
    city_max_delta: f64,
    ward_max_delta: f64,
}

impl Simulator {
    /// Build a simulator from runtime configuration, seeding the RNG from
    /// `AQI_SIM_SEED` when set and from entropy otherwise.
    pub fn new(config: &Config) -> Self {
        let rng = match config.sim_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            city_max_delta: config.city_max_delta,
            ward_max_delta: config.ward_max_delta,
        }
    }

    /// Deterministic simulator for tests.
    pub fn seeded(seed: u64, city_max_delta: f64, ward_max_delta: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            city_max_delta,
            ward_max_delta,
        }
    }

    /// Apply a bounded uniform offset to a baseline AQI.
    ///
    /// The offset is drawn from `[-max_delta, +max_delta]`, the sum rounded
    /// to the nearest integer and clamped into the valid AQI range. Total
    /// over any numeric input, including negative baselines and deltas.
    pub fn perturb(&mut self, baseline: f64, max_delta: f64) -> u16 {
        let offset = (self.rng.gen::<f64>() - 0.5) * 2.0 * max_delta;
        (baseline + offset).round().clamp(0.0, 500.0) as u16
    }

    /// Multiplicative jitter for a pollutant profile.
    ///
    /// Particulates and CO vary ±10%, gases ±15%. Everything stays
    /// non-negative; CO keeps one decimal, the rest round to integers.
    /// Lead is reported too rarely to vary and passes through unchanged.
    fn jitter_pollutants(&mut self, p: &PollutantReading) -> PollutantReading {
        PollutantReading {
            pm25: self.scale_u32(p.pm25, 0.9, 0.2),
            pm10: self.scale_u32(p.pm10, 0.9, 0.2),
            no2: self.scale_u32(p.no2, 0.85, 0.3),
            so2: self.scale_u32(p.so2, 0.85, 0.3),
            co: {
                let scaled = p.co * (0.9 + self.rng.gen::<f64>() * 0.2);
                ((scaled * 10.0).round() / 10.0).max(0.0)
            },
            o3: self.scale_u32(p.o3, 0.85, 0.3),
            nh3: p.nh3.map(|v| self.scale_u32(v, 0.85, 0.3)),
            pb: p.pb,
        }
    }

    fn scale_u32(&mut self, value: u32, base: f64, spread: f64) -> u32 {
        let factor = base + self.rng.gen::<f64>() * spread;
        (f64::from(value) * factor).round().max(0.0) as u32
    }

    /// Rebuild the whole tree from the registry with fresh perturbation.
    pub fn next_snapshot(&mut self) -> Snapshot {
        let now = Utc::now();
        let states = registry::STATE_REGISTRY
            .iter()
            .map(|state| {
                let cities: Vec<CityStatus> = state
                    .cities
                    .iter()
                    .map(|city| {
                        let city_aqi = self.perturb(f64::from(city.aqi), self.city_max_delta);
                        let wards: Vec<WardStatus> = city
                            .wards
                            .iter()
                            .map(|ward| {
                                let ward_aqi =
                                    self.perturb(f64::from(ward.aqi), self.ward_max_delta);
                                WardStatus {
                                    id: ward.id.to_string(),
                                    name: ward.name.to_string(),
                                    aqi: ward_aqi,
                                    category: AqiCategory::from_aqi(ward_aqi),
                                    population: ward.population,
                                    pollutants: self.jitter_pollutants(&ward.pollutants),
                                }
                            })
                            .collect();

                        CityStatus {
                            id: city.id.to_string(),
                            name: city.name.to_string(),
                            aqi: city_aqi,
                            category: AqiCategory::from_aqi(city_aqi),
                            population: city.population,
                            pollutants: self.jitter_pollutants(&city.pollutants),
                            dominant_source: city.dominant_source.to_string(),
                            wards,
                            last_updated: now,
                        }
                    })
                    .collect();

                let total: u64 = cities.iter().map(|c| u64::from(c.aqi)).sum();
                let state_aqi = (total as f64 / cities.len() as f64).round() as u16;

                StateStatus {
                    id: state.id.to_string(),
                    name: state.name.to_string(),
                    aqi: state_aqi,
                    category: AqiCategory::from_aqi(state_aqi),
                    cities,
                }
            })
            .collect();

        Snapshot {
            states,
            last_updated: now,
            simulated: true,
        }
    }
}

// ---

/// Periodic refresh loop, spawned once at startup.
///
/// Publishes a fresh snapshot through the watch channel on every tick; the
/// first tick fires immediately so the baseline tree is replaced as soon as
/// the service is up. Stops when every receiver is gone.
pub async fn run(mut sim: Simulator, tx: watch::Sender<Arc<Snapshot>>, interval_ms: u64) {
    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    loop {
        ticker.tick().await;
        let snapshot = Arc::new(sim.next_snapshot());
        tracing::debug!(
            states = snapshot.states.len(),
            "publishing simulated snapshot"
        );
        if tx.send(snapshot).is_err() {
            tracing::info!("all snapshot receivers dropped, stopping simulation");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn sim(seed: u64) -> Simulator {
        Simulator::seeded(seed, 20.0, 15.0)
    }

    #[test]
    fn test_perturb_always_within_valid_range() {
        // ---
        let mut s = sim(7);
        let cases = [
            (0.0, 20.0),
            (500.0, 20.0),
            (-250.0, 15.0),
            (900.0, 15.0),
            (250.0, -60.0), // negative delta is symmetric, still bounded
            (250.0, 0.0),
            (480.0, 5000.0),
        ];
        for (baseline, delta) in cases {
            for _ in 0..200 {
                let value = s.perturb(baseline, delta);
                assert!(value <= 500, "perturb({baseline}, {delta}) gave {value}");
            }
        }
    }

    #[test]
    fn test_perturb_stays_within_delta_of_baseline() {
        // ---
        let mut s = sim(11);
        for _ in 0..500 {
            let value = s.perturb(250.0, 20.0);
            let distance = (f64::from(value) - 250.0).abs();
            // Rounding can push the result half a point past the bound.
            assert!(distance <= 20.5, "offset {distance} exceeds max delta");
        }
    }

    #[test]
    fn test_perturb_zero_delta_is_identity() {
        // ---
        let mut s = sim(13);
        assert_eq!(s.perturb(137.0, 0.0), 137);
    }

    #[test]
    fn test_pollutant_jitter_bounds_and_precision() {
        // ---
        let mut s = sim(17);
        let base = PollutantReading {
            pm25: 100,
            pm10: 200,
            no2: 60,
            so2: 20,
            co: 2.0,
            o3: 50,
            nh3: Some(30),
            pb: Some(0.4),
        };
        for _ in 0..300 {
            let j = s.jitter_pollutants(&base);
            assert!((90..=110).contains(&j.pm25), "pm25 {} outside ±10%", j.pm25);
            assert!((180..=220).contains(&j.pm10));
            assert!((51..=69).contains(&j.no2), "no2 {} outside ±15%", j.no2);
            assert!((17..=23).contains(&j.so2));
            assert!((42..=58).contains(&j.o3));
            assert!((1.8..=2.2).contains(&j.co));
            // CO keeps exactly one decimal place
            assert!((j.co * 10.0 - (j.co * 10.0).round()).abs() < 1e-9);
            let nh3 = j.nh3.expect("nh3 present in baseline");
            assert!((25..=35).contains(&nh3));
            assert_eq!(j.pb, Some(0.4), "pb must pass through untouched");
        }
    }

    #[test]
    fn test_snapshot_upholds_aggregation_invariants() {
        // ---
        let snap = sim(23).next_snapshot();
        assert!(snap.simulated);
        for state in &snap.states {
            let total: u64 = state.cities.iter().map(|c| u64::from(c.aqi)).sum();
            let mean = (total as f64 / state.cities.len() as f64).round() as u16;
            assert_eq!(state.aqi, mean, "state '{}' is not the city mean", state.id);
            assert_eq!(state.category, AqiCategory::from_aqi(state.aqi));
            for city in &state.cities {
                assert_eq!(city.category, AqiCategory::from_aqi(city.aqi));
                for ward in &city.wards {
                    assert_eq!(ward.category, AqiCategory::from_aqi(ward.aqi));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_reproduces_identical_snapshots() {
        // ---
        let a = sim(42).next_snapshot();
        let b = sim(42).next_snapshot();
        let aqis = |s: &Snapshot| -> Vec<u16> {
            s.all_cities().map(|(_, c)| c.aqi).collect()
        };
        assert_eq!(aqis(&a), aqis(&b));
    }

    #[test]
    fn test_consecutive_ticks_differ() {
        // ---
        let mut s = sim(42);
        let first: Vec<u16> = s.next_snapshot().all_cities().map(|(_, c)| c.aqi).collect();
        let second: Vec<u16> = s.next_snapshot().all_cities().map(|(_, c)| c.aqi).collect();
        assert_ne!(first, second, "ticks should not repeat with a live RNG");
    }

    #[test]
    fn test_values_never_drift_from_baseline() {
        // ---
        // Perturbation is re-applied to the registry each tick, so even many
        // generations later every city stays within one delta of its seed.
        let mut s = sim(99);
        for _ in 0..20 {
            let snap = s.next_snapshot();
            for (_, city) in snap.all_cities() {
                let seed = registry::find_city(&city.id).expect("city comes from registry");
                let distance = (f64::from(city.aqi) - f64::from(seed.aqi)).abs();
                assert!(
                    distance <= 20.5,
                    "city '{}' drifted {} points from baseline",
                    city.id,
                    distance
                );
            }
        }
    }
}
