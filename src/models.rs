//! Domain model for the VayuWatch air quality tree.
//!
//! CPCB categories, pollutant readings, and the State → City → Ward
//! hierarchy served by the API. Category values are always derived from the
//! AQI they accompany via [`AqiCategory::from_aqi`]; no other module may set
//! a category independently.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Upper bound of the Indian AQI scale; readings are clamped here.
pub const AQI_MAX: u16 = 500;

/// CPCB air quality categories, in ascending order of severity.
///
/// Breakpoints are inclusive upper bounds: 0–50 good, 51–100 satisfactory,
/// 101–200 moderate, 201–300 poor, 301–400 very poor, 401+ severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AqiCategory {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryPoor,
    Severe,
}

impl AqiCategory {
    /// Classify an AQI value into its CPCB category.
    ///
    /// Total over all of `u16`; values above 500 fall into `Severe`.
    pub fn from_aqi(aqi: u16) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Satisfactory,
            101..=200 => AqiCategory::Moderate,
            201..=300 => AqiCategory::Poor,
            301..=400 => AqiCategory::VeryPoor,
            _ => AqiCategory::Severe,
        }
    }

    /// Human-facing label, as shown on dashboards.
    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Satisfactory => "Satisfactory",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Severe => "Severe",
        }
    }
}

// ---

/// Concentrations of the tracked pollutants.
///
/// PM2.5, PM10, NO2, SO2 and O3 are reported in µg/m³ as integers; CO in
/// mg/m³ with one decimal. NH3 and Pb are only measured at some stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub pm25: u32,
    pub pm10: u32,
    pub no2: u32,
    pub so2: u32,
    pub co: f64,
    pub o3: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nh3: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pb: Option<f64>,
}

// ---

/// Smallest administrative unit in the tree, child of a city.
#[derive(Debug, Clone, Serialize)]
pub struct WardStatus {
    pub id: String,
    pub name: String,
    pub aqi: u16,
    pub category: AqiCategory,
    pub population: u64,
    pub pollutants: PollutantReading,
}

/// A monitored city with its wards.
#[derive(Debug, Clone, Serialize)]
pub struct CityStatus {
    pub id: String,
    pub name: String,
    pub aqi: u16,
    pub category: AqiCategory,
    pub population: u64,
    pub pollutants: PollutantReading,
    /// Primary emission source for this city, used by advisory text.
    pub dominant_source: String,
    pub wards: Vec<WardStatus>,
    pub last_updated: DateTime<Utc>,
}

/// A state and its monitored cities. State AQI is the rounded mean of its
/// cities' AQI, recomputed wholesale on every refresh.
#[derive(Debug, Clone, Serialize)]
pub struct StateStatus {
    pub id: String,
    pub name: String,
    pub aqi: u16,
    pub category: AqiCategory,
    pub cities: Vec<CityStatus>,
}

/// One complete generation of the geographic tree.
///
/// Snapshots are immutable once published; the refresh task replaces the
/// whole tree atomically, so readers see either the old or the new
/// generation, never a mix.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub states: Vec<StateStatus>,
    pub last_updated: DateTime<Utc>,
    pub simulated: bool,
}

// ---

/// Identifying summary of a single city, used in rankings and stats.
#[derive(Debug, Clone, Serialize)]
pub struct CityRef {
    pub id: String,
    pub name: String,
    pub state_id: String,
    pub aqi: u16,
    pub category: AqiCategory,
}

/// Nationwide aggregate over all monitored cities.
#[derive(Debug, Clone, Serialize)]
pub struct NationalStats {
    pub average_aqi: u16,
    pub category: AqiCategory,
    pub total_cities: usize,
    pub total_states: usize,
    pub category_counts: BTreeMap<AqiCategory, usize>,
    pub worst_city: CityRef,
    pub best_city: CityRef,
}

impl Snapshot {
    /// All cities across all states, paired with their state, in registry order.
    pub fn all_cities(&self) -> impl Iterator<Item = (&StateStatus, &CityStatus)> {
        self.states
            .iter()
            .flat_map(|s| s.cities.iter().map(move |c| (s, c)))
    }

    pub fn state_by_id(&self, id: &str) -> Option<&StateStatus> {
        self.states.iter().find(|s| s.id == id)
    }

    pub fn city_by_id(&self, id: &str) -> Option<&CityStatus> {
        self.all_cities().map(|(_, c)| c).find(|c| c.id == id)
    }

    /// The state a city belongs to, if the city exists.
    pub fn state_of_city(&self, city_id: &str) -> Option<&StateStatus> {
        self.states
            .iter()
            .find(|s| s.cities.iter().any(|c| c.id == city_id))
    }

    /// The `limit` cities with the highest AQI, worst first.
    pub fn top_polluted(&self, limit: usize) -> Vec<CityRef> {
        let mut refs: Vec<CityRef> = self.all_cities().map(|(s, c)| city_ref(s, c)).collect();
        refs.sort_by(|a, b| b.aqi.cmp(&a.aqi));
        refs.truncate(limit);
        refs
    }

    /// Aggregate statistics across every monitored city.
    ///
    /// Returns `None` only for an empty tree, which the seed registry rules
    /// out in practice.
    pub fn national_stats(&self) -> Option<NationalStats> {
        let cities: Vec<(&StateStatus, &CityStatus)> = self.all_cities().collect();
        let (first_state, first_city) = cities.first()?;

        let total: u64 = cities.iter().map(|(_, c)| u64::from(c.aqi)).sum();
        let average_aqi = (total as f64 / cities.len() as f64).round() as u16;

        let mut category_counts: BTreeMap<AqiCategory, usize> = BTreeMap::new();
        for (_, city) in &cities {
            *category_counts.entry(city.category).or_insert(0) += 1;
        }

        // First encountered wins ties, keeping registry order stable.
        let mut worst = (*first_state, *first_city);
        let mut best = (*first_state, *first_city);
        for &(state, city) in &cities {
            if city.aqi > worst.1.aqi {
                worst = (state, city);
            }
            if city.aqi < best.1.aqi {
                best = (state, city);
            }
        }

        Some(NationalStats {
            average_aqi,
            category: AqiCategory::from_aqi(average_aqi),
            total_cities: cities.len(),
            total_states: self.states.len(),
            category_counts,
            worst_city: city_ref(worst.0, worst.1),
            best_city: city_ref(best.0, best.1),
        })
    }
}

fn city_ref(state: &StateStatus, city: &CityStatus) -> CityRef {
    CityRef {
        id: city.id.clone(),
        name: city.name.clone(),
        state_id: state.id.clone(),
        aqi: city.aqi,
        category: city.category,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn reading() -> PollutantReading {
        PollutantReading {
            pm25: 60,
            pm10: 110,
            no2: 40,
            so2: 12,
            co: 1.2,
            o3: 35,
            nh3: None,
            pb: None,
        }
    }

    fn city(id: &str, aqi: u16) -> CityStatus {
        CityStatus {
            id: id.to_string(),
            name: id.to_uppercase(),
            aqi,
            category: AqiCategory::from_aqi(aqi),
            population: 1_000_000,
            pollutants: reading(),
            dominant_source: "Vehicular emissions".to_string(),
            wards: Vec::new(),
            last_updated: Utc::now(),
        }
    }

    fn snapshot(cities: Vec<CityStatus>) -> Snapshot {
        let aqi = (cities.iter().map(|c| u32::from(c.aqi)).sum::<u32>() as f64
            / cities.len() as f64)
            .round() as u16;
        Snapshot {
            states: vec![StateStatus {
                id: "st".to_string(),
                name: "Test State".to_string(),
                aqi,
                category: AqiCategory::from_aqi(aqi),
                cities,
            }],
            last_updated: Utc::now(),
            simulated: true,
        }
    }

    #[test]
    fn test_category_breakpoints() {
        // ---
        assert_eq!(AqiCategory::from_aqi(0), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(50), AqiCategory::Good);
        assert_eq!(AqiCategory::from_aqi(51), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(100), AqiCategory::Satisfactory);
        assert_eq!(AqiCategory::from_aqi(101), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(200), AqiCategory::Moderate);
        assert_eq!(AqiCategory::from_aqi(201), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_aqi(300), AqiCategory::Poor);
        assert_eq!(AqiCategory::from_aqi(301), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(400), AqiCategory::VeryPoor);
        assert_eq!(AqiCategory::from_aqi(401), AqiCategory::Severe);
        assert_eq!(AqiCategory::from_aqi(500), AqiCategory::Severe);
    }

    #[test]
    fn test_category_is_monotonic() {
        // ---
        // A higher AQI must never map to a cleaner category.
        let mut previous = AqiCategory::from_aqi(0);
        for aqi in 1..=AQI_MAX {
            let current = AqiCategory::from_aqi(aqi);
            assert!(
                current >= previous,
                "category regressed at aqi={}: {:?} < {:?}",
                aqi,
                current,
                previous
            );
            previous = current;
        }
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        // ---
        assert_eq!(
            serde_json::to_string(&AqiCategory::VeryPoor).unwrap(),
            "\"very-poor\""
        );
        assert_eq!(
            serde_json::from_str::<AqiCategory>("\"satisfactory\"").unwrap(),
            AqiCategory::Satisfactory
        );
    }

    #[test]
    fn test_category_labels() {
        // ---
        assert_eq!(AqiCategory::VeryPoor.label(), "Very Poor");
        assert_eq!(AqiCategory::Good.label(), "Good");
    }

    #[test]
    fn test_national_stats_average_and_extremes() {
        // ---
        let snap = snapshot(vec![city("a", 90), city("b", 210), city("c", 330)]);
        let stats = snap.national_stats().expect("non-empty tree");

        assert_eq!(stats.average_aqi, 210); // (90 + 210 + 330) / 3
        assert_eq!(stats.category, AqiCategory::Poor);
        assert_eq!(stats.total_cities, 3);
        assert_eq!(stats.total_states, 1);
        assert_eq!(stats.worst_city.id, "c");
        assert_eq!(stats.best_city.id, "a");
        assert_eq!(stats.category_counts[&AqiCategory::Satisfactory], 1);
        assert_eq!(stats.category_counts[&AqiCategory::Poor], 1);
        assert_eq!(stats.category_counts[&AqiCategory::VeryPoor], 1);
    }

    #[test]
    fn test_top_polluted_orders_descending_and_truncates() {
        // ---
        let snap = snapshot(vec![city("a", 90), city("b", 330), city("c", 210)]);
        let top = snap.top_polluted(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, "b");
        assert_eq!(top[1].id, "c");
    }

    #[test]
    fn test_lookup_helpers() {
        // ---
        let snap = snapshot(vec![city("a", 90), city("b", 330)]);
        assert!(snap.state_by_id("st").is_some());
        assert!(snap.state_by_id("nope").is_none());
        assert_eq!(snap.city_by_id("b").unwrap().aqi, 330);
        assert_eq!(snap.state_of_city("a").unwrap().id, "st");
        assert!(snap.state_of_city("nope").is_none());
    }
}
