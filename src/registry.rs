//! Baseline registry for the VayuWatch geographic tree.
//!
//! Defines the canonical set of monitored states, cities, and wards along
//! with their baseline AQI, population, pollutant profile, and dominant
//! emission source. This is the single source of truth for geography — the
//! simulator rebuilds every snapshot from these seeds, and all other modules
//! should reference locations from here rather than hardcoding ids.
//!
//! Baseline values approximate typical winter-season CPCB readings for each
//! location; they are starting points for simulation, not live data.

use chrono::{DateTime, Utc};

use crate::models::{
    AqiCategory, CityStatus, PollutantReading, Snapshot, StateStatus, WardStatus,
};

// ---------------------------------------------------------------------------
// Seed types
// ---------------------------------------------------------------------------

/// Baseline data for a single ward.
pub struct WardSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub aqi: u16,
    pub population: u64,
    pub pollutants: PollutantReading,
}

/// Baseline data for a monitored city and its wards.
pub struct CitySeed {
    pub id: &'static str,
    pub name: &'static str,
    pub aqi: u16,
    pub population: u64,
    /// Primary emission source, referenced by advisory text.
    pub dominant_source: &'static str,
    pub pollutants: PollutantReading,
    pub wards: &'static [WardSeed],
}

/// A state and its monitored cities. State AQI is never seeded — it is
/// always recomputed from the cities.
pub struct StateSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub cities: &'static [CitySeed],
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// All monitored states, roughly north to south.
pub static STATE_REGISTRY: &[StateSeed] = &[
    StateSeed {
        id: "delhi",
        name: "Delhi",
        cities: &[CitySeed {
            id: "new-delhi",
            name: "New Delhi",
            aqi: 382,
            population: 19_800_000,
            dominant_source: "Vehicular emissions",
            pollutants: PollutantReading { pm25: 228, pm10: 395, no2: 92, so2: 21, co: 2.4, o3: 52, nh3: Some(38), pb: Some(0.4) },
            wards: &[
                WardSeed {
                    id: "anand-vihar",
                    name: "Anand Vihar",
                    aqi: 412,
                    population: 420_000,
                    pollutants: PollutantReading { pm25: 252, pm10: 438, no2: 104, so2: 24, co: 2.8, o3: 48, nh3: Some(42), pb: Some(0.5) },
                },
                WardSeed {
                    id: "punjabi-bagh",
                    name: "Punjabi Bagh",
                    aqi: 395,
                    population: 380_000,
                    pollutants: PollutantReading { pm25: 236, pm10: 410, no2: 96, so2: 22, co: 2.5, o3: 50, nh3: Some(39), pb: None },
                },
                WardSeed {
                    id: "rk-puram",
                    name: "R.K. Puram",
                    aqi: 368,
                    population: 310_000,
                    pollutants: PollutantReading { pm25: 218, pm10: 376, no2: 88, so2: 20, co: 2.3, o3: 54, nh3: Some(35), pb: None },
                },
                WardSeed {
                    id: "dwarka",
                    name: "Dwarka",
                    aqi: 341,
                    population: 560_000,
                    pollutants: PollutantReading { pm25: 198, pm10: 352, no2: 79, so2: 18, co: 2.1, o3: 57, nh3: Some(31), pb: None },
                },
            ],
        }],
    },
    StateSeed {
        id: "uttar-pradesh",
        name: "Uttar Pradesh",
        cities: &[
            CitySeed {
                id: "kanpur",
                name: "Kanpur",
                aqi: 312,
                population: 3_100_000,
                dominant_source: "Industrial emissions",
                pollutants: PollutantReading { pm25: 186, pm10: 328, no2: 71, so2: 29, co: 2.0, o3: 44, nh3: Some(26), pb: Some(0.3) },
                wards: &[
                    WardSeed {
                        id: "kidwai-nagar",
                        name: "Kidwai Nagar",
                        aqi: 328,
                        population: 290_000,
                        pollutants: PollutantReading { pm25: 196, pm10: 344, no2: 75, so2: 31, co: 2.2, o3: 42, nh3: Some(28), pb: None },
                    },
                    WardSeed {
                        id: "jajmau",
                        name: "Jajmau",
                        aqi: 336,
                        population: 240_000,
                        pollutants: PollutantReading { pm25: 203, pm10: 355, no2: 78, so2: 34, co: 2.3, o3: 41, nh3: Some(30), pb: None },
                    },
                    WardSeed {
                        id: "kalyanpur",
                        name: "Kalyanpur",
                        aqi: 296,
                        population: 310_000,
                        pollutants: PollutantReading { pm25: 174, pm10: 309, no2: 66, so2: 27, co: 1.9, o3: 46, nh3: Some(24), pb: None },
                    },
                ],
            },
            CitySeed {
                id: "lucknow",
                name: "Lucknow",
                aqi: 288,
                population: 3_600_000,
                dominant_source: "Waste burning",
                pollutants: PollutantReading { pm25: 171, pm10: 302, no2: 64, so2: 19, co: 1.8, o3: 47, nh3: Some(23), pb: None },
                wards: &[
                    WardSeed {
                        id: "hazratganj",
                        name: "Hazratganj",
                        aqi: 301,
                        population: 260_000,
                        pollutants: PollutantReading { pm25: 180, pm10: 315, no2: 68, so2: 20, co: 1.9, o3: 45, nh3: Some(25), pb: None },
                    },
                    WardSeed {
                        id: "gomti-nagar",
                        name: "Gomti Nagar",
                        aqi: 272,
                        population: 340_000,
                        pollutants: PollutantReading { pm25: 160, pm10: 284, no2: 60, so2: 18, co: 1.7, o3: 49, nh3: Some(21), pb: None },
                    },
                    WardSeed {
                        id: "alambagh",
                        name: "Alambagh",
                        aqi: 293,
                        population: 280_000,
                        pollutants: PollutantReading { pm25: 175, pm10: 308, no2: 65, so2: 19, co: 1.8, o3: 46, nh3: Some(23), pb: None },
                    },
                ],
            },
            CitySeed {
                id: "varanasi",
                name: "Varanasi",
                aqi: 244,
                population: 1_700_000,
                dominant_source: "Construction dust",
                pollutants: PollutantReading { pm25: 142, pm10: 259, no2: 54, so2: 16, co: 1.5, o3: 51, nh3: Some(18), pb: None },
                wards: &[
                    WardSeed {
                        id: "lanka",
                        name: "Lanka",
                        aqi: 251,
                        population: 210_000,
                        pollutants: PollutantReading { pm25: 147, pm10: 266, no2: 56, so2: 17, co: 1.6, o3: 50, nh3: Some(19), pb: None },
                    },
                    WardSeed {
                        id: "sigra",
                        name: "Sigra",
                        aqi: 238,
                        population: 190_000,
                        pollutants: PollutantReading { pm25: 138, pm10: 251, no2: 52, so2: 15, co: 1.5, o3: 52, nh3: Some(17), pb: None },
                    },
                ],
            },
        ],
    },
    StateSeed {
        id: "west-bengal",
        name: "West Bengal",
        cities: &[
            CitySeed {
                id: "kolkata",
                name: "Kolkata",
                aqi: 186,
                population: 14_900_000,
                dominant_source: "Vehicular emissions",
                pollutants: PollutantReading { pm25: 104, pm10: 192, no2: 58, so2: 14, co: 1.4, o3: 41, nh3: Some(15), pb: None },
                wards: &[
                    WardSeed {
                        id: "ballygunge",
                        name: "Ballygunge",
                        aqi: 178,
                        population: 330_000,
                        pollutants: PollutantReading { pm25: 99, pm10: 183, no2: 55, so2: 13, co: 1.3, o3: 42, nh3: Some(14), pb: None },
                    },
                    WardSeed {
                        id: "salt-lake",
                        name: "Salt Lake",
                        aqi: 164,
                        population: 400_000,
                        pollutants: PollutantReading { pm25: 91, pm10: 169, no2: 50, so2: 12, co: 1.2, o3: 44, nh3: Some(13), pb: None },
                    },
                    WardSeed {
                        id: "jadavpur",
                        name: "Jadavpur",
                        aqi: 193,
                        population: 360_000,
                        pollutants: PollutantReading { pm25: 108, pm10: 199, no2: 61, so2: 15, co: 1.4, o3: 40, nh3: Some(16), pb: None },
                    },
                ],
            },
            CitySeed {
                id: "howrah",
                name: "Howrah",
                aqi: 207,
                population: 1_100_000,
                dominant_source: "Industrial emissions",
                pollutants: PollutantReading { pm25: 118, pm10: 214, no2: 63, so2: 18, co: 1.6, o3: 38, nh3: Some(17), pb: Some(0.2) },
                wards: &[
                    WardSeed {
                        id: "shibpur",
                        name: "Shibpur",
                        aqi: 215,
                        population: 280_000,
                        pollutants: PollutantReading { pm25: 123, pm10: 222, no2: 66, so2: 19, co: 1.7, o3: 37, nh3: Some(18), pb: None },
                    },
                    WardSeed {
                        id: "bally",
                        name: "Bally",
                        aqi: 198,
                        population: 230_000,
                        pollutants: PollutantReading { pm25: 112, pm10: 205, no2: 60, so2: 17, co: 1.5, o3: 39, nh3: Some(16), pb: None },
                    },
                ],
            },
        ],
    },
    StateSeed {
        id: "maharashtra",
        name: "Maharashtra",
        cities: &[
            CitySeed {
                id: "mumbai",
                name: "Mumbai",
                aqi: 157,
                population: 20_700_000,
                dominant_source: "Construction dust",
                pollutants: PollutantReading { pm25: 86, pm10: 161, no2: 49, so2: 12, co: 1.2, o3: 46, nh3: Some(12), pb: None },
                wards: &[
                    WardSeed {
                        id: "andheri",
                        name: "Andheri",
                        aqi: 168,
                        population: 710_000,
                        pollutants: PollutantReading { pm25: 93, pm10: 173, no2: 53, so2: 13, co: 1.3, o3: 44, nh3: Some(13), pb: None },
                    },
                    WardSeed {
                        id: "bandra",
                        name: "Bandra",
                        aqi: 149,
                        population: 520_000,
                        pollutants: PollutantReading { pm25: 81, pm10: 152, no2: 46, so2: 11, co: 1.1, o3: 47, nh3: Some(11), pb: None },
                    },
                    WardSeed {
                        id: "colaba",
                        name: "Colaba",
                        aqi: 132,
                        population: 290_000,
                        pollutants: PollutantReading { pm25: 71, pm10: 134, no2: 41, so2: 10, co: 1.0, o3: 49, nh3: Some(10), pb: None },
                    },
                ],
            },
            CitySeed {
                id: "pune",
                name: "Pune",
                aqi: 131,
                population: 6_600_000,
                dominant_source: "Vehicular emissions",
                pollutants: PollutantReading { pm25: 70, pm10: 133, no2: 44, so2: 10, co: 1.0, o3: 48, nh3: Some(9), pb: None },
                wards: &[
                    WardSeed {
                        id: "shivajinagar",
                        name: "Shivajinagar",
                        aqi: 139,
                        population: 310_000,
                        pollutants: PollutantReading { pm25: 75, pm10: 141, no2: 47, so2: 11, co: 1.1, o3: 47, nh3: Some(10), pb: None },
                    },
                    WardSeed {
                        id: "hadapsar",
                        name: "Hadapsar",
                        aqi: 127,
                        population: 380_000,
                        pollutants: PollutantReading { pm25: 68, pm10: 129, no2: 42, so2: 10, co: 1.0, o3: 48, nh3: Some(9), pb: None },
                    },
                    WardSeed {
                        id: "kothrud",
                        name: "Kothrud",
                        aqi: 118,
                        population: 330_000,
                        pollutants: PollutantReading { pm25: 62, pm10: 119, no2: 39, so2: 9, co: 0.9, o3: 50, nh3: Some(8), pb: None },
                    },
                ],
            },
        ],
    },
    StateSeed {
        id: "karnataka",
        name: "Karnataka",
        cities: &[
            CitySeed {
                id: "bengaluru",
                name: "Bengaluru",
                aqi: 96,
                population: 13_600_000,
                dominant_source: "Vehicular emissions",
                pollutants: PollutantReading { pm25: 48, pm10: 97, no2: 38, so2: 8, co: 0.9, o3: 42, nh3: Some(7), pb: None },
                wards: &[
                    WardSeed {
                        id: "whitefield",
                        name: "Whitefield",
                        aqi: 104,
                        population: 450_000,
                        pollutants: PollutantReading { pm25: 53, pm10: 106, no2: 41, so2: 9, co: 1.0, o3: 41, nh3: Some(8), pb: None },
                    },
                    WardSeed {
                        id: "koramangala",
                        name: "Koramangala",
                        aqi: 92,
                        population: 380_000,
                        pollutants: PollutantReading { pm25: 46, pm10: 93, no2: 37, so2: 8, co: 0.9, o3: 43, nh3: Some(7), pb: None },
                    },
                    WardSeed {
                        id: "jayanagar",
                        name: "Jayanagar",
                        aqi: 84,
                        population: 320_000,
                        pollutants: PollutantReading { pm25: 42, pm10: 85, no2: 34, so2: 7, co: 0.8, o3: 44, nh3: Some(6), pb: None },
                    },
                ],
            },
            CitySeed {
                id: "mysuru",
                name: "Mysuru",
                aqi: 68,
                population: 1_200_000,
                dominant_source: "Road dust",
                pollutants: PollutantReading { pm25: 33, pm10: 69, no2: 27, so2: 6, co: 0.7, o3: 39, nh3: Some(5), pb: None },
                wards: &[
                    WardSeed {
                        id: "chamundi",
                        name: "Chamundi",
                        aqi: 63,
                        population: 180_000,
                        pollutants: PollutantReading { pm25: 30, pm10: 64, no2: 25, so2: 5, co: 0.6, o3: 40, nh3: Some(5), pb: None },
                    },
                    WardSeed {
                        id: "vijayanagar-mysuru",
                        name: "Vijayanagar",
                        aqi: 72,
                        population: 210_000,
                        pollutants: PollutantReading { pm25: 35, pm10: 73, no2: 28, so2: 6, co: 0.7, o3: 39, nh3: Some(5), pb: None },
                    },
                ],
            },
        ],
    },
    StateSeed {
        id: "tamil-nadu",
        name: "Tamil Nadu",
        cities: &[
            CitySeed {
                id: "chennai",
                name: "Chennai",
                aqi: 112,
                population: 11_200_000,
                dominant_source: "Industrial emissions",
                pollutants: PollutantReading { pm25: 58, pm10: 114, no2: 43, so2: 13, co: 1.1, o3: 45, nh3: Some(9), pb: None },
                wards: &[
                    WardSeed {
                        id: "t-nagar",
                        name: "T. Nagar",
                        aqi: 121,
                        population: 390_000,
                        pollutants: PollutantReading { pm25: 64, pm10: 123, no2: 46, so2: 14, co: 1.2, o3: 44, nh3: Some(10), pb: None },
                    },
                    WardSeed {
                        id: "adyar",
                        name: "Adyar",
                        aqi: 103,
                        population: 340_000,
                        pollutants: PollutantReading { pm25: 53, pm10: 105, no2: 40, so2: 12, co: 1.0, o3: 46, nh3: Some(8), pb: None },
                    },
                    WardSeed {
                        id: "manali",
                        name: "Manali",
                        aqi: 134,
                        population: 260_000,
                        pollutants: PollutantReading { pm25: 72, pm10: 136, no2: 49, so2: 16, co: 1.3, o3: 43, nh3: Some(11), pb: Some(0.2) },
                    },
                ],
            },
            CitySeed {
                id: "coimbatore",
                name: "Coimbatore",
                aqi: 84,
                population: 2_100_000,
                dominant_source: "Road dust",
                pollutants: PollutantReading { pm25: 42, pm10: 85, no2: 31, so2: 7, co: 0.8, o3: 41, nh3: Some(6), pb: None },
                wards: &[
                    WardSeed {
                        id: "gandhipuram",
                        name: "Gandhipuram",
                        aqi: 90,
                        population: 240_000,
                        pollutants: PollutantReading { pm25: 45, pm10: 91, no2: 33, so2: 7, co: 0.8, o3: 40, nh3: Some(6), pb: None },
                    },
                    WardSeed {
                        id: "peelamedu",
                        name: "Peelamedu",
                        aqi: 79,
                        population: 220_000,
                        pollutants: PollutantReading { pm25: 39, pm10: 80, no2: 29, so2: 6, co: 0.7, o3: 42, nh3: Some(5), pb: None },
                    },
                ],
            },
        ],
    },
];

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Looks up a city seed by id. Returns `None` if not found.
pub fn find_city(city_id: &str) -> Option<&'static CitySeed> {
    STATE_REGISTRY
        .iter()
        .flat_map(|s| s.cities.iter())
        .find(|c| c.id == city_id)
}

/// Total number of monitored cities across all states.
pub fn city_count() -> usize {
    STATE_REGISTRY.iter().map(|s| s.cities.len()).sum()
}

/// Build the unperturbed baseline tree.
///
/// Served only until the first simulation tick publishes a snapshot; state
/// AQI is already the rounded mean of its cities here, so the aggregation
/// invariant holds from the very first request.
pub fn baseline_snapshot(now: DateTime<Utc>) -> Snapshot {
    let states = STATE_REGISTRY
        .iter()
        .map(|state| {
            let cities: Vec<CityStatus> = state
                .cities
                .iter()
                .map(|city| CityStatus {
                    id: city.id.to_string(),
                    name: city.name.to_string(),
                    aqi: city.aqi,
                    category: AqiCategory::from_aqi(city.aqi),
                    population: city.population,
                    pollutants: city.pollutants.clone(),
                    dominant_source: city.dominant_source.to_string(),
                    wards: city
                        .wards
                        .iter()
                        .map(|ward| WardStatus {
                            id: ward.id.to_string(),
                            name: ward.name.to_string(),
                            aqi: ward.aqi,
                            category: AqiCategory::from_aqi(ward.aqi),
                            population: ward.population,
                            pollutants: ward.pollutants.clone(),
                        })
                        .collect(),
                    last_updated: now,
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
