//! Advisory and insight derivations for the VayuWatch dashboard.
//!
//! Every function here is a pure transform from (category, AQI, population,
//! dominant source) to a structured advisory payload. Nothing is cached or
//! stored — handlers recompute payloads per request. The two functions that
//! need randomness (synthetic previous-day AQI, indicative escape distance)
//! take the RNG as a parameter so callers control determinism.
//!
//! All tunable coefficients live in the constants block below. They are
//! presentation-layer policy values, not calibrated epidemiology; adjust
//! them there without touching the derivation logic.

use rand::Rng;
use serde::Serialize;

use crate::models::AqiCategory;

// ---------------------------------------------------------------------------
// Policy constants
// ---------------------------------------------------------------------------

/// Fraction of the population assumed vulnerable (children + elderly).
pub const VULNERABLE_FRACTION: f64 = 0.25;
/// Indian demographic estimates used by the vulnerable-impact breakdown.
pub const CHILDREN_FRACTION: f64 = 0.26; // under 14
pub const ELDERLY_FRACTION: f64 = 0.09; // over 60
pub const RESPIRATORY_FRACTION: f64 = 0.08; // chronic respiratory conditions

/// Linear risk-score weights: AQI contributes up to 40 points, population
/// density up to 25, the vulnerable share a constant 8.75.
pub const RISK_AQI_WEIGHT: f64 = 40.0;
pub const RISK_DENSITY_WEIGHT: f64 = 20.0;
pub const RISK_DENSITY_CAP: f64 = 25.0;
pub const RISK_VULNERABLE_WEIGHT: f64 = 35.0;

/// NCAP comparison synthesizes its own 2017 baseline from the current value
/// and targets a 30% reduction from it. Self-referential on purpose — the
/// dashboard has no real historical series to compare against.
pub const NCAP_BASELINE_FACTOR: f64 = 1.25;
pub const NCAP_TARGET_FACTOR: f64 = 0.7;
pub const NCAP_TARGET_YEAR: u16 = 2026;

/// Share of the vulnerable groups actually at risk, per category.
pub fn risk_multiplier(category: AqiCategory) -> f64 {
    match category {
        AqiCategory::Good => 0.05,
        AqiCategory::Satisfactory => 0.1,
        AqiCategory::Moderate => 0.25,
        AqiCategory::Poor => 0.5,
        AqiCategory::VeryPoor => 0.75,
        AqiCategory::Severe => 0.95,
    }
}

/// Candidate contributing factors for day-over-day AQI movement.
///
/// Selection indexes this table by `|change| mod len`; the weights are kept
/// for reporting parity but do not influence selection.
pub const CHANGE_FACTORS: [(&str, f64); 7] = [
    ("Traffic congestion", 0.3),
    ("Industrial activity", 0.2),
    ("Weather stagnation", 0.15),
    ("Low wind speed", 0.12),
    ("Construction dust", 0.1),
    ("Temperature inversion", 0.08),
    ("Stubble burning", 0.05),
];

// ---------------------------------------------------------------------------
// Daily life impact
// ---------------------------------------------------------------------------

/// One activity's status plus a one-line advice string.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityAdvice<S> {
    pub status: S,
    pub advice: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WalkStatus {
    Allowed,
    Caution,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkStatus {
    Safe,
    Risky,
    Unsafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SchoolStatus {
    Allowed,
    Limited,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommuteStatus {
    Normal,
    #[serde(rename = "Mask Required")]
    MaskRequired,
    #[serde(rename = "Not Advised")]
    NotAdvised,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExerciseStatus {
    Safe,
    #[serde(rename = "Indoor Only")]
    IndoorOnly,
    Avoid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VentilationStatus {
    Open,
    Limited,
    Closed,
}

/// How the current category translates into everyday decisions.
#[derive(Debug, Clone, Serialize)]
pub struct DailyLifeImpact {
    pub morning_walk: ActivityAdvice<WalkStatus>,
    pub outdoor_work: ActivityAdvice<WorkStatus>,
    pub school_activity: ActivityAdvice<SchoolStatus>,
    pub commute: ActivityAdvice<CommuteStatus>,
    pub exercise: ActivityAdvice<ExerciseStatus>,
    pub window_ventilation: ActivityAdvice<VentilationStatus>,
}

pub fn daily_life_impact(category: AqiCategory) -> DailyLifeImpact {
    use AqiCategory::*;

    fn advice<S>(status: S, advice: &'static str) -> ActivityAdvice<S> {
        ActivityAdvice { status, advice }
    }

    match category {
        Good => DailyLifeImpact {
            morning_walk: advice(WalkStatus::Allowed, "Perfect time for outdoor exercise"),
            outdoor_work: advice(WorkStatus::Safe, "No restrictions on outdoor activities"),
            school_activity: advice(
                SchoolStatus::Allowed,
                "All sports and outdoor games permitted",
            ),
            commute: advice(
                CommuteStatus::Normal,
                "No mask needed for healthy individuals",
            ),
            exercise: advice(ExerciseStatus::Safe, "Ideal conditions for running/cycling"),
            window_ventilation: advice(
                VentilationStatus::Open,
                "Fresh air circulation recommended",
            ),
        },
        Satisfactory => DailyLifeImpact {
            morning_walk: advice(WalkStatus::Allowed, "Safe for most people"),
            outdoor_work: advice(
                WorkStatus::Safe,
                "Minor precautions for sensitive individuals",
            ),
            school_activity: advice(SchoolStatus::Allowed, "Regular activities can continue"),
            commute: advice(CommuteStatus::Normal, "Sensitive groups may consider masks"),
            exercise: advice(ExerciseStatus::Safe, "Moderate intensity exercise is fine"),
            window_ventilation: advice(VentilationStatus::Open, "Natural ventilation is fine"),
        },
        Moderate => DailyLifeImpact {
            morning_walk: advice(
                WalkStatus::Caution,
                "Keep walks short, preferably early morning",
            ),
            outdoor_work: advice(WorkStatus::Risky, "Limit prolonged outdoor exposure"),
            school_activity: advice(SchoolStatus::Limited, "Reduce outdoor playtime duration"),
            commute: advice(CommuteStatus::MaskRequired, "N95 mask advised during travel"),
            exercise: advice(ExerciseStatus::IndoorOnly, "Shift workouts indoors"),
            window_ventilation: advice(VentilationStatus::Limited, "Open windows only briefly"),
        },
        Poor => DailyLifeImpact {
            morning_walk: advice(
                WalkStatus::Avoid,
                "Skip outdoor walks, try indoor exercise",
            ),
            outdoor_work: advice(WorkStatus::Unsafe, "Essential work only with protection"),
            school_activity: advice(SchoolStatus::Cancel, "No outdoor activities for children"),
            commute: advice(
                CommuteStatus::MaskRequired,
                "N95 mask mandatory, limit travel",
            ),
            exercise: advice(
                ExerciseStatus::IndoorOnly,
                "Only indoor activities with air purifier",
            ),
            window_ventilation: advice(
                VentilationStatus::Closed,
                "Keep windows shut, use air purifier",
            ),
        },
        VeryPoor => DailyLifeImpact {
            morning_walk: advice(WalkStatus::Avoid, "Stay indoors, health risk is high"),
            outdoor_work: advice(WorkStatus::Unsafe, "Work from home if possible"),
            school_activity: advice(
                SchoolStatus::Cancel,
                "Schools should shift to online mode",
            ),
            commute: advice(CommuteStatus::NotAdvised, "Avoid travel, work from home"),
            exercise: advice(ExerciseStatus::Avoid, "No strenuous activity even indoors"),
            window_ventilation: advice(
                VentilationStatus::Closed,
                "Seal windows, run air purifier",
            ),
        },
        Severe => DailyLifeImpact {
            morning_walk: advice(WalkStatus::Avoid, "EMERGENCY: Do not go outdoors"),
            outdoor_work: advice(WorkStatus::Unsafe, "All outdoor work banned"),
            school_activity: advice(SchoolStatus::Cancel, "Schools closed, online classes only"),
            commute: advice(CommuteStatus::NotAdvised, "Travel only for emergencies"),
            exercise: advice(ExerciseStatus::Avoid, "Complete rest advised"),
            window_ventilation: advice(VentilationStatus::Closed, "Emergency: Seal all openings"),
        },
    }
}

// ---------------------------------------------------------------------------
// Day-over-day change
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Improved,
    Worsened,
    Stable,
}

/// Movement relative to yesterday's reading.
#[derive(Debug, Clone, Serialize)]
pub struct AqiChange {
    /// Absolute point change.
    pub change: u16,
    pub direction: ChangeDirection,
    pub factor: &'static str,
    pub explanation: String,
    pub percent_change: u16,
}

/// Compare the current AQI to yesterday's.
///
/// When no previous value exists (or it is zero, which would make the
/// percentage meaningless) a synthetic yesterday within ±15–30% of today is
/// drawn from `rng`. Direction needs more than a 10-point move in either
/// direction; anything else counts as stable.
pub fn aqi_change(current: u16, previous: Option<u16>, rng: &mut impl Rng) -> AqiChange {
    let previous = match previous {
        Some(p) if p > 0 => p,
        _ => (f64::from(current) * (0.85 + rng.gen::<f64>() * 0.3)).round() as u16,
    };

    let change = i32::from(current) - i32::from(previous);
    let percent_change = if previous == 0 {
        0
    } else {
        ((f64::from(change) / f64::from(previous)).abs() * 100.0).round() as u16
    };

    let direction = if change > 10 {
        ChangeDirection::Worsened
    } else if change < -10 {
        ChangeDirection::Improved
    } else {
        ChangeDirection::Stable
    };

    let factor = CHANGE_FACTORS[change.unsigned_abs() as usize % CHANGE_FACTORS.len()].0;

    let explanation = match direction {
        ChangeDirection::Improved => format!(
            "AQI improved by {} points due to favorable wind conditions and reduced emissions.",
            change.abs()
        ),
        ChangeDirection::Worsened => format!(
            "AQI increased by {} points due to {} and atmospheric conditions.",
            change,
            factor.to_lowercase()
        ),
        ChangeDirection::Stable => {
            "AQI levels remained relatively stable compared to yesterday.".to_string()
        }
    };

    AqiChange {
        change: change.unsigned_abs() as u16,
        direction,
        factor,
        explanation,
        percent_change,
    }
}

// ---------------------------------------------------------------------------
// Pollution risk index
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    fn as_lower(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub contribution: u8,
}

/// Composite 0–100 risk score with its component breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct RiskIndex {
    pub level: RiskLevel,
    pub score: u8,
    pub factors: Vec<RiskFactor>,
    pub explanation: String,
}

/// Fixed linear scoring model over AQI, population, and a constant
/// vulnerable share. Level thresholds: > 75 Critical, > 50 High,
/// > 30 Medium, else Low.
pub fn risk_index(aqi: u16, population: u64, category: AqiCategory) -> RiskIndex {
    let aqi_component = (f64::from(aqi) / 500.0 * RISK_AQI_WEIGHT).min(RISK_AQI_WEIGHT);
    let density_component =
        (population as f64 / 1_000_000.0 * RISK_DENSITY_WEIGHT).min(RISK_DENSITY_CAP);
    let vulnerable_component = VULNERABLE_FRACTION * RISK_VULNERABLE_WEIGHT;

    let score = (aqi_component + density_component + vulnerable_component).round() as u8;

    let level = if score > 75 {
        RiskLevel::Critical
    } else if score > 50 {
        RiskLevel::High
    } else if score > 30 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    let factors = vec![
        RiskFactor {
            name: "Air Quality Index",
            contribution: aqi_component.round() as u8,
        },
        RiskFactor {
            name: "Population Density",
            contribution: density_component.round() as u8,
        },
        RiskFactor {
            name: "Vulnerable Groups",
            contribution: vulnerable_component.round() as u8,
        },
    ];

    let explanation = format!(
        "Risk level is {} based on {} air quality affecting {:.1}M residents, \
         with ~{}K vulnerable individuals.",
        level.as_lower(),
        category.label(),
        population as f64 / 1_000_000.0,
        (population as f64 * VULNERABLE_FRACTION / 1000.0).round() as u64,
    );

    RiskIndex {
        level,
        score,
        factors,
        explanation,
    }
}

// ---------------------------------------------------------------------------
// Vulnerable population impact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct VulnerableImpact {
    pub total_population: u64,
    pub at_risk_population: u64,
    pub children_affected: u64,
    pub elderly_affected: u64,
    pub respiratory_patients: u64,
    pub impact_statement: String,
}

/// Estimate how many residents the current category actually endangers.
pub fn vulnerable_impact(population: u64, category: AqiCategory) -> VulnerableImpact {
    let children_affected = (population as f64 * CHILDREN_FRACTION).round() as u64;
    let elderly_affected = (population as f64 * ELDERLY_FRACTION).round() as u64;
    let respiratory_patients = (population as f64 * RESPIRATORY_FRACTION).round() as u64;

    let exposed = children_affected + elderly_affected + respiratory_patients;
    let at_risk_population = (exposed as f64 * risk_multiplier(category)).round() as u64;

    let impact_statement = match category {
        AqiCategory::Good | AqiCategory::Satisfactory => format!(
            "Air quality is safe for most residents. Standard precautions for {} respiratory patients.",
            format_count(respiratory_patients)
        ),
        AqiCategory::Moderate => format!(
            "~{} sensitive individuals may experience mild discomfort.",
            format_count(at_risk_population)
        ),
        AqiCategory::Poor => format!(
            "~{} residents may experience respiratory symptoms today.",
            format_count(at_risk_population)
        ),
        AqiCategory::VeryPoor | AqiCategory::Severe => format!(
            "~{} residents at significant health risk. Medical preparedness advised.",
            format_count(at_risk_population)
        ),
    };

    VulnerableImpact {
        total_population: population,
        at_risk_population,
        children_affected,
        elderly_affected,
        respiratory_patients,
        impact_statement,
    }
}

/// Compact count for advisory text: 1.2M, 409K, 731.
fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}K", (n as f64 / 1000.0).round() as u64)
    } else {
        n.to_string()
    }
}

// ---------------------------------------------------------------------------
// Alert reasoning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// A reasoned alert for categories beyond satisfactory.
#[derive(Debug, Clone, Serialize)]
pub struct AlertReason {
    pub title: &'static str,
    pub reason: String,
    pub triggers: Vec<&'static str>,
    pub severity: AlertSeverity,
}

/// Why the current reading warrants attention. Returns `None` while the air
/// is good or satisfactory — no alert is better than a reassuring one.
pub fn alert_reason(
    aqi: u16,
    category: AqiCategory,
    dominant_source: Option<&str>,
) -> Option<AlertReason> {
    let source = dominant_source.unwrap_or("Multiple sources").to_lowercase();

    match category {
        AqiCategory::Good | AqiCategory::Satisfactory => None,
        AqiCategory::Severe => Some(AlertReason {
            title: "Health Emergency Alert",
            reason: format!(
                "AQI has reached {aqi} (Severe) primarily due to {source}. \
                 Temperature inversion is trapping pollutants near ground level."
            ),
            triggers: vec!["AQI > 400", "PM2.5 critically high", "Low wind dispersion"],
            severity: AlertSeverity::Critical,
        }),
        AqiCategory::VeryPoor => Some(AlertReason {
            title: "Severe Air Quality Warning",
            reason: format!(
                "AQI is {aqi} (Very Poor) caused by {source} combined with \
                 unfavorable meteorological conditions."
            ),
            triggers: vec!["AQI > 300", "High particulate matter", "Stagnant weather"],
            severity: AlertSeverity::Critical,
        }),
        AqiCategory::Poor => Some(AlertReason {
            title: "Poor Air Quality Advisory",
            reason: format!(
                "AQI is {aqi} (Poor) with {source} as the primary contributor. \
                 Sensitive groups should take precautions."
            ),
            triggers: vec!["AQI > 200", "Elevated PM2.5/PM10"],
            severity: AlertSeverity::Warning,
        }),
        AqiCategory::Moderate => Some(AlertReason {
            title: "Moderate Air Quality Notice",
            reason: format!(
                "AQI is {aqi} (Moderate). Minor breathing discomfort possible \
                 for very sensitive individuals."
            ),
            triggers: vec!["AQI > 100", "Moderate pollutant levels"],
            severity: AlertSeverity::Info,
        }),
    }
}

// ---------------------------------------------------------------------------
// Safety checklist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub checked: bool,
    pub priority: ChecklistPriority,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetyChecklist {
    pub items: Vec<ChecklistItem>,
    pub summary: &'static str,
}

pub fn safety_checklist(category: AqiCategory) -> SafetyChecklist {
    fn item(label: &'static str, checked: bool, priority: ChecklistPriority) -> ChecklistItem {
        ChecklistItem {
            label,
            checked,
            priority,
        }
    }
    use ChecklistPriority::*;

    // The AQI check itself is always the first, pre-ticked entry.
    let base = item("Check AQI before outdoor activities", true, Medium);

    match category {
        AqiCategory::Good | AqiCategory::Satisfactory => SafetyChecklist {
            items: vec![base, item("Enjoy outdoor activities freely", true, Low)],
            summary: "Air quality is good. No special precautions needed.",
        },
        AqiCategory::Moderate => SafetyChecklist {
            items: vec![
                base,
                item(
                    "Sensitive individuals should limit prolonged outdoor exposure",
                    false,
                    Medium,
                ),
                item("Keep windows partially open for ventilation", false, Low),
            ],
            summary: "Take basic precautions if you have respiratory conditions.",
        },
        AqiCategory::Poor => SafetyChecklist {
            items: vec![
                item("Wear N95 mask when going outside", false, High),
                item("Keep windows and doors closed", false, High),
                item("Use air purifier if available", false, Medium),
                item("Avoid outdoor exercise", false, Medium),
                item("Stay hydrated", false, Medium),
            ],
            summary: "Protect yourself with masks and limit outdoor exposure.",
        },
        AqiCategory::VeryPoor | AqiCategory::Severe => SafetyChecklist {
            items: vec![
                item("Stay indoors as much as possible", false, High),
                item("Wear N95 mask if going outside is unavoidable", false, High),
                item("Seal windows and doors", false, High),
                item("Run air purifier on highest setting", false, High),
                item("Avoid all physical exertion", false, High),
                item("Keep emergency medicines ready", false, High),
                item("Monitor symptoms, seek medical help if needed", false, High),
            ],
            summary: "Emergency precautions required. Minimize all outdoor exposure.",
        },
    }
}

// ---------------------------------------------------------------------------
// Authority recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Immediate,
    Recommended,
    Advisory,
}

/// One group of GRAP-style measures for civic authorities.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorityAction {
    pub category: &'static str,
    pub actions: Vec<&'static str>,
    pub urgency: Urgency,
}

pub fn authority_recommendations(category: AqiCategory) -> Vec<AuthorityAction> {
    fn group(
        category: &'static str,
        actions: Vec<&'static str>,
        urgency: Urgency,
    ) -> AuthorityAction {
        AuthorityAction {
            category,
            actions,
            urgency,
        }
    }

    match category {
        AqiCategory::Good | AqiCategory::Satisfactory => vec![group(
            "Routine Monitoring",
            vec![
                "Continue regular air quality monitoring",
                "Maintain green cover initiatives",
            ],
            Urgency::Advisory,
        )],
        AqiCategory::Moderate => vec![
            group(
                "Traffic Management",
                vec![
                    "Increase public transport frequency",
                    "Promote carpooling advisories",
                ],
                Urgency::Advisory,
            ),
            group(
                "Dust Control",
                vec![
                    "Intensify road sweeping",
                    "Water sprinkling in dusty areas",
                ],
                Urgency::Recommended,
            ),
        ],
        AqiCategory::Poor => vec![
            group(
                "Traffic Regulation",
                vec![
                    "Consider odd-even restrictions",
                    "Increase parking fees in congested areas",
                    "Deploy traffic marshals",
                ],
                Urgency::Recommended,
            ),
            group(
                "Construction Control",
                vec![
                    "Mandate dust barriers at all sites",
                    "Restrict construction during peak hours",
                    "Ensure material transport in covered vehicles",
                ],
                Urgency::Recommended,
            ),
            group(
                "Industrial Compliance",
                vec![
                    "Inspect industrial emission compliance",
                    "Penalize violators",
                ],
                Urgency::Recommended,
            ),
        ],
        AqiCategory::VeryPoor | AqiCategory::Severe => vec![
            group(
                "Emergency Traffic Measures",
                vec![
                    "Implement strict odd-even vehicle scheme",
                    "Ban entry of heavy diesel vehicles",
                    "Deploy additional metro/bus services",
                    "Work-from-home advisory for non-essential sectors",
                ],
                Urgency::Immediate,
            ),
            group(
                "Construction Ban",
                vec![
                    "Halt all construction activities",
                    "Stop demolition work",
                    "Ban stone crushing operations",
                ],
                Urgency::Immediate,
            ),
            group(
                "Industrial Actions",
                vec![
                    "Shut down non-essential polluting industries",
                    "Mandate emission control compliance",
                    "Power plant load optimization",
                ],
                Urgency::Immediate,
            ),
            group(
                "Public Health",
                vec![
                    "Issue health emergency advisories",
                    "Schools to shift to online mode",
                    "Open medical camps in high-risk areas",
                    "Distribute masks to vulnerable populations",
                ],
                Urgency::Immediate,
            ),
        ],
    }
}

// ---------------------------------------------------------------------------
// NCAP target comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NcapStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    Behind,
    Critical,
}

/// Progress toward the National Clean Air Programme reduction target.
#[derive(Debug, Clone, Serialize)]
pub struct NcapComparison {
    pub current_aqi: u16,
    pub target_aqi: u16,
    pub gap: u16,
    /// Percentage of the required reduction already achieved, 0–100.
    pub progress: u8,
    pub status: NcapStatus,
    pub year_to_achieve: u16,
}

/// Compare the current AQI against a synthesized NCAP trajectory: the 2017
/// baseline is reconstructed as `current × 1.25` and the target is a 30%
/// reduction from that baseline.
pub fn ncap_comparison(current_aqi: u16) -> NcapComparison {
    let baseline = (f64::from(current_aqi) * NCAP_BASELINE_FACTOR).round();
    let target = (baseline * NCAP_TARGET_FACTOR).round();

    let gap = (f64::from(current_aqi) - target).max(0.0) as u16;
    let reduction_needed = baseline - target;
    let reduction_achieved = baseline - f64::from(current_aqi);
    let progress = if reduction_needed > 0.0 {
        ((reduction_achieved / reduction_needed) * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8
    } else {
        0
    };

    let status = if progress < 30 {
        NcapStatus::Critical
    } else if progress < 60 {
        NcapStatus::Behind
    } else {
        NcapStatus::OnTrack
    };

    NcapComparison {
        current_aqi,
        target_aqi: target as u16,
        gap,
        progress,
        status,
        year_to_achieve: NCAP_TARGET_YEAR,
    }
}

// ---------------------------------------------------------------------------
// City personality
// ---------------------------------------------------------------------------

/// One-line mood label for a city's current air.
pub fn city_personality(category: AqiCategory) -> &'static str {
    match category {
        AqiCategory::Good => "Excellent air quality today",
        AqiCategory::Satisfactory => "Relatively breathable",
        AqiCategory::Moderate => "Moderate, watch for changes",
        AqiCategory::Poor => "Poor conditions, caution advised",
        AqiCategory::VeryPoor => "High health risk today",
        AqiCategory::Severe => "Emergency conditions",
    }
}

// ---------------------------------------------------------------------------
// Exposure projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExposureRisk {
    Minimal,
    Low,
    Moderate,
    Elevated,
    High,
}

/// What a week at the current level would mean.
#[derive(Debug, Clone, Serialize)]
pub struct ExposureProjection {
    pub days: u8,
    pub risk_level: ExposureRisk,
    pub statement: &'static str,
    pub disclaimer: &'static str,
}

const EXPOSURE_DISCLAIMER: &str = "Indicative projection based on current conditions. \
     Actual health impact depends on individual factors.";

pub fn exposure_projection(category: AqiCategory) -> ExposureProjection {
    let (risk_level, statement) = match category {
        AqiCategory::Good | AqiCategory::Satisfactory => (
            ExposureRisk::Minimal,
            "Current air quality poses minimal long-term risk with 7-day exposure.",
        ),
        AqiCategory::Moderate => (
            ExposureRisk::Low,
            "If conditions persist for 7 days, sensitive individuals may experience mild respiratory symptoms.",
        ),
        AqiCategory::Poor => (
            ExposureRisk::Moderate,
            "Continued exposure over 7 days may lead to respiratory discomfort in general population.",
        ),
        AqiCategory::VeryPoor => (
            ExposureRisk::Elevated,
            "If current conditions continue for 7 days, significant increase in respiratory issues expected. Medical resources should be on standby.",
        ),
        AqiCategory::Severe => (
            ExposureRisk::High,
            "CRITICAL: Prolonged exposure at this level poses serious health risk. Hospitalization rates may increase significantly.",
        ),
    };

    ExposureProjection {
        days: 7,
        risk_level,
        statement,
        disclaimer: EXPOSURE_DISCLAIMER,
    }
}

// ---------------------------------------------------------------------------
// Data confidence
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Simulated,
}

#[derive(Debug, Clone, Serialize)]
pub struct Confidence {
    pub level: ConfidenceLevel,
    pub label: &'static str,
    pub description: &'static str,
}

/// This service only ever serves simulated data, and says so.
pub fn confidence_level() -> Confidence {
    Confidence {
        level: ConfidenceLevel::Simulated,
        label: "Simulated Data",
        description: "Data simulated for demonstration. In production, this would \
             reflect real CPCB readings.",
    }
}

// ---------------------------------------------------------------------------
// Explain this AQI
// ---------------------------------------------------------------------------

/// Plain-language explanation of the current reading.
#[derive(Debug, Clone, Serialize)]
pub struct AqiExplanation {
    pub what_it_means: &'static str,
    pub why_it_happened: String,
    pub what_to_do: Vec<&'static str>,
    pub health_effects: &'static str,
    pub duration: &'static str,
}

pub fn explain_aqi(category: AqiCategory, dominant_source: Option<&str>) -> AqiExplanation {
    let source = dominant_source.unwrap_or("mixed pollution sources");

    match category {
        AqiCategory::Good => AqiExplanation {
            what_it_means: "Air quality is excellent. The air has minimal pollutants and is safe to breathe for everyone.",
            why_it_happened: "Favorable weather conditions with good wind dispersion are keeping pollutant levels low.".to_string(),
            what_to_do: vec![
                "Enjoy outdoor activities",
                "Open windows for fresh air",
                "Great day for exercise",
            ],
            health_effects: "No health impacts expected for the general population.",
            duration: "Conditions may vary throughout the day.",
        },
        AqiCategory::Satisfactory => AqiExplanation {
            what_it_means: "Air quality is acceptable. Most people will not experience health effects.",
            why_it_happened: "Moderate levels of emissions with adequate atmospheric dispersion.".to_string(),
            what_to_do: vec![
                "Normal activities are fine",
                "Sensitive individuals should monitor symptoms",
            ],
            health_effects: "Very sensitive individuals might experience mild discomfort.",
            duration: "Expected to remain stable unless weather changes.",
        },
        AqiCategory::Moderate => AqiExplanation {
            what_it_means: "Air has noticeable pollutants. While not dangerous for most, it may affect sensitive groups.",
            why_it_happened: format!("Elevated emissions from {source} with moderate atmospheric mixing."),
            what_to_do: vec![
                "Limit prolonged outdoor exposure",
                "Sensitive groups should reduce outdoor activity",
                "Consider wearing a mask",
            ],
            health_effects: "Children, elderly, and those with respiratory issues may feel discomfort.",
            duration: "Monitor for improvement, typically improves with better weather.",
        },
        AqiCategory::Poor => AqiExplanation {
            what_it_means: "Air quality is unhealthy. Most people may experience breathing discomfort on prolonged exposure.",
            why_it_happened: format!("High pollution from {source} combined with poor wind conditions trapping pollutants."),
            what_to_do: vec![
                "Wear N95 mask outdoors",
                "Keep windows closed",
                "Use air purifiers",
                "Avoid outdoor exercise",
            ],
            health_effects: "May cause breathing difficulties, coughing, and eye irritation.",
            duration: "Typically persists for 1-2 days unless weather improves.",
        },
        AqiCategory::VeryPoor => AqiExplanation {
            what_it_means: "Air is very unhealthy. Health alert: serious health effects possible for everyone.",
            why_it_happened: format!("Severe pollution from {source} with temperature inversion preventing pollutant dispersion."),
            what_to_do: vec![
                "Stay indoors",
                "Seal windows",
                "N95 mask mandatory if outside",
                "Avoid all outdoor activity",
            ],
            health_effects: "Respiratory illness likely on prolonged exposure. May affect even healthy individuals.",
            duration: "May persist for several days. Follow GRAP guidelines.",
        },
        AqiCategory::Severe => AqiExplanation {
            what_it_means: "HEALTH EMERGENCY. Everyone may experience serious health effects.",
            why_it_happened: format!("Emergency pollution levels from {source} with complete atmospheric stagnation."),
            what_to_do: vec![
                "Do not go outdoors",
                "Seal all openings",
                "Run air purifier",
                "Keep emergency medicines ready",
            ],
            health_effects: "Serious respiratory and cardiovascular impacts. Seek immediate medical help if symptoms occur.",
            duration: "Emergency conditions may last multiple days. Follow government advisories.",
        },
    }
}

// ---------------------------------------------------------------------------
// Clean air escapes
// ---------------------------------------------------------------------------

/// A nearby location considered as an escape candidate.
#[derive(Debug, Clone)]
pub struct NearbyAir {
    pub name: String,
    pub aqi: u16,
    pub category: AqiCategory,
}

#[derive(Debug, Clone, Serialize)]
pub struct CleanAirSuggestion {
    pub name: String,
    /// Indicative distance only; the dashboard has no routing data.
    pub distance: String,
    pub current_aqi: u16,
    pub improvement: u16,
    pub category: AqiCategory,
}

/// Up to five nearby locations with cleaner air, best first.
pub fn clean_air_escapes(
    current_aqi: u16,
    nearby: &[NearbyAir],
    rng: &mut impl Rng,
) -> Vec<CleanAirSuggestion> {
    let mut suggestions: Vec<CleanAirSuggestion> = nearby
        .iter()
        .filter(|loc| loc.aqi < current_aqi)
        .map(|loc| CleanAirSuggestion {
            name: loc.name.clone(),
            distance: format!("{} km", rng.gen_range(5..25)),
            current_aqi: loc.aqi,
            improvement: current_aqi - loc.aqi,
            category: loc.category,
        })
        .collect();
    suggestions.sort_by_key(|s| s.current_aqi);
    suggestions.truncate(5);
    suggestions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_risk_index_floor_is_the_vulnerable_constant() {
        // ---
        // With no AQI and no population the score is just 0.25 * 35.
        let risk = risk_index(0, 0, AqiCategory::Good);
        assert_eq!(risk.score, 9);
        assert_eq!(risk.level, RiskLevel::Low);
        assert_eq!(risk.factors[0].contribution, 0);
        assert_eq!(risk.factors[1].contribution, 0);
        assert_eq!(risk.factors[2].contribution, 9);
    }

    #[test]
    fn test_risk_index_saturates_components() {
        // ---
        // AQI caps at 40 points, density at 25, vulnerable is 8.75.
        let risk = risk_index(500, 10_000_000, AqiCategory::Severe);
        assert_eq!(risk.score, 74);
        assert_eq!(risk.level, RiskLevel::High);
        let total: u16 = risk.factors.iter().map(|f| u16::from(f.contribution)).sum();
        assert!(total >= 73 && total <= 75, "rounded parts should sum near score");
    }

    #[test]
    fn test_risk_index_level_thresholds() {
        // ---
        // 100/500*40 + 0.5*20 + 8.75 = 26.75 -> 27
        assert_eq!(risk_index(100, 500_000, AqiCategory::Satisfactory).level, RiskLevel::Low);
        // 200/500*40 + 0.5*20 + 8.75 = 34.75 -> 35
        assert_eq!(risk_index(200, 500_000, AqiCategory::Moderate).level, RiskLevel::Medium);
        // 400/500*40 + capped 25 + 8.75 = 65.75 -> 66
        assert_eq!(risk_index(400, 2_000_000, AqiCategory::Severe).level, RiskLevel::High);
        // The components cap at 40 + 25 + 8.75, so 74 is the model's ceiling
        // and the Critical band is unreachable by construction.
        assert_eq!(risk_index(500, 20_000_000, AqiCategory::Severe).level, RiskLevel::High);
    }

    #[test]
    fn test_risk_explanation_mentions_level_and_label() {
        // ---
        let risk = risk_index(380, 19_800_000, AqiCategory::VeryPoor);
        assert!(risk.explanation.contains("Very Poor air quality"));
        assert!(risk.explanation.contains("19.8M residents"));
    }

    #[test]
    fn test_ncap_comparison_reference_values() {
        // ---
        let ncap = ncap_comparison(100);
        assert_eq!(ncap.current_aqi, 100);
        assert_eq!(ncap.target_aqi, 87); // round(round(100 * 1.25) * 0.7)
        assert_eq!(ncap.gap, 13);
        assert_eq!(ncap.progress, 66); // (125 - 100) / (125 - 87)
        assert_eq!(ncap.status, NcapStatus::OnTrack);
        assert_eq!(ncap.year_to_achieve, 2026);
    }

    #[test]
    fn test_ncap_comparison_zero_current() {
        // ---
        let ncap = ncap_comparison(0);
        assert_eq!(ncap.target_aqi, 0);
        assert_eq!(ncap.gap, 0);
        assert_eq!(ncap.progress, 0);
        assert_eq!(ncap.status, NcapStatus::Critical);
    }

    #[test]
    fn test_ncap_status_serializes_with_space() {
        // ---
        assert_eq!(
            serde_json::to_string(&NcapStatus::OnTrack).unwrap(),
            "\"On Track\""
        );
    }

    #[test]
    fn test_aqi_change_worsened() {
        // ---
        let change = aqi_change(120, Some(100), &mut rng());
        assert_eq!(change.change, 20);
        assert_eq!(change.direction, ChangeDirection::Worsened);
        assert_eq!(change.percent_change, 20);
        // |20| mod 7 == 6
        assert_eq!(change.factor, "Stubble burning");
        assert!(change.explanation.contains("increased by 20 points"));
        assert!(change.explanation.contains("stubble burning"));
    }

    #[test]
    fn test_aqi_change_improved_reports_absolute_points() {
        // ---
        let change = aqi_change(80, Some(100), &mut rng());
        assert_eq!(change.change, 20);
        assert_eq!(change.direction, ChangeDirection::Improved);
        assert!(change.explanation.contains("improved by 20 points"));
    }

    #[test]
    fn test_aqi_change_small_delta_is_stable() {
        // ---
        for previous in [110, 100, 95, 91] {
            let change = aqi_change(100, Some(previous), &mut rng());
            assert_eq!(change.direction, ChangeDirection::Stable, "prev={previous}");
        }
        assert_eq!(
            aqi_change(100, Some(95), &mut rng()).explanation,
            "AQI levels remained relatively stable compared to yesterday."
        );
    }

    #[test]
    fn test_aqi_change_synthesizes_previous_when_missing_or_zero() {
        // ---
        let mut r = rng();
        for previous in [None, Some(0)] {
            for _ in 0..100 {
                let change = aqi_change(200, previous, &mut r);
                // Synthetic yesterday stays within ±15–30% of today.
                assert!(change.change <= 60, "synthetic delta too large: {}", change.change);
                assert!(change.percent_change <= 100);
            }
        }
    }

    #[test]
    fn test_change_factor_weights_are_reporting_only() {
        // ---
        // The table's weights sum to one but never influence selection;
        // the same delta always lands on the same factor.
        let sum: f64 = CHANGE_FACTORS.iter().map(|(_, w)| w).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        let a = aqi_change(117, Some(100), &mut rng()).factor;
        let b = aqi_change(117, Some(100), &mut rng()).factor;
        assert_eq!(a, b);
        assert_eq!(a, CHANGE_FACTORS[17 % 7].0);
    }

    #[test]
    fn test_vulnerable_impact_reference_values() {
        // ---
        let impact = vulnerable_impact(1_000_000, AqiCategory::Severe);
        assert_eq!(impact.children_affected, 260_000);
        assert_eq!(impact.elderly_affected, 90_000);
        assert_eq!(impact.respiratory_patients, 80_000);
        assert_eq!(impact.at_risk_population, 408_500); // 430_000 * 0.95
        assert!(impact.impact_statement.contains("significant health risk"));
    }

    #[test]
    fn test_vulnerable_impact_scales_with_category() {
        // ---
        let mild = vulnerable_impact(1_000_000, AqiCategory::Good);
        let harsh = vulnerable_impact(1_000_000, AqiCategory::Severe);
        assert_eq!(mild.at_risk_population, 21_500); // 430_000 * 0.05
        assert!(mild.at_risk_population < harsh.at_risk_population);
        assert!(mild.impact_statement.contains("safe for most residents"));
    }

    #[test]
    fn test_vulnerable_impact_zero_population() {
        // ---
        let impact = vulnerable_impact(0, AqiCategory::Poor);
        assert_eq!(impact.at_risk_population, 0);
        assert_eq!(impact.children_affected, 0);
    }

    #[test]
    fn test_format_count_tiers() {
        // ---
        assert_eq!(format_count(731), "731");
        assert_eq!(format_count(408_500), "409K");
        assert_eq!(format_count(1_200_000), "1.2M");
    }

    #[test]
    fn test_alert_reason_silent_when_air_is_fine() {
        // ---
        assert!(alert_reason(42, AqiCategory::Good, None).is_none());
        assert!(alert_reason(88, AqiCategory::Satisfactory, None).is_none());
    }

    #[test]
    fn test_alert_reason_severity_ladder() {
        // ---
        let moderate = alert_reason(150, AqiCategory::Moderate, None).unwrap();
        assert_eq!(moderate.severity, AlertSeverity::Info);

        let poor = alert_reason(250, AqiCategory::Poor, Some("Stubble burning")).unwrap();
        assert_eq!(poor.severity, AlertSeverity::Warning);
        assert!(poor.reason.contains("stubble burning"));

        let severe = alert_reason(430, AqiCategory::Severe, Some("Vehicular emissions")).unwrap();
        assert_eq!(severe.severity, AlertSeverity::Critical);
        assert_eq!(severe.title, "Health Emergency Alert");
        assert!(severe.reason.contains("AQI has reached 430"));
        assert!(severe.triggers.contains(&"AQI > 400"));
    }

    #[test]
    fn test_safety_checklist_grows_with_severity() {
        // ---
        assert_eq!(safety_checklist(AqiCategory::Good).items.len(), 2);
        assert_eq!(safety_checklist(AqiCategory::Moderate).items.len(), 3);
        assert_eq!(safety_checklist(AqiCategory::Poor).items.len(), 5);
        let severe = safety_checklist(AqiCategory::Severe);
        assert_eq!(severe.items.len(), 7);
        assert!(severe
            .items
            .iter()
            .all(|i| i.priority == ChecklistPriority::High));
        assert!(!severe.items.iter().any(|i| i.checked));
    }

    #[test]
    fn test_authority_recommendations_escalate() {
        // ---
        assert_eq!(authority_recommendations(AqiCategory::Good).len(), 1);
        assert_eq!(authority_recommendations(AqiCategory::Moderate).len(), 2);
        assert_eq!(authority_recommendations(AqiCategory::Poor).len(), 3);
        let emergency = authority_recommendations(AqiCategory::VeryPoor);
        assert_eq!(emergency.len(), 4);
        assert!(emergency.iter().all(|g| g.urgency == Urgency::Immediate));
    }

    #[test]
    fn test_daily_life_impact_extremes() {
        // ---
        let good = daily_life_impact(AqiCategory::Good);
        assert_eq!(good.morning_walk.status, WalkStatus::Allowed);
        assert_eq!(good.window_ventilation.status, VentilationStatus::Open);

        let severe = daily_life_impact(AqiCategory::Severe);
        assert_eq!(severe.morning_walk.status, WalkStatus::Avoid);
        assert_eq!(severe.commute.status, CommuteStatus::NotAdvised);
        assert_eq!(severe.window_ventilation.advice, "Emergency: Seal all openings");
    }

    #[test]
    fn test_daily_life_statuses_serialize_with_spaces() {
        // ---
        assert_eq!(
            serde_json::to_string(&CommuteStatus::MaskRequired).unwrap(),
            "\"Mask Required\""
        );
        assert_eq!(
            serde_json::to_string(&ExerciseStatus::IndoorOnly).unwrap(),
            "\"Indoor Only\""
        );
    }

    #[test]
    fn test_exposure_projection_tiers() {
        // ---
        assert_eq!(
            exposure_projection(AqiCategory::Good).risk_level,
            ExposureRisk::Minimal
        );
        assert_eq!(
            exposure_projection(AqiCategory::Moderate).risk_level,
            ExposureRisk::Low
        );
        assert_eq!(
            exposure_projection(AqiCategory::Poor).risk_level,
            ExposureRisk::Moderate
        );
        assert_eq!(
            exposure_projection(AqiCategory::VeryPoor).risk_level,
            ExposureRisk::Elevated
        );
        let severe = exposure_projection(AqiCategory::Severe);
        assert_eq!(severe.risk_level, ExposureRisk::High);
        assert_eq!(severe.days, 7);
    }

    #[test]
    fn test_city_personality_covers_extremes() {
        // ---
        assert_eq!(
            city_personality(AqiCategory::Good),
            "Excellent air quality today"
        );
        assert_eq!(city_personality(AqiCategory::Severe), "Emergency conditions");
    }

    #[test]
    fn test_confidence_is_always_simulated() {
        // ---
        let confidence = confidence_level();
        assert_eq!(confidence.level, ConfidenceLevel::Simulated);
        assert_eq!(confidence.label, "Simulated Data");
    }

    #[test]
    fn test_explain_aqi_interpolates_source() {
        // ---
        let explained = explain_aqi(AqiCategory::Poor, Some("Industrial emissions"));
        assert!(explained.why_it_happened.contains("Industrial emissions"));
        let fallback = explain_aqi(AqiCategory::Severe, None);
        assert!(fallback.why_it_happened.contains("mixed pollution sources"));
        assert_eq!(explain_aqi(AqiCategory::Good, None).what_to_do.len(), 3);
    }

    #[test]
    fn test_clean_air_escapes_filters_sorts_and_caps() {
        // ---
        let nearby: Vec<NearbyAir> = [
            ("a", 90),
            ("b", 300),
            ("c", 120),
            ("d", 60),
            ("e", 180),
            ("f", 150),
            ("g", 30),
        ]
        .into_iter()
        .map(|(name, aqi)| NearbyAir {
            name: name.to_string(),
            aqi,
            category: AqiCategory::from_aqi(aqi),
        })
        .collect();

        let escapes = clean_air_escapes(200, &nearby, &mut rng());
        assert_eq!(escapes.len(), 5, "capped at five even with six candidates");
        assert_eq!(escapes[0].name, "g");
        assert!(escapes.windows(2).all(|w| w[0].current_aqi <= w[1].current_aqi));
        assert!(escapes.iter().all(|s| s.current_aqi < 200));
        assert_eq!(escapes[0].improvement, 170);
        for suggestion in &escapes {
            let km: u32 = suggestion
                .distance
                .strip_suffix(" km")
                .expect("distance formatted as '<n> km'")
                .parse()
                .unwrap();
            assert!((5..25).contains(&km));
        }
    }

    #[test]
    fn test_clean_air_escapes_empty_when_nothing_cleaner() {
        // ---
        let nearby = vec![NearbyAir {
            name: "x".to_string(),
            aqi: 250,
            category: AqiCategory::Poor,
        }];
        assert!(clean_air_escapes(200, &nearby, &mut rng()).is_empty());
    }
}
