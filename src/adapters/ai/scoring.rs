//! Deterministic risk and premium scoring for generated policies.
//!
//! This is the scoring half of the generation collaborator: the model
//! writes the policy prose while these functions produce the structured
//! risk and pricing payloads attached to the document. Ingested uploads
//! never pass through here; they carry placeholder payloads instead.

use crate::domain::policy::{ClientProfile, Pricing, RiskAssessment, RiskFactor};
use std::collections::HashMap;

/// Scores a client profile into a banded risk assessment.
///
/// Starts from a neutral 0.5 and adds weighted factors for age, income,
/// medical history and lifestyle, clamped to `0.0..=1.0`.
pub fn assess_risk(profile: &ClientProfile) -> RiskAssessment {
    let mut score_value: f64 = 0.5;
    let mut factors = Vec::new();

    if profile.age > 60 {
        score_value += 0.2;
        factors.push(RiskFactor::new(
            "Age",
            "High",
            "Client is over 60, increasing health risk.",
        ));
    } else if profile.age < 25 {
        score_value += 0.1;
        factors.push(RiskFactor::new(
            "Age",
            "Medium",
            "Young client, potentially higher risk for certain insurance types.",
        ));
    }

    if profile.income < 20_000.0 {
        score_value += 0.1;
        factors.push(RiskFactor::new(
            "Income",
            "Medium",
            "Lower income may affect payment consistency.",
        ));
    }

    if profile.medical_history {
        score_value += 0.3;
        factors.push(RiskFactor::new(
            "Medical History",
            "High",
            "Pre-existing conditions increase premium.",
        ));
    }

    if profile.lifestyle == "high_risk" {
        score_value += 0.2;
        factors.push(RiskFactor::new(
            "Lifestyle",
            "High",
            "Engages in high-risk activities.",
        ));
    }

    let score_value = score_value.clamp(0.0, 1.0);
    let score = if score_value < 0.4 {
        "Low"
    } else if score_value < 0.7 {
        "Medium"
    } else {
        "High"
    };

    let names: Vec<&str> = factors.iter().map(|f| f.name.as_str()).collect();
    let explanation = format!(
        "Risk assessment concluded with a {} risk level due to factors: {}",
        score,
        names.join(", ")
    );

    RiskAssessment {
        score: score.to_string(),
        score_value,
        factors,
        explanation,
    }
}

/// Premium per $1000 of coverage for a known insurance line.
fn base_rate(kind: &str) -> f64 {
    match kind.to_lowercase().as_str() {
        "life" => 0.1,
        "health" => 0.5,
        "auto" => 0.3,
        "property" => 0.2,
        _ => 0.3,
    }
}

fn risk_multiplier(score: &str) -> f64 {
    match score {
        "Low" => 0.8,
        "High" => 1.5,
        _ => 1.0,
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Prices coverage from the risk band, coverage amount and insurance line.
pub fn price(risk_score: &str, coverage_amount: f64, kind: &str) -> Pricing {
    let multiplier = risk_multiplier(risk_score);
    let monthly_base = (coverage_amount / 1000.0) * base_rate(kind) * multiplier;

    let processing_fee = 10.0;
    let rider_cost = 25.0;

    let monthly_total = monthly_base + processing_fee + rider_cost;
    // 5% discount for paying yearly.
    let yearly_total = monthly_total * 12.0 * 0.95;

    let mut breakdown = HashMap::new();
    breakdown.insert("base_premium".to_string(), monthly_base);
    breakdown.insert("processing_fee".to_string(), processing_fee);
    breakdown.insert("rider_costs".to_string(), rider_cost);
    breakdown.insert(
        "risk_adjustment".to_string(),
        (multiplier - 1.0) * monthly_base,
    );

    let explanation = format!(
        "Calculated pricing for {} insurance with a {} risk profile. \
         Base rate adjusted by {}x for risk. Monthly premium: ${:.2}.",
        kind, risk_score, multiplier, monthly_total
    );

    Pricing {
        monthly_premium: round_cents(monthly_total),
        yearly_premium: round_cents(yearly_total),
        coverage_amount,
        breakdown,
        explanation,
    }
}
