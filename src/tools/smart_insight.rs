use serde::{Deserialize, Serialize};

use super::{contains_any, rule, Tool};
use crate::error::ToolError;

/// How urgently the combined data warrants attention.
///
/// Ordered so that `raise` can take the maximum: rules may only escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Moderate,
    High,
}

impl Priority {
    pub fn raise(&mut self, candidate: Priority) {
        *self = (*self).max(candidate);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightData {
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub stress_level: Option<String>,
    #[serde(default)]
    pub cycle_phase: Option<String>,
    #[serde(default)]
    pub symptoms: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartInsight {
    pub overall_assessment: String,
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub connections: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stress {
    Low,
    Moderate,
    High,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
    Unknown,
}

const PHYSICAL_KEYWORDS: &[&str] = &["pain", "cramp", "bloat", "heavy"];
const EMOTIONAL_KEYWORDS: &[&str] = &["mood", "anxiety", "depress", "irritab"];

pub const COMBINED_ADVERSITY_CONNECTION: &str = "IMPORTANT: The combination of poor sleep and high \
    stress creates a harmful cycle affecting hormones, mood, and menstrual health.";

pub const INSUFFICIENT_DATA_INSIGHT: &str = "Insufficient data provided for comprehensive analysis.";

/// Normalized view of the optional inputs.
struct Signals {
    /// Hours as supplied; `None` when the value was not given.
    sleep: Option<f64>,
    stress: Stress,
    phase: Phase,
    symptoms: Vec<String>,
}

impl Signals {
    fn from_data(data: &InsightData) -> Self {
        let stress = match data.stress_level.as_deref().map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "high" => Stress::High,
            Some(s) if s == "moderate" => Stress::Moderate,
            Some(s) if s == "low" => Stress::Low,
            _ => Stress::Unknown,
        };
        let phase = match data.cycle_phase.as_deref().map(|s| s.trim().to_lowercase()) {
            Some(p) if p == "menstrual" => Phase::Menstrual,
            Some(p) if p == "follicular" => Phase::Follicular,
            Some(p) if p == "ovulation" => Phase::Ovulation,
            Some(p) if p == "luteal" || p == "premenstrual" => Phase::Luteal,
            _ => Phase::Unknown,
        };

        Self {
            sleep: data.sleep_hours,
            stress,
            phase,
            symptoms: data
                .symptoms
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    fn short_sleep(&self) -> bool {
        matches!(self.sleep, Some(h) if h < 7.0)
    }

    fn high_stress(&self) -> bool {
        self.stress == Stress::High
    }

    fn any_symptom(&self, keywords: &[&str]) -> bool {
        self.symptoms.iter().any(|s| contains_any(s, keywords))
    }
}

/// Accumulates findings across the rule groups.
#[derive(Default)]
struct Findings {
    insights: Vec<String>,
    recommendations: Vec<String>,
    connections: Vec<String>,
    priority: Priority,
}

impl Findings {
    fn insight(&mut self, text: &str) {
        self.insights.push(text.to_string());
    }

    fn recommend(&mut self, text: &str) {
        self.recommendations.push(text.to_string());
    }

    fn connect(&mut self, connection: &str, recommendation: &str) {
        self.connections.push(connection.to_string());
        self.recommendations.push(recommendation.to_string());
    }
}

fn sleep_rules(s: &Signals, f: &mut Findings) {
    // A supplied zero still counts as short sleep elsewhere, but gets no duration insight.
    let Some(hours) = s.sleep.filter(|h| *h > 0.0) else { return };

    if hours < 6.0 {
        f.insight("Your sleep duration is below the recommended 7-9 hours for women.");
        f.recommend("Aim for 7-9 hours of sleep to support hormonal balance and overall health.");
        f.priority.raise(Priority::High);
    } else if hours < 7.0 {
        f.insight("You're getting slightly less sleep than optimal.");
        f.recommend("Try to add 30-60 minutes to your sleep routine for better recovery.");
        f.priority.raise(Priority::Moderate);
    } else if hours <= 9.0 {
        f.insight("Your sleep duration is within the healthy range (7-9 hours).");
    } else {
        f.insight("You're sleeping more than 9 hours, which may indicate fatigue or health concerns.");
        f.recommend("If excessive sleep is new, consider consulting a healthcare provider.");
        f.priority.raise(Priority::Moderate);
    }
}

fn stress_rules(s: &Signals, f: &mut Findings) {
    match s.stress {
        Stress::High => {
            f.insight("High stress levels can significantly impact your menstrual cycle and overall health.");
            f.recommend("Incorporate stress-reduction techniques: meditation, deep breathing, or gentle exercise.");
            f.recommend("Consider speaking with a mental health professional if stress feels overwhelming.");
            f.priority.raise(Priority::High);
        }
        Stress::Moderate => {
            f.insight("Moderate stress is manageable but worth addressing to prevent escalation.");
            f.recommend("Regular exercise, adequate sleep, and mindfulness can help manage stress.");
            f.priority.raise(Priority::Moderate);
        }
        Stress::Low => f.insight("Your stress levels appear well-managed."),
        Stress::Unknown => {}
    }
}

fn phase_rules(s: &Signals, f: &mut Findings) {
    match s.phase {
        Phase::Menstrual => {
            f.insight("You're in the menstrual phase - a time when energy and mood are naturally lower.");
            if s.short_sleep() {
                f.connect(
                    "Low sleep during menstruation can worsen cramps and fatigue. Your body needs extra rest during this phase.",
                    "Prioritize 8-9 hours of sleep during your period to support recovery.",
                );
            }
            if s.high_stress() {
                f.connect(
                    "High stress during menstruation can intensify period symptoms and prolong bleeding.",
                    "Practice gentle self-care and avoid overcommitting during your period.",
                );
            }
            if s.any_symptom(&["cramp", "pain"]) {
                f.connect(
                    "Menstrual cramps combined with poor sleep or high stress create a challenging cycle.",
                    "Heat therapy, magnesium supplements, and anti-inflammatory foods can help.",
                );
            }
        }
        Phase::Follicular => {
            f.insight("You're in the follicular phase - typically a time of rising energy and positive mood.");
            if s.short_sleep() || s.high_stress() {
                f.connect(
                    "Even during your high-energy follicular phase, insufficient sleep or high stress can limit your potential.",
                    "This is your optimal time for productivity - ensure you're well-rested to take full advantage.",
                );
            }
            if !s.symptoms.is_empty() {
                f.connect(
                    "Experiencing symptoms during the follicular phase may indicate hormonal imbalances.",
                    "Track these symptoms and discuss with your healthcare provider if they persist.",
                );
                f.priority.raise(Priority::Moderate);
            }
        }
        Phase::Ovulation => {
            f.insight("You're at ovulation - your peak energy and confidence phase.");
            if s.short_sleep() {
                f.connect(
                    "While you feel energetic during ovulation, your body still needs adequate sleep for hormone production.",
                    "Don't sacrifice sleep even when you feel your best - it supports fertility and hormone balance.",
                );
            }
            if s.any_symptom(&["pain", "bloat"]) {
                f.insight("Some ovulation discomfort (mittelschmerz) is normal, but severe pain warrants medical attention.");
            }
        }
        Phase::Luteal => {
            f.insight("You're in the luteal/premenstrual phase - energy naturally declines and PMS may occur.");
            if s.short_sleep() {
                f.connect(
                    "Poor sleep during the luteal phase worsens PMS symptoms like mood swings and irritability.",
                    "Prioritize 8-9 hours of sleep in the week before your period to minimize PMS.",
                );
                f.priority.raise(Priority::High);
            }
            if s.high_stress() {
                f.connect(
                    "High stress during the luteal phase significantly amplifies PMS and PMDD symptoms.",
                    "Extra self-care during this phase is not optional - it's essential for your wellbeing.",
                );
                f.priority.raise(Priority::High);
            }
            if s.any_symptom(&["mood", "anxiety", "irritab"]) {
                f.connect(
                    "Mood symptoms before your period are linked to progesterone levels. Sleep and stress management are crucial.",
                    "Complex carbohydrates, magnesium, and B vitamins can help stabilize mood during this phase.",
                );
            }
            if s.any_symptom(&["bloat", "cramp"]) {
                f.connect(
                    "Physical PMS symptoms often worsen with poor sleep and high stress.",
                    "Reduce salt intake, stay hydrated, and try gentle movement to ease discomfort.",
                );
            }
        }
        Phase::Unknown => {}
    }
}

fn cross_factor_rules(s: &Signals, f: &mut Findings) {
    if s.short_sleep() && s.high_stress() {
        f.connect(
            COMBINED_ADVERSITY_CONNECTION,
            "Address both sleep and stress as priorities - they deeply influence each other and your cycle.",
        );
        f.priority.raise(Priority::High);
    }

    if s.symptoms.len() >= 3 {
        f.insights.push(format!(
            "You're experiencing multiple symptoms ({}), which suggests your body needs extra support.",
            s.symptoms.len()
        ));
        if s.short_sleep() || s.high_stress() {
            f.connect(
                "Multiple symptoms combined with inadequate sleep or high stress indicates your body is overwhelmed.",
                "Consider a holistic approach: improve sleep, manage stress, optimize nutrition, and consult your healthcare provider.",
            );
            f.priority.raise(Priority::High);
        }
    }

    if s.any_symptom(PHYSICAL_KEYWORDS) && s.any_symptom(EMOTIONAL_KEYWORDS) {
        f.connect(
            "You're experiencing both physical and emotional symptoms, which is common but taxing.",
            "Address physical symptoms first (pain management, nutrition) to improve emotional wellbeing.",
        );
    }
}

fn assessment(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "⚠️ HIGH PRIORITY: Your current patterns show areas that need immediate attention. \
            The combination of factors is creating a challenging cycle for your health. \
            Focus on the key recommendations to break this pattern.",
        Priority::Moderate => "⚡ MODERATE ATTENTION NEEDED: You're managing fairly well, but some \
            adjustments could significantly improve your experience. Small changes now can prevent \
            bigger issues later.",
        Priority::Low => "✅ OVERALL POSITIVE: Your current patterns support good menstrual health. \
            Continue these healthy habits and stay mindful of your body's signals.",
    }
}

/// Correlate sleep, stress, cycle phase and symptoms into one insight.
pub fn generate_smart_insight(data: &InsightData) -> SmartInsight {
    let signals = Signals::from_data(data);
    let mut findings = Findings::default();

    sleep_rules(&signals, &mut findings);
    stress_rules(&signals, &mut findings);
    phase_rules(&signals, &mut findings);
    cross_factor_rules(&signals, &mut findings);

    if findings.insights.is_empty() {
        findings.insight(INSUFFICIENT_DATA_INSIGHT);
        findings.recommend("Track sleep, stress levels, cycle phase, and symptoms for personalized insights.");
    }
    if findings.recommendations.is_empty() {
        findings.recommend("Continue monitoring your health patterns and maintain healthy lifestyle habits.");
    }

    SmartInsight {
        overall_assessment: assessment(findings.priority).to_string(),
        key_insights: findings.insights,
        recommendations: findings.recommendations,
        connections: findings.connections,
        priority: findings.priority,
    }
}

pub struct SmartInsightTool;

impl Tool for SmartInsightTool {
    type Args = InsightData;
    type Output = SmartInsight;

    fn name(&self) -> &'static str {
        "smartInsightTool"
    }

    fn result_key(&self) -> &'static str {
        "insight"
    }

    fn run(&self, data: &InsightData) -> Result<SmartInsight, ToolError> {
        let insight = generate_smart_insight(data);
        log::debug!(
            "SmartInsightTool: priority {:?}, {} insight(s), {} connection(s)",
            insight.priority,
            insight.key_insights.len(),
            insight.connections.len()
        );
        Ok(insight)
    }

    fn format(&self, data: &InsightData, insight: &SmartInsight) -> String {
        let mut output = format!("🧠 SMART HEALTH INSIGHTS\n{}\n\n", rule(60));

        output.push_str("📊 YOUR DATA:\n");
        if let Some(hours) = data.sleep_hours.filter(|h| *h > 0.0) {
            output.push_str(&format!("   Sleep: {} hours\n", hours));
        }
        if let Some(stress) = data.stress_level.as_deref().filter(|s| !s.is_empty()) {
            output.push_str(&format!("   Stress Level: {}\n", stress));
        }
        if let Some(phase) = data.cycle_phase.as_deref().filter(|p| !p.is_empty()) {
            output.push_str(&format!("   Cycle Phase: {}\n", phase));
        }
        if let Some(symptoms) = data.symptoms.as_ref().filter(|s| !s.is_empty()) {
            output.push_str(&format!("   Symptoms: {}\n", symptoms.join(", ")));
        }
        output.push('\n');

        output.push_str(&insight.overall_assessment);
        output.push_str("\n\n💡 KEY INSIGHTS:\n");
        for (i, item) in insight.key_insights.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", i + 1, item));
        }
        output.push('\n');

        if !insight.connections.is_empty() {
            output.push_str("🔗 IMPORTANT CONNECTIONS:\n");
            for connection in &insight.connections {
                output.push_str(&format!("   • {}\n", connection));
            }
            output.push('\n');
        }

        output.push_str("✅ PERSONALIZED RECOMMENDATIONS:\n");
        for (i, rec) in insight.recommendations.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", i + 1, rec));
        }

        output.push_str(&format!("\n{}\n", rule(60)));
        output.push_str(
            "Note: These insights are based on the data provided and general patterns. For \
            persistent concerns or severe symptoms, always consult with a healthcare provider.",
        );

        output
    }
}
