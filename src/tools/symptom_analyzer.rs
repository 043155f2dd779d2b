use serde::{Deserialize, Serialize};

use super::{contains_any, rule, to_strings, Tool};
use crate::error::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Emergency,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Emergency => "emergency",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub symptom: String,
    pub category: String,
    pub severity: Severity,
    pub description: String,
    pub possible_causes: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomReport {
    pub analyses: Vec<SymptomAnalysis>,
    pub general_advice: String,
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymptomArgs {
    #[serde(default)]
    pub symptoms: Vec<String>,
}

/// One row of the classification table.
struct CategoryRule {
    keywords: &'static [&'static str],
    category: &'static str,
    severity: fn(&str) -> Severity,
    description: &'static str,
    causes: &'static [&'static str],
    recommendations: &'static [&'static str],
}

fn always_mild(_: &str) -> Severity {
    Severity::Mild
}

fn always_severe(_: &str) -> Severity {
    Severity::Severe
}

fn pain_severity(text: &str) -> Severity {
    if contains_any(text, &["severe", "intense"]) {
        Severity::Severe
    } else {
        Severity::Moderate
    }
}

fn mood_severity(text: &str) -> Severity {
    if text.contains("severe") {
        Severity::Moderate
    } else {
        Severity::Mild
    }
}

// Order is priority: the first rule whose keywords match wins.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        keywords: &["severe", "heavy bleeding", "hemorrhag", "excruciating"],
        category: "Severe Symptom",
        severity: always_severe,
        description: "This symptom requires prompt medical attention.",
        causes: &["May indicate a serious condition requiring professional evaluation"],
        recommendations: &[
            "Seek medical attention as soon as possible",
            "Document when symptoms started and their intensity",
            "Do not delay professional consultation",
        ],
    },
    CategoryRule {
        keywords: &["pain", "cramp"],
        category: "Pain/Discomfort",
        severity: pain_severity,
        description: "Pain or cramping during menstrual cycle",
        causes: &[
            "Dysmenorrhea (menstrual cramps)",
            "Endometriosis",
            "Uterine fibroids",
            "Ovarian cysts",
        ],
        recommendations: &[
            "Apply heat to lower abdomen",
            "Try over-the-counter pain relievers (NSAIDs)",
            "Gentle exercise and stretching",
            "If severe or worsening, consult a healthcare provider",
        ],
    },
    CategoryRule {
        keywords: &["irregular", "missed period", "late period"],
        category: "Cycle Irregularity",
        severity: always_mild,
        description: "Variations in menstrual cycle timing",
        causes: &[
            "Stress",
            "Hormonal imbalances",
            "PCOS (Polycystic Ovary Syndrome)",
            "Thyroid disorders",
            "Pregnancy",
            "Weight changes",
        ],
        recommendations: &[
            "Track your cycle for 3 months",
            "Manage stress levels",
            "Maintain a healthy diet and exercise",
            "Consider pregnancy test if sexually active",
            "Consult doctor if irregularity persists",
        ],
    },
    CategoryRule {
        keywords: &["bloat", "swell"],
        category: "PMS Symptom",
        severity: always_mild,
        description: "Fluid retention and abdominal discomfort",
        causes: &[
            "Hormonal fluctuations",
            "Premenstrual syndrome (PMS)",
            "Dietary factors",
        ],
        recommendations: &[
            "Reduce salt intake",
            "Stay hydrated",
            "Avoid caffeine and alcohol",
            "Light exercise can help",
            "Consider magnesium supplements (consult doctor first)",
        ],
    },
    CategoryRule {
        keywords: &["mood", "anxiety", "depress", "irritab"],
        category: "Emotional/Psychological",
        severity: mood_severity,
        description: "Mood changes related to hormonal fluctuations",
        causes: &[
            "PMS (Premenstrual Syndrome)",
            "PMDD (Premenstrual Dysphoric Disorder)",
            "Hormonal changes",
            "Stress",
        ],
        recommendations: &[
            "Regular exercise",
            "Adequate sleep (7-9 hours)",
            "Stress management techniques",
            "Balanced diet rich in omega-3s",
            "Consider talking to a mental health professional if severe",
        ],
    },
    CategoryRule {
        keywords: &["fatigue", "tired", "exhausted"],
        category: "Energy/Fatigue",
        severity: always_mild,
        description: "Low energy or exhaustion",
        causes: &[
            "Hormonal changes",
            "Iron deficiency (especially with heavy periods)",
            "Thyroid issues",
            "Poor sleep quality",
        ],
        recommendations: &[
            "Ensure adequate iron intake",
            "Maintain regular sleep schedule",
            "Stay hydrated",
            "Consider iron and B12 levels check",
            "Balanced diet with complex carbohydrates",
        ],
    },
];

static GENERAL: CategoryRule = CategoryRule {
    keywords: &[],
    category: "General Symptom",
    severity: always_mild,
    description: "Symptom requires evaluation",
    causes: &["Various factors may contribute to this symptom"],
    recommendations: &[
        "Track when and how often this occurs",
        "Note any patterns or triggers",
        "Consult healthcare provider for proper evaluation",
        "Keep a symptom diary",
    ],
};

const URGENT_ADVICE: &str = "⚠️ IMPORTANT: Some of your symptoms may require immediate medical attention. \
Please consult a healthcare provider as soon as possible. Do not delay seeking professional medical care.";

const CONSULT_ADVICE: &str = "Based on your symptoms, it's advisable to consult with a healthcare provider, \
especially if symptoms persist or worsen. In the meantime, try the recommended self-care measures for each symptom.";

const SELF_CARE_ADVICE: &str = "Your symptoms appear to be common menstrual-related experiences. \
Try the recommended self-care measures. However, if symptoms persist, worsen, or concern you, \
don't hesitate to consult a healthcare provider. Trust your instincts about your body.";

/// Classify a single symptom description.
pub fn classify(symptom: &str) -> SymptomAnalysis {
    let lower = symptom.to_lowercase();
    let matched = RULES
        .iter()
        .find(|r| contains_any(&lower, r.keywords))
        .unwrap_or(&GENERAL);

    SymptomAnalysis {
        symptom: symptom.to_string(),
        category: matched.category.to_string(),
        severity: (matched.severity)(&lower),
        description: matched.description.to_string(),
        possible_causes: to_strings(matched.causes),
        recommendations: to_strings(matched.recommendations),
    }
}

/// Analyze every symptom in order and derive the overall advice.
pub fn analyze_symptoms(symptoms: &[String]) -> Result<SymptomReport, ToolError> {
    if symptoms.is_empty() {
        return Err(ToolError::NoSymptoms);
    }

    let analyses: Vec<SymptomAnalysis> = symptoms.iter().map(|s| classify(s)).collect();

    let worst = analyses.iter().map(|a| a.severity).max();
    let general_advice = match worst {
        Some(Severity::Severe) | Some(Severity::Emergency) => URGENT_ADVICE,
        Some(Severity::Moderate) => CONSULT_ADVICE,
        _ => SELF_CARE_ADVICE,
    };

    Ok(SymptomReport {
        analyses,
        general_advice: general_advice.to_string(),
        symptoms: symptoms.to_vec(),
    })
}

pub struct SymptomAnalyzer;

impl Tool for SymptomAnalyzer {
    type Args = SymptomArgs;
    type Output = SymptomReport;

    fn name(&self) -> &'static str {
        "symptomAnalyzer"
    }

    fn result_key(&self) -> &'static str {
        "analysis"
    }

    fn run(&self, args: &SymptomArgs) -> Result<SymptomReport, ToolError> {
        log::debug!("SymptomAnalyzer: {} symptom(s)", args.symptoms.len());
        analyze_symptoms(&args.symptoms)
    }

    fn format(&self, _args: &SymptomArgs, report: &SymptomReport) -> String {
        let mut output = format!("SYMPTOM ANALYSIS REPORT\n{}\n\n", rule(50));

        for (i, analysis) in report.analyses.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, analysis.symptom.to_uppercase()));
            output.push_str(&format!("   Category: {}\n", analysis.category));
            output.push_str(&format!(
                "   Severity: {}\n",
                analysis.severity.as_str().to_uppercase()
            ));
            output.push_str(&format!("   {}\n\n", analysis.description));

            output.push_str("   Possible Causes:\n");
            for cause in &analysis.possible_causes {
                output.push_str(&format!("   • {}\n", cause));
            }

            output.push_str("\n   Recommendations:\n");
            for rec in &analysis.recommendations {
                output.push_str(&format!("   • {}\n", rec));
            }
            output.push('\n');
        }

        output.push_str(&format!("{}\n", rule(50)));
        output.push_str(&format!("GENERAL ADVICE:\n{}\n", report.general_advice));
        output.push_str(&format!("{}\n\n", rule(50)));
        output.push_str(
            "Note: This analysis is for informational purposes only and does not replace \
            professional medical advice. Always consult with a qualified healthcare provider \
            for proper diagnosis and treatment.",
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(symptoms: &[&str]) -> SymptomReport {
        analyze_symptoms(&to_strings(symptoms)).unwrap()
    }

    #[test]
    fn test_severe_keyword_wins_over_pain() {
        let a = classify("Severe cramps");
        assert_eq!(a.severity, Severity::Severe);
        assert_eq!(a.category, "Severe Symptom");
    }

    #[test]
    fn test_severe_keyword_takes_precedence_everywhere() {
        for s in [
            "severe bloating",
            "severe mood swings",
            "severe fatigue",
            "severe irregular periods",
            "heavy bleeding",
            "excruciating headache",
        ] {
            assert_eq!(classify(s).category, "Severe Symptom", "{}", s);
        }
    }

    #[test]
    fn test_pain_severity_depends_on_intensity() {
        assert_eq!(classify("mild cramps").severity, Severity::Moderate);
        assert_eq!(classify("intense pelvic pain").severity, Severity::Severe);
        assert_eq!(classify("intense pelvic pain").category, "Pain/Discomfort");
    }

    #[test]
    fn test_categories_in_priority_order() {
        assert_eq!(classify("missed period").category, "Cycle Irregularity");
        assert_eq!(classify("bloating").category, "PMS Symptom");
        assert_eq!(classify("mood swings").category, "Emotional/Psychological");
        assert_eq!(classify("always tired").category, "Energy/Fatigue");
        assert_eq!(classify("breast tenderness").category, "General Symptom");
        // pain is checked before bloat
        assert_eq!(classify("bloating pain").category, "Pain/Discomfort");
    }

    #[test]
    fn test_general_advice_escalates() {
        assert!(analyze(&["bloating", "heavy bleeding"])
            .general_advice
            .contains("IMPORTANT"));
        assert!(analyze(&["bloating", "cramps"])
            .general_advice
            .starts_with("Based on your symptoms"));
        assert!(analyze(&["bloating", "fatigue"])
            .general_advice
            .starts_with("Your symptoms appear"));
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = analyze_symptoms(&[]).unwrap_err();
        assert_eq!(err, ToolError::NoSymptoms);
        assert!(err.to_string().contains("provide at least one symptom"));
    }

    #[test]
    fn test_preserves_input_order() {
        let report = analyze(&["fatigue", "cramps", "bloating"]);
        let names: Vec<&str> = report.analyses.iter().map(|a| a.symptom.as_str()).collect();
        assert_eq!(names, vec!["fatigue", "cramps", "bloating"]);
        assert_eq!(report.symptoms.len(), 3);
    }

    #[test]
    fn test_format_report() {
        let args = SymptomArgs {
            symptoms: to_strings(&["cramps"]),
        };
        let report = SymptomAnalyzer.run(&args).unwrap();
        let text = SymptomAnalyzer.format(&args, &report);
        assert!(text.starts_with("SYMPTOM ANALYSIS REPORT"));
        assert!(text.contains("1. CRAMPS"));
        assert!(text.contains("Severity: MODERATE"));
        assert!(text.contains("GENERAL ADVICE:"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(analyze(&["cramps"])).unwrap();
        assert_eq!(json["analyses"][0]["severity"], "moderate");
        assert!(json["analyses"][0]["possibleCauses"].is_array());
        assert!(json["generalAdvice"].is_string());
    }
}
