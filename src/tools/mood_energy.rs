use serde::{Deserialize, Serialize};

use super::{contains_any, rule, Tool};
use crate::error::ToolError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEnergyAnalysis {
    pub mood_explanation: String,
    pub energy_explanation: String,
    pub general_tip: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoodEnergyArgs {
    #[serde(default)]
    pub phase: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

struct PhaseProfile {
    phase: CyclePhase,
    keywords: &'static [&'static str],
    mood: &'static str,
    energy: &'static str,
    tip: &'static str,
}

// Compound phrases contain the bare tokens of other phases, so the phases that
// own them come first. Checking menstrual first would send "premenstrual",
// "pre-menstrual", "before period", "after period" and "week after period" to
// menstrual; "pre-ovulation" only needs follicular ahead of ovulation.
const PROFILES: &[PhaseProfile] = &[
    PhaseProfile {
        phase: CyclePhase::Luteal,
        keywords: &["luteal", "pre-menstrual", "premenstrual", "before period", "pms"],
        mood: "During the luteal phase, progesterone rises while estrogen drops, which can \
            significantly impact mood. The first half may feel relatively stable, but as you \
            approach menstruation, you might experience PMS symptoms: mood swings, irritability, \
            anxiety, or sadness. Some women feel more introverted and prefer less social \
            stimulation. Emotional sensitivity increases, and you might feel more critical or \
            easily overwhelmed. This is when premenstrual dysphoric disorder (PMDD) symptoms \
            appear if you're affected by it.",
        energy: "Energy gradually declines during the luteal phase, especially in the week before \
            your period. Progesterone has a calming, sedating effect, which can make you feel \
            tired or sluggish. You might crave more sleep and find intense exercise less \
            appealing. Your body temperature rises slightly, which can affect sleep quality. As \
            menstruation approaches, energy typically reaches its lowest point.",
        tip: "Honor your need for a slower pace during this phase. Focus on self-care: warm baths, \
            gentle movement like yoga or stretching, and nourishing foods. Reduce commitments if \
            possible and create more downtime. Prioritize sleep (aim for 8-9 hours). Complex \
            carbohydrates and magnesium-rich foods can help stabilize mood. If PMS is severe, \
            track symptoms and discuss management strategies with your healthcare provider.",
    },
    PhaseProfile {
        phase: CyclePhase::Follicular,
        keywords: &["follicular", "pre-ovulation", "after period", "week after period"],
        mood: "The follicular phase is often called the 'spring' of your cycle. As estrogen rises, \
            you typically feel more optimistic, confident, and socially outgoing. Your mood tends \
            to be more stable and positive. Many women report feeling mentally sharp, creative, \
            and motivated during this time. You might find it easier to start new projects or \
            tackle challenging tasks.",
        energy: "Energy levels steadily increase throughout the follicular phase as estrogen rises. \
            You'll likely feel more energetic, motivated, and physically capable. This is often \
            the best time for high-intensity workouts, ambitious projects, and activities \
            requiring sustained focus. Your body is preparing for ovulation, and you may notice \
            increased stamina and endurance.",
        tip: "Take advantage of this high-energy phase! It's an ideal time to schedule important \
            meetings, start new projects, or tackle challenging workouts. Try new activities, be \
            social, and push yourself a bit more. Your body and mind are primed for action and \
            productivity during this phase.",
    },
    PhaseProfile {
        phase: CyclePhase::Ovulation,
        keywords: &["ovulat", "mid-cycle", "fertile window", "peak"],
        mood: "During ovulation, estrogen peaks along with a surge in testosterone, creating a \
            powerful mood boost. You may feel especially confident, attractive, and socially \
            magnetic. Communication skills are often enhanced, and you might feel more outgoing. \
            This is typically when you feel your best emotionally and mentally: alert, sharp, and \
            emotionally balanced.",
        energy: "Energy levels peak during ovulation. You'll likely experience maximum physical \
            strength, endurance, and pain tolerance. This is your body's 'summer': you feel \
            vibrant, powerful, and capable. It's the optimal time for intense exercise, athletic \
            performance, and physically demanding activities. Libido is also typically highest \
            during this phase.",
        tip: "This is your power phase! Schedule important presentations, social events, or \
            challenging workouts during ovulation. You're at your peak physically and mentally, \
            so make the most of it. If you're trying to conceive, this is your fertile window. \
            Enjoy the confidence boost and high energy while it lasts.",
    },
    PhaseProfile {
        phase: CyclePhase::Menstrual,
        keywords: &["menstrual", "period", "bleeding", "day 1", "first days"],
        mood: "During menstruation, hormone levels (estrogen and progesterone) are at their lowest. \
            This can lead to feelings of introspection, fatigue, and sometimes mild sadness or \
            irritability. You might feel more withdrawn and prefer quiet activities. Some women \
            experience relief as PMS symptoms subside, while others may feel emotionally \
            sensitive due to physical discomfort like cramps.",
        energy: "Energy levels are typically lowest during menstruation. The body is working hard \
            to shed the uterine lining, which requires energy. Blood loss (especially if periods \
            are heavy) can contribute to fatigue and reduced stamina. Iron levels may drop, \
            further affecting energy. Physical activities might feel more challenging, and you \
            may need more rest than usual.",
        tip: "Be gentle with yourself during this phase. Prioritize rest, stay hydrated, and eat \
            iron-rich foods to replenish what's lost. Light exercise like yoga or walking can \
            help boost mood and reduce cramps. Listen to your body and don't push yourself too \
            hard. This is a natural time for rest and restoration.",
    },
];

const GENERAL_MOOD: &str = "Mood fluctuates throughout the menstrual cycle due to changing hormone \
    levels. Estrogen, which rises in the first half of your cycle (follicular phase and \
    ovulation), tends to boost mood, confidence, and mental clarity. Progesterone, which dominates \
    the second half (luteal phase), has a calming but sometimes sedating effect. The interplay \
    between these hormones, along with testosterone, creates predictable emotional patterns \
    across your cycle.";

const GENERAL_ENERGY: &str = "Energy levels naturally ebb and flow with your menstrual cycle. The \
    follicular phase and ovulation typically bring higher energy, while the luteal phase and \
    menstruation bring lower energy. This is your body's natural rhythm, not a flaw or weakness. \
    Understanding these patterns helps you work with your body rather than against it, \
    scheduling demanding activities and rest accordingly.";

const GENERAL_TIP: &str = "Track your cycle phases and corresponding mood/energy patterns for 2-3 \
    months to understand your personal rhythm. Use apps or journals to note how you feel each \
    day. This awareness allows you to plan important tasks during high-energy phases and build in \
    rest during low-energy times. Honor your body's needs throughout all phases.";

/// Map a free-text phase description onto one of the four cycle phases.
pub fn detect_phase(phase: &str) -> Option<CyclePhase> {
    let lower = phase.to_lowercase();
    PROFILES
        .iter()
        .find(|p| contains_any(&lower, p.keywords))
        .map(|p| p.phase)
}

pub fn analyze_mood_energy(phase: &str) -> MoodEnergyAnalysis {
    let profile = detect_phase(phase).and_then(|detected| PROFILES.iter().find(|p| p.phase == detected));

    match profile {
        Some(p) => MoodEnergyAnalysis {
            mood_explanation: p.mood.to_string(),
            energy_explanation: p.energy.to_string(),
            general_tip: p.tip.to_string(),
        },
        None => MoodEnergyAnalysis {
            mood_explanation: GENERAL_MOOD.to_string(),
            energy_explanation: GENERAL_ENERGY.to_string(),
            general_tip: GENERAL_TIP.to_string(),
        },
    }
}

pub struct MoodEnergyTool;

impl Tool for MoodEnergyTool {
    type Args = MoodEnergyArgs;
    type Output = MoodEnergyAnalysis;

    fn name(&self) -> &'static str {
        "moodEnergyTool"
    }

    fn result_key(&self) -> &'static str {
        "analysis"
    }

    fn run(&self, args: &MoodEnergyArgs) -> Result<MoodEnergyAnalysis, ToolError> {
        log::debug!(
            "MoodEnergyTool: phase '{}' -> {:?}",
            args.phase,
            detect_phase(&args.phase)
        );
        Ok(analyze_mood_energy(&args.phase))
    }

    fn format(&self, args: &MoodEnergyArgs, analysis: &MoodEnergyAnalysis) -> String {
        let mut output = format!(
            "MOOD & ENERGY ANALYSIS: {} PHASE\n{}\n\n",
            args.phase.to_uppercase(),
            rule(60)
        );

        output.push_str("😊 MOOD PATTERNS:\n");
        output.push_str(&analysis.mood_explanation);
        output.push_str("\n\n⚡ ENERGY LEVELS:\n");
        output.push_str(&analysis.energy_explanation);
        output.push_str("\n\n");

        output.push_str(&format!("{}\n", rule(60)));
        output.push_str(&format!("💡 TIP: {}\n", analysis.general_tip));
        output.push_str(&format!("{}\n\n", rule(60)));
        output.push_str(
            "Remember: Every woman's experience is unique. These are general patterns, and your \
            personal experience may vary. Severe mood changes or energy crashes should be \
            discussed with a healthcare provider.",
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_phase() {
        assert_eq!(detect_phase("menstrual"), Some(CyclePhase::Menstrual));
        assert_eq!(detect_phase("on my period"), Some(CyclePhase::Menstrual));
        assert_eq!(detect_phase("Follicular"), Some(CyclePhase::Follicular));
        assert_eq!(detect_phase("ovulation"), Some(CyclePhase::Ovulation));
        assert_eq!(detect_phase("luteal"), Some(CyclePhase::Luteal));
        assert_eq!(detect_phase("PMS"), Some(CyclePhase::Luteal));
    }

    #[test]
    fn test_compound_phrases_reach_their_own_phase() {
        assert_eq!(detect_phase("premenstrual"), Some(CyclePhase::Luteal));
        assert_eq!(detect_phase("pre-menstrual"), Some(CyclePhase::Luteal));
        assert_eq!(detect_phase("the week before period"), Some(CyclePhase::Luteal));
        assert_eq!(detect_phase("week after period"), Some(CyclePhase::Follicular));
        assert_eq!(detect_phase("just after period"), Some(CyclePhase::Follicular));
        assert_eq!(detect_phase("pre-ovulation"), Some(CyclePhase::Follicular));
    }

    #[test]
    fn test_unknown_phase_uses_general_explanation() {
        assert_eq!(detect_phase("no idea"), None);
        let analysis = analyze_mood_energy("no idea");
        assert!(analysis.mood_explanation.starts_with("Mood fluctuates"));
        assert!(analysis.general_tip.starts_with("Track your cycle"));
    }

    #[test]
    fn test_format_uses_phase_name() {
        let args = MoodEnergyArgs {
            phase: "ovulation".to_string(),
        };
        let analysis = MoodEnergyTool.run(&args).unwrap();
        let text = MoodEnergyTool.format(&args, &analysis);
        assert!(text.starts_with("MOOD & ENERGY ANALYSIS: OVULATION PHASE"));
        assert!(text.contains("MOOD PATTERNS"));
        assert!(text.contains("ENERGY LEVELS"));
        assert!(text.contains("power phase"));
    }
}
