use serde::{Deserialize, Serialize};

use super::{contains_any, rule, to_strings, Tool};
use crate::error::ToolError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAdvice {
    pub recommended_foods: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NutritionArgs {
    #[serde(default)]
    pub goal: String,
}

struct Bucket {
    keywords: &'static [&'static str],
    recommended: &'static [&'static str],
    avoid: &'static [&'static str],
    note: &'static str,
}

// Checked top to bottom; the first bucket with a matching keyword wins.
const BUCKETS: &[Bucket] = &[
    // Menstrual cramps
    Bucket {
        keywords: &["cramp", "pain", "dysmenorrhea"],
        recommended: &[
            "Leafy greens (spinach, kale) - rich in iron and magnesium",
            "Fatty fish (salmon, sardines) - omega-3s reduce inflammation",
            "Bananas - potassium helps reduce cramping",
            "Ginger tea - natural anti-inflammatory",
            "Dark chocolate (70%+ cocoa) - magnesium and endorphins",
            "Nuts and seeds (almonds, pumpkin seeds) - magnesium and vitamin E",
            "Turmeric - anti-inflammatory properties",
            "Whole grains - vitamin B complex",
        ],
        avoid: &[
            "Caffeine - can increase tension and bloating",
            "Alcohol - dehydrates and worsens cramps",
            "High-salt foods - increases water retention",
            "Processed foods - inflammatory",
            "Red meat - can increase prostaglandins",
            "Refined sugar - causes inflammation",
        ],
        note: "Focus on anti-inflammatory foods rich in magnesium, omega-3s, and vitamin B. \
               Stay well-hydrated throughout your cycle.",
    },
    // Energy / fatigue
    Bucket {
        keywords: &["energy", "fatigue", "tired"],
        recommended: &[
            "Iron-rich foods (lean meat, lentils, beans) - prevents anemia",
            "Vitamin C sources (citrus, berries) - enhances iron absorption",
            "Complex carbohydrates (oats, quinoa, brown rice) - sustained energy",
            "B-vitamin foods (eggs, leafy greens, fortified cereals)",
            "Nuts and seeds - healthy fats and protein",
            "Greek yogurt - protein and probiotics",
            "Spinach - iron and folate",
            "Dark chocolate - small amounts for iron and mood",
        ],
        avoid: &[
            "Refined sugars - cause energy crashes",
            "Excessive caffeine - leads to crashes and disrupts sleep",
            "Processed snacks - empty calories",
            "Heavy, greasy foods - slow digestion",
            "Alcohol - disrupts sleep quality",
        ],
        note: "Iron deficiency is common with heavy periods. Pair iron-rich foods with vitamin C \
               for better absorption. Eat regular, balanced meals to maintain steady energy.",
    },
    // Hormonal balance / PCOS / irregular periods
    Bucket {
        keywords: &["hormone", "pcos", "irregular", "balance"],
        recommended: &[
            "Cruciferous vegetables (broccoli, cauliflower) - support estrogen metabolism",
            "Flaxseeds - lignans help balance hormones",
            "Fatty fish - omega-3s reduce inflammation",
            "Avocados - healthy fats for hormone production",
            "Berries - antioxidants and fiber",
            "Green tea - supports metabolism and hormonal balance",
            "Cinnamon - helps regulate blood sugar",
            "Whole grains - complex carbs and fiber",
        ],
        avoid: &[
            "Refined carbohydrates - spike blood sugar",
            "Trans fats - disrupt hormone production",
            "Excessive dairy - may worsen PCOS symptoms",
            "Processed meats - inflammatory",
            "Sugary drinks - insulin spikes",
            "Soy products (in excess) - phytoestrogens may affect balance",
        ],
        note: "Focus on low-glycemic foods to maintain stable blood sugar, which is crucial for \
               hormonal balance. Include plenty of fiber to support estrogen metabolism.",
    },
    // PMS / mood
    Bucket {
        keywords: &["pms", "mood", "anxiety", "depression", "emotional"],
        recommended: &[
            "Complex carbohydrates - boost serotonin production",
            "Calcium-rich foods (dairy, fortified plant milk) - reduces PMS symptoms",
            "Magnesium sources (nuts, seeds, dark chocolate) - mood stabilization",
            "Omega-3 fatty fish - supports brain health",
            "Vitamin B6 foods (chickpeas, bananas) - neurotransmitter production",
            "Chamomile tea - calming properties",
            "Eggs - vitamin D and B vitamins",
            "Berries - antioxidants for brain health",
        ],
        avoid: &[
            "Caffeine - increases anxiety and irritability",
            "Alcohol - worsens mood swings",
            "High sugar foods - blood sugar crashes affect mood",
            "Excessive salt - bloating and discomfort",
            "Processed foods - lack nutrients needed for mood regulation",
        ],
        note: "Calcium and magnesium are particularly important for managing PMS symptoms. \
               Maintain steady blood sugar with regular, balanced meals to stabilize mood.",
    },
    // Bloating / digestion
    Bucket {
        keywords: &["bloat", "digest", "gas"],
        recommended: &[
            "Ginger tea - aids digestion and reduces inflammation",
            "Peppermint tea - soothes digestive system",
            "Fennel seeds - reduces gas and bloating",
            "Papaya - digestive enzymes",
            "Bananas - potassium reduces water retention",
            "Cucumber - hydrating and anti-inflammatory",
            "Probiotic foods (yogurt, kefir) - gut health",
            "Lean proteins - easier to digest",
        ],
        avoid: &[
            "High-sodium foods - water retention",
            "Carbonated drinks - increases gas",
            "Cruciferous vegetables (during bloating) - can cause gas",
            "Beans and legumes (if sensitive) - can cause bloating",
            "Fried foods - slow digestion",
            "Artificial sweeteners - can cause bloating",
            "Dairy (if lactose intolerant)",
        ],
        note: "Reduce salt intake and stay hydrated to minimize water retention. Gentle movement \
               and smaller, frequent meals can also help reduce bloating.",
    },
    // Heavy bleeding
    Bucket {
        keywords: &["heavy bleeding", "menorrhagia", "blood loss"],
        recommended: &[
            "Iron-rich foods (red meat, liver, spinach) - replenish iron stores",
            "Vitamin C foods (oranges, strawberries) - improve iron absorption",
            "Leafy greens - iron and vitamin K",
            "Blackstrap molasses - high in iron",
            "Lentils and beans - plant-based iron",
            "Beetroot - supports blood production",
            "Pumpkin seeds - iron and zinc",
            "Vitamin K foods (kale, broccoli) - blood clotting",
        ],
        avoid: &[
            "Excessive caffeine - interferes with iron absorption",
            "Calcium supplements (with iron-rich meals) - blocks iron absorption",
            "Alcohol - depletes nutrients and affects clotting",
            "Aspirin (unless prescribed) - thins blood",
        ],
        note: "If you experience heavy bleeding regularly, consult a healthcare provider to rule \
               out underlying conditions. Focus on replenishing iron and other nutrients lost \
               during menstruation.",
    },
];

static GENERAL: Bucket = Bucket {
    keywords: &[],
    recommended: &[
        "Leafy greens - iron, folate, and essential nutrients",
        "Whole grains - B vitamins and fiber",
        "Lean proteins - hormone production and tissue repair",
        "Healthy fats (avocado, nuts, olive oil) - hormone balance",
        "Colorful fruits and vegetables - antioxidants and vitamins",
        "Fatty fish - omega-3s for inflammation",
        "Water - stay well-hydrated",
        "Fermented foods - gut health and immunity",
    ],
    avoid: &[
        "Excessive processed foods - lack nutrients",
        "Trans fats - inflammatory",
        "High sugar intake - blood sugar imbalances",
        "Excessive alcohol - disrupts hormones",
        "Too much caffeine - affects nutrient absorption",
    ],
    note: "A balanced diet rich in whole foods supports overall menstrual health. Focus on \
           nutrient-dense foods, adequate hydration, and regular eating patterns to maintain \
           hormonal balance.",
};

/// Dietary guidance for a free-text women's-health goal.
pub fn nutrition_advice(goal: &str) -> NutritionAdvice {
    let lower = goal.to_lowercase();
    let bucket = BUCKETS
        .iter()
        .find(|b| contains_any(&lower, b.keywords))
        .unwrap_or(&GENERAL);

    NutritionAdvice {
        recommended_foods: to_strings(bucket.recommended),
        foods_to_avoid: to_strings(bucket.avoid),
        note: bucket.note.to_string(),
    }
}

pub struct NutritionTool;

impl Tool for NutritionTool {
    type Args = NutritionArgs;
    type Output = NutritionAdvice;

    fn name(&self) -> &'static str {
        "nutritionTool"
    }

    fn result_key(&self) -> &'static str {
        "advice"
    }

    fn run(&self, args: &NutritionArgs) -> Result<NutritionAdvice, ToolError> {
        log::debug!("NutritionTool: goal '{}'", args.goal);
        Ok(nutrition_advice(&args.goal))
    }

    fn format(&self, args: &NutritionArgs, advice: &NutritionAdvice) -> String {
        let mut output = format!(
            "NUTRITION GUIDANCE FOR: {}\n{}\n\n",
            args.goal.to_uppercase(),
            rule(50)
        );

        output.push_str("✅ RECOMMENDED FOODS:\n");
        for food in &advice.recommended_foods {
            output.push_str(&format!("   • {}\n", food));
        }

        output.push_str("\n❌ FOODS TO AVOID:\n");
        for food in &advice.foods_to_avoid {
            output.push_str(&format!("   • {}\n", food));
        }

        output.push_str(&format!("\n{}\n", rule(50)));
        output.push_str(&format!("📝 NOTE: {}\n", advice.note));
        output.push_str(&format!("{}\n\n", rule(50)));
        output.push_str(
            "Remember: Individual nutritional needs vary. Consult with a registered dietitian or \
            healthcare provider for personalized advice, especially if you have specific health \
            conditions or dietary restrictions.",
        );

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_food(goal: &str) -> String {
        nutrition_advice(goal).recommended_foods[0].clone()
    }

    #[test]
    fn test_buckets_by_goal() {
        assert!(first_food("reduce menstrual cramps").starts_with("Leafy greens (spinach"));
        assert!(first_food("boost energy during period").starts_with("Iron-rich foods (lean"));
        assert!(first_food("hormonal balance").starts_with("Cruciferous"));
        assert!(first_food("help with PCOS").starts_with("Cruciferous"));
        assert!(first_food("reduce PMS symptoms").starts_with("Complex carbohydrates"));
        assert!(first_food("reduce bloating").starts_with("Ginger tea"));
        assert!(first_food("support heavy bleeding recovery").starts_with("Iron-rich foods (red"));
    }

    #[test]
    fn test_first_bucket_wins() {
        // cramps are checked before mood
        assert_eq!(
            nutrition_advice("mood and cramps"),
            nutrition_advice("cramps")
        );
        // energy is checked before bloating
        assert_eq!(
            nutrition_advice("bloating and low energy"),
            nutrition_advice("energy")
        );
    }

    #[test]
    fn test_falls_back_to_general() {
        let advice = nutrition_advice("eat healthier");
        assert!(advice.recommended_foods[0].starts_with("Leafy greens - iron, folate"));
        assert!(advice.note.starts_with("A balanced diet"));
        assert_eq!(nutrition_advice(""), advice);
    }

    #[test]
    fn test_format_contains_sections() {
        let args = NutritionArgs {
            goal: "reduce bloating".to_string(),
        };
        let advice = NutritionTool.run(&args).unwrap();
        let text = NutritionTool.format(&args, &advice);
        assert!(text.starts_with("NUTRITION GUIDANCE FOR: REDUCE BLOATING"));
        assert!(text.contains("RECOMMENDED FOODS"));
        assert!(text.contains("FOODS TO AVOID"));
        assert!(text.contains("Carbonated drinks"));
    }
}
