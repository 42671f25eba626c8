//! Fixed text pools

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Appended to every assistant reply
pub const MEDICAL_DISCLAIMER: &str = "⚠️ IMPORTANT MEDICAL DISCLAIMER: This application is for educational and informational purposes only. It is not intended to be a substitute for professional medical advice, diagnosis, or treatment. Always seek the advice of qualified healthcare providers for any medical concerns. Never disregard professional medical advice or delay seeking treatment because of information provided by this application.";

/// General recommendations attached to every symptom analysis
pub const SYMPTOM_RECOMMENDATIONS: [&str; 5] = [
    "Monitor symptoms closely and keep a symptom diary",
    "Maintain proper hydration and rest",
    "Consider scheduling an appointment with your healthcare provider",
    "Avoid self-medication without professional guidance",
    "Seek immediate medical attention if symptoms worsen",
];

/// Key points attached to every treatment plan
pub const TREATMENT_KEY_POINTS: [&str; 6] = [
    "Regular monitoring and follow-up appointments",
    "Lifestyle modifications as recommended",
    "Medication compliance if prescribed",
    "Proper nutrition and hydration",
    "Appropriate exercise and physical activity",
    "Stress management and mental health support",
];

const CHAT_POOL: [&str; 3] = [
    "Based on current medical knowledge, this is an important health topic. While I can provide general information, it's crucial to speak with a qualified healthcare provider for personalized advice and proper evaluation.",
    "This is a great question about health and wellness. Remember that individual health needs vary, so what works for one person may not be suitable for another. I recommend discussing this with your healthcare provider.",
    "Thank you for your health question. While I can offer general educational information, please remember this should not replace professional medical advice, diagnosis, or treatment.",
];

const SYMPTOMS_POOL: [&str; 3] = [
    "Based on the symptoms described, there could be several possible conditions. It's important to consult with a healthcare professional for proper diagnosis and treatment. Consider monitoring symptoms and seeking medical attention if they persist or worsen.",
    "The symptoms mentioned could indicate various conditions. Please seek medical evaluation, especially if symptoms are severe or persistent. In the meantime, ensure adequate rest, hydration, and avoid self-medication.",
    "These symptoms warrant professional medical assessment. While general wellness practices like rest and proper nutrition may help with comfort, a healthcare provider should evaluate these symptoms for accurate diagnosis.",
];

const TREATMENT_POOL: [&str; 3] = [
    "Here's a general approach for managing this condition: 1) Follow prescribed medications as directed by your healthcare provider, 2) Maintain healthy lifestyle habits including proper diet and regular exercise, 3) Schedule regular follow-ups for monitoring, 4) Practice stress management techniques. Always work with your healthcare team for personalized care.",
    "Treatment typically involves a comprehensive approach: Medical management under professional supervision, lifestyle modifications tailored to your needs, regular health monitoring and assessments, and patient education for self-management. Each treatment plan should be individualized.",
    "A holistic treatment strategy usually includes: Professional medical care with appropriate medications, lifestyle adjustments including diet and physical activity, regular health evaluations, and ongoing support and education. Collaborate closely with your healthcare providers.",
];

/// Which pool a reply is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKind {
    Chat,
    Symptoms,
    Treatment,
}

impl ResponseKind {
    /// The fixed pool for this kind
    pub fn pool(&self) -> &'static [&'static str] {
        match self {
            ResponseKind::Chat => &CHAT_POOL,
            ResponseKind::Symptoms => &SYMPTOMS_POOL,
            ResponseKind::Treatment => &TREATMENT_POOL,
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::Chat => write!(f, "chat"),
            ResponseKind::Symptoms => write!(f, "symptoms"),
            ResponseKind::Treatment => write!(f, "treatment"),
        }
    }
}

/// Uniform pick from the pool of `kind`
pub fn pick<R: Rng + ?Sized>(kind: ResponseKind, rng: &mut R) -> &'static str {
    // Pools are non-empty constants, so `choose` always yields a value.
    kind.pool().choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pools_have_three_entries() {
        for kind in [ResponseKind::Chat, ResponseKind::Symptoms, ResponseKind::Treatment] {
            assert_eq!(kind.pool().len(), 3, "pool for {}", kind);
        }
    }

    #[test]
    fn test_pick_returns_pool_member() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let reply = pick(ResponseKind::Symptoms, &mut rng);
            assert!(ResponseKind::Symptoms.pool().contains(&reply));
        }
    }

    #[test]
    fn test_pick_covers_whole_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<&str> = (0..200)
            .map(|_| pick(ResponseKind::Chat, &mut rng))
            .collect();
        assert_eq!(seen.len(), CHAT_POOL.len());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            assert_eq!(
                pick(ResponseKind::Treatment, &mut a),
                pick(ResponseKind::Treatment, &mut b)
            );
        }
    }

    #[test]
    fn test_fixed_lists() {
        assert_eq!(SYMPTOM_RECOMMENDATIONS.len(), 5);
        assert_eq!(TREATMENT_KEY_POINTS.len(), 6);
        assert!(MEDICAL_DISCLAIMER.contains("not intended to be a substitute"));
    }
}
