//! Safe fallback replies for blocked content.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

use content_guard_core::{GuardrailContext, GuardrailResult, Industry, TemplateSelector};

const REAL_ESTATE_TEMPLATES: &[&str] = &[
    "I'd be happy to help you with your real estate needs. Could you share more about the type of property you're looking for?",
    "Let me connect you with one of our licensed agents who can answer that in detail.",
    "I can help you explore listings that match your budget and preferred location. What area are you interested in?",
];

const FINANCE_TEMPLATES: &[&str] = &[
    "I can share general information about our financial products. For personal advice, please speak with one of our licensed advisors.",
    "Every investment carries some risk. A member of our advisory team can walk you through the options that fit your goals.",
    "Let me connect you with a financial professional who can review your situation in detail.",
];

const HEALTHCARE_TEMPLATES: &[&str] = &[
    "I can't provide medical advice. Please consult a qualified healthcare provider about your situation.",
    "For questions about treatment or medication, your doctor or pharmacist is the best source of guidance.",
    "I'd be glad to help you schedule an appointment with one of our care providers.",
];

const INSURANCE_TEMPLATES: &[&str] = &[
    "Coverage depends on the specific policy and your circumstances. One of our licensed agents can review the details with you.",
    "I can help you start a quote, and an agent will follow up to explain what is and isn't covered.",
    "Let me connect you with an insurance specialist who can answer that accurately.",
];

const LEGAL_TEMPLATES: &[&str] = &[
    "I can't provide legal advice. Please consult a licensed attorney about your specific situation.",
    "Every case is different. I'd be happy to help you schedule a consultation with one of our attorneys.",
    "For questions about your rights or obligations, a qualified lawyer is the best source of guidance.",
];

const GENERAL_TEMPLATES: &[&str] = &[
    "I apologize, but I'm not able to help with that request. Is there something else I can assist you with?",
    "I'd be happy to help with a different question. Could you tell me more about what you're looking for?",
    "Let me connect you with a member of our team who can help further.",
];

/// Templates for an industry; industries without their own set use the general one.
pub fn templates_for(industry: &Industry) -> &'static [&'static str] {
    match industry {
        Industry::RealEstate => REAL_ESTATE_TEMPLATES,
        Industry::Finance => FINANCE_TEMPLATES,
        Industry::Healthcare => HEALTHCARE_TEMPLATES,
        Industry::Insurance => INSURANCE_TEMPLATES,
        Industry::Legal => LEGAL_TEMPLATES,
        _ => GENERAL_TEMPLATES,
    }
}

/// Uniform pseudo-random template choice.
pub struct RandomTemplateSelector {
    rng: Mutex<StdRng>,
}

impl RandomTemplateSelector {
    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl TemplateSelector for RandomTemplateSelector {
    fn select(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        // A poisoned RNG is still a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

#[derive(Clone)]
pub struct FallbackResponseGenerator {
    selector: Arc<dyn TemplateSelector>,
}

impl FallbackResponseGenerator {
    pub fn new(selector: Arc<dyn TemplateSelector>) -> Self {
        Self { selector }
    }

    /// Pick a template for the context's industry. Never empty.
    pub fn generate(&self, result: &GuardrailResult, context: &GuardrailContext) -> String {
        let templates = templates_for(&context.industry);
        // Out-of-range picks from a custom selector wrap instead of panicking.
        let index = self.selector.select(templates.len()) % templates.len();
        tracing::debug!(
            validation_id = %result.validation_id,
            industry = %context.industry,
            template = index,
            "Generated fallback response"
        );
        templates[index].to_string()
    }
}

impl Default for FallbackResponseGenerator {
    fn default() -> Self {
        Self::new(Arc::new(RandomTemplateSelector::from_entropy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_guard_core::mocks::FixedTemplateSelector;

    fn blocked() -> GuardrailResult {
        GuardrailResult::fail_closed("v-1", "test")
    }

    #[test]
    fn test_fixed_selector_pins_template() {
        let generator = FallbackResponseGenerator::new(Arc::new(FixedTemplateSelector(1)));
        let ctx = GuardrailContext::new(Industry::Finance);
        assert_eq!(generator.generate(&blocked(), &ctx), FINANCE_TEMPLATES[1]);
        assert_eq!(generator.generate(&blocked(), &ctx), FINANCE_TEMPLATES[1]);
    }

    #[test]
    fn test_out_of_range_selection_wraps() {
        let generator = FallbackResponseGenerator::new(Arc::new(FixedTemplateSelector(7)));
        let ctx = GuardrailContext::new(Industry::Legal);
        assert_eq!(generator.generate(&blocked(), &ctx), LEGAL_TEMPLATES[7 % LEGAL_TEMPLATES.len()]);
    }

    #[test]
    fn test_industries_without_templates_use_general_set() {
        assert_eq!(templates_for(&Industry::Retail), GENERAL_TEMPLATES);
        assert_eq!(templates_for(&Industry::Custom("aerospace".into())), GENERAL_TEMPLATES);
        assert_eq!(templates_for(&Industry::RealEstate), REAL_ESTATE_TEMPLATES);
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let a = RandomTemplateSelector::seeded(42);
        let b = RandomTemplateSelector::seeded(42);
        let picks_a: Vec<usize> = (0..16).map(|_| a.select(3)).collect();
        let picks_b: Vec<usize> = (0..16).map(|_| b.select(3)).collect();
        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|i| *i < 3));
    }

    #[test]
    fn test_every_template_is_non_empty() {
        for set in [
            REAL_ESTATE_TEMPLATES,
            FINANCE_TEMPLATES,
            HEALTHCARE_TEMPLATES,
            INSURANCE_TEMPLATES,
            LEGAL_TEMPLATES,
            GENERAL_TEMPLATES,
        ] {
            assert!(!set.is_empty());
            assert!(set.iter().all(|t| !t.trim().is_empty()));
        }
    }
}
