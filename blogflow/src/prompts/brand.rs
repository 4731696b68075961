//! Brand guideline block injected into stage prompts.

use serde::{Deserialize, Serialize};

/// Enumerated style and SEO rules for one publisher.
///
/// An empty block renders the short prompt set; a populated block renders
/// the detailed, brand-aligned prompt set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandGuidelines {
    /// Publisher name as it should appear in prompts.
    #[serde(default)]
    pub name: String,
    /// One-sentence mission statement.
    #[serde(default)]
    pub mission: String,
    /// Voice and tone rules.
    #[serde(default)]
    pub voice_rules: Vec<String>,
    /// Search optimization rules.
    #[serde(default)]
    pub seo_rules: Vec<String>,
    /// Audience-specific research hints.
    #[serde(default)]
    pub research_focus: Vec<String>,
}

impl BrandGuidelines {
    /// No brand rules at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Guidelines for Effortless Travel Now, an accessible-travel publisher.
    #[must_use]
    pub fn effortless_travel_now() -> Self {
        Self {
            name: "Effortless Travel Now (ETN)".to_string(),
            mission: "ETN focuses on making travel accessible and enjoyable for all travelers, \
                      with special emphasis on those with accessibility needs, pet owners, families, and seniors."
                .to_string(),
            voice_rules: to_rules(&[
                "Friendly yet professional: Write as a trusted travel companion, not a salesperson",
                "Inclusive and accessible: Use language that welcomes all travelers, especially those with accessibility needs",
                "Practical and actionable: Provide specific, useful advice rather than generic statements",
                "Warm and inspiring: Encourage travel while acknowledging challenges some travelers face",
                "Authoritative but not condescending: Demonstrate expertise without talking down to readers",
                "Avoid clichés and overly enthusiastic language like \"amazing,\" \"incredible,\" or \"must-see\"",
                "Use clear, straightforward language that avoids jargon",
                "Never end with generic phrases like \"So buckle up and start planning your dream vacation!\"",
                "Focus on practical information, authentic experiences, and inclusive travel options",
            ]),
            seo_rules: to_rules(&[
                "Focus on organic search optimization only (no paid advertising strategies)",
                "Follow white-hat SEO practices exclusively",
                "Target keywords must be naturally integrated throughout the content",
                "Include primary keywords in title, meta description, H1, and at least one H2",
                "Structure content with proper heading hierarchy (H1, H2, H3)",
                "Create comprehensive content that thoroughly addresses the search intent",
                "Include internal linking opportunities to relevant ETN content",
                "Ensure all images have descriptive alt text for accessibility and SEO",
                "Focus on underserved traveler groups (accessible travel, senior travelers, pet owners, etc.)",
                "Provide specific, actionable advice rather than general statements",
                "Address common questions and pain points from the target audience",
            ]),
            research_focus: to_rules(&[
                "If researching accessible travel: Include specific accessibility features, regulations, and accommodations",
                "If researching pet travel: Include pet policies, requirements, and pet-friendly accommodations",
                "If researching family travel: Include child-friendly activities, safety considerations, and family discounts",
                "If researching senior travel: Include mobility considerations, senior discounts, and medical information",
            ]),
        }
    }

    /// Returns true if no rule of any kind is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voice_rules.is_empty() && self.seo_rules.is_empty() && self.research_focus.is_empty()
    }

    /// Name to use in prompts, or a neutral fallback.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "the publisher"
        } else {
            &self.name
        }
    }

    /// Renders the voice rules as a titled bullet list.
    #[must_use]
    pub fn voice_block(&self) -> String {
        render_block(&format!("{} Brand Voice Guidelines:", self.display_name()), &self.voice_rules)
    }

    /// Renders the SEO rules as a titled bullet list.
    #[must_use]
    pub fn seo_block(&self) -> String {
        render_block(&format!("{} SEO Guidelines:", self.display_name()), &self.seo_rules)
    }

    /// Renders the research hints as a bullet list.
    #[must_use]
    pub fn research_block(&self) -> String {
        render_block(
            &format!("For {}'s audience specifically:", self.display_name()),
            &self.research_focus,
        )
    }
}

fn to_rules(rules: &[&str]) -> Vec<String> {
    rules.iter().map(|r| (*r).to_string()).collect()
}

fn render_block(title: &str, rules: &[String]) -> String {
    if rules.is_empty() {
        return String::new();
    }
    let mut out = String::from(title);
    for rule in rules {
        out.push_str("\n- ");
        out.push_str(rule);
    }
    out
}
