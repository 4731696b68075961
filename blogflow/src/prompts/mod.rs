//! Prompt rendering for the four stages.
//!
//! Nothing but plain text travels between stages, so every prompt repeats
//! the constraints its stage must honor: word count, keywords, audience and
//! (when configured) the brand rules. Rendering is pure interpolation.

mod brand;

pub use brand::BrandGuidelines;

use crate::core::{GenerationRequest, StageKind};
use crate::meta::{MetaExtractor, META_DESCRIPTION_PREFIX, META_TITLE_PREFIX, OPTIMIZED_CONTENT_MARKER};
use serde::{Deserialize, Serialize};

/// A rendered system instruction and user prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePrompt {
    /// Stage the prompt belongs to.
    pub stage: StageKind,
    /// System instruction (persona).
    pub system: String,
    /// User prompt (task).
    pub user: String,
}

/// Renders stage prompts, optionally brand-aligned.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    brand: &'a BrandGuidelines,
}

impl<'a> PromptBuilder<'a> {
    /// Creates a builder over `brand`. An empty block gives the short prompts.
    #[must_use]
    pub fn new(brand: &'a BrandGuidelines) -> Self {
        Self { brand }
    }

    fn branded(&self) -> bool {
        !self.brand.is_empty()
    }

    /// Renders the prompt for `stage` given the previous stage's text.
    ///
    /// `upstream` is ignored for the research stage.
    #[must_use]
    pub fn render(&self, stage: StageKind, request: &GenerationRequest, upstream: &str) -> StagePrompt {
        match stage {
            StageKind::Research => self.research(request),
            StageKind::Draft => self.draft(request, upstream),
            StageKind::Optimize => self.optimize(request, upstream),
            StageKind::Edit => self.edit(request, upstream),
        }
    }

    /// Research stage: facts, trends, expert opinion, examples, keyword angle.
    #[must_use]
    pub fn research(&self, request: &GenerationRequest) -> StagePrompt {
        let topic = &request.topic;
        let audience = &request.target_audience;
        let keywords = &request.primary_keywords;
        let words = request.desired_word_count;

        let (system, user) = if self.branded() {
            let system = "You are an expert travel researcher with a talent for finding relevant information, \
                          statistics, and insights. You provide comprehensive, well-structured research that goes \
                          beyond surface-level information and focuses on practical, actionable details for readers \
                          with specific needs."
                .to_string();
            let user = format!(
                "Research the topic: '{topic}' thoroughly and comprehensively.\n\
                 Focus on the target audience: {audience}.\n\
                 Consider these keywords: {keywords}.\n\
                 \n\
                 Provide extensive, in-depth research including:\n\
                 1. Key facts and statistics with credible sources\n\
                 2. Current trends and future predictions in the industry\n\
                 3. Expert opinions and quotes from recognized authorities\n\
                 4. Detailed case studies and relevant real-world examples\n\
                 5. Comprehensive keyword analysis for SEO (primary and related long-tail keywords)\n\
                 6. Common questions and pain points from the target audience\n\
                 7. Specific, actionable advice (not generic statements)\n\
                 \n\
                 {focus}\n\
                 \n\
                 Format your research in a highly structured way with clear sections, subsections, and bullet points.\n\
                 Include at least 10-15 key insights that will make this blog post stand out as authoritative and valuable.\n\
                 Aim for depth and comprehensiveness - this research will be used to create a detailed {words}-word blog post.\n\
                 \n\
                 Remember: {mission}",
                focus = self.brand.research_block(),
                mission = self.brand.mission,
            );
            (system, user)
        } else {
            let system = "You are an expert researcher who finds relevant facts, statistics, and insights \
                          for blog content."
                .to_string();
            let user = format!(
                "Research the topic: '{topic}'.\n\
                 Target audience: {audience}.\n\
                 Keywords to consider: {keywords}.\n\
                 \n\
                 Provide:\n\
                 1. Key facts and statistics\n\
                 2. Current trends\n\
                 3. Expert opinions\n\
                 4. Relevant examples\n\
                 5. An SEO keyword angle (primary and related keywords)\n\
                 \n\
                 This research will ground a {words}-word blog post."
            );
            (system, user)
        };

        StagePrompt { stage: StageKind::Research, system, user }
    }

    /// Draft stage: embeds the research verbatim and quotes the call to action.
    #[must_use]
    pub fn draft(&self, request: &GenerationRequest, research: &str) -> StagePrompt {
        let topic = &request.topic;
        let audience = &request.target_audience;
        let keywords = &request.primary_keywords;
        let cta = &request.call_to_action;
        let words = request.desired_word_count;

        let (system, user) = if self.branded() {
            let name = self.brand.display_name();
            let system = format!(
                "You are a skilled copywriter for {name}, specializing in comprehensive, engaging blog content \
                 that provides exceptional value to readers. You write long-form, authoritative content that ranks \
                 well in search engines while keeping the brand voice."
            );
            let user = format!(
                "Write a comprehensive, in-depth blog post on: '{topic}'.\n\
                 Target audience: {audience}\n\
                 Primary keywords: {keywords}\n\
                 Word count: {words} words (aim for at least {words} words)\n\
                 Call to action: {cta}\n\
                 \n\
                 Use this research to create an authoritative, valuable blog post:\n\
                 {research}\n\
                 \n\
                 Structure requirements:\n\
                 - Compelling, attention-grabbing introduction that establishes the importance of the topic\n\
                 - At least 7-10 main sections with descriptive headings (H2s) that include target keywords\n\
                 - Multiple subsections (H3s) under each main section\n\
                 - Detailed examples, case studies, and actionable advice in each section\n\
                 - Expert quotes or statistics with sources to support key points\n\
                 - Visual element suggestions (images, infographics, charts) at appropriate points\n\
                 - Comprehensive conclusion that summarizes key takeaways\n\
                 - Strong call to action: {cta}\n\
                 \n\
                 Content quality requirements:\n\
                 - Provide specific, actionable advice rather than general statements\n\
                 - Include step-by-step instructions where appropriate\n\
                 - Address common questions and objections from the target audience\n\
                 - Use a conversational yet authoritative tone\n\
                 - Ensure content is original, engaging, and provides exceptional value\n\
                 \n\
                 {voice}\n\
                 \n\
                 IMPORTANT: Avoid ending with generic phrases. End with specific, actionable advice related to the \
                 topic and a natural transition to the call to action.",
                voice = self.brand.voice_block(),
            );
            (system, user)
        } else {
            let system = "You are a skilled copywriter who writes engaging, well-structured blog posts.".to_string();
            let user = format!(
                "Write a blog post on: '{topic}'.\n\
                 Target audience: {audience}\n\
                 Primary keywords: {keywords}\n\
                 Word count: {words} words\n\
                 \n\
                 Use this research:\n\
                 {research}\n\
                 \n\
                 Include:\n\
                 - An engaging introduction\n\
                 - A body organized under descriptive subheadings\n\
                 - A conclusion that ends with this call to action: {cta}"
            );
            (system, user)
        };

        StagePrompt { stage: StageKind::Draft, system, user }
    }

    /// Optimize stage: embeds the draft and mandates the marker-line format.
    #[must_use]
    pub fn optimize(&self, request: &GenerationRequest, draft: &str) -> StagePrompt {
        let audience = &request.target_audience;
        let keywords = &request.primary_keywords;
        let format_block = format!(
            "Format your response as:\n\
             {META_TITLE_PREFIX} [Your meta title here]\n\
             {META_DESCRIPTION_PREFIX} [Your meta description here]\n\
             \n\
             {OPTIMIZED_CONTENT_MARKER}\n\
             [The optimized blog content]"
        );

        let (system, user) = if self.branded() {
            let name = self.brand.display_name();
            let system = format!(
                "You are an SEO expert for {name} who optimizes content to rank well in search engines while \
                 maintaining readability and user engagement. You follow white-hat SEO practices exclusively and \
                 recognize that good accessibility practices often align with good SEO practices."
            );
            let user = format!(
                "Optimize this blog draft for search engines following {name}'s SEO guidelines:\n\
                 \n\
                 {draft}\n\
                 \n\
                 Primary keywords: {keywords}\n\
                 Target audience: {audience}\n\
                 \n\
                 {seo}\n\
                 \n\
                 Please provide:\n\
                 1. An SEO-friendly meta title (under 60 characters) that includes the primary keyword and is compelling for clicks\n\
                 2. A compelling meta description (under 160 characters) that drives clicks and includes the primary keyword\n\
                 3. The optimized blog content with:\n\
                 \x20  - Proper keyword placement (title, headings, first paragraph, throughout content)\n\
                 \x20  - Optimized heading structure (H1, H2, H3)\n\
                 \x20  - Internal linking suggestions (at least 3-5 opportunities)\n\
                 \x20  - External linking suggestions to authoritative sources\n\
                 \x20  - Image alt text suggestions that include relevant keywords\n\
                 \n\
                 {format_block}\n\
                 \n\
                 Ensure the content remains natural and reader-friendly while being optimized for search engines.",
                seo = self.brand.seo_block(),
            );
            (system, user)
        } else {
            let system = "You are an SEO expert who optimizes blog content for search engines.".to_string();
            let user = format!(
                "Optimize this blog draft for search engines:\n\
                 \n\
                 {draft}\n\
                 \n\
                 Primary keywords: {keywords}\n\
                 Target audience: {audience}\n\
                 \n\
                 Provide a meta title (under 60 characters), a meta description (under 160 characters), \
                 and the optimized content.\n\
                 \n\
                 {format_block}"
            );
            (system, user)
        };

        StagePrompt { stage: StageKind::Optimize, system, user }
    }

    /// Edit stage: embeds the optimized body and asks for a final polish.
    ///
    /// The branded prompt also re-supplies the full marker-bearing text.
    #[must_use]
    pub fn edit(&self, request: &GenerationRequest, optimized: &str) -> StagePrompt {
        let audience = &request.target_audience;
        let cta = &request.call_to_action;
        let words = request.desired_word_count;
        let body = MetaExtractor::optimized_body(optimized);

        let (system, user) = if self.branded() {
            let name = self.brand.display_name();
            let system = format!(
                "You are a meticulous editor for {name} with an eye for detail who ensures content is polished, \
                 comprehensive, and ready for publication while keeping the brand voice."
            );
            let user = format!(
                "Edit and finalize this blog post to professional publishing standards for {name}:\n\
                 \n\
                 {body}\n\
                 \n\
                 For reference, the full SEO pass including meta data was:\n\
                 {optimized}\n\
                 \n\
                 Target audience: {audience}\n\
                 Word count: {words} words\n\
                 Call to action: {cta}\n\
                 \n\
                 {voice}\n\
                 \n\
                 Please:\n\
                 1. Correct any grammar, spelling, or punctuation errors\n\
                 2. Ensure the content flows logically and smoothly\n\
                 3. Verify that the blog meets the word count requirement of at least {words} words\n\
                 4. Check that the call to action is clear, compelling, and strategically placed\n\
                 5. Ensure consistent heading hierarchy, short scannable paragraphs, and lists where appropriate\n\
                 6. Remove any generic clichés or overly enthusiastic language\n\
                 7. Verify that the conclusion is strong and leads naturally to the call to action\n\
                 \n\
                 Return only the final, publication-ready article.",
                voice = self.brand.voice_block(),
            );
            (system, user)
        } else {
            let system = "You are a meticulous editor who polishes blog posts for publication.".to_string();
            let user = format!(
                "Edit and finalize this blog post:\n\
                 \n\
                 {body}\n\
                 \n\
                 Target audience: {audience}\n\
                 Word count: {words} words\n\
                 \n\
                 Correct grammar, spelling, and punctuation, improve the flow, and make sure the post \
                 meets the word count of {words} words. Return only the final article."
            );
            (system, user)
        };

        StagePrompt { stage: StageKind::Edit, system, user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("Pet-Friendly Beaches")
            .with_keywords("pet travel, dog beaches")
            .with_audience("pet owners")
            .with_call_to_action("Book your pet-friendly stay today")
            .with_word_count(1200)
    }

    fn both_variants() -> [BrandGuidelines; 2] {
        [BrandGuidelines::none(), BrandGuidelines::effortless_travel_now()]
    }

    #[test]
    fn test_research_restates_constraints() {
        for brand in both_variants() {
            let prompt = PromptBuilder::new(&brand).research(&request());
            assert_eq!(prompt.stage, StageKind::Research);
            assert!(prompt.user.contains("Pet-Friendly Beaches"));
            assert!(prompt.user.contains("pet owners"));
            assert!(prompt.user.contains("pet travel, dog beaches"));
            assert!(prompt.user.contains("1200-word"));
        }
    }

    #[test]
    fn test_draft_embeds_research_and_cta() {
        for brand in both_variants() {
            let prompt = PromptBuilder::new(&brand).draft(&request(), "RESEARCH_X\nline two");
            assert!(prompt.user.contains("RESEARCH_X\nline two"));
            assert!(prompt.user.contains("Book your pet-friendly stay today"));
            assert!(prompt.user.to_lowercase().contains("introduction"));
            assert!(prompt.user.to_lowercase().contains("conclusion"));
        }
    }

    #[test]
    fn test_optimize_requires_markers() {
        for brand in both_variants() {
            let prompt = PromptBuilder::new(&brand).optimize(&request(), "DRAFT_X");
            assert!(prompt.user.contains("DRAFT_X"));
            assert!(prompt.user.contains("\nMETA TITLE: "));
            assert!(prompt.user.contains("\nMETA DESCRIPTION: "));
            assert!(prompt.user.contains("\nOPTIMIZED CONTENT:\n"));
        }
    }

    #[test]
    fn test_edit_uses_body_portion() {
        let optimized = "META TITLE: T\nMETA DESCRIPTION: D\nOPTIMIZED CONTENT:\nBODY_X";

        let simple = BrandGuidelines::none();
        let prompt = PromptBuilder::new(&simple).edit(&request(), optimized);
        assert!(prompt.user.contains("BODY_X"));
        assert!(!prompt.user.contains("META TITLE"));
        assert!(prompt.user.contains("1200 words"));

        let branded = BrandGuidelines::effortless_travel_now();
        let prompt = PromptBuilder::new(&branded).edit(&request(), optimized);
        assert!(prompt.user.contains("BODY_X"));
        assert!(prompt.user.contains(optimized));
    }

    #[test]
    fn test_branded_prompts_carry_brand_rules() {
        let brand = BrandGuidelines::effortless_travel_now();
        let builder = PromptBuilder::new(&brand);
        assert!(builder.draft(&request(), "r").user.contains("Brand Voice Guidelines:"));
        assert!(builder.optimize(&request(), "d").user.contains("SEO Guidelines:"));
        assert!(builder.research(&request()).user.contains("If researching pet travel"));
        assert!(builder.edit(&request(), "o").system.contains("Effortless Travel Now"));
    }

    #[test]
    fn test_simple_prompts_have_no_brand_rules() {
        let brand = BrandGuidelines::none();
        let builder = PromptBuilder::new(&brand);
        assert!(!builder.draft(&request(), "r").user.contains("Guidelines"));
        assert!(!builder.optimize(&request(), "d").user.contains("Guidelines"));
    }

    #[test]
    fn test_render_dispatches_by_stage() {
        let brand = BrandGuidelines::none();
        let builder = PromptBuilder::new(&brand);
        for stage in StageKind::ALL {
            assert_eq!(builder.render(stage, &request(), "up").stage, stage);
        }
    }
}
