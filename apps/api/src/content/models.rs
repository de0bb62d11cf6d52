use serde::{Deserialize, Serialize};

use crate::llm_client::lenient;

/// Writing style applied to a block of copy. Labels are interpolated into prompts verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageStyle {
    Santai,
    Profesional,
    Persuasif,
    Kreatif,
    Roasting,
    Sarkas,
    NativeStorytellingHumor,
}

impl LanguageStyle {
    /// Styles offered for captions, hooks and the rest of the general copy.
    pub const GENERAL: [LanguageStyle; 6] = [
        LanguageStyle::Santai,
        LanguageStyle::Profesional,
        LanguageStyle::Persuasif,
        LanguageStyle::Kreatif,
        LanguageStyle::Roasting,
        LanguageStyle::Sarkas,
    ];

    /// Styles offered for the voice-over script.
    pub const VOICE_OVER: [LanguageStyle; 7] = [
        LanguageStyle::NativeStorytellingHumor,
        LanguageStyle::Santai,
        LanguageStyle::Profesional,
        LanguageStyle::Persuasif,
        LanguageStyle::Kreatif,
        LanguageStyle::Roasting,
        LanguageStyle::Sarkas,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LanguageStyle::Santai => "Santai (Casual)",
            LanguageStyle::Profesional => "Profesional",
            LanguageStyle::Persuasif => "Persuasif",
            LanguageStyle::Kreatif => "Kreatif & Unik",
            LanguageStyle::Roasting => "Roasting",
            LanguageStyle::Sarkas => "Sarkas",
            LanguageStyle::NativeStorytellingHumor => "Native Ads + Storytelling Humor",
        }
    }
}

/// Opening archetype for the video's first seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookType {
    Kontroversial,
    PertanyaanRetoris,
    KutipanRelatable,
    FaktaMengejutkan,
    MasalahDanSolusi,
    BeforeAfter,
    XDibandingY,
    TestimoniReview,
    FirstImpressionUnboxing,
}

impl HookType {
    pub const ALL: [HookType; 9] = [
        HookType::Kontroversial,
        HookType::PertanyaanRetoris,
        HookType::KutipanRelatable,
        HookType::FaktaMengejutkan,
        HookType::MasalahDanSolusi,
        HookType::BeforeAfter,
        HookType::XDibandingY,
        HookType::TestimoniReview,
        HookType::FirstImpressionUnboxing,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HookType::Kontroversial => "Kontroversial",
            HookType::PertanyaanRetoris => "Pertanyaan Retoris",
            HookType::KutipanRelatable => "Kutipan Relatable",
            HookType::FaktaMengejutkan => "Fakta Mengejutkan",
            HookType::MasalahDanSolusi => "Masalah dan Solusi",
            HookType::BeforeAfter => "Before After",
            HookType::XDibandingY => "X dibanding Y",
            HookType::TestimoniReview => "Testimoni/Review",
            HookType::FirstImpressionUnboxing => "First Impression / Unboxing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoDuration {
    #[serde(rename = "SEC_15")]
    Sec15,
    #[serde(rename = "SEC_30")]
    Sec30,
    #[serde(rename = "SEC_45")]
    Sec45,
    #[serde(rename = "SEC_60")]
    Sec60,
}

impl VideoDuration {
    pub const ALL: [VideoDuration; 4] = [
        VideoDuration::Sec15,
        VideoDuration::Sec30,
        VideoDuration::Sec45,
        VideoDuration::Sec60,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VideoDuration::Sec15 => "15 Detik",
            VideoDuration::Sec30 => "30 Detik",
            VideoDuration::Sec45 => "45 Detik",
            VideoDuration::Sec60 => "60 Detik",
        }
    }
}

/// Style knobs for one generation call. `hook_type: None` leaves the hook style to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPreferences {
    pub general_style: LanguageStyle,
    pub voice_over_style: LanguageStyle,
    pub hook_type: Option<HookType>,
    pub target_duration: VideoDuration,
}

impl Default for ContentPreferences {
    fn default() -> Self {
        Self {
            general_style: LanguageStyle::Santai,
            voice_over_style: LanguageStyle::NativeStorytellingHumor,
            hook_type: None,
            target_duration: VideoDuration::Sec30,
        }
    }
}

/// The marketing bundle returned by the model.
///
/// Wire keys follow the JSON contract given to the model. Missing, `null` or
/// mistyped fields deserialize as empty; completeness is checked separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    #[serde(default, deserialize_with = "lenient::text")]
    pub caption: String,
    #[serde(rename = "narasiSubtitle", default, deserialize_with = "lenient::text")]
    pub subtitle_narration: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hashtags: String,
    #[serde(rename = "judulThumbnail", default, deserialize_with = "lenient::text_list")]
    pub thumbnail_titles: Vec<String>,
    #[serde(rename = "saranTextOverlay", default, deserialize_with = "lenient::text_list")]
    pub overlay_texts: Vec<String>,
    #[serde(rename = "hook", default, deserialize_with = "lenient::text_list")]
    pub hooks: Vec<String>,
    #[serde(rename = "hookNegative", default, deserialize_with = "lenient::text")]
    pub negative_hook: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub problem: String,
    #[serde(rename = "solusi", default, deserialize_with = "lenient::text")]
    pub solution: String,
    #[serde(rename = "callToAction", default, deserialize_with = "lenient::text")]
    pub call_to_action: String,
    #[serde(rename = "narasiVoiceOver", default, deserialize_with = "lenient::text")]
    pub voice_over_script: String,
    #[serde(rename = "saranMusik", default, deserialize_with = "lenient::text")]
    pub music_suggestion: String,
}

impl GeneratedContent {
    /// Wire names of the required fields that are empty.
    ///
    /// Complete means: caption, narasiSubtitle and hashtags non-blank,
    /// hook and judulThumbnail with at least one entry.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.caption.trim().is_empty() {
            missing.push("caption");
        }
        if self.subtitle_narration.trim().is_empty() {
            missing.push("narasiSubtitle");
        }
        if self.hashtags.trim().is_empty() {
            missing.push("hashtags");
        }
        if self.hooks.is_empty() {
            missing.push("hook");
        }
        if self.thumbnail_titles.is_empty() {
            missing.push("judulThumbnail");
        }
        missing
    }

    pub fn hashtag_count(&self) -> usize {
        self.hashtags
            .split_whitespace()
            .filter(|tag| tag.starts_with('#') && tag.len() > 1)
            .count()
    }
}
