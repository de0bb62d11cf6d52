//! Plain-text export of a generated bundle, laid out the way the content is
//! presented for copy/paste.

use crate::content::models::GeneratedContent;

const FILENAME_PREFIX: &str = "Seluruh_Konten_Afiliasi_";
const FILENAME_FALLBACK: &str = "Generated";
const MAX_FILENAME_STEM_CHARS: usize = 80;
const EMPTY_PLACEHOLDER: &str = "-";

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the full bundle as titled sections of titled blocks. Empty blocks show `-`.
pub fn render_text_bundle(content: &GeneratedContent) -> String {
    let sections = [
        (
            "Saran untuk Postingan & Video",
            vec![
                ("Narasi Subtitle", content.subtitle_narration.clone()),
                ("Caption", content.caption.clone()),
                ("Hashtag", content.hashtags.clone()),
                ("Judul Thumbnail", numbered(&content.thumbnail_titles)),
                ("Saran Teks Overlay Video", numbered(&content.overlay_texts)),
                ("Saran Musik", content.music_suggestion.clone()),
            ],
        ),
        (
            "Struktur Konten Video/Postingan",
            vec![
                ("Hook (Pembuka)", numbered(&content.hooks)),
                ("Hook Negatif (Alternatif Pembuka)", content.negative_hook.clone()),
                ("Problem (Masalah Audiens)", content.problem.clone()),
                ("Solusi (Produk Sebagai Jawaban)", content.solution.clone()),
                ("Call To Action (Ajakan Bertindak)", content.call_to_action.clone()),
            ],
        ),
        (
            "Narasi VoiceOver",
            vec![("Naskah Lengkap", content.voice_over_script.clone())],
        ),
    ];

    let mut out = String::new();
    for (title, blocks) in sections {
        out.push_str(&format!("=== {title} ===\n\n"));
        for (heading, text) in blocks {
            let text = text.trim();
            let text = if text.is_empty() { EMPTY_PLACEHOLDER } else { text };
            out.push_str(&format!("{heading}\n{text}\n\n"));
        }
    }
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

/// Download filename for the bundle, derived from the caption.
pub fn export_filename(content: &GeneratedContent) -> String {
    let stem = sanitize_filename(&content.caption);
    let stem = if stem.is_empty() {
        FILENAME_FALLBACK.to_string()
    } else {
        stem
    };
    format!("{FILENAME_PREFIX}{stem}.txt")
}

/// Keeps ASCII letters, digits, `_` and `-`; whitespace runs become `_`.
fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-') || c.is_whitespace())
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_FILENAME_STEM_CHARS)
        .collect()
}
