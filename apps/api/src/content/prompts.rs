// All LLM prompt constants for the Content Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// High temperature: generation wants varied, creative copy.
pub const GENERATION_TEMPERATURE: f32 = 0.8;
pub const GENERATION_TOP_P: f32 = 0.95;

pub const EXPECTED_HASHTAGS: usize = 5;
pub const SCENE_MARKER: &str = "[Scene:";

/// Binding hook constraint. Replace `{hook_type}`.
pub const HOOK_TYPE_BINDING: &str = "- **Jenis Hook Spesifik:** Anda HARUS membuat semua hook ('hook' dan 'hookNegative') \
    secara spesifik menggunakan tipe '{hook_type}'. Abaikan tipe hook lain dan fokus pada tipe ini.";

/// Used when no hook type is chosen.
pub const HOOK_TYPE_FREE: &str =
    "- **Jenis Hook Spesifik:** Tidak ada. Anda bebas berkreasi membuat hook yang paling menarik.";

/// Content generation prompt template.
/// Slots (filled in one pass): {product_name}, {product_function}, {registration_number},
/// {duration}, {general_style}, {voice_over_style}, {hook_instruction}, {json_only_reminder}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Anda adalah social media strategist dan ahli marketing afiliasi yang sangat update dengan tren viral di platform video pendek (TikTok, Reels, Shopee Video).
Buat satu set lengkap materi konten yang engaging dan dioptimalkan untuk konversi untuk produk berikut, dengan KETAT mengikuti semua kriteria.

**Informasi Produk:**
- Nama Produk: {product_name}
- Fungsi Produk: {product_function}
- Nomor Izin BPOM: {registration_number}

**Kriteria Konten WAJIB DIPATUHI:**
- Target Durasi Video: {duration}
- **Gaya Bahasa Umum:** {general_style} (berlaku untuk: caption, judulThumbnail, saranTextOverlay, hook, hookNegative, problem, solusi, callToAction).
- **Gaya Bahasa VoiceOver:** {voice_over_style} (HANYA untuk naskah 'narasiVoiceOver').
{hook_instruction}

Kembalikan satu objek JSON. Semua string harus terisi, relevan, dan sepenuhnya mematuhi gaya bahasa yang ditentukan untuk tiap bagian.

**Struktur JSON yang WAJIB Diikuti:**
{
  "caption": "Caption singkat dan padat yang memancing interaksi. Gaya Bahasa Umum: '{general_style}'.",
  "narasiSubtitle": "Versi teks bersih dari 'narasiVoiceOver', kata per kata, tanpa penanda adegan. Gayanya mengikuti 'narasiVoiceOver'.",
  "hashtags": "TEPAT 5 hashtag paling relevan dalam satu string dipisah spasi, campuran hashtag umum, niche produk, dan yang sedang tren.",
  "judulThumbnail": ["3-4 alternatif judul thumbnail yang sangat clickbait. Gaya Bahasa Umum: '{general_style}'. Contoh: 'JANGAN BELI INI SEBELUM NONTON!'"],
  "saranTextOverlay": ["3-4 alternatif teks singkat dan kuat untuk overlay di dalam video. Gaya Bahasa Umum: '{general_style}'. Contoh: 'Cek Keranjang Kuning Sekarang!'"],
  "hook": ["3-4 alternatif hook berbeda untuk 3 detik pertama video. Gaya Bahasa Umum: '{general_style}'. Jika 'Jenis Hook Spesifik' diberikan, semua hook WAJIB mengikuti jenis tersebut."],
  "hookNegative": "Satu hook negatif yang kuat. Gaya Bahasa Umum: '{general_style}'. Ikuti 'Jenis Hook Spesifik' jika diberikan.",
  "problem": "Masalah audiens dengan gaya 'Ini gue banget!', terasa personal dan mendesak. Gaya Bahasa Umum: '{general_style}'.",
  "solusi": "Produk ini sebagai JALAN KELUAR yang cerdas, fokus pada bagaimana masalahnya selesai. Gaya Bahasa Umum: '{general_style}'.",
  "callToAction": "CTA yang jelas, mendesak, dan berorientasi pada keuntungan. Gaya Bahasa Umum: '{general_style}'.",
  "narasiVoiceOver": "Naskah voice-over LENGKAP sesuai durasi '{duration}'. BAGI naskah menjadi adegan dengan penanda seperti `[Scene: ...]`. Gaya Bahasa VoiceOver: '{voice_over_style}'. Akhiri dengan CTA.",
  "saranMusik": "1-2 judul lagu atau sound yang sedang tren di platform video pendek yang cocok dengan mood video dan Gaya Bahasa VoiceOver, dengan alasan singkat."
}

{json_only_reminder}"#;
