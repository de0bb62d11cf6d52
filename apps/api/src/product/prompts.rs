// All LLM prompt constants for the Product Lookup module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Low temperature: lookup is about facts (names, registration numbers), not creativity.
pub const LOOKUP_TEMPERATURE: f32 = 0.2;

/// Field-by-field description of the ProductInfo JSON the model must return.
/// Replace `{not_found}` and `{not_applicable}` before use.
pub const PRODUCT_SCHEMA_INSTRUCTION: &str = r#"Tugas Anda adalah menganalisis input dan mengembalikan HANYA sebuah objek JSON dengan struktur berikut:
{
  "name": "string // Nama produk yang jelas dan deskriptif. Jika input adalah gambar, buat nama yang sesuai.",
  "fungsi": "string // Fungsi utama atau deskripsi singkat produk.",
  "nomorBPOM": "string // Nomor registrasi BPOM. Isi '{not_found}' jika pencarian gagal menemukannya, atau '{not_applicable}' jika produk tidak memerlukan BPOM."
}"#;

/// Lookup by typed product name.
/// Slots: {query}, {schema_instruction}, {json_only_reminder}
pub const LOOKUP_BY_NAME_TEMPLATE: &str = r#"Cari detail produk untuk: "{query}". Gunakan Google Search untuk menemukan informasi akurat (terutama nomor BPOM dari `cekbpom.pom.go.id`).
{schema_instruction}
{json_only_reminder}"#;

/// Lookup by product page URL.
/// Slots: {query}, {schema_instruction}, {json_only_reminder}
pub const LOOKUP_BY_URL_TEMPLATE: &str = r#"Analisis URL produk ini: "{query}". Gunakan Google Search untuk menemukan detailnya (terutama nomor BPOM dari `cekbpom.pom.go.id`).
{schema_instruction}
{json_only_reminder}"#;

/// Lookup by photo. The image itself travels as an inline part ahead of this text.
/// Slots: {schema_instruction}, {json_only_reminder}
pub const LOOKUP_BY_IMAGE_TEMPLATE: &str = r#"Analisis gambar produk ini. Gunakan Google Search untuk menemukan detailnya (terutama nomor BPOM dari `cekbpom.pom.go.id`).
{schema_instruction}
{json_only_reminder}"#;
