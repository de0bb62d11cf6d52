// Shared prompt constants used by the gateway itself.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// System instruction attached to every request. Enforces a single bare JSON object.
pub const JSON_ONLY_SYSTEM: &str = "Anda adalah asisten AI yang presisi dan terstruktur. \
    Output Anda HARUS berupa satu objek JSON tunggal yang valid. \
    Jangan pernah menambahkan teks, penjelasan, atau permintaan maaf di luar objek JSON. \
    Jangan gunakan markdown code fence (seperti ```json).";

/// Closing reminder appended to every feature prompt.
pub const JSON_ONLY_REMINDER: &str = "Pastikan output HANYA berupa objek JSON, \
    tanpa teks tambahan sebelum atau sesudahnya, dan tanpa markdown.";

/// Fills `{key}` slots in a single left-to-right pass.
/// Substituted values are never rescanned, so user text containing `{...}` survives verbatim.
/// Braces that do not name a known key (e.g. JSON examples) are left alone.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let slot = values.iter().find(|(key, _)| {
            tail.strip_prefix(key)
                .is_some_and(|after| after.starts_with('}'))
        });

        match slot {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
