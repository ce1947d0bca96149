// SPDX-License-Identifier: GPL-3.0-only

//! Built-in line templates

/// Fixed-width columns: drive model, size, type, label, device node
pub const TABULAR: &str = concat!(
    r#"{{ drive_model | condense | dash | abbrev(width=20) | pad(width=20) }}   "#,
    r#"{{ preferred_size | human_bytes_iec | pad(width=7, align="right") }}   "#,
    r#"{{ id_type | dash | abbrev(width=12) | pad(width=12) }}   "#,
    r#"{{ id_label | dash | abbrev(width=15) | pad(width=15) }}   "#,
    r#"{{ device }}"#,
);

/// Bracketed non-empty summary fields
pub const BASIC: &str = concat!(
    r#"{% for value in summary %}{% if value %}"#,
    r#"[ {{ value | abbrev(width=20) }} ] "#,
    r#"{% endif %}{% endfor %}"#,
);

/// Like `basic`, with Pango markup dimming the brackets (for rofi -markup-rows)
pub const ROFI: &str = concat!(
    r#"{% for value in summary %}{% if value %}"#,
    r#"<span alpha="50%" weight="100">[ </span>"#,
    r#"{{ value | abbrev(width=20) }}"#,
    r#"<span alpha="50%" weight="100"> ]</span> "#,
    r#"{% endif %}{% endfor %}"#,
);

/// Look up a built-in template by name.
pub fn builtin(name: &str) -> Option<&'static str> {
    match name {
        "tabular" | "default" => Some(TABULAR),
        "basic" => Some(BASIC),
        "rofi" => Some(ROFI),
        _ => None,
    }
}
