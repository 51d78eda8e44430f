//! Writing a resolved configuration back out

use std::fmt::Write;

use super::error::Result;
use super::resolved::ResolvedConfig;
use super::value::Value;

/// Render as an INI document that parses back to the same values.
///
/// List values are written comma-separated on the key line.
pub fn render_ini(config: &ResolvedConfig) -> String {
    let mut out = String::new();

    for (i, (name, section)) in config.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "[{name}]");
        for (key, option) in section.iter() {
            out.push_str(&render_option(key, &option.value));
        }
    }

    out
}

/// Render one `key = value` line, plus continuation lines for multi-line
/// strings.
pub fn render_option(key: &str, value: &Value) -> String {
    match value {
        Value::List(items) if items.is_empty() => format!("{key} =\n"),
        // Items never hold ',' or '\n'; on the key line a leading '#' or ';' stays data
        Value::List(items) => format!("{key} = {}\n", items.join(", ")),
        Value::Str(s) if s.contains('\n') => {
            let mut lines = s.lines();
            let mut out = format!("{key} = {}\n", lines.next().unwrap_or_default());
            for line in lines {
                let _ = writeln!(out, "    {line}");
            }
            out
        }
        Value::Str(s) if s.is_empty() => format!("{key} =\n"),
        other => format!("{key} = {other}\n"),
    }
}

/// Render as TOML, one table per section.
pub fn render_toml(config: &ResolvedConfig) -> Result<String> {
    Ok(toml::to_string(config)?)
}
