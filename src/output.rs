use crate::colors::Colors;
use crate::config::{render_option, ConfigError, ResolvedConfig, ResolvedSection, Result, Value};
use crate::rules::rules_for_section;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Ini,
    Toml,
}

/// What to print from a resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Every option, or only those of one section
    Dump { section: Option<String> },
    Sections,
    Get {
        section: String,
        key: String,
        default: Option<String>,
    },
    /// Enabled rules of a linter section, given the known rule names
    Rules { section: String, known: Vec<String> },
}

pub struct OutputContext {
    pub format: OutputFormat,
    pub colors: Colors,
    /// Annotate each option with the file and line it came from
    pub show_origins: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, use_colors: bool, show_origins: bool) -> Self {
        Self {
            format,
            colors: Colors::new(use_colors),
            show_origins,
        }
    }
}

/// Produce the text to print for `query`.
pub fn render_query(config: &ResolvedConfig, query: &Query, ctx: &OutputContext) -> Result<String> {
    match query {
        Query::Dump { section } => render_dump(config, section.as_deref(), ctx),
        Query::Sections => Ok(config
            .sections()
            .into_iter()
            .map(|name| format!("{name}\n"))
            .collect()),
        Query::Get {
            section,
            key,
            default,
        } => {
            let default = default.clone().map(Value::Str);
            let value = config.get(section, key, default.as_ref())?;
            Ok(format!("{value}\n"))
        }
        Query::Rules { section, known } => Ok(rules_for_section(config, section, known)?
            .into_iter()
            .map(|rule| format!("{rule}\n"))
            .collect()),
    }
}

fn render_dump(config: &ResolvedConfig, only: Option<&str>, ctx: &OutputContext) -> Result<String> {
    if let Some(name) = only {
        let section = config
            .section(name)
            .ok_or_else(|| ConfigError::MissingSection(name.to_string()))?;
        return match ctx.format {
            OutputFormat::Toml => Ok(toml::to_string(section)?),
            OutputFormat::Ini => Ok(render_section(name, section, ctx)),
        };
    }

    match ctx.format {
        OutputFormat::Toml => crate::config::render_toml(config),
        OutputFormat::Ini => Ok(config
            .iter()
            .map(|(name, section)| render_section(name, section, ctx))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn render_section(name: &str, section: &ResolvedSection, ctx: &OutputContext) -> String {
    let mut out = format!("{}[{name}]{}\n", ctx.colors.section, ctx.colors.reset());

    for (key, option) in section.iter() {
        if ctx.show_origins {
            let _ = writeln!(
                out,
                "{}# {}:{}{}",
                ctx.colors.origin,
                option.origin.path.display(),
                option.origin.line,
                ctx.colors.reset()
            );
        }
        out.push_str(&render_option(key, &option.value));
    }

    out
}
