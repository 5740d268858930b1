//! Minimal CLI: template (schema → YAML) and check (validate overrides).
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::schema::SchemaNode;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// turn JSON Schema files into annotated, fill-in-the-blanks YAML templates
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// render YAML template(s) from JSON Schema file(s)
    Template(TemplateArgs),
    /// validate an overrides file against a schema without rendering
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more schema files. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON file with override values; its structure mimics the schema
    #[arg(long)]
    overrides: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// replace the "TODO: Fill this in" comment; empty string disables it
    #[arg(long)]
    todo_comment: Option<String>,

    /// emit only required properties (plus anything explicitly overridden)
    #[arg(long, default_value_t = false)]
    only_required: bool,

    /// column width for wrapping description comments; 0 disables wrapping
    #[arg(long, default_value_t = 80)]
    wrap: usize,

    /// indent width of the rendered YAML
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// do not validate the override values against the schema
    #[arg(long, default_value_t = false)]
    skip_validation: bool,

    /// output file (single input) or directory (multiple inputs); stdout if omitted
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input_settings: InputSettings,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Template(target) => run_template(target),
            Command::Check(target) => run_check(target),
        }
    }
}

impl InputSettings {
    fn schema_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input)
    }

    fn load_overrides(&self) -> anyhow::Result<Map<String, Value>> {
        let Some(path) = &self.overrides else {
            return Ok(Map::new());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides file {}", path.display()))?;
        let value: Value = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse overrides file {}", path.display()))?;
        match value {
            Value::Object(map) => Ok(map),
            _ => bail!("overrides file {} must contain a JSON object", path.display()),
        }
    }
}

fn run_template(target: &TemplateArgs) -> anyhow::Result<()> {
    let paths = target.input_settings.schema_paths()?;
    let overrides = target.input_settings.load_overrides()?;

    let mut cfg = Config::new()
        .with_overrides(overrides)
        .with_only_required(target.only_required)
        .with_line_length(target.wrap)
        .with_indent(target.indent)
        .with_skip_validation(target.skip_validation);
    if let Some(comment) = &target.todo_comment {
        cfg = cfg.with_todo_comment(comment.clone());
    }

    match &target.out {
        None => {
            for path in &paths {
                let yaml = template_one(path, &cfg)?;
                print!("{yaml}");
            }
            Ok(())
        }
        Some(out) if paths.len() == 1 && !out.is_dir() => {
            let yaml = template_one(&paths[0], &cfg)?;
            write_output(out, &yaml)
        }
        Some(out_dir) => {
            // Many inputs: one <schema-stem>.yaml per input, in parallel.
            std::fs::create_dir_all(out_dir)
                .with_context(|| format!("failed to create {}", out_dir.display()))?;
            paths.par_iter().try_for_each(|path| {
                let yaml = template_one(path, &cfg)?;
                let stem = path.file_stem().unwrap_or(path.as_os_str());
                let out = out_dir.join(stem).with_extension("yaml");
                write_output(&out, &yaml)
            })
        }
    }
}

fn run_check(target: &CheckArgs) -> anyhow::Result<()> {
    let paths = target.input_settings.schema_paths()?;
    let overrides = target.input_settings.load_overrides()?;

    for path in &paths {
        let schema = load_schema(path)?;
        crate::validate::validate_overrides(&schema, &overrides)
            .with_context(|| format!("{}", path.display()))?;
        eprintln!("{}: OK", path.display());
    }
    Ok(())
}

fn template_one(path: &Path, cfg: &Config) -> anyhow::Result<String> {
    let schema = load_schema(path)?;
    crate::schema_to_yaml(&schema, cfg)
        .with_context(|| format!("failed to template {}", path.display()))
}

fn load_schema(path: &Path) -> anyhow::Result<SchemaNode> {
    let raw = std::fs::read(path)
        .with_context(|| format!("failed to read schema file {}", path.display()))?;
    SchemaNode::from_slice(&raw)
        .with_context(|| format!("failed to parse schema file {}", path.display()))
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
