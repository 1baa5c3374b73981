//! Init command - scaffold a new build definition
//!
//! Templates:
//! - minimal: only kiln.toml
//! - standard: kiln.toml, requirements.txt, an ASGI entry point and an
//!   empty package repository directory

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use kiln::config::ColorMode;
use kiln::domain::value_objects::is_valid_name;

use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

/// Template for init command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Minimal,
    Standard,
}

impl Template {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "minimal" | "min" => Some(Self::Minimal),
            "standard" | "std" => Some(Self::Standard),
            _ => None,
        }
    }
}

/// Scaffold a build definition in `dir`.
pub fn cmd_init(
    dir: &Path,
    template: &str,
    force: bool,
    json: bool,
    _verbose: u8,
    color: Option<ColorMode>,
) -> Result<()> {
    // No definition exists yet, so UI decisions come straight from the
    // terminal and the flag.
    let caps = detect_capabilities();
    let supports_color = match color {
        Some(ColorMode::Always) => true,
        Some(ColorMode::Never) => false,
        Some(ColorMode::Auto) | None => caps.supports_color && !caps.is_ci,
    };
    let supports_unicode = caps.supports_unicode;

    let definition = dir.join("kiln.toml");
    if definition.exists() && !force {
        if json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "error",
                "command": "init",
                "kind": "already_exists",
                "path": definition.display().to_string(),
                "message": "kiln.toml already exists"
            }));
        }
        bail!(
            "kiln.toml already exists at {}. Use --force to overwrite.",
            definition.display()
        );
    }

    let template = Template::from_str(template).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid template '{}'. Valid options: minimal, standard",
            template
        )
    })?;

    let name = image_name_for(dir);
    create_definition(dir, &name, template)?;

    if json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "init",
            "path": definition.display().to_string(),
            "name": name,
            "template": format!("{:?}", template).to_lowercase(),
        }));
    } else {
        println!(
            "{} Created {} with {:?} template",
            Icon::Success.colored(supports_color, supports_unicode),
            definition.display(),
            template
        );
        println!();
        println!(
            "{} Next: run `kiln check` then `kiln build`",
            Icon::Arrow.colored(supports_color, supports_unicode)
        );
    }

    Ok(())
}

/// Image name for the scaffold: the directory's name when it is a valid
/// image name, `app` otherwise.
fn image_name_for(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|name| is_valid_name(name))
        .unwrap_or_else(|| "app".to_string())
}

fn create_definition(dir: &Path, name: &str, template: Template) -> Result<()> {
    fs::create_dir_all(dir).context("Failed to create project directory")?;

    let definition = KILN_TOML_TEMPLATE.replace("{name}", name);
    fs::write(dir.join("kiln.toml"), definition).context("Failed to create kiln.toml")?;

    match template {
        Template::Minimal => {}
        Template::Standard => {
            fs::write(dir.join("requirements.txt"), REQUIREMENTS_TEMPLATE)
                .context("Failed to create requirements.txt")?;
            fs::write(dir.join("main.py"), MAIN_PY_TEMPLATE)
                .context("Failed to create main.py")?;
            fs::create_dir_all(dir.join("packages")).context("Failed to create packages/")?;
            fs::write(dir.join("packages/.gitkeep"), "")
                .context("Failed to create packages/.gitkeep")?;
        }
    }

    Ok(())
}

// Template content strings
const KILN_TOML_TEMPLATE: &str = r#"# Kiln build definition
# See `kiln check` for validation before building.

[image]
name = "{name}"
tag = "latest"

[builder]
manifest = "requirements.txt"
# Local package repository; defaults to <store>/packages.
# repository = "packages"

[runtime]
entrypoint = "main.py"
port = 8000

# Placeholder environment; values are supplied at run time with --env.
[runtime.env]
APP_ENV = ""

[output]
verbosity = "normal"
"#;

const REQUIREMENTS_TEMPLATE: &str = r#"# One requirement per line: name==X.Y.Z or name>=X.Y.Z
# Packages resolve against the local package repository.
"#;

const MAIN_PY_TEMPLATE: &str = r#"async def app(scope, receive, send):
    assert scope["type"] == "http"
    await send(
        {
            "type": "http.response.start",
            "status": 200,
            "headers": [[b"content-type", b"text/plain"]],
        }
    )
    await send({"type": "http.response.body", "body": b"hello from kiln\n"})
"#;
