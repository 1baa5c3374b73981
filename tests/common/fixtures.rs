//! Test fixtures - reusable content constants for tests.

/// Standard web-app definition: two dependencies, port 8000.
pub const DEFINITION_WEB: &str = r#"[image]
name = "web"
tag = "latest"

[builder]
manifest = "requirements.txt"
repository = "packages"

[runtime]
entrypoint = "main.py"
port = 8000

[runtime.env]
APP_ENV = ""
"#;

/// Smallest useful definition: defaults everywhere, no env placeholders.
pub const DEFINITION_MINIMAL: &str = r#"[image]
name = "app"

[builder]
manifest = "requirements.txt"
repository = "packages"

[runtime]
entrypoint = "main.py"
port = 8000
"#;

/// Requirements manifest matching the packages seeded by `web_env()` helpers.
pub const REQUIREMENTS_WEB: &str = "# web stack\nflask==3.0.0\nclick>=8.0\n";

/// A plausible entry point; build tests never execute it.
pub const MAIN_PY: &str = r#"async def app(scope, receive, send):
    assert scope["type"] == "http"
    await send({"type": "http.response.start", "status": 200, "headers": []})
    await send({"type": "http.response.body", "body": b"hello from web\n"})
"#;

/// Small package payload written under `lib/<package>/`.
pub const PY_MODULE: &str = "def handler():\n    return \"ok\"\n";
