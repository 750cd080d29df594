//! Doctor command - verify credentials, configuration and API access.

use crate::auth::Credentials;
use crate::cli::Output;
use crate::config::Settings;
use crate::music::MusicClient;
use chrono::Utc;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("ytmusic-mcp Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    println!("{}", style("Credentials").bold());
    let credential_check = check_credentials(settings);
    credential_check.print();
    let credentials_ok = credential_check.status != CheckStatus::Error;
    checks.push(credential_check);

    println!();

    println!("{}", style("YouTube Data API").bold());
    let api_check = if credentials_ok {
        let spinner = Output::spinner("Contacting YouTube...");
        let check = check_api(settings).await;
        spinner.finish_and_clear();
        check
    } else {
        CheckResult::warning("API access", "skipped", "Fix the credential error first")
    };
    api_check.print();
    checks.push(api_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! ytmusic-mcp is ready to use.");
    }

    Ok(())
}

fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ytmusic-mcp config edit",
        )
    }
}

fn check_credentials(settings: &Settings) -> CheckResult {
    let hint = format!(
        "Set {} or {}, or write a token bundle to {}",
        settings.auth.token_b64_env,
        settings.auth.token_json_env,
        settings.token_file().display()
    );

    match Credentials::load(&settings.auth, &settings.token_file()) {
        Ok(credentials) => {
            let bundle = credentials.bundle();
            let source = credentials.source().to_string();
            if !bundle.is_expired(Utc::now()) {
                CheckResult::ok("Token", &format!("valid ({})", source))
            } else if bundle.can_refresh() {
                CheckResult::ok("Token", &format!("expired, refreshable ({})", source))
            } else {
                CheckResult::error("Token", &format!("expired, no refresh token ({})", source), &hint)
            }
        }
        Err(e) => CheckResult::error("Token", &e.to_string(), &hint),
    }
}

async fn check_api(settings: &Settings) -> CheckResult {
    let hint = "Check network access and that the token has the YouTube scope";
    let client = match MusicClient::connect(settings).await {
        Ok(client) => client,
        Err(e) => return CheckResult::error("API access", &e.to_string(), hint),
    };

    match client.list_owned_playlists(1).await {
        Ok(_) => CheckResult::ok("API access", &settings.api.base_url),
        Err(e) => CheckResult::error("API access", &e.to_string(), hint),
    }
}
