use std::{env, fs, path::Path, time::Duration};

use crate::{errors::Error, Result};

pub const DEFAULT_AQICN_BASE_URL: &str = "https://api.waqi.info";
pub const DEFAULT_SG_PSI_URL: &str = "https://api.data.gov.sg/v1/environment/psi";
pub const DEFAULT_JAKARTA_STATIONS: [&str; 6] = [
    "jakarta",
    "jakarta-selatan",
    "jakarta-utara",
    "jakarta-barat",
    "jakarta-timur",
    "jakarta-pusat",
];

const TELEGRAM_TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN";
const AQICN_TOKEN_PLACEHOLDER: &str = "YOUR_AQICN_API_TOKEN";

/// Typed configuration, loaded once at startup and passed down explicitly.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub aqicn_api_token: String,

    // Upstreams
    pub aqicn_base_url: String,
    pub sg_psi_url: String,
    pub jakarta_stations: Vec<String>,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = required_token(
            &lookup,
            "TELEGRAM_BOT_TOKEN",
            TELEGRAM_TOKEN_PLACEHOLDER,
            "message @BotFather on Telegram, create a bot with /newbot and export its token",
        )?;
        let aqicn_api_token = required_token(
            &lookup,
            "AQICN_API_TOKEN",
            AQICN_TOKEN_PLACEHOLDER,
            "request a free token at https://aqicn.org/data-platform/token/",
        )?;

        let aqicn_base_url = lookup("AQICN_BASE_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_AQICN_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let sg_psi_url = lookup("SG_PSI_URL")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_SG_PSI_URL.to_string());

        let jakarta_stations = parse_csv(lookup("JAKARTA_STATIONS")).unwrap_or_else(|| {
            DEFAULT_JAKARTA_STATIONS
                .iter()
                .map(|s| s.to_string())
                .collect()
        });

        let http_timeout = Duration::from_secs(
            lookup("HTTP_TIMEOUT_SECS")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(10),
        );

        Ok(Self {
            telegram_bot_token,
            aqicn_api_token,
            aqicn_base_url,
            sg_psi_url,
            jakarta_stations,
            http_timeout,
        })
    }
}

fn required_token(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    placeholder: &str,
    hint: &str,
) -> Result<String> {
    match lookup(key).and_then(non_empty) {
        Some(v) if v.trim() != placeholder => Ok(v.trim().to_string()),
        _ => Err(Error::Config(format!(
            "{key} environment variable is required ({hint})"
        ))),
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_csv(v: Option<String>) -> Option<Vec<String>> {
    let out = v?
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
