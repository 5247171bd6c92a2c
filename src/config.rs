use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::DeliveryMode;

const DEFAULT_NAME: &str = "University of Malakand AI Assistant";
const DEFAULT_TYPING_MIN_MS: u64 = 1000;
const DEFAULT_TYPING_MAX_MS: u64 = 2000;
const DEFAULT_STATUS_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub assistant_name: String,
    pub window_width: f32,
    pub window_height: f32,
    pub typing_min: Duration,
    pub typing_max: Duration,
    pub delivery: DeliveryMode,
    pub status_duration: Duration,
    pub ready_message: String,
    pub console: bool,
    pub log_dir: PathBuf,
    /// Fallbacks taken while parsing; logged once the logger is up.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut warnings = Vec::new();

        let assistant_name = lookup("UOM_ASSISTANT_NAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let typing_min = Duration::from_millis(parse_number(
            &lookup,
            "UOM_TYPING_MIN_MS",
            DEFAULT_TYPING_MIN_MS,
            &mut warnings,
        ));
        let mut typing_max = Duration::from_millis(parse_number(
            &lookup,
            "UOM_TYPING_MAX_MS",
            DEFAULT_TYPING_MAX_MS,
            &mut warnings,
        ));
        if typing_max < typing_min {
            warnings.push(format!(
                "UOM_TYPING_MAX_MS ({} ms) is below UOM_TYPING_MIN_MS ({} ms), using the minimum",
                typing_max.as_millis(),
                typing_min.as_millis()
            ));
            typing_max = typing_min;
        }

        let delivery = if parse_flag(&lookup, "UOM_ORDERED_REPLIES", true, &mut warnings) {
            DeliveryMode::Ordered
        } else {
            DeliveryMode::Independent
        };

        let status_secs = parse_number(&lookup, "UOM_STATUS_SECS", DEFAULT_STATUS_SECS, &mut warnings);
        let console = parse_flag(&lookup, "UOM_CONSOLE", false, &mut warnings);

        let log_dir = lookup("UOM_LOG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|d| d.join("uom-assistant").join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            assistant_name,
            window_width: 900.0,
            window_height: 640.0,
            typing_min,
            typing_max,
            delivery,
            status_duration: Duration::from_secs(status_secs),
            ready_message: "AI Assistant Ready!".to_string(),
            console,
            log_dir,
            warnings,
        }
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u64, warnings: &mut Vec<String>) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(v) => v,
        Err(_) => {
            warnings.push(format!("{} = {:?} is not a whole number, using {}", key, raw, default));
            default
        }
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool, warnings: &mut Vec<String>) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warnings.push(format!("{} = {:?} is not a flag, using {}", key, raw, default));
            default
        }
    }
}
