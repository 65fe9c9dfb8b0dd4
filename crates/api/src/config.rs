use anyhow::{bail, Context};
use timetable_core::DEFAULT_MAX_LECTURES;

const PORT: &str = "TIMETABLE__SERVER__PORT";
const MAX_LECTURES: &str = "TIMETABLE__GRID__MAX_LECTURES";
const LOG_FORMAT: &str = "TIMETABLE__LOG__FORMAT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub max_lectures: u8,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match get(PORT) {
            Some(v) => v.parse::<u16>().with_context(|| format!("{PORT}={v} is not a port"))?,
            None => 8080,
        };
        let max_lectures = match get(MAX_LECTURES) {
            Some(v) => v
                .parse::<u8>()
                .with_context(|| format!("{MAX_LECTURES}={v} is not a lecture count"))?,
            None => DEFAULT_MAX_LECTURES,
        };
        if max_lectures == 0 {
            bail!("{MAX_LECTURES} must be at least 1");
        }
        let log_format = match get(LOG_FORMAT).as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => bail!("{LOG_FORMAT}={other} is not one of json, pretty"),
        };
        Ok(Self {
            port,
            max_lectures,
            log_format,
        })
    }
}
