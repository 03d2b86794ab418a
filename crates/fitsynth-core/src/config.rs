use std::env::VarError;

use chrono::NaiveDate;

use crate::error::CoreError;

/// Parameters of one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Seed for the single RNG threaded through every sampling call.
    pub seed: u64,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    /// Installs on `start_date`; the daily count ramps linearly to
    /// `installs_last_day` on `end_date`.
    pub installs_first_day: u32,
    pub installs_last_day: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap_or_default(),
            installs_first_day: 500,
            installs_last_day: 1200,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.end_date < self.start_date {
            return Err(CoreError::InvalidConfig(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        if self.installs_first_day == 0 || self.installs_last_day == 0 {
            return Err(CoreError::InvalidConfig(
                "daily install counts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> usize {
        ((self.end_date - self.start_date).num_days() + 1).max(0) as usize
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub out_dir: String,
    pub archive_path: String,
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name))
    }

    /// Build a config from any variable source shaped like `std::env::var`.
    ///
    /// Unset variables take their default; a value that is set but not
    /// valid UTF-8 or not parseable is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = GeneratorConfig::default();
        let generator = GeneratorConfig {
            seed: parse_var(&lookup, "FITSYNTH_SEED", defaults.seed, |raw| {
                raw.parse::<u64>().map_err(|e| format!("invalid seed: {e}"))
            })?,
            start_date: parse_var(
                &lookup,
                "FITSYNTH_START_DATE",
                defaults.start_date,
                parse_date,
            )?,
            end_date: parse_var(&lookup, "FITSYNTH_END_DATE", defaults.end_date, parse_date)?,
            installs_first_day: parse_var(
                &lookup,
                "FITSYNTH_INSTALLS_FIRST_DAY",
                defaults.installs_first_day,
                |raw| {
                    raw.parse::<u32>()
                        .map_err(|e| format!("invalid first-day installs: {e}"))
                },
            )?,
            installs_last_day: parse_var(
                &lookup,
                "FITSYNTH_INSTALLS_LAST_DAY",
                defaults.installs_last_day,
                |raw| {
                    raw.parse::<u32>()
                        .map_err(|e| format!("invalid last-day installs: {e}"))
                },
            )?,
        };
        generator.validate().map_err(|e| e.to_string())?;

        Ok(Self {
            out_dir: parse_var(
                &lookup,
                "FITSYNTH_OUT_DIR",
                "fitness_synthetic".to_string(),
                |raw| Ok(raw.to_string()),
            )?,
            archive_path: parse_var(
                &lookup,
                "FITSYNTH_ARCHIVE_PATH",
                "fitness_synthetic.zip".to_string(),
                |raw| Ok(raw.to_string()),
            )?,
            generator,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    name: &str,
    default: T,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(raw) => parse(raw.trim()).map_err(|e| format!("{name}: {e}")),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(_)) => Err(format!("{name} is not valid UTF-8")),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("must be YYYY-MM-DD, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_range_covers_january_through_july() {
        let cfg = GeneratorConfig::default();
        assert_eq!(cfg.days(), 213);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn single_day_range() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
        let cfg = GeneratorConfig {
            start_date: day,
            end_date: day,
            ..GeneratorConfig::default()
        };
        assert_eq!(cfg.days(), 1);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let cfg = GeneratorConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 2, 1).expect("date"),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"),
            ..GeneratorConfig::default()
        };
        let err = cfg.validate().expect_err("reversed range");
        assert!(err.to_string().contains("before start_date"));
    }

    #[test]
    fn zero_installs_are_rejected() {
        let cfg = GeneratorConfig {
            installs_first_day: 0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))));
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn unset_environment_uses_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[])).expect("defaults");
        assert_eq!(cfg.generator, GeneratorConfig::default());
        assert_eq!(cfg.out_dir, "fitness_synthetic");
        assert_eq!(cfg.archive_path, "fitness_synthetic.zip");
    }

    #[test]
    fn set_variables_override_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("FITSYNTH_SEED", "7"),
            ("FITSYNTH_START_DATE", "2024-03-01"),
            ("FITSYNTH_END_DATE", " 2024-03-02 "),
            ("FITSYNTH_INSTALLS_FIRST_DAY", "10"),
            ("FITSYNTH_OUT_DIR", "/tmp/out"),
        ]))
        .expect("config");
        assert_eq!(cfg.generator.seed, 7);
        assert_eq!(cfg.generator.days(), 2);
        assert_eq!(cfg.generator.installs_first_day, 10);
        assert_eq!(cfg.generator.installs_last_day, 1200);
        assert_eq!(cfg.out_dir, "/tmp/out");
    }

    #[test]
    fn bad_seed_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("FITSYNTH_SEED", "forty-two")]))
            .expect_err("bad seed");
        assert!(err.contains("FITSYNTH_SEED"), "{err}");
        assert!(err.contains("invalid seed"), "{err}");
    }

    #[test]
    fn malformed_date_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("FITSYNTH_START_DATE", "01/02/2024")]))
            .expect_err("bad date");
        assert!(err.contains("FITSYNTH_START_DATE"), "{err}");
        assert!(err.contains("YYYY-MM-DD"), "{err}");
    }

    #[test]
    fn reversed_range_from_env_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("FITSYNTH_START_DATE", "2024-05-10"),
            ("FITSYNTH_END_DATE", "2024-05-01"),
        ]))
        .expect_err("reversed range");
        assert!(err.contains("before start_date"), "{err}");
    }

    #[test]
    fn non_unicode_value_is_an_error_not_a_default() {
        let lookup = |name: &str| -> Result<String, VarError> {
            if name == "FITSYNTH_SEED" {
                Err(VarError::NotUnicode(std::ffi::OsString::from("\u{fffd}")))
            } else {
                Err(VarError::NotPresent)
            }
        };
        let err = Config::from_lookup(lookup).expect_err("non-unicode seed");
        assert!(err.contains("FITSYNTH_SEED is not valid UTF-8"), "{err}");
    }
}
