use anyhow::{Context, Result, anyhow};
use citypage_core::{Config, WeatherReport};
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "citypage", version, about = "Environment Canada city page weather")]
pub struct Cli {
    /// Log lookups and fetches to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the feed URL, HTTP timeout and default province.
    Configure,

    /// Look up a site in the directory by name.
    Site {
        /// Site name, e.g. "Edmonton". Case doesn't matter.
        name: String,

        /// Province code, e.g. "AB"; falls back to the configured default.
        #[arg(short, long)]
        province: Option<String>,
    },

    /// List the sites in the directory.
    Sites {
        /// Only list sites in this province.
        #[arg(short, long)]
        province: Option<String>,
    },

    /// Show weather for a site name.
    Show {
        name: String,

        /// Province code, e.g. "AB"; falls back to the configured default.
        #[arg(short, long)]
        province: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather for a site code, skipping the directory lookup.
    Code {
        /// Site code, e.g. "s0000045".
        code: String,

        /// Province code, e.g. "AB"; falls back to the configured default.
        #[arg(short, long)]
        province: Option<String>,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        debug!(?config, "Loaded configuration");

        match self.command {
            Command::Configure => configure(config)?,
            Command::Site { name, province } => {
                let province = config.province_or_default(province);
                let site = config
                    .client()?
                    .find_site_by_name(&name, province.as_deref())
                    .await
                    .with_context(|| not_found_hint(&name, province.as_deref()))?;

                println!("{}", render::site_line(&site));
            }
            Command::Sites { province } => {
                let sites = config
                    .client()?
                    .site_directory()
                    .await
                    .context("Failed to load the site directory")?;

                for site in sites.iter().filter(|s| {
                    province
                        .as_deref()
                        .is_none_or(|p| s.province.eq_ignore_ascii_case(p.trim()))
                }) {
                    println!("{}", render::site_line(site));
                }
            }
            Command::Show {
                name,
                province,
                json,
            } => {
                let province = config.province_or_default(province);
                let report = config
                    .client()?
                    .weather_by_name(&name, province.as_deref())
                    .await
                    .with_context(|| not_found_hint(&name, province.as_deref()))?;

                print_report(&report, json)?;
            }
            Command::Code {
                code,
                province,
                json,
            } => {
                let province = config.province_or_default(province).ok_or_else(|| {
                    anyhow!(
                        "No province given for site code '{code}'.\n\
                         Hint: pass --province <CODE> or run `citypage configure` to set a default province."
                    )
                })?;
                let report = config
                    .client()?
                    .weather_by_code(&code, &province)
                    .await
                    .with_context(|| format!("Failed to load weather for site {code} ({province})"))?;

                print_report(&report, json)?;
            }
        }

        Ok(())
    }
}

fn not_found_hint(name: &str, province: Option<&str>) -> String {
    match province {
        Some(p) => format!(
            "Failed to look up '{name}' in {p}.\n\
             Hint: run `citypage sites --province {p}` to list known site names."
        ),
        None => format!(
            "Failed to look up '{name}'.\n\
             Hint: run `citypage sites` to list known site names."
        ),
    }
}

fn print_report(report: &WeatherReport, json: bool) -> Result<()> {
    if json {
        let text =
            serde_json::to_string_pretty(report).context("Failed to serialize weather report")?;
        println!("{text}");
    } else {
        print!("{}", render::report(report));
    }
    Ok(())
}

fn configure(mut config: Config) -> Result<()> {
    let base_url = Text::new("Feed base URL:")
        .with_default(config.endpoints().base_url())
        .prompt()?;
    config.set_base_url(&base_url)?;

    let timeout = CustomType::<u64>::new("HTTP timeout in seconds (0 for none):")
        .with_default(config.timeout_secs.unwrap_or(0))
        .prompt()?;
    config.timeout_secs = (timeout > 0).then_some(timeout);

    let province = Text::new("Default province code (blank for none):")
        .with_default(config.default_province.as_deref().unwrap_or_default())
        .prompt()?;
    config.set_default_province(&province);

    config.accept_invalid_certs = Confirm::new("Accept invalid TLS certificates?")
        .with_default(config.accept_invalid_certs)
        .prompt()?;

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_province_and_json() {
        let cli = Cli::try_parse_from(["citypage", "show", "Edmonton", "-p", "AB", "--json"])
            .expect("arguments should parse");

        match cli.command {
            Command::Show {
                name,
                province,
                json,
            } => {
                assert_eq!(name, "Edmonton");
                assert_eq!(province.as_deref(), Some("AB"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_code_and_global_verbose() {
        let cli = Cli::try_parse_from(["citypage", "code", "s0000045", "--verbose"])
            .expect("arguments should parse");

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Code { ref code, province: None, json: false } if code == "s0000045"
        ));
    }

    #[test]
    fn site_requires_a_name() {
        assert!(Cli::try_parse_from(["citypage", "site"]).is_err());
    }

    #[test]
    fn hint_mentions_province_listing() {
        let hint = not_found_hint("Springfeld", Some("MB"));
        assert!(hint.contains("citypage sites --province MB"));

        let hint = not_found_hint("Springfeld", None);
        assert!(hint.contains("citypage sites`"));
    }
}
