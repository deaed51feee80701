use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{
    Config, WeatherApp,
    config::{API_KEY_ENV, DEFAULT_API_URL},
    provider_from_config,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};

use crate::terminal::TerminalRegion;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Without a subcommand an interactive prompt is started.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current weather for a city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(num_args = 0.., trailing_var_arg = true)]
        city: Vec<String>,
    },

    /// Store an API key and optionally a custom endpoint.
    Configure,

    /// Print the location of the configuration file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None => interactive().await,
            Some(Command::Show { city }) => show(&city.join(" ")).await,
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn build_app() -> anyhow::Result<WeatherApp<TerminalRegion>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherApp::new(provider, TerminalRegion::stdout()))
}

async fn show(city: &str) -> anyhow::Result<()> {
    let app = build_app()?;
    app.submit(city).await.context("Failed to write to the terminal")?;
    Ok(())
}

/// Prompt for cities until the user cancels. Each submission is awaited before the
/// next prompt, so requests never overlap here.
async fn interactive() -> anyhow::Result<()> {
    let app = build_app()?;

    loop {
        let input = match Text::new("City:")
            .with_help_message("Enter to search, Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        app.submit(&input).await.context("Failed to write to the terminal")?;
        app.with_region(TerminalRegion::release);
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim());
    }

    let api_url = Text::new("Endpoint:")
        .with_initial_value(config.api_url())
        .with_help_message("Clear to use the default OpenWeatherMap endpoint")
        .prompt()
        .context("Failed to read endpoint")?;
    let api_url = api_url.trim();
    if api_url.is_empty() || api_url == DEFAULT_API_URL {
        config.set_api_url(None);
    } else {
        config.set_api_url(Some(api_url.to_string()));
    }

    // Validate before writing anything.
    provider_from_config(&config)?;
    config.save_to(&path)?;

    println!("Saved configuration to {}", path.display());
    if std::env::var_os(API_KEY_ENV).is_some() {
        println!("Note: {API_KEY_ENV} is set and overrides the stored key.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["cityweather"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_joins_words() {
        let cli = Cli::try_parse_from(["cityweather", "show", "New", "York"]).expect("parse");
        match cli.command {
            Some(Command::Show { city }) => assert_eq!(city.join(" "), "New York"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_without_city_is_accepted() {
        let cli = Cli::try_parse_from(["cityweather", "show"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Show { city }) if city.is_empty()));
    }

    #[test]
    fn configure_parses() {
        let cli = Cli::try_parse_from(["cityweather", "configure"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Configure)));
    }
}
