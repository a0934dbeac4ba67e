use crate::curation::render::render_results;
use crate::state::app_settings::{AppSettings, Variant};
use crate::state::app_state::{EMPTY_INPUT_MESSAGE, REQUEST_FAILED_MESSAGE};
use game2match_api::client::RecommendApi;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Help,
    Version,
    Run {
        variant: Option<Variant>,
        /// Print one round of recommendations and exit instead of starting the TUI.
        once: Option<String>,
    },
}

pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: IntoIterator<Item = String>,
{
    let mut variant = None;
    let mut once = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "--variant" => {
                let value = args.next().ok_or("--variant needs a value")?;
                variant = Some(value.parse::<Variant>()?);
            }
            "--once" => {
                once = Some(args.next().ok_or("--once needs a prompt")?);
            }
            _ => return Err(format!("Unknown argument: {arg}")),
        }
    }

    Ok(CliCommand::Run { variant, once })
}

pub fn usage_text() -> &'static str {
    "game2match - describe your mood, get hidden-gem game recommendations

Usage:
  game2match [--variant classic|curator|vibes]
  game2match [--variant NAME] --once \"<prompt>\"
  game2match --help
  game2match --version

Environment:
  GAME2MATCH_API_URL        Backend base URL (default http://localhost:8000)
  GAME2MATCH_VARIANT        classic, curator or vibes (default curator)
  GAME2MATCH_TIMEOUT_SECS   Per-request timeout in seconds (default 30)
  GAME2MATCH_LOG            Log level for the in-app log pane (default info)"
}

/// Run one prompt end to end and print the result. Returns the exit code.
pub async fn run_once(client: &RecommendApi, settings: &AppSettings, prompt: &str) -> i32 {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        eprintln!("{EMPTY_INPUT_MESSAGE}");
        return 2;
    }

    match client.recommend(prompt, settings.page.contract).await {
        Ok(recommendations) => {
            let mut rng = StdRng::from_entropy();
            let view = render_results(&recommendations, &settings.page, &mut rng);
            print!("{}", view.plain_text());
            0
        }
        Err(e) => {
            log::error!("one-shot request failed: {e}");
            eprintln!("{REQUEST_FAILED_MESSAGE}\n({e})");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_runs_the_tui() {
        assert_eq!(
            parse_args(args(&[])),
            Ok(CliCommand::Run { variant: None, once: None })
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_args(args(&["--variant", "vibes", "-h"])), Ok(CliCommand::Help));
        assert_eq!(parse_args(args(&["-V"])), Ok(CliCommand::Version));
    }

    #[test]
    fn variant_and_once_are_collected() {
        assert_eq!(
            parse_args(args(&["--variant", "classic", "--once", "cozy space"])),
            Ok(CliCommand::Run {
                variant: Some(Variant::Classic),
                once: Some("cozy space".into()),
            })
        );
    }

    #[test]
    fn bad_arguments_are_rejected() {
        assert!(parse_args(args(&["--variant"])).is_err());
        assert!(parse_args(args(&["--variant", "neon"])).is_err());
        assert!(parse_args(args(&["--once"])).is_err());
        assert!(parse_args(args(&["--loud"])).is_err());
    }

    #[tokio::test]
    async fn blank_once_prompt_exits_without_a_request() {
        // Nothing listens here; reaching the network would return 1, not 2.
        let client = RecommendApi::new("http://127.0.0.1:9");
        let code = run_once(&client, &AppSettings::default(), "   ").await;
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn unreachable_backend_exits_with_failure() {
        let client =
            RecommendApi::new("http://127.0.0.1:9").with_timeout(std::time::Duration::from_secs(2));
        let code = run_once(&client, &AppSettings::default(), "cozy").await;
        assert_eq!(code, 1);
    }
}
