use autodefine_config::Config;
use autodefine_core::{MatchTargets, highlight};

pub fn handle_highlight(
    config: &Config,
    targets: &[String],
    sentence: &str,
    flag: bool,
) -> anyhow::Result<()> {
    let targets = MatchTargets::new(targets);
    let (replaced, result) = highlight(&targets, sentence, flag, &config.definition.highlight())?;

    tracing::debug!("{} targets, replaced: {}", targets.len(), replaced);
    println!("{result}");
    Ok(())
}
