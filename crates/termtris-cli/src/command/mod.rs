use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    // Lets `termtris --width 12` work without naming the mode.
    #[clap(flatten)]
    play: PlayArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal (the default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(args.play)) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["termtris", "--width", "12"]).unwrap();
        assert!(args.mode.is_none());
        assert_eq!(args.play.width, 12);

        let args = CommandArgs::try_parse_from(["termtris", "play", "--height", "30"]).unwrap();
        let Some(Mode::Play(play)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(play.height, 30);
        assert_eq!(play.width, 10);
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        assert!(CommandArgs::try_parse_from(["termtris", "--seed", "xyz"]).is_err());
        let seed = "00112233445566778899aabbccddeeff";
        let args = CommandArgs::try_parse_from(["termtris", "--seed", seed]).unwrap();
        assert_eq!(args.play.seed.unwrap().to_string(), seed);
    }
}
