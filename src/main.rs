use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fretwise::playback::{schedule_chord, schedule_progression, Schedule};
use fretwise::{
    parse_chord, progression_chords, build_progression, render_text, Diagram, FretError,
    Settings, PRESETS,
};

/// Fretboard diagrams and playback schedules for chords and progressions
#[derive(Parser)]
#[command(name = "fretwise")]
#[command(version)]
struct Cli {
    /// Settings file (YAML); flags override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// guitar, bass4, bass5, bass6, ukulele, mandolin or banjo
    #[arg(long, global = true)]
    instrument: Option<String>,

    /// Guitar tuning, e.g. drop-d or dadgad
    #[arg(long, global = true)]
    tuning: Option<String>,

    /// Number of frets to draw
    #[arg(long, global = true)]
    frets: Option<u8>,

    /// Number of frets in exported diagrams
    #[arg(long, global = true)]
    pdf_frets: Option<u8>,

    /// Hide scale tones
    #[arg(long, global = true)]
    no_scale: bool,

    /// Mark the half step below the next chord's root
    #[arg(long, global = true)]
    leading: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
struct ChordArgs {
    /// Root note, e.g. C or F#
    root: String,

    /// Chord type: major, m, 7, maj7, m7, dim or aug
    #[arg(default_value = "major")]
    chord_type: String,

    /// Mode, e.g. dorian
    #[arg(long)]
    mode: Option<String>,
}

#[derive(clap::Args)]
struct ProgressionArgs {
    /// Numerals such as "ii-V-I", or a preset name such as "Jazz"
    progression: String,

    /// Key root
    #[arg(short, long, default_value = "C")]
    key: String,

    /// major or minor (presets carry their own)
    #[arg(short, long)]
    quality: Option<String>,

    /// Use seventh chords
    #[arg(long, conflicts_with = "triads")]
    sevenths: bool,

    /// Use triads even for presets that default to sevenths
    #[arg(long)]
    triads: bool,
}

impl ProgressionArgs {
    fn use_sevenths(&self) -> Option<bool> {
        match (self.sevenths, self.triads) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fretboard for one chord
    Chord {
        #[command(flatten)]
        chord: ChordArgs,

        /// Draw at the export fret count instead of the live one
        #[arg(long)]
        export: bool,
    },

    /// Print one fretboard per chord of a progression
    Progression {
        #[command(flatten)]
        progression: ProgressionArgs,

        /// Draw at the export fret count instead of the live one
        #[arg(long)]
        export: bool,
    },

    /// List the built-in progressions
    Presets,

    /// Print the playback schedule for a chord or progression
    Play {
        /// harmony, strum or arpeggio
        #[arg(long)]
        style: Option<String>,

        /// Strum direction: down or up
        #[arg(long)]
        direction: Option<String>,

        /// Arpeggio pattern: ascending, descending or alternating
        #[arg(long)]
        pattern: Option<String>,

        /// Seconds per chord
        #[arg(long)]
        duration: Option<f64>,

        /// Voice chords from the fretboard instead of root position
        #[arg(long)]
        fretted: bool,

        #[command(subcommand)]
        target: PlayTarget,
    },
}

#[derive(Subcommand)]
enum PlayTarget {
    Chord(ChordArgs),
    Progression(ProgressionArgs),
}

fn load_settings(cli: &Cli) -> Result<Settings, FretError> {
    let mut settings = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| FretError::ConfigError(format!("{}: {}", path.display(), e)))?;
            Settings::from_yaml(&content)?
        }
        None => Settings::default(),
    };

    if let Some(instrument) = &cli.instrument {
        settings.instrument = instrument.parse()?;
    }
    if let Some(tuning) = &cli.tuning {
        settings.guitar_tuning = tuning.parse()?;
    }
    if let Some(frets) = cli.frets {
        settings.set_frets(frets)?;
    }
    if let Some(frets) = cli.pdf_frets {
        settings.set_pdf_frets(frets)?;
    }
    if cli.no_scale {
        settings.display.show_scale_notes = false;
    }
    if cli.leading {
        settings.display.show_leading_notes = true;
    }
    debug!(?settings, "settings loaded");
    Ok(settings)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, FretError> {
    serde_json::to_string_pretty(value).map_err(|e| FretError::ConfigError(e.to_string()))
}

fn diagrams_text(diagrams: &[Diagram]) -> String {
    diagrams.iter().map(render_text).collect::<Vec<_>>().join("\n")
}

fn schedule_text(schedule: &Schedule) -> String {
    let mut out = format!(
        "program {}, {:.2}s, {} notes\n",
        schedule.program,
        schedule.total_duration,
        schedule.events.len()
    );
    for e in &schedule.events {
        let _ = writeln!(
            out,
            "{:>7.3}s  {:<4} midi {:>3}  {:>7.2} Hz  {:.3}s  vel {:.2}  chord {}",
            e.start, e.name, e.midi, e.frequency, e.duration, e.velocity, e.chord_index
        );
    }
    out
}

fn run(cli: Cli) -> Result<String, FretError> {
    let mut settings = load_settings(&cli)?;
    let fret_map = settings.fret_map();
    let display = settings.display;
    let format = cli.format;

    match cli.command {
        Commands::Chord { chord: args, export } => {
            let chord = parse_chord(&args.root, &args.chord_type, args.mode.as_deref())?;
            let context = display.context_for(&[], 0);
            let diagram = if export {
                Diagram::build_for_export(&fret_map, &chord, &context, settings.pdf_frets)?
            } else {
                Diagram::build(&fret_map, &chord, &context)?
            };
            match format {
                OutputFormat::Text => Ok(render_text(&diagram)),
                OutputFormat::Json => to_json(&diagram),
            }
        }
        Commands::Progression { progression: args, export } => {
            let chords = progression_chords(&args.progression, &args.key, args.quality.as_deref(), args.use_sevenths())?;
            let board = if export { fret_map.with_frets(settings.pdf_frets) } else { fret_map };
            let diagrams = build_progression(&board, &chords, display)?;
            match format {
                OutputFormat::Text => Ok(diagrams_text(&diagrams)),
                OutputFormat::Json => to_json(&diagrams),
            }
        }
        Commands::Presets => match format {
            OutputFormat::Text => {
                let mut out = String::new();
                for preset in PRESETS {
                    let _ = writeln!(
                        out,
                        "{:<16} {:<14} {}{}",
                        preset.description,
                        preset.value,
                        preset.quality,
                        if preset.use_sevenths { ", sevenths" } else { "" }
                    );
                }
                Ok(out)
            }
            OutputFormat::Json => to_json(&PRESETS),
        },
        Commands::Play {
            style,
            direction,
            pattern,
            duration,
            fretted,
            target,
        } => {
            if let Some(style) = style {
                settings.playback.style = style.parse()?;
            }
            if let Some(direction) = direction {
                settings.playback.direction = direction.parse()?;
            }
            if let Some(pattern) = pattern {
                settings.playback.pattern = pattern.parse()?;
            }
            if let Some(duration) = duration {
                settings.playback.chord_duration = duration;
            }
            settings.playback.fretted |= fretted;

            let schedule = match target {
                PlayTarget::Chord(args) => {
                    let chord = parse_chord(&args.root, &args.chord_type, args.mode.as_deref())?;
                    schedule_chord(&fret_map, &chord, &settings.playback)?
                }
                PlayTarget::Progression(args) => {
                    let chords =
                        progression_chords(&args.progression, &args.key, args.quality.as_deref(), args.use_sevenths())?;
                    schedule_progression(&fret_map, &chords, &settings.playback)?
                }
            };
            match format {
                OutputFormat::Text => Ok(schedule_text(&schedule)),
                OutputFormat::Json => to_json(&schedule),
            }
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, FretError> {
        let mut argv = vec!["fretwise"];
        argv.extend_from_slice(args);
        run(Cli::try_parse_from(argv).unwrap())
    }

    fn num_frets(json: &str) -> u64 {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        let diagram = if value.is_array() { &value[0] } else { &value };
        diagram["numFrets"].as_u64().unwrap()
    }

    #[test]
    fn test_export_uses_pdf_frets() {
        let live = run_args(&["--format", "json", "--frets", "5", "chord", "A", "m"]).unwrap();
        assert_eq!(num_frets(&live), 5);

        let export = run_args(&["--format", "json", "--frets", "5", "chord", "A", "m", "--export"]).unwrap();
        assert_eq!(num_frets(&export), 15);

        let export = run_args(&[
            "--format", "json", "--pdf-frets", "20", "progression", "Jazz", "--export",
        ])
        .unwrap();
        assert_eq!(num_frets(&export), 20);
    }

    #[test]
    fn test_fret_flags_are_bounded() {
        for args in [["--frets", "0"], ["--frets", "99"], ["--pdf-frets", "25"]] {
            let err = run_args(&[args[0], args[1], "chord", "C"]).unwrap_err();
            assert!(matches!(err, FretError::ConfigError(_)));
        }
    }
}
