//! # Settings
//!
//! User preferences loaded from a YAML document with kebab-case keys. Every
//! key is optional:
//!
//! ```yaml
//! instrument: bass5
//! guitar-tuning: drop-d
//! theme: dark
//! frets: 15
//! pdf-frets: 15
//! show-scale-notes: true
//! show-leading-notes: false
//! playback-style: arpeggio
//! strum-direction: up
//! arpeggio-pattern: alternating
//! chord-duration: 1.5
//! ```
//!
//! Only the instrument, guitar tuning and theme are written back by
//! [`Settings::to_yaml`]; everything else is per-session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagram::DisplayOptions;
use crate::error::FretError;
use crate::fretmap::{FretMap, DEFAULT_FRETS, MAX_FRETS};
use crate::instrument::{GuitarTuning, Instrument};
use crate::playback::{ArpeggioPattern, PlaybackOptions, PlaybackStyle, StrumDirection};
use crate::scale::fold_key;

/// Fret count of exported diagrams when none is configured.
pub const DEFAULT_PDF_FRETS: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = FretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold_key(s).as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(FretError::ConfigError(format!("unknown theme {}", s))),
        }
    }
}

/// Raw settings for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawSettings {
    instrument: Option<String>,
    guitar_tuning: Option<String>,
    theme: Option<String>,
    frets: Option<u8>,
    pdf_frets: Option<u8>,
    show_scale_notes: Option<bool>,
    show_leading_notes: Option<bool>,
    playback_style: Option<String>,
    strum_direction: Option<String>,
    arpeggio_pattern: Option<String>,
    chord_duration: Option<f64>,
}

/// The persisted subset.
#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct PersistedSettings<'a> {
    instrument: &'a str,
    guitar_tuning: &'a str,
    theme: Theme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub instrument: Instrument,
    pub guitar_tuning: GuitarTuning,
    pub theme: Theme,
    pub frets: u8,
    pub pdf_frets: u8,
    pub display: DisplayOptions,
    pub playback: PlaybackOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            instrument: Instrument::default(),
            guitar_tuning: GuitarTuning::default(),
            theme: Theme::default(),
            frets: DEFAULT_FRETS,
            pdf_frets: DEFAULT_PDF_FRETS,
            display: DisplayOptions::default(),
            playback: PlaybackOptions::default(),
        }
    }
}

/// Parse an optional field, naming it in the error.
fn field<T>(name: &str, value: Option<&str>, default: T) -> Result<T, FretError>
where
    T: FromStr<Err = FretError>,
{
    match value {
        Some(text) => text
            .parse()
            .map_err(|e| {
                let detail = match e {
                    FretError::ConfigError(msg) => msg,
                    other => other.to_string(),
                };
                FretError::ConfigError(format!("{}: {}", name, detail))
            }),
        None => Ok(default),
    }
}

fn fret_count(name: &str, value: Option<u8>, default: u8) -> Result<u8, FretError> {
    match value {
        Some(n) if (1..=MAX_FRETS).contains(&n) => Ok(n),
        Some(n) => Err(FretError::ConfigError(format!(
            "{}: {} is outside 1..={}",
            name, n, MAX_FRETS
        ))),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_yaml(content: &str) -> Result<Self, FretError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawSettings =
            serde_yaml::from_str(content).map_err(|e| FretError::ConfigError(e.to_string()))?;
        let defaults = Self::default();

        let chord_duration = match raw.chord_duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                return Err(FretError::ConfigError(format!(
                    "chord-duration: {} is not a positive number of seconds",
                    d
                )))
            }
            None => defaults.playback.chord_duration,
        };

        Ok(Self {
            instrument: field("instrument", raw.instrument.as_deref(), defaults.instrument)?,
            guitar_tuning: field("guitar-tuning", raw.guitar_tuning.as_deref(), defaults.guitar_tuning)?,
            theme: field("theme", raw.theme.as_deref(), defaults.theme)?,
            frets: fret_count("frets", raw.frets, defaults.frets)?,
            pdf_frets: fret_count("pdf-frets", raw.pdf_frets, defaults.pdf_frets)?,
            display: DisplayOptions {
                show_scale_notes: raw.show_scale_notes.unwrap_or(defaults.display.show_scale_notes),
                show_leading_notes: raw.show_leading_notes.unwrap_or(defaults.display.show_leading_notes),
            },
            playback: PlaybackOptions {
                style: field::<PlaybackStyle>("playback-style", raw.playback_style.as_deref(), defaults.playback.style)?,
                direction: field::<StrumDirection>(
                    "strum-direction",
                    raw.strum_direction.as_deref(),
                    defaults.playback.direction,
                )?,
                pattern: field::<ArpeggioPattern>(
                    "arpeggio-pattern",
                    raw.arpeggio_pattern.as_deref(),
                    defaults.playback.pattern,
                )?,
                chord_duration,
                fretted: defaults.playback.fretted,
            },
        })
    }

    /// YAML holding only the persisted fields.
    pub fn to_yaml(&self) -> Result<String, FretError> {
        let persisted = PersistedSettings {
            instrument: self.instrument.key(),
            guitar_tuning: self.guitar_tuning.key(),
            theme: self.theme,
        };
        serde_yaml::to_string(&persisted).map_err(|e| FretError::ConfigError(e.to_string()))
    }

    /// Set the live fret count, rejecting values outside 1..=[`MAX_FRETS`].
    pub fn set_frets(&mut self, frets: u8) -> Result<(), FretError> {
        self.frets = fret_count("frets", Some(frets), self.frets)?;
        Ok(())
    }

    /// Set the export fret count, with the same bounds as the live view.
    pub fn set_pdf_frets(&mut self, frets: u8) -> Result<(), FretError> {
        self.pdf_frets = fret_count("pdf-frets", Some(frets), self.pdf_frets)?;
        Ok(())
    }

    /// Fretboard for the live view.
    pub fn fret_map(&self) -> FretMap {
        FretMap::new(self.instrument, self.guitar_tuning, self.frets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
        let settings = Settings::from_yaml("theme: dark\n").unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.frets, DEFAULT_FRETS);
        assert_eq!(settings.pdf_frets, DEFAULT_PDF_FRETS);
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
instrument: bass5
guitar-tuning: drop-d
theme: dark
frets: 15
pdf-frets: 20
show-scale-notes: false
show-leading-notes: true
playback-style: arpeggio
strum-direction: up
arpeggio-pattern: alternating
chord-duration: 1.5
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.instrument, Instrument::Bass5);
        assert_eq!(settings.guitar_tuning, GuitarTuning::DropD);
        assert_eq!(settings.frets, 15);
        assert_eq!(settings.pdf_frets, 20);
        assert!(!settings.display.show_scale_notes);
        assert!(settings.display.show_leading_notes);
        assert_eq!(settings.playback.style, PlaybackStyle::Arpeggio);
        assert_eq!(settings.playback.direction, StrumDirection::Up);
        assert_eq!(settings.playback.pattern, ArpeggioPattern::Alternating);
        assert_eq!(settings.playback.chord_duration, 1.5);

        let map = settings.fret_map();
        assert_eq!(map.string_count(), 5);
        assert_eq!(map.num_frets(), 15);
    }

    #[test]
    fn test_invalid_values_name_the_field() {
        let err = Settings::from_yaml("instrument: theremin").unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("instrument:")));

        let err = Settings::from_yaml("frets: 30").unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("frets:")));

        let err = Settings::from_yaml("chord-duration: -1").unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("chord-duration:")));

        let err = Settings::from_yaml("playback-style: shuffle").unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("playback-style:")));

        assert!(Settings::from_yaml("frets: [1, 2]").is_err());
    }

    #[test]
    fn test_fret_setters_check_bounds() {
        let mut settings = Settings::default();
        settings.set_frets(20).unwrap();
        settings.set_pdf_frets(24).unwrap();
        assert_eq!(settings.fret_map().num_frets(), 20);
        assert_eq!(settings.pdf_frets, 24);

        let err = settings.set_frets(0).unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("frets:")));
        let err = settings.set_pdf_frets(99).unwrap_err();
        assert!(matches!(&err, FretError::ConfigError(msg) if msg.starts_with("pdf-frets:")));
        assert_eq!(settings.frets, 20);
        assert_eq!(settings.pdf_frets, 24);
    }

    #[test]
    fn test_to_yaml_persists_three_fields() {
        let settings = Settings {
            instrument: Instrument::Mandolin,
            guitar_tuning: GuitarTuning::OpenG,
            theme: Theme::Dark,
            frets: 20,
            ..Settings::default()
        };
        let yaml = settings.to_yaml().unwrap();
        assert!(yaml.contains("instrument: mandolin"));
        assert!(yaml.contains("guitar-tuning: open-g"));
        assert!(yaml.contains("theme: dark"));
        assert!(!yaml.contains("frets"));

        let restored = Settings::from_yaml(&yaml).unwrap();
        assert_eq!(restored.instrument, Instrument::Mandolin);
        assert_eq!(restored.guitar_tuning, GuitarTuning::OpenG);
        assert_eq!(restored.frets, DEFAULT_FRETS);
    }
}
