//! Text rendering of sounds for listings and `info`.

use crate::domain::{Sound, SoundDetails, RECORDED_AT_FORMAT};

/// Width of the name column in listings
pub const NAME_WIDTH: usize = 32;

/// One listing line: short hash, name, duration, then the kind-specific column.
///
/// ```text
/// 3b1f0a2  My sound                           1.25s  2018-01-01 12:34:56
/// ```
pub fn list_line(sound: &Sound) -> String {
    let name: String = sound.name.chars().take(NAME_WIDTH).collect();
    let duration = format!("{:.2}s", sound.duration);

    let mut line = format!(
        "{}  {:<width$}  {:>7}",
        sound.hash.short(),
        name,
        duration,
        width = NAME_WIDTH
    );

    let extra = match &sound.details {
        SoundDetails::Raw { recorded_at, .. } => recorded_at.format(RECORDED_AT_FORMAT).to_string(),
        SoundDetails::Processed { .. } => sound.tags.join(","),
    };
    if !extra.is_empty() {
        line.push_str("  ");
        line.push_str(&extra);
    }
    line
}

/// Multi-line description of a sound and its direct derivatives
pub fn info(sound: &Sound, derived: &[Sound]) -> String {
    let mut lines = vec![
        format!("Name:        {}", sound.name),
        format!("Hash:        {}", sound.hash),
        format!("Path:        {}", sound.path),
        format!("Kind:        {}", sound.kind()),
        format!("Duration:    {:.2}s", sound.duration),
        format!("Tags:        {}", sound.tags.join(", ")),
    ];

    match &sound.details {
        SoundDetails::Raw {
            recorded_at,
            location,
        } => {
            lines.push(format!("Recorded at: {}", recorded_at.format(RECORDED_AT_FORMAT)));
            lines.push(format!("Location:    {}", location));
        }
        SoundDetails::Processed { origin, intensity } => {
            lines.push(format!("Origin:      {}", origin));
            if let Some(intensity) = intensity {
                lines.push(format!("Intensity:   {}", intensity));
            }
        }
    }

    if !derived.is_empty() {
        lines.push("Derived:".to_string());
        lines.extend(derived.iter().map(|d| format!("  {}", list_line(d))));
    }

    lines.join("\n")
}
