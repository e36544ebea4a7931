use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use yatra_agents::{SpeakFileError, TourismCompanion};
use yatra_core::{clamp_days, parse_interests, ItineraryRequest, DEFAULT_INTERESTS};
use yatra_dashboard::render_table;
use yatra_storage::ArtifactStore;

pub async fn plan<S, W>(
    companion: &TourismCompanion<S>,
    budget: u32,
    days: i64,
    interests: Option<&str>,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    W: Write,
{
    let interests = match interests {
        Some(raw) => parse_interests(raw),
        None => DEFAULT_INTERESTS.iter().map(ToString::to_string).collect(),
    };
    let outcome = companion
        .plan_itinerary(ItineraryRequest {
            budget,
            days: clamp_days(days),
            interests,
        })
        .await?;

    if json {
        return write_json(out, &outcome);
    }
    writeln!(out, "{}", outcome.text)?;
    if let Some(path) = &outcome.saved_to {
        writeln!(out, "\nItinerary saved to: {}", path.display())?;
    }
    Ok(())
}

pub async fn translate<S, W>(
    companion: &TourismCompanion<S>,
    text: &str,
    lang: &str,
    save: bool,
    audio: bool,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    W: Write,
{
    let outcome = companion.translate(text, lang).await?;
    let saved = if save {
        Some(companion.save_translation(&outcome).await?)
    } else {
        None
    };
    let spoken = if audio {
        companion.speak_translation(&outcome).await
    } else {
        None
    };

    if json {
        return write_json(
            out,
            &serde_json::json!({
                "translation": outcome,
                "saved_to": saved,
                "audio": spoken,
            }),
        );
    }
    writeln!(out, "{}", outcome.text)?;
    if let Some(path) = saved {
        writeln!(out, "Saved translation to {}", path.display())?;
    }
    match spoken {
        Some(path) => writeln!(out, "Audio saved as {}", path.display())?,
        None if audio => writeln!(out, "TTS generation failed.")?,
        None => {}
    }
    Ok(())
}

/// A failed speech call is reported, not returned, so the exit status stays zero.
pub async fn speak<S, W>(
    companion: &TourismCompanion<S>,
    file: &Path,
    lang: &str,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    W: Write,
{
    let audio = match companion.speak_text_file(file, lang).await {
        Ok(audio) => audio,
        Err(SpeakFileError::NotFound(_)) => {
            writeln!(out, "File not found.")?;
            return Ok(());
        }
        Err(SpeakFileError::Empty(_)) => {
            writeln!(out, "File is empty.")?;
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    if json {
        return write_json(out, &serde_json::json!({ "audio": audio }));
    }
    match audio {
        Some(path) => writeln!(out, "Audio saved as {}", path.display())?,
        None => writeln!(out, "TTS generation failed.")?,
    }
    Ok(())
}

pub async fn dashboard<S, W>(
    companion: &TourismCompanion<S>,
    theme: &str,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: ArtifactStore,
    W: Write,
{
    let report = companion.build_dashboard(theme).await?;
    if json {
        return write_json(out, &report);
    }

    if !report.theme_recognized {
        writeln!(out, "Unknown theme. Showing generic 'heritage' data.")?;
    }
    writeln!(out, "{}\n", render_table(&report.rows))?;
    writeln!(out, "{}\n", report.summary)?;
    writeln!(
        out,
        "Dashboard and charts saved in folder: {}",
        report.folder.display()
    )?;
    Ok(())
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
